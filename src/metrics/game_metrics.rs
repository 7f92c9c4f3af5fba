use std::time::{Duration, Instant};

use crate::game::Winner;

/// Match statistics for the current run; nothing is persisted
pub struct GameMetrics {
    /// When the match clock was last advanced
    pub last_update: Instant,
    pub elapsed_time: Duration,
    pub games_played: u32,
    pub player_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
    pub high_score: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_played: 0,
            player_wins: 0,
            ai_wins: 0,
            draws: 0,
            high_score: 0,
        }
    }

    /// Advance the match clock by the time since the last update; time spent
    /// while not `live` (paused or over) is skipped
    pub fn update(&mut self, live: bool) {
        let now = Instant::now();
        if live {
            self.elapsed_time += now.duration_since(self.last_update);
        }
        self.last_update = now;
    }

    pub fn on_game_start(&mut self) {
        self.last_update = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, winner: Winner, player_score: u32) {
        self.games_played += 1;
        match winner {
            Winner::Player => self.player_wins += 1,
            Winner::Ai => self.ai_wins += 1,
            Winner::Draw => self.draws += 1,
        }
        if player_score > self.high_score {
            self.high_score = player_score;
        }
    }

    /// Wins-losses-draws from the player's side
    pub fn format_record(&self) -> String {
        format!("{}-{}-{}", self.player_wins, self.ai_wins, self.draws)
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
