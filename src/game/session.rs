use super::ai::{self, AiDecision};
use super::config::GameConfig;
use super::direction::Direction;
use super::engine::{self, CollisionReport};
use super::food::{self, FOOD_COUNT};
use super::grid::Grid;
use super::rng::{RandomSource, SessionRng};
use super::state::{
    AI_COLOR, CollisionType, Food, GameStatus, PLAYER_COLOR, Position, Snake, Winner,
};
use tracing::{debug, info};

/// Initial length of both snakes
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// What happened during one executed tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub ai_decision: AiDecision,
    pub player_ate: bool,
    pub ai_ate: bool,
    /// Set on the tick that ends the game
    pub winner: Option<Winner>,
}

/// All state of one player-versus-AI game
#[derive(Debug, Clone)]
pub struct GameSession<R = SessionRng> {
    config: GameConfig,
    grid: Grid,
    player: Snake,
    ai: Snake,
    foods: Vec<Food>,
    status: GameStatus,
    winner: Option<Winner>,
    collisions: CollisionReport,
    ticks: u64,
    rng: R,
}

impl<R: RandomSource> GameSession<R> {
    /// Start a new game in the `Running` state
    pub fn new(config: GameConfig, rng: R) -> Self {
        let grid = Grid::from_map_size(config.map_size);
        let (player, ai) = starting_snakes(&grid);

        let mut session = Self {
            config,
            grid,
            player,
            ai,
            foods: Vec::with_capacity(FOOD_COUNT),
            status: GameStatus::Running,
            winner: None,
            collisions: CollisionReport::default(),
            ticks: 0,
            rng,
        };
        session.replenish_food();

        info!(
            difficulty = %config.difficulty,
            ai_level = %config.ai_level,
            map_size = %config.map_size,
            "game started"
        );
        session
    }

    /// Start a running game from a prepared board, e.g. to replay a position.
    ///
    /// Missing food is topped up to the usual count; the caller is responsible
    /// for a layout where snakes and food do not overlap.
    pub fn with_layout(
        config: GameConfig,
        player: Snake,
        ai: Snake,
        foods: Vec<Food>,
        rng: R,
    ) -> Self {
        let mut session = Self {
            config,
            grid: Grid::from_map_size(config.map_size),
            player,
            ai,
            foods,
            status: GameStatus::Running,
            winner: None,
            collisions: CollisionReport::default(),
            ticks: 0,
            rng,
        };
        session.replenish_food();
        session
    }

    /// Reset everything except the RNG, optionally switching configuration
    pub fn restart(&mut self, config: Option<GameConfig>) {
        if let Some(config) = config {
            self.config = config;
        }

        self.grid = Grid::from_map_size(self.config.map_size);
        let (player, ai) = starting_snakes(&self.grid);
        self.player = player;
        self.ai = ai;
        self.foods.clear();
        self.status = GameStatus::Running;
        self.winner = None;
        self.collisions = CollisionReport::default();
        self.ticks = 0;
        self.replenish_food();

        info!(
            difficulty = %self.config.difficulty,
            ai_level = %self.config.ai_level,
            map_size = %self.config.map_size,
            "game restarted"
        );
    }

    /// Advance the game by one step. Does nothing unless the game is running.
    ///
    /// Order: commit player input, AI decision, move both snakes, resolve
    /// collisions, then feeding and food replacement.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.status != GameStatus::Running {
            return None;
        }

        self.player.commit_direction();

        let ai_decision = ai::decide(
            &self.ai,
            &self.player,
            &self.foods,
            &self.grid,
            self.config.ai_level,
            &mut self.rng,
        );
        self.ai.direction = ai_decision.direction;

        engine::move_snake(&mut self.player);
        engine::move_snake(&mut self.ai);

        let collisions = engine::check_collisions(&self.player, &self.ai, &self.grid);
        let winner = collisions.winner();
        if let Some(winner) = winner {
            self.collisions = collisions;
            self.winner = Some(winner);
            self.status = GameStatus::GameOver;
            info!(
                ?winner,
                player_score = self.player.score,
                ai_score = self.ai.score,
                "game over"
            );
        }

        // Feeding still resolves on the tick that ends the game
        let player_ate = self.feed_player();
        let ai_ate = self.feed_ai();

        self.ticks += 1;

        Some(TickReport {
            ai_decision,
            player_ate,
            ai_ate,
            winner,
        })
    }

    fn feed_player(&mut self) -> bool {
        let Some(eaten) = engine::check_food(&mut self.player, &mut self.foods) else {
            return false;
        };
        debug!(
            x = eaten.position.x,
            y = eaten.position.y,
            score = self.player.score,
            "player ate food"
        );
        self.replenish_food();
        true
    }

    fn feed_ai(&mut self) -> bool {
        let Some(eaten) = engine::check_food(&mut self.ai, &mut self.foods) else {
            return false;
        };
        debug!(
            x = eaten.position.x,
            y = eaten.position.y,
            score = self.ai.score,
            "ai ate food"
        );
        self.replenish_food();
        true
    }

    fn replenish_food(&mut self) {
        food::fill_food(
            &self.grid,
            &[&self.player, &self.ai],
            &mut self.foods,
            FOOD_COUNT,
            &mut self.rng,
        );
    }

    /// Buffer the player's next direction; an exact reversal is ignored
    pub fn set_player_direction(&mut self, direction: Direction) -> bool {
        self.player.steer(direction)
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
            debug!("game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Running;
            debug!("game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::GameOver => {}
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn player(&self) -> &Snake {
        &self.player
    }

    pub fn ai(&self) -> &Snake {
        &self.ai
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn player_score(&self) -> u32 {
        self.player.score
    }

    pub fn ai_score(&self) -> u32 {
        self.ai.score
    }

    /// Collision causes recorded on the final tick
    pub fn collisions(&self) -> CollisionReport {
        self.collisions
    }

    /// Number of ticks executed since the last (re)start
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Human-readable account of how the game ended; empty while it is still going
    pub fn result_description(&self) -> &'static str {
        if !self.is_over() {
            return "";
        }

        let player_score = self.player.score;
        let ai_score = self.ai.score;

        match self.winner {
            Some(Winner::Player) if player_score > ai_score => {
                "Congratulations! You outscored the AI and beat it!"
            }
            Some(Winner::Ai) if ai_score > player_score => "The AI scored higher. Better luck next time!",
            Some(Winner::Player) => match self.collisions.ai {
                Some(CollisionType::Wall) => "The AI hit the wall. You win!",
                Some(CollisionType::SelfCollision) => "The AI ran into itself. You win!",
                Some(CollisionType::Opponent) => "The AI ran into your body. You win!",
                None => "You beat the AI!",
            },
            Some(Winner::Ai) => match self.collisions.player {
                Some(CollisionType::Wall) => "You hit the wall. The AI wins!",
                Some(CollisionType::SelfCollision) => "You ran into yourself. The AI wins!",
                Some(CollisionType::Opponent) => "You ran into the AI's body. The AI wins!",
                None => "The AI beat you!",
            },
            Some(Winner::Draw) | None => "Both snakes died at the same time. It's a draw!",
        }
    }

    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut Snake, &mut Snake, &mut Vec<Food>) {
        (&mut self.player, &mut self.ai, &mut self.foods)
    }
}

/// Player on the left quarter heading right, AI on the right quarter heading left
fn starting_snakes(grid: &Grid) -> (Snake, Snake) {
    let mid_y = (grid.height / 2) as i32;
    let player_head = Position::new((grid.width / 4) as i32, mid_y);
    let ai_head = Position::new((grid.width * 3 / 4) as i32, mid_y);

    (
        Snake::new(player_head, Direction::Right, INITIAL_SNAKE_LENGTH, PLAYER_COLOR),
        Snake::new(ai_head, Direction::Left, INITIAL_SNAKE_LENGTH, AI_COLOR),
    )
}
