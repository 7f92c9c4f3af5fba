//! Heuristic controller for the AI snake
//!
//! Each tick the AI either takes a random exploration turn (probability set by
//! [`AiLevel::random_factor`]) or steers greedily toward the nearest food,
//! refusing turns whose next cell is a wall or an occupied cell.

use super::config::AiLevel;
use super::direction::Direction;
use super::grid::Grid;
use super::rng::RandomSource;
use super::state::{Food, Snake};
use tracing::trace;

/// How the AI arrived at its direction for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// Random non-reversing turn, no safety check
    Explore,
    /// Safe candidate that closes distance to the nearest food
    Seek,
    /// First safe non-reversing direction in scan order
    Fallback,
    /// Nothing safe (or no food); direction left as it was
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiDecision {
    pub direction: Direction,
    pub kind: DecisionKind,
}

/// Whether moving `snake` one cell in `direction` keeps it on the grid and off
/// every segment currently occupied by either snake.
///
/// The whole current body is checked, tail included, even though the tail
/// will move away this tick.
pub fn is_safe(snake: &Snake, opponent: &Snake, grid: &Grid, direction: Direction) -> bool {
    let next = snake.head().moved_in_direction(direction);

    grid.in_bounds(next) && !snake.occupies(next) && !opponent.occupies(next)
}

/// Nearest food by Manhattan distance; ties go to the earliest item
fn nearest_food<'a>(snake: &Snake, foods: &'a [Food]) -> Option<&'a Food> {
    let head = snake.head();
    let mut best: Option<(&Food, i32)> = None;

    for food in foods {
        let distance = head.manhattan_distance(food.position);
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((food, distance));
        }
    }

    best.map(|(food, _)| food)
}

/// Directions that close the gap to `food`, larger axis distance first.
///
/// At most one horizontal and one vertical candidate; a candidate that would
/// reverse the current direction is dropped. On equal distances the horizontal
/// candidate stays first.
fn seek_candidates(snake: &Snake, food: &Food) -> Vec<(Direction, i32)> {
    let head = snake.head();
    let dx = food.position.x - head.x;
    let dy = food.position.y - head.y;
    let mut candidates = Vec::with_capacity(2);

    let horizontal = match dx.signum() {
        1 => Some(Direction::Right),
        -1 => Some(Direction::Left),
        _ => None,
    };
    let vertical = match dy.signum() {
        1 => Some(Direction::Down),
        -1 => Some(Direction::Up),
        _ => None,
    };

    if let Some(dir) = horizontal.filter(|d| !snake.direction.is_opposite(*d)) {
        candidates.push((dir, dx.abs()));
    }
    if let Some(dir) = vertical.filter(|d| !snake.direction.is_opposite(*d)) {
        candidates.push((dir, dy.abs()));
    }

    // Stable sort keeps insertion order on ties
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates
}

/// Pick the AI snake's direction for this tick
pub fn decide(
    snake: &Snake,
    opponent: &Snake,
    foods: &[Food],
    grid: &Grid,
    level: AiLevel,
    rng: &mut impl RandomSource,
) -> AiDecision {
    let current = snake.direction;

    if rng.next_unit() < level.random_factor() {
        let turns: Vec<Direction> = current.turns().collect();
        let direction = turns[rng.next_index(turns.len())];
        trace!(?direction, "ai explores");
        return AiDecision {
            direction,
            kind: DecisionKind::Explore,
        };
    }

    let Some(target) = nearest_food(snake, foods) else {
        return AiDecision {
            direction: current,
            kind: DecisionKind::Unchanged,
        };
    };

    for (direction, _) in seek_candidates(snake, target) {
        if is_safe(snake, opponent, grid, direction) {
            trace!(?direction, target = ?target.position, "ai seeks food");
            return AiDecision {
                direction,
                kind: DecisionKind::Seek,
            };
        }
    }

    if let Some(direction) = current
        .turns()
        .find(|d| is_safe(snake, opponent, grid, *d))
    {
        trace!(?direction, "ai falls back to a safe turn");
        return AiDecision {
            direction,
            kind: DecisionKind::Fallback,
        };
    }

    trace!(direction = ?current, "ai found no safe direction");
    AiDecision {
        direction: current,
        kind: DecisionKind::Unchanged,
    }
}
