use super::grid::Grid;
use super::state::{CollisionType, Food, Snake, Winner};

/// Points awarded per food item eaten
pub const FOOD_SCORE: u32 = 10;

/// Collisions detected for both snakes after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    pub player: Option<CollisionType>,
    pub ai: Option<CollisionType>,
}

impl CollisionReport {
    /// Terminal outcome of the tick, if either snake died
    pub fn winner(&self) -> Option<Winner> {
        match (self.player.is_some(), self.ai.is_some()) {
            (true, true) => Some(Winner::Draw),
            (true, false) => Some(Winner::Ai),
            (false, true) => Some(Winner::Player),
            (false, false) => None,
        }
    }
}

/// Translate the snake one cell in its committed direction
pub fn move_snake(snake: &mut Snake) {
    let new_head = snake.head().moved_in_direction(snake.direction);
    snake.body.insert(0, new_head);
    snake.body.pop();
}

/// Why `snake` dies at its current position, if it does.
///
/// Causes are checked in order wall, own body, opponent body; the first hit wins.
pub fn collision_for(snake: &Snake, opponent: &Snake, grid: &Grid) -> Option<CollisionType> {
    let head = snake.head();

    if !grid.in_bounds(head) {
        return Some(CollisionType::Wall);
    }

    if snake.collides_with_body(head) {
        return Some(CollisionType::SelfCollision);
    }

    if opponent.occupies(head) {
        return Some(CollisionType::Opponent);
    }

    None
}

/// Resolve collisions for both snakes from their post-move bodies
pub fn check_collisions(player: &Snake, ai: &Snake, grid: &Grid) -> CollisionReport {
    CollisionReport {
        player: collision_for(player, ai, grid),
        ai: collision_for(ai, player, grid),
    }
}

/// Eat the first food item under the snake's head.
///
/// Awards [`FOOD_SCORE`], appends a copy of the tail so the snake grows by one
/// over the next move, and removes the item from `foods`. Returns the eaten item.
pub fn check_food(snake: &mut Snake, foods: &mut Vec<Food>) -> Option<Food> {
    let head = snake.head();
    let index = foods.iter().position(|food| food.position == head)?;

    snake.score += FOOD_SCORE;
    let tail = snake.tail();
    snake.body.push(tail);

    Some(foods.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::food::FOOD_PALETTE;
    use crate::game::state::{AI_COLOR, PLAYER_COLOR, Position};

    fn food_at(x: i32, y: i32) -> Food {
        Food {
            position: Position::new(x, y),
            color: FOOD_PALETTE[0],
        }
    }

    fn snake(cells: &[(i32, i32)], direction: Direction) -> Snake {
        let mut snake = Snake::new(Position::new(0, 0), direction, 1, PLAYER_COLOR);
        snake.body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        snake
    }

    #[test]
    fn test_basic_movement() {
        let mut player = snake(&[(5, 7), (4, 7), (3, 7)], Direction::Right);
        move_snake(&mut player);
        assert_eq!(
            player.body,
            vec![Position::new(6, 7), Position::new(5, 7), Position::new(4, 7)]
        );

        player.direction = Direction::Up;
        move_snake(&mut player);
        assert_eq!(
            player.body,
            vec![Position::new(6, 6), Position::new(6, 7), Position::new(5, 7)]
        );
    }

    #[test]
    fn test_wall_collision() {
        let grid = Grid::new(20, 15);
        let mut player = snake(&[(0, 7), (1, 7), (2, 7)], Direction::Left);
        let ai = snake(&[(15, 7), (16, 7), (17, 7)], Direction::Left);

        move_snake(&mut player);
        assert_eq!(player.head(), Position::new(-1, 7));

        let report = check_collisions(&player, &ai, &grid);
        assert_eq!(report.player, Some(CollisionType::Wall));
        assert_eq!(report.ai, None);
        assert_eq!(report.winner(), Some(Winner::Ai));
    }

    #[test]
    fn test_self_collision() {
        let grid = Grid::new(20, 15);
        // Head has looped back onto its own body
        let player = snake(&[(5, 5), (6, 5), (6, 6), (5, 6), (5, 5)], Direction::Up);
        let ai = snake(&[(15, 7), (16, 7), (17, 7)], Direction::Left);

        let report = check_collisions(&player, &ai, &grid);
        assert_eq!(report.player, Some(CollisionType::SelfCollision));
        assert_eq!(report.winner(), Some(Winner::Ai));
    }

    #[test]
    fn test_opponent_collision() {
        let grid = Grid::new(20, 15);
        let player = snake(&[(10, 7), (9, 7), (8, 7)], Direction::Right);
        let ai = snake(&[(10, 6), (10, 7), (10, 8)], Direction::Up);

        let report = check_collisions(&player, &ai, &grid);
        assert_eq!(report.player, Some(CollisionType::Opponent));
        assert_eq!(report.ai, None);
        assert_eq!(report.winner(), Some(Winner::Ai));
    }

    #[test]
    fn test_head_on_collision_is_draw() {
        let grid = Grid::new(20, 15);
        let player = snake(&[(10, 7), (9, 7)], Direction::Right);
        let ai = snake(&[(10, 7), (11, 7)], Direction::Left);

        let report = check_collisions(&player, &ai, &grid);
        assert_eq!(report.player, Some(CollisionType::Opponent));
        assert_eq!(report.ai, Some(CollisionType::Opponent));
        assert_eq!(report.winner(), Some(Winner::Draw));
    }

    #[test]
    fn test_wall_takes_precedence() {
        let grid = Grid::new(20, 15);
        let player = snake(&[(-1, 7), (0, 7)], Direction::Left);
        let ai = snake(&[(-1, 7), (-1, 8)], Direction::Up);

        let report = check_collisions(&player, &ai, &grid);
        assert_eq!(report.player, Some(CollisionType::Wall));
        assert_eq!(report.ai, Some(CollisionType::Wall));
    }

    #[test]
    fn test_no_collision() {
        let grid = Grid::new(20, 15);
        let player = snake(&[(5, 7), (4, 7), (3, 7)], Direction::Right);
        let ai = Snake::new(Position::new(15, 7), Direction::Left, 3, AI_COLOR);
        assert_eq!(check_collisions(&player, &ai, &grid).winner(), None);
    }

    #[test]
    fn test_food_consumption() {
        let mut player = snake(&[(6, 7), (5, 7), (4, 7)], Direction::Right);
        let mut foods = vec![food_at(1, 1), food_at(6, 7), food_at(2, 2)];

        let eaten = check_food(&mut player, &mut foods);

        assert_eq!(eaten.map(|f| f.position), Some(Position::new(6, 7)));
        assert_eq!(player.score, FOOD_SCORE);
        assert_eq!(player.len(), 4);
        assert_eq!(player.body[3], Position::new(4, 7));
        assert_eq!(foods.len(), 2);
        assert!(foods.iter().all(|f| f.position != Position::new(6, 7)));

        // The duplicated tail becomes a real segment after the next move
        move_snake(&mut player);
        assert_eq!(
            player.body,
            vec![
                Position::new(7, 7),
                Position::new(6, 7),
                Position::new(5, 7),
                Position::new(4, 7)
            ]
        );
    }

    #[test]
    fn test_only_first_matching_food_is_eaten() {
        let mut player = snake(&[(6, 7), (5, 7)], Direction::Right);
        let mut foods = vec![food_at(6, 7), food_at(6, 7)];

        check_food(&mut player, &mut foods);

        assert_eq!(player.score, FOOD_SCORE);
        assert_eq!(foods.len(), 1);
    }

    #[test]
    fn test_no_food_under_head() {
        let mut player = snake(&[(6, 7), (5, 7)], Direction::Right);
        let mut foods = vec![food_at(1, 1)];

        assert_eq!(check_food(&mut player, &mut foods), None);
        assert_eq!(player.score, 0);
        assert_eq!(player.len(), 2);
        assert_eq!(foods.len(), 1);
    }
}
