use super::grid::Grid;
use super::rng::RandomSource;
use super::state::{Food, Position, Rgb, Snake};
use tracing::debug;

/// Number of food items kept on the board at all times
pub const FOOD_COUNT: usize = 3;

/// Colours a freshly spawned food item may take
pub const FOOD_PALETTE: [Rgb; 5] = [
    Rgb::new(0xe7, 0x4c, 0x3c),
    Rgb::new(0xf1, 0xc4, 0x0f),
    Rgb::new(0x34, 0x98, 0xdb),
    Rgb::new(0x9b, 0x59, 0xb6),
    Rgb::new(0x2e, 0xcc, 0x71),
];

fn is_free(pos: Position, snakes: &[&Snake], foods: &[Food]) -> bool {
    snakes.iter().all(|snake| !snake.occupies(pos)) && foods.iter().all(|food| food.position != pos)
}

/// Place a food item on a random cell not covered by a snake or another food item.
///
/// Rejection-samples uniformly over the grid with no retry limit, so the caller
/// must keep the occupied area well below the grid area.
pub fn spawn_food(
    grid: &Grid,
    snakes: &[&Snake],
    foods: &[Food],
    rng: &mut impl RandomSource,
) -> Food {
    loop {
        let x = rng.next_index(grid.width) as i32;
        let y = rng.next_index(grid.height) as i32;
        let position = Position::new(x, y);

        if is_free(position, snakes, foods) {
            let color = FOOD_PALETTE[rng.next_index(FOOD_PALETTE.len())];
            debug!(x, y, "food spawned");
            return Food { position, color };
        }
    }
}

/// Spawn food until `foods` holds `count` items
pub fn fill_food(
    grid: &Grid,
    snakes: &[&Snake],
    foods: &mut Vec<Food>,
    count: usize,
    rng: &mut impl RandomSource,
) {
    debug_assert!(
        snakes.iter().map(|snake| snake.len()).sum::<usize>() + count <= grid.area(),
        "no room for {count} food items"
    );

    while foods.len() < count {
        let food = spawn_food(grid, snakes, foods, rng);
        foods.push(food);
    }
}
