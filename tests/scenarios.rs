use snake_duel::game::{
    AiLevel, CollisionType, DecisionKind, Difficulty, Direction, Food, GameConfig, GameLoop,
    GameSession, ManualScheduler, MapSize, Position, RandomSource, Rgb, SessionRng, Snake, Winner,
};

/// Always answers 0.5, with indices counting upwards
struct HalfRandom {
    next: usize,
}

impl RandomSource for HalfRandom {
    fn next_unit(&mut self) -> f64 {
        0.5
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.next += 1;
        (self.next - 1) % len
    }
}

const FOOD_COLOR: Rgb = Rgb::new(0xe7, 0x4c, 0x3c);

fn small(ai_level: AiLevel) -> GameConfig {
    GameConfig::new(Difficulty::Medium, ai_level, MapSize::Small)
}

fn snake_at(cells: &[(i32, i32)], direction: Direction) -> Snake {
    let mut snake = Snake::new(Position::new(0, 0), direction, 1, Rgb::new(0, 0, 0));
    snake.body = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
    snake
}

fn food_at(x: i32, y: i32) -> Food {
    Food {
        position: Position::new(x, y),
        color: FOOD_COLOR,
    }
}

fn corner_food() -> Vec<Food> {
    vec![food_at(0, 0), food_at(19, 0), food_at(0, 14)]
}

#[test]
fn player_moves_right_one_cell() {
    let player = snake_at(&[(5, 7), (4, 7), (3, 7)], Direction::Right);
    let ai = snake_at(&[(15, 7), (16, 7), (17, 7)], Direction::Left);
    let mut session = GameSession::with_layout(
        small(AiLevel::Hard),
        player,
        ai,
        corner_food(),
        HalfRandom { next: 0 },
    );

    session.tick();

    assert_eq!(
        session.player().body,
        vec![Position::new(6, 7), Position::new(5, 7), Position::new(4, 7)]
    );
    assert!(!session.is_over());
}

#[test]
fn player_into_ai_body_hands_ai_the_win() {
    let player = snake_at(&[(9, 7), (8, 7), (7, 7)], Direction::Right);
    let ai = snake_at(&[(10, 6), (10, 7), (10, 8)], Direction::Up);
    let mut session = GameSession::with_layout(
        small(AiLevel::Hard),
        player,
        ai,
        corner_food(),
        HalfRandom { next: 0 },
    );

    session.tick();

    assert!(session.is_over());
    assert_eq!(session.winner(), Some(Winner::Ai));
    assert_eq!(session.collisions().player, Some(CollisionType::Opponent));
}

#[test]
fn hard_ai_at_half_never_explores() {
    let mut session = GameSession::new(small(AiLevel::Hard), HalfRandom { next: 0 });

    for _ in 0..10 {
        let Some(report) = session.tick() else {
            break;
        };
        assert_ne!(report.ai_decision.kind, DecisionKind::Explore);
    }
}

#[test]
fn player_off_left_edge_dies() {
    let player = snake_at(&[(0, 3), (1, 3), (2, 3)], Direction::Left);
    let ai = snake_at(&[(15, 7), (16, 7), (17, 7)], Direction::Left);
    let mut session = GameSession::with_layout(
        small(AiLevel::Hard),
        player,
        ai,
        vec![food_at(19, 0), food_at(19, 14), food_at(10, 0)],
        HalfRandom { next: 0 },
    );

    session.tick();

    assert_eq!(session.player().head(), Position::new(-1, 3));
    assert_eq!(session.collisions().player, Some(CollisionType::Wall));
    assert_eq!(session.winner(), Some(Winner::Ai));
}

/// One tick of movement, with or without a meal, for one snake
fn assert_stepped(before: &Snake, after: &Snake, ate: bool) {
    let len = before.len();

    // Every segment took the place of the one ahead of it
    assert_eq!(&after.body[1..len], &before.body[..len - 1]);

    if ate {
        assert_eq!(after.score, before.score + 10);
        assert_eq!(after.len(), len + 1);
        assert_eq!(after.tail(), after.body[len - 1]);
    } else {
        assert_eq!(after.score, before.score);
        assert_eq!(after.len(), len);
    }
}

#[test]
fn movement_and_growth_invariants_hold_over_a_seeded_game() {
    // Food two cells ahead of the player and five ahead of the AI
    let player = snake_at(&[(5, 7), (4, 7), (3, 7)], Direction::Right);
    let ai = snake_at(&[(15, 3), (16, 3), (17, 3)], Direction::Left);
    let foods = vec![food_at(7, 7), food_at(10, 3), food_at(19, 14)];
    let mut session = GameSession::with_layout(
        small(AiLevel::Medium),
        player,
        ai,
        foods,
        SessionRng::new(2024),
    );
    let mut player_meals = 0;
    let mut ai_meals = 0;

    while !session.is_over() && session.ticks() < 200 {
        let player_before = session.player().clone();
        let ai_before = session.ai().clone();
        let Some(report) = session.tick() else {
            break;
        };

        assert_stepped(&player_before, session.player(), report.player_ate);
        assert_stepped(&ai_before, session.ai(), report.ai_ate);
        player_meals += usize::from(report.player_ate);
        ai_meals += usize::from(report.ai_ate);

        // Heads eat whatever they land on, so food never sits under a snake
        let foods = session.foods();
        assert_eq!(foods.len(), 3);
        for (i, food) in foods.iter().enumerate() {
            assert!(foods[i + 1..].iter().all(|f| f.position != food.position));
            assert!(!session.player().occupies(food.position));
            assert!(!session.ai().occupies(food.position));
        }

        // Steer away from the right wall to keep the game going
        if session.player().head().x >= 17 {
            session.set_player_direction(Direction::Down);
        }
    }

    assert!(player_meals >= 1, "the player never reached the food in its path");
    assert_eq!(session.player_score(), 10 * player_meals as u32);
    assert_eq!(session.ai_score(), 10 * ai_meals as u32);
}

#[test]
fn terminal_state_is_idempotent_through_the_loop() {
    let mut game_loop = GameLoop::init(
        small(AiLevel::Easy),
        SessionRng::new(9),
        ManualScheduler::new(),
        None,
    );

    for _ in 0..20 {
        game_loop.fire();
    }
    assert!(game_loop.is_over());

    let winner = game_loop.winner();
    let scores = (game_loop.player_score(), game_loop.ai_score());
    let body = game_loop.session().player().body.clone();

    for _ in 0..5 {
        assert!(game_loop.fire().is_none());
    }
    assert_eq!(game_loop.winner(), winner);
    assert_eq!((game_loop.player_score(), game_loop.ai_score()), scores);
    assert_eq!(game_loop.session().player().body, body);

    game_loop.restart(None);
    assert!(!game_loop.is_over());
    assert_eq!(game_loop.winner(), None);
    assert_eq!(game_loop.result_description(), "");
}

#[test]
fn reversal_never_reaches_the_buffer() {
    let mut session = GameSession::new(small(AiLevel::Hard), SessionRng::new(1));

    assert!(!session.set_player_direction(Direction::Left));
    assert_eq!(session.player().pending_direction, None);

    session.set_player_direction(Direction::Down);
    assert!(!session.set_player_direction(Direction::Left));
    assert_eq!(session.player().pending_direction, Some(Direction::Down));
}
