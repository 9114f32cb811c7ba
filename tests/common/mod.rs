#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    world::World,
};
use math_castle::{
    equation::{Equation, EquationItem},
    error::GameError,
    events::{FeedbackEvent, GameCommand},
    game::Game,
    systems::{
        BossBundle, BossHits, BossTimer, Enemy, EnemyBundle, EnemyIds, EnemyKind, EnemyStatus, FrameClock, GamePhase, GameRng,
        GameSession, LastAttack, LastSpawned, PendingDamage, Progress, Speed, SpawnTimer, VisualCues,
    },
};
use rand::{rngs::SmallRng, SeedableRng};

pub const TEST_SEED: u64 = 0x5EED;

/// Creates a world with every resource the systems expect, in the playing phase at `level`.
pub fn create_test_world(level: u32) -> World {
    let mut world = World::new();

    EventRegistry::register_event::<GameError>(&mut world);
    EventRegistry::register_event::<FeedbackEvent>(&mut world);

    world.insert_resource(GameSession {
        phase: GamePhase::Playing,
        level,
        ..GameSession::default()
    });
    world.insert_resource(FrameClock::default());
    world.insert_resource(Equation::default());
    world.insert_resource(SpawnTimer::default());
    world.insert_resource(LastSpawned::default());
    world.insert_resource(BossTimer::default());
    world.insert_resource(VisualCues::default());
    world.insert_resource(PendingDamage::default());
    world.insert_resource(LastAttack::default());
    world.insert_resource(EnemyIds::default());
    world.insert_resource(GameRng(SmallRng::seed_from_u64(TEST_SEED)));

    world
}

/// Moves the world's clock to `now`, reporting `elapsed` milliseconds since the previous tick.
pub fn set_clock(world: &mut World, now: f64, elapsed: f64) {
    let mut clock = world.resource_mut::<FrameClock>();
    clock.advance(now - elapsed);
    clock.advance(now);
}

pub fn spawn_enemy(world: &mut World, id: u64, kind: EnemyKind, value: u32, progress: f32, speed: f32) -> Entity {
    world
        .spawn(EnemyBundle {
            enemy: Enemy { id, kind, value },
            progress: Progress(progress),
            speed: Speed(speed),
            status: EnemyStatus::Walking,
        })
        .id()
}

pub fn spawn_boss(world: &mut World, id: u64, value: u32, progress: f32) -> Entity {
    world
        .spawn(BossBundle {
            enemy: EnemyBundle {
                enemy: Enemy {
                    id,
                    kind: EnemyKind::Boss,
                    value,
                },
                progress: Progress(progress),
                speed: Speed(EnemyKind::Boss.base_speed()),
                status: EnemyStatus::Walking,
            },
            hits: BossHits(5),
        })
        .id()
}

pub fn drain_feedback(world: &mut World) -> Vec<FeedbackEvent> {
    world.resource_mut::<Events<FeedbackEvent>>().drain().collect()
}

pub fn enemy_count(world: &mut World) -> usize {
    world.query::<&Enemy>().iter(world).count()
}

/// Builds an equation item list from a compact notation, e.g. `items("2+3×4")`.
pub fn items(notation: &str) -> Vec<EquationItem> {
    notation
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c.to_digit(10) {
            Some(digit) => EquationItem::Number(digit),
            None => EquationItem::Operator(math_castle::equation::Operator::from_symbol(c).expect("known operator")),
        })
        .collect()
}

/// A seeded game that has left the tutorial, with its clock started at `t = 0`.
pub fn started_game() -> Game {
    let mut game = Game::with_seed(TEST_SEED);
    game.command(GameCommand::Start).expect("start from tutorial");
    game.tick(0.0);
    game
}

/// Sets the session fields of a game directly, keeping everything else.
pub fn with_session(game: &mut Game, update: impl FnOnce(&mut GameSession)) {
    update(game.world.resource_mut::<GameSession>().into_inner());
}

/// Places a walking enemy into a running game.
pub fn place_enemy(game: &mut Game, id: u64, kind: EnemyKind, value: u32, progress: f32) -> Entity {
    spawn_enemy(&mut game.world, id, kind, value, progress, kind.base_speed())
}

/// Keeps the spawner from adding enemies of its own.
pub fn suspend_spawner(game: &mut Game) {
    *game.world.resource_mut::<SpawnTimer>() = SpawnTimer::Suspended;
}

pub fn type_keys(game: &mut Game, commands: &[GameCommand]) {
    for command in commands {
        game.command(*command).expect("key press accepted");
    }
}

/// Types `value` into a running game as a sum of the level's buttons, largest first.
pub fn answer(game: &mut Game, value: u32) {
    let mut buttons = game.difficulty().available_buttons.to_vec();
    buttons.sort_unstable_by(|a, b| b.cmp(a));

    game.command(GameCommand::Clear).expect("clear is always accepted");
    let mut remaining = value;
    let mut first = true;
    while let Some(&button) = buttons.iter().find(|&&button| button <= remaining) {
        if !first {
            game.command(GameCommand::AddOperator(math_castle::equation::Operator::Add))
                .expect("addition is always offered");
        }
        game.command(GameCommand::AddNumber(button)).expect("button is on the keypad");
        remaining -= button;
        first = false;
    }
}
