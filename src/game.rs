//! The game core: an ECS world driven one tick at a time by the host's clock.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use rand::{rngs::SmallRng, SeedableRng};
use tracing::debug;

use crate::difficulty::DifficultyConfig;
use crate::equation::Equation;
use crate::error::{GameError, GameResult};
use crate::events::{FeedbackEvent, GameCommand, GameEvent};
use crate::path::screen_position;
use crate::systems::{
    self, AttackOutcome, BossHits, BossTimer, Enemy, EnemyIds, EnemyKind, EnemyStatus, FrameClock, GamePhase, GameRng,
    GameSession, LastAttack, LastSpawned, PendingDamage, Progress, SpawnTimer, VisualCues,
};

/// System sets ordering the work done within a tick.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Ending the run once the castle has fallen
    Guard,
    /// Enemies arrive and the boss acts
    Spawn,
    /// Enemies move, animations finish, and damage lands
    Update,
}

/// An enemy as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyView {
    pub id: u64,
    pub kind: EnemyKind,
    pub value: u32,
    pub progress: f32,
    pub status: EnemyStatus,
    /// Remaining hits, for bosses.
    pub hits_remaining: Option<u8>,
    /// Where to draw the enemy, in percent of the play area.
    pub position: Vec2,
}

/// The scalar state a heads-up display needs.
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub phase: GamePhase,
    pub health: u32,
    pub max_health: u32,
    pub score: u32,
    pub currency: u32,
    pub level: u32,
    pub enemies_defeated: u32,
    pub quota: u32,
    pub quota_progress: f32,
    pub boss_level: bool,
    pub equation: String,
    pub result: Option<f64>,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// A `World` holds the enemies and every resource; a `Schedule` runs the per-tick systems.
/// Player commands don't wait for a tick: they are triggered on the world and handled by
/// observers immediately.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game in the tutorial phase, seeded from the operating system.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::from_os_rng())
    }

    /// Creates a game whose every random draw follows from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        Self::setup_ecs(&mut world);
        Self::insert_resources(&mut world, rng);
        Self::configure_schedule(&mut schedule);

        debug!("Game world initialized");
        Game { world, schedule }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<FeedbackEvent>(world);

        world.add_observer(systems::input_observer);
        world.add_observer(systems::combat_observer);
        world.add_observer(systems::stage_observer);
    }

    fn insert_resources(world: &mut World, rng: SmallRng) {
        world.insert_resource(GameSession::default());
        world.insert_resource(FrameClock::default());
        world.insert_resource(Equation::default());
        world.insert_resource(SpawnTimer::default());
        world.insert_resource(LastSpawned::default());
        world.insert_resource(BossTimer::default());
        world.insert_resource(VisualCues::default());
        world.insert_resource(PendingDamage::default());
        world.insert_resource(LastAttack::default());
        world.insert_resource(EnemyIds::default());
        world.insert_resource(GameRng(rng));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                systems::terminal_check_system.in_set(GameplaySet::Guard),
                (systems::spawn_system, systems::boss_system).chain().in_set(GameplaySet::Spawn),
                (
                    systems::animation_expiry_system,
                    systems::movement_system,
                    systems::damage_system,
                    systems::cue_expiry_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
            ))
            .configure_sets(
                (
                    GameplaySet::Guard.run_if(is_playing),
                    GameplaySet::Spawn.run_if(is_playing),
                    GameplaySet::Update.run_if(is_playing),
                )
                    .chain(),
            );
    }

    /// Advances the simulation to `now` (milliseconds on a monotonic clock).
    ///
    /// Nothing moves outside the playing phase, but the clock still follows the host.
    /// Feedback is double-buffered per tick: events not drained by the end of the following
    /// tick are dropped.
    ///
    /// # Returns
    ///
    /// `true` while the game is playing and the host should keep scheduling ticks.
    pub fn tick(&mut self, now: f64) -> bool {
        self.world.resource_mut::<FrameClock>().advance(now);
        self.world.resource_mut::<Events<FeedbackEvent>>().update();
        self.schedule.run(&mut self.world);
        self.session().is_playing()
    }

    /// Applies a player command immediately.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while handling the command: a key the level does not
    /// offer, an operator in the wrong place, or a phase change the current phase forbids.
    /// A rejected command leaves the game unchanged.
    pub fn command(&mut self, command: GameCommand) -> GameResult<()> {
        self.world.trigger(GameEvent::Command(command));
        self.world.flush();

        let error = self.world.resource_mut::<Events<GameError>>().drain().next();
        match error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Fires the current equation at the enemies and reports what happened.
    pub fn attack(&mut self) -> AttackOutcome {
        // Attacking never raises an error; an unusable equation is simply ignored.
        let _ = self.command(GameCommand::Attack);
        self.world
            .resource_mut::<LastAttack>()
            .0
            .take()
            .unwrap_or(AttackOutcome::Ignored)
    }

    pub fn session(&self) -> &GameSession {
        self.world.resource::<GameSession>()
    }

    pub fn equation(&self) -> &Equation {
        self.world.resource::<Equation>()
    }

    pub fn difficulty(&self) -> DifficultyConfig {
        self.session().difficulty()
    }

    pub fn cues(&self) -> &VisualCues {
        self.world.resource::<VisualCues>()
    }

    /// Timestamp of the most recent tick.
    pub fn now(&self) -> f64 {
        self.world.resource::<FrameClock>().now
    }

    /// Every enemy currently on the road, in spawn order.
    pub fn enemies(&mut self) -> Vec<EnemyView> {
        let mut query = self
            .world
            .query::<(&Enemy, &Progress, &EnemyStatus, Option<&BossHits>)>();
        let mut views: Vec<EnemyView> = query
            .iter(&self.world)
            .map(|(enemy, progress, status, hits)| EnemyView {
                id: enemy.id,
                kind: enemy.kind,
                value: enemy.value,
                progress: progress.0,
                status: *status,
                hits_remaining: hits.map(|hits| hits.0),
                position: screen_position(progress.0),
            })
            .collect();
        views.sort_by_key(|view| view.id);
        views
    }

    pub fn hud(&self) -> HudView {
        let session = self.session();
        let equation = self.equation();
        HudView {
            phase: session.phase,
            health: session.health,
            max_health: session.max_health,
            score: session.score,
            currency: session.currency,
            level: session.level,
            enemies_defeated: session.enemies_defeated,
            quota: session.quota(),
            quota_progress: session.quota_progress(),
            boss_level: session.is_boss_level(),
            equation: equation.to_string(),
            result: equation.result(),
        }
    }

    /// Takes every feedback event emitted since the last call.
    pub fn drain_feedback(&mut self) -> Vec<FeedbackEvent> {
        self.world.resource_mut::<Events<FeedbackEvent>>().drain().collect()
    }
}

fn is_playing(session: Res<GameSession>) -> bool {
    session.is_playing()
}
