//! Nova Character Runtime Core
//!
//! ECS-ядро поведения шутер-персонажа на Bevy 0.16:
//! - `input` — intent-буфер (frame-coherent snapshot сырого ввода)
//! - `locomotion` — машина поз (walk/run/crouch/prone/dive)
//! - `arsenal` — оружие в руках + action locks (attack/reload/aim/swap)
//! - `interaction` — edge-dedup прицельного probe
//!
//! HYBRID ARCHITECTURE:
//! - ECS = behaviour layer (intents, posture policy, arsenal rules)
//! - Host engine = presentation/tactical layer (rendering, physics
//!   raycasts, animation montages, HUD widgets). Host пишет intents и
//!   probe-результаты, читает outbound events.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod arsenal;
pub mod input;
pub mod interaction;
pub mod locomotion;
pub mod logger;

// Re-export базовых типов для удобства
pub use arsenal::{
    ActionState, AimStarted, AimStopped, AnimationFinished, Arsenal, ArsenalPlugin,
    AttackPerformed, HeldWeapon, HudSnapshot, HudUpdated, PickUpWeapon, ReloadFinished,
    ReloadStarted, SwapFinished, SwapWeapon, WeaponDropped, WeaponSpec,
    WeaponVisibilityChanged,
};
pub use input::{ButtonIntent, InputPlugin, IntentConfig, IntentState};
pub use interaction::{InteractionPlugin, LookedAt, LookedAway, ScanFocus};
pub use locomotion::{
    LocomotionConfig, LocomotionMachine, LocomotionPlugin, Posture, PostureChanged,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Главный plugin ядра (события + системы всех подсистем)
///
/// Порядок систем в FixedUpdate жёсткий (`.chain()`): intent-буфер
/// тикается ПЕРВЫМ — locomotion и arsenal читают snapshot этого же тика.
/// Completions от animation layer-а применяются до гейтов, чтобы lock,
/// снятый в прошлом кадре host-ом, не блокировал действия лишний тик.
pub struct CharacterPlugin;

impl Plugin for CharacterPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        if !app.world().contains_resource::<Time<Fixed>>() {
            app.insert_resource(Time::<Fixed>::from_hz(60.0));
        }

        app.add_plugins((
            InputPlugin,
            LocomotionPlugin,
            ArsenalPlugin,
            InteractionPlugin,
        ));

        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: snapshot ввода этого тика
                input::tick_intent_buffers,
                // Фаза 2: уведомления host-а (сброс busy-флагов)
                arsenal::process_completions,
                // Фаза 3: inventory-команды
                arsenal::process_pickups,
                arsenal::process_swaps,
                // Фаза 4: гейты действий
                arsenal::process_reload_requests,
                arsenal::process_aim_requests,
                // Фаза 5: тики
                locomotion::tick_locomotion,
                arsenal::tick_attacks,
                interaction::update_scan_focus,
            )
                .chain(),
        );
    }
}

/// Детерминистичный RNG resource (seeded), используется для spread-сэмплов
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless прогонов (тесты, smoke bin)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Полный набор компонентов играбельного персонажа
///
/// Host добавляет поверх свои presentation-компоненты.
pub fn shooter_bundle() -> impl Bundle {
    let locomotion_config = LocomotionConfig::default();
    let machine = LocomotionMachine::new(&locomotion_config);
    (
        IntentState::default(),
        IntentConfig::default(),
        machine,
        locomotion_config,
        Arsenal::default(),
        ActionState::default(),
        ScanFocus::default(),
    )
}
