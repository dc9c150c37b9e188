//! Arsenal events
//!
//! # Architecture
//!
//! **Inbound (host → ECS):**
//! - `PickUpWeapon` — interaction layer подтвердил подбор
//! - `SwapWeapon` — биндинг колеса мыши/клавиш, direction ±1
//! - `ReloadFinished` / `SwapFinished` / `AnimationFinished` — animation
//!   layer сообщает что montage доиграл (fire-and-forget)
//!
//! **Outbound (ECS → host/HUD):**
//! - `HudUpdated` — снимок оружия на каждое inventory-событие
//! - `AttackPerformed` — host спавнит projectile/VFX по spread
//! - `WeaponDropped` — host respawn-ит pickup-актор выброшенного
//! - `WeaponVisibilityChanged` — show/hide меша на сокете
//! - `ReloadStarted` / `AimStarted` / `AimStopped` — старт montage-ей

use bevy::prelude::*;

use super::components::{HeldWeapon, HudSnapshot};

// ============================================================================
// Inbound
// ============================================================================

/// Подбор оружия (владение записью переходит арсеналу entity)
#[derive(Event, Debug, Clone)]
pub struct PickUpWeapon {
    pub entity: Entity,
    pub weapon: HeldWeapon,
}

/// Смена оружия на ±1 по коллекции
#[derive(Event, Debug, Clone, Copy)]
pub struct SwapWeapon {
    pub entity: Entity,
    pub direction: i32,
}

/// Reload montage доиграл (или был прерван)
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadFinished {
    pub entity: Entity,
    pub interrupted: bool,
}

/// Swap montage доиграл
#[derive(Event, Debug, Clone, Copy)]
pub struct SwapFinished {
    pub entity: Entity,
}

/// Generic animation montage доиграл (aim и прочие)
#[derive(Event, Debug, Clone, Copy)]
pub struct AnimationFinished {
    pub entity: Entity,
}

// ============================================================================
// Outbound
// ============================================================================

/// Снимок держимого оружия для HUD
#[derive(Event, Debug, Clone, Copy)]
pub struct HudUpdated {
    pub entity: Entity,
    pub snapshot: HudSnapshot,
}

/// Выстрел состоялся: host спавнит projectile с этим spread-ом
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackPerformed {
    pub entity: Entity,
    /// Source-актор стрелявшего оружия
    pub source: Entity,
    /// Сэмпл разброса (радианы, знаковый)
    pub spread: f32,
}

/// Оружие выброшено из арсенала (capacity eviction)
#[derive(Event, Debug, Clone)]
pub struct WeaponDropped {
    pub entity: Entity,
    pub weapon: HeldWeapon,
}

/// Show/hide меша оружия на wielding-сокете
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponVisibilityChanged {
    pub entity: Entity,
    pub source: Entity,
    pub visible: bool,
}

/// Reload начался (host играет reload montage)
#[derive(Event, Debug, Clone, Copy)]
pub struct ReloadStarted {
    pub entity: Entity,
}

/// Прицеливание началось
#[derive(Event, Debug, Clone, Copy)]
pub struct AimStarted {
    pub entity: Entity,
}

/// Прицеливание закончилось
#[derive(Event, Debug, Clone, Copy)]
pub struct AimStopped {
    pub entity: Entity,
}
