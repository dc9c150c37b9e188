//! Arsenal module — оружие в руках персонажа
//!
//! # Архитектура
//!
//! Арсенал владеет упорядоченной коллекцией `HeldWeapon` (порядок =
//! порядок подбора) и индексом держимого. Все действия, требующие
//! эксклюзива на "текущее оружие" (атака, reload, aim, swap), проходят
//! через busy-флаги `ActionState`: логические lock-и вместо настоящих
//! мьютексов — система однопоточная, тики кооперативные.
//!
//! **Events → Systems flow:**
//! - Host/interaction шлёт inbound events (pickup, swap, completions)
//! - Intent-флаги атаки/reload/aim читаются из `IntentState`
//! - Системы мутируют компоненты и публикуют outbound events (HUD,
//!   visibility, montage starts)

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


// Re-exports
pub use components::*;
pub use events::*;
pub use systems::*;

/// Arsenal plugin — события и реестр типов
/// (порядок систем задаёт CharacterPlugin)
pub struct ArsenalPlugin;

impl Plugin for ArsenalPlugin {
    fn build(&self, app: &mut App) {
        app
            // Inbound
            .add_event::<PickUpWeapon>()
            .add_event::<SwapWeapon>()
            .add_event::<ReloadFinished>()
            .add_event::<SwapFinished>()
            .add_event::<AnimationFinished>()
            // Outbound
            .add_event::<HudUpdated>()
            .add_event::<AttackPerformed>()
            .add_event::<WeaponDropped>()
            .add_event::<WeaponVisibilityChanged>()
            .add_event::<ReloadStarted>()
            .add_event::<AimStarted>()
            .add_event::<AimStopped>()
            // Types
            .register_type::<Arsenal>()
            .register_type::<ActionState>();
    }
}
