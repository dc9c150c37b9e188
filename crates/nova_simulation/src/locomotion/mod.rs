//! Locomotion state machine (walk / run / crouch / prone / dive)
//!
//! # Архитектура
//!
//! Ровно одна активная поза (Posture) в любой момент. Позы создаются один
//! раз при инициализации машины и живут весь lifetime персонажа — меняется
//! только активная ссылка.
//!
//! Transition authority централизована: легальные переходы описаны явной
//! таблицей `next_posture` (posture × intent → next), а слоты поз хранят
//! только enter/exit/tick поведение (таймеры, скорость). Граф переходов
//! читается в одном месте и тестируется изолированно.
//!
//! Физику движения core не делает (host layer применяет velocity по
//! `max_speed()` активной позы).

use bevy::prelude::*;

pub mod events;
pub mod machine;
pub mod transitions;

pub use events::*;
pub use machine::*;
pub use transitions::*;

/// Locomotion plugin — события и реестр типов
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PostureChanged>()
            .register_type::<LocomotionMachine>()
            .register_type::<LocomotionConfig>();
    }
}
