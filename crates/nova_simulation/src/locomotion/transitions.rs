//! Явная таблица переходов: posture × intent snapshot → next posture
//!
//! Единственное место где описан легальный граф. Слоты поз transition
//! authority не имеют.

use crate::input::IntentState;

use super::machine::{LocomotionMachine, Posture};

/// Оценивает таблицу для активной позы. `None` = остаёмся.
///
/// Приоритет в пределах позы: prone hold > crouch tap > sprint.
pub fn next_posture(machine: &LocomotionMachine, intents: &IntentState) -> Option<Posture> {
    let sprinting = intents.is_trying_to_sprint && intents.wants_forward();

    match machine.active() {
        Posture::Walking => {
            if intents.prone_eligible {
                Some(Posture::Proning)
            } else if intents.crouch_tapped {
                Some(Posture::Crouching)
            } else if sprinting {
                Some(Posture::Running)
            } else {
                None
            }
        }

        Posture::Running => {
            // Crouch на бегу = dive, не присед
            if intents.crouch_tapped || intents.is_holding_crouch {
                Some(Posture::Diving)
            } else if !sprinting {
                Some(Posture::Walking)
            } else {
                None
            }
        }

        Posture::Crouching => {
            if intents.prone_eligible {
                Some(Posture::Proning)
            } else if intents.crouch_tapped {
                Some(Posture::Walking)
            } else if sprinting {
                Some(Posture::Running)
            } else {
                None
            }
        }

        Posture::Proning => {
            // Из prone выходим только после отпускания crouch
            if intents.is_holding_crouch {
                None
            } else if intents.crouch_tapped {
                Some(Posture::Crouching)
            } else if sprinting {
                Some(Posture::Walking)
            } else {
                None
            }
        }

        Posture::Diving => {
            // Recovery: если к концу dive crouch всё ещё держат — в prone,
            // иначе в присед
            if machine.dive_recovery_elapsed() {
                if intents.prone_eligible {
                    Some(Posture::Proning)
                } else {
                    Some(Posture::Crouching)
                }
            } else {
                None
            }
        }
    }
}
