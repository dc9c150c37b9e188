//! Locomotion events

use bevy::prelude::*;

use super::machine::Posture;

/// Event: поза персонажа сменилась (ECS → animation/host layer)
///
/// Host реагирует сменой анимации/капсулы. Отправляется ровно один раз
/// на переход — в том же тике, в котором таблица запросила смену.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PostureChanged {
    pub entity: Entity,
    pub from: Posture,
    pub to: Posture,
}
