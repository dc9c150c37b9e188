//! Interaction scanner — edge-dedup для "на что смотрит персонаж"
//!
//! # Архитектура
//!
//! Сам raycast делает host layer (у него physics-мир): каждый тик он
//! пишет результат прямого probe в `ScanFocus::sample` (ближайший
//! interactable в range, либо None). Core сравнивает с фокусом прошлого
//! тика и публикует не больше одного enter и одного exit на непрерывную
//! "look session" — повторных LookedAt пока цель та же не бывает.
//!
//! Interactable-актор по этим событиям показывает/прячет prompt.

use bevy::prelude::*;

/// Event: персонаж начал смотреть на interactable
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookedAt {
    pub scanner: Entity,
    pub target: Entity,
}

/// Event: персонаж перестал смотреть на interactable
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookedAway {
    pub scanner: Entity,
    pub target: Entity,
}

/// Результат edge-сравнения за тик
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FocusEdges {
    pub away: Option<Entity>,
    pub at: Option<Entity>,
}

/// Scan focus персонажа
///
/// `sample` пишет host каждый тик ДО `update_scan_focus`;
/// `current` — подтверждённый фокус (private, меняется только здесь).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ScanFocus {
    /// Probe-результат этого тика (host raycast)
    pub sample: Option<Entity>,
    current: Option<Entity>,
}

impl ScanFocus {
    pub fn current(&self) -> Option<Entity> {
        self.current
    }

    /// Сравнивает sample с текущим фокусом. На смене A→B отдаёт away(A)
    /// и at(B) в одном тике; без смены — пустые edges.
    pub fn refocus(&mut self, sample: Option<Entity>) -> FocusEdges {
        if sample == self.current {
            return FocusEdges::default();
        }

        let edges = FocusEdges {
            away: self.current,
            at: sample,
        };
        self.current = sample;
        edges
    }
}

/// System: превращает probe-результаты в LookedAt/LookedAway
pub fn update_scan_focus(
    mut scanners: Query<(Entity, &mut ScanFocus)>,
    mut looked_at: EventWriter<LookedAt>,
    mut looked_away: EventWriter<LookedAway>,
) {
    for (scanner, mut focus) in scanners.iter_mut() {
        let sample = focus.sample;
        let edges = focus.refocus(sample);

        if let Some(target) = edges.away {
            looked_away.write(LookedAway { scanner, target });
        }
        if let Some(target) = edges.at {
            looked_at.write(LookedAt { scanner, target });
        }
    }
}

/// Interaction plugin
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LookedAt>()
            .add_event::<LookedAway>()
            .register_type::<ScanFocus>();
    }
}
