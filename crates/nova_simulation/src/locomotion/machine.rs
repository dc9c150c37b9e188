//! LocomotionMachine component — позы и их lifecycle

use bevy::prelude::*;
use std::collections::HashMap;

use crate::logger::log_error;

/// Поза персонажа (mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Posture {
    Walking,
    Running,
    Crouching,
    Proning,
    Diving,
}

impl Posture {
    pub const ALL: [Posture; 5] = [
        Posture::Walking,
        Posture::Running,
        Posture::Crouching,
        Posture::Proning,
        Posture::Diving,
    ];
}

/// Настройки locomotion (скорости поз, тайминг dive)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LocomotionConfig {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub crouch_speed: f32,
    pub prone_speed: f32,
    pub dive_speed: f32,
    /// Длительность dive до recovery-перехода (секунды)
    pub dive_duration: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            crouch_speed: 1.5,
            prone_speed: 0.75,
            dive_speed: 7.0,
            dive_duration: 0.8,
        }
    }
}

/// Слот позы: создаётся один раз, живёт весь lifetime машины
///
/// Держит только per-poza scratch (скорость, recovery-таймер для Diving).
/// Transition-решения слот НЕ принимает — см. `transitions::next_posture`.
#[derive(Debug, Clone, Reflect)]
pub struct PostureSlot {
    pub max_speed: f32,
    /// Remaining recovery time; только Diving взводит его в on_enter
    pub timer: f32,
}

/// Запрошенная и исполненная смена позы (для событий)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostureChange {
    pub from: Posture,
    pub to: Posture,
}

/// Машина поз персонажа
///
/// Слоты регистрируются при создании; `set_posture` на незарегистрированную
/// позу — programmer error: log_error + no-op (active/previous не трогаем,
/// hooks не зовём).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct LocomotionMachine {
    slots: HashMap<Posture, PostureSlot>,
    active: Posture,
    previous: Posture,
    dive_duration: f32,
}

impl LocomotionMachine {
    /// Машина со всеми пятью позами, начальная — Walking (enter hook выполнен)
    pub fn new(config: &LocomotionConfig) -> Self {
        Self::with_postures(config, &Posture::ALL)
    }

    /// Машина с подмножеством поз (NPC без dive и т.п.)
    ///
    /// Walking регистрируется всегда: это начальная поза.
    pub fn with_postures(config: &LocomotionConfig, postures: &[Posture]) -> Self {
        let mut slots = HashMap::new();
        slots.insert(
            Posture::Walking,
            PostureSlot {
                max_speed: config.walk_speed,
                timer: 0.0,
            },
        );

        for &posture in postures {
            let max_speed = match posture {
                Posture::Walking => config.walk_speed,
                Posture::Running => config.run_speed,
                Posture::Crouching => config.crouch_speed,
                Posture::Proning => config.prone_speed,
                Posture::Diving => config.dive_speed,
            };
            slots
                .entry(posture)
                .or_insert(PostureSlot { max_speed, timer: 0.0 });
        }

        let mut machine = Self {
            slots,
            active: Posture::Walking,
            previous: Posture::Walking,
            dive_duration: config.dive_duration,
        };
        machine.enter_posture(Posture::Walking);
        machine
    }

    pub fn active(&self) -> Posture {
        self.active
    }

    /// Поза из которой пришли (recovery-поведение зависит от неё)
    pub fn previous(&self) -> Posture {
        self.previous
    }

    pub fn has_posture(&self, posture: Posture) -> bool {
        self.slots.contains_key(&posture)
    }

    /// Max speed активной позы (host применяет к velocity)
    pub fn max_speed(&self) -> f32 {
        self.slots[&self.active].max_speed
    }

    /// Истёк ли dive recovery-таймер (false вне Diving)
    pub fn dive_recovery_elapsed(&self) -> bool {
        self.active == Posture::Diving && self.slots[&self.active].timer <= 0.0
    }

    /// Переход в позу `key`: exit активной → swap → enter новой.
    ///
    /// Действует немедленно (без очереди). Незарегистрированная поза —
    /// диагностика + no-op.
    pub fn set_posture(&mut self, key: Posture) -> Option<PostureChange> {
        if !self.slots.contains_key(&key) {
            log_error(&format!(
                "LocomotionMachine: posture {:?} is not registered, transition ignored",
                key
            ));
            return None;
        }

        if key == self.active {
            return None;
        }

        let from = self.active;
        self.exit_posture(from);
        self.previous = from;
        self.active = key;
        self.enter_posture(key);

        Some(PostureChange { from, to: key })
    }

    /// Per-tick поведение активной позы + центральная оценка таблицы переходов
    pub fn tick(&mut self, delta: f32, intents: &crate::input::IntentState) -> Option<PostureChange> {
        if self.active == Posture::Diving {
            let slot = self.slots.get_mut(&Posture::Diving).unwrap();
            slot.timer = (slot.timer - delta).max(0.0);
        }

        // Таблица запрашивает не более одного перехода за тик; после
        // исполнения активная поза в этом тике повторно не тикается.
        let next = super::transitions::next_posture(self, intents)?;
        self.set_posture(next)
    }

    fn enter_posture(&mut self, posture: Posture) {
        if posture == Posture::Diving {
            if let Some(slot) = self.slots.get_mut(&Posture::Diving) {
                slot.timer = self.dive_duration;
            }
        }
    }

    fn exit_posture(&mut self, posture: Posture) {
        if posture == Posture::Diving {
            if let Some(slot) = self.slots.get_mut(&Posture::Diving) {
                slot.timer = 0.0;
            }
        }
    }
}

/// System: tick locomotion машин (после tick_intent_buffers)
pub fn tick_locomotion(
    mut machines: Query<(Entity, &mut LocomotionMachine, &crate::input::IntentState)>,
    time: Res<Time<Fixed>>,
    mut changes: EventWriter<super::events::PostureChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut machine, intents) in machines.iter_mut() {
        if let Some(change) = machine.tick(delta, intents) {
            changes.write(super::events::PostureChanged {
                entity,
                from: change.from,
                to: change.to,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_posture_is_walking() {
        let machine = LocomotionMachine::new(&LocomotionConfig::default());
        assert_eq!(machine.active(), Posture::Walking);
        assert_eq!(machine.previous(), Posture::Walking);
    }

    #[test]
    fn test_set_posture_records_previous() {
        let mut machine = LocomotionMachine::new(&LocomotionConfig::default());

        let change = machine.set_posture(Posture::Running).unwrap();
        assert_eq!(change.from, Posture::Walking);
        assert_eq!(change.to, Posture::Running);
        assert_eq!(machine.active(), Posture::Running);
        assert_eq!(machine.previous(), Posture::Walking);
    }

    #[test]
    fn test_unregistered_posture_is_a_noop() {
        let config = LocomotionConfig::default();
        let mut machine = LocomotionMachine::with_postures(
            &config,
            &[Posture::Walking, Posture::Running, Posture::Crouching],
        );

        machine.set_posture(Posture::Running).unwrap();
        let before_active = machine.active();
        let before_previous = machine.previous();

        assert!(machine.set_posture(Posture::Diving).is_none());
        assert_eq!(machine.active(), before_active);
        assert_eq!(machine.previous(), before_previous);
    }

    #[test]
    fn test_entering_dive_arms_recovery_timer() {
        let config = LocomotionConfig::default();
        let mut machine = LocomotionMachine::new(&config);

        machine.set_posture(Posture::Running);
        machine.set_posture(Posture::Diving);
        assert!(!machine.dive_recovery_elapsed());

        let intents = crate::input::IntentState::default();
        // Полный dive_duration тиками по 0.1
        let steps = (config.dive_duration / 0.1).ceil() as usize;
        for _ in 0..steps {
            machine.tick(0.1, &intents);
        }

        // Recovery вернул нас из Diving
        assert_ne!(machine.active(), Posture::Diving);
    }

    #[test]
    fn test_max_speed_follows_active_posture() {
        let config = LocomotionConfig::default();
        let mut machine = LocomotionMachine::new(&config);
        assert_eq!(machine.max_speed(), config.walk_speed);

        machine.set_posture(Posture::Crouching);
        assert_eq!(machine.max_speed(), config.crouch_speed);
    }
}
