//! IntentState component — frame-coherent снимок player input

use bevy::prelude::*;

/// Discrete intent, которым host может управлять через press/release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIntent {
    Attack,
    Aim,
    Interact,
    Swap,
    Melee,
    Sprint,
    Reload,
    ThrowPrimary,
    ThrowSecondary,
    Crouch,
    Vault,
}

/// Настройки intent-буфера (per-character)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct IntentConfig {
    /// Сколько секунд держать crouch чтобы запросить prone
    pub prone_hold_threshold: f32,
}

impl Default for IntentConfig {
    fn default() -> Self {
        Self {
            prone_hold_threshold: 0.5,
        }
    }
}

/// Снимок input-состояния персонажа
///
/// Все поля — "игрок сейчас просит X", сэмплируются раз в тик.
/// Оси не клампятся здесь: консьюмер сам решает что такое forward.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct IntentState {
    /// Movement axes (x = strafe, y = forward)
    pub move_axis: Vec2,
    /// Look axes (мышь/правый стик)
    pub look_axis: Vec2,

    // Discrete intents (level-triggered, пока кнопка зажата)
    pub is_trying_to_attack: bool,
    pub is_trying_to_aim: bool,
    pub is_trying_to_interact: bool,
    pub is_trying_to_swap: bool,
    pub is_trying_to_melee: bool,
    pub is_trying_to_sprint: bool,
    pub is_trying_to_reload: bool,
    pub is_trying_to_throw_primary: bool,
    pub is_trying_to_throw_secondary: bool,
    pub is_trying_to_vault: bool,
    pub is_holding_crouch: bool,

    /// Состояние crouch-кнопки в ПРЕДЫДУЩЕМ тике (edge detection)
    pub was_holding_crouch: bool,
    /// Сколько секунд crouch держится с последнего release
    pub crouch_hold_time: f32,
    /// Release edge до prone-порога: запрос toggle crouch (tap)
    pub crouch_tapped: bool,
    /// Crouch держится дольше порога: запрос prone (hold)
    pub prone_eligible: bool,
}

impl IntentState {
    pub fn press(&mut self, intent: ButtonIntent) {
        self.set_flag(intent, true);
    }

    pub fn release(&mut self, intent: ButtonIntent) {
        self.set_flag(intent, false);
    }

    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = axis;
    }

    pub fn set_look_axis(&mut self, axis: Vec2) {
        self.look_axis = axis;
    }

    /// Движется ли игрок вперёд (для sprint-гейта)
    pub fn wants_forward(&self) -> bool {
        self.move_axis.y > 0.0
    }

    /// Обновляет производные crouch-поля. Вызывается РОВНО раз в тик,
    /// до любых консьюмеров snapshot-а.
    pub fn tick(&mut self, delta: f32, config: &IntentConfig) {
        let released = self.was_holding_crouch && !self.is_holding_crouch;

        // Tap решается по hold time НА МОМЕНТ release (до сброса таймера)
        self.crouch_tapped = released && self.crouch_hold_time < config.prone_hold_threshold;

        if self.is_holding_crouch {
            self.crouch_hold_time += delta;
        } else {
            self.crouch_hold_time = 0.0;
        }

        self.prone_eligible =
            self.is_holding_crouch && self.crouch_hold_time >= config.prone_hold_threshold;

        self.was_holding_crouch = self.is_holding_crouch;
    }

    fn set_flag(&mut self, intent: ButtonIntent, value: bool) {
        match intent {
            ButtonIntent::Attack => self.is_trying_to_attack = value,
            ButtonIntent::Aim => self.is_trying_to_aim = value,
            ButtonIntent::Interact => self.is_trying_to_interact = value,
            ButtonIntent::Swap => self.is_trying_to_swap = value,
            ButtonIntent::Melee => self.is_trying_to_melee = value,
            ButtonIntent::Sprint => self.is_trying_to_sprint = value,
            ButtonIntent::Reload => self.is_trying_to_reload = value,
            ButtonIntent::ThrowPrimary => self.is_trying_to_throw_primary = value,
            ButtonIntent::ThrowSecondary => self.is_trying_to_throw_secondary = value,
            ButtonIntent::Crouch => self.is_holding_crouch = value,
            ButtonIntent::Vault => self.is_trying_to_vault = value,
        }
    }
}

/// System: tick всех intent-буферов (первая система тика)
pub fn tick_intent_buffers(
    mut buffers: Query<(&mut IntentState, &IntentConfig)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut intents, config) in buffers.iter_mut() {
        intents.tick(delta, config);
    }
}
