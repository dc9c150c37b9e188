//! Input intent buffer
//!
//! # Архитектура
//!
//! Host input layer (keyboard/gamepad bindings) пишет сырые press/release
//! сигналы в `IntentState` в любой момент кадра. Консьюмеры (locomotion,
//! arsenal) читают только frame-coherent snapshot, который фиксируется
//! в `tick_intent_buffers` в начале FixedUpdate.
//!
//! **Flow:**
//! - Host: `intents.press(ButtonIntent::Attack)` / `intents.release(..)`
//! - Core: `tick_intent_buffers` → производные поля (crouch hold, edges)
//! - Consumers: читают snapshot в том же тике, ПОСЛЕ tick (`.chain()`)

use bevy::prelude::*;

pub mod intents;

pub use intents::*;

/// Input plugin — только компоненты, системный порядок задаёт CharacterPlugin
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<IntentState>()
            .register_type::<IntentConfig>();
    }
}
