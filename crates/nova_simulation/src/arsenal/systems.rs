//! Arsenal system implementations
//!
//! # Systems
//!
//! **Inventory:**
//! - `process_pickups` — подбор оружия (append / switch / evict)
//! - `process_swaps` — смена текущего оружия ±1
//!
//! **Combat gating:**
//! - `tick_attacks` — attack intent × action lock → выстрел
//! - `process_reload_requests` — reload intent × reload lock
//! - `process_aim_requests` — aim intent × action lock (edge по is_aimed)
//!
//! **Host notifications:**
//! - `process_completions` — reload/swap/animation montage доиграли
//!
//! Все гейты — precondition-ы ДО мутации; несработавший гейт = тихий
//! no-op ("не в этом кадре"), не ошибка.

use bevy::prelude::*;
use rand::Rng;

use crate::input::IntentState;
use crate::DeterministicRng;

use super::components::{ActionState, Arsenal, PickUpOutcome};
use super::events::*;

/// Process pickup events (host interaction layer подтвердил подбор)
pub fn process_pickups(
    mut pickups: EventReader<PickUpWeapon>,
    mut query: Query<(&mut Arsenal, &mut IntentState)>,
    mut hud: EventWriter<HudUpdated>,
    mut dropped: EventWriter<WeaponDropped>,
    mut visibility: EventWriter<WeaponVisibilityChanged>,
) {
    for pickup in pickups.read() {
        let Ok((mut arsenal, mut intents)) = query.get_mut(pickup.entity) else {
            continue;
        };

        let shown_source = pickup.weapon.source;

        match arsenal.pick_up(pickup.weapon.clone()) {
            PickUpOutcome::First => {}
            PickUpOutcome::Switched { hidden_source } => {
                // Подобрали второе-и-далее: переключаемся на новое
                intents.is_trying_to_attack = false;
                visibility.write(WeaponVisibilityChanged {
                    entity: pickup.entity,
                    source: hidden_source,
                    visible: false,
                });
            }
            PickUpOutcome::Evicted { dropped: weapon } => {
                dropped.write(WeaponDropped {
                    entity: pickup.entity,
                    weapon,
                });
            }
        }

        visibility.write(WeaponVisibilityChanged {
            entity: pickup.entity,
            source: shown_source,
            visible: true,
        });

        if let Some(weapon) = arsenal.held() {
            hud.write(HudUpdated {
                entity: pickup.entity,
                snapshot: weapon.hud_snapshot(),
            });
        }
    }
}

/// Process swap events (направление ±1, wraparound)
pub fn process_swaps(
    mut swaps: EventReader<SwapWeapon>,
    mut query: Query<(&mut Arsenal, &mut ActionState, &mut IntentState)>,
    mut hud: EventWriter<HudUpdated>,
    mut visibility: EventWriter<WeaponVisibilityChanged>,
) {
    for swap in swaps.read() {
        let Ok((mut arsenal, mut state, mut intents)) = query.get_mut(swap.entity) else {
            continue;
        };

        // Guard: нечего менять или swap заблокирован
        if state.is_non_swap_locked() {
            continue;
        }
        let Some(outcome) = arsenal.swap(swap.direction) else {
            continue;
        };

        // Начатая атака не переносится на новое оружие
        intents.is_trying_to_attack = false;
        state.is_swapping = true;

        visibility.write(WeaponVisibilityChanged {
            entity: swap.entity,
            source: outcome.hidden_source,
            visible: false,
        });
        visibility.write(WeaponVisibilityChanged {
            entity: swap.entity,
            source: outcome.shown_source,
            visible: true,
        });

        if let Some(weapon) = arsenal.held() {
            hud.write(HudUpdated {
                entity: swap.entity,
                snapshot: weapon.hud_snapshot(),
            });
        }
    }
}

/// System: attack intent → выстрел держимого оружия
///
/// Edge vs level: не-continuous оружие гасит intent после ровно одного
/// вызова, автомат стреляет пока intent держится.
pub fn tick_attacks(
    mut query: Query<(Entity, &mut Arsenal, &ActionState, &mut IntentState)>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut attacks: EventWriter<AttackPerformed>,
    mut hud: EventWriter<HudUpdated>,
) {
    let delta = time.delta_secs();

    for (entity, mut arsenal, state, mut intents) in query.iter_mut() {
        let Some(weapon) = arsenal.held_mut() else {
            continue;
        };

        weapon.recover_bloom(delta);

        if !intents.is_trying_to_attack || state.is_action_locked() {
            continue;
        }

        if weapon.fire() {
            let jitter: f32 = rng.rng.gen_range(-1.0..=1.0);
            attacks.write(AttackPerformed {
                entity,
                source: weapon.source,
                spread: jitter * weapon.bloom,
            });
            hud.write(HudUpdated {
                entity,
                snapshot: weapon.hud_snapshot(),
            });
        }

        if !weapon.spec.continuous {
            intents.is_trying_to_attack = false;
        }
    }
}

/// System: reload intent → старт перезарядки (сам refill придёт
/// с ReloadFinished от animation layer)
pub fn process_reload_requests(
    mut query: Query<(Entity, &Arsenal, &mut ActionState, &mut IntentState)>,
    mut started: EventWriter<ReloadStarted>,
) {
    for (entity, arsenal, mut state, mut intents) in query.iter_mut() {
        if !intents.is_trying_to_reload {
            continue;
        }
        // Intent одноразовый: потребляем даже если гейт не пройден
        intents.is_trying_to_reload = false;

        let Some(weapon) = arsenal.held() else {
            continue;
        };
        if !weapon.is_reloadable() || state.is_reload_locked() {
            continue;
        }

        // Во время reload не продолжаем жать на спуск
        intents.is_trying_to_attack = false;
        state.is_reloading = true;

        started.write(ReloadStarted { entity });
    }
}

/// System: aim intent (level) → is_aimed (edge) + animation-busy
///
/// Aim-start блокируется активными lock-ами (reload/swap/animation).
pub fn process_aim_requests(
    mut query: Query<(Entity, &Arsenal, &mut ActionState, &IntentState)>,
    mut aim_started: EventWriter<AimStarted>,
    mut aim_stopped: EventWriter<AimStopped>,
) {
    for (entity, arsenal, mut state, intents) in query.iter_mut() {
        let Some(weapon) = arsenal.held() else {
            continue;
        };
        if !weapon.is_aimable() {
            continue;
        }

        if intents.is_trying_to_aim && !state.is_aimed {
            if state.is_action_locked() {
                continue;
            }
            state.is_aimed = true;
            state.is_in_animation = true;
            aim_started.write(AimStarted { entity });
        } else if !intents.is_trying_to_aim && state.is_aimed {
            state.is_aimed = false;
            state.is_in_animation = true;
            aim_stopped.write(AimStopped { entity });
        }
    }
}

/// System: уведомления animation layer-а о доигравших montage
pub fn process_completions(
    mut reload_done: EventReader<ReloadFinished>,
    mut swap_done: EventReader<SwapFinished>,
    mut animation_done: EventReader<AnimationFinished>,
    mut query: Query<(&mut Arsenal, &mut ActionState)>,
    mut hud: EventWriter<HudUpdated>,
) {
    for done in reload_done.read() {
        let Ok((mut arsenal, mut state)) = query.get_mut(done.entity) else {
            continue;
        };

        if !done.interrupted {
            if let Some(weapon) = arsenal.held_mut() {
                weapon.reload();
                hud.write(HudUpdated {
                    entity: done.entity,
                    snapshot: weapon.hud_snapshot(),
                });
            }
        }
        state.is_reloading = false;
    }

    for done in swap_done.read() {
        if let Ok((_, mut state)) = query.get_mut(done.entity) {
            state.is_swapping = false;
        }
    }

    for done in animation_done.read() {
        if let Ok((_, mut state)) = query.get_mut(done.entity) {
            state.is_in_animation = false;
        }
    }
}
