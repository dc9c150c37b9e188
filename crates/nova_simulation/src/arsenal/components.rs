//! Arsenal components: оружие в руках + action locks

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Immutable описание типа оружия (задаётся pickup-актором)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct WeaponSpec {
    pub name: String,
    pub magazine_size: u32,
    /// Level-triggered fire (автомат) vs edge-triggered (одиночный)
    pub continuous: bool,
    pub reloadable: bool,
    pub aimable: bool,
    /// Bloom (разброс) tuning
    pub base_bloom: f32,
    pub bloom_per_shot: f32,
    /// Сколько bloom уходит за секунду покоя
    pub bloom_recovery: f32,
    pub max_bloom: f32,
}

impl Default for WeaponSpec {
    fn default() -> Self {
        Self {
            name: "Rifle".to_string(),
            magazine_size: 30,
            continuous: true,
            reloadable: true,
            aimable: true,
            base_bloom: 0.5,
            bloom_per_shot: 0.35,
            bloom_recovery: 2.0,
            max_bloom: 4.0,
        }
    }
}

/// Runtime-запись об оружии в арсенале
///
/// Запись принадлежит ровно одному Arsenal (владение = членство в Vec).
/// `source` — не владеющая ссылка на world-актор pickup-а: по ней host
/// прячет подобранный актор и respawn-ит его при evict.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct HeldWeapon {
    pub spec: WeaponSpec,
    pub ammo_in_magazine: u32,
    pub reserve_ammo: u32,
    pub bloom: f32,
    pub visible: bool,
    pub source: Entity,
}

impl HeldWeapon {
    pub fn new(spec: WeaponSpec, source: Entity) -> Self {
        let ammo_in_magazine = spec.magazine_size;
        let base_bloom = spec.base_bloom;
        Self {
            spec,
            ammo_in_magazine,
            reserve_ammo: 0,
            bloom: base_bloom,
            visible: true,
            source,
        }
    }

    pub fn with_ammo(mut self, magazine: u32, reserve: u32) -> Self {
        self.ammo_in_magazine = magazine.min(self.spec.magazine_size);
        self.reserve_ammo = reserve;
        self
    }

    /// Есть что перезаряжать и чем
    pub fn is_reloadable(&self) -> bool {
        self.spec.reloadable
            && self.ammo_in_magazine < self.spec.magazine_size
            && self.reserve_ammo > 0
    }

    pub fn is_aimable(&self) -> bool {
        self.spec.aimable
    }

    /// Один выстрел: патрон из магазина + рост bloom.
    /// `false` если магазин пуст (сухой щелчок, выстрела нет).
    pub fn fire(&mut self) -> bool {
        if self.ammo_in_magazine == 0 {
            return false;
        }
        self.ammo_in_magazine -= 1;
        self.bloom = (self.bloom + self.spec.bloom_per_shot).min(self.spec.max_bloom);
        true
    }

    /// Перезарядка из резерва (min(недостающее, резерв))
    pub fn reload(&mut self) {
        let missing = self.spec.magazine_size - self.ammo_in_magazine;
        let moved = missing.min(self.reserve_ammo);
        self.ammo_in_magazine += moved;
        self.reserve_ammo -= moved;
    }

    /// Bloom recovery к base за тик
    pub fn recover_bloom(&mut self, delta: f32) {
        if self.bloom > self.spec.base_bloom {
            self.bloom =
                (self.bloom - self.spec.bloom_recovery * delta).max(self.spec.base_bloom);
        }
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            ammo_in_magazine: self.ammo_in_magazine,
            magazine_size: self.spec.magazine_size,
            reserve_ammo: self.reserve_ammo,
            bloom: self.bloom,
        }
    }
}

/// Read-only снимок для HUD-виджетов (пушится на каждое inventory-событие)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub ammo_in_magazine: u32,
    pub magazine_size: u32,
    pub reserve_ammo: u32,
    pub bloom: f32,
}

/// Исход pick_up (что должен сделать host)
#[derive(Debug, Clone, PartialEq)]
pub enum PickUpOutcome {
    /// Первое оружие: просто взяли в руки
    First,
    /// Переключились на новое, старое спрятано
    Switched { hidden_source: Entity },
    /// Превысили capacity: текущее выброшено, новое заняло его слот
    Evicted { dropped: HeldWeapon },
}

/// Исход swap (источники для show/hide)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub hidden_source: Entity,
    pub shown_source: Entity,
}

/// Упорядоченная коллекция оружия персонажа
///
/// Порядок = порядок подбора. `current_index` валиден всегда когда
/// коллекция непуста.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Arsenal {
    pub weapons: Vec<HeldWeapon>,
    pub current_index: usize,
    pub max_capacity: usize,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            weapons: Vec::new(),
            current_index: 0,
            max_capacity: 4,
        }
    }
}

impl Arsenal {
    pub fn count(&self) -> usize {
        self.weapons.len()
    }

    pub fn held(&self) -> Option<&HeldWeapon> {
        self.weapons.get(self.current_index)
    }

    pub fn held_mut(&mut self) -> Option<&mut HeldWeapon> {
        self.weapons.get_mut(self.current_index)
    }

    /// Подбор оружия. Владение записью переходит арсеналу.
    ///
    /// При переполнении capacity выбрасывается ТЕКУЩЕЕ оружие
    /// (swap с последним слотом + truncate): новое занимает его индекс.
    pub fn pick_up(&mut self, mut weapon: HeldWeapon) -> PickUpOutcome {
        weapon.visible = true;
        self.weapons.push(weapon);

        if self.weapons.len() > self.max_capacity {
            let last = self.weapons.len() - 1;
            self.weapons.swap(self.current_index, last);
            let dropped = self.weapons.pop().unwrap();
            PickUpOutcome::Evicted { dropped }
        } else if self.weapons.len() > 1 {
            let old = &mut self.weapons[self.current_index];
            old.visible = false;
            let hidden_source = old.source;

            self.current_index = self.weapons.len() - 1;
            PickUpOutcome::Switched { hidden_source }
        } else {
            PickUpOutcome::First
        }
    }

    /// Смена текущего индекса на ±1 c wraparound на обоих концах.
    /// `None` если оружия меньше двух (lock-гейты проверяет система).
    pub fn swap(&mut self, direction: i32) -> Option<SwapOutcome> {
        if self.weapons.len() < 2 {
            return None;
        }

        let last = (self.weapons.len() - 1) as i32;
        let mut new_index = self.current_index as i32 + direction;
        if new_index > last {
            new_index = 0;
        }
        if new_index < 0 {
            new_index = last;
        }

        let old = &mut self.weapons[self.current_index];
        old.visible = false;
        let hidden_source = old.source;

        self.current_index = new_index as usize;

        let new = &mut self.weapons[self.current_index];
        new.visible = true;
        let shown_source = new.source;

        Some(SwapOutcome {
            hidden_source,
            shown_source,
        })
    }
}

/// Busy-флаги текущих действий + производные lock-предикаты
///
/// Lock-и не хранятся отдельно: каждый — дизъюнкция busy-флагов.
/// У combat/swap РАЗНЫЕ гейты: reload блокирует swap, но не накопление
/// attack-интента.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct ActionState {
    pub is_aimed: bool,
    pub is_reloading: bool,
    pub is_swapping: bool,
    pub is_in_animation: bool,
}

impl ActionState {
    /// Гейт атаки и aim-start
    pub fn is_action_locked(&self) -> bool {
        self.is_reloading || self.is_swapping || self.is_in_animation
    }

    /// Гейт swap. `is_swapping` сюда намеренно не входит:
    /// быстрые последовательные swap-ы разрешены
    pub fn is_non_swap_locked(&self) -> bool {
        self.is_reloading || self.is_in_animation
    }

    /// Гейт reload
    pub fn is_reload_locked(&self) -> bool {
        self.is_reloading || self.is_swapping || self.is_in_animation
    }
}
