//! Character core integration test
//!
//! Полная сессия headless: scan → pickup → sprint → очередь → swap →
//! reload → prone, сотни тиков без паники, плюс детерминизм spread-ов.
//!
//! Тики степаются вручную (advance Time<Fixed> + run_schedule), чтобы
//! не зависеть от wall-clock в CI.

use std::time::Duration;

use bevy::prelude::*;
use nova_simulation::*;

fn create_character_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(CharacterPlugin);
    app
}

/// Один детерминированный тик 1/60s
fn step(app: &mut App) {
    let period = Duration::from_secs_f64(1.0 / 60.0);
    app.world_mut()
        .resource_mut::<Time<Fixed>>()
        .advance_by(period);
    app.world_mut().run_schedule(FixedUpdate);
}

fn steps(app: &mut App, count: usize) {
    for _ in 0..count {
        step(app);
    }
}

fn spawn_shooter(app: &mut App) -> Entity {
    app.world_mut().spawn(shooter_bundle()).id()
}

fn rifle(app: &mut App) -> HeldWeapon {
    let source = app.world_mut().spawn_empty().id();
    HeldWeapon::new(WeaponSpec::default(), source).with_ammo(30, 60)
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

#[test]
fn test_full_session_runs_without_panic() {
    let mut app = create_character_app(42);
    let shooter = spawn_shooter(&mut app);

    // --- Scan: посмотрели на pickup-актор ---
    let pickup_actor = app.world_mut().spawn_empty().id();
    app.world_mut()
        .get_mut::<ScanFocus>(shooter)
        .unwrap()
        .sample = Some(pickup_actor);
    step(&mut app);

    let looked_at = drain::<LookedAt>(&mut app);
    assert_eq!(looked_at.len(), 1);
    assert_eq!(looked_at[0].target, pickup_actor);

    // Смотрим дальше — повторных событий нет
    steps(&mut app, 5);
    assert!(drain::<LookedAt>(&mut app).is_empty());

    // --- Подбор двух стволов ---
    let first = rifle(&mut app);
    let second = rifle(&mut app);
    app.world_mut().send_event(PickUpWeapon {
        entity: shooter,
        weapon: first,
    });
    app.world_mut().send_event(PickUpWeapon {
        entity: shooter,
        weapon: second,
    });
    step(&mut app);

    let hud = drain::<HudUpdated>(&mut app);
    assert_eq!(hud.len(), 2);
    {
        let arsenal = app.world().get::<Arsenal>(shooter).unwrap();
        assert_eq!(arsenal.count(), 2);
        assert_eq!(arsenal.current_index, 1);
    }

    // --- Sprint → Running ---
    {
        let mut intents = app.world_mut().get_mut::<IntentState>(shooter).unwrap();
        intents.press(ButtonIntent::Sprint);
        intents.set_move_axis(Vec2::new(0.0, 1.0));
    }
    step(&mut app);

    let changes = drain::<PostureChanged>(&mut app);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].to, Posture::Running);

    // --- Очередь из 5 выстрелов ---
    app.world_mut()
        .get_mut::<IntentState>(shooter)
        .unwrap()
        .press(ButtonIntent::Attack);
    steps(&mut app, 5);
    app.world_mut()
        .get_mut::<IntentState>(shooter)
        .unwrap()
        .release(ButtonIntent::Attack);

    assert_eq!(drain::<AttackPerformed>(&mut app).len(), 5);
    {
        let arsenal = app.world().get::<Arsenal>(shooter).unwrap();
        assert_eq!(arsenal.held().unwrap().ammo_in_magazine, 25);
    }

    // --- Swap туда-обратно: вернулись к тому же стволу ---
    app.world_mut().send_event(SwapWeapon {
        entity: shooter,
        direction: 1,
    });
    step(&mut app);
    app.world_mut().send_event(SwapWeapon {
        entity: shooter,
        direction: -1,
    });
    step(&mut app);
    {
        let arsenal = app.world().get::<Arsenal>(shooter).unwrap();
        assert_eq!(arsenal.current_index, 1);
    }
    app.world_mut().send_event(SwapFinished { entity: shooter });
    step(&mut app);

    // --- Reload ---
    app.world_mut()
        .get_mut::<IntentState>(shooter)
        .unwrap()
        .press(ButtonIntent::Reload);
    step(&mut app);
    assert_eq!(drain::<ReloadStarted>(&mut app).len(), 1);
    assert!(app.world().get::<ActionState>(shooter).unwrap().is_reloading);

    app.world_mut().send_event(ReloadFinished {
        entity: shooter,
        interrupted: false,
    });
    step(&mut app);
    {
        let arsenal = app.world().get::<Arsenal>(shooter).unwrap();
        assert_eq!(arsenal.held().unwrap().ammo_in_magazine, 30);
        assert!(!app.world().get::<ActionState>(shooter).unwrap().is_reloading);
    }

    // --- Sprint off → Walking, долгий crouch → Proning ---
    {
        let mut intents = app.world_mut().get_mut::<IntentState>(shooter).unwrap();
        intents.release(ButtonIntent::Sprint);
    }
    step(&mut app);
    assert_eq!(
        app.world()
            .get::<LocomotionMachine>(shooter)
            .unwrap()
            .active(),
        Posture::Walking
    );

    app.world_mut()
        .get_mut::<IntentState>(shooter)
        .unwrap()
        .press(ButtonIntent::Crouch);
    steps(&mut app, 40); // > 0.5s prone-порога при 60Hz
    assert_eq!(
        app.world()
            .get::<LocomotionMachine>(shooter)
            .unwrap()
            .active(),
        Posture::Proning
    );

    // --- Догоняем до сотен тиков: инварианты держатся ---
    steps(&mut app, 500);
    let arsenal = app.world().get::<Arsenal>(shooter).unwrap();
    assert!(arsenal.current_index < arsenal.count());
    assert!(arsenal.count() <= arsenal.max_capacity);
}

#[test]
fn test_spread_sequence_is_deterministic() {
    let spreads = |seed: u64| -> Vec<f32> {
        let mut app = create_character_app(seed);
        let shooter = spawn_shooter(&mut app);
        let weapon = rifle(&mut app);

        app.world_mut().send_event(PickUpWeapon {
            entity: shooter,
            weapon,
        });
        step(&mut app);

        app.world_mut()
            .get_mut::<IntentState>(shooter)
            .unwrap()
            .press(ButtonIntent::Attack);
        steps(&mut app, 10);

        drain::<AttackPerformed>(&mut app)
            .into_iter()
            .map(|attack| attack.spread)
            .collect()
    };

    let run_a = spreads(1337);
    let run_b = spreads(1337);
    assert_eq!(run_a.len(), 10);
    assert_eq!(run_a, run_b);

    // Другой seed — другая последовательность
    let run_c = spreads(7);
    assert_ne!(run_a, run_c);
}

#[test]
fn test_eviction_returns_weapon_to_world() {
    let mut app = create_character_app(42);
    let shooter = spawn_shooter(&mut app);

    let mut sources = Vec::new();
    for _ in 0..5 {
        let weapon = rifle(&mut app);
        sources.push(weapon.source);
        app.world_mut().send_event(PickUpWeapon {
            entity: shooter,
            weapon,
        });
        step(&mut app);
    }

    let dropped = drain::<WeaponDropped>(&mut app);
    assert_eq!(dropped.len(), 1);
    // Выбросили то, что держали на момент пятого подбора
    assert_eq!(dropped[0].weapon.source, sources[3]);

    let arsenal = app.world().get::<Arsenal>(shooter).unwrap();
    assert_eq!(arsenal.count(), 4);
    assert_eq!(arsenal.held().unwrap().source, sources[4]);
}
