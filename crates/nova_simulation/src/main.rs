//! Headless smoke-прогон character core
//!
//! Скриптует короткую сессию (pickup → sprint → очередь → reload)
//! и печатает outbound events. Без рендера.

use std::time::Duration;

use bevy::prelude::*;
use nova_simulation::*;

fn main() {
    let seed = 42;
    println!("Starting Nova character core headless run (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(CharacterPlugin);

    let shooter = app.world_mut().spawn(shooter_bundle()).id();
    let rifle_actor = app.world_mut().spawn_empty().id();

    app.world_mut().send_event(PickUpWeapon {
        entity: shooter,
        weapon: HeldWeapon::new(WeaponSpec::default(), rifle_actor).with_ammo(30, 60),
    });

    {
        let mut intents = app.world_mut().get_mut::<IntentState>(shooter).unwrap();
        intents.press(ButtonIntent::Sprint);
        intents.set_move_axis(Vec2::new(0.0, 1.0));
        intents.press(ButtonIntent::Attack);
    }

    let period = Duration::from_secs_f64(1.0 / 60.0);
    for tick in 0..120 {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(period);
        app.world_mut().run_schedule(FixedUpdate);

        if tick == 30 {
            let mut intents = app.world_mut().get_mut::<IntentState>(shooter).unwrap();
            intents.release(ButtonIntent::Attack);
            intents.press(ButtonIntent::Reload);
        }
        if tick == 40 {
            app.world_mut().send_event(ReloadFinished {
                entity: shooter,
                interrupted: false,
            });
        }
    }

    let fired = app
        .world_mut()
        .resource_mut::<Events<AttackPerformed>>()
        .drain()
        .count();
    let machine = app.world().get::<LocomotionMachine>(shooter).unwrap();
    println!(
        "Done: {} shots fired, final posture {:?}",
        fired,
        machine.active()
    );
}
