/*******************************************************************************************
*
*   rebound - Ships
*
*   Arrow keys steer the magenta ship, every collision costs it energy.
*   Drag a body to throw it, drag over empty space to launch a new ship.
*
*   NOTE: With the default `phys_thread` feature the world ticks on its own thread and
*         C pauses after every collision until SPACE; build with --no-default-features
*         to tick once per frame instead, without collision inspection.
*
*   Copyright (c) 2025 rebound contributors
*
********************************************************************************************/

use raylib::prelude::*;
use rebound::prelude as rb;

const SCENE_FILE: &str = "rebound-scene.jsonl";

const WAITING: &str = "Collision! Press SPACE to continue";

fn to_world(point: Vector2) -> rb::Vector2 {
    rb::Vector2::new(point.x as f64, point.y as f64)
}

/// What was last seen of the world, drawn again while a tick holds the lock
#[derive(Default)]
struct Frame {
    bodies: Vec<rb::Body>,
    show_velocity: bool,
    status: String,
}

impl Frame {
    fn capture(world: &rb::World<64>, config: &rb::SimulationConfig) -> Self {
        let status = match world.controlled_ship().and_then(rb::Body::energy) {
            Some(energy) => format!("Energy {energy:.1}"),
            None if world.is_game_over() => String::from("Game over! You lost"),
            None => String::new(),
        };
        Self {
            bodies: world.iter().cloned().collect(),
            show_velocity: config.show_velocity,
            status,
        }
    }

    fn draw(&self, canvas: &mut dyn rb::Canvas) {
        canvas.clear();
        for body in &self.bodies {
            body.draw(canvas, self.show_velocity);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Initialization
    //--------------------------------------------------------------------------------------
    let screen_width = 1000;
    let screen_height = 800;

    let (mut rl, thread) = init()
        .size(screen_width, screen_height)
        .title("[rebound] - Ships")
        .msaa_4x()
        .build();

    let bounds = rb::Bounds::new(screen_width as f64, screen_height as f64);
    let mut world = rb::World::<64>::new(bounds);
    if let Err(e) = rb::Scenario::Ships.populate(&mut world) {
        eprintln!("could not build the scenario: {e}");
        return;
    }

    // Starts paused, P to run
    let config = rb::SimulationConfig::default().with_paused(true);
    #[allow(unused_mut)]
    let mut sim = rb::Simulation::new(world, config);
    #[cfg(feature = "phys_thread")]
    sim.start();

    let mut message = String::from("Pause ON. Press P to start");
    let mut drag = rb::DragTracker::new();
    let mut rng = rand::thread_rng();
    let mut frame = Frame::default();

    rl.set_target_fps(60);
    //--------------------------------------------------------------------------------------

    // Main game loop
    while !rl.window_should_close() {
        // Update
        //----------------------------------------------------------------------------------
        let key = match rl.get_key_pressed() {
            Some(KeyboardKey::KEY_P) => Some(rb::KeyCommand::TogglePause),
            Some(KeyboardKey::KEY_V) => Some(rb::KeyCommand::ToggleVelocity),
            #[cfg(feature = "phys_thread")]
            Some(KeyboardKey::KEY_C) => Some(rb::KeyCommand::ToggleInspect),
            Some(KeyboardKey::KEY_G) => Some(rb::KeyCommand::ToggleGravity),
            Some(KeyboardKey::KEY_EQUAL | KeyboardKey::KEY_KP_ADD) => Some(rb::KeyCommand::SpeedUp),
            Some(KeyboardKey::KEY_MINUS | KeyboardKey::KEY_KP_SUBTRACT) => Some(rb::KeyCommand::SlowDown),
            Some(KeyboardKey::KEY_ONE) => { run(&sim, rb::Command::Reset(rb::Scenario::Ships), &mut message); None }
            Some(KeyboardKey::KEY_TWO) => { run(&sim, rb::Command::Reset(rb::Scenario::Collide), &mut message); None }
            Some(KeyboardKey::KEY_THREE) => { run(&sim, rb::Command::Reset(rb::Scenario::Blocks), &mut message); None }
            Some(KeyboardKey::KEY_S) => { run(&sim, rb::Command::Save(SCENE_FILE.into()), &mut message); None }
            Some(KeyboardKey::KEY_L) => { run(&sim, rb::Command::Load(SCENE_FILE.into()), &mut message); None }
            Some(KeyboardKey::KEY_SPACE) => { sim.acknowledge(); None }
            _ => None,
        };
        if let Some(key) = key {
            message = sim.try_borrowed_mut(|_, config| rb::apply_key(config, key))
                .unwrap_or_else(|| String::from(WAITING));
        }

        // The loop thread keeps the world locked while it waits on a collision, input
        // that needs the world is dropped until then
        let held = rb::HeldKeys {
            left: rl.is_key_down(KeyboardKey::KEY_LEFT),
            right: rl.is_key_down(KeyboardKey::KEY_RIGHT),
            up: rl.is_key_down(KeyboardKey::KEY_UP),
            down: rl.is_key_down(KeyboardKey::KEY_DOWN),
        };
        if held.any() {
            sim.try_borrowed_mut(|world, _| {
                if let Some(ship) = world.controlled_ship_mut() {
                    held.apply(ship);
                }
            });
        }

        let mouse = to_world(rl.get_mouse_position());
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            sim.try_borrowed(|world, _| drag.press(world, mouse));
        } else if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(Err(e)) = sim.try_borrowed_mut(|world, config| drag.release(world, config, mouse, &mut rng)) {
                message = e.to_string();
            }
        } else if rl.is_mouse_button_down(MouseButton::MOUSE_BUTTON_LEFT) {
            drag.drag(mouse);
        }

        #[cfg(not(feature = "phys_thread"))]
        sim.run_tick(None);

        if let Some(latest) = sim.try_borrowed(Frame::capture) {
            frame = latest;
        }
        //----------------------------------------------------------------------------------

        // Draw
        //----------------------------------------------------------------------------------
        {
            let mut d = rl.begin_drawing(&thread);

            {
                let mut canvas = rb::RaylibCanvas::new(&mut d, bounds, rb::Color::BLACK);
                frame.draw(&mut canvas);
            }

            let status = if sim.is_waiting_for_acknowledgement() { WAITING } else { frame.status.as_str() };
            d.draw_text(&message, 10, 10, 20, Color::WHITE);
            d.draw_text(status, 10, 35, 20, Color::WHITE);
            d.draw_text("1/2/3 scenario, S/L save/load, SPACE continue after a collision", 10, screen_height - 25, 10, Color::GRAY);
            d.draw_fps(screen_width - 90, screen_height - 30);
        }
        //----------------------------------------------------------------------------------
    }
}

fn run(sim: &rb::Simulation<64>, command: rb::Command, message: &mut String) {
    *message = match sim.execute(command.clone()) {
        Ok(rb::CommandStatus::Done) => format!("Done: {command}"),
        Ok(rb::CommandStatus::Queued) => format!("Queued: {command}"),
        Err(e) => format!("Could not {command}: {e}"),
    };
}
