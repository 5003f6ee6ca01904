//! End-to-end checks of the tick loop, scenarios and scenes through the public API.

use std::mem::discriminant;

use rebound::{
    Body, BoundaryHits, Bounds, Color, Command, CommandStatus, Edge, Scenario, Shape, Simulation,
    SimulationConfig, Vector2, World, WorldEvent,
};

const EPSILON: f64 = 1e-6;

// ============================================================================
// Helpers
// ============================================================================

fn box_world() -> World<8> {
    World::new(Bounds::new(100.0, 100.0))
}

/// How far two bodies overlap, 0 when apart or touching
fn depth(a: &Body, b: &Body) -> f64 {
    match (*a.shape(), *b.shape()) {
        (Shape::Rectangle(ra), Shape::Rectangle(rb)) => {
            let (pa, pb) = (a.position(), b.position());
            let x = (pa.x + ra.width).min(pb.x + rb.width) - pa.x.max(pb.x);
            let y = (pa.y + ra.height).min(pb.y + rb.height) - pa.y.max(pb.y);
            x.min(y).max(0.0)
        }
        (Shape::Rectangle(rect), Shape::Circle(circle)) => {
            let (corner, centre) = (a.position(), b.position());
            let nearest = Vector2::new(
                centre.x.clamp(corner.x, corner.x + rect.width),
                centre.y.clamp(corner.y, corner.y + rect.height),
            );
            (circle.radius - nearest.distance(centre)).max(0.0)
        }
        (Shape::Circle(_), Shape::Rectangle(_)) => depth(b, a),
        (Shape::Circle(ca), Shape::Circle(cb)) => {
            (ca.radius + cb.radius - a.position().distance(b.position())).max(0.0)
        }
    }
}

/// Spawns the pair in the given order, runs one tick and returns the depth before and after
fn separate(first: Body, second: Body) -> (f64, f64) {
    let mut world = World::<8>::new(Bounds::new(200.0, 200.0));
    let first = world.spawn(first).unwrap();
    let second = world.spawn(second).unwrap();
    let before = depth(world.get(first).unwrap(), world.get(second).unwrap());

    let report = world.tick(&SimulationConfig::default(), None);
    assert!(report.collisions() >= 1);

    (before, depth(world.get(first).unwrap(), world.get(second).unwrap()))
}

fn run(world: &mut World<8>, config: &SimulationConfig, ticks: usize, mut each: impl FnMut(&World<8>)) {
    for _ in 0..ticks {
        world.tick(config, None);
        each(world);
    }
}

// ============================================================================
// Walls
// ============================================================================

#[test]
fn flush_bodies_report_the_edges_they_touch() {
    let bounds = Bounds::new(100.0, 100.0);

    let corner = Body::rectangle(0.0, 0.0, 10.0, 10.0, Color::BLUE, true);
    assert_eq!(corner.collides_with_boundary(bounds), BoundaryHits::LEFT | BoundaryHits::TOP);

    let inside = Body::rectangle(1.0, 1.0, 10.0, 10.0, Color::BLUE, true);
    assert!(inside.collides_with_boundary(bounds).is_empty());

    let crossing = Body::rectangle(91.0, 95.0, 10.0, 10.0, Color::BLUE, true);
    assert_eq!(crossing.collides_with_boundary(bounds), BoundaryHits::RIGHT | BoundaryHits::BOTTOM);

    // Asteroids never bounce off anything
    let rock = Body::asteroid(0.0, 0.0, 30.0, Color::MAGENTA);
    assert!(rock.collides_with_boundary(bounds).is_empty());
}

#[test]
fn circle_bounces_off_the_right_wall() {
    let mut world = box_world();
    let id = world.spawn(
        Body::circle(90.0, 50.0, 10.0, Color::RED, true).with_velocity(Vector2::new(20.0, 0.0)),
    ).unwrap();

    let report = world.tick(&SimulationConfig::default().with_ms_per_step(1000), None);

    let ball = world.get(id).unwrap();
    assert!((ball.position().x - 90.0).abs() < EPSILON);
    assert!((ball.velocity().x + 20.0).abs() < EPSILON);
    assert_eq!(report.events, vec![WorldEvent::BoundaryBounce { id, edge: Edge::Right }]);
}

#[test]
fn bouncing_block_climbs_back_to_its_drop_height() {
    let mut world = box_world();
    let id = world.spawn(Body::rectangle(45.0, 10.0, 10.0, 10.0, Color::BLUE, true)).unwrap();
    let config = SimulationConfig::default().with_gravity(true);

    let mut bounces = 0;
    let mut highest_after_bounce = f64::INFINITY;
    for _ in 0..250 {
        let report = world.tick(&config, None);
        let block = world.get(id).unwrap();

        // Never above the drop height, never through the floor
        assert!(block.position().y >= 10.0 - EPSILON, "rose to {}", block.position().y);
        assert!(block.position().y <= 90.0 + EPSILON, "sank to {}", block.position().y);

        if report.events.contains(&WorldEvent::BoundaryBounce { id, edge: Edge::Bottom }) {
            bounces += 1;
        } else if bounces > 0 {
            highest_after_bounce = highest_after_bounce.min(block.position().y);
        }
    }

    assert!(bounces >= 3, "only {bounces} bounces");
    // Sampling every 16 ms can miss the very top by a fraction of a unit
    assert!(highest_after_bounce < 11.0, "peaked at {highest_after_bounce}");
}

#[test]
fn dead_block_comes_to_rest_on_the_floor() {
    let mut world = box_world();
    let id = world.spawn(Body::rectangle(20.0, 0.0, 20.0, 10.0, Color::ORANGE, false)).unwrap();
    let config = SimulationConfig::default().with_gravity(true);

    run(&mut world, &config, 200, |_| {});

    let block = world.get(id).unwrap();
    assert!((block.position().y - 90.0).abs() < EPSILON);
    assert!(block.velocity().y.abs() < EPSILON);
    assert_eq!(block.position().x, 20.0);
}

// ============================================================================
// Bodies against each other
// ============================================================================

#[test]
fn contained_rectangle_reports_the_zero_vector() {
    let outer = Body::rectangle(0.0, 0.0, 100.0, 100.0, Color::BLUE, true);
    let inner = Body::rectangle(40.0, 40.0, 10.0, 10.0, Color::RED, true);
    assert_eq!(outer.collides_with(&inner), Some(Vector2::zero()));
    assert_eq!(inner.collides_with(&outer), Some(Vector2::zero()));
}

#[test]
fn overlapping_rectangles_end_the_tick_apart_in_either_order() {
    let large = || Body::rectangle(40.0, 40.0, 20.0, 20.0, Color::BLUE, true);
    let small = || Body::rectangle(55.0, 45.0, 10.0, 10.0, Color::RED, true);

    for (before, after) in [separate(large(), small()), separate(small(), large())] {
        assert!((before - 5.0).abs() < EPSILON);
        assert!(after < EPSILON, "still {after} deep");
        assert!(after < before);
    }
}

#[test]
fn circle_overlapping_a_rectangle_ends_the_tick_apart_in_either_order() {
    let block = || Body::rectangle(40.0, 40.0, 20.0, 20.0, Color::BLUE, true);
    // One past the right side, one above the top
    let beside = || Body::circle(65.0, 50.0, 10.0, Color::RED, true);
    let above = || Body::circle(50.0, 35.0, 10.0, Color::RED, true);

    let pairs = [
        separate(block(), beside()),
        separate(beside(), block()),
        separate(block(), above()),
        separate(above(), block()),
    ];
    for (before, after) in pairs {
        assert!((before - 5.0).abs() < EPSILON);
        assert!(after < EPSILON, "still {after} deep");
        assert!(after < before);
    }
}

#[test]
fn small_body_is_thrown_back_harder_than_a_large_one() {
    let mut world = World::<8>::new(Bounds::new(1000.0, 1000.0));
    let big = world.spawn(
        Body::circle(400.0, 500.0, 40.0, Color::BLUE, true).with_velocity(Vector2::new(50.0, 0.0)),
    ).unwrap();
    let small = world.spawn(
        Body::circle(455.0, 500.0, 20.0, Color::RED, true).with_velocity(Vector2::new(-50.0, 0.0)),
    ).unwrap();

    let report = world.tick(&SimulationConfig::default(), None);
    assert_eq!(report.collisions(), 1);

    let (big, small) = (world.get(big).unwrap(), world.get(small).unwrap());
    assert!(big.velocity().x.abs() < small.velocity().x.abs());
    assert!(small.velocity().x > 0.0);
    assert!(big.centre().distance(small.centre()) >= 60.0 - EPSILON);
}

#[test]
fn asteroid_stays_put_when_rammed() {
    let mut world = World::<8>::new(Bounds::new(1000.0, 1000.0));
    let rock = world.spawn(Body::asteroid(500.0, 500.0, 100.0, Color::MAGENTA)).unwrap();
    let ship = world.spawn(Body::ship(300.0, 500.0, 20.0, 500.0, 500.0, Color::GREEN)).unwrap();

    let config = SimulationConfig::default();
    let mut hit = false;
    for _ in 0..100 {
        hit |= world.tick(&config, None).collisions() > 0;
    }

    assert!(hit);
    assert_eq!(world.get(rock).unwrap().position(), Vector2::new(500.0, 500.0));
    assert!(world.get(ship).unwrap().velocity().x < 0.0);
}

// ============================================================================
// Scenarios and scenes
// ============================================================================

#[test]
fn every_scenario_runs_without_losing_bodies_to_nan() {
    for scenario in Scenario::ALL {
        let mut world = World::<64>::default();
        scenario.populate(&mut world).unwrap();
        let config = SimulationConfig::default().with_gravity(scenario.wants_gravity());

        for _ in 0..300 {
            world.tick(&config, None);
        }

        for body in world.iter() {
            assert!(body.position().is_finite(), "{scenario}: {body}");
            assert!(body.velocity().is_finite(), "{scenario}: {body}");
        }
        if world.controlled_ship().is_none() && scenario == Scenario::Ships {
            assert!(world.is_game_over());
        }
    }
}

#[test]
fn collide_scenario_meets_through_the_simulation() {
    let sim = Simulation::new(World::<8>::default(), SimulationConfig::default());
    assert_eq!(sim.execute(Command::Reset(Scenario::Collide)).unwrap(), CommandStatus::Done);

    let collisions: usize = (0..60).map(|_| sim.run_tick(None).collisions()).sum();
    assert!(collisions >= 1);
    assert_eq!(sim.borrowed(|world, _| world.len()), 2);
}

#[test]
fn saved_scene_loads_back_into_another_world() {
    let mut original = World::<64>::default();
    Scenario::Ships.populate(&mut original).unwrap();
    original.tick(&SimulationConfig::default(), None);

    let mut bytes = Vec::new();
    original.save_to(&mut bytes).unwrap();

    let mut copy = World::<64>::default();
    copy.load_from(&bytes[..]).unwrap();

    assert_eq!(copy.len(), original.len());
    for body in original.iter() {
        let loaded = copy.by_name(body.name()).unwrap();
        assert_eq!(discriminant(&loaded.kind()), discriminant(&body.kind()));
        assert!((loaded.position() - body.position()).length() < EPSILON);
        assert!((loaded.velocity() - body.velocity()).length() < EPSILON);
    }
    assert!(copy.controlled_ship().is_some());
}

#[test]
fn broken_scene_leaves_the_world_alone() {
    let mut world = World::<64>::default();
    Scenario::Collide.populate(&mut world).unwrap();

    let scene = "{\"type\":\"circle\",\"position\":{\"x\":1.0,\"y\":1.0},\"radius\":5.0}\nnot json\n";
    assert!(world.load_from(scene.as_bytes()).is_err());
    assert_eq!(world.len(), 2);
}
