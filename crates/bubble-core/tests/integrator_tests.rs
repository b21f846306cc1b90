// Host-side tests for the per-particle integrator.

use bubble_core::integrator::*;
use bubble_core::*;
use glam::Vec2;
use rand::prelude::*;

fn particle(x: f32, y: f32, vx: f32, vy: f32, size: f32) -> Particle {
    Particle {
        position: Vec2::new(x, y),
        velocity: Vec2::new(vx, vy),
        size,
        phase_seed: 0.0,
        pop: PopState::Alive,
    }
}

fn page() -> Viewport {
    Viewport::new(1000.0, 800.0)
}

fn ctx<'a>(viewport: Viewport, obstacles: &'a [Rect], config: &'a FieldConfig) -> StepContext<'a> {
    StepContext {
        dt: 1.0,
        elapsed_sec: 0.0,
        viewport,
        obstacles,
        config,
    }
}

#[test]
fn left_wall_reflects_and_damps() {
    let config = FieldConfig::default();
    let viewport = Viewport::new(1000.0, 800.0);
    let mut rng = StdRng::seed_from_u64(1);
    let mut p = particle(0.0, 400.0, -1.0, 0.0, 40.0);

    step(&mut p, &ctx(viewport, &[], &config), &mut rng);

    assert_eq!(p.position.x, 0.0);
    assert!(p.velocity.x >= 0.0, "vx should point back inward");
    assert!(
        (p.velocity.x - config.restitution).abs() < 1e-6,
        "expected |vx| scaled by restitution, got {}",
        p.velocity.x
    );
}

#[test]
fn far_walls_reflect_inward() {
    let config = FieldConfig::default();
    let viewport = Viewport::new(1000.0, 800.0);
    let mut p = particle(965.0, 765.0, 1.0, 1.0, 40.0);
    p.position += Vec2::new(10.0, 10.0);

    reflect_walls(&mut p, viewport, config.restitution);

    assert_eq!(p.position, Vec2::new(960.0, 760.0));
    assert!(p.velocity.x < 0.0 && p.velocity.y < 0.0);
}

#[test]
fn bounds_hold_over_many_random_frames() {
    let config = FieldConfig::default().with_population(40).with_seed(7);
    let viewport = Viewport::new(1280.0, 720.0);
    let obstacles = [
        Rect::new(100.0, 80.0, 300.0, 200.0),
        Rect::new(600.0, 300.0, 400.0, 160.0),
        Rect::new(1100.0, 0.0, 180.0, 720.0),
    ];
    let mut rng = StdRng::seed_from_u64(99);
    let mut store = ParticleStore::populate(&config, viewport, &mut rng);

    for frame in 0..2000 {
        let c = StepContext {
            dt: rng.gen_range(0.0..2.4),
            elapsed_sec: frame as f32 / 60.0,
            viewport,
            obstacles: &obstacles,
            config: &config,
        };
        for p in store.iter_mut() {
            step(p, &c, &mut rng);
            let max = viewport.max_corner(p.size);
            assert!(
                p.position.x >= 0.0 && p.position.x <= max.x,
                "x out of bounds at frame {frame}: {}",
                p.position.x
            );
            assert!(
                p.position.y >= 0.0 && p.position.y <= max.y,
                "y out of bounds at frame {frame}: {}",
                p.position.y
            );
        }
    }
}

#[test]
fn speed_stays_within_governed_range() {
    let config = FieldConfig::default().with_population(30).with_seed(3);
    let viewport = Viewport::new(900.0, 600.0);
    let obstacles = [Rect::new(200.0, 150.0, 500.0, 300.0)];
    let mut rng = StdRng::seed_from_u64(5);
    let mut store = ParticleStore::populate(&config, viewport, &mut rng);

    for frame in 0..1500 {
        let c = StepContext {
            dt: 1.0,
            elapsed_sec: frame as f32 / 60.0,
            viewport,
            obstacles: &obstacles,
            config: &config,
        };
        for p in store.iter_mut() {
            step(p, &c, &mut rng);
            let speed = p.velocity.length();
            assert!(
                speed >= config.min_speed - 1e-4 && speed <= config.max_speed + 1e-4,
                "speed {speed} outside [{}, {}]",
                config.min_speed,
                config.max_speed
            );
        }
    }
}

#[test]
fn particle_inside_obstacle_is_pushed_out_in_one_step() {
    let config = FieldConfig::default();
    let viewport = Viewport::new(1000.0, 800.0);
    let obstacle = Rect::new(400.0, 300.0, 200.0, 100.0);
    let padded = obstacle.inflate(config.obstacle_padding);
    let mut rng = StdRng::seed_from_u64(11);

    for ix in 0..10 {
        for iy in 0..5 {
            let start = Vec2::new(380.0 + ix as f32 * 20.0, 280.0 + iy as f32 * 20.0);
            let mut p = particle(start.x, start.y, 0.5, -0.3, 40.0);
            assert!(padded.overlaps_square(p.position, p.size));

            step(&mut p, &ctx(viewport, &[obstacle], &config), &mut rng);

            assert!(
                !padded.overlaps_square(p.position, p.size),
                "still overlapping after step from {start:?}: {:?}",
                p.position
            );
        }
    }
}

#[test]
fn header_band_flush_with_top_edge_ejects_downward() {
    let config = FieldConfig {
        obstacle_perturbation: 0.0,
        ..FieldConfig::default()
    };
    let hero = Rect::new(0.0, 0.0, 1000.0, 300.0);
    let padded = hero.inflate(config.obstacle_padding);
    let mut rng = StdRng::seed_from_u64(9);
    // Left and top faces lie outside the viewport; only the bottom face is open.
    let mut p = particle(5.0, 150.0, 0.3, 0.0, 40.0);

    step(&mut p, &ctx(page(), &[hero], &config), &mut rng);

    assert!(
        !padded.overlaps_square(p.position, p.size),
        "still inside the band: {:?}",
        p.position
    );
    assert!(p.position.y >= padded.bottom());
    assert!(p.velocity.y >= 0.0);
}

#[test]
fn edge_flush_obstacles_never_trap_a_particle() {
    let config = FieldConfig::default();
    let viewport = page();
    let cases = [
        // header, footer, left rail, right rail
        (Rect::new(0.0, 0.0, 1000.0, 300.0), Vec2::new(5.0, 150.0)),
        (Rect::new(0.0, 650.0, 1000.0, 150.0), Vec2::new(950.0, 740.0)),
        (Rect::new(0.0, 0.0, 180.0, 800.0), Vec2::new(20.0, 5.0)),
        (Rect::new(820.0, 0.0, 180.0, 800.0), Vec2::new(955.0, 755.0)),
    ];
    for (obstacle, start) in cases {
        let padded = obstacle.inflate(config.obstacle_padding);
        let mut rng = StdRng::seed_from_u64(13);
        let mut p = particle(start.x, start.y, 0.3, 0.2, 40.0);
        assert!(padded.overlaps_square(p.position, p.size));

        for frame in 0..600 {
            let c = StepContext {
                dt: 1.0,
                elapsed_sec: frame as f32 / 60.0,
                viewport,
                obstacles: &[obstacle],
                config: &config,
            };
            step(&mut p, &c, &mut rng);
            let max = viewport.max_corner(p.size);
            assert!(
                !padded.overlaps_square(p.position, p.size),
                "{obstacle:?}: overlap at frame {frame}: {:?}",
                p.position
            );
            assert!(p.position.x >= 0.0 && p.position.x <= max.x);
            assert!(p.position.y >= 0.0 && p.position.y <= max.y);
        }
    }
}

#[test]
fn obstacle_covering_viewport_falls_back_to_shallowest_face() {
    let config = FieldConfig {
        obstacle_perturbation: 0.0,
        ..FieldConfig::default()
    };
    let cover = Rect::new(0.0, 0.0, 1000.0, 800.0);
    let mut rng = StdRng::seed_from_u64(0);
    let mut p = particle(500.0, 10.0, 0.0, -0.5, 40.0);

    assert!(resolve_obstacle(&mut p, &cover, page(), &config, &mut rng));
    // Top face is shallowest; it lies off-screen, and so does every other face.
    assert!(p.position.y < 0.0);
    assert!(p.velocity.y < 0.0);
}

#[test]
fn collision_resolves_along_shallower_axis() {
    let config = FieldConfig {
        obstacle_perturbation: 0.0,
        ..FieldConfig::default()
    };
    let obstacle = Rect::new(400.0, 300.0, 200.0, 100.0);
    let mut rng = StdRng::seed_from_u64(0);
    // Right edge at 400 vs padded left face at 390: 10px deep in x, far deeper in y.
    let mut p = particle(360.0, 330.0, 1.0, 0.0, 40.0);

    let hit = resolve_obstacle(&mut p, &obstacle, page(), &config, &mut rng);

    assert!(hit);
    assert!(p.position.x <= 350.0 && p.position.x > 349.9);
    assert_eq!(p.position.y, 330.0);
    assert!((p.velocity.x + config.obstacle_damping).abs() < 1e-6);
}

#[test]
fn collision_off_bottom_face_sends_particle_down() {
    let config = FieldConfig {
        obstacle_perturbation: 0.0,
        ..FieldConfig::default()
    };
    let obstacle = Rect::new(400.0, 300.0, 200.0, 100.0);
    let mut rng = StdRng::seed_from_u64(0);
    let mut p = particle(480.0, 405.0, 0.0, -0.8, 40.0);

    assert!(resolve_obstacle(&mut p, &obstacle, page(), &config, &mut rng));
    assert!(p.position.y >= 410.0);
    assert!(p.velocity.y > 0.0);
}

#[test]
fn clear_particle_is_not_touched_by_obstacle() {
    let config = FieldConfig::default();
    let obstacle = Rect::new(400.0, 300.0, 200.0, 100.0);
    let mut rng = StdRng::seed_from_u64(0);
    let mut p = particle(10.0, 10.0, 0.4, 0.4, 40.0);
    let before = p.clone();

    assert!(!resolve_obstacle(&mut p, &obstacle, page(), &config, &mut rng));
    assert_eq!(p.position, before.position);
    assert_eq!(p.velocity, before.velocity);
}

#[test]
fn stalled_particle_gets_a_kick() {
    let config = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut p = particle(100.0, 100.0, 0.0, 0.0, 30.0);

    govern_speed(&mut p, &config, &mut rng);

    let speed = p.velocity.length();
    assert!(speed >= config.spawn_speed_min - 1e-5 && speed <= config.spawn_speed_max + 1e-5);
}

#[test]
fn runaway_particle_is_clamped_to_max_speed() {
    let config = FieldConfig::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut p = particle(100.0, 100.0, 30.0, -40.0, 30.0);
    let dir = p.velocity.normalize();

    govern_speed(&mut p, &config, &mut rng);

    assert!((p.velocity.length() - config.max_speed).abs() < 1e-5);
    assert!(p.velocity.normalize().dot(dir) > 0.9999, "direction should be kept");
}

#[test]
fn popping_particle_is_not_stepped() {
    let config = FieldConfig::default();
    let viewport = Viewport::new(1000.0, 800.0);
    let mut rng = StdRng::seed_from_u64(2);
    let mut p = particle(200.0, 200.0, 1.0, 1.0, 40.0);
    p.pop = PopState::Popping { since_ms: 0.0 };

    step(&mut p, &ctx(viewport, &[], &config), &mut rng);

    assert_eq!(p.position, Vec2::new(200.0, 200.0));
    assert_eq!(p.velocity, Vec2::new(1.0, 1.0));
}

#[test]
fn normalize_dt_maps_nominal_frame_to_one_and_caps_pauses() {
    assert!((normalize_dt(1000.0 / 60.0, 40.0) - 1.0).abs() < 1e-6);
    assert!((normalize_dt(5000.0, 40.0) - 2.4).abs() < 1e-5);
    assert_eq!(normalize_dt(-3.0, 40.0), 0.0);
}

#[test]
fn drift_is_small_and_smooth() {
    let bound: f32 = bubble_core::constants::DRIFT_AMPLITUDES.iter().sum();
    for seed in [0.0_f32, 1.3, 4.7] {
        let mut prev = drift(0.0, seed);
        for i in 1..600 {
            let t = i as f32 / 60.0;
            let d = drift(t, seed);
            assert!(d.x.abs() <= bound + 1e-6 && d.y.abs() <= bound + 1e-6);
            assert!((d - prev).length() < 0.01, "drift jumped at t={t}");
            prev = d;
        }
    }
}

#[test]
fn drift_differs_between_phase_seeds() {
    let a = drift(2.0, 0.4);
    let b = drift(2.0, 3.1);
    assert!((a - b).length() > 1e-3);
}

#[test]
fn scale_pulse_stays_near_one() {
    let amp = bubble_core::constants::PULSE_AMPLITUDE;
    for i in 0..500 {
        let s = scale_pulse(i as f32 * 0.05, 1.1);
        assert!(s >= 1.0 - amp - 1e-6 && s <= 1.0 + amp + 1e-6);
    }
}
