use approx::assert_relative_eq;

use planetsim::body::SCALE_FACTOR;
use planetsim::prelude::*;
use planetsim::surface::NullSurface;

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn assert_census(sim: &Simulation) {
	let c = sim.counters();
	assert!(c.bodies_on_screen() >= 0, "on-screen went negative");
	assert!(c.bodies_off_screen() >= 0, "off-screen went negative");
	assert!(c.merged_bodies() >= 0);
	assert!(c.sim_time() >= 0);
	assert_eq!(c.tracked_bodies(), sim.live_count() as i64);
}

#[test]
fn heavy_body_swallows_light_one_inside_threshold() {
	init_logging();
	let settings = Settings::default()
		.with(ParamId::PlanetMass, Value::Double(10.0))
		.and_then(|s| s.with(ParamId::StarMass, Value::Double(1000.0)))
		.unwrap();
	let mut sim = Simulation::new(settings);
	// Diameters 8 and 20 give a merge threshold of 7 display units.
	let star = sim.spawn(Role::Star, Vec2::new(300_000.0, 300_000.0), Vec2::zeros());
	sim.spawn(Role::Planet, Vec2::new(300_000.0 + 6.9 * SCALE_FACTOR, 300_000.0), Vec2::zeros());

	sim.tick(&mut NullSurface);

	assert_eq!(sim.live_count(), 1);
	let survivor = sim.body(star).unwrap();
	assert_relative_eq!(survivor.total_mass(), 1010.0);
	assert_eq!(sim.counters().merged_bodies(), 1);
	assert_census(&sim);
}

#[test]
fn fresh_ring_is_fully_on_screen() {
	init_logging();
	let mut sim = Simulation::default();
	sim.create_bodies();

	assert_eq!(sim.live_count(), 51);
	assert_eq!(sim.counters().bodies_on_screen(), 51);
	assert_eq!(sim.counters().bodies_off_screen(), 0);
	assert_eq!(sim.counters().merged_bodies(), 0);

	sim.draw_all(&mut NullSurface);
	assert_eq!(sim.counters().bodies_on_screen(), 51);
}

#[test]
fn rogue_adds_one_body_and_leaves_counters_alone() {
	init_logging();
	let mut sim = Simulation::default();
	sim.create_bodies();
	for _ in 0..3 {
		sim.tick(&mut NullSurface);
	}
	let before = sim.live_count();
	let merged = sim.counters().merged_bodies();
	let time = sim.counters().sim_time();

	sim.add_rogue().unwrap();

	assert_eq!(sim.live_count(), before + 1);
	assert_eq!(sim.counters().merged_bodies(), merged);
	assert_eq!(sim.counters().sim_time(), time);
	assert_census(&sim);
}

#[test]
fn census_holds_at_every_tick() {
	init_logging();
	let mut sim = Simulation::default();
	sim.create_bodies();
	for i in 0..200 {
		if i % 50 == 0 {
			sim.add_rogue();
		}
		sim.tick(&mut NullSurface);
		assert_census(&sim);
		assert_eq!(sim.counters().sim_time(), i + 1);
	}
}

#[test]
fn bodies_leaving_the_area_are_counted_off_screen() {
	init_logging();
	let settings = Settings::default()
		.with(ParamId::Gravity, Value::Double(0.0))
		.unwrap();
	let mut sim = Simulation::new(settings);
	sim.spawn(Role::Planet, Vec2::new(795_000.0, 300_000.0), Vec2::new(500_000.0, 0.0));
	sim.spawn(Role::Planet, Vec2::new(400_000.0, 300_000.0), Vec2::zeros());

	sim.tick(&mut NullSurface);
	assert_eq!(sim.counters().bodies_off_screen(), 1);
	assert_eq!(sim.counters().bodies_on_screen(), 1);

	// Staying outside does not count again.
	sim.tick(&mut NullSurface);
	assert_eq!(sim.counters().bodies_off_screen(), 1);
	assert_census(&sim);
}

#[test]
fn mass_is_conserved_across_merges() {
	init_logging();
	let mut sim = Simulation::default();
	sim.create_bodies();
	let total = |sim: &Simulation| sim.bodies().iter().map(Body::total_mass).sum::<f64>();
	let before = total(&sim);

	for _ in 0..300 {
		sim.tick(&mut NullSurface);
	}

	assert_relative_eq!(total(&sim), before, max_relative = 1e-9);
	assert_eq!(
		sim.live_count() as i64 + sim.counters().merged_bodies(),
		51
	);
}

#[test]
fn same_seed_reproduces_the_run() {
	init_logging();
	let run = || {
		let mut sim = Simulation::default();
		sim.create_bodies();
		sim.add_rogue();
		for _ in 0..50 {
			sim.tick(&mut NullSurface);
		}
		sim.bodies().to_vec()
	};
	assert_eq!(run(), run());
}
