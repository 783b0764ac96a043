use std::thread;
use std::time::Duration;

use log::{debug, error, info};

use planetsim::prelude::*;

/// Counts drawing calls instead of putting pixels anywhere.
#[derive(Default)]
struct Tally {
	fills: u64,
	erases: u64,
}

impl Surface for Tally {
	fn set_color(&mut self, _color: Color) {}

	fn fill_circle(&mut self, _x: i32, _y: i32, _diameter: u32) {
		self.fills += 1;
	}

	fn erase_circle(&mut self, _x: i32, _y: i32, _diameter: u32) {
		self.erases += 1;
	}
}

struct Console {
	runner: Runner,
	ticks: u64,
}

impl Host for Console {
	fn request_delay(&mut self, interval: Duration) -> Duration {
		self.ticks += 1;
		if self.ticks % 100 == 0 {
			let c = self.runner.counters();
			debug!(
				"tick {}: {} on screen, {} off screen, {} merged",
				c.sim_time(),
				c.bodies_on_screen(),
				c.bodies_off_screen(),
				c.merged_bodies()
			);
		}
		interval
	}

	fn finished(&mut self) {
		info!("simulation finished after {} ticks", self.ticks);
	}
}

fn main() {
	setup_logging();

	let mut args = std::env::args().skip(1);
	let planets = args.next().map_or(50, |s| {
		s.parse::<i64>().unwrap_or_else(|_| {
			error!("Couldn't parse '{}' as a planet count", s);
			50
		})
	});
	let seconds = args.next().map_or(3, |s| {
		s.parse::<u64>().unwrap_or_else(|_| {
			error!("Couldn't parse '{}' as seconds", s);
			3
		})
	});

	let mut settings = Settings::default();
	if let Err(e) = settings.set_clamped(ParamId::PlanetCount, Value::Int(planets)) {
		error!("{}", e);
	}
	if let Err(e) = settings.set(ParamId::SimSpeed, Value::Double(8.0)) {
		error!("{}", e);
	}

	let mut sim = Simulation::new(settings);
	sim.create_bodies();
	let mut surface = Tally::default();
	sim.draw_all(&mut surface);
	info!("{} bodies ready", sim.live_count());

	let runner = Runner::new(sim);
	let host = Console { runner: runner.clone(), ticks: 0 };
	let worker = runner.spawn(surface, host);

	let slice = Duration::from_millis(seconds * 1000 / 4);
	thread::sleep(slice);
	for _ in 0..3 {
		runner.add_rogue();
	}
	thread::sleep(slice);

	runner.pause();
	log_counters("paused", &runner.counters());
	if let Err(e) = runner.set_param(ParamId::Width, Value::Int(1000)) {
		info!("{}", e);
	}
	if let Err(e) = runner.set_param(ParamId::Trails, Value::Bool(true)) {
		error!("{}", e);
	}
	thread::sleep(slice);

	runner.resume();
	thread::sleep(slice);
	runner.stop();

	if worker.join().is_err() {
		error!("simulation thread panicked");
	}
	log_counters("final", &runner.counters());
}

fn log_counters(label: &str, c: &Counters) {
	info!(
		"{}: time {}, on screen {}, off screen {}, merged {}",
		label,
		c.sim_time(),
		c.bodies_on_screen(),
		c.bodies_off_screen(),
		c.merged_bodies()
	);
}

fn setup_logging() {
	let dispatch = fern::Dispatch::new()
		.format(|out, message, record| {
			out.finish(format_args!(
				"{}[{}][{}] {}",
				chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
				record.target(),
				record.level(),
				message
			))
		})
		.level(log::LevelFilter::Info)
		.level_for("planetsim", log::LevelFilter::Debug)
		.chain(std::io::stdout())
		.apply();
	if let Err(e) = dispatch {
		eprintln!("logger already set: {}", e);
	}
}
