//! Drives a `Simulation` from its own thread while other threads control it.
//!
//! The simulation sits behind one mutex. A stepping pass holds the lock for
//! its whole duration, so pause, stop, rogue insertion and parameter edits
//! from other threads land between passes, never inside one. The pacing
//! delay waits on a condition variable that those commands signal, so it
//! ends as soon as the loop should stop ticking.

use crate::prelude::*;
use crate::surface::Surface;
use log::{debug, info};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Why `Runner::run` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
	/// Paused; call `run` again after `resume` to continue.
	Paused,
	Stopped,
	/// There were no bodies to run.
	NotReady,
}

struct Shared {
	sim: Mutex<Simulation>,
	wake: Condvar,
}

#[derive(Clone)]
pub struct Runner {
	shared: Arc<Shared>,
}

impl Runner {
	pub fn new(sim: Simulation) -> Self {
		Runner {
			shared: Arc::new(Shared {
				sim: Mutex::new(sim),
				wake: Condvar::new(),
			}),
		}
	}

	fn lock(&self) -> MutexGuard<'_, Simulation> {
		self.shared.sim.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn with_simulation<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
		f(&self.lock())
	}

	pub fn create_bodies(&self) {
		self.lock().create_bodies();
	}

	pub fn add_rogue(&self) -> Option<BodyId> {
		self.lock().add_rogue()
	}

	pub fn set_param(&self, id: ParamId, value: Value) -> Result<(), ParamError> {
		self.lock().set_param(id, value)
	}

	pub fn phase(&self) -> Phase {
		self.lock().phase()
	}

	pub fn counters(&self) -> Counters {
		self.lock().counters().clone()
	}

	pub fn pause(&self) {
		self.lock().pause();
		self.shared.wake.notify_all();
	}

	pub fn stop(&self) {
		self.lock().stop();
		self.shared.wake.notify_all();
	}

	/// Marks a paused simulation as running again. A thread started with
	/// `spawn` re-enters `run` by itself; otherwise the caller does.
	pub fn resume(&self) -> bool {
		let resumed = {
			let mut sim = self.lock();
			sim.phase() == Phase::Paused && sim.start()
		};
		self.shared.wake.notify_all();
		resumed
	}

	/// The run loop: one untimed pass, then ticks paced by `host` until the
	/// simulation is paused or stopped. The pause and stop checks happen only
	/// between passes.
	pub fn run(&self, surface: &mut dyn Surface, host: &mut dyn Host) -> Exit {
		{
			let mut sim = self.lock();
			if !sim.start() {
				return Exit::NotReady;
			}
			sim.step_all(surface);
		}

		loop {
			let interval = {
				let mut sim = self.lock();
				match sim.phase() {
					Phase::Running => {}
					Phase::Paused => return Exit::Paused,
					_ => break,
				}
				sim.tick(surface);
				sim.tick_interval()
			};
			let wait = host.request_delay(interval);
			self.pace(wait);
		}

		debug!("run loop finished");
		host.finished();
		Exit::Stopped
	}

	/// Waits up to `wait`, returning early once the simulation leaves
	/// `Running`.
	fn pace(&self, wait: Duration) {
		if wait.is_zero() {
			return;
		}
		let sim = self.lock();
		let _ = self
			.shared
			.wake
			.wait_timeout_while(sim, wait, |sim| sim.phase() == Phase::Running)
			.unwrap_or_else(PoisonError::into_inner);
	}

	/// Blocks while paused. Returns whether the simulation was resumed.
	fn wait_for_resume(&self) -> bool {
		let sim = self.lock();
		let sim = self
			.shared
			.wake
			.wait_while(sim, |sim| sim.phase() == Phase::Paused)
			.unwrap_or_else(PoisonError::into_inner);
		sim.phase() == Phase::Running
	}

	/// Runs the loop on a new thread, re-entering it after every resume,
	/// until the simulation stops.
	pub fn spawn<S, H>(&self, mut surface: S, mut host: H) -> JoinHandle<()>
	where
		S: Surface + Send + 'static,
		H: Host + Send + 'static,
	{
		let runner = self.clone();
		thread::spawn(move || loop {
			match runner.run(&mut surface, &mut host) {
				Exit::Paused => {
					if !runner.wait_for_resume() {
						info!("stopped while paused");
						return;
					}
				}
				Exit::Stopped | Exit::NotReady => return,
			}
		})
	}
}
