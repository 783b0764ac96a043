use crate::body::{Peer, StepEnv, StepReport, Transition, SCALE_FACTOR};
use crate::prelude::*;
use log::{debug, info, trace, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use std::f64::consts::PI;
use std::time::Duration;

pub mod body;
pub mod counters;
pub mod param;
pub mod prelude;
pub mod runner;
pub mod settings;
pub mod surface;

#[cfg(test)]
mod param_test;

/// Fixed integration step; independent of the simulation speed.
pub const DELTA_T: Scalar = 0.01;

/// Real-time interval between ticks at simulation speed 1. Simulation
/// speed is capped so the interval never drops below one millisecond.
pub const BASE_INTERVAL_MS: f64 = 16.0;

pub const RANDOM_SEED: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// No bodies yet.
	Idle,
	/// Bodies created, not started.
	Ready,
	Running,
	Paused,
	Stopped,
}

pub struct Simulation {
	settings: Settings,
	counters: Counters,
	bodies: Vec<Body>,
	star: Option<BodyId>,
	star_anchor: Vec2,
	rng: ChaChaRng,
	next_id: u32,
	phase: Phase,
}

impl Default for Simulation {
	fn default() -> Self {
		Simulation::new(Settings::default())
	}
}

impl Simulation {
	pub fn new(settings: Settings) -> Self {
		Simulation::with_seed(settings, RANDOM_SEED)
	}

	pub fn with_seed(settings: Settings, seed: u64) -> Self {
		Simulation {
			settings,
			counters: Counters::new(),
			bodies: Vec::new(),
			star: None,
			star_anchor: Vec2::zeros(),
			rng: ChaChaRng::seed_from_u64(seed),
			next_id: 0,
			phase: Phase::Idle,
		}
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn counters(&self) -> &Counters {
		&self.counters
	}

	/// Live bodies in stepping order.
	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn body(&self, id: BodyId) -> Option<&Body> {
		self.bodies.iter().find(|b| b.id == id)
	}

	pub fn live_count(&self) -> usize {
		self.bodies.len()
	}

	pub fn star(&self) -> Option<BodyId> {
		self.star
	}

	pub fn phase(&self) -> Phase {
		self.phase
	}

	pub fn is_running(&self) -> bool {
		self.phase == Phase::Running
	}

	pub fn trails_on(&self) -> bool {
		self.settings.trails()
	}

	pub fn collisions_on(&self) -> bool {
		self.settings.collisions()
	}

	pub fn width(&self) -> i64 {
		self.settings.width()
	}

	pub fn height(&self) -> i64 {
		self.settings.height()
	}

	/// Edits a setup parameter. Parameters that are not live are refused
	/// once the simulation has started.
	pub fn set_param(&mut self, id: ParamId, value: Value) -> Result<(), ParamError> {
		self.check_editable(id)?;
		self.settings.set(id, value)
	}

	pub fn set_choice(&mut self, id: ParamId, choice: &str) -> Result<(), ParamError> {
		self.check_editable(id)?;
		self.settings.set_choice(id, choice)
	}

	fn check_editable(&self, id: ParamId) -> Result<(), ParamError> {
		let param = self.settings.get(id);
		let started = matches!(self.phase, Phase::Running | Phase::Paused);
		if started && !param.is_live() {
			return Err(ParamError::Locked { name: param.name() });
		}
		Ok(())
	}

	pub fn set_force_law(&mut self, law: ForceLaw) {
		info!("force law set to {:?}", law);
		self.settings.force_law = law;
	}

	/// Whether the visibility counters account for exactly the live bodies.
	pub fn census_consistent(&self) -> bool {
		self.counters.tracked_bodies() == self.bodies.len() as i64
	}

	/// Real-time pause between ticks at the current simulation speed.
	pub fn tick_interval(&self) -> Duration {
		Duration::from_millis((BASE_INTERVAL_MS / self.settings.sim_speed()) as u64)
	}

	/// Replaces the bodies with a star at the centre of the area and a ring
	/// of planets around it. Counters start again from zero.
	pub fn create_bodies(&mut self) {
		self.bodies.clear();
		self.counters.reset();
		self.next_id = 0;

		let n = self.settings.planet_count();
		let x_bound = (self.settings.width() as Scalar * SCALE_FACTOR) as i64 as Scalar;
		let y_bound = (self.settings.height() as Scalar * SCALE_FACTOR) as i64 as Scalar;

		let centre = Vec2::new(x_bound / 2.0, y_bound / 2.0);
		let star = self.spawn(Role::Star, centre, Vec2::zeros());
		self.star = Some(star);
		self.star_anchor = centre;

		let jitter = 0.001 * self.rng.random_range(0..100) as Scalar;
		let r = (self.settings.orbit_fraction() + jitter) * x_bound;
		let speed = self.settings.planet_speed();
		for i in 0..n {
			let w = (i * 2) as Scalar * PI / n as Scalar;
			let pos = Vec2::new(centre.x + r * w.sin(), centre.y + r * w.cos() * -1.0);
			let vel = Vec2::new(speed * w.cos(), speed * w.sin());
			self.spawn(Role::Planet, pos, vel);
		}

		self.phase = Phase::Ready;
		debug!("created star and {} planets on a ring of radius {}", n, r / SCALE_FACTOR);
	}

	/// Appends a body of `role` using that role's current core mass. New
	/// bodies count as on screen until their first visibility check.
	pub fn spawn(&mut self, role: Role, pos: Vec2, vel: Vec2) -> BodyId {
		let id = BodyId(self.next_id);
		self.next_id += 1;
		let core_mass = self.settings.core_mass(role);
		self.bodies.push(Body::new(id, role, pos, vel, core_mass));
		self.counters.inc_bodies_on_screen();
		if self.phase == Phase::Idle {
			self.phase = Phase::Ready;
		}
		id
	}

	/// Adds a rogue body at a random angle outside the planet ring with a
	/// random fraction of the planet speed.
	pub fn add_rogue(&mut self) -> Option<BodyId> {
		if self.star.is_none() {
			warn!("no star to place a rogue around");
			return None;
		}
		if let Some(star) = self.star.and_then(|id| self.body(id)) {
			self.star_anchor = star.pos;
		}
		let anchor = self.star_anchor;

		let speed = self.settings.planet_speed();
		let r = self.settings.orbit_fraction() * self.settings.width() as Scalar * SCALE_FACTOR * 2.0;
		let w = 0.01 * self.rng.random_range(0..200) as Scalar * PI;
		let pos = Vec2::new(anchor.x + r * w.sin(), anchor.y + r * w.cos() * -1.0);
		let vx = 0.01 * self.rng.random_range(0..100) as Scalar * speed * w.cos();
		let vy = 0.01 * self.rng.random_range(0..100) as Scalar * speed * (w * -1.0).sin();

		let id = self.spawn(Role::Rogue, pos, Vec2::new(vx, vy));
		info!("rogue {:?} added, {} bodies live", id, self.bodies.len());
		Some(id)
	}

	/// Removes a body from the live collection and records the merge.
	/// Unknown ids are ignored.
	pub fn remove_body(&mut self, id: BodyId) -> bool {
		let idx = match self.index_of(id) {
			Some(idx) => idx,
			None => {
				warn!("tried to remove {:?}, which is not live", id);
				return false;
			}
		};
		let body = self.bodies.remove(idx);
		if body.is_off_screen() {
			self.counters.dec_bodies_off_screen();
		} else {
			self.counters.dec_bodies_on_screen();
		}
		self.counters.inc_merged_bodies();
		true
	}

	/// Steps every live body once. Peers are read from a snapshot taken at
	/// the start of the pass; merges update the snapshot as they happen.
	pub fn step_all(&mut self, surface: &mut dyn Surface) {
		let order: Vec<BodyId> = self.bodies.iter().map(|b| b.id).collect();
		let mut peers: Vec<Peer> = self.bodies.iter().map(Body::peer).collect();

		for id in order {
			let idx = match self.index_of(id) {
				Some(idx) => idx,
				None => continue,
			};
			let env = self.step_env(self.bodies[idx].role);
			let report = self.bodies[idx].step(&env, &peers, surface);
			self.apply(id, report, &mut peers, surface);
		}
		trace!("stepped {} bodies", self.bodies.len());
	}

	/// One tick: a full stepping pass followed by the time counter.
	pub fn tick(&mut self, surface: &mut dyn Surface) {
		self.step_all(surface);
		self.counters.inc_sim_time();
	}

	/// Draws every live body at its current position.
	pub fn draw_all(&mut self, surface: &mut dyn Surface) {
		for idx in 0..self.bodies.len() {
			let env = self.step_env(self.bodies[idx].role);
			if let Some(t) = self.bodies[idx].draw(&env, surface) {
				self.record(t);
			}
		}
	}

	/// Moves to `Running`. Fails only when there are no bodies yet.
	pub fn start(&mut self) -> bool {
		if self.phase == Phase::Idle {
			warn!("start requested before any bodies exist");
			return false;
		}
		if self.phase != Phase::Running {
			info!("simulation running from tick {}", self.counters.sim_time());
		}
		self.phase = Phase::Running;
		true
	}

	pub fn pause(&mut self) {
		if self.phase == Phase::Running {
			info!("simulation paused at tick {}", self.counters.sim_time());
			self.phase = Phase::Paused;
		}
	}

	pub fn stop(&mut self) {
		if matches!(self.phase, Phase::Running | Phase::Paused) {
			info!("simulation stopped at tick {}", self.counters.sim_time());
			self.phase = Phase::Stopped;
		}
	}

	pub fn reset_counters(&mut self) {
		self.counters.reset();
	}

	/// Drops every body and returns to `Idle`. Settings are kept.
	pub fn reset(&mut self) {
		self.stop();
		self.bodies.clear();
		self.counters.reset();
		self.star = None;
		self.next_id = 0;
		self.phase = Phase::Idle;
		debug!("simulation reset");
	}

	fn index_of(&self, id: BodyId) -> Option<usize> {
		self.bodies.iter().position(|b| b.id == id)
	}

	fn step_env(&self, role: Role) -> StepEnv {
		StepEnv {
			dt: DELTA_T,
			gravity: self.settings.gravity(),
			force_law: self.settings.force_law,
			core_mass: self.settings.core_mass(role),
			color: self.settings.color(role),
			collisions: self.settings.collisions(),
			trails: self.settings.trails(),
			width: self.settings.width() as Scalar,
			height: self.settings.height() as Scalar,
		}
	}

	/// Applies a step's merges to the other bodies involved. Those bodies are
	/// erased where they were last drawn; a survivor is redrawn at its merged
	/// position, after the loser is gone from the surface.
	fn apply(&mut self, stepped: BodyId, report: StepReport, peers: &mut [Peer], surface: &mut dyn Surface) {
		for merge in &report.merges {
			if merge.loser != stepped {
				self.erase_body(merge.loser, surface);
			}
			if merge.survivor != stepped {
				if let Some(idx) = self.index_of(merge.survivor) {
					let env = self.step_env(self.bodies[idx].role);
					self.bodies[idx].erase(&env, surface);
					self.bodies[idx].absorb(merge.absorbed, merge.position, merge.velocity);
					if let Some(t) = self.bodies[idx].draw(&env, surface) {
						self.record(t);
					}
				}
			}
			self.remove_body(merge.loser);
			debug!("{:?} merged into {:?}", merge.loser, merge.survivor);

			for peer in peers.iter_mut() {
				if peer.id == merge.loser {
					peer.alive = false;
				}
			}
			if let Some(survivor) = self.body(merge.survivor).map(Body::peer) {
				if let Some(peer) = peers.iter_mut().find(|p| p.id == survivor.id) {
					*peer = survivor;
				}
			}
		}
		if let Some(t) = report.transition {
			self.record(t);
		}

		// Erasing a loser may have cut into the stepped survivor's circle.
		if !report.merges.is_empty() && !report.died {
			if let Some(idx) = self.index_of(stepped) {
				let env = self.step_env(self.bodies[idx].role);
				if let Some(t) = self.bodies[idx].draw(&env, surface) {
					self.record(t);
				}
			}
		}
	}

	fn erase_body(&self, id: BodyId, surface: &mut dyn Surface) {
		if let Some(body) = self.body(id) {
			body.erase(&self.step_env(body.role), surface);
		}
	}

	fn record(&mut self, transition: Transition) {
		match transition {
			Transition::Entered => {
				self.counters.dec_bodies_off_screen();
				self.counters.inc_bodies_on_screen();
			}
			Transition::Left => {
				self.counters.inc_bodies_off_screen();
				self.counters.dec_bodies_on_screen();
			}
		}
	}
}
