use crate::prelude::*;
use crate::surface::Surface;
use log::{trace, warn};

/// Internal position units per display pixel.
pub const SCALE_FACTOR: Scalar = 1000.0;

/// Separations at or below this carry no usable direction; the pair's
/// velocity term is skipped.
pub const MIN_SEPARATION: Scalar = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Which shared mass and color template a body follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Star,
    Planet,
    Rogue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceLaw {
    /// `G * (m / r * r)`, which groups as `(m / r) * r`. The default
    /// parameters were tuned against this term.
    #[default]
    Reference,
    /// `G * m / r^2`.
    InverseSquare,
}

impl ForceLaw {
    pub fn term(self, mass: Scalar, r: Scalar) -> Scalar {
        match self {
            ForceLaw::Reference => mass / r * r,
            ForceLaw::InverseSquare => mass / (r * r),
        }
    }
}

/// Everything a body needs from its simulation for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEnv {
    pub dt: Scalar,
    pub gravity: Scalar,
    pub force_law: ForceLaw,
    /// Current value of the body's core-mass template.
    pub core_mass: Scalar,
    pub color: Color,
    pub collisions: bool,
    pub trails: bool,
    pub width: Scalar,
    pub height: Scalar,
}

/// Another body as seen from inside a stepping pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peer {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub mass: Scalar,
    pub diameter: u32,
    pub alive: bool,
}

/// The outcome of a close approach. The survivor takes `position`,
/// `velocity` and `absorbed` extra mass; the loser is gone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    pub survivor: BodyId,
    pub loser: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub absorbed: Scalar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Entered,
    Left,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub merges: Vec<Merge>,
    pub transition: Option<Transition>,
    /// The body was absorbed during this step.
    pub died: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub role: Role,
    pub pos: Vec2,
    pub vel: Vec2,
    core_mass: Scalar,
    accreted_mass: Scalar,
    diameter: u32,
    off_screen: bool,
    dead: bool,
}

impl Body {
    pub fn new(id: BodyId, role: Role, pos: Vec2, vel: Vec2, core_mass: Scalar) -> Self {
        Body {
            id,
            role,
            pos,
            vel,
            core_mass,
            accreted_mass: 0.0,
            diameter: diameter_for(core_mass),
            off_screen: false,
            dead: false,
        }
    }

    pub fn total_mass(&self) -> Scalar {
        self.core_mass + self.accreted_mass
    }

    pub fn core_mass(&self) -> Scalar {
        self.core_mass
    }

    pub fn accreted_mass(&self) -> Scalar {
        self.accreted_mass
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    pub fn is_off_screen(&self) -> bool {
        self.off_screen
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn peer(&self) -> Peer {
        Peer {
            id: self.id,
            pos: self.pos,
            vel: self.vel,
            mass: self.total_mass(),
            diameter: self.diameter,
            alive: !self.dead,
        }
    }

    /// Takes on the result of a merge this body survived.
    pub fn absorb(&mut self, mass: Scalar, pos: Vec2, vel: Vec2) {
        self.accreted_mass += mass;
        self.pos = pos;
        self.vel = vel;
    }

    /// Advances this body by `dt` against every live peer.
    ///
    /// Each peer's pull is applied to velocity and then position before the
    /// next peer is considered, so later terms see the partially updated
    /// state of `self`. Peers are never modified or erased here; merges are
    /// reported back for the owner to apply.
    pub fn step(&mut self, env: &StepEnv, peers: &[Peer], surface: &mut dyn Surface) -> StepReport {
        let mut report = StepReport::default();
        if self.dead {
            warn!("body {:?} stepped after it was absorbed", self.id);
            return report;
        }

        self.erase(env, surface);
        self.core_mass = env.core_mass;

        for peer in peers {
            if peer.id == self.id || !peer.alive {
                continue;
            }

            let sep = peer.pos - self.pos;
            let r = sep.norm();
            if r > MIN_SEPARATION {
                let pull = env.gravity * env.force_law.term(peer.mass, r);
                self.vel.x += pull * (sep.x / r) * env.dt;
                self.vel.y += pull * (sep.y / r) * env.dt;
            }
            self.pos.x += self.vel.x * env.dt;
            self.pos.y += self.vel.y * env.dt;

            if env.collisions {
                let min_sep = (self.diameter + peer.diameter) as Scalar / 4.0;
                if r / SCALE_FACTOR < min_sep {
                    let merge = self.merge(peer);
                    trace!("{:?} absorbed {:?}", merge.survivor, merge.loser);
                    report.merges.push(merge);
                    if self.dead {
                        report.died = true;
                        return report;
                    }
                }
            }
        }

        report.transition = self.draw(env, surface);
        report
    }

    /// Combines `self` with `other`. The strictly heavier body survives;
    /// on a tie `self` is the one absorbed.
    pub fn merge(&mut self, other: &Peer) -> Merge {
        let m1 = self.total_mass();
        let m2 = other.mass;
        let total = m1 + m2;
        let (position, velocity) = if total > 0.0 {
            (
                (self.pos * m1 + other.pos * m2) / total,
                (self.vel * m1 + other.vel * m2) / total,
            )
        } else {
            ((self.pos + other.pos) / 2.0, (self.vel + other.vel) / 2.0)
        };

        if m1 > m2 {
            self.absorb(m2, position, velocity);
            Merge {
                survivor: self.id,
                loser: other.id,
                position,
                velocity,
                absorbed: m2,
            }
        } else {
            self.dead = true;
            Merge {
                survivor: other.id,
                loser: self.id,
                position,
                velocity,
                absorbed: m1,
            }
        }
    }

    /// Refreshes the diameter and visibility, drawing the body if it lies
    /// inside the area. Returns the visibility change, if any.
    pub fn draw(&mut self, env: &StepEnv, surface: &mut dyn Surface) -> Option<Transition> {
        self.diameter = diameter_for(self.total_mass());
        if in_bounds(self.pos, self.diameter, env.width, env.height) {
            let (x, y) = corner(self.pos, self.diameter);
            surface.set_color(env.color);
            surface.fill_circle(x, y, self.diameter);
            if self.off_screen {
                self.off_screen = false;
                return Some(Transition::Entered);
            }
        } else if !self.off_screen {
            self.off_screen = true;
            return Some(Transition::Left);
        }
        None
    }

    pub fn erase(&self, env: &StepEnv, surface: &mut dyn Surface) {
        if !env.trails && in_bounds(self.pos, self.diameter, env.width, env.height) {
            let (x, y) = corner(self.pos, self.diameter);
            surface.erase_circle(x, y, self.diameter);
        }
    }
}

/// Display diameter for a mass: 2 up to mass 1, then 2 more for every
/// doubling of the mass.
pub fn diameter_for(mass: Scalar) -> u32 {
    if mass <= 1.0 {
        return 2;
    }
    let mut upper = 2.0;
    let mut multiplier = 1;
    while mass > upper {
        upper *= 2.0;
        multiplier += 1;
    }
    multiplier * 2
}

/// Whether a circle of `diameter` centred at `pos` fits inside the
/// `width` x `height` display area.
pub fn in_bounds(pos: Vec2, diameter: u32, width: Scalar, height: Scalar) -> bool {
    let x = pos.x / SCALE_FACTOR;
    let y = pos.y / SCALE_FACTOR;
    let r = diameter as Scalar / 2.0;
    x - r >= 0.0 && x + r <= width && y - r >= 0.0 && y + r <= height
}

/// Top-left pixel of the bounding square the surface draws into.
pub fn corner(pos: Vec2, diameter: u32) -> (i32, i32) {
    let half = (diameter / 2) as Scalar;
    (
        (pos.x / SCALE_FACTOR - half) as i32,
        (pos.y / SCALE_FACTOR - half) as i32,
    )
}
