pub use nalgebra as na;

pub type Scalar = f64;

pub type Vec2 = na::Vector2<Scalar>;
pub type Color = palette::Srgb<u8>;

pub use crate::{
    Phase,
    Simulation,
    body::{Body, BodyId, ForceLaw, Role},
    counters::Counters,
    param::{ParamError, Parameter, Value},
    runner::Runner,
    settings::{ParamId, Settings},
    surface::{Host, Surface},
};
