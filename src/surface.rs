//! Collaborators the simulation talks to but does not implement.

use crate::prelude::*;
use std::time::Duration;

/// A pixel-space drawing target. Coordinates are already in display units.
pub trait Surface {
    fn set_color(&mut self, color: Color);
    fn fill_circle(&mut self, x: i32, y: i32, diameter: u32);
    fn erase_circle(&mut self, x: i32, y: i32, diameter: u32);
}

/// Discards every drawing call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn set_color(&mut self, _color: Color) {}
    fn fill_circle(&mut self, _x: i32, _y: i32, _diameter: u32) {}
    fn erase_circle(&mut self, _x: i32, _y: i32, _diameter: u32) {}
}

/// Pacing and lifecycle callbacks of the run loop.
pub trait Host {
    /// Called once per tick with the requested real-time interval. Returns
    /// how long the loop should actually wait; the wait ends early on pause
    /// or stop.
    fn request_delay(&mut self, interval: Duration) -> Duration {
        interval
    }

    /// Called once when the run loop exits because it was stopped.
    fn finished(&mut self) {}
}
