use crate::param::Parameter;

const SIM_TIME: usize = 0;
const OFF_SCREEN: usize = 1;
const ON_SCREEN: usize = 2;
const MERGED: usize = 3;

/// Population and time counters observed by the data panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Counters {
    params: [Parameter; 4],
}

impl Default for Counters {
    fn default() -> Self {
        Counters::new()
    }
}

impl Counters {
    pub fn new() -> Self {
        Counters {
            params: [
                Parameter::counter("Sim time"),
                Parameter::counter("Bodies off screen"),
                Parameter::counter("Bodies on screen"),
                Parameter::counter("Merged bodies"),
            ],
        }
    }

    /// The counters in display order.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn sim_time(&self) -> i64 {
        self.params[SIM_TIME].as_int()
    }

    pub fn bodies_on_screen(&self) -> i64 {
        self.params[ON_SCREEN].as_int()
    }

    pub fn bodies_off_screen(&self) -> i64 {
        self.params[OFF_SCREEN].as_int()
    }

    pub fn merged_bodies(&self) -> i64 {
        self.params[MERGED].as_int()
    }

    pub fn inc_sim_time(&mut self) {
        self.params[SIM_TIME].step_int(1);
    }

    pub fn inc_bodies_on_screen(&mut self) {
        self.params[ON_SCREEN].step_int(1);
    }

    pub fn dec_bodies_on_screen(&mut self) {
        self.params[ON_SCREEN].step_int(-1);
    }

    pub fn inc_bodies_off_screen(&mut self) {
        self.params[OFF_SCREEN].step_int(1);
    }

    pub fn dec_bodies_off_screen(&mut self) {
        self.params[OFF_SCREEN].step_int(-1);
    }

    pub fn inc_merged_bodies(&mut self) {
        self.params[MERGED].step_int(1);
    }

    /// Bodies currently accounted for, on or off screen.
    pub fn tracked_bodies(&self) -> i64 {
        self.bodies_on_screen() + self.bodies_off_screen()
    }

    pub fn reset(&mut self) {
        for param in &mut self.params {
            param.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let c = Counters::new();
        assert_eq!(c.sim_time(), 0);
        assert_eq!(c.bodies_on_screen(), 0);
        assert_eq!(c.bodies_off_screen(), 0);
        assert_eq!(c.merged_bodies(), 0);
    }

    #[test]
    fn increments_and_decrements() {
        let mut c = Counters::new();
        c.inc_bodies_on_screen();
        c.inc_bodies_on_screen();
        c.dec_bodies_on_screen();
        c.inc_bodies_off_screen();
        c.inc_merged_bodies();
        c.inc_sim_time();
        c.inc_sim_time();

        assert_eq!(c.bodies_on_screen(), 1);
        assert_eq!(c.bodies_off_screen(), 1);
        assert_eq!(c.tracked_bodies(), 2);
        assert_eq!(c.merged_bodies(), 1);
        assert_eq!(c.sim_time(), 2);
    }

    #[test]
    fn reset_restores_every_counter() {
        let mut c = Counters::new();
        c.inc_sim_time();
        c.inc_bodies_off_screen();
        c.inc_merged_bodies();
        c.reset();
        assert_eq!(c, Counters::new());
    }

    #[test]
    fn params_are_listed_in_display_order() {
        let c = Counters::new();
        let names: Vec<_> = c.params().iter().map(|p| p.name()).collect();
        assert_eq!(names, ["Sim time", "Bodies off screen", "Bodies on screen", "Merged bodies"]);
    }
}
