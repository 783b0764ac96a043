//! The setup parameters of a simulation.

use crate::{
    BASE_INTERVAL_MS,
    body::{ForceLaw, Role},
    param::{ParamError, Parameter, Value},
    prelude::*,
};

const PLANET_COLS: &[&str] = &["cyan", "yellow", "red", "blue", "white", "pink", "green"];
const STAR_COLS: &[&str] = &["yellow", "red", "green", "blue", "white", "pink", "cyan"];
const ROGUE_COLS: &[&str] = &["green", "yellow", "red", "blue", "white", "pink", "cyan"];

/// Upper bound shared by the speed and mass parameters.
const BIG: f64 = 1e10;

/// Fastest allowed simulation speed: one tick per millisecond.
const MAX_SIM_SPEED: f64 = BASE_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Width,
    Height,
    PlanetCount,
    PlanetSpeed,
    PlanetOrbit,
    SimSpeed,
    PlanetMass,
    StarMass,
    RogueMass,
    Gravity,
    PlanetColor,
    StarColor,
    RogueColor,
    Trails,
    Collisions,
}

impl ParamId {
    pub const ALL: [ParamId; 15] = [
        ParamId::Width,
        ParamId::Height,
        ParamId::PlanetCount,
        ParamId::PlanetSpeed,
        ParamId::PlanetOrbit,
        ParamId::SimSpeed,
        ParamId::PlanetMass,
        ParamId::StarMass,
        ParamId::RogueMass,
        ParamId::Gravity,
        ParamId::PlanetColor,
        ParamId::StarColor,
        ParamId::RogueColor,
        ParamId::Trails,
        ParamId::Collisions,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    params: Vec<Parameter>,
    pub force_law: ForceLaw,
}

impl Default for Settings {
    fn default() -> Self {
        // Order must match ParamId.
        let params = vec![
            Parameter::int("Simulation width", 800, 200, 2000, false),
            Parameter::int("Simulation height", 600, 200, 2000, false),
            Parameter::int("Number of planets", 50, 1, 1000, false),
            Parameter::double("Planet speed", 4e3, 0.1, BIG, false),
            Parameter::double("Planet orbit", 0.12, 0.0, 1.0, false),
            Parameter::double("Simulation speed", 1.0, 0.125, MAX_SIM_SPEED, true),
            Parameter::double("Planet core mass", 1.0, 0.0, BIG, true),
            Parameter::double("Star core mass", 1e6, 0.0, BIG, true),
            Parameter::double("Rogue core mass", 1e2, 0.0, BIG, true),
            Parameter::double("Gravitational const.", 0.001, 0.0, 100.0, true),
            Parameter::color("Planet colour", PLANET_COLS, true),
            Parameter::color("Star colour", STAR_COLS, true),
            Parameter::color("Rogue colour", ROGUE_COLS, true),
            Parameter::flag("Trails on", false, true),
            Parameter::flag("Body collisions", true, true),
        ];
        Settings {
            params,
            force_law: ForceLaw::default(),
        }
    }
}

impl Settings {
    /// All parameters in display order.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn get(&self, id: ParamId) -> &Parameter {
        &self.params[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<ParamId> {
        ParamId::ALL.iter().copied().find(|id| self.get(*id).name() == name)
    }

    pub fn set(&mut self, id: ParamId, value: Value) -> Result<(), ParamError> {
        self.params[id.index()].set(value)
    }

    pub fn set_clamped(&mut self, id: ParamId, value: Value) -> Result<(), ParamError> {
        self.params[id.index()].set_clamped(value)
    }

    pub fn set_by_name(&mut self, name: &str, value: Value) -> Result<(), ParamError> {
        let id = self.find(name).ok_or_else(|| ParamError::UnknownName(name.to_string()))?;
        self.set(id, value)
    }

    pub fn set_choice(&mut self, id: ParamId, choice: &str) -> Result<(), ParamError> {
        self.params[id.index()].set_choice(choice)
    }

    /// Builder-style `set` for assembling a configuration.
    pub fn with(mut self, id: ParamId, value: Value) -> Result<Self, ParamError> {
        self.set(id, value)?;
        Ok(self)
    }

    pub fn reset(&mut self) {
        for param in &mut self.params {
            param.reset();
        }
    }

    pub fn width(&self) -> i64 {
        self.get(ParamId::Width).as_int()
    }

    pub fn height(&self) -> i64 {
        self.get(ParamId::Height).as_int()
    }

    pub fn planet_count(&self) -> usize {
        self.get(ParamId::PlanetCount).as_int().max(0) as usize
    }

    pub fn planet_speed(&self) -> f64 {
        self.get(ParamId::PlanetSpeed).as_f64()
    }

    pub fn orbit_fraction(&self) -> f64 {
        self.get(ParamId::PlanetOrbit).as_f64()
    }

    pub fn sim_speed(&self) -> f64 {
        self.get(ParamId::SimSpeed).as_f64()
    }

    pub fn gravity(&self) -> f64 {
        self.get(ParamId::Gravity).as_f64()
    }

    pub fn trails(&self) -> bool {
        self.get(ParamId::Trails).as_bool()
    }

    pub fn collisions(&self) -> bool {
        self.get(ParamId::Collisions).as_bool()
    }

    /// The shared core-mass template for every body of `role`.
    pub fn core_mass(&self, role: Role) -> f64 {
        let id = match role {
            Role::Star => ParamId::StarMass,
            Role::Planet => ParamId::PlanetMass,
            Role::Rogue => ParamId::RogueMass,
        };
        self.get(id).as_f64()
    }

    /// The shared color template for every body of `role`.
    pub fn color(&self, role: Role) -> Color {
        let id = match role {
            Role::Star => ParamId::StarColor,
            Role::Planet => ParamId::PlanetColor,
            Role::Rogue => ParamId::RogueColor,
        };
        self.get(id).as_color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_setup_panel() {
        let s = Settings::default();
        assert_eq!(s.width(), 800);
        assert_eq!(s.height(), 600);
        assert_eq!(s.planet_count(), 50);
        assert_eq!(s.planet_speed(), 4000.0);
        assert_eq!(s.orbit_fraction(), 0.12);
        assert_eq!(s.sim_speed(), 1.0);
        assert_eq!(s.core_mass(Role::Planet), 1.0);
        assert_eq!(s.core_mass(Role::Star), 1e6);
        assert_eq!(s.core_mass(Role::Rogue), 100.0);
        assert_eq!(s.gravity(), 0.001);
        assert!(!s.trails());
        assert!(s.collisions());
        assert_eq!(s.get(ParamId::StarColor).choice(), Some("yellow"));
        assert_eq!(s.force_law, ForceLaw::Reference);
    }

    #[test]
    fn ids_line_up_with_params() {
        let s = Settings::default();
        assert_eq!(s.params().len(), ParamId::ALL.len());
        assert_eq!(s.find("Number of planets"), Some(ParamId::PlanetCount));
        assert_eq!(s.find("Body collisions"), Some(ParamId::Collisions));
        assert_eq!(s.find("nope"), None);
    }

    #[test]
    fn out_of_range_width_is_rejected() {
        let mut s = Settings::default();
        assert!(s.set(ParamId::Width, Value::Int(100)).is_err());
        assert_eq!(s.width(), 800);

        s.set_clamped(ParamId::Width, Value::Int(5000)).unwrap();
        assert_eq!(s.width(), 2000);
    }

    #[test]
    fn colors_resolve_through_palette() {
        let mut s = Settings::default();
        assert_eq!(s.color(Role::Planet), palette::named::CYAN);
        s.set_choice(ParamId::PlanetColor, "red").unwrap();
        assert_eq!(s.color(Role::Planet), palette::named::RED);
    }

    #[test]
    fn set_by_name_reports_unknown_names() {
        let mut s = Settings::default();
        assert_eq!(
            s.set_by_name("Warp factor", Value::Double(9.0)),
            Err(ParamError::UnknownName("Warp factor".into()))
        );
        s.set_by_name("Trails on", Value::Bool(true)).unwrap();
        assert!(s.trails());
    }
}
