//! Named, constrained scalar values used for every tunable and counter.

use crate::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Double(f64),
    Int(i64),
    /// Index into the parameter's list of color choices.
    Color(usize),
    Bool(bool),
}

impl Value {
    fn kind_name(&self) -> &'static str {
        match self {
            Value::Double(_) => "double",
            Value::Int(_) => "int",
            Value::Color(_) => "color",
            Value::Bool(_) => "bool",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("{name}: {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{name}: no color choice {choice}")]
    UnknownChoice { name: &'static str, choice: String },
    #[error("{name}: expected a {expected} value, got {actual}")]
    KindMismatch {
        name: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("{name} cannot be changed while the simulation is running")]
    Locked { name: &'static str },
    #[error("no parameter named {0:?}")]
    UnknownName(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Double { value: f64, default: f64, min: f64, max: f64 },
    Int { value: i64, default: i64, min: i64, max: i64 },
    Color { index: usize, default: usize, choices: &'static [&'static str] },
    Bool { value: bool, default: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: &'static str,
    kind: Kind,
    live: bool,
}

impl Parameter {
    /// A bounded double. The default is clamped into `min..=max`.
    pub fn double(name: &'static str, default: f64, min: f64, max: f64, live: bool) -> Self {
        let default = default.max(min).min(max);
        Parameter {
            name,
            kind: Kind::Double { value: default, default, min, max },
            live,
        }
    }

    pub fn int(name: &'static str, default: i64, min: i64, max: i64, live: bool) -> Self {
        let default = default.clamp(min, max);
        Parameter {
            name,
            kind: Kind::Int { value: default, default, min, max },
            live,
        }
    }

    /// An unbounded integer starting at zero, used for data counters.
    pub fn counter(name: &'static str) -> Self {
        Parameter::int(name, 0, i64::MIN, i64::MAX, false)
    }

    /// An enumerated color; the first choice is the default.
    pub fn color(name: &'static str, choices: &'static [&'static str], live: bool) -> Self {
        Parameter {
            name,
            kind: Kind::Color { index: 0, default: 0, choices },
            live,
        }
    }

    pub fn flag(name: &'static str, default: bool, live: bool) -> Self {
        Parameter {
            name,
            kind: Kind::Bool { value: default, default },
            live,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the value may be edited while the simulation runs.
    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn value(&self) -> Value {
        match self.kind {
            Kind::Double { value, .. } => Value::Double(value),
            Kind::Int { value, .. } => Value::Int(value),
            Kind::Color { index, .. } => Value::Color(index),
            Kind::Bool { value, .. } => Value::Bool(value),
        }
    }

    pub fn default_value(&self) -> Value {
        match self.kind {
            Kind::Double { default, .. } => Value::Double(default),
            Kind::Int { default, .. } => Value::Int(default),
            Kind::Color { default, .. } => Value::Color(default),
            Kind::Bool { default, .. } => Value::Bool(default),
        }
    }

    /// Checks `value` against the kind and constraint without storing it.
    pub fn check(&self, value: Value) -> Result<(), ParamError> {
        match (&self.kind, value) {
            (Kind::Double { min, max, .. }, Value::Double(v)) => {
                if v.is_nan() || v < *min || v > *max {
                    return Err(ParamError::OutOfRange { name: self.name, value: v, min: *min, max: *max });
                }
            }
            (Kind::Int { min, max, .. }, Value::Int(v)) => {
                if v < *min || v > *max {
                    return Err(ParamError::OutOfRange {
                        name: self.name,
                        value: v as f64,
                        min: *min as f64,
                        max: *max as f64,
                    });
                }
            }
            (Kind::Color { choices, .. }, Value::Color(i)) => {
                if i >= choices.len() {
                    return Err(ParamError::UnknownChoice { name: self.name, choice: i.to_string() });
                }
            }
            (Kind::Bool { .. }, Value::Bool(_)) => {}
            (_, other) => {
                return Err(ParamError::KindMismatch {
                    name: self.name,
                    expected: self.value().kind_name(),
                    actual: other.kind_name(),
                });
            }
        }
        Ok(())
    }

    /// Stores `value` if it satisfies the constraint, otherwise leaves the
    /// parameter untouched.
    pub fn set(&mut self, value: Value) -> Result<(), ParamError> {
        self.check(value)?;
        self.store(value);
        Ok(())
    }

    /// Like `set`, but pulls numeric values into range instead of rejecting
    /// them. Kind mismatches and unknown color choices are still errors.
    pub fn set_clamped(&mut self, value: Value) -> Result<(), ParamError> {
        let value = match (&self.kind, value) {
            (Kind::Double { min, max, .. }, Value::Double(v)) if !v.is_nan() => Value::Double(v.max(*min).min(*max)),
            (Kind::Int { min, max, .. }, Value::Int(v)) => Value::Int(v.clamp(*min, *max)),
            _ => value,
        };
        self.set(value)
    }

    /// Selects a color choice by name, e.g. `"red"`.
    pub fn set_choice(&mut self, choice: &str) -> Result<(), ParamError> {
        let index = match &self.kind {
            Kind::Color { choices, .. } => choices.iter().position(|c| c.eq_ignore_ascii_case(choice)),
            _ => {
                return Err(ParamError::KindMismatch { name: self.name, expected: self.value().kind_name(), actual: "color" });
            }
        };
        match index {
            Some(i) => self.set(Value::Color(i)),
            None => Err(ParamError::UnknownChoice { name: self.name, choice: choice.to_string() }),
        }
    }

    pub fn reset(&mut self) {
        let default = self.default_value();
        self.store(default);
    }

    /// Adds `delta` to an integer parameter, saturating at its bounds.
    /// Other kinds are left unchanged.
    pub fn step_int(&mut self, delta: i64) {
        if let Kind::Int { value, min, max, .. } = &mut self.kind {
            *value = value.saturating_add(delta).clamp(*min, *max);
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.kind {
            Kind::Double { value, .. } => value,
            Kind::Int { value, .. } => value as f64,
            Kind::Color { index, .. } => index as f64,
            Kind::Bool { value, .. } => if value { 1.0 } else { 0.0 },
        }
    }

    pub fn as_int(&self) -> i64 {
        match self.kind {
            Kind::Int { value, .. } => value,
            Kind::Double { value, .. } => value as i64,
            Kind::Color { index, .. } => index as i64,
            Kind::Bool { value, .. } => value as i64,
        }
    }

    pub fn as_bool(&self) -> bool {
        match self.kind {
            Kind::Bool { value, .. } => value,
            _ => self.as_f64() != 0.0,
        }
    }

    /// Name of the selected color choice, if this is a color parameter.
    pub fn choice(&self) -> Option<&'static str> {
        match self.kind {
            Kind::Color { index, choices, .. } => choices.get(index).copied(),
            _ => None,
        }
    }

    /// The selected color as sRGB. Unknown names fall back to white.
    pub fn as_color(&self) -> Color {
        self.choice()
            .and_then(palette::named::from_str)
            .unwrap_or(palette::named::WHITE)
    }

    fn store(&mut self, new: Value) {
        match (&mut self.kind, new) {
            (Kind::Double { value, .. }, Value::Double(v)) => *value = v,
            (Kind::Int { value, .. }, Value::Int(v)) => *value = v,
            (Kind::Color { index, .. }, Value::Color(i)) => *index = i,
            (Kind::Bool { value, .. }, Value::Bool(v)) => *value = v,
            _ => {}
        }
    }
}
