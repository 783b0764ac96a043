use crate::param::*;

const COLS: &[&str] = &["cyan", "red"];

#[test]
fn test_double_rejects_out_of_range() {
    let mut p = Parameter::double("Planet orbit", 0.12, 0.0, 1.0, false);
    let err = p.set(Value::Double(1.5)).unwrap_err();
    assert_eq!(
        err,
        ParamError::OutOfRange { name: "Planet orbit", value: 1.5, min: 0.0, max: 1.0 }
    );
    assert_eq!(p.value(), Value::Double(0.12));

    p.set(Value::Double(0.5)).unwrap();
    assert_eq!(p.as_f64(), 0.5);
}

#[test]
fn test_nan_is_never_stored() {
    let mut p = Parameter::double("G", 1.0, 0.0, 10.0, true);
    assert!(p.set(Value::Double(f64::NAN)).is_err());
    assert!(p.set_clamped(Value::Double(f64::NAN)).is_err());
    assert_eq!(p.as_f64(), 1.0);
}

#[test]
fn test_set_clamped_pulls_into_range() {
    let mut p = Parameter::int("Number of planets", 50, 1, 1000, false);
    p.set_clamped(Value::Int(0)).unwrap();
    assert_eq!(p.as_int(), 1);
    p.set_clamped(Value::Int(5000)).unwrap();
    assert_eq!(p.as_int(), 1000);

    let mut d = Parameter::double("Simulation speed", 1.0, 0.125, 16.0, true);
    d.set_clamped(Value::Double(100.0)).unwrap();
    assert_eq!(d.as_f64(), 16.0);
}

#[test]
fn test_default_outside_bounds_is_clamped() {
    let p = Parameter::int("Width", 50, 200, 2000, false);
    assert_eq!(p.default_value(), Value::Int(200));
}

#[test]
fn test_kind_mismatch() {
    let mut p = Parameter::flag("Trails on", false, true);
    let err = p.set(Value::Int(1)).unwrap_err();
    assert!(matches!(err, ParamError::KindMismatch { expected: "bool", actual: "int", .. }));
    assert!(!p.as_bool());
}

#[test]
fn test_reset_restores_default() {
    let mut p = Parameter::double("Star core mass", 1e6, 0.0, 1e10, true);
    p.set(Value::Double(3.0)).unwrap();
    p.reset();
    assert_eq!(p.value(), p.default_value());
    assert_eq!(p.as_f64(), 1e6);
}

#[test]
fn test_color_choices() {
    let mut p = Parameter::color("Planet colour", COLS, true);
    assert_eq!(p.choice(), Some("cyan"));
    assert_eq!(p.as_color(), palette::named::CYAN);

    p.set_choice("RED").unwrap();
    assert_eq!(p.choice(), Some("red"));
    assert_eq!(p.value(), Value::Color(1));

    assert!(matches!(p.set_choice("mauve"), Err(ParamError::UnknownChoice { .. })));
    assert!(p.set(Value::Color(2)).is_err());
    assert_eq!(p.choice(), Some("red"));
}

#[test]
fn test_counter_steps_without_bounds() {
    let mut p = Parameter::counter("Merged bodies");
    p.step_int(1);
    p.step_int(1);
    p.step_int(-3);
    assert_eq!(p.as_int(), -1);
    p.reset();
    assert_eq!(p.as_int(), 0);
}

#[test]
fn test_step_int_ignores_other_kinds() {
    let mut p = Parameter::flag("Body collisions", true, true);
    p.step_int(5);
    assert_eq!(p.value(), Value::Bool(true));
}

#[test]
fn test_error_messages_name_the_parameter() {
    let err = ParamError::Locked { name: "Simulation width" };
    assert_eq!(err.to_string(), "Simulation width cannot be changed while the simulation is running");
}
