//! Behavior with process-wide canonicalization turned on.
//!
//! The settings can only be installed once per process, so everything that
//! depends on them lives in this one test binary.

use pretty_assertions::assert_eq;
use rhizome_tower_complex::settings::{self, Settings};
use rhizome_tower_complex::{convert, to_c, Complex, Error, Operand, Scalar, Value, I};

fn install() {
    // the first test to run installs; the rest see the same settings
    let _ = settings::init(Settings { canonicalize: true });
    assert!(settings::current().canonicalize);
}

#[test]
fn test_second_init_fails() {
    install();
    assert_eq!(settings::init(Settings::default()), Err(Error::Settings));
    assert!(settings::current().canonicalize);
}

#[test]
fn test_exact_zero_imaginary_collapses() {
    install();
    assert_eq!(Complex::rect(5, 0).unwrap(), Value::from(5));
    assert_eq!(
        Complex::rect(5, 0.0).unwrap(),
        Value::from(Complex::new(5, 0.0))
    );
    assert_eq!(
        Complex::polar(3, 0).unwrap(),
        Value::from(Complex::new(3.0, 0.0))
    );
}

#[test]
fn test_arithmetic_collapses() {
    install();
    let z = Complex::rect(1, 2).unwrap();
    let w = Complex::rect(1, -2).unwrap();
    assert_eq!(&z + &w, Value::from(2));
    assert_eq!(&z * &w, Value::from(5));
    let i = Value::from(I);
    assert_eq!(&i * &i, Value::from(-1));
    let one = Scalar::rational(1, 1).unwrap();
    assert_eq!(z.quo(&z).unwrap(), Value::Scalar(one));
}

#[test]
fn test_parse_and_convert_collapse() {
    install();
    assert_eq!(to_c("7").unwrap(), Value::from(7));
    assert_eq!(to_c("xyz").unwrap(), Value::from(0));
    assert_eq!(to_c("junk").unwrap(), Value::from(Complex::new(0, 1)));
    assert_eq!(convert(Operand::Str("3+0i"), None).unwrap(), Value::from(3));
    assert_eq!(
        convert(Operand::Str("3+4i"), None).unwrap(),
        Value::from(Complex::new(3, 4))
    );
}

#[test]
fn test_explicit_settings_override_process() {
    install();
    let off = Settings::default();
    assert_eq!(
        Complex::rect_with(5, 0, &off).unwrap(),
        Value::from(Complex::new(5, 0))
    );
}
