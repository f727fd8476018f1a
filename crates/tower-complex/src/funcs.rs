//! Trigonometric functions and square root lifted to complex arguments.

use crate::complex::from_parts;
use crate::{Result, Value};
use rhizome_tower_scalar::{self as scalar, Scalar};

// ============================================================================
// Cosine
// ============================================================================

/// cos(a + bi) = cos(a)·cosh(b) − sin(a)·sinh(b)·i
pub fn cos(x: &Value) -> Value {
    match x {
        Value::Scalar(s) => Value::Scalar(scalar::cos(s)),
        Value::Complex(z) => {
            let (a, b) = (z.real(), z.imag());
            from_parts(
                scalar::cos(a) * scalar::cosh(b),
                -scalar::sin(a) * scalar::sinh(b),
            )
        }
    }
}

// ============================================================================
// Sine
// ============================================================================

/// sin(a + bi) = sin(a)·cosh(b) + cos(a)·sinh(b)·i
pub fn sin(x: &Value) -> Value {
    match x {
        Value::Scalar(s) => Value::Scalar(scalar::sin(s)),
        Value::Complex(z) => {
            let (a, b) = (z.real(), z.imag());
            from_parts(
                scalar::sin(a) * scalar::cosh(b),
                scalar::cos(a) * scalar::sinh(b),
            )
        }
    }
}

// ============================================================================
// Square root
// ============================================================================

/// Principal square root. A negative real gives a pure imaginary.
pub fn sqrt(x: &Value) -> Result<Value> {
    match x {
        Value::Scalar(s) if !s.is_negative() => Ok(Value::Scalar(scalar::sqrt(s)?)),
        Value::Scalar(s) => Ok(from_parts(Scalar::from(0), scalar::sqrt(&-s)?)),
        Value::Complex(z) if z.imag().is_negative() => match sqrt(&z.conj())? {
            Value::Complex(root) => Ok(root.conj()),
            real => Ok(real),
        },
        Value::Complex(z) => {
            let m = z.abs();
            let two = Scalar::from(2);
            let re = (&m + z.real()).quo(&two)?;
            let im = (&m - z.real()).quo(&two)?;
            Ok(from_parts(scalar::sqrt(&re)?, scalar::sqrt(&im)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Complex;

    const EPSILON: f64 = 1e-12;

    fn assert_close(v: &Value, re: f64, im: f64) {
        let (a, b) = match v {
            Value::Complex(z) => z.to_rect(),
            other => panic!("expected complex, got {other:?}"),
        };
        assert!(
            (a.to_f64() - re).abs() < EPSILON && (b.to_f64() - im).abs() < EPSILON,
            "{v} vs {re}+{im}i"
        );
    }

    #[test]
    fn test_real_arguments_stay_real() {
        assert_eq!(cos(&Value::from(0)), Value::from(1.0));
        assert_eq!(sin(&Value::from(0)), Value::from(0.0));
        assert_eq!(sqrt(&Value::from(9)).unwrap(), Value::from(3.0));
    }

    #[test]
    fn test_cos_sin_complex() {
        let z = Value::from(Complex::new(1, 1));
        let (c1, s1) = (1f64.cos(), 1f64.sin());
        let (ch1, sh1) = (1f64.cosh(), 1f64.sinh());
        assert_close(&cos(&z), c1 * ch1, -s1 * sh1);
        assert_close(&sin(&z), s1 * ch1, c1 * sh1);
    }

    #[test]
    fn test_sqrt_negative_real() {
        assert_close(&sqrt(&Value::from(-4)).unwrap(), 0.0, 2.0);
    }

    #[test]
    fn test_sqrt_complex() {
        // sqrt(3+4i) = 2+i
        assert_close(&sqrt(&Value::from(Complex::new(3, 4))).unwrap(), 2.0, 1.0);
        // lower half-plane mirrors the upper
        assert_close(&sqrt(&Value::from(Complex::new(3, -4))).unwrap(), 2.0, -1.0);
        assert_close(&sqrt(&Value::from(Complex::new(0, 2))).unwrap(), 1.0, 1.0);
    }
}
