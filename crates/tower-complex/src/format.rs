//! Textual forms and conversions to reals.

use crate::{Complex, Error, Result, Value};
use rhizome_tower_scalar::Scalar;
use std::fmt;

/// `real±|imag|i`, with a `*` before the `i` unless the magnitude ends in a
/// digit.
fn render(real: String, imag: &Scalar, magnitude: String) -> String {
    let sign = if imag.signbit() { '-' } else { '+' };
    let mut out = format!("{real}{sign}{magnitude}");
    if !out.ends_with(|c: char| c.is_ascii_digit()) {
        out.push('*');
    }
    out.push('i');
    out
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.imag().abs().to_string();
        f.write_str(&render(self.real().to_string(), self.imag(), abs))
    }
}

impl Complex {
    /// Debugging form, e.g. `((1/2)+3.0i)`.
    pub fn inspect(&self) -> String {
        let abs = self.imag().abs().inspect();
        let body = render(self.real().inspect(), self.imag(), abs);
        format!("({body})")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => fmt::Display::fmt(s, f),
            Value::Complex(z) => fmt::Display::fmt(z, f),
        }
    }
}

impl Value {
    pub fn inspect(&self) -> String {
        match self {
            Value::Scalar(s) => s.inspect(),
            Value::Complex(z) => z.inspect(),
        }
    }
}

// ============================================================================
// Real conversions
// ============================================================================

impl Complex {
    /// The real part, provided the imaginary part is an exact zero.
    fn real_only(&self, target: &str) -> Result<&Scalar> {
        let imag = self.imag();
        if imag.is_exact() && num_traits::Zero::is_zero(imag) {
            Ok(self.real())
        } else {
            Err(Error::Range(format!("can't convert {self} into {target}")))
        }
    }

    /// Integer value, truncated toward zero.
    pub fn to_i(&self) -> Result<Scalar> {
        Ok(self.real_only("Integer")?.to_integer()?)
    }

    pub fn to_f(&self) -> Result<Scalar> {
        Ok(self.real_only("Float")?.to_float())
    }

    pub fn to_r(&self) -> Result<Scalar> {
        Ok(self.real_only("Rational")?.to_rational()?)
    }

    /// Simplest rational near the real part; see [`Scalar::rationalize`].
    pub fn rationalize(&self, eps: Option<&Scalar>) -> Result<Scalar> {
        Ok(self.real_only("Rational")?.rationalize(eps)?)
    }

    pub fn to_c(&self) -> Complex {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ratio(n: i64, d: i64) -> Scalar {
        Scalar::rational(n, d).unwrap()
    }

    #[test]
    fn test_to_s() {
        assert_eq!(Complex::new(0, 1).to_string(), "0+1i");
        assert_eq!(Complex::new(1, -2).to_string(), "1-2i");
        assert_eq!(Complex::new(1, 0.5).to_string(), "1+0.5i");
        assert_eq!(Complex::new(1.5, -0.0).to_string(), "1.5-0.0i");
        let z = Complex::new(ratio(1, 2), ratio(-3, 4));
        assert_eq!(z.to_string(), "1/2-3/4i");
    }

    #[test]
    fn test_to_s_star_before_i() {
        assert_eq!(Complex::new(1, f64::INFINITY).to_string(), "1+Infinity*i");
        assert_eq!(Complex::new(1, f64::NAN).to_string(), "1+NaN*i");
        assert_eq!(Complex::new(0, 1e20).to_string(), "0+1.0e+20i");
    }

    #[test]
    fn test_inspect() {
        assert_eq!(Complex::new(1, 2).inspect(), "(1+2i)");
        assert_eq!(
            Complex::new(ratio(1, 2), ratio(-3, 4)).inspect(),
            "((1/2)-(3/4)*i)"
        );
        let z = Complex::new(1.0, f64::NEG_INFINITY);
        assert_eq!(z.inspect(), "(1.0-Infinity*i)");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from(ratio(1, 2)).to_string(), "1/2");
        assert_eq!(Value::from(ratio(1, 2)).inspect(), "(1/2)");
        assert_eq!(Value::from(Complex::new(3, 4)).to_string(), "3+4i");
    }

    #[test]
    fn test_real_conversions() {
        assert_eq!(Complex::new(1, 0).to_i().unwrap(), Scalar::from(1));
        assert_eq!(Complex::new(2.7, 0).to_i().unwrap(), Scalar::from(2));
        assert_eq!(
            Complex::new(ratio(1, 2), 0).to_f().unwrap(),
            Scalar::from(0.5)
        );
        assert_eq!(Complex::new(0.25, 0).to_r().unwrap(), ratio(1, 4));
        assert_eq!(
            Complex::new(0.333, 0)
                .rationalize(Some(&ratio(1, 100)))
                .unwrap(),
            ratio(1, 3)
        );
    }

    #[test]
    fn test_real_conversions_need_exact_zero_imag() {
        let err = Complex::new(1, 1).to_i().unwrap_err();
        assert_eq!(err, Error::Range("can't convert 1+1i into Integer".into()));
        let err = Complex::new(1, 0.0).to_f().unwrap_err();
        assert_eq!(err, Error::Range("can't convert 1+0.0i into Float".into()));
        assert!(matches!(Complex::new(1, 2).to_r(), Err(Error::Range(_))));
        assert!(matches!(
            Complex::new(1, 2).rationalize(None),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_to_c_is_identity() {
        let z = Complex::new(1, ratio(2, 3));
        assert!(z.to_c().eql(&z));
    }
}
