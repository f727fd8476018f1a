//! The complex value, its canonicalizing constructors and accessors.

use crate::settings::{self, Settings};
use crate::{funcs, not_a_real, Error, Operand, Result, Value};
use num_traits::Zero;
use rhizome_tower_scalar::{self as scalar, Scalar};
use std::hash::{Hash, Hasher};

/// An immutable complex number `real + imag·i`.
///
/// Components are real scalars of any kind; they are never themselves
/// complex. Complex numbers are not ordered.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "[Scalar; 2]", try_from = "Vec<Scalar>")
)]
pub struct Complex {
    real: Scalar,
    imag: Scalar,
}

/// The imaginary unit, `0+1i`.
pub const I: Complex = Complex {
    real: Scalar::Int(0),
    imag: Scalar::Int(1),
};

// ============================================================================
// Construction
// ============================================================================

impl Complex {
    /// Builds `real+imag·i` as is, without canonicalization.
    pub fn new(real: impl Into<Scalar>, imag: impl Into<Scalar>) -> Complex {
        Complex {
            real: real.into(),
            imag: imag.into(),
        }
    }

    /// Builds `real+imag·i` from two reals, canonicalizing with the
    /// process-wide settings.
    ///
    /// A complex argument fails with a type error.
    pub fn rect(real: impl Into<Value>, imag: impl Into<Value>) -> Result<Value> {
        Self::rect_with(real, imag, &settings::current())
    }

    pub fn rect_with(
        real: impl Into<Value>,
        imag: impl Into<Value>,
        settings: &Settings,
    ) -> Result<Value> {
        let real = real_check(real.into())?;
        let imag = real_check(imag.into())?;
        Ok(Self::canonicalize_with(real.into(), imag.into(), settings))
    }

    pub fn rectangular(real: impl Into<Value>, imag: impl Into<Value>) -> Result<Value> {
        Self::rect(real, imag)
    }

    /// Builds `abs·cos(arg) + abs·sin(arg)·i` from two reals.
    pub fn polar(abs: impl Into<Value>, arg: impl Into<Value>) -> Result<Value> {
        Self::polar_with(abs, arg, &settings::current())
    }

    pub fn polar_with(
        abs: impl Into<Value>,
        arg: impl Into<Value>,
        settings: &Settings,
    ) -> Result<Value> {
        let abs = real_check(abs.into())?;
        let arg = real_check(arg.into())?;
        Ok(polar_parts(&abs, &arg, settings))
    }

    /// Combines `real + imag·i` where either side may itself be complex, so
    /// that the result never nests.
    pub fn canonicalize(real: Value, imag: Value) -> Value {
        Self::canonicalize_with(real, imag, &settings::current())
    }

    pub fn canonicalize_with(real: Value, imag: Value, settings: &Settings) -> Value {
        if settings.canonicalize && imag.is_exact_zero() {
            return real;
        }
        let complex = match (real, imag) {
            (Value::Scalar(real), Value::Scalar(imag)) => Complex { real, imag },
            (Value::Scalar(real), Value::Complex(imag)) => Complex {
                real: &real - &imag.imag,
                imag: Scalar::zero() + &imag.real,
            },
            (Value::Complex(real), Value::Scalar(imag)) => Complex {
                real: real.real,
                imag: &real.imag + &imag,
            },
            (Value::Complex(real), Value::Complex(imag)) => Complex {
                real: &real.real - &imag.imag,
                imag: &real.imag + &imag.real,
            },
        };
        Value::Complex(complex)
    }
}

fn real_check(value: Value) -> Result<Scalar> {
    match value {
        Value::Scalar(s) => Ok(s),
        Value::Complex(_) => Err(not_a_real()),
    }
}

/// Canonicalizing construction from two reals with the process settings.
pub(crate) fn from_parts(real: Scalar, imag: Scalar) -> Value {
    Complex::canonicalize_with(real.into(), imag.into(), &settings::current())
}

pub(crate) fn polar_parts(abs: &Scalar, arg: &Scalar, settings: &Settings) -> Value {
    let abs = Value::Scalar(abs.clone());
    let arg = Value::Scalar(arg.clone());
    let real = &abs * &funcs::cos(&arg);
    let imag = &abs * &funcs::sin(&arg);
    Complex::canonicalize_with(real, imag, settings)
}

// ============================================================================
// Accessors
// ============================================================================

impl Complex {
    pub fn real(&self) -> &Scalar {
        &self.real
    }

    pub fn imag(&self) -> &Scalar {
        &self.imag
    }

    pub fn imaginary(&self) -> &Scalar {
        &self.imag
    }

    /// `(real, imag)`.
    pub fn to_rect(&self) -> (Scalar, Scalar) {
        (self.real.clone(), self.imag.clone())
    }

    /// `(abs, arg)`.
    pub fn to_polar(&self) -> (Scalar, Scalar) {
        (self.abs(), self.arg())
    }

    pub fn into_parts(self) -> (Scalar, Scalar) {
        (self.real, self.imag)
    }
}

// ============================================================================
// Predicates
// ============================================================================

impl Complex {
    /// Always false: a complex is never real, even with a zero imaginary part.
    pub fn is_real(&self) -> bool {
        false
    }

    pub fn is_complex(&self) -> bool {
        true
    }

    /// Both components are exact.
    pub fn is_exact(&self) -> bool {
        self.real.is_exact() && self.imag.is_exact()
    }

    pub fn is_inexact(&self) -> bool {
        !self.is_exact()
    }

    pub fn is_finite(&self) -> bool {
        self.real.is_finite() && self.imag.is_finite()
    }

    /// `Some(1)` if either component is infinite.
    pub fn infinite(&self) -> Option<i64> {
        if self.real.is_infinite() || self.imag.is_infinite() {
            Some(1)
        } else {
            None
        }
    }
}

// ============================================================================
// Magnitude and angle
// ============================================================================

impl Complex {
    /// Magnitude, always a float.
    pub fn abs(&self) -> Scalar {
        scalar::hypot(&self.real, &self.imag)
    }

    pub fn magnitude(&self) -> Scalar {
        self.abs()
    }

    /// Squared magnitude, exact for exact components.
    pub fn abs2(&self) -> Scalar {
        &(&self.real * &self.real) + &(&self.imag * &self.imag)
    }

    /// Angle in `(-π, π]`.
    pub fn arg(&self) -> Scalar {
        scalar::atan2(&self.imag, &self.real)
    }

    pub fn angle(&self) -> Scalar {
        self.arg()
    }

    pub fn phase(&self) -> Scalar {
        self.arg()
    }

    pub fn conj(&self) -> Value {
        from_parts(self.real.clone(), -&self.imag)
    }

    pub fn conjugate(&self) -> Value {
        self.conj()
    }
}

/// `!z` is the conjugate.
impl std::ops::Not for &Complex {
    type Output = Value;
    fn not(self) -> Value {
        self.conj()
    }
}

// ============================================================================
// Common denominator
// ============================================================================

impl Complex {
    /// Least common multiple of the component denominators.
    pub fn denominator(&self) -> Result<Scalar> {
        Ok(self.real.denominator().lcm(&self.imag.denominator())?)
    }

    /// Numerator over [`denominator`](Self::denominator): both components
    /// scaled to the common denominator.
    pub fn numerator(&self) -> Result<Value> {
        let cd = self.denominator()?;
        let scale = |x: &Scalar| -> Result<Scalar> {
            let factor = cd.int_div(&x.denominator())?;
            Ok(x.numerator() * factor)
        };
        Ok(from_parts(scale(&self.real)?, scale(&self.imag)?))
    }
}

// ============================================================================
// Equality and hashing
// ============================================================================

impl PartialEq for Complex {
    fn eq(&self, other: &Complex) -> bool {
        self.real == other.real && self.imag == other.imag
    }
}

impl PartialEq<Scalar> for Complex {
    /// Equal to a real when the imaginary part is zero.
    fn eq(&self, other: &Scalar) -> bool {
        self.real == *other && self.imag.is_zero()
    }
}

impl Complex {
    /// Equality that also requires matching component kinds, so `1+0i` is not
    /// `eql` to `1.0+0i`.
    pub fn eql(&self, other: &Complex) -> bool {
        self.real.kind() == other.real.kind()
            && self.imag.kind() == other.imag.kind()
            && self == other
    }

    /// Component hashes combined with xor.
    pub fn hash_code(&self) -> u64 {
        self.real.hash_code() ^ self.imag.hash_code()
    }
}

impl Hash for Complex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

// ============================================================================
// Coercion
// ============================================================================

impl Complex {
    /// Pairs `other` with `self` as two complexes, `other` first.
    pub fn coerce(&self, other: &Operand<'_>) -> Result<(Complex, Complex)> {
        match other {
            Operand::Num(Value::Scalar(s)) => Ok((Complex::new(s.clone(), 0), self.clone())),
            Operand::Num(Value::Complex(c)) => Ok((c.clone(), self.clone())),
            other => Err(Error::Type(format!(
                "{} can't be coerced into Complex",
                other.type_name()
            ))),
        }
    }
}

// ============================================================================
// Marshal
// ============================================================================

impl Complex {
    /// `[real, imag]`.
    pub fn marshal_dump(&self) -> Vec<Scalar> {
        vec![self.real.clone(), self.imag.clone()]
    }

    /// Rebuilds a value from [`marshal_dump`](Self::marshal_dump) output.
    pub fn marshal_load(data: &[Scalar]) -> Result<Complex> {
        match data {
            [real, imag] => Ok(Complex::new(real.clone(), imag.clone())),
            _ => Err(Error::Argument(format!(
                "marshaled complex must have an array whose length is 2 but {}",
                data.len()
            ))),
        }
    }
}

impl From<Complex> for [Scalar; 2] {
    fn from(c: Complex) -> Self {
        [c.real, c.imag]
    }
}

impl TryFrom<Vec<Scalar>> for Complex {
    type Error = Error;

    fn try_from(data: Vec<Scalar>) -> Result<Complex> {
        Complex::marshal_load(&data)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    fn ratio(n: i64, d: i64) -> Scalar {
        Scalar::rational(n, d).unwrap()
    }

    fn complex(v: Value) -> Complex {
        match v {
            Value::Complex(c) => c,
            other => panic!("expected complex, got {other:?}"),
        }
    }

    fn assert_close(a: &Scalar, b: f64) {
        let a = a.to_f64();
        assert!((a - b).abs() < EPSILON, "{a} vs {b}");
    }

    const ON: Settings = Settings { canonicalize: true };
    const OFF: Settings = Settings {
        canonicalize: false,
    };

    #[test]
    fn test_rect_keeps_components() {
        let z = complex(Complex::rect_with(3, ratio(1, 2), &OFF).unwrap());
        assert!(matches!(z.real(), Scalar::Int(3)));
        assert!(matches!(z.imag(), Scalar::Rational(_)));
        assert_eq!(z.to_rect(), (Scalar::from(3), ratio(1, 2)));
    }

    #[test]
    fn test_rect_rejects_complex_arguments() {
        let err = Complex::rect_with(Complex::new(1, 1), 0, &OFF).unwrap_err();
        assert_eq!(err, Error::Type("not a real".into()));
        assert!(Complex::polar_with(1, Complex::new(0, 1), &OFF).is_err());
    }

    #[test]
    fn test_canonicalize_flag() {
        assert_eq!(Complex::rect_with(5, 0, &ON).unwrap(), Value::from(5));
        // an inexact zero never collapses
        assert_eq!(
            Complex::rect_with(5, 0.0, &ON).unwrap(),
            Value::from(Complex::new(5, 0.0))
        );
        assert_eq!(
            Complex::rect_with(5, 0, &OFF).unwrap(),
            Value::from(Complex::new(5, 0))
        );
    }

    #[test]
    fn test_canonicalize_nested() {
        // (1+2i) + 3i
        let z = Complex::canonicalize_with(Complex::new(1, 2).into(), Value::from(3), &OFF);
        assert_eq!(z, Value::from(Complex::new(1, 5)));
        // 1 + (2+3i)i = -2 + 2i
        let z = Complex::canonicalize_with(Value::from(1), Complex::new(2, 3).into(), &OFF);
        assert_eq!(z, Value::from(Complex::new(-2, 2)));
        // (1+2i) + (3+4i)i = -3 + 5i
        let (a, b) = (Complex::new(1, 2), Complex::new(3, 4));
        let z = Complex::canonicalize_with(a.into(), b.into(), &OFF);
        assert_eq!(z, Value::from(Complex::new(-3, 5)));
    }

    #[test]
    fn test_canonicalize_returns_nested_real_when_imag_is_exact_zero() {
        let z = Complex::canonicalize_with(Complex::new(1, 2).into(), Value::from(0), &ON);
        assert_eq!(z, Value::from(Complex::new(1, 2)));
    }

    #[test]
    fn test_polar() {
        let z = complex(Complex::polar_with(2, 0, &OFF).unwrap());
        assert_close(z.real(), 2.0);
        assert_close(z.imag(), 0.0);
        let z = complex(Complex::polar_with(1, PI / 2.0, &OFF).unwrap());
        assert_close(z.real(), 0.0);
        assert_close(z.imag(), 1.0);
    }

    #[test]
    fn test_polar_round_trip() {
        for (r, theta) in [(1.0, 0.5), (2.5, -2.0), (0.1, PI), (3.0, -PI / 3.0)] {
            let z = complex(Complex::polar_with(r, theta, &OFF).unwrap());
            let (abs, arg) = z.to_polar();
            assert_close(&abs, r);
            assert_close(&arg, theta);
        }
    }

    #[test]
    fn test_abs_abs2_arg() {
        let z = Complex::new(3, 4);
        assert_eq!(z.abs(), Scalar::from(5.0));
        assert!(!z.abs().is_exact());
        assert_eq!(z.abs2(), Scalar::from(25));
        assert!(z.abs2().is_exact());
        assert_close(&Complex::new(0, 1).arg(), PI / 2.0);
        assert_close(&Complex::new(-1, 0).arg(), PI);
        assert_eq!(z.magnitude(), z.abs());
        assert_eq!(z.angle(), z.phase());
    }

    #[test]
    fn test_conj() {
        assert_eq!(Complex::new(1, 2).conj(), Value::from(Complex::new(1, -2)));
        assert_eq!(
            Complex::new(1, 2).conjugate(),
            Value::from(Complex::new(1, -2))
        );
        assert_eq!(!&Complex::new(1, 2), Value::from(Complex::new(1, -2)));
        assert_eq!(
            Complex::rectangular(1, 2).unwrap(),
            Complex::rect(1, 2).unwrap()
        );
    }

    #[test]
    fn test_numerator_denominator() {
        let z = Complex::new(ratio(1, 2), ratio(2, 3));
        assert_eq!(z.denominator().unwrap(), Scalar::from(6));
        assert_eq!(z.numerator().unwrap(), Value::from(Complex::new(3, 4)));
        let z = Complex::new(0.5, 0.25);
        assert_eq!(z.denominator().unwrap(), Scalar::from(4));
        assert_eq!(z.numerator().unwrap(), Value::from(Complex::new(2, 1)));
    }

    #[test]
    fn test_finite_infinite() {
        assert!(Complex::new(1, ratio(1, 3)).is_finite());
        assert_eq!(Complex::new(1, 2).infinite(), None);
        let z = Complex::new(f64::NEG_INFINITY, 0);
        assert!(!z.is_finite());
        assert_eq!(z.infinite(), Some(1));
        let z = Complex::new(0, f64::NAN);
        assert!(!z.is_finite());
        assert_eq!(z.infinite(), None);
    }

    #[test]
    fn test_predicates() {
        assert!(!I.is_real());
        assert!(I.is_complex());
        assert!(I.is_exact());
        assert!(Complex::new(1, 0.5).is_inexact());
    }

    #[test]
    fn test_equality() {
        assert_eq!(Complex::new(1, 2), Complex::new(1.0, 2.0));
        assert_ne!(Complex::new(1, 2), Complex::new(2, 1));
        assert!(Complex::new(3, 0) == Scalar::from(3));
        assert!(Complex::new(3, 0.0) == Scalar::from(3));
        assert!(Complex::new(3, 1) != Scalar::from(3));
    }

    #[test]
    fn test_eql_requires_matching_kinds() {
        assert!(Complex::new(1, 2).eql(&Complex::new(1, 2)));
        assert!(!Complex::new(1, 2).eql(&Complex::new(1.0, 2)));
        assert!(!Complex::new(1, 2).eql(&Complex::new(1, ratio(2, 1))));
    }

    #[test]
    fn test_hash_follows_equality() {
        let a = Complex::new(1, ratio(4, 2));
        let b = Complex::new(1.0, 2);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
        assert_eq!(
            a.hash_code(),
            Scalar::from(1).hash_code() ^ Scalar::from(2).hash_code()
        );
    }

    #[test]
    fn test_coerce() {
        let z = Complex::new(1, 2);
        let (a, b) = z.coerce(&Operand::Num(Value::from(3))).unwrap();
        assert!(a.eql(&Complex::new(3, 0)));
        assert!(b.eql(&z));
        let (a, _) = z.coerce(&Operand::Num(I.into())).unwrap();
        assert!(a.eql(&I));
        let err = z.coerce(&Operand::Str("1")).unwrap_err();
        assert_eq!(
            err,
            Error::Type("String can't be coerced into Complex".into())
        );
        let err = z.coerce(&Operand::Nil).unwrap_err();
        assert_eq!(err, Error::Type("nil can't be coerced into Complex".into()));
    }

    #[test]
    fn test_marshal() {
        let z = Complex::new(ratio(1, 2), -3.5);
        let dump = z.marshal_dump();
        assert_eq!(dump.len(), 2);
        assert!(Complex::marshal_load(&dump).unwrap().eql(&z));
        assert!(matches!(
            Complex::marshal_load(&dump[..1]),
            Err(Error::Argument(_))
        ));
        assert!(Complex::marshal_load(&[]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_sequence() {
        let z = Complex::new(1, -2.5);
        let json = serde_json::to_string(&z).unwrap();
        assert_eq!(json, r#"[{"Int":1},{"Float":-2.5}]"#);
        let back: Complex = serde_json::from_str(&json).unwrap();
        assert!(back.eql(&z));
        assert!(serde_json::from_str::<Complex>(r#"[{"Int":1}]"#).is_err());
    }
}
