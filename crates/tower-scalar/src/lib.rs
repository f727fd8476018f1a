//! Numeric tower for rhizome complex arithmetic.
//!
//! [`Scalar`] is a real number of one of four kinds: machine integer, big
//! integer, rational, or binary float. Mixed-kind operations promote along the
//! tower `Integer ⊂ Rational ⊂ Float`; integer results that fit in an `i64`
//! are kept as machine integers and overflow into big integers.
//!
//! # Example
//!
//! ```
//! use rhizome_tower_scalar::Scalar;
//!
//! let half = Scalar::from(1).quo(&Scalar::from(2)).unwrap();
//! assert_eq!(half.to_string(), "1/2");
//!
//! // Any float operand makes the result inexact.
//! let sum = &half + &Scalar::from(0.5);
//! assert_eq!(sum.to_string(), "1.0");
//! assert!(!sum.is_exact());
//! ```

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

mod format;
mod funcs;
mod ops;
mod parse;
mod rationalize;

pub use format::format_float;
pub use funcs::{atan2, cos, cosh, exp, hypot, log, sin, sinh, sqrt};
pub use parse::{parse_float, parse_integer, parse_rational};

// ============================================================================
// Types
// ============================================================================

/// Class of a scalar, as seen by callers.
///
/// Machine and big integers share the `Integer` kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Integer,
    Rational,
    Float,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Integer => write!(f, "Integer"),
            Kind::Rational => write!(f, "Rational"),
            Kind::Float => write!(f, "Float"),
        }
    }
}

/// A real number from the numeric tower.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    /// Machine integer.
    Int(i64),
    /// Arbitrary-precision integer outside the `i64` range.
    Big(BigInt),
    /// Exact rational. Never demoted to an integer, even with denominator 1.
    Rational(BigRational),
    /// Binary floating point.
    Float(f64),
}

// ============================================================================
// Errors
// ============================================================================

/// Scalar operation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Division by exact zero, or a real function outside its domain.
    #[error("{0}")]
    Domain(String),
    /// An integer-only operation received a non-integer.
    #[error("{0} is not an integer")]
    NotInteger(String),
    /// A numeric literal could not be read.
    #[error("invalid numeric literal: {0:?}")]
    InvalidLiteral(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn divided_by_zero() -> Error {
    Error::Domain("divided by 0".to_string())
}

// ============================================================================
// Construction
// ============================================================================

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<BigInt> for Scalar {
    fn from(n: BigInt) -> Self {
        match n.to_i64() {
            Some(small) => Scalar::Int(small),
            None => Scalar::Big(n),
        }
    }
}

impl From<BigRational> for Scalar {
    fn from(r: BigRational) -> Self {
        Scalar::Rational(r)
    }
}

impl Scalar {
    /// Builds the reduced rational `numer/denom`.
    pub fn rational(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Scalar> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(divided_by_zero());
        }
        Ok(Scalar::Rational(BigRational::new(numer.into(), denom)))
    }
}

// ============================================================================
// Predicates
// ============================================================================

impl Scalar {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Int(_) | Scalar::Big(_) => Kind::Integer,
            Scalar::Rational(_) => Kind::Rational,
            Scalar::Float(_) => Kind::Float,
        }
    }

    /// Integers and rationals are exact; floats are not.
    pub fn is_exact(&self) -> bool {
        !matches!(self, Scalar::Float(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Scalar::Int(_) | Scalar::Big(_))
    }

    /// Every scalar is real.
    pub fn is_real(&self) -> bool {
        true
    }

    /// Strictly below zero. `-0.0` and NaN are not negative.
    pub fn is_negative(&self) -> bool {
        match self {
            Scalar::Int(n) => *n < 0,
            Scalar::Big(n) => n.is_negative(),
            Scalar::Rational(r) => r.is_negative(),
            Scalar::Float(f) => *f < 0.0,
        }
    }

    /// Sign bit: like [`is_negative`](Self::is_negative) but `-0.0` counts as
    /// negative. NaN never does.
    pub fn signbit(&self) -> bool {
        match self {
            Scalar::Float(f) => !f.is_nan() && f.is_sign_negative(),
            other => other.is_negative(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Scalar::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Scalar::Float(f) if f.is_infinite())
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Scalar::Float(f) if f.is_nan())
    }
}

// ============================================================================
// Conversion
// ============================================================================

impl Scalar {
    pub fn to_f64(&self) -> f64 {
        match self {
            Scalar::Int(n) => *n as f64,
            Scalar::Big(n) => n.to_f64().unwrap_or(if n.is_negative() {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }),
            Scalar::Rational(r) => r.to_f64().unwrap_or_else(|| {
                let numer = r.numer().to_f64().unwrap_or(f64::NAN);
                let denom = r.denom().to_f64().unwrap_or(f64::NAN);
                numer / denom
            }),
            Scalar::Float(f) => *f,
        }
    }

    /// Converts to a float scalar.
    pub fn to_float(&self) -> Scalar {
        Scalar::Float(self.to_f64())
    }

    /// Truncates toward zero. Non-finite floats have no integer value.
    pub fn to_integer(&self) -> Result<Scalar> {
        match self {
            Scalar::Int(_) | Scalar::Big(_) => Ok(self.clone()),
            Scalar::Rational(r) => Ok(Scalar::from(r.to_integer())),
            Scalar::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::Domain(self.to_string()));
                }
                BigInt::from_f64(f.trunc())
                    .map(Scalar::from)
                    .ok_or_else(|| Error::Domain(self.to_string()))
            }
        }
    }

    /// Exact rational value. Floats convert through their binary value.
    pub fn to_rational(&self) -> Result<Scalar> {
        self.exact_value()
            .map(Scalar::Rational)
            .ok_or_else(|| Error::Domain(self.to_string()))
    }

    /// Integer value, if this is an integer.
    pub fn as_bigint(&self) -> Option<BigInt> {
        match self {
            Scalar::Int(n) => Some(BigInt::from(*n)),
            Scalar::Big(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// Exact value as a rational. `None` for NaN and infinities.
    pub(crate) fn exact_value(&self) -> Option<BigRational> {
        match self {
            Scalar::Int(n) => Some(BigRational::from_integer(BigInt::from(*n))),
            Scalar::Big(n) => Some(BigRational::from_integer(n.clone())),
            Scalar::Rational(r) => Some(r.clone()),
            Scalar::Float(f) => BigRational::from_float(*f),
        }
    }
}

// ============================================================================
// Integer structure
// ============================================================================

impl Scalar {
    pub fn numerator(&self) -> Scalar {
        match self {
            Scalar::Int(_) | Scalar::Big(_) => self.clone(),
            Scalar::Rational(r) => Scalar::from(r.numer().clone()),
            Scalar::Float(f) => match BigRational::from_float(*f) {
                Some(r) => Scalar::from(r.numer().clone()),
                None => self.clone(),
            },
        }
    }

    /// Always positive.
    pub fn denominator(&self) -> Scalar {
        match self {
            Scalar::Int(_) | Scalar::Big(_) => Scalar::Int(1),
            Scalar::Rational(r) => Scalar::from(r.denom().clone()),
            Scalar::Float(f) => match BigRational::from_float(*f) {
                Some(r) => Scalar::from(r.denom().clone()),
                None => Scalar::Int(1),
            },
        }
    }

    pub fn lcm(&self, other: &Scalar) -> Result<Scalar> {
        let (a, b) = self.integer_pair(other)?;
        Ok(Scalar::from(a.lcm(&b)))
    }

    pub fn gcd(&self, other: &Scalar) -> Result<Scalar> {
        let (a, b) = self.integer_pair(other)?;
        Ok(Scalar::from(a.gcd(&b)))
    }

    fn integer_pair(&self, other: &Scalar) -> Result<(BigInt, BigInt)> {
        let a = self
            .as_bigint()
            .ok_or_else(|| Error::NotInteger(self.inspect()))?;
        let b = other
            .as_bigint()
            .ok_or_else(|| Error::NotInteger(other.inspect()))?;
        Ok((a, b))
    }

    pub fn abs(&self) -> Scalar {
        match self {
            Scalar::Int(n) => match n.checked_abs() {
                Some(a) => Scalar::Int(a),
                None => Scalar::from(BigInt::from(*n).abs()),
            },
            Scalar::Big(n) => Scalar::from(n.abs()),
            Scalar::Rational(r) => Scalar::Rational(r.abs()),
            Scalar::Float(f) => Scalar::Float(f.abs()),
        }
    }
}

// ============================================================================
// Identity
// ============================================================================

impl Zero for Scalar {
    fn zero() -> Self {
        Scalar::Int(0)
    }

    fn is_zero(&self) -> bool {
        match self {
            Scalar::Int(n) => *n == 0,
            Scalar::Big(n) => n.is_zero(),
            Scalar::Rational(r) => r.is_zero(),
            Scalar::Float(f) => *f == 0.0,
        }
    }
}

impl One for Scalar {
    fn one() -> Self {
        Scalar::Int(1)
    }

    fn is_one(&self) -> bool {
        match self {
            Scalar::Int(n) => *n == 1,
            Scalar::Big(_) => false,
            Scalar::Rational(r) => r.is_one(),
            Scalar::Float(f) => *f == 1.0,
        }
    }
}

// ============================================================================
// Comparison and hashing
// ============================================================================

impl PartialOrd for Scalar {
    /// Floats compare against exact values through their exact binary value.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => Some(a.cmp(b)),
            (Scalar::Float(a), Scalar::Float(b)) => a.partial_cmp(b),
            (Scalar::Float(f), exact) => cmp_float_exact(*f, exact),
            (exact, Scalar::Float(f)) => cmp_float_exact(*f, exact).map(Ordering::reverse),
            _ => Some(self.exact_value()?.cmp(&other.exact_value()?)),
        }
    }
}

fn cmp_float_exact(f: f64, exact: &Scalar) -> Option<Ordering> {
    if f.is_nan() {
        return None;
    }
    if f.is_infinite() {
        return Some(if f > 0.0 {
            Ordering::Greater
        } else {
            Ordering::Less
        });
    }
    Some(BigRational::from_float(f)?.cmp(&exact.exact_value()?))
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl Hash for Scalar {
    /// Hashes the exact numeric value, so equal scalars of different kinds
    /// hash alike.
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Scalar::Int(n) => hash_int(*n, state),
            Scalar::Big(n) => hash_big(n, state),
            Scalar::Rational(r) => hash_ratio(r, state),
            Scalar::Float(f) => match BigRational::from_float(*f) {
                Some(r) => hash_ratio(&r, state),
                None if f.is_nan() => {
                    3u8.hash(state);
                    f64::NAN.to_bits().hash(state);
                }
                None => {
                    3u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
        }
    }
}

fn hash_int<H: Hasher>(n: i64, state: &mut H) {
    0u8.hash(state);
    n.hash(state);
}

fn hash_big<H: Hasher>(n: &BigInt, state: &mut H) {
    match n.to_i64() {
        Some(small) => hash_int(small, state),
        None => {
            1u8.hash(state);
            n.hash(state);
        }
    }
}

fn hash_ratio<H: Hasher>(r: &BigRational, state: &mut H) {
    if r.is_integer() {
        hash_big(r.numer(), state);
    } else {
        2u8.hash(state);
        r.numer().hash(state);
        r.denom().hash(state);
    }
}

impl Scalar {
    /// Deterministic 64-bit hash of the numeric value.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
