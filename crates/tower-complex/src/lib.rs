//! Complex numbers over the rhizome numeric tower.
//!
//! A [`Complex`] is an immutable pair of [`Scalar`]s. Each component may be an
//! integer, big integer, rational or float, and exactness carries through
//! arithmetic: exact inputs give exact results wherever the operation allows.
//!
//! # Example
//!
//! ```
//! use rhizome_tower_complex::{convert, Complex, Operand, Value};
//!
//! let z = Complex::rect(1, 2).unwrap();
//! let w = convert(Operand::Str("3+4i"), None).unwrap();
//! // (1+2i)(3+4i) = 3 + 4i + 6i + 8i² = -5 + 10i
//! let product = &z * &w;
//! assert_eq!(product.to_string(), "-5+10i");
//!
//! let half = product.quo(&Value::from(10)).unwrap();
//! assert_eq!(half.inspect(), "((-1/2)+(1/1)*i)");
//! ```

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

mod complex;
mod convert;
mod format;
mod funcs;
mod ops;
mod parse;
pub mod settings;


pub use complex::{Complex, I};
pub use convert::{convert, Operand, ToComplex};
pub use funcs::{cos, sin, sqrt};
pub use ops::{apply_binop, apply_unaryop, BinOp, UnaryOp};
pub use parse::{parse, parse_strict, to_c};
pub use rhizome_tower_scalar::Scalar;
pub use settings::Settings;

// ============================================================================
// Values
// ============================================================================

/// Result of construction or arithmetic: a bare real, or a complex.
///
/// With the default [`Settings`] every complex construction stays complex;
/// with `canonicalize` on, an exact-zero imaginary part collapses to the real
/// part.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Scalar(Scalar),
    Complex(Complex),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Complex> {
        match self {
            Value::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Lifts a real to `real+0i`.
    pub fn into_complex(self) -> Complex {
        match self {
            Value::Scalar(s) => Complex::new(s, 0),
            Value::Complex(c) => c,
        }
    }

    /// Only bare reals are real; a complex never is, even with a zero
    /// imaginary part.
    pub fn is_real(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn is_exact(&self) -> bool {
        match self {
            Value::Scalar(s) => s.is_exact(),
            Value::Complex(c) => c.is_exact(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Value::Scalar(s) => s.is_zero(),
            Value::Complex(c) => c.real().is_zero() && c.imag().is_zero(),
        }
    }

    /// Exact zero: `0`, `0/1` or `0+0i`, but never `0.0`.
    pub(crate) fn is_exact_zero(&self) -> bool {
        self.is_exact() && self.is_zero()
    }

    /// Name used in error messages.
    pub(crate) fn type_name(&self) -> String {
        match self {
            Value::Scalar(s) => s.kind().to_string(),
            Value::Complex(_) => "Complex".to_string(),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Value::Complex(c)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(Scalar::from(v))
                }
            }
        )*
    };
}

value_from_scalar!(i32, i64, f64, BigInt, BigRational);

impl PartialEq<Scalar> for Value {
    fn eq(&self, other: &Scalar) -> bool {
        match self {
            Value::Scalar(s) => s == other,
            Value::Complex(c) => c == other,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Complex operation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An argument has the wrong type: a non-real where a real is needed, a
    /// nil operand, or a value that cannot be coerced.
    #[error("{0}")]
    Type(String),
    /// A value with an imaginary part was asked for a real conversion.
    #[error("{0}")]
    Range(String),
    /// A literal could not be parsed, or marshaled data is malformed.
    #[error("{0}")]
    Argument(String),
    /// Division by exact zero, or an argument outside a function's domain.
    #[error("{0}")]
    Domain(String),
    /// [`settings::init`] was called more than once.
    #[error("complex settings are already initialized")]
    Settings,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<rhizome_tower_scalar::Error> for Error {
    fn from(e: rhizome_tower_scalar::Error) -> Self {
        use rhizome_tower_scalar::Error as ScalarError;
        match e {
            ScalarError::Domain(msg) => Error::Domain(msg),
            ScalarError::NotInteger(_) => Error::Type(e.to_string()),
            ScalarError::InvalidLiteral(_) => Error::Argument(e.to_string()),
        }
    }
}

pub(crate) fn not_a_real() -> Error {
    Error::Type("not a real".to_string())
}

// ============================================================================
// Tests
// ============================================================================
