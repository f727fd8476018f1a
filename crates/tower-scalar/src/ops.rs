//! Arithmetic on scalars with promotion along the tower.

use crate::{divided_by_zero, Error, Result, Scalar};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

/// Exact powers whose result would exceed this many bits fall back to floats.
const EXACT_POW_BIT_LIMIT: u64 = 32 * 1024 * 1024;

// ============================================================================
// Promotion
// ============================================================================

/// Both operands lifted to the least kind that holds them.
enum Promoted {
    Int(i64, i64),
    Big(BigInt, BigInt),
    Rational(BigRational, BigRational),
    Float(f64, f64),
}

fn rank(s: &Scalar) -> u8 {
    match s {
        Scalar::Int(_) => 0,
        Scalar::Big(_) => 1,
        Scalar::Rational(_) => 2,
        Scalar::Float(_) => 3,
    }
}

fn to_ratio(s: &Scalar) -> BigRational {
    match s {
        Scalar::Int(n) => BigRational::from_integer(BigInt::from(*n)),
        Scalar::Big(n) => BigRational::from_integer(n.clone()),
        Scalar::Rational(r) => r.clone(),
        Scalar::Float(_) => unreachable!("floats promote to Float"),
    }
}

fn to_big(s: &Scalar) -> BigInt {
    match s {
        Scalar::Int(n) => BigInt::from(*n),
        Scalar::Big(n) => n.clone(),
        _ => unreachable!("only integers promote to Big"),
    }
}

fn promote(a: &Scalar, b: &Scalar) -> Promoted {
    match rank(a).max(rank(b)) {
        0 => match (a, b) {
            (Scalar::Int(x), Scalar::Int(y)) => Promoted::Int(*x, *y),
            _ => unreachable!(),
        },
        1 => Promoted::Big(to_big(a), to_big(b)),
        2 => Promoted::Rational(to_ratio(a), to_ratio(b)),
        _ => Promoted::Float(a.to_f64(), b.to_f64()),
    }
}

// ============================================================================
// Ring operations
// ============================================================================

fn add(a: &Scalar, b: &Scalar) -> Scalar {
    match promote(a, b) {
        Promoted::Int(x, y) => match x.checked_add(y) {
            Some(n) => Scalar::Int(n),
            None => Scalar::from(BigInt::from(x) + y),
        },
        Promoted::Big(x, y) => Scalar::from(x + y),
        Promoted::Rational(x, y) => Scalar::Rational(x + y),
        Promoted::Float(x, y) => Scalar::Float(x + y),
    }
}

fn sub(a: &Scalar, b: &Scalar) -> Scalar {
    match promote(a, b) {
        Promoted::Int(x, y) => match x.checked_sub(y) {
            Some(n) => Scalar::Int(n),
            None => Scalar::from(BigInt::from(x) - y),
        },
        Promoted::Big(x, y) => Scalar::from(x - y),
        Promoted::Rational(x, y) => Scalar::Rational(x - y),
        Promoted::Float(x, y) => Scalar::Float(x - y),
    }
}

fn mul(a: &Scalar, b: &Scalar) -> Scalar {
    match promote(a, b) {
        Promoted::Int(x, y) => match x.checked_mul(y) {
            Some(n) => Scalar::Int(n),
            None => Scalar::from(BigInt::from(x) * y),
        },
        Promoted::Big(x, y) => Scalar::from(x * y),
        Promoted::Rational(x, y) => Scalar::Rational(x * y),
        Promoted::Float(x, y) => Scalar::Float(x * y),
    }
}

fn neg(a: &Scalar) -> Scalar {
    match a {
        Scalar::Int(n) => match n.checked_neg() {
            Some(m) => Scalar::Int(m),
            None => Scalar::from(-BigInt::from(*n)),
        },
        Scalar::Big(n) => Scalar::from(-n),
        Scalar::Rational(r) => Scalar::Rational(-r),
        Scalar::Float(f) => Scalar::Float(-f),
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $func:ident) => {
        impl std::ops::$trait<&Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                $func(self, rhs)
            }
        }

        impl std::ops::$trait<Scalar> for &Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                $func(self, &rhs)
            }
        }

        impl std::ops::$trait<&Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: &Scalar) -> Scalar {
                $func(&self, rhs)
            }
        }

        impl std::ops::$trait<Scalar> for Scalar {
            type Output = Scalar;
            fn $method(self, rhs: Scalar) -> Scalar {
                $func(&self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, add);
forward_binop!(Sub, sub, sub);
forward_binop!(Mul, mul, mul);

impl std::ops::Neg for &Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        neg(self)
    }
}

impl std::ops::Neg for Scalar {
    type Output = Scalar;
    fn neg(self) -> Scalar {
        neg(&self)
    }
}

// ============================================================================
// Division
// ============================================================================

impl Scalar {
    /// Division that never truncates: exact operands give a rational, a float
    /// operand gives a float. Exact division by exact zero fails.
    pub fn quo(&self, other: &Scalar) -> Result<Scalar> {
        match promote(self, other) {
            Promoted::Int(x, y) => exact_quo(BigInt::from(x), BigInt::from(y)),
            Promoted::Big(x, y) => exact_quo(x, y),
            Promoted::Rational(x, y) => {
                if y.is_zero() {
                    return Err(divided_by_zero());
                }
                Ok(Scalar::Rational(x / y))
            }
            Promoted::Float(x, y) => Ok(Scalar::Float(x / y)),
        }
    }

    /// Floor division between integers.
    pub fn int_div(&self, other: &Scalar) -> Result<Scalar> {
        let (Some(x), Some(y)) = (self.as_bigint(), other.as_bigint()) else {
            let culprit = if self.is_integer() { other } else { self };
            return Err(Error::NotInteger(culprit.inspect()));
        };
        if y.is_zero() {
            return Err(divided_by_zero());
        }
        Ok(Scalar::from(x.div_floor(&y)))
    }
}

fn exact_quo(x: BigInt, y: BigInt) -> Result<Scalar> {
    if y.is_zero() {
        return Err(divided_by_zero());
    }
    Ok(Scalar::Rational(BigRational::new(x, y)))
}

// ============================================================================
// Power
// ============================================================================

impl Scalar {
    /// Raises to a real power.
    ///
    /// An exact base with an integer exponent stays exact; a negative exponent
    /// gives a rational. Everything else is computed in floating point, so a
    /// negative base with a fractional exponent yields NaN here.
    pub fn pow(&self, exp: &Scalar) -> Result<Scalar> {
        let integral = match exp {
            Scalar::Rational(r) if r.is_integer() => Some(r.numer().clone()),
            other => other.as_bigint(),
        };
        match integral {
            Some(e) if self.is_exact() => exact_pow(self, &e),
            _ => Ok(Scalar::Float(self.to_f64().powf(exp.to_f64()))),
        }
    }
}

fn exact_pow(base: &Scalar, e: &BigInt) -> Result<Scalar> {
    if e.is_zero() {
        return Ok(match base {
            Scalar::Rational(_) => Scalar::Rational(BigRational::from_integer(1.into())),
            _ => Scalar::Int(1),
        });
    }
    if e.is_negative() {
        if base.is_zero() {
            return Err(divided_by_zero());
        }
        let positive = exact_pow(base, &-e)?;
        return match positive {
            Scalar::Float(f) => Ok(Scalar::Float(1.0 / f)),
            other => Ok(Scalar::Rational(to_ratio(&other).recip())),
        };
    }

    let bits = match base {
        Scalar::Rational(r) => r.numer().bits().max(r.denom().bits()),
        other => other.as_bigint().map(|n| n.bits()).unwrap_or(0),
    };
    // bits <= 1 means the base is 0 or ±1, where only the parity matters
    let exponent = if bits <= 1 {
        if e.is_odd() {
            1
        } else {
            2
        }
    } else {
        match e.to_u32() {
            Some(n) if bits.saturating_mul(u64::from(n)) <= EXACT_POW_BIT_LIMIT => n as usize,
            _ => {
                let e = e.to_f64().unwrap_or(f64::INFINITY);
                return Ok(Scalar::Float(base.to_f64().powf(e)));
            }
        }
    };

    Ok(match base {
        Scalar::Rational(r) => Scalar::Rational(num_traits::pow(r.clone(), exponent)),
        other => Scalar::from(num_traits::pow(to_big(other), exponent)),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> Scalar {
        Scalar::rational(n, d).unwrap()
    }

    #[test]
    fn test_int_add_overflows_into_big() {
        let sum = Scalar::from(i64::MAX) + Scalar::from(1);
        assert!(matches!(sum, Scalar::Big(_)));
        let back = sum - Scalar::from(1);
        assert!(matches!(back, Scalar::Int(i64::MAX)));
    }

    #[test]
    fn test_promotion() {
        assert!(matches!(Scalar::from(1) + ratio(1, 2), Scalar::Rational(_)));
        assert!(matches!(ratio(1, 2) * Scalar::from(2.0), Scalar::Float(_)));
        assert_eq!(ratio(1, 2) + ratio(1, 2), Scalar::from(1));
        // rationals stay rational
        assert!(matches!(ratio(1, 2) + ratio(1, 2), Scalar::Rational(_)));
    }

    #[test]
    fn test_neg() {
        assert_eq!(-Scalar::from(3), Scalar::from(-3));
        assert!(matches!(-Scalar::Int(i64::MIN), Scalar::Big(_)));
        assert_eq!(-ratio(1, 2), ratio(-1, 2));
    }

    #[test]
    fn test_quo() {
        assert_eq!(Scalar::from(1).quo(&Scalar::from(2)).unwrap(), ratio(1, 2));
        assert!(matches!(
            Scalar::from(4).quo(&Scalar::from(2)).unwrap(),
            Scalar::Rational(_)
        ));
        assert_eq!(
            Scalar::from(1).quo(&Scalar::from(4.0)).unwrap(),
            Scalar::from(0.25)
        );
        assert!(matches!(
            Scalar::from(1).quo(&Scalar::from(0)),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            ratio(1, 2).quo(&Scalar::from(0)),
            Err(Error::Domain(_))
        ));
        let inf = Scalar::from(1).quo(&Scalar::from(0.0)).unwrap();
        assert!(inf.is_infinite());
    }

    #[test]
    fn test_int_div_floors() {
        assert_eq!(
            Scalar::from(7).int_div(&Scalar::from(2)).unwrap(),
            Scalar::from(3)
        );
        assert_eq!(
            Scalar::from(-7).int_div(&Scalar::from(2)).unwrap(),
            Scalar::from(-4)
        );
        assert!(Scalar::from(1).int_div(&Scalar::from(0)).is_err());
        assert!(matches!(
            Scalar::from(1).int_div(&ratio(1, 2)),
            Err(Error::NotInteger(_))
        ));
    }

    #[test]
    fn test_exact_pow() {
        assert_eq!(
            Scalar::from(2).pow(&Scalar::from(10)).unwrap(),
            Scalar::from(1024)
        );
        assert_eq!(Scalar::from(2).pow(&Scalar::from(-2)).unwrap(), ratio(1, 4));
        assert_eq!(ratio(2, 3).pow(&Scalar::from(2)).unwrap(), ratio(4, 9));
        assert_eq!(ratio(2, 3).pow(&Scalar::from(-1)).unwrap(), ratio(3, 2));
        assert_eq!(
            Scalar::from(5).pow(&Scalar::from(0)).unwrap(),
            Scalar::from(1)
        );
        assert!(matches!(
            Scalar::from(2).pow(&Scalar::from(100)).unwrap(),
            Scalar::Big(_)
        ));
        assert!(Scalar::from(0).pow(&Scalar::from(-1)).is_err());
    }

    #[test]
    fn test_unit_base_with_huge_exponent() {
        let huge = Scalar::from(BigInt::from(10).pow(30));
        assert_eq!(Scalar::from(1).pow(&huge).unwrap(), Scalar::from(1));
        assert_eq!(Scalar::from(-1).pow(&huge).unwrap(), Scalar::from(1));
        assert_eq!(
            Scalar::from(-1).pow(&(&huge + Scalar::from(1))).unwrap(),
            Scalar::from(-1)
        );
    }

    #[test]
    fn test_float_pow() {
        let root = Scalar::from(4).pow(&Scalar::from(0.5)).unwrap();
        assert_eq!(root, Scalar::from(2.0));
        let root = Scalar::from(4).pow(&ratio(1, 2)).unwrap();
        assert!(matches!(root, Scalar::Float(_)));
        assert!(Scalar::from(-8).pow(&ratio(1, 3)).unwrap().is_nan());
    }
}
