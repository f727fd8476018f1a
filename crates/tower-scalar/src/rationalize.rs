//! Simplest-rational approximation.

use crate::{Error, Result, Scalar};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Float, One, Signed, Zero};

impl Scalar {
    /// Simplest rational close to this value.
    ///
    /// Integers come back as rationals unchanged. With `eps`, the result is
    /// the simplest rational within `|eps|` of the exact value. A float
    /// without `eps` gives the simplest rational that rounds back to it; a
    /// rational without `eps` is returned as is.
    pub fn rationalize(&self, eps: Option<&Scalar>) -> Result<Scalar> {
        match (self, eps) {
            (Scalar::Int(_) | Scalar::Big(_), _) | (Scalar::Rational(_), None) => {
                self.to_rational()
            }
            (Scalar::Float(f), None) => float_rationalize(*f).map(Scalar::Rational),
            (_, Some(eps)) => {
                let x = self
                    .exact_value()
                    .ok_or_else(|| Error::Domain(self.to_string()))?;
                let e = eps
                    .exact_value()
                    .ok_or_else(|| Error::Domain(eps.to_string()))?
                    .abs();
                Ok(Scalar::Rational(rationalize_within(x, e)))
            }
        }
    }
}

fn rationalize_within(x: BigRational, e: BigRational) -> BigRational {
    if e.is_zero() {
        return x;
    }
    let negative = x.is_negative();
    let x = x.abs();
    let r = simplest_between(&x - &e, &x + &e);
    if negative {
        -r
    } else {
        r
    }
}

fn float_rationalize(f: f64) -> Result<BigRational> {
    if !f.is_finite() {
        return Err(Error::Domain(Scalar::Float(f).to_string()));
    }
    let (mut mantissa, mut exponent, sign) = Float::integer_decode(f);
    if mantissa != 0 {
        // subnormals: widen to a full 53-bit mantissa
        while mantissa < 1 << 52 {
            mantissa <<= 1;
            exponent -= 1;
        }
    }
    if mantissa == 0 || exponent >= 0 {
        return BigRational::from_float(f).ok_or_else(|| Error::Domain(f.to_string()));
    }

    // the float's rounding interval: (2m ± 1) / 2^(1-e)
    let twice = BigInt::from(mantissa) * 2;
    let den = BigInt::one() << (1 - i64::from(exponent)) as usize;
    let a = BigRational::new(&twice - 1, den.clone());
    let b = BigRational::new(&twice + 1, den);
    let r = simplest_between(a, b);
    Ok(if sign < 0 { -r } else { r })
}

/// Simplest rational in the interval `[a, b]` by continued fractions.
/// Requires `a < b`.
fn simplest_between(mut a: BigRational, mut b: BigRational) -> BigRational {
    let (mut p0, mut p1) = (BigInt::zero(), BigInt::one());
    let (mut q0, mut q1) = (BigInt::one(), BigInt::zero());
    let c = loop {
        let c = a.ceil();
        if c < b {
            break c.to_integer();
        }
        let k = c.to_integer() - 1;
        let p2 = &k * &p1 + &p0;
        let q2 = &k * &q1 + &q0;
        let k = BigRational::from_integer(k);
        let t = (&b - &k).recip();
        b = (&a - &k).recip();
        a = t;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
    };
    BigRational::new(&c * &p1 + &p0, &c * &q1 + &q0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(n: i64, d: i64) -> Scalar {
        Scalar::rational(n, d).unwrap()
    }

    #[test]
    fn test_integer_becomes_rational() {
        let r = Scalar::from(3).rationalize(None).unwrap();
        assert!(matches!(r, Scalar::Rational(_)));
        assert_eq!(r, Scalar::from(3));
        let r = Scalar::from(3).rationalize(Some(&ratio(1, 2))).unwrap();
        assert!(matches!(r, Scalar::Rational(_)));
    }

    #[test]
    fn test_float_without_eps() {
        assert_eq!(Scalar::from(0.1).rationalize(None).unwrap(), ratio(1, 10));
        assert_eq!(
            Scalar::from(0.333).rationalize(None).unwrap(),
            ratio(333, 1000)
        );
        assert_eq!(Scalar::from(1.5).rationalize(None).unwrap(), ratio(3, 2));
        assert_eq!(Scalar::from(-0.25).rationalize(None).unwrap(), ratio(-1, 4));
        assert_eq!(
            Scalar::from(8.0).rationalize(None).unwrap(),
            Scalar::from(8)
        );
        assert_eq!(
            Scalar::from(0.0).rationalize(None).unwrap(),
            Scalar::from(0)
        );
        assert!(Scalar::from(f64::NAN).rationalize(None).is_err());
    }

    #[test]
    fn test_with_eps() {
        let eps = ratio(1, 100);
        assert_eq!(
            Scalar::from(0.333).rationalize(Some(&eps)).unwrap(),
            ratio(1, 3)
        );
        assert_eq!(
            Scalar::from(-0.333).rationalize(Some(&eps)).unwrap(),
            ratio(-1, 3)
        );
        assert_eq!(
            Scalar::from(3.14159).rationalize(Some(&eps)).unwrap(),
            ratio(22, 7)
        );
        assert_eq!(
            ratio(333, 1000).rationalize(Some(&Scalar::from(-0.01))).unwrap(),
            ratio(1, 3)
        );
        assert_eq!(
            ratio(3, 10).rationalize(Some(&Scalar::from(1))).unwrap(),
            Scalar::from(0)
        );
    }

    #[test]
    fn test_rational_without_eps_is_unchanged() {
        assert_eq!(
            ratio(333, 1000).rationalize(None).unwrap(),
            ratio(333, 1000)
        );
        assert_eq!(
            ratio(1, 3).rationalize(Some(&Scalar::from(0))).unwrap(),
            ratio(1, 3)
        );
    }
}
