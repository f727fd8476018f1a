//! Binary and unary operations on values.
//!
//! A real operand meeting a complex one is lifted to `real+0i` first, so
//! `2 * z` and `z * 2` may differ in the kinds of their zero components.

use crate::complex::{from_parts, polar_parts};
use crate::settings;
use crate::{Complex, Result, Value};
use num_rational::BigRational;
use num_traits::{One, ToPrimitive, Zero};
use rhizome_tower_scalar::{self as scalar, Scalar};
use std::borrow::Cow;

/// Exact integer powers whose estimated size exceeds this many bits are
/// computed through the polar form instead.
const EXACT_POW_BIT_LIMIT: u64 = 32 * 1024 * 1024;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    /// Division that never truncates.
    Div,
    Pow,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
}

/// Apply a binary operation to two values.
pub fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Result<Value> {
    match op {
        BinOp::Add => Ok(add(left, right)),
        BinOp::Sub => Ok(sub(left, right)),
        BinOp::Mul => Ok(mul(left, right)),
        BinOp::Div => quo(left, right),
        BinOp::Pow => pow(left, right),
    }
}

/// Apply a unary operation to a value.
pub fn apply_unaryop(op: UnaryOp, val: &Value) -> Result<Value> {
    match op {
        UnaryOp::Neg => Ok(neg(val)),
    }
}

fn lift(s: &Scalar) -> Value {
    Value::Complex(Complex::new(s.clone(), 0))
}

// ============================================================================
// Addition and subtraction
// ============================================================================

fn add(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a + b),
        (Value::Complex(z), Value::Complex(w)) => {
            from_parts(z.real() + w.real(), z.imag() + w.imag())
        }
        (Value::Complex(z), Value::Scalar(s)) => from_parts(z.real() + s, z.imag().clone()),
        (Value::Scalar(s), Value::Complex(_)) => add(&lift(s), right),
    }
}

fn sub(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a - b),
        (Value::Complex(z), Value::Complex(w)) => {
            from_parts(z.real() - w.real(), z.imag() - w.imag())
        }
        (Value::Complex(z), Value::Scalar(s)) => from_parts(z.real() - s, z.imag().clone()),
        (Value::Scalar(s), Value::Complex(_)) => sub(&lift(s), right),
    }
}

fn neg(val: &Value) -> Value {
    match val {
        Value::Scalar(s) => Value::Scalar(-s),
        Value::Complex(z) => from_parts(-z.real(), -z.imag()),
    }
}

// ============================================================================
// Multiplication
// ============================================================================

/// Product that keeps a zero factor from meeting an infinity: when exactly
/// one side is zero, a non-NaN float on the other side counts as `±1.0`.
fn safe_mul(a: &Scalar, b: &Scalar, a_zero: bool, b_zero: bool) -> Scalar {
    let a = unit_if_partner_zero(a, a_zero, b_zero);
    let b = unit_if_partner_zero(b, b_zero, a_zero);
    &*a * &*b
}

fn unit_if_partner_zero(x: &Scalar, x_zero: bool, partner_zero: bool) -> Cow<'_, Scalar> {
    match x {
        Scalar::Float(f) if !x_zero && partner_zero && !f.is_nan() => {
            Cow::Owned(Scalar::Float(if f.is_sign_negative() { -1.0 } else { 1.0 }))
        }
        _ => Cow::Borrowed(x),
    }
}

fn mul_complex(z: &Complex, w: &Complex) -> Value {
    let (a, b) = (z.real(), z.imag());
    let (c, d) = (w.real(), w.imag());
    let (az, bz, cz, dz) = (a.is_zero(), b.is_zero(), c.is_zero(), d.is_zero());
    // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
    let real = &safe_mul(a, c, az, cz) - &safe_mul(b, d, bz, dz);
    let imag = &safe_mul(a, d, az, dz) + &safe_mul(b, c, bz, cz);
    from_parts(real, imag)
}

fn mul(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Value::Scalar(a * b),
        (Value::Complex(z), Value::Complex(w)) => mul_complex(z, w),
        (Value::Complex(z), Value::Scalar(s)) => from_parts(z.real() * s, z.imag() * s),
        (Value::Scalar(s), Value::Complex(_)) => mul(&lift(s), right),
    }
}

// ============================================================================
// Division
// ============================================================================

fn quo(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(a.quo(b)?)),
        (Value::Complex(z), Value::Complex(w)) => quo_complex(z, w),
        (Value::Complex(z), Value::Scalar(s)) => Ok(from_parts(z.real().quo(s)?, z.imag().quo(s)?)),
        (Value::Scalar(s), Value::Complex(_)) => quo(&lift(s), right),
    }
}

fn quo_complex(z: &Complex, w: &Complex) -> Result<Value> {
    let inexact = [z.real(), z.imag(), w.real(), w.imag()]
        .iter()
        .any(|s| !s.is_exact());
    let left = Value::Complex(z.clone());

    if inexact {
        // scale by |w| so c² + d² is never formed
        let magn = scalar::hypot(w.real(), w.imag());
        log::trace!("scaled division by |{w}| = {magn}");
        let unit = Complex::new(w.real().quo(&magn)?, w.imag().quo(&magn)?);
        let numer = mul(&left, &unit.conj());
        return quo(&numer, &Value::Scalar(magn));
    }

    let numer = mul(&left, &w.conj());
    quo(&numer, &Value::Scalar(w.abs2()))
}

// ============================================================================
// Power
// ============================================================================

fn pow(base: &Value, exp: &Value) -> Result<Value> {
    match (base, exp) {
        (Value::Complex(z), _) => complex_pow(z, exp),
        (Value::Scalar(s), Value::Complex(_)) => complex_pow(&Complex::new(s.clone(), 0), exp),
        (Value::Scalar(s), Value::Scalar(e)) => {
            if s.is_negative() && !is_integral(e) {
                complex_pow(&Complex::new(s.clone(), 0), exp)
            } else {
                Ok(Value::Scalar(s.pow(e)?))
            }
        }
    }
}

fn is_integral(s: &Scalar) -> bool {
    match s {
        Scalar::Int(_) | Scalar::Big(_) => true,
        Scalar::Rational(r) => r.is_integer(),
        Scalar::Float(f) => *f == f.round(),
    }
}

fn complex_pow(z: &Complex, exp: &Value) -> Result<Value> {
    if exp.is_exact_zero() {
        return Ok(Value::Complex(Complex::new(1, 0)));
    }
    let exp = match exp {
        Value::Scalar(Scalar::Rational(r)) if r.is_integer() => {
            Cow::Owned(Value::Scalar(Scalar::from(r.numer().clone())))
        }
        other => Cow::Borrowed(other),
    };

    match &*exp {
        Value::Complex(w) => {
            let (r, theta) = z.to_polar();
            let log_r = scalar::log(&r)?;
            let nr = scalar::exp(&(&(w.real() * &log_r) - &(w.imag() * &theta)));
            let ntheta = &(&theta * w.real()) + &(w.imag() * &log_r);
            Ok(polar_parts(&nr, &ntheta, &settings::current()))
        }
        Value::Scalar(e) if e.is_integer() => integer_pow(z, e),
        Value::Scalar(e) => real_pow(z, e),
    }
}

/// `z ** e` for real `e` through the polar form.
fn real_pow(z: &Complex, e: &Scalar) -> Result<Value> {
    let (r, theta) = z.to_polar();
    Ok(polar_parts(&r.pow(e)?, &(&theta * e), &settings::current()))
}

fn integer_pow(z: &Complex, e: &Scalar) -> Result<Value> {
    if e.is_negative() {
        let one = Value::Scalar(Scalar::from(BigRational::one()));
        let inverse = quo(&one, &Value::Complex(z.clone()))?;
        return pow(&inverse, &Value::Scalar(-e));
    }

    let Some(e) = e.as_bigint() else {
        return real_pow(z, &e.to_float());
    };
    let n = if z.is_inexact() {
        e.to_u32()
    } else if is_unit(z) {
        // ±1 and ±i repeat with period 4
        ((&e - 1u32) % 4u32 + 1u32).to_u32()
    } else {
        e.to_u32()
            .filter(|&n| bits_per_power(z).saturating_mul(u64::from(n)) <= EXACT_POW_BIT_LIMIT)
    };
    let Some(n) = n else {
        return real_pow(z, &Scalar::from(e).to_float());
    };

    // repeated squaring: acc · x^n with x squared in place
    let two = Scalar::from(2);
    let mut x = z.clone();
    let mut acc = Value::Complex(z.clone());
    let mut n = n - 1;
    while n != 0 {
        while n % 2 == 0 {
            let (xr, xi) = (x.real(), x.imag());
            x = Complex::new(&(xr * xr) - &(xi * xi), &(&two * xr) * xi);
            n /= 2;
        }
        acc = mul(&acc, &Value::Complex(x.clone()));
        n -= 1;
    }
    Ok(acc)
}

/// Gaussian integer of magnitude one: `1`, `-1`, `i` or `-i`.
fn is_unit(z: &Complex) -> bool {
    z.real().denominator().is_one() && z.imag().denominator().is_one() && z.abs2().is_one()
}

/// Upper estimate of how many bits each further factor of `z` adds to an
/// exact power. Writing `z = N/d` with `N` a Gaussian integer, `z^n` has
/// numerators below `|N|^n` and denominator `d^n`.
fn bits_per_power(z: &Complex) -> u64 {
    let bits = |s: &Scalar| s.as_bigint().map_or(u64::MAX, |n| n.bits());
    let denom = z.denominator().map_or(u64::MAX, |d| bits(&d));
    let magnitude = bits(&z.abs2().numerator());
    magnitude.saturating_add(1) / 2 + denom.saturating_mul(2)
}

// ============================================================================
// Methods
// ============================================================================

impl Value {
    /// Division; exact operands give exact results.
    pub fn quo(&self, other: &Value) -> Result<Value> {
        quo(self, other)
    }

    pub fn pow(&self, exp: &Value) -> Result<Value> {
        pow(self, exp)
    }
}

impl Complex {
    /// Division. With any float component the divisor is scaled by its
    /// magnitude first, so huge components do not overflow.
    pub fn quo(&self, other: &Value) -> Result<Value> {
        quo_complex_lhs(self, other)
    }

    /// Raises to a real or complex power.
    ///
    /// Integer exponents are exact for exact values; other exponents go
    /// through the polar form on the principal branch.
    pub fn pow(&self, exp: &Value) -> Result<Value> {
        complex_pow(self, exp)
    }

    /// Division after converting both components of `self` to floats.
    pub fn fdiv(&self, other: &Value) -> Result<Value> {
        let floats = Complex::new(self.real().to_float(), self.imag().to_float());
        quo_complex_lhs(&floats, other)
    }
}

fn quo_complex_lhs(z: &Complex, other: &Value) -> Result<Value> {
    match other {
        Value::Complex(w) => quo_complex(z, w),
        Value::Scalar(_) => quo(&Value::Complex(z.clone()), other),
    }
}

// ============================================================================
// Operator traits
// ============================================================================

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $func:ident) => {
        impl std::ops::$trait<&Value> for &Value {
            type Output = Value;
            fn $method(self, rhs: &Value) -> Value {
                $func(self, rhs)
            }
        }

        impl std::ops::$trait<Value> for Value {
            type Output = Value;
            fn $method(self, rhs: Value) -> Value {
                $func(&self, &rhs)
            }
        }

        impl std::ops::$trait<&Complex> for &Complex {
            type Output = Value;
            fn $method(self, rhs: &Complex) -> Value {
                $func(&Value::Complex(self.clone()), &Value::Complex(rhs.clone()))
            }
        }
    };
}

forward_binop!(Add, add, add);
forward_binop!(Sub, sub, sub);
forward_binop!(Mul, mul, mul);

impl std::ops::Neg for &Value {
    type Output = Value;
    fn neg(self) -> Value {
        neg(self)
    }
}

impl std::ops::Neg for Value {
    type Output = Value;
    fn neg(self) -> Value {
        neg(&self)
    }
}

impl std::ops::Neg for &Complex {
    type Output = Value;
    fn neg(self) -> Value {
        from_parts(-self.real(), -self.imag())
    }
}

// ============================================================================
// Tests
// ============================================================================
