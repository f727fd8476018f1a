#![no_main]

//! Arithmetic fuzzer over exact Gaussian rationals.
//!
//! Checks the ring identities, exact division, conjugation and integer powers
//! on structured operands.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rhizome_tower_complex::{Complex, Scalar, Value};

/// An exact component.
#[derive(Debug, Arbitrary)]
enum Part {
    Int(i32),
    Ratio(i16, u8),
}

impl Part {
    fn scalar(&self) -> Scalar {
        match *self {
            Part::Int(n) => Scalar::from(n),
            Part::Ratio(n, d) => match Scalar::rational(n, i64::from(d).max(1)) {
                Ok(r) => r,
                Err(_) => Scalar::from(0),
            },
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    z: (Part, Part),
    w: (Part, Part),
    exponent: u8,
}

fn complex(parts: &(Part, Part)) -> Complex {
    Complex::new(parts.0.scalar(), parts.1.scalar())
}

fuzz_target!(|input: Input| {
    let z = complex(&input.z);
    let w = complex(&input.w);
    let (vz, vw) = (Value::from(z.clone()), Value::from(w.clone()));

    assert_eq!(&vz + &vw, &vw + &vz);
    assert_eq!(&vz * &vw, &vw * &vz);
    assert!((&vz - &vz).is_zero());
    assert_eq!(&(&vz + &vw) - &vw, vz);

    let product = &vz * &z.conj();
    assert_eq!(product, Value::from(Complex::new(z.abs2(), 0)));

    if !vw.is_zero() {
        let q = vz.quo(&vw).expect("exact division by nonzero");
        assert!(q.is_exact());
        assert_eq!(&q * &vw, vz);
    }

    let n = i64::from(input.exponent % 6);
    let mut repeated = Value::from(1);
    for _ in 0..n {
        repeated = &repeated * &vz;
    }
    let power = z.pow(&Value::from(n)).expect("small exact power");
    assert_eq!(power.into_complex(), repeated.into_complex());

    let same = Complex::new(z.real().to_rational().expect("exact"), z.imag().clone());
    assert_eq!(same, z);
    assert_eq!(same.hash_code(), z.hash_code());
});
