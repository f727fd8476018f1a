#![no_main]

//! Parser fuzzer.
//!
//! Any input must parse or fail without panicking. Inputs that parse strictly
//! to an exact complex must read back from their own `to_s`.

use libfuzzer_sys::fuzz_target;
use rhizome_tower_complex::{parse, parse_strict, to_c, Value};

/// Longer inputs mostly exercise big-number arithmetic, not the grammar.
const MAX_LEN: usize = 256;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > MAX_LEN {
        return;
    }

    if let Ok((_, tail)) = parse(input) {
        assert!(
            input.ends_with(tail),
            "tail {tail:?} is not a suffix of {input:?}"
        );
    }
    let _ = to_c(input);

    let Ok(Value::Complex(z)) = parse_strict(input) else {
        return;
    };
    if !z.is_exact() {
        return;
    }
    let text = z.to_string();
    let back = parse_strict(&text)
        .unwrap_or_else(|e| panic!("{input:?} printed as {text:?}, which fails: {e}"))
        .into_complex();
    assert!(back.eql(&z), "{input:?}: {z} read back as {back}");
});
