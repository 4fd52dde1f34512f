/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use ibig::ops::UnsignedAbs;
use ibig::{ibig, IBig, UBig};

use crate::{Error, Result};

pub fn to_ibig_be(bytes: &[u8]) -> IBig {
    IBig::from(UBig::from_be_bytes(bytes))
}

pub fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Big-endian without leading zeros, zero itself is a single `0x00`.
pub fn ibig_to_minimal_be(num: &IBig) -> Result<Vec<u8>> {
    if *num < ibig!(0) {
        return Err(Error::NegativeInteger);
    }
    let raw = num.clone().unsigned_abs().to_be_bytes();
    let minimal = strip_leading_zeros(&raw);
    if minimal.is_empty() {
        return Ok(vec![0]);
    }
    Ok(minimal.to_vec())
}

/// Big-endian, left padded with zeros to exactly `width` bytes.
pub fn ibig_to_be_bytes(num: &IBig, width: usize) -> Result<Vec<u8>> {
    let minimal = ibig_to_minimal_be(num)?;
    let minimal = strip_leading_zeros(&minimal);
    if minimal.len() > width {
        return Err(Error::IntegerTooLarge(width));
    }
    let mut out = vec![0; width - minimal.len()];
    out.extend_from_slice(minimal);
    Ok(out)
}

pub fn to_hex(b: &[u8]) -> String {
    b.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 == 0 {
        (0..s.len())
            .step_by(2)
            .map(|i| {
                s.get(i..i + 2)
                    .and_then(|sub| u8::from_str_radix(sub, 16).ok())
            })
            .collect()
    } else {
        None
    }
}
