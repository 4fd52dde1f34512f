/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use ibig::{ibig, IBig};

use crate::utils::bytes;
use crate::{Error, Result};

/// Calculates the modular inverse of `x` with respect to `n` using the Extended Euclidean Algorithm.
///
/// ```
/// # use ibig::ibig;
/// # use ecsig::ellipticcurve::math::inv;
/// assert_eq!(inv(&ibig!(5), &ibig!(11)).unwrap(), ibig!(9));
/// assert!(inv(&ibig!(22), &ibig!(11)).is_err());
/// ```
pub fn inv(x: &IBig, n: &IBig) -> Result<IBig> {
    let mut lm = ibig!(1);
    let mut hm = ibig!(0);
    let mut low = rem_euclid(x, n);
    let mut high = n.clone();

    if low == ibig!(0) {
        return Err(Error::DivisionByZero);
    }

    while low > ibig!(1) {
        let r = &high / &low;
        let nm = &hm - &lm * &r;
        let nw = &high - &low * &r;
        high = low;
        hm = lm;
        low = nw;
        lm = nm;
    }

    // gcd(x, n) != 1
    if low == ibig!(0) {
        return Err(Error::DivisionByZero);
    }

    Ok(rem_euclid(&lm, n))
}

/// Calculates the Euclidean remainder of `x` modulo `v`.
///
/// ```
/// # use ibig::ibig;
/// # use ecsig::ellipticcurve::math::rem_euclid;
/// assert_eq!(rem_euclid(&ibig!(12), &ibig!(11)), ibig!(1));
/// assert_eq!(rem_euclid(&ibig!(-1), &ibig!(11)), ibig!(10));
/// ```
pub fn rem_euclid(x: &IBig, v: &IBig) -> IBig {
    let r = x % v;
    if r < ibig!(0) {
        if *v < ibig!(0) {
            r - v
        } else {
            r + v
        }
    } else {
        r
    }
}

/// Square-and-multiply `base^exp mod m`. `exp` must not be negative.
pub fn pow_mod(base: &IBig, exp: &IBig, m: &IBig) -> IBig {
    let two = ibig!(2);
    let mut result = rem_euclid(&ibig!(1), m);
    let mut base = rem_euclid(base, m);
    let mut exp = exp.clone();

    while exp > ibig!(0) {
        if &exp % &two == ibig!(1) {
            result = rem_euclid(&(&result * &base), m);
        }
        base = rem_euclid(&(&base * &base), m);
        exp = exp / &two;
    }
    result
}

/// Number of significant bits, zero for zero and negative values.
pub fn bit_len(x: &IBig) -> usize {
    let mut len = 0;
    let mut v = x.clone();
    while v > ibig!(0) {
        v = v >> 1;
        len += 1;
    }
    len
}

pub fn byte_len(x: &IBig) -> usize {
    (bit_len(x) + 7) / 8
}

/// `bits2int` from RFC 6979 section 2.3.2: the big-endian integer of `data`,
/// keeping only its leftmost `qlen` bits.
pub fn bits_to_int(data: &[u8], qlen: usize) -> IBig {
    let value = bytes::to_ibig_be(data);
    let blen = data.len() * 8;
    if blen > qlen {
        value >> (blen - qlen)
    } else {
        value
    }
}
