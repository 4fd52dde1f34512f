/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

pub mod der;
pub mod ecdsa;
pub mod nonce;
pub mod schnorr;

use ibig::IBig;

use crate::ellipticcurve::{math, Curve};

pub use der::DerSignature;
pub use ecdsa::Ecdsa;
pub use nonce::{NonceSource, RandomNonce, Rfc6979};
pub use schnorr::Schnorr;

/// Reads a digest as a big-endian integer, truncated to the bit length of
/// the group order of `C` (`bits2int`). The result is not reduced.
pub fn digest_to_integer<C: Curve>(digest: &[u8]) -> IBig {
    math::bits_to_int(digest, math::bit_len(C::order()))
}
