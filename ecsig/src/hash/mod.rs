/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

pub mod hmac;
pub mod sha256;

pub use hmac::Hmac;
pub use sha256::{Sha256, Sha256d};

/// The hash capability used by the signature schemes and by RFC 6979.
pub trait Hash {
    fn digest(&self, data: &[u8]) -> Vec<u8>;
    /// Digest length in bytes.
    fn output_len(&self) -> usize;
    /// Block length in bytes, needed by HMAC.
    fn block_len(&self) -> usize;
}

impl<H: Hash + ?Sized> Hash for &H {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        (**self).digest(data)
    }
    fn output_len(&self) -> usize {
        (**self).output_len()
    }
    fn block_len(&self) -> usize {
        (**self).block_len()
    }
}
