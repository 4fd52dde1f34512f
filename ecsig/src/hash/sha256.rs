/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use sha2::Digest;

use super::Hash;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256;

impl Hash for Sha256 {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(data).to_vec()
    }
    fn output_len(&self) -> usize {
        32
    }
    fn block_len(&self) -> usize {
        64
    }
}

/// SHA-256 applied twice, as used by Bitcoin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256d;

impl Hash for Sha256d {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(sha2::Sha256::digest(data)).to_vec()
    }
    fn output_len(&self) -> usize {
        32
    }
    fn block_len(&self) -> usize {
        64
    }
}
