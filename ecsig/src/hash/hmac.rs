/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 * https://www.rfc-editor.org/rfc/rfc2104
 *
 */

use super::Hash;

pub struct Hmac<'a, H: Hash + ?Sized> {
    hash: &'a H,
    key: &'a [u8],
    pub input: Vec<u8>,
}

impl<'a, H: Hash + ?Sized> Hmac<'a, H> {
    pub fn new(hash: &'a H, key: &'a [u8]) -> Self {
        Hmac {
            hash,
            key,
            input: vec![],
        }
    }

    pub fn update(&mut self, buf: &[u8]) {
        self.input.extend_from_slice(buf);
    }

    pub fn result(&self) -> Vec<u8> {
        let size = self.hash.block_len();

        let hashed_key;
        let key = if self.key.len() > size {
            hashed_key = self.hash.digest(self.key);
            &hashed_key
        } else {
            self.key
        };

        let mut padded_key = vec![0; size];
        padded_key[..key.len()].copy_from_slice(key);

        let mut k_ipad_text = Vec::with_capacity(size + self.input.len());
        k_ipad_text.extend(padded_key.iter().map(|k| k ^ 0x36));
        k_ipad_text.extend_from_slice(&self.input);

        let mut input = Vec::with_capacity(size + self.hash.output_len());
        input.extend(padded_key.iter().map(|k| k ^ 0x5C));
        input.extend_from_slice(&self.hash.digest(&k_ipad_text));

        self.hash.digest(&input)
    }
}

/// HMAC over the concatenation of `parts`.
pub fn hmac<H: Hash + ?Sized>(hash: &H, key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut mac = Hmac::new(hash, key);
    for part in parts {
        mac.update(part);
    }
    mac.result()
}

// Test Cases from: https://www.rfc-editor.org/rfc/rfc4231
