/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 * https://www.rfc-editor.org/rfc/rfc6979#section-3.2
 *
 */

use ibig::{ibig, IBig};
use log::{debug, trace};
use rand::{CryptoRng, RngCore};

use crate::ellipticcurve::math;
use crate::hash::hmac::hmac;
use crate::hash::Hash;
use crate::utils::bytes;
use crate::{Error, Result};

/// Upper bound for every rejection loop around nonce generation.
pub const MAX_NONCE_ATTEMPTS: usize = 64;

/// Supplies candidate nonces to a signer. The signer asks again whenever a
/// candidate is out of range or leads to a degenerate signature.
pub trait NonceSource {
    fn next_nonce(&mut self) -> Result<IBig>;
}

impl<F: FnMut() -> IBig> NonceSource for F {
    fn next_nonce(&mut self) -> Result<IBig> {
        Ok(self())
    }
}

/// Draws `byte_len(order)` random bytes until their value is below `order`.
pub fn generate_random_nonce<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    order: &IBig,
) -> Result<IBig> {
    let mut buf = vec![0; math::byte_len(order)];
    for attempt in 1..=MAX_NONCE_ATTEMPTS {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| Error::RandomSource(e.to_string()))?;
        let candidate = bytes::to_ibig_be(&buf);
        if &candidate < order {
            return Ok(candidate);
        }
        debug!("random nonce candidate {attempt} is not below the group order");
    }
    Err(Error::NonceExhausted(MAX_NONCE_ATTEMPTS))
}

pub struct RandomNonce<'a, R: ?Sized> {
    rng: &'a mut R,
    order: &'a IBig,
}

impl<'a, R: RngCore + CryptoRng + ?Sized> RandomNonce<'a, R> {
    pub fn new(rng: &'a mut R, order: &'a IBig) -> Self {
        Self { rng, order }
    }
}

impl<'a, R: RngCore + CryptoRng + ?Sized> NonceSource for RandomNonce<'a, R> {
    fn next_nonce(&mut self) -> Result<IBig> {
        generate_random_nonce(&mut *self.rng, self.order)
    }
}

/// Deterministic nonces (RFC 6979 section 3.2) for a given message and key.
pub struct Rfc6979<'a, H: Hash + ?Sized> {
    hash: &'a H,
    order: IBig,
    qlen: usize,
    k: Vec<u8>,
    v: Vec<u8>,
    // no candidate has been handed out since the last reseed
    fresh: bool,
}

impl<'a, H: Hash + ?Sized> Rfc6979<'a, H> {
    pub fn new(hash: &'a H, order: &IBig, private_key: &IBig, message: &[u8]) -> Result<Self> {
        let qlen = math::bit_len(order);
        let rlen = (qlen + 7) / 8;

        // step a, and bits2octets(h1)
        let h1 = hash.digest(message);
        let z = math::bits_to_int(&h1, qlen);
        let z = if &z >= order { z - order } else { z };
        let h1 = bytes::ibig_to_be_bytes(&z, rlen)?;
        let x = bytes::ibig_to_be_bytes(private_key, rlen)?;

        // steps b to g
        let mut v = vec![0x01; hash.output_len()];
        let mut k = vec![0x00; hash.output_len()];
        for marker in [0x00u8, 0x01] {
            k = hmac(hash, &k, &[&v[..], &[marker][..], &x[..], &h1[..]]);
            v = hmac(hash, &k, &[&v[..]]);
        }

        Ok(Self {
            hash,
            order: order.clone(),
            qlen,
            k,
            v,
            fresh: true,
        })
    }

    fn reseed(&mut self) {
        self.k = hmac(self.hash, &self.k, &[&self.v[..], &[0x00][..]]);
        self.v = hmac(self.hash, &self.k, &[&self.v[..]]);
    }
}

impl<'a, H: Hash + ?Sized> NonceSource for Rfc6979<'a, H> {
    fn next_nonce(&mut self) -> Result<IBig> {
        // step h
        for _ in 0..MAX_NONCE_ATTEMPTS {
            if !self.fresh {
                self.reseed();
            }
            self.fresh = false;

            let mut t = Vec::with_capacity((self.qlen + 7) / 8);
            while t.len() * 8 < self.qlen {
                self.v = hmac(self.hash, &self.k, &[&self.v[..]]);
                t.extend_from_slice(&self.v);
            }

            let k = math::bits_to_int(&t, self.qlen);
            if k >= ibig!(1) && k < self.order {
                return Ok(k);
            }
            trace!("rfc6979 candidate outside [1, n-1]");
        }
        Err(Error::NonceExhausted(MAX_NONCE_ATTEMPTS))
    }
}

/// The first RFC 6979 nonce for `message` and `private_key`.
pub fn generate_nonce_rfc6979<H: Hash + ?Sized>(
    hash: &H,
    order: &IBig,
    private_key: &IBig,
    message: &[u8],
) -> Result<IBig> {
    Rfc6979::new(hash, order, private_key, message)?.next_nonce()
}
