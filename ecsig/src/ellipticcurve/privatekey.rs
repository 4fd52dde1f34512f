/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use std::fmt;
use std::marker::PhantomData;

use ibig::{ibig, IBig};
use rand::{CryptoRng, RngCore};

use super::{math, Curve, Point, PublicKey};
use crate::signatures::nonce::{self, MAX_NONCE_ATTEMPTS};
use crate::utils::bytes;
use crate::{Error, Result};

/// A secret scalar in `[1, n-1]`.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey<C: Curve> {
    secret: IBig,
    curve: PhantomData<C>,
}

impl<C: Curve> PrivateKey<C> {
    pub fn new(secret: IBig) -> Result<Self> {
        if secret < ibig!(1) || &secret >= C::order() {
            return Err(Error::InvalidPrivateKey);
        }
        Ok(PrivateKey {
            secret,
            curve: PhantomData,
        })
    }

    pub fn from_be_bytes(buf: &[u8]) -> Result<Self> {
        Self::new(bytes::to_ibig_be(buf))
    }

    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Result<Self> {
        for _ in 0..MAX_NONCE_ATTEMPTS {
            let secret = nonce::generate_random_nonce(rng, C::order())?;
            if secret != ibig!(0) {
                return Self::new(secret);
            }
        }
        Err(Error::NonceExhausted(MAX_NONCE_ATTEMPTS))
    }

    pub fn secret(&self) -> &IBig {
        &self.secret
    }

    /// Big-endian, padded to the byte length of the group order.
    pub fn to_be_bytes(&self) -> Result<Vec<u8>> {
        bytes::ibig_to_be_bytes(&self.secret, math::byte_len(C::order()))
    }

    pub fn public_key(&self) -> Result<PublicKey<C>> {
        PublicKey::new(Point::generator().multiply(&self.secret)?)
    }
}

impl<C: Curve> fmt::Debug for PrivateKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").field("curve", &C::params().name).finish_non_exhaustive()
    }
}
