/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use std::marker::PhantomData;

use ibig::{ibig, IBig};
use log::debug;
use rand::{CryptoRng, RngCore};

use super::der::DerSignature;
use super::digest_to_integer;
use super::nonce::{NonceSource, RandomNonce, Rfc6979, MAX_NONCE_ATTEMPTS};
use crate::ellipticcurve::{math, Curve, Point, PrivateKey, PublicKey};
use crate::hash::Hash;
use crate::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature<C: Curve> {
    pub r: IBig,
    pub s: IBig,
    curve: PhantomData<C>,
}

impl<C: Curve> Signature<C> {
    pub fn new(r: IBig, s: IBig) -> Self {
        Self {
            r,
            s,
            curve: PhantomData,
        }
    }

    /// Parses a DER signature, `s` comes back normalized to the low value.
    pub fn from_der(buf: &[u8]) -> Result<(Self, usize)> {
        let (der, consumed) = DerSignature::read(buf)?;
        Ok((der.into(), consumed))
    }

    pub fn to_der(&self) -> Result<Vec<u8>> {
        DerSignature::<C>::from(self.clone()).write()
    }
}

impl<C: Curve> From<Signature<C>> for DerSignature<C> {
    fn from(signature: Signature<C>) -> Self {
        DerSignature::new(signature.r, signature.s)
    }
}

impl<C: Curve> From<DerSignature<C>> for Signature<C> {
    fn from(der: DerSignature<C>) -> Self {
        Signature::new(der.r().clone(), der.s().clone())
    }
}

/// ECDSA over the curve `C`, hashing messages with `H`.
pub struct Ecdsa<C: Curve, H: Hash> {
    hash: H,
    curve: PhantomData<C>,
}

impl<C: Curve, H: Hash> Ecdsa<C, H> {
    pub fn new(hash: H) -> Self {
        Self {
            hash,
            curve: PhantomData,
        }
    }

    pub fn hash(&self) -> &H {
        &self.hash
    }

    pub fn sign<N: NonceSource + ?Sized>(
        &self,
        message: &[u8],
        privkey: &PrivateKey<C>,
        nonces: &mut N,
    ) -> Result<Signature<C>> {
        let n = C::order();
        let d = privkey.secret();
        let z = digest_to_integer::<C>(&self.hash.digest(message));

        for _ in 0..MAX_NONCE_ATTEMPTS {
            let k = nonces.next_nonce()?;
            if k < ibig!(1) || &k >= n {
                debug!("nonce outside [1, n-1], drawing again");
                continue;
            }

            // r = (k * G).x mod n
            let p = Point::<C>::generator().multiply(&k)?;
            let r = match p.x() {
                Some(x) => math::rem_euclid(x.value(), n),
                None => continue,
            };
            if r == ibig!(0) {
                debug!("r = 0, drawing a new nonce");
                continue;
            }

            // s = k^-1 * (z + r * d) mod n
            let s = math::rem_euclid(&(math::inv(&k, n)? * (&z + &r * d)), n);
            if s == ibig!(0) {
                debug!("s = 0, drawing a new nonce");
                continue;
            }

            return Ok(Signature::new(r, s));
        }

        Err(Error::NonceExhausted(MAX_NONCE_ATTEMPTS))
    }

    /// Signs with RFC 6979 nonces derived from `message` and the key.
    pub fn sign_deterministic(&self, message: &[u8], privkey: &PrivateKey<C>) -> Result<Signature<C>> {
        let mut nonces = Rfc6979::new(&self.hash, C::order(), privkey.secret(), message)?;
        self.sign(message, privkey, &mut nonces)
    }

    pub fn sign_random<R: RngCore + CryptoRng + ?Sized>(
        &self,
        message: &[u8],
        privkey: &PrivateKey<C>,
        rng: &mut R,
    ) -> Result<Signature<C>> {
        self.sign(message, privkey, &mut RandomNonce::new(rng, C::order()))
    }

    /// `Ok(false)` for any signature that does not match, `Err` only when
    /// the arithmetic itself fails.
    pub fn verify(&self, message: &[u8], sign: &Signature<C>, pub_key: &PublicKey<C>) -> Result<bool> {
        let n = C::order();
        for value in [&sign.r, &sign.s] {
            if *value < ibig!(1) || value >= n {
                return Ok(false);
            }
        }

        let z = digest_to_integer::<C>(&self.hash.digest(message));
        let s_inv = math::inv(&sign.s, n)?;
        let u1 = math::rem_euclid(&(z * &s_inv), n);
        let u2 = math::rem_euclid(&(&sign.r * &s_inv), n);

        let res = Point::<C>::generator()
            .multiply(&u1)?
            .add(&pub_key.point().multiply(&u2)?)?;

        Ok(match res.x() {
            Some(x) => math::rem_euclid(x.value(), n) == sign.r,
            None => false,
        })
    }
}
