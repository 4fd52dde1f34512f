/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

//! Schnorr signatures with the challenge `H(message || R)`.
//!
//! The public key is not part of the challenge, so this is *not* BIP-340 and
//! signatures do not verify under BIP-340 implementations.

use std::marker::PhantomData;

use ibig::{ibig, IBig};
use log::debug;

use super::digest_to_integer;
use super::nonce::{NonceSource, Rfc6979, MAX_NONCE_ATTEMPTS};
use crate::ellipticcurve::{math, Curve, Point, PrivateKey, PublicKey};
use crate::hash::Hash;
use crate::utils::bytes;
use crate::{Error, Result};

/// `R` as a compressed point and the scalar `s`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature<C: Curve> {
    pub r: Vec<u8>,
    pub s: IBig,
    curve: PhantomData<C>,
}

impl<C: Curve> Signature<C> {
    pub fn new(r: Vec<u8>, s: IBig) -> Self {
        Self {
            r,
            s,
            curve: PhantomData,
        }
    }

    fn encoded_len() -> usize {
        C::params().field_len + 1 + math::byte_len(C::order())
    }

    /// `R || s`, with `s` padded to the byte length of the group order.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(Self::encoded_len());
        out.extend_from_slice(&self.r);
        out.extend(bytes::ibig_to_be_bytes(&self.s, math::byte_len(C::order()))?);
        Ok(out)
    }

    /// Splits `R || s`. `R` is only decompressed during verification.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        if buf.len() != Self::encoded_len() {
            return Err(Error::InvalidLength {
                expected: Self::encoded_len(),
                actual: buf.len(),
            });
        }
        let (r, s) = buf.split_at(C::params().field_len + 1);
        Ok(Self::new(r.to_vec(), bytes::to_ibig_be(s)))
    }
}

pub struct Schnorr<C: Curve, H: Hash> {
    hash: H,
    curve: PhantomData<C>,
}

impl<C: Curve, H: Hash> Schnorr<C, H> {
    pub fn new(hash: H) -> Self {
        Self {
            hash,
            curve: PhantomData,
        }
    }

    pub fn hash(&self) -> &H {
        &self.hash
    }

    fn challenge(&self, message: &[u8], r: &[u8]) -> IBig {
        let mut m = Vec::with_capacity(message.len() + r.len());
        m.extend_from_slice(message);
        m.extend_from_slice(r);
        digest_to_integer::<C>(&self.hash.digest(&m))
    }

    pub fn sign<N: NonceSource + ?Sized>(
        &self,
        message: &[u8],
        privkey: &PrivateKey<C>,
        nonces: &mut N,
    ) -> Result<Signature<C>> {
        let n = C::order();

        let mut nonce = None;
        for _ in 0..MAX_NONCE_ATTEMPTS {
            let k = nonces.next_nonce()?;
            if k >= ibig!(1) && &k < n {
                nonce = Some(k);
                break;
            }
            debug!("nonce outside [1, n-1], drawing again");
        }
        let k = nonce.ok_or(Error::NonceExhausted(MAX_NONCE_ATTEMPTS))?;

        let r = Point::<C>::generator().multiply(&k)?.compress()?;
        let h = self.challenge(message, &r);
        let s = math::rem_euclid(&(k + h * privkey.secret()), n);

        Ok(Signature::new(r, s))
    }

    /// Signs with RFC 6979 nonces derived from `message` and the key.
    pub fn sign_deterministic(&self, message: &[u8], privkey: &PrivateKey<C>) -> Result<Signature<C>> {
        let mut nonces = Rfc6979::new(&self.hash, C::order(), privkey.secret(), message)?;
        self.sign(message, privkey, &mut nonces)
    }

    /// Checks `Q * h + R == G * s`. A malformed `R` is an error, not a
    /// failed verification.
    pub fn verify(&self, message: &[u8], sign: &Signature<C>, pub_key: &PublicKey<C>) -> Result<bool> {
        if sign.s < ibig!(0) || &sign.s >= C::order() {
            return Ok(false);
        }

        let h = self.challenge(message, &sign.r);
        let r = Point::<C>::decompress(&sign.r)?;
        let expected = Point::<C>::generator().multiply(&sign.s)?;

        Ok(pub_key.point().multiply(&h)?.add(&r)? == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::{Schnorr, Signature};
    use crate::ellipticcurve::{Curve, PrivateKey, Secp256k1};
    use crate::hash::Sha256;
    use crate::utils::bytes;
    use crate::Error;
    use ibig::ibig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sign_fixed_nonce() {
        let schnorr = Schnorr::<Secp256k1, _>::new(Sha256);
        let key = PrivateKey::new(ibig!(2)).unwrap();
        let signature = schnorr.sign(b"hello", &key, &mut || ibig!(3)).unwrap();

        assert_eq!(
            bytes::to_hex(&signature.r),
            "02f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"
        );
        assert_eq!(
            signature.s,
            ibig!(_a6d2ad44302a673ffdf6383ea4b1b00c8234e0178b8fbcc074998a840c63e19e base 16)
        );
        assert!(schnorr
            .verify(b"hello", &signature, &key.public_key().unwrap())
            .unwrap());
    }

    #[test]
    fn test_sign_verify() {
        let mut rng = StdRng::seed_from_u64(3);
        let schnorr = Schnorr::<Secp256k1, _>::new(Sha256);
        let key = PrivateKey::random(&mut rng).unwrap();
        let pub_key = key.public_key().unwrap();

        let signature = schnorr.sign_deterministic(b"message", &key).unwrap();
        assert_eq!(signature, schnorr.sign_deterministic(b"message", &key).unwrap());
        assert!(schnorr.verify(b"message", &signature, &pub_key).unwrap());
        assert!(!schnorr.verify(b"massage", &signature, &pub_key).unwrap());

        let other = PrivateKey::random(&mut rng).unwrap().public_key().unwrap();
        assert!(!schnorr.verify(b"message", &signature, &other).unwrap());

        let tampered = Signature::new(signature.r.clone(), &signature.s + ibig!(1));
        assert!(!schnorr.verify(b"message", &tampered, &pub_key).unwrap());

        let out_of_range = Signature::new(signature.r.clone(), Secp256k1::order().clone());
        assert!(!schnorr.verify(b"message", &out_of_range, &pub_key).unwrap());
    }

    #[test]
    fn test_malformed_r_is_an_error() {
        let schnorr = Schnorr::<Secp256k1, _>::new(Sha256);
        let key = PrivateKey::new(ibig!(9)).unwrap();
        let mut signature = schnorr.sign_deterministic(b"message", &key).unwrap();
        signature.r[0] = 0x04;
        assert_eq!(
            schnorr.verify(b"message", &signature, &key.public_key().unwrap()),
            Err(Error::InvalidOrientation(0x04))
        );
    }

    #[test]
    fn test_bytes() {
        let schnorr = Schnorr::<Secp256k1, _>::new(Sha256);
        let key = PrivateKey::new(ibig!(2)).unwrap();
        let signature = schnorr.sign(b"hello", &key, &mut || ibig!(3)).unwrap();

        let buf = signature.to_bytes().unwrap();
        assert_eq!(buf.len(), 65);
        assert_eq!(Signature::<Secp256k1>::from_bytes(&buf).unwrap(), signature);
        assert_eq!(
            Signature::<Secp256k1>::from_bytes(&buf[1..]),
            Err(Error::InvalidLength {
                expected: 65,
                actual: 64
            })
        );
    }

    #[test]
    fn test_nonce_exhausted() {
        let schnorr = Schnorr::<Secp256k1, _>::new(Sha256);
        let key = PrivateKey::new(ibig!(2)).unwrap();
        let mut order = || Secp256k1::order().clone();
        assert_eq!(
            schnorr.sign(b"hello", &key, &mut order),
            Err(Error::NonceExhausted(super::MAX_NONCE_ATTEMPTS))
        );
    }
}
