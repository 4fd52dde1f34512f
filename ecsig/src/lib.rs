/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

//! Elliptic curve signatures over secp256k1.
//!
//! ```
//! use ecsig::{Ecdsa, PrivateKey, Secp256k1, Sha256};
//!
//! let key = PrivateKey::<Secp256k1>::from_be_bytes(&[0x2a]).unwrap();
//! let ecdsa = Ecdsa::new(Sha256);
//! let signature = ecdsa.sign_deterministic(b"hello", &key).unwrap();
//! let der = signature.to_der().unwrap();
//!
//! let (parsed, _) = ecsig::signatures::ecdsa::Signature::from_der(&der).unwrap();
//! assert!(ecdsa.verify(b"hello", &parsed, &key.public_key().unwrap()).unwrap());
//! ```

pub mod ellipticcurve;
pub mod error;
pub mod hash;
pub mod signatures;
pub mod utils;

pub use ellipticcurve::{Curve, Point, PrivateKey, PublicKey, Secp256k1};
#[cfg(feature = "secp256r1")]
pub use ellipticcurve::Secp256r1;
pub use error::{DerError, Error, ErrorKind, Result};
pub use hash::{Hash, Sha256, Sha256d};
pub use signatures::{DerSignature, Ecdsa, NonceSource, Schnorr};
