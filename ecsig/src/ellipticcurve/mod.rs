/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

pub mod curve;
pub mod field;
pub mod math;
pub mod point;
pub mod privatekey;
pub mod publickey;

pub use curve::Curve;
pub use curve::CurveParams;
pub use curve::Secp256k1;
#[cfg(feature = "secp256r1")]
pub use curve::Secp256r1;
pub use field::FieldElement;
pub use point::Point;
pub use privatekey::PrivateKey;
pub use publickey::PublicKey;
