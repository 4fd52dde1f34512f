/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use std::fmt::Debug;
use std::sync::OnceLock;

use ibig::{ibig, IBig};

use super::math::{self, rem_euclid};
use super::Point;

/// Constants of a short Weierstrass curve `y^2 = x^3 + ax + b` over GF(p).
#[derive(Clone, Debug)]
pub struct CurveParams {
    pub name: &'static str,
    pub p: IBig,  // finite field
    pub a: IBig,  // used in equation
    pub b: IBig,  // used in equation
    pub n: IBig,  // prime order
    pub gx: IBig, // base point of prime order
    pub gy: IBig,
    /// Byte width of a field element.
    pub field_len: usize,
}

impl CurveParams {
    pub fn new(name: &'static str, p: IBig, a: IBig, b: IBig, n: IBig, gx: IBig, gy: IBig) -> Self {
        let field_len = math::byte_len(&p);
        CurveParams {
            name,
            p,
            a,
            b,
            n,
            gx,
            gy,
            field_len,
        }
    }

    /// Verify if the point (x, y) is on the curve.
    ///
    /// ```
    /// # use ibig::ibig;
    /// # use ecsig::ellipticcurve::{Curve, Secp256k1};
    /// let curve = Secp256k1::params();
    /// assert_eq!(curve.contains(&ibig!(10), &ibig!(10)), false);
    /// assert_eq!(curve.contains(&curve.gx, &curve.gy), true);
    /// ```
    pub fn contains(&self, x: &IBig, y: &IBig) -> bool {
        let zero = ibig!(0);
        if x < &zero || y < &zero || x >= &self.p || y >= &self.p {
            return false;
        }
        let left = rem_euclid(&y.pow(2), &self.p);
        let right = rem_euclid(&(x.pow(3) + &self.a * x + &self.b), &self.p);
        left == right
    }
}

/// A curve type. The generic point arithmetic in [`Point`] is shared, every
/// curve only supplies its constants.
pub trait Curve: Clone + Copy + Debug + PartialEq + Eq + Send + Sync + 'static {
    fn params() -> &'static CurveParams;

    fn order() -> &'static IBig {
        &Self::params().n
    }

    fn generator() -> Point<Self> {
        let params = Self::params();
        Point::from_coordinates(params.gx.clone(), params.gy.clone())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256k1;

impl Curve for Secp256k1 {
    fn params() -> &'static CurveParams {
        static PARAMS: OnceLock<CurveParams> = OnceLock::new();
        PARAMS.get_or_init(|| {
            CurveParams::new(
                "secp256k1",
                ibig!(_fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f base 16),
                ibig!(0),
                ibig!(7),
                ibig!(_fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141 base 16),
                ibig!(_79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798 base 16),
                ibig!(_483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8 base 16),
            )
        })
    }
}

#[cfg(feature = "secp256r1")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Secp256r1;

#[cfg(feature = "secp256r1")]
impl Curve for Secp256r1 {
    fn params() -> &'static CurveParams {
        static PARAMS: OnceLock<CurveParams> = OnceLock::new();
        PARAMS.get_or_init(|| {
            CurveParams::new(
                "secp256r1 (also known as NIST P-256)",
                ibig!(_ffffffff00000001000000000000000000000000ffffffffffffffffffffffff base 16),
                ibig!(_ffffffff00000001000000000000000000000000fffffffffffffffffffffffc base 16),
                ibig!(_5ac635d8aa3a93e7b3ebbd55769886bc651d06b0cc53b0f63bce3c3e27d2604b base 16),
                ibig!(_ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551 base 16),
                ibig!(_6b17d1f2e12c4247f8bce6e563a440f277037d812deb33a0f4a13945d898c296 base 16),
                ibig!(_4fe342e2fe1a7f9b8ee7eb4a7c0f9e162bce33576b315ececbb6406837bf51f5 base 16),
            )
        })
    }
}
