/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

use ibig::ops::UnsignedAbs;
use ibig::{ibig, IBig};

use super::math::{self, rem_euclid};
use super::Curve;
use crate::utils::bytes;
use crate::{Error, Result};

/// An element of the base field GF(p) of the curve `C`, always reduced to `[0, p)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldElement<C: Curve> {
    value: IBig,
    curve: PhantomData<C>,
}

impl<C: Curve> FieldElement<C> {
    pub fn new(value: IBig) -> Self {
        Self {
            value: rem_euclid(&value, Self::modulus()),
            curve: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::new(ibig!(0))
    }

    pub fn one() -> Self {
        Self::new(ibig!(1))
    }

    pub fn modulus() -> &'static IBig {
        &C::params().p
    }

    pub fn from_be_bytes(buf: &[u8]) -> Self {
        Self::new(bytes::to_ibig_be(buf))
    }

    /// Big-endian, zero padded to the field width.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let width = C::params().field_len;
        let raw = self.value.clone().unsigned_abs().to_be_bytes();
        let raw = bytes::strip_leading_zeros(&raw);
        let mut out = vec![0; width - raw.len()];
        out.extend_from_slice(raw);
        out
    }

    pub fn value(&self) -> &IBig {
        &self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value == ibig!(0)
    }

    pub fn is_odd(&self) -> bool {
        &self.value % ibig!(2) == ibig!(1)
    }

    pub fn square(&self) -> Self {
        self * self
    }

    pub fn double(&self) -> Self {
        self + self
    }

    pub fn pow(&self, exp: &IBig) -> Self {
        Self::new(math::pow_mod(&self.value, exp, Self::modulus()))
    }

    pub fn inv(&self) -> Result<Self> {
        Ok(Self::new(math::inv(&self.value, Self::modulus())?))
    }

    pub fn div(&self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.inv()?)
    }

    /// A square root of the element, `Error::NotOnCurve` if it is a non-residue.
    pub fn sqrt(&self) -> Result<Self> {
        if self.is_zero() {
            return Ok(self.clone());
        }
        let p = Self::modulus();

        // Euler's criterion
        if self.pow(&((p - ibig!(1)) / ibig!(2))) != Self::one() {
            return Err(Error::NotOnCurve);
        }

        if rem_euclid(p, &ibig!(4)) == ibig!(3) {
            return Ok(self.pow(&((p + ibig!(1)) / ibig!(4))));
        }
        Ok(self.tonelli_shanks())
    }

    // Only called for quadratic residues with p = 1 mod 4.
    fn tonelli_shanks(&self) -> Self {
        let p = Self::modulus();
        let minus_one = -Self::one();

        let mut q = p - ibig!(1);
        let mut s = 0usize;
        while &q % ibig!(2) == ibig!(0) {
            q = q / ibig!(2);
            s += 1;
        }

        let euler = (p - ibig!(1)) / ibig!(2);
        let mut z = Self::new(ibig!(2));
        while z.pow(&euler) != minus_one {
            z = z + Self::one();
        }

        let mut m = s;
        let mut c = z.pow(&q);
        let mut t = self.pow(&q);
        let mut r = self.pow(&((&q + ibig!(1)) / ibig!(2)));

        while t != Self::one() {
            let mut i = 1;
            let mut t2 = t.square();
            while t2 != Self::one() {
                t2 = t2.square();
                i += 1;
            }
            let b = c.pow(&(ibig!(1) << (m - i - 1)));
            m = i;
            c = b.square();
            t = t * c.clone();
            r = r * b;
        }
        r
    }
}

macro_rules! impl_field_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl<'a, 'b, C: Curve> $trait<&'b FieldElement<C>> for &'a FieldElement<C> {
            type Output = FieldElement<C>;
            fn $method(self, rhs: &'b FieldElement<C>) -> FieldElement<C> {
                FieldElement::new(&self.value $op &rhs.value)
            }
        }
        impl<'b, C: Curve> $trait<&'b FieldElement<C>> for FieldElement<C> {
            type Output = FieldElement<C>;
            fn $method(self, rhs: &'b FieldElement<C>) -> FieldElement<C> {
                FieldElement::new(self.value $op &rhs.value)
            }
        }
        impl<'a, C: Curve> $trait<FieldElement<C>> for &'a FieldElement<C> {
            type Output = FieldElement<C>;
            fn $method(self, rhs: FieldElement<C>) -> FieldElement<C> {
                FieldElement::new(&self.value $op rhs.value)
            }
        }
        impl<C: Curve> $trait<FieldElement<C>> for FieldElement<C> {
            type Output = FieldElement<C>;
            fn $method(self, rhs: FieldElement<C>) -> FieldElement<C> {
                FieldElement::new(self.value $op rhs.value)
            }
        }
    };
}

impl_field_op!(Add, add, +);
impl_field_op!(Sub, sub, -);
impl_field_op!(Mul, mul, *);

impl<'a, C: Curve> Neg for &'a FieldElement<C> {
    type Output = FieldElement<C>;
    fn neg(self) -> FieldElement<C> {
        FieldElement::new(FieldElement::<C>::modulus() - &self.value)
    }
}

impl<C: Curve> Neg for FieldElement<C> {
    type Output = FieldElement<C>;
    fn neg(self) -> FieldElement<C> {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::FieldElement;
    use crate::ellipticcurve::{Curve, CurveParams, Secp256k1};
    use crate::Error;
    use ibig::ibig;
    use std::sync::OnceLock;

    type Fe = FieldElement<Secp256k1>;

    // GF(17), 17 = 1 mod 16 takes the Tonelli-Shanks path
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Gf17;

    impl Curve for Gf17 {
        fn params() -> &'static CurveParams {
            static PARAMS: OnceLock<CurveParams> = OnceLock::new();
            PARAMS.get_or_init(|| {
                CurveParams::new("gf17", ibig!(17), ibig!(0), ibig!(7), ibig!(18), ibig!(1), ibig!(5))
            })
        }
    }

    #[test]
    fn test_arithmetic() {
        let a = Fe::new(ibig!(-1));
        assert_eq!(a.value(), &(Fe::modulus() - ibig!(1)));
        assert_eq!(&a + &Fe::one(), Fe::zero());
        assert_eq!(Fe::new(ibig!(3)) - Fe::new(ibig!(5)), -Fe::new(ibig!(2)));
        assert_eq!(-Fe::zero(), Fe::zero());
        assert_eq!(Fe::new(ibig!(6)).div(&Fe::new(ibig!(3))).unwrap(), Fe::new(ibig!(2)));
        assert_eq!(Fe::one().div(&Fe::zero()), Err(Error::DivisionByZero));
        let x = Fe::new(ibig!(1234567));
        assert_eq!(&x * &x.inv().unwrap(), Fe::one());
        assert!(Fe::new(ibig!(3)).is_odd());
        assert!(!a.is_odd());
    }

    #[test]
    fn test_bytes() {
        let x = Fe::new(ibig!(258));
        let buf = x.to_be_bytes();
        assert_eq!(buf.len(), 32);
        assert_eq!(&buf[30..], &[0x01, 0x02]);
        assert_eq!(Fe::from_be_bytes(&buf), x);
        assert_eq!(Fe::zero().to_be_bytes(), vec![0; 32]);
    }

    #[test]
    fn test_sqrt() {
        let x = Fe::new(ibig!(1234567));
        let root = x.square().sqrt().unwrap();
        assert!(root == x || root == -&x);
        assert_eq!(Fe::zero().sqrt().unwrap(), Fe::zero());
        // -1 is a non-residue when p = 3 mod 4
        assert_eq!((-Fe::one()).sqrt(), Err(Error::NotOnCurve));
    }

    #[test]
    fn test_sqrt_tonelli_shanks() {
        for v in 1..17u32 {
            let x = FieldElement::<Gf17>::new(ibig::IBig::from(v));
            let root = x.square().sqrt().unwrap();
            assert_eq!(root.square(), x.square());
        }
        // 3 is a non-residue mod 17
        assert_eq!(FieldElement::<Gf17>::new(ibig!(3)).sqrt(), Err(Error::NotOnCurve));
    }
}
