/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use std::ops::Neg;

use ibig::{ibig, IBig};

use super::{Curve, FieldElement};
use crate::utils::bytes;
use crate::{Error, Result};

/// A point of the group `C`: the identity or an affine `(x, y)`.
///
/// Points returned by arithmetic or [`Point::decompress`] satisfy the curve
/// equation. [`Point::from_coordinates`] does not check it, see
/// [`Point::is_well_defined`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Point<C: Curve> {
    Identity,
    Affine {
        x: FieldElement<C>,
        y: FieldElement<C>,
    },
}

impl<C: Curve> Point<C> {
    pub fn identity() -> Self {
        Point::Identity
    }

    pub fn generator() -> Self {
        C::generator()
    }

    pub fn from_coordinates(x: IBig, y: IBig) -> Self {
        Point::Affine {
            x: FieldElement::new(x),
            y: FieldElement::new(y),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Point::Identity)
    }

    pub fn x(&self) -> Option<&FieldElement<C>> {
        match self {
            Point::Identity => None,
            Point::Affine { x, .. } => Some(x),
        }
    }

    pub fn y(&self) -> Option<&FieldElement<C>> {
        match self {
            Point::Identity => None,
            Point::Affine { y, .. } => Some(y),
        }
    }

    pub fn is_well_defined(&self) -> bool {
        match self {
            Point::Identity => true,
            Point::Affine { x, y } => C::params().contains(x.value(), y.value()),
        }
    }

    /// Fails with `Error::DivisionByZero` for a point with `y = 0`.
    pub fn double(&self) -> Result<Self> {
        let (x, y) = match self {
            Point::Identity => return Ok(Point::Identity),
            Point::Affine { x, y } => (x, y),
        };
        let a = FieldElement::<C>::new(C::params().a.clone());

        let l = (x.square() * FieldElement::<C>::new(ibig!(3)) + a).div(&y.double())?;
        let new_x = l.square() - x.double();
        let new_y = &l * (x - &new_x) - y;

        Ok(Point::Affine { x: new_x, y: new_y })
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        let ((x1, y1), (x2, y2)) = match (self, other) {
            (Point::Identity, _) => return Ok(other.clone()),
            (_, Point::Identity) => return Ok(self.clone()),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                ((x1, y1), (x2, y2))
            }
        };

        if self == other {
            return self.double();
        }
        if x1 == x2 {
            return Ok(Point::Identity);
        }

        let l = (y2 - y1).div(&(x2 - x1))?;
        let new_x = l.square() - x1 - x2;
        let new_y = &l * (x1 - &new_x) - y1;

        Ok(Point::Affine { x: new_x, y: new_y })
    }

    /// Double-and-add. The scalar is not reduced modulo the group order, a
    /// negative scalar multiplies the negated point.
    pub fn multiply(&self, scalar: &IBig) -> Result<Self> {
        if self.is_identity() {
            return Ok(Point::Identity);
        }
        if *scalar < ibig!(0) {
            return (-self).multiply(&(ibig!(0) - scalar));
        }
        if *scalar == ibig!(0) {
            return Ok(Point::Identity);
        }
        if *scalar == ibig!(1) {
            return Ok(self.clone());
        }

        let half = self.double()?.multiply(&(scalar / ibig!(2)))?;
        if scalar % ibig!(2) == ibig!(1) {
            half.add(self)
        } else {
            Ok(half)
        }
    }

    /// `0x02 | x` for an even y, `0x03 | x` for an odd y.
    pub fn compress(&self) -> Result<Vec<u8>> {
        match self {
            Point::Identity => Err(Error::IdentityEncoding),
            Point::Affine { x, y } => {
                let x = x.to_be_bytes();
                let mut out = Vec::with_capacity(x.len() + 1);
                out.push(if y.is_odd() { 0x03 } else { 0x02 });
                out.extend_from_slice(&x);
                Ok(out)
            }
        }
    }

    pub fn decompress(buf: &[u8]) -> Result<Self> {
        let params = C::params();
        let expected = params.field_len + 1;

        let (&orientation, x_bytes) = buf.split_first().ok_or(Error::InvalidLength {
            expected,
            actual: 0,
        })?;
        let odd = match orientation {
            0x02 => false,
            0x03 => true,
            other => return Err(Error::InvalidOrientation(other)),
        };
        if buf.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: buf.len(),
            });
        }

        let x = bytes::to_ibig_be(x_bytes);
        if x >= params.p {
            return Err(Error::CoordinateOutOfRange);
        }
        let x = FieldElement::<C>::new(x);
        let a = FieldElement::<C>::new(params.a.clone());
        let b = FieldElement::<C>::new(params.b.clone());

        let mut y = (x.square() * &x + a * &x + b).sqrt()?;
        if y.is_odd() != odd {
            y = -y;
        }
        Ok(Point::Affine { x, y })
    }

    /// The compressed encoding of `private_key * G`.
    pub fn public_key(private_key: &IBig) -> Result<Vec<u8>> {
        Self::generator().multiply(private_key)?.compress()
    }
}

impl<'a, C: Curve> Neg for &'a Point<C> {
    type Output = Point<C>;
    fn neg(self) -> Point<C> {
        match self {
            Point::Identity => Point::Identity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: -y,
            },
        }
    }
}

impl<C: Curve> Neg for Point<C> {
    type Output = Point<C>;
    fn neg(self) -> Point<C> {
        -&self
    }
}
