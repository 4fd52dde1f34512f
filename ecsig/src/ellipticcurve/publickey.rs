/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use super::{Curve, Point};
use crate::{Error, Result};

/// A non-identity point on the curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey<C: Curve> {
    point: Point<C>,
}

impl<C: Curve> PublicKey<C> {
    pub fn new(point: Point<C>) -> Result<Self> {
        if point.is_identity() || !point.is_well_defined() {
            return Err(Error::InvalidPublicKey);
        }
        Ok(Self { point })
    }

    pub fn from_compressed(buf: &[u8]) -> Result<Self> {
        Self::new(Point::decompress(buf)?)
    }

    pub fn to_compressed(&self) -> Result<Vec<u8>> {
        self.point.compress()
    }

    pub fn point(&self) -> &Point<C> {
        &self.point
    }
}

impl<C: Curve> TryFrom<&[u8]> for PublicKey<C> {
    type Error = Error;

    fn try_from(buf: &[u8]) -> Result<Self> {
        Self::from_compressed(buf)
    }
}
