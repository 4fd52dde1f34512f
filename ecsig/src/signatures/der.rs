/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 * https://www.rfc-editor.org/rfc/rfc3279#page-7
 * https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki#low-s-values-in-signatures
 *
 */

use std::marker::PhantomData;

use ibig::{ibig, IBig};
use log::debug;

use crate::ellipticcurve::{math, Curve};
use crate::error::DerError;
use crate::utils::bytes;
use crate::Result;

const SEQUENCE: u8 = 0x30;
const INTEGER: u8 = 0x02;

/// An ECDSA `(r, s)` pair in its DER form
/// `0x30 len 0x02 len(r) r 0x02 len(s) s`.
///
/// `s` is always the low value: constructing or reading a signature with
/// `s > n/2` stores `n - s` instead. `new` reduces `s` modulo `n` first,
/// `read` rejects integers that are not below `n`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerSignature<C: Curve> {
    r: IBig,
    s: IBig,
    curve: PhantomData<C>,
}

impl<C: Curve> DerSignature<C> {
    pub fn new(r: IBig, s: IBig) -> Self {
        let n = C::order();
        let s = math::rem_euclid(&s, n);
        let s = if s > n / ibig!(2) { n - s } else { s };
        Self {
            r,
            s,
            curve: PhantomData,
        }
    }

    pub fn r(&self) -> &IBig {
        &self.r
    }

    pub fn s(&self) -> &IBig {
        &self.s
    }

    /// Parses one signature from the start of `buf` and returns it together
    /// with the number of bytes it occupied. Anything after that, like a
    /// sighash flag, is left to the caller.
    pub fn read(buf: &[u8]) -> Result<(Self, usize)> {
        let mut consumed = 0;
        let len = read_header(buf, &mut consumed, SEQUENCE)?;
        if buf.len() < consumed + len {
            return Err(DerError::Truncated.into());
        }

        let content = &buf[consumed..consumed + len];
        let mut inner = 0;
        let r = read_integer(content, &mut inner)?;
        let s = read_integer(content, &mut inner)?;
        if inner != len {
            return Err(DerError::LengthMismatch {
                declared: len,
                actual: inner,
            }
            .into());
        }
        if &r >= C::order() || &s >= C::order() {
            return Err(DerError::IntegerOutOfRange.into());
        }
        consumed += len;

        Ok((Self::new(r, s), consumed))
    }

    /// Like [`DerSignature::read`], but `buf` must hold exactly one signature.
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        let (signature, consumed) = Self::read(buf)?;
        if consumed != buf.len() {
            debug!("DER signature followed by {} bytes", buf.len() - consumed);
            return Err(DerError::TrailingBytes(buf.len() - consumed).into());
        }
        Ok(signature)
    }

    pub fn write(&self) -> Result<Vec<u8>> {
        let r = encode_integer(&self.r)?;
        let s = encode_integer(&self.s)?;

        let len = r.len() + s.len() + 4;
        if len > 0x7f {
            return Err(DerError::TooLong.into());
        }

        let mut der = Vec::with_capacity(len + 2);
        der.push(SEQUENCE);
        der.push(len as u8);
        for int in [r, s] {
            der.push(INTEGER);
            der.push(int.len() as u8);
            der.extend_from_slice(&int);
        }
        Ok(der)
    }
}

fn read_header(buf: &[u8], consumed: &mut usize, tag: u8) -> std::result::Result<usize, DerError> {
    let (found, len) = match buf.get(*consumed..*consumed + 2) {
        Some(&[found, len]) => (found, len),
        _ => return Err(DerError::Truncated),
    };
    if found != tag {
        return Err(DerError::UnexpectedTag {
            expected: tag,
            found,
        });
    }
    if len & 0x80 != 0 {
        return Err(DerError::LongFormLength);
    }
    *consumed += 2;
    Ok(len as usize)
}

fn read_integer(buf: &[u8], consumed: &mut usize) -> std::result::Result<IBig, DerError> {
    let len = read_header(buf, consumed, INTEGER)?;
    let int = buf
        .get(*consumed..*consumed + len)
        .ok_or(DerError::Truncated)?;

    match int {
        [] => return Err(DerError::EmptyInteger),
        [first, ..] if first & 0x80 != 0 => return Err(DerError::NegativeInteger),
        [0x00, second, ..] if second & 0x80 == 0 => return Err(DerError::NonMinimalInteger),
        _ => {}
    }

    *consumed += len;
    Ok(bytes::to_ibig_be(int))
}

fn encode_integer(num: &IBig) -> Result<Vec<u8>> {
    let mut int = bytes::ibig_to_minimal_be(num)?;
    if int[0] & 0x80 != 0 {
        int.insert(0, 0x00);
    }
    Ok(int)
}
