/*
 * Copyright (c) 2023, Tobias Müller <git@tsmr.eu>
 *
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed encodings: point bytes, DER, fixed-width integers.
    Format,
    /// Values outside the mathematical domain, e.g. an x without a square root.
    Domain,
    /// Inversion or division by zero.
    Arithmetic,
    /// The nonce source could not produce a usable scalar.
    Nonce,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid point orientation byte {0:#04x}, expected 0x02 or 0x03")]
    InvalidOrientation(u8),
    #[error("invalid encoding length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("coordinate is not reduced modulo the field prime")]
    CoordinateOutOfRange,
    #[error("the identity point has no compressed encoding")]
    IdentityEncoding,
    #[error("malformed DER signature: {0}")]
    InvalidDer(#[from] DerError),
    #[error("cannot encode a negative integer")]
    NegativeInteger,
    #[error("integer does not fit into {0} bytes")]
    IntegerTooLarge(usize),
    #[error("x coordinate is not on the curve")]
    NotOnCurve,
    #[error("private key is outside [1, n-1]")]
    InvalidPrivateKey,
    #[error("public key is the identity or not on the curve")]
    InvalidPublicKey,
    #[error("division by zero in modular arithmetic")]
    DivisionByZero,
    #[error("no acceptable nonce after {0} attempts")]
    NonceExhausted(usize),
    #[error("random source failed: {0}")]
    RandomSource(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidOrientation(_)
            | Error::InvalidLength { .. }
            | Error::CoordinateOutOfRange
            | Error::IdentityEncoding
            | Error::InvalidDer(_)
            | Error::NegativeInteger
            | Error::IntegerTooLarge(_) => ErrorKind::Format,
            Error::NotOnCurve | Error::InvalidPrivateKey | Error::InvalidPublicKey => {
                ErrorKind::Domain
            }
            Error::DivisionByZero => ErrorKind::Arithmetic,
            Error::NonceExhausted(_) | Error::RandomSource(_) => ErrorKind::Nonce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerError {
    #[error("unexpected tag {found:#04x}, expected {expected:#04x}")]
    UnexpectedTag { expected: u8, found: u8 },
    #[error("buffer ends before the declared length")]
    Truncated,
    #[error("long-form lengths are not used by signatures")]
    LongFormLength,
    #[error("sequence declares {declared} bytes but contains {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("integer has no content bytes")]
    EmptyInteger,
    #[error("integer is negative")]
    NegativeInteger,
    #[error("integer is not minimally encoded")]
    NonMinimalInteger,
    #[error("integer is not below the group order")]
    IntegerOutOfRange,
    #[error("{0} trailing bytes after the signature")]
    TrailingBytes(usize),
    #[error("encoded integers are too long for a short-form length")]
    TooLong,
}

#[cfg(test)]
mod tests {
    use super::{DerError, Error, ErrorKind};

    #[test]
    fn test_kinds() {
        assert_eq!(Error::InvalidOrientation(0x04).kind(), ErrorKind::Format);
        assert_eq!(Error::InvalidDer(DerError::Truncated).kind(), ErrorKind::Format);
        assert_eq!(Error::NotOnCurve.kind(), ErrorKind::Domain);
        assert_eq!(Error::DivisionByZero.kind(), ErrorKind::Arithmetic);
        assert_eq!(Error::NonceExhausted(3).kind(), ErrorKind::Nonce);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidOrientation(0x04).to_string(),
            "invalid point orientation byte 0x04, expected 0x02 or 0x03"
        );
        let err: Error = DerError::UnexpectedTag { expected: 0x30, found: 0x31 }.into();
        assert_eq!(
            err.to_string(),
            "malformed DER signature: unexpected tag 0x31, expected 0x30"
        );
    }
}
