//! use certinspect::error::DecodeError;

use thiserror::Error;

use crate::backend::Format;

/// Errors returned while turning an input blob into a [`crate::cert::Certificate`].
///
/// A failed decode never produces a partially loaded certificate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The input is neither a PEM nor a DER certificate, nor a PKCS#7 bundle holding one.
    #[error("Unrecognized certificate format: not PEM, DER or PKCS#7")]
    UnrecognizedFormat,

    /// The format was recognized but extracting the certificate fields failed.
    #[error("Certificate backend failure: {0}")]
    BackendFailure(String),

    /// The certificate file could not be read.
    #[error("Failed to read certificate: {0}")]
    Io(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io(err.to_string())
    }
}

/// Errors reported by a [`crate::backend::DecodeBackend`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The input is not encoded in the requested format.
    #[error("Input is not a {0} certificate")]
    Unrecognized(Format),

    /// The input is not a PKCS#7 bundle with embedded certificates.
    #[error("Input is not a PKCS#7 certificate bundle")]
    NotPkcs7,

    /// The certificate was decoded but one of its fields could not be rendered.
    #[error("Failed to extract certificate field: {0}")]
    Extraction(String),
}

impl From<der::Error> for BackendError {
    /// Converts a `der::Error` raised after detection into an extraction failure.
    fn from(err: der::Error) -> Self {
        BackendError::Extraction(err.to_string())
    }
}

impl From<time::error::Format> for BackendError {
    fn from(err: time::error::Format) -> Self {
        BackendError::Extraction(err.to_string())
    }
}

impl From<BackendError> for DecodeError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unrecognized(_) | BackendError::NotPkcs7 => {
                DecodeError::UnrecognizedFormat
            }
            BackendError::Extraction(reason) => DecodeError::BackendFailure(reason),
        }
    }
}
