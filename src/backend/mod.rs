//! Certificate decode backends.
//!
//! A backend turns certificate bytes in a given [`Format`] into the five textual
//! fields the rest of the crate interprets, and unwraps PKCS#7 bundles into PEM.
//! [`NativeBackend`] does both in pure Rust.

pub mod native;
pub mod pkcs7;
pub mod render;

use crate::error::BackendError;

pub use native::{FingerprintDigest, NativeBackend};

/// Encodings a backend is asked to decode a single certificate from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Base64 text between `-----BEGIN CERTIFICATE-----` markers.
    Pem,
    /// Binary ASN.1 DER.
    Der,
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Pem => f.write_str("PEM"),
            Format::Der => f.write_str("DER"),
        }
    }
}

/// Raw text fields extracted from a certificate, laid out like
/// `openssl x509 -noout -subject -issuer -dates -hash -fingerprint` output.
///
/// # Fields
/// * `subject` - e.g. `subject= /C=RU/CN=Alice`.
/// * `issuer` - e.g. `issuer= /C=RU/CN=Test CA`.
/// * `dates` - `notBefore=...` and `notAfter=...` lines.
/// * `hash` - Eight hex digits of the subject name hash.
/// * `fingerprint` - e.g. `SHA1 Fingerprint=AA:BB:...`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedFields {
    pub subject: String,
    pub issuer: String,
    pub dates: String,
    pub hash: String,
    pub fingerprint: String,
}

/// Decodes certificates on behalf of the decode chain.
///
/// Implementations must report input that is simply not in the requested format as
/// [`BackendError::Unrecognized`] (or [`BackendError::NotPkcs7`]) so the chain can try
/// the next format, and reserve [`BackendError::Extraction`] for inputs that were
/// recognized but could not be rendered.
pub trait DecodeBackend {
    /// Decodes `source` as one certificate in `format` and extracts its fields.
    fn decode(&self, source: &[u8], format: Format) -> Result<DecodedFields, BackendError>;

    /// Extracts the certificates embedded in a PKCS#7 bundle and returns them as PEM.
    fn unwrap_pkcs7(&self, source: &[u8]) -> Result<Vec<u8>, BackendError>;
}

impl<B: DecodeBackend + ?Sized> DecodeBackend for &B {
    fn decode(&self, source: &[u8], format: Format) -> Result<DecodedFields, BackendError> {
        (**self).decode(source, format)
    }

    fn unwrap_pkcs7(&self, source: &[u8]) -> Result<Vec<u8>, BackendError> {
        (**self).unwrap_pkcs7(source)
    }
}
