//! Format detection: PEM, then DER, then one PKCS#7 unwrap.

use serde::Serialize;

use crate::backend::{DecodeBackend, DecodedFields, Format};
use crate::cert::params::CertificateOptions;
use crate::error::{BackendError, DecodeError};

/// How the certificate was found in the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Encoding {
    #[serde(rename = "PEM")]
    Pem,
    #[serde(rename = "DER")]
    Der,
    /// First certificate of a PKCS#7 bundle.
    #[serde(rename = "PKCS7")]
    Pkcs7Unwrapped,
}

impl From<Format> for Encoding {
    fn from(format: Format) -> Self {
        match format {
            Format::Pem => Encoding::Pem,
            Format::Der => Encoding::Der,
        }
    }
}

/// Whether the bytes being decoded already came out of a PKCS#7 unwrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
    Original,
    Unwrapped,
}

/// Text fields of a decoded certificate together with the encoding it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawCertificateFields {
    subject: String,
    issuer: String,
    dates: String,
    hash: String,
    fingerprint: String,
    encoding: Encoding,
}

impl RawCertificateFields {
    pub fn new(fields: DecodedFields, encoding: Encoding) -> Self {
        let DecodedFields {
            subject,
            issuer,
            dates,
            hash,
            fingerprint,
        } = fields;
        Self {
            subject,
            issuer,
            dates,
            hash,
            fingerprint,
            encoding,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn dates(&self) -> &str {
        &self.dates
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

/// Detects the encoding of `source` and extracts its fields with `backend`.
///
/// PEM is tried first, then DER. If neither matches and `options.unwrap_pkcs7` is
/// set, the input is unwrapped as a PKCS#7 bundle and the resulting PEM is decoded
/// once more; an unwrapped source is never unwrapped again.
pub fn decode<B: DecodeBackend + ?Sized>(
    backend: &B,
    source: &[u8],
    options: &CertificateOptions,
) -> Result<RawCertificateFields, DecodeError> {
    decode_source(backend, source, SourceState::Original, options)
}

fn decode_source<B: DecodeBackend + ?Sized>(
    backend: &B,
    source: &[u8],
    state: SourceState,
    options: &CertificateOptions,
) -> Result<RawCertificateFields, DecodeError> {
    for format in [Format::Pem, Format::Der] {
        match backend.decode(source, format) {
            Ok(fields) => {
                let encoding = match state {
                    SourceState::Original => Encoding::from(format),
                    SourceState::Unwrapped => Encoding::Pkcs7Unwrapped,
                };
                tracing::debug!(?encoding, "certificate decoded");
                return Ok(RawCertificateFields::new(fields, encoding));
            }
            Err(BackendError::Extraction(reason)) => {
                tracing::debug!(%format, %reason, "certificate field extraction failed");
                return Err(DecodeError::BackendFailure(reason));
            }
            Err(err) => tracing::debug!(%format, error = %err, "format rejected"),
        }
    }

    if state == SourceState::Unwrapped || !options.unwrap_pkcs7 {
        return Err(DecodeError::UnrecognizedFormat);
    }

    match backend.unwrap_pkcs7(source) {
        Ok(pem) => {
            tracing::debug!(len = pem.len(), "unwrapped PKCS#7 bundle");
            decode_source(backend, &pem, SourceState::Unwrapped, options)
        }
        Err(err) => {
            tracing::debug!(error = %err, "PKCS#7 unwrap failed");
            Err(err.into())
        }
    }
}
