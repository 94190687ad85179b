use bon::Builder;
use der::Decode;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use x509_cert::Certificate;

use super::{DecodeBackend, DecodedFields, Format, pkcs7, render};
use crate::error::BackendError;
use crate::pem_utils;

/// Digest used for the fingerprint field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FingerprintDigest {
    /// SHA-1, the `openssl x509 -fingerprint` default.
    #[default]
    Sha1,
    Sha256,
}

impl FingerprintDigest {
    /// Label written in front of `Fingerprint=`.
    pub fn label(self) -> &'static str {
        match self {
            FingerprintDigest::Sha1 => "SHA1",
            FingerprintDigest::Sha256 => "SHA256",
        }
    }

    pub fn digest(self, data: &[u8]) -> Vec<u8> {
        match self {
            FingerprintDigest::Sha1 => Sha1::digest(data).to_vec(),
            FingerprintDigest::Sha256 => Sha256::digest(data).to_vec(),
        }
    }
}

/// Pure Rust decode backend built on `x509-cert`.
///
/// # Example
/// ```
/// use certinspect::backend::{FingerprintDigest, NativeBackend};
///
/// let backend = NativeBackend::builder()
///     .fingerprint_digest(FingerprintDigest::Sha256)
///     .build();
/// assert_eq!(backend.fingerprint_digest, FingerprintDigest::Sha256);
/// ```
#[derive(Clone, Debug, Default, Builder)]
pub struct NativeBackend {
    #[builder(default)]
    pub fingerprint_digest: FingerprintDigest,
}

impl NativeBackend {
    /// Detection step: finds the certificate DER for `format`.
    fn certificate_der(source: &[u8], format: Format) -> Result<Vec<u8>, BackendError> {
        match format {
            Format::Pem => pem_utils::find_block(source, pem_utils::CERTIFICATE_LABELS)
                .map(|block| block.contents().to_vec())
                .ok_or(BackendError::Unrecognized(Format::Pem)),
            Format::Der => Ok(source.to_vec()),
        }
    }

    /// Extraction step: renders the five fields of an already decoded certificate.
    fn extract(&self, cert: &Certificate, der: &[u8]) -> Result<DecodedFields, BackendError> {
        let tbs = &cert.tbs_certificate;
        Ok(DecodedFields {
            subject: render::name_field("subject", &tbs.subject),
            issuer: render::name_field("issuer", &tbs.issuer),
            dates: render::dates_field(&tbs.validity)?,
            hash: render::name_hash(&tbs.subject)?,
            fingerprint: render::fingerprint_field(
                self.fingerprint_digest.label(),
                &self.fingerprint_digest.digest(der),
            ),
        })
    }
}

impl DecodeBackend for NativeBackend {
    fn decode(&self, source: &[u8], format: Format) -> Result<DecodedFields, BackendError> {
        let der = Self::certificate_der(source, format)?;
        let cert = Certificate::from_der(&der).map_err(|err| {
            tracing::trace!(%format, error = %err, "not a certificate");
            BackendError::Unrecognized(format)
        })?;

        self.extract(&cert, &der)
    }

    fn unwrap_pkcs7(&self, source: &[u8]) -> Result<Vec<u8>, BackendError> {
        pkcs7::unwrap_to_pem(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_unrecognized_in_both_formats() {
        let backend = NativeBackend::default();
        assert_eq!(
            backend.decode(b"hello", Format::Pem),
            Err(BackendError::Unrecognized(Format::Pem))
        );
        assert_eq!(
            backend.decode(b"hello", Format::Der),
            Err(BackendError::Unrecognized(Format::Der))
        );
        assert_eq!(backend.unwrap_pkcs7(b"hello"), Err(BackendError::NotPkcs7));
    }

    #[test]
    fn pem_block_with_invalid_contents_is_unrecognized() {
        let pem = pem_utils::der_to_pem(&[0x30, 0x03, 0x02, 0x01, 0x01], "CERTIFICATE");
        assert_eq!(
            NativeBackend::default().decode(pem.as_bytes(), Format::Pem),
            Err(BackendError::Unrecognized(Format::Pem))
        );
    }

    #[test]
    fn digest_labels_and_lengths() {
        assert_eq!(FingerprintDigest::Sha1.label(), "SHA1");
        assert_eq!(FingerprintDigest::Sha256.label(), "SHA256");
        assert_eq!(FingerprintDigest::Sha1.digest(b"abc").len(), 20);
        assert_eq!(FingerprintDigest::Sha256.digest(b"abc").len(), 32);
    }
}
