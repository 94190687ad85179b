pub mod params;

use std::path::Path;

use once_cell::sync::OnceCell;
use params::CertificateOptions;
use serde::Serialize;
use time::OffsetDateTime;

use crate::backend::{DecodeBackend, NativeBackend};
use crate::decode::{self, Encoding, RawCertificateFields};
use crate::error::DecodeError;
use crate::name::{DistinguishedName, parse_dn};
use crate::validity::{self, ValidityWindow, parse_dates};

pub type Result<T> = std::result::Result<T, DecodeError>;

/// A decoded X.509 certificate.
///
/// Holds the raw text fields produced by the decode chain and parses each view
/// (subject, issuer, dates, hash, fingerprint) on first access. Every view is
/// computed at most once per record, and the record can be shared across threads.
#[derive(Debug)]
pub struct Certificate {
    raw: RawCertificateFields,
    options: CertificateOptions,
    subject: OnceCell<DistinguishedName>,
    issuer: OnceCell<DistinguishedName>,
    dates: OnceCell<Option<ValidityWindow>>,
    hash: OnceCell<String>,
    fingerprint: OnceCell<String>,
}

/// Snapshot of every view of a [`Certificate`], ready for serialization.
///
/// Name fields serialize as flat attribute maps with the alias map under `_aliases`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSummary {
    pub encoding: Encoding,
    pub is_valid: bool,
    pub subject: DistinguishedName,
    pub issuer: DistinguishedName,
    pub dates: Option<ValidityWindow>,
    pub hash: String,
    pub fingerprint: String,
}

impl Certificate {
    /// Decodes a PEM, DER or PKCS#7 blob with the native backend and default options.
    ///
    /// # Example
    /// ```no_run
    /// use certinspect::cert::Certificate;
    ///
    /// # fn main() -> Result<(), certinspect::error::DecodeError> {
    /// let bytes = std::fs::read("server.pem")?;
    /// let cert = Certificate::from_bytes(&bytes)?;
    /// println!("{:?} valid={}", cert.subject().common_name(), cert.is_valid());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(&NativeBackend::default(), bytes, CertificateOptions::default())
    }

    /// Decodes `bytes` with a caller-supplied backend and options.
    pub fn from_bytes_with<B: DecodeBackend + ?Sized>(
        backend: &B,
        bytes: &[u8],
        options: CertificateOptions,
    ) -> Result<Self> {
        let raw = decode::decode(backend, bytes, &options)?;
        Ok(Self::from_raw(raw, options))
    }

    /// Reads and decodes a certificate file.
    ///
    /// # Errors
    /// [`DecodeError::Io`] when the file cannot be read, otherwise the errors of
    /// [`Certificate::from_bytes`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| {
            tracing::debug!(path = %path.display(), error = %err, "cannot read certificate");
            DecodeError::from(err)
        })?;
        Self::from_bytes(&bytes)
    }

    /// Wraps fields that were already decoded.
    pub fn from_raw(raw: RawCertificateFields, options: CertificateOptions) -> Self {
        Self {
            raw,
            options,
            subject: OnceCell::new(),
            issuer: OnceCell::new(),
            dates: OnceCell::new(),
            hash: OnceCell::new(),
            fingerprint: OnceCell::new(),
        }
    }

    pub fn subject(&self) -> &DistinguishedName {
        self.subject.get_or_init(|| parse_dn(Some(self.raw.subject())))
    }

    pub fn issuer(&self) -> &DistinguishedName {
        self.issuer.get_or_init(|| parse_dn(Some(self.raw.issuer())))
    }

    /// The `notBefore`/`notAfter` window.
    pub fn dates(&self) -> Option<&ValidityWindow> {
        self.dates
            .get_or_init(|| parse_dates(Some(self.raw.dates())))
            .as_ref()
    }

    /// OpenSSL-compatible subject-name hash, eight hex digits.
    pub fn hash(&self) -> &str {
        self.hash.get_or_init(|| self.raw.hash().trim().to_string())
    }

    /// Fingerprint line, e.g. `SHA1 Fingerprint=AA:BB:...`.
    pub fn fingerprint(&self) -> &str {
        self.fingerprint
            .get_or_init(|| self.raw.fingerprint().trim().to_string())
    }

    pub fn encoding(&self) -> Encoding {
        self.raw.encoding()
    }

    pub fn raw(&self) -> &RawCertificateFields {
        &self.raw
    }

    pub fn options(&self) -> &CertificateOptions {
        &self.options
    }

    /// Whether the current time lies inside the certificate's validity window.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(OffsetDateTime::now_utc())
    }

    /// Whether `now` lies inside the certificate's validity window, bounds included.
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        validity::is_valid_at(self.dates(), now, self.options.unknown_date_keys)
    }

    /// Collects every view into one serializable record.
    pub fn summary(&self) -> CertificateSummary {
        CertificateSummary {
            encoding: self.encoding(),
            is_valid: self.is_valid(),
            subject: self.subject().clone(),
            issuer: self.issuer().clone(),
            dates: self.dates().cloned(),
            hash: self.hash().to_string(),
            fingerprint: self.fingerprint().to_string(),
        }
    }
}
