//! # CertInspect - X.509 Certificate Inspection in Pure Rust
//!
//! CertInspect loads an X.509 certificate from an arbitrary byte blob, works out how
//! it is encoded and exposes its subject, issuer, validity window, subject-name hash
//! and fingerprint. It is built on rustcrypto libraries; `openssl` is only used by the
//! test suite to cross-check the results.
//!
//! ## Supported Input Formats
//!
//! Formats are tried in this order, and the first one that decodes wins:
//! - **PEM**: the first `CERTIFICATE` block in the input, surrounding text ignored
//! - **DER**: the whole input as a binary certificate
//! - **PKCS#7**: a `.p7b`/`.p7c` bundle, DER or PEM-armoured; its first certificate is
//!   used. A bundle is unwrapped at most once.
//!
//! ## Key Features
//!
//! - **Pure Rust**: no native libraries at runtime
//! - **OpenSSL-compatible output**: one-line names, `notBefore`/`notAfter` dates,
//!   `openssl x509 -hash` and `-fingerprint` values
//! - **Russian registration OIDs**: INN, OGRN, SNILS and friends exposed under aliases
//! - **Lazy views**: every field is parsed on first access, then cached
//! - **Serializable summary**: one `serde` record with every view
//!
//! ## Quick Start
//!
//! ### Loading a Certificate
//!
//! ```rust,no_run
//! use certinspect::{cert::Certificate, name::OidAlias};
//!
//! # fn main() -> Result<(), certinspect::error::DecodeError> {
//! let cert = Certificate::from_file("bundle.p7b")?;
//!
//! println!("Encoding: {:?}", cert.encoding());
//! println!("Subject CN: {:?}", cert.subject().common_name());
//! println!("INN: {:?}", cert.subject().alias(OidAlias::Inn));
//! println!("Hash: {}", cert.hash());
//! println!("{}", cert.fingerprint());
//! println!("Valid now: {}", cert.is_valid());
//! # Ok(())
//! # }
//! ```
//!
//! ### Configuring the Decoder
//!
//! ```rust,no_run
//! use certinspect::{
//!     backend::{FingerprintDigest, NativeBackend},
//!     cert::{Certificate, params::CertificateOptions},
//!     validity::UnknownKeyPolicy,
//! };
//!
//! # fn main() -> Result<(), certinspect::error::DecodeError> {
//! let backend = NativeBackend::builder()
//!     .fingerprint_digest(FingerprintDigest::Sha256)
//!     .build();
//!
//! let options = CertificateOptions::builder()
//!     .unknown_date_keys(UnknownKeyPolicy::Ignore)
//!     .unwrap_pkcs7(false)
//!     .build();
//!
//! let bytes = std::fs::read("server.der")?;
//! let cert = Certificate::from_bytes_with(&backend, &bytes, options)?;
//! println!("{}", cert.fingerprint());
//! # Ok(())
//! # }
//! ```
//!
//! ### Parsing Backend Output Directly
//!
//! ```rust
//! use certinspect::name::{parse_dn, OidAlias};
//! use certinspect::validity::parse_dates;
//!
//! let dn = parse_dn(Some("subject= /C=RU/CN=\\xD0\\x98\\xD0\\xB2\\xD0\\xB0\\xD0\\xBD/1.2.643.100.3=12345678901"));
//! assert_eq!(dn.common_name(), Some("Иван"));
//! assert_eq!(dn.alias(OidAlias::Snils), Some("12345678901"));
//!
//! let dates = parse_dates(Some("notBefore=Jan  1 00:00:00 2020 GMT\nnotAfter=Jan  1 00:00:00 2030 GMT")).unwrap();
//! assert_eq!(dates.not_after(), Some("Jan  1 00:00:00 2030 GMT"));
//! ```
//!
//! ## Error Handling
//!
//! Loading either yields a complete certificate or an error; there is no partially
//! loaded state.
//!
//! ```rust
//! use certinspect::{cert::Certificate, error::DecodeError};
//!
//! match Certificate::from_bytes(b"not a certificate") {
//!     Ok(cert) => println!("Loaded {}", cert.hash()),
//!     Err(DecodeError::UnrecognizedFormat) => println!("Not PEM, DER or PKCS#7"),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`cert`]: The certificate record and its options
//! - [`decode`]: Format detection and the PKCS#7 fallback
//! - [`backend`]: Backend trait and the native `x509-cert` implementation
//! - [`name`]: One-line distinguished name parsing and OID aliases
//! - [`validity`]: Date parsing and the validity check
//! - [`error`]: Error types
//! - [`pem_utils`]: PEM helpers

pub mod backend;
pub mod cert;
pub mod decode;
pub mod error;
pub mod name;
pub mod pem_utils;
pub mod validity;
