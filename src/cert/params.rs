use bon::Builder;

use crate::validity::UnknownKeyPolicy;

/// Options applied when loading a [`super::Certificate`].
///
/// # Fields
/// * `unknown_date_keys` - How keys other than `notBefore`/`notAfter` in the date
///   block affect the validity check. Rejected by default.
/// * `unwrap_pkcs7` - Whether input that is neither PEM nor DER is retried as a
///   PKCS#7 bundle. Enabled by default.
///
/// # Example
/// ```
/// use certinspect::cert::params::CertificateOptions;
/// use certinspect::validity::UnknownKeyPolicy;
///
/// let options = CertificateOptions::builder()
///     .unknown_date_keys(UnknownKeyPolicy::Ignore)
///     .build();
/// assert!(options.unwrap_pkcs7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Builder)]
pub struct CertificateOptions {
    #[builder(default)]
    pub unknown_date_keys: UnknownKeyPolicy,
    #[builder(default = true)]
    pub unwrap_pkcs7: bool,
}

impl Default for CertificateOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}
