//! Minimal PKCS#7 / CMS types, enough to pull the certificates out of a
//! `SignedData` bundle (`.p7b`, `.p7c`).
//!
//! Fields the unwrapping does not need are kept as `AnyRef`, and the certificate set
//! is read as raw TLVs so that bundles whose `SET OF` is not in DER order still load.

// The `Sequence` derive generates single-use lifetimes.
#![allow(single_use_lifetimes)]

use der::asn1::{AnyRef, ObjectIdentifier};
use der::{Decode, Reader, Sequence};

pub use const_oid::db::rfc5911::ID_SIGNED_DATA;

use crate::error::BackendError;
use crate::pem_utils;

/// The `ContentInfo` type is defined in [RFC 5652 Section 3].
///
/// ```text
///   ContentInfo ::= SEQUENCE {
///       contentType        ContentType,
///       content            [0] EXPLICIT ANY DEFINED BY contentType }
/// ```
///
/// [RFC 5652 Section 3]: https://www.rfc-editor.org/rfc/rfc5652#section-3
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct ContentInfo<'a> {
    pub content_type: ObjectIdentifier,
    #[asn1(context_specific = "0", tag_mode = "EXPLICIT")]
    pub content: AnyRef<'a>,
}

/// The `SignedData` type is defined in [RFC 5652 Section 5.1].
///
/// ```text
///   SignedData ::= SEQUENCE {
///       version CMSVersion,
///       digestAlgorithms SET OF DigestAlgorithmIdentifier,
///       encapContentInfo EncapsulatedContentInfo,
///       certificates [0] IMPLICIT CertificateSet OPTIONAL,
///       crls [1] IMPLICIT RevocationInfoChoices OPTIONAL,
///       signerInfos SignerInfos }
/// ```
///
/// [RFC 5652 Section 5.1]: https://www.rfc-editor.org/rfc/rfc5652#section-5.1
#[derive(Clone, Debug, Eq, PartialEq, Sequence)]
pub struct SignedData<'a> {
    pub version: u8,
    pub digest_algorithms: AnyRef<'a>,
    pub encap_content_info: AnyRef<'a>,
    #[asn1(context_specific = "0", tag_mode = "IMPLICIT", optional = "true")]
    pub certificates: Option<EmbeddedCertificates<'a>>,
    #[asn1(context_specific = "1", tag_mode = "IMPLICIT", optional = "true")]
    pub crls: Option<AnyRef<'a>>,
    pub signer_infos: AnyRef<'a>,
}

/// DER encodings of the certificates in a `CertificateSet`, in bundle order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EmbeddedCertificates<'a>(pub Vec<&'a [u8]>);

impl<'a> der::DecodeValue<'a> for EmbeddedCertificates<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: der::Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            let mut certs = Vec::new();
            while !reader.is_finished() {
                certs.push(reader.tlv_bytes()?);
            }
            Ok(Self(certs))
        })
    }
}

impl der::EncodeValue for EmbeddedCertificates<'_> {
    fn value_len(&self) -> der::Result<der::Length> {
        self.0.iter().try_fold(der::Length::ZERO, |len, cert| {
            len + der::Length::try_from(cert.len())?
        })
    }

    fn encode_value(&self, writer: &mut impl der::Writer) -> der::Result<()> {
        for cert in &self.0 {
            writer.write(cert)?;
        }
        Ok(())
    }
}

impl der::FixedTag for EmbeddedCertificates<'_> {
    const TAG: der::Tag = der::Tag::Set;
}

/// Returns the DER encoding of every X.509 certificate embedded in a DER PKCS#7
/// `SignedData` bundle.
///
/// Non-certificate `CertificateChoices` (attribute certificates, other formats) are
/// skipped.
pub fn embedded_certificates(bundle: &[u8]) -> Result<Vec<&[u8]>, BackendError> {
    let content_info = ContentInfo::from_der(bundle).map_err(|_| BackendError::NotPkcs7)?;
    if content_info.content_type != ID_SIGNED_DATA {
        return Err(BackendError::NotPkcs7);
    }

    let signed_data: SignedData<'_> = content_info
        .content
        .decode_as()
        .map_err(|_| BackendError::NotPkcs7)?;

    let certs: Vec<&[u8]> = signed_data
        .certificates
        .map(|set| set.0)
        .unwrap_or_default()
        .into_iter()
        .filter(|der| der.first() == Some(&0x30))
        .collect();

    if certs.is_empty() {
        return Err(BackendError::NotPkcs7);
    }
    Ok(certs)
}

/// Unwraps a PKCS#7 bundle, DER or PEM-armoured, into concatenated
/// `CERTIFICATE` PEM blocks.
pub fn unwrap_to_pem(source: &[u8]) -> Result<Vec<u8>, BackendError> {
    let armoured = pem_utils::find_block(source, &["PKCS7", "CMS"]);
    let der = armoured.as_ref().map_or(source, |block| block.contents());

    let pem = embedded_certificates(der)?
        .into_iter()
        .map(|cert| pem_utils::der_to_pem(cert, pem_utils::CERTIFICATE_LABEL))
        .collect::<String>();

    Ok(pem.into_bytes())
}
