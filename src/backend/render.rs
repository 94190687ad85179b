//! Renders decoded certificate structures into the text layout of
//! `openssl x509 -noout` output.

use std::borrow::Cow;

use const_oid::ObjectIdentifier;
use der::asn1::{Any, SetOfVec};
use der::{Encode, Tag, Tagged};
use sha1::{Digest, Sha1};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::Name;

use crate::validity::{BACKEND_DATE_FORMAT, NOT_AFTER, NOT_BEFORE};

/// OpenSSL short names for the attributes commonly found in subject and issuer names.
/// Attributes not listed here are written as dotted OIDs.
static SHORT_NAMES: &[(ObjectIdentifier, &str)] = &[
    (ObjectIdentifier::new_unwrap("2.5.4.3"), "CN"),
    (ObjectIdentifier::new_unwrap("2.5.4.4"), "SN"),
    (ObjectIdentifier::new_unwrap("2.5.4.5"), "serialNumber"),
    (ObjectIdentifier::new_unwrap("2.5.4.6"), "C"),
    (ObjectIdentifier::new_unwrap("2.5.4.7"), "L"),
    (ObjectIdentifier::new_unwrap("2.5.4.8"), "ST"),
    (ObjectIdentifier::new_unwrap("2.5.4.9"), "street"),
    (ObjectIdentifier::new_unwrap("2.5.4.10"), "O"),
    (ObjectIdentifier::new_unwrap("2.5.4.11"), "OU"),
    (ObjectIdentifier::new_unwrap("2.5.4.12"), "title"),
    (ObjectIdentifier::new_unwrap("2.5.4.42"), "GN"),
    (ObjectIdentifier::new_unwrap("2.5.4.43"), "initials"),
    (ObjectIdentifier::new_unwrap("2.5.4.46"), "dnQualifier"),
    (ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.1"), "UID"),
    (ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.25"), "DC"),
    (ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1"), "emailAddress"),
];

/// Returns the OpenSSL short name of an attribute type, or its dotted form.
pub fn attribute_key(oid: &ObjectIdentifier) -> Cow<'static, str> {
    SHORT_NAMES
        .iter()
        .find(|(known, _)| known == oid)
        .map(|(_, name)| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(oid.to_string()))
}

/// Converts a directory string value to UTF-8 bytes.
///
/// BMPString is decoded from UTF-16BE and TeletexString is read as Latin-1, the way
/// OpenSSL converts them. Any other type contributes its raw content octets.
pub fn attribute_text(value: &Any) -> Cow<'_, [u8]> {
    let bytes = value.value();
    match value.tag() {
        Tag::BmpString => {
            let units = bytes
                .chunks(2)
                .map(|pair| u16::from_be_bytes([pair[0], *pair.get(1).unwrap_or(&0)]));
            let text: String = char::decode_utf16(units)
                .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                .collect();
            Cow::Owned(text.into_bytes())
        }
        Tag::TeletexString => {
            let text: String = bytes.iter().map(|b| char::from(*b)).collect();
            Cow::Owned(text.into_bytes())
        }
        _ => Cow::Borrowed(bytes),
    }
}

/// Writes `bytes` with everything outside printable ASCII escaped as `\xHH`.
fn push_escaped(out: &mut String, bytes: &[u8]) {
    for byte in bytes {
        if (b' '..=b'~').contains(byte) {
            out.push(char::from(*byte));
        } else {
            out.push_str(&format!("\\x{}", hex::encode_upper([*byte])));
        }
    }
}

/// Renders a name in the legacy one-line form, `/C=RU/O=Example/CN=Alice`.
pub fn oneline(name: &Name) -> String {
    let mut out = String::new();
    for rdn in name.0.iter() {
        for attr in rdn.0.iter() {
            out.push('/');
            out.push_str(&attribute_key(&attr.oid));
            out.push('=');
            push_escaped(&mut out, &attribute_text(&attr.value));
        }
    }
    out
}

/// `subject= /...` or `issuer= /...` line.
pub fn name_field(label: &str, name: &Name) -> String {
    format!("{label}= {}\n", oneline(name))
}

/// Formats an X.509 time as `MMM DD HH:MM:SS YYYY GMT`.
pub fn format_time(value: &x509_cert::time::Time) -> Result<String, time::error::Format> {
    let date = match value {
        x509_cert::time::Time::UtcTime(ut) => time::OffsetDateTime::from(ut.to_system_time()),
        x509_cert::time::Time::GeneralTime(gt) => {
            time::OffsetDateTime::from(gt.to_system_time())
        }
    };
    date.format(BACKEND_DATE_FORMAT)
}

/// `notBefore=...` and `notAfter=...` lines.
pub fn dates_field(validity: &x509_cert::time::Validity) -> Result<String, time::error::Format> {
    Ok(format!(
        "{NOT_BEFORE}={}\n{NOT_AFTER}={}\n",
        format_time(&validity.not_before)?,
        format_time(&validity.not_after)?
    ))
}

/// Value types OpenSSL canonicalizes before hashing a name.
fn is_canonical_string(tag: Tag) -> bool {
    matches!(
        tag,
        Tag::Utf8String
            | Tag::PrintableString
            | Tag::TeletexString
            | Tag::Ia5String
            | Tag::VisibleString
            | Tag::BmpString
    )
}

/// Trims, collapses internal whitespace runs to one space and lowercases ASCII.
fn canonical_text(bytes: &[u8]) -> Vec<u8> {
    bytes
        .split(|b| b.is_ascii_whitespace() || *b == 0x0b)
        .filter(|word| !word.is_empty())
        .map(<[u8]>::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join(&b' ')
}

/// Canonical encoding of a name: every RDN re-encoded as a DER `SET OF` with string
/// values converted to lowercased, whitespace-normalized UTF8String, the sets
/// concatenated without the outer `SEQUENCE` header.
pub fn canonical_name(name: &Name) -> der::Result<Vec<u8>> {
    let mut encoded = Vec::new();
    for rdn in name.0.iter() {
        let mut canonical = Vec::with_capacity(rdn.0.len());
        for attr in rdn.0.iter() {
            let value = if is_canonical_string(attr.value.tag()) {
                Any::new(
                    Tag::Utf8String,
                    canonical_text(&attribute_text(&attr.value)),
                )?
            } else {
                attr.value.clone()
            };
            canonical.push(AttributeTypeAndValue {
                oid: attr.oid,
                value,
            });
        }
        SetOfVec::try_from(canonical)?.encode_to_vec(&mut encoded)?;
    }
    Ok(encoded)
}

/// OpenSSL subject-name hash: the first four bytes of the SHA-1 of the canonical
/// name, read little-endian, as eight lowercase hex digits.
pub fn name_hash(name: &Name) -> der::Result<String> {
    let digest = Sha1::digest(canonical_name(name)?);
    let hash = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    Ok(format!("{hash:08x}\n"))
}

/// `<ALG> Fingerprint=AA:BB:...` line.
pub fn fingerprint_field(label: &str, digest: &[u8]) -> String {
    let pairs: Vec<String> = digest.iter().map(|b| hex::encode_upper([*b])).collect();
    format!("{label} Fingerprint={}\n", pairs.join(":"))
}
