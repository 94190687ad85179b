pub mod aliases;
pub mod escape;

use indexmap::IndexMap;
use serde::Serialize;

pub use aliases::OidAlias;

/// Attribute key (short name such as `CN`, or a dotted OID) to value, in input order.
pub type AttributeMap = IndexMap<String, String>;

/// Attributes whose key is a known OID, re-keyed by alias.
pub type AliasMap = IndexMap<OidAlias, String>;

/// Key under which the alias map is exported. Never used for a parsed attribute.
pub const ALIASES_KEY: &str = "_aliases";

/// A distinguished name parsed from the one-line `/KEY=value/...` form.
///
/// # Fields
/// * `attributes` - Every attribute found, last occurrence of a key wins.
/// * `aliases` - The subset of `attributes` whose key is in the OID alias table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DistinguishedName {
    #[serde(flatten)]
    pub attributes: AttributeMap,
    #[serde(rename = "_aliases")]
    pub aliases: AliasMap,
}

impl DistinguishedName {
    /// Returns the value of an attribute by its key, e.g. `"CN"` or `"1.2.643.100.1"`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns the normalized value stored under an OID alias.
    pub fn alias(&self, alias: OidAlias) -> Option<&str> {
        self.aliases.get(&alias).map(String::as_str)
    }

    pub fn common_name(&self) -> Option<&str> {
        self.get("CN")
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());

        if let Some(alias) = OidAlias::from_oid(key) {
            self.aliases.insert(alias, alias.normalize(value));
        }
    }
}

/// Parses a one-line distinguished name such as
/// `subject= /C=RU/CN=Alice/1.2.643.3.131.1.1=007712345678`.
///
/// The parser never fails: segments without `=` and the leading `subject=` /
/// `issuer=` marker are skipped, and `None` or an empty string yield an empty name.
///
/// # Example
/// ```
/// use certinspect::name::{parse_dn, OidAlias};
///
/// let dn = parse_dn(Some("subject=/CN=Alice/1.2.643.3.131.1.1=007712345678"));
/// assert_eq!(dn.common_name(), Some("Alice"));
/// assert_eq!(dn.get("1.2.643.3.131.1.1"), Some("007712345678"));
/// assert_eq!(dn.alias(OidAlias::Inn), Some("7712345678"));
/// ```
pub fn parse_dn(raw: Option<&str>) -> DistinguishedName {
    #[cfg(test)]
    tests::PARSE_CALLS.with(|calls| calls.set(calls.get() + 1));

    let mut dn = DistinguishedName::default();
    let Some(raw) = raw else {
        return dn;
    };

    // Escapes may encode `/` or `=`, so they are resolved before splitting.
    let decoded = escape::unescape(raw);

    for segment in decoded.split('/') {
        let Some((key, value)) = segment.split_once('=') else {
            continue;
        };
        let value = value.trim();

        if (key == "subject" || key == "issuer") && value.is_empty() {
            continue;
        }
        if key == ALIASES_KEY {
            tracing::debug!("skipping DN attribute using the reserved alias key");
            continue;
        }

        dn.insert(key, value);
    }

    dn
}
