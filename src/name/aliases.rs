use serde::Serialize;

/// Short semantic names for the registration-number OIDs found in Russian
/// qualified certificates, plus two X.520 attributes without an OpenSSL short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OidAlias {
    /// Primary state registration number of a legal entity.
    #[serde(rename = "OGRN")]
    Ogrn,
    /// Taxpayer identification number.
    #[serde(rename = "INN")]
    Inn,
    /// Individual insurance account number.
    #[serde(rename = "SNILS")]
    Snils,
    /// Primary state registration number of an individual entrepreneur.
    #[serde(rename = "OGRNIP")]
    Ogrnip,
    #[serde(rename = "RNS_FSS")]
    RnsFss,
    #[serde(rename = "KP_FSS")]
    KpFss,
    #[serde(rename = "PSEUDONYM")]
    Pseudonym,
    #[serde(rename = "POST_ADDRESS")]
    PostAddress,
}

/// Dotted OID to alias.
pub static OID_ALIASES: [(&str, OidAlias); 8] = [
    ("1.2.643.100.1", OidAlias::Ogrn),
    ("1.2.643.3.131.1.1", OidAlias::Inn),
    ("1.2.643.100.3", OidAlias::Snils),
    ("1.2.643.100.5", OidAlias::Ogrnip),
    ("1.2.643.3.141.1.1", OidAlias::RnsFss),
    ("1.2.643.3.141.1.2", OidAlias::KpFss),
    ("2.5.4.65", OidAlias::Pseudonym),
    ("2.5.4.16", OidAlias::PostAddress),
];

impl OidAlias {
    /// Looks up the alias registered for a dotted OID attribute key.
    pub fn from_oid(oid: &str) -> Option<Self> {
        OID_ALIASES
            .iter()
            .find(|(candidate, _)| *candidate == oid)
            .map(|(_, alias)| *alias)
    }

    /// The dotted OID this alias stands for.
    pub fn oid(self) -> &'static str {
        OID_ALIASES
            .iter()
            .find(|(_, alias)| *alias == self)
            .map(|(oid, _)| *oid)
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OidAlias::Ogrn => "OGRN",
            OidAlias::Inn => "INN",
            OidAlias::Snils => "SNILS",
            OidAlias::Ogrnip => "OGRNIP",
            OidAlias::RnsFss => "RNS_FSS",
            OidAlias::KpFss => "KP_FSS",
            OidAlias::Pseudonym => "PSEUDONYM",
            OidAlias::PostAddress => "POST_ADDRESS",
        }
    }

    /// Normalizes an attribute value before it is stored under this alias.
    ///
    /// INN values are zero-padded in certificates; the alias keeps the bare number.
    pub fn normalize(self, value: &str) -> String {
        match self {
            OidAlias::Inn => value.trim_start_matches('0').to_string(),
            _ => value.to_string(),
        }
    }
}

impl std::fmt::Display for OidAlias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_round_trips() {
        for (oid, alias) in OID_ALIASES.iter() {
            assert_eq!(OidAlias::from_oid(oid), Some(*alias));
            assert_eq!(alias.oid(), *oid);
        }
    }

    #[test]
    fn unknown_oid_has_no_alias() {
        assert_eq!(OidAlias::from_oid("2.5.4.3"), None);
        assert_eq!(OidAlias::from_oid("CN"), None);
        assert_eq!(OidAlias::from_oid(""), None);
    }

    #[test]
    fn only_inn_strips_leading_zeros() {
        assert_eq!(OidAlias::Inn.normalize("007712345678"), "7712345678");
        assert_eq!(OidAlias::Inn.normalize("000"), "");
        assert_eq!(OidAlias::Ogrn.normalize("0027700132195"), "0027700132195");
        assert_eq!(OidAlias::Snils.normalize("012"), "012");
    }

    #[test]
    fn serializes_as_short_name() {
        for (_, alias) in OID_ALIASES.iter() {
            let json = serde_json::to_string(alias).unwrap();
            assert_eq!(json, format!("\"{}\"", alias.as_str()));
        }
    }
}
