use indexmap::IndexMap;
use serde::Serialize;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

pub const NOT_BEFORE: &str = "notBefore";
pub const NOT_AFTER: &str = "notAfter";

/// Date layout written by the decode backend, e.g. `Jan  1 00:00:00 2020 GMT`.
/// The day is space-padded to two columns.
pub const BACKEND_DATE_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:space] [hour]:[minute]:[second] [year] GMT"
);

// Parsing runs on whitespace-collapsed input, so the day is matched unpadded.
const PARSE_DATE_FORMAT: &[FormatItem<'static>] = format_description!(
    "[month repr:short] [day padding:none] [hour]:[minute]:[second] [year] GMT"
);

/// What the validity check does with a date entry other than `notBefore`/`notAfter`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownKeyPolicy {
    /// Treat the certificate as invalid.
    #[default]
    Reject,
    /// Skip the entry.
    Ignore,
}

/// The `notBefore`/`notAfter` block of a certificate as raw date strings.
///
/// Entries are kept in input order, including keys the validity check does not
/// recognize; see [`UnknownKeyPolicy`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidityWindow {
    entries: IndexMap<String, String>,
}

impl ValidityWindow {
    pub fn not_before(&self) -> Option<&str> {
        self.get(NOT_BEFORE)
    }

    pub fn not_after(&self) -> Option<&str> {
        self.get(NOT_AFTER)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValidityWindow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Splits a `key=value` per line block into a [`ValidityWindow`].
///
/// Lines without `=` are skipped and values are trimmed. Unknown keys are kept.
///
/// # Example
/// ```
/// use certinspect::validity::parse_dates;
///
/// let window = parse_dates(Some(
///     "notBefore=Jan 1 00:00:00 2020 GMT\nnotAfter=Jan 1 00:00:00 2030 GMT",
/// ))
/// .unwrap();
/// assert_eq!(window.not_before(), Some("Jan 1 00:00:00 2020 GMT"));
/// assert_eq!(window.not_after(), Some("Jan 1 00:00:00 2030 GMT"));
/// ```
pub fn parse_dates(raw: Option<&str>) -> Option<ValidityWindow> {
    let raw = raw?;
    let window = raw
        .split('\n')
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key, value.trim()))
        .collect();
    Some(window)
}

/// Parses a backend date string such as `Dec 31 23:59:59 2099 GMT` as UTC.
pub fn parse_backend_date(value: &str) -> Result<OffsetDateTime, time::error::Parse> {
    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    PrimitiveDateTime::parse(&normalized, PARSE_DATE_FORMAT).map(PrimitiveDateTime::assume_utc)
}

/// Checks the window against the current wall-clock time, rejecting unknown keys.
pub fn is_valid(window: Option<&ValidityWindow>) -> bool {
    is_valid_at(window, OffsetDateTime::now_utc(), UnknownKeyPolicy::Reject)
}

/// Checks whether `now` falls inside the window.
///
/// Returns `false` when the window is absent, when either bound is missing or cannot
/// be parsed, when `now` is before `notBefore` or after `notAfter`, and, under
/// [`UnknownKeyPolicy::Reject`], when any other key is present.
pub fn is_valid_at(
    window: Option<&ValidityWindow>,
    now: OffsetDateTime,
    policy: UnknownKeyPolicy,
) -> bool {
    let Some(window) = window else {
        return false;
    };

    let mut seen_not_before = false;
    let mut seen_not_after = false;

    for (key, value) in window.entries() {
        match key {
            NOT_BEFORE => {
                let Some(not_before) = parse_bound(key, value) else {
                    return false;
                };
                if now < not_before {
                    return false;
                }
                seen_not_before = true;
            }
            NOT_AFTER => {
                let Some(not_after) = parse_bound(key, value) else {
                    return false;
                };
                if now > not_after {
                    return false;
                }
                seen_not_after = true;
            }
            _ => match policy {
                UnknownKeyPolicy::Reject => {
                    tracing::debug!(key, "unknown key in validity window");
                    return false;
                }
                UnknownKeyPolicy::Ignore => {}
            },
        }
    }

    seen_not_before && seen_not_after
}

fn parse_bound(key: &str, value: &str) -> Option<OffsetDateTime> {
    match parse_backend_date(value) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(key, value, error = %err, "unparseable validity date");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    const NOW: OffsetDateTime = datetime!(2025-06-15 12:00:00 UTC);

    fn window(entries: &[(&str, &str)]) -> ValidityWindow {
        entries.iter().copied().collect()
    }

    #[test]
    fn parses_two_line_block() {
        let parsed = parse_dates(Some(
            "notBefore=Jan 1 00:00:00 2020 GMT\nnotAfter=Jan 1 00:00:00 2030 GMT",
        ))
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.not_before(), Some("Jan 1 00:00:00 2020 GMT"));
        assert_eq!(parsed.not_after(), Some("Jan 1 00:00:00 2030 GMT"));
    }

    #[test]
    fn absent_block_is_none() {
        assert_eq!(parse_dates(None), None);
        assert!(parse_dates(Some("")).unwrap().is_empty());
    }

    #[test]
    fn keeps_unknown_keys_and_skips_junk_lines() {
        let parsed = parse_dates(Some(
            "notBefore=Jan  1 00:00:00 2020 GMT\r\nnot a pair\nextra=x\n",
        ))
        .unwrap();

        let entries: Vec<_> = parsed.entries().collect();
        assert_eq!(
            entries,
            [("notBefore", "Jan  1 00:00:00 2020 GMT"), ("extra", "x")]
        );
    }

    #[test]
    fn parses_padded_and_unpadded_days() {
        let expected = datetime!(2020-01-01 00:00:00 UTC);
        assert_eq!(parse_backend_date("Jan  1 00:00:00 2020 GMT").unwrap(), expected);
        assert_eq!(parse_backend_date("Jan 1 00:00:00 2020 GMT").unwrap(), expected);
        assert_eq!(
            parse_backend_date("Dec 31 23:59:59 2099 GMT").unwrap(),
            datetime!(2099-12-31 23:59:59 UTC)
        );
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_backend_date("2020-01-01T00:00:00Z").is_err());
        assert!(parse_backend_date("Jan 1 00:00:00 2020").is_err());
        assert!(parse_backend_date("").is_err());
    }

    #[test]
    fn past_start_future_end_is_valid() {
        let w = window(&[
            (NOT_BEFORE, "Jan 1 00:00:00 2020 GMT"),
            (NOT_AFTER, "Jan 1 00:00:00 2030 GMT"),
        ]);
        assert!(is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Reject));
    }

    #[test]
    fn future_start_is_invalid() {
        let w = window(&[
            (NOT_BEFORE, "Jan 1 00:00:00 2029 GMT"),
            (NOT_AFTER, "Jan 1 00:00:00 2030 GMT"),
        ]);
        assert!(!is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Reject));
    }

    #[test]
    fn past_end_is_invalid() {
        let w = window(&[
            (NOT_BEFORE, "Jan 1 00:00:00 2020 GMT"),
            (NOT_AFTER, "Jan 1 00:00:00 2021 GMT"),
        ]);
        assert!(!is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Reject));
    }

    #[test]
    fn bounds_are_inclusive() {
        let w = window(&[
            (NOT_BEFORE, "Jun 15 12:00:00 2025 GMT"),
            (NOT_AFTER, "Jun 15 12:00:00 2025 GMT"),
        ]);
        assert!(is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Reject));
    }

    #[test]
    fn unknown_key_follows_policy() {
        let w = window(&[
            (NOT_BEFORE, "Jan 1 00:00:00 2020 GMT"),
            (NOT_AFTER, "Jan 1 00:00:00 2030 GMT"),
            ("extra", "x"),
        ]);
        assert!(!is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Reject));
        assert!(is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Ignore));
    }

    #[test]
    fn missing_bound_is_invalid() {
        let only_start = window(&[(NOT_BEFORE, "Jan 1 00:00:00 2020 GMT")]);
        let only_end = window(&[(NOT_AFTER, "Jan 1 00:00:00 2030 GMT")]);
        assert!(!is_valid_at(Some(&only_start), NOW, UnknownKeyPolicy::Reject));
        assert!(!is_valid_at(Some(&only_end), NOW, UnknownKeyPolicy::Reject));
        assert!(!is_valid_at(Some(&ValidityWindow::default()), NOW, UnknownKeyPolicy::Ignore));
    }

    #[test]
    fn unparseable_bound_is_invalid() {
        let w = window(&[
            (NOT_BEFORE, "yesterday"),
            (NOT_AFTER, "Jan 1 00:00:00 2030 GMT"),
        ]);
        assert!(!is_valid_at(Some(&w), NOW, UnknownKeyPolicy::Ignore));
    }

    #[test]
    fn absent_window_is_invalid() {
        assert!(!is_valid_at(None, NOW, UnknownKeyPolicy::Ignore));
        assert!(!is_valid(None));
    }

    #[test]
    fn wall_clock_check() {
        let w = window(&[
            (NOT_BEFORE, "Jan 1 00:00:00 2000 GMT"),
            (NOT_AFTER, "Dec 31 23:59:59 9999 GMT"),
        ]);
        assert!(is_valid(Some(&w)));
    }

    #[test]
    fn backend_format_round_trips() {
        let formatted = datetime!(2020-01-01 00:00:00 UTC)
            .format(BACKEND_DATE_FORMAT)
            .unwrap();
        assert_eq!(formatted, "Jan  1 00:00:00 2020 GMT");
        assert_eq!(
            parse_backend_date(&formatted).unwrap(),
            datetime!(2020-01-01 00:00:00 UTC)
        );
    }
}
