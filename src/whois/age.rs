use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::whois::client::WhoisLookup;
use crate::whois::types::{WhoisRecord, WhoisResponse};

/// Field names registries use for the creation timestamp.
const CREATION_KEYS: &[&str] = &[
    "creation date",
    "created",
    "created on",
    "registered on",
    "registration time",
    "registration date",
    "domain registration date",
    "domain record activated",
    "registered",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d", "%Y%m%d",
];

/// Parses the date formats seen in the wild across registries.
pub fn parse_creation_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let two_tokens = tokens.iter().take(2).copied().collect::<Vec<_>>().join(" ");
    // "2001-01-01 00:00:00 UTC", "2001-01-01 (YYYY-MM-DD)"...
    [raw, two_tokens.as_str(), tokens.first().copied().unwrap_or(raw)]
        .into_iter()
        .find_map(parse_exact)
}

fn parse_exact(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.and_utc());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn record_creation_date(record: &WhoisRecord) -> Option<DateTime<Utc>> {
    CREATION_KEYS
        .iter()
        .filter_map(|key| record.get(key))
        .find_map(parse_creation_date)
}

/// Field names carrying the object a record describes.
const SUBJECT_KEYS: &[&str] = &["domain name", "domain"];

/// Whether `record` describes `domain` itself. Referral answers (a `refer`
/// line) and records naming another object, such as the TLD record the
/// root server returns, do not.
fn describes(record: &WhoisRecord, domain: &str) -> bool {
    if record.get("refer").is_some() {
        return false;
    }
    SUBJECT_KEYS
        .iter()
        .find_map(|key| record.get(key))
        .is_none_or(|subject| {
            subject
                .trim()
                .trim_end_matches('.')
                .eq_ignore_ascii_case(domain)
        })
}

/// First creation date found among the records describing `domain`, walking
/// them in the order servers were contacted.
pub fn creation_date(response: &WhoisResponse, domain: &str) -> Option<DateTime<Utc>> {
    let domain = domain.trim().trim_end_matches('.');
    response
        .records()
        .iter()
        .filter(|record| describes(record, domain))
        .find_map(record_creation_date)
}

/// Whole years between `created` and `now`, floored. A creation date in the
/// future yields 0.
pub fn elapsed_years(created: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let mut years = now.year() - created.year();
    if (now.month(), now.day()) < (created.month(), created.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Domain age in whole years. Lookup failures and unparseable answers read
/// as 0.
pub async fn domain_age_years<W>(whois: &W, domain: &str, now: DateTime<Utc>) -> u32
where
    W: WhoisLookup + ?Sized,
{
    match whois.lookup(domain).await {
        Ok(response) => match creation_date(&response, domain) {
            Some(created) => elapsed_years(created, now),
            None => {
                debug!(domain, "no creation date in WHOIS answer");
                0
            }
        },
        Err(err) => {
            debug!(domain, error = %err, "WHOIS lookup failed");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().expect("valid date")
    }

    #[test]
    fn parses_registry_date_shapes() {
        let expected = utc(1997, 9, 15);
        for raw in [
            "1997-09-15T04:00:00Z",
            "1997-09-15T04:00:00+0000",
            "1997-09-15T04:00:00.000Z",
            "1997-09-15 04:00:00",
            "1997-09-15 04:00:00 UTC",
            "1997-09-15",
            "15-Sep-1997",
            "1997.09.15",
            "15.09.1997",
            "1997/09/15",
            "1997-09-15 (YYYY-MM-DD)",
        ] {
            let parsed = parse_creation_date(raw).unwrap_or_else(|| panic!("{raw}"));
            assert_eq!(parsed.date_naive(), expected.date_naive(), "{raw}");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_creation_date(""), None);
        assert_eq!(parse_creation_date("before 1995"), None);
        assert_eq!(parse_creation_date("not a date"), None);
    }

    #[test]
    fn years_are_floored() {
        let created = utc(2020, 6, 15);
        assert_eq!(elapsed_years(created, utc(2020, 6, 14)), 0);
        assert_eq!(elapsed_years(created, utc(2021, 6, 14)), 0);
        assert_eq!(elapsed_years(created, utc(2021, 6, 15)), 1);
        assert_eq!(elapsed_years(created, utc(2026, 1, 1)), 5);
    }

    #[test]
    fn future_creation_is_zero() {
        assert_eq!(elapsed_years(utc(2030, 1, 1), utc(2026, 1, 1)), 0);
    }

    #[test]
    fn first_record_with_a_date_wins() {
        let response = WhoisResponse::Many(vec![
            WhoisRecord::new("whois.iana.org").with_field("refer", "whois.verisign-grs.com"),
            WhoisRecord::new("whois.verisign-grs.com")
                .with_field("Domain Name", "EXAMPLE.COM")
                .with_field("Creation Date", "1995-08-14T04:00:00Z"),
            WhoisRecord::new("whois.registrar.test").with_field("Created", "2001-01-01"),
        ]);
        assert_eq!(
            creation_date(&response, "example.com").map(|d| d.year()),
            Some(1995)
        );
    }

    #[test]
    fn tld_record_from_the_root_is_not_the_domain() {
        let response = WhoisResponse::Many(vec![
            WhoisRecord::new("whois.iana.org")
                .with_field("refer", "whois.verisign-grs.com")
                .with_field("domain", "COM")
                .with_field("created", "1985-01-01"),
            WhoisRecord::new("whois.verisign-grs.com")
                .with_field("Domain Name", "FRESH.COM")
                .with_field("Creation Date", "2024-03-01T00:00:00Z"),
        ]);
        assert_eq!(
            creation_date(&response, "fresh.com").map(|d| d.year()),
            Some(2024)
        );
    }

    #[test]
    fn root_answer_without_referral_yields_nothing() {
        let record = WhoisRecord::new("whois.iana.org")
            .with_field("domain", "TEST")
            .with_field("created", "1985-01-01");
        assert_eq!(creation_date(&WhoisResponse::Single(record), "fresh.test"), None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record = WhoisRecord::new("whois.test").with_field("Updated Date", "2020-01-01");
        assert_eq!(creation_date(&WhoisResponse::Single(record), "whois.test"), None);
    }
}
