//! Expiry date conversion.
//!
//! `Expires` attributes in the wild range from strict RFC 1123 dates to
//! all kinds of legacy forms. The primary conversion is httpdate, which
//! accepts the three fixed formats of RFC 7231. A fallback tokenizer in
//! the style of RFC 6265 picks up the rest, including dash separated
//! dates and years past the 32-bit epoch limit.

use std::time::{SystemTime, UNIX_EPOCH};
use time::{Date, Month, PrimitiveDateTime, Time};

/// Convert an expiry date to a unix timestamp.
pub(crate) fn parse_expiry(text: &str) -> Option<i64> {
    if let Ok(st) = httpdate::parse_http_date(text) {
        return Some(unix_seconds(st));
    }
    parse_cookie_date(text)
}

fn unix_seconds(st: SystemTime) -> i64 {
    match st.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

const MONTHS: &[(&str, Month)] = &[
    ("jan", Month::January),
    ("feb", Month::February),
    ("mar", Month::March),
    ("apr", Month::April),
    ("may", Month::May),
    ("jun", Month::June),
    ("jul", Month::July),
    ("aug", Month::August),
    ("sep", Month::September),
    ("oct", Month::October),
    ("nov", Month::November),
    ("dec", Month::December),
];

/// Date delimiters per RFC 6265. Notably ':' is not one, which keeps
/// hh:mm:ss together as a single token.
fn is_delimiter(b: u8) -> bool {
    b == 0x09
        || (0x20..=0x2f).contains(&b)
        || (0x3b..=0x40).contains(&b)
        || (0x5b..=0x60).contains(&b)
        || (0x7b..=0x7e).contains(&b)
}

/// Lenient cookie date parsing. Scans the tokens for a time, a day of
/// month, a month name and a year, in that order of preference, ignoring
/// anything unrecognized.
fn parse_cookie_date(text: &str) -> Option<i64> {
    let mut time = None;
    let mut day = None;
    let mut month = None;
    let mut year = None;

    for token in text.as_bytes().split(|b| is_delimiter(*b)) {
        if token.is_empty() {
            continue;
        }
        // delimiters are all ascii, so tokens are valid substrings
        let token = std::str::from_utf8(token).ok()?;

        if time.is_none() {
            if let Some(v) = parse_time_token(token) {
                time = Some(v);
                continue;
            }
        }
        if day.is_none() {
            if let Some(v) = leading_digits(token, 1, 2) {
                if (1..=31).contains(&v) {
                    day = Some(v as u8);
                    continue;
                }
            }
        }
        if month.is_none() {
            if let Some(v) = parse_month_token(token) {
                month = Some(v);
                continue;
            }
        }
        if year.is_none() {
            if let Some(v) = leading_digits(token, 2, 4) {
                year = Some(v as i32);
            }
        }
    }

    let (hour, minute, second) = time?;
    let day = day?;
    let month = month?;
    let mut year = year?;

    // two digit year windowing per RFC 6265
    if (70..=99).contains(&year) {
        year += 1900;
    } else if (0..=69).contains(&year) {
        year += 2000;
    }
    if year < 1601 {
        return None;
    }

    let date = Date::from_calendar_date(year, month, day).ok()?;
    let time = Time::from_hms(hour, minute, second).ok()?;

    Some(PrimitiveDateTime::new(date, time).assume_utc().unix_timestamp())
}

/// "22:23:01" -> (22, 23, 1)
fn parse_time_token(token: &str) -> Option<(u8, u8, u8)> {
    let mut fields = token.split(':');
    let hour = time_field(fields.next()?)?;
    let minute = time_field(fields.next()?)?;
    let second = time_field(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some((hour, minute, second))
}

fn time_field(field: &str) -> Option<u8> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_month_token(token: &str) -> Option<Month> {
    let prefix = token.get(..3)?;
    MONTHS
        .iter()
        .find(|(name, _)| prefix.eq_ignore_ascii_case(name))
        .map(|(_, month)| *month)
}

/// The run of digits a token starts with, provided the run is min..=max
/// long. Trailing non-digits are allowed and ignored.
fn leading_digits(token: &str, min: usize, max: usize) -> Option<u32> {
    let end = token
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(token.len());
    if end < min || end > max {
        return None;
    }
    token[..end].parse().ok()
}
