//! Timestamp templates
//!
//! A stamp pattern is free text with `{Method}` or `{Method:Width}` tokens.
//! `Method` names a date accessor in the usual camel-case style (`FullYear`,
//! `Month`, `Date`, `Hours`, `toLocaleTimeString`, ...). Accessors that are
//! not a direct method name are looked up with a `get` prefix, so `{FullYear}`
//! and `{getFullYear}` are the same token. The result is left-padded with
//! zeros up to `Width`. Widths above 64 are ignored.
//!
//! Unknown accessors are never an error: the token is copied through as-is.

use chrono::{DateTime, Datelike, Offset, SecondsFormat, TimeZone, Timelike, Utc};
use regex::{Captures, Regex};
use std::fmt;
use std::sync::OnceLock;

/// Default pattern: `2011-07-05 13:05:09`
pub const DEFAULT_PATTERN: &str = "{FullYear}-{Month:2}-{Date:2} {toLocaleTimeString}";

/// Widest padding honored; larger widths render the value unpadded.
const MAX_WIDTH: usize = 64;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{(.+?)(?::(.*?))?\}").expect("token pattern is a valid regex")
    })
}

/// Result of a date accessor.
#[derive(Debug, Clone, PartialEq)]
enum Component {
    Number(i64),
    Text(String),
}

/// Render `pattern` for `instant`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use devnull_logger::core::timestamp::render;
///
/// let date = Utc.with_ymd_and_hms(2011, 7, 5, 0, 0, 0).unwrap();
/// assert_eq!(render("{Date:10}", &date), "0000000005");
/// assert_eq!(render("{Month}", &date), "7");
/// ```
pub fn render<Tz>(pattern: &str, instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    token_pattern()
        .replace_all(pattern, |caps: &Captures<'_>| {
            let method = &caps[1];
            let Some(component) = accessor(method, instant) else {
                return caps[0].to_string();
            };

            let mut value = match component {
                // The month accessors are zero based; every accessor whose
                // name contains an `h` is bumped by one.
                Component::Number(n) if method.contains('h') => (n + 1).to_string(),
                Component::Number(n) => n.to_string(),
                Component::Text(s) => s,
            };

            let width = caps
                .get(2)
                .and_then(|w| w.as_str().parse::<usize>().ok())
                .filter(|&w| w <= MAX_WIDTH);
            if let Some(width) = width {
                let len = value.chars().count();
                if len < width {
                    value.insert_str(0, &"0".repeat(width - len));
                }
            }

            value
        })
        .into_owned()
}

fn accessor<Tz>(method: &str, instant: &DateTime<Tz>) -> Option<Component>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    direct(method, instant).or_else(|| getter(method, instant))
}

/// Methods called by their own name.
fn direct<Tz>(method: &str, instant: &DateTime<Tz>) -> Option<Component>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let utc = instant.with_timezone(&Utc);
    let text = match method {
        "toLocaleTimeString" => instant.format("%H:%M:%S").to_string(),
        "toLocaleDateString" => instant.format("%-m/%-d/%Y").to_string(),
        "toLocaleString" => instant.format("%-m/%-d/%Y, %H:%M:%S").to_string(),
        "toISOString" | "toJSON" => utc.to_rfc3339_opts(SecondsFormat::Millis, true),
        "toUTCString" | "toGMTString" => utc.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        "toDateString" => instant.format("%a %b %d %Y").to_string(),
        "toTimeString" => instant.format("%H:%M:%S GMT%z").to_string(),
        "toString" => instant.format("%a %b %d %Y %H:%M:%S GMT%z").to_string(),
        "valueOf" => return Some(Component::Number(instant.timestamp_millis())),
        _ => match method.strip_prefix("get") {
            Some(rest) if !rest.is_empty() => return getter(rest, instant),
            _ => return None,
        },
    };
    Some(Component::Text(text))
}

/// Accessors reached through the implicit `get` prefix.
fn getter<Tz>(name: &str, instant: &DateTime<Tz>) -> Option<Component>
where
    Tz: TimeZone,
{
    let (utc_only, name) = match name.strip_prefix("UTC") {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    if utc_only {
        fields(name, &instant.with_timezone(&Utc))
    } else if name == "TimezoneOffset" {
        // Minutes to add to local time to reach UTC.
        let offset = instant.offset().fix().local_minus_utc();
        Some(Component::Number(i64::from(-offset / 60)))
    } else {
        fields(name, instant)
    }
}

fn fields<Tz: TimeZone>(name: &str, instant: &DateTime<Tz>) -> Option<Component> {
    let n = match name {
        "FullYear" => i64::from(instant.year()),
        "Year" => i64::from(instant.year()) - 1900,
        "Month" => i64::from(instant.month0()),
        "Date" => i64::from(instant.day()),
        "Day" => i64::from(instant.weekday().num_days_from_sunday()),
        "Hours" => i64::from(instant.hour()),
        "Minutes" => i64::from(instant.minute()),
        "Seconds" => i64::from(instant.second()),
        "Milliseconds" => i64::from(instant.timestamp_subsec_millis().min(999)),
        "Time" => instant.timestamp_millis(),
        _ => return None,
    };
    Some(Component::Number(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn july_fifth() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2011, 7, 5, 13, 5, 9)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_year_and_date_without_padding() {
        assert_eq!(render("{FullYear}{Date}", &july_fifth()), "20115");
    }

    #[test]
    fn test_padding() {
        assert_eq!(render("{Date:10}", &july_fifth()), "0000000005");
        assert_eq!(render("{FullYear:2}", &july_fifth()), "2011");
        assert_eq!(render("{Date:abc}", &july_fifth()), "5");
    }

    #[test]
    fn test_oversized_width_is_ignored() {
        assert_eq!(render("{Date:64}", &july_fifth()).len(), 64);
        assert_eq!(render("{Date:65}", &july_fifth()), "5");
        assert_eq!(render("{Date:4294967296}", &july_fifth()), "5");
        assert_eq!(
            render("{Date:18446744073709551615}|{Date:99999999999999999999}", &july_fifth()),
            "5|5"
        );
    }

    #[test]
    fn test_month_is_one_based() {
        let date = Utc.with_ymd_and_hms(2011, 7, 12, 0, 0, 0).unwrap();
        assert_eq!(render("{Month}", &date), "7");
        assert_eq!(render("{UTCMonth:2}", &date), "07");
    }

    #[test]
    fn test_default_pattern() {
        assert_eq!(render(DEFAULT_PATTERN, &july_fifth()), "2011-07-05 13:05:09");
    }

    #[test]
    fn test_direct_methods() {
        assert_eq!(render("{toLocaleDateString}", &july_fifth()), "7/5/2011");
        assert_eq!(
            render("{toISOString}", &july_fifth()),
            "2011-07-05T13:05:09.000Z"
        );
        assert_eq!(render("{getFullYear}", &july_fifth()), "2011");
        assert_eq!(
            render("{valueOf}", &july_fifth()),
            july_fifth().timestamp_millis().to_string()
        );
    }

    #[test]
    fn test_non_template_text_is_kept() {
        assert_eq!(
            render("hello <b>world</b> its {FullYear}", &july_fifth()),
            "hello <b>world</b> its 2011"
        );
    }

    #[test]
    fn test_unknown_accessor_passes_through() {
        assert_eq!(render("{Bogus} {Date}", &july_fifth()), "{Bogus} 5");
        assert_eq!(render("{get}", &july_fifth()), "{get}");
        assert_eq!(render("unbalanced {Date", &july_fifth()), "unbalanced {Date");
    }

    #[test]
    fn test_local_and_utc_accessors() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = offset.with_ymd_and_hms(2011, 7, 5, 1, 30, 0).unwrap();

        assert_eq!(render("{Hours}", &date), "1");
        assert_eq!(render("{UTCHours}", &date), "23");
        assert_eq!(render("{UTCDate}", &date), "4");
        assert_eq!(render("{TimezoneOffset}", &date), "-120");
    }

    #[test]
    fn test_weekday_and_year() {
        // 2011-07-05 was a Tuesday
        assert_eq!(render("{Day}", &july_fifth()), "2");
        assert_eq!(render("{Year}", &july_fifth()), "111");
    }
}
