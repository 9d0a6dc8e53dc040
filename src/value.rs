use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
    Weekday,
};

use crate::cst::{Token, TokenKind};
use crate::options::FieldType;

/// A leaf value of a filter document.
///
/// Integers and floats are kept apart so that `count:5` renders as `5`, not
/// `5.0`.
///
/// # Examples
///
/// ```
/// use searchbox::Scalar;
///
/// let name = Scalar::String("john".to_string());
/// assert_eq!(name.as_str(), Some("john"));
/// assert_eq!(Scalar::Integer(5).to_json(), serde_json::json!(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Always finite.
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
}

impl Scalar {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Dates render as ISO-8601 UTC with millisecond precision.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Boolean(b) => serde_json::Value::Bool(*b),
            Scalar::Integer(i) => serde_json::Value::Number((*i).into()),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Scalar::String(s) => serde_json::Value::String(s.clone()),
            Scalar::Date(d) => {
                serde_json::Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

/// Coerces a value token, directed by the field type when one is configured.
///
/// `None` means the value cannot represent the requested type; the term it
/// belongs to is then left out of the filter. `null` is accepted for every type.
pub fn coerce(token: &Token, hint: Option<FieldType>) -> Option<Scalar> {
    if token.kind == TokenKind::Null {
        return Some(Scalar::Null);
    }

    match hint {
        Some(FieldType::String) => Some(Scalar::String(unquote(token).to_string())),
        Some(FieldType::Number) => parse_number(&token.lexeme),
        Some(FieldType::Boolean) => Some(Scalar::Boolean(token.lexeme == "true")),
        Some(FieldType::Date) => parse_date(&token.lexeme).map(Scalar::Date),
        None => infer(token),
    }
}

fn infer(token: &Token) -> Option<Scalar> {
    match token.kind {
        TokenKind::True => Some(Scalar::Boolean(true)),
        TokenKind::False => Some(Scalar::Boolean(false)),
        TokenKind::Number => parse_number(&token.lexeme),
        TokenKind::Date => parse_date(&token.lexeme).map(Scalar::Date),
        _ => Some(Scalar::String(unquote(token).to_string())),
    }
}

/// Strips exactly the first and last character of a quoted string.
fn unquote(token: &Token) -> &str {
    let lexeme = token.lexeme.as_str();
    if token.kind == TokenKind::QuotedString && lexeme.len() >= 2 {
        &lexeme[1..lexeme.len() - 1]
    } else {
        lexeme
    }
}

/// Integers when the value is whole and fits an `i64`, finite floats otherwise.
pub fn parse_number(lexeme: &str) -> Option<Scalar> {
    if let Ok(i) = lexeme.parse::<i64>() {
        return Some(Scalar::Integer(i));
    }
    let f = lexeme.parse::<f64>().ok().filter(|f| f.is_finite())?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Some(Scalar::Integer(f as i64));
    }
    Some(Scalar::Float(f))
}

/// Parses an ISO-8601 date or date-time.
///
/// Accepted date forms: `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYYMMDD`, ordinal
/// `YYYY[-]DDD` and week `YYYY[-]Www[[-]D]`. A time may follow after `T` in
/// basic (`HHMMSS`) or extended (`HH:MM:SS`) form with an optional fraction,
/// then `Z` or `±HH[[:]MM]`. Values without an offset are taken as UTC.
pub fn parse_date(lexeme: &str) -> Option<DateTime<Utc>> {
    let text = lexeme.replace(',', ".");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&text) {
        return Some(dt.with_timezone(&Utc));
    }

    let text = text.strip_prefix('+').unwrap_or(&text);
    let (date_part, time_part) = match text.find('T') {
        Some(t) => (&text[..t], Some(&text[t + 1..])),
        None => (text, None),
    };

    let date = parse_calendar_date(date_part)?;
    let Some(time_part) = time_part else {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    };

    let (local, offset) = split_offset(time_part)?;
    let naive = NaiveDateTime::new(date, parse_time(local)?);
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let year = unsigned.get(..4).filter(|y| all_digits(y))?;
    let year: i32 = year.parse().ok()?;
    let year = if negative { -year } else { year };
    let rest: String = unsigned[4..].chars().filter(|c| *c != '-').collect();
    if !rest.is_ascii() {
        return None;
    }

    if let Some(week) = rest.strip_prefix('W') {
        let (week, day) = week.split_at(week.len().min(2));
        let weekday = match day {
            "" => Weekday::Mon,
            _ => Weekday::try_from(day.parse::<u8>().ok()?.checked_sub(1)?).ok()?,
        };
        return NaiveDate::from_isoywd_opt(year, week.parse().ok()?, weekday);
    }

    if !rest.is_empty() && !all_digits(&rest) {
        return None;
    }
    match rest.len() {
        0 => NaiveDate::from_ymd_opt(year, 1, 1),
        2 => NaiveDate::from_ymd_opt(year, rest.parse().ok()?, 1),
        3 => NaiveDate::from_yo_opt(year, rest.parse().ok()?),
        4 => NaiveDate::from_ymd_opt(year, rest[..2].parse().ok()?, rest[2..].parse().ok()?),
        _ => None,
    }
}

/// `HH[[:]MM[[:]SS[.fff]]]`
fn parse_time(text: &str) -> Option<NaiveTime> {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) if all_digits(fraction) => (clock, fraction),
        Some(_) => return None,
        None => (text, ""),
    };
    let digits: String = clock.chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4 | 6) || !all_digits(&digits) {
        return None;
    }

    let field = |at: usize| -> Option<u32> {
        digits.get(at..at + 2).map_or(Some(0), |d| d.parse().ok())
    };
    let nanos = if fraction.is_empty() {
        0
    } else {
        let mut nine: String = fraction.chars().take(9).collect();
        while nine.len() < 9 {
            nine.push('0');
        }
        nine.parse().ok()?
    };
    NaiveTime::from_hms_nano_opt(field(0)?, field(2)?, field(4)?, nanos)
}

/// Splits a trailing `Z` / `±HH[[:]MM]` off a time.
fn split_offset(time: &str) -> Option<(&str, FixedOffset)> {
    if let Some(local) = time.strip_suffix(['Z', 'z']) {
        return Some((local, FixedOffset::east_opt(0)?));
    }

    let Some(sign_at) = time.rfind(['+', '-']) else {
        return Some((time, FixedOffset::east_opt(0)?));
    };

    let digits: String = time[sign_at + 1..].chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4) || !all_digits(&digits) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = if digits.len() == 4 { digits[2..].parse().ok()? } else { 0 };
    let seconds = (hours * 3600 + minutes * 60) * if time[sign_at..].starts_with('-') { -1 } else { 1 };

    Some((&time[..sign_at], FixedOffset::east_opt(seconds)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 0, 1, 1)
    }

    #[test]
    fn null_ignores_hint() {
        let null = token(TokenKind::Null, "null");
        assert_eq!(coerce(&null, Some(FieldType::Number)), Some(Scalar::Null));
        assert_eq!(coerce(&null, None), Some(Scalar::Null));
    }

    #[test]
    fn string_hint_strips_quotes_only() {
        let quoted = token(TokenKind::QuotedString, "\"Joe Bloggs\"");
        assert_eq!(
            coerce(&quoted, Some(FieldType::String)),
            Some(Scalar::String("Joe Bloggs".to_string()))
        );
        let number = token(TokenKind::Number, "123");
        assert_eq!(
            coerce(&number, Some(FieldType::String)),
            Some(Scalar::String("123".to_string()))
        );
    }

    #[test]
    fn number_hint_rejects_words() {
        assert_eq!(coerce(&token(TokenKind::Identifier, "abc"), Some(FieldType::Number)), None);
        assert_eq!(coerce(&token(TokenKind::Identifier, "inf"), Some(FieldType::Number)), None);
        assert_eq!(
            coerce(&token(TokenKind::Number, "1.5"), Some(FieldType::Number)),
            Some(Scalar::Float(1.5))
        );
    }

    #[test]
    fn boolean_hint_never_fails() {
        assert_eq!(
            coerce(&token(TokenKind::True, "true"), Some(FieldType::Boolean)),
            Some(Scalar::Boolean(true))
        );
        assert_eq!(
            coerce(&token(TokenKind::Identifier, "yes"), Some(FieldType::Boolean)),
            Some(Scalar::Boolean(false))
        );
    }

    #[test]
    fn inferred_kinds() {
        assert_eq!(coerce(&token(TokenKind::Number, "5"), None), Some(Scalar::Integer(5)));
        assert_eq!(coerce(&token(TokenKind::False, "false"), None), Some(Scalar::Boolean(false)));
        assert_eq!(
            coerce(&token(TokenKind::UnquotedLiteral, "getting-started"), None),
            Some(Scalar::String("getting-started".to_string()))
        );
    }

    #[test]
    fn dates() {
        let midnight = parse_date("2022-01-01").unwrap();
        assert_eq!(midnight.to_rfc3339_opts(SecondsFormat::Millis, true), "2022-01-01T00:00:00.000Z");

        let offset = parse_date("2022-01-01T12:34:56+08:00").unwrap();
        assert_eq!(offset.to_rfc3339_opts(SecondsFormat::Millis, true), "2022-01-01T04:34:56.000Z");

        let compact = parse_date("2022-01-01T12:34+0800").unwrap();
        assert_eq!(compact.to_rfc3339_opts(SecondsFormat::Secs, true), "2022-01-01T04:34:00Z");

        let naive = parse_date("2022-01-01T12:34:56.789").unwrap();
        assert_eq!(naive.to_rfc3339_opts(SecondsFormat::Millis, true), "2022-01-01T12:34:56.789Z");

        assert_eq!(parse_date("2022").map(|d| d.year()), Some(2022));
        assert_eq!(parse_date("2022-02-30"), None);
        assert_eq!(parse_date("hello"), None);
    }

    #[test]
    fn other_iso_date_forms() {
        let millis = |text: &str| {
            parse_date(text).map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
        };
        assert_eq!(millis("2022-03").as_deref(), Some("2022-03-01T00:00:00.000Z"));
        assert_eq!(millis("20220315").as_deref(), Some("2022-03-15T00:00:00.000Z"));
        assert_eq!(millis("2022-032").as_deref(), Some("2022-02-01T00:00:00.000Z"));
        assert_eq!(millis("2022032").as_deref(), Some("2022-02-01T00:00:00.000Z"));
        assert_eq!(millis("2022-W01").as_deref(), Some("2022-01-03T00:00:00.000Z"));
        assert_eq!(millis("2022W015").as_deref(), Some("2022-01-07T00:00:00.000Z"));
        assert_eq!(millis("2022-W01-7").as_deref(), Some("2022-01-09T00:00:00.000Z"));
        assert_eq!(millis("2022-01-01T1234").as_deref(), Some("2022-01-01T12:34:00.000Z"));
        assert_eq!(millis("20220101T123456,5Z").as_deref(), Some("2022-01-01T12:34:56.500Z"));
        assert_eq!(millis("2022-01-01T12-02").as_deref(), Some("2022-01-01T14:00:00.000Z"));
        assert_eq!(parse_date("2022-13"), None);
        assert_eq!(parse_date("2022-367"), None);
        assert_eq!(parse_date("2022-W54"), None);
    }

    #[test]
    fn whole_floats_become_integers() {
        assert_eq!(parse_number("5.0"), Some(Scalar::Integer(5)));
        assert_eq!(parse_number("+5.00"), Some(Scalar::Integer(5)));
        assert_eq!(parse_number("0.5"), Some(Scalar::Float(0.5)));
        assert_eq!(parse_number("1e300"), Some(Scalar::Float(1e300)));
        assert_eq!(parse_number("5.0").map(|n| n.to_json()), Some(serde_json::json!(5)));
    }
}
