//! Parsing of duration strings such as `10s`, `1m30s` or `500ms`.

use std::time::Duration;

/// Parses a duration made of `<number><unit>` segments.
///
/// Supported units are `ms`, `s`, `m` and `h`. A bare integer is read as seconds.
///
/// # Errors
///
/// Returns a human-readable reason if the string is empty, has a segment
/// without a number or unit, uses an unknown unit, or overflows.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("duration is empty".to_string());
    }

    if let Ok(secs) = trimmed.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = Duration::ZERO;
    let mut rest = trimmed;

    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits == 0 {
            return Err(format!("expected a number at '{rest}'"));
        }
        let (number, tail) = rest.split_at(digits);
        let value: u64 = number
            .parse()
            .map_err(|e| format!("invalid number '{number}': {e}"))?;

        let unit_len = tail.find(|c: char| c.is_ascii_digit()).unwrap_or(tail.len());
        let (unit, next) = tail.split_at(unit_len);

        let segment = segment(value, unit)?;
        total = total
            .checked_add(segment)
            .ok_or_else(|| format!("'{input}' is too large"))?;
        rest = next;
    }

    Ok(total)
}

fn segment(value: u64, unit: &str) -> Result<Duration, String> {
    let scale = match unit {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "" => return Err(format!("missing unit after {value}")),
        other => return Err(format!("unknown unit '{other}'")),
    };

    value
        .checked_mul(scale)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("{value}{unit} is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_integer_is_seconds() {
        assert_eq!(parse_duration("30"), Ok(Duration::from_secs(30)));
    }

    #[test]
    fn single_units() {
        assert_eq!(parse_duration("10s"), Ok(Duration::from_secs(10)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert_eq!(parse_duration("1h"), Ok(Duration::from_secs(3600)));
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
    }

    #[test]
    fn compound_duration() {
        assert_eq!(parse_duration("1m30s"), Ok(Duration::from_secs(90)));
        assert_eq!(
            parse_duration("1h0m5s500ms"),
            Ok(Duration::from_millis(3_605_500))
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_duration(" 5s "), Ok(Duration::from_secs(5)));
    }

    #[test]
    fn empty_is_rejected() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("   ").is_err());
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = parse_duration("5d").unwrap_err();
        assert!(err.contains("unknown unit 'd'"));
    }

    #[test]
    fn missing_number_is_rejected() {
        assert!(parse_duration("s").is_err());
        assert!(parse_duration("5s m").is_err());
    }

    #[test]
    fn overflow_is_rejected() {
        let huge = format!("{}h", u64::MAX);
        assert!(parse_duration(&huge).unwrap_err().contains("too large"));
    }
}
