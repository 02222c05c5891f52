//! Lenient numeric coercion of attribute text.
//!
//! Report generators are not consistent about number formatting, so values
//! are read by their leading numeric prefix: `"12 lines"` is `12`, `"abc"` is
//! `0`.

/// Parse the leading integer prefix of `text`, or `0`.
///
/// # Examples
/// ```
/// use report_splitter::splitting::parse_integer;
///
/// assert_eq!(parse_integer("42"), 42);
/// assert_eq!(parse_integer(" -7px"), -7);
/// assert_eq!(parse_integer("n/a"), 0);
/// ```
#[must_use]
pub fn parse_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    text[..end].parse().unwrap_or(0)
}

/// Parse the leading float prefix of `text`, or `0.0`.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Non-finite results become `0.0`.
///
/// # Examples
/// ```
/// use report_splitter::splitting::parse_float;
///
/// assert_eq!(parse_float("0.85"), 0.85);
/// assert_eq!(parse_float("1.5e2s"), 150.0);
/// assert_eq!(parse_float(".5"), 0.5);
/// assert_eq!(parse_float("NaN"), 0.0);
/// ```
#[must_use]
pub fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(bytes, end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(bytes, end + 1);
        if frac_digits > 0 || int_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(bytes, exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    match text[..end].parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

fn count_digits(bytes: &[u8], start: usize) -> usize {
    bytes
        .get(start..)
        .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
}
