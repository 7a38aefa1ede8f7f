/// Parses a decimal-degree query value.
///
/// Accepts decimal floats, the `inf`/`infinity`/`nan` literals (case-insensitive,
/// `nan` unsigned) and hexadecimal floats with a mandatory `p` exponent such as
/// `0x1.8p1`. Returns `None` for malformed input and for finite literals that
/// overflow `f64`.
pub fn parse_coordinate(raw: &str) -> Option<f64> {
    let (negative, unsigned) = split_sign(raw);

    let magnitude = if unsigned.eq_ignore_ascii_case("nan") {
        if negative || unsigned.len() != raw.len() {
            return None;
        }
        f64::NAN
    } else if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
        f64::INFINITY
    } else if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        parse_hex(hex)?
    } else if unsigned.starts_with(['+', '-']) {
        return None;
    } else {
        unsigned.parse::<f64>().ok()?
    };

    // out of range
    if magnitude.is_infinite() && !unsigned.to_ascii_lowercase().starts_with("inf") {
        return None;
    }

    Some(if negative { -magnitude } else { magnitude })
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    }
}

fn parse_hex(digits: &str) -> Option<f64> {
    let (mantissa_part, exponent_part) = digits.split_once(['p', 'P'])?;
    let exponent = parse_exponent(exponent_part)?;

    let bytes = mantissa_part.as_bytes();
    let mut mantissa: u64 = 0;
    let mut shift: i64 = 0;
    let mut seen_point = false;
    let mut seen_digit = false;
    // '_' may follow the 0x prefix or a digit, and must precede a digit
    let mut prev = b'x';

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'_' => {
                let next_is_digit = bytes.get(i + 1).map_or(false, |c| c.is_ascii_hexdigit());
                if !(prev == b'x' || prev.is_ascii_hexdigit()) || !next_is_digit {
                    return None;
                }
            }
            b'.' if !seen_point => seen_point = true,
            _ => {
                let digit = (b as char).to_digit(16)? as u64;
                seen_digit = true;
                if mantissa < 1 << 60 {
                    mantissa = mantissa * 16 + digit;
                    if seen_point {
                        shift -= 4;
                    }
                } else if !seen_point {
                    shift += 4;
                }
            }
        }
        prev = b;
    }

    if !seen_digit {
        return None;
    }
    Some(scale(mantissa as f64, shift + exponent))
}

fn parse_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = split_sign(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.bytes()
        .fold(0i64, |acc, b| (acc * 10 + (b - b'0') as i64).min(100_000));
    Some(if negative { -value } else { value })
}

// value * 2^exponent without overflowing the intermediate power of two
fn scale(mut value: f64, mut exponent: i64) -> f64 {
    while exponent > 0 {
        let step = exponent.min(1000);
        value *= 2f64.powi(step as i32);
        exponent -= step;
    }
    while exponent < 0 {
        let step = exponent.max(-1000);
        value *= 2f64.powi(step as i32);
        exponent -= step;
    }
    value
}
