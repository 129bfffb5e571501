//! Number conversions on primitive values
//!
//! The primitive half of `ToNumber` / `ToString` and the integer
//! conversions from ES5 §9. Conversions that need to call into script code
//! (`ToPrimitive` on objects) live with the builtins.

/// ES5 §9.3.1 `StrWhiteSpaceChar`
pub fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{FEFF}'
            | '\u{000A}'
            | '\u{000D}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Trim leading and trailing `StrWhiteSpaceChar`s
pub fn trim_js_whitespace(s: &str) -> &str {
    s.trim_matches(is_js_whitespace)
}

/// ES5 §9.3.1 ToNumber applied to the String type
pub fn string_to_number(s: &str) -> f64 {
    let trimmed = trim_js_whitespace(s);
    if trimmed.is_empty() {
        return 0.0;
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return parse_hex_integer(hex).unwrap_or(f64::NAN);
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    if decimal_literal_len(unsigned) != Some(unsigned.len()) {
        return f64::NAN;
    }

    unsigned
        .parse::<f64>()
        .map(|n| sign * n)
        .unwrap_or(f64::NAN)
}

fn parse_hex_integer(digits: &str) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    let mut value = 0.0f64;
    for c in digits.chars() {
        value = value * 16.0 + c.to_digit(16)? as f64;
    }
    Some(value)
}

/// Length of the longest prefix of `s` that is an ES5
/// `StrUnsignedDecimalLiteral` (excluding `Infinity`), or `None` if no
/// prefix is.
pub fn decimal_literal_len(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+') | Some(b'-')) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(&bytes[exp_pos.min(bytes.len())..]);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    Some(pos)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// ES5 §9.8.1 ToString applied to the Number type
pub fn number_to_string(n: f64) -> String {
    let mut buffer = ryu_js::Buffer::new();
    buffer.format(n).to_string()
}

/// Format `n` in `radix` (2..=36); radix 10 follows [`number_to_string`].
pub fn number_to_radix_string(n: f64, radix: u32) -> String {
    debug_assert!((2..=36).contains(&radix));
    if radix == 10 || !n.is_finite() {
        return number_to_string(n);
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let negative = n < 0.0;
    let magnitude = n.abs();
    let radix_f = radix as f64;

    let mut int_part = magnitude.trunc();
    let mut int_digits = Vec::new();
    while int_part >= 1.0 {
        let digit = (int_part % radix_f) as u32;
        int_digits.push(digit_char(digit));
        int_part = (int_part / radix_f).trunc();
    }
    if int_digits.is_empty() {
        int_digits.push('0');
    }

    let mut out = String::with_capacity(int_digits.len() + 24);
    if negative {
        out.push('-');
    }
    out.extend(int_digits.iter().rev());

    let mut frac = magnitude.fract();
    if frac > 0.0 {
        out.push('.');
        for _ in 0..52 {
            frac *= radix_f;
            let digit = frac.trunc() as u32;
            out.push(digit_char(digit));
            frac -= digit as f64;
            if frac <= 0.0 {
                break;
            }
        }
    }
    out
}

fn digit_char(digit: u32) -> char {
    char::from_digit(digit, 36).unwrap_or('0')
}

/// ES5 §9.4 ToInteger on a number
pub fn to_integer(n: f64) -> f64 {
    if n.is_nan() {
        0.0
    } else if n == 0.0 || n.is_infinite() {
        n
    } else {
        n.signum() * n.abs().floor()
    }
}

/// ES5 §9.6 ToUint32 on a number
pub fn to_uint32(n: f64) -> u32 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    to_integer(n).rem_euclid(4_294_967_296.0) as u32
}

/// ES5 §9.5 ToInt32 on a number
pub fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}

/// ES5 §9.7 ToUint16 on a number
pub fn to_uint16(n: f64) -> u16 {
    if !n.is_finite() || n == 0.0 {
        return 0;
    }
    to_integer(n).rem_euclid(65_536.0) as u16
}
