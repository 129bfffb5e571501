//! The Global object (ES5 §15.1)
//!
//! Value properties, function properties and the constructor/namespace
//! slots. Under the compact profile the slots of builtins the profile does
//! not provide are accessors whose getter and setter throw
//! `CompactProfileError`.

use otter_ecma_core::number::{decimal_literal_len, to_int32, trim_js_whitespace};
use otter_ecma_core::{CompletionValue, MagicStringId, Value};

use super::error::NativeErrorKind;
use super::{arg, unknown_property, unknown_routine};
use crate::config::BuiltinProfile;
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

const FULL_PROPERTIES: &[MagicStringId] = &[
    M::Undefined,
    M::Eval,
    M::NaN,
    M::Infinity,
    M::Object,
    M::Function,
    M::Array,
    M::String,
    M::Boolean,
    M::Number,
    M::Date,
    M::RegExp,
    M::Error,
    M::EvalError,
    M::RangeError,
    M::ReferenceError,
    M::SyntaxError,
    M::TypeError,
    M::UriError,
    M::Math,
    M::Json,
    M::ParseInt,
    M::ParseFloat,
    M::IsNaN,
    M::IsFinite,
    M::DecodeUri,
    M::DecodeUriComponent,
    M::EncodeUri,
    M::EncodeUriComponent,
];

const COMPACT_PROPERTIES: &[MagicStringId] = &[
    M::Undefined,
    M::Eval,
    M::NaN,
    M::Infinity,
    M::Object,
    M::Function,
    M::Array,
    M::String,
    M::Boolean,
    M::Number,
    M::Date,
    M::RegExp,
    M::Error,
    M::EvalError,
    M::RangeError,
    M::ReferenceError,
    M::SyntaxError,
    M::TypeError,
    M::UriError,
    M::Math,
    M::Json,
    M::ParseInt,
    M::ParseFloat,
    M::IsNaN,
    M::IsFinite,
    M::DecodeUri,
    M::DecodeUriComponent,
    M::EncodeUri,
    M::EncodeUriComponent,
    M::CompactProfileError,
];

pub(crate) fn property_names(profile: BuiltinProfile) -> &'static [MagicStringId] {
    match profile {
        BuiltinProfile::Full => FULL_PROPERTIES,
        BuiltinProfile::Compact => COMPACT_PROPERTIES,
    }
}

pub(crate) fn instantiate(engine: &Engine, name: MagicStringId) -> BuiltinProperty {
    let compact = engine.config().is_compact();

    match name {
        M::Undefined => BuiltinProperty::constant(Value::undefined()),
        M::NaN => BuiltinProperty::constant(Value::number(f64::NAN)),
        M::Infinity => BuiltinProperty::constant(Value::number(f64::INFINITY)),

        M::Object => BuiltinProperty::builtin(engine, BuiltinId::Object),
        M::Function => BuiltinProperty::builtin(engine, BuiltinId::Function),
        M::Array => BuiltinProperty::builtin(engine, BuiltinId::Array),
        M::String => BuiltinProperty::builtin(engine, BuiltinId::String),
        M::Boolean => BuiltinProperty::builtin(engine, BuiltinId::Boolean),
        M::Number => BuiltinProperty::builtin(engine, BuiltinId::Number),
        M::Math => BuiltinProperty::builtin(engine, BuiltinId::Math),
        M::CompactProfileError if compact => {
            BuiltinProperty::builtin(engine, BuiltinId::CompactProfileError)
        }

        M::Error
        | M::EvalError
        | M::RangeError
        | M::ReferenceError
        | M::SyntaxError
        | M::TypeError
        | M::UriError
            if compact =>
        {
            BuiltinProperty::ProfileThrower
        }
        M::Error => BuiltinProperty::builtin(engine, BuiltinId::Error),
        M::EvalError => BuiltinProperty::builtin(engine, BuiltinId::EvalError),
        M::RangeError => BuiltinProperty::builtin(engine, BuiltinId::RangeError),
        M::ReferenceError => BuiltinProperty::builtin(engine, BuiltinId::ReferenceError),
        M::SyntaxError => BuiltinProperty::builtin(engine, BuiltinId::SyntaxError),
        M::TypeError => BuiltinProperty::builtin(engine, BuiltinId::TypeError),
        M::UriError => BuiltinProperty::builtin(engine, BuiltinId::UriError),

        M::Date | M::RegExp | M::Json if compact => BuiltinProperty::ProfileThrower,
        M::Date | M::RegExp | M::Json => panic!("builtin global: {name} is not implemented"),

        M::ParseInt => BuiltinProperty::routine(2),
        M::Eval
        | M::ParseFloat
        | M::IsNaN
        | M::IsFinite
        | M::DecodeUri
        | M::DecodeUriComponent
        | M::EncodeUri
        | M::EncodeUriComponent => BuiltinProperty::routine(1),

        other => unknown_property(BuiltinId::Global, other),
    }
}

pub(crate) fn dispatch_routine(
    engine: &Engine,
    routine: MagicStringId,
    args: &[Value],
) -> CompletionValue {
    match routine {
        M::Eval => eval(engine, arg(args, 0)),
        M::ParseInt => parse_int(engine, arg(args, 0), arg(args, 1)),
        M::ParseFloat => parse_float(engine, arg(args, 0)),
        M::IsNaN => Ok(Value::boolean(engine.to_number(arg(args, 0))?.is_nan())),
        M::IsFinite => Ok(Value::boolean(engine.to_number(arg(args, 0))?.is_finite())),
        M::EncodeUri => encode(engine, arg(args, 0), URI_RESERVED),
        M::EncodeUriComponent => encode(engine, arg(args, 0), ""),
        M::DecodeUri => decode(engine, arg(args, 0), URI_RESERVED),
        M::DecodeUriComponent => decode(engine, arg(args, 0), ""),
        other => unknown_routine(BuiltinId::Global, other),
    }
}

/// `eval(x)`: non-string arguments are returned unchanged; source text
/// needs a parser, which this subsystem does not have.
fn eval(engine: &Engine, x: &Value) -> CompletionValue {
    if x.is_string() {
        return Err(engine.throw_unimplemented("eval of source text"));
    }
    Ok(x.clone())
}

/// ES5 §15.1.2.2
fn parse_int(engine: &Engine, string: &Value, radix: &Value) -> CompletionValue {
    let input = engine.to_string(string)?;
    let mut rest = trim_js_whitespace(input.as_str());

    let negative = rest.starts_with('-');
    if let Some(stripped) = rest.strip_prefix('-').or_else(|| rest.strip_prefix('+')) {
        rest = stripped;
    }

    let mut radix = to_int32(engine.to_number(radix)?);
    let mut strip_prefix = true;
    if radix != 0 {
        if !(2..=36).contains(&radix) {
            return Ok(Value::number(f64::NAN));
        }
        if radix != 16 {
            strip_prefix = false;
        }
    } else {
        radix = 10;
    }

    if strip_prefix
        && let Some(stripped) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X"))
    {
        rest = stripped;
        radix = 16;
    }

    let radix = radix as u32;
    let digits: Vec<u32> = rest.chars().map_while(|c| c.to_digit(radix)).collect();
    if digits.is_empty() {
        return Ok(Value::number(f64::NAN));
    }

    let magnitude = if radix == 10 {
        // Decimal digits go through the float parser so long inputs round
        // correctly.
        let text: String = rest.chars().take(digits.len()).collect();
        text.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        digits
            .iter()
            .fold(0.0, |acc, &digit| acc * f64::from(radix) + f64::from(digit))
    };

    Ok(Value::number(if negative { -magnitude } else { magnitude }))
}

/// ES5 §15.1.2.3
fn parse_float(engine: &Engine, string: &Value) -> CompletionValue {
    let input = engine.to_string(string)?;
    let trimmed = trim_js_whitespace(input.as_str());

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = if unsigned.starts_with("Infinity") {
        f64::INFINITY
    } else {
        match decimal_literal_len(unsigned) {
            Some(len) => unsigned[..len].parse::<f64>().unwrap_or(f64::NAN),
            None => f64::NAN,
        }
    };

    Ok(Value::number(if negative { -magnitude } else { magnitude }))
}

// ============================================================================
// URI handling (ES5 §15.1.3)
// ============================================================================

const URI_UNESCAPED: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.!~*'()";
const URI_RESERVED: &str = ";/?:@&=+$,#";

fn encode(engine: &Engine, value: &Value, unescaped_extra: &str) -> CompletionValue {
    let input = engine.to_string(value)?;
    let text = input.as_str();

    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if URI_UNESCAPED.contains(c) || unescaped_extra.contains(c) {
            result.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                result.push_str(&format!("%{byte:02X}"));
            }
        }
    }

    Ok(Value::string(result))
}

fn decode(engine: &Engine, value: &Value, reserved: &str) -> CompletionValue {
    let input = engine.to_string(value)?;
    let malformed = || engine.throw_error(NativeErrorKind::Uri, "URI malformed");

    let bytes = input.as_str().as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let lead = hex_byte(bytes, i).ok_or_else(malformed)?;
        if lead < 0x80 {
            if reserved.contains(lead as char) {
                out.extend_from_slice(&bytes[i..i + 3]);
            } else {
                out.push(lead);
            }
            i += 3;
            continue;
        }

        let len = match lead {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => return Err(malformed()),
        };
        let mut sequence = vec![lead];
        i += 3;
        for _ in 1..len {
            if bytes.get(i) != Some(&b'%') {
                return Err(malformed());
            }
            let continuation = hex_byte(bytes, i).ok_or_else(malformed)?;
            if continuation & 0xC0 != 0x80 {
                return Err(malformed());
            }
            sequence.push(continuation);
            i += 3;
        }
        if std::str::from_utf8(&sequence).is_err() {
            return Err(malformed());
        }
        out.extend_from_slice(&sequence);
    }

    let decoded = String::from_utf8(out).map_err(|_| malformed())?;
    Ok(Value::string(decoded))
}

/// Byte encoded by the `%XX` escape at `pos`
fn hex_byte(bytes: &[u8], pos: usize) -> Option<u8> {
    let hex = bytes.get(pos + 1..pos + 3)?;
    let hex = std::str::from_utf8(hex).ok()?;
    u8::from_str_radix(hex, 16).ok()
}
