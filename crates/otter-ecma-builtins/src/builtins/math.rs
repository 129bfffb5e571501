//! The Math object (ES5 §15.8)

use std::cell::Cell;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

use otter_ecma_core::{CompletionValue, MagicStringId, Value};

use super::{arg, unknown_property, unknown_routine};
use crate::engine::Engine;
use crate::id::BuiltinId;
use crate::lazy::BuiltinProperty;

use MagicStringId as M;

pub(crate) const PROPERTIES: &[MagicStringId] = &[
    M::E,
    M::Ln10,
    M::Ln2,
    M::Log2E,
    M::Log10E,
    M::Pi,
    M::Sqrt1_2,
    M::Sqrt2,
    M::Abs,
    M::Acos,
    M::Asin,
    M::Atan,
    M::Atan2,
    M::Ceil,
    M::Cos,
    M::Exp,
    M::Floor,
    M::Log,
    M::Max,
    M::Min,
    M::Pow,
    M::Random,
    M::Round,
    M::Sin,
    M::Sqrt,
    M::Tan,
];

pub(crate) fn instantiate(name: MagicStringId) -> BuiltinProperty {
    use std::f64::consts;

    let constant = |n: f64| BuiltinProperty::constant(Value::number(n));
    match name {
        M::E => constant(consts::E),
        M::Ln10 => constant(consts::LN_10),
        M::Ln2 => constant(consts::LN_2),
        M::Log2E => constant(consts::LOG2_E),
        M::Log10E => constant(consts::LOG10_E),
        M::Pi => constant(consts::PI),
        M::Sqrt1_2 => constant(consts::FRAC_1_SQRT_2),
        M::Sqrt2 => constant(consts::SQRT_2),
        M::Random => BuiltinProperty::routine(0),
        M::Atan2 | M::Max | M::Min | M::Pow => BuiltinProperty::routine(2),
        M::Abs
        | M::Acos
        | M::Asin
        | M::Atan
        | M::Ceil
        | M::Cos
        | M::Exp
        | M::Floor
        | M::Log
        | M::Round
        | M::Sin
        | M::Sqrt
        | M::Tan => BuiltinProperty::routine(1),
        other => unknown_property(BuiltinId::Math, other),
    }
}

pub(crate) fn dispatch_routine(
    engine: &Engine,
    routine: MagicStringId,
    args: &[Value],
) -> CompletionValue {
    let unary = |f: fn(f64) -> f64| -> CompletionValue {
        Ok(Value::number(f(engine.to_number(arg(args, 0))?)))
    };

    match routine {
        M::Abs => unary(f64::abs),
        M::Acos => unary(f64::acos),
        M::Asin => unary(f64::asin),
        M::Atan => unary(f64::atan),
        M::Ceil => unary(f64::ceil),
        M::Cos => unary(f64::cos),
        M::Exp => unary(f64::exp),
        M::Floor => unary(f64::floor),
        M::Log => unary(f64::ln),
        M::Round => unary(round),
        M::Sin => unary(f64::sin),
        M::Sqrt => unary(f64::sqrt),
        M::Tan => unary(f64::tan),
        M::Atan2 => {
            let y = engine.to_number(arg(args, 0))?;
            let x = engine.to_number(arg(args, 1))?;
            Ok(Value::number(y.atan2(x)))
        }
        M::Pow => {
            let base = engine.to_number(arg(args, 0))?;
            let exponent = engine.to_number(arg(args, 1))?;
            Ok(Value::number(pow(base, exponent)))
        }
        M::Max => fold(engine, args, f64::NEG_INFINITY, |acc, n| {
            n > acc || (n == 0.0 && acc == 0.0 && acc.is_sign_negative())
        }),
        M::Min => fold(engine, args, f64::INFINITY, |acc, n| {
            n < acc || (n == 0.0 && acc == 0.0 && n.is_sign_negative())
        }),
        M::Random => Ok(Value::number(random())),
        other => unknown_routine(BuiltinId::Math, other),
    }
}

/// Shared body of `max`/`min`: every argument is converted before any NaN
/// short-circuits the result.
fn fold(
    engine: &Engine,
    args: &[Value],
    initial: f64,
    replaces: impl Fn(f64, f64) -> bool,
) -> CompletionValue {
    let mut numbers = Vec::with_capacity(args.len());
    for value in args {
        numbers.push(engine.to_number(value)?);
    }

    let mut result = initial;
    for n in numbers {
        if n.is_nan() {
            return Ok(Value::number(f64::NAN));
        }
        if replaces(result, n) {
            result = n;
        }
    }
    Ok(Value::number(result))
}

/// ES5 §15.8.2.15
fn round(x: f64) -> f64 {
    if x.is_nan() || x.is_infinite() || x == 0.0 {
        return x;
    }
    if (-0.5..0.0).contains(&x) {
        return -0.0;
    }
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// ES5 §15.8.2.13, which differs from `powf` for `1 ** ±Infinity` and NaN
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() {
        return f64::NAN;
    }
    if exponent.is_infinite() && base.abs() == 1.0 {
        return f64::NAN;
    }
    base.powf(exponent)
}

fn random() -> f64 {
    thread_local! {
        static STATE: Cell<u64> = const { Cell::new(0) };
    }

    STATE.with(|state| {
        let mut s = state.get();
        if s == 0 {
            let mut hasher = RandomState::new().build_hasher();
            hasher.write_usize(state as *const _ as usize);
            s = hasher.finish() | 1;
        }

        // xorshift64
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        state.set(s);

        (s >> 11) as f64 / (1u64 << 53) as f64
    })
}
