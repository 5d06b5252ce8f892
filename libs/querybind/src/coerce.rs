use std::str::FromStr;

use crate::error::CoercionError;
use crate::kind::{ElementKind, FloatWidth, IntWidth};
use crate::value::Value;

/// Convert one raw query value into a primitive of the given kind.
pub fn coerce(raw: &str, kind: ElementKind) -> Result<Value, CoercionError> {
    match kind {
        ElementKind::Str => Ok(Value::Str(raw.to_string())),
        ElementKind::Bool => parse_bool(raw).map(Value::Bool),
        ElementKind::Int(width) => {
            let invalid = || CoercionError::InvalidInteger {
                raw: raw.to_string(),
                kind,
            };
            let parsed = match width {
                IntWidth::W8 => parse(raw).map(Value::I8),
                IntWidth::W16 => parse(raw).map(Value::I16),
                IntWidth::W32 => parse(raw).map(Value::I32),
                IntWidth::W64 => parse(raw).map(Value::I64),
                IntWidth::Size => parse(raw).map(Value::Isize),
            };
            parsed.ok_or_else(invalid)
        }
        ElementKind::Uint(width) => {
            let invalid = || CoercionError::InvalidInteger {
                raw: raw.to_string(),
                kind,
            };
            let parsed = match width {
                IntWidth::W8 => parse(raw).map(Value::U8),
                IntWidth::W16 => parse(raw).map(Value::U16),
                IntWidth::W32 => parse(raw).map(Value::U32),
                IntWidth::W64 => parse(raw).map(Value::U64),
                IntWidth::Size => parse(raw).map(Value::Usize),
            };
            parsed.ok_or_else(invalid)
        }
        ElementKind::Float(width) => {
            // A finite token that overflows the width must not turn into infinity.
            let parsed = match width {
                FloatWidth::W32 => parse::<f32>(raw)
                    .filter(|v| !v.is_infinite() || spells_infinity(raw))
                    .map(Value::F32),
                FloatWidth::W64 => parse::<f64>(raw)
                    .filter(|v| !v.is_infinite() || spells_infinity(raw))
                    .map(Value::F64),
            };
            parsed.ok_or_else(|| CoercionError::InvalidFloat {
                raw: raw.to_string(),
                kind,
            })
        }
    }
}

fn parse<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    const TRUTHY: [&str; 3] = ["true", "yes", "1"];
    const FALSY: [&str; 3] = ["false", "no", "0"];

    if TRUTHY.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        Ok(true)
    } else if FALSY.iter().any(|t| raw.eq_ignore_ascii_case(t)) {
        Ok(false)
    } else {
        Err(CoercionError::InvalidBoolean {
            raw: raw.to_string(),
        })
    }
}
