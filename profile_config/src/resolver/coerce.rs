//! Coercion of stored entries and default literals into a field kind.
//!
//! Every function returns a [`Value`] normalised for the kind: integers are
//! range-checked and widened to 64 bits, floats are checked against the
//! target width, and collections are coerced element by element. Failures
//! are reported as a human-readable reason; the caller decides whether that
//! is a lookup miss or a [`crate::ProfileError::DefaultParse`].

use figment::value::{Dict, Num, Tag, Value};

use crate::schema::FieldKind;
use crate::store::Entry;

/// Coerce an uncoerced store entry.
pub(crate) fn from_entry(entry: Entry<'_>, kind: &FieldKind) -> Result<Value, String> {
    match entry {
        Entry::Document(value) => from_value(value, kind),
        Entry::Raw(raw) => from_raw(raw, kind),
    }
}

/// Parse a default literal.
///
/// Scalars use the same rules as overlay strings. Structured kinds expect
/// a JSON literal such as `["admin","root"]` or `{"level":"debug"}`.
pub(crate) fn parse_default(literal: &str, kind: &FieldKind) -> Result<Value, String> {
    match kind {
        FieldKind::Sequence(_) | FieldKind::Mapping(_) | FieldKind::Any => {
            let parsed: Value = serde_json::from_str(literal).map_err(|err| err.to_string())?;
            from_value(&parsed, kind)
        }
        _ => from_raw(literal, kind),
    }
}

fn from_raw(raw: &str, kind: &FieldKind) -> Result<Value, String> {
    match kind {
        FieldKind::String => Ok(Value::String(Tag::Default, raw.to_owned())),
        FieldKind::Bool => parse_bool(raw).map(|flag| Value::Bool(Tag::Default, flag)),
        FieldKind::Int { bits, signed } => {
            parse_integer(raw).and_then(|value| fit_integer(value, *bits, *signed))
        }
        FieldKind::Float { bits } => parse_float(raw).and_then(|value| fit_float(value, *bits)),
        FieldKind::Sequence(_) => match parse_structured(raw) {
            list @ (Value::Array(..) | Value::Dict(..)) => from_value(&list, kind),
            scalar => from_value(&Value::Array(Tag::Default, vec![scalar]), kind),
        },
        FieldKind::Mapping(_) | FieldKind::Any => from_value(&parse_structured(raw), kind),
        FieldKind::Composite(_) | FieldKind::Skip => Err(format!("no coercion rule for {kind}")),
    }
}

fn from_value(value: &Value, kind: &FieldKind) -> Result<Value, String> {
    match (kind, value) {
        (FieldKind::Any, any) => Ok(any.clone()),
        (FieldKind::Bool, Value::Bool(_, flag)) => Ok(Value::Bool(Tag::Default, *flag)),
        (FieldKind::Bool, Value::String(_, text)) => {
            parse_bool(text).map(|flag| Value::Bool(Tag::Default, flag))
        }
        (FieldKind::String, scalar) => {
            scalar_to_string(scalar).map(|text| Value::String(Tag::Default, text))
        }
        (FieldKind::Int { bits, signed }, Value::Num(_, num)) => num_to_integer(*num)
            .ok_or_else(|| format!("expected an integer, found {}", value.to_actual()))
            .and_then(|int| fit_integer(int, *bits, *signed)),
        (FieldKind::Int { bits, signed }, Value::String(_, text)) => {
            parse_integer(text).and_then(|int| fit_integer(int, *bits, *signed))
        }
        (FieldKind::Float { bits }, Value::Num(_, num)) => num_to_float(*num)
            .ok_or_else(|| format!("{} does not fit a float", value.to_actual()))
            .and_then(|float| fit_float(float, *bits)),
        (FieldKind::Float { bits }, Value::String(_, text)) => {
            parse_float(text).and_then(|float| fit_float(float, *bits))
        }
        (FieldKind::Sequence(element), Value::Array(_, items)) => items
            .iter()
            .map(|item| from_value(item, element))
            .collect::<Result<Vec<_>, _>>()
            .map(|coerced| Value::Array(Tag::Default, coerced)),
        (FieldKind::Mapping(element), Value::Dict(_, entries)) => entries
            .iter()
            .map(|(key, item)| from_value(item, element).map(|coerced| (key.clone(), coerced)))
            .collect::<Result<Dict, _>>()
            .map(|coerced| Value::Dict(Tag::Default, coerced)),
        (FieldKind::Composite(_) | FieldKind::Skip, _) => {
            Err(format!("no coercion rule for {kind}"))
        }
        (_, other) => Err(format!("expected {kind}, found {}", other.to_actual())),
    }
}

/// Accepts `true`/`false` in any case, and `1`/`0`.
fn parse_bool(raw: &str) -> Result<bool, String> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Ok(false)
    } else {
        Err(format!("{raw:?} is not a boolean"))
    }
}

fn parse_integer(raw: &str) -> Result<i128, String> {
    raw.trim()
        .parse::<i128>()
        .map_err(|err| format!("{raw:?} is not a base-10 integer: {err}"))
}

fn parse_float(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|err| format!("{raw:?} is not a decimal number: {err}"))
}

fn fit_integer(value: i128, bits: u32, signed: bool) -> Result<Value, String> {
    let prefix = if signed { 'i' } else { 'u' };
    let out_of_range = || format!("{value} is out of range for {prefix}{bits}");
    let shift = u64::BITS
        .checked_sub(bits)
        .filter(|_| bits > 0)
        .ok_or_else(|| format!("unsupported integer width {bits}"))?;
    if signed {
        let narrowed = i64::try_from(value).map_err(|_| out_of_range())?;
        let max = i64::MAX.checked_shr(shift).unwrap_or(0);
        let min = i64::MIN.checked_shr(shift).unwrap_or(-1);
        if !(min..=max).contains(&narrowed) {
            return Err(out_of_range());
        }
        Ok(Value::Num(Tag::Default, Num::I64(narrowed)))
    } else {
        let narrowed = u64::try_from(value).map_err(|_| out_of_range())?;
        let max = u64::MAX.checked_shr(shift).unwrap_or(0);
        if narrowed > max {
            return Err(out_of_range());
        }
        Ok(Value::Num(Tag::Default, Num::U64(narrowed)))
    }
}

fn fit_float(value: f64, bits: u32) -> Result<Value, String> {
    match bits {
        64 => Ok(Value::Num(Tag::Default, Num::F64(value))),
        32 if value.is_finite() && value.abs() > f64::from(f32::MAX) => {
            Err(format!("{value} overflows f32"))
        }
        32 => Ok(Value::Num(Tag::Default, Num::F64(value))),
        other => Err(format!("unsupported float width {other}")),
    }
}

fn num_to_integer(num: Num) -> Option<i128> {
    match num {
        Num::U8(v) => Some(i128::from(v)),
        Num::U16(v) => Some(i128::from(v)),
        Num::U32(v) => Some(i128::from(v)),
        Num::U64(v) => Some(i128::from(v)),
        Num::U128(v) => i128::try_from(v).ok(),
        Num::USize(v) => i128::try_from(v).ok(),
        Num::I8(v) => Some(i128::from(v)),
        Num::I16(v) => Some(i128::from(v)),
        Num::I32(v) => Some(i128::from(v)),
        Num::I64(v) => Some(i128::from(v)),
        Num::I128(v) => Some(v),
        Num::ISize(v) => i128::try_from(v).ok(),
        Num::F32(_) | Num::F64(_) => None,
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integral document values widen to floats the way YAML and TOML readers do"
)]
fn num_to_float(num: Num) -> Option<f64> {
    match num {
        Num::F32(v) => Some(f64::from(v)),
        Num::F64(v) => Some(v),
        Num::U128(v) => Some(v as f64),
        other => num_to_integer(other).map(|v| v as f64),
    }
}

fn num_to_string(num: Num) -> String {
    match num {
        Num::F32(v) => v.to_string(),
        Num::F64(v) => v.to_string(),
        Num::U128(v) => v.to_string(),
        other => num_to_integer(other).map_or_else(String::new, |v| v.to_string()),
    }
}

fn scalar_to_string(value: &Value) -> Result<String, String> {
    match value {
        Value::String(_, text) => Ok(text.clone()),
        Value::Char(_, c) => Ok(c.to_string()),
        Value::Bool(_, flag) => Ok(flag.to_string()),
        Value::Num(_, num) => Ok(num_to_string(*num)),
        other => Err(format!("expected string, found {}", other.to_actual())),
    }
}

/// Determine if an overlay string is a comma-separated list rather than
/// structured data.
///
/// The value is treated as CSV when it contains a comma and does not start
/// with `[`, `{`, `"` or `'`.
fn should_parse_as_csv(value: &str) -> bool {
    value.contains(',') && !matches!(value.chars().next(), Some('[' | '{' | '"' | '\''))
}

/// Read an overlay string destined for a structured kind.
///
/// JSON arrays and objects are accepted, as is figment's own literal syntax
/// (`[a, b]`, `{key=value}`); bare comma-separated text becomes a list of
/// strings.
fn parse_structured(raw: &str) -> Value {
    let trimmed = raw.trim();
    if should_parse_as_csv(trimmed) {
        return Value::Array(
            Tag::Default,
            trimmed
                .split(',')
                .map(|item| Value::String(Tag::Default, item.trim().to_owned()))
                .collect(),
        );
    }
    if trimmed.starts_with(['[', '{']) {
        if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
            return json;
        }
    }
    trimmed
        .parse()
        .unwrap_or_else(|_| Value::String(Tag::Default, trimmed.to_owned()))
}
