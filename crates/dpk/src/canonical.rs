//! Canonical JSON stringification.
//!
//! Renders a [`serde_json::Value`] byte-for-byte the way ECMAScript
//! `JSON.stringify` does, so keys derived here stay compatible with keys
//! already produced by JavaScript producers:
//!
//! - Object keys in insertion order (`serde_json` is built with `preserve_order`)
//! - No insignificant whitespace
//! - Floats in `Number::prototype.toString` form (`1.0` renders as `1`,
//!   `1e21` as `1e+21`)
//!
//! Integers are rendered exactly, including values beyond 2^53.

use serde_json::{Number, Value};

/// Renders `value` as canonical JSON text.
pub fn to_canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

/// Length of `s` in UTF-16 code units, the unit key lengths are bounded in.
///
/// Equal to the character count for text in the Basic Multilingual Plane;
/// characters outside it count twice.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\u{20}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

fn write_number(out: &mut String, n: &Number) {
    if let Some(i) = n.as_i64() {
        out.push_str(&i.to_string());
    } else if let Some(u) = n.as_u64() {
        out.push_str(&u.to_string());
    } else if let Some(f) = n.as_f64() {
        out.push_str(&format_f64(f));
    }
}

/// Formats a float per ECMAScript `Number::toString`.
///
/// Rust's `{:e}` already yields the shortest round-trip digits; only their
/// placement differs. With `k` digits and decimal exponent `n` (value is
/// `0.d1d2..dk * 10^n`):
///
/// - `k <= n <= 21`: digits then `n - k` zeros
/// - `0 < n <= 21`: decimal point after `n` digits
/// - `-6 < n <= 0`: `0.` then `-n` zeros then digits
/// - otherwise exponent form `d.ddde±x`
fn format_f64(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    if f < 0.0 {
        return format!("-{}", format_f64(-f));
    }

    let sci = format!("{:e}", f);
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return sci;
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        let mut s = digits;
        s.extend(std::iter::repeat('0').take((n - k) as usize));
        s
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        let mut s = String::from("0.");
        s.extend(std::iter::repeat('0').take((-n) as usize));
        s.push_str(&digits);
        s
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}
