//! Key folding (encode-time) and path expansion (decode-time) — spec.md §4.7.
//!
//! Folding collapses a chain of single-field objects into one dotted key;
//! expansion is its decode-time inverse. The two are independently gated
//! ([`crate::KeyFolding`] / `path_expansion`) so a document can use either,
//! both, or neither.

use crate::error::{Error, Result};
use crate::map::ToonMap;
use crate::options::{KeyFolding, ToonOptions};
use crate::quote::is_valid_unquoted_key;
use crate::value::ToonValue;

/// Applies key folding to `value` per `options`. A no-op when
/// `options.key_folding` is `Off`.
pub fn fold(value: &ToonValue, options: &ToonOptions) -> ToonValue {
    if options.key_folding == KeyFolding::Off {
        return value.clone();
    }
    fold_value(value, options)
}

fn fold_value(value: &ToonValue, options: &ToonOptions) -> ToonValue {
    match value {
        ToonValue::Object(obj) => ToonValue::Object(fold_object(obj, options)),
        ToonValue::Array(arr) => {
            ToonValue::Array(arr.iter().map(|e| fold_value(e, options)).collect())
        }
        other => other.clone(),
    }
}

fn fold_object(obj: &ToonMap, options: &ToonOptions) -> ToonMap {
    let mut result = ToonMap::new();
    for (key, value) in obj.iter() {
        let mut segments = vec![key.clone()];
        let mut current = value;
        while let ToonValue::Object(inner) = current {
            if inner.len() != 1 {
                break;
            }
            if let Some(max) = options.flatten_depth {
                if segments.len() >= max {
                    break;
                }
            }
            let (inner_key, inner_value) = inner.iter().next().expect("len checked above");
            if !is_valid_unquoted_key(inner_key) {
                break;
            }
            segments.push(inner_key.clone());
            current = inner_value;
        }
        let folded_key = segments.join(".");
        result.insert(folded_key, fold_value(current, options));
    }
    result
}

/// A decoded object field: its key text, whether that key was written
/// quoted in the source (quoting opts a key out of path expansion), and its
/// value.
pub struct DecodedField {
    pub key: String,
    pub quoted: bool,
    pub value: ToonValue,
}

/// Assembles a decoded object's fields into a [`ToonMap`], applying path
/// expansion to unquoted dotted keys when `options.path_expansion` is set,
/// and enforcing `options.strict`'s duplicate-key / merge-conflict policy.
pub fn expand_fields(
    fields: Vec<DecodedField>,
    options: &ToonOptions,
    line: usize,
) -> Result<ToonMap> {
    let mut map = ToonMap::new();
    for field in fields {
        let DecodedField { key, quoted, value } = field;
        if !options.path_expansion || quoted || !key.contains('.') {
            if options.strict && map.contains_key(&key) {
                return Err(Error::validation(
                    line,
                    0,
                    format!("duplicate key `{}`", key),
                ));
            }
            map.insert(key, value);
        } else {
            let segments: Vec<String> = key.split('.').map(str::to_string).collect();
            insert_path(&mut map, &segments, value, options.strict, line)?;
        }
    }
    Ok(map)
}

fn insert_path(
    map: &mut ToonMap,
    segments: &[String],
    value: ToonValue,
    strict: bool,
    line: usize,
) -> Result<()> {
    if segments.len() == 1 {
        if strict && map.contains_key(&segments[0]) {
            return Err(Error::validation(
                line,
                0,
                format!("path expansion conflict at key `{}`", segments[0]),
            ));
        }
        map.insert(segments[0].clone(), value);
        return Ok(());
    }

    let head = &segments[0];
    let rest = &segments[1..];
    match map.get_mut(head) {
        Some(ToonValue::Object(inner)) => insert_path(inner, rest, value, strict, line),
        Some(_) if strict => Err(Error::validation(
            line,
            0,
            format!("path expansion conflict at key `{}`: not an object", head),
        )),
        Some(_) => {
            let mut inner = ToonMap::new();
            insert_path(&mut inner, rest, value, strict, line)?;
            map.insert(head.clone(), ToonValue::Object(inner));
            Ok(())
        }
        None => {
            let mut inner = ToonMap::new();
            insert_path(&mut inner, rest, value, strict, line)?;
            map.insert(head.clone(), ToonValue::Object(inner));
            Ok(())
        }
    }
}
