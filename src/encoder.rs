//! Object and array encoder (spec.md §4.5/§4.6).
//!
//! Walks a [`ToonValue`] tree (already key-folded by [`crate::keypath::fold`])
//! and drives a [`Writer`] to produce TOON text. Array formatting is decided
//! once per array by [`crate::format::select_format`], which has already
//! seen every element by the time this module runs.

use crate::error::Result;
use crate::format::{self, ArrayFormat};
use crate::keypath;
use crate::map::ToonMap;
use crate::options::{Delimiter, ToonOptions};
use crate::quote::QuoteContext;
use crate::value::ToonValue;
use crate::writer::Writer;

/// Encodes `value` to a TOON string under `options`.
pub fn encode(value: &ToonValue, options: &ToonOptions) -> Result<String> {
    options.validate()?;
    let folded = keypath::fold(value, options);
    let mut writer = Writer::new(options.clone());
    encode_root(&mut writer, &folded)?;
    Ok(writer.finish())
}

fn encode_root(writer: &mut Writer, value: &ToonValue) -> Result<()> {
    match value {
        ToonValue::Object(obj) => encode_object_fields(writer, obj, 0),
        ToonValue::Array(arr) => encode_array(writer, None, arr, 0, false),
        scalar => {
            encode_scalar(writer, scalar, QuoteContext::ObjectValue)?;
            writer.write_newline();
            Ok(())
        }
    }
}

fn encode_object_fields(writer: &mut Writer, obj: &ToonMap, indent: usize) -> Result<()> {
    for (key, value) in obj.iter() {
        encode_plain_field(writer, key, value, indent)?;
    }
    Ok(())
}

/// Writes one object field on its own, indented line: `key: value`,
/// `key[N]: ...`, or `key:` followed by a nested block.
fn encode_plain_field(writer: &mut Writer, key: &str, value: &ToonValue, indent: usize) -> Result<()> {
    match value {
        ToonValue::Array(arr) => encode_array(writer, Some(key), arr, indent, false),
        ToonValue::Object(inner) => {
            writer.write_indent(indent);
            writer.write_key(key);
            writer.push_char(':');
            writer.write_newline();
            if !inner.is_empty() {
                encode_object_fields(writer, inner, indent + 1)?;
            }
            Ok(())
        }
        scalar => {
            writer.write_indent(indent);
            writer.write_key(key);
            writer.push_str(": ");
            encode_scalar(writer, scalar, QuoteContext::ObjectValue)?;
            writer.write_newline();
            Ok(())
        }
    }
}

/// Writes a field's key and value starting at the writer's current cursor
/// position, with no leading indentation of its own — used for the field
/// that rides on an EXPANDED array element's dash line.
fn encode_dash_first_field(writer: &mut Writer, key: &str, value: &ToonValue, elem_indent: usize) -> Result<()> {
    match value {
        ToonValue::Array(arr) => encode_array(writer, Some(key), arr, elem_indent + 1, true),
        ToonValue::Object(inner) => {
            writer.write_key(key);
            writer.push_char(':');
            writer.write_newline();
            if !inner.is_empty() {
                encode_object_fields(writer, inner, elem_indent + 2)?;
            }
            Ok(())
        }
        scalar => {
            writer.write_key(key);
            writer.push_str(": ");
            encode_scalar(writer, scalar, QuoteContext::ObjectValue)?;
            writer.write_newline();
            Ok(())
        }
    }
}

fn encode_scalar(writer: &mut Writer, value: &ToonValue, context: QuoteContext) -> Result<()> {
    match value {
        ToonValue::Null => writer.push_str("null"),
        ToonValue::Bool(true) => writer.push_str("true"),
        ToonValue::Bool(false) => writer.push_str("false"),
        ToonValue::Number(n) => writer.write_number(n),
        ToonValue::String(s) => {
            if writer.needs_quote(s, context) {
                writer.write_quoted_string(s);
            } else {
                writer.push_str(s);
            }
        }
        ToonValue::Array(_) | ToonValue::Object(_) => {
            unreachable!("encode_scalar is only called with primitive values")
        }
    }
    Ok(())
}

/// Writes an array, header and body, in whichever format
/// [`format::select_format`] picks.
///
/// `field_indent` is the indent level the array conceptually occupies (its
/// body sits one level deeper). `suppress_header_indent` is set only when
/// the header rides on an already-positioned line (an EXPANDED element's
/// dash-line first field) so the header doesn't re-indent.
fn encode_array(
    writer: &mut Writer,
    key: Option<&str>,
    elements: &[ToonValue],
    field_indent: usize,
    suppress_header_indent: bool,
) -> Result<()> {
    let header_depth = if suppress_header_indent { 0 } else { field_indent };
    let body_indent = field_indent + 1;

    match format::select_format(elements) {
        ArrayFormat::Inline => {
            writer.write_array_header(key, elements.len(), header_depth);
            if !elements.is_empty() {
                writer.push_char(' ');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        writer.write_active_delimiter();
                    }
                    encode_scalar(writer, element, QuoteContext::ArrayElement)?;
                }
            }
            writer.write_newline();
            Ok(())
        }
        ArrayFormat::Tabular { fields } => {
            writer.write_table_header(key, elements.len(), &fields, header_depth);
            writer.write_newline();
            for element in elements {
                let row = element
                    .as_object()
                    .expect("select_format guarantees tabular elements are objects");
                writer.write_indent(body_indent);
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        writer.write_active_delimiter();
                    }
                    let value = row
                        .get(field)
                        .expect("select_format guarantees every row has every field");
                    encode_scalar(writer, value, QuoteContext::ArrayElement)?;
                }
                writer.write_newline();
            }
            Ok(())
        }
        ArrayFormat::Expanded => {
            writer.write_array_header(key, elements.len(), header_depth);
            writer.write_newline();
            writer.push_active_delimiter(Delimiter::Comma);
            for element in elements {
                encode_expanded_element(writer, element, body_indent)?;
            }
            writer.pop_active_delimiter();
            Ok(())
        }
    }
}

fn encode_expanded_element(writer: &mut Writer, element: &ToonValue, elem_indent: usize) -> Result<()> {
    writer.write_indent(elem_indent);
    writer.push_str("- ");
    match element {
        ToonValue::Object(obj) if !obj.is_empty() => {
            let mut fields = obj.iter();
            let (first_key, first_value) = fields.next().expect("non-empty checked above");
            encode_dash_first_field(writer, first_key, first_value, elem_indent)?;
            for (key, value) in fields {
                encode_plain_field(writer, key, value, elem_indent + 1)?;
            }
            Ok(())
        }
        ToonValue::Object(_) => {
            writer.write_newline();
            Ok(())
        }
        ToonValue::Array(arr) => encode_array(writer, None, arr, elem_indent + 1, true),
        scalar => {
            encode_scalar(writer, scalar, QuoteContext::ArrayElement)?;
            writer.write_newline();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    fn opts() -> ToonOptions {
        ToonOptions::default()
    }

    fn obj(pairs: Vec<(&str, ToonValue)>) -> ToonValue {
        let mut m = ToonMap::new();
        for (k, v) in pairs {
            m.insert(k.to_string(), v);
        }
        ToonValue::Object(m)
    }

    #[test]
    fn encodes_flat_object() {
        let value = obj(vec![("name", ToonValue::from("Alice")), ("age", ToonValue::from(30))]);
        assert_eq!(encode(&value, &opts()).unwrap(), "name: Alice\nage: 30\n");
    }

    #[test]
    fn encodes_nested_object() {
        let inner = obj(vec![("name", ToonValue::from("Alice"))]);
        let value = obj(vec![("user", inner)]);
        assert_eq!(encode(&value, &opts()).unwrap(), "user:\n  name: Alice\n");
    }

    #[test]
    fn encodes_inline_array() {
        let value = obj(vec![("nums", ToonValue::Array(vec![
            ToonValue::from(1),
            ToonValue::from(2),
            ToonValue::from(3),
        ]))]);
        assert_eq!(encode(&value, &opts()).unwrap(), "nums[3]: 1,2,3\n");
    }

    #[test]
    fn encodes_empty_array() {
        let value = obj(vec![("items", ToonValue::Array(vec![]))]);
        assert_eq!(encode(&value, &opts()).unwrap(), "items[0]:\n");
    }

    #[test]
    fn encodes_tabular_array() {
        let row = |id: i64, name: &str| obj(vec![("id", ToonValue::from(id)), ("name", ToonValue::from(name))]);
        let value = obj(vec![("users", ToonValue::Array(vec![row(1, "Alice"), row(2, "Bob")]))]);
        assert_eq!(
            encode(&value, &opts()).unwrap(),
            "users[2]{id,name}:\n  1,Alice\n  2,Bob\n"
        );
    }

    #[test]
    fn encodes_expanded_array_with_multi_field_objects() {
        let row = |name: &str, role: &str| obj(vec![("name", ToonValue::from(name)), ("role", ToonValue::from(role))]);
        let a = row("Alice", "admin");
        let b = obj(vec![("name", ToonValue::from("Bob"))]);
        let value = obj(vec![("items", ToonValue::Array(vec![a, b]))]);
        let expected = "items[2]:\n  - name: Alice\n    role: admin\n  - name: Bob\n";
        assert_eq!(encode(&value, &opts()).unwrap(), expected);
    }

    #[test]
    fn nested_array_inside_expanded_element_resets_delimiter_to_comma() {
        let elem = obj(vec![
            ("name", ToonValue::from("Alice")),
            ("tags", ToonValue::Array(vec![ToonValue::from("a"), ToonValue::from("b")])),
        ]);
        let other = obj(vec![("name", ToonValue::from("Bob"))]);
        let value = obj(vec![("items", ToonValue::Array(vec![elem, other]))]);
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        let out = encode(&value, &options).unwrap();
        assert!(out.contains("tags[2]: a,b"));
    }

    #[test]
    fn pipe_delimiter_marks_header_and_separates_elements() {
        let value = obj(vec![("nums", ToonValue::Array(vec![ToonValue::from(1), ToonValue::from(2)]))]);
        let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
        assert_eq!(encode(&value, &options).unwrap(), "nums[2|]: 1|2\n");
    }

    #[test]
    fn quotes_values_that_need_it() {
        let value = obj(vec![("note", ToonValue::from("a, b"))]);
        assert_eq!(encode(&value, &opts()).unwrap(), "note: \"a, b\"\n");
    }

    #[test]
    fn non_finite_numbers_encode_as_null() {
        let value = obj(vec![("x", ToonValue::Number(Number::Float(f64::NAN)))]);
        assert_eq!(encode(&value, &opts()).unwrap(), "x: null\n");
    }

    #[test]
    fn root_scalar_encodes_bare() {
        assert_eq!(encode(&ToonValue::from(42), &opts()).unwrap(), "42\n");
    }

    #[test]
    fn root_array_encodes_without_key() {
        let value = ToonValue::Array(vec![ToonValue::from(1), ToonValue::from(2)]);
        assert_eq!(encode(&value, &opts()).unwrap(), "[2]: 1,2\n");
    }

    #[test]
    fn key_folding_collapses_before_encoding() {
        let c = obj(vec![("c", ToonValue::from(1))]);
        let b = obj(vec![("b", c)]);
        let value = obj(vec![("a", b)]);
        let options = ToonOptions::new().with_key_folding(crate::options::KeyFolding::Safe);
        assert_eq!(encode(&value, &options).unwrap(), "a.b.c: 1\n");
    }
}
