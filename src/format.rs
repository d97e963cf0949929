//! Array-format selection (spec.md §4.4).
//!
//! An array's elements are always fully built into a [`crate::ToonValue`]
//! tree before any text is emitted — the "two-pass" design spec.md's notes
//! call for falls out naturally from that: `select_format` only runs once
//! every element already exists, so it can inspect the whole shape instead
//! of committing to a layout before seeing later elements.

use crate::value::ToonValue;

/// The layout an array encodes as.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayFormat {
    /// All elements are primitives (or the array is empty): `[N]: a,b,c`.
    Inline,
    /// Every element is an object sharing the same non-empty, all-primitive
    /// field set in the same order: `[N]{f1,f2}:` with one row per element.
    Tabular { fields: Vec<String> },
    /// Anything else: one dash-prefixed block per element.
    Expanded,
}

fn is_primitive(v: &ToonValue) -> bool {
    matches!(
        v,
        ToonValue::Null | ToonValue::Bool(_) | ToonValue::Number(_) | ToonValue::String(_)
    )
}

/// Field names of `v` if it is a non-empty object whose values are all
/// primitive, `None` otherwise.
fn tabular_row_fields(v: &ToonValue) -> Option<Vec<String>> {
    let ToonValue::Object(obj) = v else {
        return None;
    };
    if obj.is_empty() {
        return None;
    }
    if !obj.values().all(is_primitive) {
        return None;
    }
    Some(obj.keys().cloned().collect())
}

/// Picks the format an array's elements encode as.
///
/// An empty array is always INLINE (spec.md §4.4). An all-primitive array
/// is INLINE. An array whose every element is an object with the exact
/// same ordered field set, all primitive-valued, is TABULAR. Anything else
/// — including a heterogeneous mix of objects/primitives/nested arrays — is
/// EXPANDED.
pub fn select_format(elements: &[ToonValue]) -> ArrayFormat {
    if elements.is_empty() {
        return ArrayFormat::Inline;
    }
    if elements.iter().all(is_primitive) {
        return ArrayFormat::Inline;
    }
    if let Some(first_fields) = tabular_row_fields(&elements[0]) {
        let uniform = elements[1..].iter().all(|e| {
            tabular_row_fields(e)
                .map(|fields| fields == first_fields)
                .unwrap_or(false)
        });
        if uniform {
            return ArrayFormat::Tabular {
                fields: first_fields,
            };
        }
    }
    ArrayFormat::Expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ToonMap;
    use crate::value::Number;

    fn obj(pairs: &[(&str, ToonValue)]) -> ToonValue {
        let mut m = ToonMap::new();
        for (k, v) in pairs {
            m.insert((*k).to_string(), v.clone());
        }
        ToonValue::Object(m)
    }

    #[test]
    fn empty_array_is_inline() {
        assert_eq!(select_format(&[]), ArrayFormat::Inline);
    }

    #[test]
    fn all_primitive_is_inline() {
        let elements = vec![
            ToonValue::Number(Number::Integer(1)),
            ToonValue::String("x".into()),
            ToonValue::Bool(true),
            ToonValue::Null,
        ];
        assert_eq!(select_format(&elements), ArrayFormat::Inline);
    }

    #[test]
    fn uniform_primitive_objects_are_tabular() {
        let elements = vec![
            obj(&[("id", ToonValue::from(1)), ("name", ToonValue::from("Alice"))]),
            obj(&[("id", ToonValue::from(2)), ("name", ToonValue::from("Bob"))]),
        ];
        assert_eq!(
            select_format(&elements),
            ArrayFormat::Tabular {
                fields: vec!["id".to_string(), "name".to_string()]
            }
        );
    }

    #[test]
    fn differing_field_sets_are_expanded() {
        let elements = vec![
            obj(&[("id", ToonValue::from(1))]),
            obj(&[("name", ToonValue::from("Bob"))]),
        ];
        assert_eq!(select_format(&elements), ArrayFormat::Expanded);
    }

    #[test]
    fn nested_object_or_array_field_breaks_tabular() {
        let elements = vec![
            obj(&[("id", ToonValue::from(1)), ("tags", ToonValue::Array(vec![]))]),
            obj(&[("id", ToonValue::from(2)), ("tags", ToonValue::Array(vec![]))]),
        ];
        assert_eq!(select_format(&elements), ArrayFormat::Expanded);
    }

    #[test]
    fn heterogeneous_mix_is_expanded() {
        let elements = vec![ToonValue::from(1), obj(&[("id", ToonValue::from(2))])];
        assert_eq!(select_format(&elements), ArrayFormat::Expanded);
    }
}
