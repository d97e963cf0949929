//! TOON Format Specification
//!
//! This module documents the TOON (Token-Oriented Object Notation) format as
//! implemented by this library.
//!
//! # Overview
//!
//! TOON is a minimalist data serialization format designed for efficient
//! token usage in Large Language Model contexts. It achieves 30-60% token
//! reduction compared to JSON while remaining unambiguously convertible to
//! and from a JSON-equivalent value tree ([`crate::ToonValue`]).
//!
//! ## Design Philosophy
//!
//! - **Token efficiency**: no braces, brackets, or redundant quotes
//! - **Readability**: structure carried by indentation, not punctuation
//! - **Structural typing**: homogeneous object arrays compress into tables
//! - **Round-trip safety**: every decode produces the value tree that was
//!   encoded, modulo object field order
//!
//! # Core Syntax
//!
//! ## Objects
//!
//! Objects are newline-delimited key-value pairs, colon-separated:
//!
//! ```text
//! name: Alice
//! age: 30
//! active: true
//! ```
//!
//! - An unquoted key must match `[A-Za-z_][A-Za-z0-9_]*` (optionally
//!   dot-separated segments of that shape, produced by key folding). Any
//!   other key text must be quoted: `"2ndPlace": 1`, `"user-id": 7`.
//! - The space after `:` is conventional but not required on decode.
//! - Nested objects are indented one level (default 2 spaces) below their
//!   parent key.
//! - Field order is preserved in insertion order — it is never sorted.
//!
//! ## Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | Null | `null` | `value: null` |
//! | Boolean | `true` or `false` | `active: true` |
//! | Integer | Decimal digits, optional `-` | `count: 42` |
//! | Float | Decimal with `.`, no exponent | `price: 19.99` |
//! | String | Unquoted or `"quoted"` | `name: Alice` |
//!
//! Numbers are always written in canonical decimal form: no leading zeros
//! (other than a lone `0`), no trailing fractional zeros, no exponent
//! notation, and no `-0` (canonicalized to `0`). A non-finite float (`NaN`,
//! `inf`, `-inf`) encodes as the `null` literal — TOON has no token for
//! non-finite numbers, so the distinction from an actual null is not
//! preserved across a round trip.
//!
//! ## Strings
//!
//! Strings are unquoted by default. Quoting is required when a string:
//!
//! - is empty, or starts/ends with whitespace
//! - contains the active delimiter for its context (comma by default; see
//!   [`crate::Delimiter`])
//! - contains `:`, `"`, `\`, or a control character
//! - is exactly a reserved word (`true`, `false`, `null`)
//! - would otherwise parse as a number (`"42"`, `"-3.14"`)
//! - starts with `- ` (would be read as a list marker)
//!
//! Escape sequences inside a quoted string: `\\`, `\"`, `\n`, `\r`, `\t`. No
//! other escapes are recognized.
//!
//! # Array Formats
//!
//! An array's format is chosen once, after every element is known, by
//! inspecting its full element set (see [`crate::format::select_format`]).
//!
//! ## Inline
//!
//! Used when every element is a primitive (including the empty array):
//!
//! ```text
//! nums[3]: 1,2,3
//! names[2]: Alice,Bob
//! empty[0]:
//! ```
//!
//! `key[N]: element,element,...` — `N` is the element count; elements are
//! joined by the active delimiter.
//!
//! ## Tabular
//!
//! Used when every element is an object, all objects share the same set of
//! field names in the same order, and every field value is a primitive:
//!
//! ```text
//! users[3]{id,name,price}:
//!   1,Widget,9.99
//!   2,Gadget,14.99
//!   3,Tool,19.99
//! ```
//!
//! `key[N]{field,field,...}:` followed by one indented row per element, each
//! row's values in header order, delimiter-joined. This is TOON's signature
//! compression: field names are written once instead of once per element.
//!
//! ## Expanded
//!
//! Used for anything else — heterogeneous elements, nested arrays/objects
//! as field values, or objects with differing field sets:
//!
//! ```text
//! items[2]:
//!   - name: Alice
//!     role: admin
//!   - name: Bob
//! ```
//!
//! `key[N]:` followed by one dash-prefixed line per element. An object
//! element's first field rides the dash line (`- name: Alice`); remaining
//! fields are indented to align under it. A nested array or object inside
//! an expanded element indents one further level than the element's own
//! fields.
//!
//! # Delimiters
//!
//! | Delimiter | Character | Header marker |
//! |-----------|-----------|----------------|
//! | Comma (default) | `,` | none |
//! | Tab | `\t` | a tab inside the brackets |
//! | Pipe | `\|` | `\|` inside the brackets |
//!
//! ```text
//! nums[3]: 1,2,3        comma (default)
//! nums[3|]: 1|2|3        pipe
//! ```
//!
//! The document-level delimiter is set via [`crate::ToonOptions::delimiter`].
//! An array nested directly inside another array's element always resets to
//! comma for its own header and body, regardless of the document default,
//! so that a non-comma outer delimiter can't be mistaken for the inner
//! array's own.
//!
//! # Indentation
//!
//! Indentation width is configurable ([`crate::ToonOptions::indent_size`],
//! default 2 spaces) and is significant: it is how the decoder recovers
//! nesting, exactly as it is how the encoder expresses it.
//!
//! # Edge Cases
//!
//! - An empty array encodes as `key[0]:` with no body.
//! - An empty object encodes as `key:` with no body; decoding `key:` with
//!   nothing indented beneath it produces an empty object, not `null`.
//! - A root-level scalar, array, or object is encoded with no leading key.
//!
//! # Key Folding and Path Expansion
//!
//! With [`crate::KeyFolding::Safe`] enabled, the encoder collapses a chain
//! of single-field objects into one dotted key, bounded by
//! [`crate::ToonOptions::flatten_depth`], only when every segment is a valid
//! unquoted key on its own:
//!
//! ```text
//! a:
//!   b:
//!     c: 1
//! ```
//!
//! folds to:
//!
//! ```text
//! a.b.c: 1
//! ```
//!
//! [`crate::ToonOptions::path_expansion`] is the decode-time inverse: a
//! dotted key is expanded back into nested objects. Two dotted keys that
//! disagree partway through their path is a merge conflict — a hard error
//! in strict mode, and last-writer-wins otherwise.
//!
//! # Rust Enum Serialization
//!
//! These conventions are properties of this library's serde integration,
//! not of the wire format itself:
//!
//! - Unit variants serialize as bare strings: `Active`
//! - Newtype variants serialize as a single-key object: `Wrapped: 7`
//! - Tuple variants serialize as a single-key object whose value is an
//!   array: `Pair:\n  [2]: 1,2`
//! - Struct variants serialize as a single-key object whose value is an
//!   object: `Circle:\n  radius: 2.5`
//!
//! # Format Comparison
//!
//! JSON (108 bytes):
//!
//! ```json
//! [{"id":1,"name":"Alice","active":true},{"id":2,"name":"Bob","active":true}]
//! ```
//!
//! TOON (58 bytes):
//!
//! ```text
//! [2]{id,name,active}:
//!   1,Alice,true
//!   2,Bob,true
//! ```
//!
//! # Limitations
//!
//! - Map/object keys must be strings.
//! - Tabular format requires identical field sets, in the same order, with
//!   every value a primitive — anything else falls back to expanded format.
//! - Comments are not part of the format.

// This module contains only documentation; no implementation code.
