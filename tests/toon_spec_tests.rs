use serde::{Deserialize, Serialize};
use toon_codec::{to_string, to_string_with_options, Delimiter, ToonOptions};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    role: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    qty: u32,
    price: f64,
}

#[test]
fn test_tabular_array_format() {
    let users = vec![
        User {
            id: 1,
            name: "Alice".to_string(),
            role: "admin".to_string(),
        },
        User {
            id: 2,
            name: "Bob".to_string(),
            role: "user".to_string(),
        },
    ];

    let toon = to_string(&users).unwrap();
    println!("Tabular format:\n{}", toon);

    assert!(toon.contains("[2]{"));
    assert!(toon.contains("id,name,role"));
    assert!(toon.contains("1,Alice,admin"));
    assert!(toon.contains("2,Bob,user"));
}

#[test]
fn test_inline_primitive_array() {
    let tags = vec!["admin", "developer", "ops"];
    let toon = to_string(&tags).unwrap();
    println!("Inline array:\n{}", toon);

    assert_eq!(toon, "[3]: admin,developer,ops\n");
}

#[test]
fn test_tab_delimiter() {
    let products = vec![
        Product {
            sku: "A1".to_string(),
            qty: 2,
            price: 9.99,
        },
        Product {
            sku: "B2".to_string(),
            qty: 1,
            price: 14.5,
        },
    ];

    let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
    let toon = to_string_with_options(&products, &options).unwrap();
    println!("Tab-delimited tabular:\n{:?}", toon);

    // The header marks its own delimiter with a literal tab inside `[]`,
    // and fields keep the struct's declaration order, not alphabetical.
    assert!(toon.contains("[2\t]{"));
    assert!(toon.contains("sku\tqty\tprice"));
}

#[test]
fn test_pipe_delimiter() {
    let products = vec![
        Product {
            sku: "A1".to_string(),
            qty: 2,
            price: 9.99,
        },
        Product {
            sku: "B2".to_string(),
            qty: 1,
            price: 14.5,
        },
    ];

    let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
    let toon = to_string_with_options(&products, &options).unwrap();
    println!("Pipe-delimited tabular:\n{}", toon);

    assert!(toon.contains("[2|]{"));
    assert!(toon.contains("sku|qty|price"));
}

#[test]
fn test_mixed_array_expanded_format() {
    use toon_codec::ToonValue;

    let mixed = ToonValue::Array(vec![
        ToonValue::from(1),
        {
            let mut obj = toon_codec::ToonMap::new();
            obj.insert("name".to_string(), ToonValue::from("Alice"));
            obj.insert("age".to_string(), ToonValue::from(30));
            ToonValue::Object(obj)
        },
        ToonValue::from("text"),
    ]);

    let toon = toon_codec::encode(&mixed, &ToonOptions::default()).unwrap();
    println!("Mixed array (expanded format):\n{}", toon);

    assert!(toon.contains("[3]:"));
    assert!(toon.contains("- 1"));
    assert!(toon.contains("- name: Alice"));
    assert!(toon.contains("age: 30"));
    assert!(toon.contains("- text"));
}

#[test]
fn test_empty_array() {
    let empty: Vec<String> = vec![];
    let toon = to_string(&empty).unwrap();
    println!("Empty array:\n{}", toon);

    assert_eq!(toon, "[0]:\n");
}

#[test]
fn test_quoting_rules() {
    use toon_codec::ToonMap;
    use toon_codec::ToonValue;

    let mut data = ToonMap::new();
    data.insert("normal".to_string(), ToonValue::from("hello world"));
    data.insert("with_comma".to_string(), ToonValue::from("hello,world"));
    data.insert("with_spaces".to_string(), ToonValue::from(" padded "));
    data.insert("boolean_like".to_string(), ToonValue::from("true"));
    data.insert("number_like".to_string(), ToonValue::from("123"));
    data.insert("empty".to_string(), ToonValue::from(""));

    let toon = toon_codec::encode(&ToonValue::Object(data), &ToonOptions::default()).unwrap();
    println!("Quoting test:\n{}", toon);

    assert!(toon.contains("\"hello,world\""));
    assert!(toon.contains("\" padded \""));
    assert!(toon.contains("\"true\""));
    assert!(toon.contains("\"123\""));
    assert!(toon.contains("empty: \"\""));
    assert!(toon.contains("hello world"));
}

#[test]
fn test_key_folding_collapses_single_field_chains() {
    use toon_codec::KeyFolding;

    #[derive(Serialize)]
    struct C {
        c: i32,
    }
    #[derive(Serialize)]
    struct B {
        b: C,
    }
    #[derive(Serialize)]
    struct A {
        a: B,
    }

    let value = A {
        a: B { b: C { c: 1 } },
    };

    let options = ToonOptions::new().with_key_folding(KeyFolding::Safe);
    let toon = to_string_with_options(&value, &options).unwrap();
    assert_eq!(toon, "a.b.c: 1\n");
}
