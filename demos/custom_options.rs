//! Customizing TOON output with ToonOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use std::error::Error;
use toon_codec::{to_string, to_string_with_options, Delimiter, KeyFolding, ToonOptions};

#[derive(Debug, Serialize, Deserialize)]
struct Config {
    name: String,
    version: String,
    debug: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct Inner {
    value: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Outer {
    meta: Inner,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        version: "1.0.0".to_string(),
        debug: true,
    };

    println!("Default (comma):");
    let default = to_string(&config)?;
    println!("{}\n", default);

    println!("Tab delimiter:");
    let tab_options = ToonOptions::new().with_delimiter(Delimiter::Tab);
    let tab_format = to_string_with_options(&config, &tab_options)?;
    println!("{:?}\n", tab_format);

    println!("Pipe delimiter:");
    let pipe_options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
    let pipe_format = to_string_with_options(&config, &pipe_options)?;
    println!("{}\n", pipe_format);

    println!("Key folding (single-field object chains collapse to dotted keys):");
    let folded = Outer {
        meta: Inner {
            value: "nested".to_string(),
        },
    };
    let folding_options = ToonOptions::new().with_key_folding(KeyFolding::Safe);
    let folded_toon = to_string_with_options(&folded, &folding_options)?;
    println!("{}", folded_toon);

    Ok(())
}
