//! Using the pslit! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_pslit::{pslit, serialize, serialize_with_options, PsOptions, PsValue};

fn main() {
    let config = pslit!({
        "App": {
            "Name": "MyApp",
            "Version": "1.0.0"
        },
        "Database": {
            "Host": "localhost",
            "Port": 5432
        },
        "Features": ["auth", "logging", "metrics"],
        "Debug": true,
        "Proxy": null
    });

    println!("Default layout:\n{}\n", serialize(&config, false));

    let flush = PsOptions::new().with_depth(0).with_indent(2);
    println!("Flush layout:\n{}\n", serialize_with_options(&config, false, flush));

    if let PsValue::Hashtable(table) = &config {
        println!("Keys in order: {:?}", table.keys().collect::<Vec<_>>());
    }
}
