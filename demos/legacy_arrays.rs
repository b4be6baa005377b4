//! List arrays versus the historical joined-string rendering.
//!
//! Run with: cargo run --example legacy_arrays

use serde_pslit::{parse_value, pslit, serialize_with_options, ArrayStyle, PsOptions};

fn main() {
    let value = pslit!({
        "Name": "web01",
        "Tags": ["frontend", "eu-west", "canary"]
    });

    let list = serialize_with_options(&value, false, PsOptions::new());
    println!("ArrayStyle::List:\n{}\n", list);
    println!("Parses back: {}\n", parse_value(list.as_str()).is_ok());

    let joined = serialize_with_options(
        &value,
        false,
        PsOptions::new().with_array_style(ArrayStyle::JoinedString),
    );
    println!("ArrayStyle::JoinedString:\n{}\n", joined);
    println!("Parses back: {}", parse_value(joined.as_str()).is_ok());
}
