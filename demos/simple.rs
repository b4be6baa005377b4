//! Basic hashtable literal serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_pslit::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Service {
    name: String,
    display_name: String,
    port: u16,
    auto_start: bool,
    dependencies: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let service = Service {
        name: "Spooler".to_string(),
        display_name: "Print Spooler's Queue".to_string(),
        port: 515,
        auto_start: true,
        dependencies: vec!["RPCSS".to_string(), "http".to_string()],
    };

    let text = to_string(&service)?;
    println!("Literal output:\n{}\n", text);

    let service_back: Service = from_str(&text)?;
    assert_eq!(service, service_back);
    println!("✓ Round-trip successful");

    // Anything that is not a map or struct produces no output
    assert!(to_string(&vec![1, 2, 3])?.is_empty());

    Ok(())
}
