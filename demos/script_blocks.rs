//! Embedding code fragments and wrapping the whole literal as a script block.
//!
//! Run with: cargo run --example script_blocks

use serde::Serialize;
use serde_pslit::{parse_value, to_script_block, to_string, ScriptBlock};
use std::error::Error;

#[derive(Serialize)]
struct ScheduledTask {
    name: String,
    trigger: String,
    action: ScriptBlock,
}

fn main() -> Result<(), Box<dyn Error>> {
    let task = ScheduledTask {
        name: "Purge temp".to_string(),
        trigger: "Daily 03:00".to_string(),
        action: ScriptBlock::new(" Get-ChildItem $env:TEMP | Remove-Item -Recurse -Force "),
    };

    let text = to_string(&task)?;
    println!("Literal text:\n{}\n", text);

    // The body is kept verbatim when the literal is parsed back
    let parsed = parse_value(&text)?;
    let action = parsed
        .as_hashtable()
        .and_then(|table| table.get("action"))
        .and_then(|value| value.as_script_block());
    println!("Parsed action body: {:?}\n", action.map(ScriptBlock::as_str));

    let block = to_script_block(&task)?;
    println!("As a script block:\n{}", block);

    Ok(())
}
