//! Emitting format view descriptors.
//!
//! Run with: cargo run --example format_view

use serde_pslit::{Alignment, Column, ScriptBlock, ViewDescriptor};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let table = ViewDescriptor::table("Contoso.Server")
        .with_name("ServerTable")
        .group_by("Region")
        .column(Column::property("Name").with_width(24))
        .column(Column::property("Status").with_alignment(Alignment::Center))
        .column(
            Column::script("Uptime (h)", ScriptBlock::new("[math]::Round($_.Uptime.TotalHours, 1)"))
                .with_alignment(Alignment::Right),
        );
    println!("{}\n", table.to_xml()?);

    let list = ViewDescriptor::list("Contoso.Server")
        .column(Column::property("Name"))
        .column(Column::property("IPAddress").with_label("Address"));
    println!("{}\n", list.to_xml()?);

    let custom = ViewDescriptor::custom(
        "Contoso.Banner",
        ScriptBlock::new("\"== $($_.Title) ==\""),
    );
    println!("{}", custom.to_xml()?);

    Ok(())
}
