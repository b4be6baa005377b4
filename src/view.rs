//! Format view descriptors.
//!
//! A [`ViewDescriptor`] describes how objects of a given type are displayed:
//! as a table, a list, or through a single custom script block. It renders to
//! the `<View>` element of a `.format.ps1xml` file.
//!
//! ```rust
//! use serde_pslit::{Alignment, Column, ScriptBlock, ViewDescriptor};
//!
//! let view = ViewDescriptor::table("Contoso.Server")
//!     .column(Column::property("Name").with_width(20))
//!     .column(
//!         Column::script("Uptime", ScriptBlock::new("$_.Uptime.TotalHours"))
//!             .with_alignment(Alignment::Right),
//!     );
//!
//! let xml = view.to_xml().unwrap();
//! assert!(xml.starts_with("<View>\n  <Name>Contoso.Server</Name>"));
//! assert!(xml.contains("<ScriptBlock>$_.Uptime.TotalHours</ScriptBlock>"));
//! ```

use crate::{Error, Result, ScriptBlock};
use std::fmt;
use tracing::trace;

/// Horizontal alignment of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ColumnSource {
    Property(String),
    Script(ScriptBlock),
}

/// One column of a table view, or one item of a list view.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    source: ColumnSource,
    label: Option<String>,
    width: Option<usize>,
    alignment: Option<Alignment>,
}

impl Column {
    /// A column showing the named property.
    pub fn property(name: impl Into<String>) -> Self {
        Column {
            source: ColumnSource::Property(name.into()),
            label: None,
            width: None,
            alignment: None,
        }
    }

    /// A computed column. Script columns always carry a label since there is
    /// no property name to fall back on.
    pub fn script(label: impl Into<String>, block: ScriptBlock) -> Self {
        Column {
            source: ColumnSource::Script(block),
            label: Some(label.into()),
            width: None,
            alignment: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
enum ViewKind {
    Table,
    List,
    Custom(ScriptBlock),
}

/// A display view for one type name.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewDescriptor {
    name: Option<String>,
    type_name: String,
    kind: ViewKind,
    columns: Vec<Column>,
    group_by: Option<String>,
}

impl ViewDescriptor {
    fn with_kind(type_name: impl Into<String>, kind: ViewKind) -> Self {
        ViewDescriptor {
            name: None,
            type_name: type_name.into(),
            kind,
            columns: Vec::new(),
            group_by: None,
        }
    }

    pub fn table(type_name: impl Into<String>) -> Self {
        Self::with_kind(type_name, ViewKind::Table)
    }

    pub fn list(type_name: impl Into<String>) -> Self {
        Self::with_kind(type_name, ViewKind::List)
    }

    /// A view rendered entirely by `action`. Columns are ignored.
    pub fn custom(type_name: impl Into<String>, action: ScriptBlock) -> Self {
        Self::with_kind(type_name, ViewKind::Custom(action))
    }

    /// Sets the view name. Defaults to the type name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn group_by(mut self, property: impl Into<String>) -> Self {
        self.group_by = Some(property.into());
        self
    }

    fn validate(&self) -> Result<()> {
        if self.type_name.trim().is_empty() {
            return Err(Error::invalid_view("type name must not be empty"));
        }
        match &self.kind {
            ViewKind::Table | ViewKind::List if self.columns.is_empty() => Err(
                Error::invalid_view(&format!("view for '{}' has no columns", self.type_name)),
            ),
            ViewKind::Custom(action) if action.as_str().trim().is_empty() => Err(
                Error::invalid_view(&format!("custom view for '{}' has an empty action", self.type_name)),
            ),
            _ => Ok(()),
        }
    }

    /// Renders the `<View>` element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidView`] when the type name is empty, a table or
    /// list view has no columns, or a custom view has an empty action.
    pub fn to_xml(&self) -> Result<String> {
        self.validate()?;
        trace!(type_name = %self.type_name, columns = self.columns.len(), "writing view");

        let mut xml = XmlWriter::default();
        xml.open("View");
        xml.element("Name", self.name.as_deref().unwrap_or(&self.type_name));
        xml.open("ViewSelectedBy");
        xml.element("TypeName", &self.type_name);
        xml.close("ViewSelectedBy");

        if let Some(property) = &self.group_by {
            xml.open("GroupBy");
            xml.element("PropertyName", property);
            xml.close("GroupBy");
        }

        match &self.kind {
            ViewKind::Table => self.write_table(&mut xml),
            ViewKind::List => self.write_list(&mut xml),
            ViewKind::Custom(action) => write_custom(&mut xml, action),
        }

        xml.close("View");
        Ok(xml.finish())
    }

    fn write_table(&self, xml: &mut XmlWriter) {
        xml.open("TableControl");

        xml.open("TableHeaders");
        for column in &self.columns {
            if column.label.is_none() && column.width.is_none() && column.alignment.is_none() {
                xml.empty("TableColumnHeader");
                continue;
            }
            xml.open("TableColumnHeader");
            if let Some(label) = &column.label {
                xml.element("Label", label);
            }
            if let Some(width) = column.width {
                xml.element("Width", &width.to_string());
            }
            if let Some(alignment) = column.alignment {
                xml.element("Alignment", &alignment.to_string());
            }
            xml.close("TableColumnHeader");
        }
        xml.close("TableHeaders");

        xml.open("TableRowEntries");
        xml.open("TableRowEntry");
        xml.open("TableColumnItems");
        for column in &self.columns {
            xml.open("TableColumnItem");
            write_source(xml, &column.source);
            xml.close("TableColumnItem");
        }
        xml.close("TableColumnItems");
        xml.close("TableRowEntry");
        xml.close("TableRowEntries");

        xml.close("TableControl");
    }

    fn write_list(&self, xml: &mut XmlWriter) {
        xml.open("ListControl");
        xml.open("ListEntries");
        xml.open("ListEntry");
        xml.open("ListItems");
        for column in &self.columns {
            xml.open("ListItem");
            if let Some(label) = &column.label {
                xml.element("Label", label);
            }
            write_source(xml, &column.source);
            xml.close("ListItem");
        }
        xml.close("ListItems");
        xml.close("ListEntry");
        xml.close("ListEntries");
        xml.close("ListControl");
    }
}

fn write_source(xml: &mut XmlWriter, source: &ColumnSource) {
    match source {
        ColumnSource::Property(name) => xml.element("PropertyName", name),
        ColumnSource::Script(block) => xml.element("ScriptBlock", block.as_str()),
    }
}

fn write_custom(xml: &mut XmlWriter, action: &ScriptBlock) {
    xml.open("CustomControl");
    xml.open("CustomEntries");
    xml.open("CustomEntry");
    xml.open("CustomItem");
    xml.open("ExpressionBinding");
    xml.element("ScriptBlock", action.as_str());
    xml.close("ExpressionBinding");
    xml.close("CustomItem");
    xml.close("CustomEntry");
    xml.close("CustomEntries");
    xml.close("CustomControl");
}

/// Two-space indented element writer.
#[derive(Default)]
struct XmlWriter {
    output: String,
    depth: usize,
}

impl XmlWriter {
    fn line(&mut self, content: &str) {
        self.output.extend(std::iter::repeat(' ').take(self.depth * 2));
        self.output.push_str(content);
        self.output.push('\n');
    }

    fn open(&mut self, tag: &str) {
        self.line(&format!("<{}>", tag));
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    fn empty(&mut self, tag: &str) {
        self.line(&format!("<{} />", tag));
    }

    fn element(&mut self, tag: &str, text: &str) {
        self.line(&format!("<{tag}>{}</{tag}>", escape_xml(text)));
    }

    fn finish(mut self) -> String {
        if self.output.ends_with('\n') {
            self.output.pop();
        }
        self.output
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_view_layout() {
        let xml = ViewDescriptor::table("Demo.Item")
            .with_name("Items")
            .column(Column::property("Id"))
            .column(Column::property("Name").with_label("Item").with_width(12))
            .to_xml()
            .unwrap();

        let expected = "\
<View>
  <Name>Items</Name>
  <ViewSelectedBy>
    <TypeName>Demo.Item</TypeName>
  </ViewSelectedBy>
  <TableControl>
    <TableHeaders>
      <TableColumnHeader />
      <TableColumnHeader>
        <Label>Item</Label>
        <Width>12</Width>
      </TableColumnHeader>
    </TableHeaders>
    <TableRowEntries>
      <TableRowEntry>
        <TableColumnItems>
          <TableColumnItem>
            <PropertyName>Id</PropertyName>
          </TableColumnItem>
          <TableColumnItem>
            <PropertyName>Name</PropertyName>
          </TableColumnItem>
        </TableColumnItems>
      </TableRowEntry>
    </TableRowEntries>
  </TableControl>
</View>";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_list_view_with_group_by() {
        let xml = ViewDescriptor::list("Demo.Item")
            .group_by("Category")
            .column(Column::script("Size", ScriptBlock::new("$_.Length / 1KB")))
            .to_xml()
            .unwrap();

        assert!(xml.contains("  <GroupBy>\n    <PropertyName>Category</PropertyName>\n  </GroupBy>"));
        assert!(xml.contains("<Label>Size</Label>"));
        assert!(xml.contains("<ScriptBlock>$_.Length / 1KB</ScriptBlock>"));
        assert!(xml.contains("<ListControl>"));
        assert!(xml.contains("<Name>Demo.Item</Name>"));
    }

    #[test]
    fn test_custom_view() {
        let xml = ViewDescriptor::custom("Demo.Item", ScriptBlock::new("\"<$($_.Name)>\""))
            .to_xml()
            .unwrap();
        let binding = format!(
            "<ExpressionBinding>\n{}<ScriptBlock>&quot;&lt;$($_.Name)&gt;&quot;</ScriptBlock>",
            " ".repeat(12)
        );
        assert!(xml.contains(&binding));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_xml("a & b <'c'>"), "a &amp; b &lt;&apos;c&apos;&gt;");
    }

    #[test]
    fn test_invalid_views() {
        assert!(matches!(
            ViewDescriptor::table("T").to_xml(),
            Err(Error::InvalidView(_))
        ));
        assert!(matches!(
            ViewDescriptor::list(" ").column(Column::property("a")).to_xml(),
            Err(Error::InvalidView(_))
        ));
        assert!(matches!(
            ViewDescriptor::custom("T", ScriptBlock::new("  ")).to_xml(),
            Err(Error::InvalidView(_))
        ));
    }
}
