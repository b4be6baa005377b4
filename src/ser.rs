//! Hashtable literal serialization.
//!
//! This module holds the structure-literal writer ([`Serializer`]) and the
//! serde bridge ([`PsValueSerializer`]) that turns any `T: Serialize` into a
//! [`PsValue`] first.
//!
//! ## Layout
//!
//! Depth is passed explicitly down the recursion. A hashtable at depth `d`
//! writes its entries at `(d + 1) * indent` columns and its closing brace at
//! `d * indent` columns. The top-level hashtable starts at
//! [`PsOptions::depth`], so with the defaults (`depth = 1`, `indent = 4`):
//!
//! ```text
//! @{
//!         'Name'='web01'
//!         'Tags'=@{
//!             'Role'='frontend'
//!         }
//!     }
//! ```
//!
//! Two unrelated calls never influence each other's indentation: nothing
//! outside the arguments of a call determines its depth.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_pslit::{pslit, PsOptions, Serializer};
//!
//! let value = pslit!({ "Enabled": true });
//! let mut serializer = Serializer::new(PsOptions::new().with_depth(0));
//! serializer.serialize_value(&value);
//!
//! assert_eq!(serializer.into_inner(), "@{\n    'Enabled'=$true\n}");
//! ```

use crate::value::SCRIPT_BLOCK_TOKEN;
use crate::{ArrayStyle, Error, Number, PsMap, PsOptions, PsValue, Result, ScriptBlock};
use num_bigint::BigInt;
use serde::{ser, Serialize};
use std::fmt;
use tracing::trace;

/// The result of [`serialize`](crate::serialize): literal text, or the same
/// text packaged as a [`ScriptBlock`].
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{pslit, serialize, Literal};
///
/// let literal = serialize(&pslit!({}), true);
/// assert!(literal.is_script_block());
/// assert_eq!(literal.as_str(), "@{\n    }");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Text(String),
    ScriptBlock(ScriptBlock),
}

impl Literal {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Literal::Text(text) => text,
            Literal::ScriptBlock(block) => block.as_str(),
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Literal::Text(text) => text,
            Literal::ScriptBlock(block) => block.into_inner(),
        }
    }

    /// Returns `true` when nothing was written, which is how non-hashtable
    /// input is reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    #[must_use]
    pub const fn is_script_block(&self) -> bool {
        matches!(self, Literal::ScriptBlock(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The hashtable literal writer.
///
/// Writing cannot fail: every [`PsValue`] variant has a rendering rule.
pub struct Serializer {
    output: String,
    options: PsOptions,
}

impl Serializer {
    pub fn new(options: PsOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `value` as a top-level literal.
    ///
    /// Only hashtables produce output; any other variant is skipped and the
    /// buffer is left untouched.
    pub fn serialize_value(&mut self, value: &PsValue) {
        match value {
            PsValue::Hashtable(map) => self.write_hashtable(map, self.options.depth),
            other => {
                trace!(kind = other.type_name(), "top-level value is not a hashtable, skipped");
            }
        }
    }

    fn push_indent(&mut self, columns: usize) {
        self.output.extend(std::iter::repeat(' ').take(columns));
    }

    fn write_hashtable(&mut self, map: &PsMap, depth: usize) {
        let entry_indent = (depth + 1) * self.options.indent;

        self.output.push_str("@{\n");
        for (key, value) in map.iter() {
            trace!(depth, key = %key, kind = value.type_name(), "writing entry");
            self.push_indent(entry_indent);
            write_quoted(&mut self.output, key);
            self.output.push('=');
            self.write_value(value, depth);
            self.output.push('\n');
        }
        self.push_indent(depth * self.options.indent);
        self.output.push('}');
    }

    /// Writes an entry value belonging to a hashtable at `depth`.
    fn write_value(&mut self, value: &PsValue, depth: usize) {
        match value {
            PsValue::String(s) => write_quoted(&mut self.output, s),
            PsValue::ScriptBlock(block) => {
                self.output.push('{');
                self.output.push_str(block.as_str());
                self.output.push('}');
            }
            PsValue::Bool(b) => self.output.push_str(if *b { "$true" } else { "$false" }),
            PsValue::Null => self.output.push_str("$null"),
            PsValue::Array(items) => match self.options.array_style {
                ArrayStyle::List => self.write_array_list(items, depth),
                ArrayStyle::JoinedString => self.write_array_joined(items, depth),
            },
            PsValue::Hashtable(map) => self.write_hashtable(map, depth + 1),
            PsValue::Number(_) | PsValue::Date(_) | PsValue::BigInt(_) => {
                write_quoted(&mut self.output, &value.to_string());
            }
        }
    }

    fn write_array_list(&mut self, items: &[PsValue], depth: usize) {
        self.output.push_str("@(");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.write_value(item, depth);
        }
        self.output.push(')');
    }

    // Each element is stringified inside its own quotes and the whole run is
    // wrapped in one more pair. Inner quotes are left unescaped.
    fn write_array_joined(&mut self, items: &[PsValue], depth: usize) {
        let continuation = (depth + 1) * self.options.indent + self.options.indent;

        self.output.push('\'');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.output.push_str(",\n");
                self.push_indent(continuation);
            }
            self.output.push('\'');
            self.output.push_str(&item.to_string());
            self.output.push('\'');
        }
        self.output.push('\'');
    }
}

/// Characters that close a single-quoted string and are escaped by doubling.
#[inline]
pub(crate) fn is_single_quote(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2018}' | '\u{2019}')
}

fn write_quoted(output: &mut String, s: &str) {
    output.push('\'');
    for ch in s.chars() {
        if is_single_quote(ch) {
            output.push(ch);
        }
        output.push(ch);
    }
    output.push('\'');
}

/// Serde serializer producing a [`PsValue`].
pub struct PsValueSerializer;

pub struct SerializeVec {
    vec: Vec<PsValue>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<PsValue>,
}

pub struct SerializeMap {
    map: PsMap,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: PsMap,
}

/// Wraps an enum variant the externally tagged way: `@{ 'Variant'=value }`.
fn tagged(variant: &'static str, value: PsValue) -> PsValue {
    let mut map = PsMap::with_capacity(1);
    map.insert(variant.to_string(), value);
    PsValue::Hashtable(map)
}

impl ser::Serializer for PsValueSerializer {
    type Ok = PsValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<PsValue> {
        Ok(PsValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<PsValue> {
        Ok(match i64::try_from(v) {
            Ok(i) => PsValue::Number(Number::Integer(i)),
            Err(_) => PsValue::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_u8(self, v: u8) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<PsValue> {
        Ok(match i64::try_from(v) {
            Ok(i) => PsValue::Number(Number::Integer(i)),
            Err(_) => PsValue::BigInt(BigInt::from(v)),
        })
    }

    fn serialize_f32(self, v: f32) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<PsValue> {
        Ok(PsValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<PsValue> {
        Ok(PsValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<PsValue> {
        Ok(PsValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<PsValue> {
        Ok(PsValue::Array(v.iter().map(|&b| PsValue::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<PsValue> {
        Ok(PsValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<PsValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<PsValue> {
        Ok(PsValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<PsValue> {
        Ok(PsValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<PsValue> {
        Ok(PsValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<PsValue>
    where
        T: ?Sized + Serialize,
    {
        let inner = value.serialize(self)?;
        if name == SCRIPT_BLOCK_TOKEN {
            return match inner {
                PsValue::String(body) => Ok(PsValue::ScriptBlock(ScriptBlock::new(body))),
                other => Err(Error::unsupported_type(&format!(
                    "script block body must be a string, found {}",
                    other.type_name()
                ))),
            };
        }
        Ok(inner)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<PsValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, value.serialize(PsValueSerializer)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::with_capacity(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: PsMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: PsMap::with_capacity(len),
            current_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: PsMap::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn with_capacity(len: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(len),
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_ps_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PsValue> {
        Ok(PsValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PsValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<PsValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_ps_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PsValue> {
        Ok(tagged(self.variant, PsValue::Array(self.vec)))
    }
}

/// Hashtable keys are strings. Numeric keys are accepted and stored as text.
fn key_to_string(key: PsValue) -> Result<String> {
    match key {
        PsValue::String(s) => Ok(s),
        PsValue::Number(_) | PsValue::BigInt(_) => Ok(key.to_string()),
        other => Err(Error::custom(format!(
            "hashtable keys must be strings or numbers, found {}",
            other.type_name()
        ))),
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key_to_string(to_ps_value(key)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_ps_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PsValue> {
        Ok(PsValue::Hashtable(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_ps_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PsValue> {
        Ok(PsValue::Hashtable(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = PsValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_ps_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<PsValue> {
        Ok(tagged(self.variant, PsValue::Hashtable(self.map)))
    }
}

fn to_ps_value<T: Serialize + ?Sized>(value: &T) -> Result<PsValue> {
    value.serialize(PsValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pslit;

    fn render(value: &PsValue, options: PsOptions) -> String {
        let mut serializer = Serializer::new(options);
        serializer.serialize_value(value);
        serializer.into_inner()
    }

    #[test]
    fn test_default_layout() {
        let value = pslit!({ "Name": "web01", "Port": 8080 });
        assert_eq!(
            render(&value, PsOptions::new()),
            "@{\n        'Name'='web01'\n        'Port'='8080'\n    }"
        );
    }

    #[test]
    fn test_empty_hashtable() {
        assert_eq!(render(&pslit!({}), PsOptions::new()), "@{\n    }");
        assert_eq!(render(&pslit!({}), PsOptions::new().with_depth(0)), "@{\n}");
    }

    #[test]
    fn test_non_hashtable_writes_nothing() {
        for value in [
            PsValue::from("not a map"),
            PsValue::Bool(true),
            PsValue::Null,
            pslit!(["a", "b"]),
        ] {
            assert_eq!(render(&value, PsOptions::new()), "");
        }
    }

    #[test]
    fn test_quote_escaping() {
        let value = pslit!({ "k": "it's \u{2018}quoted\u{2019}" });
        assert_eq!(
            render(&value, PsOptions::new().with_depth(0)),
            "@{\n    'k'='it''s \u{2018}\u{2018}quoted\u{2019}\u{2019}'\n}"
        );
    }

    #[test]
    fn test_key_escaping() {
        let mut map = PsMap::new();
        map.insert("O'Brien".to_string(), PsValue::Bool(false));
        let text = render(&PsValue::Hashtable(map), PsOptions::new().with_depth(0));
        assert_eq!(text, "@{\n    'O''Brien'=$false\n}");
    }

    #[test]
    fn test_script_block_is_verbatim() {
        let mut map = PsMap::new();
        map.insert(
            "Action".to_string(),
            PsValue::from(ScriptBlock::new(" Write-Host 'hi' ")),
        );
        let text = render(&PsValue::Hashtable(map), PsOptions::new().with_depth(0));
        assert_eq!(text, "@{\n    'Action'={ Write-Host 'hi' }\n}");
    }

    #[test]
    fn test_nested_indentation() {
        let value = pslit!({ "a": { "b": "c" } });
        assert_eq!(
            render(&value, PsOptions::new()),
            "@{\n        'a'=@{\n            'b'='c'\n        }\n    }"
        );
    }

    #[test]
    fn test_other_kinds_are_quoted_text() {
        let value = pslit!({ "n": 42, "f": 1.5, "none": null });
        assert_eq!(
            render(&value, PsOptions::new().with_depth(0)),
            "@{\n    'n'='42'\n    'f'='1.5'\n    'none'=$null\n}"
        );
    }

    #[test]
    fn test_list_arrays() {
        let value = pslit!({ "tags": ["a", true, 3], "empty": [] });
        assert_eq!(
            render(&value, PsOptions::new().with_depth(0)),
            "@{\n    'tags'=@('a', $true, '3')\n    'empty'=@()\n}"
        );
    }

    #[test]
    fn test_hashtable_inside_list_array() {
        let value = pslit!({ "xs": [{ "a": "b" }, ["c"]] });
        assert_eq!(
            render(&value, PsOptions::new()),
            "@{\n        'xs'=@(@{\n            'a'='b'\n        }, @('c'))\n    }"
        );
    }

    #[test]
    fn test_joined_string_arrays() {
        let value = pslit!({ "tags": ["a", "b", "c"] });
        assert_eq!(
            render(&value, PsOptions::legacy()),
            "@{\n        'tags'=''a',\n            'b',\n            'c''\n    }"
        );
    }

    #[test]
    fn test_value_serializer_enums() {
        #[derive(Serialize)]
        enum Shape {
            Unit,
            Circle(f64),
            Rect { w: u32, h: u32 },
            Pair(u8, u8),
        }

        assert_eq!(to_ps_value(&Shape::Unit).unwrap(), PsValue::from("Unit"));
        assert_eq!(
            to_ps_value(&Shape::Circle(1.5)).unwrap(),
            pslit!({ "Circle": 1.5 })
        );
        assert_eq!(
            to_ps_value(&Shape::Rect { w: 2, h: 3 }).unwrap(),
            pslit!({ "Rect": { "w": 2, "h": 3 } })
        );
        assert_eq!(
            to_ps_value(&Shape::Pair(1, 2)).unwrap(),
            pslit!({ "Pair": [1, 2] })
        );
    }

    #[test]
    fn test_value_serializer_keys() {
        use std::collections::BTreeMap;

        let mut numeric = BTreeMap::new();
        numeric.insert(1u32, "one");
        assert_eq!(to_ps_value(&numeric).unwrap(), pslit!({ "1": "one" }));

        let mut bad = BTreeMap::new();
        bad.insert(true, "yes");
        assert!(to_ps_value(&bad).is_err());
    }

    #[test]
    fn test_value_serializer_script_block() {
        let value = to_ps_value(&ScriptBlock::new("$x")).unwrap();
        assert_eq!(value, PsValue::ScriptBlock(ScriptBlock::new("$x")));
    }
}
