//! Hashtable literal parsing.
//!
//! The [`Deserializer`] reads literal text back into a [`PsValue`] and then
//! feeds serde from that value. It accepts everything the serializer writes
//! plus the common hand-written forms:
//!
//! - entries separated by newlines or `;`, keys quoted or bare
//! - single-quoted strings (quote characters escaped by doubling)
//! - double-quoted strings with backtick escapes (no variable expansion)
//! - `$true`, `$false`, `$null`, bare numbers
//! - script blocks `{ ... }` with nested braces and quoted text inside
//! - array literals `@( ... )`
//! - `#` line comments
//!
//! Numbers are written by the serializer as quoted text, so deserializing a
//! numeric type from a string parses the string.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_pslit::from_str;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { name: String, port: u16, enabled: bool }
//!
//! let text = "@{ 'name'='web01'; 'port'='8080'; 'enabled'=$true }";
//! let server: Server = from_str(text).unwrap();
//! assert_eq!(server, Server { name: "web01".into(), port: 8080, enabled: true });
//! ```

use crate::ser::is_single_quote;
use crate::{Error, Number, PsMap, PsValue, Result, ScriptBlock};
use num_bigint::BigInt;
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use tracing::debug;

/// Parses literal text into a [`PsValue`], keeping script blocks intact.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{parse_value, PsValue, ScriptBlock};
///
/// let value = parse_value("@{ 'Action'={ Get-Date } }").unwrap();
/// let table = value.as_hashtable().unwrap();
/// assert_eq!(
///     table.get("Action"),
///     Some(&PsValue::ScriptBlock(ScriptBlock::new(" Get-Date ")))
/// );
/// ```
///
/// # Errors
///
/// Returns a syntax or end-of-input error with line and column information.
pub fn parse_value(input: &str) -> Result<PsValue> {
    Deserializer::from_str(input)
        .parse_document()
        .map_err(|err| {
            debug!(%err, "literal parse failed");
            err
        })
}

/// The literal deserializer.
///
/// Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The source line the cursor is on, for error context.
    fn current_line(&self) -> &'de str {
        let start = self.input[..self.position]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        let end = self.input[self.position..]
            .find('\n')
            .map_or(self.input.len(), |i| self.position + i);
        &self.input[start..end]
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax_with_context(self.line, self.column, msg, self.current_line(), None)
    }

    fn error_with_hint(&self, msg: &str, hint: &str) -> Error {
        Error::syntax_with_context(self.line, self.column, msg, self.current_line(), Some(hint))
    }

    fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.line, self.column, expected, self.current_line())
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.next_char();
        }
    }

    /// Skips whitespace (newlines included) and comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else if ch == '#' {
                self.skip_line_comment();
            } else {
                break;
            }
        }
    }

    /// Skips whitespace on the same line only.
    fn skip_inline_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_separators(&mut self) {
        loop {
            self.skip_trivia();
            if self.peek_char() == Some(';') {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn parse_document(&mut self) -> Result<PsValue> {
        let value = self.parse_value()?;
        self.skip_trivia();
        if !self.at_end() {
            return Err(self.error("unexpected characters after the literal"));
        }
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<PsValue> {
        self.skip_trivia();

        match self.peek_char() {
            None => Err(self.eof("a value")),
            Some('@') => {
                self.next_char();
                match self.next_char() {
                    Some('{') => self.parse_hashtable(),
                    Some('(') => self.parse_array(),
                    Some(_) => Err(self.error("expected '@{' or '@('")),
                    None => Err(self.eof("'{' or '(' after '@'")),
                }
            }
            Some(ch) if is_single_quote(ch) => {
                self.next_char();
                Ok(PsValue::String(self.single_quoted_body()?))
            }
            Some('"') => {
                self.next_char();
                Ok(PsValue::String(self.double_quoted_body()?))
            }
            Some('{') => {
                self.next_char();
                Ok(PsValue::ScriptBlock(self.script_block_body()?))
            }
            Some('$') => {
                self.next_char();
                self.parse_variable()
            }
            Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.' => {
                self.parse_number()
            }
            Some(_) => Err(self.error_with_hint(
                "expected a value",
                "strings are quoted: 'text'",
            )),
        }
    }

    /// Reads a single-quoted string after its opening quote.
    fn single_quoted_body(&mut self) -> Result<String> {
        let mut result = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.eof("closing single quote")),
                Some(ch) if is_single_quote(ch) => match self.peek_char() {
                    Some(escaped) if is_single_quote(escaped) => {
                        self.next_char();
                        result.push(escaped);
                    }
                    _ => return Ok(result),
                },
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Reads a double-quoted string after its opening quote.
    fn double_quoted_body(&mut self) -> Result<String> {
        let mut result = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.eof("closing double quote")),
                Some('`') => match self.next_char() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some('0') => result.push('\0'),
                    Some('a') => result.push('\u{0007}'),
                    Some('b') => result.push('\u{0008}'),
                    Some('f') => result.push('\u{000C}'),
                    Some('v') => result.push('\u{000B}'),
                    Some('e') => result.push('\u{001B}'),
                    Some(other) => result.push(other),
                    None => return Err(self.eof("escaped character")),
                },
                Some('"') => {
                    if self.peek_char() == Some('"') {
                        self.next_char();
                        result.push('"');
                    } else {
                        return Ok(result);
                    }
                }
                Some(ch) => result.push(ch),
            }
        }
    }

    /// Reads a script block after its opening brace. The body is returned
    /// exactly as written.
    fn script_block_body(&mut self) -> Result<ScriptBlock> {
        let start = self.position;
        let mut depth = 1usize;

        loop {
            let ch = self
                .next_char()
                .ok_or_else(|| self.eof("'}' closing the script block"))?;
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let body = &self.input[start..self.position - 1];
                        return Ok(ScriptBlock::new(body));
                    }
                }
                '"' => {
                    self.double_quoted_body()?;
                }
                '#' => self.skip_line_comment(),
                c if is_single_quote(c) => {
                    self.single_quoted_body()?;
                }
                _ => {}
            }
        }
    }

    fn parse_variable(&mut self) -> Result<PsValue> {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                self.next_char();
            } else {
                break;
            }
        }

        let name = &self.input[start..self.position];
        match name.to_ascii_lowercase().as_str() {
            "true" => Ok(PsValue::Bool(true)),
            "false" => Ok(PsValue::Bool(false)),
            "null" => Ok(PsValue::Null),
            _ => Err(self.error_with_hint(
                &format!("unsupported variable '${}'", name),
                "only $true, $false and $null are literal values",
            )),
        }
    }

    fn parse_number(&mut self) -> Result<PsValue> {
        let start = self.position;
        let mut is_float = false;

        if matches!(self.peek_char(), Some('-') | Some('+')) {
            self.next_char();
        }
        self.take_digits();
        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            self.take_digits();
        }
        if matches!(self.peek_char(), Some('e') | Some('E')) {
            is_float = true;
            self.next_char();
            if matches!(self.peek_char(), Some('-') | Some('+')) {
                self.next_char();
            }
            self.take_digits();
        }

        let text = &self.input[start..self.position];
        let digits = text.strip_prefix('+').unwrap_or(text);

        if is_float {
            return digits
                .parse::<f64>()
                .map(|f| PsValue::Number(Number::Float(f)))
                .map_err(|_| self.error(&format!("invalid number '{}'", text)));
        }

        if let Ok(i) = digits.parse::<i64>() {
            return Ok(PsValue::Number(Number::Integer(i)));
        }
        digits
            .parse::<BigInt>()
            .map(PsValue::BigInt)
            .map_err(|_| self.error(&format!("invalid number '{}'", text)))
    }

    fn take_digits(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_ascii_digit() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        match self.peek_char() {
            Some(ch) if is_single_quote(ch) => {
                self.next_char();
                self.single_quoted_body()
            }
            Some('"') => {
                self.next_char();
                self.double_quoted_body()
            }
            Some(ch) if is_bare_key_char(ch) => {
                let start = self.position;
                while let Some(ch) = self.peek_char() {
                    if is_bare_key_char(ch) {
                        self.next_char();
                    } else {
                        break;
                    }
                }
                Ok(self.input[start..self.position].to_string())
            }
            Some(_) => Err(self.error("expected a key")),
            None => Err(self.eof("a key or '}'")),
        }
    }

    /// Reads hashtable entries after `@{`.
    fn parse_hashtable(&mut self) -> Result<PsValue> {
        let mut map = PsMap::new();

        loop {
            self.skip_separators();
            match self.peek_char() {
                None => return Err(self.eof("'}' closing the hashtable")),
                Some('}') => {
                    self.next_char();
                    return Ok(PsValue::Hashtable(map));
                }
                Some(_) => {}
            }

            let (key_line, key_column) = (self.line, self.column);
            let key = self.parse_key()?;

            self.skip_inline_whitespace();
            if self.peek_char() != Some('=') {
                return Err(self.error_with_hint(
                    "expected '=' after key",
                    "entries are written as 'key'=value",
                ));
            }
            self.next_char();

            let value = self.parse_value()?;
            if map.contains_key(&key) {
                return Err(Error::syntax(
                    key_line,
                    key_column,
                    &format!("duplicate key '{}'", key),
                ));
            }
            map.insert(key, value);

            self.skip_inline_whitespace();
            match self.peek_char() {
                None | Some('\n') | Some(';') | Some('}') | Some('#') => {}
                Some(_) => {
                    return Err(self.error_with_hint(
                        "expected a newline or ';' after the entry",
                        "put each entry on its own line or separate entries with ';'",
                    ))
                }
            }
        }
    }

    /// Reads array elements after `@(`.
    fn parse_array(&mut self) -> Result<PsValue> {
        let mut items = Vec::new();

        loop {
            self.skip_separators();
            match self.peek_char() {
                None => return Err(self.eof("')' closing the array")),
                Some(')') => {
                    self.next_char();
                    return Ok(PsValue::Array(items));
                }
                Some(_) => {}
            }

            items.push(self.parse_value()?);

            self.skip_inline_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                None | Some('\n') | Some(';') | Some(')') | Some('#') => {}
                Some(_) => return Err(self.error("expected ',' or ')' after the element")),
            }
        }
    }
}

fn is_bare_key_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-' || ch == '.'
}

macro_rules! parse_then_delegate {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                ValueDeserializer::new(self.parse_document()?).$method(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    parse_then_delegate! {
        deserialize_any deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_option deserialize_unit
        deserialize_seq deserialize_map deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_unit_struct(name, visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_newtype_struct(name, visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_tuple(len, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_tuple_struct(name, len, visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_struct(name, fields, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_enum(name, variants, visitor)
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<PsValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<PsValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, PsValue>,
    value: Option<PsValue>,
}

impl MapDeserializer {
    fn new(map: PsMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(PsValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: PsValue,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(PsValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: PsValue,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            PsValue::Null => Ok(()),
            other => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::type_mismatch("tuple variant", other.type_name())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Hashtable(map) => visitor.visit_map(MapDeserializer::new(map)),
            other => Err(Error::type_mismatch("struct variant", other.type_name())),
        }
    }
}

/// Feeds serde from an already parsed [`PsValue`].
struct ValueDeserializer {
    value: PsValue,
}

impl ValueDeserializer {
    fn new(value: PsValue) -> Self {
        ValueDeserializer { value }
    }

    fn deserialize_number<'de, V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            PsValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            PsValue::String(s) => visit_numeric_text(&s, visitor),
            PsValue::BigInt(bi) => visit_numeric_text(&bi.to_string(), visitor),
            other => Err(Error::type_mismatch("number", other.type_name())),
        }
    }
}

fn visit_numeric_text<'de, V>(text: &str, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        visitor.visit_i64(i)
    } else if let Ok(u) = text.parse::<u64>() {
        visitor.visit_u64(u)
    } else if let Ok(i) = text.parse::<i128>() {
        visitor.visit_i128(i)
    } else if let Ok(u) = text.parse::<u128>() {
        visitor.visit_u128(u)
    } else if let Ok(f) = text.parse::<f64>() {
        visitor.visit_f64(f)
    } else {
        Err(Error::type_mismatch("number", &format!("string '{}'", text)))
    }
}

macro_rules! deserialize_numbers {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.deserialize_number(visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Null => visitor.visit_unit(),
            PsValue::Bool(b) => visitor.visit_bool(b),
            PsValue::Number(Number::Integer(i)) => visitor.visit_i64(i),
            PsValue::Number(Number::Float(f)) => visitor.visit_f64(f),
            PsValue::String(s) => visitor.visit_string(s),
            PsValue::ScriptBlock(block) => visitor.visit_string(block.into_inner()),
            PsValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            PsValue::Hashtable(map) => visitor.visit_map(MapDeserializer::new(map)),
            PsValue::Date(dt) => visitor.visit_string(dt.to_rfc3339()),
            PsValue::BigInt(bi) => visitor.visit_string(bi.to_string()),
        }
    }

    deserialize_numbers! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Bool(b) => visitor.visit_bool(b),
            PsValue::String(s) if s.eq_ignore_ascii_case("true") => visitor.visit_bool(true),
            PsValue::String(s) if s.eq_ignore_ascii_case("false") => visitor.visit_bool(false),
            other => Err(Error::type_mismatch("bool", other.type_name())),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::Null => visitor.visit_unit(),
            other => Err(Error::type_mismatch("null", other.type_name())),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            PsValue::String(s) => visitor.visit_enum(s.into_deserializer()),
            PsValue::Hashtable(map) if map.len() == 1 => {
                let mut entries = map.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer { variant, value }),
                    None => Err(Error::custom("expected enum variant")),
                }
            }
            other => Err(Error::type_mismatch("enum", other.type_name())),
        }
    }

    forward_to_deserialize_any! {
        char str string bytes byte_buf seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pslit;

    #[test]
    fn test_parse_flush_and_indented_forms() {
        let expected = pslit!({ "a": "b", "c": true });
        assert_eq!(parse_value("@{\n'a'='b'\n'c'=$true\n}").unwrap(), expected);
        assert_eq!(
            parse_value("@{\n        'a'='b'\n        'c'=$true\n    }").unwrap(),
            expected
        );
        assert_eq!(parse_value("@{ a = 'b'; c = $TRUE }").unwrap(), expected);
    }

    #[test]
    fn test_parse_escaped_quotes() {
        let value = parse_value("@{ 'k'='it''s \u{2018}\u{2018}x\u{2019}\u{2019}' }").unwrap();
        assert_eq!(
            value.as_hashtable().unwrap().get("k"),
            Some(&PsValue::from("it's \u{2018}x\u{2019}"))
        );
    }

    #[test]
    fn test_parse_double_quoted() {
        let value = parse_value("@{ \"k\"=\"line`none \"\"two\"\" $x\" }").unwrap();
        assert_eq!(
            value.as_hashtable().unwrap().get("k"),
            Some(&PsValue::from("line\none \"two\" $x"))
        );
    }

    #[test]
    fn test_parse_script_block_with_nested_braces() {
        let value =
            parse_value("@{ 'Action'={ if ($x) { '}' } # closing } in comment\n } }").unwrap();
        let block = value
            .as_hashtable()
            .unwrap()
            .get("Action")
            .and_then(PsValue::as_script_block)
            .unwrap();
        assert_eq!(block.as_str(), " if ($x) { '}' } # closing } in comment\n ");
    }

    #[test]
    fn test_parse_arrays_and_numbers() {
        let value = parse_value("@{ 'xs'=@(1, -2.5, 'three', @()); 'big'=123456789012345678901234 }")
            .unwrap();
        let table = value.as_hashtable().unwrap();
        assert_eq!(
            table.get("xs"),
            Some(&PsValue::Array(vec![
                PsValue::from(1),
                PsValue::from(-2.5),
                PsValue::from("three"),
                PsValue::Array(vec![]),
            ]))
        );
        assert!(matches!(table.get("big"), Some(PsValue::BigInt(_))));
    }

    #[test]
    fn test_parse_comments() {
        let text = "# header\n@{\n    # a comment\n    'a'='b' # trailing\n}\n";
        assert_eq!(parse_value(text).unwrap(), pslit!({ "a": "b" }));
    }

    #[test]
    fn test_parse_errors_carry_position() {
        let err = parse_value("@{\n    'a' 'b'\n}").unwrap_err();
        match err {
            Error::Syntax { line, context, .. } => {
                assert_eq!(line, 2);
                assert_eq!(context, "    'a' 'b'");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }

        assert!(matches!(
            parse_value("@{ 'a'='b'"),
            Err(Error::UnexpectedEof { .. })
        ));
        assert!(parse_value("@{ 'a'=$env }").is_err());
        assert!(parse_value("@{ 'a'='b' } extra").is_err());
    }

    #[test]
    fn test_parse_rejects_duplicate_keys() {
        let err = parse_value("@{ 'a'=1; 'a'=2 }").unwrap_err();
        assert!(err.to_string().contains("duplicate key 'a'"));
    }

    #[test]
    fn test_numeric_coercion_from_text() {
        let n: u16 = crate::from_str("'8080'").unwrap();
        assert_eq!(n, 8080);
        let f: f64 = crate::from_str("' 2.5 '").unwrap();
        assert_eq!(f, 2.5);
        assert!(crate::from_str::<u8>("'300'").is_err());
        assert!(crate::from_str::<i32>("'abc'").is_err());
    }
}
