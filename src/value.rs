//! Dynamic value representation for hashtable literals.
//!
//! [`PsValue`] is the tagged variant the serializer dispatches on. Each
//! variant has exactly one rendering rule:
//!
//! | Variant | Literal |
//! |---------|---------|
//! | `String` | `'text'`, with `'`, `‘` and `’` doubled |
//! | `Bool` | `$true` / `$false` |
//! | `ScriptBlock` | `{body}`, body emitted verbatim |
//! | `Array` | `@('a', 'b')`, or one joined string with [`ArrayStyle::JoinedString`](crate::ArrayStyle) |
//! | `Hashtable` | nested `@{ ... }` one level deeper |
//! | `Null` | `$null` |
//! | `Number`, `BigInt`, `Date` | display text in single quotes, e.g. `'42'` |
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_pslit::{pslit, PsValue, ScriptBlock};
//!
//! let text = PsValue::from("hello");
//! let flag = PsValue::from(true);
//! let action = PsValue::from(ScriptBlock::new("Get-Date"));
//!
//! let table = pslit!({
//!     "Name": "web01",
//!     "Enabled": true
//! });
//! assert!(table.is_hashtable());
//! ```

use crate::PsMap;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Newtype-struct name that marks a [`ScriptBlock`] travelling through serde.
///
/// The value serializer recognises it and produces [`PsValue::ScriptBlock`]
/// instead of a plain string; every other serializer sees an ordinary string.
pub(crate) const SCRIPT_BLOCK_TOKEN: &str = "$serde_pslit::private::ScriptBlock";

/// A dynamically-typed hashtable value.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{Number, PsValue};
///
/// let null = PsValue::Null;
/// let num = PsValue::Number(Number::Integer(42));
/// let text = PsValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum PsValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    ScriptBlock(ScriptBlock),
    Array(Vec<PsValue>),
    Hashtable(PsMap),
    Date(DateTime<Utc>),
    BigInt(BigInt),
}

/// A numeric value.
///
/// Numbers have no literal form of their own in the output; they are written
/// as their display text inside single quotes.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::Number;
///
/// assert_eq!(Number::Integer(42).as_i64(), Some(42));
/// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
/// assert_eq!(Number::Float(2.5).to_string(), "2.5");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and fits.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// Source text of a script block: a deferred computation.
///
/// The text is opaque. It is written between braces exactly as given, so the
/// caller is responsible for it being valid script. A `ScriptBlock` is also
/// what [`to_script_block`](crate::to_script_block) returns: the whole
/// hashtable literal packaged as executable text rather than plain text.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::ScriptBlock;
///
/// let block = ScriptBlock::new("$_.Name");
/// assert_eq!(block.as_str(), "$_.Name");
/// assert_eq!(block.to_string(), "{$_.Name}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ScriptBlock(String);

impl ScriptBlock {
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        ScriptBlock(body.into())
    }

    /// Returns the body without the surrounding braces.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Displays the block in literal form, braces included.
impl fmt::Display for ScriptBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0)
    }
}

impl Serialize for ScriptBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_newtype_struct(SCRIPT_BLOCK_TOKEN, &self.0)
    }
}

impl<'de> Deserialize<'de> for ScriptBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Visitor;

        struct ScriptBlockVisitor;

        impl<'de> Visitor<'de> for ScriptBlockVisitor {
            type Value = ScriptBlock;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("script block text")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ScriptBlock::new(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ScriptBlock(value))
            }

            fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                String::deserialize(deserializer).map(ScriptBlock)
            }
        }

        deserializer.deserialize_newtype_struct(SCRIPT_BLOCK_TOKEN, ScriptBlockVisitor)
    }
}

impl From<String> for ScriptBlock {
    fn from(value: String) -> Self {
        ScriptBlock(value)
    }
}

impl From<&str> for ScriptBlock {
    fn from(value: &str) -> Self {
        ScriptBlock(value.to_string())
    }
}

impl PsValue {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, PsValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, PsValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, PsValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, PsValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_script_block(&self) -> bool {
        matches!(self, PsValue::ScriptBlock(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, PsValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_hashtable(&self) -> bool {
        matches!(self, PsValue::Hashtable(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PsValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::PsValue;
    ///
    /// assert_eq!(PsValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(PsValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PsValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PsValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_script_block(&self) -> Option<&ScriptBlock> {
        match self {
            PsValue::ScriptBlock(block) => Some(block),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<PsValue>> {
        match self {
            PsValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_hashtable(&self) -> Option<&PsMap> {
        match self {
            PsValue::Hashtable(map) => Some(map),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            PsValue::Null => "null",
            PsValue::Bool(_) => "bool",
            PsValue::Number(_) => "number",
            PsValue::String(_) => "string",
            PsValue::ScriptBlock(_) => "script block",
            PsValue::Array(_) => "array",
            PsValue::Hashtable(_) => "hashtable",
            PsValue::Date(_) => "date",
            PsValue::BigInt(_) => "bigint",
        }
    }
}

/// Generic stringification: the text a value contributes when it has no
/// literal form of its own. Hashtables and arrays only summarise.
impl fmt::Display for PsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PsValue::Null => Ok(()),
            PsValue::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            PsValue::Number(n) => write!(f, "{}", n),
            PsValue::String(s) => f.write_str(s),
            PsValue::ScriptBlock(block) => f.write_str(block.as_str()),
            PsValue::Array(arr) => {
                for (i, v) in arr.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", v)?;
                }
                Ok(())
            }
            PsValue::Hashtable(_) => f.write_str("System.Collections.Hashtable"),
            PsValue::Date(dt) => f.write_str(&dt.to_rfc3339()),
            PsValue::BigInt(bi) => write!(f, "{}", bi),
        }
    }
}

impl Serialize for PsValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PsValue::Null => serializer.serialize_unit(),
            PsValue::Bool(b) => serializer.serialize_bool(*b),
            PsValue::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            PsValue::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            PsValue::String(s) => serializer.serialize_str(s),
            PsValue::ScriptBlock(block) => block.serialize(serializer),
            PsValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            PsValue::Hashtable(map) => {
                use serde::ser::SerializeMap;
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
            PsValue::Date(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            PsValue::BigInt(bi) => serializer.serialize_str(&bi.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for PsValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct PsValueVisitor;

        impl<'de> Visitor<'de> for PsValueVisitor {
            type Value = PsValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any hashtable value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(PsValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(PsValue::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(PsValue::from(value))
            }

            fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => PsValue::Number(Number::Integer(i)),
                    Err(_) => PsValue::BigInt(BigInt::from(value)),
                })
            }

            fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(i) => PsValue::Number(Number::Integer(i)),
                    Err(_) => PsValue::BigInt(BigInt::from(value)),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(PsValue::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(PsValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(PsValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(PsValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(PsValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(PsValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = PsMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(PsValue::Hashtable(values))
            }
        }

        deserializer.deserialize_any(PsValueVisitor)
    }
}

impl TryFrom<PsValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: PsValue) -> crate::Result<Self> {
        match value {
            PsValue::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert {} to i64", n))
            }),
            other => Err(crate::Error::type_mismatch("integer", other.type_name())),
        }
    }
}

impl TryFrom<PsValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: PsValue) -> crate::Result<Self> {
        match value {
            PsValue::Number(n) => Ok(n.as_f64()),
            other => Err(crate::Error::type_mismatch("number", other.type_name())),
        }
    }
}

impl TryFrom<PsValue> for bool {
    type Error = crate::Error;

    fn try_from(value: PsValue) -> crate::Result<Self> {
        match value {
            PsValue::Bool(b) => Ok(b),
            other => Err(crate::Error::type_mismatch("bool", other.type_name())),
        }
    }
}

impl TryFrom<PsValue> for String {
    type Error = crate::Error;

    fn try_from(value: PsValue) -> crate::Result<Self> {
        match value {
            PsValue::String(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl From<bool> for PsValue {
    fn from(value: bool) -> Self {
        PsValue::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PsValue {
                fn from(value: $ty) -> Self {
                    PsValue::Number(Number::Integer(value as i64))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for PsValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => PsValue::Number(Number::Integer(i)),
            Err(_) => PsValue::BigInt(BigInt::from(value)),
        }
    }
}

impl From<f32> for PsValue {
    fn from(value: f32) -> Self {
        PsValue::Number(Number::Float(value as f64))
    }
}

impl From<f64> for PsValue {
    fn from(value: f64) -> Self {
        PsValue::Number(Number::Float(value))
    }
}

impl From<String> for PsValue {
    fn from(value: String) -> Self {
        PsValue::String(value)
    }
}

impl From<&str> for PsValue {
    fn from(value: &str) -> Self {
        PsValue::String(value.to_string())
    }
}

impl From<ScriptBlock> for PsValue {
    fn from(value: ScriptBlock) -> Self {
        PsValue::ScriptBlock(value)
    }
}

impl From<Vec<PsValue>> for PsValue {
    fn from(value: Vec<PsValue>) -> Self {
        PsValue::Array(value)
    }
}

impl From<PsMap> for PsValue {
    fn from(value: PsMap) -> Self {
        PsValue::Hashtable(value)
    }
}

impl From<DateTime<Utc>> for PsValue {
    fn from(value: DateTime<Utc>) -> Self {
        PsValue::Date(value)
    }
}

impl From<BigInt> for PsValue {
    fn from(value: BigInt) -> Self {
        PsValue::BigInt(value)
    }
}
