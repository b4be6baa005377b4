//! # serde_pslit
//!
//! Serializes ordered key/value structures into PowerShell hashtable literal
//! text (`@{ 'key'='value' }`), the format used for generated configuration
//! fragments and module manifests.
//!
//! ## Key Features
//!
//! - **Ordered**: entries are written in insertion order, never sorted
//! - **Safe quoting**: `'`, `‘` and `’` are escaped by doubling, in keys and values
//! - **Script blocks**: [`ScriptBlock`] values are embedded verbatim as `{ ... }`
//! - **Serde Compatible**: any `T: Serialize` can be rendered, and literals
//!   parse back through `#[derive(Deserialize)]`
//! - **Explicit depth**: indentation depends only on the arguments of a call
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_pslit::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Module {
//!     name: String,
//!     version: String,
//!     exported: bool,
//! }
//!
//! let module = Module {
//!     name: "Contoso.Tools".to_string(),
//!     version: "1.2.0".to_string(),
//!     exported: true,
//! };
//!
//! let text = to_string(&module).unwrap();
//! assert_eq!(
//!     text,
//!     "@{\n        'name'='Contoso.Tools'\n        'version'='1.2.0'\n        'exported'=$true\n    }"
//! );
//!
//! let back: Module = from_str(&text).unwrap();
//! assert_eq!(module, back);
//! ```
//!
//! ### Dynamic Values with pslit! Macro
//!
//! ```rust
//! use serde_pslit::{pslit, serialize, PsOptions, serialize_with_options};
//!
//! let data = pslit!({
//!     "Name": "web01",
//!     "Roles": { "Primary": "frontend" }
//! });
//!
//! let literal = serialize_with_options(&data, false, PsOptions::new().with_depth(0));
//! assert_eq!(
//!     literal.as_str(),
//!     "@{\n    'Name'='web01'\n    'Roles'=@{\n        'Primary'='frontend'\n    }\n}"
//! );
//!
//! // Input that is not a hashtable produces no output
//! assert!(serialize(&pslit!(["a", "b"]), false).is_empty());
//! ```
//!
//! ## Diagnostics
//!
//! The serializer emits `tracing` events at `trace` level for every entry it
//! writes and for skipped input; parse failures are reported at `debug`. No
//! subscriber is installed by the library.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Serializing a struct and reading it back
//! - **`macro.rs`** - Building values with the pslit! macro
//! - **`script_blocks.rs`** - Embedding code fragments
//! - **`legacy_arrays.rs`** - List vs. historical joined-string arrays
//! - **`format_view.rs`** - Emitting a format view descriptor
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod syntax;
pub mod value;
pub mod view;

pub use de::{parse_value, Deserializer};
pub use error::{Error, Result};
pub use map::PsMap;
pub use options::{ArrayStyle, PsOptions};
pub use ser::{Literal, PsValueSerializer, Serializer};
pub use value::{Number, PsValue, ScriptBlock};
pub use view::{Alignment, Column, ViewDescriptor};

use serde::{Deserialize, Serialize};
use std::io;

/// Renders a [`PsValue`] as a hashtable literal using the default options.
///
/// When `as_script_block` is `true` the text comes back wrapped in a
/// [`ScriptBlock`]. A value that is not a hashtable renders as empty text.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{pslit, serialize};
///
/// let literal = serialize(&pslit!({ "Enabled": false }), false);
/// assert_eq!(literal.as_str(), "@{\n        'Enabled'=$false\n    }");
/// ```
#[must_use]
pub fn serialize(value: &PsValue, as_script_block: bool) -> Literal {
    serialize_with_options(value, as_script_block, PsOptions::default())
}

/// Renders a [`PsValue`] as a hashtable literal with custom options.
#[must_use]
pub fn serialize_with_options(value: &PsValue, as_script_block: bool, options: PsOptions) -> Literal {
    let mut serializer = Serializer::new(options);
    serializer.serialize_value(value);
    let text = serializer.into_inner();

    if as_script_block {
        Literal::ScriptBlock(ScriptBlock::new(text))
    } else {
        Literal::Text(text)
    }
}

/// Serialize any `T: Serialize` to hashtable literal text.
///
/// Types that do not serialize as a map or struct produce an empty string.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::to_string;
/// use std::collections::BTreeMap;
///
/// let mut data = BTreeMap::new();
/// data.insert("Path", r"C:\Program Files");
/// assert_eq!(
///     to_string(&data).unwrap(),
///     "@{\n        'Path'='C:\\Program Files'\n    }"
/// );
///
/// assert_eq!(to_string(&42).unwrap(), "");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. map keys that
/// are neither strings nor numbers).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, PsOptions::default())
}

/// Serialize any `T: Serialize` to hashtable literal text with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: PsOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    Ok(serialize_with_options(&value, false, options).into_string())
}

/// Serialize any `T: Serialize` to a hashtable literal wrapped in a
/// [`ScriptBlock`].
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{pslit, to_script_block};
///
/// let block = to_script_block(&pslit!({ "a": "b" })).unwrap();
/// assert_eq!(block.as_str(), "@{\n        'a'='b'\n    }");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_script_block<T>(value: &T) -> Result<ScriptBlock>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(ScriptBlock::new)
}

/// Convert any `T: Serialize` to a [`PsValue`].
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{to_value, PsValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: PsValue = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_hashtable());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<PsValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(PsValueSerializer)
}

/// Serialize any `T: Serialize` as hashtable literal text into a writer.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{pslit, to_writer};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &pslit!({ "a": true })).unwrap();
/// assert_eq!(buffer, b"@{\n        'a'=$true\n    }");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, PsOptions::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: PsOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from hashtable literal text.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("@{ x = 1; y = '2' }").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not a valid literal or cannot be
/// deserialized to type `T`. Error messages include line and column
/// information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of literal text.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not a valid literal, or
/// the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of literal text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not a valid literal, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
