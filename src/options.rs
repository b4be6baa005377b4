//! Configuration options for literal serialization.
//!
//! - [`PsOptions`]: main configuration struct
//! - [`ArrayStyle`]: how array values are rendered inside a hashtable
//!
//! ## Examples
//!
//! ```rust
//! use serde_pslit::{to_string_with_options, ArrayStyle, PsOptions};
//! use std::collections::BTreeMap;
//!
//! let mut data = BTreeMap::new();
//! data.insert("tags", vec!["a", "b"]);
//!
//! // Flush-left output with 2-space indentation
//! let options = PsOptions::new().with_depth(0).with_indent(2);
//! let text = to_string_with_options(&data, options).unwrap();
//! assert_eq!(text, "@{\n  'tags'=@('a', 'b')\n}");
//!
//! // Reproduce the historical joined-string rendering of arrays
//! let options = PsOptions::legacy();
//! let text = to_string_with_options(&data, options).unwrap();
//! assert!(text.contains("'tags'=''a',"));
//! ```

/// Rendering of array values.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::ArrayStyle;
///
/// assert_eq!(ArrayStyle::default(), ArrayStyle::List);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArrayStyle {
    /// Array subexpression literal: `@('a', 'b')`.
    #[default]
    List,
    /// One quoted string holding every element as `'element'`, joined by a
    /// comma, a newline and indentation. The inner quotes are not escaped, so
    /// the result does not parse back.
    JoinedString,
}

/// Configuration options for literal serialization.
///
/// # Examples
///
/// ```rust
/// use serde_pslit::{ArrayStyle, PsOptions};
///
/// let options = PsOptions::new();
/// assert_eq!(options.indent, 4);
/// assert_eq!(options.depth, 1);
///
/// let options = PsOptions::new()
///     .with_indent(2)
///     .with_depth(0)
///     .with_array_style(ArrayStyle::JoinedString);
/// assert_eq!(options.indent, 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PsOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Depth assigned to the top-level hashtable. Entries sit at
    /// `(depth + 1) * indent` columns, the closing brace at `depth * indent`.
    pub depth: usize,
    pub array_style: ArrayStyle,
}

impl Default for PsOptions {
    fn default() -> Self {
        PsOptions {
            indent: 4,
            depth: 1,
            array_style: ArrayStyle::default(),
        }
    }
}

impl PsOptions {
    /// Creates default options (4-space indent, top-level depth 1, list arrays).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that match the historical output byte for byte,
    /// including the joined-string array rendering.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::{ArrayStyle, PsOptions};
    ///
    /// let options = PsOptions::legacy();
    /// assert_eq!(options.array_style, ArrayStyle::JoinedString);
    /// ```
    #[must_use]
    pub fn legacy() -> Self {
        PsOptions {
            array_style: ArrayStyle::JoinedString,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the depth of the top-level hashtable.
    ///
    /// Use `0` for output whose closing brace sits in the first column.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Sets how array values are rendered.
    #[must_use]
    pub fn with_array_style(mut self, style: ArrayStyle) -> Self {
        self.array_style = style;
        self
    }
}
