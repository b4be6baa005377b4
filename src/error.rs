//! Error types for literal serialization and parsing.
//!
//! Writing a literal never fails on its own: every [`PsValue`](crate::PsValue)
//! variant has a rendering rule. Errors come from three places:
//!
//! - **Serde bridging**: a `Serialize` impl produced something the value model
//!   rejects, such as a map with non-string keys
//! - **Parsing**: malformed literal text, reported with line and column
//! - **View descriptors**: a view definition that cannot produce a usable view
//!
//! ## Examples
//!
//! ```rust
//! use serde_pslit::{parse_value, Error};
//!
//! let result = parse_value("@{ 'name' = 'unterminated }");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert!(err.to_string().contains("line 1"));
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Syntax error with detailed context
    #[error("Syntax error at line {line}, column {col}:\n{context}\n{msg}{suggestion}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
        suggestion: String,
    },

    /// Type mismatch during deserialization
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Unexpected end of input
    #[error(
        "Unexpected end of input at line {line}, column {col}\n{context}\nExpected: {expected}"
    )]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
        context: String,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A view descriptor that cannot be emitted
    #[error("Invalid view: {0}")]
    InvalidView(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
            suggestion: String::new(),
        }
    }

    /// Creates a syntax error that carries the offending source line and an
    /// optional hint.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::Error;
    ///
    /// let err = Error::syntax_with_context(
    ///     2,
    ///     9,
    ///     "expected '=' after key",
    ///     "    'name' 'Alice'",
    ///     Some("entries are written as 'key'=value"),
    /// );
    /// assert!(err.to_string().contains("Help:"));
    /// ```
    pub fn syntax_with_context(
        line: usize,
        col: usize,
        msg: &str,
        context: &str,
        suggestion: Option<&str>,
    ) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
            suggestion: suggestion
                .map(|s| format!("\nHelp: {}", s))
                .unwrap_or_default(),
        }
    }

    /// Creates a type mismatch error when deserialization fails due to incompatible types.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::Error;
    ///
    /// let err = Error::type_mismatch("integer", "hashtable");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str, context: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates an unsupported type error for values the literal model cannot hold.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid view error.
    pub fn invalid_view(msg: &str) -> Self {
        Error::InvalidView(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pslit::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader and writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = Error::syntax_with_context(3, 7, "unterminated string", "  'a'='b", None);
        let text = err.to_string();
        assert!(text.contains("line 3, column 7"));
        assert!(text.contains("  'a'='b"));
        assert!(!text.contains("Help:"));
    }

    #[test]
    fn test_serde_custom_errors() {
        let ser_err = <Error as serde::ser::Error>::custom("bad key");
        assert!(matches!(ser_err, Error::Custom(ref m) if m == "bad key"));

        let de_err = <Error as serde::de::Error>::custom("bad value");
        assert_eq!(de_err.to_string(), "Error: bad value");
    }
}
