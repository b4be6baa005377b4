//! Hashtable Literal Syntax
//!
//! This module documents the literal form written by [`Serializer`](crate::Serializer)
//! and accepted by [`Deserializer`](crate::Deserializer).
//!
//! # Overview
//!
//! A literal is one hashtable: `@{`, a newline, one entry per line, then an
//! indented `}`. Entries are `'key'=value` with no spaces around `=`.
//!
//! ```text
//! @{
//!         'Name'='web01'
//!         'Enabled'=$true
//!         'Settings'=@{
//!             'Retries'='3'
//!         }
//!     }
//! ```
//!
//! Indentation carries no meaning. With indent width `w` and top-level depth
//! `d` (defaults 4 and 1), a hashtable at depth `d` writes its entries at
//! `(d + 1) * w` columns and its closing brace at `d * w`. Nested hashtables
//! use depth `d + 1`.
//!
//! # Values
//!
//! | Kind | Written as | Example |
//! |------|------------|---------|
//! | String | Single-quoted | `'it''s'` |
//! | Boolean | Automatic variable | `$true`, `$false` |
//! | Null | Automatic variable | `$null` |
//! | Script block | Braced body, verbatim | `{ Get-Date }` |
//! | Hashtable | Nested literal | `@{ ... }` |
//! | Array | Array subexpression | `@('a', 'b')` |
//! | Number, big integer, date | Quoted display text | `'42'`, `'2024-01-15T10:30:00+00:00'` |
//!
//! Numbers are quoted, so they read back as strings. Deserializing into a
//! numeric Rust type parses the string.
//!
//! ## Strings and Keys
//!
//! Both keys and string values are single-quoted. Inside single quotes the
//! apostrophe `'`, the left single quotation mark `‘` (U+2018) and the right
//! single quotation mark `’` (U+2019) all end the string, so each occurrence
//! is doubled:
//!
//! ```text
//! O'Brien      ->  'O''Brien'
//! ‘quoted’     ->  '‘‘quoted’’'
//! ```
//!
//! No other character is escaped. Newlines, `$` and backticks are literal
//! inside single quotes.
//!
//! ## Script Blocks
//!
//! A [`ScriptBlock`](crate::ScriptBlock) body is written between braces
//! exactly as given. It is not validated; a body with unbalanced braces
//! produces a literal that does not parse.
//!
//! ## Arrays
//!
//! [`ArrayStyle::List`](crate::ArrayStyle::List) (the default) writes
//! `@(e1, e2)` with every element following the value rules above. An empty
//! array is `@()`.
//!
//! [`ArrayStyle::JoinedString`](crate::ArrayStyle::JoinedString) reproduces
//! the historical output, where every element is generic-stringified inside
//! its own quotes and the pieces are joined by `,` plus a newline and
//! `(d + 1) * w + w` spaces, inside one more pair of quotes:
//!
//! ```text
//!         'Tags'=''a',
//!             'b''
//! ```
//!
//! The inner quotes are not escaped, so this form does not parse back.
//!
//! # Non-Hashtable Input
//!
//! Only hashtables are serialized. Any other top-level value produces empty
//! text, which is how callers tell "invalid input" (`""`) apart from an empty
//! hashtable (`@{` newline `}`).
//!
//! # Accepted Input
//!
//! The parser also accepts the common hand-written forms:
//!
//! - entries separated by `;` as well as newlines: `@{ a = 1; b = 2 }`
//! - bare keys: `Name = 'x'`
//! - double-quoted strings with `""` and backtick escapes (`` `n ``, `` `t ``,
//!   `` `r ``, `` `0 ``, `` `a ``, `` `b ``, `` `e ``, `` `f ``, `` `v ``).
//!   Variables are not expanded.
//! - bare numbers, including integers too large for `i64`
//! - `#` line comments
//! - the automatic variables in any letter case (`$TRUE`)
//!
//! Duplicate keys are a syntax error.
