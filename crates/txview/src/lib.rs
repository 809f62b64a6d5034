//! Bounded field lookup and paginated rendering over tokenized JSON.
//!
//! `txview` shows a JSON transaction one field at a time on a display that
//! fits a few dozen characters, using a fixed amount of memory and stack. It
//! never parses text itself: it walks a flat, jsmn-style token array
//! (anything implementing [`JsonTokens`]) and writes into buffers the caller
//! owns.
//!
//! - [`QueryContext::find`] returns the token of the n-th displayable field
//!   and leaves its `key/subkey` path in a bounded buffer. Nesting is capped
//!   by a [`Budget`]; values beyond it are shown as raw JSON.
//! - [`ValueRenderer::render`] substitutes display labels for known values
//!   and cuts the result into pages sized to the output buffer.
//! - [`TxViewer`] ties the two together and applies message-type grouping.
//!
//! ```rust
//! use txview::{QueryOptions, TokenizedJson, TxViewer};
//!
//! let doc = TokenizedJson::parse(
//!     br#"{"msgs":[{"type":"cosmos-sdk/MsgSend","amount":"5"},{"type":"cosmos-sdk/MsgSend","amount":"3"}]}"#,
//! )
//! .unwrap();
//! let viewer = TxViewer::new(&doc, QueryOptions::default());
//! assert_eq!(viewer.num_items(), 3);
//!
//! let mut key = [0u8; 32];
//! let mut value = [0u8; 32];
//! viewer.item(0, &mut key, &mut value, 0).unwrap();
//! assert_eq!(&key[..10], b"msgs/type\0");
//! assert_eq!(&value[..5], b"Send\0");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod bounded;
mod error;
mod grouping;
mod key_path;
mod options;
mod query;
mod render;
mod token;
mod tokenizer;
mod viewer;

#[cfg(test)]
mod tests;

pub use bounded::BoundedBuf;
pub use error::{ParserError, SyntaxError};
pub use grouping::{GroupingFlags, object_value};
pub use key_path::{KEY_SEPARATOR, KeyPath};
pub use options::QueryOptions;
pub use query::{Budget, GROUPED_MSG_TYPE_KEY, QueryContext};
pub use render::{Substitution, VALUE_SUBSTITUTIONS, ValueRenderer, page_count, page_into, substitute};
pub use token::{Children, Document, JsonTokens, Token, TokenKind};
pub use tokenizer::{TokenizedJson, Tokenizer, TokenizerLimits};
pub use viewer::{ItemPage, KEY_SCRATCH_LEN, TxViewer};
