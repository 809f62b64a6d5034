//! Rendering a resolved value token into a display page.
//!
//! A value is first looked up in a substitution table (raw message-type
//! identifiers have short display labels), then cut into pages of
//! `capacity - 1` bytes so each page fits the output buffer with its
//! terminator. Empty values render as a single empty page, which needs at
//! least the terminator slot.

use tracing::trace;

use crate::{bounded::BoundedBuf, error::ParserError, token::JsonTokens};

/// Maps a raw value to the label shown in its place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Substitution {
    /// Raw value, matched exactly.
    pub from: &'static str,
    /// Label rendered instead.
    pub to: &'static str,
}

/// Display labels for the Cosmos SDK message types.
#[rustfmt::skip]
pub static VALUE_SUBSTITUTIONS: &[Substitution] = &[
    Substitution { from: "cosmos-sdk/MsgSend", to: "Send" },
    Substitution { from: "cosmos-sdk/MsgDelegate", to: "Delegate" },
    Substitution { from: "cosmos-sdk/MsgUndelegate", to: "Undelegate" },
    Substitution { from: "cosmos-sdk/MsgBeginRedelegate", to: "Redelegate" },
    Substitution { from: "cosmos-sdk/MsgSubmitProposal", to: "Propose" },
    Substitution { from: "cosmos-sdk/MsgDeposit", to: "Deposit" },
    Substitution { from: "cosmos-sdk/MsgVote", to: "Vote" },
    Substitution { from: "cosmos-sdk/MsgWithdrawDelegationReward", to: "Withdraw Reward" },
];

/// Returns the label for `value` from `table`, or `value` itself. The first
/// exact match wins.
pub fn substitute<'v>(table: &[Substitution], value: &'v [u8]) -> &'v [u8] {
    match table.iter().find(|s| s.from.as_bytes() == value) {
        Some(s) => {
            trace!(from = s.from, to = s.to, "substituted value");
            s.to.as_bytes()
        }
        None => value,
    }
}

/// Number of pages `len` bytes split into when each page holds `width`
/// bytes. A zero width fits nothing.
pub fn page_count(len: usize, width: usize) -> usize {
    if width == 0 { 0 } else { len.div_ceil(width) }
}

/// Writes page `page_index` of `value` into `out` and returns the page count.
///
/// `out` is zero-filled first and always ends terminated. Nothing is copied
/// when the page does not exist; the returned count tells the caller so.
pub fn page_into(out: &mut [u8], value: &[u8], page_index: usize) -> usize {
    let mut buf = BoundedBuf::new(out);
    let width = buf.capacity().saturating_sub(1);
    if width == 0 {
        return 0;
    }
    if let Some(page) = value.chunks(width).nth(page_index) {
        buf.push(page);
    }
    page_count(value.len(), width)
}

/// Renders token values into display pages.
#[derive(Debug, Clone, Copy)]
pub struct ValueRenderer {
    substitutions: &'static [Substitution],
}

impl Default for ValueRenderer {
    fn default() -> Self {
        Self::new(VALUE_SUBSTITUTIONS)
    }
}

impl ValueRenderer {
    /// A renderer that consults `substitutions` before paging.
    pub fn new(substitutions: &'static [Substitution]) -> Self {
        Self { substitutions }
    }

    /// Renders page `page_index` of the value at `token` into `out` and
    /// returns the total page count.
    ///
    /// `out.len()` is the buffer capacity including the terminator, so
    /// each page holds `out.len() - 1` bytes.
    ///
    /// # Errors
    ///
    /// - [`ParserError::UnexpectedBufferEnd`] if the token does not exist or
    ///   its span is reversed or leaves the source.
    /// - [`ParserError::DisplayPageOutOfRange`] if `page_index` is not below
    ///   the page count, which the error carries.
    pub fn render<D: JsonTokens + ?Sized>(
        &self,
        doc: &D,
        token: usize,
        out: &mut [u8],
        page_index: usize,
    ) -> Result<usize, ParserError> {
        out.fill(0);
        let raw = doc.span(token).ok_or(ParserError::UnexpectedBufferEnd)?;

        let page_count = if raw.is_empty() {
            // one empty page, provided there is room for its terminator
            usize::from(!out.is_empty())
        } else {
            let value = substitute(self.substitutions, raw);
            page_into(out, value, page_index)
        };

        if page_index >= page_count {
            return Err(ParserError::DisplayPageOutOfRange {
                page_index,
                page_count,
            });
        }
        Ok(page_count)
    }
}
