//! Depth-first lookup of the n-th displayable field.
//!
//! A displayable field is a string or primitive value, or any value the
//! traversal budget stops it from entering. Fields are numbered in document
//! order; [`QueryContext::find`] walks the token tree counting them until it
//! reaches the requested one, and leaves its slash-joined key path behind in
//! the context.
//!
//! Object members cost one level and one depth, array elements cost one depth
//! only. The budget travels by value into each child, so a sibling always
//! starts from the budget its predecessor started from. Once either half
//! reaches zero the node in hand is counted as a field instead of being
//! entered.
//!
//! When grouping is active, repeated `msgs/type` fields of a uniform message
//! list are counted once: every occurrence except the one at the grouped
//! index is skipped, and skipping one also moves the requested index one
//! further so the ordinals of later fields line up with what the caller was
//! shown.

use tracing::trace;

use crate::{
    error::ParserError,
    grouping::GroupingFlags,
    key_path::KeyPath,
    token::{JsonTokens, TokenKind},
};

/// Key path of the message-type field that grouping collapses.
pub const GROUPED_MSG_TYPE_KEY: &[u8] = b"msgs/type";

/// Remaining nesting the traversal may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Named (object) levels left.
    pub level: u8,
    /// Object and array levels left, combined.
    pub depth: u8,
}

impl Budget {
    /// Returns `true` once either half is spent; the node at hand is then
    /// treated as a leaf.
    pub fn is_exhausted(&self) -> bool {
        self.level == 0 || self.depth == 0
    }

    fn enter_object(self) -> Self {
        Self {
            level: self.level.saturating_sub(1),
            depth: self.depth.saturating_sub(1),
        }
    }

    fn enter_array(self) -> Self {
        Self {
            depth: self.depth.saturating_sub(1),
            ..self
        }
    }
}

/// Parameters and running state of one field lookup.
///
/// A context is single-use per lookup: call [`reset`](Self::reset) before
/// searching again, or the counters carry over.
#[derive(Debug)]
pub struct QueryContext<'k> {
    item_index: usize,
    current: usize,
    skipped: usize,
    key: KeyPath<'k>,
    key_target: Option<&'k [u8]>,
    flags: GroupingFlags,
}

impl<'k> QueryContext<'k> {
    /// A lookup for field `item_index`, building its key path in `key_buf`.
    pub fn new(key_buf: &'k mut [u8], item_index: usize, flags: GroupingFlags) -> Self {
        Self {
            item_index,
            current: 0,
            skipped: 0,
            key: KeyPath::new(key_buf),
            key_target: None,
            flags,
        }
    }

    /// Clears the counters and key path and retargets the lookup.
    pub fn reset(&mut self, item_index: usize) {
        self.item_index = item_index;
        self.current = 0;
        self.skipped = 0;
        self.key_target = None;
        self.key.clear();
    }

    /// The field being looked for. Grouped skips move it forward.
    pub fn item_index(&self) -> usize {
        self.item_index
    }

    /// Fields visited so far, skipped ones included.
    pub fn visited(&self) -> usize {
        self.current
    }

    /// Grouped `msgs/type` fields skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Key path of the current position; after a successful lookup, the
    /// path of the field found.
    pub fn key(&self) -> &KeyPath<'k> {
        &self.key
    }

    /// Grouping flags in effect.
    pub fn flags(&self) -> GroupingFlags {
        self.flags
    }

    /// Searches the subtree at `root` for the requested field and returns its
    /// token index.
    ///
    /// # Errors
    ///
    /// - [`ParserError::NoData`] if the document is empty or `root` is not a
    ///   token.
    /// - [`ParserError::QueryNoResults`] if the subtree holds fewer fields
    ///   than requested. The counters then reflect the whole subtree and the
    ///   key path is back where it started.
    pub fn find<D: JsonTokens + ?Sized>(
        &mut self,
        doc: &D,
        root: usize,
        budget: Budget,
    ) -> Result<usize, ParserError> {
        let token = match doc.token(root) {
            Some(token) if !doc.source().is_empty() => *token,
            _ => return Err(ParserError::NoData),
        };

        if budget.is_exhausted() || token.is_scalar() {
            return self.visit_leaf(root);
        }

        match token.kind {
            TokenKind::Object => {
                let checkpoint = self.key.len();
                let mut children = doc.children(root);
                for _ in 0..doc.element_count(root) {
                    let (Some(key), Some(value)) = (children.next(), children.next()) else {
                        break;
                    };
                    self.key.append_key(doc, key);
                    if let found @ Ok(_) = self.find(doc, value, budget.enter_object()) {
                        return found;
                    }
                    self.key.truncate_to(checkpoint);
                }
            }
            TokenKind::Array => {
                for element in doc.children(root).take(doc.element_count(root)) {
                    if let found @ Ok(_) = self.find(doc, element, budget.enter_array()) {
                        return found;
                    }
                }
            }
            TokenKind::String | TokenKind::Primitive => {}
        }

        Err(ParserError::QueryNoResults)
    }

    /// Sweeps the subtree at `root` once and returns the ordinal of the first
    /// field whose key path is exactly `key`. The context is reset first.
    ///
    /// # Errors
    ///
    /// As for [`find`](Self::find); [`ParserError::QueryNoResults`] means no
    /// field has that path.
    pub fn position_of_key<D: JsonTokens + ?Sized>(
        &mut self,
        doc: &D,
        root: usize,
        budget: Budget,
        key: &'k [u8],
    ) -> Result<usize, ParserError> {
        self.reset(usize::MAX);
        self.key_target = Some(key);
        let found = self.find(doc, root, budget).map(|_| self.current);
        self.key_target = None;
        found
    }

    fn visit_leaf(&mut self, token: usize) -> Result<usize, ParserError> {
        let grouped_field = self.key.as_bytes() == GROUPED_MSG_TYPE_KEY;
        let is_main_index = self.flags.valid_index != self.current;
        let skip_item = self.flags.cache_valid
            && self.flags.msg_type_grouping
            && grouped_field
            && is_main_index;

        let wanted = self.current == self.item_index
            || self.key_target.is_some_and(|target| self.key.as_bytes() == target);
        if !skip_item && wanted {
            trace!(token, item_index = self.item_index, key = %self.key, "field found");
            return Ok(token);
        }

        if skip_item {
            self.item_index = self.item_index.saturating_add(1);
            self.skipped += 1;
        }
        self.current += 1;
        Err(ParserError::QueryNoResults)
    }
}
