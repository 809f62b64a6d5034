use alloc::vec;

use tracing::debug;

use crate::{
    bounded::BoundedBuf,
    error::ParserError,
    grouping::GroupingFlags,
    options::QueryOptions,
    query::QueryContext,
    render::ValueRenderer,
    token::JsonTokens,
};

/// Smallest buffer key paths are built in before they are copied out.
///
/// Lookups build the path at this capacity or the caller's, whichever is
/// larger, so whether a field reads as `msgs/type` does not depend on how
/// small the caller's key buffer is.
pub const KEY_SCRATCH_LEN: usize = 64;

/// Result of displaying one page of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPage {
    /// Token index of the field's value.
    pub token: usize,
    /// Pages the value renders to at the given output capacity.
    pub page_count: usize,
}

/// Field-by-field view of an accepted transaction document rooted at token 0.
///
/// # Examples
///
/// ```rust
/// use txview::{QueryOptions, TokenizedJson, TxViewer};
///
/// let doc = TokenizedJson::parse(br#"{"chain_id":"cosmoshub-4","memo":""}"#).unwrap();
/// let viewer = TxViewer::new(&doc, QueryOptions::default());
/// assert_eq!(viewer.num_items(), 2);
///
/// let mut key = [0u8; 16];
/// let mut value = [0u8; 8];
/// let page = viewer.item(0, &mut key, &mut value, 1).unwrap();
/// assert_eq!(page.page_count, 2);
/// assert_eq!(&key[..8], b"chain_id");
/// assert_eq!(&value[..4], b"ub-4");
/// ```
#[derive(Debug)]
pub struct TxViewer<'d, D: ?Sized> {
    doc: &'d D,
    options: QueryOptions,
    flags: GroupingFlags,
    renderer: ValueRenderer,
}

impl<'d, D: JsonTokens + ?Sized> TxViewer<'d, D> {
    /// Wraps `doc`, detecting its grouping flags once.
    pub fn new(doc: &'d D, options: QueryOptions) -> Self {
        let flags = GroupingFlags::detect(doc, &options);
        Self::with_flags(doc, options, flags)
    }

    /// Wraps `doc` with caller-supplied grouping flags.
    pub fn with_flags(doc: &'d D, options: QueryOptions, flags: GroupingFlags) -> Self {
        Self {
            doc,
            options,
            flags,
            renderer: ValueRenderer::default(),
        }
    }

    /// Replaces the value renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: ValueRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Grouping flags in effect.
    pub fn flags(&self) -> GroupingFlags {
        self.flags
    }

    /// Number of fields a caller can page through.
    pub fn num_items(&self) -> usize {
        let mut scratch = [0u8; KEY_SCRATCH_LEN];
        let mut ctx = QueryContext::new(&mut scratch, usize::MAX, self.flags);
        // Nothing matches usize::MAX, so this is a full sweep.
        let _ = ctx.find(self.doc, 0, self.options.budget());
        ctx.visited() - ctx.skipped()
    }

    /// Looks up field `item_index`, writes its key path into `key_out` and
    /// page `page_index` of its value into `value_out`.
    ///
    /// Both outputs are zero-filled and stay terminated; each holds at most
    /// its length minus one bytes. An empty `value_out` has no room for a
    /// page, so the lookup then reports [`ParserError::DisplayPageOutOfRange`].
    ///
    /// # Errors
    ///
    /// - [`ParserError::NoData`] for an empty document.
    /// - [`ParserError::QueryNoResults`] if `item_index >= self.num_items()`.
    /// - Render errors from [`ValueRenderer::render`]; `key_out` is filled
    ///   in that case.
    pub fn item(
        &self,
        item_index: usize,
        key_out: &mut [u8],
        value_out: &mut [u8],
        page_index: usize,
    ) -> Result<ItemPage, ParserError> {
        let mut stack = [0u8; KEY_SCRATCH_LEN];
        let mut heap;
        let scratch: &mut [u8] = if key_out.len() <= KEY_SCRATCH_LEN {
            &mut stack
        } else {
            heap = vec![0u8; key_out.len()];
            &mut heap
        };

        let mut key = BoundedBuf::new(key_out);
        let mut ctx = QueryContext::new(scratch, item_index, self.flags);

        let token = ctx
            .find(self.doc, 0, self.options.budget())
            .inspect_err(|err| debug!(item_index, %err, "field lookup failed"))?;
        key.push(ctx.key().as_bytes());

        let page_count = self.renderer.render(self.doc, token, value_out, page_index)?;
        Ok(ItemPage { token, page_count })
    }
}
