use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    options::QueryOptions,
    query::{GROUPED_MSG_TYPE_KEY, QueryContext},
    token::{JsonTokens, TokenKind},
    viewer::KEY_SCRATCH_LEN,
};

/// Per-document flags that control how repeated message types are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupingFlags {
    /// The document has been accepted and the other flags describe it.
    pub cache_valid: bool,
    /// Every message in `msgs` has the same `type`, so it is shown once.
    pub msg_type_grouping: bool,
    /// Field ordinal of the `msgs/type` occurrence that stays visible.
    pub valid_index: usize,
}

impl GroupingFlags {
    /// Inspects an accepted document rooted at token 0.
    ///
    /// Grouping is enabled when the root object has a `msgs` array of two or
    /// more objects whose `type` values are byte-for-byte equal. The visible
    /// occurrence is the first one.
    pub fn detect<D: JsonTokens + ?Sized>(doc: &D, options: &QueryOptions) -> Self {
        let msg_type_grouping = msg_types_are_uniform(doc);
        let valid_index = if msg_type_grouping {
            first_item_with_key(doc, GROUPED_MSG_TYPE_KEY, options).unwrap_or_default()
        } else {
            0
        };
        debug!(msg_type_grouping, valid_index, "detected grouping flags");
        Self {
            cache_valid: true,
            msg_type_grouping,
            valid_index,
        }
    }
}

/// Value token of the member of `object` named `key`, if any.
pub fn object_value<D: JsonTokens + ?Sized>(doc: &D, object: usize, key: &[u8]) -> Option<usize> {
    doc.token(object).filter(|t| t.kind == TokenKind::Object)?;
    let mut children = doc.children(object);
    for _ in 0..doc.element_count(object) {
        let (Some(name), Some(value)) = (children.next(), children.next()) else {
            break;
        };
        if doc.span(name) == Some(key) {
            return Some(value);
        }
    }
    None
}

fn msg_types_are_uniform<D: JsonTokens + ?Sized>(doc: &D) -> bool {
    let Some(msgs) = object_value(doc, 0, b"msgs") else {
        return false;
    };
    if doc.token(msgs).map(|t| t.kind) != Some(TokenKind::Array) {
        return false;
    }
    let count = doc.element_count(msgs);
    if count < 2 {
        return false;
    }

    let mut types = doc.children(msgs).take(count).map(|msg| {
        object_value(doc, msg, b"type").and_then(|ty| doc.span(ty))
    });
    let Some(Some(first)) = types.next() else {
        return false;
    };
    types.all(|ty| ty == Some(first))
}

/// Ordinal of the first field whose key path is `key`, counting without
/// grouping.
fn first_item_with_key<D: JsonTokens + ?Sized>(
    doc: &D,
    key: &[u8],
    options: &QueryOptions,
) -> Option<usize> {
    let mut key_buf = [0u8; KEY_SCRATCH_LEN];
    let mut ctx = QueryContext::new(&mut key_buf, usize::MAX, GroupingFlags::default());
    ctx.position_of_key(doc, 0, options.budget(), key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenizedJson;

    fn detect(src: &[u8]) -> GroupingFlags {
        let doc = TokenizedJson::parse(src).unwrap();
        GroupingFlags::detect(&doc, &QueryOptions::default())
    }

    #[test]
    fn uniform_messages_group() {
        let flags = detect(
            br#"{"fee":"1","msgs":[{"type":"cosmos-sdk/MsgSend","value":"a"},{"type":"cosmos-sdk/MsgSend","value":"b"}]}"#,
        );
        assert_eq!(
            flags,
            GroupingFlags {
                cache_valid: true,
                msg_type_grouping: true,
                valid_index: 1,
            }
        );
    }

    #[test]
    fn mixed_messages_do_not_group() {
        let flags = detect(
            br#"{"msgs":[{"type":"cosmos-sdk/MsgSend"},{"type":"cosmos-sdk/MsgVote"}]}"#,
        );
        assert!(flags.cache_valid);
        assert!(!flags.msg_type_grouping);
    }

    #[test]
    fn single_message_does_not_group() {
        let flags = detect(br#"{"msgs":[{"type":"cosmos-sdk/MsgSend"}]}"#);
        assert!(!flags.msg_type_grouping);
    }

    #[test]
    fn missing_type_does_not_group() {
        let flags = detect(br#"{"msgs":[{"value":1},{"value":1}]}"#);
        assert!(!flags.msg_type_grouping);
        let flags = detect(br#"{"msgs":[{"type":"x"},{"value":1}]}"#);
        assert!(!flags.msg_type_grouping);
    }

    #[test]
    fn msgs_must_be_an_array() {
        let flags = detect(br#"{"msgs":{"type":"x"}}"#);
        assert!(!flags.msg_type_grouping);
    }

    #[test]
    fn object_value_by_name() {
        let doc = TokenizedJson::parse(br#"{"a":1,"b":"two"}"#).unwrap();
        let value = object_value(&doc, 0, b"b").unwrap();
        assert_eq!(doc.span(value), Some(&b"two"[..]));
        assert_eq!(object_value(&doc, 0, b"c"), None);
    }
}
