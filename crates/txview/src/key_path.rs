use core::fmt;

use bstr::BStr;

use crate::{bounded::BoundedBuf, token::JsonTokens};

/// Separator placed between the keys of nested objects.
pub const KEY_SEPARATOR: u8 = b'/';

/// The slash-joined names of the objects the traversal is currently inside,
/// e.g. `msgs/value/amount`.
///
/// Array positions contribute nothing, so every element of `msgs` shares the
/// path `msgs/...`. Keys that do not fit the buffer are cut short.
#[derive(Debug)]
pub struct KeyPath<'a> {
    buf: BoundedBuf<'a>,
}

impl<'a> KeyPath<'a> {
    /// An empty path stored in `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf: BoundedBuf::new(buf),
        }
    }

    /// Appends the text of the key token at `key`, preceded by a separator
    /// when the path is not empty.
    ///
    /// A key token whose span is corrupt contributes no bytes.
    pub fn append_key<D: JsonTokens + ?Sized>(&mut self, doc: &D, key: usize) {
        let segment = doc.span(key).unwrap_or_default();
        self.push_segment(segment);
    }

    /// Appends `segment`, preceded by a separator when the path is not empty.
    pub fn push_segment(&mut self, segment: &[u8]) {
        if !self.buf.is_empty() {
            self.buf.push(&[KEY_SEPARATOR]);
        }
        self.buf.push(segment);
    }

    /// Rolls the path back to a length previously read from [`len`](Self::len).
    pub fn truncate_to(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Empties the path.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` when no key has been appended.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The path bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }

    /// The path as a byte string.
    pub fn as_bstr(&self) -> &BStr {
        self.buf.as_bstr()
    }
}

impl fmt::Display for KeyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.buf, f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::TokenizedJson;

    #[test]
    fn joins_with_separator() {
        let mut storage = [0u8; 32];
        let mut path = KeyPath::new(&mut storage);
        path.push_segment(b"msgs");
        path.push_segment(b"value");
        path.push_segment(b"amount");
        assert_eq!(path.as_bytes(), b"msgs/value/amount");
    }

    #[test]
    fn append_key_reads_token_span() {
        let doc = TokenizedJson::parse(br#"{"fee":{"gas":"1"}}"#).unwrap();
        let mut storage = [0u8; 16];
        let mut path = KeyPath::new(&mut storage);
        path.append_key(&doc, 1);
        path.append_key(&doc, 3);
        assert_eq!(path.as_bytes(), b"fee/gas");
    }

    #[test]
    fn truncate_restores_sibling_prefix() {
        let mut storage = [0u8; 32];
        let mut path = KeyPath::new(&mut storage);
        path.push_segment(b"fee");
        let mark = path.len();
        path.push_segment(b"amount");
        path.truncate_to(mark);
        path.push_segment(b"gas");
        assert_eq!(path.as_bytes(), b"fee/gas");
    }

    #[test]
    fn overlong_key_is_cut_and_terminated() {
        let mut storage = [0xEEu8; 8];
        let mut path = KeyPath::new(&mut storage);
        path.push_segment(b"abc");
        path.push_segment(b"defghij");
        assert_eq!(path.as_bytes(), b"abc/def");
        assert_eq!(path.to_string(), "abc/def");
        drop(path);
        assert_eq!(storage[7], 0);
    }

    #[test]
    fn separator_dropped_when_full() {
        let mut storage = [0u8; 4];
        let mut path = KeyPath::new(&mut storage);
        path.push_segment(b"abc");
        path.push_segment(b"d");
        assert_eq!(path.as_bytes(), b"abc");
    }
}
