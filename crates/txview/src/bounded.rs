//! Fixed-capacity, NUL-terminated byte strings over caller-owned storage.
//!
//! Display buffers on the target hardware are a few dozen bytes, so every
//! string the engine builds (the key path and each rendered page) lives in a
//! slice the caller hands in. [`BoundedBuf`] is the single append primitive
//! both of them share.
//!
//! The capacity of a buffer is the length of its backing slice and includes
//! the terminator slot, so at most `capacity - 1` content bytes fit. Appending
//! more than fits is not an error: the chunk is cut to whatever room is left
//! and the buffer stays terminated. A zero-length slice holds nothing, not
//! even a terminator.

use core::fmt;

use bstr::{BStr, ByteSlice};

/// A byte string of at most `capacity - 1` bytes, kept NUL-terminated inside
/// a borrowed slice.
pub struct BoundedBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> BoundedBuf<'a> {
    /// Zero-fills `buf` and wraps it as an empty string.
    pub fn new(buf: &'a mut [u8]) -> Self {
        buf.fill(0);
        Self { buf, len: 0 }
    }

    /// Wraps a buffer that may already hold a terminated string.
    ///
    /// The last byte is forced to NUL first, so a buffer filled to the brim
    /// (or never terminated) resumes as a string of `capacity - 1` bytes.
    pub fn resume(buf: &'a mut [u8]) -> Self {
        if buf.is_empty() {
            return Self { buf, len: 0 };
        }
        let last = buf.len() - 1;
        buf[last] = 0;
        let len = buf.find_byte(0).unwrap_or(0);
        Self { buf, len }
    }

    /// Size of the backing slice, terminator slot included.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of content bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no content bytes are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Content bytes that can still be appended.
    pub fn remaining(&self) -> usize {
        self.capacity().saturating_sub(1).saturating_sub(self.len)
    }

    /// Appends as much of `chunk` as fits and returns how many bytes were
    /// copied. `chunk` need not be terminated.
    pub fn push(&mut self, chunk: &[u8]) -> usize {
        let n = chunk.len().min(self.remaining());
        if n > 0 {
            self.buf[self.len..self.len + n].copy_from_slice(&chunk[..n]);
            self.len += n;
            self.buf[self.len] = 0;
        }
        n
    }

    /// Cuts the string back to `len` bytes. Lengths at or past the current
    /// length leave it unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.len = len;
            self.buf[len] = 0;
        }
    }

    /// Zero-fills the whole backing slice.
    pub fn clear(&mut self) {
        self.buf.fill(0);
        self.len = 0;
    }

    /// Content bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Content bytes viewed as a byte string.
    pub fn as_bstr(&self) -> &BStr {
        self.as_bytes().as_bstr()
    }
}

impl fmt::Debug for BoundedBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedBuf")
            .field("content", &self.as_bstr())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl fmt::Display for BoundedBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}
