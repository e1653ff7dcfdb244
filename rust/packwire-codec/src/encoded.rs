use std::ops::Deref;

/// A small, stack-allocated encoded value of at most `N` bytes.
///
/// Variable-length encoders return this instead of a `Vec<u8>` so that a sink
/// can hand the frame to its buffer in a single `put` without allocating.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Encoded<const N: usize> {
    buf: [u8; N],
    len: u8,
}

impl<const N: usize> Encoded<N> {
    pub(crate) fn new() -> Self {
        Encoded {
            buf: [0u8; N],
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, byte: u8) {
        self.buf[self.len as usize] = byte;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        let start = self.len as usize;
        self.buf[start..start + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len() as u8;
    }

    /// Returns the encoded bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

impl<const N: usize> Deref for Encoded<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> AsRef<[u8]> for Encoded<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> std::fmt::Debug for Encoded<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_bytes()).finish()
    }
}
