//! A forward byte stream wrapper that supports bounded "unread": bytes the
//! caller consumed but did not actually want are queued and re-delivered,
//! byte-exact and in order, before the wrapper pulls anything new from the
//! underlying source.
//!
//! This is what lets the rest of the reader behave as if it never
//! over-reads, even though look-ahead (data-descriptor scanning, the
//! DEFLATE fill loop) routinely reads past the bytes it actually wanted.

use std::collections::VecDeque;
use std::io::{self, Read};

/// Wraps any [`Read`] source with FIFO push-back.
pub struct PushbackReader<R> {
    inner: R,
    pending: VecDeque<u8>,
}

impl<R: Read> PushbackReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: VecDeque::new(),
        }
    }

    /// Push `bytes` back onto the front of the stream. The next reads will
    /// see them, in order, before anything new is pulled from the source.
    pub fn unread(&mut self, bytes: &[u8]) {
        for &b in bytes.iter().rev() {
            self.pending.push_front(b);
        }
    }

    /// Read up to `buf.len()` bytes, serving pushed-back bytes first.
    /// Returns the number of bytes read; `0` means end of input.
    pub fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut n = 0;
        while n < buf.len() {
            match self.pending.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        if n == buf.len() {
            return Ok(n);
        }
        let m = self.inner.read(&mut buf[n..])?;
        Ok(n + m)
    }

    /// Read exactly one byte, or `None` at end of input.
    pub fn read_one(&mut self) -> io::Result<Option<u8>> {
        if let Some(b) = self.pending.pop_front() {
            return Ok(Some(b));
        }
        let mut buf = [0u8; 1];
        let n = self.inner.read(&mut buf)?;
        if n == 0 {
            Ok(None)
        } else {
            Ok(Some(buf[0]))
        }
    }
}
