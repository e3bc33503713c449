//! Character sources consumed by the segmenter.
use std::io::{ErrorKind, Read};
use std::str::Chars;

use crate::errors::Result;

const BYTE_CHUNK_SIZE: usize = 8192;

/// Readable source of characters.
pub trait CharRead {
    /// Reads characters into `buf`, returning how many were written.
    ///
    /// `0` is returned only at the end of data (or when `buf` is empty).
    ///
    /// # Errors
    ///
    /// [`HansegError`](crate::errors::HansegError) is returned when the underlying
    /// source fails or yields malformed data.
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize>;
}

impl<T> CharRead for &mut T
where
    T: CharRead + ?Sized,
{
    #[inline(always)]
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize> {
        (**self).read_chars(buf)
    }
}

impl<T> CharRead for Box<T>
where
    T: CharRead + ?Sized,
{
    #[inline(always)]
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize> {
        (**self).read_chars(buf)
    }
}

/// Character source over a string slice.
pub struct StrReader<'a> {
    chars: Chars<'a>,
}

impl<'a> StrReader<'a> {
    /// Creates a new instance.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }
}

impl CharRead for StrReader<'_> {
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize> {
        let mut n = 0;
        for (slot, c) in buf.iter_mut().zip(&mut self.chars) {
            *slot = c;
            n += 1;
        }
        Ok(n)
    }
}

/// Character source decoding UTF-8 from a byte reader.
///
/// Multi-byte sequences split across reads of the inner reader are reassembled.
pub struct Utf8Reader<R> {
    inner: R,
    bytes: Vec<u8>,
    start: usize,
    eof: bool,
}

impl<R> Utf8Reader<R>
where
    R: Read,
{
    /// Creates a new instance.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes: vec![],
            start: 0,
            eof: false,
        }
    }

    /// Unwraps this reader, returning the inner reader.
    ///
    /// Bytes already read from the inner reader but not yet decoded are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill_bytes(&mut self) -> Result<()> {
        self.bytes.drain(..self.start);
        self.start = 0;
        let old_len = self.bytes.len();
        self.bytes.resize(old_len + BYTE_CHUNK_SIZE, 0);
        let num_read = loop {
            match self.inner.read(&mut self.bytes[old_len..]) {
                Ok(num_read) => break num_read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.bytes.truncate(old_len);
                    return Err(e.into());
                }
            }
        };
        self.bytes.truncate(old_len + num_read);
        if num_read == 0 {
            self.eof = true;
        }
        Ok(())
    }
}

impl<R> CharRead for Utf8Reader<R>
where
    R: Read,
{
    fn read_chars(&mut self, buf: &mut [char]) -> Result<usize> {
        let mut n = 0;
        while n < buf.len() {
            let pending = &self.bytes[self.start..];
            let (valid_up_to, error) = match std::str::from_utf8(pending) {
                Ok(_) => (pending.len(), None),
                Err(e) => (e.valid_up_to(), Some(e)),
            };
            let valid = std::str::from_utf8(&pending[..valid_up_to])?;

            let mut consumed = 0;
            for c in valid.chars() {
                if n == buf.len() {
                    break;
                }
                buf[n] = c;
                n += 1;
                consumed += c.len_utf8();
            }
            self.start += consumed;

            if n == buf.len() {
                break;
            }
            if let Some(e) = error {
                // An incomplete sequence at the end may still be completed by the next read.
                if e.error_len().is_some() || self.eof {
                    return Err(e.into());
                }
            }
            if self.eof {
                break;
            }
            self.fill_bytes()?;
        }
        Ok(n)
    }
}
