use std::ops::{Deref, DerefMut};

use crate::error::Result;

/// Size of the scratch buffer used by [`Datavec::read_to_end`].
const CHUNK_SIZE: usize = 8192;

/// What a single [`Datavec::read_at`] produced.
///
/// A positive count and end-of-data are never reported together: a read either fills at least one
/// byte of the caller's buffer or signals that nothing is available at that offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// This many bytes (at least one) were written to the front of the buffer.
    Filled(usize),
    /// Nothing is available at or beyond the requested offset.
    EndOfData,
}

impl ReadOutcome {
    /// Map a byte count to an outcome, treating zero bytes as end-of-data.
    #[must_use]
    pub const fn from_count(n: usize) -> Self {
        if n == 0 {
            Self::EndOfData
        } else {
            Self::Filled(n)
        }
    }

    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Filled(n) => n,
            Self::EndOfData => 0,
        }
    }

    #[must_use]
    pub const fn is_end(self) -> bool {
        matches!(self, Self::EndOfData)
    }
}

/// A contiguous logical byte range addressable by offset.
///
/// Offsets are always local to the vector; whoever stitches several vectors into one stream
/// translates its own offsets first.
pub trait Datavec {
    // Constructors are left to each implementation, once you have one, you can:

    /// Total addressable length of this vector.
    ///
    /// Never touches the backing storage, and does not depend on the vector being open.
    fn size(&self) -> u64;

    /// Acquire whatever backs this vector.
    ///
    /// # Errors
    /// If the backing resource cannot be acquired. Nothing is held in that case.
    fn open(&mut self) -> Result<()>;

    /// Release whatever `open` acquired.
    ///
    /// Safe to call in any state, including after a failed `open`.
    fn close(&mut self);

    /// Read up to `buf.len()` bytes starting at `offset`.
    ///
    /// Reading at or past `size()` yields [`ReadOutcome::EndOfData`].
    ///
    /// # Errors
    /// If reading the backing resource fails.
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome>;

    /// Open this vector, returning a guard which closes it again when dropped.
    ///
    /// # Errors
    /// If `open` fails.
    fn acquire(&mut self) -> Result<Opened<'_, Self>>
    where
        Self: Sized,
    {
        self.open()?;
        Ok(Opened { inner: self })
    }

    /// Append the whole content of this vector to `out`, returning how many bytes were added.
    ///
    /// The vector is opened for the duration of the call and closed on every exit path.
    ///
    /// # Errors
    /// If opening or reading fails.
    fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<u64>
    where
        Self: Sized,
    {
        let mut vec = self.acquire()?;
        let size = vec.size();
        let mut chunk = [0; CHUNK_SIZE];
        let mut offset = 0;

        while offset < size {
            match vec.read_at(&mut chunk, offset)? {
                ReadOutcome::Filled(n) => {
                    out.extend_from_slice(&chunk[..n]);
                    offset += n as u64;
                }
                ReadOutcome::EndOfData => break,
            }
        }

        Ok(offset)
    }
}

impl<D: Datavec + ?Sized> Datavec for &mut D {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        (**self).read_at(buf, offset)
    }
}

impl<D: Datavec + ?Sized> Datavec for Box<D> {
    fn size(&self) -> u64 {
        (**self).size()
    }

    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        (**self).read_at(buf, offset)
    }
}

/// An opened [`Datavec`]; dropping it closes the vector.
pub struct Opened<'a, D: Datavec + ?Sized> {
    inner: &'a mut D,
}

impl<D: Datavec + ?Sized> Deref for Opened<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        self.inner
    }
}

impl<D: Datavec + ?Sized> DerefMut for Opened<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        self.inner
    }
}

impl<D: Datavec + ?Sized> Drop for Opened<'_, D> {
    fn drop(&mut self) {
        self.inner.close();
    }
}
