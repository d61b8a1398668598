use bytes::Bytes;

use crate::datavec::{Datavec, ReadOutcome};
use crate::error::Result;

/// A vector over an immutable in-memory buffer.
///
/// The buffer is shared with whoever built it and is never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemVec {
    data: Bytes,
}

impl MemVec {
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    #[must_use]
    pub const fn from_static(data: &'static [u8]) -> Self {
        Self {
            data: Bytes::from_static(data),
        }
    }

    #[must_use]
    pub const fn data(&self) -> &Bytes {
        &self.data
    }
}

impl Datavec for MemVec {
    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {}

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        let Some(rest) = usize::try_from(offset)
            .ok()
            .and_then(|start| self.data.get(start..))
        else {
            return Ok(ReadOutcome::EndOfData);
        };

        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        Ok(ReadOutcome::from_count(n))
    }
}
