use crate::datavec::{Datavec, ReadOutcome};
use crate::error::Result;

/// A run of implicit zero bytes, such as the filler an archive format needs to reach its next
/// block boundary. Nothing is ever read from storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PadVec {
    size: u64,
}

impl PadVec {
    #[must_use]
    pub const fn new(size: u64) -> Self {
        Self { size }
    }
}

impl Datavec for PadVec {
    fn size(&self) -> u64 {
        self.size
    }

    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {}

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        let remaining = self.size.saturating_sub(offset);
        let n = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));

        buf[..n].fill(0);
        Ok(ReadOutcome::from_count(n))
    }
}
