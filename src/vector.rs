use bytes::Bytes;

use crate::datavec::{Datavec, ReadOutcome};
use crate::error::Result;
use crate::mem::MemVec;
use crate::pad::PadVec;
use crate::path::PathVec;

/// Which kind of backing a [`Vector`] has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VectorKind {
    Mem,
    Path,
    Pad,
}

/// Any of the vector kinds, so mixed sequences can be held without boxing.
#[derive(Debug)]
pub enum Vector {
    Mem(MemVec),
    Path(PathVec),
    Pad(PadVec),
}

impl Vector {
    #[must_use]
    pub fn mem(data: impl Into<Bytes>) -> Self {
        Self::Mem(MemVec::new(data))
    }

    #[must_use]
    pub const fn pad(size: u64) -> Self {
        Self::Pad(PadVec::new(size))
    }

    #[must_use]
    pub const fn kind(&self) -> VectorKind {
        match self {
            Self::Mem(_) => VectorKind::Mem,
            Self::Path(_) => VectorKind::Path,
            Self::Pad(_) => VectorKind::Pad,
        }
    }
}

impl From<MemVec> for Vector {
    fn from(v: MemVec) -> Self {
        Self::Mem(v)
    }
}

impl From<PathVec> for Vector {
    fn from(v: PathVec) -> Self {
        Self::Path(v)
    }
}

impl From<PadVec> for Vector {
    fn from(v: PadVec) -> Self {
        Self::Pad(v)
    }
}

impl Datavec for Vector {
    fn size(&self) -> u64 {
        match self {
            Self::Mem(v) => v.size(),
            Self::Path(v) => v.size(),
            Self::Pad(v) => v.size(),
        }
    }

    fn open(&mut self) -> Result<()> {
        match self {
            Self::Mem(v) => v.open(),
            Self::Path(v) => v.open(),
            Self::Pad(v) => v.open(),
        }
    }

    fn close(&mut self) {
        match self {
            Self::Mem(v) => v.close(),
            Self::Path(v) => v.close(),
            Self::Pad(v) => v.close(),
        }
    }

    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        match self {
            Self::Mem(v) => v.read_at(buf, offset),
            Self::Path(v) => v.read_at(buf, offset),
            Self::Pad(v) => v.read_at(buf, offset),
        }
    }
}
