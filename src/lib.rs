pub mod datavec;
pub mod error;
mod mem;
mod pad;
mod path;
pub mod reader;
pub mod stream;
mod vector;

pub use datavec::{Datavec, Opened, ReadOutcome};
pub use error::{DatavecError, Result};
pub use mem::MemVec;
pub use pad::PadVec;
pub use path::PathVec;
pub use reader::DatavecReader;
pub use stream::VecStream;
pub use vector::{Vector, VectorKind};
