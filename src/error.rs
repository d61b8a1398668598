use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatavecError>;

#[derive(Error, Debug)]
pub enum DatavecError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} was read before being opened", .path.display())]
    NotOpen { path: PathBuf },
    #[error("stream is full: at most {0} vectors can be placed")]
    StreamFull(usize),
    #[error("a vector of {length} bytes after {size} bytes overflows the stream size")]
    StreamOverflow { size: u64, length: u64 },
}

impl From<DatavecError> for io::Error {
    fn from(e: DatavecError) -> Self {
        match e {
            DatavecError::Open { source, .. }
            | DatavecError::Stat { source, .. } => source,
            e @ DatavecError::NotOpen { .. } => io::Error::new(io::ErrorKind::NotConnected, e),
            e @ (DatavecError::StreamFull(_) | DatavecError::StreamOverflow { .. }) => {
                io::Error::new(io::ErrorKind::Other, e)
            }
        }
    }
}
