use std::{
    fs::{self, File, Metadata},
    io,
    path::{Path, PathBuf},
};

use log::{debug, trace};

use crate::datavec::{Datavec, ReadOutcome};
use crate::error::{DatavecError, Result};

/// Largest offset a positional read accepts.
const MAX_FILE_OFFSET: u64 = i64::MAX as u64;

/// A vector over a file on disk.
///
/// The size comes from metadata captured when the vector is built (typically by whatever walked
/// the directory tree), so asking for it never hits the filesystem. The file itself is only held
/// open between [`Datavec::open`] and [`Datavec::close`].
#[derive(Debug)]
pub struct PathVec {
    path: PathBuf,
    size: u64,
    file: Option<File>,
}

impl PathVec {
    /// Build a vector from metadata the caller already fetched.
    #[must_use]
    pub fn with_metadata(path: impl Into<PathBuf>, metadata: &Metadata) -> Self {
        Self::with_size(path, metadata.len())
    }

    #[must_use]
    pub fn with_size(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            file: None,
        }
    }

    /// Build a vector by querying the filesystem for the file's metadata.
    ///
    /// # Errors
    /// If the metadata cannot be read.
    pub fn stat(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let metadata = fs::metadata(&path).map_err(|source| DatavecError::Stat {
            path: path.clone(),
            source,
        })?;
        Ok(Self::with_metadata(path, &metadata))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl Datavec for PathVec {
    fn size(&self) -> u64 {
        self.size
    }

    /// Open the file read-only. Opening an already open vector keeps the existing handle.
    fn open(&mut self) -> Result<()> {
        if self.file.is_some() {
            debug!("{} is already open", self.path.display());
            return Ok(());
        }

        let file = File::open(&self.path).map_err(|source| DatavecError::Open {
            path: self.path.clone(),
            source,
        })?;
        debug!("opened {}", self.path.display());
        self.file = Some(file);
        Ok(())
    }

    fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("closed {}", self.path.display());
        }
    }

    /// Fill as much of `buf` as the file allows.
    ///
    /// Hitting the end of the file after some bytes were read is not an error. Whenever nothing
    /// could be read, whatever the file reported, the result is end-of-data. An I/O error after
    /// some bytes were read returns those bytes.
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        let file = self.file.as_ref().ok_or_else(|| DatavecError::NotOpen {
            path: self.path.clone(),
        })?;

        // Positional reads take a signed offset; nothing of a real file lives up there.
        if offset > MAX_FILE_OFFSET {
            return Ok(ReadOutcome::EndOfData);
        }

        let mut filled = 0;
        while filled < buf.len() {
            match read_once(file, &mut buf[filled..], offset + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    debug!(
                        "read of {} at {} stopped after {filled} bytes: {e}",
                        self.path.display(),
                        offset + filled as u64
                    );
                    break;
                }
            }
        }

        trace!("read {filled} bytes of {} at {offset}", self.path.display());
        Ok(ReadOutcome::from_count(filled))
    }
}

#[cfg(unix)]
fn read_once(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;

    file.read_at(buf, offset)
}

#[cfg(windows)]
fn read_once(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;

    file.seek_read(buf, offset)
}
