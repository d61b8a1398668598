use std::io::{self, Read, Seek, SeekFrom};

use crate::datavec::{Datavec, Opened};
use crate::error::Result;

/// Reads an opened vector through [`std::io::Read`] and [`std::io::Seek`].
///
/// The vector stays open for as long as the reader lives. End-of-data reads as `Ok(0)`.
pub struct DatavecReader<'a, D: Datavec> {
    vec: Opened<'a, D>,
    pos: u64,
}

impl<'a, D: Datavec> DatavecReader<'a, D> {
    /// Open `vec` and start reading at its first byte.
    ///
    /// # Errors
    /// If the vector cannot be opened.
    pub fn new(vec: &'a mut D) -> Result<Self> {
        Ok(Self {
            vec: vec.acquire()?,
            pos: 0,
        })
    }

    #[must_use]
    pub const fn position(&self) -> u64 {
        self.pos
    }
}

impl<D: Datavec> Read for DatavecReader<'_, D> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let n = self.vec.read_at(buf, self.pos)?.count();
        self.pos += n as u64;
        Ok(n)
    }
}

impl<D: Datavec> Seek for DatavecReader<'_, D> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => Some(n),
            SeekFrom::End(delta) => self.vec.size().checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };

        self.pos = target.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        Ok(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PadVec, PathVec, Vector};
    use std::{fs, io::Write};
    use tempdir::TempDir;

    #[test]
    fn copies_a_whole_vector() -> io::Result<()> {
        let mut vec = Vector::mem(b"copy me".as_slice());
        let mut reader = DatavecReader::new(&mut vec)?;

        let mut out = Vec::new();
        io::copy(&mut reader, &mut out)?;
        assert_eq!(out, b"copy me");
        assert_eq!(reader.position(), 7);

        Ok(())
    }

    #[test]
    fn seeks_relative_to_start_end_and_current() -> io::Result<()> {
        let mut vec = Vector::mem(b"0123456789".as_slice());
        let mut reader = DatavecReader::new(&mut vec)?;
        let mut buf = [0; 2];

        reader.seek(SeekFrom::End(-3))?;
        reader.read_exact(&mut buf)?;
        assert_eq!(&buf, b"78");

        reader.seek(SeekFrom::Current(-5))?;
        reader.read_exact(&mut buf)?;
        assert_eq!(&buf, b"45");

        reader.seek(SeekFrom::Start(1))?;
        reader.read_exact(&mut buf)?;
        assert_eq!(&buf, b"12");

        assert!(reader.seek(SeekFrom::Current(-10)).is_err());
        assert_eq!(reader.position(), 3);

        Ok(())
    }

    #[test]
    fn reading_past_the_end_yields_nothing() -> io::Result<()> {
        let mut vec = PadVec::new(4);
        let mut reader = DatavecReader::new(&mut vec)?;

        reader.seek(SeekFrom::Start(100))?;
        assert_eq!(reader.read(&mut [1; 8])?, 0);

        Ok(())
    }

    #[test]
    fn closes_the_file_when_dropped() -> io::Result<()> {
        let dir = TempDir::new("reader").expect("Failed to create temporary directory");
        let path = dir.path().join("file");
        fs::File::create(&path)?.write_all(b"on disk")?;

        let mut vec = PathVec::stat(&path)?;
        {
            let mut reader = DatavecReader::new(&mut vec)?;
            let mut content = String::new();
            reader.read_to_string(&mut content)?;
            assert_eq!(content, "on disk");
        }
        assert!(!vec.is_open());

        Ok(())
    }
}
