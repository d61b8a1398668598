use log::{debug, trace};
use scapegoat::SgSet;

use crate::datavec::{Datavec, ReadOutcome};
use crate::error::{DatavecError, Result};

type StreamOffset = u64;

/// Where one non-empty vector sits in the stream.
#[derive(Default)]
struct Span {
    start: StreamOffset,
    length: u64,
    // Position of the vector in `VecStream::vectors`.
    index: usize,
}

#[cfg(test)]
impl std::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {}: vector {}",
            self.start,
            self.end(),
            self.index
        )
    }
}

impl Span {
    const fn end(&self) -> StreamOffset {
        self.start + self.length
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        // Spans never overlap, so the start alone identifies one.
        self.start == other.start
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start.cmp(&other.start)
    }
}

/// Vectors laid back to back, in the order they were pushed, as one logical stream.
///
/// The caller decides the order and inserts whatever padding its format needs as vectors of its
/// own; the stream only translates stream offsets into vector offsets. At most `N` non-empty
/// vectors fit, and at most one of them is open at any time: reading moves the open handle along.
///
/// The span index lives inline, so keep `N` modest for streams on the stack.
pub struct VecStream<V, const N: usize> {
    vectors: Vec<V>,
    spans: SgSet<Span, N>,
    size: u64,
    current: Option<usize>,
}

#[cfg(test)]
impl<V, const N: usize> std::fmt::Debug for VecStream<V, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "stream of {} bytes", self.size)?;
        for s in self.spans.iter() {
            writeln!(f, "{s:?}")?;
        }
        Ok(())
    }
}

impl<V: Datavec, const N: usize> Default for VecStream<V, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Datavec, const N: usize> VecStream<V, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            vectors: Vec::new(),
            spans: SgSet::new(),
            size: 0,
            current: None,
        }
    }

    /// Append a vector to the end of the stream, returning the stream offset it starts at.
    ///
    /// Empty vectors are kept but never read from.
    ///
    /// # Errors
    /// If `N` non-empty vectors are already placed, or the stream size would overflow.
    pub fn push(&mut self, vec: V) -> Result<StreamOffset> {
        let start = self.size;
        let length = vec.size();
        let end = start
            .checked_add(length)
            .ok_or(DatavecError::StreamOverflow {
                size: start,
                length,
            })?;

        if length > 0 {
            if self.spans.len() >= N {
                return Err(DatavecError::StreamFull(N));
            }
            let inserted = self.spans.insert(Span {
                start,
                length,
                index: self.vectors.len(),
            });
            debug_assert!(inserted);
        }

        self.size = end;
        self.vectors.push(vec);
        Ok(start)
    }

    /// Find the vector holding a stream offset, and the offset within that vector.
    #[must_use]
    pub fn locate(&self, offset: StreamOffset) -> Option<(usize, u64)> {
        let probe = Span {
            start: offset,
            ..Span::default()
        };

        // Spans never overlap, so the last one starting at or before `offset` is the only
        // candidate.
        self.spans
            .range(..=probe)
            .next_back()
            .filter(|s| offset < s.end())
            .map(|s| (s.index, offset - s.start))
    }

    #[must_use]
    pub fn vectors(&self) -> &[V] {
        &self.vectors
    }

    /// Number of vectors pushed, empty ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Close whatever is open and hand the vectors back.
    #[must_use]
    pub fn into_vectors(mut self) -> Vec<V> {
        self.close();
        self.vectors
    }

    /// Make `index` the open vector, closing the previous one first.
    fn switch_to(&mut self, index: usize) -> Result<()> {
        if self.current == Some(index) {
            return Ok(());
        }

        self.close();
        self.vectors[index].open()?;
        debug!("stream moved to vector {index}");
        self.current = Some(index);
        Ok(())
    }

    /// An _expensive_ check that the stream is in a valid state, i.e.:
    ///  * Spans are non-empty and laid out back to back from offset zero.
    ///  * Span indices point at vectors of the recorded length.
    ///  * The stream size is the sum of the vector sizes.
    #[cfg(test)]
    fn assert_valid(&self) {
        let mut expected_start = 0;
        for s in self.spans.iter() {
            assert!(s.length > 0);
            assert_eq!(s.start, expected_start);
            assert_eq!(self.vectors[s.index].size(), s.length);
            expected_start = s.end();
        }

        assert_eq!(expected_start, self.size);
        assert_eq!(self.vectors.iter().map(Datavec::size).sum::<u64>(), self.size);
    }
}

impl<V: Datavec, const N: usize> Datavec for VecStream<V, N> {
    fn size(&self) -> u64 {
        self.size
    }

    /// Members are opened lazily by `read_at`, so there is nothing to do here.
    fn open(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) {
        if let Some(index) = self.current.take() {
            self.vectors[index].close();
        }
    }

    /// Reads never cross from one vector into the next; a read ending at a boundary is short.
    fn read_at(&mut self, buf: &mut [u8], offset: u64) -> Result<ReadOutcome> {
        let Some((index, local)) = self.locate(offset) else {
            return Ok(ReadOutcome::EndOfData);
        };

        self.switch_to(index)?;
        trace!("stream offset {offset} is vector {index} offset {local}");
        self.vectors[index].read_at(buf, local)
    }
}
