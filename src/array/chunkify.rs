//! Lazy chunking of sequences
//!
//! [`chunkify`] works on any iterator and buffers at most `chunk_size`
//! items at a time. [`chunkify_slice`] is the fast path for data that is
//! already in memory and hands out borrowed sub-slices by index.

use crate::error::{Result, UtilError};
use std::iter::FusedIterator;

fn validate_chunk_size(chunk_size: usize) -> Result<()> {
    if chunk_size == 0 {
        return Err(UtilError::invalid_argument(format!(
            "Expected `chunk_size` to be an integer from 1 and up, got `{chunk_size}`"
        )));
    }
    Ok(())
}

/// Split an iterable into evenly sized chunks. The last chunk could be smaller.
///
/// # Arguments
///
/// * `iterable` - Any source of values; it is consumed lazily
/// * `chunk_size` - Length of every chunk but possibly the last
///
/// # Returns
///
/// An iterator of `Vec` chunks, in source order.
///
/// # Errors
///
/// Returns [`UtilError::InvalidArgument`] when `chunk_size` is zero.
///
/// # Example
///
/// ```rust
/// use utilkit::array::chunkify;
///
/// let chunks: Vec<Vec<i32>> = chunkify(vec![1, 2, 3, 4], 2).unwrap().collect();
/// assert_eq!(chunks, vec![vec![1, 2], vec![3, 4]]);
///
/// let chunks: Vec<Vec<i32>> = chunkify(vec![1, 2, 3, 4], 3).unwrap().collect();
/// assert_eq!(chunks, vec![vec![1, 2, 3], vec![4]]);
/// ```
pub fn chunkify<I>(iterable: I, chunk_size: usize) -> Result<Chunkify<I::IntoIter>>
where
    I: IntoIterator,
{
    validate_chunk_size(chunk_size)?;
    Ok(Chunkify {
        source: iterable.into_iter(),
        chunk_size,
    })
}

/// Split a slice into borrowed chunks by index
///
/// # Errors
///
/// Returns [`UtilError::InvalidArgument`] when `chunk_size` is zero.
///
/// # Example
///
/// ```rust
/// use utilkit::array::chunkify_slice;
///
/// let data = [1, 2, 3, 4, 5];
/// let chunks: Vec<&[i32]> = chunkify_slice(&data, 2).unwrap().collect();
/// assert_eq!(chunks, vec![&[1, 2][..], &[3, 4][..], &[5][..]]);
/// ```
pub fn chunkify_slice<T>(slice: &[T], chunk_size: usize) -> Result<SliceChunks<'_, T>> {
    validate_chunk_size(chunk_size)?;
    Ok(SliceChunks {
        slice,
        index: 0,
        chunk_size,
    })
}

/// Iterator returned by [`chunkify`]
///
/// Single pass: once the source is drained, so is this iterator.
#[derive(Debug, Clone)]
pub struct Chunkify<I> {
    source: I,
    chunk_size: usize,
}

impl<I> Chunkify<I> {
    /// Maximum length of each yielded chunk
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<I: Iterator> Iterator for Chunkify<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        // Size the buffer from the hint, never above one chunk
        let (lower, _) = self.source.size_hint();
        let mut chunk = Vec::with_capacity(lower.clamp(1, self.chunk_size));

        for value in self.source.by_ref() {
            chunk.push(value);
            if chunk.len() == self.chunk_size {
                return Some(chunk);
            }
        }

        // Flush the trailing partial chunk
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (
            lower.div_ceil(self.chunk_size),
            upper.map(|upper| upper.div_ceil(self.chunk_size)),
        )
    }
}

impl<I: FusedIterator> FusedIterator for Chunkify<I> {}

/// Iterator returned by [`chunkify_slice`]
#[derive(Debug, Clone)]
pub struct SliceChunks<'a, T> {
    slice: &'a [T],
    index: usize,
    chunk_size: usize,
}

impl<'a, T> Iterator for SliceChunks<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.slice.len() {
            return None;
        }

        let end = self.slice.len().min(self.index + self.chunk_size);
        let chunk = &self.slice[self.index..end];
        self.index = end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.slice.len() - self.index).div_ceil(self.chunk_size);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for SliceChunks<'_, T> {}

impl<T> FusedIterator for SliceChunks<'_, T> {}
