//! A runtime-sized square bit grid.
//!
//! Boards come in several widths (6, 10, 14, ...), so unlike a const-generic
//! bitboard the dimension is chosen at construction. Cells are packed
//! row-major into `u64` words; `(x, y)` addresses column `x` of row `y`.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::Coord;

const WORD_BITS: usize = u64::BITS as usize;

/// Errors returned by bit grid operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitGridError {
    /// A grid must be at least 1×1.
    ZeroSize,
    /// Column or row index is outside `[0, size)`.
    IndexOutOfBounds { x: usize, y: usize },
}

impl fmt::Display for BitGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitGridError::ZeroSize => write!(f, "ZeroSize: grid size must be positive"),
            BitGridError::IndexOutOfBounds { x, y } => {
                write!(f, "IndexOutOfBounds: x={}, y={}", x, y)
            }
        }
    }
}

/// A `size × size` set of cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitGrid {
    size: usize,
    words: Vec<u64>,
}

impl BitGrid {
    /// Create an empty grid. Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "bit grid size must be positive");
        Self::empty(size)
    }

    /// Fallible constructor: returns `Err(ZeroSize)` for a zero-sized grid.
    pub fn try_new(size: usize) -> Result<Self, BitGridError> {
        if size == 0 {
            Err(BitGridError::ZeroSize)
        } else {
            Ok(Self::empty(size))
        }
    }

    fn empty(size: usize) -> Self {
        let cells = size * size;
        BitGrid {
            size,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Width (and height) of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of set cells.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no cells are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Gets the cell at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<bool, BitGridError> {
        let idx = self.index(x, y)?;
        Ok((self.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1)
    }

    /// Sets the cell at (x, y).
    pub fn set(&mut self, x: usize, y: usize) -> Result<(), BitGridError> {
        let idx = self.index(x, y)?;
        self.words[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
        Ok(())
    }

    /// Clears the cell at (x, y).
    pub fn clear(&mut self, x: usize, y: usize) -> Result<(), BitGridError> {
        let idx = self.index(x, y)?;
        self.words[idx / WORD_BITS] &= !(1 << (idx % WORD_BITS));
        Ok(())
    }

    /// Membership test that treats out-of-bounds coordinates as unset.
    #[inline]
    pub fn contains(&self, at: Coord) -> bool {
        self.get(at.x, at.y).unwrap_or(false)
    }

    /// Sets `at`, returning `true` if it was not already set.
    /// Out-of-bounds coordinates are ignored and return `false`.
    pub fn insert(&mut self, at: Coord) -> bool {
        match self.get(at.x, at.y) {
            Ok(false) => self.set(at.x, at.y).is_ok(),
            _ => false,
        }
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize, BitGridError> {
        if x >= self.size || y >= self.size {
            Err(BitGridError::IndexOutOfBounds { x, y })
        } else {
            Ok(y * self.size + x)
        }
    }

    /// Iterator over the set cells in row-major order.
    pub fn iter_set_bits(&self) -> SetBits<'_> {
        SetBits { grid: self, idx: 0 }
    }
}

impl fmt::Debug for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}>:", self.size)?;
        writeln!(f, "{}", self)
    }
}

impl fmt::Display for BitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let ch = if self.contains(Coord::new(x, y)) { '■' } else { '□' };
                write!(f, "{} ", ch)?;
            }
            if y + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set cells of a [`BitGrid`].
#[derive(Clone, Copy)]
pub struct SetBits<'a> {
    grid: &'a BitGrid,
    idx: usize,
}

impl Iterator for SetBits<'_> {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        let cells = self.grid.size * self.grid.size;
        while self.idx < cells {
            let idx = self.idx;
            self.idx += 1;
            if (self.grid.words[idx / WORD_BITS] >> (idx % WORD_BITS)) & 1 == 1 {
                return Some(Coord::new(idx % self.grid.size, idx / self.grid.size));
            }
        }
        None
    }
}
