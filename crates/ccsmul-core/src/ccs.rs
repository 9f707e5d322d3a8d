//! CCS format definitions and constructors

use crate::error::CcsError;
use crate::index::i64_to_usize;
use crate::THRESHOLD;
use core::ops::Range;

/// Compressed sparse column matrix.
///
/// `cumulative_counts[j]` holds the number of stored entries in columns
/// `0..=j`, so column `j` occupies `cumulative_counts[j - 1]..cumulative_counts[j]`
/// of `values`/`row_indices` (with an implicit leading zero).
#[derive(Debug, Clone, PartialEq)]
pub struct Ccs<T, I> {
    values: Vec<T>,
    row_indices: Vec<I>,       // row index per stored value
    cumulative_counts: Vec<I>, // running nnz per column, length ncols
    nrows: usize,
    ncols: usize,
}

impl<T, I> Ccs<T, I> {
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }
    #[inline]
    #[must_use]
    pub const fn nrows(&self) -> usize {
        self.nrows
    }
    #[inline]
    #[must_use]
    pub const fn ncols(&self) -> usize {
        self.ncols
    }
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }
    #[inline]
    #[must_use]
    pub fn row_indices(&self) -> &[I] {
        &self.row_indices
    }
    #[inline]
    #[must_use]
    pub fn cumulative_counts(&self) -> &[I] {
        &self.cumulative_counts
    }
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Ccs<f64, i64> {
    /// Build a matrix from raw parts.
    ///
    /// Structural checks always run: lengths, final count, non-negative and
    /// non-decreasing counts, in-bounds and strictly increasing row indices.
    /// With `check` set, every value must also be significant
    /// (`|v| > THRESHOLD`).
    #[inline]
    pub fn from_parts(
        nrows: usize,
        ncols: usize,
        cumulative_counts: Vec<i64>,
        row_indices: Vec<i64>,
        values: Vec<f64>,
        check: bool,
    ) -> Result<Self, CcsError> {
        if cumulative_counts.len() != ncols {
            return Err(CcsError::InvalidStructure(
                "cumulative_counts length must be ncols",
            ));
        }
        if row_indices.len() != values.len() {
            return Err(CcsError::InvalidStructure(
                "row_indices and values must have equal length",
            ));
        }
        let nnz = values.len();
        let total = cumulative_counts.last().copied().unwrap_or(0);
        if usize::try_from(total).ok() != Some(nnz) {
            return Err(CcsError::InvalidStructure(
                "last cumulative count must equal nnz",
            ));
        }
        let mut start = 0_i64;
        for &end in &cumulative_counts {
            if end < 0 {
                return Err(CcsError::InvalidStructure(
                    "cumulative_counts must be non-negative",
                ));
            }
            if end < start {
                return Err(CcsError::InvalidStructure(
                    "cumulative_counts must be non-decreasing",
                ));
            }
            let Some(col_rows) = row_indices.get(i64_to_usize(start)..i64_to_usize(end)) else {
                return Err(CcsError::InvalidStructure(
                    "cumulative_counts elements must be within [0, nnz]",
                ));
            };
            let mut prev_row = -1_i64;
            for &i in col_rows {
                let out_of_bounds = usize::try_from(i).map_or(true, |row| row >= nrows);
                if out_of_bounds {
                    return Err(CcsError::InvalidStructure("row index out of bounds"));
                }
                if i <= prev_row {
                    return Err(CcsError::InvalidStructure(
                        "row indices must be strictly increasing within each column",
                    ));
                }
                prev_row = i;
            }
            start = end;
        }
        if check {
            // NaN fails the comparison and is rejected too.
            if values.iter().any(|v| !(v.abs() > THRESHOLD)) {
                return Err(CcsError::InvalidStructure(
                    "stored values must exceed the zero threshold in magnitude",
                ));
            }
        }
        Ok(Self {
            values,
            row_indices,
            cumulative_counts,
            nrows,
            ncols,
        })
    }

    /// Build a matrix from parts already known to satisfy every invariant.
    ///
    /// Nothing is verified here. The multiplication kernels still panic on
    /// unsorted or out-of-range rows in the right operand.
    #[inline]
    #[must_use]
    pub const fn from_parts_unchecked(
        nrows: usize,
        ncols: usize,
        cumulative_counts: Vec<i64>,
        row_indices: Vec<i64>,
        values: Vec<f64>,
    ) -> Self {
        Self {
            values,
            row_indices,
            cumulative_counts,
            nrows,
            ncols,
        }
    }

    /// An `nrows x ncols` matrix with no stored entries.
    #[must_use]
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_parts_unchecked(nrows, ncols, vec![0; ncols], Vec::new(), Vec::new())
    }

    /// Storage range of column `j` within `values`/`row_indices`.
    ///
    /// # Panics
    /// Panics if `j >= ncols`.
    #[inline]
    #[must_use]
    pub fn column_range(&self, j: usize) -> Range<usize> {
        let end = i64_to_usize(self.cumulative_counts[j]);
        let start = if j == 0 {
            0
        } else {
            i64_to_usize(self.cumulative_counts[j - 1])
        };
        start..end
    }

    /// Row indices and values stored in column `j`.
    ///
    /// # Panics
    /// Panics if `j >= ncols`.
    #[inline]
    #[must_use]
    pub fn column(&self, j: usize) -> (&[i64], &[f64]) {
        let r = self.column_range(j);
        (&self.row_indices[r.clone()], &self.values[r])
    }

    /// Number of entries stored in column `j`.
    #[inline]
    #[must_use]
    pub fn column_nnz(&self, j: usize) -> usize {
        self.column_range(j).len()
    }

    /// Iterate stored entries as `(row, col, value)` in storage order.
    #[must_use]
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            matrix: self,
            pos: 0,
            col: 0,
        }
    }
}

/// Storage-order walk over a [`Ccs`], recovering each entry's column by
/// advancing past every cumulative count boundary the position has reached.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    matrix: &'a Ccs<f64, i64>,
    pos: usize,
    col: usize,
}

impl Iterator for Entries<'_> {
    type Item = (usize, usize, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.matrix;
        if self.pos >= m.values.len() {
            return None;
        }
        // Skips any run of empty columns, not just one.
        while i64_to_usize(m.cumulative_counts[self.col]) <= self.pos {
            self.col += 1;
        }
        let item = (
            i64_to_usize(m.row_indices[self.pos]),
            self.col,
            m.values[self.pos],
        );
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.matrix.values.len() - self.pos;
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for Entries<'_> {}
