//! Implementations of the BF tape

use thiserror::Error;

use crate::{BfNum, TapeAddr};

/// Error type for tape operations
#[derive(Debug, Clone, Copy, Error, Hash, PartialEq, Eq)]
pub enum TapeError {
    /// The tape could not grow to the requested number of cells.
    #[error("Failed to expand the tape to {requested} cells")]
    AllocationFailure { requested: usize },
}

/// A trait implementing a tape for the BF program memory.
///
/// The tape is conceptually infinite in both directions. Moving the cursor
/// can only fail if the implementation cannot obtain more memory.
pub trait Tape {
    /// Move the cursor one cell to the right.
    fn advance(&mut self) -> Result<(), TapeError>;
    /// Move the cursor one cell to the left.
    fn retreat(&mut self) -> Result<(), TapeError>;
    /// Add one to the current cell (wrapping).
    fn increment(&mut self);
    /// Subtract one from the current cell (wrapping).
    fn decrement(&mut self);
    /// Value of the current cell.
    fn read(&self) -> BfNum;
    /// Overwrite the current cell.
    fn write(&mut self, value: BfNum);
    /// Logical address of the cursor, relative to the starting cell.
    fn position(&self) -> TapeAddr;
}

/// A tape implemented with a Vec.
///
/// Starts out as a single zero cell. Whenever the cursor would leave the
/// allocated region the capacity is doubled. Growing to the right appends
/// zeroes, growing to the left moves the existing cells into the upper half
/// of the new region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecTape {
    data: Vec<BfNum>,
    /// Index of the cursor in `data`, always `< data.len()`.
    cursor: usize,
    /// Index of logical address 0 in `data`.
    origin: usize,
    /// Maximum number of cells we are allowed to allocate.
    limit: Option<usize>,
}

impl VecTape {
    pub fn new() -> Self {
        Self {
            data: vec![BfNum::ZERO],
            cursor: 0,
            origin: 0,
            limit: None,
        }
    }

    /// Create a tape that refuses to grow beyond `max_cells` cells.
    pub fn with_limit(max_cells: usize) -> Self {
        Self {
            limit: Some(max_cells),
            ..Self::new()
        }
    }

    /// Number of allocated cells.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Read any cell by logical address. Cells that were never allocated
    /// are zero.
    pub fn get(&self, addr: TapeAddr) -> BfNum {
        let Some(idx) = i64::from(addr).checked_add(self.origin as i64) else {
            return BfNum::ZERO;
        };
        match usize::try_from(idx) {
            Ok(idx) => self.data.get(idx).copied().unwrap_or_default(),
            Err(_) => BfNum::ZERO,
        }
    }

    /// The allocated cells, lowest address first.
    pub fn cells(&self) -> &[BfNum] {
        &self.data
    }

    /// Compute the doubled capacity, respecting the configured limit.
    fn doubled_capacity(&self) -> Result<usize, TapeError> {
        let requested = self
            .data
            .len()
            .checked_mul(2)
            .ok_or(TapeError::AllocationFailure {
                requested: usize::MAX,
            })?;
        #[cfg(fuzzing)]
        if requested > 2usize.pow(20) {
            return Err(TapeError::AllocationFailure { requested });
        }
        match self.limit {
            Some(limit) if requested > limit => Err(TapeError::AllocationFailure { requested }),
            _ => Ok(requested),
        }
    }

    /// Double the tape, keeping the old cells in the lower half.
    fn grow_upwards(&mut self) -> Result<(), TapeError> {
        let requested = self.doubled_capacity()?;
        self.data
            .try_reserve_exact(requested - self.data.len())
            .map_err(|_| TapeError::AllocationFailure { requested })?;
        self.data.resize(requested, BfNum::ZERO);
        Ok(())
    }

    /// Double the tape, moving the old cells into the upper half.
    fn grow_downwards(&mut self) -> Result<(), TapeError> {
        let requested = self.doubled_capacity()?;
        let old_len = self.data.len();
        let mut grown = Vec::new();
        grown
            .try_reserve_exact(requested)
            .map_err(|_| TapeError::AllocationFailure { requested })?;
        grown.resize(old_len, BfNum::ZERO);
        grown.extend_from_slice(&self.data);
        self.data = grown;
        self.cursor += old_len;
        self.origin += old_len;
        Ok(())
    }
}

impl Default for VecTape {
    fn default() -> Self {
        Self::new()
    }
}

impl Tape for VecTape {
    fn advance(&mut self) -> Result<(), TapeError> {
        if self.cursor + 1 == self.data.len() {
            self.grow_upwards()?;
        }
        self.cursor += 1;
        Ok(())
    }

    fn retreat(&mut self) -> Result<(), TapeError> {
        if self.cursor == 0 {
            self.grow_downwards()?;
        }
        self.cursor -= 1;
        Ok(())
    }

    fn increment(&mut self) {
        self.data[self.cursor] += BfNum::ONE;
    }

    fn decrement(&mut self) {
        self.data[self.cursor] -= BfNum::ONE;
    }

    fn read(&self) -> BfNum {
        self.data[self.cursor]
    }

    fn write(&mut self, value: BfNum) {
        self.data[self.cursor] = value;
    }

    fn position(&self) -> TapeAddr {
        TapeAddr::new(self.cursor as i64 - self.origin as i64)
    }
}
