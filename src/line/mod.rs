//! Growable line of character cells
//!
//! Storage is a slot array whose length is the current capacity; slots past
//! `size` always hold the empty sentinel. Growth doubles the capacity and is
//! fallible: an overflowing or failed reallocation is reported instead of
//! dropping the character.

use crate::character::CharCell;
use crate::constants::{errors, line};
use crate::error::{ErrorType, LinerError, Result};

/// Ordered sequence of cells with an explicit capacity
#[derive(Debug, Clone)]
pub struct LineBuffer {
    slots: Vec<CharCell>,
    size: usize,
    max_capacity: usize,
}

impl LineBuffer {
    /// A buffer with the default capacity of 64 cells
    pub fn new() -> Result<Self> {
        Self::with_capacity(line::INITIAL_CAPACITY, line::MAX_CAPACITY)
    }

    /// A buffer with `initial` slots that never grows past `max_capacity`
    pub fn with_capacity(initial: usize, max_capacity: usize) -> Result<Self> {
        let initial = initial.max(1);
        if initial > max_capacity {
            return Err(LinerError::new(
                ErrorType::Allocation,
                errors::CAPACITY_OVERFLOW,
                format!(
                    "Initial capacity {} exceeds the limit of {}",
                    initial, max_capacity
                ),
            ));
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(initial).map_err(|e| {
            LinerError::new(
                ErrorType::Allocation,
                errors::ALLOCATION_FAILED,
                format!("Couldn't allocate the line: {e}"),
            )
        })?;
        slots.resize(initial, CharCell::EMPTY);

        Ok(LineBuffer {
            slots,
            size: 0,
            max_capacity,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<CharCell> {
        self.cells().get(index).copied()
    }

    /// The occupied cells, in order
    #[must_use]
    pub fn cells(&self) -> &[CharCell] {
        &self.slots[..self.size]
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharCell> {
        self.cells().iter()
    }

    /// Make room for one more cell, doubling the capacity when full
    fn grow_if_full(&mut self) -> Result<()> {
        if self.size < self.slots.len() {
            return Ok(());
        }

        let current = self.slots.len();
        let doubled = current
            .checked_mul(2)
            .filter(|&doubled| doubled <= self.max_capacity)
            .ok_or_else(|| {
                LinerError::new(
                    ErrorType::Allocation,
                    errors::CAPACITY_OVERFLOW,
                    format!(
                        "Line capacity {} cannot double within the limit of {}",
                        current, self.max_capacity
                    ),
                )
            })?;

        self.slots.try_reserve_exact(doubled - current).map_err(|e| {
            LinerError::new(
                ErrorType::Allocation,
                errors::ALLOCATION_FAILED,
                format!("Couldn't reallocate the line: {e}"),
            )
        })?;
        self.slots.resize(doubled, CharCell::EMPTY);

        tracing::debug!(from = current, to = doubled, "line buffer grew");
        Ok(())
    }

    /// Add `cell` at the end of the line
    pub fn append(&mut self, cell: CharCell) -> Result<()> {
        self.grow_if_full()?;
        self.slots[self.size] = cell;
        self.size += 1;
        Ok(())
    }

    /// Insert `cell` before `index`; `index == len()` appends
    pub fn insert(&mut self, cell: CharCell, index: usize) -> Result<()> {
        if index > self.size {
            return Err(self.out_of_bounds("insert", index));
        }

        self.grow_if_full()?;
        self.slots.copy_within(index..self.size, index + 1);
        self.slots[index] = cell;
        self.size += 1;
        Ok(())
    }

    /// Remove the cell at `index`, shifting the rest left
    pub fn erase(&mut self, index: usize) -> Result<CharCell> {
        if index >= self.size {
            return Err(self.out_of_bounds("erase", index));
        }

        let removed = self.slots[index];
        self.slots.copy_within(index + 1..self.size, index);
        self.size -= 1;
        self.slots[self.size] = CharCell::EMPTY;
        Ok(removed)
    }

    fn out_of_bounds(&self, operation: &str, index: usize) -> LinerError {
        LinerError::new(
            ErrorType::Bounds,
            errors::INDEX_OUT_OF_BOUNDS,
            format!("Cannot {} at {} (size: {})", operation, index, self.size),
        )
    }
}
