use std::{fmt, ops::Index};

use crate::digit::Digit;

/// Number of slots in the puzzle array.
pub const CAPACITY: usize = 10;

/// One position of the array: a digit, or empty.
pub type Slot = Option<Digit>;

/// A fixed-length row of slots.
///
/// For indexing operations, `0` is the leftmost slot. The length never changes:
/// inserting pushes the last slot off the end, deleting pulls an empty slot in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slots<const LEN: usize = CAPACITY>([Slot; LEN]);

impl<const LEN: usize> Default for Slots<LEN> {
    fn default() -> Self {
        Slots([None; LEN])
    }
}

impl<const LEN: usize> From<[Slot; LEN]> for Slots<LEN> {
    fn from(slots: [Slot; LEN]) -> Self {
        Slots(slots)
    }
}

impl<const LEN: usize> Slots<LEN> {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check_bounds(index: usize) -> Result<(), Error> {
        if index < LEN {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { index, len: LEN })
        }
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.0.get(index)
    }

    pub const fn len(&self) -> usize {
        LEN
    }

    /// `true` when no slot holds a digit.
    pub fn is_empty(&self) -> bool {
        self.occupied() == 0
    }

    /// Count of slots holding a digit.
    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn as_slice(&self) -> &[Slot] {
        &self.0
    }

    /// Copy out the current contents.
    pub fn snapshot(&self) -> [Slot; LEN] {
        self.0
    }

    /// Write `value` at `index`, shifting everything from `index` onward one slot right.
    ///
    /// Occupancy is never checked. Returns whatever was pushed off the end.
    pub fn insert_at(&mut self, index: usize, value: Digit) -> Result<Slot, Error> {
        Self::check_bounds(index)?;
        // bounds check passed, so LEN > 0
        let discarded = self.0[LEN - 1];
        self.0[index..].rotate_right(1);
        self.0[index] = Some(value);
        Ok(discarded)
    }

    /// As [`insert_at`][Self::insert_at], but refuse if the target slot already holds a digit.
    pub fn quick_insert_at(&mut self, index: usize, value: Digit) -> Result<Slot, Error> {
        Self::check_bounds(index)?;
        if self.0[index].is_some() {
            return Err(Error::SlotOccupied { index });
        }
        self.insert_at(index, value)
    }

    /// Remove the digit at `index`, shifting everything after it one slot left.
    ///
    /// The last slot becomes empty.
    pub fn delete_at(&mut self, index: usize) -> Result<Digit, Error> {
        Self::check_bounds(index)?;
        let removed = self.0[index].ok_or(Error::EmptySlot { index })?;
        self.0[index..].rotate_left(1);
        self.0[LEN - 1] = None;
        Ok(removed)
    }

    pub fn reset(&mut self) {
        self.0 = [None; LEN];
    }
}

impl<const LEN: usize> Index<usize> for Slots<LEN> {
    type Output = Slot;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<const LEN: usize> fmt::Display for Slots<LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, slot) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match slot {
                Some(digit) => write!(f, "{digit}")?,
                None => f.write_str("_")?,
            }
        }
        f.write_str("]")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index `{index}` is out of bounds. max: `{len}`")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no element at index `{index}`")]
    EmptySlot { index: usize },
    #[error("cell `{index}` is already occupied")]
    SlotOccupied { index: usize },
}
