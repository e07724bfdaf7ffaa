use crate::{IrError, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of an EVM word, and therefore of a storage slot, in bytes.
pub const WORD_SIZE: usize = 32;

/// Where a state variable lives: a slot and the byte offset of the value
/// inside that slot. Small variables share slots at disjoint offsets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocation {
    pub slot: BigUint,
    pub byte_offset: u8,
}

impl StorageLocation {
    pub fn new(slot: BigUint, byte_offset: u8) -> Result<Self> {
        if byte_offset as usize >= WORD_SIZE {
            return Err(IrError::InvalidStorageOffset {
                slot: slot.to_string(),
                byte_offset,
            });
        }
        Ok(Self { slot, byte_offset })
    }

    pub fn slot(&self) -> &BigUint {
        &self.slot
    }

    pub fn byte_offset(&self) -> u8 {
        self.byte_offset
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {} offset {}", self.slot, self.byte_offset)
    }
}
