use crate::storage::{StorageLocation, WORD_SIZE};
use crate::IrError;
use num_bigint::BigUint;

#[test]
fn test_location_keeps_slot_and_offset() {
    let location = StorageLocation::new(BigUint::from(3u32), 4).unwrap();
    assert_eq!(location.slot(), &BigUint::from(3u32));
    assert_eq!(location.byte_offset(), 4);
    assert_eq!(location.to_string(), "slot 3 offset 4");
}

#[test]
fn test_last_byte_of_word_is_valid() {
    let location = StorageLocation::new(BigUint::from(0u32), (WORD_SIZE - 1) as u8);
    assert!(location.is_ok());
}

#[test]
fn test_offset_past_word_is_rejected() {
    let result = StorageLocation::new(BigUint::from(7u32), WORD_SIZE as u8);
    assert!(matches!(
        result,
        Err(IrError::InvalidStorageOffset { byte_offset: 32, .. })
    ));
}

#[test]
fn test_slots_beyond_u64() {
    let slot = BigUint::from(u64::MAX) * BigUint::from(u64::MAX);
    let location = StorageLocation::new(slot.clone(), 0).unwrap();
    assert_eq!(location.slot, slot);
}
