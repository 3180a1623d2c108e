use cellvm::prelude::*;

#[test]
fn ensure_grows_to_exact_break() {
    let mut memory = Memory::new(1024);
    assert_eq!(memory.brk(), 0);

    memory.ensure(100).unwrap();
    assert_eq!(memory.brk(), 100);

    // Growth never rounds up.
    memory.ensure(101).unwrap();
    assert_eq!(memory.brk(), 101);
}

#[test]
fn ensure_below_break_is_a_noop() {
    let mut memory = Memory::new(1024);
    memory.ensure(100).unwrap();
    memory.ensure(10).unwrap();
    assert_eq!(memory.brk(), 100);
}

#[test]
fn ensure_beyond_ceiling_fails() {
    let mut memory = Memory::new(100);
    assert_eq!(memory.brk_max(), 100);
    match memory.ensure(101) {
        Err(MemoryError::OutOfMemory {
            requested: 101,
            max: 100,
        }) => {}
        other => panic!("expected OutOfMemory, got {other:?}"),
    }
    assert_eq!(memory.brk(), 0);
}

#[test]
fn ensure_span_rejects_address_space_wrap() {
    let mut memory = Memory::new(u32::MAX);
    match memory.ensure_span(u32::MAX, 16) {
        Err(MemoryError::OutOfMemory { .. }) => {}
        other => panic!("expected OutOfMemory, got {other:?}"),
    }
}

#[test]
fn growth_preserves_existing_bytes() {
    let mut memory = Memory::new(1024);
    memory.write_bytes(0, &[1, 2, 3, 4]).unwrap();
    memory.ensure(512).unwrap();
    assert_eq!(&memory.as_slice()[..4], &[1, 2, 3, 4]);
}

#[test]
fn typed_access_round_trips() {
    let mut memory = Memory::new(1024);
    memory.ensure(64).unwrap();

    memory.store::<u16>(10, 0xBEEF);
    assert_eq!(memory.load::<u16>(10), 0xBEEF);

    memory.store::<i64>(16, -42);
    assert_eq!(memory.load::<i64>(16), -42);

    memory.store::<f64>(24, 6.25);
    assert_eq!(memory.load::<f64>(24), 6.25);

    // Little-endian layout is observable bytewise.
    memory.store::<u32>(32, 0x0102_0304);
    assert_eq!(&memory.as_slice()[32..36], &[0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn copy_moves_bytes_forward_under_overlap() {
    let mut memory = Memory::new(1024);
    memory.write_bytes(0, b"ABCDEFGH").unwrap();
    memory.copy(2, 0, 6).unwrap();
    assert_eq!(&memory.as_slice()[..8], b"ABABCDEF");
}

#[test]
fn copy_moves_bytes_backward_under_overlap() {
    let mut memory = Memory::new(1024);
    memory.write_bytes(0, b"ABCDEFGH").unwrap();
    memory.copy(0, 2, 6).unwrap();
    assert_eq!(&memory.as_slice()[..8], b"CDEFGHGH");
}

#[test]
fn copy_checks_both_ranges() {
    let mut memory = Memory::new(1024);
    memory.ensure(16).unwrap();

    match memory.copy(0, 8, 16) {
        Err(MemoryError::OutOfBounds { addr: 8, len: 16 }) => {}
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
    match memory.copy(8, 0, 16) {
        Err(MemoryError::OutOfBounds { addr: 8, len: 16 }) => {}
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

#[test]
fn write_bytes_grows_on_demand() {
    let mut memory = Memory::new(1024);
    memory.write_bytes(100, b"xyz").unwrap();
    assert_eq!(memory.brk(), 103);
    assert_eq!(&memory.as_slice()[100..], b"xyz");
}
