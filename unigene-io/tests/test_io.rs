use std::io::Cursor;

use unigene_io::{read_i32, read_u32, read_u32_array, write_i32, write_u32};

#[test]
fn u32_round_trip() {
    let mut buffer: Vec<u8> = Vec::new();
    for value in [0u32, 1, 0x47495355, u32::MAX] {
        write_u32(&mut buffer, value).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_u32(&mut cursor).unwrap(), 0);
    assert_eq!(read_u32(&mut cursor).unwrap(), 1);
    assert_eq!(read_u32(&mut cursor).unwrap(), 0x47495355);
    assert_eq!(read_u32(&mut cursor).unwrap(), u32::MAX);
}

#[test]
fn i32_round_trip() {
    let mut buffer: Vec<u8> = Vec::new();
    write_i32(&mut buffer, -5).unwrap();
    write_i32(&mut buffer, i32::MIN).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_i32(&mut cursor).unwrap(), -5);
    assert_eq!(read_i32(&mut cursor).unwrap(), i32::MIN);
}

#[test]
fn array_read_stops_on_truncated_input() {
    let mut buffer: Vec<u8> = Vec::new();
    write_u32(&mut buffer, 7).unwrap();
    buffer.push(0x1);                               // truncated second value

    let mut cursor = Cursor::new(buffer);
    assert!(read_u32_array(&mut cursor, 2).is_err());
}
