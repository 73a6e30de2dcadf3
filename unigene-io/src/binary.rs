use std::io;
use std::io::{Read, Write};

/// Reads a little-endian `u32` from a stream.
///
/// All unigene file formats store their fixed-width fields in little-endian
/// byte order; every header and record is read through these helpers so the
/// byte order is decided in exactly one place.
///
/// # Example
/// ```rust
/// use unigene_io::read_u32;
///
/// let bytes: [u8; 4] = [0x2a, 0x00, 0x00, 0x00];
/// assert_eq!(read_u32(&mut &bytes[..]).unwrap(), 42);
/// ```
pub fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Reads a little-endian `i32` from a stream.
pub fn read_i32<R: Read>(reader: &mut R) -> io::Result<i32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(i32::from_le_bytes(buffer))
}

/// Writes a `u32` to a stream in little-endian byte order.
pub fn write_u32<W: Write>(writer: &mut W, value: u32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Writes an `i32` to a stream in little-endian byte order.
pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}

/// Reads exactly `n` bytes into a freshly allocated buffer.
pub fn read_bytes<R: Read>(reader: &mut R, n: usize) -> io::Result<Vec<u8>> {
    let mut buffer = vec![0u8; n];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Reads `n` consecutive little-endian `u32` values.
pub fn read_u32_array<R: Read>(reader: &mut R, n: usize) -> io::Result<Vec<u32>> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(read_u32(reader)?);
    }
    Ok(values)
}

/// Reads `n` consecutive little-endian `i32` values.
pub fn read_i32_array<R: Read>(reader: &mut R, n: usize) -> io::Result<Vec<i32>> {
    let mut values = Vec::with_capacity(n);
    for _ in 0..n {
        values.push(read_i32(reader)?);
    }
    Ok(values)
}
