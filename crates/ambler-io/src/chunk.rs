//! `[magic: 4 bytes][len: u32 LE][payload: len bytes]`, payload a packed array
//! of fixed-size records.

use std::io::{Read, Write};

use bytemuck::Pod;

use crate::error::ChunkError;

/// Read one chunk tagged `magic` and decode its payload as records of `T`.
pub fn read_chunk<T: Pod, R: Read>(reader: &mut R, magic: &[u8; 4]) -> Result<Vec<T>, ChunkError> {
    let mut header = [0u8; 8];
    read_full(reader, &mut header, magic)?;

    let found = [header[0], header[1], header[2], header[3]];
    if &found != magic {
        return Err(ChunkError::BadMagic { expected: *magic, found });
    }
    let len = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

    let record = std::mem::size_of::<T>();
    if record == 0 || len as usize % record != 0 {
        return Err(ChunkError::BadSize { magic: *magic, len, record });
    }

    // Bounded by what the stream actually holds, not by the declared length.
    let mut payload = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if payload.len() != len as usize {
        return Err(ChunkError::Truncated {
            magic: *magic,
            expected: len as u64,
            got: payload.len() as u64,
        });
    }

    Ok(payload
        .chunks_exact(record)
        .map(bytemuck::pod_read_unaligned::<T>)
        .collect())
}

/// Write `records` as one chunk tagged `magic`.
pub fn write_chunk<T: Pod, W: Write>(writer: &mut W, magic: &[u8; 4], records: &[T]) -> std::io::Result<()> {
    let bytes: &[u8] = bytemuck::cast_slice(records);
    let len = u32::try_from(bytes.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("chunk '{}' exceeds 4 GiB", String::from_utf8_lossy(magic)),
        )
    })?;
    writer.write_all(magic)?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(bytes)
}

fn read_full<R: Read>(reader: &mut R, buf: &mut [u8], magic: &[u8; 4]) -> Result<(), ChunkError> {
    let mut got = 0;
    while got < buf.len() {
        match reader.read(&mut buf[got..]) {
            Ok(0) => {
                return Err(ChunkError::Truncated {
                    magic: *magic,
                    expected: buf.len() as u64,
                    got: got as u64,
                });
            }
            Ok(n) => got += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
