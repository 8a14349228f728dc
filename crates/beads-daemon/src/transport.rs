//! Length-prefixed JSON framing over a byte stream.
//!
//! Frame shape: a 4-byte big-endian length prefix followed by that many
//! bytes of JSON body. Kept generic over `Read + Write` behind this module
//! so a future named-pipe transport needs only a new listener, not a new
//! dispatch path.

use std::io::{self, Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

const MAX_FRAME_LEN: u32 = 64 * 1024 * 1024;

pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    let body = serde_json::to_vec(value).map_err(io::Error::other)?;
    if body.len() as u64 > MAX_FRAME_LEN as u64 {
        return Err(io::Error::other("frame too large"));
    }
    writer.write_all(&(body.len() as u32).to_be_bytes())?;
    writer.write_all(&body)?;
    writer.flush()
}

pub fn read_frame<R: Read, T: DeserializeOwned>(reader: &mut R) -> io::Result<T> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(io::Error::other("frame too large"));
    }

    let mut body = vec![0u8; len as usize];
    reader.read_exact(&mut body)?;
    serde_json::from_slice(&body).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_frame() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &vec!["a".to_string(), "b".to_string()]).unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let decoded: Vec<String> = read_frame(&mut cursor).unwrap();
        assert_eq!(decoded, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn rejects_truncated_frame() {
        let mut buf = Vec::new();
        write_frame(&mut buf, &"hello".to_string()).unwrap();
        buf.truncate(buf.len() - 1);

        let mut cursor = std::io::Cursor::new(buf);
        let result: io::Result<String> = read_frame(&mut cursor);
        assert!(result.is_err());
    }
}
