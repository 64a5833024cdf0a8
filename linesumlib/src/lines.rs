//! Buffered newline counting.
//!
//! The counter reads a stream in fixed-size chunks and counts `\n` bytes in
//! each one, so memory use stays bounded no matter how large the stream is.
//! A final line without a trailing newline is not counted.

use std::io::{ErrorKind, Read};

use thiserror::Error;

/// Default read chunk size (32 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// A read failed part way through a stream.
///
/// `partial` holds the newlines counted before the failure. Callers are free
/// to use it.
#[derive(Error, Debug)]
#[error("read failed after {partial} lines: {source}")]
pub struct CountError {
    /// Newlines counted before the failure
    pub partial: u64,
    /// The underlying read error
    pub source: std::io::Error,
}

/// Count the newline bytes in `reader` using the default chunk size.
///
/// The reader is not closed; whoever opened it keeps ownership.
///
/// # Example
///
/// ```rust
/// use linesumlib::count_lines;
///
/// let mut input: &[u8] = b"one\ntwo\nthree";
/// assert_eq!(count_lines(&mut input).unwrap(), 2);
/// ```
pub fn count_lines<R: Read + ?Sized>(reader: &mut R) -> Result<u64, CountError> {
    count_lines_with_buffer(reader, DEFAULT_BUFFER_SIZE)
}

/// Count the newline bytes in `reader`, reading `buffer_size` bytes at a time.
///
/// A `buffer_size` of zero is treated as one byte.
pub fn count_lines_with_buffer<R: Read + ?Sized>(
    reader: &mut R,
    buffer_size: usize,
) -> Result<u64, CountError> {
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut count: u64 = 0;

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(count),
            Ok(n) => count += bytecount::count(&buf[..n], b'\n') as u64,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(CountError {
                    partial: count,
                    source,
                })
            }
        }
    }
}
