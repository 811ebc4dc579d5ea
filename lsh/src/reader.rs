//! Line acquisition from the interactive input stream.

use crate::error::ShellError;
use log::trace;
use std::io::{BufRead, ErrorKind};

/// One line of raw input, without its trailing newline.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD, so a program or
/// directory whose name is not UTF-8 cannot be reached from the prompt.
///
/// Owned by the prompt loop for a single iteration. Argument vectors borrow from it,
/// so it cannot be dropped while they are alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    text: String,
    capacity: usize,
}

impl InputLine {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Capacity the buffer had grown to while the line was read.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl From<&str> for InputLine {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            capacity: text.len(),
        }
    }
}

/// Reads bytes from `reader` until a newline or end-of-stream.
///
/// The buffer starts at `chunk` bytes and grows by `chunk` as soon as it is full,
/// before the next byte is read. Returns `Ok(None)` only when the stream ended
/// before a single byte arrived; a partial last line is still returned.
pub fn read_line<R: BufRead>(reader: &mut R, chunk: usize) -> Result<Option<InputLine>, ShellError> {
    let chunk = chunk.max(1);
    let mut buf: Vec<u8> = Vec::new();
    buf.try_reserve_exact(chunk)?;
    let mut capacity = chunk;

    loop {
        let byte = match next_byte(reader)? {
            None if buf.is_empty() => return Ok(None),
            None | Some(b'\n') => break,
            Some(byte) => byte,
        };

        buf.push(byte);

        if buf.len() >= capacity {
            buf.try_reserve_exact(chunk)?;
            capacity += chunk;
            trace!("line buffer grown to {} bytes", capacity);
        }
    }

    let text = String::from_utf8(buf)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned());
    Ok(Some(InputLine { text, capacity }))
}

fn next_byte<R: BufRead>(reader: &mut R) -> std::io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok([]) => return Ok(None),
            Ok(available) => {
                let byte = available[0];
                reader.consume(1);
                return Ok(Some(byte));
            }
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}
