/// Prefix of every report on the error stream.
pub const PROGRAM_NAME: &str = "lsh";

/// Initial capacity of a line buffer, and the step it grows by.
pub const LINE_CHUNK: usize = 1024;

/// Initial capacity of an argument vector, and the step it grows by.
pub const TOKEN_CHUNK: usize = 64;

/// Characters that separate tokens on a command line.
pub const TOKEN_DELIMITERS: &[char] = &[' ', '\t', '\r', '\n', '\x07'];

/// Tunables of one interpreter instance.
///
/// The default is what the `lsh` binary runs with. Tests shrink the chunk sizes to
/// hit buffer-growth boundaries with short inputs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Printed to stdout before every read.
    pub prompt: String,
    /// Growth step of the line buffer, in bytes.
    pub line_chunk: usize,
    /// Growth step of the argument vector, in entries.
    pub token_chunk: usize,
}

impl Config {
    /// Growth step of the line buffer, never zero.
    pub fn line_chunk(&self) -> usize {
        self.line_chunk.max(1)
    }

    /// Growth step of the argument vector, never zero.
    pub fn token_chunk(&self) -> usize {
        self.token_chunk.max(1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            line_chunk: LINE_CHUNK,
            token_chunk: TOKEN_CHUNK,
        }
    }
}
