//! Splitting of a command line into an argument vector.
//!
//! There is no quoting or escaping: a token is any maximal run of characters that
//! are not in [`TOKEN_DELIMITERS`]. Tokens are slices of the input line, never copies.

use crate::config::TOKEN_DELIMITERS;
use crate::error::ShellError;
use crate::reader::InputLine;
use log::trace;

/// Ordered tokens of one command line, borrowed from the line they came from.
///
/// Indexing one past the last token yields `None`, which plays the role of the
/// terminating null entry of a C `argv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgVector<'a> {
    tokens: Vec<&'a str>,
    capacity: usize,
}

impl<'a> ArgVector<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, or `None` at and past the end.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// The command name, if the line had any token at all.
    pub fn first(&self) -> Option<&'a str> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().copied()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.tokens
    }

    /// Number of entries the vector had room for, sentinel included.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn is_delimiter(c: char) -> bool {
    TOKEN_DELIMITERS.contains(&c)
}

/// Splits `line` on delimiter runs.
///
/// Room for the sentinel is always kept: once the tokens fill the vector it grows
/// by `chunk` entries before the next token is stored.
pub fn split_line(line: &InputLine, chunk: usize) -> Result<ArgVector<'_>, ShellError> {
    let chunk = chunk.max(1);
    let mut tokens: Vec<&str> = Vec::new();
    tokens.try_reserve_exact(chunk)?;
    let mut capacity = chunk;

    for token in line.as_str().split(is_delimiter).filter(|t| !t.is_empty()) {
        tokens.push(token);

        if tokens.len() >= capacity {
            tokens.try_reserve_exact(chunk)?;
            capacity += chunk;
            trace!("argument vector grown to {} entries", capacity);
        }
    }

    Ok(ArgVector { tokens, capacity })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        let line = InputLine::from(input);
        let argv = split_line(&line, 64).unwrap();
        argv.iter().map(str::to_string).collect()
    }

    #[test]
    fn test_simple_command() {
        assert_eq!(words("ls -la /tmp"), vec!["ls", "-la", "/tmp"]);
    }

    #[test]
    fn test_delimiter_runs_collapse() {
        assert_eq!(
            words("  echo\t\thello \r\n world\x07 "),
            vec!["echo", "hello", "world"]
        );
    }

    #[test]
    fn test_only_delimiters_gives_no_tokens() {
        for input in ["", " ", "\t\r\n\x07", "     \t  "] {
            let line = InputLine::from(input);
            let argv = split_line(&line, 64).unwrap();
            assert!(argv.is_empty(), "{input:?} should have no tokens");
            assert_eq!(argv.first(), None);
        }
    }

    #[test]
    fn test_sentinel_after_last_token() {
        let line = InputLine::from("cd /tmp");
        let argv = split_line(&line, 64).unwrap();
        assert_eq!(argv.get(0), Some("cd"));
        assert_eq!(argv.get(1), Some("/tmp"));
        assert_eq!(argv.get(2), None);
    }

    #[test]
    fn test_quotes_are_not_special() {
        assert_eq!(words("echo \"a b\""), vec!["echo", "\"a", "b\""]);
    }

    #[test]
    fn test_tokens_are_views_into_the_line() {
        let line = InputLine::from("echo hello");
        let argv = split_line(&line, 64).unwrap();
        let base = line.as_str().as_ptr() as usize;
        let second = argv.get(1).unwrap().as_ptr() as usize;
        assert_eq!(second - base, 5);
    }

    #[test]
    fn test_rejoin_reproduces_words() {
        let input = "  one two\t\tthree   four ";
        let line = InputLine::from(input);
        let argv = split_line(&line, 64).unwrap();
        assert_eq!(argv.len(), 4);
        assert_eq!(argv.as_slice().join(" "), "one two three four");
    }

    #[test]
    fn test_growth_at_exact_capacity_boundary() {
        // Four tokens fill a chunk of four; the vector must grow before a fifth.
        let line = InputLine::from("a b c d");
        let argv = split_line(&line, 4).unwrap();
        assert_eq!(argv.len(), 4);
        assert_eq!(argv.capacity(), 8);
        assert_eq!(argv.get(4), None);

        let line = InputLine::from("a b c");
        let argv = split_line(&line, 4).unwrap();
        assert_eq!(argv.capacity(), 4);
    }

    #[test]
    fn test_many_tokens_are_kept_in_order() {
        let input: Vec<String> = (0..1000).map(|i| i.to_string()).collect();
        let line = InputLine::from(input.join(" ").as_str());
        let argv = split_line(&line, 64).unwrap();
        assert_eq!(argv.len(), 1000);
        assert_eq!(argv.get(999), Some("999"));
        assert_eq!(argv.capacity(), 1024);
        let got: Vec<&str> = argv.iter().collect();
        assert_eq!(got, input.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
