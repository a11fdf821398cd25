//! Splits an input line into word tokens.
//!
//! The tokenizer knows nothing about commands or redirection semantics: it
//! only produces an ordered sequence of owned words. `<` and `>` always end
//! the word being read and come out as standalone single-character tokens,
//! so `echo hi>out` and `echo hi > out` tokenize identically. Single and
//! double quotes group characters (including whitespace and `<`/`>`) into
//! one word.

use thiserror::Error;

/// Errors that can occur while splitting a line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// A closing single or double quote was not found before end of line.
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// The ordered word sequence produced from one input line.
///
/// Index 0 is the command name; insertion order is argument order. A
/// sequence lives for a single read-eval iteration and is dropped with it.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Tokens(Vec<String>);

impl Tokens {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The n-th word, zero-indexed.
    pub fn get(&self, n: usize) -> Option<&str> {
        self.0.get(n).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Word,
    SingleQuote,
    DoubleQuote,
}

struct Splitter {
    state: State,
    buffer: String,
    words: Vec<String>,
}

impl Splitter {
    fn new() -> Self {
        Splitter {
            state: State::Start,
            buffer: String::new(),
            words: Vec::new(),
        }
    }

    fn run(mut self, line: &str) -> Result<Tokens, TokenizeError> {
        for ch in line.chars() {
            match self.state {
                State::Start => self.handle_start(ch),
                State::Word => self.handle_word(ch),
                State::SingleQuote => self.handle_quote(ch, '\''),
                State::DoubleQuote => self.handle_quote(ch, '"'),
            }
        }

        match self.state {
            State::SingleQuote | State::DoubleQuote => Err(TokenizeError::UnterminatedQuote),
            State::Word => {
                self.finish_word();
                Ok(Tokens(self.words))
            }
            State::Start => Ok(Tokens(self.words)),
        }
    }

    fn handle_start(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {}
            '<' | '>' => self.words.push(ch.to_string()),
            '\'' => self.state = State::SingleQuote,
            '"' => self.state = State::DoubleQuote,
            c => {
                self.buffer.push(c);
                self.state = State::Word;
            }
        }
    }

    fn handle_word(&mut self, ch: char) {
        match ch {
            c if c.is_whitespace() => {
                self.finish_word();
                self.state = State::Start;
            }
            '<' | '>' => {
                self.finish_word();
                self.words.push(ch.to_string());
                self.state = State::Start;
            }
            '\'' => self.state = State::SingleQuote,
            '"' => self.state = State::DoubleQuote,
            c => self.buffer.push(c),
        }
    }

    fn handle_quote(&mut self, ch: char, closing: char) {
        if ch == closing {
            // Back to Word so `a"b"c` stays one token.
            self.state = State::Word;
        } else {
            self.buffer.push(ch);
        }
    }

    fn finish_word(&mut self) {
        self.words.push(std::mem::take(&mut self.buffer));
    }
}

/// Splits `line` into words.
///
/// An empty or whitespace-only line produces an empty sequence rather than
/// an error.
pub fn tokenize(line: &str) -> Result<Tokens, TokenizeError> {
    Splitter::new().run(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        tokenize(line)
            .unwrap()
            .iter()
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words("echo hello  world"), ["echo", "hello", "world"]);
        assert_eq!(words("\tls\t-l "), ["ls", "-l"]);
    }

    #[test]
    fn empty_and_blank_lines_yield_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t \n").unwrap().is_empty());
    }

    #[test]
    fn redirection_operators_are_standalone_tokens() {
        assert_eq!(words("echo hi > out"), ["echo", "hi", ">", "out"]);
        assert_eq!(words("echo hi>out"), ["echo", "hi", ">", "out"]);
        assert_eq!(words("cat<in"), ["cat", "<", "in"]);
        assert_eq!(words("><"), [">", "<"]);
    }

    #[test]
    fn quotes_group_words() {
        assert_eq!(words("echo 'hello world'"), ["echo", "hello world"]);
        assert_eq!(words("echo \"a > b\""), ["echo", "a > b"]);
        assert_eq!(words("a'b c'd"), ["ab cd"]);
    }

    #[test]
    fn quotes_may_be_empty() {
        assert_eq!(words("echo ''"), ["echo", ""]);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert_eq!(tokenize("echo 'oops"), Err(TokenizeError::UnterminatedQuote));
        assert_eq!(tokenize("echo \"oops"), Err(TokenizeError::UnterminatedQuote));
    }

    #[test]
    fn token_access_by_index() {
        let tokens = tokenize("cd /tmp").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens.get(0), Some("cd"));
        assert_eq!(tokens.get(1), Some("/tmp"));
        assert_eq!(tokens.get(2), None);
    }
}
