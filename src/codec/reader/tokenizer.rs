use std::collections::VecDeque;
use std::io::BufRead;
use std::str::{self, FromStr};

use crate::error::Error;
use crate::Result;

/// a whitespace separated word together with the line it was found on
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

/// splits text into tokens, dropping blank lines and lines starting with '#'
pub struct Tokenizer<R: BufRead> {
    reader: R,
    buffer: Vec<u8>,
    pending: VecDeque<Token>,
    line: usize,
    finished: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Tokenizer {
            reader,
            buffer: Vec::new(),
            pending: VecDeque::new(),
            line: 0,
            finished: false,
        }
    }

    fn read_next_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(Error::FailedToReadInput)?;
        if read == 0 {
            return Ok(false);
        }
        self.line += 1;
        if self.buffer.first() == Some(&b'#') {
            return Ok(true);
        }
        let content = str::from_utf8(&self.buffer).map_err(|_| Error::InvalidUtf8 { line: self.line })?;
        let line = self.line;
        self.pending.extend(content.split_ascii_whitespace().map(|text| Token {
            text: text.to_owned(),
            line,
        }));
        Ok(true)
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            match self.read_next_line() {
                Ok(true) => continue,
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// typed access to a token stream for the format grammars
pub struct TokenStream<I> {
    tokens: I,
    line: usize,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Result<Token>>,
{
    pub fn new(tokens: I) -> Self {
        Self { tokens, line: 0 }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>> {
        match self.tokens.next().transpose()? {
            Some(token) => {
                self.line = token.line;
                Ok(Some(token))
            }
            None => Ok(None),
        }
    }

    pub fn expect_token(&mut self, token_name: &'static str) -> Result<Token> {
        self.next_token()?.ok_or(Error::RequiredTokenMissing {
            token_name,
            line: self.line,
        })
    }

    pub fn expect_literal(&mut self, token_name: &'static str, literal: &'static str) -> Result<()> {
        let token = self.expect_token(token_name)?;
        if token.text != literal {
            return Err(Error::UnexpectedToken {
                token_name,
                expected: literal,
                found: token.text,
                line: token.line,
            });
        }
        Ok(())
    }

    /// a non-negative header number such as width or height
    pub fn parse_dimension(&mut self, token_name: &'static str) -> Result<usize> {
        let token = self.expect_token(token_name)?;
        let value: i64 = parse_token(&token, token_name)?;
        if value < 0 {
            return Err(Error::NegativeDimension { token_name, value });
        }
        usize::try_from(value).map_err(|_| parsing_failed(&token, token_name))
    }

    pub fn parse_max_value(&mut self, token_name: &'static str) -> Result<u16> {
        let token = self.expect_token(token_name)?;
        let value: i64 = parse_token(&token, token_name)?;
        if value < 0 {
            return Err(Error::NegativeDimension { token_name, value });
        }
        u16::try_from(value).map_err(|_| parsing_failed(&token, token_name))
    }

    /// the next color component, none once the stream is exhausted
    pub fn next_component(&mut self, token_name: &'static str) -> Result<Option<u16>> {
        match self.next_token()? {
            Some(token) => parse_token(&token, token_name).map(Some),
            None => Ok(None),
        }
    }
}

fn parse_token<T: FromStr>(token: &Token, token_name: &'static str) -> Result<T> {
    token
        .text
        .parse()
        .map_err(|_| parsing_failed(token, token_name))
}

fn parsing_failed(token: &Token, token_name: &'static str) -> Error {
    Error::ParsingOfTokenFailed {
        token_name,
        found: token.text.clone(),
        line: token.line,
    }
}

#[cfg(test)]
mod test {
    use super::{Token, TokenStream, Tokenizer};
    use crate::error::Error;

    fn tokens(text: &str) -> Vec<Token> {
        Tokenizer::new(text.as_bytes())
            .collect::<crate::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn drop_comment_and_blank_lines() {
        let words: Vec<_> = tokens("P3\n# a comment 1 2 3\n\n   \n3 2\n255")
            .into_iter()
            .map(|token| token.text)
            .collect();
        assert_eq!(words, ["P3", "3", "2", "255"]);
    }

    #[test]
    fn tokens_carry_line_numbers() {
        let found = tokens("C1\n# comment\n4 5\n");
        assert_eq!(found[0].line, 1);
        assert_eq!(found[1].line, 3);
        assert_eq!(found[2].line, 3);
    }

    #[test]
    fn continuous_string() {
        assert_eq!(tokens("P3 3 2 255 255 0 0").len(), 7);
    }

    #[test]
    fn crlf_line_endings() {
        let words: Vec<_> = tokens("P3\r\n#x\r\n1 1\r\n").into_iter().map(|t| t.text).collect();
        assert_eq!(words, ["P3", "1", "1"]);
    }

    #[test]
    fn invalid_utf8_reports_line() {
        let bytes: &[u8] = b"P3\n\xff\xfe\n";
        let result: crate::Result<Vec<_>> = Tokenizer::new(bytes).collect();
        assert!(matches!(result, Err(Error::InvalidUtf8 { line: 2 })));
    }

    #[test]
    fn literal_mismatch_reports_expected_and_found() {
        let mut stream = TokenStream::new(Tokenizer::new("P6".as_bytes()));
        let result = stream.expect_literal("P3 Header", "P3");
        assert!(matches!(
            result,
            Err(Error::UnexpectedToken { expected: "P3", ref found, line: 1, .. }) if found == "P6"
        ));
    }

    #[test]
    fn negative_dimension() {
        let mut stream = TokenStream::new(Tokenizer::new("-3".as_bytes()));
        let result = stream.parse_dimension("Width Header");
        assert!(matches!(result, Err(Error::NegativeDimension { value: -3, .. })));
    }

    #[test]
    fn component_out_of_u16_range() {
        let mut stream = TokenStream::new(Tokenizer::new("70000".as_bytes()));
        let result = stream.next_component("Color Component Value");
        assert!(matches!(result, Err(Error::ParsingOfTokenFailed { .. })));
        assert!(matches!(stream.next_component("Color Component Value"), Ok(None)));
    }

    #[test]
    fn missing_token() {
        let mut stream = TokenStream::new(Tokenizer::new("4\n".as_bytes()));
        stream.parse_dimension("Width Header").unwrap();
        let result = stream.parse_dimension("Height Header");
        assert!(matches!(
            result,
            Err(Error::RequiredTokenMissing {
                token_name: "Height Header",
                line: 1
            })
        ));
    }
}
