// ABOUTME: Character-driven scanner turning source bytes into a token stream plus lexical errors

use crate::error::LexError;
use crate::token::{keyword, Literal, Token, TokenKind};

pub struct Scanner<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let byte = self.source[self.current];
        self.current += 1;
        byte
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> u8 {
        if self.current + 1 >= self.source.len() {
            0
        } else {
            self.source[self.current + 1]
        }
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.peek() == expected {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn lexeme(&self) -> &'a str {
        std::str::from_utf8(&self.source[self.start..self.current]).unwrap()
    }

    fn make(&self, kind: TokenKind, literal: Literal) -> Token {
        Token::new(kind, self.lexeme(), literal, self.line)
    }

    /// Scan the whole input. Always terminates with exactly one `EOF`
    /// token; errors are collected rather than thrown, scanning continues
    /// past any recoverable error.
    pub fn scan(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            self.start = self.current;
            if let Some(result) = self.scan_token() {
                match result {
                    Ok(token) => tokens.push(token),
                    Err(error) => errors.push(error),
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", Literal::None, self.line));
        (tokens, errors)
    }

    /// Scan a single lexeme starting at `self.start`. Returns `None` for
    /// whitespace, newlines, and comments (nothing produced).
    fn scan_token(&mut self) -> Option<Result<Token, LexError>> {
        use TokenKind::*;
        let c = self.advance();
        match c {
            b'(' => Some(Ok(self.make(LeftParen, Literal::None))),
            b')' => Some(Ok(self.make(RightParen, Literal::None))),
            b'{' => Some(Ok(self.make(LeftBrace, Literal::None))),
            b'}' => Some(Ok(self.make(RightBrace, Literal::None))),
            b',' => Some(Ok(self.make(Comma, Literal::None))),
            b'.' => Some(Ok(self.make(Dot, Literal::None))),
            b';' => Some(Ok(self.make(Semicolon, Literal::None))),
            b'*' => Some(Ok(self.make(Star, Literal::None))),
            b'+' => Some(Ok(self.make(Plus, Literal::None))),
            b'-' => Some(Ok(self.make(Minus, Literal::None))),

            b'=' => {
                let kind = if self.matches(b'=') { EqualEqual } else { Equal };
                Some(Ok(self.make(kind, Literal::None)))
            }
            b'!' => {
                let kind = if self.matches(b'=') { BangEqual } else { Bang };
                Some(Ok(self.make(kind, Literal::None)))
            }
            b'>' => {
                let kind = if self.matches(b'=') { GreaterEqual } else { Greater };
                Some(Ok(self.make(kind, Literal::None)))
            }
            b'<' => {
                let kind = if self.matches(b'=') { LessEqual } else { Less };
                Some(Ok(self.make(kind, Literal::None)))
            }

            b'/' => {
                if self.matches(b'/') {
                    while self.peek() != b'\n' && !self.is_at_end() {
                        self.advance();
                    }
                    None
                } else {
                    Some(Ok(self.make(Slash, Literal::None)))
                }
            }

            b'\n' => {
                self.line += 1;
                None
            }
            b' ' | b'\t' | b'\r' => None,

            b'"' => Some(self.scan_string()),

            b'0'..=b'9' => Some(Ok(self.scan_number())),

            c if c.is_ascii_alphabetic() || c == b'_' => Some(Ok(self.scan_identifier())),

            other => Some(Err(LexError::unexpected_character(self.line, other as char))),
        }
    }

    fn scan_string(&mut self) -> Result<Token, LexError> {
        let content_start = self.current;
        while self.peek() != b'"' && !self.is_at_end() {
            if self.peek() == b'\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(LexError::unterminated_string(self.line));
        }

        let content = std::str::from_utf8(&self.source[content_start..self.current])
            .unwrap()
            .to_string();
        self.advance(); // closing quote
        Ok(self.make(TokenKind::String, Literal::Str(content)))
    }

    fn scan_number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut is_float = false;
        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            is_float = true;
            self.advance(); // consume '.'
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text = self.lexeme();
        if is_float {
            let value: f64 = text.parse().expect("scanner produced invalid float lexeme");
            self.make(TokenKind::NumberFloat, Literal::Float(value))
        } else {
            let value: i64 = text.parse().expect("scanner produced invalid int lexeme");
            self.make(TokenKind::NumberInt, Literal::Int(value))
        }
    }

    fn scan_identifier(&mut self) -> Token {
        while {
            let c = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let text = self.lexeme();
        match keyword(text) {
            Some(kind) => self.make(kind, Literal::None),
            None => self.make(TokenKind::Identifier, Literal::None),
        }
    }
}

/// Convenience entry point: scan a full source string.
pub fn scan(source: &str) -> (Vec<Token>, Vec<LexError>) {
    Scanner::new(source).scan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan(src).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn always_terminates_with_single_eof() {
        assert_eq!(kinds(""), vec![Eof]);
        assert_eq!(kinds("(+ 1 2)").last(), Some(&Eof));
        assert_eq!(kinds("(+ 1 2)").iter().filter(|k| **k == Eof).count(), 1);
    }

    #[test]
    fn operator_batch_matches_spec_example() {
        let (tokens, errors) = scan("==,=,!!==,>>=<<=");
        assert!(errors.is_empty());
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EqualEqual, Comma, Equal, Comma, Bang, BangEqual, Equal, Comma, Greater,
                GreaterEqual, Less, LessEqual, Eof,
            ]
        );
    }

    #[test]
    fn line_accurate_on_newlines() {
        let (tokens, _) = scan("var a\n= 1;\nprint a;");
        // `1` is on line 2
        let one = tokens.iter().find(|t| t.kind == NumberInt).unwrap();
        assert_eq!(one.line, 2);
        // second `print` is on line 3
        let print_tok = tokens.iter().find(|t| t.kind == Print).unwrap();
        assert_eq!(print_tok.line, 3);
    }

    #[test]
    fn unterminated_string_reports_error_and_line() {
        let (tokens, errors) = scan("\"abc");
        assert_eq!(errors, vec![LexError::unterminated_string(1)]);
        assert_eq!(tokens, vec![Token::new(Eof, "", Literal::None, 1)]);
    }

    #[test]
    fn unexpected_character_is_recoverable() {
        let (tokens, errors) = scan("($)");
        assert_eq!(errors, vec![LexError::unexpected_character(1, '$')]);
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![LeftParen, RightParen, Eof]);
    }

    #[test]
    fn integer_vs_float_number_kinds() {
        let (tokens, _) = scan("42 3.14 7.");
        assert_eq!(tokens[0].kind, NumberInt);
        assert_eq!(tokens[0].literal, Literal::Int(42));
        assert_eq!(tokens[1].kind, NumberFloat);
        assert_eq!(tokens[1].literal, Literal::Float(3.14));
        // trailing dot not followed by a digit stays its own token
        assert_eq!(tokens[2].kind, NumberInt);
        assert_eq!(tokens[3].kind, Dot);
    }

    #[test]
    fn keywords_and_identifiers() {
        let (tokens, _) = scan("fun foo_bar and1");
        assert_eq!(tokens[0].kind, Fun);
        assert_eq!(tokens[1].kind, Identifier);
        assert_eq!(tokens[1].lexeme, "foo_bar");
        // "and1" is not an exact keyword match
        assert_eq!(tokens[2].kind, Identifier);
    }

    #[test]
    fn line_comment_consumed_to_newline() {
        let (tokens, _) = scan("1 // comment\n2");
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![NumberInt, NumberInt, Eof]);
    }
}
