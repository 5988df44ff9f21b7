use crate::token::{lookup_ident, Token, TokenKind};

pub struct Lexer {
    input: String,
    position: usize,
    read_position: usize,
    ch: u8,
    line: usize,
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_token())
    }
}

impl Lexer {
    pub fn new(input: impl Into<String>) -> Self {
        let mut lexer = Self {
            input: input.into(),
            position: 0,
            read_position: 0,
            ch: 0,
            line: 1,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = *self.input.as_bytes().get(self.read_position).unwrap_or(&0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    fn peek_char(&self) -> u8 {
        *self.input.as_bytes().get(self.read_position).unwrap_or(&0)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Returns the next token. Once the input is exhausted every call yields `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let line = self.line;
        if self.at_end() {
            return Token::new(TokenKind::Eof, "", line);
        }

        let start = self.position;
        let kind = match self.ch {
            b'=' => self.either(b'=', TokenKind::Eq, TokenKind::Assign),
            b'!' => self.either(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'<' => self.either(b'=', TokenKind::LE, TokenKind::LT),
            b'>' => self.either(b'=', TokenKind::GE, TokenKind::GT),
            b'&' if self.peek_char() == b'&' => {
                self.read_char();
                TokenKind::And
            }
            b'|' if self.peek_char() == b'|' => {
                self.read_char();
                TokenKind::Or
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Asterisk,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Dot,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'"' => return self.read_string(line),
            c if is_letter(c) => {
                let text = self.read_identifier();
                return Token::new(lookup_ident(text), text, line);
            }
            c if c.is_ascii_digit() => return self.read_number(line),
            _ => return self.read_illegal(line),
        };

        let token = Token::new(kind, &self.input[start..self.read_position], line);
        self.read_char();
        token
    }

    fn either(&mut self, next: u8, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek_char() == next {
            self.read_char();
            matched
        } else {
            single
        }
    }

    fn read_identifier(&mut self) -> &str {
        let start = self.position;
        while is_letter(self.ch) || self.ch.is_ascii_digit() {
            self.read_char()
        }
        &self.input[start..self.position]
    }

    fn read_number(&mut self, line: usize) -> Token {
        let start = self.position;
        let mut kind = TokenKind::Int;
        while self.ch.is_ascii_digit() {
            self.read_char()
        }
        // `1.toStr()` is a member access, so the dot needs a digit after it
        if self.ch == b'.' && self.peek_char().is_ascii_digit() {
            kind = TokenKind::Float;
            self.read_char();
            while self.ch.is_ascii_digit() {
                self.read_char()
            }
        }
        Token::new(kind, &self.input[start..self.position], line)
    }

    fn read_string(&mut self, line: usize) -> Token {
        let mut bytes = Vec::new();
        self.read_char();

        loop {
            if self.at_end() {
                return Token::new(
                    TokenKind::Illegal,
                    String::from_utf8_lossy(&bytes).into_owned(),
                    line,
                );
            }
            match self.ch {
                b'"' => break,
                b'\\' => {
                    self.read_char();
                    if self.at_end() {
                        continue;
                    }
                    bytes.push(match self.ch {
                        b'n' => b'\n',
                        b't' => b'\t',
                        other => other,
                    });
                }
                b'\n' => {
                    self.line += 1;
                    bytes.push(b'\n');
                }
                other => bytes.push(other),
            }
            self.read_char();
        }

        self.read_char();
        Token::new(
            TokenKind::String,
            String::from_utf8_lossy(&bytes).into_owned(),
            line,
        )
    }

    fn read_illegal(&mut self, line: usize) -> Token {
        let text: String = self.input[self.position..].chars().take(1).collect();
        for _ in 0..text.len() {
            self.read_char();
        }
        Token::new(TokenKind::Illegal, text, line)
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() {
            match self.ch {
                b' ' | b'\t' | b'\r' => self.read_char(),
                b'\n' => {
                    self.line += 1;
                    self.read_char();
                }
                b'/' if self.peek_char() == b'/' => {
                    while !self.at_end() && self.ch != b'\n' {
                        self.read_char();
                    }
                }
                _ => break,
            }
        }
    }
}
