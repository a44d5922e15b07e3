//! Tokenizer for the Graphviz DOT language.

use crate::core::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier, numeral, quoted string or HTML string (already unquoted).
    Id(String),
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Equals,
    Colon,
    /// `->` or `--`
    EdgeOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    /// Quoted and HTML strings are never keywords.
    pub quoted: bool,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>> {
        while let Some(&c) = self.chars.peek() {
            match c {
                '\n' => {
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' if self.at_line_start => self.skip_line(),
                '/' => self.comment()?,
                '{' => self.punct(TokenKind::LBrace),
                '}' => self.punct(TokenKind::RBrace),
                '[' => self.punct(TokenKind::LBracket),
                ']' => self.punct(TokenKind::RBracket),
                ';' => self.punct(TokenKind::Semicolon),
                ',' => self.punct(TokenKind::Comma),
                '=' => self.punct(TokenKind::Equals),
                ':' => self.punct(TokenKind::Colon),
                '"' => self.quoted()?,
                '<' => self.html()?,
                '-' => self.dash()?,
                c if is_id_char(c) || c == '.' => self.identifier(),
                other => {
                    return Err(Error::dot_syntax(
                        self.line,
                        format!("unexpected character {other:?}"),
                    ))
                }
            }
        }
        Ok(self.tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.at_line_start = true;
        } else if !c.is_whitespace() {
            self.at_line_start = false;
        }
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, line: usize, quoted: bool) {
        self.tokens.push(Token { kind, line, quoted });
    }

    fn punct(&mut self, kind: TokenKind) {
        let line = self.line;
        self.bump();
        self.push(kind, line, false);
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    fn comment(&mut self) -> Result<()> {
        let line = self.line;
        self.bump();
        match self.chars.peek() {
            Some('/') => {
                self.skip_line();
                Ok(())
            }
            Some('*') => {
                self.bump();
                let mut prev = '\0';
                while let Some(c) = self.bump() {
                    if prev == '*' && c == '/' {
                        return Ok(());
                    }
                    prev = c;
                }
                Err(Error::dot_syntax(line, "unterminated block comment"))
            }
            _ => Err(Error::dot_syntax(line, "unexpected '/'")),
        }
    }

    fn quoted(&mut self) -> Result<()> {
        let line = self.line;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('"') => break,
                Some('\\') => match self.chars.peek() {
                    Some('"') => {
                        self.bump();
                        value.push('"');
                    }
                    // Line continuation
                    Some('\n') => {
                        self.bump();
                    }
                    _ => value.push('\\'),
                },
                Some(c) => value.push(c),
                None => return Err(Error::dot_syntax(line, "unterminated string")),
            }
        }

        // "a" + "b" concatenation
        if let Some(Token {
            kind: TokenKind::Id(prev),
            quoted: true,
            ..
        }) = self.pending_concat()
        {
            let mut joined = prev;
            joined.push_str(&value);
            self.push(TokenKind::Id(joined), line, true);
        } else {
            self.push(TokenKind::Id(value), line, true);
        }
        Ok(())
    }

    /// Pops the previous quoted token if it was followed by a `+`.
    fn pending_concat(&mut self) -> Option<Token> {
        let n = self.tokens.len();
        if n >= 2
            && self.tokens[n - 1].kind == TokenKind::Id("+".to_string())
            && !self.tokens[n - 1].quoted
            && self.tokens[n - 2].quoted
        {
            self.tokens.pop();
            return self.tokens.pop();
        }
        None
    }

    fn html(&mut self) -> Result<()> {
        let line = self.line;
        self.bump();
        let mut depth = 1usize;
        let mut value = String::new();
        while let Some(c) = self.bump() {
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        self.push(TokenKind::Id(value), line, true);
                        return Ok(());
                    }
                }
                _ => {}
            }
            value.push(c);
        }
        Err(Error::dot_syntax(line, "unterminated HTML string"))
    }

    fn dash(&mut self) -> Result<()> {
        let line = self.line;
        self.bump();
        match self.chars.peek() {
            Some('>') | Some('-') => {
                self.bump();
                self.push(TokenKind::EdgeOp, line, false);
                Ok(())
            }
            Some(c) if c.is_ascii_digit() || *c == '.' => {
                let mut numeral = String::from("-");
                self.collect_id_chars(&mut numeral);
                self.push(TokenKind::Id(numeral), line, false);
                Ok(())
            }
            _ => Err(Error::dot_syntax(line, "unexpected '-'")),
        }
    }

    fn identifier(&mut self) {
        let line = self.line;
        let mut value = String::new();
        self.collect_id_chars(&mut value);
        self.push(TokenKind::Id(value), line, false);
    }

    fn collect_id_chars(&mut self, value: &mut String) {
        while let Some(&c) = self.chars.peek() {
            if is_id_char(c) || c == '.' || c == '+' {
                value.push(c);
                self.bump();
            } else {
                break;
            }
        }
    }
}

fn is_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || !c.is_ascii() || c == '+'
}
