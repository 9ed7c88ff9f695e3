use crate::diag::Diagnostics;

// ── Token ─────────────────────────────────────────────────────────────────

/// What a [`Token`] is, independent of its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    Ident,
    Str,
    Number,
    Bool,
    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    Dot,
    Comma,
    Semicolon,
    Colon,
    Assign,
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    // Comparison / equality
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    AndAnd,
    OrOr,
    Bang,
    // Keywords (`while` and `for` are reserved; no executable form exists)
    If,
    Else,
    ElseIf,
    While,
    For,
    /// Reserved name of a creatable UI object kind (`Window`, `Button`, ...).
    Component,
    // Sentinel
    Eof,
}

/// One lexical unit: kind, spelling, and 1-based source position.
///
/// For strings, `text` is the unescaped content. For numbers it is the raw
/// spelling, unvalidated (`1.2.3` lexes fine and only collapses to `0` under
/// numeric coercion).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self { kind, text: text.into(), line, column }
    }
}

/// Identifiers lexed as [`TokenKind::Component`]: the two built-in chain
/// roots plus every creatable control kind.
pub const COMPONENT_KEYWORDS: &[&str] = &[
    "Window",
    "Notification",
    "Button",
    "Label",
    "Input",
    "CheckBox",
    "ComboBox",
    "ProgressBar",
    "GroupBox",
];

// ── Lexer ─────────────────────────────────────────────────────────────────

/// Converts script text into a flat token stream.
///
/// Total: never fails, always terminates with [`TokenKind::Eof`]. Input the
/// lexer cannot place (a lone `&` or `|`, any unrecognized character) is
/// skipped without producing a token; an optional [`Diagnostics`] sink makes
/// those skips observable.
pub struct Lexer<'s, 'd> {
    src: &'s str,
    pos: usize,
    line: usize,
    column: usize,
    diag: Option<&'d mut Diagnostics>,
}

impl<'s, 'd> Lexer<'s, 'd> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, column: 1, diag: None }
    }

    pub fn with_diagnostics(src: &'s str, diag: &'d mut Diagnostics) -> Self {
        Self { src, pos: 0, line: 1, column: 1, diag: Some(diag) }
    }

    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token();
            let eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if eof {
                break;
            }
        }
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn note(&mut self, line: usize, column: usize, message: impl Into<String>) {
        if let Some(diag) = self.diag.as_deref_mut() {
            diag.note(line, column, message);
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            // skip `//` line comments
            if self.src[self.pos..].starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();

            let (line, column) = (self.line, self.column);
            let ch = match self.peek() {
                None => return Token::new(TokenKind::Eof, "", line, column),
                Some(c) => c,
            };

            let kind = match ch {
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '.' => TokenKind::Dot,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                ':' => TokenKind::Colon,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '=' | '!' | '<' | '>' => {
                    let pair = self.peek_next() == Some('=');
                    let (kind, text) = match (ch, pair) {
                        ('=', true) => (TokenKind::EqEq, "=="),
                        ('=', false) => (TokenKind::Assign, "="),
                        ('!', true) => (TokenKind::NotEq, "!="),
                        ('!', false) => (TokenKind::Bang, "!"),
                        ('<', true) => (TokenKind::Le, "<="),
                        ('<', false) => (TokenKind::Lt, "<"),
                        ('>', true) => (TokenKind::Ge, ">="),
                        _ => (TokenKind::Gt, ">"),
                    };
                    self.advance();
                    if pair {
                        self.advance();
                    }
                    return Token::new(kind, text, line, column);
                }
                '&' | '|' => {
                    self.advance();
                    if self.peek() == Some(ch) {
                        self.advance();
                        let (kind, text) = if ch == '&' {
                            (TokenKind::AndAnd, "&&")
                        } else {
                            (TokenKind::OrOr, "||")
                        };
                        return Token::new(kind, text, line, column);
                    }
                    // A lone `&` or `|` produces no token at all.
                    self.note(line, column, format!("stray `{ch}` discarded"));
                    continue;
                }
                '"' | '\'' => return self.lex_string(ch, line, column),
                c if c.is_ascii_digit() => return self.lex_number(line, column),
                c if c.is_ascii_alphabetic() || c == '_' => {
                    return self.lex_ident_or_keyword(line, column);
                }
                other => {
                    self.advance();
                    self.note(line, column, format!("skipped unexpected character {other:?}"));
                    continue;
                }
            };

            self.advance();
            return Token::new(kind, ch.to_string(), line, column);
        }
    }

    fn lex_string(&mut self, quote: char, line: usize, column: usize) -> Token {
        self.advance(); // consume the opening quote
        let mut s = String::new();
        loop {
            match self.advance() {
                None => {
                    // Unterminated: everything to end of input is the value.
                    self.note(line, column, "unterminated string literal");
                    break;
                }
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    // Unknown escapes drop the backslash and keep the char.
                    Some(c) => s.push(c),
                    None => {
                        self.note(line, column, "unterminated string literal");
                        break;
                    }
                },
                Some(c) => s.push(c),
            }
        }
        Token::new(TokenKind::Str, s, line, column)
    }

    fn lex_number(&mut self, line: usize, column: usize) -> Token {
        // A maximal run of digits and dots, stored verbatim.
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        Token::new(TokenKind::Number, &self.src[start..self.pos], line, column)
    }

    fn lex_ident_or_keyword(&mut self, line: usize, column: usize) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance();
        }
        let word = &self.src[start..self.pos];
        let kind = match word {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "elseif" => TokenKind::ElseIf,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "true" | "false" => TokenKind::Bool,
            w if COMPONENT_KEYWORDS.contains(&w) => TokenKind::Component,
            _ => TokenKind::Ident,
        };
        Token::new(kind, word, line, column)
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Tokenize `src`, discarding anything unrecognizable without comment.
pub fn tokenize(src: &str) -> Vec<Token> {
    Lexer::new(src).tokenize()
}

/// Tokenize `src`, recording every silent skip in `diag`.
pub fn tokenize_with(src: &str, diag: &mut Diagnostics) -> Vec<Token> {
    Lexer::with_diagnostics(src, diag).tokenize()
}
