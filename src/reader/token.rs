//! Module for extracting Lisp tokens from an input string.
//!
//! The lexer never looks more than one token ahead:
//! [`next_token`] takes a cursor and returns the next token
//! together with the cursor just past it.

use crate::data;
use crate::reader::{ReadErr, ReadResult};

/// A Lisp token.
///
/// Whitespace and comments are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Eof,
    LParen,
    RParen,
    Quote,
    Comma,
    Dot,
    Symbol(String),
    Number(data::Integer),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Eof => write!(f, "end of input"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Quote => write!(f, "quote mark"),
            Token::Comma => write!(f, "','"),
            Token::Dot => write!(f, "'.'"),
            Token::Symbol(s) => write!(f, "symbol {s}"),
            Token::Number(n) => write!(f, "number {n}"),
        }
    }
}

/// A location in the input.
///
/// Lines and columns are 1-indexed; columns count characters, tabs included.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Byte offset from the start of input.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// A token along with its starting position in the input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOffset {
    pub token: Token,
    pub position: Position,
}

impl From<TokenOffset> for Token {
    fn from(value: TokenOffset) -> Self {
        value.token
    }
}

/// A read-only view of the input, and how far into it we are.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    position: Position,
}

impl<'a> Cursor<'a> {
    /// A NUL character ends the input, as if the string stopped there.
    pub fn new(input: &'a str) -> Self {
        let input = match input.find('\0') {
            Some(end) => &input[..end],
            None => input,
        };
        Cursor {
            input,
            position: Position {
                offset: 0,
                line: 1,
                column: 1,
            },
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The input not yet consumed.
    pub fn rest(&self) -> &'a str {
        self.input_from(self.position.offset)
    }

    /// The input from the given byte offset on.
    pub(super) fn input_from(&self, offset: usize) -> &'a str {
        &self.input[offset..]
    }

    /// Move past the next `len` bytes of input.
    fn advance(self, len: usize) -> Self {
        let skipped = &self.rest()[..len];
        let (lines, columns) = cursor_distance(skipped);
        let mut position = self.position;
        position.offset += len;
        if lines > 0 {
            position.line += lines;
            position.column = columns + 1;
        } else {
            position.column += columns;
        }
        Cursor { position, ..self }
    }
}

mod regex {
    use regex::Regex;
    use std::sync::OnceLock;

    /// Whitespace and comments between tokens.
    /// A comment runs to the end of the line, but does not include the newline.
    pub(super) fn trivia() -> &'static Regex {
        static TRIVIA: OnceLock<Regex> = OnceLock::new();
        TRIVIA.get_or_init(|| {
            Regex::new(r"\A(?:[ \t\r\n]+|;[^\n]*)+")
                .expect("could not compile regex for whitespace and comments")
        })
    }

    /// A run of literal characters: anything but parens and whitespace.
    /// Note that `;`, `'`, `,` and `.` are literal characters here;
    /// they are only special at the start of a token.
    pub(super) fn literal() -> &'static Regex {
        static LITERAL: OnceLock<Regex> = OnceLock::new();
        LITERAL.get_or_init(|| {
            Regex::new(r"\A[^() \t\r\n]+").expect("could not compile regex for literal")
        })
    }

    /// A literal that is entirely an integer.
    pub(super) fn integer() -> &'static Regex {
        static INTEGER: OnceLock<Regex> = OnceLock::new();
        INTEGER.get_or_init(|| {
            Regex::new(r"\A-?[0-9]+\z").expect("could not compile regex for integer")
        })
    }
}

/// Returns the (line, column) that the cursor ends at, after following the given path,
/// assuming it started at (0, 0).
/// Tabs still count as a single column
fn cursor_distance(s: &str) -> (usize, usize) {
    match s.rfind('\n') {
        Some(last) => {
            let lines = s.matches('\n').count();
            (lines, s[last + 1..].chars().count())
        }
        None => (0, s.chars().count()),
    }
}

/// Get the next token from the input, and the cursor just past it.
///
/// Whitespace and comments before the token are skipped.
/// At the end of input this returns `Token::Eof` and does not advance,
/// so repeated calls keep returning `Eof`.
pub fn next_token(cursor: Cursor<'_>) -> ReadResult<(TokenOffset, Cursor<'_>)> {
    let cursor = match regex::trivia().find(cursor.rest()) {
        Some(m) => cursor.advance(m.end()),
        None => cursor,
    };
    let position = cursor.position();
    let rest = cursor.rest();

    // Single-character matchers.
    // These take priority over literals, so a leading quote, comma or dot
    // is always punctuation.
    if let Some(token) = match rest.as_bytes().first() {
        None => {
            return Ok((
                TokenOffset {
                    token: Token::Eof,
                    position,
                },
                cursor,
            ))
        }
        Some(b'(') => Some(Token::LParen),
        Some(b')') => Some(Token::RParen),
        Some(b'\'') => Some(Token::Quote),
        Some(b',') => Some(Token::Comma),
        Some(b'.') => Some(Token::Dot),
        _ => None,
    } {
        tracing::trace!("lexed {} at {}", token, position);
        return Ok((TokenOffset { token, position }, cursor.advance(1)));
    }

    // Everything left is the start of a literal:
    // trivia and the single-character tokens have been handled above,
    // and NUL ends the input.
    let literal = regex::literal()
        .find(rest)
        .map(|m| m.as_str())
        .ok_or_else(|| ReadErr::error(position, "could not parse remainder of input as anything"))?;

    let token = if regex::integer().is_match(literal) {
        let value: data::Integer = literal.parse().map_err(|e| {
            ReadErr::error(
                position,
                format!("failed to convert \"{literal}\" into integer: {e}"),
            )
        })?;
        Token::Number(value)
    } else {
        Token::Symbol(literal.to_owned())
    };
    tracing::trace!("lexed {} at {}", token, position);

    Ok((
        TokenOffset { token, position },
        cursor.advance(literal.len()),
    ))
}
