//! Support for reading Lisp expressions from strings.

use std::io::ErrorKind;

use crate::data::{Expr, Symbols};

pub use parse::Parser;
pub use token::{next_token, Cursor, Position, Token, TokenOffset};

mod parse;
mod token;

/// Read exactly one expression from the input.
///
/// Anything other than whitespace and comments after the expression is an error;
/// input with no expression at all is Incomplete.
pub fn read(input: &str, symbols: &mut Symbols) -> ReadResult<Expr> {
    let mut parser = Parser::new(input, symbols)?;
    let expr = parser.parse_expr()?;
    if !parser.at_eof() {
        return Err(ReadErr::error(
            parser.lookahead_position(),
            format!("unexpected {} after expression", parser.lookahead()),
        ));
    }
    Ok(expr)
}

/// Read the input as a sequence of top-level expressions (i.e. a body).
pub fn read_all(input: &str, symbols: &mut Symbols) -> ReadResult<Vec<Expr>> {
    Parser::new(input, symbols)?.collect()
}

/// Error type if a read does not complete.
///
/// A reader may experience a true tokenizing/parsing error, e.g. "())", that no additional input can fix.
/// This is distinct from a reader that gets an unexpected end-of-input, e.g. "(()":
/// it may be that more input will fix the issue.
///
/// If input is coming in interactively, this is a useful distinction;
/// in the first case, we'd want to indicate an error to the user,
/// while in the latter we'd like to prompt the user for more input.
///
/// Both carry the position of the token where reading stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadErr {
    Error { position: Position, message: String },
    Incomplete { position: Position, message: String },
}

impl std::fmt::Display for ReadErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        match self {
            ReadErr::Error { position, message } => {
                write!(f, "error in input at {position}: {message}")
            }
            ReadErr::Incomplete { position, message } => {
                write!(f, "incomplete input at {position}: {message}")
            }
        }
    }
}

impl std::error::Error for ReadErr {}

impl ReadErr {
    pub fn error(position: Position, message: impl Into<String>) -> Self {
        ReadErr::Error {
            position,
            message: message.into(),
        }
    }

    pub fn incomplete(position: Position, message: impl Into<String>) -> Self {
        ReadErr::Incomplete {
            position,
            message: message.into(),
        }
    }

    /// Add additional context to an error.
    pub fn annotate(self, more: impl AsRef<str>) -> Self {
        match self {
            ReadErr::Error { position, message } => ReadErr::Error {
                position,
                message: format!("{}: {}", more.as_ref(), message),
            },
            ReadErr::Incomplete { position, message } => ReadErr::Incomplete {
                position,
                message: format!("{}: {}", more.as_ref(), message),
            },
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ReadErr::Error { position, .. } | ReadErr::Incomplete { position, .. } => *position,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ReadErr::Error { message, .. } | ReadErr::Incomplete { message, .. } => message,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(self, ReadErr::Incomplete { .. })
    }
}

/// The main result type for this module:
/// a T (token, expression, etc), or an error, or incomplete.
pub type ReadResult<T> = Result<T, ReadErr>;

impl From<ReadErr> for std::io::Error {
    fn from(value: ReadErr) -> Self {
        let kind = match value {
            ReadErr::Incomplete { .. } => ErrorKind::BrokenPipe,
            ReadErr::Error { .. } => ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_single_expression() -> ReadResult<()> {
        let mut symbols = Symbols::default();
        let got = read("  (1 2 3) ; trailing comment\n", &mut symbols)?;
        assert_eq!(got, Expr::list([1i64, 2, 3].map(Expr::from)));
        Ok(())
    }

    #[test]
    fn read_rejects_trailing_input() {
        let mut symbols = Symbols::default();
        match read("()) ", &mut symbols) {
            Err(ReadErr::Error { position, message }) => {
                assert_eq!(position.column, 3);
                assert!(message.contains("')'"), "unexpected message: {message}");
            }
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn read_nothing_is_incomplete() {
        let mut symbols = Symbols::default();
        match read(" ; only a comment", &mut symbols) {
            Err(ReadErr::Incomplete { .. }) => (),
            v => panic!("unexpected result: {v:?}"),
        }
    }

    #[test]
    fn read_all_body() -> ReadResult<()> {
        let mut symbols = Symbols::default();
        let got = read_all("1 (a . b) 'c\n; done\n", &mut symbols)?;
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], Expr::Integer(1));
        let (a, b) = (symbols.intern("a"), symbols.intern("b"));
        assert_eq!(got[1], Expr::cons(a, b));
        let quoted = Expr::list([symbols.symbol("quote"), symbols.symbol("c")]);
        assert_eq!(got[2], quoted);
        Ok(())
    }

    #[test]
    fn read_all_of_nothing_is_empty() -> ReadResult<()> {
        let mut symbols = Symbols::default();
        let got = read_all(" \t\r\n; comment\n;; another", &mut symbols)?;
        assert!(got.is_empty());
        Ok(())
    }

    #[test]
    fn read_time_is_linear() -> ReadResult<()> {
        fn time_to_read(n: usize) -> ReadResult<std::time::Duration> {
            let input = "ab ".repeat(n);
            let mut symbols = Symbols::default();
            let start = std::time::Instant::now();
            let body = read_all(&input, &mut symbols)?;
            let elapsed = start.elapsed();
            assert_eq!(body.len(), n);
            Ok(elapsed)
        }

        time_to_read(1_000)?;
        let small = time_to_read(25_000)?;
        let large = time_to_read(100_000)?;
        // Four times the input should take about four times as long, not sixteen.
        assert!(
            large < small * 10,
            "reading 100k symbols took {large:?}, 25k took {small:?}"
        );
        Ok(())
    }

    #[test]
    fn read_and_drop_long_list() -> ReadResult<()> {
        let items: Vec<String> = (0..300_000).map(|i| i.to_string()).collect();
        let input = format!("({})", items.join(" "));
        let mut symbols = Symbols::default();

        let list = read(&input, &mut symbols)?;
        assert!(list.is_proper_list());
        assert_eq!(list.iter().count(), 300_000);
        assert_eq!(list.iter().last(), Some(&Expr::Integer(299_999)));
        drop(list);
        Ok(())
    }

    #[test]
    fn annotate_keeps_kind_and_position() {
        let position = Position {
            offset: 4,
            line: 1,
            column: 5,
        };
        let err = ReadErr::incomplete(position, "expected ')'").annotate("input.lisp");
        assert!(err.is_incomplete());
        assert_eq!(err.position(), position);
        assert_eq!(err.message(), "input.lisp: expected ')'");
        assert_eq!(
            err.to_string(),
            "incomplete input at line 1 column 5: input.lisp: expected ')'"
        );
    }

    #[test]
    fn convert_to_io_error() {
        let err: std::io::Error = ReadErr::error(Position::default(), "bad").into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err: std::io::Error = ReadErr::incomplete(Position::default(), "more").into();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
    }
}
