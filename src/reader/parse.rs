//! Recursive-descent parser over a single lookahead token.
//!
//! Grammar:
//!
//! ```text
//! expr      := '(' list_body | NUMBER | SYMBOL | '\'' expr
//! list_body := ')' | expr '.' expr ')' | expr list_body
//! ```

use crate::data::{Expr, ListBuilder, Symbols};
use crate::reader::token::{next_token, Cursor, Position, Token, TokenOffset};
use crate::reader::{ReadErr, ReadResult};

/// Reader state: where we are in the input, and the next unconsumed token.
pub struct Parser<'src, 'sym> {
    /// Cursor just past the lookahead token.
    cursor: Cursor<'src>,
    lookahead: TokenOffset,
    symbols: &'sym mut Symbols,
    /// Set once iteration has returned an error.
    failed: bool,
}

impl<'src, 'sym> Parser<'src, 'sym> {
    /// Start reading `input`, interning symbols into `symbols`.
    ///
    /// This lexes the first token, which may fail.
    pub fn new(input: &'src str, symbols: &'sym mut Symbols) -> ReadResult<Self> {
        let (lookahead, cursor) = next_token(Cursor::new(input))?;
        Ok(Parser {
            cursor,
            lookahead,
            symbols,
            failed: false,
        })
    }

    /// The next unconsumed token.
    pub fn lookahead(&self) -> &Token {
        &self.lookahead.token
    }

    /// Position of the next unconsumed token.
    pub fn lookahead_position(&self) -> Position {
        self.lookahead.position
    }

    pub fn at_eof(&self) -> bool {
        self.lookahead.token == Token::Eof
    }

    /// The input from the next unconsumed token onward.
    ///
    /// Reading this text with a fresh parser gives the same results
    /// as continuing with this one.
    pub fn rest(&self) -> &'src str {
        self.cursor.input_from(self.lookahead.position.offset)
    }

    /// The symbol table expressions are interned into.
    pub fn symbols_mut(&mut self) -> &mut Symbols {
        &mut *self.symbols
    }

    /// Consume the lookahead token and lex the next one.
    fn advance(&mut self) -> ReadResult<()> {
        let (lookahead, cursor) = next_token(self.cursor)?;
        self.lookahead = lookahead;
        self.cursor = cursor;
        Ok(())
    }

    /// Consume the lookahead token if it is `want`.
    fn matches(&mut self, want: Token) -> ReadResult<bool> {
        if self.lookahead.token == want {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Error for a lookahead token that doesn't fit the grammar here.
    fn unexpected(&self, expected: &str) -> ReadErr {
        let position = self.lookahead.position;
        match &self.lookahead.token {
            Token::Eof => ReadErr::incomplete(
                position,
                format!("expected {expected}, found end of input"),
            ),
            token => ReadErr::error(position, format!("expected {expected}, found {token}")),
        }
    }

    /// Parse one expression, leaving the lookahead on the token after it.
    pub fn parse_expr(&mut self) -> ReadResult<Expr> {
        if self.matches(Token::LParen)? {
            return self.parse_list_body();
        }

        // Atoms carry their payload out of the token before we advance past it.
        let atom = match &self.lookahead.token {
            Token::Number(n) => Some(Expr::Integer(*n)),
            Token::Symbol(s) => Some(self.symbols.symbol(s)),
            _ => None,
        };
        if let Some(atom) = atom {
            self.advance()?;
            return Ok(atom);
        }

        if self.matches(Token::Quote)? {
            let arg = self.parse_expr()?;
            let quote = self.symbols.symbol("quote");
            return Ok(Expr::cons(quote, Expr::cons(arg, Expr::Nil)));
        }

        Err(self.unexpected("an expression"))
    }

    /// Parse the remainder of a list, after its opening paren.
    fn parse_list_body(&mut self) -> ReadResult<Expr> {
        let mut list = ListBuilder::new();
        loop {
            if self.matches(Token::RParen)? {
                return Ok(list.finish());
            }
            let expr = self.parse_expr()?;
            if self.matches(Token::Dot)? {
                let cdr = self.parse_expr()?;
                if !self.matches(Token::RParen)? {
                    return Err(self.unexpected("')' after dotted pair"));
                }
                return Ok(list.append(Expr::cons(expr, cdr)));
            }
            list.push_back(expr);
        }
    }

    /// Read the next top-level expression, if there is one.
    pub fn read_next(&mut self) -> ReadResult<Option<Expr>> {
        if self.at_eof() {
            return Ok(None);
        }
        let expr = self.parse_expr()?;
        tracing::debug!("read expression ending before {}", self.lookahead_position());
        Ok(Some(expr))
    }
}

/// Iterate over the top-level expressions in the input.
///
/// Iteration ends after the first error.
impl Iterator for Parser<'_, '_> {
    type Item = ReadResult<Expr>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_next() {
            Ok(expr) => expr.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
