//! Loading Lisp source files and handing their expressions to an evaluator.

use std::path::{Path, PathBuf};

use crate::data::{Expr, Symbols};
use crate::reader::{Parser, ReadErr};

/// An evaluator for expressions produced by the reader.
pub trait Evaluator {
    type Error;

    /// Evaluate a single top-level expression.
    fn eval(&mut self, symbols: &mut Symbols, expr: Expr) -> Result<Expr, Self::Error>;
}

/// Error type when loading a file.
#[derive(Debug)]
pub enum LoadError<E> {
    /// The file could not be opened or read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file contents are not valid Lisp.
    Read { path: PathBuf, source: ReadErr },
    /// The request itself was malformed, e.g. an include of a non-symbol.
    Argument(String),
    /// The evaluator rejected an expression.
    Eval(E),
}

impl<E: std::fmt::Display> std::fmt::Display for LoadError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "file {} couldn't be read: {source}", path.display())
            }
            // The reader error is already annotated with the path.
            LoadError::Read { source, .. } => write!(f, "{source}"),
            LoadError::Argument(e) => write!(f, "invalid argument: {e}"),
            LoadError::Eval(e) => write!(f, "evaluation error: {e}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for LoadError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Read { source, .. } => Some(source),
            LoadError::Argument(_) => None,
            LoadError::Eval(e) => Some(e),
        }
    }
}

/// Read the entire named file into a string.
pub fn read_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    tracing::debug!("read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Read the named file and evaluate each of its expressions in order.
///
/// Returns the result of the last expression, or nil if the file has none.
/// Reading stops at the first error from the reader or evaluator.
pub fn run_file<E: Evaluator>(
    evaluator: &mut E,
    symbols: &mut Symbols,
    path: impl AsRef<Path>,
) -> Result<Expr, LoadError<E::Error>> {
    let path = path.as_ref();
    let text = read_file(path).map_err(|source| -> LoadError<E::Error> {
        LoadError::Io {
            path: path.to_owned(),
            source,
        }
    })?;
    let read_error = |source: ReadErr| -> LoadError<E::Error> {
        LoadError::Read {
            path: path.to_owned(),
            source: source.annotate(path.display().to_string()),
        }
    };

    let mut parser = Parser::new(&text, symbols).map_err(read_error)?;
    let mut result = Expr::Nil;
    while let Some(expr) = parser.read_next().map_err(read_error)? {
        result = evaluator
            .eval(parser.symbols_mut(), expr)
            .map_err(LoadError::Eval)?;
    }
    tracing::debug!("finished running {}", path.display());
    Ok(result)
}

/// Run each file named by a list of symbols, in order.
///
/// Returns the result of the last file.
pub fn include<E: Evaluator>(
    evaluator: &mut E,
    symbols: &mut Symbols,
    args: &Expr,
) -> Result<Expr, LoadError<E::Error>> {
    if args.is_nil() {
        return Err(LoadError::Argument(
            "include requires at least one file name".to_owned(),
        ));
    }
    let mut files = Vec::new();
    let mut it = args.iter();
    for arg in it.by_ref() {
        let name = arg
            .as_symbol()
            .and_then(|s| symbols.resolve(s))
            .ok_or_else(|| -> LoadError<E::Error> {
                LoadError::Argument(format!(
                    "include expects file names as symbols, got {:?}",
                    arg.resolved(symbols)
                ))
            })?;
        files.push(PathBuf::from(name));
    }
    if !it.tail().is_nil() {
        return Err(LoadError::Argument(
            "include arguments must be a proper list".to_owned(),
        ));
    }

    let mut result = Expr::Nil;
    for file in files {
        tracing::debug!("including {}", file.display());
        result = run_file(evaluator, symbols, &file)?;
    }
    Ok(result)
}
