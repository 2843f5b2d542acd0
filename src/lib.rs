//! Reader for a small Lisp: text in, S-expression trees out.
//!

pub mod data;
pub mod load;
pub mod reader;

pub use data::{Expr, Pair, Symbol, Symbols};
pub use load::{include, read_file, run_file, Evaluator, LoadError};
pub use reader::{read, read_all, Parser, ReadErr, ReadResult};
