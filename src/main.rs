//! Read a Lisp file and dump the trees the reader produces.
//!
//! Each top-level expression is written to stdout in the `Debug` form of
//! [`lispish_reader::Expr`], with symbol names resolved.
//! Logging goes to stderr; set `RUST_LOG=lispish_reader=trace` to see each token.
//!
//! ```ignore
//! lispish-reader input.lisp
//! <input.lisp lispish-reader
//! ```

use std::io::{stdout, Read, Write};

use lispish_reader::{read_all, read_file, Symbols};
use tracing_subscriber::EnvFilter;

pub fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let input = match std::env::args().nth(1) {
        Some(path) => read_file(&path).map_err(|e| {
            tracing::error!("file {path} couldn't be read: {e}");
            e
        })?,
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            input
        }
    };

    let mut symbols = Symbols::default();
    let body = read_all(&input, &mut symbols)?;
    tracing::info!("read {} expressions", body.len());

    let mut out = stdout().lock();
    for expr in &body {
        writeln!(out, "{:#?}", expr.resolved(&symbols))?;
    }
    Ok(())
}
