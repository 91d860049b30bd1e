//! Ocelot Parse - reads source text into AST values.
//!
//! The reader produces plain [`Value`]s: lists, vectors, maps, numbers,
//! strings, keys and positioned symbols. `'form` reads as `(quote form)`.
//! `true`, `false` and `nil` are ordinary symbols resolved by the root
//! environment.

mod error;
mod lexer;
mod parser;

use ocelot_ir::Value;
use tracing::trace;

pub use error::ParseError;

use parser::Parser;

/// Read the single form in `source`.
///
/// Empty input (or input holding only comments) reads as `nil`. Anything
/// after the first form is an error.
pub fn parse(source: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(source)?;
    let form = parser.next_form()?.unwrap_or(Value::Nil);
    parser.finish()?;
    Ok(form)
}

/// Read every top-level form in `source`.
pub fn parse_all(source: &str) -> Result<Vec<Value>, ParseError> {
    let mut parser = Parser::new(source)?;
    let mut forms = Vec::new();
    while let Some(form) = parser.next_form()? {
        forms.push(form);
    }
    trace!(forms = forms.len(), bytes = source.len(), "parsed source");
    Ok(forms)
}
