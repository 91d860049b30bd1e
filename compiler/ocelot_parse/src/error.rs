//! Reader errors.

use ocelot_ir::Position;
use thiserror::Error;

/// Why source text could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character `{ch}` at {pos}")]
    UnexpectedChar { ch: char, pos: Position },

    /// A closing delimiter with no matching opener.
    #[error("unexpected `{token}` at {pos}")]
    UnexpectedToken { token: String, pos: Position },

    #[error("unclosed `{delim}` opened at {pos}")]
    UnclosedDelimiter { delim: char, pos: Position },

    #[error("unterminated string starting at {pos}")]
    UnterminatedString { pos: Position },

    #[error("nothing to quote after `'` at {pos}")]
    DanglingQuote { pos: Position },

    #[error("map literal at {pos} needs an even number of forms")]
    OddMapLiteral { pos: Position },

    #[error("map key must be a :key or a string, found `{found}` in map at {pos}")]
    BadMapKey { found: String, pos: Position },

    #[error("invalid escape `{escape}` in string at {pos}")]
    BadEscape { escape: String, pos: Position },

    #[error("invalid number `{text}` at {pos}")]
    BadNumber { text: String, pos: Position },

    #[error("unexpected trailing input at {pos}")]
    TrailingInput { pos: Position },
}

impl ParseError {
    /// Whether more input could complete the source.
    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            ParseError::UnclosedDelimiter { .. }
                | ParseError::UnterminatedString { .. }
                | ParseError::DanglingQuote { .. }
        )
    }

    pub fn pos(&self) -> Position {
        match self {
            ParseError::UnexpectedChar { pos, .. }
            | ParseError::UnexpectedToken { pos, .. }
            | ParseError::UnclosedDelimiter { pos, .. }
            | ParseError::UnterminatedString { pos }
            | ParseError::DanglingQuote { pos }
            | ParseError::OddMapLiteral { pos }
            | ParseError::BadMapKey { pos, .. }
            | ParseError::BadEscape { pos, .. }
            | ParseError::BadNumber { pos, .. }
            | ParseError::TrailingInput { pos } => *pos,
        }
    }
}
