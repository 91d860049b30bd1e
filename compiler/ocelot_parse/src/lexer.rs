//! Tokenizer built on logos.

use std::ops::Range;

use logos::Logos;
use ocelot_ir::Position;

use crate::error::ParseError;

/// Raw token; payloads are recovered from the source slice by the parser.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n,]+")] // Whitespace and commas separate forms
#[logos(skip r";[^\n]*")] // Line comments
pub(crate) enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("'")]
    Quote,

    // Beats Symbol on equal-length matches such as `-5`
    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 3)]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,
    #[regex(r#""([^"\\]|\\.)*\\?"#)]
    UnterminatedStr,

    #[regex(r#":[^\s,;()\[\]{}'"]+"#)]
    Key,

    #[regex(r#"[^\s,;()\[\]{}'":][^\s,;()\[\]{}'"]*"#)]
    Symbol,
}

impl RawToken {
    /// The closing delimiter matching an opener.
    pub(crate) fn closer(self) -> Option<(RawToken, char)> {
        match self {
            RawToken::LParen => Some((RawToken::RParen, '(')),
            RawToken::LBracket => Some((RawToken::RBracket, '[')),
            RawToken::LBrace => Some((RawToken::RBrace, '{')),
            _ => None,
        }
    }
}

/// A token and its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: RawToken,
    pub span: Range<usize>,
}

/// Maps byte offsets to line and column.
pub(crate) struct LineIndex<'src> {
    source: &'src str,
    starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineIndex { source, starts }
    }

    pub(crate) fn position(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line.saturating_sub(1)];
        let column = self
            .source
            .get(start..offset)
            .map_or(0, |text| text.chars().count());
        Position::new(line, column + 1, offset)
    }
}

/// Tokenize `source`, failing on the first character no token accepts.
pub(crate) fn lex(source: &str, lines: &LineIndex<'_>) -> Result<Vec<Token>, ParseError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                let ch = source
                    .get(span.start..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or('\u{fffd}');
                return Err(ParseError::UnexpectedChar {
                    ch,
                    pos: lines.position(span.start),
                });
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "Tests can panic")]

    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<RawToken> {
        let lines = LineIndex::new(source);
        lex(source, &lines)
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn delimiters_and_atoms() {
        assert_eq!(
            kinds("(add 1 -2.5 \"s\" :k)"),
            vec![
                RawToken::LParen,
                RawToken::Symbol,
                RawToken::Number,
                RawToken::Number,
                RawToken::Str,
                RawToken::Key,
                RawToken::RParen,
            ]
        );
    }

    #[test]
    fn commas_and_comments_are_skipped() {
        assert_eq!(
            kinds("[1, 2] ; trailing words (\n'x"),
            vec![
                RawToken::LBracket,
                RawToken::Number,
                RawToken::Number,
                RawToken::RBracket,
                RawToken::Quote,
                RawToken::Symbol,
            ]
        );
    }

    #[test]
    fn symbols_may_contain_punctuation() {
        assert_eq!(
            kinds("def! lteq? - -> quot*"),
            vec![RawToken::Symbol; 5]
        );
    }

    #[test]
    fn digits_followed_by_letters_form_a_symbol() {
        assert_eq!(kinds("5x"), vec![RawToken::Symbol]);
    }

    #[test]
    fn open_string_is_its_own_token() {
        assert_eq!(kinds("\"abc"), vec![RawToken::UnterminatedStr]);
        assert_eq!(kinds(r#""a\"b""#), vec![RawToken::Str]);
    }

    #[test]
    fn lone_colon_is_rejected() {
        let source = "(a :)";
        let lines = LineIndex::new(source);
        assert_eq!(
            lex(source, &lines).unwrap_err(),
            ParseError::UnexpectedChar {
                ch: ':',
                pos: Position::new(1, 4, 3),
            }
        );
    }

    #[test]
    fn positions_count_lines_and_chars() {
        let source = "ab\nλx yz";
        let lines = LineIndex::new(source);
        assert_eq!(lines.position(0), Position::new(1, 1, 0));
        assert_eq!(lines.position(3), Position::new(2, 1, 3));
        // `λ` is two bytes wide
        assert_eq!(lines.position(7), Position::new(2, 4, 7));
    }
}
