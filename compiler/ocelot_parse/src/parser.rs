//! Recursive-descent reader from tokens to AST values.

use std::ops::Range;

use ocelot_ir::{ensure_sufficient_stack, Key, MapEntries, Number, Position, Symbol, Value};

use crate::error::ParseError;
use crate::lexer::{lex, LineIndex, RawToken, Token};

pub(crate) struct Parser<'src> {
    source: &'src str,
    lines: LineIndex<'src>,
    tokens: Vec<Token>,
    cursor: usize,
}

impl<'src> Parser<'src> {
    pub(crate) fn new(source: &'src str) -> Result<Self, ParseError> {
        let lines = LineIndex::new(source);
        let tokens = lex(source, &lines)?;
        Ok(Parser {
            source,
            lines,
            tokens,
            cursor: 0,
        })
    }

    /// The next top-level form, or `None` once the input is exhausted.
    pub(crate) fn next_form(&mut self) -> Result<Option<Value>, ParseError> {
        match self.bump() {
            Some(token) => self.form(token).map(Some),
            None => Ok(None),
        }
    }

    /// Fail unless every token has been consumed.
    pub(crate) fn finish(&self) -> Result<(), ParseError> {
        match self.tokens.get(self.cursor) {
            Some(token) => Err(ParseError::TrailingInput {
                pos: self.pos(token.span.start),
            }),
            None => Ok(()),
        }
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(token)
    }

    fn pos(&self, offset: usize) -> Position {
        self.lines.position(offset)
    }

    fn slice(&self, span: &Range<usize>) -> &'src str {
        self.source.get(span.clone()).unwrap_or_default()
    }

    fn form(&mut self, token: Token) -> Result<Value, ParseError> {
        ensure_sufficient_stack(|| self.form_inner(token))
    }

    fn form_inner(&mut self, token: Token) -> Result<Value, ParseError> {
        let Token { kind, span } = token;
        match kind {
            RawToken::LParen => Ok(Value::list(self.seq(kind, &span)?)),
            RawToken::LBracket => Ok(Value::vector(self.seq(kind, &span)?)),
            RawToken::LBrace => {
                let forms = self.seq(kind, &span)?;
                self.map(forms, self.pos(span.start))
            }
            RawToken::RParen | RawToken::RBracket | RawToken::RBrace => {
                Err(ParseError::UnexpectedToken {
                    token: self.slice(&span).to_string(),
                    pos: self.pos(span.start),
                })
            }
            RawToken::Quote => match self.bump() {
                Some(next) => Ok(Value::quoted(self.form(next)?)),
                None => Err(ParseError::DanglingQuote {
                    pos: self.pos(span.start),
                }),
            },
            RawToken::Number => {
                let text = self.slice(&span);
                text.parse::<Number>()
                    .map(Value::Number)
                    .map_err(|_| ParseError::BadNumber {
                        text: text.to_string(),
                        pos: self.pos(span.start),
                    })
            }
            RawToken::Str => {
                let text = self.slice(&span);
                let body = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
                unescape(body).map(Value::string).map_err(|escape| ParseError::BadEscape {
                    escape,
                    pos: self.pos(span.start),
                })
            }
            RawToken::UnterminatedStr => Err(ParseError::UnterminatedString {
                pos: self.pos(span.start),
            }),
            RawToken::Key => {
                let text = self.slice(&span);
                Ok(Value::key(text.get(1..).unwrap_or_default()))
            }
            RawToken::Symbol => Ok(Value::Symbol(Symbol::at(
                self.slice(&span),
                self.pos(span.start),
            ))),
        }
    }

    /// Forms up to the delimiter closing `open`.
    fn seq(&mut self, open: RawToken, span: &Range<usize>) -> Result<Vec<Value>, ParseError> {
        let Some((close, delim)) = open.closer() else {
            return Err(ParseError::UnexpectedToken {
                token: self.slice(span).to_string(),
                pos: self.pos(span.start),
            });
        };
        let mut items = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                return Err(ParseError::UnclosedDelimiter {
                    delim,
                    pos: self.pos(span.start),
                });
            };
            if token.kind == close {
                return Ok(items);
            }
            items.push(self.form(token)?);
        }
    }

    fn map(&self, forms: Vec<Value>, pos: Position) -> Result<Value, ParseError> {
        if forms.len() % 2 != 0 {
            return Err(ParseError::OddMapLiteral { pos });
        }
        let mut entries = MapEntries::default();
        let mut forms = forms.into_iter();
        while let (Some(key), Some(value)) = (forms.next(), forms.next()) {
            let key = match key {
                Value::Key(key) => key,
                Value::Str(text) => Key::new(&*text),
                other => {
                    return Err(ParseError::BadMapKey {
                        found: other.to_string(),
                        pos,
                    })
                }
            };
            entries.insert(key, value);
        }
        Ok(Value::map(entries))
    }
}

/// Resolve escapes in a string body; the error carries the bad escape.
fn unescape(body: &str) -> Result<String, String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('u') => out.push(unicode_escape(&mut chars)?),
            Some(other) => return Err(format!("\\{other}")),
            None => return Err("\\".to_string()),
        }
    }
    Ok(out)
}

/// The `{hex}` part of a `\u{hex}` escape.
fn unicode_escape(chars: &mut std::str::Chars<'_>) -> Result<char, String> {
    let rest = chars.as_str();
    let bad = || format!("\\u{}", rest.chars().take_while(|&c| c != '"').take(8).collect::<String>());
    let Some(inner) = rest.strip_prefix('{') else {
        return Err(bad());
    };
    let Some(end) = inner.find('}') else {
        return Err(bad());
    };
    let hex = &inner[..end];
    let ch = u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(bad)?;
    // Skip `{`, the digits and `}`
    for _ in 0..hex.chars().count() + 2 {
        chars.next();
    }
    Ok(ch)
}
