//! Names, symbols, keys and source positions.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier text shared between symbols, keys and binding tables.
///
/// Cloning is a reference-count bump, so a `Name` can key every frame it is
/// bound in without copying the text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(Arc<str>);

impl Name {
    pub fn new(text: &str) -> Self {
        Name(Arc::from(text))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(text: &str) -> Self {
        Name::new(text)
    }
}

impl From<String> for Name {
    fn from(text: String) -> Self {
        Name(Arc::from(text))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

/// Location of a token in its source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// 0-based byte offset.
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Position {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A name in code position, with the place the reader found it.
///
/// Two symbols are equal when their names are; the position is diagnostic
/// payload only.
#[derive(Clone)]
pub struct Symbol {
    name: Name,
    pos: Option<Position>,
}

impl Symbol {
    /// A symbol without a source position (builtins, synthesized forms).
    pub fn new(name: impl Into<Name>) -> Self {
        Symbol {
            name: name.into(),
            pos: None,
        }
    }

    /// A symbol read at `pos`.
    pub fn at(name: impl Into<Name>, pos: Position) -> Self {
        Symbol {
            name: name.into(),
            pos: Some(pos),
        }
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }

    #[inline]
    pub fn pos(&self) -> Option<Position> {
        self.pos
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Symbol {}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "{}<{},{};{}>", self.name, pos.line, pos.column, pos.offset),
            None => write!(f, "{}<?>", self.name),
        }
    }
}

/// Map key token, written `:name` in source.
///
/// Kept distinct from [`Symbol`] so literal maps never resolve their keys
/// against the environment.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Name);

impl Key {
    pub fn new(name: impl Into<Name>) -> Self {
        Key(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
