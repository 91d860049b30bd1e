//! Error types for evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the typed category; factory functions
//! (e.g. `division_by_zero()`) are the public API and populate both `kind`
//! and `message`. The message is what `try` hands to a catch handler, so
//! handlers only ever see text, never the kind.
//!
//! # Backtraces
//!
//! Closure calls are traced: when a traced thunk fails, the trampoline
//! appends its frame to the error. Frames are pushed innermost-first while
//! the error unwinds, so the backtrace reads like a native one.

use std::fmt;

use crate::value::{Name, Position, Value};

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Accepted argument counts of a builtin or closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Inclusive bounds.
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, got: usize) -> bool {
        match self {
            Arity::Exact(n) => got == n,
            Arity::Range(lo, hi) => (lo..=hi).contains(&got),
            Arity::AtLeast(n) => got >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(1) => f.write_str("1 arg"),
            Arity::Exact(n) => write!(f, "{n} args"),
            Arity::Range(lo, hi) => write!(f, "{lo}-{hi} args"),
            Arity::AtLeast(n) => write!(f, "at least {n} args"),
        }
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// Lookup fell off the root of the environment chain.
    UnresolvedSymbol {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: Arity,
        got: usize,
    },
    TypeMismatch {
        name: String,
        expected: String,
        got: String,
    },
    /// Raised by `throw`; the message is the thrown value's text.
    UserThrown {
        message: String,
    },
    ParseFailure {
        message: String,
    },
    DivisionByZero,
    InvalidArgument {
        name: String,
        reason: String,
    },
    /// A background resolution could not be started or delivered.
    AsyncFailure {
        reason: String,
    },
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedSymbol { name } => write!(f, "unresolved symbol: {name}"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name}: wanted {expected}, got {got}"),
            Self::TypeMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name}: expected {expected}, got {got}"),
            Self::UserThrown { message }
            | Self::Custom { message } => f.write_str(message),
            Self::ParseFailure { message } => write!(f, "parse error: {message}"),
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::InvalidArgument { name, reason } => write!(f, "{name}: {reason}"),
            Self::AsyncFailure { reason } => write!(f, "async evaluation failed: {reason}"),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name the function was called through.
    pub name: Name,
    /// Where the call's head symbol was read, if it came from source.
    pub pos: Option<Position>,
}

impl BacktraceFrame {
    pub fn new(name: Name, pos: Option<Position>) -> Self {
        BacktraceFrame { name, pos }
    }
}

impl fmt::Display for BacktraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "at {} ({pos})", self.name),
            None => write!(f, "at {}", self.name),
        }
    }
}

/// Logical call chain at an error site, innermost frame first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, frame: BacktraceFrame) {
        self.frames.push(frame);
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {frame}")?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory-built
    /// errors.
    pub message: String,
    pub backtrace: EvalBacktrace,
}

impl EvalError {
    /// An error with just a message, of kind `Custom`.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            backtrace: EvalBacktrace::default(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: EvalBacktrace::default(),
        }
    }

    /// Append an outer frame to the backtrace.
    #[must_use]
    pub fn with_frame(mut self, frame: BacktraceFrame) -> Self {
        self.backtrace.push(frame);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if !self.backtrace.is_empty() {
            write!(f, "\n{}", self.backtrace)?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Factories

#[cold]
pub fn unresolved_symbol(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedSymbol {
        name: name.to_string(),
    })
}

/// `name` was called with `got` arguments outside `expected`.
#[cold]
pub fn wrong_arg_count(name: &str, expected: Arity, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn type_mismatch(name: &str, expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn user_thrown(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UserThrown {
        message: message.into(),
    })
}

#[cold]
pub fn parse_failure(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ParseFailure {
        message: message.into(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn invalid_argument(name: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        name: name.to_string(),
        reason: reason.into(),
    })
}

#[cold]
pub fn async_failure(reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AsyncFailure {
        reason: reason.into(),
    })
}
