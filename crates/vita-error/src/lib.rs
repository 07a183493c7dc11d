use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

#[cfg(feature = "backtrace")]
use std::backtrace::Backtrace;

pub type Result<T> = std::result::Result<T, VitaError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidConfig,
    InvalidParameter,
    Engine,
    Evaluation,
    Io,
    Format,
    Multiple,
    Context,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T: Into<Cow<'static, str>>> From<T> for ErrString {
    fn from(v: T) -> Self {
        Self(v.into())
    }
}

/// Errors raised at configuration/init time or while loading/saving
/// persisted state. Never constructed on the evaluation hot path: a
/// symbol that can't produce a finite result returns a `Value::Void` or
/// a sentinel fitness instead of an error (see `vita-gp`).
#[derive(Debug)]
pub enum VitaError {
    /// Fatal at init: missing dataset, `enough_terminals` fails,
    /// contradictory categories.
    InvalidConfig { message: ErrString },
    /// A single configuration value fails its own validity check
    /// (e.g. a `Rate` outside `[0, 1]`).
    InvalidParameter { message: ErrString },
    /// An internal invariant of the evolution driver was violated.
    Engine { message: ErrString },
    /// The evaluator/problem adapter itself failed (not the same as a
    /// `Value::Void` result, which is not an error).
    Evaluation { message: ErrString },
    /// Dataset/symbol-file/persisted-state I/O failure.
    Io { message: ErrString },
    /// Dataset parse failure, malformed symbol file, persisted-state
    /// size mismatch.
    Format { message: ErrString },

    Multiple(MultiDisplay),

    Context {
        context: ErrorContext,
        source: Box<VitaError>,
        #[cfg(feature = "backtrace")]
        backtrace: Backtrace,
    },
}

impl VitaError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::InvalidParameter { .. } => ErrorCode::InvalidParameter,
            Self::Engine { .. } => ErrorCode::Engine,
            Self::Evaluation { .. } => ErrorCode::Evaluation,
            Self::Io { .. } => ErrorCode::Io,
            Self::Format { .. } => ErrorCode::Format,
            Self::Multiple(_) => ErrorCode::Multiple,
            Self::Context { .. } => ErrorCode::Context,
        }
    }

    pub fn with_context(self, msg: impl Into<String>) -> Self {
        VitaError::Context {
            context: ErrorContext::new(msg),
            source: Box::new(self),
            #[cfg(feature = "backtrace")]
            backtrace: Backtrace::capture(),
        }
    }
}

impl Display for VitaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { message } => write!(f, "invalid configuration: {message}"),
            Self::InvalidParameter { message } => write!(f, "invalid parameter: {message}"),
            Self::Engine { message } => write!(f, "engine error: {message}"),
            Self::Evaluation { message } => write!(f, "evaluation error: {message}"),
            Self::Io { message } => write!(f, "io error: {message}"),
            Self::Format { message } => write!(f, "format error: {message}"),
            Self::Multiple(m) => write!(f, "multiple errors:\n{m}"),
            Self::Context { context, source, .. } => write!(f, "{context}\ncaused by: {source}"),
        }
    }
}

impl std::error::Error for VitaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Context { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ErrorContext {
    message: String,
}
impl ErrorContext {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}
impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl std::error::Error for ErrorContext {}

#[derive(Debug)]
pub struct MultiDisplay(Vec<VitaError>);
impl Display for MultiDisplay {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{i}] {e} (code: {:?})", e.code())?;
        }
        Ok(())
    }
}
impl From<Vec<VitaError>> for MultiDisplay {
    fn from(v: Vec<VitaError>) -> Self {
        Self(v)
    }
}

impl From<std::io::Error> for VitaError {
    fn from(e: std::io::Error) -> Self {
        VitaError::Io { message: e.to_string().into() }
    }
}

pub trait ResultExt<T> {
    fn context(self, msg: impl Into<String>) -> Result<T>;
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<VitaError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[doc(hidden)]
pub mod __private {
    #[inline]
    #[cold]
    #[must_use]
    pub fn must_use<E>(e: E) -> E {
        e
    }
}

#[macro_export]
macro_rules! vita_err {
    (InvalidConfig: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::VitaError::InvalidConfig { message: format!($fmt, $($arg),*).into() })
    };
    (InvalidParameter: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::VitaError::InvalidParameter { message: format!($fmt, $($arg),*).into() })
    };
    (Engine: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::VitaError::Engine { message: format!($fmt, $($arg),*).into() })
    };
    (Evaluation: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::VitaError::Evaluation { message: format!($fmt, $($arg),*).into() })
    };
    (Io: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::VitaError::Io { message: format!($fmt, $($arg),*).into() })
    };
    (Format: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::__private::must_use($crate::VitaError::Format { message: format!($fmt, $($arg),*).into() })
    };
    ($variant:ident: $msg:expr $(,)?) => {{
        $crate::__private::must_use($crate::VitaError::Engine { message: $msg.into() })
    }};
}

#[macro_export]
macro_rules! vita_bail {
    ($($tt:tt)+) => { return Err($crate::vita_err!($($tt)+)) };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond { $crate::vita_bail!($($tt)+); }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_chains_display() {
        let base = vita_err!(InvalidConfig: "missing dataset");
        let wrapped = base.with_context("loading problem");
        let rendered = wrapped.to_string();
        assert!(rendered.contains("loading problem"));
        assert!(rendered.contains("missing dataset"));
    }

    #[test]
    fn ensure_macro_bails() {
        fn check(n: i32) -> Result<()> {
            ensure!(n > 0, InvalidParameter: "n must be positive, got {}", n);
            Ok(())
        }

        assert!(check(1).is_ok());
        assert!(matches!(check(-1), Err(VitaError::InvalidParameter { .. })));
    }
}
