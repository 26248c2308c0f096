use std::any::Any;
use std::fmt;

/// Source position of a panic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl From<&std::panic::Location<'_>> for Location {
    fn from(location: &std::panic::Location<'_>) -> Self {
        Self {
            file: location.file().to_owned(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Extract the message of a panic payload, if it carries one.
///
/// `panic!` with a literal produces a `&'static str`, a formatted `panic!` produces a `String`.
pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Some((*s).to_owned())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

/// A panic intercepted by an attempt.
pub struct Panic {
    message: Option<String>,
    location: Option<Location>,
    payload: Box<dyn Any + Send>,
}

impl Panic {
    /// Build from the unwound payload and what the panic hook recorded.
    ///
    /// A capture left behind by a panic that the computation caught itself does not describe
    /// `payload` (for instance after `resume_unwind`, which skips the hook). It is only trusted
    /// when its message matches the payload's.
    pub(crate) fn new(
        payload: Box<dyn Any + Send>,
        capture: Option<crate::context::Capture>,
    ) -> Self {
        let message = payload_message(payload.as_ref());
        let location = match capture {
            Some(c) if c.message == message => c.location,
            _ => None,
        };
        Self {
            message,
            location,
            payload,
        }
    }

    /// The panic message, if the payload was a string.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Where the panic was raised.
    ///
    /// This is only known while the panic hook installed by this crate is active. If the
    /// application replaces the panic hook, this returns `None`. It is also `None` when the
    /// computation re-raised a panic with `std::panic::resume_unwind`, which bypasses the hook.
    ///
    /// Recording the location has a side effect: while an attempt is running on a thread, every
    /// panic on that thread is kept from the previously installed hook, including panics that
    /// code inside the computation catches itself. See [`context`](crate::context).
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// The raw value passed to `panic!` or `std::panic::panic_any`.
    ///
    /// # Examples
    ///
    /// ```
    /// #[derive(Debug, PartialEq)]
    /// struct Code(i32);
    ///
    /// let config = tryme::Config::new();
    /// let seen = std::sync::Arc::new(std::sync::Mutex::new(None));
    /// let sink = seen.clone();
    /// config.set_catch_action(move |fault| {
    ///     if let tryme::Fault::Panic(p) = fault {
    ///         *sink.lock().unwrap() = p.downcast_ref::<Code>().map(|c| c.0);
    ///     }
    /// });
    /// config.attempt(|| std::panic::panic_any(Code(7)));
    /// assert_eq!(*seen.lock().unwrap(), Some(7));
    /// ```
    pub fn payload(&self) -> &(dyn Any + Send) {
        self.payload.as_ref()
    }

    /// Shortcut for `self.payload().downcast_ref::<T>()`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

impl fmt::Debug for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panic")
            .field("message", &self.message)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "panicked: {message}")?,
            None => f.write_str("panicked with a non-string payload")?,
        }
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        Ok(())
    }
}

/// The fault handed to the catch action when an attempt fails.
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// The computation panicked.
    #[error("{0}")]
    Panic(Panic),
    /// The computation returned `Err`.
    #[error(transparent)]
    Error(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Fault {
    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panic(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Fault::Error(_))
    }

    /// Human readable description of what went wrong, without the location.
    pub fn message(&self) -> String {
        match self {
            Fault::Panic(p) => p.message().unwrap_or("non-string panic payload").to_owned(),
            Fault::Error(e) => e.to_string(),
        }
    }

    pub fn location(&self) -> Option<&Location> {
        match self {
            Fault::Panic(p) => p.location(),
            Fault::Error(_) => None,
        }
    }
}
