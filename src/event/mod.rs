//! Event data model.
//!
//! # Data Flow
//! ```text
//! Producer (stdin / HTTP)
//!     → Event { source, payload }
//!     → bounded channel (one slot)
//!     → multiplexer consumes it exactly once
//!     → dropped
//! ```
//!
//! # Design Decisions
//! - Events are ephemeral: nothing is persisted or replayed
//! - The console record format lives on `Display` so every handler renders
//!   the same line

use std::fmt;

/// Origin of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// A line read from the console input stream.
    Stdin,
    /// The body of an inbound HTTP request.
    Http,
}

impl Source {
    /// Label used in console records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Stdin => "stdin",
            Source::Http => "HTTP",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One received payload tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub payload: String,
}

impl Event {
    pub fn new(source: Source, payload: impl Into<String>) -> Self {
        Self {
            source,
            payload: payload.into(),
        }
    }

    pub fn stdin(payload: impl Into<String>) -> Self {
        Self::new(Source::Stdin, payload)
    }

    pub fn http(payload: impl Into<String>) -> Self {
        Self::new(Source::Http, payload)
    }
}

/// Renders the console record: `Message from <source>: "<payload>"`.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message from {}: {:?}", self.source, self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_quotes_payload() {
        let event = Event::stdin("hello, world!");
        assert_eq!(event.to_string(), r#"Message from stdin: "hello, world!""#);
    }

    #[test]
    fn record_escapes_control_characters() {
        let event = Event::http("a\"b\tc");
        assert_eq!(event.to_string(), r#"Message from HTTP: "a\"b\tc""#);
    }

    #[test]
    fn empty_payload_renders_empty_quotes() {
        assert_eq!(Event::http("").to_string(), r#"Message from HTTP: """#);
    }
}
