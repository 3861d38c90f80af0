use std::fmt;
use thiserror::Error;

/// Invalid transition requested for an event.
///
/// Returning one of these never changes the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    /// `start` on an event that is recording, or a duration query on one
    #[error("event {event} is recording")]
    AlreadyRecording { event: String },

    /// `stop` on an event that is idle
    #[error("event {event} is not recording")]
    NotRecording { event: String },
}

impl ClockError {
    pub fn already_recording<Q: fmt::Debug + ?Sized>(event: &Q) -> Self {
        ClockError::AlreadyRecording {
            event: format!("{event:?}"),
        }
    }

    pub fn not_recording<Q: fmt::Debug + ?Sized>(event: &Q) -> Self {
        ClockError::NotRecording {
            event: format!("{event:?}"),
        }
    }

    /// Debug rendering of the offending label
    pub fn event(&self) -> &str {
        match self {
            ClockError::AlreadyRecording { event } | ClockError::NotRecording { event } => event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClockError::already_recording("parse");
        assert_eq!(err.to_string(), "event \"parse\" is recording");
        assert_eq!(err.event(), "\"parse\"");

        let err = ClockError::not_recording(&7_u32);
        assert_eq!(err.to_string(), "event 7 is not recording");
    }
}
