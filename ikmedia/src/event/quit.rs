use super::DecodeError;
use crate::native::{codes, NativeEvent};

/// The application was asked to quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuitEvent;
impl QuitEvent {
    pub fn decode(record: &NativeEvent) -> Result<Self, DecodeError> {
        match record.kind {
            codes::QUIT => Ok(Self),
            kind => Err(DecodeError::unrecognized("quit event type", kind)),
        }
    }
}
