use std::sync::OnceLock;

use super::DecodeError;
use crate::{
    geometry::{Positioni, Sizei},
    native::{
        codes::{self, window},
        NativeEvent, NativePayload, RawWindowEvent,
    },
};

/// What happened to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    Shown,
    Hidden,
    Exposed,
    Moved,
    Resized,
    SizeChanged,
    Minimized,
    Maximized,
    Restored,
    MouseEntered,
    MouseLeft,
    FocusGained,
    FocusLost,
    Close,
    TakeFocus,
    HitTest,
}

fn kind_table() -> &'static [(u8, WindowEventKind)] {
    static TABLE: OnceLock<Vec<(u8, WindowEventKind)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        use WindowEventKind::*;

        let mut table = vec![
            (window::SHOWN, Shown),
            (window::HIDDEN, Hidden),
            (window::EXPOSED, Exposed),
            (window::MOVED, Moved),
            (window::RESIZED, Resized),
            (window::SIZE_CHANGED, SizeChanged),
            (window::MINIMIZED, Minimized),
            (window::MAXIMIZED, Maximized),
            (window::RESTORED, Restored),
            (window::ENTER, MouseEntered),
            (window::LEAVE, MouseLeft),
            (window::FOCUS_GAINED, FocusGained),
            (window::FOCUS_LOST, FocusLost),
            (window::CLOSE, Close),
            (window::TAKE_FOCUS, TakeFocus),
            (window::HIT_TEST, HitTest),
        ];
        table.sort_by_key(|&(code, _)| code);
        table
    })
}

impl WindowEventKind {
    pub fn from_code(code: u8) -> Option<Self> {
        let table = kind_table();
        table
            .binary_search_by_key(&code, |&(code, _)| code)
            .ok()
            .map(|index| table[index].1)
    }
}

/// Something happened to a window.
///
/// At most one of the moved-to position and the resized-to size is set,
/// and only for [`WindowEventKind::Moved`] and [`WindowEventKind::Resized`] respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowEvent {
    kind: WindowEventKind,
    moved_to: Option<Positioni>,
    resized_to: Option<Sizei>,
}
impl WindowEvent {
    pub fn decode(record: &NativeEvent) -> Result<Self, DecodeError> {
        match (record.kind, &record.payload) {
            (codes::WINDOWEVENT, NativePayload::Window(raw)) => Self::from_raw(raw),
            (kind, _) => Err(DecodeError::unrecognized("window event type", kind)),
        }
    }

    fn from_raw(raw: &RawWindowEvent) -> Result<Self, DecodeError> {
        let kind = WindowEventKind::from_code(raw.event)
            .ok_or_else(|| DecodeError::unrecognized("window sub-event", raw.event))?;

        Ok(Self {
            kind,
            moved_to: (kind == WindowEventKind::Moved)
                .then(|| Positioni::new(raw.data1, raw.data2)),
            resized_to: (kind == WindowEventKind::Resized)
                .then(|| Sizei::new(raw.data1, raw.data2)),
        })
    }

    pub fn kind(&self) -> WindowEventKind {
        self.kind
    }

    /// New position of the window, for [`WindowEventKind::Moved`] only
    pub fn moved_to_position(&self) -> Option<Positioni> {
        self.moved_to
    }

    /// New size of the window, for [`WindowEventKind::Resized`] only
    pub fn resized_to_size(&self) -> Option<Sizei> {
        self.resized_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(event: u8, data1: i32, data2: i32) -> Result<WindowEvent, DecodeError> {
        WindowEvent::decode(&NativeEvent::window(1, event, data1, data2))
    }

    #[test]
    fn moved_only_carries_a_position() -> Result<(), DecodeError> {
        let event = decode(window::MOVED, 10, 20)?;
        assert_eq!(event.kind(), WindowEventKind::Moved);
        assert_eq!(event.moved_to_position(), Some(Positioni::new(10, 20)));
        assert_eq!(event.resized_to_size(), None);
        Ok(())
    }

    #[test]
    fn resized_only_carries_a_size() -> Result<(), DecodeError> {
        let event = decode(window::RESIZED, 640, 480)?;
        assert_eq!(event.kind(), WindowEventKind::Resized);
        assert_eq!(event.moved_to_position(), None);
        assert_eq!(event.resized_to_size(), Some(Sizei::new(640, 480)));
        Ok(())
    }

    #[test]
    fn other_kinds_carry_nothing() -> Result<(), DecodeError> {
        for code in 1..=16 {
            if code == window::MOVED || code == window::RESIZED {
                continue;
            }
            let event = decode(code, 7, 8)?;
            assert_eq!(event.moved_to_position(), None);
            assert_eq!(event.resized_to_size(), None);
        }
        Ok(())
    }

    #[test]
    fn unknown_sub_event_is_rejected() {
        assert_eq!(
            decode(0, 0, 0),
            Err(DecodeError::unrecognized("window sub-event", 0u8))
        );
        assert!(decode(17, 0, 0).is_err());
    }

    #[test]
    fn close_maps_through_the_table() {
        assert_eq!(
            WindowEventKind::from_code(window::CLOSE),
            Some(WindowEventKind::Close)
        );
        assert_eq!(
            WindowEventKind::from_code(window::LEAVE),
            Some(WindowEventKind::MouseLeft)
        );
    }
}
