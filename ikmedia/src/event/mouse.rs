use super::DecodeError;
use crate::{
    geometry::{Positioni, Sizei},
    input::Button,
    native::{codes, NativeEvent, NativePayload},
};

/// The mouse moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseMotionEvent {
    position: Positioni,
    relative_movement: Positioni,
}
impl MouseMotionEvent {
    pub fn decode(record: &NativeEvent) -> Result<Self, DecodeError> {
        match (record.kind, &record.payload) {
            (codes::MOUSEMOTION, NativePayload::MouseMotion(raw)) => Ok(Self {
                position: Positioni::new(raw.x, raw.y),
                relative_movement: Positioni::new(raw.xrel, raw.yrel),
            }),
            (kind, _) => Err(DecodeError::unrecognized("mouse motion event type", kind)),
        }
    }

    pub fn mouse_position(&self) -> Positioni {
        self.position
    }

    /// Movement since the previous motion event
    pub fn relative_movement(&self) -> Positioni {
        self.relative_movement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// A mouse button was pressed or released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonEvent {
    button: Button,
    state: ButtonState,
    clicks: u8,
    position: Positioni,
}
impl MouseButtonEvent {
    pub fn decode(record: &NativeEvent) -> Result<Self, DecodeError> {
        let raw = match (record.kind, &record.payload) {
            (codes::MOUSEBUTTONDOWN | codes::MOUSEBUTTONUP, NativePayload::MouseButton(raw)) => raw,
            (kind, _) => return Err(DecodeError::unrecognized("mouse button event type", kind)),
        };

        let button = Button::from_code(raw.button)
            .ok_or_else(|| DecodeError::unrecognized("mouse button", raw.button))?;
        let state = match raw.state {
            codes::PRESSED => ButtonState::Pressed,
            codes::RELEASED => ButtonState::Released,
            state => return Err(DecodeError::unrecognized("button state", state)),
        };

        Ok(Self {
            button,
            state,
            clicks: raw.clicks,
            position: Positioni::new(raw.x, raw.y),
        })
    }

    pub fn button(&self) -> Button {
        self.button
    }

    pub fn button_state(&self) -> ButtonState {
        self.state
    }

    /// 1 for a single click, 2 for a double click, and so on
    pub fn clicks_count(&self) -> u8 {
        self.clicks
    }

    pub fn mouse_position(&self) -> Positioni {
        self.position
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelDirection {
    Normal,
    /// Scroll amounts are negated, as with "natural" scrolling
    Flipped,
}

/// The mouse wheel was scrolled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseWheelEvent {
    scroll_amount: Sizei,
    direction: WheelDirection,
}
impl MouseWheelEvent {
    pub fn decode(record: &NativeEvent) -> Result<Self, DecodeError> {
        let raw = match (record.kind, &record.payload) {
            (codes::MOUSEWHEEL, NativePayload::MouseWheel(raw)) => raw,
            (kind, _) => return Err(DecodeError::unrecognized("mouse wheel event type", kind)),
        };

        let direction = match raw.direction {
            codes::wheel::NORMAL => WheelDirection::Normal,
            codes::wheel::FLIPPED => WheelDirection::Flipped,
            direction => return Err(DecodeError::unrecognized("wheel direction", direction)),
        };

        Ok(Self {
            scroll_amount: Sizei::new(raw.x, raw.y),
            direction,
        })
    }

    /// Horizontal scroll as width, vertical scroll as height
    pub fn scroll_amount(&self) -> Sizei {
        self.scroll_amount
    }

    pub fn wheel_direction(&self) -> WheelDirection {
        self.direction
    }
}
