use crate::{
    geometry::Positioni,
    native::{codes::button, SharedQueue},
};

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Middle,
    Right,
    X1,
    X2,
}
impl Button {
    pub fn code(self) -> u8 {
        match self {
            Self::Left => button::LEFT,
            Self::Middle => button::MIDDLE,
            Self::Right => button::RIGHT,
            Self::X1 => button::X1,
            Self::X2 => button::X2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            button::LEFT => Some(Self::Left),
            button::MIDDLE => Some(Self::Middle),
            button::RIGHT => Some(Self::Right),
            button::X1 => Some(Self::X1),
            button::X2 => Some(Self::X2),
            _ => None,
        }
    }
}

/// Allows to interact with the mouse
pub struct Mouse;
impl Mouse {
    pub fn is_button_pressed(queue: &SharedQueue, pressed: Button) -> bool {
        let state = queue.borrow_mut().mouse_state();
        button::mask(pressed.code()).is_some_and(|mask| state.buttons & mask != 0)
    }

    /// Cursor position, relative to the window that has the mouse focus
    pub fn position(queue: &SharedQueue) -> Positioni {
        let state = queue.borrow_mut().mouse_state();
        Positioni::new(state.x, state.y)
    }
}
