use super::DecodeError;
use crate::{
    input::Key,
    native::{
        codes::{self, kmod},
        NativeEvent, NativePayload, RawKeyboardEvent,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyDirection {
    KeyDown,
    KeyUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Active key modifier.
///
/// The `Any*` flags are set whenever either side of the modifier is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    LeftShift,
    RightShift,
    AnyShift,
    LeftCtrl,
    RightCtrl,
    AnyCtrl,
    LeftAlt,
    RightAlt,
    AnyAlt,
    NumLock,
    CapsLock,
    AltGr,
}

/// Paired modifiers, as (left bit, right bit, left, right, any)
const SIDED: [(u16, u16, Modifier, Modifier, Modifier); 3] = [
    (
        kmod::LSHIFT,
        kmod::RSHIFT,
        Modifier::LeftShift,
        Modifier::RightShift,
        Modifier::AnyShift,
    ),
    (
        kmod::LCTRL,
        kmod::RCTRL,
        Modifier::LeftCtrl,
        Modifier::RightCtrl,
        Modifier::AnyCtrl,
    ),
    (
        kmod::LALT,
        kmod::RALT,
        Modifier::LeftAlt,
        Modifier::RightAlt,
        Modifier::AnyAlt,
    ),
];

const LOCKS: [(u16, Modifier); 3] = [
    (kmod::NUM, Modifier::NumLock),
    (kmod::CAPS, Modifier::CapsLock),
    (kmod::MODE, Modifier::AltGr),
];

/// Decodes a modifier bitmask, left before right before any, then the locks
pub(crate) fn decode_modifiers(bits: u16) -> Vec<Modifier> {
    let mut modifiers = Vec::new();

    for (left_bit, right_bit, left, right, any) in SIDED {
        if bits & left_bit != 0 {
            modifiers.push(left);
        }
        if bits & right_bit != 0 {
            modifiers.push(right);
        }
        if bits & (left_bit | right_bit) != 0 {
            modifiers.push(any);
        }
    }

    for (bit, lock) in LOCKS {
        if bits & bit != 0 {
            modifiers.push(lock);
        }
    }

    modifiers
}

/// A key was pressed or released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    direction: KeyDirection,
    state: KeyState,
    key: Key,
    modifiers: Vec<Modifier>,
    repeat: bool,
}
impl KeyboardEvent {
    pub fn decode(record: &NativeEvent) -> Result<Self, DecodeError> {
        let direction = match record.kind {
            codes::KEYDOWN => KeyDirection::KeyDown,
            codes::KEYUP => KeyDirection::KeyUp,
            kind => return Err(DecodeError::unrecognized("keyboard event type", kind)),
        };
        let NativePayload::Keyboard(raw) = &record.payload else {
            return Err(DecodeError::unrecognized("keyboard event type", record.kind));
        };

        Self::from_raw(direction, raw)
    }

    fn from_raw(direction: KeyDirection, raw: &RawKeyboardEvent) -> Result<Self, DecodeError> {
        let state = match raw.state {
            codes::PRESSED => KeyState::Pressed,
            codes::RELEASED => KeyState::Released,
            state => return Err(DecodeError::unrecognized("key state", state)),
        };
        let key = Key::from_keycode(raw.keycode)
            .ok_or_else(|| DecodeError::unrecognized("key code", raw.keycode))?;

        Ok(Self {
            direction,
            state,
            key,
            modifiers: decode_modifiers(raw.modifiers),
            repeat: raw.repeat != 0,
        })
    }

    pub fn direction(&self) -> KeyDirection {
        self.direction
    }

    pub fn key_state(&self) -> KeyState {
        self.state
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// Active modifiers, in decoding order
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_repeat(&self) -> bool {
        self.repeat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::codes::{keycode, scancode};

    fn record(kind: u32, raw: RawKeyboardEvent) -> NativeEvent {
        NativeEvent::keyboard(1, kind, raw)
    }

    fn key_a() -> RawKeyboardEvent {
        RawKeyboardEvent {
            state: codes::PRESSED,
            repeat: 0,
            scancode: scancode::A,
            keycode: 'a' as i32,
            modifiers: 0,
        }
    }

    #[test]
    fn both_shifts_come_with_any_shift_last() {
        assert_eq!(
            decode_modifiers(kmod::LSHIFT | kmod::RSHIFT),
            [Modifier::LeftShift, Modifier::RightShift, Modifier::AnyShift]
        );
    }

    #[test]
    fn one_side_is_enough_for_any() {
        assert_eq!(
            decode_modifiers(kmod::RCTRL),
            [Modifier::RightCtrl, Modifier::AnyCtrl]
        );
        assert!(decode_modifiers(0).is_empty());
    }

    #[test]
    fn locks_have_no_any_companion() {
        assert_eq!(
            decode_modifiers(kmod::LALT | kmod::CAPS | kmod::MODE),
            [
                Modifier::LeftAlt,
                Modifier::AnyAlt,
                Modifier::CapsLock,
                Modifier::AltGr
            ]
        );
    }

    #[test]
    fn decodes_a_full_record() -> Result<(), DecodeError> {
        let event = KeyboardEvent::decode(&record(
            codes::KEYUP,
            RawKeyboardEvent {
                state: codes::RELEASED,
                repeat: 1,
                modifiers: kmod::NUM,
                ..key_a()
            },
        ))?;

        assert_eq!(event.direction(), KeyDirection::KeyUp);
        assert_eq!(event.key_state(), KeyState::Released);
        assert_eq!(event.key(), Key::A);
        assert!(event.is_repeat());
        assert!(event.has_modifier(Modifier::NumLock));
        assert!(!event.has_modifier(Modifier::AnyShift));
        Ok(())
    }

    #[test]
    fn non_printable_keys_decode_through_the_mask() -> Result<(), DecodeError> {
        let event = KeyboardEvent::decode(&record(
            codes::KEYDOWN,
            RawKeyboardEvent {
                scancode: scancode::UP,
                keycode: keycode::for_scancode(scancode::UP),
                ..key_a()
            },
        ))?;
        assert_eq!(event.key(), Key::UpArrow);
        Ok(())
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let unknown_key = RawKeyboardEvent {
            keycode: 0,
            ..key_a()
        };
        assert_eq!(
            KeyboardEvent::decode(&record(codes::KEYDOWN, unknown_key)),
            Err(DecodeError::unrecognized("key code", 0))
        );

        let unknown_state = RawKeyboardEvent {
            state: 7,
            ..key_a()
        };
        assert!(KeyboardEvent::decode(&record(codes::KEYDOWN, unknown_state)).is_err());

        assert!(KeyboardEvent::decode(&record(codes::MOUSEWHEEL, key_a())).is_err());
    }
}
