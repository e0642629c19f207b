use std::sync::OnceLock;

use crate::native::{
    codes::{keycode, scancode},
    SharedQueue,
};

/// Keyboard keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    DownArrow,
    UpArrow,
    LeftArrow,
    RightArrow,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Quote,
    Backslash,
    Comma,
    Equals,
    BackQuote,
    NumDivide,
    NumMinus,
    NumMultiply,
    NumPlus,
    NumPeriod,
    LeftBracket,
    Minus,
    NumLock,
    Period,
    RightBracket,
    SemiColon,
    Slash,
    Application,
    Backspace,
    CapsLock,
    Delete,
    End,
    Escape,
    Insert,
    NumEnter,
    LeftAlt,
    LeftCtrl,
    LeftShift,
    PageUp,
    PageDown,
    Pause,
    PrintScreen,
    RightAlt,
    RightCtrl,
    Return,
    RightShift,
    ScrollLock,
    Space,
    Tab,
}

/// Every key with its physical position, in declaration order
const KEYS: &[(Key, u32)] = {
    use Key::*;

    &[
        (A, scancode::A),
        (B, scancode::A + 1),
        (C, scancode::A + 2),
        (D, scancode::A + 3),
        (E, scancode::A + 4),
        (F, scancode::A + 5),
        (G, scancode::A + 6),
        (H, scancode::A + 7),
        (I, scancode::A + 8),
        (J, scancode::A + 9),
        (K, scancode::A + 10),
        (L, scancode::A + 11),
        (M, scancode::A + 12),
        (N, scancode::A + 13),
        (O, scancode::A + 14),
        (P, scancode::A + 15),
        (Q, scancode::A + 16),
        (R, scancode::A + 17),
        (S, scancode::A + 18),
        (T, scancode::A + 19),
        (U, scancode::A + 20),
        (V, scancode::A + 21),
        (W, scancode::A + 22),
        (X, scancode::A + 23),
        (Y, scancode::A + 24),
        (Z, scancode::Z),
        (Zero, scancode::N0),
        (One, scancode::N1),
        (Two, scancode::N1 + 1),
        (Three, scancode::N1 + 2),
        (Four, scancode::N1 + 3),
        (Five, scancode::N1 + 4),
        (Six, scancode::N1 + 5),
        (Seven, scancode::N1 + 6),
        (Eight, scancode::N1 + 7),
        (Nine, scancode::N1 + 8),
        (Num0, scancode::KP_0),
        (Num1, scancode::KP_1),
        (Num2, scancode::KP_1 + 1),
        (Num3, scancode::KP_1 + 2),
        (Num4, scancode::KP_1 + 3),
        (Num5, scancode::KP_1 + 4),
        (Num6, scancode::KP_1 + 5),
        (Num7, scancode::KP_1 + 6),
        (Num8, scancode::KP_1 + 7),
        (Num9, scancode::KP_1 + 8),
        (DownArrow, scancode::DOWN),
        (UpArrow, scancode::UP),
        (LeftArrow, scancode::LEFT),
        (RightArrow, scancode::RIGHT),
        (F1, scancode::F1),
        (F2, scancode::F1 + 1),
        (F3, scancode::F1 + 2),
        (F4, scancode::F1 + 3),
        (F5, scancode::F1 + 4),
        (F6, scancode::F1 + 5),
        (F7, scancode::F1 + 6),
        (F8, scancode::F1 + 7),
        (F9, scancode::F1 + 8),
        (F10, scancode::F1 + 9),
        (F11, scancode::F1 + 10),
        (F12, scancode::F12),
        (Quote, scancode::APOSTROPHE),
        (Backslash, scancode::BACKSLASH),
        (Comma, scancode::COMMA),
        (Equals, scancode::EQUALS),
        (BackQuote, scancode::GRAVE),
        (NumDivide, scancode::KP_DIVIDE),
        (NumMinus, scancode::KP_MINUS),
        (NumMultiply, scancode::KP_MULTIPLY),
        (NumPlus, scancode::KP_PLUS),
        (NumPeriod, scancode::KP_PERIOD),
        (LeftBracket, scancode::LEFTBRACKET),
        (Minus, scancode::MINUS),
        (NumLock, scancode::NUMLOCKCLEAR),
        (Period, scancode::PERIOD),
        (RightBracket, scancode::RIGHTBRACKET),
        (SemiColon, scancode::SEMICOLON),
        (Slash, scancode::SLASH),
        (Application, scancode::APPLICATION),
        (Backspace, scancode::BACKSPACE),
        (CapsLock, scancode::CAPSLOCK),
        (Delete, scancode::DELETE),
        (End, scancode::END),
        (Escape, scancode::ESCAPE),
        (Insert, scancode::INSERT),
        (NumEnter, scancode::KP_ENTER),
        (LeftAlt, scancode::LALT),
        (LeftCtrl, scancode::LCTRL),
        (LeftShift, scancode::LSHIFT),
        (PageUp, scancode::PAGEUP),
        (PageDown, scancode::PAGEDOWN),
        (Pause, scancode::PAUSE),
        (PrintScreen, scancode::PRINTSCREEN),
        (RightAlt, scancode::RALT),
        (RightCtrl, scancode::RCTRL),
        (Return, scancode::RETURN),
        (RightShift, scancode::RSHIFT),
        (ScrollLock, scancode::SCROLLLOCK),
        (Space, scancode::SPACE),
        (Tab, scancode::TAB),
    ]
};

/// Key to scan code, sorted by key
fn scancode_table() -> &'static [(Key, u32)] {
    static TABLE: OnceLock<Vec<(Key, u32)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = KEYS.to_vec();
        table.sort_by_key(|&(key, _)| key);
        table
    })
}

/// Key code to key, sorted by key code
fn keycode_table() -> &'static [(i32, Key)] {
    static TABLE: OnceLock<Vec<(i32, Key)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: Vec<_> = KEYS
            .iter()
            .map(|&(key, code)| (keycode::for_scancode(code), key))
            .collect();
        table.sort_by_key(|&(code, _)| code);
        table
    })
}

impl Key {
    /// Physical position of the key
    pub fn scancode(self) -> u32 {
        let table = scancode_table();
        match table.binary_search_by_key(&self, |&(key, _)| key) {
            Ok(index) => table[index].1,
            Err(_) => 0,
        }
    }

    /// The key a native key code stands for, if it is one we know about
    pub fn from_keycode(code: i32) -> Option<Self> {
        let table = keycode_table();
        table
            .binary_search_by_key(&code, |&(code, _)| code)
            .ok()
            .map(|index| table[index].1)
    }
}

/// Allows to interact with the keyboard
pub struct Keyboard;
impl Keyboard {
    /// `true` if `key` is currently held down
    pub fn is_key_pressed(queue: &SharedQueue, key: Key) -> bool {
        match key.scancode() {
            0 => false,
            code => queue.borrow_mut().key_down(code),
        }
    }
}
