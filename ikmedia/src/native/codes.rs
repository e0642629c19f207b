//! Integer code spaces carried by native event records.
//!
//! The numbering is the classic multimedia-library one, so records produced by a
//! platform shim and records written by hand in tests mean the same thing.
//! Nothing here is ordered in a useful way; decoding goes through sorted tables.

// Event types
pub const QUIT: u32 = 0x100;
pub const WINDOWEVENT: u32 = 0x200;
pub const KEYDOWN: u32 = 0x300;
pub const KEYUP: u32 = 0x301;
pub const MOUSEMOTION: u32 = 0x400;
pub const MOUSEBUTTONDOWN: u32 = 0x401;
pub const MOUSEBUTTONUP: u32 = 0x402;
pub const MOUSEWHEEL: u32 = 0x403;

// Key and button states
pub const RELEASED: u8 = 0;
pub const PRESSED: u8 = 1;

/// Window sub-event codes
pub mod window {
    pub const SHOWN: u8 = 1;
    pub const HIDDEN: u8 = 2;
    pub const EXPOSED: u8 = 3;
    pub const MOVED: u8 = 4;
    pub const RESIZED: u8 = 5;
    pub const SIZE_CHANGED: u8 = 6;
    pub const MINIMIZED: u8 = 7;
    pub const MAXIMIZED: u8 = 8;
    pub const RESTORED: u8 = 9;
    pub const ENTER: u8 = 10;
    pub const LEAVE: u8 = 11;
    pub const FOCUS_GAINED: u8 = 12;
    pub const FOCUS_LOST: u8 = 13;
    pub const CLOSE: u8 = 14;
    pub const TAKE_FOCUS: u8 = 15;
    pub const HIT_TEST: u8 = 16;
}

/// Keyboard modifier bits
pub mod kmod {
    pub const LSHIFT: u16 = 0x0001;
    pub const RSHIFT: u16 = 0x0002;
    pub const LCTRL: u16 = 0x0040;
    pub const RCTRL: u16 = 0x0080;
    pub const LALT: u16 = 0x0100;
    pub const RALT: u16 = 0x0200;
    pub const LGUI: u16 = 0x0400;
    pub const RGUI: u16 = 0x0800;
    pub const NUM: u16 = 0x1000;
    pub const CAPS: u16 = 0x2000;
    pub const MODE: u16 = 0x4000;
}

/// Mouse button codes
pub mod button {
    pub const LEFT: u8 = 1;
    pub const MIDDLE: u8 = 2;
    pub const RIGHT: u8 = 3;
    pub const X1: u8 = 4;
    pub const X2: u8 = 5;

    /// Bit of `button` in a button state mask, `None` for codes a mask can't hold
    pub const fn mask(button: u8) -> Option<u32> {
        match button {
            1..=32 => Some(1 << (button - 1)),
            _ => None,
        }
    }
}

/// Mouse wheel direction codes
pub mod wheel {
    pub const NORMAL: u32 = 0;
    pub const FLIPPED: u32 = 1;
}

/// Physical key positions
pub mod scancode {
    pub const A: u32 = 4;
    // B..=Z follow A
    pub const Z: u32 = 29;
    pub const N1: u32 = 30;
    // N2..=N9 follow N1
    pub const N0: u32 = 39;
    pub const RETURN: u32 = 40;
    pub const ESCAPE: u32 = 41;
    pub const BACKSPACE: u32 = 42;
    pub const TAB: u32 = 43;
    pub const SPACE: u32 = 44;
    pub const MINUS: u32 = 45;
    pub const EQUALS: u32 = 46;
    pub const LEFTBRACKET: u32 = 47;
    pub const RIGHTBRACKET: u32 = 48;
    pub const BACKSLASH: u32 = 49;
    pub const SEMICOLON: u32 = 51;
    pub const APOSTROPHE: u32 = 52;
    pub const GRAVE: u32 = 53;
    pub const COMMA: u32 = 54;
    pub const PERIOD: u32 = 55;
    pub const SLASH: u32 = 56;
    pub const CAPSLOCK: u32 = 57;
    pub const F1: u32 = 58;
    // F2..=F12 follow F1
    pub const F12: u32 = 69;
    pub const PRINTSCREEN: u32 = 70;
    pub const SCROLLLOCK: u32 = 71;
    pub const PAUSE: u32 = 72;
    pub const INSERT: u32 = 73;
    pub const HOME: u32 = 74;
    pub const PAGEUP: u32 = 75;
    pub const DELETE: u32 = 76;
    pub const END: u32 = 77;
    pub const PAGEDOWN: u32 = 78;
    pub const RIGHT: u32 = 79;
    pub const LEFT: u32 = 80;
    pub const DOWN: u32 = 81;
    pub const UP: u32 = 82;
    pub const NUMLOCKCLEAR: u32 = 83;
    pub const KP_DIVIDE: u32 = 84;
    pub const KP_MULTIPLY: u32 = 85;
    pub const KP_MINUS: u32 = 86;
    pub const KP_PLUS: u32 = 87;
    pub const KP_ENTER: u32 = 88;
    pub const KP_1: u32 = 89;
    // KP_2..=KP_9 follow KP_1
    pub const KP_0: u32 = 98;
    pub const KP_PERIOD: u32 = 99;
    pub const APPLICATION: u32 = 101;
    pub const LCTRL: u32 = 224;
    pub const LSHIFT: u32 = 225;
    pub const LALT: u32 = 226;
    pub const LGUI: u32 = 227;
    pub const RCTRL: u32 = 228;
    pub const RSHIFT: u32 = 229;
    pub const RALT: u32 = 230;
    pub const RGUI: u32 = 231;

    /// Size of a keyboard state table indexed by scan code
    pub const COUNT: usize = 512;
}

/// Logical key codes
pub mod keycode {
    use super::scancode;

    /// Key codes without a printable character are their scan code with this bit set
    pub const SCANCODE_MASK: i32 = 1 << 30;

    pub const RETURN: i32 = '\r' as i32;
    pub const ESCAPE: i32 = 0x1b;
    pub const BACKSPACE: i32 = 0x08;
    pub const TAB: i32 = '\t' as i32;
    pub const SPACE: i32 = ' ' as i32;
    pub const QUOTE: i32 = '\'' as i32;
    pub const COMMA: i32 = ',' as i32;
    pub const MINUS: i32 = '-' as i32;
    pub const PERIOD: i32 = '.' as i32;
    pub const SLASH: i32 = '/' as i32;
    pub const SEMICOLON: i32 = ';' as i32;
    pub const EQUALS: i32 = '=' as i32;
    pub const LEFTBRACKET: i32 = '[' as i32;
    pub const BACKSLASH: i32 = '\\' as i32;
    pub const RIGHTBRACKET: i32 = ']' as i32;
    pub const BACKQUOTE: i32 = '`' as i32;
    pub const DELETE: i32 = 0x7f;

    pub const fn from_scancode(code: u32) -> i32 {
        code as i32 | SCANCODE_MASK
    }

    /// Key code produced by a scan code on a US layout
    pub const fn for_scancode(code: u32) -> i32 {
        match code {
            scancode::A..=scancode::Z => 'a' as i32 + (code - scancode::A) as i32,
            scancode::N1..=38 => '1' as i32 + (code - scancode::N1) as i32,
            scancode::N0 => '0' as i32,
            scancode::RETURN => RETURN,
            scancode::ESCAPE => ESCAPE,
            scancode::BACKSPACE => BACKSPACE,
            scancode::TAB => TAB,
            scancode::SPACE => SPACE,
            scancode::MINUS => MINUS,
            scancode::EQUALS => EQUALS,
            scancode::LEFTBRACKET => LEFTBRACKET,
            scancode::RIGHTBRACKET => RIGHTBRACKET,
            scancode::BACKSLASH => BACKSLASH,
            scancode::SEMICOLON => SEMICOLON,
            scancode::APOSTROPHE => QUOTE,
            scancode::GRAVE => BACKQUOTE,
            scancode::COMMA => COMMA,
            scancode::PERIOD => PERIOD,
            scancode::SLASH => SLASH,
            scancode::DELETE => DELETE,
            _ => from_scancode(code),
        }
    }
}
