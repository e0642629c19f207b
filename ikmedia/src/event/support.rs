use super::EventCategory;

/// Which event categories a pump decodes.
///
/// Records of a disabled category are dropped before any decoding happens.
/// Quit events are always enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventSupport {
    window: bool,
    keyboard: bool,
    mouse_motion: bool,
    mouse_button: bool,
    mouse_wheel: bool,
}
impl EventSupport {
    pub const ALL: Self = Self::from_categories(&[
        EventCategory::Window,
        EventCategory::Keyboard,
        EventCategory::MouseMotion,
        EventCategory::MouseButton,
        EventCategory::MouseWheel,
    ]);

    /// Nothing but quit events
    pub const NONE: Self = Self::from_categories(&[]);

    pub const fn from_categories(categories: &[EventCategory]) -> Self {
        let mut support = Self {
            window: false,
            keyboard: false,
            mouse_motion: false,
            mouse_button: false,
            mouse_wheel: false,
        };

        // Iterators aren't available in const fn
        let mut index = 0;
        while index < categories.len() {
            match categories[index] {
                EventCategory::Quit => (),
                EventCategory::Window => support.window = true,
                EventCategory::Keyboard => support.keyboard = true,
                EventCategory::MouseMotion => support.mouse_motion = true,
                EventCategory::MouseButton => support.mouse_button = true,
                EventCategory::MouseWheel => support.mouse_wheel = true,
            }
            index += 1;
        }

        support
    }

    pub const fn is_enabled(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::Quit => true,
            EventCategory::Window => self.window,
            EventCategory::Keyboard => self.keyboard,
            EventCategory::MouseMotion => self.mouse_motion,
            EventCategory::MouseButton => self.mouse_button,
            EventCategory::MouseWheel => self.mouse_wheel,
        }
    }

    pub const fn window(&self) -> bool {
        self.window
    }
    pub const fn keyboard(&self) -> bool {
        self.keyboard
    }
    pub const fn mouse_motion(&self) -> bool {
        self.mouse_motion
    }
    pub const fn mouse_button(&self) -> bool {
        self.mouse_button
    }
    pub const fn mouse_wheel(&self) -> bool {
        self.mouse_wheel
    }
}
impl Default for EventSupport {
    fn default() -> Self {
        Self::ALL
    }
}
