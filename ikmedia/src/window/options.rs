/// How a window starts out.
///
/// Built fluently from [`WindowOptions::NONE`]; every method returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowOptions {
    pub(super) fullscreen: bool,
    pub(super) fullscreen_desktop: bool,
    pub(super) hidden: bool,
    pub(super) borderless: bool,
    pub(super) resizable: bool,
    pub(super) minimized: bool,
    pub(super) maximized: bool,
    pub(super) input_grabbed: bool,
    pub(super) input_focus: bool,
    pub(super) always_on_top: bool,
}
impl WindowOptions {
    pub const NONE: Self = Self {
        fullscreen: false,
        fullscreen_desktop: false,
        hidden: false,
        borderless: false,
        resizable: false,
        minimized: false,
        maximized: false,
        input_grabbed: false,
        input_focus: false,
        always_on_top: false,
    };
    pub const DEFAULT: Self = Self::NONE.shown();

    /// Exclusive fullscreen, in the monitor's first video mode
    pub const fn fullscreen(self) -> Self {
        Self {
            fullscreen: true,
            ..self
        }
    }
    /// Borderless fullscreen at the desktop resolution
    pub const fn fullscreen_desktop(self) -> Self {
        Self {
            fullscreen_desktop: true,
            ..self
        }
    }
    pub const fn shown(self) -> Self {
        Self {
            hidden: false,
            ..self
        }
    }
    pub const fn hidden(self) -> Self {
        Self {
            hidden: true,
            ..self
        }
    }
    pub const fn borderless(self) -> Self {
        Self {
            borderless: true,
            ..self
        }
    }
    pub const fn resizable(self) -> Self {
        Self {
            resizable: true,
            ..self
        }
    }
    pub const fn minimized(self) -> Self {
        Self {
            minimized: true,
            ..self
        }
    }
    pub const fn maximized(self) -> Self {
        Self {
            maximized: true,
            ..self
        }
    }
    /// Confine the cursor to the window
    pub const fn input_grabbed(self) -> Self {
        Self {
            input_grabbed: true,
            ..self
        }
    }
    pub const fn input_focus(self) -> Self {
        Self {
            input_focus: true,
            ..self
        }
    }
    pub const fn always_on_top(self) -> Self {
        Self {
            always_on_top: true,
            ..self
        }
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }
    pub const fn is_resizable(&self) -> bool {
        self.resizable
    }
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen || self.fullscreen_desktop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaining_leaves_the_base_untouched() {
        const BASE: WindowOptions = WindowOptions::DEFAULT;
        let resizable = BASE.resizable().borderless();

        assert!(!BASE.is_resizable());
        assert!(resizable.is_resizable());
        assert!(resizable.borderless);
        assert!(!resizable.is_hidden());
    }

    #[test]
    fn shown_undoes_hidden() {
        assert!(WindowOptions::NONE.hidden().is_hidden());
        assert!(!WindowOptions::NONE.hidden().shown().is_hidden());
    }
}
