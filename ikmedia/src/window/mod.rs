//! Windows, and the context they share.

mod context;
mod options;

pub use self::context::Context;
pub use self::options::WindowOptions;

use std::{
    num::NonZeroU32,
    ops::{Deref, DerefMut},
    rc::Rc,
    time::Duration,
};

use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    window::{
        CursorGrabMode, Fullscreen, Window as NativeWindow, WindowBuilder, WindowLevel,
    },
};

use crate::{
    event::{Event, EventPump, EventSupport},
    geometry::{Positioni, Sizei, Sizeu},
    render::{Renderer, RendererOptions},
};

type Surface = softbuffer::Surface<Rc<NativeWindow>, Rc<NativeWindow>>;

/// A window with its own renderer and event pump.
///
/// Dereferences to its [`Renderer`]: draw into it, then [`Window::display`] the frame.
pub struct Window {
    renderer: Renderer,
    surface: Surface,
    window: Rc<NativeWindow>,
    context: Context,
    pump: EventPump,
    id: u32,
}
impl Window {
    /// Shown window with the default renderer, placed wherever the platform likes
    pub fn with_defaults(context: &Context, title: &str, size: Sizei) -> eyre::Result<Self> {
        Self::new(
            context,
            title,
            size,
            WindowOptions::DEFAULT,
            RendererOptions::DEFAULT,
            None,
        )
    }

    pub fn new(
        context: &Context,
        title: &str,
        size: Sizei,
        options: WindowOptions,
        renderer_options: RendererOptions,
        position: Option<Positioni>,
    ) -> eyre::Result<Self> {
        eyre::ensure!(
            size.width > 0 && size.height > 0,
            "window size {size:?} must be positive"
        );

        let window = {
            let queue = context.native().borrow();
            let target = queue.target();

            let mut builder = WindowBuilder::new()
                .with_title(title)
                .with_inner_size(PhysicalSize::new(size.width as u32, size.height as u32))
                .with_visible(!options.hidden)
                .with_decorations(!options.borderless)
                .with_resizable(options.resizable)
                .with_maximized(options.maximized)
                .with_active(options.input_focus || !options.hidden);
            if let Some(position) = position {
                builder = builder.with_position(PhysicalPosition::new(position.x, position.y));
            }
            if options.always_on_top {
                builder = builder.with_window_level(WindowLevel::AlwaysOnTop);
            }
            if options.fullscreen {
                let mode = target
                    .primary_monitor()
                    .and_then(|monitor| monitor.video_modes().next());
                builder = builder.with_fullscreen(Some(match mode {
                    Some(mode) => Fullscreen::Exclusive(mode),
                    None => Fullscreen::Borderless(None),
                }));
            } else if options.fullscreen_desktop {
                builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            builder
                .build(target)
                .map_err(|error| eyre::eyre!("creating window {title:?}: {error}"))?
        };

        if options.minimized {
            window.set_minimized(true);
        }
        if options.input_grabbed {
            if let Err(error) = window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
            {
                log::warn!("couldn't grab the cursor for {title:?}: {error}");
            }
        }

        let window = Rc::new(window);
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|surface_context| Surface::new(&surface_context, window.clone()))
            .map_err(|error| eyre::eyre!("creating a surface for window {title:?}: {error}"))?;

        let id = context.native().borrow_mut().register(window.id());
        let inner = window.inner_size();
        log::info!(
            "opened window {id} {title:?} ({}x{})",
            inner.width,
            inner.height
        );

        Ok(Self {
            renderer: Renderer::new(Sizeu::new(inner.width, inner.height), renderer_options),
            surface,
            window,
            context: context.clone(),
            pump: EventPump::new(context.queue(), id, EventSupport::ALL),
            id,
        })
    }

    /// Identifier carried by native events addressed to this window
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Next event for this window, every category enabled; empty if there is none
    pub fn poll_event(&self) -> Event {
        self.pump.poll()
    }

    /// Blocks until an event for this window arrives
    pub fn wait_event(&self) -> eyre::Result<Event> {
        self.pump.wait()
    }

    pub fn wait_event_timeout(&self, timeout: Duration) -> eyre::Result<Event> {
        self.pump.wait_timeout(timeout)
    }

    /// A pump for this window that only decodes the categories in `support`
    pub fn event_pump(&self, support: EventSupport) -> EventPump {
        EventPump::new(self.context.queue(), self.id, support)
    }

    /// Presents the frame drawn so far.
    ///
    /// When the window was resized since the last frame, the frame is cropped to the
    /// new size and the renderer's canvas follows the window for the next one.
    pub fn display(&mut self) -> eyre::Result<()> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(|error| eyre::eyre!("resizing the window surface: {error}"))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|error| eyre::eyre!("getting the window buffer: {error}"))?;

        let canvas = self.renderer.canvas();
        let source_width = canvas.size().width as usize;
        let target_width = size.width as usize;
        let copied_width = source_width.min(target_width);
        let copied_rows = (canvas.size().height as usize).min(size.height as usize);

        buffer.fill(0);
        for row in 0..copied_rows {
            let source = &canvas.pixels()[row * source_width..][..copied_width];
            buffer[row * target_width..][..copied_width].copy_from_slice(source);
        }

        self.window.pre_present_notify();
        buffer
            .present()
            .map_err(|error| eyre::eyre!("presenting the frame: {error}"))?;

        let size = Sizeu::new(size.width, size.height);
        if self.renderer.canvas().size() != size {
            log::debug!("window {} resized to {}x{}", self.id, size.width, size.height);
            self.renderer.resize(size);
        }
        Ok(())
    }

    pub fn position(&self) -> Positioni {
        match self.window.outer_position() {
            Ok(position) => Positioni::new(position.x, position.y),
            Err(_) => Positioni::default(),
        }
    }

    pub fn size(&self) -> Sizei {
        let size = self.window.inner_size();
        Sizei::new(size.width as i32, size.height as i32)
    }

    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// The underlying winit window
    pub fn native(&self) -> &NativeWindow {
        &self.window
    }
}

impl Deref for Window {
    type Target = Renderer;

    fn deref(&self) -> &Self::Target {
        &self.renderer
    }
}
impl DerefMut for Window {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.renderer
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Ok(mut queue) = self.context.native().try_borrow_mut() {
            queue.unregister(self.window.id());
        }
        log::info!("closed window {}", self.id);
    }
}
