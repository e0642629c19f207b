use super::{Canvas, Drawable, Texture};
use crate::geometry::{Color, Recti, Sizei, Sizeu};

/// How a renderer is set up.
///
/// Built fluently from [`RendererOptions::NONE`]; every method returns a new value.
/// Presentation always goes through a CPU buffer, so `software` and `accelerated` only
/// record the caller's preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RendererOptions {
    software: bool,
    accelerated: bool,
    vsync: bool,
    target_texture: bool,
}
impl RendererOptions {
    pub const NONE: Self = Self {
        software: false,
        accelerated: false,
        vsync: false,
        target_texture: false,
    };
    pub const DEFAULT: Self = Self::NONE.accelerated();

    pub const fn software(self) -> Self {
        Self {
            software: true,
            ..self
        }
    }
    pub const fn accelerated(self) -> Self {
        Self {
            accelerated: true,
            ..self
        }
    }
    /// Present in step with the display refresh, where the platform allows it
    pub const fn vsync(self) -> Self {
        Self { vsync: true, ..self }
    }
    /// Allow taking the rendered frame back as a texture
    pub const fn target_texture(self) -> Self {
        Self {
            target_texture: true,
            ..self
        }
    }

    pub const fn is_software(&self) -> bool {
        self.software
    }
    pub const fn is_accelerated(&self) -> bool {
        self.accelerated
    }
    pub const fn has_vsync(&self) -> bool {
        self.vsync
    }
    pub const fn has_target_texture(&self) -> bool {
        self.target_texture
    }
}

/// Draws into a canvas the size of its window
#[derive(Debug, Clone)]
pub struct Renderer {
    canvas: Canvas,
    options: RendererOptions,
}
impl Renderer {
    pub fn new(size: Sizeu, options: RendererOptions) -> Self {
        log::debug!("creating {}x{} renderer with {options:?}", size.width, size.height);
        Self {
            canvas: Canvas::new(size),
            options,
        }
    }

    pub fn options(&self) -> RendererOptions {
        self.options
    }

    /// Fills the whole frame with `color`, which becomes the draw color
    pub fn clear(&mut self, color: Color) {
        self.canvas.set_draw_color(color);
        self.canvas.clear();
    }

    pub fn draw<D: Drawable + ?Sized>(&mut self, drawable: &D) {
        drawable.draw(&mut self.canvas);
    }

    pub fn set_viewport(&mut self, viewport: Recti) {
        self.canvas.set_viewport(Some(viewport));
    }

    pub fn reset_viewport(&mut self) {
        self.canvas.set_viewport(None);
    }

    pub fn viewport(&self) -> Recti {
        self.canvas.viewport()
    }

    /// Follows a window resize; the frame is lost
    pub fn resize(&mut self, size: Sizeu) {
        self.canvas.resize(size);
    }

    /// The current frame as a texture.
    /// Requires [`RendererOptions::target_texture`].
    pub fn snapshot(&self) -> eyre::Result<Texture> {
        eyre::ensure!(
            self.options.has_target_texture(),
            "renderer was not created with target texture support"
        );

        let size = self.canvas.size();
        Texture::from_pixels(
            Sizei::new(size.width as i32, size.height as i32),
            self.canvas.colors(),
        )
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }
}
