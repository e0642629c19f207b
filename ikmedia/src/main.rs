use std::time::Duration;

use ikmedia::{
    audio::{Audio, Sound},
    event::{
        EventHandler, KeyDirection, KeyboardEvent, MouseButtonEvent, MouseMotionEvent,
        QuitEvent, WindowEvent,
    },
    geometry::{Color, Positioni, Recti, Sizei},
    graphics::{Font, Text},
    input::Key,
    render::{FillRectangle, Line, Rectangle},
    window::{Context, Window},
};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
struct Demo {
    running: bool,
    cursor: Positioni,
    clicks: u32,
}
impl EventHandler for Demo {
    fn handle_quit(&mut self, _: &QuitEvent) {
        self.running = false;
    }

    fn handle_window(&mut self, event: &WindowEvent) {
        if let Some(size) = event.resized_to_size() {
            log::debug!("resized to {}x{}", size.width, size.height);
        }
    }

    fn handle_keyboard(&mut self, event: &KeyboardEvent) {
        if event.direction() == KeyDirection::KeyDown && event.key() == Key::Escape {
            self.running = false;
        }
    }

    fn handle_mouse_motion(&mut self, event: &MouseMotionEvent) {
        self.cursor = event.mouse_position();
    }

    fn handle_mouse_button(&mut self, event: &MouseButtonEvent) {
        self.clicks += event.clicks_count() as u32;
    }
}

/// Usage: `ikmedia [font.ttf] [click.wav]`
fn main() -> eyre::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font = args.next().map(|path| Font::from_file(path, 24)).transpose()?;
    #[cfg(feature = "rodio")]
    let audio = Audio::open()?;
    #[cfg(not(feature = "rodio"))]
    let audio = Audio::silent();
    let mut click = args
        .next()
        .map(|path| Sound::load(&audio, path))
        .transpose()?;

    let context = Context::new()?;
    let mut window = Window::with_defaults(&context, "ikmedia", Sizei::new(640, 480))?;

    let mut demo = Demo {
        running: true,
        ..Demo::default()
    };
    let mut text = font.as_ref().map(|font| {
        Text::new(
            font,
            "Sphinx of black quartz, judge my vow",
            Positioni::new(20, 20),
            Color::WHITE,
        )
    });

    while demo.running {
        let clicks = demo.clicks;
        let mut handled = 0;
        loop {
            let event = window.poll_event();
            if !event.is_present() {
                break;
            }
            event.play(&mut demo);
            handled += 1;
        }
        if handled == 0 {
            window.wait_event_timeout(FRAME)?.play(&mut demo);
        }
        if demo.clicks != clicks {
            if let Some(click) = click.as_mut() {
                click.play(0)?;
            }
            if let Some(text) = text.as_mut() {
                text.set_color(if demo.clicks % 2 == 0 {
                    Color::WHITE
                } else {
                    Color::rgb(255, 200, 0)
                });
            }
        }

        window.clear(Color::rgb(16, 16, 24));
        window.draw(&FillRectangle::new(
            Recti::new(demo.cursor.x - 8, demo.cursor.y - 8, 16, 16),
            Color::RED,
        ));
        window.draw(&Rectangle::new(Recti::new(10, 10, 620, 460), Color::GREEN));
        window.draw(&Line::new(
            Positioni::new(0, 479),
            demo.cursor,
            Color::rgba(0, 128, 255, 160),
        ));
        if let Some(text) = text.as_ref() {
            window.draw(text);
        }
        window.display()?;
    }

    log::info!("bye after {} clicks", demo.clicks);
    Ok(())
}
