use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{Context, Result};

use crate::coords::Vec2;
use crate::input::InputEvent;
use crate::paint::Color;
use crate::scene::{SceneBuffer, Shape, CIRCLE_SIDES, LINE_THICKNESS};
use crate::text::{load_font, DEFAULT_FONT_PATH};
use crate::view::Viewport;
use crate::window::run_render_loop;

/// Caller-supplied handler for translated window events.
pub type EventHandler = Box<dyn FnMut(&InputEvent) + Send>;

/// Caller-supplied handler for submitted console commands.
pub type CommandHandler = Box<dyn FnMut(&str) + Send>;

/// Surface configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    /// Initial window size in pixels.
    pub width: u32,
    pub height: u32,
    /// Font asset used by the console overlay; loaded (fatally) at
    /// construction.
    pub font_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "glint".to_string(),
            width: 800,
            height: 600,
            font_path: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

/// View state shared between the render thread (writer) and
/// [`Visualization::get_mouse_pos`] (reader).
pub(crate) struct ViewState {
    pub viewport: Viewport,
    /// Last pointer position in window pixels, if the pointer has entered.
    pub cursor_px: Option<Vec2>,
}

#[derive(Default)]
pub(crate) struct Handlers {
    pub event: Mutex<Option<EventHandler>>,
    pub command: Mutex<Option<CommandHandler>>,
}

/// State shared between the producer facade and the render thread.
pub(crate) struct Shared {
    /// Cleared by `Drop` (teardown) or by the render loop itself (window
    /// closed / loop failure).
    pub running: AtomicBool,
    pub view: Mutex<ViewState>,
    pub handlers: Handlers,
}

/// An interactive 2D visualization surface.
///
/// Construction opens a window on a dedicated render thread that continuously
/// redraws the most recently published shapes. The owning (producer) thread
/// stages shapes with the `add_*` family and publishes a frame's worth
/// atomically with [`flip`]; the render loop keeps redrawing the same
/// published set until the next flip, and drops it only on teardown.
///
/// All `add_*` calls and `flip` belong to the single producer thread; the
/// window and GPU are touched only by the render thread.
///
/// ```no_run
/// use glint_engine::{Color, Vec2, Visualization};
///
/// let mut visu = Visualization::new(800, 600)?;
/// visu.add_circle(Vec2::new(10.0, 10.0), 8.0, Color::RED);
/// visu.add_line(Vec2::new(10.0, 10.0), Vec2::new(30.0, 40.0), Color::BLUE);
/// visu.flip();
/// # anyhow::Ok(())
/// ```
///
/// [`flip`]: Visualization::flip
pub struct Visualization {
    scene: SceneBuffer,
    shared: Arc<Shared>,
    render_thread: Option<JoinHandle<()>>,
}

impl Visualization {
    /// Opens a `width × height` window titled with a live FPS readout.
    ///
    /// Fails when the console font asset is missing or unparseable; the
    /// render thread is not started in that case.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_config(Config {
            width,
            height,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let font = load_font(&config.font_path)?;

        let scene = SceneBuffer::new();
        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            view: Mutex::new(ViewState {
                viewport: Viewport::new(Vec2::new(config.width as f32, config.height as f32)),
                cursor_px: None,
            }),
            handlers: Handlers::default(),
        });

        let shapes = scene.visible_handle();
        let thread_shared = Arc::clone(&shared);
        let render_thread = std::thread::Builder::new()
            .name("glint-render".to_string())
            .spawn(move || run_render_loop(config, font, shapes, thread_shared))
            .context("failed to spawn render thread")?;

        Ok(Self {
            scene,
            shared,
            render_thread: Some(render_thread),
        })
    }

    /// True until teardown begins or the user closes the window.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    // ── scene staging ─────────────────────────────────────────────────────

    /// Stages an arbitrary drawable shape.
    pub fn add_shape(&mut self, shape: Shape) {
        self.scene.push(shape);
    }

    /// Stages a circle (a 20-sided N-gon) of the given diameter.
    pub fn add_circle(&mut self, pos: Vec2, diameter: f32, color: Color) {
        self.add_ngon(pos, diameter, color, CIRCLE_SIDES);
    }

    /// Stages a regular polygon inscribed in a `diameter` circle.
    pub fn add_ngon(&mut self, pos: Vec2, diameter: f32, color: Color, sides: u32) {
        self.scene.push(Shape::circle(pos, diameter, color, sides));
    }

    /// Stages an upward-pointing triangle (3-sided circle).
    pub fn add_triangle(&mut self, pos: Vec2, diameter: f32, color: Color) {
        self.scene.push(Shape::triangle(pos, diameter, color));
    }

    /// Stages a diamond (4-sided circle).
    pub fn add_diamond(&mut self, pos: Vec2, diameter: f32, color: Color) {
        self.scene.push(Shape::diamond(pos, diameter, color));
    }

    /// Stages an axis-aligned rectangle centered on `pos`.
    pub fn add_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.scene.push(Shape::rect(pos, size, color));
    }

    /// Stages a line segment drawn as a thin rectangle of the default
    /// thickness. Use [`add_shape`] with [`Shape::line`] for a custom one.
    ///
    /// [`add_shape`]: Visualization::add_shape
    pub fn add_line(&mut self, p1: Vec2, p2: Vec2, color: Color) {
        self.scene.push(Shape::line(p1, p2, color, LINE_THICKNESS));
    }

    /// Publishes everything staged since the previous flip as the new visible
    /// scene. The render loop picks it up on its next frame.
    pub fn flip(&mut self) {
        self.scene.flip();
    }

    // ── input hooks ───────────────────────────────────────────────────────

    /// Installs the event handler. Intended to be set once, before the first
    /// frames are produced.
    pub fn set_event_handler(&self, handler: impl FnMut(&InputEvent) + Send + 'static) {
        *self.shared.handlers.event.lock().unwrap() = Some(Box::new(handler));
    }

    /// Installs the console command handler. Intended to be set once.
    pub fn set_command_handler(&self, handler: impl FnMut(&str) + Send + 'static) {
        *self.shared.handlers.command.lock().unwrap() = Some(Box::new(handler));
    }

    /// Current pointer position in world coordinates, through the live view
    /// transform. Returns the view center while the pointer has not entered
    /// the window yet.
    pub fn get_mouse_pos(&self) -> Vec2 {
        let view = self.shared.view.lock().unwrap();
        match view.cursor_px {
            Some(px) => view.viewport.pixel_to_world(px),
            None => view.viewport.center(),
        }
    }
}

impl Drop for Visualization {
    /// Signals the render loop to stop and joins it; bounded by roughly one
    /// frame, since the loop re-checks the flag every iteration.
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.render_thread.take() {
            if handle.join().is_err() {
                log::error!("render thread panicked during shutdown");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_is_a_construction_error() {
        let err = Visualization::with_config(Config {
            font_path: PathBuf::from("definitely/not/a/font.ttf"),
            ..Config::default()
        })
        .err()
        .expect("construction must fail without the font asset");
        assert!(err.to_string().contains("font"));
    }
}
