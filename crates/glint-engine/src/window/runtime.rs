use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::NamedKey;
use winit::window::{Window, WindowId};

use crate::console::Console;
use crate::coords::Vec2;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{ButtonState, InputEvent, Key, KeyState, MouseButton, WheelDelta};
use crate::paint::Color;
use crate::render::{tessellate_into, tessellate_visible, ShapeRenderer, ShapeVertex, TextRenderer, ViewSlot};
use crate::scene::{Shape, VisibleShapes};
use crate::time::FrameClock;
use crate::view::pixel_proj;
use crate::viz::{Config, Shared};

/// Pixel-precision wheel deltas are converted to notches at this rate.
const PIXELS_PER_LINE: f32 = 20.0;

/// Console overlay metrics (window pixels).
const CONSOLE_BAR_HEIGHT: f32 = 20.0;
const CONSOLE_TEXT_SIZE: f32 = 14.0;
const CONSOLE_TEXT_ORIGIN: Vec2 = Vec2::new(10.0, 2.0);

/// Entry point of the render thread.
///
/// Blocks inside the winit loop until the running flag clears or the user
/// closes the window, then clears the flag so the producer side can observe
/// either way of stopping.
pub(crate) fn run_render_loop(
    config: Config,
    font: fontdue::Font,
    shapes: VisibleShapes,
    shared: Arc<Shared>,
) {
    let result = build_event_loop().and_then(|event_loop| {
        event_loop.set_control_flow(ControlFlow::Poll);
        let mut app = RenderLoop::new(config, font, shapes, Arc::clone(&shared));
        event_loop
            .run_app(&mut app)
            .context("event loop terminated with error")
    });

    if let Err(e) = result {
        log::error!("render loop failed: {e:#}");
    }
    shared.running.store(false, Ordering::SeqCst);
}

/// Builds the event loop for a non-main thread.
///
/// Supported on X11/Wayland and Windows via the platform extensions; other
/// platforms require the loop on the main thread and will refuse here.
fn build_event_loop() -> Result<EventLoop<()>> {
    #[cfg(target_os = "linux")]
    use winit::platform::x11::EventLoopBuilderExtX11 as _;
    #[cfg(target_os = "windows")]
    use winit::platform::windows::EventLoopBuilderExtWindows as _;

    let mut builder = EventLoop::builder();
    #[cfg(any(target_os = "linux", target_os = "windows"))]
    builder.with_any_thread(true);
    builder.build().context("failed to create event loop")
}

struct RenderLoop {
    config: Config,
    font: fontdue::Font,
    shapes: VisibleShapes,
    shared: Arc<Shared>,

    window: Option<Arc<Window>>,
    gpu: Option<Gpu>,

    shape_renderer: ShapeRenderer,
    text_renderer: TextRenderer,
    console: Console,
    clock: FrameClock,

    /// Scratch buffers reused across frames.
    scene_verts: Vec<ShapeVertex>,
    overlay_verts: Vec<ShapeVertex>,
}

impl RenderLoop {
    fn new(config: Config, font: fontdue::Font, shapes: VisibleShapes, shared: Arc<Shared>) -> Self {
        Self {
            config,
            font,
            shapes,
            shared,
            window: None,
            gpu: None,
            shape_renderer: ShapeRenderer::new(),
            text_renderer: TextRenderer::new(),
            console: Console::new(),
            clock: FrameClock::new(),
            scene_verts: Vec::new(),
            overlay_verts: Vec::new(),
        }
    }

    fn stopped(&self) -> bool {
        !self.shared.running.load(Ordering::SeqCst)
    }

    /// The surface's own reaction to an event, before it is forwarded.
    fn handle_input(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                ..
            } => match key {
                // Toggle and submit are independent bindings.
                Key::Char('`') => self.console.toggle(),
                Key::Enter => {
                    if let Some(command) = self.console.submit() {
                        let mut slot = self.shared.handlers.command.lock().unwrap();
                        if let Some(handler) = slot.as_mut() {
                            handler(&command);
                        }
                    }
                }
                _ => {}
            },

            InputEvent::Text(text) => self.console.input(text),

            InputEvent::Wheel(delta) => {
                let notches = match *delta {
                    WheelDelta::Line { y, .. } => y,
                    WheelDelta::Pixel { y, .. } => y / PIXELS_PER_LINE,
                };
                self.shared.view.lock().unwrap().viewport.zoom(notches);
            }

            InputEvent::PointerMoved(px) => {
                let mut view = self.shared.view.lock().unwrap();
                view.cursor_px = Some(*px);
                view.viewport.drag_to(*px);
            }

            InputEvent::PointerButton {
                button: MouseButton::Right,
                state,
                pos,
            } => {
                let mut view = self.shared.view.lock().unwrap();
                match state {
                    ButtonState::Pressed => view.viewport.start_drag(*pos),
                    ButtonState::Released => view.viewport.end_drag(),
                }
            }

            _ => {}
        }
    }

    /// Forwards a translated event to the caller's handler, if one is set.
    fn forward(&self, ev: &InputEvent) {
        let mut slot = self.shared.handlers.event.lock().unwrap();
        if let Some(handler) = slot.as_mut() {
            handler(ev);
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(new_size);
        }
        let window_px = Vec2::new(new_size.width as f32, new_size.height as f32);
        self.shared.view.lock().unwrap().viewport.rescale(window_px);
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.as_ref() else { return };

        let dt = self.clock.tick();
        window.set_title(&format!("{}  FPS: {}", self.config.title, FrameClock::fps(dt)));

        let mut frame = {
            let Some(gpu) = self.gpu.as_mut() else { return };
            match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal => {
                            log::error!("fatal surface error; shutting down");
                            event_loop.exit();
                        }
                        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {}
                    }
                    return;
                }
            }
        };

        // Draw pass: cull and tessellate the published scene while holding
        // its lock, so a concurrent flip can never interleave.
        let view_proj = {
            let view = self.shared.view.lock().unwrap();
            let world_box = view.viewport.world_box();
            {
                let shapes = self.shapes.lock().unwrap();
                tessellate_visible(&shapes, world_box, &mut self.scene_verts);
            }
            view.viewport.view_proj()
        };

        let Some(gpu) = self.gpu.as_ref() else { return };
        self.shape_renderer.render(
            gpu,
            &mut frame.encoder,
            &frame.view,
            &self.scene_verts,
            view_proj,
            ViewSlot::World,
            Some(wgpu::Color::BLACK),
        );

        // Console overlay in fixed screen space.
        if self.console.active() {
            let size = gpu.size();
            let (w, h) = (size.width as f32, size.height as f32);

            self.overlay_verts.clear();
            let bar = Shape::rect(
                Vec2::new(w / 2.0, CONSOLE_BAR_HEIGHT / 2.0),
                Vec2::new(w, CONSOLE_BAR_HEIGHT),
                Color::WHITE,
            );
            tessellate_into(&bar, &mut self.overlay_verts);

            self.shape_renderer.render(
                gpu,
                &mut frame.encoder,
                &frame.view,
                &self.overlay_verts,
                pixel_proj(w, h),
                ViewSlot::Overlay,
                None,
            );

            self.text_renderer.render(
                gpu,
                &mut frame.encoder,
                &frame.view,
                &self.font,
                self.console.buffer(),
                CONSOLE_TEXT_ORIGIN,
                CONSOLE_TEXT_SIZE,
                Color::BLACK,
            );
        }

        gpu.submit(frame);
    }
}

impl ApplicationHandler for RenderLoop {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.config.width,
                self.config.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window)))
            .expect("GPU initialization failed");

        let size = window.inner_size();
        self.shared
            .view
            .lock()
            .unwrap()
            .viewport
            .rescale(Vec2::new(size.width as f32, size.height as f32));

        self.window = Some(window);
        self.gpu = Some(gpu);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Teardown check once per loop iteration, so dropping the surface
        // joins within about a frame.
        if self.stopped() {
            event_loop.exit();
            return;
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.stopped() {
            event_loop.exit();
            return;
        }

        // Internal handling first, then forward to the caller's handler.
        match &event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(new_size) => self.resize(*new_size),
            _ => {}
        }

        let cursor = self
            .shared
            .view
            .lock()
            .unwrap()
            .cursor_px
            .unwrap_or(Vec2::zero());
        for ev in translate_window_event(&event, cursor) {
            self.handle_input(&ev);
            self.forward(&ev);
        }

        if let WindowEvent::RedrawRequested = event {
            self.frame(event_loop);
        }
    }
}

/// Translates a winit event into the caller-facing model.
///
/// A key press can produce both a `Key` event and a `Text` event (committed
/// text), in that order. Events with no counterpart translate to nothing and
/// are neither handled nor forwarded.
fn translate_window_event(event: &WindowEvent, cursor: Vec2) -> Vec<InputEvent> {
    let mut out = Vec::with_capacity(2);

    match event {
        WindowEvent::CloseRequested => out.push(InputEvent::CloseRequested),

        WindowEvent::Resized(size) => out.push(InputEvent::Resized {
            width: size.width,
            height: size.height,
        }),

        WindowEvent::Focused(f) => out.push(InputEvent::Focused(*f)),

        WindowEvent::CursorMoved { position, .. } => out.push(InputEvent::PointerMoved(Vec2::new(
            position.x as f32,
            position.y as f32,
        ))),

        WindowEvent::MouseInput { state, button, .. } => {
            let state = match state {
                ElementState::Pressed => ButtonState::Pressed,
                ElementState::Released => ButtonState::Released,
            };
            out.push(InputEvent::PointerButton {
                button: map_mouse_button(*button),
                state,
                pos: cursor,
            });
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => WheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => WheelDelta::Pixel {
                    x: p.x as f32,
                    y: p.y as f32,
                },
            };
            out.push(InputEvent::Wheel(delta));
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            out.push(InputEvent::Key {
                key: map_key(&event.logical_key),
                state,
                repeat: event.repeat,
            });
            if event.state == ElementState::Pressed {
                if let Some(text) = event.text.as_ref() {
                    out.push(InputEvent::Text(text.to_string()));
                }
            }
        }

        _ => {}
    }

    out
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(8),
        WinitMouseButton::Forward => MouseButton::Other(9),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(key: &winit::keyboard::Key) -> Key {
    use winit::keyboard::Key as WinitKey;
    match key {
        WinitKey::Named(NamedKey::Enter) => Key::Enter,
        WinitKey::Named(NamedKey::Backspace) => Key::Backspace,
        WinitKey::Named(NamedKey::Escape) => Key::Escape,
        WinitKey::Named(NamedKey::Tab) => Key::Tab,
        WinitKey::Named(NamedKey::Space) => Key::Space,
        WinitKey::Named(NamedKey::ArrowUp) => Key::ArrowUp,
        WinitKey::Named(NamedKey::ArrowDown) => Key::ArrowDown,
        WinitKey::Named(NamedKey::ArrowLeft) => Key::ArrowLeft,
        WinitKey::Named(NamedKey::ArrowRight) => Key::ArrowRight,
        WinitKey::Character(s) => s.chars().next().map(Key::Char).unwrap_or(Key::Unknown),
        _ => Key::Unknown,
    }
}
