//! Ortho Viewer: spin a polyhedron with two sliders
//!
//! Heading slider along the bottom, pitch slider on the right.
//! Keys: 1/2/3 pick tetrahedron/cube/cuboid, W toggles wireframe,
//! S writes snapshot.png. Optional first argument: path to a RON config.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod ui;

use macroquad::prelude::*;
use ortho_viewer::rasterizer::{Framebuffer, HEIGHT, WIDTH};
use ortho_viewer::{load_config, render_frame, save_png, Mesh, Orientation, RenderMode, ShapeKind, ViewerConfig};
use ui::{draw_slider, layout as slider_layout, DragState, Rect, SliderAxis, SliderId};

const SNAPSHOT_PATH: &str = "snapshot.png";

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Ortho Viewer v{}", VERSION),
        window_width: WIDTH as i32 + slider_layout::SIZE as i32,
        window_height: HEIGHT as i32 + slider_layout::SIZE as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Everything that decides what the current frame looks like
struct ViewerState {
    config: ViewerConfig,
    shape: ShapeKind,
    mesh: Mesh,
    mode: RenderMode,
    orientation: Orientation,
    frame: Framebuffer,
    texture: Option<Texture2D>,
    /// Set whenever an input changed; cleared after the next render
    dirty: bool,
}

impl ViewerState {
    fn new(config: ViewerConfig) -> Self {
        let shape = config.shape;
        Self {
            mesh: shape.build(),
            mode: config.mode,
            orientation: config.initial_orientation(),
            frame: Framebuffer::new(config.width, config.height),
            texture: None,
            dirty: true,
            shape,
            config,
        }
    }

    fn set_shape(&mut self, shape: ShapeKind) {
        if shape != self.shape {
            self.shape = shape;
            self.mesh = shape.build();
            self.dirty = true;
        }
    }

    /// Re-render only when something changed. Rapid slider movement
    /// collapses into at most one render per displayed frame.
    fn refresh(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        let (Ok(tex_w), Ok(tex_h)) = (u16::try_from(self.config.width), u16::try_from(self.config.height)) else {
            log::error!(
                "{}x{} surface does not fit a texture",
                self.config.width,
                self.config.height
            );
            self.texture = None;
            return;
        };
        self.frame = render_frame(
            self.orientation,
            &self.mesh,
            self.config.width,
            self.config.height,
            self.mode,
            &self.config.render_options(),
        );
        let texture = Texture2D::from_rgba8(tex_w, tex_h, &self.frame.pixels);
        texture.set_filter(FilterMode::Nearest);
        self.texture = Some(texture);
    }
}

/// Config from the first CLI argument, or defaults
fn load_startup_config() -> ViewerConfig {
    let Some(path) = std::env::args().nth(1) else {
        log::info!("No config given, using defaults");
        return ViewerConfig::default();
    };

    match load_config(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("Failed to load config {}: {}, using defaults", path, e);
            ViewerConfig::default()
        }
    }
}

fn handle_keys(state: &mut ViewerState) {
    let shape_keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3];
    for (key, shape) in shape_keys.iter().zip(ShapeKind::PRESETS) {
        if is_key_pressed(*key) {
            state.set_shape(shape);
        }
    }

    if is_key_pressed(KeyCode::W) {
        state.mode = state.mode.toggled();
        state.dirty = true;
    }

    if is_key_pressed(KeyCode::S) {
        if let Err(e) = save_png(&state.frame, SNAPSHOT_PATH) {
            log::error!("Snapshot failed: {}", e);
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_startup_config();
    log::info!(
        "{}x{} surface, {} in {} mode",
        config.width,
        config.height,
        config.shape.label(),
        config.mode.label()
    );

    let mut state = ViewerState::new(config);
    let mut drag = DragState::new();

    loop {
        let (mx, my) = mouse_position();
        drag.update(mx, my, is_mouse_button_down(MouseButton::Left));

        handle_keys(&mut state);

        clear_background(Color::from_rgba(30, 30, 35, 255));

        let screen_w = screen_width();
        let screen_h = screen_height();
        let strip = slider_layout::SIZE;
        let view_rect = Rect::new(0.0, 0.0, screen_w - strip, screen_h - strip);
        let heading_rect = Rect::new(0.0, screen_h - strip, screen_w - strip, strip);
        let pitch_rect = Rect::new(screen_w - strip, 0.0, strip, screen_h - strip);

        let heading_range = state.config.heading;
        let pitch_range = state.config.pitch;
        let heading = state.orientation.heading;
        let pitch = state.orientation.pitch;
        if let Some(h) = draw_slider(&mut drag, SliderId::Heading, heading_rect, SliderAxis::Horizontal, &heading_range, heading, "Heading") {
            state.orientation.heading = h;
            state.dirty = true;
        }
        if let Some(p) = draw_slider(&mut drag, SliderId::Pitch, pitch_rect, SliderAxis::Vertical, &pitch_range, pitch, "Pitch") {
            state.orientation.pitch = p;
            state.dirty = true;
        }

        state.refresh();

        if let Some(texture) = &state.texture {
            let aspect = state.frame.width as f32 / state.frame.height as f32;
            let dest = view_rect.fit_aspect(aspect);
            draw_texture_ex(
                texture,
                dest.x,
                dest.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(Vec2::new(dest.w, dest.h)),
                    ..Default::default()
                },
            );
        }

        draw_text(
            &format!("{} | {} | 1/2/3 shape, W mode, S snapshot", state.shape.label(), state.mode.label()),
            8.0,
            18.0,
            16.0,
            Color::from_rgba(200, 200, 200, 255),
        );

        next_frame().await
    }
}
