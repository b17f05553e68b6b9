//! Angle slider widget
//!
//! Horizontal for heading, vertical for pitch. Vertical sliders put the
//! maximum at the top.

use macroquad::prelude::*;
use ortho_viewer::AngleRange;

use super::{DragState, Rect, SliderId};

/// Visual style for sliders
pub mod style {
    use macroquad::prelude::Color;

    pub const TRACK: Color = Color::new(0.18, 0.18, 0.22, 1.0);
    pub const TRACK_HOVER: Color = Color::new(0.22, 0.22, 0.27, 1.0);
    /// Filled part of the track and the knob (cyan accent)
    pub const ACCENT: Color = Color::new(0.0, 0.75, 0.9, 1.0);
    pub const LABEL: Color = Color::new(0.8, 0.8, 0.8, 1.0);
}

/// Layout constants
pub mod layout {
    /// Thickness of the slider strip
    pub const SIZE: f32 = 36.0;
    pub const TRACK_THICKNESS: f32 = 4.0;
    pub const KNOB_RADIUS: f32 = 7.0;
    /// Gap between the strip edge and the track ends
    pub const PADDING: f32 = 14.0;
    pub const FONT_SIZE: f32 = 14.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderAxis {
    Horizontal,
    Vertical,
}

/// Track endpoints inside the strip, (start, end) along the axis
fn track_span(rect: &Rect, axis: SliderAxis) -> (f32, f32) {
    match axis {
        SliderAxis::Horizontal => (rect.x + layout::PADDING, rect.x + rect.w - layout::PADDING),
        SliderAxis::Vertical => (rect.y + layout::PADDING, rect.y + rect.h - layout::PADDING),
    }
}

/// Fraction along the track for a mouse position. Vertical runs bottom to top.
pub fn fraction_at(rect: &Rect, axis: SliderAxis, mx: f32, my: f32) -> f64 {
    let (start, end) = track_span(rect, axis);
    let len = end - start;
    if len <= 0.0 {
        return 0.0;
    }
    let t = match axis {
        SliderAxis::Horizontal => (mx - start) / len,
        SliderAxis::Vertical => (end - my) / len,
    };
    t.clamp(0.0, 1.0) as f64
}

/// Screen position of the knob for a fraction
fn knob_position(rect: &Rect, axis: SliderAxis, t: f64) -> (f32, f32) {
    let (start, end) = track_span(rect, axis);
    let t = t as f32;
    match axis {
        SliderAxis::Horizontal => (start + (end - start) * t, rect.y + rect.h * 0.5),
        SliderAxis::Vertical => (rect.x + rect.w * 0.5, end - (end - start) * t),
    }
}

/// Draw an angle slider. Returns the new value (whole degrees) when dragged.
pub fn draw_slider(
    drag: &mut DragState,
    id: SliderId,
    rect: Rect,
    axis: SliderAxis,
    range: &AngleRange,
    value: f64,
    label: &str,
) -> Option<f64> {
    let active = drag.track(id, &rect);
    let mut result = None;
    if active {
        let t = fraction_at(&rect, axis, drag.pointer.x, drag.pointer.y);
        let new_value = range.from_fraction(t);
        if new_value != value {
            result = Some(new_value);
        }
    }
    let shown = result.unwrap_or(value);

    let (start, end) = track_span(&rect, axis);
    let track_color = if active || drag.hovering(id, &rect) {
        style::TRACK_HOVER
    } else {
        style::TRACK
    };
    let (kx, ky) = knob_position(&rect, axis, range.fraction(shown));
    let half = layout::TRACK_THICKNESS * 0.5;

    match axis {
        SliderAxis::Horizontal => {
            let cy = rect.y + rect.h * 0.5;
            draw_rectangle(start, cy - half, end - start, layout::TRACK_THICKNESS, track_color);
            draw_rectangle(start, cy - half, kx - start, layout::TRACK_THICKNESS, style::ACCENT);
        }
        SliderAxis::Vertical => {
            let cx = rect.x + rect.w * 0.5;
            draw_rectangle(cx - half, start, layout::TRACK_THICKNESS, end - start, track_color);
            draw_rectangle(cx - half, ky, layout::TRACK_THICKNESS, end - ky, style::ACCENT);
        }
    }
    draw_circle(kx, ky, layout::KNOB_RADIUS, style::ACCENT);

    let text = format!("{} {:.0}", label, shown);
    match axis {
        SliderAxis::Horizontal => {
            draw_text(&text, start, rect.y + layout::FONT_SIZE * 0.8, layout::FONT_SIZE, style::LABEL);
        }
        SliderAxis::Vertical => {
            let dims = measure_text(&text, None, layout::FONT_SIZE as u16, 1.0);
            let tx = (kx - dims.width - layout::KNOB_RADIUS - 4.0).max(rect.x);
            draw_text(&text, tx, ky + dims.height * 0.5, layout::FONT_SIZE, style::LABEL);
        }
    }

    result
}
