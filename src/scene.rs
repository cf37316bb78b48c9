// ============================================================================
// RETAINED MODE ABSTRACTIONS
// ============================================================================

use std::f64::consts::PI;

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::geometry::{point_on_circle, Point, Rect};
use crate::Rgba;

/// Horizontal placement of text inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone)]
pub enum DrawCommand {
    Clear(Rgba),
    /// Colored band stroked about a centerline circle, with round caps.
    SegmentArc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        width: f64,
        color: Rgba,
    },
    /// Filled dot with a border ring.
    Marker {
        center: Point,
        diameter: f64,
        fill: Rgba,
        border: Rgba,
        border_width: f64,
    },
    /// One line of text laid out inside `frame`.
    Text {
        frame: Rect,
        text: String,
        size: f32,
        color: Rgba,
        align: Align,
    },
}

/// Draw list for one frame. Rebuilt from widget state every time, then
/// replayed onto a canvas.
#[derive(Debug, Clone)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replay every command in order. Text needs a font; without one, text
    /// commands are skipped and everything else still draws.
    pub fn render(&self, canvas: &mut Canvas, font: Option<&Font>) {
        for command in &self.commands {
            match command {
                DrawCommand::Clear(color) => {
                    canvas.clear(*color);
                }
                DrawCommand::SegmentArc {
                    center,
                    radius,
                    start_angle,
                    end_angle,
                    width,
                    color,
                } => {
                    stroke_arc(
                        canvas,
                        *center,
                        *radius,
                        *start_angle,
                        *end_angle,
                        *width,
                        *color,
                    );
                }
                DrawCommand::Marker {
                    center,
                    diameter,
                    fill,
                    border,
                    border_width,
                } => {
                    draw_marker(canvas, *center, *diameter / 2.0, *fill, *border, *border_width);
                }
                DrawCommand::Text {
                    frame,
                    text,
                    size,
                    color,
                    align,
                } => {
                    if let Some(font) = font {
                        let scale = Scale::uniform(*size);
                        draw_text(canvas, *frame, text, font, scale, *color, *align);
                    }
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

/// RGBA8 frame slice plus its pixel dimensions.
pub struct Canvas<'a> {
    pub frame: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.r, color.g, color.b, 0xff]);
        }
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Rgba, coverage: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let src = [
            color.r as f32,
            color.g as f32,
            color.b as f32,
            color.a as f32 * coverage,
        ];
        let dst = [
            frame[idx] as f32,
            frame[idx + 1] as f32,
            frame[idx + 2] as f32,
            frame[idx + 3] as f32,
        ];
        let a = src[3] / 255.0;
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

/// Stroke a circular band between two angles, clockwise from `start_angle`,
/// with round caps on both ends. Arcs whose end does not lie past their
/// start draw nothing.
fn stroke_arc(
    canvas: &mut Canvas,
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
    width: f64,
    color: Rgba,
) {
    let sweep = end_angle - start_angle;
    if sweep <= 0.0 || radius <= 0.0 || width <= 0.0 {
        return;
    }
    let half = width / 2.0;
    let start_cap = point_on_circle(center, radius, start_angle);
    let end_cap = point_on_circle(center, radius, end_angle);
    let reach = radius + half + 1.0;
    let min_x = (center.x - reach).floor() as i32;
    let max_x = (center.x + reach).ceil() as i32;
    let min_y = (center.y - reach).floor() as i32;
    let max_y = (center.y + reach).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if x < 0 || y < 0 || (x as usize) >= canvas.width || (y as usize) >= canvas.height {
                continue;
            }
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let d = (dist - radius).abs();
            let mut coverage = 0.0;
            if d <= half + 1.0 {
                let angle = dy.atan2(dx);
                // Distance along the clockwise sweep; wraps so an end angle
                // of exactly two pi still matches pixels just below the x
                // axis.
                let travelled = (angle - start_angle).rem_euclid(2.0 * PI);
                if travelled <= sweep {
                    coverage = if d > half {
                        1.0 - (d - half).min(1.0)
                    } else {
                        1.0
                    };
                }
            }
            // Band and caps merge into one coverage so an overlapping pixel
            // blends exactly once; translucent colors stay uniform there.
            coverage = coverage
                .max(circle_coverage(start_cap, half, x, y))
                .max(circle_coverage(end_cap, half, x, y));
            if coverage > 0.01 {
                set_pixel(
                    canvas.frame,
                    canvas.width,
                    x as usize,
                    y as usize,
                    color,
                    coverage as f32,
                );
            }
        }
    }
}

/// Coverage of a filled circle at one pixel, with a 1 px antialiased rim.
fn circle_coverage(center: Point, radius: f64, x: i32, y: i32) -> f64 {
    let dx = x as f64 - center.x;
    let dy = y as f64 - center.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > radius {
        1.0 - (dist - radius).min(1.0)
    } else {
        1.0
    }
}

/// Marker dot: fill circle inside a border ring, antialiased at the rim.
fn draw_marker(
    canvas: &mut Canvas,
    center: Point,
    radius: f64,
    fill: Rgba,
    border: Rgba,
    border_width: f64,
) {
    if radius <= 0.0 {
        return;
    }
    let inner = (radius - border_width).max(0.0);
    let reach = radius + 1.0;
    let min_x = (center.x - reach).floor() as i32;
    let max_x = (center.x + reach).ceil() as i32;
    let min_y = (center.y - reach).floor() as i32;
    let max_y = (center.y + reach).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > radius + 1.0 {
                continue;
            }
            let color = if border_width > 0.0 && dist > inner {
                border
            } else {
                fill
            };
            let aa = if dist > radius {
                1.0 - (dist - radius).min(1.0)
            } else {
                1.0
            };
            if aa > 0.0
                && x >= 0
                && y >= 0
                && (x as usize) < canvas.width
                && (y as usize) < canvas.height
            {
                set_pixel(canvas.frame, canvas.width, x as usize, y as usize, color, aa as f32);
            }
        }
    }
}

fn draw_text(
    canvas: &mut Canvas,
    frame_rect: Rect,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Rgba,
    align: Align,
) {
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, 0.0 + v_metrics.ascent))
        .collect();
    // Bounding box for the whole string
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let center = frame_rect.center();
    let offset_x = match align {
        Align::Left => frame_rect.x.round() as i32,
        Align::Center => center.x.round() as i32 - width_px / 2,
        Align::Right => frame_rect.max_x().round() as i32 - width_px,
    };
    let offset_y = center.y.round() as i32 - height_px / 2;
    let width = canvas.width;
    let height = canvas.height;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && px < width as i32 && py >= 0 && py < height as i32 {
                    set_pixel(canvas.frame, width, px as usize, py as usize, color, v);
                }
            });
        }
    }
}
