// ============================================================================
// DIAL GEOMETRY
// ============================================================================

use std::f64::consts::PI;

use crate::{Rgba, Segment};

/// Angle where the dial begins, at the left edge of the half circle.
/// Angles grow clockwise because the pixel y axis points down.
pub const ARC_START: f64 = PI;
/// Angular span of the dial; the marker travels exactly half a turn.
pub const ARC_SPAN: f64 = PI;
/// Divisor applied to the short side of the bounds to get the dial radius.
pub const RADIUS_DIVISOR: f64 = 2.5;

/// Height of the full-width strip holding the score readout.
pub const SCORE_LABEL_HEIGHT: f64 = 50.0;
/// Box size for the min/max labels at the dial ends.
pub const EDGE_LABEL_WIDTH: f64 = 60.0;
pub const EDGE_LABEL_HEIGHT: f64 = 20.0;
/// How far the min/max label centers sit inside the dial ends, and how far
/// below the horizontal centerline.
pub const EDGE_LABEL_INSET: f64 = 20.0;
pub const EDGE_LABEL_DROP: f64 = 20.0;
/// Segment captions sit on a ring slightly inside the band centerline.
pub const SEGMENT_LABEL_RADIUS_FACTOR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn centered_at(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }
}

/// One colored band of the dial, in final (spacing-inset) angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentArc {
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Rgba,
}

impl SegmentArc {
    /// Spacing wider than the band collapses it; degenerate arcs are kept in
    /// the list so indices line up with segments, but nothing is drawn.
    pub fn is_degenerate(&self) -> bool {
        self.end_angle <= self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

pub fn center(width: f64, height: f64) -> Point {
    Point::new(width / 2.0, height / 2.0)
}

pub fn dial_radius(width: f64, height: f64) -> f64 {
    width.min(height) / RADIUS_DIVISOR
}

/// Radius of the band centerline. Arcs are stroked about this circle so the
/// outer edge of the stroke touches the dial radius.
pub fn stroke_radius(width: f64, height: f64, segment_width: f64) -> f64 {
    dial_radius(width, height) - segment_width / 2.0
}

/// Position of `score` along the scale as a fraction of the total range.
/// Not clamped: out-of-range scores extrapolate past the dial ends.
/// A zero-width scale places every score at the middle of the dial.
pub fn score_fraction(score: i32, min: i32, max: i32) -> f64 {
    if min == max {
        return 0.5;
    }
    (score as f64 - min as f64) / (max as f64 - min as f64)
}

pub fn score_angle(score: i32, min: i32, max: i32) -> f64 {
    ARC_START + score_fraction(score, min, max) * ARC_SPAN
}

pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    Point::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Angular bands for each segment, inset by half the spacing on both sides.
/// The scale runs from the first segment's start to the last segment's end.
pub fn segment_arcs(segments: &[Segment], spacing: f64) -> Vec<SegmentArc> {
    if segments.is_empty() {
        return Vec::new();
    }
    let min = segments[0].start;
    let max = segments[segments.len() - 1].end;
    segments
        .iter()
        .map(|segment| SegmentArc {
            start_angle: score_angle(segment.start, min, max) + spacing / 2.0,
            end_angle: score_angle(segment.end, min, max) - spacing / 2.0,
            color: segment.color,
        })
        .collect()
}

/// Band color for a score: the first segment whose half-open range
/// `[start, end)` contains it. Scores outside every band (including the
/// scale maximum itself) fall back to the last segment's color.
/// `None` only when there are no segments.
pub fn color_for_score(segments: &[Segment], score: i32) -> Option<Rgba> {
    for segment in segments {
        if score >= segment.start && score < segment.end {
            return Some(segment.color);
        }
    }
    segments.last().map(|segment| segment.color)
}

/// Frames for the numeric labels, in widget coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFrames {
    pub score: Rect,
    pub min: Rect,
    pub max: Rect,
}

pub fn label_frames(width: f64, height: f64) -> LabelFrames {
    let c = center(width, height);
    let r = dial_radius(width, height);
    LabelFrames {
        // Full-width strip halfway up the dial interior.
        score: Rect::new(0.0, c.y - r * 0.5, width, SCORE_LABEL_HEIGHT),
        min: Rect::centered_at(
            Point::new(c.x - r + EDGE_LABEL_INSET, c.y + EDGE_LABEL_DROP),
            EDGE_LABEL_WIDTH,
            EDGE_LABEL_HEIGHT,
        ),
        max: Rect::centered_at(
            Point::new(c.x + r - EDGE_LABEL_INSET, c.y + EDGE_LABEL_DROP),
            EDGE_LABEL_WIDTH,
            EDGE_LABEL_HEIGHT,
        ),
    }
}
