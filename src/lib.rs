// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

// External crate imports
use bon::Builder;
use log::{debug, warn};
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use thiserror::Error;

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

pub mod animation;
pub mod geometry;
pub mod scene;

pub use animation::MarkerAnimator;
pub use geometry::{Point, Rect, SegmentArc};
pub use scene::{Align, Canvas, DrawCommand, Scene};

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color for gauge elements, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

// ============================================================================
// SCORE SCALE
// ============================================================================

/// One contiguous scoring band. `start` is inclusive and `end` exclusive
/// for color lookup; bands are expected ordered low to high, back to back.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start: i32,
    pub end: i32,
    pub color: Rgba,
    pub label: String,
}

impl Segment {
    pub fn new(start: i32, end: i32, color: Rgba, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            color,
            label: label.into(),
        }
    }

    /// The conventional 300-850 credit score bands.
    pub fn credit_score_scale() -> Vec<Segment> {
        vec![
            Segment::new(300, 580, Rgba::new(0xff, 0x00, 0x00), "Poor"),
            Segment::new(580, 670, Rgba::new(0xff, 0x7f, 0x00), "Fair"),
            Segment::new(670, 740, Rgba::new(0xff, 0xff, 0x00), "Good"),
            Segment::new(
                740,
                800,
                Rgba::new(0x00, 0xff, 0x00).with_alpha(153),
                "Very Good",
            ),
            Segment::new(800, 850, Rgba::new(0x00, 0xff, 0x00), "Excellent"),
        ]
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Errors surfaced by the windowed host.
#[derive(Error, Debug)]
pub enum GaugeError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("render surface error: {0}")]
    Surface(#[from] pixels::Error),
    #[error("font data could not be parsed")]
    InvalidFont,
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Command enum for type-safe gauge updates from other threads.
#[derive(Debug, Clone)]
pub enum GaugeCommand {
    SetScore(i32),
    SetSegments(Vec<Segment>),
    SetSegmentWidth(f64),
    SetSegmentSpacing(f64),
    SetMarkerSize(f64),
    SetScoreLabelVisible(bool),
    SetMinLabelVisible(bool),
    SetMaxLabelVisible(bool),
}

#[derive(Debug, Clone, Builder)]
pub struct GaugeConfig {
    #[builder(default = "scoredial".to_string())]
    pub title: String,

    /// Scoring bands, low to high. The scale range comes from the first
    /// band's start and the last band's end.
    #[builder(default = Segment::credit_score_scale())]
    pub segments: Vec<Segment>,

    // Band geometry
    #[builder(default = 8.0)]
    pub segment_width: f64,
    /// Radians trimmed from every band, half at each end.
    #[builder(default = 0.08)]
    pub segment_spacing: f64,

    // Marker configuration
    #[builder(default = 20.0)]
    pub marker_size: f64,
    #[builder(default = Rgba::new(0xff, 0xff, 0xff))]
    pub marker_fill: Rgba,
    #[builder(default = 2.0)]
    pub marker_border_width: f64,

    // Label configuration
    #[builder(default = true)]
    pub score_label_visible: bool,
    #[builder(default = 32.0)]
    pub score_label_size: f32,
    #[builder(default = Rgba::new(0x00, 0x00, 0x00))]
    pub score_label_color: Rgba,
    #[builder(default = true)]
    pub min_label_visible: bool,
    #[builder(default = 14.0)]
    pub min_label_size: f32,
    #[builder(default = Rgba::new(0x66, 0x66, 0x66))]
    pub min_label_color: Rgba,
    #[builder(default = true)]
    pub max_label_visible: bool,
    #[builder(default = 14.0)]
    pub max_label_size: f32,
    #[builder(default = Rgba::new(0x66, 0x66, 0x66))]
    pub max_label_color: Rgba,
    #[builder(default = false)]
    pub segment_labels_visible: bool,
    #[builder(default = 12.0)]
    pub segment_label_size: f32,
    #[builder(default = Rgba::new(0x66, 0x66, 0x66))]
    pub segment_label_color: Rgba,

    // Window configuration
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,
    #[builder(default = Rgba::new(0xff, 0xff, 0xff))]
    pub background: Rgba,
    /// TTF/OTF bytes for label text. Without them the gauge still renders
    /// arcs and marker; text commands are skipped.
    pub font_data: Option<Vec<u8>>,
}

/// Main gauge struct - the primary public interface
#[derive(Debug, Clone)]
pub struct Gauge {
    config: GaugeConfig,
    state: GaugeState,
}

#[derive(Debug, Clone)]
struct GaugeState {
    current_score: i32,
    bounds: (f64, f64),
    marker_angle: f64,
    marker_color: Rgba,
}

impl Gauge {
    pub fn new(config: GaugeConfig) -> Self {
        let state = GaugeState {
            current_score: 0,
            bounds: (config.window_width as f64, config.window_height as f64),
            marker_angle: geometry::ARC_START,
            marker_color: Rgba::new(0xff, 0xff, 0xff),
        };
        Self { config, state }
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn current_score(&self) -> i32 {
        self.state.current_score
    }

    /// Resting angle of the marker. Animated hosts sweep the drawn marker
    /// toward this value.
    pub fn marker_angle(&self) -> f64 {
        self.state.marker_angle
    }

    pub fn marker_color(&self) -> Rgba {
        self.state.marker_color
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.state.bounds
    }

    /// Lowest and highest score on the scale, when there are bands.
    pub fn score_range(&self) -> Option<(i32, i32)> {
        let first = self.config.segments.first()?;
        let last = self.config.segments.last()?;
        Some((first.start, last.end))
    }

    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.state.bounds = (width, height);
    }

    /// Authoritative score update: records the score, recolors the marker
    /// border, and moves the marker's resting angle. Scores outside the
    /// scale extrapolate past the dial ends rather than clamping. Without
    /// segments the call leaves all state untouched.
    pub fn set_score(&mut self, score: i32) {
        let (min, max) = match self.score_range() {
            Some(range) => range,
            None => {
                debug!("set_score({score}) ignored: no segments");
                return;
            }
        };
        self.state.current_score = score;
        self.state.marker_angle = geometry::score_angle(score, min, max);
        if let Some(color) = geometry::color_for_score(&self.config.segments, score) {
            self.state.marker_color = color;
        }
        debug!("score {} -> angle {:.3} rad", score, self.state.marker_angle);
    }

    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.config.segments = segments;
        self.reload();
    }

    pub fn set_segment_width(&mut self, width: f64) {
        self.config.segment_width = width;
        self.reload();
    }

    pub fn set_segment_spacing(&mut self, spacing: f64) {
        self.config.segment_spacing = spacing;
        self.reload();
    }

    pub fn set_marker_size(&mut self, size: f64) {
        self.config.marker_size = size;
    }

    pub fn set_score_label_visible(&mut self, visible: bool) {
        self.config.score_label_visible = visible;
    }

    pub fn set_min_label_visible(&mut self, visible: bool) {
        self.config.min_label_visible = visible;
    }

    pub fn set_max_label_visible(&mut self, visible: bool) {
        self.config.max_label_visible = visible;
    }

    /// Scale rebuild: the marker parks at the low end of the dial until the
    /// next score update. Does nothing without segments.
    fn reload(&mut self) {
        if self.config.segments.is_empty() {
            debug!("reload skipped: no segments");
            return;
        }
        self.state.marker_angle = geometry::ARC_START;
        debug!(
            "reload: {} segments, band width {}, spacing {}",
            self.config.segments.len(),
            self.config.segment_width,
            self.config.segment_spacing
        );
    }

    pub fn apply_command(&mut self, command: GaugeCommand) {
        match command {
            GaugeCommand::SetScore(score) => self.set_score(score),
            GaugeCommand::SetSegments(segments) => self.set_segments(segments),
            GaugeCommand::SetSegmentWidth(width) => self.set_segment_width(width),
            GaugeCommand::SetSegmentSpacing(spacing) => self.set_segment_spacing(spacing),
            GaugeCommand::SetMarkerSize(size) => self.set_marker_size(size),
            GaugeCommand::SetScoreLabelVisible(visible) => self.set_score_label_visible(visible),
            GaugeCommand::SetMinLabelVisible(visible) => self.set_min_label_visible(visible),
            GaugeCommand::SetMaxLabelVisible(visible) => self.set_max_label_visible(visible),
        }
    }

    fn drain_commands(&mut self, receiver: &Receiver<GaugeCommand>) {
        while let Ok(command) = receiver.try_recv() {
            self.apply_command(command);
        }
    }
}

// ============================================================================
// DERIVED GEOMETRY
// ============================================================================

/// Everything a renderer needs for one frame, in widget coordinates.
#[derive(Debug, Clone)]
pub struct GaugeLayout {
    pub center: Point,
    pub radius: f64,
    pub stroke_radius: f64,
    pub arcs: Vec<SegmentArc>,
    pub marker: Option<Point>,
    pub score_label: Option<(Rect, String)>,
    pub min_label: Option<(Rect, String)>,
    pub max_label: Option<(Rect, String)>,
    pub segment_labels: Vec<(Point, String)>,
}

impl GaugeLayout {
    fn empty() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            radius: 0.0,
            stroke_radius: 0.0,
            arcs: Vec::new(),
            marker: None,
            score_label: None,
            min_label: None,
            max_label: None,
            segment_labels: Vec::new(),
        }
    }
}

impl Gauge {
    /// Derive all drawable geometry from the current state. Degenerate
    /// bounds produce an empty layout. The marker sits at the resting
    /// angle; hosts that animate pass their own angle to `scene`.
    pub fn layout(&self) -> GaugeLayout {
        let (width, height) = self.state.bounds;
        if width <= 0.0 || height <= 0.0 {
            return GaugeLayout::empty();
        }
        let center = geometry::center(width, height);
        let radius = geometry::dial_radius(width, height);
        let stroke_radius = geometry::stroke_radius(width, height, self.config.segment_width);
        let arcs = geometry::segment_arcs(&self.config.segments, self.config.segment_spacing);
        let frames = geometry::label_frames(width, height);

        let score_label = if self.config.score_label_visible {
            Some((frames.score, self.state.current_score.to_string()))
        } else {
            None
        };
        let range = self.score_range();
        let min_label = match (self.config.min_label_visible, range) {
            (true, Some((min, _))) => Some((frames.min, min.to_string())),
            _ => None,
        };
        let max_label = match (self.config.max_label_visible, range) {
            (true, Some((_, max))) => Some((frames.max, max.to_string())),
            _ => None,
        };

        let segment_labels = if self.config.segment_labels_visible {
            self.config
                .segments
                .iter()
                .zip(&arcs)
                .filter(|(segment, _)| !segment.label.is_empty())
                .map(|(segment, arc)| {
                    let anchor = geometry::point_on_circle(
                        center,
                        stroke_radius * geometry::SEGMENT_LABEL_RADIUS_FACTOR,
                        arc.mid_angle(),
                    );
                    (anchor, segment.label.clone())
                })
                .collect()
        } else {
            Vec::new()
        };

        GaugeLayout {
            center,
            radius,
            stroke_radius,
            arcs,
            marker: Some(geometry::point_on_circle(
                center,
                stroke_radius,
                self.state.marker_angle,
            )),
            score_label,
            min_label,
            max_label,
            segment_labels,
        }
    }

    /// Build the draw list for one frame with the marker at `marker_angle`.
    /// Pass `self.marker_angle()` for the resting position, or an animator
    /// sample for the in-flight one. Arcs go under the marker, text on top.
    pub fn scene(&self, marker_angle: f64) -> Scene {
        let mut scene = Scene::new();
        scene.push(DrawCommand::Clear(self.config.background));
        let (width, height) = self.state.bounds;
        if width <= 0.0 || height <= 0.0 {
            return scene;
        }
        let layout = self.layout();

        for arc in &layout.arcs {
            if arc.is_degenerate() {
                continue;
            }
            scene.push(DrawCommand::SegmentArc {
                center: layout.center,
                radius: layout.stroke_radius,
                start_angle: arc.start_angle,
                end_angle: arc.end_angle,
                width: self.config.segment_width,
                color: arc.color,
            });
        }

        for (anchor, text) in &layout.segment_labels {
            scene.push(DrawCommand::Text {
                frame: Rect::centered_at(*anchor, 0.0, 0.0),
                text: text.clone(),
                size: self.config.segment_label_size,
                color: self.config.segment_label_color,
                align: Align::Center,
            });
        }

        scene.push(DrawCommand::Marker {
            center: geometry::point_on_circle(layout.center, layout.stroke_radius, marker_angle),
            diameter: self.config.marker_size,
            fill: self.config.marker_fill,
            border: self.state.marker_color,
            border_width: self.config.marker_border_width,
        });

        if let Some((frame, text)) = &layout.score_label {
            scene.push(DrawCommand::Text {
                frame: *frame,
                text: text.clone(),
                size: self.config.score_label_size,
                color: self.config.score_label_color,
                align: Align::Center,
            });
        }
        if let Some((frame, text)) = &layout.min_label {
            scene.push(DrawCommand::Text {
                frame: *frame,
                text: text.clone(),
                size: self.config.min_label_size,
                color: self.config.min_label_color,
                align: Align::Left,
            });
        }
        if let Some((frame, text)) = &layout.max_label {
            scene.push(DrawCommand::Text {
                frame: *frame,
                text: text.clone(),
                size: self.config.max_label_size,
                color: self.config.max_label_color,
                align: Align::Right,
            });
        }
        scene
    }
}

// ============================================================================
// WINDOWED HOST
// ============================================================================

impl Gauge {
    /// Open a window and render until it is closed.
    pub fn show(&mut self) -> Result<(), GaugeError> {
        self.run_window(None)
    }

    /// Open a window and apply commands from `receiver` as they arrive,
    /// rendering until the window is closed.
    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<GaugeCommand>,
    ) -> Result<(), GaugeError> {
        self.run_window(Some(receiver))
    }

    fn run_window(&mut self, receiver: Option<Receiver<GaugeCommand>>) -> Result<(), GaugeError> {
        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(
                self.config.window_width as f64,
                self.config.window_height as f64,
            ))
            .build(&event_loop)?;
        let window = std::sync::Arc::new(window);

        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;
        self.set_bounds(size.width as f64, size.height as f64);

        // Parsed once; every text command reuses it.
        let font = match &self.config.font_data {
            Some(bytes) => Some(Font::try_from_vec(bytes.clone()).ok_or(GaugeError::InvalidFont)?),
            None => {
                warn!("no font data configured; labels will not be drawn");
                None
            }
        };

        let mut animator = MarkerAnimator::new(self.state.marker_angle);
        let started = Instant::now();

        let frame_duration = std::time::Duration::from_secs_f64(1.0 / self.config.max_framerate);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                        self.set_bounds(new_size.width as f64, new_size.height as f64);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            self.drain_commands(receiver);
                        }
                        let now = started.elapsed().as_secs_f64();
                        animator.retarget(self.state.marker_angle, now);
                        let displayed = animator.sample(now);

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        self.scene(displayed).render(&mut canvas, font.as_ref());
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn test_gauge() -> Gauge {
        Gauge::new(GaugeConfig::builder().build())
    }

    #[test]
    fn defaults_cover_the_credit_scale() {
        let gauge = test_gauge();
        assert_eq!(gauge.score_range(), Some((300, 850)));
        assert_eq!(gauge.current_score(), 0);
        assert!((gauge.marker_angle() - PI).abs() < 1e-12);
        assert_eq!(gauge.bounds(), (300.0, 300.0));
    }

    #[test]
    fn set_score_moves_the_resting_angle() {
        let mut gauge = test_gauge();
        gauge.set_score(300);
        assert!((gauge.marker_angle() - PI).abs() < 1e-9);
        gauge.set_score(850);
        assert!((gauge.marker_angle() - 2.0 * PI).abs() < 1e-9);
        gauge.set_score(575);
        assert!((gauge.marker_angle() - 1.5 * PI).abs() < 1e-9);
    }

    #[test]
    fn set_score_is_idempotent() {
        let mut gauge = test_gauge();
        gauge.set_score(720);
        let angle = gauge.marker_angle();
        let color = gauge.marker_color();
        gauge.set_score(720);
        assert_eq!(gauge.marker_angle(), angle);
        assert_eq!(gauge.marker_color(), color);
        assert_eq!(gauge.current_score(), 720);
    }

    #[test]
    fn set_score_recolors_the_marker_border() {
        let mut gauge = test_gauge();
        gauge.set_score(310);
        assert_eq!(gauge.marker_color(), Rgba::new(0xff, 0x00, 0x00));
        gauge.set_score(810);
        assert_eq!(gauge.marker_color(), Rgba::new(0x00, 0xff, 0x00));
    }

    #[test]
    fn out_of_range_scores_extrapolate() {
        let mut gauge = test_gauge();
        // Fraction 1.5 of the 300..850 scale.
        gauge.set_score(1125);
        assert!((gauge.marker_angle() - 2.5 * PI).abs() < 1e-9);
    }

    #[test]
    fn set_score_without_segments_changes_nothing() {
        let mut gauge = test_gauge();
        gauge.set_score(700);
        gauge.set_segments(Vec::new());
        let angle = gauge.marker_angle();
        gauge.set_score(850);
        assert_eq!(gauge.current_score(), 700);
        assert_eq!(gauge.marker_angle(), angle);
        // The readout keeps showing the previous score as well.
        let layout = gauge.layout();
        assert_eq!(layout.score_label.map(|(_, t)| t), Some("700".to_string()));
    }

    #[test]
    fn scale_changes_park_the_marker() {
        let mut gauge = test_gauge();
        gauge.set_score(850);
        gauge.set_segment_spacing(0.2);
        assert!((gauge.marker_angle() - PI).abs() < 1e-12);
        gauge.set_score(850);
        gauge.set_segment_width(12.0);
        assert!((gauge.marker_angle() - PI).abs() < 1e-12);
        gauge.set_score(850);
        gauge.set_segments(vec![Segment::new(0, 100, Rgba::new(0x00, 0x00, 0xff), "all")]);
        assert!((gauge.marker_angle() - PI).abs() < 1e-12);
    }

    #[test]
    fn marker_size_changes_do_not_park_the_marker() {
        let mut gauge = test_gauge();
        gauge.set_score(850);
        gauge.set_marker_size(30.0);
        assert!((gauge.marker_angle() - 2.0 * PI).abs() < 1e-9);
        assert!((gauge.config().marker_size - 30.0).abs() < 1e-12);
    }

    #[test]
    fn layout_recomputes_identically() {
        let mut gauge = test_gauge();
        gauge.set_score(720);
        let a = gauge.layout();
        let b = gauge.layout();
        assert_eq!(a.center, b.center);
        assert_eq!(a.arcs, b.arcs);
        assert_eq!(a.marker, b.marker);
        assert_eq!(a.score_label, b.score_label);
        assert_eq!(a.min_label, b.min_label);
        assert_eq!(a.max_label, b.max_label);
    }

    #[test]
    fn layout_labels_read_the_scale_ends() {
        let gauge = test_gauge();
        let layout = gauge.layout();
        assert_eq!(layout.min_label.map(|(_, t)| t), Some("300".to_string()));
        assert_eq!(layout.max_label.map(|(_, t)| t), Some("850".to_string()));
    }

    #[test]
    fn layout_positions_marker_on_the_stroke_circle() {
        let mut gauge = test_gauge();
        gauge.set_bounds(300.0, 300.0);
        gauge.set_score(850);
        let layout = gauge.layout();
        let marker = layout.marker.unwrap();
        // Dial radius 120, stroke circle 116; angle two pi is the right end.
        assert!((marker.x - 266.0).abs() < 1e-9);
        assert!((marker.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn hidden_labels_leave_the_layout() {
        let mut gauge = test_gauge();
        gauge.set_score_label_visible(false);
        gauge.set_min_label_visible(false);
        gauge.set_max_label_visible(false);
        let layout = gauge.layout();
        assert!(layout.score_label.is_none());
        assert!(layout.min_label.is_none());
        assert!(layout.max_label.is_none());
    }

    #[test]
    fn min_and_max_labels_hide_independently() {
        let mut gauge = test_gauge();
        gauge.set_min_label_visible(false);
        let layout = gauge.layout();
        assert!(layout.min_label.is_none());
        assert_eq!(layout.max_label.map(|(_, t)| t), Some("850".to_string()));

        let mut gauge = test_gauge();
        gauge.set_max_label_visible(false);
        let layout = gauge.layout();
        assert_eq!(layout.min_label.map(|(_, t)| t), Some("300".to_string()));
        assert!(layout.max_label.is_none());
    }

    #[test]
    fn segment_captions_anchor_inside_band_midpoints() {
        let config = GaugeConfig::builder().segment_labels_visible(true).build();
        let mut gauge = Gauge::new(config);
        gauge.set_bounds(300.0, 300.0);
        let layout = gauge.layout();
        assert_eq!(layout.segment_labels.len(), 5);
        assert_eq!(layout.segment_labels[0].1, "Poor");
        let anchor = layout.segment_labels[0].0;
        let c = layout.center;
        let dist = ((anchor.x - c.x).powi(2) + (anchor.y - c.y).powi(2)).sqrt();
        assert!((dist - 0.85 * layout.stroke_radius).abs() < 1e-9);
    }

    #[test]
    fn degenerate_bounds_produce_background_only() {
        let mut gauge = test_gauge();
        gauge.set_bounds(0.0, 0.0);
        let layout = gauge.layout();
        assert!(layout.arcs.is_empty());
        assert!(layout.marker.is_none());
        let scene = gauge.scene(gauge.marker_angle());
        assert_eq!(scene.commands().len(), 1);
        assert!(matches!(scene.commands()[0], DrawCommand::Clear(_)));
    }

    #[test]
    fn scene_orders_arcs_below_marker_below_text() {
        let gauge = test_gauge();
        let scene = gauge.scene(gauge.marker_angle());
        let commands = scene.commands();
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        let arc_count = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::SegmentArc { .. }))
            .count();
        assert_eq!(arc_count, 5);
        let last_arc = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::SegmentArc { .. }))
            .unwrap();
        let marker_at = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Marker { .. }))
            .unwrap();
        let first_text = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .unwrap();
        assert!(last_arc < marker_at);
        assert!(marker_at < first_text);
    }

    #[test]
    fn scale_end_labels_hug_their_edges() {
        let gauge = test_gauge();
        let scene = gauge.scene(gauge.marker_angle());
        let aligns: Vec<(String, Align)> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, align, .. } => Some((text.clone(), *align)),
                _ => None,
            })
            .collect();
        assert!(aligns.contains(&("300".to_string(), Align::Left)));
        assert!(aligns.contains(&("850".to_string(), Align::Right)));
    }

    #[test]
    fn end_labels_style_independently() {
        let config = GaugeConfig::builder()
            .min_label_size(10.0)
            .min_label_color(Rgba::new(0x00, 0x00, 0xff))
            .max_label_size(18.0)
            .max_label_color(Rgba::new(0xff, 0x00, 0xff))
            .build();
        let gauge = Gauge::new(config);
        let scene = gauge.scene(gauge.marker_angle());
        let texts: Vec<(String, f32, Rgba)> = scene
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, size, color, .. } => {
                    Some((text.clone(), *size, *color))
                }
                _ => None,
            })
            .collect();
        assert!(texts.contains(&("300".to_string(), 10.0, Rgba::new(0x00, 0x00, 0xff))));
        assert!(texts.contains(&("850".to_string(), 18.0, Rgba::new(0xff, 0x00, 0xff))));
    }

    #[test]
    fn empty_segments_still_draw_the_marker() {
        let mut gauge = test_gauge();
        gauge.set_segments(Vec::new());
        let scene = gauge.scene(gauge.marker_angle());
        assert!(scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Marker { .. })));
        assert!(!scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::SegmentArc { .. })));
    }

    #[test]
    fn oversized_spacing_drops_collapsed_arcs_from_the_scene() {
        let mut gauge = test_gauge();
        gauge.set_segment_spacing(10.0);
        let scene = gauge.scene(gauge.marker_angle());
        assert!(!scene
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::SegmentArc { .. })));
    }

    #[test]
    fn commands_map_to_setters() {
        let mut gauge = test_gauge();
        gauge.apply_command(GaugeCommand::SetScore(800));
        assert_eq!(gauge.current_score(), 800);
        gauge.apply_command(GaugeCommand::SetMarkerSize(28.0));
        assert!((gauge.config().marker_size - 28.0).abs() < 1e-12);
        gauge.apply_command(GaugeCommand::SetScoreLabelVisible(false));
        assert!(gauge.layout().score_label.is_none());
        gauge.apply_command(GaugeCommand::SetMinLabelVisible(false));
        assert!(gauge.layout().min_label.is_none());
        gauge.apply_command(GaugeCommand::SetMaxLabelVisible(false));
        assert!(gauge.layout().max_label.is_none());
        gauge.apply_command(GaugeCommand::SetSegments(vec![Segment::new(
            0,
            10,
            Rgba::new(0x01, 0x02, 0x03),
            "only",
        )]));
        assert_eq!(gauge.score_range(), Some((0, 10)));
    }

    #[test]
    fn error_messages_name_the_failure() {
        assert_eq!(
            GaugeError::InvalidFont.to_string(),
            "font data could not be parsed"
        );
    }
}
