//! CPU raster surface backed by an RGBA image.
//!
//! Strokes are stamped with a round brush along their flattened outline, which
//! gives round caps and joins for free.

use crate::renderer::{RenderResult, Renderer, RendererError};
use image::{Rgba, RgbaImage, imageops};
use kurbo::{BezPath, PathEl, Point, Rect, Size};
use peniko::Color;
use sheetboard_core::shapes::{SerializableColor, Stroke, StrokeStyle};

/// Flattening tolerance for curved outlines, in pixels.
const FLATTEN_TOLERANCE: f64 = 0.1;
/// On/off lengths of the lasso dash pattern.
const LASSO_DASH: [f64; 2] = [5.0, 5.0];
const LASSO_COLOR: Rgba<u8> = Rgba([80, 80, 80, 255]);
const LASSO_WIDTH: f64 = 1.5;
/// Smallest brush radius that always covers at least one pixel center.
const MIN_BRUSH_RADIUS: f64 = 0.75;

/// An offscreen drawing surface.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba<u8>,
}

impl RasterSurface {
    /// Create a surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidSize { width, height });
        }
        let background = rgba(background.into());
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, background),
            background,
        })
    }

    /// Create an opaque white surface, as used for export pages.
    pub fn white(width: u32, height: u32) -> RenderResult<Self> {
        Self::new(width, height, SerializableColor::white().into())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA value at a pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Packed 8-bit RGB samples, composited over white.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.image.as_raw().len() / 4 * 3);
        for pixel in self.image.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = f32::from(a) / 255.0;
            for channel in [r, g, b] {
                let value = f32::from(channel) * alpha + 255.0 * (1.0 - alpha);
                out.push(value.round().clamp(0.0, 255.0) as u8);
            }
        }
        out
    }

    /// Stroke a path with a round brush of the style's width.
    pub fn stroke_path(&mut self, path: &BezPath, style: &StrokeStyle) {
        let color = rgba(style.color);
        let width = style.effective_width();
        for (from, to) in flatten_segments(path) {
            self.stamp_segment(from, to, width, color);
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let [r, g, b, a] = color.0;
        if a == 0 {
            return;
        }
        let Some(dst) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };
        let src_a = f32::from(a) / 255.0;
        let dst_a = f32::from(dst[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| {
            let src_f = f32::from(src) / 255.0;
            let dst_f = f32::from(dst) / 255.0;
            ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        *dst = Rgba([
            blend(r, dst[0]),
            blend(g, dst[1]),
            blend(b, dst[2]),
            (out_a * 255.0).round() as u8,
        ]);
    }

    /// Fill every pixel whose center lies within `radius` of `center`.
    fn stamp_dot(&mut self, center: Point, radius: f64, color: Rgba<u8>) {
        if radius <= 0.0 {
            return;
        }
        let max_x = f64::from(self.width()) - 1.0;
        let max_y = f64::from(self.height()) - 1.0;
        let min_px = (center.x - radius).floor().max(0.0);
        let max_px = (center.x + radius).ceil().min(max_x);
        let min_py = (center.y - radius).floor().max(0.0);
        let max_py = (center.y + radius).ceil().min(max_y);
        if min_px > max_px || min_py > max_py {
            return;
        }
        let radius_sq = radius * radius;
        for y in (min_py as u32)..=(max_py as u32) {
            for x in (min_px as u32)..=(max_px as u32) {
                let dx = f64::from(x) + 0.5 - center.x;
                let dy = f64::from(y) + 0.5 - center.y;
                if dx * dx + dy * dy <= radius_sq {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn stamp_segment(&mut self, from: Point, to: Point, width: f64, color: Rgba<u8>) {
        let radius = (width / 2.0).max(MIN_BRUSH_RADIUS);
        let Some((t0, t1)) = self.visible_range(from, to, radius) else {
            return;
        };
        let delta = to - from;
        let span = delta.x.abs().max(delta.y.abs()) * (t1 - t0);
        let steps = span.ceil().clamp(1.0, self.step_limit()) as u32;
        for i in 0..=steps {
            let t = t0 + (t1 - t0) * f64::from(i) / f64::from(steps);
            self.stamp_dot(from + delta * t, radius, color);
        }
    }

    /// Part of the segment `from..to` within `margin` of the surface, as a
    /// parameter range. Non-finite endpoints are never visible.
    fn visible_range(&self, from: Point, to: Point, margin: f64) -> Option<(f64, f64)> {
        if !(from.is_finite() && to.is_finite()) {
            log::debug!("Skipping non-finite segment {:?} -> {:?}", from, to);
            return None;
        }
        let bounds = Rect::new(0.0, 0.0, f64::from(self.width()), f64::from(self.height())).inflate(margin, margin);
        clip_range(from, to, bounds)
    }

    /// Upper bound on brush stamps per segment: the surface diagonal.
    fn step_limit(&self) -> f64 {
        f64::from(self.width()).hypot(f64::from(self.height())).ceil().max(1.0)
    }
}

impl Renderer for RasterSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = self.background;
        }
    }

    fn draw_stroke(&mut self, stroke: &Stroke) {
        self.stroke_path(&stroke.to_path(), stroke.style());
    }

    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.stamp_segment(from, to, style.effective_width(), rgba(style.color));
    }

    fn draw_lasso_overlay(&mut self, polygon: &[Point]) {
        let Some(&first) = polygon.first() else {
            return;
        };
        let period = LASSO_DASH[0] + LASSO_DASH[1];
        let mut travelled = 0.0;
        let closed = polygon.iter().copied().chain(std::iter::once(first));
        let mut prev = first;
        for point in closed.skip(1) {
            let delta = point - prev;
            let length = delta.hypot();
            if let Some((t0, t1)) = self.visible_range(prev, point, LASSO_WIDTH) {
                let steps = (length * (t1 - t0)).ceil().clamp(1.0, self.step_limit()) as u32;
                for i in 0..steps {
                    let t = t0 + (t1 - t0) * f64::from(i) / f64::from(steps);
                    if (travelled + length * t) % period < LASSO_DASH[0] {
                        self.stamp_dot(prev + delta * t, LASSO_WIDTH / 2.0, LASSO_COLOR);
                    }
                }
            }
            if length.is_finite() {
                travelled += length;
            }
            prev = point;
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        if width == 0 || height == 0 {
            return Err(RendererError::InvalidSize { width, height });
        }
        if (width, height) == self.image.dimensions() {
            return Ok(());
        }
        let mut resized = RgbaImage::from_pixel(width, height, self.background);
        imageops::replace(&mut resized, &self.image, 0, 0);
        self.image = resized;
        log::info!("Surface resized to {}x{}", width, height);
        Ok(())
    }
}

/// Liang-Barsky clip of `from..to` against `bounds`, as a parameter range
/// within `0..=1`.
fn clip_range(from: Point, to: Point, bounds: Rect) -> Option<(f64, f64)> {
    let delta = to - from;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-delta.x, from.x - bounds.x0),
        (delta.x, bounds.x1 - from.x),
        (-delta.y, from.y - bounds.y0),
        (delta.y, bounds.y1 - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

fn rgba(color: SerializableColor) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Straight segments of a path after flattening curves.
fn flatten_segments(path: &BezPath) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    let mut start = Point::ZERO;
    let mut current = Point::ZERO;
    kurbo::flatten(path, FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            start = p;
            current = p;
        }
        PathEl::LineTo(p) => {
            segments.push((current, p));
            current = p;
        }
        PathEl::ClosePath => {
            segments.push((current, start));
            current = start;
        }
        // flatten only emits the three variants above
        PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
            segments.push((current, p));
            current = p;
        }
    });
    segments
}
