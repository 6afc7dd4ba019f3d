//! Drawing surface for overlay primitives
//!
//! Renderers add stylised primitives to an [`OverlaySurface`]; the surface is
//! the single output of a redraw. Every primitive is a first-class vector
//! element, so the surface serialises back to SVG without loss and can be
//! rasterised (see [`crate::renderer`]).

use crate::path::fmt_num;
use brandgeom_core::{Bounds, Color, Outline, Point};
use brandgeom_settings::{OverlayKind, StyleConfig};
use std::f64::consts::TAU;
use std::fmt;

/// Segments used when flattening a full circle.
const CIRCLE_SEGMENTS: usize = 64;

/// Default label size in surface units.
pub const LABEL_FONT_SIZE: f64 = 10.0;

/// Geometric primitive emitted by a renderer.
///
/// Angles are in degrees, measured from +x towards +y (clockwise on screen).
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
    },
    Rect(Bounds),
    Circle {
        center: Point,
        radius: f64,
    },
    Arc {
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
    },
    Text {
        position: Point,
        content: String,
    },
}

impl Primitive {
    pub fn line(from: Point, to: Point) -> Self {
        Self::Line { from, to }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    pub fn text(position: Point, content: impl Into<String>) -> Self {
        Self::Text {
            position,
            content: content.into(),
        }
    }

    fn arc_point(center: Point, radius: f64, deg: f64) -> Point {
        let a = deg.to_radians();
        Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
    }

    /// Flattened geometry used for intersection tests.
    ///
    /// Text has no outline and never intersects anything.
    pub fn outline(&self) -> Outline {
        match self {
            Self::Line { from, to } => Outline::single(vec![*from, *to]),
            Self::Polyline { points, closed } => {
                let mut chain = points.clone();
                if *closed {
                    if let Some(first) = points.first() {
                        chain.push(*first);
                    }
                }
                Outline::single(chain)
            }
            Self::Rect(b) => {
                let [tl, tr, br, bl] = b.corners();
                Outline::single(vec![tl, tr, br, bl, tl])
            }
            Self::Circle { center, radius } => Outline::single(
                (0..=CIRCLE_SEGMENTS)
                    .map(|i| {
                        let a = TAU * i as f64 / CIRCLE_SEGMENTS as f64;
                        Point::new(center.x + radius * a.cos(), center.y + radius * a.sin())
                    })
                    .collect(),
            ),
            Self::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } => {
                let steps = ((sweep_deg.abs() / 360.0 * CIRCLE_SEGMENTS as f64).ceil() as usize)
                    .max(2);
                Outline::single(
                    (0..=steps)
                        .map(|i| {
                            let deg = start_deg + sweep_deg * i as f64 / steps as f64;
                            Self::arc_point(*center, *radius, deg)
                        })
                        .collect(),
                )
            }
            Self::Text { .. } => Outline::default(),
        }
    }

    /// Standalone SVG element for this primitive.
    fn to_svg(&self, style: &PrimitiveStyle) -> String {
        let attrs = style.svg_attributes(matches!(self, Self::Text { .. }));
        match self {
            Self::Line { from, to } => format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" {}/>"#,
                fmt_num(from.x),
                fmt_num(from.y),
                fmt_num(to.x),
                fmt_num(to.y),
                attrs
            ),
            Self::Polyline { points, closed } => {
                let pts: Vec<String> = points
                    .iter()
                    .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                    .collect();
                let tag = if *closed { "polygon" } else { "polyline" };
                format!(r#"<{} points="{}" {}/>"#, tag, pts.join(" "), attrs)
            }
            Self::Rect(b) => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" {}/>"#,
                fmt_num(b.left),
                fmt_num(b.top),
                fmt_num(b.width),
                fmt_num(b.height),
                attrs
            ),
            Self::Circle { center, radius } => format!(
                r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius),
                attrs
            ),
            Self::Arc {
                center,
                radius,
                start_deg,
                sweep_deg,
            } => {
                let from = Self::arc_point(*center, *radius, *start_deg);
                let to = Self::arc_point(*center, *radius, start_deg + sweep_deg);
                let large = u8::from(sweep_deg.abs() > 180.0);
                let sweep = u8::from(*sweep_deg > 0.0);
                format!(
                    r#"<path d="M{} {} A{} {} 0 {} {} {} {}" {}/>"#,
                    fmt_num(from.x),
                    fmt_num(from.y),
                    fmt_num(*radius),
                    fmt_num(*radius),
                    large,
                    sweep,
                    fmt_num(to.x),
                    fmt_num(to.y),
                    attrs
                )
            }
            Self::Text { position, content } => format!(
                r#"<text x="{}" y="{}" {}>{}</text>"#,
                fmt_num(position.x),
                fmt_num(position.y),
                attrs,
                escape_text(content)
            ),
        }
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Stroke/fill parameters of one surface item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveStyle {
    pub stroke: Color,
    pub stroke_width: f64,
    /// `[on, off]` dash lengths
    pub dash: Option<[f64; 2]>,
    pub fill: Option<Color>,
    pub font_size: f64,
}

impl PrimitiveStyle {
    /// Solid stroke in the configured color, opacity and width.
    pub fn from_config(style: &StyleConfig) -> Self {
        Self {
            stroke: style.color(),
            stroke_width: style.stroke_width,
            dash: None,
            fill: None,
            font_size: LABEL_FONT_SIZE,
        }
    }

    /// Multiply stroke and fill opacity by `factor`.
    pub fn faded(self, factor: f64) -> Self {
        Self {
            stroke: self.stroke.faded(factor),
            fill: self.fill.map(|f| f.faded(factor)),
            ..self
        }
    }

    pub fn dashed(self, on: f64, off: f64) -> Self {
        Self {
            dash: Some([on, off]),
            ..self
        }
    }

    /// Fill with the stroke color at `factor` of its opacity.
    pub fn filled(self, factor: f64) -> Self {
        Self {
            fill: Some(self.stroke.faded(factor)),
            ..self
        }
    }

    pub fn width(self, stroke_width: f64) -> Self {
        Self {
            stroke_width,
            ..self
        }
    }

    pub fn font(self, font_size: f64) -> Self {
        Self { font_size, ..self }
    }

    /// Style for text: filled glyphs, no dash.
    pub fn label(self) -> Self {
        Self {
            fill: Some(self.stroke),
            dash: None,
            ..self
        }
    }

    fn svg_attributes(&self, text: bool) -> String {
        let mut out = if text {
            format!(
                r#"font-size="{}" font-family="sans-serif" fill="{}" fill-opacity="{}""#,
                fmt_num(self.font_size),
                self.stroke.to_hex(),
                fmt_num(self.stroke.a)
            )
        } else {
            format!(
                r#"stroke="{}" stroke-opacity="{}" stroke-width="{}""#,
                self.stroke.to_hex(),
                fmt_num(self.stroke.a),
                fmt_num(self.stroke_width)
            )
        };
        if text {
            return out;
        }
        if let Some([on, off]) = self.dash {
            out.push_str(&format!(r#" stroke-dasharray="{} {}""#, fmt_num(on), fmt_num(off)));
        }
        match self.fill {
            Some(fill) => out.push_str(&format!(
                r#" fill="{}" fill-opacity="{}""#,
                fill.to_hex(),
                fmt_num(fill.a)
            )),
            None => out.push_str(r#" fill="none""#),
        }
        out
    }
}

/// Which pass of the composition produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Clearspace,
    ConstructionGrid,
    Overlay(OverlayKind),
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clearspace => write!(f, "clearspace"),
            Self::ConstructionGrid => write!(f, "construction-grid"),
            Self::Overlay(kind) => write!(f, "{}", kind.to_string().to_lowercase().replace(' ', "-")),
        }
    }
}

/// Handle of an item on the surface; never reused within one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceItem {
    pub id: ItemId,
    pub layer: Layer,
    pub primitive: Primitive,
    pub style: PrimitiveStyle,
}

/// Ordered collection of stylised primitives; later items draw on top.
#[derive(Debug, Clone)]
pub struct OverlaySurface {
    items: Vec<SurfaceItem>,
    layer: Layer,
    next_id: u64,
}

impl Default for OverlaySurface {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            layer: Layer::Clearspace,
            next_id: 0,
        }
    }
}

impl OverlaySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer assigned to subsequently added items.
    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn add(&mut self, primitive: Primitive, style: PrimitiveStyle) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(SurfaceItem {
            id,
            layer: self.layer,
            primitive,
            style,
        });
        id
    }

    pub fn remove(&mut self, id: ItemId) -> Option<SurfaceItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: ItemId) -> Option<&SurfaceItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &SurfaceItem> {
        self.items.iter()
    }

    pub fn items_in(&self, layer: Layer) -> impl Iterator<Item = &SurfaceItem> {
        self.items.iter().filter(move |item| item.layer == layer)
    }

    /// SVG elements for every item, grouped by consecutive layer.
    pub fn svg_body(&self) -> String {
        let mut out = String::new();
        let mut open: Option<Layer> = None;
        for item in &self.items {
            if open != Some(item.layer) {
                if open.is_some() {
                    out.push_str("</g>\n");
                }
                out.push_str(&format!("<g class=\"{}\">\n", item.layer));
                open = Some(item.layer);
            }
            out.push_str("  ");
            out.push_str(&item.primitive.to_svg(&item.style));
            out.push('\n');
        }
        if open.is_some() {
            out.push_str("</g>\n");
        }
        out
    }

    /// Standalone SVG document of the surface.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        svg_document(width, height, &self.svg_body())
    }
}

pub(crate) fn svg_document(width: u32, height: u32, body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
        w = width,
        h = height,
        body = body
    )
}
