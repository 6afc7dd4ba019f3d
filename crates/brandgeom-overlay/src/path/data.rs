//! SVG path data (`d` attribute) parser.
//!
//! Supports `M L H V C S Q T A Z` in absolute and relative form, implicit
//! command repetition, and compact number syntax (`1.5.5`, `10-5`, packed arc
//! flags). Elliptical arcs are converted to cubic beziers.

use super::{PathBuilder, VectorPath};
use brandgeom_core::{ParseError, Point};
use std::f64::consts::{FRAC_PI_2, TAU};

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || *b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.bytes.len()
    }

    /// Consume a command letter if one is next.
    fn command(&mut self) -> Option<u8> {
        self.skip_separators();
        let b = *self.bytes.get(self.pos)?;
        if b.is_ascii_alphabetic() && b != b'e' && b != b'E' {
            self.pos += 1;
            Some(b)
        } else {
            None
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        self.skip_separators();
        let start = self.pos;
        let peek = |c: &Self| c.bytes.get(c.pos).copied();

        if matches!(peek(self), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        let mut digits = 0;
        while matches!(peek(self), Some(b'0'..=b'9')) {
            self.pos += 1;
            digits += 1;
        }
        if peek(self) == Some(b'.') {
            self.pos += 1;
            while matches!(peek(self), Some(b'0'..=b'9')) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            self.pos = start;
            return Err(format!("expected number at offset {}", start));
        }
        if matches!(peek(self), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(peek(self), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if matches!(peek(self), Some(b'0'..=b'9')) {
                while matches!(peek(self), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
            } else {
                self.pos = mark;
            }
        }

        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .ok_or_else(|| format!("malformed number at offset {}", start))
    }

    fn flag(&mut self) -> Result<bool, String> {
        self.skip_separators();
        match self.bytes.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(format!("expected arc flag at offset {}", self.pos)),
        }
    }

    fn point(&mut self) -> Result<Point, String> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }
}

/// Parse path data into a [`VectorPath`].
///
/// `element` names the owning element in error messages.
pub fn parse_path_data(data: &str, element: &str) -> Result<VectorPath, ParseError> {
    build(data).map_err(|reason| ParseError::InvalidPathData {
        element: element.to_string(),
        reason,
    })
}

fn build(data: &str) -> Result<VectorPath, String> {
    let mut cursor = Cursor::new(data);
    let mut builder = PathBuilder::new();
    let mut last: Option<u8> = None;
    // Reflection sources for the smooth variants.
    let mut last_cubic_ctrl: Option<Point> = None;
    let mut last_quad_ctrl: Option<Point> = None;

    while !cursor.at_end() {
        let cmd = match cursor.command() {
            Some(c) => c,
            None => match last {
                Some(b'M') => b'L',
                Some(b'm') => b'l',
                Some(b'Z' | b'z') | None => {
                    return Err(format!("expected command at offset {}", cursor.pos))
                }
                Some(c) => c,
            },
        };
        if last.is_none() && !matches!(cmd, b'M' | b'm') {
            return Err("path data must begin with a moveto".to_string());
        }

        let relative = cmd.is_ascii_lowercase();
        let origin = if relative { builder.cursor() } else { Point::ZERO };
        let abs = |p: Point| p + origin;
        let current = builder.cursor();

        let mut cubic_ctrl = None;
        let mut quad_ctrl = None;
        match cmd.to_ascii_uppercase() {
            b'M' => builder.move_to(abs(cursor.point()?)),
            b'L' => builder.line_to(abs(cursor.point()?)),
            b'H' => {
                let x = cursor.number()? + origin.x;
                builder.line_to(Point::new(x, current.y));
            }
            b'V' => {
                let y = cursor.number()? + origin.y;
                builder.line_to(Point::new(current.x, y));
            }
            b'C' => {
                let c1 = abs(cursor.point()?);
                let c2 = abs(cursor.point()?);
                let to = abs(cursor.point()?);
                builder.cubic_to(c1, c2, to);
                cubic_ctrl = Some(c2);
            }
            b'S' => {
                let c2 = abs(cursor.point()?);
                let to = abs(cursor.point()?);
                let c1 = last_cubic_ctrl
                    .map(|p| current * 2.0 - p)
                    .unwrap_or(current);
                builder.cubic_to(c1, c2, to);
                cubic_ctrl = Some(c2);
            }
            b'Q' => {
                let c = abs(cursor.point()?);
                let to = abs(cursor.point()?);
                builder.quad_to(c, to);
                quad_ctrl = Some(c);
            }
            b'T' => {
                let to = abs(cursor.point()?);
                let c = last_quad_ctrl
                    .map(|p| current * 2.0 - p)
                    .unwrap_or(current);
                builder.quad_to(c, to);
                quad_ctrl = Some(c);
            }
            b'A' => {
                let rx = cursor.number()?;
                let ry = cursor.number()?;
                let rotation = cursor.number()?;
                let large_arc = cursor.flag()?;
                let sweep = cursor.flag()?;
                let to = abs(cursor.point()?);
                if is_zero_radius(rx, ry) {
                    if current.distance_to(&to) >= 1e-12 {
                        builder.line_to(to);
                    }
                } else {
                    for [c1, c2, end] in arc_to_cubics(current, to, rx, ry, rotation, large_arc, sweep) {
                        builder.cubic_to(c1, c2, end);
                    }
                }
            }
            b'Z' => builder.close(),
            other => return Err(format!("unsupported command '{}'", other as char)),
        }

        last_cubic_ctrl = cubic_ctrl;
        last_quad_ctrl = quad_ctrl;
        last = Some(cmd);
    }

    Ok(builder.build())
}

fn is_zero_radius(rx: f64, ry: f64) -> bool {
    rx.abs() < 1e-12 || ry.abs() < 1e-12
}

fn angle_between(u: Point, v: Point) -> f64 {
    let dot = u.x * v.x + u.y * v.y;
    let det = u.x * v.y - u.y * v.x;
    det.atan2(dot)
}

/// Endpoint-parameterised elliptical arc as cubic segments of at most 90°.
///
/// Returns `[ctrl1, ctrl2, end]` triples. Coincident endpoints and zero radii
/// produce nothing; a zero-radius arc is drawn as a line by the caller.
#[allow(clippy::too_many_arguments)]
fn arc_to_cubics(
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> Vec<[Point; 3]> {
    if from.distance_to(&to) < 1e-12 {
        return Vec::new();
    }
    if is_zero_radius(rx, ry) {
        return Vec::new();
    }
    let (mut rx, mut ry) = (rx.abs(), ry.abs());

    let (sin_phi, cos_phi) = rotation_deg.to_radians().sin_cos();

    // Midpoint in the rotated frame.
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Radii too small to span the endpoints are scaled up.
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let (rx2, ry2) = (rx * rx, ry * ry);
    let denom = rx2 * y1p * y1p + ry2 * x1p * x1p;
    if denom.abs() < 1e-12 {
        return Vec::new();
    }
    let numer = (rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p).max(0.0);
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (numer / denom).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    let u = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
    let mut theta = angle_between(Point::new(1.0, 0.0), u);
    let mut delta = angle_between(u, v);
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    let on_ellipse = |ux: f64, uy: f64| {
        Point::new(
            cx + cos_phi * rx * ux - sin_phi * ry * uy,
            cy + sin_phi * rx * ux + cos_phi * ry * uy,
        )
    };

    let count = ((delta.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let step = delta / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();
    let mut cubics = Vec::with_capacity(count);
    for i in 0..count {
        let t0 = theta;
        let t1 = theta + step;
        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();
        let end = if i + 1 == count { to } else { on_ellipse(c1, s1) };
        cubics.push([
            on_ellipse(c0 - k * s0, s0 + k * c0),
            on_ellipse(c1 + k * s1, s1 - k * c1),
            end,
        ]);
        theta = t1;
    }
    cubics
}
