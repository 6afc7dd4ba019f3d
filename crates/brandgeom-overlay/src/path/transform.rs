//! SVG `transform` attribute parsing.
//!
//! Supports `matrix`, `translate`, `scale`, `rotate` (with optional pivot),
//! `skewX` and `skewY`. A list is applied right to left, as in SVG.

use brandgeom_core::ParseError;
use lyon::geom::Transform;

/// Affine transform in SVG `matrix(a b c d e f)` layout.
pub type Affine = Transform<f64>;

pub fn identity() -> Affine {
    Transform::identity()
}

fn translation(tx: f64, ty: f64) -> Affine {
    Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
}

/// Parse a transform list into a single affine transform.
pub fn parse_transform(value: &str) -> Result<Affine, ParseError> {
    let invalid = || ParseError::InvalidTransform {
        value: value.to_string(),
    };

    let mut result = identity();
    let mut rest = value.trim();
    while !rest.is_empty() {
        let open = rest.find('(').ok_or_else(invalid)?;
        let close = rest.find(')').ok_or_else(invalid)?;
        if close < open {
            return Err(invalid());
        }
        let name = rest[..open].trim().trim_start_matches(',').trim();
        let args: Vec<f64> = rest[open + 1..close]
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        let step = match (name, args.as_slice()) {
            ("matrix", [a, b, c, d, e, f]) => Transform::new(*a, *b, *c, *d, *e, *f),
            ("translate", [tx]) => translation(*tx, 0.0),
            ("translate", [tx, ty]) => translation(*tx, *ty),
            ("scale", [s]) => Transform::new(*s, 0.0, 0.0, *s, 0.0, 0.0),
            ("scale", [sx, sy]) => Transform::new(*sx, 0.0, 0.0, *sy, 0.0, 0.0),
            ("rotate", [deg]) => rotation(*deg),
            ("rotate", [deg, cx, cy]) => translation(-cx, -cy)
                .then(&rotation(*deg))
                .then(&translation(*cx, *cy)),
            ("skewX", [deg]) => Transform::new(1.0, 0.0, deg.to_radians().tan(), 1.0, 0.0, 0.0),
            ("skewY", [deg]) => Transform::new(1.0, deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0),
            _ => return Err(invalid()),
        };

        // Later entries apply first.
        result = step.then(&result);
        rest = rest[close + 1..].trim_start();
    }
    Ok(result)
}

fn rotation(deg: f64) -> Affine {
    let (sin, cos) = deg.to_radians().sin_cos();
    Transform::new(cos, sin, -sin, cos, 0.0, 0.0)
}
