//! # Vector Source Import
//!
//! Ingests an SVG document into a [`ParsedArtwork`].
//!
//! Supports:
//! - `path`, `rect` (with `rx`/`ry`), `circle`, `ellipse`, `line`, `polyline`, `polygon`
//! - `<g transform>` nesting; element and group transforms compose down the tree
//! - Content of `defs`, `clipPath`, `mask`, `symbol`, `pattern` and `marker` is skipped
//!
//! Each drawable element becomes one component (a multi-subpath `path` is a
//! compound path). Components without positive area are dropped. Any syntax
//! problem aborts the whole import; there is no partial recovery.

use crate::artwork::{classify_icons, ParsedArtwork, VectorComponent};
use crate::path::transform::{identity, Affine};
use crate::path::{parse_path_data, parse_transform, PathBuilder, VectorPath};
use brandgeom_core::{ArtPath, Bounds, ParseError, Point};
use tracing::{debug, info, warn};

/// Containers whose children are never rendered directly.
const HIDDEN_CONTAINERS: &[&str] = &["defs", "clipPath", "mask", "symbol", "pattern", "marker"];

const SHAPE_ELEMENTS: &[&str] = &[
    "path", "rect", "circle", "ellipse", "line", "polyline", "polygon",
];

#[derive(Debug)]
struct Tag<'a> {
    name: &'a str,
    body: &'a str,
    closing: bool,
    self_closing: bool,
}

#[derive(Debug)]
struct Frame<'a> {
    name: &'a str,
    transform: Affine,
    hidden: bool,
}

/// Parse an SVG document into artwork components.
pub fn parse_source(source: &str) -> Result<ParsedArtwork, ParseError> {
    let tags = scan_tags(source)?;
    match tags.iter().find(|t| !t.closing) {
        Some(first) if first.name == "svg" => {}
        _ => return Err(ParseError::MissingSvgRoot),
    }

    let mut stack: Vec<Frame> = Vec::new();
    let mut components = Vec::new();
    let mut dropped = 0usize;

    for tag in &tags {
        if tag.closing {
            match stack.pop() {
                Some(frame) if frame.name == tag.name => continue,
                _ => return Err(ParseError::UnbalancedGroup),
            }
        }

        let parent = stack.last();
        let parent_transform = parent.map(|f| f.transform).unwrap_or_else(identity);
        let parent_hidden = parent.map(|f| f.hidden).unwrap_or(false);

        let local = match attr(tag.body, "transform") {
            Some(value) => parse_transform(value)?,
            None => identity(),
        };
        // Element transform applies before its ancestors'.
        let transform = local.then(&parent_transform);

        if !parent_hidden && SHAPE_ELEMENTS.contains(&tag.name) {
            let path = shape_path(tag)?.transformed(&transform);
            let bounds = path.bounds();
            if path.is_empty() || !bounds.has_area() {
                warn!("Skipping zero-area <{}>", tag.name);
                dropped += 1;
            } else {
                components.push(VectorComponent {
                    id: format!("comp-{}", components.len()),
                    path,
                    bounds,
                    is_icon: false,
                });
            }
        } else if !parent_hidden && !SHAPE_ELEMENTS.contains(&tag.name) && !is_structural(tag.name)
        {
            debug!("Ignoring <{}>", tag.name);
        }

        if !tag.self_closing {
            stack.push(Frame {
                name: tag.name,
                transform,
                hidden: parent_hidden || HIDDEN_CONTAINERS.contains(&tag.name),
            });
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::UnbalancedGroup);
    }

    classify_icons(&mut components);
    let artwork = ParsedArtwork::new(components, source.to_string());
    info!(
        "Imported {} components ({} dropped), {} anchors, bounds {:.1}x{:.1}",
        artwork.components.len(),
        dropped,
        artwork.segments.len(),
        artwork.full_bounds.width,
        artwork.full_bounds.height
    );
    Ok(artwork)
}

fn is_structural(name: &str) -> bool {
    matches!(name, "svg" | "g" | "title" | "desc" | "metadata" | "style")
        || HIDDEN_CONTAINERS.contains(&name)
}

/// Split the document into element tags, skipping comments, processing
/// instructions, doctype and CDATA.
fn scan_tags(source: &str) -> Result<Vec<Tag<'_>>, ParseError> {
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find('<') {
        let start = pos + rel;
        let rest = &source[start..];

        let skip_until = |marker: &str| -> Result<usize, ParseError> {
            rest.find(marker)
                .map(|end| start + end + marker.len())
                .ok_or(ParseError::UnterminatedTag { offset: start })
        };
        if rest.starts_with("<!--") {
            pos = skip_until("-->")?;
            continue;
        }
        if rest.starts_with("<![CDATA[") {
            pos = skip_until("]]>")?;
            continue;
        }
        if rest.starts_with("<?") {
            pos = skip_until("?>")?;
            continue;
        }
        if rest.starts_with("<!") {
            pos = skip_until(">")?;
            continue;
        }

        let end = tag_end(rest).ok_or(ParseError::UnterminatedTag { offset: start })?;
        let inner = &rest[1..end];
        pos = start + end + 1;

        let closing = inner.starts_with('/');
        let inner = inner.trim_start_matches('/');
        let self_closing = inner.trim_end().ends_with('/');
        let inner = inner.trim_end().trim_end_matches('/');
        let name_len = inner
            .find(|c: char| c.is_whitespace())
            .unwrap_or(inner.len());
        let name = &inner[..name_len];
        if name.is_empty() {
            return Err(ParseError::UnterminatedTag { offset: start });
        }

        tags.push(Tag {
            name,
            body: &inner[name_len..],
            closing,
            self_closing,
        });
    }

    Ok(tags)
}

/// Index of the `>` closing the tag at the start of `rest`, ignoring any
/// inside quoted attribute values.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in rest.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return Some(i),
            (None, '<') if i > 0 => return None,
            _ => {}
        }
    }
    None
}

/// Value of attribute `name` in a tag body; matches whole names only.
fn attr<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let key_start = i;
        while i < bytes.len() && bytes[i] != b'=' && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let key = &body[key_start..i];
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            // Bare attribute without a value.
            if i == key_start {
                i += 1;
            }
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let quote = *bytes.get(i)?;
        if quote != b'"' && quote != b'\'' {
            return None;
        }
        let value_start = i + 1;
        let value_len = body[value_start..].find(quote as char)?;
        if key == name {
            return Some(&body[value_start..value_start + value_len]);
        }
        i = value_start + value_len + 1;
    }
    None
}

/// Numeric attribute with an optional `px` suffix; missing means `default`.
fn number_attr(tag: &Tag, name: &str, default: f64) -> Result<f64, ParseError> {
    match attr(tag.body, name) {
        None => Ok(default),
        Some(raw) => {
            let trimmed = raw.trim();
            trimmed
                .strip_suffix("px")
                .unwrap_or(trimmed)
                .trim()
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber {
                    attribute: name.to_string(),
                    value: raw.to_string(),
                })
        }
    }
}

fn points_attr(tag: &Tag) -> Result<Vec<Point>, ParseError> {
    let raw = attr(tag.body, "points").unwrap_or("");
    let values = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                attribute: "points".to_string(),
                value: raw.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if values.len() % 2 != 0 {
        return Err(ParseError::InvalidPathData {
            element: tag.name.to_string(),
            reason: "odd number of coordinates".to_string(),
        });
    }
    Ok(values
        .chunks_exact(2)
        .map(|xy| Point::new(xy[0], xy[1]))
        .collect())
}

/// Untransformed outline of a drawable element.
fn shape_path(tag: &Tag) -> Result<VectorPath, ParseError> {
    let mut builder = PathBuilder::new();
    match tag.name {
        "path" => return parse_path_data(attr(tag.body, "d").unwrap_or(""), "path"),
        "rect" => {
            let x = number_attr(tag, "x", 0.0)?;
            let y = number_attr(tag, "y", 0.0)?;
            let w = number_attr(tag, "width", 0.0)?;
            let h = number_attr(tag, "height", 0.0)?;
            if w > 0.0 && h > 0.0 {
                let rx = attr(tag.body, "rx").map(|_| number_attr(tag, "rx", 0.0)).transpose()?;
                let ry = attr(tag.body, "ry").map(|_| number_attr(tag, "ry", 0.0)).transpose()?;
                let (rx, ry) = match (rx, ry) {
                    (Some(rx), Some(ry)) => (rx, ry),
                    (Some(r), None) | (None, Some(r)) => (r, r),
                    (None, None) => (0.0, 0.0),
                };
                builder.add_rect(Bounds::new(x, y, w, h), rx, ry);
            }
        }
        "circle" => {
            let r = number_attr(tag, "r", 0.0)?;
            let c = Point::new(number_attr(tag, "cx", 0.0)?, number_attr(tag, "cy", 0.0)?);
            if r > 0.0 {
                builder.add_ellipse(c, r, r);
            }
        }
        "ellipse" => {
            let rx = number_attr(tag, "rx", 0.0)?;
            let ry = number_attr(tag, "ry", 0.0)?;
            let c = Point::new(number_attr(tag, "cx", 0.0)?, number_attr(tag, "cy", 0.0)?);
            if rx > 0.0 && ry > 0.0 {
                builder.add_ellipse(c, rx, ry);
            }
        }
        "line" => {
            let from = Point::new(number_attr(tag, "x1", 0.0)?, number_attr(tag, "y1", 0.0)?);
            let to = Point::new(number_attr(tag, "x2", 0.0)?, number_attr(tag, "y2", 0.0)?);
            builder.add_polyline(&[from, to], false);
        }
        "polyline" => builder.add_polyline(&points_attr(tag)?, false),
        "polygon" => builder.add_polyline(&points_attr(tag)?, true),
        _ => {}
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_matches_whole_names() {
        let body = r#" x="1" rx='2' width = "30" data-x="9""#;
        assert_eq!(attr(body, "x"), Some("1"));
        assert_eq!(attr(body, "rx"), Some("2"));
        assert_eq!(attr(body, "width"), Some("30"));
        assert_eq!(attr(body, "y"), None);
    }

    #[test]
    fn test_scan_skips_comments_and_prolog() {
        let src = r#"<?xml version="1.0"?><!-- <rect/> --><svg><g></g></svg>"#;
        let tags = scan_tags(src).unwrap();
        let names: Vec<_> = tags.iter().map(|t| (t.name, t.closing)).collect();
        assert_eq!(
            names,
            vec![("svg", false), ("g", false), ("g", true), ("svg", true)]
        );
    }

    #[test]
    fn test_quoted_gt_does_not_end_tag() {
        let tags = scan_tags(r#"<svg><text font="a>b"/></svg>"#).unwrap();
        assert_eq!(tags[1].name, "text");
        assert!(tags[1].self_closing);
    }

    #[test]
    fn test_unterminated_tag() {
        assert_eq!(
            scan_tags("<svg><rect x=\"1\"").unwrap_err(),
            ParseError::UnterminatedTag { offset: 5 }
        );
    }

    #[test]
    fn test_number_attr_accepts_px() {
        let tag = Tag {
            name: "rect",
            body: r#" width="12px" height="x""#,
            closing: false,
            self_closing: true,
        };
        assert_eq!(number_attr(&tag, "width", 0.0).unwrap(), 12.0);
        assert!(matches!(
            number_attr(&tag, "height", 0.0),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert_eq!(number_attr(&tag, "x", 3.0).unwrap(), 3.0);
    }
}
