#[path = "io/raster.rs"]
mod raster;
#[path = "io/svg_export.rs"]
mod svg_export;
