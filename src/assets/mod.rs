pub mod color;
pub mod decode;
pub mod import;
pub mod svg_raster;
pub mod text;
