pub mod colors;
pub mod svg;
pub mod tooltip;
