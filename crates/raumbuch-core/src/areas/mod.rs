//! Room-area extraction from floor-plan text.

pub mod fallback;
mod parser;
pub mod rules;

pub use parser::{AreaExtractor, ExtractionOptions, UNKNOWN_STYLE_WARNING};
pub use rules::{detect_blueprint_style, RoomExtractor, StyleSignals};
