// Adapters layer: concrete implementations of the domain ports (sources, diagnostics, renderers).

pub mod diagnostics;
pub mod render;
pub mod source;
