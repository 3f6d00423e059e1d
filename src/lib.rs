pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::diagnostics::TracingDiagnostics;
pub use crate::adapters::render::{CsvRenderer, JsonRenderer, TextRenderer};
pub use crate::adapters::source::{DataSource, FileSource, HttpSource};
pub use crate::config::{HitConfig, OutputFormat};
pub use crate::core::calculator::{compute, hits_required};
pub use crate::core::engine::{HitEngine, Outcome};
pub use crate::core::loader::CharacterLoader;
pub use crate::domain::model::{Character, CharacterWithHits, Damage, Group, GroupCollection};
pub use crate::utils::error::{HitError, Result};
