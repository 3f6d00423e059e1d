pub mod calculator;
pub mod engine;
pub mod loader;

pub use crate::domain::model::{
    Character, CharacterWithHits, Damage, Group, GroupCollection, RequestToken,
};
pub use crate::domain::ports::{CharacterSource, ConfigProvider, Diagnostic, Diagnostics, Renderer};
pub use crate::utils::error::Result;
