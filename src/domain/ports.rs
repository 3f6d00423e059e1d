use crate::domain::model::{Damage, GroupCollection};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 角色資料的原始來源（檔案或 HTTP）
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<u8>>;

    fn describe(&self) -> String;
}

/// Loader 回報的診斷事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    LoadFailed { source: String, reason: String },
    RecordRejected { index: usize, reason: String },
    Loaded { source: String, accepted: usize, rejected: usize },
}

pub trait Diagnostics: Send + Sync {
    fn report(&self, event: Diagnostic);
}

pub trait Renderer: Send {
    fn render(&mut self, damage: Damage, groups: &GroupCollection) -> Result<()>;

    fn notify(&mut self, message: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn source_location(&self) -> &str;
    fn default_damage(&self) -> Damage;
    fn icon_base(&self) -> &str;
}

