use crate::core::{Character, CharacterSource, Diagnostic, Diagnostics};
use crate::utils::error::{HitError, Result};
use serde_json::Value;

/// 載入角色資料；任何失敗都只回報診斷並回傳空列表
pub struct CharacterLoader<S: CharacterSource, D: Diagnostics> {
    source: S,
    diagnostics: D,
}

impl<S: CharacterSource, D: Diagnostics> CharacterLoader<S, D> {
    pub fn new(source: S, diagnostics: D) -> Self {
        Self {
            source,
            diagnostics,
        }
    }

    pub async fn load(&self) -> Vec<Character> {
        let source = self.source.describe();

        match self.try_load().await {
            Ok((characters, rejected)) => {
                self.diagnostics.report(Diagnostic::Loaded {
                    source,
                    accepted: characters.len(),
                    rejected,
                });
                characters
            }
            Err(e) => {
                self.diagnostics.report(Diagnostic::LoadFailed {
                    source,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    async fn try_load(&self) -> Result<(Vec<Character>, usize)> {
        let bytes = self.source.fetch().await?;
        let document: Value = serde_json::from_slice(&bytes)?;

        let items = match document {
            Value::Array(items) => items,
            other => {
                return Err(HitError::DataShapeError {
                    found: json_kind(&other).to_string(),
                })
            }
        };

        let mut characters = Vec::with_capacity(items.len());
        let mut rejected = 0;

        for (index, item) in items.into_iter().enumerate() {
            match parse_record(item) {
                Ok(character) => characters.push(character),
                Err(e) => {
                    rejected += 1;
                    self.diagnostics.report(Diagnostic::RecordRejected {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok((characters, rejected))
    }
}

/// 驗證單筆記錄的形狀：{name: 非空字串, hp: 正整數, icon: 字串}
pub fn parse_record(item: Value) -> Result<Character> {
    let character: Character = serde_json::from_value(item)?;

    if character.name.trim().is_empty() {
        return Err(HitError::RecordError {
            field: "name".to_string(),
            reason: "Name cannot be empty or whitespace-only".to_string(),
        });
    }
    if character.hp == 0 {
        return Err(HitError::RecordError {
            field: "hp".to_string(),
            reason: "Hit points must be a positive integer".to_string(),
        });
    }

    Ok(character)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
