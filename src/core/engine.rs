use crate::core::calculator;
use crate::core::loader::CharacterLoader;
use crate::core::{
    CharacterSource, ConfigProvider, Damage, Diagnostics, GroupCollection, Renderer, RequestToken,
};
use crate::utils::error::{HitError, Result};
use crate::utils::validation::parse_damage;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered {
        token: RequestToken,
        groups: GroupCollection,
    },
    /// 有更新的請求已發出，這次結果不渲染
    Stale {
        token: RequestToken,
        latest: RequestToken,
    },
    Rejected {
        input: String,
        reason: String,
    },
}

/// 已驗證、已排序號的使用者輸入
#[derive(Debug)]
pub enum Submission {
    Accepted { token: RequestToken, damage: Damage },
    Rejected { input: String, error: HitError },
}

/// Loader → Calculator → Renderer；只有最新的請求能渲染
pub struct HitEngine<S: CharacterSource, D: Diagnostics, R: Renderer> {
    loader: CharacterLoader<S, D>,
    renderer: Mutex<R>,
    latest: AtomicU64,
}

impl<S: CharacterSource, D: Diagnostics, R: Renderer> HitEngine<S, D, R> {
    pub fn new(loader: CharacterLoader<S, D>, renderer: R) -> Self {
        Self {
            loader,
            renderer: Mutex::new(renderer),
            latest: AtomicU64::new(0),
        }
    }

    pub fn latest_token(&self) -> RequestToken {
        RequestToken(self.latest.load(Ordering::SeqCst))
    }

    pub fn issue_token(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// 啟動時以預設傷害值自動計算一次
    pub async fn startup<C: ConfigProvider>(&self, config: &C) -> Result<Outcome> {
        tracing::info!(
            "🚀 Initial calculation with default damage {}",
            config.default_damage()
        );
        self.recalculate(config.default_damage()).await
    }

    /// 依呼叫順序同步驗證輸入並發出序號；不合法的輸入不會拿到序號
    pub fn accept(&self, raw: &str) -> Submission {
        match parse_damage(raw) {
            Ok(damage) => Submission::Accepted {
                token: self.issue_token(),
                damage,
            },
            Err(error) => Submission::Rejected {
                input: raw.to_string(),
                error,
            },
        }
    }

    /// 執行已接受的請求，或通知使用者輸入不合法
    pub async fn complete(&self, submission: Submission) -> Result<Outcome> {
        match submission {
            Submission::Accepted { token, damage } => self.run_request(token, damage).await,
            Submission::Rejected { input, error } => {
                tracing::warn!("⚠️ Rejected damage input: {}", error);
                self.renderer
                    .lock()
                    .await
                    .notify(&error.user_friendly_message())?;
                Ok(Outcome::Rejected {
                    input,
                    reason: error.to_string(),
                })
            }
        }
    }

    /// 使用者輸入的傷害值；序號在呼叫時就發出，不等到第一次 poll
    pub fn submit(&self, raw: &str) -> impl Future<Output = Result<Outcome>> + '_ {
        let submission = self.accept(raw);
        self.complete(submission)
    }

    pub fn recalculate(&self, damage: Damage) -> impl Future<Output = Result<Outcome>> + '_ {
        let token = self.issue_token();
        self.run_request(token, damage)
    }

    pub async fn run_request(&self, token: RequestToken, damage: Damage) -> Result<Outcome> {
        tracing::debug!("Request {} started with damage {}", token, damage);

        let characters = self.loader.load().await;
        let groups = calculator::compute(&characters, damage);

        let mut renderer = self.renderer.lock().await;
        let latest = self.latest_token();
        if token != latest {
            tracing::debug!("Request {} superseded by {}, skipping render", token, latest);
            return Ok(Outcome::Stale { token, latest });
        }

        renderer.render(damage, &groups)?;
        tracing::info!(
            "✅ Request {} rendered {} groups ({} characters)",
            token,
            groups.len(),
            groups.total_characters()
        );

        Ok(Outcome::Rendered { token, groups })
    }

    pub fn into_renderer(self) -> R {
        self.renderer.into_inner()
    }
}
