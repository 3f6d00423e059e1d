use crate::core::{Diagnostic, Diagnostics};

/// 預設的診斷輸出：寫進 tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: Diagnostic) {
        match event {
            Diagnostic::LoadFailed { source, reason } => {
                tracing::error!("❌ Could not load characters from {}: {}", source, reason);
            }
            Diagnostic::RecordRejected { index, reason } => {
                tracing::warn!("⚠️ Skipping character record #{}: {}", index, reason);
            }
            Diagnostic::Loaded {
                source,
                accepted,
                rejected,
            } => {
                tracing::debug!(
                    "Loaded {} characters from {} ({} rejected)",
                    accepted,
                    source,
                    rejected
                );
            }
        }
    }
}
