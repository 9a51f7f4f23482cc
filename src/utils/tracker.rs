use crate::domain::ports::UsageTracker;

/// 以日誌記錄使用事件。沒有另外的分析服務，關閉時不輸出任何東西。
#[derive(Debug, Clone, Copy)]
pub struct LogTracker {
    enabled: bool,
}

impl LogTracker {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for LogTracker {
    fn default() -> Self {
        Self::new(false)
    }
}

impl UsageTracker for LogTracker {
    fn record(&self, event: &str, metadata: serde_json::Value) {
        if !self.enabled {
            return;
        }
        tracing::info!(event = event, metadata = %metadata, "📊 Tracking usage");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_by_default() {
        let tracker = LogTracker::default();
        assert!(!tracker.is_enabled());
        tracker.record("app_opened", serde_json::json!({}));
    }

    #[test]
    fn test_record_never_fails() {
        let tracker = LogTracker::new(true);
        tracker.record("calculation_performed", serde_json::json!({ "mode": "earnings" }));
        tracker.record("calculation_performed", serde_json::Value::Null);
    }
}
