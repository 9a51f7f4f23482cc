use crate::core::engine::EarningsEngine;
use crate::domain::model::{CalculationInputs, CalculationMode, CalculationResult};

/// 一次輸入事件的序號；只有最新的序號可以更新結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// 呼叫端持有的計算狀態：目前分頁與最後一次成功的結果。
///
/// 引擎本身沒有狀態；若計算以非同步方式執行，較舊的事件在較新的事件
/// 之後才完成時，其結果會被丟棄。
#[derive(Debug, Default)]
pub struct CalculatorSession {
    mode: CalculationMode,
    current: Option<CalculationResult>,
    latest: u64,
}

impl CalculatorSession {
    pub fn new(mode: CalculationMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    /// 切換分頁，保留目前的結果
    pub fn switch_mode(&mut self, mode: CalculationMode) {
        if self.mode != mode {
            tracing::debug!("Switching calculator tab: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }

    pub fn current(&self) -> Option<&CalculationResult> {
        self.current.as_ref()
    }

    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// 回報計算完成。過期的序號會被忽略；`None` 保留前一個結果。
    /// 回傳結果是否被採用。
    pub fn complete(&mut self, ticket: Ticket, result: Option<CalculationResult>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                "Discarding stale calculation #{} (latest is #{})",
                ticket.0,
                self.latest
            );
            return false;
        }

        match result {
            Some(result) => {
                self.current = Some(result);
                true
            }
            None => false,
        }
    }

    /// 明確按下「計算」：依目前分頁同步計算
    pub fn submit(&mut self, inputs: &CalculationInputs) -> Option<&CalculationResult> {
        let ticket = self.begin();
        let result = EarningsEngine::compute(self.mode, inputs);
        if result.is_none() {
            tracing::debug!("No result for {} with inputs {:?}", self.mode, inputs);
        }
        self.complete(ticket, result);
        self.current()
    }

    /// 欄位變動時的自動計算：只在收益分頁、且價格與佣金都有填時觸發。
    /// 反推目標收入需要明確送出。
    pub fn on_input_changed(&mut self, inputs: &CalculationInputs) -> Option<&CalculationResult> {
        if self.mode == CalculationMode::Earnings && inputs.has_pricing() {
            return self.submit(inputs);
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing(price: f64, commission: f64) -> CalculationInputs {
        CalculationInputs {
            item_price: Some(price),
            commission_percentage: Some(commission),
            ..Default::default()
        }
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut session = CalculatorSession::default();
        let older = session.begin();
        let newer = session.begin();

        let newer_result = EarningsEngine::forward(&pricing(100.0, 10.0));
        let older_result = EarningsEngine::forward(&pricing(200.0, 10.0));

        assert!(session.complete(newer, newer_result));
        assert!(!session.complete(older, older_result));
        assert_eq!(session.current().unwrap().single_item_earning, 10.0);
    }

    #[test]
    fn test_invalid_input_keeps_previous_result() {
        let mut session = CalculatorSession::default();
        session.submit(&pricing(100.0, 10.0));
        let kept = session.submit(&pricing(0.0, 10.0)).copied();

        assert_eq!(kept.unwrap().single_item_earning, 10.0);
    }

    #[test]
    fn test_auto_calculation_requires_pricing() {
        let mut session = CalculatorSession::default();
        let partial = CalculationInputs {
            item_price: Some(100.0),
            ..Default::default()
        };
        assert!(session.on_input_changed(&partial).is_none());

        let result = session.on_input_changed(&pricing(100.0, 10.0)).copied();
        assert_eq!(result.unwrap().total_earnings, 10.0);
    }

    #[test]
    fn test_items_needed_tab_waits_for_submit() {
        let mut session = CalculatorSession::new(CalculationMode::ItemsNeeded);
        let mut inputs = pricing(50.0, 20.0);
        inputs.target_income = Some(1000.0);

        assert!(session.on_input_changed(&inputs).is_none());
        assert_eq!(session.submit(&inputs).unwrap().items_needed, 100);

        session.switch_mode(CalculationMode::Earnings);
        assert_eq!(session.mode(), CalculationMode::Earnings);
        assert_eq!(session.current().unwrap().items_needed, 100);
    }
}
