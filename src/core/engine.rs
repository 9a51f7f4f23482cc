use crate::domain::model::{
    normalize_conversion_rate, CalculationInputs, CalculationMode, CalculationResult,
    DEFAULT_CONVERSION_RATE,
};
use crate::utils::error::EngineError;

const MONTHS_PER_YEAR: f64 = 12.0;

/// 收益計算引擎。純函式、無狀態；輸入不合法時不產生結果。
#[derive(Debug, Clone, Copy, Default)]
pub struct EarningsEngine;

impl EarningsEngine {
    /// 由價格、佣金與銷售量計算收益
    pub fn compute_forward_earnings(
        price: f64,
        commission_percentage: f64,
        quantity: Option<u64>,
        monthly_sales_count: Option<u64>,
    ) -> Option<CalculationResult> {
        Self::forward(&CalculationInputs {
            item_price: Some(price),
            commission_percentage: Some(commission_percentage),
            quantity,
            monthly_sales_count,
            ..Default::default()
        })
    }

    /// 由目標收入反推需要賣出的件數
    pub fn compute_items_needed(
        target_income: f64,
        price: f64,
        commission_percentage: f64,
    ) -> Option<CalculationResult> {
        Self::inverse(&CalculationInputs {
            item_price: Some(price),
            commission_percentage: Some(commission_percentage),
            target_income: Some(target_income),
            ..Default::default()
        })
    }

    pub fn forward(inputs: &CalculationInputs) -> Option<CalculationResult> {
        Self::try_forward(inputs).ok()
    }

    pub fn inverse(inputs: &CalculationInputs) -> Option<CalculationResult> {
        Self::try_inverse(inputs).ok()
    }

    /// 依目前分頁選擇計算方向
    pub fn compute(mode: CalculationMode, inputs: &CalculationInputs) -> Option<CalculationResult> {
        Self::try_compute(mode, inputs).ok()
    }

    pub fn try_compute(
        mode: CalculationMode,
        inputs: &CalculationInputs,
    ) -> Result<CalculationResult, EngineError> {
        match mode {
            CalculationMode::Earnings => Self::try_forward(inputs),
            CalculationMode::ItemsNeeded => Self::try_inverse(inputs),
        }
    }

    pub fn try_forward(inputs: &CalculationInputs) -> Result<CalculationResult, EngineError> {
        let single_item_earning = single_item_earning(inputs)?;
        let quantity = inputs.effective_quantity() as f64;
        let monthly_sales = inputs.effective_monthly_sales() as f64;

        let total_earnings = single_item_earning * quantity;
        let monthly_earnings = single_item_earning * monthly_sales;
        let yearly_earnings = monthly_earnings * MONTHS_PER_YEAR;

        if ![total_earnings, monthly_earnings, yearly_earnings]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(EngineError::invalid("quantity", "earnings exceed representable range"));
        }

        Ok(CalculationResult {
            single_item_earning,
            total_earnings,
            items_needed: 0,
            monthly_earnings,
            yearly_earnings,
            conversion_rate_percentage: inputs.effective_conversion_rate(),
        })
    }

    pub fn try_inverse(inputs: &CalculationInputs) -> Result<CalculationResult, EngineError> {
        let target_income = require_positive("targetIncome", inputs.target_income)?;
        let single_item_earning = single_item_earning(inputs)?;

        // 目標大於 0 時至少要賣一件；極小的目標除法會下溢成 0
        let ratio = (target_income / single_item_earning).ceil().max(1.0);
        if !ratio.is_finite() || ratio >= u64::MAX as f64 {
            return Err(EngineError::invalid(
                "targetIncome",
                "too large relative to the earning per sale",
            ));
        }

        Ok(CalculationResult {
            single_item_earning,
            total_earnings: target_income,
            items_needed: ratio as u64,
            monthly_earnings: 0.0,
            yearly_earnings: 0.0,
            conversion_rate_percentage: inputs.effective_conversion_rate(),
        })
    }

    /// 每成交一筆需要的訪客數。
    ///
    /// 轉換率小到訪客數無法以 `u64` 表示時，與不合法的轉換率一樣改用預設值。
    pub fn visitors_per_sale(conversion_rate_percentage: Option<f64>) -> u64 {
        let visitors = (100.0 / normalize_conversion_rate(conversion_rate_percentage)).ceil();
        if visitors.is_finite() && visitors < u64::MAX as f64 {
            return visitors as u64;
        }
        (100.0 / DEFAULT_CONVERSION_RATE).ceil() as u64
    }
}

fn require_positive(field: &'static str, value: Option<f64>) -> Result<f64, EngineError> {
    match value {
        None => Err(EngineError::invalid(field, "is required")),
        Some(v) if !v.is_finite() => Err(EngineError::invalid(field, "must be a finite number")),
        Some(v) if v <= 0.0 => Err(EngineError::invalid(field, "must be greater than 0")),
        Some(v) => Ok(v),
    }
}

fn single_item_earning(inputs: &CalculationInputs) -> Result<f64, EngineError> {
    let price = require_positive("itemPrice", inputs.item_price)?;
    let commission = require_positive("commissionPercentage", inputs.commission_percentage)?;

    let earning = price * commission / 100.0;
    // 極端值可能溢位成 inf 或下溢成 0
    if !earning.is_finite() || earning <= 0.0 {
        return Err(EngineError::invalid(
            "commissionPercentage",
            "earning per sale is out of range",
        ));
    }
    Ok(earning)
}
