use crate::utils::validation::{parse_count, parse_decimal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 轉換率未填或不合法時使用的預設值（百分比）
pub const DEFAULT_CONVERSION_RATE: f64 = 2.0;
pub const DEFAULT_QUANTITY: u64 = 1;
pub const DEFAULT_MONTHLY_SALES: u64 = 0;

/// 使用者在表單上輸入的原始文字
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInputs {
    pub item_price: Option<String>,
    pub commission_percentage: Option<String>,
    pub quantity: Option<String>,
    pub monthly_sales: Option<String>,
    pub conversion_rate: Option<String>,
    pub target_income: Option<String>,
}

/// 一次計算的完整輸入。每次輸入變動都重新建立，不做部分更新。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInputs {
    pub item_price: Option<f64>,
    pub commission_percentage: Option<f64>,
    pub quantity: Option<u64>,
    pub monthly_sales_count: Option<u64>,
    pub conversion_rate_percentage: Option<f64>,
    pub target_income: Option<f64>,
}

impl CalculationInputs {
    /// 解析表單文字；解析失敗與未填視為相同
    pub fn from_text(raw: &RawInputs) -> Self {
        let decimal = |field: &Option<String>| field.as_deref().and_then(parse_decimal);
        let count = |field: &Option<String>| field.as_deref().and_then(parse_count);

        Self {
            item_price: decimal(&raw.item_price),
            commission_percentage: decimal(&raw.commission_percentage),
            quantity: count(&raw.quantity),
            monthly_sales_count: count(&raw.monthly_sales),
            conversion_rate_percentage: decimal(&raw.conversion_rate),
            target_income: decimal(&raw.target_income),
        }
    }

    /// 價格與佣金都有填時才會自動重新計算
    pub fn has_pricing(&self) -> bool {
        self.item_price.is_some() && self.commission_percentage.is_some()
    }

    /// 數量未填或為 0 時當作 1
    pub fn effective_quantity(&self) -> u64 {
        self.quantity
            .filter(|&q| q > 0)
            .unwrap_or(DEFAULT_QUANTITY)
    }

    pub fn effective_monthly_sales(&self) -> u64 {
        self.monthly_sales_count.unwrap_or(DEFAULT_MONTHLY_SALES)
    }

    pub fn effective_conversion_rate(&self) -> f64 {
        normalize_conversion_rate(self.conversion_rate_percentage)
    }
}

/// 非正數、非有限值或未填的轉換率一律換成預設的 2%
pub fn normalize_conversion_rate(rate: Option<f64>) -> f64 {
    rate.filter(|r| r.is_finite() && *r > 0.0)
        .unwrap_or(DEFAULT_CONVERSION_RATE)
}

/// 兩個分頁：由輸入算收益，或由目標收入反推需要的銷售量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculationMode {
    #[default]
    Earnings,
    ItemsNeeded,
}

impl CalculationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationMode::Earnings => "earnings",
            CalculationMode::ItemsNeeded => "items-needed",
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 計算結果。建立後不再修改，重新計算時以新的值取代。
///
/// 正向計算時 `items_needed` 為 0；反向計算時 `monthly_earnings`
/// 與 `yearly_earnings` 為 0。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub single_item_earning: f64,
    pub total_earnings: f64,
    pub items_needed: u64,
    pub monthly_earnings: f64,
    pub yearly_earnings: f64,
    pub conversion_rate_percentage: f64,
}

impl CalculationResult {
    pub fn mode(&self) -> CalculationMode {
        if self.items_needed > 0 {
            CalculationMode::ItemsNeeded
        } else {
            CalculationMode::Earnings
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhopUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub environment: String,
}
