use crate::core::engine::EarningsEngine;
use crate::domain::model::{CalculationMode, CalculationResult};
use crate::utils::format::{format_currency, format_percentage};
use serde::Serialize;

/// 顯示用的衍生資訊，不會被存回結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub visitors_per_sale: u64,
    pub lines: Vec<String>,
}

impl Insights {
    pub fn from_result(result: &CalculationResult) -> Self {
        let visitors_per_sale =
            EarningsEngine::visitors_per_sale(Some(result.conversion_rate_percentage));

        let mut lines = Vec::new();
        if result.single_item_earning > 0.0 {
            lines.push(format!(
                "You earn {} per sale",
                format_currency(result.single_item_earning)
            ));
            lines.push(format!(
                "At {}% conversion rate, you need {} visitors per sale",
                format_percentage(result.conversion_rate_percentage),
                visitors_per_sale
            ));
            if result.monthly_earnings > 0.0 {
                lines.push(format!(
                    "Monthly potential: {}",
                    format_currency(result.monthly_earnings)
                ));
            }
            if result.yearly_earnings > 0.0 {
                lines.push(format!(
                    "Yearly potential: {}",
                    format_currency(result.yearly_earnings)
                ));
            }
        }

        Self {
            visitors_per_sale,
            lines,
        }
    }
}

/// 終端機輸出的計算結果
pub fn render_report(result: &CalculationResult) -> String {
    let mut out = String::from("Calculation Results\n");
    out.push_str(&format!(
        "  Per Item Earning:  {}\n",
        format_currency(result.single_item_earning)
    ));
    let total_label = match result.mode() {
        CalculationMode::Earnings => "Total Earnings",
        CalculationMode::ItemsNeeded => "Target Income",
    };
    out.push_str(&format!(
        "  {:<18} {}\n",
        format!("{}:", total_label),
        format_currency(result.total_earnings)
    ));
    if result.monthly_earnings > 0.0 {
        out.push_str(&format!(
            "  Monthly Earnings:  {}\n",
            format_currency(result.monthly_earnings)
        ));
    }
    if result.yearly_earnings > 0.0 {
        out.push_str(&format!(
            "  Yearly Earnings:   {}\n",
            format_currency(result.yearly_earnings)
        ));
    }
    if result.items_needed > 0 {
        out.push_str(&format!("  Items Needed:      {}\n", result.items_needed));
    }

    let insights = Insights::from_result(result);
    if !insights.lines.is_empty() {
        out.push_str("\nInsights\n");
        for line in &insights.lines {
            out.push_str(&format!("  • {}\n", line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_for_forward_result() {
        let result = EarningsEngine::compute_forward_earnings(40.0, 25.0, None, Some(30)).unwrap();
        let insights = Insights::from_result(&result);

        assert_eq!(insights.visitors_per_sale, 50);
        assert_eq!(
            insights.lines,
            vec![
                "You earn $10.00 per sale".to_string(),
                "At 2% conversion rate, you need 50 visitors per sale".to_string(),
                "Monthly potential: $300.00".to_string(),
                "Yearly potential: $3,600.00".to_string(),
            ]
        );
    }

    #[test]
    fn test_insights_skip_empty_projections() {
        let result = EarningsEngine::compute_items_needed(1000.0, 50.0, 20.0).unwrap();
        let insights = Insights::from_result(&result);
        assert_eq!(insights.lines.len(), 2);
    }

    #[test]
    fn test_report_for_items_needed() {
        let result = EarningsEngine::compute_items_needed(1000.0, 50.0, 20.0).unwrap();
        let report = render_report(&result);

        assert!(report.contains("Target Income:     $1,000.00"));
        assert!(report.contains("Items Needed:      100"));
        assert!(!report.contains("Monthly Earnings"));
    }
}
