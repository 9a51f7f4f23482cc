use affiliate_calc::{
    render_report, CalculationInputs, CalculationMode, CalculatorSession, EarningsEngine,
    Insights, RawInputs,
};

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
        "expected {} but got {}",
        expected,
        actual
    );
}

/// 模擬表單輸入到顯示結果的完整流程
#[test]
fn test_form_flow_forward_then_inverse() {
    let mut session = CalculatorSession::default();

    let mut raw = RawInputs {
        item_price: text("99.99"),
        commission_percentage: text("15.5"),
        quantity: text("3"),
        ..Default::default()
    };
    let result = *session
        .on_input_changed(&CalculationInputs::from_text(&raw))
        .unwrap();
    assert_close(result.single_item_earning, 15.49845);
    assert_close(result.total_earnings, 46.49535);
    assert_eq!(result.items_needed, 0);

    session.switch_mode(CalculationMode::ItemsNeeded);
    raw.item_price = text("50");
    raw.commission_percentage = text("20");
    raw.target_income = text("1000");
    let result = *session
        .submit(&CalculationInputs::from_text(&raw))
        .unwrap();
    assert_close(result.single_item_earning, 10.0);
    assert_eq!(result.items_needed, 100);
    assert_eq!(result.total_earnings, 1000.0);
    assert_eq!(result.monthly_earnings, 0.0);
    assert_eq!(result.yearly_earnings, 0.0);
}

#[test]
fn test_non_numeric_text_yields_no_result() {
    let cases = [("abc", "10"), ("100", "ten"), ("", ""), ("0", "10"), ("-5", "10")];
    for (price, commission) in cases {
        let raw = RawInputs {
            item_price: text(price),
            commission_percentage: text(commission),
            ..Default::default()
        };
        let inputs = CalculationInputs::from_text(&raw);
        assert!(
            EarningsEngine::forward(&inputs).is_none(),
            "price={:?} commission={:?}",
            price,
            commission
        );
    }
}

#[test]
fn test_conversion_rate_default_and_visitors() {
    let raw = RawInputs {
        item_price: text("100"),
        commission_percentage: text("10"),
        conversion_rate: text("not a rate"),
        ..Default::default()
    };
    let result = EarningsEngine::forward(&CalculationInputs::from_text(&raw)).unwrap();
    assert_eq!(result.conversion_rate_percentage, 2.0);
    assert_eq!(Insights::from_result(&result).visitors_per_sale, 50);

    let raw = RawInputs {
        conversion_rate: text("4"),
        ..raw
    };
    let result = EarningsEngine::forward(&CalculationInputs::from_text(&raw)).unwrap();
    assert_eq!(Insights::from_result(&result).visitors_per_sale, 25);
}

#[test]
fn test_forward_projection_properties() {
    for &(price, commission) in &[(100.0, 10.0), (19.99, 7.25), (1500.0, 3.0), (0.5, 80.0)] {
        for quantity in [1u64, 2, 7, 250] {
            for monthly in [0u64, 1, 30, 1000] {
                let result = EarningsEngine::compute_forward_earnings(
                    price,
                    commission,
                    Some(quantity),
                    Some(monthly),
                )
                .unwrap();
                let single = price * commission / 100.0;
                assert_close(result.single_item_earning, single);
                assert_close(result.total_earnings, single * quantity as f64);
                assert_close(result.monthly_earnings, single * monthly as f64);
                assert_close(result.yearly_earnings, result.monthly_earnings * 12.0);
                assert_eq!(result.items_needed, 0);
            }
        }
    }
}

#[test]
fn test_report_shows_projections() {
    let result = EarningsEngine::compute_forward_earnings(100.0, 10.0, Some(5), Some(20)).unwrap();
    let report = render_report(&result);

    assert!(report.contains("Per Item Earning:  $10.00"));
    assert!(report.contains("Total Earnings:    $50.00"));
    assert!(report.contains("Monthly Earnings:  $200.00"));
    assert!(report.contains("Yearly Earnings:   $2,400.00"));
    assert!(report.contains("At 2% conversion rate, you need 50 visitors per sale"));
    assert!(!report.contains("Items Needed"));
}
