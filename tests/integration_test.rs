//! Integration tests for card_profit

use card_profit::prelude::*;
use card_profit::grading::{default_grading_tiers, tiers_for_value};
use card_profit::shipping::cheapest_eligible;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_buy_then_sell_workflow() {
    let config = CalculatorConfig::default();
    let profile = config.default_profile().unwrap();

    // Bought for $10 plus tax, shipped to us for $1.03
    let basis = CostBasisCalculator::compute(
        dec!(10),
        config.sales_tax_rate,
        false,
        dec!(1.03),
        Decimal::ZERO,
    );
    assert_eq!(basis.total_cost_basis, dec!(11.65));

    let shipping = cheapest_eligible(&config.shipping_options, false, dec!(18)).unwrap();
    let result = ProfitEngine::calculate(
        dec!(18),
        Decimal::ZERO,
        basis.total_cost_basis,
        shipping.cost,
        &profile,
        false,
    );

    // 18 * 0.1325 = 2.385 -> 2.38
    assert_eq!(result.fees.fvf_amount, dec!(2.38));
    assert_eq!(result.total_fees(), dec!(2.78));
    assert_eq!(result.net_proceeds, dec!(14.66));
    assert_eq!(result.net_profit, dec!(3.01));

    let purchase = Purchase {
        card_id: "CARD-000001".to_string(),
        purchase_date: None,
        purchase_price: basis.purchase_price,
        sales_tax_paid: basis.sales_tax,
        shipping_paid: basis.shipping_paid,
        grading_cost: basis.grading_cost,
        source: "Card show".to_string(),
    };
    let sale = Sale::from_result("CARD-000001", None, "eBay", &result);

    let summary = PortfolioAggregator::summarize(&[purchase.clone()], &[sale.clone()]);
    assert_eq!(summary.total_invested, dec!(11.65));
    assert_eq!(summary.total_revenue, dec!(14.66));
    assert_eq!(summary.total_profit, result.net_profit);

    let items = PortfolioAggregator::item_performance(&[purchase], &[sale]);
    assert_eq!(items[0].net_profit, Some(result.net_profit));
    assert_eq!(items[0].roi_pct, Some(result.roi_pct));
}

#[test]
fn test_reference_sale_with_default_profile() {
    let profile = FeeProfile::default();
    let result = ProfitEngine::calculate(dec!(50), dec!(0), dec!(10), dec!(0.56), &profile, false);

    assert_eq!(result.fees.fvf_amount, dec!(6.62));
    assert_eq!(result.fees.per_order_fee, dec!(0.40));
    assert!((result.net_profit - dec!(32.40)).abs() <= dec!(0.05));
    assert!(result.roi_pct > dec!(300));
}

#[test]
fn test_store_profile_is_cheaper() {
    let config = CalculatorConfig::default();
    let standard = config.profile(None).unwrap();
    let store = config.profile(Some("eBay Basic Store")).unwrap();

    let offer = Offer::new(dec!(200), dec!(4.63));
    let on_standard = OfferComparator::analyze(&offer, dec!(80), &standard);
    let on_store = OfferComparator::analyze(&offer, dec!(80), &store);

    assert!(on_store.net_profit() > on_standard.net_profit());
    assert_eq!(on_store.result.fees.fvf_amount, dec!(25.50));
}

#[test]
fn test_all_tiers_breakeven() {
    let profile = FeeProfile::default();
    let tiers = default_grading_tiers();
    let options: Vec<GradingOption> = tiers_for_value(&tiers, dec!(150))
        .into_iter()
        .map(GradingOption::from)
        .collect();

    let inputs = BreakevenInputs {
        raw_cost_basis: dec!(10),
        raw_market_value: dec!(30),
        graded_market_value: dec!(150),
        expected_grade: "10".to_string(),
        raw_shipping_cost: dec!(0.56),
        graded_shipping_cost: dec!(4.63),
    };

    let ranked = BreakevenAnalyzer::compare_multi(&inputs, &options, &profile);
    assert_eq!(ranked.len(), options.len());
    // cheapest tier keeps the most profit
    assert_eq!(ranked[0].option.tier, "Bulk (25+)");
    assert_eq!(ranked[0].recommendation, GradingDecision::Grade);
    // $150 super express eats the whole premium
    let last = ranked.last().unwrap();
    assert_eq!(last.option.tier, "Super Express");
    assert_eq!(last.recommendation, GradingDecision::SellRaw);
    // raw scenario does not depend on the option
    assert!(ranked.iter().all(|r| r.raw_profit() == ranked[0].raw_profit()));
}

#[test]
fn test_results_serialize_to_json() {
    let profile = FeeProfile::default();
    let ranked = OfferComparator::compare(
        &[Offer::new(dec!(30), dec!(0.56)), Offer::new(dec!(5), dec!(4.63))],
        dec!(10),
        &profile,
    );

    let json = serde_json::to_value(&ranked).unwrap();
    assert_eq!(json[0]["recommendation"], "ACCEPT");
    assert_eq!(json[1]["recommendation"], "REJECT");
    assert!(json[0]["result"]["net_profit"].is_string());
}

#[test]
fn test_offers_from_json() {
    let offers: Vec<Offer> = serde_json::from_str(
        r#"[
            {"price": "30.00", "shipping_cost": "0.56"},
            {"price": "45.00", "shipping_cost": "4.63", "shipping_charged": "5.00", "label": "with shipping"},
            {"price": 100, "is_international": true}
        ]"#,
    )
    .unwrap();

    assert_eq!(offers.len(), 3);
    assert_eq!(offers[1].display_label(), "with shipping");
    assert!(offers[2].is_international);
    assert_eq!(offers[2].shipping_cost, Decimal::ZERO);
}
