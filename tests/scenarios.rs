//! End-to-end scenarios for the grid engine and the rebalancer.

use gridfolio::rebalance::{Portfolio, Rebalancer, band_breaches};
use gridfolio::{Action, Decimal, GridConfig, GridEngine, LevelId, RiskLevel};

fn d(n: i64) -> Decimal {
    Decimal::from(n)
}

fn scenario_ladder() -> GridEngine {
    GridEngine::new(GridConfig::new("SPY", d(100), d(5), 2, 2, d(1000))).unwrap()
}

// ============================================================================
// Grid engine
// ============================================================================

#[test]
fn ladder_around_100_at_5_pct() {
    let engine = scenario_ladder();
    let rungs: Vec<(i32, Decimal, Action)> = engine
        .levels()
        .iter()
        .map(|l| (l.level_number, l.trigger_price, l.action))
        .collect();
    assert_eq!(
        rungs,
        vec![
            (-1, d(95), Action::Buy),
            (-2, d(90), Action::Buy),
            (1, d(105), Action::Sell),
            (2, d(110), Action::Sell),
        ]
    );
}

#[test]
fn price_94_triggers_only_first_buy() {
    let actions = scenario_ladder().check_triggers(d(94));
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].level_id, LevelId(-1));
    assert_eq!(actions[0].action, Action::Buy);
    assert_eq!(actions[0].price, d(94));
}

#[test]
fn trading_session_walkthrough() {
    let mut engine = scenario_ladder();

    // Dip: buy at 94, execution reports the fill
    let actions = engine.check_triggers(d(94));
    assert_eq!(actions.len(), 1);
    engine
        .mark_filled(actions[0].level_id.0, actions[0].price, d(10))
        .unwrap();

    // Same price again: nothing left to do
    assert!(engine.check_triggers(d(94)).is_empty());

    // Rally through both sells
    let actions = engine.check_triggers(d(111));
    let ids: Vec<LevelId> = actions.iter().map(|a| a.level_id).collect();
    assert_eq!(ids, vec![LevelId(1), LevelId(2)]);
    for a in &actions {
        engine.mark_filled(a.level_id.0, a.price, d(9)).unwrap();
    }

    let stats = engine.statistics();
    assert_eq!(stats.filled_levels, 3);
    assert_eq!(stats.buy_levels_filled, 1);
    assert_eq!(stats.sell_levels_filled, 2);
    assert_eq!(stats.utilization_rate, Decimal::new(75, 2));

    // Volatility collapses: spacing halves, fills are discarded
    engine.adjust_spacing(Decimal::new(5, 3)).unwrap();
    assert_eq!(engine.config().grid_spacing, Decimal::new(25, 1));
    let stats = engine.statistics();
    assert_eq!(stats.filled_levels, 0);
    let range = stats.price_range.unwrap();
    assert_eq!(range.min, d(95));
    assert_eq!(range.max, d(105));
}

// ============================================================================
// Rebalancer
// ============================================================================

#[test]
fn sixty_forty_against_fifty_fifty() {
    let portfolio = Portfolio::new(d(1000))
        .with_position("A", d(600))
        .with_position("B", d(400))
        .with_target("A", d(50))
        .with_target("B", d(50))
        .with_band("A", d(5))
        .with_band("B", d(5));

    // Before netting: Sell A 100, Buy B 100
    let raw = band_breaches(&portfolio, d(5));
    assert_eq!(raw.len(), 2);
    assert_eq!((raw[0].symbol.as_str(), raw[0].action, raw[0].value), ("A", Action::Sell, d(100)));
    assert_eq!((raw[1].symbol.as_str(), raw[1].action, raw[1].value), ("B", Action::Buy, d(100)));

    // The buy fully absorbs the sell
    let plan = Rebalancer::default().plan(&portfolio);
    assert!(plan.actions.is_empty());
    assert!(!plan.needs_rebalancing);
}

#[test]
fn partial_offset_keeps_net_buy() {
    let portfolio = Portfolio::new(d(1000))
        .with_position("A", d(600))
        .with_position("B", d(200))
        .with_target("A", d(50))
        .with_target("B", d(50));

    // Sell A 100, Buy B 300 -> Buy B 200
    let actions = Rebalancer::default().compute_actions(&portfolio);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].symbol, "B");
    assert_eq!(actions[0].action, Action::Buy);
    assert_eq!(actions[0].value, d(200));
    assert_eq!(actions[0].reason, "Outside rebalance band by 30.00%");
}

#[test]
fn equal_halves_metrics() {
    let portfolio = Portfolio::new(d(1000))
        .with_position("A", d(500))
        .with_position("B", d(500));
    let metrics = Rebalancer::default().metrics(&portfolio);
    assert_eq!(metrics.herfindahl_index, Decimal::new(5, 1));
    assert_eq!(metrics.diversification_ratio, d(2));
    assert_eq!(metrics.max_concentration, Decimal::new(5, 1));
    assert_eq!(metrics.num_positions, 2);
}

#[test]
fn risk_of_a_concentrated_book() {
    let portfolio = Portfolio::new(d(10_000))
        .with_position("AAPL", d(4_500))
        .with_position("MSFT", d(2_500))
        .with_position("SPY", d(2_000))
        .with_position("CASHLIKE", d(50));
    let risk = Rebalancer::default().assess_risk(&portfolio);
    // 45 + (10 - 3) * 2 = 59
    assert_eq!(risk.risk_score, d(59));
    assert_eq!(risk.risk_level, RiskLevel::Medium);
    assert_eq!(risk.significant_positions, 3);
    let top: Vec<&str> = risk
        .top_concentrations
        .iter()
        .map(|c| c.symbol.as_str())
        .collect();
    assert_eq!(top, vec!["AAPL", "MSFT", "SPY", "CASHLIKE"]);
}
