//! End-to-end evaluations through the full pipeline and risk governor.

use chrono::{Duration, TimeZone, Utc};
use levelgate_clock::ReplayClock;
use levelgate_core::{
    BiasSignal, Direction, GovernorVerdict, LevelCategory, LevelSet, MarketLevel,
    OrderFlowOutcome, OrderFlowSnapshot, Pressure, PriceSnapshot, Strength, Timestamp, VixLevel,
};
use levelgate_pipeline::{DecisionPipeline, EngineConfig, MarketSnapshot};
use levelgate_ports::{Clock, EngineError, InputSource, RiskControl};
use levelgate_risk_manager::{RiskGovernor, RiskLimits};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;

fn init() {
    let _ = env_logger::try_init();
}

fn as_of() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 3, 14, 45, 0).unwrap()
}

fn pipeline_on_clock(config: EngineConfig) -> (DecisionPipeline, Arc<ReplayClock>) {
    let clock = ReplayClock::starting_at(as_of());
    let governor = Arc::new(RiskGovernor::new(config.risk.clone(), clock.clone()));
    (DecisionPipeline::new(Arc::new(config), governor).unwrap(), clock)
}

fn pipeline_with(config: EngineConfig) -> DecisionPipeline {
    pipeline_on_clock(config).0
}

fn pipeline() -> DecisionPipeline {
    pipeline_with(EngineConfig::default())
}

fn scenario_a_levels(t: Timestamp) -> LevelSet {
    LevelSet::new(
        vec![
            MarketLevel::new(dec!(4500.50), LevelCategory::GammaWall0Dte),
            MarketLevel::new(dec!(4501.00), LevelCategory::CallResistance),
        ],
        t,
    )
    .unwrap()
}

fn scenario_a(flow: OrderFlowSnapshot) -> MarketSnapshot {
    scenario_a_at(as_of(), flow)
}

/// Scenario A with every part stamped `t`
fn scenario_a_at(t: Timestamp, flow: OrderFlowSnapshot) -> MarketSnapshot {
    MarketSnapshot::builder(t)
        .price(PriceSnapshot::new(dec!(4500.00), dec!(0.25), t))
        .levels(scenario_a_levels(t))
        .bias(BiasSignal::new(0.45, t))
        .order_flow(flow)
        .vix(VixLevel::new(20.0, t))
        .build()
        .unwrap()
}

fn confirming_flow() -> OrderFlowSnapshot {
    OrderFlowSnapshot::new(Pressure::Up, 0.35, 4200.0, as_of())
}

#[test]
fn test_scenario_a_long_near_gamma_wall() {
    init();
    let decision = pipeline().evaluate(&scenario_a(confirming_flow())).unwrap();

    assert_eq!(decision.direction(), Direction::Long);
    assert!(matches!(decision.strength(), Strength::Strong | Strength::Extreme));
    assert!(decision.confidence() >= 0.75);
    assert_eq!(decision.proximity_score(), 1.0);
    assert_eq!(decision.order_flow(), &OrderFlowOutcome::Confirmed);
    assert_eq!(decision.verdict(), &GovernorVerdict::Allowed);
    assert!(decision.is_actionable());
    assert_eq!(decision.evaluated_at(), as_of());

    let rationale = decision.rationale();
    assert!(rationale[0].starts_with("Signal Long"));
    assert!(rationale[1].starts_with("Composite"));
    assert!(rationale[2].starts_with("Nearest level gamma_wall_0dte"));
    assert!(rationale.iter().any(|l| l.starts_with("2 critical level(s)")));
    assert!(rationale.iter().any(|l| l == "Gamma wall 2 ticks away"));
    assert_eq!(rationale.last().unwrap(), "Risk governor: allowed");
}

#[test]
fn test_scenario_b_far_gex_levels_no_signal() {
    init();
    let t = as_of();
    let snapshot = MarketSnapshot::builder(t)
        .price(PriceSnapshot::new(dec!(4500.00), dec!(0.25), t))
        .levels(
            LevelSet::new(
                vec![
                    MarketLevel::new(dec!(4506.00), LevelCategory::GexLevel(1)),
                    MarketLevel::new(dec!(4493.50), LevelCategory::GexLevel(2)),
                    MarketLevel::new(dec!(4510.00), LevelCategory::GexLevel(3)),
                ],
                t,
            )
            .unwrap(),
        )
        .bias(BiasSignal::new(0.05, t))
        .order_flow(confirming_flow())
        .vix(VixLevel::new(20.0, t))
        .build()
        .unwrap();

    let decision = pipeline().evaluate(&snapshot).unwrap();

    assert_eq!(decision.direction(), Direction::Neutral);
    assert_eq!(decision.strength(), Strength::NoSignal);
    assert!(decision.confidence() < 0.10);
    assert_eq!(decision.position_multiplier(), 0.0);
    assert_eq!(decision.order_flow(), &OrderFlowOutcome::NotRequired);
}

#[test]
fn test_scenario_c_down_pressure_demotes() {
    init();
    let pipeline = pipeline();
    let flow = OrderFlowSnapshot::new(Pressure::Down, 0.35, 4200.0, as_of());

    let decision = pipeline.evaluate(&scenario_a(flow)).unwrap();

    assert_eq!(decision.direction(), Direction::Neutral);
    assert_eq!(decision.position_multiplier(), 0.0);
    assert!(matches!(decision.order_flow(), OrderFlowOutcome::Rejected(_)));
    // Demoted before the governor, which sees nothing to veto
    assert_eq!(decision.verdict(), &GovernorVerdict::Allowed);
    assert!(
        decision
            .rationale()
            .iter()
            .any(|l| l.contains("demoted to Neutral"))
    );
    assert_eq!(pipeline.stats().snapshot().demotions, 1);
}

#[test]
fn test_kill_switch_forces_neutral_for_rest_of_day() {
    init();
    let pipeline = pipeline_with(EngineConfig {
        risk: RiskLimits {
            max_daily_loss: dec!(500),
            ..Default::default()
        },
        ..Default::default()
    });

    assert!(
        pipeline
            .evaluate(&scenario_a(confirming_flow()))
            .unwrap()
            .is_actionable()
    );

    pipeline.governor().record_trade_result(dec!(-650)).unwrap();

    for _ in 0..5 {
        let decision = pipeline.evaluate(&scenario_a(confirming_flow())).unwrap();
        assert_eq!(decision.direction(), Direction::Neutral);
        assert_eq!(decision.position_multiplier(), 0.0);
        assert!(matches!(decision.verdict(), GovernorVerdict::Vetoed { .. }));
    }

    let stats = pipeline.stats().snapshot();
    assert_eq!(stats.evaluations, 6);
    assert_eq!(stats.actionable, 1);
    assert_eq!(stats.vetoes, 5);
}

#[test]
fn test_next_trading_day_rearms_governor() {
    init();
    let (pipeline, clock) = pipeline_on_clock(EngineConfig::default());
    let control: &dyn RiskControl = pipeline.governor().as_ref();
    control.record_trade_result(dec!(-5000)).unwrap();
    assert!(control.is_tripped().unwrap());

    clock.advance(Duration::days(1));
    let t = clock.now();
    let flow = OrderFlowSnapshot::new(Pressure::Up, 0.35, 4200.0, t);

    let decision = pipeline.evaluate(&scenario_a_at(t, flow)).unwrap();
    assert!(decision.is_actionable());
    assert!(!control.is_tripped().unwrap());
}

#[test]
fn test_snapshot_stamped_tomorrow_keeps_kill_switch() {
    init();
    let (pipeline, clock) = pipeline_on_clock(EngineConfig {
        risk: RiskLimits {
            max_daily_loss: dec!(500),
            ..Default::default()
        },
        ..Default::default()
    });
    pipeline.governor().record_trade_result(dec!(-650)).unwrap();

    let skewed = as_of() + Duration::days(1);
    let flow = OrderFlowSnapshot::new(Pressure::Up, 0.35, 4200.0, skewed);
    let decision = pipeline.evaluate(&scenario_a_at(skewed, flow)).unwrap();
    assert!(!decision.is_actionable());
    assert!(matches!(decision.verdict(), GovernorVerdict::Vetoed { .. }));

    clock.advance(Duration::minutes(1));
    let t = clock.now();
    let flow = OrderFlowSnapshot::new(Pressure::Up, 0.35, 4200.0, t);
    assert!(!pipeline.evaluate(&scenario_a_at(t, flow)).unwrap().is_actionable());

    let state = pipeline.governor().snapshot().unwrap();
    assert!(state.is_tripped());
    assert_eq!(state.daily_realized_loss(), dec!(650));
}

#[test]
fn test_snapshot_replayed_hours_late_is_stale() {
    init();
    let pipeline = pipeline();
    let captured = as_of() - Duration::hours(3);
    let flow = OrderFlowSnapshot::new(Pressure::Up, 0.35, 4200.0, captured);

    let err = pipeline.evaluate(&scenario_a_at(captured, flow)).unwrap_err();

    assert!(matches!(
        err,
        EngineError::StaleData {
            feed: InputSource::Snapshot,
            ..
        }
    ));
    assert_eq!(pipeline.stats().snapshot().actionable, 0);
}

#[test]
fn test_stale_order_flow_aborts() {
    init();
    let pipeline = pipeline();
    let stale = OrderFlowSnapshot::new(Pressure::Up, 0.35, 4200.0, as_of() - Duration::seconds(30));

    let err = pipeline.evaluate(&scenario_a(stale)).unwrap_err();

    assert!(matches!(
        err,
        EngineError::StaleData {
            feed: InputSource::OrderFlow,
            ..
        }
    ));
    assert_eq!(pipeline.stats().snapshot().failures, 1);
}

#[test]
fn test_stale_levels_abort() {
    init();
    let t = as_of();
    let snapshot = MarketSnapshot::builder(t)
        .price(PriceSnapshot::new(dec!(4500.00), dec!(0.25), t))
        .levels(scenario_a_levels(t - Duration::minutes(45)))
        .bias(BiasSignal::new(0.45, t))
        .order_flow(confirming_flow())
        .vix(VixLevel::new(20.0, t))
        .build()
        .unwrap();

    assert!(matches!(
        pipeline().evaluate(&snapshot),
        Err(EngineError::StaleData {
            feed: InputSource::Levels,
            ..
        })
    ));
}

#[test]
fn test_invalid_inputs_never_build() {
    init();
    let t = as_of();

    let zero_tick = MarketSnapshot::builder(t)
        .price(PriceSnapshot::new(dec!(4500.00), dec!(0), t))
        .levels(scenario_a_levels(t))
        .bias(BiasSignal::new(0.45, t))
        .order_flow(confirming_flow())
        .vix(VixLevel::new(20.0, t))
        .build();
    assert!(matches!(zero_tick, Err(EngineError::InvalidInput { .. })));

    let bad_bias = MarketSnapshot::builder(t)
        .price(PriceSnapshot::new(dec!(4500.00), dec!(0.25), t))
        .levels(scenario_a_levels(t))
        .bias(BiasSignal::new(-1.01, t))
        .order_flow(confirming_flow())
        .vix(VixLevel::new(20.0, t))
        .build();
    assert!(matches!(bad_bias, Err(EngineError::InvalidInput { .. })));

    let duplicate = LevelSet::new(
        vec![
            MarketLevel::new(dec!(4500.50), LevelCategory::HvlStd),
            MarketLevel::new(dec!(4500.50), LevelCategory::HvlStd),
        ],
        t,
    )
    .map_err(EngineError::from);
    assert!(matches!(duplicate, Err(EngineError::InvalidInput { .. })));
}

#[test]
fn test_concurrent_evaluations_share_one_governor() {
    init();
    let pipeline = Arc::new(pipeline());

    thread::scope(|s| {
        for _ in 0..4 {
            let pipeline = pipeline.clone();
            s.spawn(move || {
                for _ in 0..10 {
                    let decision = pipeline.evaluate(&scenario_a(confirming_flow())).unwrap();
                    assert_eq!(decision.direction(), Direction::Long);
                }
            });
        }
    });

    assert_eq!(pipeline.stats().snapshot().evaluations, 40);
}
