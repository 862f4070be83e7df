//! Governor behaviour under concurrent trade reporting and evaluation.

use chrono::{TimeZone, Utc};
use levelgate_clock::ReplayClock;
use levelgate_core::{
    DecisionDraft, Direction, ProximityResult, ScoredDecision, SizedDecision, Strength,
    ValidatedDecision, VixRegime,
};
use levelgate_ports::RiskControl;
use levelgate_risk_manager::{RiskGovernor, RiskLimits, TripReason};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::thread;
use uuid::Uuid;

fn init() {
    let _ = env_logger::try_init();
}

fn extreme_long() -> SizedDecision {
    let scored = ScoredDecision::new(DecisionDraft {
        evaluation_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        direction: Direction::Long,
        strength: Strength::Extreme,
        confidence: 0.97,
        proximity: ProximityResult::default(),
        bias_score: 0.8,
        confluence_score: 1.0,
        rationale: Vec::new(),
    });
    SizedDecision::new(ValidatedDecision::confirmed(scored), 2.4, VixRegime::Low)
}

#[test]
fn test_no_lost_updates_under_contention() {
    init();
    let clock = ReplayClock::starting_at(Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap());
    let governor = Arc::new(RiskGovernor::new(
        RiskLimits {
            max_daily_loss: dec!(1_000_000),
            max_trades_per_day: 100_000,
            ..Default::default()
        },
        clock,
    ));

    thread::scope(|s| {
        for _ in 0..8 {
            let governor = governor.clone();
            s.spawn(move || {
                for _ in 0..250 {
                    governor.record_trade_result(dec!(-1)).unwrap();
                }
            });
        }
    });

    let state = governor.snapshot().unwrap();
    assert_eq!(state.trade_count_today(), 2000);
    assert_eq!(state.daily_realized_loss(), dec!(2000));
    assert!(!state.is_tripped());
}

#[test]
fn test_loss_limit_holds_for_every_later_evaluation() {
    init();
    let as_of = Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap();
    let clock = ReplayClock::starting_at(as_of);
    let governor = Arc::new(RiskGovernor::new(
        RiskLimits {
            max_daily_loss: dec!(500),
            ..Default::default()
        },
        clock,
    ));

    thread::scope(|s| {
        for _ in 0..4 {
            let governor = governor.clone();
            s.spawn(move || {
                for _ in 0..5 {
                    governor.record_trade_result(dec!(-30)).unwrap();
                }
            });
        }
    });

    // 20 x 30 = 600 > 500
    let state = governor.snapshot().unwrap();
    assert!(state.is_tripped());
    assert_eq!(state.trips()[0].reason, TripReason::DailyLossLimit);

    thread::scope(|s| {
        for _ in 0..4 {
            let governor = governor.clone();
            s.spawn(move || {
                for _ in 0..25 {
                    let decision = governor.evaluate(extreme_long()).unwrap().finalize();
                    assert_eq!(decision.direction(), Direction::Neutral);
                    assert_eq!(decision.position_multiplier(), 0.0);
                }
            });
        }
    });
}

#[test]
fn test_emergency_stop_through_port() {
    init();
    let clock = ReplayClock::starting_at(Utc.with_ymd_and_hms(2024, 6, 3, 15, 0, 0).unwrap());
    let governor: Arc<dyn RiskControl> =
        Arc::new(RiskGovernor::new(RiskLimits::default(), clock));

    assert!(!governor.is_tripped().unwrap());
    governor.trip("broker disconnect").unwrap();
    assert!(governor.is_tripped().unwrap());

    let next_day = chrono::NaiveDate::from_ymd_opt(2024, 6, 4).unwrap();
    assert!(governor.reset_for_new_day(next_day).unwrap());
    assert!(!governor.is_tripped().unwrap());
}
