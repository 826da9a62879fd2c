//! End-to-end scenarios through the pipeline: fixed cases with known orders,
//! plus reproducibility and conservation checks.

use std::io::Write;

use pz_core::{EngineParams, EventBallots, EventInfo, PizzaCatalogEntry, PizzaOptionId, VoteRecord};
use pz_pipeline::{load_and_run, run, EngineMeta, PipelineCtx, PipelineError};
use pz_report::{DroppedDemand, Report, NOT_ALLOCATED};

fn id(s: &str) -> PizzaOptionId {
    s.parse().expect("option id")
}

fn catalog() -> Vec<PizzaCatalogEntry> {
    vec![
        PizzaCatalogEntry::new(id("a"), "Margherita", 1),
        PizzaCatalogEntry::new(id("b"), "Pepperoni", 2),
        PizzaCatalogEntry::new(id("c"), "Veggie", 5),
    ]
}

fn vote(voter: &str, slices: u32, ranked: &[&str]) -> VoteRecord {
    let ranked: Vec<PizzaOptionId> = ranked.iter().map(|s| id(s)).collect();
    VoteRecord::ranked(voter.parse().expect("voter id"), format!("Voter {voter}"), slices, &ranked)
}

fn report(votes: Vec<VoteRecord>) -> Report {
    let ballots = EventBallots {
        event: EventInfo { event_id: "ev-1".into(), title: "Friday".into() },
        catalog: catalog(),
        votes,
    };
    run(PipelineCtx::new(ballots, EngineParams::default()))
        .expect("pipeline")
        .report
}

fn order(r: &Report) -> Vec<(&str, u64)> {
    r.orders.iter().map(|o| (o.pizza_name.as_str(), o.quantity)).collect()
}

#[test]
fn half_pizza_first_choice_is_ordered() {
    let r = report(vec![vote("u1", 4, &["a", "b", "c"])]);
    assert_eq!(order(&r), [("Margherita", 1)]);
    assert!(r.dropped.is_empty());
}

#[test]
fn lone_thin_voter_falls_through_every_choice() {
    let r = report(vec![vote("u1", 2, &["a", "b", "c"])]);
    assert!(r.orders.is_empty());
    assert_eq!(r.dropped.len(), 1);
    match &r.dropped[0] {
        DroppedDemand::Unallocated { voter_name, slices, .. } => {
            assert_eq!(voter_name, "Voter u1");
            assert_eq!(*slices, 2);
        }
        other => panic!("unexpected drop: {other:?}"),
    }
    assert_eq!(r.voters[0].allocated_to, NOT_ALLOCATED);
}

#[test]
fn two_small_votes_pool_on_shared_first_choice() {
    let r = report(vec![vote("u1", 2, &["a", "b"]), vote("u2", 2, &["a", "c"])]);
    assert_eq!(order(&r), [("Margherita", 1)]);
    assert!(r.dropped.is_empty());
    assert!(r.voters.iter().all(|v| v.allocated_to == "Margherita"));
}

#[test]
fn full_pizza_single_choice() {
    let r = report(vec![vote("u1", 8, &["a"])]);
    assert_eq!(order(&r), [("Margherita", 1)]);
    assert!(r.dropped.is_empty());
}

#[test]
fn heavy_vote_plus_thin_vote_leaves_remainder() {
    let r = report(vec![vote("u1", 8, &["a"]), vote("u2", 3, &["a"])]);
    assert_eq!(order(&r), [("Margherita", 1)]);
    assert_eq!(r.orders[0].slices_requested, 11);
    let msgs: Vec<&str> = r.dropped.iter().map(DroppedDemand::message).collect();
    assert_eq!(msgs, ["Margherita: 3 slices not ordered (less than half a pizza)"]);
    let dropped: u64 = r.dropped.iter().map(DroppedDemand::slices).sum();
    assert_eq!(r.summary.total_slices_requested, 11);
    assert_eq!(r.summary.total_slices_ordered + dropped, r.summary.total_slices_requested);
    assert!(r.voters.iter().all(|v| v.allocated_to == "Margherita"));
}

#[test]
fn thin_single_choice_without_fallback_is_dropped() {
    let r = report(vec![vote("u1", 3, &["a"])]);
    assert!(r.orders.is_empty());
    assert_eq!(r.dropped.iter().map(DroppedDemand::slices).sum::<u64>(), 3);
    assert_eq!(r.summary.total_slices_requested, 3);
    assert_eq!(r.summary.total_pizzas, 0);
}

#[test]
fn mixed_event_orders_and_drops() {
    let votes = vec![
        vote("u1", 4, &["b", "a"]),
        vote("u2", 4, &["b", "c"]),
        vote("u3", 3, &["b", "a"]),
        vote("u4", 2, &["c", "a", "b"]),
        vote("u5", 4, &["a"]),
        vote("u6", 1, &["c"]),
    ];
    let r = report(votes);
    // b: 11 → 1 pizza, 3 dropped. c: 2+1 thin → u4 to a, u6 unallocated. a: 4+2 = 6 → 1 pizza.
    assert_eq!(order(&r), [("Pepperoni", 1), ("Margherita", 1)]);
    let msgs: Vec<&str> = r.dropped.iter().map(DroppedDemand::message).collect();
    assert_eq!(
        msgs,
        [
            "Pepperoni: 3 slices not ordered (less than half a pizza)",
            "Voter u6: 1 slice not allocated (none of their choices had enough demand)",
        ]
    );
    assert_eq!(r.summary.total_slices_requested, 18);
    assert_eq!(r.summary.total_slices_ordered, 16);
}

#[test]
fn identical_input_gives_identical_report() {
    let votes = vec![
        vote("u1", 4, &["c", "a"]),
        vote("u2", 4, &["b"]),
        vote("u3", 2, &["a", "b", "c"]),
    ];
    let a = report(votes.clone());
    let b = report(votes);
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&pz_report::render_json(&a).unwrap()).unwrap(),
        serde_json::to_string(&pz_report::render_json(&b).unwrap()).unwrap()
    );
}

#[test]
fn equal_demand_ties_break_by_name() {
    let r = report(vec![vote("u1", 4, &["c"]), vote("u2", 4, &["b"]), vote("u3", 4, &["a"])]);
    assert_eq!(order(&r), [("Margherita", 1), ("Pepperoni", 1), ("Veggie", 1)]);
}

#[test]
fn invalid_vote_aborts_before_allocation() {
    let ballots = EventBallots {
        event: EventInfo::default(),
        catalog: catalog(),
        votes: vec![vote("u1", 2, &["a", "missing"])],
    };
    let err = run(PipelineCtx::new(ballots, EngineParams::default())).unwrap_err();
    match err {
        PipelineError::Validate(r) => {
            assert!(r.errors().any(|i| i.code == "Vote.UnknownPizza"));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn bad_params_are_rejected_before_input_checks() {
    let ballots = EventBallots {
        event: EventInfo::default(),
        catalog: catalog(),
        votes: vec![vote("u1", 0, &["a"])],
    };
    let params = EngineParams { max_passes: 0, ..EngineParams::default() };
    let err = run(PipelineCtx::new(ballots, params)).unwrap_err();
    assert!(matches!(err, PipelineError::Params(_)), "got {err}");
}

#[test]
fn loading_from_disk_attaches_integrity() {
    let json = serde_json::json!({
        "event": {"event_id": "ev-2", "title": "Demo"},
        "catalog": [{"id": "a", "name": "Margherita", "topping_count": 1}],
        "votes": [
            {"voter_id": "u1", "voter_name": "Ada", "slice_count": 4,
             "choices": [{"pizza_option_id": "a", "priority": 1}]}
        ]
    });
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(json.to_string().as_bytes()).unwrap();

    let outs = load_and_run(f.path(), EngineParams::default(), EngineMeta::default()).unwrap();
    let integrity = outs.report.integrity.expect("integrity");
    assert_eq!(integrity.input_sha256.len(), 64);
    assert_eq!(integrity.params, EngineParams::default());
    assert_eq!(outs.report.orders.len(), 1);
}
