//! Scenario tests for route search and journey planning.

use super::*;
use crate::domain::{Direction, Route, RouteId};

fn route(id: &str, forward: &[&str], backward: &[&str]) -> Route {
    Route::new(
        RouteId::new(id).unwrap(),
        forward.iter().map(|s| s.to_string()).collect(),
    )
    .unwrap()
    .with_reverse_stops(backward.iter().map(|s| s.to_string()).collect())
}

fn ids(routes: &[&Route]) -> Vec<String> {
    routes.iter().map(|r| r.id().to_string()).collect()
}

/// R1: Uttara -> Airport -> Banani
/// R2: Banani -> Mohakhali -> Farmgate
/// R3: Farmgate -> Shahbag -> Motijheel
fn chain() -> Vec<Route> {
    vec![
        route("R1", &["Uttara", "Airport", "Banani"], &[]),
        route("R2", &["Banani", "Mohakhali", "Farmgate"], &[]),
        route("R3", &["Farmgate", "Shahbag", "Motijheel"], &[]),
    ]
}

#[test]
fn direct_route_found_both_ways() {
    let routes = vec![route("R1", &["Gulistan", "Farmgate", "Mirpur 10"], &[])];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(ids(&planner.search_direct("Gulistan", "Mirpur 10")), vec!["R1"]);
    assert_eq!(ids(&planner.search_direct("Mirpur 10", "Gulistan")), vec!["R1"]);
    assert!(planner.search_direct("Mirpur 10", "Mirpur 10").is_empty());
}

#[test]
fn direct_search_tolerates_surface_differences() {
    let routes = vec![route("R1", &["Gulistan", "Farmgate", "Mirpur–10"], &[])];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(ids(&planner.search_direct(" gulistan ", "MIRPUR-10")), vec!["R1"]);
    assert_eq!(ids(&planner.search_direct("Farm", "Mirpur")), vec!["R1"]);
}

#[test]
fn direct_search_preserves_dataset_order() {
    let routes = vec![
        route("B", &["Gulistan", "Farmgate"], &[]),
        route("A", &["Motijheel", "Gulistan", "Shahbag", "Farmgate"], &[]),
        route("C", &["Uttara", "Banani"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(ids(&planner.search_direct("Gulistan", "Farmgate")), vec!["B", "A"]);
}

#[test]
fn explicit_backward_sequence_limits_reverse_travel() {
    let routes = vec![route(
        "R1",
        &["Gulistan", "Farmgate", "Mirpur 10"],
        &["Mirpur 10", "Agargaon", "Gulistan"],
    )];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(ids(&planner.search_direct("Agargaon", "Gulistan")), vec!["R1"]);
    assert!(planner.search_direct("Farmgate", "Gulistan").is_empty());
}

#[test]
fn blank_queries_return_nothing() {
    let routes = chain();
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert!(planner.search_direct("", "Banani").is_empty());
    assert!(planner.search_direct("Uttara", "   ").is_empty());
    assert!(planner.search_with_transfers("", "Farmgate").is_empty());
    assert!(planner.find_multi_hop_journey("Uttara", "").is_empty());
    assert!(planner.create_journey_plan(" ", "Banani").is_none());
}

#[test]
fn empty_dataset_returns_nothing() {
    let routes: Vec<Route> = Vec::new();
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert!(planner.search_direct("Gulistan", "Farmgate").is_empty());
    assert!(planner.search_with_transfers("Gulistan", "Farmgate").is_empty());
    assert!(planner.find_multi_hop_journey("Gulistan", "Farmgate").is_empty());
    assert!(planner.create_journey_plan("Gulistan", "Farmgate").is_none());
    assert!(planner.service_types().is_empty());
}

#[test]
fn transfer_via_shared_stop() {
    let routes = vec![
        route("R1", &["A", "B", "C"], &[]),
        route("R2", &["C", "D", "E"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert!(planner.search_direct("A", "E").is_empty());
    assert_eq!(ids(&planner.search_with_transfers("A", "E")), vec!["R1", "R2"]);
}

#[test]
fn transfer_journey_plan_has_two_segments() {
    let routes = vec![
        route("R1", &["A", "B", "C"], &[]),
        route("R2", &["C", "D", "E"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    let plan = planner.create_journey_plan("A", "E").unwrap();
    assert_eq!(plan.total_stops(), 2);

    let first = &plan.segments()[0];
    assert_eq!(first.route_id.as_str(), "R1");
    assert_eq!(first.from_stop, "A");
    assert_eq!(first.to_stop, "C");
    assert_eq!(first.direction, Direction::Forward);

    let second = &plan.segments()[1];
    assert_eq!(second.route_id.as_str(), "R2");
    assert_eq!(second.from_stop, "C");
    assert_eq!(second.to_stop, "E");

    assert_eq!(plan.estimate(), Some("About 22 min, 1 transfer"));
}

#[test]
fn transfer_results_are_capped_in_discovery_order() {
    let routes = vec![
        route("S1", &["Origin", "Xfer1"], &[]),
        route("S2", &["Origin", "Xfer2"], &[]),
        route("S3", &["Origin", "Xfer3"], &[]),
        route("E1", &["Xfer1", "Destination"], &[]),
        route("E2", &["Xfer2", "Destination"], &[]),
        route("E3", &["Xfer3", "Destination"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.search_with_transfers("Origin", "Destination")),
        vec!["S1", "E1", "S2", "E2", "S3"]
    );
}

#[test]
fn transfer_results_deduplicated_by_id() {
    // Both feeders meet the same onward route
    let routes = vec![
        route("S1", &["Origin", "Junction"], &[]),
        route("S2", &["Origin", "Market", "Junction"], &[]),
        route("E1", &["Junction", "Destination"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.search_with_transfers("Origin", "Destination")),
        vec!["S1", "E1", "S2"]
    );
}

#[test]
fn transfer_requires_direction_to_work() {
    // R2 has an explicit backward sequence that skips the shared stop, so
    // there is no way to ride it from Junction back to Destination.
    let routes = vec![
        route("R1", &["Origin", "Junction"], &[]),
        route("R2", &["Destination", "Junction"], &["Junction", "Depot"]),
    ];
    let config = PlannerConfig::default().with_hubs(Vec::<String>::new());
    let planner = Planner::new(&routes, &config);

    assert!(planner.search_with_transfers("Origin", "Destination").is_empty());
    assert!(planner.create_journey_plan("Origin", "Destination").is_none());
}

#[test]
fn hub_fallback_used_when_no_pair_connects() {
    let routes = vec![route("R1", &["Origin", "Farmgate", "Destination"], &[])];
    let config = PlannerConfig::default().with_hubs(["Motijheel", "Farmgate"]);
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.search_with_transfers("Origin", "Destination")),
        vec!["R1"]
    );
}

#[test]
fn hub_fallback_respects_cap_and_priority() {
    let routes = vec![
        route("R1", &["Origin", "Farmgate", "Destination"], &[]),
        route("R2", &["Origin", "Shahbag", "Destination"], &[]),
        route("R3", &["Origin", "Gulistan", "Destination"], &[]),
    ];
    let config = PlannerConfig::default()
        .with_hubs(["Gulistan", "Shahbag", "Farmgate"])
        .with_caps(5, 2, 3, 10);
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.search_with_transfers("Origin", "Destination")),
        vec!["R3", "R2"]
    );
}

#[test]
fn multi_hop_prefers_direct_routes() {
    let routes = vec![
        route("R1", &["Gulistan", "Farmgate", "Mirpur 10"], &[]),
        route("R2", &["Farmgate", "Agargaon"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.find_multi_hop_journey("Gulistan", "Mirpur 10")),
        vec!["R1"]
    );
}

#[test]
fn multi_hop_single_transfer() {
    let routes = chain();
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.find_multi_hop_journey("Uttara", "Farmgate")),
        vec!["R1", "R2"]
    );
}

#[test]
fn multi_hop_two_transfers() {
    let routes = chain();
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(
        ids(&planner.find_multi_hop_journey("Uttara", "Motijheel")),
        vec!["R1", "R2", "R3"]
    );
}

#[test]
fn multi_hop_gives_up_when_unreachable() {
    let mut routes = chain();
    routes.push(route("R9", &["Keraniganj", "Hasnabad"], &[]));
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert!(planner.find_multi_hop_journey("Uttara", "Hasnabad").is_empty());
}

#[test]
fn multi_hop_respects_connection_and_total_caps() {
    // Five feeders all reachable from the single transfer stop
    let mut routes = vec![route("S", &["Origin", "Junction"], &[])];
    for i in 1..=5 {
        routes.push(route(&format!("C{i}"), &["Junction", "Destination"], &[]));
    }

    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);
    assert_eq!(
        ids(&planner.find_multi_hop_journey("Origin", "Destination")),
        vec!["S", "C1", "C2", "C3"]
    );

    let config = PlannerConfig::default().with_caps(5, 3, 3, 2);
    let planner = Planner::new(&routes, &config);
    assert_eq!(
        ids(&planner.find_multi_hop_journey("Origin", "Destination")),
        vec!["S", "C1"]
    );
}

#[test]
fn direct_journey_plan_single_segment() {
    let routes = vec![route("R1", &["Gulistan", "Farmgate", "Mirpur 10"], &[])];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    let plan = planner.create_journey_plan("gulistan", "mirpur 10").unwrap();
    assert!(plan.is_direct());
    assert_eq!(plan.total_stops(), 1);
    assert_eq!(plan.origin(), "Gulistan");
    assert_eq!(plan.destination(), "Mirpur 10");
    assert_eq!(plan.segments()[0].stops, 2);
    assert_eq!(plan.estimate(), Some("About 6 min, direct"));
}

#[test]
fn reverse_journey_plan_is_backward() {
    let routes = vec![route("R1", &["Gulistan", "Farmgate", "Mirpur 10"], &[])];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    let plan = planner.create_journey_plan("Mirpur 10", "Farmgate").unwrap();
    assert_eq!(plan.segments()[0].direction, Direction::Backward);
    assert_eq!(plan.segments()[0].stops, 1);
}

#[test]
fn journey_plan_none_when_unreachable() {
    let routes = chain();
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    // Two transfers needed; plans only cover up to one
    assert!(planner.create_journey_plan("Uttara", "Motijheel").is_none());
    assert!(planner.create_journey_plan("Uttara", "Nowhere").is_none());
}

#[test]
fn route_lookup_by_id() {
    let routes = chain();
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(planner.route("R2").map(|r| r.id().as_str()), Some("R2"));
    assert!(planner.route("R42").is_none());
}

#[test]
fn buses_at_stop_uses_containment() {
    let routes = vec![
        route("R1", &["Gulistan", "Farmgate"], &[]),
        route("R2", &["Mirpur 10", "Agargaon"], &["Agargaon", "Farmgate Police Box"]),
        route("R3", &["Uttara", "Banani"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(ids(&planner.buses_at_stop("farmgate")), vec!["R1", "R2"]);
    assert!(planner.buses_at_stop("  ").is_empty());
}

#[test]
fn service_types_sorted_and_distinct() {
    let routes = vec![
        route("R1", &["A"], &[]).with_service_type(Some("Sitting".into())),
        route("R2", &["B"], &[]).with_service_type(Some("Local".into())),
        route("R3", &["C"], &[]).with_service_type(Some("Sitting".into())),
        route("R4", &["D"], &[]).with_service_type(Some(" ".into())),
        route("R5", &["E"], &[]),
    ];
    let config = PlannerConfig::default();
    let planner = Planner::new(&routes, &config);

    assert_eq!(planner.service_types(), vec!["Local", "Sitting"]);
}
