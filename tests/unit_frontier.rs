// tests/unit_frontier.rs
//! Frontier computation and profile selection on hand-built maps.

use cavemap_core::graph::{shortest_path, GraphStore};
use cavemap_core::{CaveMap, Difficulty, MapError};

/// The two-entity diamond: 0 (start), 1 (entity, power 2), 2 (entity,
/// power 1), 3 (exit); edges 0->1 (w3), 0->2 (w1), 2->3 (w1), 1->3 (w1)
/// and no edge between 1 and 2.
fn diamond_map() -> CaveMap {
    let mut g = GraphStore::new();
    g.insert_vertex(0, (0, 0));
    g.insert_vertex(1, (1, 1));
    g.insert_vertex(2, (1, -1));
    g.insert_vertex(3, (2, 0));
    g.insert_edge(0, 1, 3);
    g.insert_edge(0, 2, 1);
    g.insert_edge(2, 3, 1);
    g.insert_edge(1, 3, 1);
    CaveMap::from_parts(2, g, 3, vec![(1, 2), (2, 1)])
}

#[test]
fn scenario_two_entities_diamond() {
    let map = diamond_map();
    let frontier = map.frontier();

    let risk1 = frontier.get(&1).expect("risk 1 is attainable");
    assert_eq!(risk1.cost, 2);
    assert_eq!(risk1.path, vec![0, 2, 3]);

    let risk2 = frontier.get(&2).expect("risk 2 is attainable");
    assert_eq!(risk2.cost, 4);
    assert_eq!(risk2.path, vec![0, 1, 3]);

    assert!(
        !frontier.contains_key(&3),
        "no itinerary can visit both entities, risk 3 must be absent"
    );
    assert!(
        !frontier.contains_key(&0),
        "both direct routes pass an entity, risk 0 must be absent"
    );
}

#[test]
fn profiles_select_the_documented_keys() {
    let map = diamond_map();

    let survivor = map.get_parameters("survivor").expect("survivor");
    assert_eq!((survivor.risk, survivor.cost), (1, 2));
    assert_eq!(survivor.path, vec![0, 2, 3]);

    let explorer = map.get_parameters("explorer").expect("explorer");
    assert_eq!((explorer.risk, explorer.cost), (2, 4));
    assert_eq!(explorer.path, vec![0, 1, 3]);

    // Sorted keys are [1, 2]; balanced takes index ⌊2/2⌋ = 1.
    let balanced = map.get_parameters("balanced").expect("balanced");
    assert_eq!((balanced.risk, balanced.cost), (2, 4));
    assert_eq!(balanced.path, vec![0, 1, 3]);
}

#[test]
fn unknown_profile_is_an_invalid_argument() {
    let map = diamond_map();
    let err = map.get_parameters("speedrun").expect_err("must be rejected");
    assert!(matches!(err, MapError::UnknownProfile(name) if name == "speedrun"));
}

#[test]
fn memoization_invariant_holds_for_dijkstra() {
    // If the shortest path under exclusions E avoids w, then E ∪ {w}
    // yields the identical result.
    let mut g = GraphStore::new();
    for (id, coord) in [(0, (0, 0)), (1, (1, 0)), (2, (1, 1)), (3, (2, 0)), (4, (0, 1))] {
        g.insert_vertex(id, coord);
    }
    g.insert_edge(0, 1, 1);
    g.insert_edge(1, 3, 1);
    g.insert_edge(0, 2, 2);
    g.insert_edge(2, 3, 2);
    g.insert_edge(0, 4, 1);
    g.insert_edge(4, 3, 9);

    let base = shortest_path(&g, 0, 3, &[2]).expect("path exists");
    assert!(!base.path.contains(&4));
    let widened = shortest_path(&g, 0, 3, &[2, 4]).expect("still reachable");
    assert_eq!(base, widened);
}

#[test]
fn risk_zero_present_when_a_clean_route_exists() {
    // Entity off the straight line: 0 -> 1 -> 2 with a spur entity at 3.
    let mut g = GraphStore::new();
    g.insert_vertex(0, (0, 0));
    g.insert_vertex(1, (1, 0));
    g.insert_vertex(2, (2, 0));
    g.insert_vertex(3, (1, 1));
    g.insert_edge(0, 1, 1);
    g.insert_edge(1, 2, 1);
    g.insert_edge(0, 3, 1);
    g.insert_edge(3, 2, 1);
    let map = CaveMap::from_parts(2, g, 2, vec![(3, 3)]);

    let clean = map.frontier().get(&0).expect("entity-free route exists");
    assert_eq!(clean.cost, 2);
    assert_eq!(clean.path, vec![0, 1, 2]);

    let fighting = map.frontier().get(&3).expect("fighting the entity is possible");
    assert_eq!(fighting.cost, 2);
    assert_eq!(fighting.path, vec![0, 3, 2]);
}

#[test]
fn frontier_keeps_cheapest_witness_per_risk() {
    // Two entities with equal power 1: fighting either alone costs
    // different amounts, and risk 1 must keep the cheaper one.
    let mut g = GraphStore::new();
    g.insert_vertex(0, (0, 0));
    g.insert_vertex(1, (1, 1));
    g.insert_vertex(2, (1, -1));
    g.insert_vertex(3, (2, 0));
    g.insert_edge(0, 1, 3);
    g.insert_edge(0, 2, 1);
    g.insert_edge(1, 3, 3);
    g.insert_edge(2, 3, 1);
    let map = CaveMap::from_parts(2, g, 3, vec![(1, 1), (2, 1)]);

    let risk1 = map.frontier().get(&1).expect("risk 1 attainable");
    assert_eq!(risk1.cost, 2, "the cheap entity wins the risk-1 slot");
    assert_eq!(risk1.path, vec![0, 2, 3]);
}

#[test]
fn stamina_life_scores_witness_paths_consistently() {
    let map = diamond_map();
    let survivor = map.get_parameters("survivor").expect("survivor");
    let (cost, risk) = map.get_stamina_life(&survivor.path).expect("witness is walkable");
    assert_eq!((risk, cost), (survivor.risk, survivor.cost));
}

#[test]
fn stamina_life_rejects_teleporting_paths() {
    let map = diamond_map();
    let err = map.get_stamina_life(&[0, 3]).expect_err("0 and 3 are not adjacent");
    assert!(matches!(err, MapError::NotAdjacent { from: 0, to: 3 }));
}

#[test]
fn difficulty_budget_scales_and_rounds() {
    let map = diamond_map();
    let explorer = map.get_parameters("explorer").expect("explorer");
    assert_eq!(explorer.budget(Difficulty::Easy), (6, 12));
    assert_eq!(explorer.budget(Difficulty::Hard), (3, 6));

    let survivor = map.get_parameters("survivor").expect("survivor");
    // 1 * 1.5 rounds up to 2.
    assert_eq!(survivor.budget(Difficulty::Hard), (2, 3));
}

#[test]
fn unit_direction_reports_compass_sign() {
    let map = diamond_map();
    assert_eq!(map.unit_direction(0, 1), Some((1, 1)));
    assert_eq!(map.unit_direction(2, 3), Some((1, 1)));
    assert_eq!(map.unit_direction(0, 3), None, "not adjacent");
}
