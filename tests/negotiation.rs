mod common;

use common::*;
use lux_clusters::cluster::discovery::*;
use lux_clusters::cluster::registry::*;
use lux_clusters::missions::negotiator::*;
use lux_clusters::*;

/// Small deterministic generator so the optimality checks cover many layouts.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: i32) -> i32 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);

        ((self.0 >> 33) % bound as u64) as i32
    }

    fn position(&mut self) -> Position {
        Position::new(self.next(12), self.next(12))
    }
}

fn permutations(items: Vec<usize>) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items];
    }

    let mut result = Vec::new();

    for index in 0..items.len() {
        let mut rest = items.clone();
        let head = rest.remove(index);

        for mut tail in permutations(rest) {
            tail.insert(0, head);
            result.push(tail);
        }
    }

    result
}

fn brute_force_minimum(units: &[(UnitId, Position)], targets: &[Position]) -> u32 {
    permutations((0..targets.len()).collect())
        .into_iter()
        .map(|order| {
            units
                .iter()
                .zip(order)
                .map(|((_, pos), target)| pos.distance_to(targets[target]))
                .sum::<u32>()
        })
        .min()
        .unwrap_or(0)
}

fn batch(rng: &mut Lcg, count: usize) -> Vec<(UnitId, Position)> {
    (0..count).map(|index| (id(&format!("u_{}", index)), rng.position())).collect()
}

fn distinct_targets(rng: &mut Lcg, count: usize) -> Vec<Position> {
    let mut targets = Vec::new();

    while targets.len() < count {
        let pos = rng.position();

        if !targets.contains(&pos) {
            targets.push(pos);
        }
    }

    targets
}

#[test]
fn crossed_pairs_are_uncrossed() {
    let units = vec![(id("u_1"), Position::new(0, 0)), (id("u_2"), Position::new(0, 3))];
    let targets = vec![Position::new(0, 1), Position::new(0, 2)];

    let assignments = negotiate(&units, &targets).unwrap();

    assert_eq!(assignments[0].target, Position::new(0, 1));
    assert_eq!(assignments[1].target, Position::new(0, 2));
    assert_eq!(total_distance(&units, &assignments), 2);
}

#[test]
fn square_batches_match_brute_force_optimum() {
    let mut rng = Lcg(7);

    for size in 1..=5 {
        for _ in 0..20 {
            let units = batch(&mut rng, size);
            let targets = distinct_targets(&mut rng, size);

            let assignments = negotiate(&units, &targets).unwrap();

            assert_eq!(assignments.len(), size);
            assert_eq!(total_distance(&units, &assignments), brute_force_minimum(&units, &targets));
        }
    }
}

#[test]
fn rectangular_batches_match_brute_force_optimum() {
    let mut rng = Lcg(11);

    for _ in 0..20 {
        //
        // More targets than units: the best subset of targets is chosen.
        //

        let units = batch(&mut rng, 2);
        let targets = distinct_targets(&mut rng, 4);

        let best = permutations((0..4).collect())
            .into_iter()
            .map(|order| {
                units
                    .iter()
                    .zip(order)
                    .map(|((_, pos), target)| pos.distance_to(targets[target]))
                    .sum::<u32>()
            })
            .min()
            .unwrap();

        let assignments = negotiate(&units, &targets).unwrap();

        assert_eq!(assignments.len(), 2);
        assert_eq!(total_distance(&units, &assignments), best);

        //
        // More units than targets: only as many pairs as targets.
        //

        let units = batch(&mut rng, 4);
        let targets = distinct_targets(&mut rng, 2);

        let assignments = negotiate(&units, &targets).unwrap();

        assert_eq!(assignments.len(), 2);

        let mut matched: Vec<Position> = assignments.iter().map(|assignment| assignment.target).collect();
        matched.sort();

        let mut expected = targets.clone();
        expected.sort();

        assert_eq!(matched, expected);
    }
}

#[test]
fn shuffled_inputs_give_identical_assignments() {
    let mut rng = Lcg(3);

    for _ in 0..10 {
        let units = batch(&mut rng, 4);
        let targets = distinct_targets(&mut rng, 4);

        let expected = negotiate(&units, &targets).unwrap();

        let mut rotated_units = units.clone();
        rotated_units.rotate_left(1);

        let mut reversed_targets = targets.clone();
        reversed_targets.reverse();

        assert_eq!(negotiate(&rotated_units, &reversed_targets).unwrap(), expected);
        assert_eq!(negotiate(&units, &targets).unwrap(), expected);
    }
}

#[test]
fn pinned_missions_stay_out_of_the_batch() {
    let grid = grid_from_ascii(&[".....", ".www.", "....."]);

    let mut registry = ClusterRegistry::default();
    registry.discover(&grid, DiscoveryOptions::default());

    let cluster = registry.get_mut(ClusterId(6)).unwrap();

    let mut pinned = Mission::new(MissionType::Explore, id("u_1"));
    pinned.pin_target(Position::new(2, 1));

    cluster.add_mission(pinned).unwrap();
    cluster.add_mission(Mission::new(MissionType::Explore, id("u_2"))).unwrap();

    let context = TurnContext::new(0, grid, vec![unit("u_1", 0, 0, 0), unit("u_2", 4, 2, 0)]);

    let batch = negotiation_batch(cluster, MissionType::Explore, &context);

    assert_eq!(batch, vec![(id("u_2"), Position::new(4, 2))]);

    let changed = negotiate_cluster_missions(cluster, MissionType::Explore, &context, &BuildPositionScorer).unwrap();

    assert_eq!(changed, 1);
    assert_eq!(cluster.mission(&id("u_1")).unwrap().target_pos(), Some(Position::new(2, 1)));
    assert!(cluster.mission(&id("u_2")).unwrap().target_pos().is_some());
}

#[test]
fn guard_batch_targets_resource_cells() {
    let grid = grid_from_ascii(&[".....", ".www.", "....."]);

    let mut registry = ClusterRegistry::default();
    registry.discover(&grid, DiscoveryOptions::default());

    let cluster = registry.get_mut(ClusterId(6)).unwrap();

    cluster.add_mission(Mission::new(MissionType::GuardCluster, id("u_1"))).unwrap();
    cluster.add_mission(Mission::new(MissionType::GuardCluster, id("u_2"))).unwrap();

    let context = TurnContext::new(0, grid, vec![unit("u_1", 0, 1, 0), unit("u_2", 4, 1, 0)]);

    negotiate_cluster_missions(cluster, MissionType::GuardCluster, &context, &BuildPositionScorer).unwrap();

    for unit_id in [id("u_1"), id("u_2")] {
        let target = cluster.mission(&unit_id).unwrap().target_pos().unwrap();

        assert!(cluster.cells().contains(&target));
    }

    assert_ne!(
        cluster.mission(&id("u_1")).unwrap().target_pos(),
        cluster.mission(&id("u_2")).unwrap().target_pos()
    );
}
