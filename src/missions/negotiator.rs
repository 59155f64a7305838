use super::data::*;
use super::scoring::*;
use crate::cluster::data::*;
use crate::map::*;
use crate::turn::*;
use log::*;
use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub unit: UnitId,
    pub target: Position,
}

/// Minimum total Manhattan distance pairing of units to targets. When the sides differ in size
/// only `min(units, targets)` pairs are produced and the rest stay unmatched. Inputs are put in
/// canonical order first, so the result does not depend on the order they were given in.
pub fn negotiate(units: &[(UnitId, Position)], targets: &[Position]) -> Result<Vec<Assignment>, String> {
    if units.is_empty() || targets.is_empty() {
        return Ok(Vec::new());
    }

    let mut units = units.to_vec();
    units.sort();
    units.dedup_by(|a, b| a.0 == b.0);

    let mut targets = targets.to_vec();
    targets.sort();
    targets.dedup();

    let mut assignments = if units.len() <= targets.len() {
        let weights = cost_matrix(&units, &targets, |(_, unit_pos), target| unit_pos.distance_to(*target))?;

        let (_, columns) = kuhn_munkres_min(&weights);

        units
            .iter()
            .zip(columns)
            .map(|((unit, _), column)| Assignment {
                unit: unit.clone(),
                target: targets[column],
            })
            .collect::<Vec<_>>()
    } else {
        //
        // The solver needs rows <= columns, so targets become the rows.
        //

        let weights = cost_matrix(&targets, &units, |target, (_, unit_pos)| unit_pos.distance_to(*target))?;

        let (_, columns) = kuhn_munkres_min(&weights);

        targets
            .iter()
            .zip(columns)
            .map(|(target, column)| Assignment {
                unit: units[column].0.clone(),
                target: *target,
            })
            .collect::<Vec<_>>()
    };

    assignments.sort_by(|a, b| a.unit.cmp(&b.unit));

    Ok(assignments)
}

fn cost_matrix<R, C, F>(rows: &[R], columns: &[C], distance: F) -> Result<Matrix<i64>, String>
where
    F: Fn(&R, &C) -> u32,
{
    Matrix::from_rows(
        rows.iter()
            .map(|row| columns.iter().map(|column| distance(row, column) as i64).collect::<Vec<_>>()),
    )
    .map_err(|err| format!("Invalid cost matrix: {:?}", err))
}

pub fn total_distance(units: &[(UnitId, Position)], assignments: &[Assignment]) -> u32 {
    let positions: BTreeMap<&UnitId, Position> = units.iter().map(|(unit, pos)| (unit, *pos)).collect();

    assignments
        .iter()
        .filter_map(|assignment| positions.get(&assignment.unit).map(|pos| pos.distance_to(assignment.target)))
        .sum()
}

/// Writes matched targets into missions. Pinned missions are left alone. Returns the number of
/// missions changed.
pub fn apply_assignments(missions: &mut BTreeMap<UnitId, Mission>, assignments: &[Assignment]) -> usize {
    assignments
        .iter()
        .filter(|assignment| {
            missions
                .get_mut(&assignment.unit)
                .map(|mission| mission.change_target_pos(assignment.target))
                .unwrap_or(false)
        })
        .count()
}

/// Units of the cluster whose missions of `mission_type` may be retargeted, with their current
/// positions. Pinned missions and units missing from the roster are left out.
pub fn negotiation_batch(cluster: &Cluster, mission_type: MissionType, context: &TurnContext) -> Vec<(UnitId, Position)> {
    cluster
        .missions()
        .iter()
        .filter(|(_, mission)| mission.mission_type() == mission_type && mission.allow_target_change())
        .filter_map(|(unit, _)| context.unit(unit).map(|unit_data| (unit.clone(), unit_data.pos)))
        .collect()
}

fn candidate_targets(cluster: &Cluster, mission_type: MissionType) -> Vec<Position> {
    match mission_type {
        MissionType::BuildTile | MissionType::Explore => cluster.exposed_perimeter().iter().copied().collect(),
        MissionType::GuardCluster => cluster.cells().iter().copied().collect(),
    }
}

/// Negotiates one mission type's batch for a cluster: rank candidates, keep as many as there are
/// units, then solve the assignment.
pub fn negotiate_cluster_missions(
    cluster: &mut Cluster,
    mission_type: MissionType,
    context: &TurnContext,
    scorer: &dyn TargetScorer,
) -> Result<usize, String> {
    let batch = negotiation_batch(cluster, mission_type, context);

    if batch.is_empty() {
        return Ok(0);
    }

    let unit_positions: Vec<Position> = batch.iter().map(|(_, pos)| *pos).collect();

    let targets = rank_targets(
        scorer,
        context,
        mission_type,
        &unit_positions,
        candidate_targets(cluster, mission_type),
        batch.len(),
    );

    let assignments = negotiate(&batch, &targets)?;

    let changed = apply_assignments(cluster.missions_mut(), &assignments);

    debug!(
        "Cluster {} - Negotiated {} batch - Units: {} - Targets: {} - Changed: {}",
        cluster.id(),
        mission_type,
        batch.len(),
        targets.len(),
        changed
    );

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(id: &str, x: i32, y: i32) -> (UnitId, Position) {
        (UnitId::from(id), Position::new(x, y))
    }

    #[test]
    fn uncrossed_assignment_is_chosen() {
        let units = vec![unit("u_1", 0, 0), unit("u_2", 0, 3)];
        let targets = vec![Position::new(0, 1), Position::new(0, 2)];

        let assignments = negotiate(&units, &targets).unwrap();

        assert_eq!(
            assignments,
            vec![
                Assignment {
                    unit: UnitId::from("u_1"),
                    target: Position::new(0, 1)
                },
                Assignment {
                    unit: UnitId::from("u_2"),
                    target: Position::new(0, 2)
                },
            ]
        );
        assert_eq!(total_distance(&units, &assignments), 2);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        assert!(negotiate(&[], &[Position::new(0, 0)]).unwrap().is_empty());
        assert!(negotiate(&[unit("u_1", 0, 0)], &[]).unwrap().is_empty());
    }

    #[test]
    fn more_units_than_targets_leaves_farthest_unmatched() {
        let units = vec![unit("u_1", 0, 0), unit("u_2", 9, 9), unit("u_3", 1, 0)];
        let targets = vec![Position::new(0, 1)];

        let assignments = negotiate(&units, &targets).unwrap();

        assert_eq!(assignments.len(), 1);
        assert_eq!(total_distance(&units, &assignments), 1);
    }

    #[test]
    fn more_targets_than_units_picks_nearest() {
        let units = vec![unit("u_1", 5, 5)];
        let targets = vec![Position::new(0, 0), Position::new(5, 6), Position::new(9, 9)];

        let assignments = negotiate(&units, &targets).unwrap();

        assert_eq!(assignments[0].target, Position::new(5, 6));
    }

    #[test]
    fn input_order_does_not_change_result() {
        let units = vec![unit("u_1", 0, 0), unit("u_2", 2, 2), unit("u_3", 4, 0)];
        let targets = vec![Position::new(1, 1), Position::new(3, 1), Position::new(2, 0)];

        let forward = negotiate(&units, &targets).unwrap();

        let mut reversed_units = units.clone();
        reversed_units.reverse();
        let mut reversed_targets = targets.clone();
        reversed_targets.reverse();

        assert_eq!(forward, negotiate(&reversed_units, &reversed_targets).unwrap());
    }

    #[test]
    fn pinned_missions_keep_their_target() {
        let mut missions = BTreeMap::new();

        let mut pinned = Mission::new(MissionType::Explore, UnitId::from("u_1"));
        pinned.pin_target(Position::new(7, 7));

        missions.insert(UnitId::from("u_1"), pinned);
        missions.insert(UnitId::from("u_2"), Mission::new(MissionType::Explore, UnitId::from("u_2")));

        let assignments = vec![
            Assignment {
                unit: UnitId::from("u_1"),
                target: Position::new(0, 0),
            },
            Assignment {
                unit: UnitId::from("u_2"),
                target: Position::new(1, 1),
            },
        ];

        assert_eq!(apply_assignments(&mut missions, &assignments), 1);
        assert_eq!(missions[&UnitId::from("u_1")].target_pos(), Some(Position::new(7, 7)));
        assert_eq!(missions[&UnitId::from("u_2")].target_pos(), Some(Position::new(1, 1)));
    }
}
