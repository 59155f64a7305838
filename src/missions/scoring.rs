use super::data::*;
use crate::map::*;
use crate::turn::*;
use itertools::Itertools;
use std::cmp::Ordering;

/// Ranks candidate targets for a negotiation batch. Higher is better.
pub trait TargetScorer: Send + Sync {
    fn score(&self, context: &TurnContext, mission_type: MissionType, centroid: (f32, f32), target: Position) -> f32;
}

impl<F> TargetScorer for F
where
    F: Fn(&TurnContext, MissionType, (f32, f32), Position) -> f32 + Send + Sync,
{
    fn score(&self, context: &TurnContext, mission_type: MissionType, centroid: (f32, f32), target: Position) -> f32 {
        self(context, mission_type, centroid, target)
    }
}

/// Prefers targets near the batch's units, contested by nearby opponent units and next to
/// existing structures.
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildPositionScorer;

impl TargetScorer for BuildPositionScorer {
    fn score(&self, context: &TurnContext, _mission_type: MissionType, centroid: (f32, f32), target: Position) -> f32 {
        let travel_distance = (target.x as f32 - centroid.0).abs() + (target.y as f32 - centroid.1).abs();
        let travel_distance_score = 100.0 / (travel_distance * travel_distance + 1.0);

        let opponents = context.opponent_units();
        let opponent_distance: u32 = opponents.iter().map(|pos| target.distance_to(*pos)).sum();
        let opponent_distance_score = (10 * opponents.len()) as f32 / (opponent_distance as f32 + 1.0);

        let grid = context.grid();
        let adjacent_structures = grid
            .grid()
            .neighbours_four(target)
            .filter(|pos| grid.has_structure(*pos))
            .count();
        let adjacency_score = 2.0 * adjacent_structures as f32;

        travel_distance_score + opponent_distance_score + adjacency_score
    }
}

/// World resource holding the scorer the agent was built with.
pub struct TargetScoring(Box<dyn TargetScorer>);

impl TargetScoring {
    pub fn new(scorer: Box<dyn TargetScorer>) -> TargetScoring {
        TargetScoring(scorer)
    }

    pub fn as_scorer(&self) -> &dyn TargetScorer {
        self.0.as_ref()
    }
}

impl Default for TargetScoring {
    fn default() -> TargetScoring {
        TargetScoring(Box::new(BuildPositionScorer))
    }
}

/// Mean of the given positions.
pub fn centroid(positions: &[Position]) -> Option<(f32, f32)> {
    if positions.is_empty() {
        return None;
    }

    let count = positions.len() as f32;
    let (sum_x, sum_y) = positions
        .iter()
        .fold((0.0, 0.0), |(x, y), pos| (x + pos.x as f32, y + pos.y as f32));

    Some((sum_x / count, sum_y / count))
}

/// Best `limit` candidates, best first. Ties go to the lower position.
pub fn rank_targets(
    scorer: &dyn TargetScorer,
    context: &TurnContext,
    mission_type: MissionType,
    unit_positions: &[Position],
    candidates: impl IntoIterator<Item = Position>,
    limit: usize,
) -> Vec<Position> {
    let center = match centroid(unit_positions) {
        Some(center) => center,
        None => return Vec::new(),
    };

    candidates
        .into_iter()
        .map(|pos| (scorer.score(context, mission_type, center, pos), pos))
        .sorted_by(|(score_a, pos_a), (score_b, pos_b)| {
            score_b
                .partial_cmp(score_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| pos_a.cmp(pos_b))
        })
        .take(limit)
        .map(|(_, pos)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closer_targets_rank_first() {
        let context = TurnContext::new(0, GridSnapshot::new(6, 1), Vec::new());

        let ranked = rank_targets(
            &BuildPositionScorer,
            &context,
            MissionType::BuildTile,
            &[Position::new(0, 0)],
            vec![Position::new(5, 0), Position::new(1, 0), Position::new(3, 0)],
            2,
        );

        assert_eq!(ranked, vec![Position::new(1, 0), Position::new(3, 0)]);
    }

    #[test]
    fn adjacent_structures_raise_score() {
        let mut grid = GridSnapshot::new(3, 3);

        grid.set_structure(Position::new(0, 0), StructureOwner::Player);

        let context = TurnContext::new(0, grid, Vec::new());
        let center = (1.0, 1.0);

        let near_structure = BuildPositionScorer.score(&context, MissionType::BuildTile, center, Position::new(1, 0));
        let open = BuildPositionScorer.score(&context, MissionType::BuildTile, center, Position::new(2, 1));

        assert!(near_structure > open);
    }

    #[test]
    fn closures_are_scorers_and_ties_keep_position_order() {
        let context = TurnContext::new(0, GridSnapshot::new(3, 3), Vec::new());
        let flat = |_: &TurnContext, _: MissionType, _: (f32, f32), _: Position| 1.0_f32;

        let ranked = rank_targets(
            &flat,
            &context,
            MissionType::GuardCluster,
            &[Position::new(2, 2)],
            vec![Position::new(2, 0), Position::new(0, 2), Position::new(0, 1)],
            3,
        );

        assert_eq!(ranked, vec![Position::new(0, 1), Position::new(0, 2), Position::new(2, 0)]);
    }

    #[test]
    fn no_units_means_no_targets() {
        let context = TurnContext::new(0, GridSnapshot::new(2, 2), Vec::new());

        assert!(rank_targets(&BuildPositionScorer, &context, MissionType::Explore, &[], vec![Position::new(0, 0)], 1).is_empty());
    }
}
