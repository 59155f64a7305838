use crate::map::*;
use crate::turn::*;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitAction {
    Build { unit: UnitId },
    Move { unit: UnitId, direction: Direction },
}

impl UnitAction {
    pub fn unit(&self) -> &UnitId {
        match self {
            UnitAction::Build { unit } => unit,
            UnitAction::Move { unit, .. } => unit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRequest {
    pub unit: UnitId,
    pub pos: Position,
    pub directions: DirectionSet,
}

impl MoveRequest {
    fn options(&self) -> impl Iterator<Item = (Direction, Position)> + '_ {
        self.directions.directions().map(move |direction| (direction, self.pos.translate(direction)))
    }
}

/// Greedy collision avoidance. Units with a single way forward claim their tile first, then
/// units with a choice take the first free option. A unit that cannot move keeps its own tile
/// occupied. Tiles claimed by an approved move are occupied for everyone after it.
pub fn resolve_moves(occupied: &mut HashSet<Position>, requests: &[MoveRequest]) -> Vec<UnitAction> {
    let mut claims: Vec<Option<(Direction, Position)>> = vec![None; requests.len()];
    let mut approval_order = Vec::new();

    for request in requests.iter() {
        if request.options().all(|(_, next_pos)| occupied.contains(&next_pos)) {
            occupied.insert(request.pos);
        }
    }

    let single_option = requests.iter().enumerate().filter(|(_, request)| request.directions.len() == 1);
    let multi_option = requests.iter().enumerate().filter(|(_, request)| request.directions.len() > 1);

    for (index, request) in single_option.chain(multi_option) {
        match request.options().find(|(_, next_pos)| !occupied.contains(next_pos)) {
            Some((direction, next_pos)) => {
                occupied.insert(next_pos);

                claims[index] = Some((direction, next_pos));
                approval_order.push(index);
            }
            None => {
                occupied.insert(request.pos);
            }
        }
    }

    //
    // A unit that stays put keeps its tile, so moves into it are revoked until none remain.
    //

    loop {
        let staying: HashSet<Position> = requests
            .iter()
            .zip(claims.iter())
            .filter(|(_, claim)| claim.is_none())
            .map(|(request, _)| request.pos)
            .collect();

        let mut revoked = false;

        for (request, claim) in requests.iter().zip(claims.iter_mut()) {
            if matches!(claim, Some((_, next_pos)) if staying.contains(next_pos)) {
                *claim = None;
                occupied.insert(request.pos);
                revoked = true;
            }
        }

        if !revoked {
            break;
        }
    }

    approval_order
        .into_iter()
        .filter_map(|index| {
            claims[index].map(|(direction, _)| UnitAction::Move {
                unit: requests[index].unit.clone(),
                direction,
            })
        })
        .collect()
}
