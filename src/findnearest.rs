use crate::map::*;

pub trait HasPosition {
    fn pos(&self) -> Position;
}

impl HasPosition for Position {
    fn pos(&self) -> Position {
        *self
    }
}

impl<T: HasPosition + ?Sized> HasPosition for &T {
    fn pos(&self) -> Position {
        (**self).pos()
    }
}

/// Nearest-by-Manhattan-distance queries over anything with a position. Ties go to the lowest
/// position so results do not depend on iteration order.
pub trait FindNearestItertools: Iterator {
    fn find_nearest_linear<V>(self, other_pos: Position) -> Option<V>
    where
        Self: Iterator<Item = V> + Sized,
        V: HasPosition,
    {
        self.map(|pos_object| (other_pos.distance_to(pos_object.pos()), pos_object))
            .min_by_key(|(distance, pos_object)| (*distance, pos_object.pos()))
            .map(|(_, pos_object)| pos_object)
    }

    fn find_nearest_linear_distance<V>(self, other_pos: Position) -> Option<u32>
    where
        Self: Iterator<Item = V> + Sized,
        V: HasPosition,
    {
        self.map(|pos_object| other_pos.distance_to(pos_object.pos())).min()
    }
}

impl<T: ?Sized> FindNearestItertools for T where T: Iterator {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_breaks_ties_by_position() {
        let candidates = vec![Position::new(2, 1), Position::new(0, 1), Position::new(1, 2)];

        let nearest = candidates.iter().find_nearest_linear(Position::new(1, 1));

        assert_eq!(nearest, Some(&Position::new(0, 1)));
        assert_eq!(candidates.iter().find_nearest_linear_distance(Position::new(1, 1)), Some(1));
    }

    #[test]
    fn nearest_of_nothing_is_none() {
        let candidates: Vec<Position> = Vec::new();

        assert_eq!(candidates.into_iter().find_nearest_linear(Position::new(0, 0)), None);
    }
}
