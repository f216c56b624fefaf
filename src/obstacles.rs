use std::collections::HashSet;

use crate::snake::Position;

/// Wall cells fixed for the lifetime of one game.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ObstacleSet {
    walls: HashSet<Position>,
}

impl ObstacleSet {
    /// Builds the set from wall positions; duplicates collapse.
    #[must_use]
    pub fn new(walls: impl IntoIterator<Item = Position>) -> Self {
        Self {
            walls: walls.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Iterates walls in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls.iter().copied()
    }

    /// Returns the walls sorted row-major, for stable snapshots.
    #[must_use]
    pub fn sorted(&self) -> Vec<Position> {
        let mut walls: Vec<_> = self.iter().collect();
        walls.sort_by_key(|p| (p.y, p.x));
        walls
    }
}
