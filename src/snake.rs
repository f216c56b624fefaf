use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in tile coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake head plus the trailing body, closest segment first.
///
/// The body only ever grows: one segment per primary food eaten.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    head: Position,
    body: Vec<Position>,
}

impl Snake {
    /// Creates a bodiless snake with its head at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            head: start,
            body: Vec::new(),
        }
    }

    /// Creates a snake from an explicit head and body (closest segment first).
    #[must_use]
    pub fn from_parts(head: Position, body: Vec<Position>) -> Self {
        Self { head, body }
    }

    /// Appends a tail segment at `at`.
    pub fn grow(&mut self, at: Position) {
        self.body.push(at);
    }

    /// Moves the snake one tile in `direction`.
    ///
    /// Each segment takes the position its predecessor held before this call;
    /// segment 0 takes the old head. The new body is built from a snapshot, so
    /// no segment sees a value already moved this step.
    pub fn advance(&mut self, direction: Direction) {
        let previous_head = self.head;

        if !self.body.is_empty() {
            let keep = self.body.len() - 1;
            let mut next_body = Vec::with_capacity(self.body.len());
            next_body.push(previous_head);
            next_body.extend_from_slice(&self.body[..keep]);
            self.body = next_body;
        }

        self.head = previous_head.step(direction);
    }

    /// Returns true if the head overlaps any body segment.
    #[must_use]
    pub fn self_collides(&self) -> bool {
        self.body.contains(&self.head)
    }

    /// Returns true if the head or any body segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.head == position || self.body.contains(&position)
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    /// Body segments from the neck to the tail.
    #[must_use]
    pub fn body(&self) -> &[Position] {
        &self.body
    }

    /// Returns the number of body segments, which is also the score.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when the snake is only a head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates head first, then body from neck to tail.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }
}
