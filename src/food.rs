use std::time::Duration;

use rand::Rng;

use crate::config::{GridSize, SpawnPolicy};
use crate::snake::Position;

/// Primary food, the optional bonus food, and the celebration window that
/// follows eating a bonus.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FoodManager {
    primary: Position,
    bonus: Option<Position>,
    celebration_window: Duration,
    celebration_remaining: Option<Duration>,
}

impl FoodManager {
    /// Creates a manager with primary food at `primary` and no bonus.
    #[must_use]
    pub fn new(primary: Position, celebration_window: Duration) -> Self {
        Self {
            primary,
            bonus: None,
            celebration_window,
            celebration_remaining: None,
        }
    }

    #[must_use]
    pub fn primary(&self) -> Position {
        self.primary
    }

    /// Returns the bonus food position while it is visible.
    #[must_use]
    pub fn bonus(&self) -> Option<Position> {
        self.bonus
    }

    #[must_use]
    pub fn bonus_visible(&self) -> bool {
        self.bonus.is_some()
    }

    /// True from the moment a bonus is eaten until the window runs out.
    #[must_use]
    pub fn celebration_active(&self) -> bool {
        self.celebration_remaining.is_some()
    }

    /// Time left in the current celebration window.
    #[must_use]
    pub fn celebration_remaining(&self) -> Option<Duration> {
        self.celebration_remaining
    }

    /// Moves primary food to `position` without touching the random source.
    pub fn set_primary(&mut self, position: Position) {
        self.primary = position;
    }

    /// Shows bonus food at `position` without touching the random source.
    pub fn set_bonus(&mut self, position: Position) {
        self.bonus = Some(position);
    }

    /// Places primary food on a random tile allowed by `policy`.
    ///
    /// `blocked` reports tiles taken by walls or the snake; it is only
    /// consulted under [`SpawnPolicy::AvoidOccupied`].
    pub fn place_primary<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        policy: SpawnPolicy,
        blocked: F,
    ) -> Position
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let bonus = self.bonus;
        self.primary = spawn_position(rng, bounds, policy, |p| {
            blocked(p) || bonus == Some(p)
        });
        self.primary
    }

    /// Places bonus food on a random tile and makes it visible.
    ///
    /// A bonus already on the board is moved, not duplicated.
    pub fn place_bonus<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        policy: SpawnPolicy,
        blocked: F,
    ) -> Position
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let primary = self.primary;
        let position = spawn_position(rng, bounds, policy, |p| blocked(p) || p == primary);
        self.bonus = Some(position);
        position
    }

    /// Eats the primary food and places a new one. Returns the eaten tile.
    pub fn consume_primary<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        policy: SpawnPolicy,
        blocked: F,
    ) -> Position
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let eaten = self.primary;
        self.place_primary(rng, bounds, policy, blocked);
        eaten
    }

    /// Eats the bonus food, if visible, and (re)starts the celebration window.
    pub fn consume_bonus(&mut self) -> Option<Position> {
        let eaten = self.bonus.take()?;
        self.celebration_remaining = Some(self.celebration_window);
        Some(eaten)
    }

    /// Feeds elapsed wall-clock time into the celebration window.
    ///
    /// Returns true when this call ended the celebration.
    pub fn advance_timers(&mut self, elapsed: Duration) -> bool {
        let Some(remaining) = self.celebration_remaining else {
            return false;
        };

        let remaining = remaining.saturating_sub(elapsed);
        if remaining.is_zero() {
            self.celebration_remaining = None;
            return true;
        }

        self.celebration_remaining = Some(remaining);
        false
    }
}

/// Draws a uniformly random tile, x before y.
#[must_use]
pub fn random_tile<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    debug_assert!(!bounds.is_empty());

    Position {
        x: rng.gen_range(0..i32::from(bounds.width)),
        y: rng.gen_range(0..i32::from(bounds.height)),
    }
}

/// Picks a spawn tile according to `policy`.
///
/// Under [`SpawnPolicy::AvoidOccupied`] the tile is drawn uniformly from the
/// tiles `blocked` rejects; a board with no free tile falls back to any tile.
#[must_use]
pub fn spawn_position<R, F>(
    rng: &mut R,
    bounds: GridSize,
    policy: SpawnPolicy,
    blocked: F,
) -> Position
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if policy == SpawnPolicy::Anywhere {
        return random_tile(rng, bounds);
    }

    let mut candidates = Vec::with_capacity(bounds.total_cells());
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !blocked(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        tracing::debug!(
            width = bounds.width,
            height = bounds.height,
            "no free tile for food, placing anywhere"
        );
        return random_tile(rng, bounds);
    }

    let index = rng.gen_range(0..candidates.len());
    candidates[index]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{FoodManager, random_tile, spawn_position};
    use crate::config::{GridSize, SpawnPolicy};
    use crate::snake::Position;

    const WINDOW: Duration = Duration::from_secs(2);

    fn grid(width: u16, height: u16) -> GridSize {
        GridSize { width, height }
    }

    #[test]
    fn random_tiles_stay_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = grid(7, 3);

        for _ in 0..500 {
            assert!(random_tile(&mut rng, bounds).is_within_bounds(bounds));
        }
    }

    #[test]
    fn seeded_placement_is_deterministic() {
        let mut a = FoodManager::new(Position::new(0, 0), WINDOW);
        let mut b = FoodManager::new(Position::new(0, 0), WINDOW);
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);

        for _ in 0..20 {
            let pa = a.place_primary(&mut rng_a, grid(24, 24), SpawnPolicy::Anywhere, |_| false);
            let pb = b.place_primary(&mut rng_b, grid(24, 24), SpawnPolicy::Anywhere, |_| false);
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn anywhere_ignores_blocked_tiles() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut expected_rng = StdRng::seed_from_u64(5);

        let position = spawn_position(&mut rng, grid(4, 4), SpawnPolicy::Anywhere, |_| true);

        assert_eq!(position, random_tile(&mut expected_rng, grid(4, 4)));
    }

    #[test]
    fn avoid_occupied_never_lands_on_blocked_tiles() {
        let mut rng = StdRng::seed_from_u64(7);
        let blocked = |p: Position| p.y == 0 || p.x == 2;

        for _ in 0..200 {
            let position =
                spawn_position(&mut rng, grid(5, 4), SpawnPolicy::AvoidOccupied, blocked);
            assert!(!blocked(position));
            assert!(position.is_within_bounds(grid(5, 4)));
        }
    }

    #[test]
    fn avoid_occupied_falls_back_on_full_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let position = spawn_position(&mut rng, grid(3, 3), SpawnPolicy::AvoidOccupied, |_| true);
        assert!(position.is_within_bounds(grid(3, 3)));
    }

    #[test]
    fn avoid_occupied_keeps_foods_apart() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut food = FoodManager::new(Position::new(0, 0), WINDOW);

        // On a 2x1 board the bonus can only go where the primary is not.
        for _ in 0..20 {
            food.place_primary(&mut rng, grid(2, 1), SpawnPolicy::AvoidOccupied, |_| false);
            food.place_bonus(&mut rng, grid(2, 1), SpawnPolicy::AvoidOccupied, |_| false);
            assert_ne!(food.bonus(), Some(food.primary()));
        }
    }

    #[test]
    fn consume_primary_returns_eaten_tile_and_replaces_it() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut expected_rng = StdRng::seed_from_u64(12);
        let mut food = FoodManager::new(Position::new(3, 3), WINDOW);

        let eaten = food.consume_primary(&mut rng, grid(10, 10), SpawnPolicy::Anywhere, |_| false);

        assert_eq!(eaten, Position::new(3, 3));
        assert_eq!(food.primary(), random_tile(&mut expected_rng, grid(10, 10)));
    }

    #[test]
    fn placing_bonus_makes_it_visible_and_replaces_previous() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = FoodManager::new(Position::new(0, 0), WINDOW);
        assert!(!food.bonus_visible());

        let first = food.place_bonus(&mut rng, grid(30, 30), SpawnPolicy::Anywhere, |_| false);
        assert_eq!(food.bonus(), Some(first));

        let second = food.place_bonus(&mut rng, grid(30, 30), SpawnPolicy::Anywhere, |_| false);
        assert_eq!(food.bonus(), Some(second));
    }

    #[test]
    fn consuming_bonus_hides_it_and_starts_celebration() {
        let mut food = FoodManager::new(Position::new(0, 0), WINDOW);
        food.set_bonus(Position::new(4, 4));

        assert_eq!(food.consume_bonus(), Some(Position::new(4, 4)));
        assert!(!food.bonus_visible());
        assert!(food.celebration_active());
        assert_eq!(food.celebration_remaining(), Some(WINDOW));
    }

    #[test]
    fn consuming_absent_bonus_does_nothing() {
        let mut food = FoodManager::new(Position::new(0, 0), WINDOW);
        assert_eq!(food.consume_bonus(), None);
        assert!(!food.celebration_active());
    }

    #[test]
    fn celebration_lasts_exactly_one_window() {
        let mut food = FoodManager::new(Position::new(0, 0), WINDOW);
        food.set_bonus(Position::new(1, 1));
        food.consume_bonus();

        for _ in 0..19 {
            assert!(!food.advance_timers(Duration::from_millis(100)));
            assert!(food.celebration_active());
        }

        assert!(food.advance_timers(Duration::from_millis(100)));
        assert!(!food.celebration_active());
        assert!(!food.advance_timers(Duration::from_millis(100)));
    }

    #[test]
    fn second_bonus_restarts_window() {
        let mut food = FoodManager::new(Position::new(0, 0), WINDOW);
        food.set_bonus(Position::new(1, 1));
        food.consume_bonus();
        food.advance_timers(Duration::from_millis(1_500));

        food.set_bonus(Position::new(2, 2));
        food.consume_bonus();
        food.advance_timers(Duration::from_millis(1_500));

        assert!(food.celebration_active());
        assert_eq!(food.celebration_remaining(), Some(Duration::from_millis(500)));
    }
}
