//! Priority-ordered turn scheduling.
//!
//! A [`Scheduler`] runs an endless round-robin over a fixed set of
//! [`Unit`]s, giving faster units proportionally more turns. Each unit
//! carries a `next_turn_time` on a shared fixed-point clock; every
//! [`tick`](Scheduler::tick) pops the unit whose time is smallest,
//! advances it by `100_000 / speed` milliticks, and puts it back.
//!
//! The open set is the same [`Frontier`] the pathfinders use: ties on
//! time go to the higher speed (encoded as the second key component),
//! and remaining ties fall back to the frontier's FIFO order, so a
//! given roster always plays out the same way.

use std::fmt;

use mazegrid_core::Frontier;

/// Milliticks one full round costs; a unit with speed `s` acts every
/// `ROUND_MILLITICKS / s`.
const ROUND_MILLITICKS: i64 = 100_000;

/// Identity of a scheduled unit, stable for the scheduler's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(usize);

impl UnitId {
    /// The unit's index in roster order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A combatant in the rotation.
///
/// Created once at scheduler construction; only the scheduler mutates
/// it afterwards, and only when the unit's turn executes.
#[derive(Debug, Clone)]
pub struct Unit {
    id: UnitId,
    name: String,
    speed: i32,
    next_turn_time: i64,
}

impl Unit {
    /// The unit's identity.
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scheduling speed; higher means more frequent turns.
    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// When this unit acts next, in milliticks.
    pub fn next_turn_time(&self) -> i64 {
        self.next_turn_time
    }
}

/// Error from [`Scheduler::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A unit was declared with a speed below 1.
    InvalidSpeed {
        /// The offending unit's name.
        name: String,
        /// The rejected speed.
        speed: i32,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed { name, speed } => {
                write!(f, "unit \u{201c}{name}\u{201d} has invalid speed {speed}")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// An endless speed-proportional round-robin.
pub struct Scheduler {
    units: Vec<Unit>,
    queue: Frontier<usize, (i64, i64)>,
    clock: i64,
    turns: u64,
}

impl Scheduler {
    /// Build a scheduler from `(name, speed)` pairs. Every speed must
    /// be at least 1.
    pub fn new<I>(roster: I) -> Result<Self, ScheduleError>
    where
        I: IntoIterator<Item = (String, i32)>,
    {
        let mut units = Vec::new();
        let mut queue = Frontier::new();

        for (idx, (name, speed)) in roster.into_iter().enumerate() {
            if speed < 1 {
                return Err(ScheduleError::InvalidSpeed { name, speed });
            }
            queue.push(idx, (0, -i64::from(speed)));
            units.push(Unit {
                id: UnitId(idx),
                name,
                speed,
                next_turn_time: 0,
            });
        }

        Ok(Self {
            units,
            queue,
            clock: 0,
            turns: 0,
        })
    }

    /// Execute one turn: pop the due unit, advance its clock, requeue
    /// it, and return its id for the caller to act on.
    ///
    /// Returns `None` only for a unit-less scheduler; otherwise the
    /// rotation never ends on its own.
    pub fn tick(&mut self) -> Option<UnitId> {
        let (idx, (time, _)) = self.queue.pop_min().ok()?;
        self.clock = time;
        self.turns += 1;

        let unit = &mut self.units[idx];
        unit.next_turn_time = time + ROUND_MILLITICKS / i64::from(unit.speed);
        let key = (unit.next_turn_time, -i64::from(unit.speed));
        let id = unit.id;
        self.queue.push(idx, key);
        Some(id)
    }

    /// Look up a unit by id.
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0)
    }

    /// All units, in roster order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Current scheduling clock in milliticks: the time of the most
    /// recently executed turn.
    pub fn clock(&self) -> i64 {
        self.clock
    }

    /// How many turns have executed.
    pub fn turn_count(&self) -> u64 {
        self.turns
    }

    /// Number of scheduled units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the scheduler has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(specs: &[(&str, i32)]) -> Vec<(String, i32)> {
        specs.iter().map(|&(n, s)| (n.to_string(), s)).collect()
    }

    #[test]
    fn rejects_non_positive_speed() {
        let err = Scheduler::new(roster(&[("warrior", 5), ("slug", 0)]));
        assert_eq!(
            err.err(),
            Some(ScheduleError::InvalidSpeed {
                name: "slug".to_string(),
                speed: 0,
            })
        );
    }

    #[test]
    fn empty_scheduler_is_inert() {
        let mut s = Scheduler::new(Vec::new()).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.tick(), None);
        assert_eq!(s.turn_count(), 0);
    }

    #[test]
    fn fastest_unit_wins_the_opening_tie() {
        let mut s =
            Scheduler::new(roster(&[("warrior", 5), ("mage", 7), ("archer", 10)])).unwrap();
        let first = s.tick().unwrap();
        assert_eq!(s.unit(first).unwrap().name(), "archer");
    }

    #[test]
    fn equal_speeds_rotate_in_roster_order() {
        let mut s = Scheduler::new(roster(&[("a", 6), ("b", 6), ("c", 6)])).unwrap();
        let names: Vec<_> = (0..6)
            .map(|_| {
                let id = s.tick().unwrap();
                s.unit(id).unwrap().name().to_string()
            })
            .collect();
        assert_eq!(names, ["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn clock_is_monotonic_and_tracks_due_times() {
        let mut s = Scheduler::new(roster(&[("fast", 10), ("slow", 4)])).unwrap();
        let mut last = 0;
        for _ in 0..50 {
            let id = s.tick().unwrap();
            assert!(s.clock() >= last);
            last = s.clock();
            // The unit's next turn is strictly after the turn it just
            // took.
            assert!(s.unit(id).unwrap().next_turn_time() > s.clock());
        }
    }

    #[test]
    fn turn_shares_are_proportional_to_speed() {
        let specs = [("warrior", 5), ("mage", 7), ("archer", 10), ("rogue", 12)];
        let mut s = Scheduler::new(roster(&specs)).unwrap();

        let ticks = 1000;
        let mut counts = [0u32; 4];
        for _ in 0..ticks {
            counts[s.tick().unwrap().index()] += 1;
        }

        let total_speed: i32 = specs.iter().map(|&(_, sp)| sp).sum();
        for (i, &(_, speed)) in specs.iter().enumerate() {
            let expected = f64::from(speed) * f64::from(ticks) / f64::from(total_speed);
            let got = f64::from(counts[i]);
            assert!(
                (got - expected).abs() <= 2.0,
                "unit {i}: {got} turns, expected about {expected}",
            );
        }
        assert_eq!(counts.iter().sum::<u32>(), 1000);
    }

    #[test]
    fn same_roster_replays_identically() {
        let specs = roster(&[("a", 3), ("b", 9), ("c", 9)]);
        let mut s1 = Scheduler::new(specs.clone()).unwrap();
        let mut s2 = Scheduler::new(specs).unwrap();
        for _ in 0..100 {
            assert_eq!(s1.tick(), s2.tick());
        }
    }
}
