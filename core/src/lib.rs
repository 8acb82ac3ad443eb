#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Torus Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches or store writes.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the square arena when no configuration overrides it.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Number of segments a freshly reset snake occupies. Scores are measured against it.
pub const INITIAL_SNAKE_LENGTH: u32 = 3;

/// Number of obstacles scattered across the arena on reset.
pub const DEFAULT_OBSTACLE_COUNT: u32 = 10;

/// Number of ticks a consumed power-up keeps its countdown alive.
pub const DEFAULT_POWER_UP_DURATION: u32 = 10;

/// Cell occupied by the tail of a freshly reset snake.
pub const DEFAULT_START: CellCoord = CellCoord::new(5, 10);

/// Prefix shared by every key written to a score store.
pub const SCORE_KEY_PREFIX: &str = "score_";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Discards the current session and lays out a fresh arena.
    Reset {
        /// Replacement seed for the item placer. `None` continues the current random stream.
        seed: Option<u64>,
    },
    /// Requests a heading change that takes effect on the next step.
    SetHeading {
        /// Heading the snake should adopt.
        heading: Heading,
    },
    /// Advances the simulation by exactly one tick.
    Step,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a fresh session was laid out.
    SessionStarted {
        /// Cell holding the head of the new snake.
        head: CellCoord,
        /// Heading the snake starts with.
        heading: Heading,
    },
    /// Confirms that a heading change was accepted.
    HeadingChanged {
        /// Heading that was active before the change.
        from: Heading,
        /// Heading that will drive the next step.
        to: Heading,
    },
    /// Confirms that the snake head moved between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before the step.
        from: CellCoord,
        /// Cell the head occupies after the step.
        to: CellCoord,
        /// Tail cell released by the move, absent when the snake grew.
        vacated: Option<CellCoord>,
    },
    /// Reports that the snake consumed an apple.
    AppleConsumed {
        /// Cell where the apple was eaten.
        cell: CellCoord,
        /// Cell where the replacement apple was placed.
        replacement: CellCoord,
    },
    /// Reports that the snake consumed a power-up.
    PowerUpConsumed {
        /// Cell where the power-up was eaten.
        cell: CellCoord,
        /// Cell where the replacement power-up was placed.
        replacement: CellCoord,
    },
    /// Reports that the power-up countdown reached zero.
    PowerUpExpired,
    /// Announces the terminal collision of the session.
    GameOver {
        /// What the head ran into.
        cause: CollisionCause,
        /// Cell the head attempted to enter.
        at: CellCoord,
        /// Final score of the session.
        score: u32,
    },
}

/// Reasons a session ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionCause {
    /// The head ran into an obstacle.
    Obstacle,
    /// The head ran into a segment of the snake's own body.
    SnakeBody,
}

/// Lifecycle of a single session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Freshly reset; no step has been taken yet.
    Ready,
    /// At least one step has been taken and the snake is alive.
    Running,
    /// A fatal collision occurred. Steps are ignored until the next reset.
    Over,
}

impl SessionState {
    /// Reports whether the session still accepts steps and heading changes.
    #[must_use]
    pub const fn is_live(self) -> bool {
        !matches!(self, Self::Over)
    }
}

/// Cardinal headings available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Heading {
    /// Every heading in a stable order.
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Axis the heading travels along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Heading pointing the opposite way along the same axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Reports whether both headings travel along the same axis.
    #[must_use]
    pub fn shares_axis_with(self, other: Heading) -> bool {
        self.axis() == other.axis()
    }
}

/// Axis of travel shared by a pair of opposite headings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left and right.
    Horizontal,
    /// Up and down.
    Vertical,
}

/// Tag describing what occupies a grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// A segment of the snake's body.
    Snake,
    /// Food that grows the snake by one segment.
    Apple,
    /// Fatal terrain.
    Obstacle,
    /// Food that grows the snake and starts the power-up countdown.
    PowerUp,
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    x: u32,
    y: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Reports whether the cell lies inside a square grid of the provided size.
    #[must_use]
    pub const fn within(&self, size: u32) -> bool {
        self.x < size && self.y < size
    }

    /// Neighbouring cell in the provided heading on a torus of the provided size.
    ///
    /// Leaving one edge re-enters at the opposite edge; there are no walls.
    /// A zero-sized grid has no neighbours, so the cell is returned unchanged.
    #[must_use]
    pub const fn step(self, heading: Heading, size: u32) -> Self {
        if size == 0 {
            return self;
        }

        let x = self.x % size;
        let y = self.y % size;
        match heading {
            Heading::Up => Self::new(x, if y == 0 { size - 1 } else { y - 1 }),
            Heading::Down => Self::new(x, if y + 1 == size { 0 } else { y + 1 }),
            Heading::Left => Self::new(if x == 0 { size - 1 } else { x - 1 }, y),
            Heading::Right => Self::new(if x + 1 == size { 0 } else { x + 1 }, y),
        }
    }

    /// Heading that moves this cell onto `other` in a single wrapped step, if any.
    #[must_use]
    pub fn heading_towards(self, other: CellCoord, size: u32) -> Option<Heading> {
        Heading::ALL
            .into_iter()
            .find(|heading| self.step(*heading, size) == other)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tunable parameters of a session.
///
/// Every field falls back to its default when omitted from a configuration file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Side length of the square arena.
    pub grid_size: u32,
    /// Segments occupied by the snake on reset.
    pub initial_length: u32,
    /// Tail cell of the snake on reset. The body extends to the right from here.
    pub start: CellCoord,
    /// Obstacles scattered on reset.
    pub obstacle_count: u32,
    /// Apples kept on the arena at all times.
    pub apple_count: u32,
    /// Power-ups kept on the arena at all times.
    pub power_up_count: u32,
    /// Countdown length started by consuming a power-up.
    pub power_up_duration: u32,
    /// Seed for the item placer; `None` draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_length: INITIAL_SNAKE_LENGTH,
            start: DEFAULT_START,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            apple_count: 1,
            power_up_count: 1,
            power_up_duration: DEFAULT_POWER_UP_DURATION,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Returns a copy of the configuration pinned to the provided seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that a fresh arena can hold the initial snake and every item.
    ///
    /// The snake grows during play, so a valid configuration can still fill
    /// the arena later; placement then never terminates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.initial_length < INITIAL_SNAKE_LENGTH {
            return Err(ConfigError::SnakeTooShort {
                length: self.initial_length,
            });
        }
        if self.initial_length > self.grid_size {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_length,
                size: self.grid_size,
            });
        }
        if !self.start.within(self.grid_size) {
            return Err(ConfigError::StartOutOfRange {
                x: self.start.x(),
                y: self.start.y(),
                size: self.grid_size,
            });
        }

        let capacity = u64::from(self.grid_size) * u64::from(self.grid_size);
        let required = u64::from(self.initial_length)
            + u64::from(self.obstacle_count)
            + u64::from(self.apple_count)
            + u64::from(self.power_up_count);
        if required >= capacity {
            return Err(ConfigError::Overcrowded { required, capacity });
        }
        Ok(())
    }

    /// Body of a freshly reset snake, head first.
    #[must_use]
    pub fn initial_body(&self) -> Vec<CellCoord> {
        let mut body = Vec::with_capacity(self.initial_length as usize);
        let mut cell = self.start;
        body.push(cell);
        for _ in 1..self.initial_length {
            cell = cell.step(Heading::Right, self.grid_size);
            body.push(cell);
        }
        body.reverse();
        body
    }
}

/// Explicit arena description used to build scenario fixtures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Snake segments, head first. Consecutive segments must be adjacent on the torus.
    pub body: Vec<CellCoord>,
    /// Heading the snake starts with.
    pub heading: Heading,
    /// Non-snake cells to populate.
    pub items: Vec<(CellCoord, CellKind)>,
}

/// Immutable summary of a session used by presentation and persistence collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Segments gained since reset.
    pub score: u32,
    /// Current lifecycle state.
    pub state: SessionState,
    /// Heading driving the next step.
    pub heading: Heading,
    /// Remaining power-up countdown, zero when inactive.
    pub power_up_timer: u32,
    /// Number of body segments.
    pub length: u32,
    /// Cell holding the head.
    pub head: CellCoord,
}

/// Final result of a session as stored by the persistence collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Wall-clock time of the game over, in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
    /// Final score of the session.
    pub score: u32,
}

impl ScoreRecord {
    /// Creates a new record.
    #[must_use]
    pub const fn new(timestamp_ms: u64, score: u32) -> Self {
        Self {
            timestamp_ms,
            score,
        }
    }

    /// Key under which the record is written to a flat score store.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{SCORE_KEY_PREFIX}{}", self.timestamp_ms)
    }
}

/// Raised when a coordinate falls outside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The coordinate does not address a cell of the grid.
    #[error("cell ({x}, {y}) lies outside the {size}x{size} grid")]
    OutOfRange {
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Side length of the grid.
        size: u32,
    },
}

/// Reasons a session configuration is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The arena has no cells.
    #[error("grid size must be positive")]
    EmptyGrid,
    /// The snake would start shorter than the minimum length.
    #[error("initial snake length {length} is below the minimum of 3")]
    SnakeTooShort {
        /// Configured length.
        length: u32,
    },
    /// The snake would overlap itself along a single row.
    #[error("initial snake length {length} does not fit a row of {size} cells")]
    SnakeTooLong {
        /// Configured length.
        length: u32,
        /// Side length of the grid.
        size: u32,
    },
    /// The start cell lies outside the arena.
    #[error("start cell ({x}, {y}) lies outside the {size}x{size} grid")]
    StartOutOfRange {
        /// Configured start column.
        x: u32,
        /// Configured start row.
        y: u32,
        /// Side length of the grid.
        size: u32,
    },
    /// The snake and items leave no empty cell on a fresh arena.
    #[error("{required} cells are needed on reset but the grid only has {capacity}")]
    Overcrowded {
        /// Cells claimed by the snake and items.
        required: u64,
        /// Total cells in the arena.
        capacity: u64,
    },
}

/// Reasons a scenario layout is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The body has fewer segments than a live snake requires.
    #[error("snake body has {length} segments, at least 3 are required")]
    BodyTooShort {
        /// Number of provided segments.
        length: usize,
    },
    /// A body segment appears twice.
    #[error("snake body visits {cell} more than once")]
    DuplicateSegment {
        /// Repeated cell.
        cell: CellCoord,
    },
    /// Two consecutive body segments are not neighbours.
    #[error("snake segment {index} is not adjacent to the segment before it")]
    DetachedSegment {
        /// Index of the segment that breaks the chain.
        index: usize,
    },
    /// The initial heading would drive the head straight into its neck.
    #[error("heading {heading:?} points back into the snake's neck")]
    HeadingIntoNeck {
        /// Offending heading.
        heading: Heading,
    },
    /// An item uses a kind that cannot be placed explicitly.
    #[error("{kind:?} cannot be placed as an item")]
    InvalidItem {
        /// Offending kind.
        kind: CellKind,
    },
    /// An item shares its cell with the body or another item.
    #[error("cell {cell} is populated twice")]
    Overlap {
        /// Contested cell.
        cell: CellCoord,
    },
    /// A cell lies outside the arena.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The accompanying session configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, ConfigError, Heading, ScoreRecord, SessionConfig};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn score_record_round_trips_through_bincode() {
        assert_round_trip(&ScoreRecord::new(1_700_000_000_123, 17));
    }

    #[test]
    fn score_record_key_embeds_timestamp() {
        assert_eq!(ScoreRecord::new(42, 3).key(), "score_42");
    }

    #[test]
    fn step_wraps_at_every_edge() {
        let size = 20;
        assert_eq!(
            CellCoord::new(19, 4).step(Heading::Right, size),
            CellCoord::new(0, 4)
        );
        assert_eq!(
            CellCoord::new(0, 4).step(Heading::Left, size),
            CellCoord::new(19, 4)
        );
        assert_eq!(
            CellCoord::new(7, 0).step(Heading::Up, size),
            CellCoord::new(7, 19)
        );
        assert_eq!(
            CellCoord::new(7, 19).step(Heading::Down, size),
            CellCoord::new(7, 0)
        );
    }

    #[test]
    fn step_moves_one_cell_inside_the_grid() {
        let cell = CellCoord::new(5, 5);
        assert_eq!(cell.step(Heading::Up, 20), CellCoord::new(5, 4));
        assert_eq!(cell.step(Heading::Down, 20), CellCoord::new(5, 6));
        assert_eq!(cell.step(Heading::Left, 20), CellCoord::new(4, 5));
        assert_eq!(cell.step(Heading::Right, 20), CellCoord::new(6, 5));
    }

    #[test]
    fn heading_towards_understands_wrapping() {
        let edge = CellCoord::new(0, 3);
        assert_eq!(
            edge.heading_towards(CellCoord::new(19, 3), 20),
            Some(Heading::Left)
        );
        assert_eq!(edge.heading_towards(CellCoord::new(2, 3), 20), None);
    }

    #[test]
    fn opposite_headings_share_an_axis() {
        for heading in Heading::ALL {
            assert!(heading.shares_axis_with(heading.opposite()));
        }
        assert!(!Heading::Left.shares_axis_with(Heading::Up));
    }

    #[test]
    fn default_initial_body_runs_right_from_start() {
        let body = SessionConfig::default().initial_body();
        assert_eq!(
            body,
            vec![
                CellCoord::new(7, 10),
                CellCoord::new(6, 10),
                CellCoord::new(5, 10)
            ]
        );
    }

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validation_rejects_overcrowded_arena() {
        let config = SessionConfig {
            grid_size: 4,
            initial_length: 3,
            start: CellCoord::new(0, 0),
            obstacle_count: 11,
            ..SessionConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Overcrowded {
                required: 16,
                capacity: 16
            })
        );
    }

    #[test]
    fn validation_rejects_start_outside_grid() {
        let config = SessionConfig {
            start: CellCoord::new(20, 0),
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfRange { x: 20, .. })
        ));
    }
}
