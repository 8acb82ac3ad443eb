#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Torus Snake.

pub mod grid;
pub mod placer;
pub mod snake;

pub use grid::Grid;
pub use placer::ItemPlacer;
pub use snake::Snake;

use torus_snake_core::{
    CellCoord, CellKind, CollisionCause, Command, ConfigError, Event, GridError, Heading, Layout,
    LayoutError, SessionConfig, SessionState,
};

/// Represents the authoritative state of a single snake session.
#[derive(Clone, Debug)]
pub struct World {
    config: SessionConfig,
    grid: Grid,
    snake: Snake,
    placer: ItemPlacer,
    state: SessionState,
    power_up_timer: u32,
}

impl World {
    /// Creates a world with a freshly laid out session.
    ///
    /// The item placer is seeded from `config.seed`, or from operating system
    /// entropy when no seed is configured.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::empty(config);
        world.reset();
        Ok(world)
    }

    /// Creates a world from an explicit arena description instead of a random layout.
    ///
    /// Replacement items are still placed at random. A later [`World::reset`]
    /// returns to the configured random layout.
    pub fn from_layout(config: SessionConfig, layout: Layout) -> Result<Self, LayoutError> {
        config.validate()?;
        let mut world = Self::empty(config);
        world.load_layout(layout)?;
        Ok(world)
    }

    fn empty(config: SessionConfig) -> Self {
        let placer = match config.seed {
            Some(seed) => ItemPlacer::seeded(seed),
            None => ItemPlacer::from_entropy(),
        };
        Self {
            grid: Grid::new(config.grid_size),
            snake: Snake::new(Vec::new(), Heading::Right),
            placer,
            state: SessionState::Ready,
            power_up_timer: 0,
            config,
        }
    }

    /// Discards the current session and lays out a fresh one, continuing the
    /// placer's random stream.
    pub fn reset(&mut self) {
        let mut events = Vec::new();
        self.start_session(&mut events);
    }

    /// Discards the current session and lays out a fresh one from `seed`.
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.placer.reseed(seed);
        self.reset();
    }

    /// Requests a heading for the next step.
    ///
    /// Headings on the current axis (the reverse, or the current heading
    /// itself) are ignored, as is any request after game over. Returns whether
    /// the heading changed.
    pub fn set_heading(&mut self, heading: Heading) -> bool {
        let mut events = Vec::new();
        self.steer(heading, &mut events);
        !events.is_empty()
    }

    /// Advances the session by one tick. Does nothing after game over.
    pub fn step(&mut self) {
        let mut events = Vec::new();
        self.advance(&mut events);
    }

    /// Reports whether the session ended in a collision.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == SessionState::Over
    }

    /// Segments gained since reset.
    #[must_use]
    pub fn score(&self) -> u32 {
        let length = u32::try_from(self.snake.len()).unwrap_or(u32::MAX);
        length.saturating_sub(self.config.initial_length)
    }

    /// Kind stored at the provided cell.
    pub fn cell_at(&self, cell: CellCoord) -> Result<CellKind, GridError> {
        self.grid.get(cell)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Heading that drives the next step.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.snake.heading()
    }

    /// Remaining power-up countdown, zero when inactive.
    #[must_use]
    pub const fn power_up_timer(&self) -> u32 {
        self.power_up_timer
    }

    /// Number of snake segments.
    #[must_use]
    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    /// Configuration the session was built from.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn start_session(&mut self, out_events: &mut Vec<Event>) {
        self.grid = Grid::new(self.config.grid_size);
        self.snake = Snake::new(self.config.initial_body(), Heading::Right);
        let body: Vec<CellCoord> = self.snake.body().collect();
        for cell in body {
            self.tag(cell, CellKind::Snake);
        }

        for _ in 0..self.config.obstacle_count {
            let _ = self.placer.place_random(&mut self.grid, CellKind::Obstacle);
        }
        for _ in 0..self.config.apple_count {
            let _ = self.placer.place_random(&mut self.grid, CellKind::Apple);
        }
        for _ in 0..self.config.power_up_count {
            let _ = self.placer.place_random(&mut self.grid, CellKind::PowerUp);
        }

        self.state = SessionState::Ready;
        self.power_up_timer = 0;
        self.announce_start(out_events);
    }

    fn load_layout(&mut self, layout: Layout) -> Result<(), LayoutError> {
        let Layout {
            body,
            heading,
            items,
        } = layout;
        let size = self.config.grid_size;

        if body.len() < 3 {
            return Err(LayoutError::BodyTooShort { length: body.len() });
        }
        for (index, cell) in body.iter().enumerate() {
            if self.grid.get(*cell)? != CellKind::Empty {
                return Err(LayoutError::DuplicateSegment { cell: *cell });
            }
            if index > 0 && body[index - 1].heading_towards(*cell, size).is_none() {
                return Err(LayoutError::DetachedSegment { index });
            }
            self.grid.set(*cell, CellKind::Snake)?;
        }
        if body[0].step(heading, size) == body[1] {
            return Err(LayoutError::HeadingIntoNeck { heading });
        }

        for (cell, kind) in items {
            if matches!(kind, CellKind::Empty | CellKind::Snake) {
                return Err(LayoutError::InvalidItem { kind });
            }
            if self.grid.get(cell)? != CellKind::Empty {
                return Err(LayoutError::Overlap { cell });
            }
            self.grid.set(cell, kind)?;
        }

        self.snake = Snake::new(body, heading);
        self.state = SessionState::Ready;
        self.power_up_timer = 0;
        Ok(())
    }

    fn announce_start(&self, out_events: &mut Vec<Event>) {
        if let Some(head) = self.snake.head() {
            tracing::debug!(%head, obstacles = self.config.obstacle_count, "session started");
            out_events.push(Event::SessionStarted {
                head,
                heading: self.snake.heading(),
            });
        }
    }

    fn steer(&mut self, heading: Heading, out_events: &mut Vec<Event>) {
        let current = self.snake.heading();
        if !self.state.is_live() || heading.shares_axis_with(current) {
            return;
        }

        self.snake.set_heading(heading);
        out_events.push(Event::HeadingChanged {
            from: current,
            to: heading,
        });
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        if self.state == SessionState::Over {
            return;
        }
        let Some(from) = self.snake.head() else {
            return;
        };

        let target = from.step(self.snake.heading(), self.grid.size());
        let kind = match self.grid.get(target) {
            Ok(kind) => kind,
            Err(error) => {
                tracing::error!(%error, "step target left the grid");
                return;
            }
        };

        let grow = match kind {
            CellKind::Empty => false,
            CellKind::Apple | CellKind::PowerUp => true,
            CellKind::Snake => {
                self.end_session(CollisionCause::SnakeBody, target, out_events);
                return;
            }
            CellKind::Obstacle => {
                self.end_session(CollisionCause::Obstacle, target, out_events);
                return;
            }
        };

        self.tag(target, CellKind::Snake);
        let vacated = self.snake.advance(target, grow);
        if let Some(tail) = vacated {
            self.tag(tail, CellKind::Empty);
        }
        self.state = SessionState::Running;
        out_events.push(Event::SnakeAdvanced {
            from,
            to: target,
            vacated,
        });

        match kind {
            CellKind::Apple => {
                let replacement = self.placer.place_random(&mut self.grid, CellKind::Apple);
                out_events.push(Event::AppleConsumed {
                    cell: target,
                    replacement,
                });
            }
            CellKind::PowerUp => {
                self.power_up_timer = self.config.power_up_duration;
                let replacement = self.placer.place_random(&mut self.grid, CellKind::PowerUp);
                out_events.push(Event::PowerUpConsumed {
                    cell: target,
                    replacement,
                });
            }
            CellKind::Empty | CellKind::Snake | CellKind::Obstacle => {}
        }

        if self.power_up_timer > 0 {
            self.power_up_timer -= 1;
            if self.power_up_timer == 0 {
                tracing::debug!("power-up expired");
                out_events.push(Event::PowerUpExpired);
            }
        }
    }

    fn end_session(&mut self, cause: CollisionCause, at: CellCoord, out_events: &mut Vec<Event>) {
        self.state = SessionState::Over;
        let score = self.score();
        tracing::info!(?cause, %at, score, "game over");
        out_events.push(Event::GameOver { cause, at, score });
    }

    fn tag(&mut self, cell: CellCoord, kind: CellKind) {
        if let Err(error) = self.grid.set(cell, kind) {
            tracing::error!(%error, ?kind, "engine addressed a cell outside the grid");
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Reset { seed } => {
            if let Some(seed) = seed {
                world.placer.reseed(seed);
            }
            world.start_session(out_events);
        }
        Command::SetHeading { heading } => world.steer(heading, out_events),
        Command::Step => world.advance(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use torus_snake_core::{CellCoord, CellKind, SessionSnapshot};

    /// Captures the scalar state a presentation layer shows next to the board.
    #[must_use]
    pub fn snapshot(world: &World) -> SessionSnapshot {
        SessionSnapshot {
            score: world.score(),
            state: world.state,
            heading: world.snake.heading(),
            power_up_timer: world.power_up_timer,
            length: u32::try_from(world.snake.len()).unwrap_or(u32::MAX),
            head: world.snake.head().unwrap_or(world.config.start),
        }
    }

    /// Side length of the arena.
    #[must_use]
    pub fn grid_size(world: &World) -> u32 {
        world.grid.size()
    }

    /// Iterates over every cell of the arena in row-major order.
    pub fn cells(world: &World) -> impl Iterator<Item = (CellCoord, CellKind)> + '_ {
        world.grid.cells()
    }

    /// Iterates over the cells tagged with the provided kind.
    pub fn cells_of(world: &World, kind: CellKind) -> impl Iterator<Item = CellCoord> + '_ {
        world.grid.cells_of(kind)
    }

    /// Iterates over the snake body, head first.
    pub fn snake_body(world: &World) -> impl Iterator<Item = CellCoord> + '_ {
        world.snake.body()
    }
}
