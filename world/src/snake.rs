//! Ordered body of the snake.

use std::collections::VecDeque;

use torus_snake_core::{CellCoord, Heading};

/// Snake body stored head first together with its current heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<CellCoord>,
    heading: Heading,
}

impl Snake {
    /// Creates a snake from segments listed head first.
    ///
    /// Callers are responsible for providing unique, adjacent segments.
    #[must_use]
    pub fn new(body: Vec<CellCoord>, heading: Heading) -> Self {
        Self {
            body: body.into(),
            heading,
        }
    }

    /// Pushes a new head. Without growth the old tail is popped and returned
    /// so the caller can release its cell.
    pub fn advance(&mut self, new_head: CellCoord, grow: bool) -> Option<CellCoord> {
        self.body.push_front(new_head);
        if grow {
            None
        } else {
            self.body.pop_back()
        }
    }

    /// Reports whether any segment occupies the provided cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.body.contains(&cell)
    }

    /// Cell holding the head, if the body is not empty.
    #[must_use]
    pub fn head(&self) -> Option<CellCoord> {
        self.body.front().copied()
    }

    /// Cell holding the tail, if the body is not empty.
    #[must_use]
    pub fn tail(&self) -> Option<CellCoord> {
        self.body.back().copied()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Reports whether the body has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Heading that drives the next step.
    #[must_use]
    pub const fn heading(&self) -> Heading {
        self.heading
    }

    pub(crate) fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Iterates over the segments head first.
    pub fn body(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.body.iter().copied()
    }
}
