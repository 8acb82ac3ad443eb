//! Plain-text rendering of the arena.

use torus_snake_core::CellKind;
use torus_snake_world::{query, World};

/// Renders the arena row by row, one glyph per cell and a newline after each row.
pub(crate) fn render(world: &World) -> String {
    let size = query::grid_size(world);
    let head = query::snake_body(world).next();
    let mut out = String::new();
    for (cell, kind) in query::cells(world) {
        out.push(match kind {
            CellKind::Snake if Some(cell) == head => '@',
            CellKind::Snake => 'o',
            CellKind::Obstacle => '#',
            CellKind::Apple => '*',
            CellKind::PowerUp => '+',
            CellKind::Empty => '.',
        });
        if cell.x() + 1 == size {
            out.push('\n');
        }
    }
    out
}
