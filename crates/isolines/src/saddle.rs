//! Resolution of ambiguous (saddle) cells by quadrant subdivision.
//!
//! A saddle cell has no entry in the exit table. The cell is split into four
//! quadrants with bilinearly interpolated corners and the line is followed
//! quadrant by quadrant until it leaves through the parent's boundary.
//! Quadrants that are saddles themselves are split again, so the walk keeps
//! an explicit stack of frames instead of recursing.

use crate::cell::{exit_edge, Cell, Edge, Quadrant};
use crate::geometry::Point;

/// Total quadrant steps allowed for one saddle cell.
pub const MAX_SADDLE_ITERATIONS: usize = 1000;

/// Deepest nesting of subdivisions, about log2 of the iteration cap.
pub const MAX_SUBDIVISION_DEPTH: usize = 10;

/// Why a saddle could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaddleFailure {
    /// A quadrant on the path does not contain the value.
    ValueOutOfCell,
    /// Iteration or depth limit reached.
    Undetailed,
}

/// A subdivided cell and the quadrant the line currently occupies.
struct Frame {
    cell: Cell,
    quadrant: Quadrant,
}

/// Follow a line entering `cell` through `entry` to its exit edge.
///
/// Crossings of internal quadrant edges are appended to `points` in
/// traversal order. The exit crossing itself is left to the caller.
pub fn resolve(
    cell: &Cell,
    entry: Edge,
    value: f64,
    points: &mut Vec<Point>,
) -> Result<Edge, SaddleFailure> {
    let mut stack: Vec<Frame> = Vec::with_capacity(MAX_SUBDIVISION_DEPTH);
    let mut current = *cell;
    let mut entry = entry;

    for _ in 0..MAX_SADDLE_ITERATIONS {
        if !current.contains_value(value) {
            return Err(SaddleFailure::ValueOutOfCell);
        }

        let mask = current.mask(value);
        let exit = match exit_edge(entry, mask) {
            Some(exit) => exit,
            None if mask.is_saddle() => {
                if stack.len() >= MAX_SUBDIVISION_DEPTH {
                    return Err(SaddleFailure::Undetailed);
                }
                let quadrant = current.entry_quadrant(entry, value);
                stack.push(Frame {
                    cell: current,
                    quadrant,
                });
                current = current.quadrant(quadrant);
                continue;
            }
            None => return Err(SaddleFailure::ValueOutOfCell),
        };

        // `exit` leaves `current`; climb until it is internal to a frame
        loop {
            let Some(frame) = stack.last_mut() else {
                return Ok(exit);
            };

            if frame.quadrant.on_parent_boundary(exit) {
                stack.pop();
                continue;
            }

            let inner = frame.cell.quadrant(frame.quadrant);
            let crossing = inner.crossing(exit, value);
            if points.last() != Some(&crossing) {
                points.push(crossing);
            }

            let Some(next) = frame.quadrant.neighbor(exit) else {
                return Err(SaddleFailure::Undetailed);
            };
            frame.quadrant = next;
            current = frame.cell.quadrant(next);
            entry = exit.opposite();
            break;
        }
    }

    Err(SaddleFailure::Undetailed)
}
