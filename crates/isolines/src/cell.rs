//! Grid cells, their edges and the marching squares transition table.
//!
//! Corner naming follows the field layout: `y` grows upwards, so the
//! left-bottom corner of cell `(x, y)` is node `(x, y)`.
//!
//! ```text
//!  LT ---- Top ---- RT
//!   |               |
//! Left            Right
//!   |               |
//!  LB --- Bottom -- RB
//! ```

use crate::field::ScalarField2D;
use crate::geometry::Point;

/// One side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Edge {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// The same edge seen from the neighbouring cell.
    pub const fn opposite(self) -> Edge {
        match self {
            Edge::Left => Edge::Right,
            Edge::Top => Edge::Bottom,
            Edge::Right => Edge::Left,
            Edge::Bottom => Edge::Top,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    /// Corner bits at the two ends of the edge, in interpolation order.
    const fn corner_bits(self) -> (u8, u8) {
        match self {
            Edge::Left => (CellBitmask::LEFT_BOTTOM.0, CellBitmask::LEFT_TOP.0),
            Edge::Top => (CellBitmask::LEFT_TOP.0, CellBitmask::RIGHT_TOP.0),
            Edge::Right => (CellBitmask::RIGHT_BOTTOM.0, CellBitmask::RIGHT_TOP.0),
            Edge::Bottom => (CellBitmask::LEFT_BOTTOM.0, CellBitmask::RIGHT_BOTTOM.0),
        }
    }
}

/// Which corners of a cell lie strictly above the traced value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellBitmask(u8);

impl CellBitmask {
    pub const NONE: CellBitmask = CellBitmask(0);
    pub const LEFT_TOP: CellBitmask = CellBitmask(1);
    pub const RIGHT_TOP: CellBitmask = CellBitmask(2);
    pub const RIGHT_BOTTOM: CellBitmask = CellBitmask(4);
    pub const LEFT_BOTTOM: CellBitmask = CellBitmask(8);
    pub const ALL: CellBitmask = CellBitmask(15);

    pub const fn from_bits(bits: u8) -> CellBitmask {
        CellBitmask(bits & 0x0f)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn union(self, other: CellBitmask) -> CellBitmask {
        CellBitmask(self.0 | other.0)
    }

    pub const fn contains(self, other: CellBitmask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Two diagonal corners above and the other two below.
    pub const fn is_saddle(self) -> bool {
        self.0 == 0b0101 || self.0 == 0b1010
    }

    /// All corners on the same side of the value.
    pub const fn is_uniform(self) -> bool {
        self.0 == CellBitmask::NONE.0 || self.0 == CellBitmask::ALL.0
    }

    /// Whether the isoline crosses `edge` under this classification.
    pub const fn edge_crosses(self, edge: Edge) -> bool {
        let (a, b) = edge.corner_bits();
        ((self.0 & a) != 0) != ((self.0 & b) != 0)
    }
}

/// Exit edge per (entry edge, corner bitmask). `None` for uniform cells,
/// saddles, and entry edges the line cannot cross.
const EXIT_TABLE: [[Option<Edge>; 16]; 4] = build_exit_table();

const fn build_exit_table() -> [[Option<Edge>; 16]; 4] {
    let mut table = [[None; 16]; 4];
    let mut e = 0;
    while e < 4 {
        let entry = Edge::ALL[e];
        let mut bits = 0u8;
        while bits < 16 {
            let mask = CellBitmask(bits);
            if !mask.is_saddle() && mask.edge_crosses(entry) {
                let mut k = 0;
                while k < 4 {
                    if k != e && mask.edge_crosses(Edge::ALL[k]) {
                        table[e][bits as usize] = Some(Edge::ALL[k]);
                    }
                    k += 1;
                }
            }
            bits += 1;
        }
        e += 1;
    }
    table
}

/// Look up where a line entering through `entry` leaves a cell classified as `mask`.
pub fn exit_edge(entry: Edge, mask: CellBitmask) -> Option<Edge> {
    EXIT_TABLE[entry.index()][mask.bits() as usize]
}

/// Whether the value lies on an edge with endpoint values `a` and `b`.
///
/// Exactly one endpoint must be strictly above the value, matching the
/// classification used by [`CellBitmask`].
pub fn crosses(a: f64, b: f64, value: f64) -> bool {
    (a > value) != (b > value)
}

/// Quadrant of a subdivided cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    LeftBottom,
    LeftTop,
    RightBottom,
    RightTop,
}

impl Quadrant {
    /// The two quadrants along a parent edge, in interpolation order.
    pub fn along(edge: Edge) -> (Quadrant, Quadrant) {
        match edge {
            Edge::Left => (Quadrant::LeftBottom, Quadrant::LeftTop),
            Edge::Top => (Quadrant::LeftTop, Quadrant::RightTop),
            Edge::Right => (Quadrant::RightBottom, Quadrant::RightTop),
            Edge::Bottom => (Quadrant::LeftBottom, Quadrant::RightBottom),
        }
    }

    /// Whether this quadrant's `edge` lies on the parent cell's boundary.
    pub fn on_parent_boundary(self, edge: Edge) -> bool {
        matches!(
            (self, edge),
            (Quadrant::LeftBottom, Edge::Left | Edge::Bottom)
                | (Quadrant::LeftTop, Edge::Left | Edge::Top)
                | (Quadrant::RightBottom, Edge::Right | Edge::Bottom)
                | (Quadrant::RightTop, Edge::Right | Edge::Top)
        )
    }

    /// The quadrant across an internal edge.
    pub fn neighbor(self, edge: Edge) -> Option<Quadrant> {
        match (self, edge) {
            (Quadrant::LeftBottom, Edge::Top) => Some(Quadrant::LeftTop),
            (Quadrant::LeftBottom, Edge::Right) => Some(Quadrant::RightBottom),
            (Quadrant::LeftTop, Edge::Bottom) => Some(Quadrant::LeftBottom),
            (Quadrant::LeftTop, Edge::Right) => Some(Quadrant::RightTop),
            (Quadrant::RightBottom, Edge::Top) => Some(Quadrant::RightTop),
            (Quadrant::RightBottom, Edge::Left) => Some(Quadrant::LeftBottom),
            (Quadrant::RightTop, Edge::Bottom) => Some(Quadrant::RightBottom),
            (Quadrant::RightTop, Edge::Left) => Some(Quadrant::LeftTop),
            _ => None,
        }
    }
}

/// Values or positions at the four corners of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners<T> {
    pub left_top: T,
    pub right_top: T,
    pub right_bottom: T,
    pub left_bottom: T,
}

impl<T: Copy> Corners<T> {
    /// Edge endpoints in interpolation order.
    pub fn edge(&self, edge: Edge) -> (T, T) {
        match edge {
            Edge::Left => (self.left_bottom, self.left_top),
            Edge::Top => (self.left_top, self.right_top),
            Edge::Right => (self.right_bottom, self.right_top),
            Edge::Bottom => (self.left_bottom, self.right_bottom),
        }
    }

    /// Corners of one quadrant, given a midpoint function for the type.
    fn quadrant(&self, quadrant: Quadrant, mid: impl Fn(T, T) -> T) -> Corners<T> {
        let left = mid(self.left_bottom, self.left_top);
        let right = mid(self.right_bottom, self.right_top);
        let top = mid(self.left_top, self.right_top);
        let bottom = mid(self.left_bottom, self.right_bottom);
        let center = mid(left, right);

        match quadrant {
            Quadrant::LeftBottom => Corners {
                left_top: left,
                right_top: center,
                right_bottom: bottom,
                left_bottom: self.left_bottom,
            },
            Quadrant::LeftTop => Corners {
                left_top: self.left_top,
                right_top: top,
                right_bottom: center,
                left_bottom: left,
            },
            Quadrant::RightBottom => Corners {
                left_top: center,
                right_top: right,
                right_bottom: self.right_bottom,
                left_bottom: bottom,
            },
            Quadrant::RightTop => Corners {
                left_top: top,
                right_top: self.right_top,
                right_bottom: right,
                left_bottom: center,
            },
        }
    }
}

/// A grid quad: corner values plus corner positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub values: Corners<f64>,
    pub positions: Corners<Point>,
}

impl Cell {
    /// Read cell `(x, y)` from a field. The caller checks bounds.
    pub(crate) fn from_field(field: &ScalarField2D, x: usize, y: usize) -> Cell {
        Cell {
            values: Corners {
                left_top: field.value(x, y + 1),
                right_top: field.value(x + 1, y + 1),
                right_bottom: field.value(x + 1, y),
                left_bottom: field.value(x, y),
            },
            positions: Corners {
                left_top: field.position(x, y + 1),
                right_top: field.position(x + 1, y + 1),
                right_bottom: field.position(x + 1, y),
                left_bottom: field.position(x, y),
            },
        }
    }

    /// Classify corners against `value`.
    pub fn mask(&self, value: f64) -> CellBitmask {
        let v = &self.values;
        let mut mask = CellBitmask::NONE;
        if v.left_top > value {
            mask = mask.union(CellBitmask::LEFT_TOP);
        }
        if v.right_top > value {
            mask = mask.union(CellBitmask::RIGHT_TOP);
        }
        if v.right_bottom > value {
            mask = mask.union(CellBitmask::RIGHT_BOTTOM);
        }
        if v.left_bottom > value {
            mask = mask.union(CellBitmask::LEFT_BOTTOM);
        }
        mask
    }

    /// False when every corner is above, or every corner below, `value`.
    pub fn contains_value(&self, value: f64) -> bool {
        let v = &self.values;
        let corners = [v.left_top, v.right_top, v.right_bottom, v.left_bottom];
        !(corners.iter().all(|&c| c > value) || corners.iter().all(|&c| c < value))
    }

    /// Interpolated point where `value` crosses `edge`.
    pub fn crossing(&self, edge: Edge, value: f64) -> Point {
        let (a1, a2) = self.values.edge(edge);
        let (p1, p2) = self.positions.edge(edge);
        let ratio = (value - a1) / (a2 - a1);
        if !ratio.is_finite() {
            return p1.midpoint(p2);
        }
        debug_assert!((0.0..=1.0).contains(&ratio), "crossing ratio {} outside edge", ratio);
        p1.lerp(p2, ratio)
    }

    /// One quadrant with bilinearly interpolated corner values and positions.
    pub fn quadrant(&self, quadrant: Quadrant) -> Cell {
        Cell {
            values: self.values.quadrant(quadrant, |a, b| (a + b) * 0.5),
            positions: self.positions.quadrant(quadrant, Point::midpoint),
        }
    }

    /// The quadrant along `edge` whose half of the edge holds the crossing.
    pub fn entry_quadrant(&self, edge: Edge, value: f64) -> Quadrant {
        let (a1, a2) = self.values.edge(edge);
        let (first, second) = Quadrant::along(edge);
        if crosses(a1, (a1 + a2) * 0.5, value) {
            first
        } else {
            second
        }
    }
}
