use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accumulated pixel translation applied to the world to simulate scrolling.
///
/// `x` grows when the avatar walks left and `y` grows when it walks up.
pub type CameraOffset = IVec2;

/// Errors from constructing grid geometry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("inverted rect: rows {row_start}..{row_end}, cols {col_start}..{col_end}")]
    Inverted {
        row_start: i32,
        col_start: i32,
        row_end: i32,
        col_end: i32,
    },
    #[error("grid lines start at 1, got {0}")]
    GridLine(i32),
}

/// A rectangular region of grid cells, end-exclusive on both axes.
///
/// Cells are 0-based: the cell at row `r`, column `c` is `r..r + 1` by
/// `c..c + 1`. Layouts may instead give 1-based grid lines under the keys
/// `rowStart`, `columnStart`, `rowEnd` and `columnEnd`; those are shifted
/// down by one when deserialized, so line `1` is cell `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridRectRepr")]
pub struct GridRect {
    pub row_start: i32,
    pub col_start: i32,
    pub row_end: i32,
    pub col_end: i32,
}

/// Accepted input shapes for a rect.
#[derive(Deserialize)]
#[serde(untagged)]
enum GridRectRepr {
    Cells {
        row_start: i32,
        col_start: i32,
        row_end: i32,
        col_end: i32,
    },
    #[serde(rename_all = "camelCase")]
    GridLines {
        row_start: i32,
        column_start: i32,
        row_end: i32,
        column_end: i32,
    },
}

fn line_to_cell(line: i32) -> Result<i32, GeometryError> {
    if line < 1 {
        return Err(GeometryError::GridLine(line));
    }
    Ok(line - 1)
}

impl TryFrom<GridRectRepr> for GridRect {
    type Error = GeometryError;

    fn try_from(repr: GridRectRepr) -> Result<Self, Self::Error> {
        match repr {
            GridRectRepr::Cells {
                row_start,
                col_start,
                row_end,
                col_end,
            } => GridRect::new(row_start, col_start, row_end, col_end),
            GridRectRepr::GridLines {
                row_start,
                column_start,
                row_end,
                column_end,
            } => GridRect::new(
                line_to_cell(row_start)?,
                line_to_cell(column_start)?,
                line_to_cell(row_end)?,
                line_to_cell(column_end)?,
            ),
        }
    }
}

impl GridRect {
    /// Build a rect, rejecting inverted spans.
    pub fn new(
        row_start: i32,
        col_start: i32,
        row_end: i32,
        col_end: i32,
    ) -> Result<Self, GeometryError> {
        if row_start > row_end || col_start > col_end {
            return Err(GeometryError::Inverted {
                row_start,
                col_start,
                row_end,
                col_end,
            });
        }
        Ok(Self {
            row_start,
            col_start,
            row_end,
            col_end,
        })
    }

    /// The single cell whose leading corner is `(row, col)`.
    ///
    /// The end saturates at `i32::MAX`, so a corner on the last
    /// representable row or column yields an empty span, not a unit cell.
    pub fn unit(row: i32, col: i32) -> Self {
        Self {
            row_start: row,
            col_start: col,
            row_end: row.saturating_add(1),
            col_end: col.saturating_add(1),
        }
    }

    /// The `(row_start, col_start)` pair identifying a unit cell.
    pub fn leading_corner(&self) -> (i32, i32) {
        (self.row_start, self.col_start)
    }

    pub fn rows(&self) -> i32 {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn cols(&self) -> i32 {
        self.col_end.saturating_sub(self.col_start)
    }

    /// True when the rect spans exactly one cell on both axes.
    pub fn is_unit(&self) -> bool {
        self.rows() == 1 && self.cols() == 1
    }

    /// Shift both corners by the same amount, preserving the span.
    /// `None` when a coordinate would leave the `i32` range.
    pub fn translated(&self, d_row: i32, d_col: i32) -> Option<Self> {
        Some(Self {
            row_start: self.row_start.checked_add(d_row)?,
            col_start: self.col_start.checked_add(d_col)?,
            row_end: self.row_end.checked_add(d_row)?,
            col_end: self.col_end.checked_add(d_col)?,
        })
    }
}

impl fmt::Display for GridRect {
    /// Half-open row range, then column range: `[3..4, 5..6]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..{}, {}..{}]",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}

/// Size of a grid area in cells.
///
/// A map of `rows` x `cols` holds the 0-based cells `0..rows` x `0..cols`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridExtent {
    pub rows: i32,
    pub cols: i32,
}

impl GridExtent {
    pub fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// True when every cell of `rect` lies inside `0..rows` x `0..cols`.
    pub fn contains(&self, rect: &GridRect) -> bool {
        rect.row_start >= 0
            && rect.col_start >= 0
            && rect.row_end <= self.rows
            && rect.col_end <= self.cols
    }
}

/// A map block. Collidable blocks become obstacles; the rest are decoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub position: GridRect,
    #[serde(default, alias = "collision")]
    pub collidable: bool,
    #[serde(default, alias = "className")]
    pub class_name: Option<String>,
}

impl Block {
    pub fn obstacle(row: i32, col: i32) -> Self {
        Self {
            position: GridRect::unit(row, col),
            collidable: true,
            class_name: None,
        }
    }

    pub fn decoration(row: i32, col: i32) -> Self {
        Self {
            position: GridRect::unit(row, col),
            collidable: false,
            class_name: None,
        }
    }
}

/// One of the four cardinal moves. Diagonals do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Key matching order. Earlier directions win on duplicate key codes.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(d_row, d_col)` for one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_rect_spans_one_cell() {
        let r = GridRect::unit(4, 5);
        assert_eq!(r.leading_corner(), (4, 5));
        assert_eq!((r.row_end, r.col_end), (5, 6));
        assert!(r.is_unit());
    }

    #[test]
    fn new_rejects_inverted_rect() {
        assert!(GridRect::new(3, 3, 2, 4).is_err());
        assert!(GridRect::new(3, 3, 4, 2).is_err());
        assert_eq!(GridRect::new(3, 3, 4, 4), Ok(GridRect::unit(3, 3)));
    }

    #[test]
    fn wide_rect_is_not_unit() {
        let r = GridRect::new(0, 0, 1, 2).unwrap();
        assert!(!r.is_unit());
        assert_eq!(r.cols(), 2);
    }

    #[test]
    fn translated_keeps_span() {
        let r = GridRect::unit(2, 2).translated(-3, 7).unwrap();
        assert_eq!(r, GridRect::unit(-1, 9));
        assert!(r.is_unit());
    }

    #[test]
    fn translation_past_i32_range_is_none() {
        let bottom = GridRect::new(i32::MAX - 1, 0, i32::MAX, 1).unwrap();
        assert!(bottom.is_unit());
        assert_eq!(bottom.translated(1, 0), None);
        assert_eq!(
            bottom.translated(-1, 0),
            Some(GridRect::unit(i32::MAX - 2, 0))
        );
        assert_eq!(GridRect::unit(0, i32::MIN).translated(0, -1), None);
    }

    #[test]
    fn extreme_spans_do_not_overflow() {
        let edge = GridRect::unit(i32::MAX, 0);
        assert_eq!(edge.rows(), 0);
        assert!(!edge.is_unit());
        let huge = GridRect::new(i32::MIN, 0, i32::MAX, 1).unwrap();
        assert_eq!(huge.rows(), i32::MAX);
    }

    #[test]
    fn extent_contains() {
        let map = GridExtent::new(10, 8);
        assert!(map.contains(&GridRect::unit(0, 0)));
        assert!(map.contains(&GridRect::unit(9, 7)));
        assert!(!map.contains(&GridRect::unit(10, 0)));
        assert!(!map.contains(&GridRect::unit(0, -1)));
        assert!(GridExtent::new(0, 3).is_empty());
    }

    #[test]
    fn direction_order_and_opposites() {
        assert_eq!(Direction::ALL[0], Direction::Up);
        assert_eq!(Direction::ALL[3], Direction::Right);
        for d in Direction::ALL {
            let (r, c) = d.delta();
            let (or, oc) = d.opposite().delta();
            assert_eq!((r + or, c + oc), (0, 0));
        }
    }

    #[test]
    fn grid_lines_shift_to_zero_based_cells() {
        let json = r#"{"rowStart":20,"columnStart":20,"rowEnd":21,"columnEnd":21}"#;
        let r: GridRect = serde_json::from_str(json).unwrap();
        assert_eq!(r, GridRect::unit(19, 19));

        let first = r#"{"rowStart":1,"columnStart":1,"rowEnd":2,"columnEnd":2}"#;
        let r: GridRect = serde_json::from_str(first).unwrap();
        assert_eq!(r, GridRect::unit(0, 0));
    }

    #[test]
    fn grid_line_zero_is_rejected() {
        let json = r#"{"rowStart":0,"columnStart":1,"rowEnd":1,"columnEnd":2}"#;
        assert!(serde_json::from_str::<GridRect>(json).is_err());
    }

    #[test]
    fn cell_keys_are_taken_as_is() {
        let json = r#"{"row_start":0,"col_start":4,"row_end":1,"col_end":5}"#;
        let r: GridRect = serde_json::from_str(json).unwrap();
        assert_eq!(r, GridRect::unit(0, 4));
        assert_eq!(serde_json::to_string(&r).unwrap(), json);
    }

    #[test]
    fn inverted_rect_fails_to_deserialize() {
        let json = r#"{"row_start":3,"col_start":0,"row_end":2,"col_end":1}"#;
        assert!(serde_json::from_str::<GridRect>(json).is_err());
    }

    #[test]
    fn display_shows_half_open_ranges() {
        assert_eq!(GridRect::unit(3, 5).to_string(), "[3..4, 5..6]");
    }

    #[test]
    fn block_accepts_original_keys() {
        let json = r#"{
            "className": "block-a",
            "collision": true,
            "position": {"rowStart": 1, "columnStart": 2, "rowEnd": 2, "columnEnd": 3}
        }"#;
        let b: Block = serde_json::from_str(json).unwrap();
        assert!(b.collidable);
        assert_eq!(b.class_name.as_deref(), Some("block-a"));
        assert_eq!(b.position, GridRect::unit(0, 1));
    }

    #[test]
    fn block_defaults_to_decoration() {
        let json = r#"{"position": {"row_start": 0, "col_start": 0, "row_end": 1, "col_end": 1}}"#;
        let b: Block = serde_json::from_str(json).unwrap();
        assert_eq!(b, Block::decoration(0, 0));
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
    }
}
