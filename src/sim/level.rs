//! Level layout: the static dungeon map and brick variants
//!
//! A level is a BRICK_ROWS x BRICK_COLS grid of small integer codes. Each code
//! maps to a [`BrickKind`] which decides hit points, collidability and initial
//! visibility of the brick built from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{BRICK_COLS, BRICK_ROWS};

/// Brick variants, keyed by layout code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    /// Open ground (code 0)
    #[default]
    Ground,
    /// Door (code 1, 1 HP)
    Door,
    /// Room floor (code 2, 2 HP)
    Floor,
    /// Brick wall (code 3, 3 HP)
    Wall,
    /// Stone path (code 4)
    StonePath,
}

impl BrickKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BrickKind::Ground),
            1 => Some(BrickKind::Door),
            2 => Some(BrickKind::Floor),
            3 => Some(BrickKind::Wall),
            4 => Some(BrickKind::StonePath),
            _ => None,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            BrickKind::Ground => 0,
            BrickKind::Door => 1,
            BrickKind::Floor => 2,
            BrickKind::Wall => 3,
            BrickKind::StonePath => 4,
        }
    }

    /// Terrain never interacts with the ball and is always shown
    pub fn is_terrain(&self) -> bool {
        matches!(self, BrickKind::Ground | BrickKind::StonePath)
    }

    /// Starting hit points (0 for terrain)
    pub fn hit_points(&self) -> u8 {
        match self {
            BrickKind::Door => 1,
            BrickKind::Floor => 2,
            BrickKind::Wall => 3,
            BrickKind::Ground | BrickKind::StonePath => 0,
        }
    }
}

/// Errors building a level from raw codes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level has {found} rows, expected {expected}")]
    RowCount { found: usize, expected: usize },
    #[error("row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown brick code {code} at row {row}, column {col}")]
    UnknownCode { row: usize, col: usize, code: u8 },
    #[error("level has {found} cells, expected {expected}")]
    CellCount { found: usize, expected: usize },
}

/// A validated brick layout, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LevelData")]
pub struct Level {
    kinds: Vec<BrickKind>,
}

/// Unchecked serialized form of a [`Level`]
#[derive(Deserialize)]
struct LevelData {
    kinds: Vec<BrickKind>,
}

impl TryFrom<LevelData> for Level {
    type Error = LevelError;

    fn try_from(data: LevelData) -> Result<Self, Self::Error> {
        let expected = BRICK_ROWS * BRICK_COLS;
        if data.kinds.len() != expected {
            return Err(LevelError::CellCount {
                found: data.kinds.len(),
                expected,
            });
        }
        Ok(Self { kinds: data.kinds })
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::dungeon()
    }
}

impl Level {
    /// The built-in dungeon map
    pub fn dungeon() -> Self {
        let kinds = DUNGEON
            .iter()
            .flatten()
            .map(|&code| BrickKind::from_code(code).unwrap_or_default())
            .collect();
        Self { kinds }
    }

    /// Build a level from rows of layout codes
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, LevelError> {
        if rows.len() != BRICK_ROWS {
            return Err(LevelError::RowCount {
                found: rows.len(),
                expected: BRICK_ROWS,
            });
        }

        let mut kinds = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != BRICK_COLS {
                return Err(LevelError::ColumnCount {
                    row,
                    found: codes.len(),
                    expected: BRICK_COLS,
                });
            }
            for (col, &code) in codes.iter().enumerate() {
                let kind =
                    BrickKind::from_code(code).ok_or(LevelError::UnknownCode { row, col, code })?;
                kinds.push(kind);
            }
        }

        Ok(Self { kinds })
    }

    /// A level filled with a single kind
    pub fn filled(kind: BrickKind) -> Self {
        Self {
            kinds: vec![kind; BRICK_ROWS * BRICK_COLS],
        }
    }

    /// Replace the kind at (row, col)
    pub fn with_kind(mut self, row: usize, col: usize, kind: BrickKind) -> Self {
        if row < BRICK_ROWS && col < BRICK_COLS {
            self.kinds[row * BRICK_COLS + col] = kind;
        }
        self
    }

    pub fn kind_at(&self, row: usize, col: usize) -> Option<BrickKind> {
        if row >= BRICK_ROWS || col >= BRICK_COLS {
            return None;
        }
        self.kinds.get(row * BRICK_COLS + col).copied()
    }

    /// Iterate (row, col, kind) in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, BrickKind)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| (i / BRICK_COLS, i % BRICK_COLS, kind))
    }
}

/// The dungeon map. Rows 13 and below hold only terrain.
#[rustfmt::skip]
pub static DUNGEON: [[u8; BRICK_COLS]; BRICK_ROWS] = [
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,3,3,3,3,3,3,3,0,0,0,0,0],
    [0,3,3,3,3,3,3,3,0,0,0,0,3,3,3,3,3,0,0,0,3,2,2,2,2,2,3,0,0,0,0,0],
    [0,3,2,2,2,2,2,1,4,4,0,0,3,2,2,2,3,0,4,4,1,2,2,2,2,2,3,0,0,0,0,0],
    [0,3,2,2,2,2,2,3,0,4,4,4,1,2,2,2,1,4,4,0,3,2,2,2,2,2,3,0,0,0,0,0],
    [0,3,2,2,2,2,2,3,0,4,0,0,3,1,3,3,3,0,0,0,3,3,3,3,1,3,3,0,0,0,0,0],
    [0,3,2,2,2,2,2,1,4,4,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0],
    [0,3,2,2,2,2,2,3,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,4,0,0,0,0,0,0,0],
    [0,3,2,2,2,2,2,3,0,0,0,0,0,3,3,1,3,3,0,3,3,3,3,1,3,3,3,3,3,3,0,0],
    [0,3,3,3,3,3,3,3,0,0,0,0,0,3,2,2,2,3,0,3,2,2,2,2,2,2,2,2,2,3,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,3,2,2,2,3,0,3,2,2,2,2,2,2,2,2,2,3,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,3,2,2,2,3,0,3,2,2,2,2,2,2,2,2,2,3,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,3,3,1,3,3,0,3,3,3,3,3,3,3,3,1,3,3,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,4,0,0,0,0,0,0,0,4,4,4,4,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0,4,0,0,0,0,0,0,0],
];
