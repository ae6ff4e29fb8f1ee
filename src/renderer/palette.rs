//! Presentation side table: textures and tints keyed by brick index
//!
//! The simulation never stores colors. The palette follows the game through
//! its events and dims bricks as they are reduced to rubble.

use serde::Serialize;

use crate::sim::{BrickGrid, BrickKind, GameEvent};

/// RGBA, 0-1
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const GRAY: Color = [0.51, 0.51, 0.51, 1.0];
    pub const LIGHT_GRAY: Color = [0.78, 0.78, 0.78, 1.0];
    pub const GREEN: Color = [0.0, 0.89, 0.19, 1.0];
    pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
    /// Rubble tint
    pub const DIMMED: Color = GRAY;
}

/// Texture slots the renderer loads at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TextureId {
    Ground,
    StonePath,
    Door,
    Floor,
    Wall,
    Ball,
    Player,
}

impl TextureId {
    pub const ALL: [TextureId; 7] = [
        TextureId::Ground,
        TextureId::StonePath,
        TextureId::Door,
        TextureId::Floor,
        TextureId::Wall,
        TextureId::Ball,
        TextureId::Player,
    ];

    pub fn for_kind(kind: BrickKind) -> Self {
        match kind {
            BrickKind::Ground => TextureId::Ground,
            BrickKind::StonePath => TextureId::StonePath,
            BrickKind::Door => TextureId::Door,
            BrickKind::Floor => TextureId::Floor,
            BrickKind::Wall => TextureId::Wall,
        }
    }

    /// Asset file name
    pub fn file_name(&self) -> &'static str {
        match self {
            TextureId::Ground => "brground.png",
            TextureId::StonePath => "brstonepath.png",
            TextureId::Door => "brdoor.png",
            TextureId::Floor => "brfloor2.png",
            TextureId::Wall => "brwall.png",
            TextureId::Ball => "brball.png",
            TextureId::Player => "brdude.png",
        }
    }
}

/// How one brick is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BrickLook {
    pub texture: TextureId,
    pub color: Color,
}

/// Per-brick presentation state
#[derive(Debug, Clone)]
pub struct Palette {
    bricks: Vec<BrickLook>,
}

impl Palette {
    pub fn new(grid: &BrickGrid) -> Self {
        let bricks = grid
            .bricks
            .iter()
            .map(|brick| BrickLook {
                texture: TextureId::for_kind(brick.kind),
                color: colors::WHITE,
            })
            .collect();
        Self { bricks }
    }

    /// Follow one tick's worth of events
    pub fn apply(&mut self, events: &[GameEvent], grid: &BrickGrid) {
        for event in events {
            match *event {
                GameEvent::BrickCrumbled { index, .. } | GameEvent::BrickShattered { index } => {
                    if let Some(look) = self.bricks.get_mut(index) {
                        look.color = colors::DIMMED;
                    }
                }
                GameEvent::Restarted => *self = Self::new(grid),
                _ => {}
            }
        }
    }

    pub fn brick(&self, index: usize) -> Option<&BrickLook> {
        self.bricks.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Face, Level};

    #[test]
    fn test_textures_follow_kinds() {
        let grid = BrickGrid::from_level(&Level::dungeon());
        let palette = Palette::new(&grid);
        let wall = BrickGrid::index(0, 20);
        assert_eq!(palette.brick(wall).unwrap().texture, TextureId::Wall);
        assert_eq!(palette.brick(wall).unwrap().color, colors::WHITE);
        assert_eq!(palette.brick(BrickGrid::index(0, 0)).unwrap().texture, TextureId::Ground);
        assert!(palette.brick(grid.bricks.len()).is_none());
    }

    #[test]
    fn test_rubble_is_dimmed_until_restart() {
        let grid = BrickGrid::from_level(&Level::dungeon());
        let mut palette = Palette::new(&grid);

        palette.apply(
            &[
                GameEvent::BrickHit {
                    index: 1,
                    face: Face::Below,
                    hp: 2,
                },
                GameEvent::BrickCrumbled {
                    index: 2,
                    face: Face::Left,
                },
                GameEvent::BrickShattered { index: 3 },
            ],
            &grid,
        );
        assert_eq!(palette.brick(1).unwrap().color, colors::WHITE);
        assert_eq!(palette.brick(2).unwrap().color, colors::DIMMED);
        assert_eq!(palette.brick(3).unwrap().color, colors::DIMMED);

        palette.apply(&[GameEvent::Restarted], &grid);
        assert_eq!(palette.brick(2).unwrap().color, colors::WHITE);
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(TextureId::Floor.file_name(), "brfloor2.png");
        assert_eq!(TextureId::ALL.len(), 7);
    }
}
