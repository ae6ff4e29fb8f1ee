//! Collision detection for the ball against screen edges, the paddle and bricks
//!
//! Brick hits are decided by an ordered rule table. The first face whose
//! predicate matches wins, so a ball straddling a corner resolves as
//! below, above, left, right in that order.

use glam::Vec2;

use super::state::{Ball, Brick, Face};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Result of checking the ball against the screen edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeContact {
    /// Touching the left or right edge
    pub side: bool,
    /// Touching the top edge
    pub top: bool,
    /// Touching the bottom edge
    pub bottom: bool,
}

/// Check which screen edges the ball touches (inclusive)
pub fn ball_edge_contact(pos: Vec2, radius: f32) -> EdgeContact {
    EdgeContact {
        side: pos.x + radius >= SCREEN_WIDTH || pos.x - radius <= 0.0,
        top: pos.y - radius <= 0.0,
        bottom: pos.y + radius >= SCREEN_HEIGHT,
    }
}

/// Circle vs axis-aligned rectangle overlap, edges inclusive
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect_center: Vec2, half_size: Vec2) -> bool {
    let closest = center.clamp(rect_center - half_size, rect_center + half_size);
    center.distance_squared(closest) <= radius * radius
}

/// Horizontal velocity after bouncing off the paddle
///
/// Offset from the paddle center, normalized by the half width and scaled by
/// `deflection`: the center sends the ball straight up, the edges give
/// +/- `deflection`.
#[inline]
pub fn paddle_deflection(ball_x: f32, paddle_x: f32, paddle_width: f32, deflection: f32) -> f32 {
    (ball_x - paddle_x) / (paddle_width / 2.0) * deflection
}

/// Ball and brick geometry seen by a face rule
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub radius: f32,
    pub brick_pos: Vec2,
    pub cell: Vec2,
}

impl Probe {
    pub fn new(ball: &Ball, brick: &Brick, cell: Vec2) -> Self {
        Self {
            ball_pos: ball.pos,
            ball_vel: ball.vel,
            radius: ball.radius,
            brick_pos: brick.pos,
            cell,
        }
    }

    /// Perpendicular slack: half a cell plus two thirds of the radius,
    /// truncated to whole pixels
    fn slack(&self, half_cell: f32) -> f32 {
        half_cell + (self.radius * 2.0 / 3.0).trunc()
    }

    fn within_columns(&self) -> bool {
        (self.ball_pos.x - self.brick_pos.x).abs() < self.slack(self.cell.x / 2.0)
    }

    fn within_rows(&self) -> bool {
        (self.ball_pos.y - self.brick_pos.y).abs() < self.slack(self.cell.y / 2.0)
    }
}

/// A face predicate paired with the face it detects
pub struct FaceRule {
    pub face: Face,
    pub test: fn(&Probe) -> bool,
}

/// Ball top crossed the brick's lower edge this frame, moving up
fn hits_below(p: &Probe) -> bool {
    let top = p.ball_pos.y - p.radius;
    let edge = p.brick_pos.y - p.cell.y / 8.0;
    top <= edge && top - p.ball_vel.y > edge && p.within_columns() && p.ball_vel.y < 0.0
}

/// Ball bottom crossed the brick's upper edge this frame, moving down
fn hits_above(p: &Probe) -> bool {
    let bottom = p.ball_pos.y + p.radius;
    let edge = p.brick_pos.y - p.cell.y;
    bottom >= edge && bottom - p.ball_vel.y < edge && p.within_columns() && p.ball_vel.y > 0.0
}

/// Ball right side crossed the brick's left edge this frame, moving right
fn hits_left(p: &Probe) -> bool {
    let right = p.ball_pos.x + p.radius;
    let edge = p.brick_pos.x - p.cell.x / 2.0;
    right >= edge && right - p.ball_vel.x < edge && p.within_rows() && p.ball_vel.x > 0.0
}

/// Ball left side crossed the brick's right edge this frame, moving left
fn hits_right(p: &Probe) -> bool {
    let left = p.ball_pos.x - p.radius;
    let edge = p.brick_pos.x + p.cell.x / 2.0;
    left <= edge && left - p.ball_vel.x > edge && p.within_rows() && p.ball_vel.x < 0.0
}

/// Face rules in priority order
pub const FACE_RULES: [FaceRule; 4] = [
    FaceRule {
        face: Face::Below,
        test: hits_below,
    },
    FaceRule {
        face: Face::Above,
        test: hits_above,
    },
    FaceRule {
        face: Face::Left,
        test: hits_left,
    },
    FaceRule {
        face: Face::Right,
        test: hits_right,
    },
];

/// First face the ball struck this frame, if any
pub fn detect_face(probe: &Probe) -> Option<Face> {
    FACE_RULES
        .iter()
        .find(|rule| (rule.test)(probe))
        .map(|rule| rule.face)
}

/// Per-axis reveal check against the brick position shifted back one cell
///
/// Not a circular distance: each axis is compared to the full radius.
pub fn within_reveal(ball_pos: Vec2, reveal_radius: f32, brick_pos: Vec2, cell: Vec2) -> bool {
    (ball_pos.y - brick_pos.y + cell.y).abs() <= reveal_radius
        && (ball_pos.x - brick_pos.x + cell.x).abs() <= reveal_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: Vec2 = Vec2::new(60.0, 60.0);

    fn probe(ball_pos: Vec2, ball_vel: Vec2, brick_pos: Vec2) -> Probe {
        Probe {
            ball_pos,
            ball_vel,
            radius: 16.0,
            brick_pos,
            cell: CELL,
        }
    }

    #[test]
    fn test_edge_contact() {
        assert_eq!(ball_edge_contact(Vec2::new(500.0, 500.0), 16.0), EdgeContact::default());
        assert!(ball_edge_contact(Vec2::new(16.0, 500.0), 16.0).side);
        assert!(ball_edge_contact(Vec2::new(1904.0, 500.0), 16.0).side);
        assert!(ball_edge_contact(Vec2::new(500.0, 16.0), 16.0).top);
        assert!(ball_edge_contact(Vec2::new(500.0, 1064.0), 16.0).bottom);
        assert!(!ball_edge_contact(Vec2::new(500.0, 1063.0), 16.0).bottom);
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Vec2::new(100.0, 100.0);
        let half = Vec2::new(50.0, 10.0);
        // Straight above, touching
        assert!(circle_rect_overlap(Vec2::new(100.0, 74.0), 16.0, rect, half));
        assert!(!circle_rect_overlap(Vec2::new(100.0, 73.0), 16.0, rect, half));
        // Near corner but outside the rounded region
        assert!(!circle_rect_overlap(Vec2::new(163.0, 77.0), 16.0, rect, half));
        // Inside
        assert!(circle_rect_overlap(rect, 16.0, rect, half));
    }

    #[test]
    fn test_paddle_deflection() {
        assert_eq!(paddle_deflection(960.0, 960.0, 192.0, 5.0), 0.0);
        assert_eq!(paddle_deflection(1056.0, 960.0, 192.0, 5.0), 5.0);
        assert_eq!(paddle_deflection(864.0, 960.0, 192.0, 5.0), -5.0);
        assert_eq!(paddle_deflection(1008.0, 960.0, 192.0, 5.0), 2.5);
    }

    #[test]
    fn test_hit_from_below() {
        let brick = Vec2::new(300.0, 290.0);
        // Lower edge at 282.5; top was 284.5, now 279.5
        let p = probe(Vec2::new(300.0, 295.5), Vec2::new(0.0, -5.0), brick);
        assert_eq!(detect_face(&p), Some(Face::Below));

        // Moving away: no hit
        let p = probe(Vec2::new(300.0, 295.5), Vec2::new(0.0, 5.0), brick);
        assert_eq!(detect_face(&p), None);

        // Too far sideways
        let p = probe(Vec2::new(300.0 + 41.0, 295.5), Vec2::new(0.0, -5.0), brick);
        assert_eq!(detect_face(&p), None);
    }

    #[test]
    fn test_column_band_edge() {
        // Radius 16 gives 30 + 10 = 40 pixels either side, exclusive
        let brick = Vec2::new(300.0, 290.0);
        let p = probe(Vec2::new(339.5, 295.5), Vec2::new(0.0, -5.0), brick);
        assert_eq!(detect_face(&p), Some(Face::Below));
        let p = probe(Vec2::new(340.0, 295.5), Vec2::new(0.0, -5.0), brick);
        assert_eq!(detect_face(&p), None);
        let p = probe(Vec2::new(259.5, 295.5), Vec2::new(0.0, -5.0), brick);
        assert_eq!(detect_face(&p), None);
    }

    #[test]
    fn test_hit_from_above() {
        let brick = Vec2::new(300.0, 290.0);
        // Upper edge at 230; bottom was 228, now 233
        let p = probe(Vec2::new(300.0, 217.0), Vec2::new(0.0, 5.0), brick);
        assert_eq!(detect_face(&p), Some(Face::Above));
    }

    #[test]
    fn test_hit_from_left() {
        let brick = Vec2::new(300.0, 290.0);
        // Left edge at 270; right side was 268, now 271
        let p = probe(Vec2::new(255.0, 290.0), Vec2::new(3.0, 0.0), brick);
        assert_eq!(detect_face(&p), Some(Face::Left));
    }

    #[test]
    fn test_hit_from_right() {
        let brick = Vec2::new(300.0, 290.0);
        // Right edge at 330; left side was 332, now 329
        let p = probe(Vec2::new(345.0, 290.0), Vec2::new(-3.0, 0.0), brick);
        assert_eq!(detect_face(&p), Some(Face::Right));
    }

    #[test]
    fn test_below_wins_over_left() {
        // Crosses both the lower edge (moving up) and the left edge (moving right)
        let brick = Vec2::new(300.0, 290.0);
        let p = probe(Vec2::new(261.0, 295.5), Vec2::new(8.0, -5.0), brick);
        assert!(hits_below(&p));
        assert!(hits_left(&p));
        assert_eq!(detect_face(&p), Some(Face::Below));
    }

    #[test]
    fn test_reveal_is_per_axis() {
        let brick = Vec2::new(300.0, 290.0);
        // Shifted target is (240, 230)
        assert!(within_reveal(Vec2::new(240.0, 230.0), 192.0, brick, CELL));
        // Corner at full radius on both axes: farther than 192 in Euclidean terms
        assert!(within_reveal(Vec2::new(432.0, 422.0), 192.0, brick, CELL));
        assert!(!within_reveal(Vec2::new(433.0, 230.0), 192.0, brick, CELL));
        assert!(!within_reveal(Vec2::new(240.0, 423.0), 192.0, brick, CELL));
    }
}
