//! Bird vs pipe collision
//!
//! The bird is tested as an axis-aligned box shrunk by `HITBOX_MARGIN` on
//! every side, which lets near-misses through.

use super::body::Bird;
use super::pipe::Pipe;
use crate::consts::HITBOX_MARGIN;

/// True when the bird overlaps the pipe column and is outside the gap
pub fn collides(bird: &Bird, pipe: &Pipe) -> bool {
    let r = bird.radius;
    let x = bird.pos.x;
    let y = bird.pos.y;

    let overlaps_column =
        x + r - HITBOX_MARGIN > pipe.x && x - r + HITBOX_MARGIN < pipe.x + pipe.width;
    if !overlaps_column {
        return false;
    }

    y - r + HITBOX_MARGIN < pipe.top_height || y + r - HITBOX_MARGIN > pipe.bottom_y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn bird_at(y: f32) -> Bird {
        let mut bird = Bird::new(600.0);
        bird.pos.y = y;
        bird
    }

    #[test]
    fn test_inside_gap_is_safe() {
        let pipe = Pipe::with_gap(BIRD_X - 10.0, 200.0);
        assert!(!collides(&bird_at(270.0), &pipe));
    }

    #[test]
    fn test_hits_top_pipe() {
        let pipe = Pipe::with_gap(BIRD_X - 10.0, 200.0);
        assert!(collides(&bird_at(205.0), &pipe));
    }

    #[test]
    fn test_hits_bottom_pipe() {
        let pipe = Pipe::with_gap(BIRD_X - 10.0, 200.0);
        assert!(collides(&bird_at(335.0), &pipe));
    }

    #[test]
    fn test_margin_forgives_grazes() {
        let pipe = Pipe::with_gap(BIRD_X - 10.0, 200.0);
        // Top of the bird circle 1 unit into the top pipe: forgiven
        assert!(!collides(&bird_at(211.0), &pipe));
        // Exactly at the margin boundary: still forgiven (strict inequality)
        assert!(!collides(&bird_at(210.0), &pipe));
        assert!(collides(&bird_at(209.9), &pipe));
        // Bottom edge: 340 - 12 + 2 = 330 is the last safe centre
        assert!(!collides(&bird_at(330.0), &pipe));
        assert!(collides(&bird_at(330.1), &pipe));
    }

    #[test]
    fn test_no_horizontal_overlap() {
        // Pipe starts where the shrunk hitbox ends
        let pipe = Pipe::with_gap(BIRD_X + BIRD_RADIUS - HITBOX_MARGIN, 500.0);
        assert!(!collides(&bird_at(100.0), &pipe));

        // Pipe trailing edge exactly at the shrunk left edge
        let pipe = Pipe::with_gap(BIRD_X - BIRD_RADIUS + HITBOX_MARGIN - PIPE_WIDTH, 500.0);
        assert!(!collides(&bird_at(100.0), &pipe));
    }

    #[test]
    fn test_leading_edge_overlap() {
        let pipe = Pipe::with_gap(BIRD_X + BIRD_RADIUS - HITBOX_MARGIN - 0.5, 500.0);
        assert!(collides(&bird_at(100.0), &pipe));
    }
}
