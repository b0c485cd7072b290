use bevy::math::DVec3;
use std::collections::VecDeque;

/// Number of positions kept per body.
pub const TRAIL_CAPACITY: usize = 400;

/// Fixed-length position history, newest first.
///
/// The buffer is always full: it starts as `TRAIL_CAPACITY` copies of the
/// starting position and every push drops the oldest entry.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: VecDeque<DVec3>,
}

impl TrailBuffer {
    pub fn new(start: DVec3) -> Self {
        Self {
            points: std::iter::repeat_n(start, TRAIL_CAPACITY).collect(),
        }
    }

    pub fn push(&mut self, position: DVec3) {
        self.points.push_front(position);
        self.points.truncate(TRAIL_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn newest(&self) -> Option<DVec3> {
        self.points.front().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DVec3> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_full_of_start_position() {
        let start = DVec3::new(1.0, 2.0, 3.0);
        let trail = TrailBuffer::new(start);
        assert_eq!(trail.len(), TRAIL_CAPACITY);
        assert!(trail.iter().all(|p| *p == start));
    }

    #[test]
    fn keeps_last_pushes_most_recent_first() {
        let mut trail = TrailBuffer::new(DVec3::ZERO);
        for i in 0..500 {
            trail.push(DVec3::new(i as f64, 0.0, 0.0));
            assert_eq!(trail.len(), TRAIL_CAPACITY);
        }

        assert_eq!(trail.newest(), Some(DVec3::new(499.0, 0.0, 0.0)));
        let xs: Vec<f64> = trail.iter().map(|p| p.x).collect();
        let expected: Vec<f64> = (100..500).rev().map(|i| i as f64).collect();
        assert_eq!(xs, expected);
    }
}
