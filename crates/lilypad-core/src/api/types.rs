use glam::Vec2;

/// Identifies an obstacle by its index in the level's storage.
/// The obstacle set is fixed at setup, so ids stay stable for the
/// whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObstacleId(pub u32);

/// Axis-aligned box in world space. Top-left anchored, y grows down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap. Boxes that merely share an edge do not count,
    /// which keeps this consistent with the pixel test on the integer
    /// grid.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_strict() {
        let a = Aabb::new(Vec2::ZERO, Vec2::splat(10.0));
        let touching = Aabb::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let crossing = Aabb::new(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        let apart = Aabb::new(Vec2::new(20.0, 20.0), Vec2::splat(4.0));

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&crossing));
        assert!(!a.overlaps(&apart));
    }

    #[test]
    fn edges_follow_y_down() {
        let b = Aabb::new(Vec2::new(5.0, 7.0), Vec2::new(3.0, 2.0));
        assert_eq!(b.left(), 5.0);
        assert_eq!(b.right(), 8.0);
        assert_eq!(b.top(), 7.0);
        assert_eq!(b.bottom(), 9.0);
    }
}
