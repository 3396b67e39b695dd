//! Axis-aligned boxes and landing resolution
//!
//! Everything on screen is a rectangle, so collision is a plain AABB
//! overlap test plus a one-directional response: a descending player snaps
//! onto the first platform it overlaps. Ascending players pass through from
//! below, which is what makes the platforms jumpable at all.

use glam::Vec2;

use super::state::{Platform, Player};

/// An axis-aligned bounding box, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Move the box so its bottom edge sits at `y`
    #[inline]
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y;
    }

    /// Strict overlap test; boxes that merely touch edges do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Find the first platform (in active-set order) overlapping `rect`
///
/// Active-set order is spawn order, not nearest-first.
pub fn first_overlap<'a>(rect: &Aabb, platforms: &'a [Platform]) -> Option<&'a Platform> {
    platforms.iter().find(|p| rect.overlaps(&p.rect))
}

/// Resolve the player against the active platform set
///
/// Only a descending player is resolved: its bottom edge snaps to the top
/// of the first overlapping platform and the fall state is cleared. An
/// ascending player is left alone.
pub fn resolve_landing(player: &mut Player, platforms: &[Platform]) {
    let Some(hit_top) = first_overlap(&player.rect, platforms).map(|p| p.rect.top()) else {
        return;
    };
    if player.vel_y > 0.0 {
        player.rect.set_bottom(hit_top);
        player.vel_y = 0.0;
        player.airborne = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(x: f32, y: f32, w: f32) -> Platform {
        Platform::new(x, y, w, 20.0)
    }

    fn player_at(x: f32, y: f32) -> Player {
        let mut player = Player::new(960.0, 540.0, 50.0);
        player.rect.pos = Vec2::new(x, y);
        player
    }

    #[test]
    fn test_overlap_basics() {
        let a = Aabb::new(0.0, 0.0, 50.0, 50.0);
        let b = Aabb::new(25.0, 25.0, 50.0, 50.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Disjoint
        let c = Aabb::new(100.0, 0.0, 50.0, 50.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 50.0, 50.0);
        let b = Aabb::new(50.0, 0.0, 50.0, 50.0);
        assert!(!a.overlaps(&b));

        // Resting exactly on top counts as separated, so a landed player
        // does not re-collide until gravity pulls it down a pixel
        let below = Aabb::new(0.0, 50.0, 200.0, 20.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_descending_player_lands() {
        let platforms = vec![platform(900.0, 600.0, 200.0)];
        let mut player = player_at(950.0, 560.0); // bottom at 610, inside platform
        player.vel_y = 8.0;
        player.airborne = true;

        resolve_landing(&mut player, &platforms);
        assert_eq!(player.rect.bottom(), 600.0);
        assert_eq!(player.vel_y, 0.0);
        assert!(!player.airborne);
    }

    #[test]
    fn test_ascending_player_passes_through() {
        let platforms = vec![platform(900.0, 600.0, 200.0)];
        let mut player = player_at(950.0, 560.0);
        player.vel_y = -10.0;
        player.airborne = true;

        resolve_landing(&mut player, &platforms);
        // Untouched: still rising through the platform
        assert_eq!(player.rect.pos.y, 560.0);
        assert_eq!(player.vel_y, -10.0);
        assert!(player.airborne);
    }

    #[test]
    fn test_first_platform_in_set_order_wins() {
        // Two overlapping platforms; the one earlier in the set resolves
        // even though the second is nearer to the player's feet
        let platforms = vec![platform(900.0, 600.0, 200.0), platform(900.0, 625.0, 200.0)];
        let mut player = player_at(950.0, 580.0); // bottom 630, overlaps both
        player.vel_y = 5.0;

        resolve_landing(&mut player, &platforms);
        assert_eq!(player.rect.bottom(), 600.0);
    }

    #[test]
    fn test_no_overlap_no_change() {
        let platforms = vec![platform(0.0, 600.0, 100.0)];
        let mut player = player_at(950.0, 560.0);
        player.vel_y = 3.0;

        resolve_landing(&mut player, &platforms);
        assert_eq!(player.vel_y, 3.0);
        assert_eq!(player.rect.pos.y, 560.0);
    }
}
