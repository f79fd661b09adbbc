//! Probe ring: the sample points swept around a ball's rim
//!
//! A ball has no collision shape of its own. Instead a ring of points on its
//! circumference is tested against the terrain mask. Angles are evenly spaced
//! (one per integer degree by default) and each sample is truncated to a whole
//! pixel; samples landing on an already-listed pixel are dropped, so small
//! balls query far fewer than `sample_count` pixels.

use glam::{IVec2, Vec2};

use super::terrain::{TerrainCode, TerrainMask};
use crate::polar_to_cartesian;

/// Precomputed rim offsets for one radius
#[derive(Debug, Clone)]
pub struct ProbeRing {
    radius: f32,
    /// Sub-pixel offsets from the center, in angle order
    offsets: Vec<Vec2>,
}

impl ProbeRing {
    /// Build a ring of `sample_count` evenly spaced angles starting at 0°
    pub fn new(radius: f32, sample_count: u32) -> Self {
        let sample_count = sample_count.max(1);
        let step = std::f32::consts::TAU / sample_count as f32;
        let offsets = if radius > 0.0 {
            (0..sample_count)
                .map(|i| polar_to_cartesian(radius, i as f32 * step))
                .collect()
        } else {
            Vec::new()
        };
        Self { radius, offsets }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Number of angles swept (before pixel dedup)
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.offsets.len().max(1)
    }

    /// Rim pixels around `center`, deduplicated, in angle order.
    ///
    /// A ring with radius <= 0 degenerates to the center pixel alone.
    pub fn points(&self, center: Vec2) -> Vec<IVec2> {
        if self.offsets.is_empty() {
            return vec![to_pixel(center)];
        }
        let mut points: Vec<IVec2> = Vec::with_capacity(self.offsets.len());
        for offset in &self.offsets {
            let p = to_pixel(center + *offset);
            if !points.contains(&p) {
                points.push(p);
            }
        }
        points
    }

    /// Terrain under each rim pixel, paired with the pixel
    pub fn samples<M: TerrainMask + ?Sized>(
        &self,
        mask: &M,
        center: Vec2,
    ) -> Vec<(IVec2, TerrainCode)> {
        self.points(center)
            .into_iter()
            .map(|p| (p, mask.terrain_at(p.x, p.y)))
            .collect()
    }

    /// True if any rim pixel is a wall
    pub fn would_collide<M: TerrainMask + ?Sized>(&self, mask: &M, center: Vec2) -> bool {
        self.touches(mask, center, TerrainCode::Wall)
    }

    /// True if any rim pixel has the given code
    pub fn touches<M: TerrainMask + ?Sized>(
        &self,
        mask: &M,
        center: Vec2,
        code: TerrainCode,
    ) -> bool {
        self.points(center)
            .into_iter()
            .any(|p| mask.terrain_at(p.x, p.y) == code)
    }
}

/// Truncate toward zero, the way the mask addresses pixels
#[inline]
fn to_pixel(p: Vec2) -> IVec2 {
    IVec2::new(p.x as i32, p.y as i32)
}
