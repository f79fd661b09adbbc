//! Surface normal estimation from probe contacts
//!
//! Every rim sample that lands on a wall pulls the normal away from itself:
//! the normal is the normalized sum of (center - sample) over solid samples.
//! When nothing is solid, or the pulls cancel out, the normal falls back to
//! straight up so callers always get a usable direction.

use glam::Vec2;

use super::probe::ProbeRing;
use super::terrain::TerrainMask;

/// Normal used when contacts give no direction (screen up)
pub const FALLBACK_NORMAL: Vec2 = Vec2::new(0.0, -1.0);

/// Wall contact summary around a ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    /// Whether any rim sample was solid
    pub hit: bool,
    /// Outward unit normal (or [`FALLBACK_NORMAL`])
    pub normal: Vec2,
    /// Solid rim samples counted
    pub samples: usize,
}

impl SurfaceContact {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: FALLBACK_NORMAL,
            samples: 0,
        }
    }

    /// True if the normal came from the fallback rather than the contacts
    pub fn is_fallback(&self) -> bool {
        !self.hit || self.normal == FALLBACK_NORMAL
    }
}

/// Sum and normalize outward pulls; degenerate sums yield the fallback
pub fn normal_from_offsets<I>(solid_offsets: I) -> Vec2
where
    I: IntoIterator<Item = Vec2>,
{
    let sum: Vec2 = solid_offsets.into_iter().map(|offset| -offset).sum();
    sum.try_normalize().unwrap_or(FALLBACK_NORMAL)
}

/// Estimate the wall normal around `center` from its probe ring
pub fn estimate_surface<M: TerrainMask + ?Sized>(
    ring: &ProbeRing,
    mask: &M,
    center: Vec2,
) -> SurfaceContact {
    let solid: Vec<Vec2> = ring
        .samples(mask, center)
        .into_iter()
        .filter(|(_, code)| code.is_solid())
        // Measure from the pixel's middle, not its corner
        .map(|(p, _)| p.as_vec2() + Vec2::splat(0.5) - center)
        .collect();

    if solid.is_empty() {
        return SurfaceContact::miss();
    }

    SurfaceContact {
        hit: true,
        samples: solid.len(),
        normal: normal_from_offsets(solid),
    }
}

/// Shorthand for just the normal
#[inline]
pub fn estimate_normal<M: TerrainMask + ?Sized>(ring: &ProbeRing, mask: &M, center: Vec2) -> Vec2 {
    estimate_surface(ring, mask, center).normal
}
