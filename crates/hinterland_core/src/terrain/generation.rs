use super::{Cell, TerrainGrid};
use crate::error::{Result, WorldError};
use hinterland_data::pack;
use rayon::prelude::*;

/// Fraction of the normalised height range that lies under water.
const WATER_LEVEL: f32 = 0.3;
/// Fraction of the water level below which water is deep.
const DEEP_WATER: f32 = 0.7;

/// Land bands over normalised land height, lowest first.
const LAND_BANDS: [(f32, Cell); 4] = [
    (0.1, Cell::Sand),
    (0.3, Cell::Grass),
    (0.55, Cell::Hill),
    (0.7, Cell::Mountain),
];

const OCTAVES: u32 = 6;
/// Amplitude kept from one octave to the next.
const PERSISTENCE: f32 = 0.4;
/// Lattice cells per map cell at the coarsest octave.
const BASE_FREQUENCY: f32 = 0.03;

impl TerrainGrid {
    /// Builds terrain from a seeded height field.
    ///
    /// Same `(width, height, seed)` always gives the same map. Heights are
    /// stretched to fill `[0, 1]` before banding, so every map has both its
    /// deepest water and its highest peaks.
    pub fn generate(width: i32, height: i32, seed: u64) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let w = width as usize;
        let mut heights = vec![0.0_f32; w * height as usize];
        heights.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
            for (x, h) in row.iter_mut().enumerate() {
                *h = fractal_height(x as f32, y as f32, seed);
            }
        });

        let (min, max) = heights
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &h| (lo.min(h), hi.max(h)));
        let span = (max - min).max(f32::EPSILON);

        let cells = heights
            .par_iter()
            .map(|&h| classify((h - min) / span))
            .collect();

        let grid = Self::from_cells(width, height, cells);
        tracing::info!(width, height, seed, "Generated terrain");
        Ok(grid)
    }
}

/// Sum of [`OCTAVES`] lattice-noise layers, each at twice the frequency and
/// [`PERSISTENCE`] times the amplitude of the one before. In `[0, 1]`.
fn fractal_height(x: f32, y: f32, seed: u64) -> f32 {
    let mut total = 0.0;
    let mut norm = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = BASE_FREQUENCY;
    for octave in 0..OCTAVES {
        let layer_seed = splitmix64(seed ^ u64::from(octave).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        total += lattice_noise(x * frequency, y * frequency, layer_seed) * amplitude;
        norm += amplitude;
        amplitude *= PERSISTENCE;
        frequency *= 2.0;
    }
    0.5 * (1.0 + total / norm)
}

/// Quintic-eased interpolation between random corner values. In `[-1, 1]`.
fn lattice_noise(x: f32, y: f32, seed: u64) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    let (ix, iy) = (x0 as i32, y0 as i32);
    let tx = fade(x - x0);
    let ty = fade(y - y0);
    let top = lerp(corner(ix, iy, seed), corner(ix + 1, iy, seed), tx);
    let bottom = lerp(corner(ix, iy + 1, seed), corner(ix + 1, iy + 1, seed), tx);
    lerp(top, bottom, ty)
}

fn corner(ix: i32, iy: i32, seed: u64) -> f32 {
    let bits = splitmix64(seed ^ splitmix64(pack(ix, iy) as u64));
    // Top 24 bits fit an f32 mantissa exactly.
    (bits >> 40) as f32 / (1u64 << 23) as f32 - 1.0
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Terrain type for a normalised height in `[0, 1]`.
pub(crate) fn classify(h: f32) -> Cell {
    if h < WATER_LEVEL {
        return if h < WATER_LEVEL * DEEP_WATER {
            Cell::DeepWater
        } else {
            Cell::Water
        };
    }
    let land = (h - WATER_LEVEL) / (1.0 - WATER_LEVEL);
    LAND_BANDS
        .iter()
        .find(|(limit, _)| land < *limit)
        .map_or(Cell::HighMountain, |&(_, cell)| cell)
}
