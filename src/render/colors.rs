use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::tree::index_name::normalize_index_name;

/// Seed used when the caller does not pick one; keeps colors stable between runs.
pub const DEFAULT_SEED: u64 = 0x5eed_cafe;

#[derive(Debug, Clone, Copy)]
pub struct ColorSettings {
    pub seed: u64,
    /// HSL lightness of every index color (saturation is always full)
    pub lightness: f32,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            lightness: 0.75,
        }
    }
}

/// An sRGB color with components in 0..=1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for SVG fills.
    pub fn to_hex(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Source of hues in `0..1`, one per newly seen index family.
pub trait HueSource {
    fn next_hue(&mut self) -> f32;
}

/// Deterministic pseudo-random hues from a fixed seed.
pub struct SeededHues {
    rng: StdRng,
}

impl SeededHues {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl HueSource for SeededHues {
    fn next_hue(&mut self) -> f32 {
        self.rng.random_range(0.0..1.0)
    }
}

/// Hands out one color per normalized index name, the first time the name is seen.
pub struct ColorAssigner<H = SeededHues> {
    hues: H,
    lightness: f32,
    by_name: HashMap<String, Rgb>,
}

impl ColorAssigner<SeededHues> {
    pub fn seeded(settings: &ColorSettings) -> Self {
        Self::new(SeededHues::new(settings.seed), settings.lightness)
    }
}

impl<H: HueSource> ColorAssigner<H> {
    pub fn new(hues: H, lightness: f32) -> Self {
        Self {
            hues,
            lightness,
            by_name: HashMap::new(),
        }
    }

    /// Color for a shard of `index_name`; rotated generations of one index share it.
    pub fn color_for_index(&mut self, index_name: &str) -> Rgb {
        let key = normalize_index_name(index_name);
        if let Some(&color) = self.by_name.get(&key) {
            return color;
        }
        let color = hsl_to_rgb(self.hues.next_hue(), 1.0, self.lightness);
        tracing::debug!("Index family '{}' → {}", key, color.to_hex());
        self.by_name.insert(key, color);
        color
    }

    /// Number of distinct index families colored so far.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = (h * 6.0).rem_euclid(6.0);
    let x = c * (1.0 - (h6.rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h6.floor() as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    Rgb::new(r + m, g + m, b + m)
}
