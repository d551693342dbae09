//! Deterministic band colors sampled around the HSLuv hue circle.

use ::palette::white_point::D65;
use ::palette::{FromColor, Hsluv, Srgb};
use std::collections::HashMap;

const HUE_OFFSET: f64 = 0.01;
const SATURATION: f64 = 0.9 * 99.0;
const LIGHTNESS: f64 = 0.65 * 99.0;

/// Hex color per label, fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    labels: Vec<String>,
    colors: HashMap<String, String>,
}

impl Palette {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into();
            if !unique.contains(&label) {
                unique.push(label);
            }
        }

        let colors = unique
            .iter()
            .cloned()
            .zip(husl_palette(unique.len()).into_iter().map(to_hex))
            .collect();

        Self {
            labels: unique,
            colors,
        }
    }

    pub fn color(&self, label: &str) -> Option<&str> {
        self.colors.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels with their colors, in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .filter_map(|label| self.color(label).map(|color| (label.as_str(), color)))
    }
}

/// `n` RGB triples in [0, 1] at evenly spaced HSLuv hues.
pub fn husl_palette(n: usize) -> Vec<[f64; 3]> {
    (0..n)
        .map(|i| {
            let hue = ((i as f64 / n as f64 + HUE_OFFSET) % 1.0) * 359.0;
            hsluv_to_rgb(hue, SATURATION, LIGHTNESS)
        })
        .collect()
}

pub fn to_hex(rgb: [f64; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// sRGB channels in [0, 1], clamped into gamut.
pub fn hsluv_to_rgb(hue: f64, saturation: f64, lightness: f64) -> [f64; 3] {
    let color = Hsluv::<D65, f64>::new(hue, saturation, lightness);
    let rgb = Srgb::<f64>::from_color(color);
    [rgb.red, rgb.green, rgb.blue]
}
