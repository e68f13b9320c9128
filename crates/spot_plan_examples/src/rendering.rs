use std::path::Path;

use glam::DVec2;
use image::{Rgb, RgbImage};
use spot_plan::spots::SpotSet;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs a console subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

/// Maps a field region in cm onto a PNG canvas.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub xy_min: DVec2,
    pub xy_max: DVec2,
    pub background: [u8; 3],
    pub spot_color: [u8; 3],
    /// Spot radius in pixels.
    pub spot_radius: i32,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), xy_min: DVec2, xy_max: DVec2) -> Self {
        Self {
            image_size,
            xy_min,
            xy_max,
            background: [20, 22, 28],
            spot_color: [250, 200, 90],
            spot_radius: 3,
        }
    }

    /// Region of `spots` padded by `margin` cm on each side.
    pub fn fit(image_size: (u32, u32), spots: &SpotSet, margin: f64) -> Self {
        if spots.is_empty() {
            return Self::new(image_size, DVec2::splat(-margin), DVec2::splat(margin));
        }
        let (min, max) = spots.positions().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(p), hi.max(p)),
        );
        Self::new(image_size, min - margin, max + margin)
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_spot_color(mut self, spot_color: [u8; 3]) -> Self {
        self.spot_color = spot_color;
        self
    }

    pub fn with_spot_radius(mut self, spot_radius: i32) -> Self {
        self.spot_radius = spot_radius;
        self
    }

    /// Pixel position of `p`; image row 0 is the top (largest y).
    fn to_pixel(&self, p: DVec2) -> (i32, i32) {
        let (w, h) = self.image_size;
        let extent = (self.xy_max - self.xy_min).max(DVec2::splat(f64::EPSILON));
        let t = (p - self.xy_min) / extent;
        let x = t.x * w.saturating_sub(1) as f64;
        let y = (1.0 - t.y) * h.saturating_sub(1) as f64;
        (x.round() as i32, y.round() as i32)
    }
}

/// Draws every spot as a disc whose brightness follows its weight relative to the
/// heaviest spot.
pub fn render_spots_to_png(
    spots: &SpotSet,
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    let max_weight = spots.weights().iter().copied().fold(0.0_f64, f64::max);
    for (p, weight) in spots.positions().zip(spots.weights()) {
        let t = if max_weight > 0.0 {
            weight / max_weight
        } else {
            0.0
        };
        let (cx, cy) = rc.to_pixel(p);
        draw_disc(&mut img, cx, cy, rc.spot_radius, blend(rc.background, rc.spot_color, t));
    }

    img.save(out_path.as_ref())?;
    tracing::info!(
        "Wrote {} spots to {}.",
        spots.len(),
        out_path.as_ref().display()
    );
    Ok(())
}

fn blend(from: [u8; 3], to: [u8; 3], t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    Rgb([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])])
}

fn draw_disc(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && x < w && y < h {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
