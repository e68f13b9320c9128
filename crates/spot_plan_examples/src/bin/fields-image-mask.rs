use std::path::PathBuf;

use glam::DVec2;
use spot_plan::prelude::*;
use spot_plan_examples::{init_tracing, render_spots_to_png, RenderConfig};

/// Pass an image path as the first argument, or a radial gradient is used.
fn main() -> anyhow::Result<()> {
    init_tracing();
    let source: ImageSource = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path).into(),
        None => radial_gradient(128).into(),
    };

    let xy_min = DVec2::new(-6.0, -6.0);
    let xy_max = DVec2::new(6.0, 6.0);
    for resample in [Resample::Nearest, Resample::Bilinear] {
        let pattern = ImagePattern::new(source.clone(), xy_min, xy_max, 0.25)
            .with_resample(resample)
            .with_activation(ActivationWindow::new(0.05, 0.99));
        let spots = pattern.generate()?;
        tracing::info!(
            "{:?}: {} spots, total weight {:.2}.",
            resample,
            spots.len(),
            spots.total_weight()
        );

        let rc = RenderConfig::new((800, 800), xy_min, xy_max).with_spot_radius(2);
        render_spots_to_png(
            &spots,
            &rc,
            format!("fields-image-mask-{}.png", format!("{resample:?}").to_lowercase()),
        )?;
    }

    Ok(())
}

/// Dark in the centre, white at the corners.
fn radial_gradient(size: u32) -> IntensityGrid {
    let c = (size as f64 - 1.0) / 2.0;
    let max_d = (2.0 * c * c).sqrt();
    IntensityGrid::from_fn(size, size, |x, y| {
        let d = DVec2::new(x as f64 - c, y as f64 - c).length() / max_d;
        (d * 255.0).round().clamp(0.0, 255.0) as u8
    })
}
