use glam::DVec2;
use spot_plan::prelude::*;
use spot_plan_examples::{init_tracing, render_spots_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let xy_min = DVec2::new(-5.0, -3.0);
    let xy_max = DVec2::new(5.0, 3.0);
    let spacing = 0.5;

    for lattice in [LatticeMode::Square, LatticeMode::Hexagonal] {
        let spots = RectanglePattern::new(xy_min, xy_max, spacing)
            .with_lattice(lattice)
            .generate()?;
        tracing::info!("{} lattice: {} spots.", lattice, spots.len());

        // Hexagonal rows overhang the rectangle by half a spacing.
        let rc = RenderConfig::new((1000, 600), xy_min - 1.0, xy_max + 1.0).with_spot_radius(4);
        render_spots_to_png(
            &spots,
            &rc,
            format!("fields-rectangle-square-vs-hex-{lattice}.png"),
        )?;
    }

    Ok(())
}
