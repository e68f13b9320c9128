use glam::DVec2;
use spot_plan::prelude::*;
use spot_plan_examples::{init_tracing, render_spots_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let pattern = DiscPattern::new(DVec2::new(1.0, -0.5), 8.0, 0.4);
    let spots = pattern.generate()?;
    tracing::info!(
        "Disc of radius {} cm at spacing {}: {} spots.",
        pattern.radius(),
        pattern.spacing,
        spots.len()
    );

    let rc = RenderConfig::fit((800, 800), &spots, 0.5).with_spot_color([120, 210, 255]);
    render_spots_to_png(&spots, &rc, "fields-disc-basic.png")?;
    Ok(())
}
