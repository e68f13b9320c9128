use spot_plan::prelude::*;
use spot_plan_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let configs = [
        FieldConfig {
            lattice: Some("hex".into()),
            spacing: Some(0.5),
            xy_min: Some([-2.0, -2.0]),
            xy_max: Some([2.0, 2.0]),
            ..FieldConfig::new("square")
        },
        FieldConfig {
            spot_count: Some(9),
            center: Some([0.0, 0.0]),
            diameter: Some(3.0),
            ..FieldConfig::new("circular")
        },
        FieldConfig::new("triangle"),
    ];

    for cfg in configs {
        let shape = cfg.shape.clone();
        match FieldSpec::try_from(cfg) {
            Ok(spec) => {
                let field = plan_field(&spec, 160.0, &DeliveryParams::default())?;
                println!(
                    "{shape}: {} spots, {} MU",
                    field.spot_count(),
                    field.total_monitor_units()
                );
            }
            Err(err) => println!("{shape}: rejected ({err})"),
        }
    }

    Ok(())
}
