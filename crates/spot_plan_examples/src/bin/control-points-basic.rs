use glam::DVec2;
use spot_plan::prelude::*;
use spot_plan_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let params = DeliveryParams::new(4).with_mu_per_spot(0.02);

    let requests = vec![
        FieldRequest::new(
            "square",
            RectanglePattern::new(DVec2::new(-2.0, -2.0), DVec2::new(2.0, 2.0), 1.0),
            150.0,
        )
        .with_energy_layers(vec![150.0, 145.0]),
        FieldRequest::new("disc", DiscPattern::new(DVec2::ZERO, 3.0, 0.5), 120.0)
            .with_energy_layers(vec![120.0, 118.5]),
    ];

    let mut sink = FnSink::new(|event: BuildEvent| {
        if let BuildEvent::ControlPointBuilt {
            field_id,
            index,
            role,
            cumulative_weight,
            ..
        } = event
        {
            println!("  {field_id} #{index} {role:?} cumulative={cumulative_weight}");
        }
    });
    let mut runner = PlanRunner::try_new(params)?;
    let plan = runner.run_with_events(&requests, &mut sink)?;

    let mut encoder = |field: &Field| -> Result<()> {
        println!(
            "{}: {} spots, {:.2} MU, final cumulative weight {}",
            field.id,
            field.spot_count(),
            field.total_monitor_units(),
            field.final_cumulative_weight()
        );
        for cp in field.control_points() {
            let mm = to_millimeters(&cp.position_map);
            println!(
                "  #{} {:?} {} MeV, first spot at ({}, {}) mm",
                cp.index,
                cp.role,
                cp.nominal_energy,
                mm.first().copied().unwrap_or_default(),
                mm.get(1).copied().unwrap_or_default()
            );
        }
        Ok(())
    };
    plan.encode_with(&mut encoder)?;

    Ok(())
}
