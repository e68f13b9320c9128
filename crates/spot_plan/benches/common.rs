use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// Spot spacings in cm, coarse to fine.
pub const SPACINGS: [f64; 4] = [1.0, 0.5, 0.25, 0.1];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Throughput in spots; empty patterns count as one element.
pub fn spots_throughput(spots: usize) -> Throughput {
    Throughput::Elements(spots.max(1) as u64)
}
