mod health_reporter;
mod service_prober;

pub use health_reporter::HealthReporter;
pub use service_prober::{ServiceProber, health_url};
