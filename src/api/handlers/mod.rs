pub mod management;
pub mod monitor;

pub use management::health_check;
pub use monitor::{monitor, ApiState};
