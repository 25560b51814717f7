//! Trail metrics from recorded GPS tracks: distance, elevation gain and loss,
//! both as recorded and with sub-threshold noise filtered out.

pub mod distance;
pub mod duplicate;
pub mod formatting;
pub mod metrics;
pub mod model;
mod model_impls;
pub mod read;
pub mod trail;
