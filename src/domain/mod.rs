// Domain layer: value model and ports. No knowledge of how records are stored.

pub mod decimal;
pub mod model;
pub mod ports;
pub mod value;
