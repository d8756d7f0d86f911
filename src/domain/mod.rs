// Domain layer: word-count models and ports (interfaces).

pub mod model;
pub mod ports;
