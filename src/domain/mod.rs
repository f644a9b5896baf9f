// Domain layer: applicant models and ports (interfaces).

pub mod model;
pub mod ports;
