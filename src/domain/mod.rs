// Domain layer: team records and the ports the pipeline talks through.

pub mod model;
pub mod ports;
