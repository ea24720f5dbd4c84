// Domain layer: student records and the ports the console talks through.

pub mod model;
pub mod ports;
