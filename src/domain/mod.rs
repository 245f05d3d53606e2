// Domain layer: seed records, API payloads and the ports the seeder drives.

pub mod model;
pub mod ports;
