// Domain layer: value types, pure geo/pair/cost logic and the ports (interfaces) the adapters implement.

pub mod cost;
pub mod geo;
pub mod model;
pub mod pairs;
pub mod ports;
