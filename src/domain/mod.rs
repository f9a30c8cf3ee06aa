// Domain layer: the address/range model and the ports configuration sources implement.

pub mod model;
pub mod ports;
