// Domain layer: post model and the port to the remote blog API.

pub mod model;
pub mod ports;
