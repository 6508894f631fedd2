pub mod grid;
pub mod mapper;
pub mod ramp;
pub mod weights;
