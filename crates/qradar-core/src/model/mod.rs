pub mod board;
pub mod config;
pub mod coord;
pub mod detection;
pub mod sensor;
