pub mod config;
pub mod constants;
pub mod constellation;
pub mod coordinates;
pub mod errors;
pub mod integrators;
pub mod io;
pub mod models;
pub mod numerics;
pub mod physics;
