pub mod command;
pub mod config;
pub mod constants;
pub mod field;
pub mod geometry;
pub mod integrator;
pub mod lifecycle;
pub mod obstacles;
pub mod particle;
pub mod pointer;
pub mod pop;

pub use command::*;
pub use config::*;
pub use field::*;
pub use geometry::*;
pub use lifecycle::*;
pub use obstacles::*;
pub use particle::*;
pub use pointer::*;
pub use pop::*;
