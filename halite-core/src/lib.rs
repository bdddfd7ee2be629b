pub mod collision;
pub mod command;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod wire;
pub mod world;

pub use command::Command;
pub use error::SnapshotError;
pub use world::World;
