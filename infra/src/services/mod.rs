//! Infrastructure service implementations

pub mod sweeper;


pub use sweeper::{RevocationPurge, RevocationSweeper, SweepResult};
