// Public library interface for shardmap-rs
// The binaries drive the pipeline through these modules.

pub mod layout;
pub mod render;
pub mod report;
pub mod stats;
pub mod tree;
