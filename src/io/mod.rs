//! IO modules - external system interfaces
//!
//! This module contains the persistence surfaces of the core:
//! - `export` - sample-set output to JSON files (training data format)
//! - `leaderboard` - rep-count store with upsert and live top-N
//!   subscription, plus the fire-and-forget update channel

pub mod export;
pub mod leaderboard;

// Re-export commonly used types
pub use export::{export_file_name, read_samples, write_samples, SampleExporter};
pub use leaderboard::{
    create_update_channel, run_publisher, LeaderboardEntry, LeaderboardStore, MemoryLeaderboard,
    UpdateSender,
};
