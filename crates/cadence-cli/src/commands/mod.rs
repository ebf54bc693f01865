//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, finder with console progress)
//! - `distances` - Compute and save pair distances
//! - `find` - Run the finder and print sequences
//! - `siblings` - Look up the rest of a transaction's sequence

pub mod core;
pub mod distances;
pub mod find;
pub mod siblings;

// Re-export command functions for main.rs
pub use core::*;
pub use distances::*;
pub use find::*;
pub use siblings::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
