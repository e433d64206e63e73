/// Bit set of cell indices
pub mod bitset;
/// Ordered outlier classification strategies
pub mod cascade;
/// Two-means clustering of cell colors
pub mod clustering;
/// End-to-end analysis pipeline
pub mod executor;
/// Brute-force search over uniform grid partitions
pub mod search;
