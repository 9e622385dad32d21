//! Listing cap for unfiltered reads.

/// Maximum number of records a listing returns.
///
/// This is a page cap, not a full table scan: listings never exceed it.
pub const FIND_ALL_LIMIT: usize = 100;
