//! Database layer: typed operations over a pluggable [`Store`].

pub mod database;
pub mod memory;
pub mod postgrest;
pub mod store;

pub use database::Database;
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;
pub use store::{Direction, Query, Store};

/// Table names as constants.
pub mod tables {
    pub const POSTS: &str = "posts";
    pub const TAGS: &str = "tags";
    /// Post ↔ tag join table
    pub const POST_TAGS: &str = "post_tags";
    pub const CONTACTS: &str = "contacts";
    pub const TIMES: &str = "times";
    pub const WORKS: &str = "works";
}
