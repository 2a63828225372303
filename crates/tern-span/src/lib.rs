//! Session-scoped identity and content tables shared by every stage of the
//! front end.
//!
//! Nothing in here is a process-wide singleton: a [`Session`] owns its string
//! table and identity counter, and independent sessions never observe each
//! other.

mod hash_table;
mod identity;
mod session;
mod symbol;

/// Open-chaining hash table with pluggable hashing.
pub use hash_table::{ContentHasher, HashTable, KeyHasher, PRIMES};
/// Identity stamps for by-object keys.
pub use identity::{Identified, IdentityCounter, IdentityHasher, IdentityStamp};
/// Per-session context.
pub use session::Session;
/// Interned strings.
pub use symbol::{StringTable, Symbol, rolling_hash};
