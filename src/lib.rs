//! A thread-safe cache answering "have I seen this key recently?".
//!
//! Instead of tracking per-key recency, the cache keeps two generations of hash sets. The active
//! generation receives inserts; once it is full, the older generation is dropped wholesale and
//! a fresh one takes over. Keys found only in the older generation are promoted back on lookup.
//! Eviction is O(1) amortized with no ordering bookkeeping, at the cost of batch-sized recency
//! granularity.
//!
//! # Features
//!
//! - Thread-safe by default - no need for explicit synchronization
//! - Pluggable hashing through [`std::hash::BuildHasher`]
//! - No unsafe code
//!
//! # Examples
//!
//! Basic usage with string keys:
//!
//! ```rust
//! use rotating_cache::Cache;
//!
//! // Create a new cache whose generations hold 1000 keys each
//! let cache = Cache::new();
//!
//! cache.insert("hello");
//! cache.insert("world");
//!
//! assert!(cache.find("hello"));
//! assert!(!cache.find("bye"));
//! ```
//!
//! Rotation and promotion:
//!
//! ```rust
//! use rotating_cache::Cache;
//!
//! let cache = Cache::with_capacity(2);
//! cache.insert("a");
//! cache.insert("b");
//!
//! // the active generation is full, "c" starts a new one
//! cache.insert("c");
//! assert_eq!(cache.active_len(), 1);
//!
//! // "a" is still cached and gets promoted into the active generation
//! assert!(cache.find("a"));
//! assert_eq!(cache.active_len(), 2);
//! ```
//!
//! Thread-safe usage across multiple threads:
//!
//! ```rust
//! use rotating_cache::Cache;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let cache = Arc::new(Cache::with_capacity(100));
//! cache.insert("key1");
//!
//! let cache_in_arc = Arc::clone(&cache);
//! let handle = thread::spawn(move || {
//!     cache_in_arc.insert("key2");
//! });
//!
//! handle.join().unwrap();
//!
//! assert!(cache.find("key1"));
//! assert!(cache.find("key2"));
//! ```

#![forbid(unsafe_code)]
pub mod cache;
pub mod error;

pub use cache::{Cache, DEFAULT_CAPACITY};
pub use cache::stats::Stats;
pub use error::ConfigError;
