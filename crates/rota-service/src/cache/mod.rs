//! Caching infrastructure for the service layer.
//!
//! A cache abstraction with a Redis implementation (native per-key expiry)
//! and a bounded in-process implementation that expires entries itself.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::InMemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
