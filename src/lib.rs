//! A fixed-capacity [Cuckoo Filter][cuckoo filter] that picks its insertion
//! strategy from bucket and filter load factors.
//! 一种根据桶和过滤器负载因子选择插入策略的固定容量布谷鸟过滤器
//!
//! Membership queries have no false negatives and a bounded false positive
//! rate, and items can be removed (unlike a classic Bloom filter). Below the
//! 0.5 load threshold, inserts go directly into the less loaded candidate
//! bucket or through a short bounded eviction chain; above it, a capped
//! global displacement loop takes over.
//! 成员查询无假阴性且假阳性率有界，并支持移除元素（不同于经典布隆过滤器）。
//! 负载低于 0.5 阈值时，插入直接进入负载较低的候选桶或经过短的有界驱逐链；
//! 高于阈值时，由带上限的全局重定位循环接管
//!
//! # Examples
//!
//! ```
//! use loadaware_cuckoo_filter::CuckooFilter;
//!
//! let mut filter = CuckooFilter::new(1024);
//! filter.insert(b"foo");
//! assert!(filter.contains(b"foo"));
//!
//! let bytes = filter.encode();
//! let restored: CuckooFilter = CuckooFilter::decode(&bytes).unwrap();
//! assert!(restored.contains(b"foo"));
//! ```
//!
//! Deterministic eviction chains under a fixed seed:
//!
//! ```
//! use loadaware_cuckoo_filter::CuckooFilterBuilder;
//!
//! let mut filter = CuckooFilterBuilder::new().capacity(128).seed(42).finish();
//! filter.insert(b"bar");
//! assert!(filter.contains(b"bar"));
//! ```
//!
//! # References
//!
//! - [Cuckoo Filter: Practically Better Than Bloom][cuckoo filter]
//!
//! [cuckoo filter]: https://www.cs.cmu.edu/~dga/papers/cuckoo-conext2014.pdf
#![warn(missing_docs)]

mod bucket;
mod codec;
mod error;
mod filter;
mod hashing;

pub use error::Error;
pub use filter::{CuckooFilter, CuckooFilterBuilder, DefaultHasher};

use std::hash::Hasher;

/// Compute hash for a byte sequence.
/// 计算字节序列的哈希值
#[inline(always)]
pub(crate) fn hash<H: Hasher + Clone>(hasher: &H, bytes: &[u8]) -> u64 {
    let mut h = hasher.clone();
    h.write(bytes);
    h.finish()
}
