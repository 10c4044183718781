//! Filter engine with load-factor-driven insertion strategies.
//! 由负载因子驱动插入策略的过滤器引擎

use std::hash::Hasher;

use fastrand::Rng;
use gxhash::GxHasher;

use crate::bucket::{BUCKET_SIZE, Bucket};
use crate::hashing::{alt_index, index_and_fingerprint};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Default hasher type.
/// 默认哈希器类型
pub type DefaultHasher = GxHasher;

/// Eviction cap for the global displacement loop.
/// 全局重定位循环的驱逐上限
const MAX_KICKS: u32 = 500;

/// Eviction cap for the positive (bounded) displacement phase.
/// 主动（有界）重定位阶段的驱逐上限
const POSITIVE_KICKS: u32 = 3;

/// Load factor threshold gating direct insertion.
/// 控制直接插入的负载因子阈值
const LIMIT_LOAD_FACTOR: f64 = 0.5;

/// Builder for [`CuckooFilter`].
/// [`CuckooFilter`] 构建器
#[derive(Debug)]
pub struct CuckooFilterBuilder<H = DefaultHasher> {
    capacity: usize,
    seed: Option<u64>,
    hasher: H,
}

impl CuckooFilterBuilder<DefaultHasher> {
    /// Create new builder with defaults.
    /// 使用默认值创建新构建器
    pub fn new() -> Self {
        CuckooFilterBuilder {
            capacity: 1 << 20,
            seed: None,
            hasher: GxHasher::default(),
        }
    }
}

impl<H: Hasher + Clone> CuckooFilterBuilder<H> {
    /// Set target item capacity; rounded up to the next power of two.
    /// 设置目标元素容量；向上取整到下一个 2 的幂
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Seed the eviction RNG for reproducible displacement chains.
    /// 为驱逐随机数生成器设置种子以复现重定位链
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set custom hasher.
    /// 设置自定义哈希器
    pub fn hasher<T: Hasher>(self, hasher: T) -> CuckooFilterBuilder<T> {
        CuckooFilterBuilder {
            capacity: self.capacity,
            seed: self.seed,
            hasher,
        }
    }

    /// Build the filter.
    /// 构建过滤器
    pub fn finish(self) -> CuckooFilter<H> {
        let bucket_len = (self.capacity.next_power_of_two() / BUCKET_SIZE).max(1);
        let rng = match self.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        CuckooFilter {
            hasher: self.hasher,
            rng,
            buckets: vec![Bucket::default(); bucket_len],
            bucket_pow: bucket_len.trailing_zeros(),
            count: 0,
            relocations: 0,
        }
    }
}

impl Default for CuckooFilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-capacity cuckoo filter over byte-sequence items.
/// 面向字节序列元素的固定容量布谷鸟过滤器
///
/// Membership answers have no false negatives and a bounded false positive
/// rate. Deleting an item that was never inserted may clear a colliding
/// fingerprint belonging to another item (standard AMQ deletion contract).
/// 成员查询无假阴性，假阳性率有界。删除从未插入的元素可能清除其它元素的
/// 冲突指纹（标准 AMQ 删除约定）
///
/// # Examples
///
/// ```
/// use loadaware_cuckoo_filter::CuckooFilter;
///
/// let mut filter = CuckooFilter::new(1024);
/// assert!(!filter.contains(b"foo"));
/// filter.insert(b"foo");
/// assert!(filter.contains(b"foo"));
/// assert!(filter.remove(b"foo"));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct CuckooFilter<H = DefaultHasher> {
    #[cfg_attr(feature = "serde_support", serde(skip))]
    hasher: H,
    #[cfg_attr(feature = "serde_support", serde(skip))]
    rng: Rng,
    buckets: Vec<Bucket>,
    bucket_pow: u32,
    count: usize,
    relocations: u64,
}

impl CuckooFilter<DefaultHasher> {
    /// Create filter for at least `capacity` items with the default hasher.
    /// 使用默认哈希器创建可容纳至少 `capacity` 个元素的过滤器
    pub fn new(capacity: usize) -> Self {
        CuckooFilterBuilder::new().capacity(capacity).finish()
    }
}

impl<H: Hasher + Clone> CuckooFilter<H> {
    /// Returns occupied slot count.
    /// 返回已占用槽数量
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no slot is occupied.
    /// 如果没有槽被占用返回 true
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns total slot capacity.
    /// 返回总槽容量
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Filter-wide occupied ratio in [0, 1].
    /// 过滤器整体占用比率，范围 [0, 1]
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Total evictions performed over this filter's lifetime. Diagnostic.
    /// 此过滤器生命周期内执行的驱逐总数。诊断用
    #[inline]
    pub fn relocations(&self) -> u64 {
        self.relocations
    }

    /// Check if item may have been inserted.
    /// 检查元素是否可能已插入
    #[inline]
    pub fn contains(&self, item: &[u8]) -> bool {
        let (i1, fp) = index_and_fingerprint(&self.hasher, item, self.bucket_pow);
        // Hot path: check i1 first, defer i2 calculation
        // 热路径：先检查 i1，延迟计算 i2
        if self.buckets[i1].contains(fp) {
            return true;
        }
        let i2 = alt_index(&self.hasher, fp, i1, self.bucket_pow);
        self.buckets[i2].contains(fp)
    }

    /// Insert item, returning false if the filter is saturated for it.
    /// 插入元素，若过滤器对其饱和则返回 false
    ///
    /// On failure the eviction chain's swaps are kept; the filter stays
    /// valid, merely rearranged.
    /// 失败时驱逐链已执行的交换保留；过滤器仍然有效，只是被重排
    pub fn insert(&mut self, item: &[u8]) -> bool {
        let (i1, fp) = index_and_fingerprint(&self.hasher, item, self.bucket_pow);
        let i2 = alt_index(&self.hasher, fp, i1, self.bucket_pow);

        // Prefer the less loaded candidate, ties keep the primary
        // 优先选择负载较低的候选桶，相同时保留主桶
        let lo = if self.buckets[i2].load_factor() < self.buckets[i1].load_factor() {
            i2
        } else {
            i1
        };

        if self.load_factor() >= LIMIT_LOAD_FACTOR {
            return self.displace_all(fp, lo);
        }
        self.displace_positive(fp, lo)
    }

    /// Insert item only if `contains` is false.
    /// 仅当 `contains` 为 false 时插入元素
    pub fn insert_unique(&mut self, item: &[u8]) -> bool {
        if self.contains(item) {
            return false;
        }
        self.insert(item)
    }

    /// Remove item, returning true if a matching fingerprint was cleared.
    /// 移除元素，若清除了匹配指纹返回 true
    pub fn remove(&mut self, item: &[u8]) -> bool {
        let (i1, fp) = index_and_fingerprint(&self.hasher, item, self.bucket_pow);
        if self.remove_fp(fp, i1) {
            return true;
        }
        let i2 = alt_index(&self.hasher, fp, i1, self.bucket_pow);
        self.remove_fp(fp, i2)
    }

    /// Clear every bucket and the count.
    /// 清空所有桶和计数
    pub fn reset(&mut self) {
        for bucket in &mut self.buckets {
            bucket.reset();
        }
        self.count = 0;
    }

    /// Bounded positive displacement: evict a random occupied slot, follow
    /// the victim to its partner bucket, retry the load-gated insert. The
    /// counter starts at zero for every top-level insert.
    /// 有界主动重定位：驱逐随机已占用槽，跟随受害者到其伙伴桶，重试带负载
    /// 门控的插入。计数器在每次顶层插入时从零开始
    fn displace_positive(&mut self, mut fp: u8, mut i: usize) -> bool {
        let mut kicks = 0u32;
        loop {
            // A bucket under the threshold always has a free slot
            // 低于阈值的桶必有空槽
            if self.buckets[i].load_factor() < LIMIT_LOAD_FACTOR && self.try_insert(fp, i) {
                return true;
            }
            kicks += 1;
            self.relocations += 1;
            // Only occupied slots are eviction candidates
            // 仅已占用槽可作为驱逐候选
            let victims = self.buckets[i].occupied();
            let nth = self.rng.usize(0..victims);
            fp = self.buckets[i].swap_occupied(nth, fp);
            i = alt_index(&self.hasher, fp, i, self.bucket_pow);
            if kicks >= POSITIVE_KICKS {
                return self.displace_all(fp, i);
            }
        }
    }

    /// Global displacement loop, capped at [`MAX_KICKS`] iterations.
    /// 全局重定位循环，上限为 [`MAX_KICKS`] 次迭代
    fn displace_all(&mut self, mut fp: u8, mut i: usize) -> bool {
        for _ in 0..MAX_KICKS {
            if !self.buckets[i].is_full() && self.try_insert(fp, i) {
                return true;
            }
            // Bucket is full here, so any slot is occupied
            // 此处桶已满，任意槽均被占用
            let slot = self.rng.usize(0..BUCKET_SIZE);
            fp = self.buckets[i].swap_slot(slot, fp);
            self.relocations += 1;
            i = alt_index(&self.hasher, fp, i, self.bucket_pow);
            if self.try_insert(fp, i) {
                return true;
            }
        }
        false
    }

    #[inline]
    fn try_insert(&mut self, fp: u8, i: usize) -> bool {
        if self.buckets[i].insert(fp) {
            self.count += 1;
            return true;
        }
        false
    }

    #[inline]
    fn remove_fp(&mut self, fp: u8, i: usize) -> bool {
        if self.buckets[i].delete(fp) {
            self.count = self.count.saturating_sub(1);
            return true;
        }
        false
    }

    /// Bucket array in index order, for the codec.
    /// 按索引顺序的桶数组，供编解码器使用
    #[inline]
    pub(crate) fn bucket_slice(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Cached log2 of the bucket count.
    /// 缓存的桶数量以 2 为底的对数
    #[inline]
    #[cfg(test)]
    pub(crate) fn bucket_pow(&self) -> u32 {
        self.bucket_pow
    }
}

impl<H: Hasher + Clone + Default> CuckooFilter<H> {
    /// Rebuild filter state from decoded buckets; `bucket_pow` and the
    /// hasher are recomputed, never trusted from the input.
    /// 从解码出的桶重建过滤器状态；`bucket_pow` 与哈希器重新计算，
    /// 绝不信任输入
    pub(crate) fn from_parts(buckets: Vec<Bucket>, count: usize) -> Self {
        debug_assert!(buckets.len().is_power_of_two());
        CuckooFilter {
            hasher: H::default(),
            rng: Rng::new(),
            bucket_pow: buckets.len().trailing_zeros(),
            buckets,
            count,
            relocations: 0,
        }
    }
}
