//! Flat byte codec for filter state.
//! 过滤器状态的扁平字节编解码

use std::hash::Hasher;

use crate::bucket::{BUCKET_SIZE, Bucket, NULL_FP};
use crate::error::Error;
use crate::filter::CuckooFilter;

impl<H: Hasher + Clone> CuckooFilter<H> {
    /// Serialize buckets bucket-major, slot-minor, one byte per slot with
    /// zero for empty. Length is always `capacity()`. No header or checksum.
    /// 按桶优先、槽次之序列化，每槽一字节，空槽为零。长度恒为 `capacity()`。
    /// 无头部和校验和
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.capacity());
        for bucket in self.bucket_slice() {
            bytes.extend_from_slice(bucket.slots());
        }
        bytes
    }
}

impl<H: Hasher + Clone + Default> CuckooFilter<H> {
    /// Reconstruct a filter from encoded bytes.
    /// 从编码字节重建过滤器
    ///
    /// The count and index width come from the buffer itself; no stored
    /// metadata is trusted. Input must be non-empty, a multiple of 4, and
    /// describe a power-of-two bucket count.
    /// 计数和索引位宽来自缓冲区本身；不信任任何存储的元数据。输入必须非空、
    /// 为 4 的倍数，且描述的桶数量为 2 的幂
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.is_empty() || bytes.len() % BUCKET_SIZE != 0 {
            return Err(Error::InvalidLength(bytes.len()));
        }
        let bucket_len = bytes.len() / BUCKET_SIZE;
        if !bucket_len.is_power_of_two() {
            return Err(Error::InvalidBucketCount(bucket_len));
        }

        let mut count = 0;
        let mut buckets = Vec::with_capacity(bucket_len);
        for chunk in bytes.chunks_exact(BUCKET_SIZE) {
            count += chunk.iter().filter(|&&slot| slot != NULL_FP).count();
            let mut slots = [NULL_FP; BUCKET_SIZE];
            slots.copy_from_slice(chunk);
            buckets.push(Bucket::from_slots(slots));
        }
        Ok(CuckooFilter::from_parts(buckets, count))
    }
}
