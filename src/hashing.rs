//! Fingerprint and bucket index derivation.
//! 指纹与桶索引推导

use std::hash::Hasher;

use crate::bucket::NULL_FP;

/// Derive primary bucket index and fingerprint from one hash of the item.
/// 从元素的一次哈希推导主桶索引和指纹
#[inline]
pub(crate) fn index_and_fingerprint<H: Hasher + Clone>(
    hasher: &H,
    item: &[u8],
    bucket_pow: u32,
) -> (usize, u8) {
    let hash = crate::hash(hasher, item);
    (hash as usize & index_mask(bucket_pow), fingerprint(hash))
}

/// Fingerprint from the high byte of the hash.
/// 从哈希高字节取指纹
///
/// Zero is the empty-slot sentinel, so it is remapped to 1. This doubles
/// the collision mass on fingerprint 1 (2/256 instead of 1/256).
/// 零是空槽哨兵，因此被重映射为 1。这使指纹 1 的碰撞概率翻倍（2/256 而非 1/256）
#[inline]
fn fingerprint(hash: u64) -> u8 {
    let fp = (hash >> 56) as u8;
    if fp == NULL_FP { 1 } else { fp }
}

/// Partner bucket index: `(i ^ hash(fp)) & mask`. Applying twice with the
/// same fingerprint returns the original index.
/// 伙伴桶索引：`(i ^ hash(fp)) & mask`。用同一指纹应用两次返回原索引
#[inline]
pub(crate) fn alt_index<H: Hasher + Clone>(
    hasher: &H,
    fp: u8,
    i: usize,
    bucket_pow: u32,
) -> usize {
    (i ^ crate::hash(hasher, &[fp]) as usize) & index_mask(bucket_pow)
}

/// Low-bit mask selecting `bucket_pow` index bits.
/// 选择 `bucket_pow` 个索引位的低位掩码
#[inline]
fn index_mask(bucket_pow: u32) -> usize {
    (1usize << bucket_pow) - 1
}
