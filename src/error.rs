//! Codec error types.
//! 编解码错误类型

use thiserror::Error;

/// Errors reported when decoding an encoded filter.
/// 解码过滤器时报告的错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input is empty or its length is not a multiple of the bucket size.
    /// 输入为空或长度不是桶大小的整数倍
    #[error("invalid encoded length: {0} (expected non-empty multiple of 4)")]
    InvalidLength(usize),

    /// Decoded bucket count is not a power of two.
    /// 解码出的桶数量不是 2 的幂
    #[error("bucket count {0} is not a power of two")]
    InvalidBucketCount(usize),
}
