//! Fixed-capacity bucket of fingerprint slots.
//! 固定容量的指纹槽桶

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Slots per bucket.
/// 每桶槽位数
pub(crate) const BUCKET_SIZE: usize = 4;

/// Empty-slot sentinel fingerprint.
/// 空槽哨兵指纹
pub(crate) const NULL_FP: u8 = 0;

/// Four fingerprint slots; zero marks an empty slot.
/// 四个指纹槽；零表示空槽
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub(crate) struct Bucket([u8; BUCKET_SIZE]);

impl Bucket {
    /// Build bucket from raw slot bytes.
    /// 从原始槽字节构建桶
    #[inline]
    pub(crate) fn from_slots(slots: [u8; BUCKET_SIZE]) -> Self {
        Bucket(slots)
    }

    /// Raw slot bytes in slot order.
    /// 按槽顺序的原始槽字节
    #[inline]
    pub(crate) fn slots(&self) -> &[u8; BUCKET_SIZE] {
        &self.0
    }

    /// Place fingerprint in first empty slot.
    /// 将指纹放入第一个空槽
    #[inline]
    pub(crate) fn insert(&mut self, fp: u8) -> bool {
        debug_assert_ne!(fp, NULL_FP);
        for slot in &mut self.0 {
            if *slot == NULL_FP {
                *slot = fp;
                return true;
            }
        }
        false
    }

    /// Clear first slot holding fingerprint.
    /// 清除第一个持有该指纹的槽
    #[inline]
    pub(crate) fn delete(&mut self, fp: u8) -> bool {
        debug_assert_ne!(fp, NULL_FP);
        for slot in &mut self.0 {
            if *slot == fp {
                *slot = NULL_FP;
                return true;
            }
        }
        false
    }

    /// Slot index of fingerprint, if present.
    /// 指纹所在槽的索引（若存在）
    #[inline]
    pub(crate) fn fingerprint_index(&self, fp: u8) -> Option<usize> {
        self.0.iter().position(|&slot| slot == fp)
    }

    /// Check if bucket holds fingerprint.
    /// 检查桶是否持有该指纹
    #[inline]
    pub(crate) fn contains(&self, fp: u8) -> bool {
        debug_assert_ne!(fp, NULL_FP);
        self.fingerprint_index(fp).is_some()
    }

    /// Check if every slot is occupied.
    /// 检查是否所有槽都已占用
    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.0.iter().all(|&slot| slot != NULL_FP)
    }

    /// Count of occupied slots.
    /// 已占用槽的数量
    #[inline]
    pub(crate) fn occupied(&self) -> usize {
        self.0.iter().filter(|&&slot| slot != NULL_FP).count()
    }

    /// Occupied ratio, one of {0, 0.25, 0.5, 0.75, 1}.
    /// 占用比率，取值 {0, 0.25, 0.5, 0.75, 1}
    #[inline]
    pub(crate) fn load_factor(&self) -> f64 {
        self.occupied() as f64 / BUCKET_SIZE as f64
    }

    /// Clear all slots.
    /// 清空所有槽
    #[inline]
    pub(crate) fn reset(&mut self) {
        self.0 = [NULL_FP; BUCKET_SIZE];
    }

    /// Swap fingerprint with slot occupant, returning the evicted value.
    /// Caller only swaps into full buckets.
    /// 与槽内占用者交换指纹，返回被驱逐的值。调用方仅对满桶交换
    #[inline]
    pub(crate) fn swap_slot(&mut self, slot: usize, fp: u8) -> u8 {
        debug_assert_ne!(fp, NULL_FP);
        let old = std::mem::replace(&mut self.0[slot], fp);
        debug_assert_ne!(old, NULL_FP);
        old
    }

    /// Swap fingerprint with the n-th occupied slot, returning the evicted
    /// value. Empty slots are skipped so the sentinel is never evicted.
    /// 与第 n 个已占用槽交换指纹，返回被驱逐的值。跳过空槽，哨兵不会被驱逐
    #[inline]
    pub(crate) fn swap_occupied(&mut self, nth: usize, fp: u8) -> u8 {
        debug_assert_ne!(fp, NULL_FP);
        let mut seen = 0;
        for slot in &mut self.0 {
            if *slot != NULL_FP {
                if seen == nth {
                    return std::mem::replace(slot, fp);
                }
                seen += 1;
            }
        }
        debug_assert!(false, "fewer than {nth} occupied slots");
        fp
    }
}
