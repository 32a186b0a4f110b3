//! 音频密钥流表
//!
//! 由种子密钥做一次 RC4 KSA 得到置换 S，再折叠成 256 字节查找表。
//! 查找表不是 RC4 输出流：第 `n` 项为
//! `S[(S[a] + S[(S[a] + a) & 0xff]) & 0xff]`，其中 `a = (n + 1) & 0xff`。

use crate::error::{Error, Result};

/// 查找表长度
pub const TABLE_LEN: usize = 256;

/// 256 字节密钥流查找表，构建后不可变
#[derive(Clone, PartialEq, Eq)]
pub struct KeyStream {
    table: [u8; TABLE_LEN],
}

impl KeyStream {
    /// 由种子密钥构建
    ///
    /// # Errors
    /// 种子密钥为空时返回 `BadLength`。
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::BadLength);
        }
        let sbox = schedule(key);
        let mut table = [0u8; TABLE_LEN];
        for (n, slot) in table.iter_mut().enumerate() {
            let a = (n + 1) & 0xff;
            let sa = usize::from(sbox[a]);
            let sb = usize::from(sbox[(sa + a) & 0xff]);
            *slot = sbox[(sa + sb) & 0xff];
        }
        Ok(Self { table })
    }

    /// 查找表内容
    #[must_use]
    pub const fn table(&self) -> &[u8; TABLE_LEN] {
        &self.table
    }

    /// 负载偏移 `offset` 处的掩码字节
    #[inline]
    #[must_use]
    pub const fn byte_at(&self, offset: usize) -> u8 {
        self.table[offset % TABLE_LEN]
    }
}

impl std::fmt::Debug for KeyStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 不打印表内容
        f.debug_struct("KeyStream").finish_non_exhaustive()
    }
}

/// RC4 KSA，单趟
fn schedule(key: &[u8]) -> [u8; TABLE_LEN] {
    let mut sbox = [0u8; TABLE_LEN];
    for (i, slot) in sbox.iter_mut().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let value = i as u8;
        *slot = value;
    }
    let mut j = 0usize;
    for i in 0..TABLE_LEN {
        j = (j + usize::from(sbox[i]) + usize::from(key[i % key.len()])) & 0xff;
        sbox.swap(i, j);
    }
    sbox
}
