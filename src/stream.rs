//! 音频负载解扰
//!
//! `out[p] = in[p] ^ table[p % 256]`，每个位置独立，可任意分块并行。

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::keystream::{KeyStream, TABLE_LEN};

/// 超过该长度时走 rayon 分块路径
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

/// 并行分块长度，须为 `TABLE_LEN` 的整数倍
const CHUNK_LEN: usize = 256 * TABLE_LEN;

impl KeyStream {
    /// 就地解扰，`buf[0]` 位于负载偏移 `offset`
    pub fn apply_at(&self, offset: usize, buf: &mut [u8]) {
        let table = self.table();
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte ^= table[(offset + i) % TABLE_LEN];
        }
    }

    /// 就地解扰整个负载（偏移从 0 开始）
    pub fn apply(&self, buf: &mut [u8]) {
        #[cfg(feature = "parallel")]
        if buf.len() > PARALLEL_THRESHOLD {
            self.apply_parallel(buf);
            return;
        }
        self.apply_at(0, buf);
    }

    /// rayon 分块解扰，结果与顺序路径逐字节一致
    #[cfg(feature = "parallel")]
    pub fn apply_parallel(&self, buf: &mut [u8]) {
        buf.par_chunks_mut(CHUNK_LEN)
            .enumerate()
            .for_each(|(idx, chunk)| self.apply_at(idx * CHUNK_LEN, chunk));
    }

    /// 解扰到新缓冲区
    #[must_use]
    pub fn decrypt(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = payload.to_vec();
        self.apply(&mut out);
        out
    }
}
