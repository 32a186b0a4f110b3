//! 密钥块解码
//!
//! `L1 | key box`：逐字节 XOR 0x64 → AES-128-ECB (`CORE_KEY`) → 去掉
//! `neteasecloudmusic` 前缀，余下即 RC4 种子密钥。

use crate::cipher::{self, BLOCK_LEN};
use crate::container::{CORE_KEY, KEY_BOX_MASK, KEY_BOX_TAG};
use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// 读取并解出种子密钥
///
/// # Errors
/// - `UnexpectedEof`: 长度字段或数据不完整
/// - `BadLength`: `L1` 为 0 或未按分组对齐，或前缀后没有密钥
/// - `BadAes`: 填充非法或前缀不符
pub fn read_seed_key(cursor: &mut Cursor<'_>) -> Result<Vec<u8>> {
    let raw = cursor.read_block()?;
    decode_seed_key(raw)
}

/// 解出种子密钥（不含长度字段）
///
/// # Errors
/// 同 [`read_seed_key`]，但不会返回 `UnexpectedEof`。
pub fn decode_seed_key(raw: &[u8]) -> Result<Vec<u8>> {
    if raw.is_empty() || raw.len() % BLOCK_LEN != 0 {
        return Err(Error::BadLength);
    }
    let mut buf: Vec<u8> = raw.iter().map(|b| b ^ KEY_BOX_MASK).collect();
    let len = cipher::decrypt_ecb_in_place(CORE_KEY, &mut buf)?;
    buf.truncate(len);

    if !buf.starts_with(KEY_BOX_TAG) {
        // 前缀短于 17 字节或内容不符，都说明解密结果不对
        return Err(if buf.len() < KEY_BOX_TAG.len() && KEY_BOX_TAG.starts_with(&buf) {
            Error::BadLength
        } else {
            Error::BadAes
        });
    }
    let seed = buf.split_off(KEY_BOX_TAG.len());
    if seed.is_empty() {
        return Err(Error::BadLength);
    }
    Ok(seed)
}
