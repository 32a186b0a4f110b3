//! 容器格式常量与魔数校验
//!
//! ```text
//! ┌──────────┬─────────┬──────────────┬──────────────┬───────┬─────┬────────────┬───────┐
//! │ CTENFDAM │ version │ L1 + key box │ L2 + meta    │ CRC32 │ gap │ L3 + cover │ audio │
//! │ 8 bytes  │ 2 bytes │ 4 + L1       │ 4 + L2       │   4   │  5  │ 4 + L3     │  ...  │
//! └──────────┴─────────┴──────────────┴──────────────┴───────┴─────┴────────────┴───────┘
//! ```
//!
//! 所有长度字段均为小端 u32。

use crate::cursor::Cursor;
use crate::error::{Error, Result};

/// 文件签名
pub const MAGIC: &[u8; 8] = b"CTENFDAM";

/// 签名后的版本/保留字段长度
pub const VERSION_LEN: usize = 2;

/// 密钥块 XOR 掩码
pub const KEY_BOX_MASK: u8 = 0x64;

/// 密钥块 AES-128 密钥 ("hzHRAmso5kInbaxW")
pub const CORE_KEY: &[u8; 16] = b"hzHRAmso5kInbaxW";

/// 密钥块明文前缀
pub const KEY_BOX_TAG: &[u8; 17] = b"neteasecloudmusic";

/// 元数据块 XOR 掩码
pub const META_MASK: u8 = 0x63;

/// 元数据块 AES-128 密钥
pub const META_KEY: &[u8; 16] = b"#14ljk_!\\]&0U<'(";

/// 元数据块 base64 前的 ASCII 前缀
pub const META_TAG: &[u8; 22] = b"163 key(Don't modify):";

/// 元数据 JSON 前缀
pub const META_JSON_TAG: &[u8; 6] = b"music:";

/// CRC32 字段长度（不校验）
pub const CRC_LEN: usize = 4;

/// CRC 之后的保留间隙
pub const GAP_LEN: usize = 5;

/// 校验签名并跳过版本字段
///
/// # Errors
/// 不足 8 字节返回 `UnexpectedEof`，签名不符返回 `BadMagic`。
pub fn check_magic(cursor: &mut Cursor<'_>) -> Result<()> {
    let magic = cursor.read_exact(MAGIC.len())?;
    if magic != MAGIC {
        return Err(Error::BadMagic);
    }
    cursor.skip(VERSION_LEN)
}

/// 是否以容器签名开头（只看前 8 字节）
#[must_use]
pub fn is_ncm(data: &[u8]) -> bool {
    data.starts_with(MAGIC)
}
