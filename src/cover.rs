//! CRC/间隙跳过与封面提取

use crate::container::{CRC_LEN, GAP_LEN};
use crate::cursor::Cursor;
use crate::error::Result;

const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// 内嵌封面图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    pub data: Vec<u8>,
}

impl Cover {
    /// MIME 类型：PNG 签名判为 `image/png`，其余按 JPEG
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        if self.data.starts_with(PNG_SIGNATURE) {
            "image/png"
        } else {
            "image/jpeg"
        }
    }

    /// 文件扩展名
    #[must_use]
    pub fn extension(&self) -> &'static str {
        if self.data.starts_with(PNG_SIGNATURE) {
            "png"
        } else {
            "jpg"
        }
    }
}

/// 跳过 CRC 与保留间隙，读取封面；长度为 0 返回 `None`
///
/// # Errors
/// 任一区段不完整时返回 `UnexpectedEof`。
pub fn read_cover(cursor: &mut Cursor<'_>) -> Result<Option<Cover>> {
    cursor.skip(CRC_LEN)?;
    cursor.skip(GAP_LEN)?;
    let data = cursor.read_block()?;
    Ok((!data.is_empty()).then(|| Cover {
        data: data.to_vec(),
    }))
}
