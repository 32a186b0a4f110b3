//! 只读游标
//!
//! 所有区段都经由 `read_exact` / `skip` 读取，越界一律返回 `UnexpectedEof`。

use crate::error::{Error, Result};

/// 不可变输入上的顺序读取游标
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// 当前位置
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// 剩余字节数
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// 读取接下来的 `n` 字节并前移
    ///
    /// # Errors
    /// 剩余不足 `n` 字节时返回 `UnexpectedEof`，游标不动。
    pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::UnexpectedEof);
        }
        let data: &'a [u8] = self.data;
        let out = &data[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// 跳过 `n` 字节
    ///
    /// # Errors
    /// 剩余不足 `n` 字节时返回 `UnexpectedEof`。
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_exact(n).map(|_| ())
    }

    /// 读取 4 字节小端长度字段
    ///
    /// # Errors
    /// 剩余不足 4 字节时返回 `UnexpectedEof`。
    pub fn read_u32_le(&mut self) -> Result<u32> {
        let bytes: [u8; 4] = self
            .read_exact(4)?
            .try_into()
            .map_err(|_| Error::UnexpectedEof)?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// 读取长度前缀的区段（4 字节小端长度 + 数据）
    ///
    /// # Errors
    /// 长度字段或数据不完整时返回 `UnexpectedEof`。
    pub fn read_block(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32_le()?;
        let len = usize::try_from(len).map_err(|_| Error::UnexpectedEof)?;
        self.read_exact(len)
    }

    /// 取走剩余全部字节
    pub fn rest(&mut self) -> &'a [u8] {
        let data: &'a [u8] = self.data;
        let out = &data[self.pos..];
        self.pos = data.len();
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_and_skip() {
        let data = [1u8, 2, 3, 4, 5, 6];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_exact(2).unwrap(), &[1, 2]);
        cursor.skip(1).unwrap();
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.rest(), &[4, 5, 6]);
        assert_eq!(cursor.remaining(), 0);
        assert_eq!(cursor.rest(), &[] as &[u8]);
    }

    #[test]
    fn test_overrun_does_not_advance() {
        let data = [1u8, 2, 3];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_exact(4), Err(Error::UnexpectedEof));
        assert_eq!(cursor.skip(4), Err(Error::UnexpectedEof));
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_exact(3).unwrap(), &[1, 2, 3]);
        assert_eq!(cursor.read_exact(0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn test_u32_little_endian() {
        let data = [0x43, 0x54, 0x45, 0x4e, 0xff];
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u32_le().unwrap(), 0x4e45_5443);
        assert_eq!(cursor.read_u32_le(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn test_block_length_beyond_buffer() {
        let mut data = 0xffff_fff0_u32.to_le_bytes().to_vec();
        data.extend_from_slice(b"abc");
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_block(), Err(Error::UnexpectedEof));

        let mut data = 3_u32.to_le_bytes().to_vec();
        data.extend_from_slice(b"abcd");
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_block().unwrap(), b"abc");
        assert_eq!(cursor.rest(), b"d");
    }
}
