//! 错误类型定义
//!
//! 解码失败只有六种，按阶段先后检查，第一个失败即为结果。

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unexpected end of data")]
    UnexpectedEof,

    #[error("bad container magic")]
    BadMagic,

    #[error("invalid AES padding or key box tag")]
    BadAes,

    #[error("metadata payload is not valid base64")]
    BadBase64,

    #[error("structurally invalid length field")]
    BadLength,

    #[error("metadata is not a valid record")]
    BadMetadata,
}

impl Error {
    /// 全部错误，按 C ABI 错误码顺序
    pub const ALL: [Self; 6] = [
        Self::UnexpectedEof,
        Self::BadMagic,
        Self::BadAes,
        Self::BadBase64,
        Self::BadLength,
        Self::BadMetadata,
    ];

    /// 稳定的负数错误码 (-1 ..= -6)，供 FFI 使用
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::UnexpectedEof => -1,
            Self::BadMagic => -2,
            Self::BadAes => -3,
            Self::BadBase64 => -4,
            Self::BadLength => -5,
            Self::BadMetadata => -6,
        }
    }

    /// 错误名（与变体名一致）
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UnexpectedEof => "UnexpectedEof",
            Self::BadMagic => "BadMagic",
            Self::BadAes => "BadAes",
            Self::BadBase64 => "BadBase64",
            Self::BadLength => "BadLength",
            Self::BadMetadata => "BadMetadata",
        }
    }

    /// 从错误码还原
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|err| err.code() == code)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_negative() {
        for (idx, err) in Error::ALL.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let expected = -(idx as i32) - 1;
            assert_eq!(err.code(), expected);
            assert_eq!(Error::from_code(err.code()), Some(*err));
        }
        assert_eq!(Error::from_code(0), None);
        assert_eq!(Error::from_code(-7), None);
    }

    #[test]
    fn test_name_matches_debug() {
        for err in Error::ALL {
            assert_eq!(err.name(), format!("{err:?}"));
        }
    }
}
