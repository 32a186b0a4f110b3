//! 解码流程
//!
//! ```text
//! Start → MagicChecked → KeyRecovered → MetadataRecovered
//!       → CoverSkipped → TableBuilt → AudioDecoded
//! ```
//!
//! 各阶段按固定顺序执行，第一个错误即为结果，失败时不返回任何部分输出。

use crate::container;
use crate::cover::{self, Cover};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::format::MusicFormat;
use crate::keybox;
use crate::keystream::KeyStream;
use crate::metadata::{self, Metadata};

/// 解码阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    MagicChecked,
    KeyRecovered,
    MetadataRecovered,
    CoverSkipped,
    TableBuilt,
    AudioDecoded,
}

/// 解码结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// 码流格式
    pub format: MusicFormat,
    /// 元数据；容器不带元数据时为默认值
    pub metadata: Metadata,
    /// 是否带有元数据块
    pub has_metadata: bool,
    /// 封面
    pub cover: Option<Cover>,
    /// 恢复出的音频码流
    pub audio: Vec<u8>,
}

impl Decoded {
    /// 格式标志位（MP3 = 0，FLAC = 1）
    #[must_use]
    pub const fn format_flag(&self) -> u8 {
        self.format.flag()
    }
}

/// 单个文件的逐阶段解码器
///
/// 持有输入的只读视图与中间状态，不共享任何全局状态。阶段只能经由
/// [`Decoder::step`] 按固定顺序推进，不能跳过或重复。
#[derive(Debug)]
pub struct Decoder<'a> {
    cursor: Cursor<'a>,
    stage: Stage,
    seed_key: Vec<u8>,
    metadata: Option<Metadata>,
    cover: Option<Cover>,
    keystream: Option<KeyStream>,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            stage: Stage::Start,
            seed_key: Vec::new(),
            metadata: None,
            cover: None,
            keystream: None,
        }
    }

    /// 当前阶段
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// 执行下一个阶段，返回推进后的阶段
    ///
    /// 到达 `TableBuilt` 后不再推进，剩下的音频解扰由 [`Decoder::finish`] 完成。
    /// 失败时阶段与读取位置都保持不变。
    ///
    /// # Errors
    /// 返回该阶段的错误（见 [`crate::Error`]）。
    pub fn step(&mut self) -> Result<Stage> {
        if self.stage >= Stage::TableBuilt {
            return Ok(self.stage);
        }
        let checkpoint = self.cursor.clone();
        let next = match self.enter_next() {
            Ok(next) => next,
            Err(err) => {
                self.cursor = checkpoint;
                return Err(err);
            }
        };
        tracing::debug!(stage = ?next, offset = self.cursor.position(), "ncm stage");
        self.stage = next;
        Ok(next)
    }

    fn enter_next(&mut self) -> Result<Stage> {
        Ok(match self.stage {
            Stage::Start => {
                container::check_magic(&mut self.cursor)?;
                Stage::MagicChecked
            }
            Stage::MagicChecked => {
                self.seed_key = keybox::read_seed_key(&mut self.cursor)?;
                Stage::KeyRecovered
            }
            Stage::KeyRecovered => {
                self.metadata = metadata::read_metadata(&mut self.cursor)?;
                Stage::MetadataRecovered
            }
            Stage::MetadataRecovered => {
                self.cover = cover::read_cover(&mut self.cursor)?;
                Stage::CoverSkipped
            }
            Stage::CoverSkipped => {
                self.keystream = Some(KeyStream::new(&self.seed_key)?);
                Stage::TableBuilt
            }
            Stage::TableBuilt | Stage::AudioDecoded => self.stage,
        })
    }

    /// 执行余下的全部阶段并解扰音频负载
    ///
    /// # Errors
    /// 返回第一个失败阶段的错误。
    pub fn finish(mut self) -> Result<Decoded> {
        while self.stage < Stage::TableBuilt {
            self.step()?;
        }
        // TableBuilt 之后 keystream 一定存在
        let Some(keystream) = self.keystream.take() else {
            return Err(Error::BadLength);
        };
        let audio = keystream.decrypt(self.cursor.rest());
        self.stage = Stage::AudioDecoded;
        tracing::debug!(stage = ?self.stage, len = audio.len(), "ncm stage");

        let has_metadata = self.metadata.is_some();
        let metadata = self.metadata.take().unwrap_or_default();
        let format = if has_metadata {
            metadata.format
        } else {
            MusicFormat::sniff(&audio)
        };
        Ok(Decoded {
            format,
            metadata,
            has_metadata,
            cover: self.cover.take(),
            audio,
        })
    }
}

/// 解码一个完整的容器
///
/// # Errors
/// 见 [`crate::Error`]，按阶段顺序返回第一个错误。
pub fn decode(data: &[u8]) -> Result<Decoded> {
    let span = tracing::debug_span!("ncm_decode", len = data.len());
    let _guard = span.enter();
    Decoder::new(data).finish()
}
