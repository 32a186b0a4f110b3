//! ncmkit - NCM 容器解码
//!
//! 把 NCM 加密容器还原为原始 MP3/FLAC 码流，并取出元数据与封面。
//!
//! # 容器格式
//!
//! ```text
//! ┌──────────┬─────────┬─────────┬──────────┬──────────┬───────────┬───────┐
//! │ CTENFDAM │ version │ key box │ metadata │ CRC+gap  │   cover   │ audio │
//! │ 8 bytes  │ 2 bytes │ 4 + L1  │ 4 + L2   │ 4 + 5    │  4 + L3   │  ...  │
//! └──────────┴─────────┴─────────┴──────────┴──────────┴───────────┴───────┘
//! ```
//!
//! 解码是输入字节的纯函数：无 I/O、无全局状态，可在任意线程并行调用。
//!
//! # Example
//!
//! ```no_run
//! let data = std::fs::read("song.ncm").unwrap();
//! match ncmkit::decode(&data) {
//!     Ok(decoded) => {
//!         let name = format!("song.{}", decoded.format.extension());
//!         std::fs::write(name, &decoded.audio).unwrap();
//!     }
//!     Err(err) => eprintln!("{}: {err}", err.name()),
//! }
//! ```

pub mod cipher;
pub mod container;
pub mod cover;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod format;
pub mod keybox;
pub mod keystream;
pub mod metadata;
pub mod stream;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports
pub use container::{is_ncm, MAGIC};
pub use cover::Cover;
pub use cursor::Cursor;
pub use decoder::{decode, Decoded, Decoder, Stage};
pub use error::{Error, Result};
pub use format::MusicFormat;
pub use keystream::KeyStream;
pub use metadata::{Artist, Metadata};
