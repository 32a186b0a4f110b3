//! 元数据块解码
//!
//! `L2 | meta`：逐字节 XOR 0x63 → 去掉 `163 key(Don't modify):` →
//! base64 → AES-128-ECB (`META_KEY`) → 去掉 `music:` → JSON。
//!
//! `L2 == 0` 表示文件不带元数据。

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::cipher;
use crate::container::{META_JSON_TAG, META_KEY, META_MASK, META_TAG};
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::format::MusicFormat;

/// 艺术家（名字 + 平台 ID）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Artist {
    pub name: String,
    pub id: String,
}

/// 曲目元数据
///
/// `musicName`、`artist`、`album` 是必需字段（`artist`/`album` 可为 `null`）；
/// `format` 缺省按 MP3 处理。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, deserialize_with = "id_string")]
    pub music_id: String,
    pub music_name: String,
    #[serde(rename = "artist", deserialize_with = "artists")]
    pub artists: Vec<Artist>,
    #[serde(deserialize_with = "null_default")]
    pub album: String,
    #[serde(default, deserialize_with = "id_string")]
    pub album_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub album_pic: String,
    #[serde(default, deserialize_with = "null_default")]
    pub bitrate: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub duration: u64,
    #[serde(default, deserialize_with = "id_string")]
    pub mv_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub alias: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub trans_names: Vec<String>,
    #[serde(default, deserialize_with = "format_name")]
    pub format: MusicFormat,
}

impl Metadata {
    /// 艺术家名，以 `, ` 连接
    #[must_use]
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|artist| artist.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// 从 JSON 文本解析（不含 `music:` 前缀）
    ///
    /// # Errors
    /// JSON 非法、不是对象或缺少必需字段时返回 `BadMetadata`。
    pub fn from_json(json: &[u8]) -> Result<Self> {
        serde_json::from_slice(json).map_err(|err| {
            tracing::debug!(%err, "metadata json rejected");
            Error::BadMetadata
        })
    }
}

/// 读取元数据块，`L2 == 0` 时返回 `None`
///
/// # Errors
/// 长度不足返回 `UnexpectedEof`，其余见 [`decode_metadata`]。
pub fn read_metadata(cursor: &mut Cursor<'_>) -> Result<Option<Metadata>> {
    let raw = cursor.read_block()?;
    if raw.is_empty() {
        return Ok(None);
    }
    decode_metadata(raw).map(Some)
}

/// 解码元数据块（不含长度字段）
///
/// # Errors
/// - `BadLength`: 块短于 ASCII 前缀
/// - `BadBase64`: base64 非法
/// - `BadAes`: 密文未对齐或填充非法
/// - `BadMetadata`: 明文不是合法记录
pub fn decode_metadata(raw: &[u8]) -> Result<Metadata> {
    if raw.len() < META_TAG.len() {
        return Err(Error::BadLength);
    }
    let encoded: Vec<u8> = raw[META_TAG.len()..]
        .iter()
        .map(|b| b ^ META_MASK)
        .collect();
    let encrypted = STANDARD.decode(&encoded).map_err(|_| Error::BadBase64)?;
    let plain = cipher::decrypt_ecb(META_KEY, &encrypted)?;
    let json = plain.get(META_JSON_TAG.len()..).ok_or(Error::BadMetadata)?;
    Metadata::from_json(json)
}

fn null_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn id_string<'de, D>(d: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(d)?))
}

fn artists<'de, D>(d: D) -> std::result::Result<Vec<Artist>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = Option::<Vec<(String, Value)>>::deserialize(d)?.unwrap_or_default();
    Ok(list
        .into_iter()
        .map(|(name, id)| Artist {
            name,
            id: value_to_string(id),
        })
        .collect())
}

fn format_name<'de, D>(d: D) -> std::result::Result<MusicFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(d)?;
    Ok(name.map_or_else(MusicFormat::default, |name| MusicFormat::from_name(&name)))
}
