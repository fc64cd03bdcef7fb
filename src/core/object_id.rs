//! 商品标识符
//!
//! 标识符由存储层在创建时生成，对外表现为 24 位十六进制字符串：
//! - 4 字节：Unix 秒级时间戳（大端）
//! - 5 字节：进程级随机值
//! - 3 字节：自增计数器（大端，随机起点）

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use uuid::Uuid;

/// 标识符的字符串长度
pub const OBJECT_ID_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00ff_ffff;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// 生成新的标识符
    pub fn new() -> Self {
        let seconds = chrono::Utc::now().timestamp() as u32;
        let process = PROCESS_UNIQUE.get_or_init(|| {
            let mut bytes = [0u8; 5];
            bytes.copy_from_slice(&Uuid::new_v4().as_bytes()[..5]);
            bytes
        });
        let counter = COUNTER
            .get_or_init(|| {
                let seed = *Uuid::new_v4().as_bytes();
                AtomicU32::new(u32::from_be_bytes([0, seed[0], seed[1], seed[2]]))
            })
            .fetch_add(1, Ordering::Relaxed)
            & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// 解析外部标识符
    ///
    /// 只接受恰好 24 个 ASCII 十六进制字符（大小写均可），其余形式一律返回 `None`。
    /// 解析结果统一为小写形式。
    pub fn parse(input: &str) -> Option<Self> {
        let raw = input.as_bytes();
        if raw.len() != OBJECT_ID_LEN {
            return None;
        }

        let mut bytes = [0u8; 12];
        for (i, pair) in raw.chunks_exact(2).enumerate() {
            bytes[i] = (hex_value(pair[0])? << 4) | hex_value(pair[1])?;
        }
        Some(Self(bytes))
    }

    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_some()
    }

    /// 生成时刻（秒）
    pub fn timestamp(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// 标识符格式错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("无效的标识符: {0}")]
pub struct InvalidObjectId(pub String);

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidObjectId(s.to_string()))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
