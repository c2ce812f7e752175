//! 错误类型定义
//!
//! 解析与求解错误的完整分类。Display 字符串就是 CLI 的输出契约：
//! 所有数据格式错误以 `ERROR: invalid data format` 开头。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("ERROR: invalid data format")]
    InvalidAnts,

    #[error("ERROR: invalid data format, invalid room")]
    InvalidRoom,

    #[error("ERROR: invalid data format, duplicate room")]
    DuplicateRoom,

    #[error("ERROR: invalid data format, invalid link")]
    InvalidLink,

    #[error("ERROR: invalid data format, missing start")]
    MissingStart,

    #[error("ERROR: invalid data format, missing end")]
    MissingEnd,

    #[error("ERROR: invalid data format, multiple start")]
    MultipleStart,

    #[error("ERROR: invalid data format, multiple end")]
    MultipleEnd,

    #[error("ERROR: invalid data format, empty line")]
    EmptyLine,

    #[error("ERROR: invalid data format, unrecognized line")]
    UnrecognizedLine,

    #[error("ERROR: invalid data format, no path found")]
    NoPath,

    #[error("服务器错误: {0}")]
    Server(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
