//! antfarm - 蚂蚁农场路径调度引擎
//!
//! 求解经典"蚂蚁农场"问题，支持：
//! - 节点拆分最大流抽取房间不相交路径（Edmonds–Karp）
//! - (L−1) 闭式负载均衡与房间互斥约束下的回合制模拟
//! - `lem-in` 命令行与可视化 HTTP 接口

pub mod algorithm;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod parser;
pub mod scheduler;
pub mod server;

// 重导出常用类型
pub use algorithm::{disjoint_paths, EdmondsKarp, MaxFlow, Path, PathTracer, ResidualNetwork};
pub use error::{Error, Result};
pub use graph::{Graph, Room, RoomId};
pub use parser::{Farm, Parser};
pub use scheduler::{balance, format_turn, Balance, Move, Simulator, Turn};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
