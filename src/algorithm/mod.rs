//! 图算法模块
//!
//! 不相交路径抽取流水线：残量网络构建 → Edmonds–Karp 最大流 → 路径重建

mod max_flow;
mod path_tracing;
mod residual;

pub use max_flow::{EdmondsKarp, MaxFlow};
pub use path_tracing::{disjoint_paths, Path, PathTracer};
pub use residual::ResidualNetwork;
