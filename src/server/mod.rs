//! HTTP 服务器模块
//!
//! 为可视化前端提供 REST 接口：提交农场描述，返回房间布局、
//! 通道、不相交路径与逐回合移动数据。
//! 移动数据与 CLI 使用同一套 (L−1) 均衡调度器，保证两端结果一致。

use crate::algorithm::disjoint_paths;
use crate::error::{Error, Result};
use crate::metrics;
use crate::parser::Parser;
use crate::scheduler::{format_turn, Simulator, Turn};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9090,
        }
    }
}

/// 启动服务器
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let app = Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 指标和统计
        .route("/metrics", get(metrics_handler))
        .route("/stats", get(stats_handler))
        // 农场求解
        .route("/solve", post(solve_farm));

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("蚂蚁农场可视化服务器启动于 http://{}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Server(format!("绑定地址失败: {}", e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(format!("服务器错误: {}", e)))?;

    Ok(())
}

// ==================== 处理器 ====================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus 格式指标
async fn metrics_handler() -> Response {
    use axum::body::Body;

    let metrics = metrics::global_metrics();
    let prom = metrics.to_prometheus();

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain; version=0.0.4")
        .body(Body::from(prom.content))
        .unwrap()
        .into_response()
}

/// 求解统计信息
async fn stats_handler() -> impl IntoResponse {
    let metrics = metrics::global_metrics();
    let snapshot = metrics.snapshot();

    Json(serde_json::json!({
        "solve": {
            "total": snapshot.total_solves,
            "success": snapshot.success_solves,
            "failed": snapshot.failed_solves,
            "avg_duration_ms": snapshot.avg_solve_duration_ms,
        },
        "system": {
            "uptime_seconds": snapshot.uptime_seconds,
            "version": env!("CARGO_PKG_VERSION"),
        }
    }))
}

/// 求解请求
#[derive(Debug, Deserialize)]
pub struct SolveRequest {
    /// 农场描述文本（与 CLI 输入格式一致）
    pub input: String,
}

/// 房间渲染信息
#[derive(Debug, Serialize)]
pub struct RoomInfo {
    pub name: String,
    pub x: i32,
    pub y: i32,
    /// "start" / "end" / "room"
    pub kind: &'static str,
}

/// 通道（无向，仅输出名字升序的一侧）
#[derive(Debug, Serialize)]
pub struct TunnelInfo {
    pub from: String,
    pub to: String,
}

/// 求解响应
#[derive(Debug, Serialize)]
pub struct SolveResponse {
    pub ants: u32,
    pub rooms: Vec<RoomInfo>,
    pub tunnels: Vec<TunnelInfo>,
    /// 排序后的路径（房间名序列），与 movements 的 pathIndex 对应
    pub paths: Vec<Vec<String>>,
    /// 逐回合移动记录
    pub movements: Vec<Turn>,
    /// 渲染好的移动行（与 CLI 输出一致）
    pub moves: Vec<String>,
    pub turns: usize,
}

/// 农场求解
async fn solve_farm(Json(req): Json<SolveRequest>) -> Response {
    let metrics = metrics::global_metrics();
    let timer = metrics.record_solve_start();

    match solve_input(&req.input) {
        Ok(resp) => {
            metrics.record_solve_complete(timer, true);
            (StatusCode::OK, Json(ApiResponse::success(resp))).into_response()
        }
        Err(e) => {
            metrics.record_solve_complete(timer, false);
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(&e.to_string())),
            )
                .into_response()
        }
    }
}

/// 解析并求解一份农场描述
fn solve_input(input: &str) -> Result<SolveResponse> {
    let farm = Parser::new().parse_str(input)?;

    let paths = disjoint_paths(&farm.graph, 0);
    if paths.is_empty() {
        return Err(Error::NoPath);
    }

    let simulator = Simulator::new(&farm.graph, paths);
    let movements = simulator.run(farm.ants);

    let graph = &farm.graph;
    let start = graph.start();
    let end = graph.end();

    let rooms = graph
        .iter()
        .map(|(id, room)| RoomInfo {
            name: room.name().to_string(),
            x: room.x(),
            y: room.y(),
            kind: if Some(id) == start {
                "start"
            } else if Some(id) == end {
                "end"
            } else {
                "room"
            },
        })
        .collect();

    let mut tunnels = Vec::new();
    for (_, room) in graph.iter() {
        for &nb in room.links() {
            let other = graph.room(nb);
            if room.name() < other.name() {
                tunnels.push(TunnelInfo {
                    from: room.name().to_string(),
                    to: other.name().to_string(),
                });
            }
        }
    }

    let path_names = simulator
        .paths()
        .iter()
        .map(|p| {
            p.rooms
                .iter()
                .map(|&rid| graph.room(rid).name().to_string())
                .collect()
        })
        .collect();

    let moves = movements.iter().map(format_turn).collect();
    let turns = movements.len();

    Ok(SolveResponse {
        ants: farm.ants,
        rooms,
        tunnels,
        paths: path_names,
        movements,
        moves,
        turns,
    })
}

/// API 响应封套
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(msg: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_input() {
        let resp = solve_input(
            "4\n##start\nstart 0 0\n##end\nend 2 0\na 1 1\nb 1 -1\nstart-a\nstart-b\na-end\nb-end\na-b\n",
        )
        .unwrap();

        assert_eq!(resp.ants, 4);
        assert_eq!(resp.rooms.len(), 4);
        assert_eq!(resp.tunnels.len(), 5);
        assert_eq!(resp.paths.len(), 2);
        assert_eq!(resp.turns, 3);
        assert_eq!(resp.moves.len(), resp.movements.len());

        let start_rooms: Vec<&RoomInfo> =
            resp.rooms.iter().filter(|r| r.kind == "start").collect();
        assert_eq!(start_rooms.len(), 1);
        assert_eq!(start_rooms[0].name, "start");
    }

    #[test]
    fn test_solve_input_no_path() {
        let err = solve_input("1\n##start\nstart 0 0\n##end\nend 2 0\na 1 0\nstart-a\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERROR: invalid data format, no path found"
        );
    }

    #[test]
    fn test_solve_input_parse_error() {
        let err = solve_input("0\n").unwrap_err();
        assert!(err.to_string().starts_with("ERROR: invalid data format"));
    }
}
