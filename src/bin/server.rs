//! 蚂蚁农场可视化服务器入口
//!
//! 启动 HTTP API 服务器

use antfarm::server::{start_server, ServerConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "antfarm-server")]
#[command(about = "蚂蚁农场可视化 HTTP 服务器")]
struct Args {
    /// 监听地址
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// 监听端口
    #[arg(short, long, default_value = "9090")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };

    start_server(config).await?;

    Ok(())
}
