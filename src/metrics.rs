//! 性能指标收集模块
//!
//! 提供求解请求运行时指标的收集和导出功能

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 求解统计
    solve_stats: SolveStats,
    /// 启动时间
    start_time: Instant,
}

/// 求解统计
#[derive(Debug)]
struct SolveStats {
    /// 总求解数
    total_solves: AtomicU64,
    /// 成功求解数
    success_solves: AtomicU64,
    /// 失败求解数（解析错误或无路径）
    failed_solves: AtomicU64,
    /// 求解总耗时（微秒）
    total_duration_us: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_solves: u64,
    pub success_solves: u64,
    pub failed_solves: u64,
    pub avg_solve_duration_ms: f64,
    pub uptime_seconds: u64,
}

/// Prometheus 格式指标
#[derive(Debug, Clone)]
pub struct PrometheusMetrics {
    pub content: String,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            solve_stats: SolveStats {
                total_solves: AtomicU64::new(0),
                success_solves: AtomicU64::new(0),
                failed_solves: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录求解开始
    pub fn record_solve_start(&self) -> SolveTimer {
        self.solve_stats.total_solves.fetch_add(1, Ordering::Relaxed);
        SolveTimer::new()
    }

    /// 记录求解完成
    pub fn record_solve_complete(&self, timer: SolveTimer, success: bool) {
        let duration = timer.elapsed();

        if success {
            self.solve_stats
                .success_solves
                .fetch_add(1, Ordering::Relaxed);
        } else {
            self.solve_stats
                .failed_solves
                .fetch_add(1, Ordering::Relaxed);
        }

        self.solve_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_solves = self.solve_stats.total_solves.load(Ordering::Relaxed);
        let success_solves = self.solve_stats.success_solves.load(Ordering::Relaxed);
        let failed_solves = self.solve_stats.failed_solves.load(Ordering::Relaxed);
        let total_duration_us = self.solve_stats.total_duration_us.load(Ordering::Relaxed);

        let avg_solve_duration_ms = if total_solves > 0 {
            (total_duration_us as f64) / (total_solves as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_solves,
            success_solves,
            failed_solves,
            avg_solve_duration_ms,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 导出为 Prometheus 格式
    pub fn to_prometheus(&self) -> PrometheusMetrics {
        let snapshot = self.snapshot();

        let mut content = String::new();

        content.push_str("# HELP antfarm_solves_total Total number of solve requests\n");
        content.push_str("# TYPE antfarm_solves_total counter\n");
        content.push_str(&format!("antfarm_solves_total {}\n", snapshot.total_solves));

        content.push_str("# HELP antfarm_solves_success_total Number of successful solves\n");
        content.push_str("# TYPE antfarm_solves_success_total counter\n");
        content.push_str(&format!(
            "antfarm_solves_success_total {}\n",
            snapshot.success_solves
        ));

        content.push_str("# HELP antfarm_solves_failed_total Number of failed solves\n");
        content.push_str("# TYPE antfarm_solves_failed_total counter\n");
        content.push_str(&format!(
            "antfarm_solves_failed_total {}\n",
            snapshot.failed_solves
        ));

        content.push_str("# HELP antfarm_solve_duration_avg_ms Average solve duration in milliseconds\n");
        content.push_str("# TYPE antfarm_solve_duration_avg_ms gauge\n");
        content.push_str(&format!(
            "antfarm_solve_duration_avg_ms {:.2}\n",
            snapshot.avg_solve_duration_ms
        ));

        content.push_str("# HELP antfarm_uptime_seconds System uptime in seconds\n");
        content.push_str("# TYPE antfarm_uptime_seconds counter\n");
        content.push_str(&format!(
            "antfarm_uptime_seconds {}\n",
            snapshot.uptime_seconds
        ));

        PrometheusMetrics { content }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.solve_stats.total_solves.store(0, Ordering::Relaxed);
        self.solve_stats.success_solves.store(0, Ordering::Relaxed);
        self.solve_stats.failed_solves.store(0, Ordering::Relaxed);
        self.solve_stats.total_duration_us.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 求解计时器
pub struct SolveTimer {
    start: Instant,
}

impl SolveTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_solve_start();
        std::thread::sleep(Duration::from_millis(10));
        metrics.record_solve_complete(timer, true);

        let timer = metrics.record_solve_start();
        metrics.record_solve_complete(timer, false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_solves, 2);
        assert_eq!(snapshot.success_solves, 1);
        assert_eq!(snapshot.failed_solves, 1);
        assert!(snapshot.avg_solve_duration_ms >= 5.0);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = Metrics::new();
        let timer = metrics.record_solve_start();
        metrics.record_solve_complete(timer, true);

        let prom = metrics.to_prometheus();
        assert!(prom.content.contains("antfarm_solves_total 1"));
        assert!(prom.content.contains("antfarm_solves_success_total 1"));
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = Metrics::new();
        let timer = metrics.record_solve_start();
        metrics.record_solve_complete(timer, true);

        metrics.reset();
        assert_eq!(metrics.snapshot().total_solves, 0);
    }
}
