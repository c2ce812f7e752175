//! 回合模拟器
//!
//! 在房间互斥约束下逐回合推进蚂蚁。每回合三个阶段：
//! 先推进在途蚂蚁（每条路径内从后往前），再按路径序派出新蚂蚁，
//! 最后收集本回合的移动列表。

use super::balancer::{balance, Balance};
use crate::algorithm::Path;
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// 单步移动（可视化端按 antId/room/pathIndex 消费）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// 蚂蚁编号（1..=N）
    #[serde(rename = "antId")]
    pub ant: u32,
    /// 到达的房间名
    pub room: String,
    /// 所在路径下标（排序后的路径表）
    #[serde(rename = "pathIndex")]
    pub path: usize,
}

/// 一个回合内按序发生的移动
pub type Turn = Vec<Move>;

/// 在途蚂蚁状态
#[derive(Debug, Clone, Copy)]
struct AntState {
    /// 路径下标
    path: usize,
    /// 路径内位置（0 = 起点，L = 终点）
    pos: usize,
}

/// 回合模拟器
pub struct Simulator<'a> {
    graph: &'a Graph,
    paths: Vec<Path>,
}

impl<'a> Simulator<'a> {
    /// 创建模拟器；路径按长度升序稳定排序
    pub fn new(graph: &'a Graph, mut paths: Vec<Path>) -> Self {
        paths.sort_by_key(|p| p.length);
        Self { graph, paths }
    }

    /// 排序后的路径表（与 Move::path 下标对应）
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// 模拟全部蚂蚁从起点到终点的移动，返回逐回合移动列表
    pub fn run(&self, ants: u32) -> Vec<Turn> {
        if ants == 0 || self.paths.is_empty() {
            return Vec::new();
        }
        let (start, end) = match (self.graph.start(), self.graph.end()) {
            (Some(s), Some(e)) => (s, e),
            _ => return Vec::new(),
        };

        let lengths: Vec<usize> = self.paths.iter().map(|p| p.length).collect();
        let Balance { counts, .. } = balance(&lengths, ants);

        // 等待队列：编号 1..=N 按路径序填充
        let mut wait_queues: Vec<VecDeque<u32>> = counts.iter().map(|_| VecDeque::new()).collect();
        let mut next_id = 1u32;
        for (queue, &count) in wait_queues.iter_mut().zip(&counts) {
            for _ in 0..count {
                queue.push_back(next_id);
                next_id += 1;
            }
        }

        // 占用表：房间 ID 下标，0 表示空闲（蚂蚁编号从 1 起）
        let mut occupied: Vec<u32> = vec![0; self.graph.room_count()];
        let mut in_flight: HashMap<u32, AntState> = HashMap::new();
        let mut finished = 0u32;
        let mut turns: Vec<Turn> = Vec::new();

        while finished < ants {
            let mut moves: Turn = Vec::new();

            // 阶段 1：推进在途蚂蚁。
            // 从后往前的顺序是关键：前一只蚂蚁当回合腾出的房间
            // 立刻可供紧随其后的蚂蚁使用，且不会出现越位。
            for (pi, p) in self.paths.iter().enumerate() {
                let mut at_pos: HashMap<usize, u32> = HashMap::new();
                for (&id, st) in &in_flight {
                    if st.path == pi && st.pos > 0 {
                        at_pos.insert(st.pos, id);
                    }
                }
                for pos in (1..p.length).rev() {
                    let Some(&ant) = at_pos.get(&pos) else {
                        continue;
                    };
                    let cur = p.rooms[pos];
                    let next = p.rooms[pos + 1];
                    if next != end && occupied[next.index()] != 0 {
                        continue;
                    }
                    if cur != start && cur != end {
                        occupied[cur.index()] = 0;
                    }
                    if next != start && next != end {
                        occupied[next.index()] = ant;
                    }
                    moves.push(Move {
                        ant,
                        room: self.graph.room(next).name().to_string(),
                        path: pi,
                    });
                    if next == end {
                        finished += 1;
                        in_flight.remove(&ant);
                    } else if let Some(st) = in_flight.get_mut(&ant) {
                        st.pos += 1;
                    }
                }
            }

            // 阶段 2：派出新蚂蚁（每条路径每回合至多一只）
            for (pi, p) in self.paths.iter().enumerate() {
                let Some(&ant) = wait_queues[pi].front() else {
                    continue;
                };
                // 直连路径 start→end：一回合完成
                if p.length == 1 {
                    wait_queues[pi].pop_front();
                    moves.push(Move {
                        ant,
                        room: self.graph.room(end).name().to_string(),
                        path: pi,
                    });
                    finished += 1;
                    continue;
                }
                let first = p.rooms[1];
                if first == end || occupied[first.index()] == 0 {
                    wait_queues[pi].pop_front();
                    if first == end {
                        finished += 1;
                    } else {
                        in_flight.insert(ant, AntState { path: pi, pos: 1 });
                        if first != start {
                            occupied[first.index()] = ant;
                        }
                    }
                    moves.push(Move {
                        ant,
                        room: self.graph.room(first).name().to_string(),
                        path: pi,
                    });
                }
            }

            // 阶段 3：收集本回合。无人能动时终止，避免死循环
            if moves.is_empty() {
                break;
            }
            turns.push(moves);
        }

        turns
    }
}

/// 把一回合的移动渲染成一行 `L<id>-<room>` 记号（空格分隔，无行尾空格）
pub fn format_turn(turn: &Turn) -> String {
    turn.iter()
        .map(|m| format!("L{}-{}", m.ant, m.room))
        .collect::<Vec<_>>()
        .join(" ")
}
