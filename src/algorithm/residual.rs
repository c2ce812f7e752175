//! 残量网络构建
//!
//! 节点拆分变换：每个房间 r 拆成 r_in、r_out 两个节点，
//! 房间容量编码为 r_in→r_out 的边容量。中间房间容量 1，
//! 起点/终点用哨兵 INF；每条无向连接贡献两条容量 1 的有向半边。

use crate::graph::{Graph, RoomId};

/// 起点/终点房间容量的哨兵值（大于任何可能的最大流）
pub(crate) const INF_CAPACITY: i64 = 1_000_000;

/// 半边（正向/反向成对存储，rev 指回配对半边在对端邻接表中的下标）
#[derive(Debug, Clone)]
pub(crate) struct HalfEdge {
    /// 目标节点
    pub to: usize,
    /// 配对反向半边下标
    pub rev: usize,
    /// 容量
    pub cap: i64,
    /// 当前流量
    pub flow: i64,
}

/// 节点拆分残量网络
///
/// 节点编号：房间按名字典序获得 0..N−1 的序号 i，
/// r_in = 2·i，r_out = 2·i + 1。源点 = start_out，汇点 = end_in。
#[derive(Debug)]
pub struct ResidualNetwork {
    /// 邻接表（每个节点的半边列表）
    pub(crate) adj: Vec<Vec<HalfEdge>>,
    /// 字典序房间表（节点 / 2 即此表下标）
    order: Vec<RoomId>,
    /// 每个节点按目标房间名排序的出半边下标（路径重建的遍历顺序）
    sorted_outs: Vec<Vec<usize>>,
    /// 源点（start_out）
    pub(crate) source: usize,
    /// 汇点（end_in）
    pub(crate) sink: usize,
}

fn in_node(i: usize) -> usize {
    2 * i
}

fn out_node(i: usize) -> usize {
    2 * i + 1
}

fn add_edge(adj: &mut [Vec<HalfEdge>], u: usize, v: usize, cap: i64) {
    let rev = adj[v].len();
    adj[u].push(HalfEdge {
        to: v,
        rev,
        cap,
        flow: 0,
    });
    let rev = adj[u].len() - 1;
    adj[v].push(HalfEdge {
        to: u,
        rev,
        cap: 0,
        flow: 0,
    });
}

impl ResidualNetwork {
    /// 由已验证的图构建残量网络；缺少起点/终点时返回 None
    pub fn build(graph: &Graph) -> Option<Self> {
        let start = graph.start()?;
        let end = graph.end()?;
        if graph.room_count() == 0 {
            return None;
        }

        // 名字典序决定节点编号，保证整条流水线的确定性
        let order = graph.sorted_room_ids();
        let mut index_of = vec![0usize; graph.room_count()];
        for (i, rid) in order.iter().enumerate() {
            index_of[rid.index()] = i;
        }
        let n = order.len();
        let mut adj: Vec<Vec<HalfEdge>> = vec![Vec::new(); 2 * n];

        // 房间容量边
        for (i, &rid) in order.iter().enumerate() {
            let cap = if rid == start || rid == end {
                INF_CAPACITY
            } else {
                1
            };
            add_edge(&mut adj, in_node(i), out_node(i), cap);
        }

        // 原图连接：u_out → v_in 与 v_out → u_in，容量均为 1。
        // 边容量为 1 同时保证边不相交，杜绝重复的直连路径。
        for (i, &rid) in order.iter().enumerate() {
            let mut nbs: Vec<RoomId> = graph.room(rid).links().to_vec();
            nbs.sort_by(|a, b| graph.room(*a).name().cmp(graph.room(*b).name()));
            for nb in nbs {
                add_edge(&mut adj, out_node(i), in_node(index_of[nb.index()]), 1);
            }
        }

        // 出边按目标房间名排序（同名按半边下标），供 consume 使用
        let mut sorted_outs: Vec<Vec<usize>> = Vec::with_capacity(adj.len());
        for halves in &adj {
            let mut outs: Vec<usize> = (0..halves.len()).collect();
            outs.sort_by(|&a, &b| {
                let na = graph.room(order[halves[a].to / 2]).name();
                let nb = graph.room(order[halves[b].to / 2]).name();
                na.cmp(nb).then(a.cmp(&b))
            });
            sorted_outs.push(outs);
        }

        let source = out_node(index_of[start.index()]);
        let sink = in_node(index_of[end.index()]);

        Some(Self {
            adj,
            order,
            sorted_outs,
            source,
            sink,
        })
    }

    /// 节点对应的房间 ID
    pub(crate) fn room_of(&self, node: usize) -> RoomId {
        self.order[node / 2]
    }

    /// 节点总数（2·房间数）
    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// 按遍历顺序找到第一条仍带正流量的出半边，消耗一个单位并返回目标节点
    pub(crate) fn consume(&mut self, u: usize) -> Option<usize> {
        for k in 0..self.sorted_outs[u].len() {
            let ei = self.sorted_outs[u][k];
            if self.adj[u][ei].flow > 0 {
                let (to, rev) = (self.adj[u][ei].to, self.adj[u][ei].rev);
                self.adj[u][ei].flow -= 1;
                self.adj[to][rev].flow += 1;
                return Some(to);
            }
        }
        None
    }
}
