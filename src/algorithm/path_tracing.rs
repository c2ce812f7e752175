//! 路径重建
//!
//! 把最终流量分解为有序房间序列，每条路径对应一个流量单位。
//! 追踪沿 in/out 节点交替推进：进入 r_in 时记录房间，
//! 先消耗 r_in→r_out 的房间容量边，再消耗 r_out→w_in 的原图边。

use super::max_flow::EdmondsKarp;
use super::residual::ResidualNetwork;
use crate::graph::{Graph, RoomId};
use serde::{Deserialize, Serialize};

/// 一条 start→end 路径
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    /// 路径上的房间序列（含起点与终点）
    pub rooms: Vec<RoomId>,
    /// 路径长度（边数 = 房间数 − 1）
    pub length: usize,
}

/// 路径重建器
pub struct PathTracer {
    net: ResidualNetwork,
}

impl PathTracer {
    /// 接管带最终流量的残量网络
    pub fn new(net: ResidualNetwork) -> Self {
        Self { net }
    }

    /// 依次消耗源点的出流，重建全部不相交路径
    ///
    /// 流量为零时返回空表。max_paths > 0 时最多重建该条数。
    pub fn trace_all(mut self, max_paths: u32) -> Vec<Path> {
        let source = self.net.source;
        let sink = self.net.sink;
        let start = self.net.room_of(source);
        let end = self.net.room_of(sink);

        let mut paths = Vec::new();
        loop {
            // 源点无剩余出流即重建完毕
            let Some(mut cur) = self.net.consume(source) else {
                break;
            };

            let mut rooms: Vec<RoomId> = vec![start];
            let mut complete = true;
            // cur 此刻位于某个 v_in
            while cur != sink {
                let rid = self.net.room_of(cur);
                if rid != end {
                    rooms.push(rid);
                }
                // v_in → v_out（房间容量边）
                match self.net.consume(cur) {
                    Some(next) => cur = next,
                    None => {
                        complete = false;
                        break;
                    }
                }
                // v_out → w_in（原图边）
                match self.net.consume(cur) {
                    Some(next) => cur = next,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }

            // 流量不一致时放弃本条（合法输入下不可达）
            if !complete {
                continue;
            }

            rooms.push(end);
            let length = rooms.len() - 1;
            paths.push(Path { rooms, length });

            if max_paths > 0 && paths.len() as u32 >= max_paths {
                break;
            }
        }
        paths
    }
}

/// 计算最大的一组两两房间不相交的 start→end 路径
///
/// 残量网络构建 → 最大流 → 流量分解的完整流水线。
/// max_paths > 0 时最多返回该条数；无路可走时返回空表。
pub fn disjoint_paths(graph: &Graph, max_paths: u32) -> Vec<Path> {
    let Some(net) = ResidualNetwork::build(graph) else {
        return Vec::new();
    };
    let mut solver = EdmondsKarp::new(net);
    if solver.run(max_paths).value == 0 {
        return Vec::new();
    }
    PathTracer::new(solver.into_network()).trace_all(max_paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use std::collections::HashSet;

    fn farm_graph(input: &str) -> Graph {
        Parser::new().parse_str(input).unwrap().graph
    }

    fn names(graph: &Graph, path: &Path) -> Vec<String> {
        path.rooms
            .iter()
            .map(|&id| graph.room(id).name().to_string())
            .collect()
    }

    #[test]
    fn test_trace_two_routes() {
        let graph = farm_graph(
            "4\n##start\nstart 0 0\n##end\nend 2 0\na 1 1\nb 1 -1\nstart-a\nstart-b\na-end\nb-end\na-b\n",
        );
        let paths = disjoint_paths(&graph, 0);

        assert_eq!(paths.len(), 2);
        // 字典序决定重建顺序：先经 a，后经 b；横边 a-b 不被使用
        assert_eq!(names(&graph, &paths[0]), vec!["start", "a", "end"]);
        assert_eq!(names(&graph, &paths[1]), vec!["start", "b", "end"]);
        assert_eq!(paths[0].length, 2);
    }

    #[test]
    fn test_trace_direct_route() {
        let graph = farm_graph("1\n##start\nstart 0 0\n##end\nend 1 0\nstart-end\n");
        let paths = disjoint_paths(&graph, 0);

        assert_eq!(paths.len(), 1);
        assert_eq!(names(&graph, &paths[0]), vec!["start", "end"]);
        assert_eq!(paths[0].length, 1);
    }

    #[test]
    fn test_no_route_empty() {
        let graph = farm_graph("1\n##start\nstart 0 0\n##end\nend 2 0\na 1 0\nstart-a\n");
        assert!(disjoint_paths(&graph, 0).is_empty());
    }

    #[test]
    fn test_vertex_and_edge_disjointness() {
        // 多条交叉路线的中型农场
        let graph = farm_graph(
            "10\n##start\nstart 0 0\n##end\nend 5 0\na1 1 1\na2 2 1\nb1 1 0\nb2 2 0\nb3 3 0\nc1 1 -1\nc2 2 -1\nc3 3 -1\nc4 4 -1\nstart-a1\na1-a2\na2-end\nstart-b1\nb1-b2\nb2-b3\nb3-end\nstart-c1\nc1-c2\nc2-c3\nc3-c4\nc4-end\na1-b2\nb1-c2\na2-b3\n",
        );
        let paths = disjoint_paths(&graph, 0);
        assert_eq!(paths.len(), 3);

        let start = graph.start().unwrap();
        let end = graph.end().unwrap();

        // 点不相交：中间房间不得复用
        let mut seen_rooms = HashSet::new();
        for p in &paths {
            for &rid in &p.rooms {
                if rid != start && rid != end {
                    assert!(seen_rooms.insert(rid), "房间被两条路径共用");
                }
            }
        }

        // 边不相交：无向边不得复用
        let mut seen_edges = HashSet::new();
        for p in &paths {
            for pair in p.rooms.windows(2) {
                let key = if pair[0] < pair[1] {
                    (pair[0], pair[1])
                } else {
                    (pair[1], pair[0])
                };
                assert!(seen_edges.insert(key), "边被两条路径共用");
            }
        }
    }

    #[test]
    fn test_maximality_matches_flow() {
        let inputs = [
            "1\n##start\nstart 0 0\n##end\nend 1 0\nstart-end\n",
            "4\n##start\nstart 0 0\n##end\nend 2 0\na 1 1\nb 1 -1\nstart-a\nstart-b\na-end\nb-end\na-b\n",
            "2\n##start\nstart 0 0\n##end\nend 4 0\na 1 1\nb 1 -1\nc 2 0\nd 3 1\ne 3 -1\nstart-a\nstart-b\na-c\nb-c\nc-d\nc-e\nd-end\ne-end\n",
        ];
        for input in inputs {
            let graph = farm_graph(input);
            // 独立重算一遍最大流作为对照
            let net = ResidualNetwork::build(&graph).unwrap();
            let flow = EdmondsKarp::new(net).run(0).value;
            assert_eq!(disjoint_paths(&graph, 0).len() as u32, flow);
        }
    }

    #[test]
    fn test_paths_start_and_end_correct() {
        let graph = farm_graph(
            "10\n##start\nstart 0 0\n##end\nend 3 0\na1 1 1\na2 2 1\nb1 1 -1\nb2 2 -1\nstart-a1\na1-a2\na2-end\nstart-b1\nb1-b2\nb2-end\n",
        );
        let start = graph.start().unwrap();
        let end = graph.end().unwrap();
        for p in disjoint_paths(&graph, 0) {
            assert_eq!(p.rooms.first(), Some(&start));
            assert_eq!(p.rooms.last(), Some(&end));
            assert_eq!(p.length, p.rooms.len() - 1);
        }
    }
}
