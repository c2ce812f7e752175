//! 农场图数据结构
//!
//! 房间以竞技场（Vec）方式存储，名字索引与起点/终点标记放在旁边。
//! 不变式：start ≠ end；连接对称；无重复连接；无自环。

use super::room::{Room, RoomId};
use crate::error::{Error, Result};
use std::collections::HashMap;

/// 农场图
#[derive(Debug, Default)]
pub struct Graph {
    /// 房间竞技场（RoomId 即下标）
    rooms: Vec<Room>,
    /// 房间名 -> ID 索引
    name_index: HashMap<String, RoomId>,
    /// 起点房间
    start: Option<RoomId>,
    /// 终点房间
    end: Option<RoomId>,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 房间操作 ====================

    /// 添加房间；重名返回 DuplicateRoom
    pub fn add_room(&mut self, name: &str, x: i32, y: i32) -> Result<RoomId> {
        if self.name_index.contains_key(name) {
            return Err(Error::DuplicateRoom);
        }
        let id = RoomId::new(self.rooms.len() as u32);
        self.rooms.push(Room::new(name.to_string(), x, y));
        self.name_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// 添加无向连接；端点未知、自环或重复均返回 InvalidLink
    pub fn add_link(&mut self, a: &str, b: &str) -> Result<()> {
        let (ra, rb) = match (self.room_id(a), self.room_id(b)) {
            (Some(ra), Some(rb)) => (ra, rb),
            _ => return Err(Error::InvalidLink),
        };
        if ra == rb {
            return Err(Error::InvalidLink);
        }
        if self.rooms[ra.index()].links().contains(&rb) {
            return Err(Error::InvalidLink);
        }
        self.rooms[ra.index()].push_link(rb);
        self.rooms[rb.index()].push_link(ra);
        Ok(())
    }

    /// 标记起点；重复标记返回 MultipleStart
    pub fn mark_start(&mut self, id: RoomId) -> Result<()> {
        if self.start.is_some() {
            return Err(Error::MultipleStart);
        }
        self.start = Some(id);
        Ok(())
    }

    /// 标记终点；重复标记返回 MultipleEnd
    pub fn mark_end(&mut self, id: RoomId) -> Result<()> {
        if self.end.is_some() {
            return Err(Error::MultipleEnd);
        }
        self.end = Some(id);
        Ok(())
    }

    // ==================== 查询 ====================

    /// 获取起点
    pub fn start(&self) -> Option<RoomId> {
        self.start
    }

    /// 获取终点
    pub fn end(&self) -> Option<RoomId> {
        self.end
    }

    /// 按 ID 取房间（ID 由本图发出，恒有效）
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    /// 按名字查房间 ID
    pub fn room_id(&self, name: &str) -> Option<RoomId> {
        self.name_index.get(name).copied()
    }

    /// 房间数量
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// 按声明顺序遍历全部房间
    pub fn iter(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(i, r)| (RoomId::new(i as u32), r))
    }

    /// 按房间名字典序返回全部房间 ID
    ///
    /// 该顺序决定残量网络的节点编号，是结果确定性的根基。
    pub fn sorted_room_ids(&self) -> Vec<RoomId> {
        let mut ids: Vec<RoomId> = (0..self.rooms.len() as u32).map(RoomId::new).collect();
        ids.sort_by(|a, b| self.rooms[a.index()].name().cmp(self.rooms[b.index()].name()));
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_graph() -> Graph {
        let mut graph = Graph::new();
        let s = graph.add_room("start", 0, 0).unwrap();
        graph.add_room("a", 1, 0).unwrap();
        let e = graph.add_room("end", 2, 0).unwrap();
        graph.mark_start(s).unwrap();
        graph.mark_end(e).unwrap();
        graph
    }

    #[test]
    fn test_graph_basic() {
        let mut graph = create_test_graph();

        assert_eq!(graph.room_count(), 3);
        assert_eq!(graph.room_id("a"), Some(RoomId::new(1)));

        graph.add_link("start", "a").unwrap();
        graph.add_link("a", "end").unwrap();

        // 连接是对称的
        let a = graph.room_id("a").unwrap();
        let s = graph.room_id("start").unwrap();
        assert!(graph.room(s).links().contains(&a));
        assert!(graph.room(a).links().contains(&s));
        assert_eq!(graph.room(a).links().len(), 2);
    }

    #[test]
    fn test_duplicate_room() {
        let mut graph = create_test_graph();
        assert!(matches!(
            graph.add_room("a", 5, 5),
            Err(Error::DuplicateRoom)
        ));
    }

    #[test]
    fn test_link_validation() {
        let mut graph = create_test_graph();

        // 未知端点
        assert!(matches!(
            graph.add_link("start", "nowhere"),
            Err(Error::InvalidLink)
        ));
        // 自环
        assert!(matches!(graph.add_link("a", "a"), Err(Error::InvalidLink)));
        // 重复连接（两个方向都算）
        graph.add_link("start", "a").unwrap();
        assert!(matches!(
            graph.add_link("start", "a"),
            Err(Error::InvalidLink)
        ));
        assert!(matches!(
            graph.add_link("a", "start"),
            Err(Error::InvalidLink)
        ));
    }

    #[test]
    fn test_mark_start_end_once() {
        let mut graph = create_test_graph();
        let a = graph.room_id("a").unwrap();

        assert!(matches!(graph.mark_start(a), Err(Error::MultipleStart)));
        assert!(matches!(graph.mark_end(a), Err(Error::MultipleEnd)));
    }

    #[test]
    fn test_sorted_room_ids() {
        let graph = create_test_graph();
        let names: Vec<&str> = graph
            .sorted_room_ids()
            .into_iter()
            .map(|id| graph.room(id).name())
            .collect();
        assert_eq!(names, vec!["a", "end", "start"]);
    }
}
