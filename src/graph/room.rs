//! 房间定义
//!
//! 房间在解析阶段创建，图构建完成后不再修改。
//! 邻居列表存房间 ID 而非引用，避免所有权环。

use serde::{Deserialize, Serialize};

/// 房间 ID（竞技场下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl RoomId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for RoomId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// 房间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// 房间名（全局唯一）
    name: String,
    /// X 坐标（仅供可视化使用）
    x: i32,
    /// Y 坐标（仅供可视化使用）
    y: i32,
    /// 邻居房间 ID 列表
    links: Vec<RoomId>,
}

impl Room {
    /// 创建新房间
    pub(crate) fn new(name: String, x: i32, y: i32) -> Self {
        Self {
            name,
            x,
            y,
            links: Vec::new(),
        }
    }

    /// 获取房间名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 获取 X 坐标
    pub fn x(&self) -> i32 {
        self.x
    }

    /// 获取 Y 坐标
    pub fn y(&self) -> i32 {
        self.y
    }

    /// 获取邻居列表
    pub fn links(&self) -> &[RoomId] {
        &self.links
    }

    /// 记录一条邻居连接（由 Graph::add_link 维护对称性）
    pub(crate) fn push_link(&mut self, id: RoomId) {
        self.links.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_basic() {
        let mut room = Room::new("hall".to_string(), 3, -1);

        assert_eq!(room.name(), "hall");
        assert_eq!(room.x(), 3);
        assert_eq!(room.y(), -1);
        assert!(room.links().is_empty());

        room.push_link(RoomId::new(2));
        assert_eq!(room.links(), &[RoomId::new(2)]);
    }

    #[test]
    fn test_room_id_index() {
        let id = RoomId::from(7u32);
        assert_eq!(id.index(), 7);
        assert_eq!(RoomId::new(7), id);
    }
}
