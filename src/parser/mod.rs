//! 输入解析器
//!
//! 基于正则的文本格式解析：第一个非注释行是蚂蚁数，随后是房间声明
//! （`##start`/`##end` 标记作用于下一个房间行），自第一条连接行起只接受
//! 连接。所有注释行原样保留用于回显；任何空行都是错误。

use crate::error::{Error, Result};
use crate::graph::Graph;
use regex::Regex;

/// 解析产出：蚂蚁数 + 农场图 + 回显行
#[derive(Debug)]
pub struct Farm {
    /// 蚂蚁数量（> 0）
    pub ants: u32,
    /// 农场图
    pub graph: Graph,
    /// 原始输入行（按要求在输出移动前回显）
    pub original_lines: Vec<String>,
}

/// 解析阶段：蚂蚁数 -> 房间 -> 连接
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Ants,
    Rooms,
    Links,
}

/// 待生效的房间标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Start,
    End,
}

/// 农场描述解析器
pub struct Parser {
    /// 房间行：`<name> <x> <y>`，名字不以 `#`/`L` 开头且不含空白
    room_re: Regex,
    /// 连接行：`<a>-<b>`
    link_re: Regex,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            room_re: Regex::new(r"^([^\s#L][^\s]*)\s+(-?\d+)\s+(-?\d+)$").unwrap(),
            link_re: Regex::new(r"^([^\s#L][^\s]*)-([^\s#L][^\s]*)$").unwrap(),
        }
    }

    /// 从文件解析
    pub fn parse_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<Farm> {
        let text = std::fs::read_to_string(path)?;
        self.parse_str(&text)
    }

    /// 从字符串解析
    pub fn parse_str(&self, input: &str) -> Result<Farm> {
        let mut graph = Graph::new();
        let mut ants: u32 = 0;
        let mut lines: Vec<String> = Vec::new();
        let mut phase = Phase::Ants;
        let mut pending: Option<Marker> = None;
        let mut start_marked = false;
        let mut end_marked = false;

        for line in input.lines() {
            if line.is_empty() {
                return Err(Error::EmptyLine);
            }

            // 注释与指令：`##start`/`##end` 记为待生效标记，其余注释仅回显
            if line.starts_with('#') {
                match line {
                    "##start" => {
                        if start_marked {
                            return Err(Error::MultipleStart);
                        }
                        start_marked = true;
                        pending = Some(Marker::Start);
                    }
                    "##end" => {
                        if end_marked {
                            return Err(Error::MultipleEnd);
                        }
                        end_marked = true;
                        pending = Some(Marker::End);
                    }
                    _ => {}
                }
                lines.push(line.to_string());
                continue;
            }

            if phase == Phase::Ants {
                let n: u32 = line.parse().map_err(|_| Error::InvalidAnts)?;
                if n == 0 {
                    return Err(Error::InvalidAnts);
                }
                ants = n;
                lines.push(line.to_string());
                phase = Phase::Rooms;
                continue;
            }

            if phase == Phase::Rooms {
                if let Some(caps) = self.room_re.captures(line) {
                    let x: i32 = caps[2].parse().map_err(|_| Error::InvalidRoom)?;
                    let y: i32 = caps[3].parse().map_err(|_| Error::InvalidRoom)?;
                    let id = graph.add_room(&caps[1], x, y)?;
                    match pending.take() {
                        Some(Marker::Start) => graph.mark_start(id)?,
                        Some(Marker::End) => graph.mark_end(id)?,
                        None => {}
                    }
                    lines.push(line.to_string());
                    continue;
                }
            }

            // 第一条连接行触发阶段转换，此时起点/终点必须已就位
            if let Some(caps) = self.link_re.captures(line) {
                if graph.start().is_none() {
                    return Err(Error::MissingStart);
                }
                if graph.end().is_none() {
                    return Err(Error::MissingEnd);
                }
                phase = Phase::Links;
                graph.add_link(&caps[1], &caps[2])?;
                lines.push(line.to_string());
                continue;
            }

            return Err(Error::UnrecognizedLine);
        }

        if ants == 0 {
            return Err(Error::InvalidAnts);
        }
        if graph.start().is_none() {
            return Err(Error::MissingStart);
        }
        if graph.end().is_none() {
            return Err(Error::MissingEnd);
        }

        Ok(Farm {
            ants,
            graph,
            original_lines: lines,
        })
    }
}
