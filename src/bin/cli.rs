//! lem-in 命令行入口
//!
//! 读取农场描述文件，按要求先回显输入，再逐回合打印蚂蚁移动。
//! 所有错误打印后以退出码 0 结束。

use antfarm::algorithm::disjoint_paths;
use antfarm::error::Error;
use antfarm::parser::Parser;
use antfarm::scheduler::{format_turn, Simulator};
use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[command(name = "lem-in")]
#[command(about = "蚂蚁农场路径调度器")]
struct Args {
    /// 农场描述文件
    input: String,
}

fn main() {
    let args = Args::parse();

    let farm = match Parser::new().parse_file(&args.input) {
        Ok(farm) => farm,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    // 回显输入，空一行后输出移动
    for line in &farm.original_lines {
        println!("{}", line);
    }
    println!();

    let paths = disjoint_paths(&farm.graph, 0);
    if paths.is_empty() {
        println!("{}", Error::NoPath);
        return;
    }

    let simulator = Simulator::new(&farm.graph, paths);
    for turn in simulator.run(farm.ants) {
        println!("{}", format_turn(&turn));
    }
}
