//! 题目提取引擎
//!
//! 核心职责：从结构未知的表格中重建出结构化的题目。
//!
//! 处理顺序：
//! 1. `columns` - 对标题行做一次列角色识别
//! 2. `row` - 逐行提取题目草稿（内部调用 `options` 和 `content`）
//! 3. 草稿列表交给补全流程（`workflow::enrichment`）
//!
//! 表格之外还支持最简单的行式纯文本格式（`textfile`）。

pub mod columns;
pub mod content;
pub mod options;
pub mod row;
pub mod textfile;

use tracing::{debug, info};

use crate::grid::Grid;
use crate::models::question::DraftQuestion;
use crate::utils::logging::truncate_text;

pub use columns::{detect, ColumnRoleMap};

/// 从表格中解析全部题目
///
/// 标题行只检测一次，之后逐行提取；提取不出的行跳过。
/// 返回空列表表示表格里没有可识别的题目（由调用方决定是否致命）。
pub fn parse_questions_from_grid(grid: &Grid) -> Vec<DraftQuestion> {
    let map = columns::detect(&grid.header);

    let mut questions = Vec::new();
    for (i, data_row) in grid.rows.iter().enumerate() {
        let row_number = i + 1;
        if let Some(question) = row::extract(data_row, &map, row_number) {
            debug!(
                "第 {} 行: 题干=\"{}\", 选项数={}, 答案=\"{}\"",
                row_number,
                truncate_text(&question.content, 30),
                question.options.len(),
                question.answer
            );
            questions.push(question);
        }
    }

    info!("从表格中提取出 {} 个问题", questions.len());
    questions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn grid(header: &[&str], rows: &[&[&str]]) -> Grid {
        Grid {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| {
                    r.iter()
                        .map(|s| {
                            if s.is_empty() {
                                Cell::Empty
                            } else {
                                Cell::Text(s.to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        }
    }

    #[test]
    fn test_parse_full_grid() {
        let g = grid(
            &["序号", "题干", "选项", "答案", "解析"],
            &[
                &[
                    "1",
                    "先进先出的数据结构是？",
                    "A. 栈 B. 队列 C. 树 D. 图",
                    "B",
                    "队列是FIFO",
                ],
                &["", ""],
                &["2", "后进先出的数据结构是？", "A. 栈 B. 队列", "A", ""],
            ],
        );
        let questions = parse_questions_from_grid(&g);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].answer, "B");
        assert_eq!(questions[1].answer, "A");
        assert_eq!(questions[1].options.len(), 2);
    }

    #[test]
    fn test_parse_grid_without_recognizable_rows() {
        let g = grid(&["题干", "答案"], &[&["", ""], &["", ""]]);
        assert!(parse_questions_from_grid(&g).is_empty());
    }
}
