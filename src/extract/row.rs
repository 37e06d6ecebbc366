//! 行提取
//!
//! 把一行数据变成一条题目草稿。这里是各类兜底规则的汇合点：
//! 题干缺失时的序号救援、知识点拼接、多来源选项提取、答案规范化。
//! 每一步都是兜底级联而不是严格流水线，提取不出题干才放弃整行。

use regex::Regex;
use tracing::debug;

use crate::extract::columns::ColumnRoleMap;
use crate::extract::options::{self, is_purely_numeric};
use crate::extract::content::clean_content;
use crate::grid::{Cell, Grid};
use crate::models::question::DraftQuestion;

/// 规范化答案格式
///
/// 纯 A-D 字母的答案转大写；混有其他文字时提取第一段连续的
/// A-D 字母（如 "应该选B" → "B"）；完全没有字母的开放式答案
/// 原样保留。
pub fn normalize_answer(raw: &str) -> String {
    let answer = raw.trim();
    if answer.is_empty() {
        return String::new();
    }

    if let Ok(re) = Regex::new(r"^[A-Da-d]+$") {
        if re.is_match(answer) {
            return answer.to_uppercase();
        }
    }
    if let Ok(re) = Regex::new(r"[A-Da-d]+") {
        if let Some(m) = re.find(answer) {
            return m.as_str().to_uppercase();
        }
    }
    answer.to_string()
}

/// 从一行数据中提取题目草稿
///
/// `row_number` 为数据行号（从 1 开始），用于无序号时合成默认题干。
/// 返回 `None` 表示该行应跳过（空行或无法得到任何题干）。
pub fn extract(row: &[Cell], map: &ColumnRoleMap, row_number: usize) -> Option<DraftQuestion> {
    // 空行或只有一个空单元格：数据结束或空白分隔行
    if row.is_empty() || (row.len() == 1 && row[0].is_empty()) {
        debug!("跳过第 {} 行: 空行", row_number);
        return None;
    }

    // 题目列索引本行可被序号救援临时覆盖，角色映射本身不变
    let mut question_col = map.question;
    let mut content = Grid::cell_text(row, question_col);

    let serial = Grid::cell_text(row, map.serial);

    // 序号救援：有序号列但题干为空或也是数字时，题干可能在别的列。
    // 扫描未被其他角色占用的列，找第一个足够长的非数字单元格
    if (content.is_empty() || is_purely_numeric(&content))
        && map.serial.is_some()
        && is_purely_numeric(&serial)
    {
        for (j, cell) in row.iter().enumerate() {
            if Some(j) == map.serial || map.is_claimed(j) {
                continue;
            }
            let candidate = cell.to_trimmed_string();
            if candidate.chars().count() > 5 && !is_purely_numeric(&candidate) {
                debug!("序号救援: 第 {} 行的题干在第 {} 列", row_number, j);
                content = candidate;
                question_col = Some(j);
                break;
            }
        }
    }

    // 仍然没有题干，用序号合成一个标识
    if content.is_empty() && !serial.is_empty() {
        content = format!("题目 {}", serial);
    }
    if content.is_empty() {
        debug!("跳过第 {} 行: 题目内容为空", row_number);
        return None;
    }

    let category = Grid::cell_text(row, map.category);

    // 知识点拼接到题干尾部，分类兜底时还会用到这个标注
    let knowledge = Grid::cell_text(row, map.knowledge);
    if !knowledge.is_empty() && content != knowledge {
        content = format!("{}\n\n知识点: {}", content, knowledge);
    }

    // 选项提取优先级：独立选项列 > 组合选项列 > 题干内嵌
    let mut opts = if map.has_discrete_options() {
        options::extract_from_discrete_columns(row, map)
    } else if map.options.is_some() {
        options::extract_from_options_cell(&Grid::cell_text(row, map.options))
    } else {
        options::extract_from_content(&content)
    };

    // 最后手段：题目列右侧的相邻列也可能是选项
    if opts.is_empty() {
        if let Some(q) = question_col {
            if q + 1 < row.len() {
                let neighbor = Grid::cell_text(row, Some(q + 1));
                if !neighbor.is_empty() {
                    opts = options::extract_from_options_cell(&neighbor);
                }
            }
        }
    }

    // 选项分离后清理题干（clean_content 自带安全回退）
    content = clean_content(&content, &opts);

    let mut answer = Grid::cell_text(row, map.answer);
    if !answer.is_empty() {
        answer = normalize_answer(&answer);
    }

    let explanation = Grid::cell_text(row, map.explanation);

    // 题干仍是空的或纯数字但选项存在：合成默认题干
    if (content.is_empty() || is_purely_numeric(&content)) && !opts.is_empty() {
        let label = if serial.is_empty() {
            row_number.to_string()
        } else {
            serial.clone()
        };
        content = format!("题目 {}", label);
    }

    Some(DraftQuestion {
        content,
        options: opts,
        answer,
        explanation,
        category,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::columns;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|s| {
                if s.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(s.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("b"), "B");
        assert_eq!(normalize_answer("ABD"), "ABD");
        assert_eq!(normalize_answer("应该选B"), "B");
        assert_eq!(normalize_answer("答案是 AC ，理由略"), "AC");
        assert_eq!(normalize_answer("开放式答案"), "开放式答案");
        assert_eq!(normalize_answer("  "), "");
    }

    #[test]
    fn test_basic_row() {
        let map = columns::detect(&header(&["题干", "选项", "答案", "解析", "分类"]));
        let q = extract(
            &row(&[
                "下列哪种数据结构先进先出？",
                "A. 栈 B. 队列 C. 树 D. 图",
                "b",
                "队列是FIFO结构",
                "数据结构",
            ]),
            &map,
            1,
        )
        .unwrap();
        assert_eq!(q.content, "下列哪种数据结构先进先出？");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.options[1], "B. 队列");
        assert_eq!(q.answer, "B");
        assert_eq!(q.explanation, "队列是FIFO结构");
        assert_eq!(q.category, "数据结构");
    }

    #[test]
    fn test_empty_row_skipped() {
        let map = columns::detect(&header(&["题干", "答案"]));
        assert!(extract(&[], &map, 1).is_none());
        assert!(extract(&[Cell::Empty], &map, 2).is_none());
    }

    #[test]
    fn test_options_embedded_in_content() {
        // 没有选项列，选项混在题干里，应提取并清理题干
        let map = columns::detect(&header(&["题干", "答案"]));
        let q = extract(
            &row(&["2+2等于多少呢？A. 3 B. 4 C. 5 D. 6", "B"]),
            &map,
            1,
        )
        .unwrap();
        assert_eq!(q.options.len(), 4);
        assert!(q.content.contains("2+2"));
        assert!(!q.content.contains("A. 3"));
        assert_eq!(q.answer, "B");
    }

    #[test]
    fn test_cleaning_recovery_keeps_original() {
        // 题干几乎全是选项，清理会导致过短，必须保留原文
        let map = columns::detect(&header(&["题干", "答案"]));
        let content = "嗯A. 3 B. 4";
        let q = extract(&row(&[content, "B"]), &map, 1).unwrap();
        assert_eq!(q.content, content);
    }

    #[test]
    fn test_serial_rescue_scan() {
        // 题干列里是数字，真正的题干在未被任何角色占用的列里
        let map = columns::detect(&header(&[
            "序号", "题干", "选项", "答案", "解析", "附注",
        ]));
        let q = extract(
            &row(&["3", "12", "", "B", "", "下列说法哪一项是正确的呢？"]),
            &map,
            3,
        )
        .unwrap();
        assert_eq!(q.content, "下列说法哪一项是正确的呢？");
        assert_eq!(q.answer, "B");
    }

    #[test]
    fn test_serial_as_title_synthesis() {
        let map = columns::detect(&header(&["序号", "题目", "答案"]));
        let q = extract(&row(&["7", "", "B"]), &map, 7).unwrap();
        assert_eq!(q.content, "题目 7");
    }

    #[test]
    fn test_knowledge_point_appended() {
        let map = columns::detect(&header(&["题干", "知识点", "答案"]));
        let q = extract(&row(&["栈的特点是什么？", "线性表", "后进先出"]), &map, 1).unwrap();
        assert!(q.content.contains("栈的特点是什么？"));
        assert!(q.content.contains("知识点: 线性表"));
    }

    #[test]
    fn test_discrete_columns_priority() {
        // 独立选项列与组合选项列同时存在时，独立列优先
        let map = columns::detect(&header(&["题干", "选项", "A", "B", "C", "D", "答案"]));
        let q = extract(
            &row(&[
                "先进先出的是？",
                "A. 错误来源 B. 不该用我",
                "栈",
                "队列",
                "树",
                "图",
                "B",
            ]),
            &map,
            1,
        )
        .unwrap();
        assert_eq!(q.options[0], "A. 栈");
        assert_eq!(q.options[1], "B. 队列");
    }

    #[test]
    fn test_neighbor_column_last_resort() {
        // 没识别出选项列，选项在题目列右侧的未知列里
        let map = columns::detect(&header(&["题干", "乱七八糟", "正确答案"]));
        let q = extract(
            &row(&["先进先出的是哪一种？", "A. 栈 B. 队列", "B"]),
            &map,
            1,
        )
        .unwrap();
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.answer, "B");
    }

    #[test]
    fn test_row_shorter_than_header() {
        // 行比标题行短：越界一律按空处理，不报错
        let map = columns::detect(&header(&["题干", "选项", "答案", "解析"]));
        let q = extract(&row(&["只有题干的一行数据"]), &map, 1).unwrap();
        assert_eq!(q.content, "只有题干的一行数据");
        assert!(q.options.is_empty());
        assert!(q.answer.is_empty());
    }
}
