//! 选项提取
//!
//! 三个入口对应三种选项来源：组合选项单元格、A-D 独立选项列、
//! 以及选项混在题干文本中的布局。所有入口都输出 `"A. 内容"` 格式的
//! 有序选项列表，提取失败返回空列表（合法的终态，不是错误）。

use regex::Regex;
use tracing::debug;

use crate::extract::columns::ColumnRoleMap;
use crate::grid::{Cell, Grid};

/// 按字母标记切分文本
///
/// 找出所有标记（如 `A.`、`B：`）的位置，取相邻标记之间的文本作为
/// 选项内容。正则库不支持前瞻，用位置切片实现同样的边界语义。
fn segments_after_markers(text: &str, marker_pattern: &str) -> Vec<(char, String)> {
    let re = match Regex::new(marker_pattern) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let marks: Vec<(usize, usize, char)> = re
        .find_iter(text)
        .filter_map(|m| {
            m.as_str()
                .trim_start()
                .chars()
                .next()
                .map(|c| (m.start(), m.end(), c))
        })
        .collect();

    let mut segments = Vec::new();
    for (i, (_, end, letter)) in marks.iter().enumerate() {
        let until = marks.get(i + 1).map(|n| n.0).unwrap_or(text.len());
        let body = text[*end..until].trim();
        if !body.is_empty() {
            segments.push((*letter, body.to_string()));
        }
    }
    segments
}

/// 某一行是否以字母标记开头
fn starts_with_marker(line: &str) -> bool {
    if let Ok(re) = Regex::new(r"^[A-D][.。：:\s]") {
        re.is_match(line)
    } else {
        false
    }
}

/// 给无标记的段落合成 A-D 标记（取前四段）
fn synthesize_markers(segments: &[&str]) -> Vec<String> {
    let labels = ['A', 'B', 'C', 'D'];
    segments
        .iter()
        .take(4)
        .enumerate()
        .map(|(idx, seg)| format!("{}. {}", labels[idx], seg))
        .collect()
}

/// 从组合选项单元格中解析选项
///
/// 按顺序尝试各策略，直到某一策略产出至少一个选项：
/// 1. `A. xxx B. xxx` 式的字母标记段落
/// 2. 换行分割（无标记且 ≥4 段时合成 A-D 标记）
/// 3. 分号分割（同上）
/// 4. `A:内容` 并排格式
/// 5. 宽松扫描任意字母前缀的文本块
pub fn extract_from_options_cell(options_text: &str) -> Vec<String> {
    if options_text.trim().is_empty() {
        return Vec::new();
    }

    // 策略 1: A.B.C.D. 标记段落
    let segments = segments_after_markers(options_text, r"[A-D][.。：:\s]");
    if !segments.is_empty() {
        return segments
            .into_iter()
            .map(|(letter, body)| format!("{}. {}", letter, body))
            .collect();
    }

    // 策略 2: 按换行符分割
    if options_text.contains('\n') {
        let lines: Vec<&str> = options_text
            .split('\n')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.iter().any(|l| starts_with_marker(l)) {
            return lines.iter().map(|l| l.to_string()).collect();
        }
        if lines.len() >= 4 {
            debug!("选项无标记，按换行分割并合成A.B.C.D.标记");
            return synthesize_markers(&lines);
        }
    }

    // 策略 3: 按分号分割
    if options_text.contains(';') || options_text.contains('；') {
        let parts: Vec<&str> = options_text
            .split(|c| c == ';' || c == '；')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.iter().any(|p| starts_with_marker(p)) {
            return parts.iter().map(|p| p.to_string()).collect();
        }
        if parts.len() >= 4 {
            debug!("选项无标记，按分号分割并合成A.B.C.D.标记");
            return synthesize_markers(&parts);
        }
    }

    // 策略 4: 选项并排格式，如 "A:选项1 B:选项2"
    if let Ok(re) = Regex::new(r"[A-D][.:：]\s*[^A-D.:：]+") {
        let options: Vec<String> = re
            .find_iter(options_text)
            .filter_map(|m| {
                let matched = m.as_str();
                let letter = matched.chars().next()?;
                let body = matched[letter.len_utf8()..]
                    .trim_start_matches(|c: char| ".:：".contains(c) || c.is_whitespace())
                    .trim();
                if body.is_empty() {
                    None
                } else {
                    Some(format!("{}. {}", letter, body))
                }
            })
            .collect();
        if !options.is_empty() {
            return options;
        }
    }

    // 策略 5: 宽松匹配所有以 A-D 开头的文本块
    let loose = segments_after_markers(options_text, r"(?:^|\s)[A-D][)）.:：、\s]");
    loose
        .into_iter()
        .map(|(letter, body)| {
            let body = body
                .trim_start_matches(|c: char| ")）.:：、".contains(c) || c.is_whitespace());
            format!("{}. {}", letter, body)
        })
        .collect()
}

/// 从 A-D 独立选项列中读取选项
///
/// 固定按 A、B、C、D 顺序输出；空单元格和内容恰好等于其字母标签的
/// 噪声单元格跳过。三种列布局按 "选项X" > 裸字母列 > 独立检测结果
/// 的顺序选用。
pub fn extract_from_discrete_columns(row: &[Cell], map: &ColumnRoleMap) -> Vec<String> {
    let mut options = Vec::new();

    if !map.labeled_options.is_empty() {
        // "选项A" 格式的列
        let mut cols = map.labeled_options.clone();
        cols.sort_by_key(|(letter, _)| *letter);
        for (letter, idx) in cols {
            let text = Grid::cell_text(row, Some(idx));
            if !text.is_empty() && text != letter.to_string() {
                options.push(format!("{}. {}", letter, text));
            }
        }
    } else if !map.letter_options.is_empty() {
        // 裸字母命名的列，单元格内容可能自带标记，去掉后再统一格式化
        let mut cols = map.letter_options.clone();
        cols.sort_by_key(|(letter, _)| *letter);
        for (letter, idx) in cols {
            let text = Grid::cell_text(row, Some(idx));
            if text.is_empty() || text == letter.to_string() {
                continue;
            }
            let body = if let Ok(re) = Regex::new(r"^[A-D][.。：:\s]*") {
                re.replace(&text, "").to_string()
            } else {
                text
            };
            if !body.is_empty() {
                options.push(format!("{}. {}", letter, body));
            }
        }
    } else {
        let labels = ['A', 'B', 'C', 'D'];
        for (slot, label) in labels.iter().enumerate() {
            let text = Grid::cell_text(row, map.option_letters[slot]);
            if !text.is_empty() && text != label.to_string() {
                options.push(format!("{}. {}", label, text));
            }
        }
    }

    options
}

/// 从题干文本中提取内嵌的选项
///
/// 只在表格完全没有选项列时使用。先用严格模式（字母 + 分隔符），
/// 一个都提不出来时再用宽松模式（字母 + 空格）。
pub fn extract_from_content(content: &str) -> Vec<String> {
    // 严格模式: "A. 选项内容"（正文可以是 "3" 这样的单字符数值选项）
    let strict = segments_after_markers(content, r"[A-D][.。）:：]\s*");
    let options: Vec<String> = strict
        .into_iter()
        .map(|(letter, body)| format!("{}. {}", letter, body))
        .collect();
    if !options.is_empty() {
        return options;
    }

    // 宽松模式: "A 选项内容 B 选项内容"
    let loose = segments_after_markers(content, r"(?:^|\s)[A-D]\s+");
    loose
        .into_iter()
        .filter(|(_, body)| body.chars().count() > 1)
        .map(|(letter, body)| format!("{}. {}", letter, body))
        .collect()
}

/// 字符串是否为纯数字
pub(crate) fn is_purely_numeric(s: &str) -> bool {
    let trimmed = s.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}
