//! 列角色识别
//!
//! 给定标题行，推断每一列的语义角色（题干/选项/答案/解析/分类/知识点/序号，
//! 以及可选的 A-D 独立选项列）。真实题库表格的列名五花八门，缺列是常态，
//! 因此每个角色按固定优先级逐层匹配：
//!
//! 1. 精确匹配规范列名（如题干列的 "题干"，答案列的 "答案"/"正确答案"）
//! 2. 包含最具体的规范词
//! 3. 关键词正则（含英文同义词）
//! 4. 角色特定的位置兜底
//!
//! 本模块永不失败：识别不出的角色记为缺失，由行提取阶段继续兜底。

use phf::phf_set;
use regex::Regex;
use tracing::{debug, warn};

/// 精确匹配的答案列名
static ANSWER_EXACT: phf::Set<&'static str> = phf_set! {
    "答案", "正确答案", "参考答案",
};

/// 精确匹配的题目列名（"题干" 单独处理，优先级更高）
static QUESTION_EXACT: phf::Set<&'static str> = phf_set! {
    "问题", "题目", "试题", "题",
};

/// 列角色映射
///
/// 由标题行一次性构建，处理单个表格期间不可变。
/// 所有索引要么有效（小于标题行长度），要么缺失。
#[derive(Debug, Clone, Default)]
pub struct ColumnRoleMap {
    pub serial: Option<usize>,
    pub question: Option<usize>,
    pub knowledge: Option<usize>,
    pub options: Option<usize>,
    pub answer: Option<usize>,
    pub explanation: Option<usize>,
    pub category: Option<usize>,
    /// A-D 独立选项列（全部找到时激活独立选项列模式）
    pub option_letters: [Option<usize>; 4],
    /// "选项A"/"选择A" 格式的选项列
    pub labeled_options: Vec<(char, usize)>,
    /// 以裸字母（可带后缀说明）命名的选项列，如 "A"、"A (正确答案)"
    pub letter_options: Vec<(char, usize)>,
}

impl ColumnRoleMap {
    /// 四个独立选项列是否全部找到
    pub fn has_discrete_options(&self) -> bool {
        self.option_letters.iter().all(Option::is_some)
    }

    /// 某列是否已被其他角色占用（序号/知识点/选项/答案/解析列）
    ///
    /// 行提取阶段扫描候选题干列时需要排除这些列
    pub fn is_claimed(&self, idx: usize) -> bool {
        [
            self.serial,
            self.knowledge,
            self.options,
            self.answer,
            self.explanation,
        ]
        .iter()
        .any(|c| *c == Some(idx))
    }
}

/// 识别标题行中每一列的角色
///
/// 空标题行返回全缺失的映射，不会报错
pub fn detect(header: &[String]) -> ColumnRoleMap {
    let mut map = ColumnRoleMap::default();

    // 序号列先行识别，题干列的兜底规则依赖它
    map.serial = detect_serial(header);
    map.question = detect_question(header, map.serial);
    map.knowledge = find_by_keyword(header, r"知识点|knowledge|要点|知识|points");
    map.options = detect_options(header);
    detect_discrete_options(header, &mut map);
    map.answer = detect_answer(header, map.question, map.options);
    map.explanation = detect_explanation(header, map.question, map.answer);
    map.category = find_by_keyword_sensitive(header, r"分类|类别|章节");

    if map.options.is_some() && map.has_discrete_options() {
        // 组合选项列与独立选项列同时存在的冲突表格：按独立列优先处理，
        // 但这种数据值得人工确认，记录警告
        warn!(
            "⚠️ 同时检测到选项列 {:?} 和独立的A/B/C/D选项列，将优先使用独立选项列",
            map.options
        );
    }

    debug!(
        "列检测完成: 序号={:?} 题目={:?} 选项={:?} 答案={:?} 解析={:?} 知识点={:?} 分类={:?} 独立选项={}",
        map.serial,
        map.question,
        map.options,
        map.answer,
        map.explanation,
        map.knowledge,
        map.category,
        map.has_discrete_options()
    );

    map
}

// ========== 通用匹配策略 ==========

/// 在标题行中查找第一个匹配正则的列（不区分大小写）
fn find_by_keyword(header: &[String], pattern: &str) -> Option<usize> {
    let full = format!("(?i){}", pattern);
    if let Ok(re) = Regex::new(&full) {
        header.iter().position(|col| re.is_match(col))
    } else {
        None
    }
}

/// 区分大小写的关键词查找
fn find_by_keyword_sensitive(header: &[String], pattern: &str) -> Option<usize> {
    if let Ok(re) = Regex::new(pattern) {
        header.iter().position(|col| re.is_match(col))
    } else {
        None
    }
}

/// 查找与集合中任一名称精确相等的列
fn find_by_exact(header: &[String], names: &phf::Set<&'static str>) -> Option<usize> {
    header.iter().position(|col| names.contains(col.as_str()))
}

// ========== 各角色的识别级联 ==========

fn detect_serial(header: &[String]) -> Option<usize> {
    find_by_keyword_sensitive(header, r"^序号$|^编号$|^[Nn][Oo]\.?$|^[Ii][Dd]$|^#$")
}

fn detect_question(header: &[String], serial: Option<usize>) -> Option<usize> {
    // 策略 1: "题干" 精确或包含
    if let Some(idx) = header.iter().position(|col| col == "题干") {
        return Some(idx);
    }
    if let Some(idx) = header.iter().position(|col| col.contains("题干")) {
        return Some(idx);
    }
    // 策略 2: 常见题目列名精确匹配
    if let Some(idx) = find_by_exact(header, &QUESTION_EXACT) {
        return Some(idx);
    }
    // 策略 3: 关键词匹配
    if let Some(idx) = find_by_keyword(header, r"问题|题目|内容|试题|题干|question|content") {
        return Some(idx);
    }
    // 策略 4: 位置兜底。有序号列时取其后一列，否则取第一列
    if header.is_empty() {
        return None;
    }
    match serial {
        Some(s) if s + 1 < header.len() => Some(s + 1),
        Some(_) if header.len() > 1 => Some(1),
        Some(_) => Some(0),
        None => Some(0),
    }
}

fn detect_options(header: &[String]) -> Option<usize> {
    // 精确匹配优先，失败后用宽松关键词
    if let Some(idx) = find_by_keyword(header, r"^选项$|^options$") {
        return Some(idx);
    }
    find_by_keyword(header, r"选项|option|备选|答案选项|choices")
}

/// 识别 A-D 独立选项列及两类变体布局
fn detect_discrete_options(header: &[String], map: &mut ColumnRoleMap) {
    let letters = ['A', 'B', 'C', 'D'];

    // 每个字母独立检测：^A$ / ^选项A$ / ^A选项$（大小写均可）
    for (slot, letter) in letters.iter().enumerate() {
        let lower = letter.to_ascii_lowercase();
        let pattern = format!(
            "^[{}{}]$|^选项[{}{}]$|^[{}{}]选项$",
            letter, lower, letter, lower, letter, lower
        );
        if let Ok(re) = Regex::new(&pattern) {
            map.option_letters[slot] = header.iter().position(|col| re.is_match(col));
        }
    }

    // "选项A"/"选项 A"/"A选项"/"选择A" 布局
    if let Ok(re) = Regex::new(r"^选项([A-D])$|^选项 ([A-D])$|^([A-D])选项$|^选择([A-D])$") {
        for (idx, col) in header.iter().enumerate() {
            if let Some(caps) = re.captures(col) {
                let letter = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .next()
                    .and_then(|m| m.as_str().chars().next());
                if let Some(letter) = letter {
                    map.labeled_options.push((letter, idx));
                }
            }
        }
    }

    // 裸字母列布局，如 "A"、"B"、"A (正确答案)"
    if let Ok(re) = Regex::new(r"^[A-D](\s.*)?$") {
        for (idx, col) in header.iter().enumerate() {
            if re.is_match(col) {
                if let Some(letter) = col.chars().next() {
                    map.letter_options.push((letter, idx));
                }
            }
        }
    }
}

fn detect_answer(
    header: &[String],
    question: Option<usize>,
    options: Option<usize>,
) -> Option<usize> {
    // 策略 1: 精确匹配
    if let Some(idx) = find_by_exact(header, &ANSWER_EXACT) {
        return Some(idx);
    }
    // 策略 2: 关键词匹配（区分大小写的中文 + 宽松英文）
    if let Some(idx) = find_by_keyword_sensitive(header, r"答案|正确|correct|answer") {
        return Some(idx);
    }
    if let Some(idx) = header.iter().position(|col| {
        let lower = col.to_lowercase();
        lower.contains("answer") || lower.contains("correct")
    }) {
        return Some(idx);
    }
    // 策略 3: 从列名内容推断可能的答案列
    if let Some(idx) = header.iter().position(|col| {
        let lower = col.to_lowercase();
        lower.contains('答')
            || lower.contains('对')
            || lower.contains('正')
            || lower.contains('解')
            || lower == "key"
            || lower == "result"
    }) {
        return Some(idx);
    }
    // 策略 4: 位置兜底。答案列通常在选项列或题目列之后
    let potential = match (options, question) {
        (Some(o), _) => Some(o + 1),
        (None, Some(q)) => Some(q + 1),
        (None, None) => None,
    };
    match potential {
        Some(p) if p < header.len() => Some(p),
        _ if header.len() > 1 => Some(1),
        _ => None,
    }
}

fn detect_explanation(
    header: &[String],
    question: Option<usize>,
    answer: Option<usize>,
) -> Option<usize> {
    // 策略 1: 精确匹配
    if let Some(idx) = find_by_keyword(header, r"^解析$|^答案解析$|^explanation$|^解释$") {
        return Some(idx);
    }
    // 策略 2: 关键词匹配
    if let Some(idx) = find_by_keyword(
        header,
        r"解析|explanation|解释|分析|说明|讲解|detail|analyze|analysis",
    ) {
        return Some(idx);
    }
    if header.is_empty() {
        return None;
    }
    let last = header.len() - 1;
    // 策略 3: 位置兜底。解析列通常紧跟答案列
    if let Some(a) = answer {
        if a + 1 <= last {
            return Some(a + 1);
        }
    }
    // 或者是最后一列（需要在题目列和答案列之后）
    if let Some(q) = question {
        if last > q && answer.map_or(true, |a| last > a) {
            return Some(last);
        }
    }
    if let Some(a) = answer {
        return Some(std::cmp::min(a + 1, last));
    }
    // 默认第三列
    if header.len() > 2 {
        return Some(2);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_names_win() {
        let h = header(&["序号", "题干", "选项", "答案", "解析", "分类"]);
        let map = detect(&h);
        assert_eq!(map.serial, Some(0));
        assert_eq!(map.question, Some(1));
        assert_eq!(map.options, Some(2));
        assert_eq!(map.answer, Some(3));
        assert_eq!(map.explanation, Some(4));
        assert_eq!(map.category, Some(5));
    }

    #[test]
    fn test_english_synonyms() {
        let h = header(&["No.", "Question", "Options", "Answer", "Explanation"]);
        let map = detect(&h);
        assert_eq!(map.serial, Some(0));
        assert_eq!(map.question, Some(1));
        assert_eq!(map.options, Some(2));
        assert_eq!(map.answer, Some(3));
        assert_eq!(map.explanation, Some(4));
    }

    #[test]
    fn test_substring_question() {
        let h = header(&["编号", "题干内容", "正确答案"]);
        let map = detect(&h);
        assert_eq!(map.question, Some(1));
        assert_eq!(map.answer, Some(2));
    }

    #[test]
    fn test_unknown_header_falls_back_to_defaults() {
        // 完全陌生的列名：不报错，按位置兜底
        let h = header(&["甲", "乙", "丙"]);
        let map = detect(&h);
        assert_eq!(map.question, Some(0));
        assert_eq!(map.answer, Some(1));
        assert_eq!(map.explanation, Some(2));
    }

    #[test]
    fn test_empty_header_all_absent() {
        let map = detect(&[]);
        assert_eq!(map.question, None);
        assert_eq!(map.answer, None);
        assert_eq!(map.explanation, None);
        assert!(!map.has_discrete_options());
    }

    #[test]
    fn test_serial_shifts_question_fallback() {
        let h = header(&["序号", "乙", "丙"]);
        let map = detect(&h);
        assert_eq!(map.serial, Some(0));
        assert_eq!(map.question, Some(1));
    }

    #[test]
    fn test_discrete_option_columns() {
        let h = header(&["题目", "A", "B", "C", "D", "答案"]);
        let map = detect(&h);
        assert!(map.has_discrete_options());
        assert_eq!(map.option_letters, [Some(1), Some(2), Some(3), Some(4)]);
        // 裸字母列同时被记录
        assert_eq!(map.letter_options.len(), 4);
    }

    #[test]
    fn test_discrete_requires_all_four() {
        let h = header(&["题目", "A", "B", "C", "答案"]);
        let map = detect(&h);
        assert!(!map.has_discrete_options());
    }

    #[test]
    fn test_labeled_option_columns() {
        let h = header(&["题干", "选项A", "选项B", "选项C", "选项D", "答案"]);
        let map = detect(&h);
        assert!(map.has_discrete_options());
        assert_eq!(map.labeled_options.len(), 4);
        assert_eq!(map.labeled_options[0], ('A', 1));
    }

    #[test]
    fn test_answer_after_options_fallback() {
        // 没有任何答案关键词，兜底取选项列的后一列
        let h = header(&["题目", "选项", "甲", "乙"]);
        let map = detect(&h);
        assert_eq!(map.options, Some(1));
        assert_eq!(map.answer, Some(2));
    }

    #[test]
    fn test_indices_always_valid() {
        // 单列表格：兜底不会产生越界索引
        let h = header(&["甲"]);
        let map = detect(&h);
        assert_eq!(map.question, Some(0));
        assert_eq!(map.answer, None);
        assert_eq!(map.explanation, None);
    }

    #[test]
    fn test_knowledge_column() {
        let h = header(&["题干", "知识点", "答案"]);
        let map = detect(&h);
        assert_eq!(map.knowledge, Some(1));
    }
}
