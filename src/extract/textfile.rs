//! 行式纯文本题目解析
//!
//! 支持最简单的文本约定：`1.` 或 `问题 1` 开头的行是新题目，
//! `A.` 开头的行是选项，`答案:`/`解析:` 行是答案和解析（解析可以
//! 跨多行续写），其余行在选项和答案出现前都算题干的延续。

use regex::Regex;

use crate::models::question::DraftQuestion;

struct LinePatterns {
    question_start: Regex,
    question_prefix: Regex,
    option: Regex,
    answer: Regex,
    explanation: Regex,
}

impl LinePatterns {
    fn new() -> Option<Self> {
        Some(Self {
            question_start: Regex::new(r"^\d+\.|^问题\s*\d+").ok()?,
            question_prefix: Regex::new(r"^\d+\.\s*|^问题\s*\d+[:：]?\s*").ok()?,
            option: Regex::new(r"^[A-D]\.").ok()?,
            answer: Regex::new(r"^答案[:：]\s*").ok()?,
            explanation: Regex::new(r"^解析[:：]\s*").ok()?,
        })
    }

    /// 该行是否开启新的语义块（题目/选项/答案/解析）
    fn is_block_start(&self, line: &str) -> bool {
        self.question_start.is_match(line)
            || self.option.is_match(line)
            || self.answer.is_match(line)
            || self.explanation.is_match(line)
    }
}

/// 从纯文本内容中解析题目
pub fn parse_questions_from_text(content: &str) -> Vec<DraftQuestion> {
    let patterns = match LinePatterns::new() {
        Some(p) => p,
        None => return Vec::new(),
    };

    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut questions = Vec::new();
    let mut current: Option<DraftQuestion> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if patterns.question_start.is_match(line) {
            if let Some(q) = current.take() {
                questions.push(q);
            }
            current = Some(DraftQuestion {
                content: patterns.question_prefix.replace(line, "").trim().to_string(),
                ..Default::default()
            });
        } else if let Some(q) = current.as_mut() {
            if patterns.option.is_match(line) {
                q.options.push(line.to_string());
            } else if patterns.answer.is_match(line) {
                q.answer = patterns.answer.replace(line, "").trim().to_string();
            } else if patterns.explanation.is_match(line) {
                // 解析可以跨行，读到下一个语义块为止
                let mut explanation = patterns.explanation.replace(line, "").trim().to_string();
                while i + 1 < lines.len() && !patterns.is_block_start(lines[i + 1]) {
                    explanation.push(' ');
                    explanation.push_str(lines[i + 1]);
                    i += 1;
                }
                q.explanation = explanation;
            } else if q.options.is_empty() && q.answer.is_empty() {
                // 还没出现选项和答案，当作题干的延续
                q.content.push(' ');
                q.content.push_str(line);
            }
        }
        i += 1;
    }

    if let Some(q) = current.take() {
        questions.push(q);
    }

    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbered_questions() {
        let text = "\
1. 先进先出的数据结构是？
A. 栈
B. 队列
答案: B
解析: 队列是FIFO结构，
在一端入队另一端出队。
2. 后进先出的数据结构是？
A. 栈
B. 队列
答案: A";
        let questions = parse_questions_from_text(text);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].content, "先进先出的数据结构是？");
        assert_eq!(questions[0].options, vec!["A. 栈", "B. 队列"]);
        assert_eq!(questions[0].answer, "B");
        assert!(questions[0].explanation.contains("FIFO"));
        assert!(questions[0].explanation.contains("出队"));
        assert_eq!(questions[1].answer, "A");
    }

    #[test]
    fn test_question_prefix_variants() {
        let text = "问题 3: 栈的特点是什么？\n答案：后进先出";
        let questions = parse_questions_from_text(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].content, "栈的特点是什么？");
        assert_eq!(questions[0].answer, "后进先出");
    }

    #[test]
    fn test_multiline_content() {
        let text = "1. 下列关于线性表的说法\n哪一项是正确的？\nA. 甲\nB. 乙";
        let questions = parse_questions_from_text(text);
        assert_eq!(questions.len(), 1);
        assert!(questions[0].content.contains("哪一项是正确的？"));
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_questions_from_text("").is_empty());
        assert!(parse_questions_from_text("没有题号的散文一段").is_empty());
    }
}
