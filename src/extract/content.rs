//! 题干内容清理
//!
//! 当选项是从题干文本中提取出来的时，把选项文本从题干中移除。
//! 清理是尽力而为的：只有在题干中确实出现了选项标记时才动手，
//! 清理结果过短时放弃清理返回原文，绝不能把题干清丢了。

use regex::Regex;
use tracing::debug;

/// 从选项中取出字母标记（如 "A."）
fn option_marker(option: &str) -> Option<&str> {
    let re = Regex::new(r"^[A-D][.。]").ok()?;
    re.find(option).map(|m| m.as_str())
}

/// 移除孤立的残留标记
///
/// 选项正文移除后题干里可能剩下 "A. B." 这样的裸标记串，
/// 只删除后面紧跟另一个标记或已到结尾的标记。
fn strip_residual_markers(text: &str) -> String {
    let marker_re = match Regex::new(r"[A-D][.。]\s*") {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };
    let head_re = match Regex::new(r"^[A-D][.。]") {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };

    let mut result = String::with_capacity(text.len());
    let mut pos = 0;
    for m in marker_re.find_iter(text) {
        if m.start() < pos {
            continue;
        }
        let rest = &text[m.end()..];
        if rest.is_empty() || head_re.is_match(rest) {
            result.push_str(&text[pos..m.start()]);
            pos = m.end();
        }
    }
    result.push_str(&text[pos..]);
    result
}

/// 清理题干内容
///
/// 只有当某个选项的字母标记确实出现在题干中（即选项内嵌在题干里，
/// 而不是来自独立选项列）时才清理；否则原样返回。清理后内容为空或
/// 短于 5 个字符时，放弃清理返回原文。
pub fn clean_content(content: &str, options: &[String]) -> String {
    if content.is_empty() || options.is_empty() {
        return content.to_string();
    }

    // 检查题干是否真的包含选项标记，避免误删
    let contains_options = options
        .iter()
        .filter_map(|opt| option_marker(opt))
        .any(|marker| content.contains(marker));
    if !contains_options {
        return content.to_string();
    }

    let mut cleaned = content.to_string();

    // 逐个移除 "标记 + 选项正文"
    for option in options {
        if let Some(marker) = option_marker(option) {
            let pattern = format!(r"{}\s*[^A-D.。]+", regex::escape(marker));
            if let Ok(re) = Regex::new(&pattern) {
                cleaned = re.replace_all(&cleaned, "").to_string();
            }
        }
    }

    // 清理残留的裸标记和多余的空白、末尾分号
    cleaned = strip_residual_markers(&cleaned);
    if let Ok(re) = Regex::new(r"\s*[;；]\s*$") {
        cleaned = re.replace(&cleaned, "").to_string();
    }
    if let Ok(re) = Regex::new(r"\s+") {
        cleaned = re.replace_all(&cleaned, " ").to_string();
    }
    let cleaned = cleaned.trim();

    // 清理过猛，保留原始内容
    if cleaned.chars().count() < 5 {
        debug!("清理后内容太短，保留原始题干");
        return content.to_string();
    }

    cleaned.to_string()
}
