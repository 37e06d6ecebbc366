//! 本地分类表
//!
//! 分类的最后一道防线，完全离线：
//! - 知识点关键词到分类名的映射（顺序敏感，"二叉树"必须先于"树"）
//! - 题干关键词组的粗粒度分类
//!
//! 在线分类服务失败或返回"未分类"时由流程层调用。

use regex::Regex;

/// 知识点关键词 → 分类名，按优先级排列，首个命中生效
const KNOWLEDGE_CATEGORY_TABLE: &[(&str, &str)] = &[
    ("线性表", "线性表"),
    ("队列", "队列"),
    ("栈", "栈"),
    ("链表", "链表"),
    ("二叉树", "树结构"),
    ("树", "树结构"),
    ("图", "图结构"),
    ("排序", "排序算法"),
    ("查找", "查找算法"),
    ("哈希", "哈希结构"),
    ("散列", "哈希结构"),
    ("算法", "算法"),
    ("复杂度", "算法复杂度"),
    ("数据结构", "数据结构"),
    ("数据库", "数据库"),
    ("关系代数", "关系代数"),
    ("SQL", "数据库语言"),
    ("存储", "数据存储"),
    ("索引", "数据库索引"),
    ("事务", "数据库事务"),
    ("编程", "编程基础"),
    ("函数", "函数与方法"),
    ("递归", "递归算法"),
    ("指针", "指针与内存"),
    ("内存", "指针与内存"),
    ("变量", "变量与数据类型"),
    ("程序", "程序设计"),
];

/// 题干关键词组 → 分类名，任一关键词命中即生效
const QUESTION_KEYWORD_GROUPS: &[(&[&str], &str)] = &[
    (&["数组", "线性表", "链表", "栈", "队列"], "数据结构"),
    (&["排序", "查找", "算法", "复杂度", "O(n)"], "算法"),
    (&["二叉树", "平衡树", "B树", "红黑树"], "树结构"),
    (&["图", "邻接", "路径", "遍历"], "图结构"),
    (&["函数", "递归", "变量", "语句"], "编程基础"),
    (&["数据库", "SQL", "表", "查询"], "数据库"),
];

/// 从题干中提取知识点标注
///
/// 识别 `知识点: xxx` 格式（中英文冒号均可），取到句号或换行为止。
pub fn extract_knowledge_point(content: &str) -> Option<String> {
    let re = Regex::new(r"知识点[:：]\s*([^。\n]+)").ok()?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// 根据知识点文本确定分类
///
/// 先查关键词表；没有命中但知识点非空时，知识点本身就是分类
/// （"数据结构-线性表" 命中 "线性表"，自定义知识点原样使用）。
pub fn category_from_knowledge_point(knowledge_point: &str) -> Option<String> {
    let kp = knowledge_point.trim();
    if kp.is_empty() {
        return None;
    }
    for (keyword, category) in KNOWLEDGE_CATEGORY_TABLE {
        if kp.contains(keyword) {
            return Some((*category).to_string());
        }
    }
    Some(kp.to_string())
}

/// 根据题干关键词组做粗粒度分类
pub fn classify_by_keywords(question: &str) -> Option<String> {
    for (keywords, category) in QUESTION_KEYWORD_GROUPS {
        if keywords.iter().any(|kw| question.contains(kw)) {
            return Some((*category).to_string());
        }
    }
    None
}
