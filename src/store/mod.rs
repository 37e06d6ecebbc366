//! 题库存储层
//!
//! 导入流程只通过 `QuestionStore` trait 写入，不关心落地方式。
//! 当前提供内存实现（进程内题库），id 由存储层顺序分配。

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::question::{DraftQuestion, StoredQuestion};

/// 题库存储能力
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// 入库一条题目，返回带 id 的记录
    async fn insert(&self, draft: DraftQuestion) -> Result<StoredQuestion>;
    /// 列出全部题目
    async fn list_all(&self) -> Result<Vec<StoredQuestion>>;
    /// 按分类列出题目
    async fn list_by_category(&self, category: &str) -> Result<Vec<StoredQuestion>>;
    /// 按 id 删除，返回是否删到
    async fn delete_by_id(&self, id: u64) -> Result<bool>;
    /// 删除整个分类，返回删除数量
    async fn delete_by_category(&self, category: &str) -> Result<usize>;
    /// 当前存在的分类名列表（按首次出现顺序，去重）
    async fn categories(&self) -> Result<Vec<String>>;
}

#[derive(Default)]
struct MemoryStoreInner {
    next_id: u64,
    questions: Vec<StoredQuestion>,
}

/// 进程内题库
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                next_id: 1,
                questions: Vec::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn insert(&self, draft: DraftQuestion) -> Result<StoredQuestion> {
        let mut inner = self.inner.write().await;
        let question = StoredQuestion {
            id: inner.next_id,
            content: draft.content,
            options: draft.options,
            answer: draft.answer,
            explanation: draft.explanation,
            category: draft.category,
            error_count: 0,
        };
        inner.next_id += 1;
        inner.questions.push(question.clone());
        debug!("入库题目 #{}: 分类 \"{}\"", question.id, question.category);
        Ok(question)
    }

    async fn list_all(&self) -> Result<Vec<StoredQuestion>> {
        Ok(self.inner.read().await.questions.clone())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<StoredQuestion>> {
        Ok(self
            .inner
            .read()
            .await
            .questions
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn delete_by_id(&self, id: u64) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.questions.len();
        inner.questions.retain(|q| q.id != id);
        Ok(inner.questions.len() < before)
    }

    async fn delete_by_category(&self, category: &str) -> Result<usize> {
        let mut inner = self.inner.write().await;
        let before = inner.questions.len();
        inner.questions.retain(|q| q.category != category);
        Ok(before - inner.questions.len())
    }

    async fn categories(&self) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        let mut seen = Vec::new();
        for q in &inner.questions {
            if !seen.contains(&q.category) {
                seen.push(q.category.clone());
            }
        }
        Ok(seen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(content: &str, category: &str) -> DraftQuestion {
        DraftQuestion {
            content: content.to_string(),
            category: category.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let first = store.insert(draft("甲", "数据结构")).await.unwrap();
        let second = store.insert(draft("乙", "算法")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_category_queries() {
        let store = MemoryStore::new();
        store.insert(draft("甲", "数据结构")).await.unwrap();
        store.insert(draft("乙", "算法")).await.unwrap();
        store.insert(draft("丙", "数据结构")).await.unwrap();

        let ds = store.list_by_category("数据结构").await.unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(
            store.categories().await.unwrap(),
            vec!["数据结构".to_string(), "算法".to_string()]
        );
    }

    #[tokio::test]
    async fn test_deletes() {
        let store = MemoryStore::new();
        let q = store.insert(draft("甲", "数据结构")).await.unwrap();
        store.insert(draft("乙", "数据结构")).await.unwrap();

        assert!(store.delete_by_id(q.id).await.unwrap());
        assert!(!store.delete_by_id(q.id).await.unwrap());
        assert_eq!(store.delete_by_category("数据结构").await.unwrap(), 1);
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
