//! 出站事件写者（EventWriter）协议与注册表
//!
//! 定义向其他服务发送事件的统一抽象：
//! - `EventWriter`：单个出站通道，投递语义由实现方负责；
//! - `WriterRegistry`：按目标名索引的写者映射，构造后只读。
//!
use crate::{error::EventResult as Result, event::Event};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// 事件写者：向某一目标服务发送事件
///
/// 实现方须可被多个处理任务并发调用；投递保证（重试、确认等）
/// 完全由实现方负责，运行时不做任何重试。
#[async_trait]
pub trait EventWriter: Send + Sync {
    /// 发送一个事件到该写者对应的目标
    async fn send_event(&self, event: Event) -> Result<()>;
}

/// 写者注册表：目标名 -> 写者
///
/// 在构造期一次性填充，交给运行时后不再变更；
/// 处理器可经由注册表并发查找并调用写者。
#[derive(Clone, Default)]
pub struct WriterRegistry {
    writers: HashMap<String, Arc<dyn EventWriter>>,
}

impl WriterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构造期链式注册一个写者；同名后注册者覆盖先注册者
    pub fn with_writer(mut self, name: impl Into<String>, writer: Arc<dyn EventWriter>) -> Self {
        self.writers.insert(name.into(), writer);
        self
    }

    /// 按目标名查找写者
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn EventWriter>> {
        self.writers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.writers.contains_key(name)
    }

    /// 已注册的目标名
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.writers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

impl FromIterator<(String, Arc<dyn EventWriter>)> for WriterRegistry {
    fn from_iter<I: IntoIterator<Item = (String, Arc<dyn EventWriter>)>>(iter: I) -> Self {
        Self {
            writers: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer_inmemory::InMemoryEventWriter;

    #[test]
    fn lookup_hit_and_miss() {
        let registry = WriterRegistry::new()
            .with_writer("scaler", Arc::new(InMemoryEventWriter::new()))
            .with_writer("observer", Arc::new(InMemoryEventWriter::new()));

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup("scaler").is_some());
        assert!(registry.lookup("unknown").is_none());
        assert!(registry.contains("observer"));
    }

    #[test]
    fn from_iterator_populates_once() {
        let writer: Arc<dyn EventWriter> = Arc::new(InMemoryEventWriter::new());
        let registry: WriterRegistry =
            [("scaler".to_string(), writer)].into_iter().collect();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["scaler"]);
    }
}
