//! 内存版事件队列（InMemoryEventQueue）
//!
//! 基于 `Mutex<VecDeque>` 的轻量队列实现，满足 `EventQueue` 协议：
//! - `enqueue`：尾部追加，可被多个生产者并发调用；
//! - `dequeue`：非阻塞取出队首，空队列返回 `QueueEmpty`；
//! - 典型用途：测试环境、示例与本地开发。
//!
use crate::error::{EventError, EventResult as Result};
use crate::event::Event;
use crate::queue::EventQueue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 简单的内存事件队列实现
#[derive(Default)]
pub struct InMemoryEventQueue {
    inner: Mutex<VecDeque<Event>>,
}

impl InMemoryEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前排队的事件数量
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // 临界区内不会 panic，毒化时直接取回内部数据
    fn lock(&self) -> MutexGuard<'_, VecDeque<Event>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EventQueue for InMemoryEventQueue {
    fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    async fn enqueue(&self, event: Event) -> Result<()> {
        self.lock().push_back(event);
        Ok(())
    }

    async fn dequeue(&self) -> Result<Event> {
        self.lock().pop_front().ok_or(EventError::QueueEmpty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn mk_event(id: &str) -> Event {
        Event::builder()
            .event_id(id.to_string())
            .event_type("t".to_string())
            .occurred_at(chrono::Utc::now())
            .payload(serde_json::Value::Null)
            .build()
    }

    #[tokio::test]
    async fn fifo_order_preserved() {
        let queue = InMemoryEventQueue::new();

        for id in ["e1", "e2", "e3"] {
            queue.enqueue(mk_event(id)).await.expect("enqueue");
        }

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue().await.expect("dequeue").event_id(), "e1");
        assert_eq!(queue.dequeue().await.expect("dequeue").event_id(), "e2");
        assert_eq!(queue.dequeue().await.expect("dequeue").event_id(), "e3");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn dequeue_on_empty_reports_queue_empty() {
        let queue = InMemoryEventQueue::new();

        assert!(matches!(
            queue.dequeue().await,
            Err(EventError::QueueEmpty)
        ));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_producers_lose_nothing() {
        let queue = Arc::new(InMemoryEventQueue::new());

        let mut tasks = Vec::new();
        for p in 0..8 {
            let queue = queue.clone();
            tasks.push(tokio::spawn(async move {
                for i in 0..25 {
                    let ev = mk_event(&format!("p{p}-{i}"));
                    queue.enqueue(ev).await.expect("enqueue");
                }
            }));
        }
        for t in tasks {
            t.await.expect("producer task");
        }

        assert_eq!(queue.len(), 200);
    }
}
