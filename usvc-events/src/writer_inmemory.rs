//! 内存版事件写者（InMemoryEventWriter）
//!
//! 将发送的事件记录在内存中的写者实现，满足 `EventWriter` 协议，
//! 典型用途：测试断言、示例与本地开发。
//!
use crate::error::EventResult as Result;
use crate::event::Event;
use crate::writer::EventWriter;
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// 记录型写者：`send_event` 仅做内存追加
#[derive(Default)]
pub struct InMemoryEventWriter {
    sent: Mutex<Vec<Event>>,
}

impl InMemoryEventWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已发送事件的快照
    pub fn sent(&self) -> Vec<Event> {
        self.lock().clone()
    }

    /// 取走并清空已发送事件
    pub fn take_sent(&self) -> Vec<Event> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl EventWriter for InMemoryEventWriter {
    async fn send_event(&self, event: Event) -> Result<()> {
        self.lock().push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_sent_events_in_order() {
        let writer = InMemoryEventWriter::new();

        for v in 0..3 {
            let ev = Event::new("trend.sample", serde_json::json!({"v": v}));
            writer.send_event(ev).await.expect("send_event");
        }

        let sent = writer.take_sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].payload()["v"], 0);
        assert_eq!(sent[2].payload()["v"], 2);
        assert!(writer.sent().is_empty());
    }
}
