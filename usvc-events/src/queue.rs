//! 入站事件队列（EventQueue）协议
//!
//! 定义运行时消费入站事件的统一抽象：多生产者并发入队，
//! 单消费者（消费循环）按 FIFO 顺序出队。
//!
use crate::{error::EventResult as Result, event::Event};
use async_trait::async_trait;

/// 事件队列：面向单消费者的并发 FIFO
///
/// 实现方须保证：
/// - 出队顺序为 FIFO，且同一事件至多交付一次；
/// - 入队可被多个生产者并发调用。
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// 非阻塞地判断队列是否为空
    fn is_empty(&self) -> bool;

    /// 入队一个事件（生产者侧，可并发调用）
    async fn enqueue(&self, event: Event) -> Result<()>;

    /// 出队下一个事件；队列为空时按实现方契约阻塞或报错
    async fn dequeue(&self) -> Result<Event>;
}
