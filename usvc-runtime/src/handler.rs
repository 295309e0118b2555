//! 事件处理器（EventHandler）扩展点
//!
//! 微服务的领域逻辑经由该协议注入引擎（策略注入，而非继承）。
//!
use crate::error::RuntimeResult;
use async_trait::async_trait;
use usvc_events::Event;

/// 事件处理器：每个出队事件恰好被调用一次
///
/// 引擎不观察处理结果：返回的错误与 panic 都会在派发边界被拦截并上报，
/// 不会中断消费循环，也不会影响并发派发下的其他处理任务。
/// 处理器内部可读取写者并经 `send_event` 产生新事件；重试策略（若需要）
/// 属于处理器或写者实现，不属于运行时。
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    async fn handle_event(&self, event: Event) -> RuntimeResult<()>;
}
