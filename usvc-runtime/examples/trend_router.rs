/// 事件路由示例
/// 一个最小微服务：消费趋势采样事件，换算扩缩容请求后
/// 经名为 "scaler" 的出站写者转发给下游服务
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::info;
use usvc_events::{Event, EventQueue, InMemoryEventQueue, InMemoryEventWriter, WriterRegistry};
use usvc_runtime::{EngineConfig, EventHandler, RuntimeResult, ServiceEngine};

/// 趋势路由处理器：按 event_type 分派，未知类型直接忽略
struct TrendRouter {
    writers: Arc<WriterRegistry>,
}

#[async_trait]
impl EventHandler for TrendRouter {
    async fn handle_event(&self, event: Event) -> RuntimeResult<()> {
        match event.event_type() {
            "trend.sample" => {
                let Some(writer) = self.writers.lookup("scaler") else {
                    return Ok(());
                };
                let replica_count = event.payload()["value"].as_u64().unwrap_or(1).clamp(1, 10);
                writer
                    .send_event(Event::new(
                        "scale.request",
                        serde_json::json!({ "replica_count": replica_count }),
                    ))
                    .await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let queue = Arc::new(InMemoryEventQueue::new());
    let scaler = Arc::new(InMemoryEventWriter::new());
    let writers = Arc::new(WriterRegistry::new().with_writer("scaler", scaler.clone()));

    // 生产者先行入队几条采样
    for value in [1u64, 4, 7] {
        queue
            .enqueue(Event::new("trend.sample", serde_json::json!({ "value": value })))
            .await?;
    }

    // 注意：构造即启动，返回时消费已经开始
    let engine = ServiceEngine::start(
        queue.clone(),
        writers.clone(),
        Arc::new(TrendRouter { writers: writers.clone() }),
        EngineConfig::default(),
    );

    // 等待全部路由完成
    time::timeout(Duration::from_secs(2), async {
        while scaler.sent().len() < 3 {
            time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await?;

    engine.stop().await;

    for ev in scaler.take_sent() {
        info!(
            event_type = ev.event_type(),
            replica_count = ev.payload()["replica_count"].as_u64(),
            "routed scale request"
        );
    }

    Ok(())
}
