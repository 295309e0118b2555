//! 服务引擎（ServiceEngine）
//!
//! 微服务基座的消费循环：
//! - 构造即启动：`start` 在返回前已把消费循环挂到后台任务上；
//! - 两种派发策略：逐事件并发派发（Concurrent）与同步轮询（Polling）；
//! - 生命周期控制：`stop()` 按策略提供立即返回或合流（join）语义；
//! - 空队列轮询间隔可在运行期调整，静默收敛到下限。
//!
use crate::handler::EventHandler;
use crate::state::{RunState, RunStateCell};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::{task, time};
use tracing::{error, warn};
use usvc_events::{Event, EventQueue, WriterRegistry};

/// 空队列检查间隔的默认值
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);
/// 空队列检查间隔的下限，任何更小的设置都会被收敛到该值
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 事件派发策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// 逐事件并发派发：每个出队事件派生独立任务执行处理器，
    /// 空队列时忙检（不休眠）；请求停止后继续出队直至队列排空。
    ///
    /// 在途处理任务数量没有上限，也没有背压——这是刻意保留的
    /// 取舍（以调度开销换取最低派发延迟），组合方需自行评估负载。
    #[default]
    Concurrent,
    /// 同步轮询：在循环自身的任务上逐个处理事件，空队列时按轮询
    /// 间隔休眠；请求停止后立即退出，队列中剩余事件不再消费。
    Polling,
}

/// 引擎配置
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// 派发策略
    pub mode: DispatchMode,
    /// 空队列检查间隔，低于下限时收敛到下限
    pub poll_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: DispatchMode::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// 微服务基座引擎
///
/// **构造即启动**：`ServiceEngine::start` 具有启动后台工作的副作用——
/// 返回前消费循环已在独立的 tokio 任务上运行，没有单独的 start 调用。
/// 组合该引擎的服务必须意识到事件可能在构造返回的瞬间就开始被处理。
///
/// 引擎独占队列的消费端（生产者可继续并发入队），并持有按目标名
/// 索引的出站写者注册表供处理器取用；注册表在引擎生命周期内只读。
pub struct ServiceEngine {
    writers: Arc<WriterRegistry>,
    state: Arc<RunStateCell>,
    poll_interval_ms: Arc<AtomicU64>,
    mode: DispatchMode,
    loop_task: Mutex<Option<JoinHandle<()>>>,
}

impl ServiceEngine {
    /// 构造引擎并立即启动消费循环（须在 tokio 运行时内调用）
    pub fn start(
        queue: Arc<dyn EventQueue>,
        writers: Arc<WriterRegistry>,
        handler: Arc<dyn EventHandler>,
        config: EngineConfig,
    ) -> Self {
        let state = Arc::new(RunStateCell::new());
        let poll_interval_ms = Arc::new(AtomicU64::new(
            clamp_poll_interval(config.poll_interval).as_millis() as u64,
        ));

        let consume = ConsumeLoop {
            queue,
            handler,
            state: state.clone(),
            poll_interval_ms: poll_interval_ms.clone(),
        };
        let loop_task = match config.mode {
            DispatchMode::Concurrent => tokio::spawn(consume.run_concurrent()),
            DispatchMode::Polling => tokio::spawn(consume.run_polling()),
        };

        Self {
            writers,
            state,
            poll_interval_ms,
            mode: config.mode,
            loop_task: Mutex::new(Some(loop_task)),
        }
    }

    /// 请求停止消费循环
    ///
    /// - `Polling`：同步语义——返回时循环已完全退出（合流），之后即使
    ///   继续入队也不会再有任何出队发生；
    /// - `Concurrent`：异步语义——仅翻转状态立即返回，不等待在途处理
    ///   任务；循环在下一次观察到空队列后退出。
    ///
    /// 重复调用无副作用。
    pub async fn stop(&self) {
        self.state.request_stop();

        if self.mode == DispatchMode::Polling {
            let task = self.loop_task.lock().await.take();
            if let Some(task) = task {
                if let Err(err) = task.await {
                    error!(error = %err, "consume loop task terminated abnormally");
                }
            }
        }
    }

    /// 当前生命周期状态
    pub fn run_state(&self) -> RunState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state.get() == RunState::Running
    }

    /// 出站写者注册表
    pub fn writers(&self) -> &Arc<WriterRegistry> {
        &self.writers
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// 当前生效的空队列检查间隔
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.load(Ordering::Relaxed))
    }

    /// 调整空队列检查间隔，低于下限时静默收敛到下限
    ///
    /// 在下一次空队列检查时生效，不会打断正在进行的休眠。
    pub fn set_poll_interval(&self, interval: Duration) {
        self.poll_interval_ms.store(
            clamp_poll_interval(interval).as_millis() as u64,
            Ordering::Relaxed,
        );
    }
}

impl Drop for ServiceEngine {
    fn drop(&mut self) {
        // 仅翻转状态，不阻塞；Polling 循环最多再经历一次休眠后退出
        self.state.request_stop();
    }
}

fn clamp_poll_interval(interval: Duration) -> Duration {
    interval.max(MIN_POLL_INTERVAL)
}

/// 消费循环的共享上下文，随循环任务移动
struct ConsumeLoop {
    queue: Arc<dyn EventQueue>,
    handler: Arc<dyn EventHandler>,
    state: Arc<RunStateCell>,
    poll_interval_ms: Arc<AtomicU64>,
}

impl ConsumeLoop {
    /// 并发派发循环：Running 或队列非空时持续运转（停止后排空队列）
    async fn run_concurrent(self) {
        loop {
            if self.queue.is_empty() {
                if self.state.get() != RunState::Running {
                    break;
                }
                // 忙检：让步给调度器而非休眠，换取最低派发延迟
                task::yield_now().await;
                continue;
            }

            match self.queue.dequeue().await {
                Ok(event) => {
                    let handler = self.handler.clone();
                    tokio::spawn(dispatch(handler, event));
                }
                Err(err) => {
                    warn!(error = %err, "dequeue failed, consume loop continues");
                    task::yield_now().await;
                }
            }
        }

        self.state.mark_stopped();
    }

    /// 同步轮询循环：严格在 Running 期间运转（停止后剩余事件不再消费）
    async fn run_polling(self) {
        while self.state.get() == RunState::Running {
            if self.queue.is_empty() {
                time::sleep(self.poll_interval()).await;
                continue;
            }

            match self.queue.dequeue().await {
                Ok(event) => dispatch(self.handler.clone(), event).await,
                Err(err) => warn!(error = %err, "dequeue failed, consume loop continues"),
            }
        }

        self.state.mark_stopped();
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.load(Ordering::Relaxed))
    }
}

/// 派发边界：处理器的错误与 panic 都在此拦截上报，绝不外溢到循环任务
async fn dispatch(handler: Arc<dyn EventHandler>, event: Event) {
    let event_id = event.event_id().to_owned();
    let event_type = event.event_type().to_owned();

    match AssertUnwindSafe(handler.handle_event(event)).catch_unwind().await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            warn!(%event_id, %event_type, error = %err, "event handler failed");
        }
        Err(panic) => {
            error!(
                %event_id,
                %event_type,
                reason = panic_reason(panic.as_ref()),
                "event handler panicked"
            );
        }
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "opaque panic payload"
    }
}
