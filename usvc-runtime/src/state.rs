//! 生命周期状态（RunState）
//!
//! 引擎与调用方跨线程共享的唯一控制状态，单向流转：
//! Running → StopRequested → Stopped，不可逆转。
//!
use std::sync::atomic::{AtomicU8, Ordering};

/// 引擎生命周期的三态标志
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// 消费循环正在运行
    Running,
    /// 已请求停止，循环尚未退出
    StopRequested,
    /// 消费循环已完全退出
    Stopped,
}

const RUNNING: u8 = 0;
const STOP_REQUESTED: u8 = 1;
const STOPPED: u8 = 2;

/// 原子状态单元：以 compare-exchange 保证状态只会前进
pub(crate) struct RunStateCell(AtomicU8);

impl RunStateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(RUNNING))
    }

    pub(crate) fn get(&self) -> RunState {
        match self.0.load(Ordering::Acquire) {
            RUNNING => RunState::Running,
            STOP_REQUESTED => RunState::StopRequested,
            _ => RunState::Stopped,
        }
    }

    /// Running → StopRequested；返回本次调用是否完成了转换
    pub(crate) fn request_stop(&self) -> bool {
        self.0
            .compare_exchange(RUNNING, STOP_REQUESTED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// StopRequested → Stopped；仅消费循环在退出时调用
    pub(crate) fn mark_stopped(&self) {
        let _ = self
            .0
            .compare_exchange(STOP_REQUESTED, STOPPED, Ordering::AcqRel, Ordering::Acquire);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_monotonic() {
        let cell = RunStateCell::new();
        assert_eq!(cell.get(), RunState::Running);

        assert!(cell.request_stop());
        assert_eq!(cell.get(), RunState::StopRequested);

        // 重复请求不再发生转换
        assert!(!cell.request_stop());
        assert_eq!(cell.get(), RunState::StopRequested);

        cell.mark_stopped();
        assert_eq!(cell.get(), RunState::Stopped);

        // 终态之后任何请求都无效
        assert!(!cell.request_stop());
        cell.mark_stopped();
        assert_eq!(cell.get(), RunState::Stopped);
    }

    #[test]
    fn mark_stopped_without_request_is_a_noop() {
        let cell = RunStateCell::new();
        cell.mark_stopped();
        assert_eq!(cell.get(), RunState::Running);
    }
}
