//! 事件信封（Event）
//!
//! 定义事件在服务间传递的标准形态：类型判别符 + 不透明负载。
//! 事件一经构造即不可变，核心运行时不感知负载结构。
//!
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct Event {
    /// 事件唯一标识符
    event_id: String,
    /// 事件类型，处理器据此分派
    event_type: String,
    /// 事件发生时间
    occurred_at: DateTime<Utc>,
    /// 事件负载，运行时不感知其结构
    payload: Value,
}

impl Event {
    /// 以自动生成的 `event_id` 与当前时间创建事件
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            event_type: event_type.into(),
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_id_and_timestamp() {
        let ev = Event::new("trend.sample", serde_json::json!({"value": 1}));

        assert!(!ev.event_id().is_empty());
        assert_eq!(ev.event_type(), "trend.sample");
        assert_eq!(ev.payload()["value"], 1);
    }

    #[test]
    fn new_generates_distinct_ids() {
        let a = Event::new("t", Value::Null);
        let b = Event::new("t", Value::Null);

        assert_ne!(a.event_id(), b.event_id());
    }

    #[test]
    fn builder_keeps_caller_supplied_metadata() {
        let ev = Event::builder()
            .event_id("ev-1".to_string())
            .event_type("scale.request".to_string())
            .occurred_at(Utc::now())
            .payload(serde_json::json!({"replica_count": 3}))
            .build();

        assert_eq!(ev.event_id(), "ev-1");
        assert_eq!(ev.event_type(), "scale.request");
    }

    #[test]
    fn serde_round_trip() {
        let ev = Event::new("trend.sample", serde_json::json!({"value": 42}));
        let json = serde_json::to_string(&ev).expect("serialize Event");
        let back: Event = serde_json::from_str(&json).expect("deserialize Event");

        assert_eq!(back.event_id(), ev.event_id());
        assert_eq!(back.event_type(), ev.event_type());
        assert_eq!(back.payload(), ev.payload());
    }
}
