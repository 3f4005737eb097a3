//! Лента доставки заказа.
//!
//! Строится заново из статуса и зафиксированных моментов при каждом показе
//! страницы заказа. Ничего не хранит и не изменяет заказ.

use super::aggregate::{Order, OrderTimestamps};
use crate::enums::order_status::{OrderStatus, RecordedStatus, StatusFamily};
use serde::{Deserialize, Serialize};

/// Заглушка для шага без зафиксированного момента, который уже должен был случиться
pub const LABEL_NOT_AVAILABLE: &str = "N/A";
/// Заглушка для шага без зафиксированного момента
pub const LABEL_PENDING: &str = "Pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepId {
    #[serde(rename = "placed")]
    Placed,
    #[serde(rename = "shipped")]
    Shipped,
    #[serde(rename = "intransit")]
    InTransit,
    #[serde(rename = "outfordelivery")]
    OutForDelivery,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "return_initiated")]
    ReturnInitiated,
    #[serde(rename = "returned")]
    Returned,
    #[serde(rename = "replacement_initiated")]
    ReplacementInitiated,
    #[serde(rename = "replaced")]
    Replaced,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Placed => "placed",
            StepId::Shipped => "shipped",
            StepId::InTransit => "intransit",
            StepId::OutForDelivery => "outfordelivery",
            StepId::Delivered => "delivered",
            StepId::Cancelled => "cancelled",
            StepId::ReturnInitiated => "return_initiated",
            StepId::Returned => "returned",
            StepId::ReplacementInitiated => "replacement_initiated",
            StepId::Replaced => "replaced",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StepId::Placed => "Order placed",
            StepId::Shipped => "Shipped",
            StepId::InTransit => "In transit",
            StepId::OutForDelivery => "Out for delivery",
            StepId::Delivered => "Delivered",
            StepId::Cancelled => "Cancelled",
            StepId::ReturnInitiated => "Return initiated",
            StepId::Returned => "Returned",
            StepId::ReplacementInitiated => "Replacement initiated",
            StepId::Replaced => "Replaced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StepId::Placed => "Your order has been placed",
            StepId::Shipped => "The seller has shipped your order",
            StepId::InTransit => "Your order is on the way",
            StepId::OutForDelivery => "Your order is out for delivery",
            StepId::Delivered => "Your order has been delivered",
            StepId::Cancelled => "Your order has been cancelled",
            StepId::ReturnInitiated => "A return has been requested for your order",
            StepId::Returned => "Your order has been returned",
            StepId::ReplacementInitiated => "A replacement has been requested for your order",
            StepId::Replaced => "Your order has been replaced",
        }
    }

    /// Шаги, которые показывают "N/A" вместо "Pending" при отсутствии момента
    fn placeholder(&self) -> &'static str {
        match self {
            StepId::Placed | StepId::Cancelled => LABEL_NOT_AVAILABLE,
            _ => LABEL_PENDING,
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Completed,
    Pending,
    Error,
}

/// Шаг ленты доставки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    pub id: StepId,
    pub title: String,
    pub description: String,
    pub timestamp: Option<String>,
    pub state: StepState,
}

impl TimelineStep {
    fn new(id: StepId, timestamp: &Option<String>, state: StepState) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            description: id.description().to_string(),
            timestamp: timestamp.clone(),
            state,
        }
    }

    /// Момент шага или заглушка, если он не зафиксирован
    pub fn timestamp_label(&self) -> &str {
        self.timestamp.as_deref().unwrap_or_else(|| self.id.placeholder())
    }
}

/// Получатель сообщений о статусах, которых нет в перечислении
pub trait StatusAnomalySink {
    fn unrecognized_status(&self, order_ref: &str, raw_status: &str);
}

/// Построить ленту доставки для заказа
pub fn build_timeline(order: &Order) -> Vec<TimelineStep> {
    build_steps(&order.status, &order.timestamps)
}

/// То же, что [`build_timeline`], но неизвестный статус передаётся в `sink`
pub fn build_timeline_reported(order: &Order, sink: &dyn StatusAnomalySink) -> Vec<TimelineStep> {
    if let RecordedStatus::Unrecognized(raw) = &order.status {
        sink.unrecognized_status(&order.to_string_id(), raw);
    }
    build_steps(&order.status, &order.timestamps)
}

/// Построить ленту по статусу и моментам.
///
/// Первый шаг всегда `placed` в состоянии completed. Далее либо ветка отмены,
/// либо основная ветка доставки с необязательным продолжением возврата или замены.
/// Неизвестный статус даёт ту же форму, что и только что оформленный заказ.
pub fn build_steps(status: &RecordedStatus, ts: &OrderTimestamps) -> Vec<TimelineStep> {
    let mut steps = vec![TimelineStep::new(
        StepId::Placed,
        &ts.created_at,
        StepState::Completed,
    )];

    let known = status.known();

    if known == Some(OrderStatus::Cancelled) {
        steps.push(TimelineStep::new(
            StepId::Cancelled,
            &ts.cancelled_at,
            StepState::Error,
        ));
        return steps;
    }

    let rank = known.map(|s| s.delivery_rank()).unwrap_or(0);
    let none = None;
    let core = [
        (StepId::Shipped, 1, &ts.shipped_at),
        (StepId::InTransit, 2, &none),
        // Отдельного статуса нет: считается пройденным только после доставки
        (StepId::OutForDelivery, 4, &none),
        (StepId::Delivered, 4, &ts.delivered_at),
    ];
    for (id, position, timestamp) in core {
        steps.push(TimelineStep::new(id, timestamp, reached(rank, position)));
    }

    let Some(status) = known else {
        return steps;
    };

    match status.family() {
        StatusFamily::Return => {
            let returned = status == OrderStatus::Returned;
            steps.push(TimelineStep::new(
                StepId::ReturnInitiated,
                &ts.return_initiated_at,
                completed_if(returned),
            ));
            if returned {
                steps.push(TimelineStep::new(
                    StepId::Returned,
                    &ts.returned_at,
                    StepState::Completed,
                ));
            }
        }
        StatusFamily::Replacement => {
            let replaced = status == OrderStatus::Replaced;
            steps.push(TimelineStep::new(
                StepId::ReplacementInitiated,
                &ts.replacement_initiated_at,
                completed_if(replaced),
            ));
            if replaced {
                steps.push(TimelineStep::new(
                    StepId::Replaced,
                    &ts.replaced_at,
                    StepState::Completed,
                ));
            }
        }
        StatusFamily::Forward | StatusFamily::Rejected | StatusFamily::Cancelled => {}
    }

    steps
}

fn reached(rank: u8, position: u8) -> StepState {
    completed_if(rank >= position)
}

fn completed_if(done: bool) -> StepState {
    if done {
        StepState::Completed
    } else {
        StepState::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        calls: RefCell<Vec<(String, String)>>,
    }

    impl StatusAnomalySink for RecordingSink {
        fn unrecognized_status(&self, order_ref: &str, raw_status: &str) {
            self.calls
                .borrow_mut()
                .push((order_ref.to_string(), raw_status.to_string()));
        }
    }

    fn steps_for(status: &str) -> Vec<TimelineStep> {
        build_steps(&RecordedStatus::from(status), &OrderTimestamps::default())
    }

    fn summary(steps: &[TimelineStep]) -> Vec<(StepId, StepState)> {
        steps.iter().map(|s| (s.id, s.state)).collect()
    }

    fn order_with(status: &str) -> Order {
        use crate::domain::common::Origin;
        use super::super::aggregate::{OrderHeader, OrderLine};

        let mut order = Order::new_for_insert(
            "ORD-7".into(),
            "Order 7".into(),
            OrderHeader {
                customer_ref: "c".into(),
                customer_name: "C".into(),
                vendor_ref: "v".into(),
                currency: "USD".into(),
                shipping_address: None,
                origin: Origin::Storefront,
            },
            vec![OrderLine {
                line_id: "1".into(),
                product_ref: "p".into(),
                name: "P".into(),
                qty: 1.0,
                unit_price: 1.0,
                discount: None,
            }],
        );
        order.status = RecordedStatus::from(status);
        order
    }

    #[test]
    fn test_every_status_starts_with_placed() {
        for status in OrderStatus::all() {
            let steps = steps_for(status.code());
            assert!(!steps.is_empty());
            assert_eq!(steps[0].id, StepId::Placed);
            assert_eq!(steps[0].state, StepState::Completed);
        }
    }

    #[test]
    fn test_cancelled() {
        assert_eq!(
            summary(&steps_for("cancelled")),
            vec![
                (StepId::Placed, StepState::Completed),
                (StepId::Cancelled, StepState::Error),
            ]
        );
    }

    #[test]
    fn test_delivered() {
        assert_eq!(
            summary(&steps_for("delivered")),
            vec![
                (StepId::Placed, StepState::Completed),
                (StepId::Shipped, StepState::Completed),
                (StepId::InTransit, StepState::Completed),
                (StepId::OutForDelivery, StepState::Completed),
                (StepId::Delivered, StepState::Completed),
            ]
        );
    }

    #[test]
    fn test_shipped() {
        assert_eq!(
            summary(&steps_for("shipped")),
            vec![
                (StepId::Placed, StepState::Completed),
                (StepId::Shipped, StepState::Completed),
                (StepId::InTransit, StepState::Pending),
                (StepId::OutForDelivery, StepState::Pending),
                (StepId::Delivered, StepState::Pending),
            ]
        );
    }

    #[test]
    fn test_out_for_delivery_waits_for_delivered() {
        let steps = steps_for("intransit");
        assert_eq!(steps[2].id, StepId::InTransit);
        assert_eq!(steps[2].state, StepState::Completed);
        assert_eq!(steps[3].id, StepId::OutForDelivery);
        assert_eq!(steps[3].state, StepState::Pending);
    }

    #[test]
    fn test_returned() {
        assert_eq!(
            summary(&steps_for("returned")),
            vec![
                (StepId::Placed, StepState::Completed),
                (StepId::Shipped, StepState::Completed),
                (StepId::InTransit, StepState::Completed),
                (StepId::OutForDelivery, StepState::Completed),
                (StepId::Delivered, StepState::Completed),
                (StepId::ReturnInitiated, StepState::Completed),
                (StepId::Returned, StepState::Completed),
            ]
        );
    }

    #[test]
    fn test_return_in_progress() {
        for status in ["return pending", "return initiated"] {
            let steps = steps_for(status);
            assert_eq!(steps.len(), 6);
            assert_eq!(steps[4].state, StepState::Completed);
            assert_eq!(steps[5].id, StepId::ReturnInitiated);
            assert_eq!(steps[5].state, StepState::Pending);
        }
    }

    #[test]
    fn test_replacement_branch() {
        let steps = steps_for("replacement initiated");
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[5].id, StepId::ReplacementInitiated);
        assert_eq!(steps[5].state, StepState::Pending);

        let steps = steps_for("replaced");
        assert_eq!(
            summary(&steps[5..]),
            vec![
                (StepId::ReplacementInitiated, StepState::Completed),
                (StepId::Replaced, StepState::Completed),
            ]
        );
    }

    #[test]
    fn test_rejected_stays_at_placed() {
        let steps = steps_for("rejected");
        assert_eq!(steps.len(), 5);
        assert!(steps[1..].iter().all(|s| s.state == StepState::Pending));
    }

    #[test]
    fn test_unknown_status_degrades() {
        let steps = steps_for("archived");
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].state, StepState::Completed);
        assert!(steps[1..].iter().all(|s| s.state == StepState::Pending));
    }

    #[test]
    fn test_idempotent() {
        let order = order_with("intransit");
        assert_eq!(build_timeline(&order), build_timeline(&order));
    }

    #[test]
    fn test_timestamps_and_labels() {
        let ts = OrderTimestamps {
            created_at: Some("2024-01-01".into()),
            shipped_at: Some("2024-01-02".into()),
            ..OrderTimestamps::default()
        };
        let steps = build_steps(&RecordedStatus::from("intransit"), &ts);

        assert_eq!(steps[0].timestamp_label(), "2024-01-01");
        assert_eq!(steps[1].timestamp_label(), "2024-01-02");
        assert_eq!(steps[1].state, StepState::Completed);
        assert_eq!(steps[2].state, StepState::Completed);
        assert_eq!(steps[2].timestamp, None);
        assert_eq!(steps[2].timestamp_label(), LABEL_PENDING);
        assert_eq!(steps[3].state, StepState::Pending);
        assert_eq!(steps[4].state, StepState::Pending);
    }

    #[test]
    fn test_missing_placed_and_cancelled_show_not_available() {
        let steps = steps_for("cancelled");
        assert_eq!(steps[0].timestamp_label(), LABEL_NOT_AVAILABLE);
        assert_eq!(steps[1].timestamp_label(), LABEL_NOT_AVAILABLE);
    }

    #[test]
    fn test_unknown_status_is_reported_once() {
        let sink = RecordingSink::default();
        let order = order_with("archived");
        let steps = build_timeline_reported(&order, &sink);

        assert_eq!(steps.len(), 5);
        let calls = sink.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, order.to_string_id());
        assert_eq!(calls[0].1, "archived");
    }

    #[test]
    fn test_known_status_is_not_reported() {
        let sink = RecordingSink::default();
        for status in OrderStatus::all() {
            build_timeline_reported(&order_with(status.code()), &sink);
        }
        assert!(sink.calls.borrow().is_empty());
    }

    #[test]
    fn test_step_json() {
        let steps = steps_for("cancelled");
        let value = serde_json::to_value(&steps[1]).unwrap();
        assert_eq!(value["id"], "cancelled");
        assert_eq!(value["state"], "error");
        assert!(value["timestamp"].is_null());
    }

    #[test]
    fn test_refused_return_keeps_delivery_completed() {
        let mut order = order_with("placed");
        let now = chrono::Utc::now();
        for next in [
            OrderStatus::Shipped,
            OrderStatus::InTransit,
            OrderStatus::Delivered,
            OrderStatus::ReturnPending,
        ] {
            order.apply_status(next, now).unwrap();
        }
        assert!(order.apply_status(OrderStatus::Rejected, now).is_err());
        order.apply_status(OrderStatus::Delivered, now).unwrap();

        let steps = build_timeline(&order);
        assert_eq!(
            summary(&steps),
            vec![
                (StepId::Placed, StepState::Completed),
                (StepId::Shipped, StepState::Completed),
                (StepId::InTransit, StepState::Completed),
                (StepId::OutForDelivery, StepState::Completed),
                (StepId::Delivered, StepState::Completed),
            ]
        );
        assert!(steps[1].timestamp.is_some());
        assert!(steps[4].timestamp.is_some());
    }
}
