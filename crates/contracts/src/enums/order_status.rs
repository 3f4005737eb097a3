use serde::{Deserialize, Serialize};

/// Статусы заказа (коды совпадают со значениями, которые отдаёт API)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "placed")]
    Placed,
    #[serde(rename = "shipped")]
    Shipped,
    #[serde(rename = "intransit")]
    InTransit,
    #[serde(rename = "delivered")]
    Delivered,
    #[serde(rename = "cancelled")]
    Cancelled,
    #[serde(rename = "rejected")]
    Rejected,
    #[serde(rename = "return pending")]
    ReturnPending,
    #[serde(rename = "return initiated")]
    ReturnInitiated,
    #[serde(rename = "returned")]
    Returned,
    #[serde(rename = "replacement pending")]
    ReplacementPending,
    #[serde(rename = "replacement initiated")]
    ReplacementInitiated,
    #[serde(rename = "replaced")]
    Replaced,
}

/// Ветка жизненного цикла, к которой относится статус
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFamily {
    Forward,
    Cancelled,
    Rejected,
    Return,
    Replacement,
}

impl OrderStatus {
    /// Получить код статуса
    pub fn code(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::InTransit => "intransit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Rejected => "rejected",
            OrderStatus::ReturnPending => "return pending",
            OrderStatus::ReturnInitiated => "return initiated",
            OrderStatus::Returned => "returned",
            OrderStatus::ReplacementPending => "replacement pending",
            OrderStatus::ReplacementInitiated => "replacement initiated",
            OrderStatus::Replaced => "replaced",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "Placed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::InTransit => "In transit",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::ReturnPending => "Return pending",
            OrderStatus::ReturnInitiated => "Return initiated",
            OrderStatus::Returned => "Returned",
            OrderStatus::ReplacementPending => "Replacement pending",
            OrderStatus::ReplacementInitiated => "Replacement initiated",
            OrderStatus::Replaced => "Replaced",
        }
    }

    /// Получить все статусы
    pub fn all() -> Vec<OrderStatus> {
        vec![
            OrderStatus::Placed,
            OrderStatus::Shipped,
            OrderStatus::InTransit,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Rejected,
            OrderStatus::ReturnPending,
            OrderStatus::ReturnInitiated,
            OrderStatus::Returned,
            OrderStatus::ReplacementPending,
            OrderStatus::ReplacementInitiated,
            OrderStatus::Replaced,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "placed" => Some(OrderStatus::Placed),
            "shipped" => Some(OrderStatus::Shipped),
            "intransit" => Some(OrderStatus::InTransit),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            "rejected" => Some(OrderStatus::Rejected),
            "return pending" => Some(OrderStatus::ReturnPending),
            "return initiated" => Some(OrderStatus::ReturnInitiated),
            "returned" => Some(OrderStatus::Returned),
            "replacement pending" => Some(OrderStatus::ReplacementPending),
            "replacement initiated" => Some(OrderStatus::ReplacementInitiated),
            "replaced" => Some(OrderStatus::Replaced),
            _ => None,
        }
    }

    pub fn family(&self) -> StatusFamily {
        match self {
            OrderStatus::Placed
            | OrderStatus::Shipped
            | OrderStatus::InTransit
            | OrderStatus::Delivered => StatusFamily::Forward,
            OrderStatus::Cancelled => StatusFamily::Cancelled,
            OrderStatus::Rejected => StatusFamily::Rejected,
            OrderStatus::ReturnPending | OrderStatus::ReturnInitiated | OrderStatus::Returned => {
                StatusFamily::Return
            }
            OrderStatus::ReplacementPending
            | OrderStatus::ReplacementInitiated
            | OrderStatus::Replaced => StatusFamily::Replacement,
        }
    }

    /// Позиция в каноническом порядке доставки:
    /// placed(0) → shipped(1) → intransit(2) → outfordelivery(3) → delivered(4)
    ///
    /// Возврат и замена возможны только после доставки, поэтому стоят на позиции delivered.
    /// Отменённый и отклонённый заказ дальше placed не продвинулись.
    pub fn delivery_rank(&self) -> u8 {
        match self {
            OrderStatus::Placed | OrderStatus::Cancelled | OrderStatus::Rejected => 0,
            OrderStatus::Shipped => 1,
            OrderStatus::InTransit => 2,
            OrderStatus::Delivered
            | OrderStatus::ReturnPending
            | OrderStatus::ReturnInitiated
            | OrderStatus::Returned
            | OrderStatus::ReplacementPending
            | OrderStatus::ReplacementInitiated
            | OrderStatus::Replaced => 4,
        }
    }

    /// Статусы, в которые заказ можно перевести из текущего
    pub fn next_statuses(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Placed => &[
                OrderStatus::Shipped,
                OrderStatus::Cancelled,
                OrderStatus::Rejected,
            ],
            OrderStatus::Shipped => &[OrderStatus::InTransit, OrderStatus::Cancelled],
            OrderStatus::InTransit => &[OrderStatus::Delivered],
            OrderStatus::Delivered => &[
                OrderStatus::ReturnPending,
                OrderStatus::ReplacementPending,
            ],
            // Отказ в возврате или замене возвращает заказ в delivered
            OrderStatus::ReturnPending => &[OrderStatus::ReturnInitiated, OrderStatus::Delivered],
            OrderStatus::ReturnInitiated => &[OrderStatus::Returned],
            OrderStatus::ReplacementPending => &[
                OrderStatus::ReplacementInitiated,
                OrderStatus::Delivered,
            ],
            OrderStatus::ReplacementInitiated => &[OrderStatus::Replaced],
            OrderStatus::Cancelled
            | OrderStatus::Rejected
            | OrderStatus::Returned
            | OrderStatus::Replaced => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Статус в том виде, в каком он пришёл из хранилища или API.
///
/// Неизвестное значение не ломает десериализацию: оно сохраняется как есть,
/// чтобы страницу заказа можно было отрисовать и сообщить об аномалии.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordedStatus {
    Known(OrderStatus),
    Unrecognized(String),
}

impl RecordedStatus {
    pub fn known(&self) -> Option<OrderStatus> {
        match self {
            RecordedStatus::Known(status) => Some(*status),
            RecordedStatus::Unrecognized(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecordedStatus::Known(status) => status.code(),
            RecordedStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            RecordedStatus::Known(status) => status.display_name().to_string(),
            RecordedStatus::Unrecognized(raw) => format!("Unknown ({})", raw),
        }
    }
}

impl From<OrderStatus> for RecordedStatus {
    fn from(status: OrderStatus) -> Self {
        RecordedStatus::Known(status)
    }
}

impl From<String> for RecordedStatus {
    fn from(raw: String) -> Self {
        match OrderStatus::from_code(&raw) {
            Some(status) => RecordedStatus::Known(status),
            None => RecordedStatus::Unrecognized(raw),
        }
    }
}

impl From<&str> for RecordedStatus {
    fn from(raw: &str) -> Self {
        RecordedStatus::from(raw.to_string())
    }
}

impl From<RecordedStatus> for String {
    fn from(status: RecordedStatus) -> Self {
        match status {
            RecordedStatus::Known(status) => status.code().to_string(),
            RecordedStatus::Unrecognized(raw) => raw,
        }
    }
}

impl std::fmt::Display for RecordedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Элемент справочника статусов для UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusInfo {
    pub code: String,
    pub display_name: String,
}

impl From<OrderStatus> for OrderStatusInfo {
    fn from(status: OrderStatus) -> Self {
        Self {
            code: status.code().to_string(),
            display_name: status.display_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_parse_back() {
        for status in OrderStatus::all() {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(OrderStatus::from_code("archived"), None);
        assert_eq!(OrderStatus::from_code("Placed"), None);
    }

    #[test]
    fn test_serde_uses_wire_codes() {
        let json = serde_json::to_string(&OrderStatus::ReturnPending).unwrap();
        assert_eq!(json, "\"return pending\"");
        let parsed: OrderStatus = serde_json::from_str("\"replacement initiated\"").unwrap();
        assert_eq!(parsed, OrderStatus::ReplacementInitiated);
    }

    #[test]
    fn test_recorded_status_keeps_unknown_values() {
        let parsed: RecordedStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(parsed, RecordedStatus::Unrecognized("archived".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"archived\"");

        let parsed: RecordedStatus = serde_json::from_str("\"intransit\"").unwrap();
        assert_eq!(parsed.known(), Some(OrderStatus::InTransit));
    }

    #[test]
    fn test_delivery_rank() {
        assert_eq!(OrderStatus::Placed.delivery_rank(), 0);
        assert_eq!(OrderStatus::Shipped.delivery_rank(), 1);
        assert_eq!(OrderStatus::InTransit.delivery_rank(), 2);
        assert_eq!(OrderStatus::Delivered.delivery_rank(), 4);
        assert_eq!(OrderStatus::Returned.delivery_rank(), 4);
        assert_eq!(OrderStatus::Rejected.delivery_rank(), 0);
    }

    #[test]
    fn test_transitions() {
        assert!(OrderStatus::Placed.can_transition_to(OrderStatus::Shipped));
        assert!(OrderStatus::Delivered.can_transition_to(OrderStatus::ReturnPending));
        assert!(!OrderStatus::Placed.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(OrderStatus::ReturnPending.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::ReplacementPending.can_transition_to(OrderStatus::Delivered));
        // Отклонить можно только заказ, который ещё не отгружен
        for status in OrderStatus::all() {
            assert_eq!(
                status.can_transition_to(OrderStatus::Rejected),
                status == OrderStatus::Placed
            );
        }
        for status in [
            OrderStatus::Cancelled,
            OrderStatus::Rejected,
            OrderStatus::Returned,
            OrderStatus::Replaced,
        ] {
            assert!(status.is_terminal());
        }
    }
}
