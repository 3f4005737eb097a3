use super::error::OrderError;
use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, Origin};
use crate::enums::order_status::{OrderStatus, RecordedStatus};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID типа для заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for OrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
}

/// Заголовочные поля заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHeader {
    /// ID покупателя
    pub customer_ref: String,
    pub customer_name: String,
    /// ID продавца
    pub vendor_ref: String,
    pub currency: String,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub origin: Origin,
}

/// Строка заказа (позиция)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub line_id: String,
    pub product_ref: String,
    /// Название товара
    pub name: String,
    pub qty: f64,
    /// Цена за единицу
    pub unit_price: f64,
    /// Скидка на строку
    #[serde(default)]
    pub discount: Option<f64>,
}

impl OrderLine {
    /// Сумма строки после скидки, не меньше нуля
    pub fn amount(&self) -> f64 {
        let gross = self.qty * self.unit_price;
        (gross - self.discount.unwrap_or(0.0)).max(0.0)
    }

    pub fn gross(&self) -> f64 {
        self.qty * self.unit_price
    }
}

/// Зафиксированные моменты жизненного цикла (ISO 8601, как пришли из источника)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderTimestamps {
    pub created_at: Option<String>,
    pub shipped_at: Option<String>,
    pub delivered_at: Option<String>,
    pub cancelled_at: Option<String>,
    pub return_initiated_at: Option<String>,
    pub returned_at: Option<String>,
    pub replacement_initiated_at: Option<String>,
    pub replaced_at: Option<String>,
}

impl OrderTimestamps {
    /// Поле, которое заполняется при переходе в указанный статус
    fn slot_for(&mut self, status: OrderStatus) -> Option<&mut Option<String>> {
        match status {
            OrderStatus::Placed => Some(&mut self.created_at),
            OrderStatus::Shipped => Some(&mut self.shipped_at),
            OrderStatus::Delivered => Some(&mut self.delivered_at),
            OrderStatus::Cancelled => Some(&mut self.cancelled_at),
            OrderStatus::ReturnInitiated => Some(&mut self.return_initiated_at),
            OrderStatus::Returned => Some(&mut self.returned_at),
            OrderStatus::ReplacementInitiated => Some(&mut self.replacement_initiated_at),
            OrderStatus::Replaced => Some(&mut self.replaced_at),
            OrderStatus::InTransit
            | OrderStatus::Rejected
            | OrderStatus::ReturnPending
            | OrderStatus::ReplacementPending => None,
        }
    }
}

/// Заказ (агрегат)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(flatten)]
    pub base: BaseAggregate<OrderId>,

    pub header: OrderHeader,

    /// Строки заказа
    pub lines: Vec<OrderLine>,

    /// Текущий статус
    pub status: RecordedStatus,

    #[serde(default)]
    pub timestamps: OrderTimestamps,
}

impl Order {
    /// Новый заказ в статусе placed
    pub fn new_for_insert(
        code: String,
        description: String,
        header: OrderHeader,
        lines: Vec<OrderLine>,
    ) -> Self {
        let base = BaseAggregate::new(OrderId::new_v4(), code, description);
        let timestamps = OrderTimestamps {
            created_at: Some(format_instant(base.metadata.created_at)),
            ..OrderTimestamps::default()
        };
        Self {
            base,
            header,
            lines,
            status: RecordedStatus::Known(OrderStatus::Placed),
            timestamps,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Сумма строк до скидок
    pub fn items_total(&self) -> f64 {
        self.lines.iter().map(OrderLine::gross).sum()
    }

    /// Фактическая сумма скидок (после ограничения нулём по каждой строке)
    pub fn discount_total(&self) -> f64 {
        self.items_total() - self.total()
    }

    /// Итого к оплате
    pub fn total(&self) -> f64 {
        self.lines.iter().map(OrderLine::amount).sum()
    }

    /// Количество единиц товара
    pub fn items_count(&self) -> f64 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn validate(&self) -> Result<(), OrderError> {
        if self.base.description.trim().is_empty() {
            return Err(OrderError::Validation("Description must not be empty".into()));
        }
        if self.base.code.trim().is_empty() {
            return Err(OrderError::Validation("Code must not be empty".into()));
        }
        if self.header.customer_ref.trim().is_empty() {
            return Err(OrderError::Validation("Customer is required".into()));
        }
        if self.header.vendor_ref.trim().is_empty() {
            return Err(OrderError::Validation("Vendor is required".into()));
        }
        if self.lines.is_empty() {
            return Err(OrderError::Validation(
                "Order must contain at least one line".into(),
            ));
        }
        for line in &self.lines {
            if line.qty <= 0.0 {
                return Err(OrderError::Validation(format!(
                    "Line {}: quantity must be positive",
                    line.line_id
                )));
            }
            if line.unit_price < 0.0 {
                return Err(OrderError::Validation(format!(
                    "Line {}: price must not be negative",
                    line.line_id
                )));
            }
        }
        Ok(())
    }

    /// Перевести заказ в новый статус и зафиксировать момент перехода
    pub fn apply_status(&mut self, next: OrderStatus, at: DateTime<Utc>) -> Result<(), OrderError> {
        let current = self
            .status
            .known()
            .ok_or_else(|| OrderError::UnrecognizedStatus(self.status.as_str().to_string()))?;

        if !current.can_transition_to(next) {
            return Err(OrderError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        // Повторный вход в статус (возврат к delivered) не переписывает первый момент
        if let Some(slot) = self.timestamps.slot_for(next) {
            slot.get_or_insert_with(|| format_instant(at));
        }
        self.status = RecordedStatus::Known(next);
        self.base.touch();
        Ok(())
    }
}

impl AggregateRoot for Order {
    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "order"
    }

    fn element_name() -> &'static str {
        "Order"
    }

    fn list_name() -> &'static str {
        "Orders"
    }
}

/// DTO для создания заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDto {
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub header: OrderHeader,
    pub lines: Vec<OrderLine>,
}

/// Запрос на смену статуса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
}

fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
