//! Строка списка заказов и правила поиска/сортировки

use crate::shared::list_utils::{Searchable, Sortable};
use contracts::domain::a001_order::aggregate::Order;
use std::cmp::Ordering;

pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub code: String,
    pub customer_name: String,
    pub vendor_ref: String,
    pub status_code: String,
    pub status_name: String,
    pub created_at: String,
    pub total: f64,
    pub currency: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.to_string_id(),
            code: order.base.code.clone(),
            customer_name: order.header.customer_name.clone(),
            vendor_ref: order.header.vendor_ref.clone(),
            status_code: order.status.as_str().to_string(),
            status_name: order.status.display_name(),
            created_at: order.timestamps.created_at.clone().unwrap_or_default(),
            total: order.total(),
            currency: order.header.currency.clone(),
        }
    }
}

impl Searchable for OrderRow {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        self.code.to_lowercase().contains(filter_lower)
            || self.customer_name.to_lowercase().contains(filter_lower)
            || self.vendor_ref.to_lowercase().contains(filter_lower)
    }
}

impl Sortable for OrderRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => self.code.cmp(&other.code),
            "customer" => self
                .customer_name
                .to_lowercase()
                .cmp(&other.customer_name.to_lowercase()),
            "status" => self.status_name.cmp(&other.status_name),
            "total" => self
                .total
                .partial_cmp(&other.total)
                .unwrap_or(Ordering::Equal),
            _ => self.created_at.cmp(&other.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};

    fn row(code: &str, customer: &str, total: f64, created_at: &str) -> OrderRow {
        OrderRow {
            id: code.to_lowercase(),
            code: code.into(),
            customer_name: customer.into(),
            vendor_ref: "vendor-1".into(),
            status_code: "placed".into(),
            status_name: "Placed".into(),
            created_at: created_at.into(),
            total,
            currency: "USD".into(),
        }
    }

    #[test]
    fn test_search_and_sort() {
        let rows = vec![
            row("ORD-3", "alice", 10.0, "2024-01-03"),
            row("ORD-1", "Bob", 99.5, "2024-01-01"),
            row("ORD-2", "Alicia", 42.0, "2024-01-02"),
        ];

        let found = filter_list(rows.clone(), "ALI");
        assert_eq!(found.len(), 2);

        let mut sorted = rows;
        sort_list(&mut sorted, "total", false);
        assert_eq!(sorted[0].code, "ORD-1");
        sort_list(&mut sorted, "created_at", true);
        assert_eq!(sorted[0].code, "ORD-1");
        sort_list(&mut sorted, "customer", true);
        assert_eq!(sorted[0].customer_name, "alice");
    }
}
