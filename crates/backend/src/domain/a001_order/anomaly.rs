use contracts::domain::a001_order::timeline::StatusAnomalySink;
use contracts::shared::logger::CATEGORY_ORDER_STATUS;

use crate::shared::logger;

/// Сообщает о неизвестных статусах в tracing и в системный лог
pub struct ServerAnomalySink;

impl StatusAnomalySink for ServerAnomalySink {
    fn unrecognized_status(&self, order_ref: &str, raw_status: &str) {
        let message = anomaly_message(order_ref, raw_status);
        tracing::warn!("{}", message);
        logger::log(CATEGORY_ORDER_STATUS, &message);
    }
}

pub fn anomaly_message(order_ref: &str, raw_status: &str) -> String {
    format!(
        "Order {} has unrecognized status '{}', timeline shown as placed only",
        order_ref, raw_status
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anomaly_message() {
        assert_eq!(
            anomaly_message("42", "archived"),
            "Order 42 has unrecognized status 'archived', timeline shown as placed only"
        );
    }
}
