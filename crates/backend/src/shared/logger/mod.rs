pub mod repository;

use repository::log_event_internal;

/// Логирование события на сервере
///
/// Запись сохраняется в `system_log` в отдельной задаче tokio.
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
