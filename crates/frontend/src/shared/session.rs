//! Контекст текущего пользователя консоли.
//!
//! Передаётся через `provide_context` и только читается компонентами.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Покупатель на витрине
    Customer,
    /// Продавец
    Vendor,
    /// Администратор
    Admin,
}

impl Role {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "customer" => Some(Role::Customer),
            "vendor" => Some(Role::Vendor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Vendor => "Vendor console",
            Role::Admin => "Admin console",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub role: Role,
}

impl SessionContext {
    /// Роль из строки запроса страницы (`?role=vendor`), по умолчанию покупатель
    pub fn from_query(search: &str) -> Self {
        let role = search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "role")
            .and_then(|(_, value)| Role::from_code(value))
            .unwrap_or(Role::Customer);
        Self { role }
    }

    /// Контекст из адреса текущей страницы
    pub fn from_location() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        Self::from_query(&search)
    }

    /// Может ли пользователь менять статус заказа
    pub fn can_change_status(&self) -> bool {
        matches!(self.role, Role::Vendor | Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        assert_eq!(SessionContext::from_query("?role=vendor").role, Role::Vendor);
        assert_eq!(SessionContext::from_query("?x=1&role=ADMIN").role, Role::Admin);
        assert_eq!(SessionContext::from_query("").role, Role::Customer);
        assert_eq!(SessionContext::from_query("?role=root").role, Role::Customer);
    }

    #[test]
    fn test_can_change_status() {
        assert!(!SessionContext { role: Role::Customer }.can_change_status());
        assert!(SessionContext { role: Role::Vendor }.can_change_status());
    }
}
