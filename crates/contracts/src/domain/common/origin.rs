use serde::{Deserialize, Serialize};

/// Канал, через который создан заказ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Витрина (покупатель)
    Storefront,
    /// Кабинет продавца
    Vendor,
    /// Консоль администратора
    Admin,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Storefront => "storefront",
            Origin::Vendor => "vendor",
            Origin::Admin => "admin",
        }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Origin::Storefront
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
