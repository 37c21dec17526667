use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product; `active` means currently featured on the broadcast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub active: bool,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            active: false,
        }
    }
}
