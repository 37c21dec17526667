//! Merchandising panel
//!
//! The subset of the product catalog attached to a session. Each product
//! is featured independently; any number may be active at once.

use tracing::info;

use crate::{
    models::{Product, ProductId},
    validation::{TextValidator, LABEL_MAX},
    Error, Result,
};

#[derive(Debug, Clone, Default)]
pub struct MerchandisingPanel {
    catalog: Vec<Product>,
    products: Vec<Product>,
}

impl MerchandisingPanel {
    /// Create a panel able to attach products from `catalog`
    #[must_use]
    pub const fn new(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            products: Vec::new(),
        }
    }

    pub fn add_product(&mut self, product: Product) -> Result<Product> {
        if product.id.as_str().trim().is_empty() {
            return Err(Error::InvalidInput("Product id may not be empty".to_string()));
        }
        let name = TextValidator::new("product name")
            .with_max_length(LABEL_MAX)
            .validate(&product.name)?;
        if !product.price.is_finite() || product.price < 0.0 {
            return Err(Error::InvalidInput(format!(
                "Product price must be a non-negative amount, got {}",
                product.price
            )));
        }
        if self.contains(&product.id) {
            return Err(Error::DuplicateEntry(format!(
                "Product {} is already attached",
                product.id
            )));
        }

        let product = Product { name, ..product };
        self.products.push(product.clone());

        info!(product_id = %product.id, name = %product.name, "Product attached");
        Ok(product)
    }

    /// Attach a copy of a catalog product, not yet featured
    pub fn attach_from_catalog(&mut self, product_id: &ProductId) -> Result<Product> {
        if self.contains(product_id) {
            return Err(Error::DuplicateEntry(format!(
                "Product {product_id} is already attached"
            )));
        }

        let product = self
            .catalog
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Product {product_id} is not in the catalog")))?;

        self.add_product(Product {
            active: false,
            ..product
        })
    }

    /// Flip the featured flag of exactly one product
    pub fn toggle_active(&mut self, product_id: &ProductId) -> Result<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .ok_or_else(|| Error::NotFound(format!("Product {product_id} is not attached")))?;

        product.active = !product.active;

        info!(product_id = %product.id, active = product.active, "Product toggled");
        Ok(product.clone())
    }

    /// Detach a product, featured or not
    pub fn remove_product(&mut self, product_id: &ProductId) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|p| &p.id == product_id)
            .ok_or_else(|| Error::NotFound(format!("Product {product_id} is not attached")))?;

        let removed = self.products.remove(index);
        info!(product_id = %removed.id, "Product removed");
        Ok(removed)
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == product_id)
    }

    pub fn get(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == product_id)
    }

    /// Attached products in attach order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn active_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.active)
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }
}
