use crate::domain::catalog::{NewProduct, ProductChanges, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;

/// Product catalog with review aggregates.
pub struct CatalogService<P> {
    products: P,
}

impl<P: ProductRepository> CatalogService<P> {
    pub fn new(products: P) -> Self {
        Self { products }
    }

    pub fn list_products(&self) -> Result<Vec<ProductView>, DomainError> {
        self.products.list_with_aggregates()
    }

    pub fn get_product(&self, id: &str) -> Result<ProductView, DomainError> {
        self.products
            .find_with_aggregates(id)?
            .ok_or_else(|| DomainError::not_found("Product"))
    }

    pub fn create_product(&self, product: NewProduct) -> Result<ProductView, DomainError> {
        product.validate()?;
        if self.products.exists(&product.id)? {
            return Err(DomainError::Conflict("Product ID already exists".to_string()));
        }
        let id = product.id.clone();
        self.products.create(product)?;
        log::info!("product {id} created");

        self.products.find_with_aggregates(&id)?.ok_or_else(|| {
            DomainError::Internal(format!("product {id} missing right after creation"))
        })
    }

    pub fn update_product(
        &self,
        id: &str,
        changes: ProductChanges,
    ) -> Result<ProductView, DomainError> {
        changes.validate()?;
        let found = if changes.is_empty() {
            self.products.exists(id)?
        } else {
            self.products.update(id, changes)?
        };
        if !found {
            return Err(DomainError::not_found("Product"));
        }
        log::info!("product {id} updated");
        self.get_product(id)
    }

    /// Delete a product. Its reviews, cart lines and order lines go with it.
    pub fn delete_product(&self, id: &str) -> Result<(), DomainError> {
        if !self.products.delete(id)? {
            return Err(DomainError::not_found("Product"));
        }
        log::warn!("product {id} deleted together with its reviews, cart and order lines");
        Ok(())
    }

    pub fn product_description(&self, id: &str) -> Result<String, DomainError> {
        self.products
            .description(id)?
            .map(Option::unwrap_or_default)
            .ok_or_else(|| DomainError::not_found("Product"))
    }
}
