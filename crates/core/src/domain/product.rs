use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Quantity above which the bulk discount kicks in.
pub const BULK_DISCOUNT_THRESHOLD: i64 = 100;

/// Longest accepted product description, mirroring the storage column limit.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted inventory item. `id` is `None` until the storage layer
/// assigns one on first save and is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<ProductId>,
    pub name: String,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Raw product fields as submitted by a caller. Every field is optional so
/// that missing values surface as domain validation errors rather than
/// deserialization failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProductDraft {
    /// Checks the field invariants and produces an unsaved product.
    pub fn into_product(self) -> Result<Product, DomainError> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(DomainError::Validation(
                    "product name cannot be empty".to_string(),
                ))
            }
        };

        let price = self.price.ok_or_else(|| {
            DomainError::Validation("product price must be greater than 0".to_string())
        })?;
        if price <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "product price must be greater than 0".to_string(),
            ));
        }

        let quantity = self.quantity.ok_or_else(|| {
            DomainError::Validation("product quantity cannot be negative".to_string())
        })?;
        if quantity < 0 {
            return Err(DomainError::Validation(
                "product quantity cannot be negative".to_string(),
            ));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_CHARS {
                return Err(DomainError::Validation(format!(
                    "product description must be at most {MAX_DESCRIPTION_CHARS} characters"
                )));
            }
        }

        Ok(Product { id: None, name, price, quantity, description: self.description })
    }
}

impl Product {
    /// Applies the 10% bulk discount when the current quantity exceeds the
    /// threshold. Evaluated fresh on every create and update; never memoized,
    /// so repeated updates above the threshold compound.
    pub fn apply_bulk_discount(&mut self) {
        if self.quantity > BULK_DISCOUNT_THRESHOLD {
            self.price *= Decimal::new(9, 1);
        }
    }
}

/// Total inventory value: `sum(price * quantity)` over the given records.
pub fn inventory_value(products: &[Product]) -> Decimal {
    products.iter().map(|product| product.price * Decimal::from(product.quantity)).sum()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{inventory_value, Product, ProductDraft, ProductId};
    use crate::errors::DomainError;

    fn draft(name: &str, price: Decimal, quantity: i64) -> ProductDraft {
        ProductDraft {
            name: Some(name.to_string()),
            price: Some(price),
            quantity: Some(quantity),
            description: None,
        }
    }

    #[test]
    fn valid_draft_becomes_unsaved_product() {
        let product = draft("Widget", Decimal::new(1000, 2), 5)
            .into_product()
            .expect("draft should validate");

        assert_eq!(product.id, None);
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 5);
    }

    #[test]
    fn missing_and_empty_names_are_rejected() {
        let missing = ProductDraft {
            price: Some(Decimal::ONE),
            quantity: Some(1),
            ..ProductDraft::default()
        };
        assert!(matches!(missing.into_product(), Err(DomainError::Validation(_))));

        let empty = draft("", Decimal::ONE, 1);
        assert!(matches!(empty.into_product(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn non_positive_prices_are_rejected() {
        assert!(draft("Widget", Decimal::ZERO, 1).into_product().is_err());
        assert!(draft("Widget", Decimal::new(-100, 2), 1).into_product().is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(draft("Widget", Decimal::ONE, -1).into_product().is_err());
    }

    #[test]
    fn overlong_description_is_rejected() {
        let mut candidate = draft("Widget", Decimal::ONE, 1);
        candidate.description = Some("x".repeat(501));
        assert!(candidate.into_product().is_err());

        let mut boundary = draft("Widget", Decimal::ONE, 1);
        boundary.description = Some("x".repeat(500));
        assert!(boundary.into_product().is_ok());
    }

    #[test]
    fn discount_applies_only_above_threshold() {
        let mut above = Product {
            id: None,
            name: "Widget".to_string(),
            price: Decimal::new(1000, 2),
            quantity: 150,
            description: None,
        };
        above.apply_bulk_discount();
        assert_eq!(above.price, Decimal::new(900, 2));

        let mut at_threshold = Product { quantity: 100, ..above.clone() };
        at_threshold.price = Decimal::new(1000, 2);
        at_threshold.apply_bulk_discount();
        assert_eq!(at_threshold.price, Decimal::new(1000, 2));
    }

    #[test]
    fn inventory_value_sums_price_times_quantity() {
        let products = vec![
            Product {
                id: Some(ProductId(1)),
                name: "Widget".to_string(),
                price: Decimal::new(900, 2),
                quantity: 150,
                description: None,
            },
            Product {
                id: Some(ProductId(2)),
                name: "Gadget".to_string(),
                price: Decimal::new(500, 2),
                quantity: 2,
                description: None,
            },
        ];

        assert_eq!(inventory_value(&products), Decimal::new(136_000, 2));
        assert_eq!(inventory_value(&[]), Decimal::ZERO);
    }
}
