//! Products Data

use serde::Deserialize;

use crate::{
    domain::products::records::{ProductRecord, ProductUuid},
    validation::{ValidationError, require_amount, require_text},
};

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub stock: u64,
    pub category: String,
    pub code: String,
    pub available: bool,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns the first blank required field, or an amount too large to store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("category", &self.category)?;
        require_text("code", &self.code)?;
        require_amount("price", self.price)?;
        require_amount("stock", self.stock)?;

        Ok(())
    }
}

/// Product Update Data
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u64>,
    pub category: Option<String>,
    pub code: Option<String>,
    pub available: Option<bool>,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns the first supplied field that is blank or too large to store.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("code", &self.code),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }

        for (field, value) in [("price", self.price), ("stock", self.stock)] {
            if let Some(value) = value {
                require_amount(field, value)?;
            }
        }

        Ok(())
    }
}

/// Result of a conditional stock decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockDecrement {
    /// Stock covered the quantity and was reduced.
    Applied(ProductRecord),

    /// Stock was insufficient, or the product no longer exists.
    Rejected,
}
