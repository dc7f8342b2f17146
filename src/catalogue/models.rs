//! Data models for catalogue products and the admin payloads that create them.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogue entry as stored in the product document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque document id
    pub id: String,
    /// Display name
    pub name: String,
    /// Category name
    pub category: String,
    /// Fabric label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// List price
    pub original_price: u64,
    /// Selling price (never above `original_price`)
    pub discount_price: u64,
    /// Stored discount percentage; may drift from the prices
    #[serde(default)]
    pub discount_percent: u8,
    /// Image URLs, first one is the cover
    pub images: Vec<String>,
    /// Size labels
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    /// Color swatches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    /// Whether the product is currently in stock
    #[serde(rename = "stock")]
    pub in_stock: bool,
    /// Whether the product is featured as trending
    #[serde(default)]
    pub trending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the cover image URL.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns the amount saved against the list price.
    pub fn savings(&self) -> u64 {
        self.original_price.saturating_sub(self.discount_price)
    }

    /// Returns true if the product sells below its list price.
    pub fn is_discounted(&self) -> bool {
        self.discount_price < self.original_price
    }
}

/// Derives the discount percentage from list and selling price.
///
/// Rounds half up, so 12.5% becomes 13%. A zero list price yields 0.
pub fn derive_discount_percent(original: u64, discount: u64) -> u8 {
    if original == 0 {
        return 0;
    }

    let saved = u128::from(original.saturating_sub(discount));
    let original = u128::from(original);
    let percent = (saved * 200 + original) / (original * 2);

    percent.min(100) as u8
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    pub original_price: u64,
    pub discount_price: u64,
    /// Explicit discount; derived from the prices when absent or zero
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(rename = "stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub trending: bool,
}

impl ProductInput {
    /// Checks the required fields and the price invariant.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingField("category"));
        }
        if self.original_price == 0 {
            return Err(ValidationError::MissingField("original price"));
        }
        if self.images.is_empty() {
            return Err(ValidationError::MissingField("images"));
        }
        check_prices(self.original_price, self.discount_price)
    }

    /// Returns the discount percentage the stored record should carry.
    pub fn effective_discount_percent(&self) -> u8 {
        match self.discount_percent {
            Some(percent) if percent > 0 => percent.min(100),
            _ => derive_discount_percent(self.original_price, self.discount_price),
        }
    }

    /// Builds the stored product under the given id.
    pub fn into_product(self, id: impl Into<String>, now: DateTime<Utc>) -> Product {
        let discount_percent = self.effective_discount_percent();

        Product {
            id: id.into(),
            name: self.name,
            category: self.category,
            fabric: self.fabric.filter(|f| !f.trim().is_empty()),
            description: self.description,
            original_price: self.original_price,
            discount_price: self.discount_price,
            discount_percent,
            images: self.images,
            sizes: self.sizes,
            colors: self.colors,
            in_stock: self.in_stock,
            trending: self.trending,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }
}

/// Partial update for an existing product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, rename = "stock", skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending: Option<bool>,
}

impl ProductPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks the fields the patch sets. Prices are checked against each other
    /// only when both are present; `apply` checks the merged record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(ValidationError::MissingField("name"));
        }
        if matches!(&self.category, Some(category) if category.trim().is_empty()) {
            return Err(ValidationError::MissingField("category"));
        }
        if self.original_price == Some(0) {
            return Err(ValidationError::MissingField("original price"));
        }
        if matches!(&self.images, Some(images) if images.is_empty()) {
            return Err(ValidationError::MissingField("images"));
        }
        if let (Some(original), Some(discount)) = (self.original_price, self.discount_price) {
            check_prices(original, discount)?;
        }
        Ok(())
    }

    /// Applies the patch to a product, re-deriving the discount percentage
    /// when a price changes and no explicit percentage is given.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) -> Result<(), ValidationError> {
        self.validate()?;

        let original_price = self.original_price.unwrap_or(product.original_price);
        let discount_price = self.discount_price.unwrap_or(product.discount_price);
        check_prices(original_price, discount_price)?;

        let prices_changed = original_price != product.original_price
            || discount_price != product.discount_price;

        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(fabric) = self.fabric {
            product.fabric = Some(fabric).filter(|f| !f.trim().is_empty());
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(sizes) = self.sizes {
            product.sizes = sizes;
        }
        if let Some(colors) = self.colors {
            product.colors = colors;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(trending) = self.trending {
            product.trending = trending;
        }

        product.original_price = original_price;
        product.discount_price = discount_price;

        match self.discount_percent {
            Some(percent) if percent > 0 => product.discount_percent = percent.min(100),
            _ if prices_changed => {
                product.discount_percent = derive_discount_percent(original_price, discount_price)
            }
            _ => {}
        }

        product.updated_at = Some(now);
        Ok(())
    }
}

fn check_prices(original: u64, discount: u64) -> Result<(), ValidationError> {
    if discount > original {
        return Err(ValidationError::DiscountAboveOriginal { original, discount });
    }
    Ok(())
}
