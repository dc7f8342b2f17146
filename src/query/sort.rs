//! Sort orders for query results.

use crate::catalogue::Product;
use serde::{Deserialize, Serialize};

/// How matched products are ordered. All orders are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the snapshot order
    #[default]
    Relevance,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Biggest stored discount first
    DiscountDesc,
}

impl SortKey {
    /// All sort keys in menu order.
    pub fn all() -> &'static [SortKey] {
        &[SortKey::Relevance, SortKey::PriceAsc, SortKey::PriceDesc, SortKey::DiscountDesc]
    }

    /// Parameter value for this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::DiscountDesc => "discount-desc",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Relevance => "Relevance",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::DiscountDesc => "Discount: High to Low",
        }
    }

    /// Parses a parameter value, falling back to relevance for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Sorts products in place. Equal keys keep their relative order.
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            SortKey::Relevance => {}
            SortKey::PriceAsc => products.sort_by_key(|p| p.discount_price),
            SortKey::PriceDesc => products.sort_by(|a, b| b.discount_price.cmp(&a.discount_price)),
            // Uses the stored percentage, which may disagree with the prices
            SortKey::DiscountDesc => {
                products.sort_by(|a, b| b.discount_percent.cmp(&a.discount_percent))
            }
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(SortKey::Relevance),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "discount-desc" => Ok(SortKey::DiscountDesc),
            _ => Err(format!(
                "Unknown sort: {}. Use: relevance, price-asc, price-desc, discount-desc",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(id: &str, price: u64, percent: u8) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            category: "Kurti".to_string(),
            fabric: None,
            description: String::new(),
            original_price: 10_000,
            discount_price: price,
            discount_percent: percent,
            images: vec!["https://img.example/1.jpg".to_string()],
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            trending: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_relevance_keeps_order() {
        let mut products =
            vec![make_product("a", 300, 10), make_product("b", 100, 50), make_product("c", 200, 30)];
        SortKey::Relevance.apply(&mut products);
        assert_eq!(ids(&products), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_price_asc() {
        let mut products =
            vec![make_product("a", 300, 10), make_product("b", 100, 50), make_product("c", 200, 30)];
        SortKey::PriceAsc.apply(&mut products);
        assert_eq!(ids(&products), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_price_desc_is_stable() {
        let mut products = vec![
            make_product("a", 100, 0),
            make_product("b", 300, 0),
            make_product("c", 100, 0),
            make_product("d", 300, 0),
        ];
        SortKey::PriceDesc.apply(&mut products);
        assert_eq!(ids(&products), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_discount_desc_is_stable() {
        let mut products =
            vec![make_product("a", 1, 20), make_product("b", 1, 20), make_product("c", 1, 50)];
        SortKey::DiscountDesc.apply(&mut products);
        assert_eq!(ids(&products), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_discount_uses_stored_percent() {
        // "a" has a stale percentage that disagrees with its prices
        let mut products = vec![make_product("a", 9_000, 80), make_product("b", 1_000, 10)];
        SortKey::DiscountDesc.apply(&mut products);
        assert_eq!(ids(&products), vec!["a", "b"]);
    }

    #[test]
    fn test_parsing() {
        assert_eq!("relevance".parse::<SortKey>().unwrap(), SortKey::Relevance);
        assert_eq!("price-asc".parse::<SortKey>().unwrap(), SortKey::PriceAsc);
        assert_eq!("price-desc".parse::<SortKey>().unwrap(), SortKey::PriceDesc);
        assert_eq!("discount-desc".parse::<SortKey>().unwrap(), SortKey::DiscountDesc);

        let err = "newest".parse::<SortKey>().unwrap_err();
        assert!(err.contains("Unknown sort"));
    }

    #[test]
    fn test_parse_or_default() {
        assert_eq!(SortKey::parse_or_default("price-desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse_or_default("PRICE-DESC"), SortKey::Relevance);
        assert_eq!(SortKey::parse_or_default(""), SortKey::Relevance);
    }

    #[test]
    fn test_display_roundtrip() {
        for key in SortKey::all() {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&SortKey::DiscountDesc).unwrap();
        assert_eq!(json, "\"discount-desc\"");

        let parsed: SortKey = serde_json::from_str("\"price-asc\"").unwrap();
        assert_eq!(parsed, SortKey::PriceAsc);
    }
}
