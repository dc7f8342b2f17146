//! Deterministic demo catalogue used when no product store is configured.

use super::Product;

const PRODUCTS_PER_CATEGORY: u64 = 35;

const IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1610030469983-98e550d6193c?w=800",
    "https://images.unsplash.com/photo-1617627143750-d86bc21e42bb?w=800",
    "https://images.unsplash.com/photo-1610030469046-98bf6c561251?w=800",
    "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=800",
    "https://images.unsplash.com/photo-1583391733956-6c78276477e2?w=800",
    "https://images.unsplash.com/photo-1611916656173-875e4277bea6?w=800",
    "https://images.unsplash.com/photo-1583391265492-eb4a7b5d03f3?w=800",
    "https://images.unsplash.com/photo-1594633313593-bab3825d0caf?w=800",
];

const SWATCHES: &[&str] = &["#C2185B", "#FF7043", "#FFD54F", "#1565C0", "#4A148C", "#D32F2F", "#212121"];
const COLOR_NAMES: &[&str] =
    &["Pink", "Blue", "Red", "Green", "Yellow", "Purple", "Black", "White", "Orange", "Maroon"];
const SIZES: &[&str] = &["S", "M", "L", "XL", "XXL"];

struct Line {
    category: &'static str,
    names: [&'static str; 5],
    fabrics: [&'static str; 4],
    price_range: (u64, u64),
    free_size: bool,
}

const LINES: &[Line] = &[
    Line {
        category: "Kurti",
        names: ["Elegant", "Floral", "Printed", "Embroidered", "Festive"],
        fabrics: ["Cotton", "Rayon", "Georgette", "Crepe"],
        price_range: (1299, 2999),
        free_size: false,
    },
    Line {
        category: "Kurta Sets",
        names: ["Royal", "Premium", "Embellished", "Wedding", "Ethnic"],
        fabrics: ["Silk Blend", "Cotton", "Georgette", "Rayon"],
        price_range: (2499, 5999),
        free_size: false,
    },
    Line {
        category: "Sarees",
        names: ["Traditional", "Silk", "Banarasi", "Kanjivaram", "Party"],
        fabrics: ["Pure Silk", "Georgette", "Chiffon", "Cotton Silk"],
        price_range: (4999, 14999),
        free_size: true,
    },
    Line {
        category: "Ready to Wear Sarees",
        names: ["Pre-stitched", "Easy Drape", "Contemporary", "Working", "Fusion"],
        fabrics: ["Georgette", "Chiffon", "Silk Blend", "Crepe"],
        price_range: (1999, 4999),
        free_size: true,
    },
    Line {
        category: "Blouses",
        names: ["Embroidered", "Designer", "Plain", "Fancy", "Simple"],
        fabrics: ["Cotton", "Silk", "Georgette", "Brocade"],
        price_range: (599, 1999),
        free_size: false,
    },
    Line {
        category: "Lehengas",
        names: ["Bridal", "Sequin", "Heavy", "Grand", "Festive"],
        fabrics: ["Georgette", "Net", "Silk", "Velvet"],
        price_range: (7999, 24999),
        free_size: false,
    },
    Line {
        category: "Palazzos",
        names: ["Cotton", "Flowy", "Wide Leg", "Casual", "Trendy"],
        fabrics: ["Cotton", "Rayon", "Georgette", "Crepe"],
        price_range: (499, 1499),
        free_size: false,
    },
    Line {
        category: "Indo Western Dress",
        names: ["Fusion", "Cocktail", "Chic", "Stylish", "Party"],
        fabrics: ["Net", "Silk", "Georgette", "Crepe"],
        price_range: (3499, 8999),
        free_size: false,
    },
    Line {
        category: "Dupattas",
        names: ["Chiffon", "Lightweight", "Printed", "Silk", "Embroidered"],
        fabrics: ["Chiffon", "Georgette", "Silk", "Net"],
        price_range: (399, 1999),
        free_size: true,
    },
];

fn pick<'a>(items: &[&'a str], i: u64) -> &'a str {
    items[(i % items.len() as u64) as usize]
}

/// Builds the demo catalogue: 35 products per category with ids "1", "2", ...
///
/// Prices climb linearly across each category's range and discounts cycle
/// between 15% and 44%, so every run produces the same catalogue.
pub fn demo_catalogue() -> Vec<Product> {
    let mut products = Vec::new();
    let mut id = 1u64;

    for line in LINES {
        let (low, high) = line.price_range;

        for i in 0..PRODUCTS_PER_CATEGORY {
            let color = pick(COLOR_NAMES, i);
            let fabric = pick(&line.fabrics, i);
            let original_price = low + (high - low) * i / PRODUCTS_PER_CATEGORY;
            let discount_percent = 15 + (i * 7) % 30;
            let discount_price = original_price * (100 - discount_percent) / 100;

            let sizes = if line.free_size {
                vec!["Free Size".to_string()]
            } else {
                SIZES.iter().map(|s| (*s).to_string()).collect()
            };

            products.push(Product {
                id: id.to_string(),
                name: format!("{} {} {}", pick(&line.names, i), color, line.category),
                category: line.category.to_string(),
                fabric: Some(fabric.to_string()),
                description: format!(
                    "Beautiful {} {} perfect for all occasions.",
                    fabric,
                    line.category.to_lowercase()
                ),
                original_price,
                discount_price,
                discount_percent: discount_percent as u8,
                images: vec![pick(IMAGES, i).to_string(), pick(IMAGES, i + 1).to_string()],
                sizes,
                colors: (0..3).map(|k| pick(SWATCHES, i + k).to_string()).collect(),
                in_stock: i % 10 != 0,
                trending: i < 4,
                created_at: None,
                updated_at: None,
            });

            id += 1;
        }
    }

    products
}
