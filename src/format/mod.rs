//! Output formatting for products (table, JSON, markdown, CSV).

use crate::catalogue::{CategoryCount, Product};
use crate::config::OutputFormat;
use crate::query::ResultSet;
use serde::Serialize;

/// Display-side price formatting in rupees.
fn rupees(amount: u64) -> String {
    format!("₹{}", amount)
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let head: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageJson<'a> {
    products: &'a [Product],
    page: usize,
    total_pages: usize,
    total_count: usize,
    min_price: u64,
    max_price: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailJson<'a> {
    #[serde(flatten)]
    product: &'a Product,
    #[serde(skip_serializing_if = "Option::is_none")]
    in_wishlist: Option<bool>,
}

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product in detail. `saved` is the wishlist state,
    /// `None` when nobody is signed in.
    pub fn format_product(&self, product: &Product, saved: Option<bool>) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product, saved),
            OutputFormat::Table => self.table_single(product, saved),
            OutputFormat::Markdown => self.markdown_single(product, saved),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => {
                let mut out = self.table_products(products);
                out.push_str(&format!("\n\nTotal: {} products", products.len()));
                out
            }
            OutputFormat::Markdown => {
                let mut out = self.markdown_products(products);
                out.push_str(&format!("\n\n*{} products*", products.len()));
                out
            }
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    /// Formats one page of a query result with its paging footer.
    pub fn format_result(&self, result: &ResultSet) -> String {
        match self.format {
            OutputFormat::Json => {
                let page = PageJson {
                    products: &result.page,
                    page: result.page_number,
                    total_pages: result.total_pages,
                    total_count: result.total_count,
                    min_price: result.min_price,
                    max_price: result.max_price,
                };
                serde_json::to_string_pretty(&page).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Csv => {
                if result.page.is_empty() {
                    self.csv_header()
                } else {
                    self.csv_products(&result.page)
                }
            }
            OutputFormat::Table | OutputFormat::Markdown if result.is_empty() => {
                "No products match the current filters.".to_string()
            }
            OutputFormat::Table => {
                format!("{}\n\n{}", self.table_products(&result.page), Self::footer(result))
            }
            OutputFormat::Markdown => {
                format!("{}\n\n*{}*", self.markdown_products(&result.page), Self::footer(result))
            }
        }
    }

    /// Formats category names with their product counts.
    pub fn format_categories(&self, counts: &[CategoryCount]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(counts).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let mut lines = vec!["category,count".to_string()];
                lines.extend(
                    counts.iter().map(|c| format!("{},{}", Self::csv_escape(&c.name), c.count)),
                );
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines =
                    vec!["| Category | Products |".to_string(), "|----------|----------|".to_string()];
                lines.extend(counts.iter().map(|c| format!("| {} | {} |", c.name, c.count)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("{:<24}  {:>8}", "Category", "Products"),
                    format!("{:-<24}  {:->8}", "", ""),
                ];
                lines.extend(counts.iter().map(|c| format!("{:<24}  {:>8}", c.name, c.count)));
                lines.join("\n")
            }
        }
    }

    fn footer(result: &ResultSet) -> String {
        format!(
            "Page {} of {} | {} products | prices {} - {}",
            result.page_number,
            result.total_pages,
            result.total_count,
            rupees(result.min_price),
            rupees(result.max_price)
        )
    }

    // JSON formatting

    fn json_single(&self, product: &Product, saved: Option<bool>) -> String {
        let detail = DetailJson { product, in_wishlist: saved };
        serde_json::to_string_pretty(&detail).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product, saved: Option<bool>) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.id));
        lines.push(format!("Name:     {}", product.name));
        lines.push(format!("Category: {}", product.category));

        if let Some(fabric) = &product.fabric {
            lines.push(format!("Fabric:   {}", fabric));
        }

        if product.is_discounted() {
            lines.push(format!(
                "Price:    {} (was {}, {}% off)",
                rupees(product.discount_price),
                rupees(product.original_price),
                product.discount_percent
            ));
        } else {
            lines.push(format!("Price:    {}", rupees(product.discount_price)));
        }

        if !product.sizes.is_empty() {
            lines.push(format!("Sizes:    {}", product.sizes.join(", ")));
        }
        if !product.colors.is_empty() {
            lines.push(format!("Colors:   {}", product.colors.join(", ")));
        }

        lines.push(format!(
            "Stock:    {}",
            if product.in_stock { "In Stock" } else { "Out of Stock" }
        ));

        if product.trending {
            lines.push("Badges:   Trending".to_string());
        }

        if let Some(saved) = saved {
            lines.push(format!("Wishlist: {}", if saved { "Saved" } else { "Not saved" }));
        }

        if let Some(cover) = product.cover_image() {
            lines.push(format!("Image:    {}", cover));
        }

        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 6;
        let category_width = 20;
        let price_width = 10;
        let off_width = 4;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<category_width$}  {:>price_width$}  {:>off_width$}  {}",
            "ID", "Category", "Price", "Off", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<category_width$}  {:->price_width$}  {:->off_width$}  {:-<name_width$}",
            "", "", "", "", ""
        ));

        for product in products {
            let off = if product.discount_percent > 0 {
                format!("{}%", product.discount_percent)
            } else {
                String::new()
            };

            let mut name = truncate(&product.name, name_width);
            if !product.in_stock {
                name.push_str(" (sold out)");
            }

            lines.push(format!(
                "{:<id_width$}  {:<category_width$}  {:>price_width$}  {:>off_width$}  {}",
                truncate(&product.id, id_width),
                truncate(&product.category, category_width),
                rupees(product.discount_price),
                off,
                name
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, product: &Product, saved: Option<bool>) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.name));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", product.id));
        lines.push(format!("- **Category:** {}", product.category));

        if let Some(fabric) = &product.fabric {
            lines.push(format!("- **Fabric:** {}", fabric));
        }

        if product.is_discounted() {
            lines.push(format!(
                "- **Price:** {} ~~{}~~ ({}% off)",
                rupees(product.discount_price),
                rupees(product.original_price),
                product.discount_percent
            ));
        } else {
            lines.push(format!("- **Price:** {}", rupees(product.discount_price)));
        }

        if !product.in_stock {
            lines.push("- **Out of stock**".to_string());
        }

        if saved == Some(true) {
            lines.push("- ♥ In your wishlist".to_string());
        }

        if let Some(cover) = product.cover_image() {
            lines.push(String::new());
            lines.push(format!("![{}]({})", product.name, cover));
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Category | Price | Off | Name |".to_string());
        lines.push("|----|----------|-------|-----|------|".to_string());

        for product in products {
            lines.push(format!(
                "| {} | {} | {} | {}% | {} |",
                product.id,
                product.category,
                rupees(product.discount_price),
                product.discount_percent,
                truncate(&product.name, 40)
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,name,category,fabric,original_price,discount_price,discount_percent,in_stock,trending,image"
            .to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let fabric = product.fabric.as_deref().map(Self::csv_escape).unwrap_or_default();
            let image = product.cover_image().map(Self::csv_escape).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&product.id),
                Self::csv_escape(&product.name),
                Self::csv_escape(&product.category),
                fabric,
                product.original_price,
                product.discount_price,
                product.discount_percent,
                product.in_stock,
                product.trending,
                image
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
