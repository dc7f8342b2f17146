//! HTTP client for the remote product document store.

use super::{ProductStore, WishlistStore};
use crate::catalogue::{Product, ProductInput, ProductPatch};
use crate::config::Config;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::{Client, RequestBuilder, Response};

#[derive(Deserialize)]
struct Created {
    id: String,
}

/// JSON document store client.
///
/// Products live under `/products`, wishlists under `/wishlists/{user}`.
pub struct HttpStore {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpStore {
    /// Creates a client for the configured `store_url`.
    pub fn new(config: &Config) -> Result<Self> {
        let Some(base_url) = config.store_url.clone() else {
            bail!("No product store URL configured");
        };

        Self::with_base_url(config, base_url)
    }

    /// Creates a client for an explicit base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        let mut builder = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        let base_url: String = base_url.into();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn product_url(&self, id: &str) -> String {
        self.url(&format!("/products/{}", urlencoding::encode(id)))
    }

    fn wishlist_url(&self, user_id: &str) -> String {
        self.url(&format!("/wishlists/{}", urlencoding::encode(user_id)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("Accept", "application/json");

        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    fn json(request: RequestBuilder, body: &Value) -> Result<RequestBuilder> {
        let body = serde_json::to_string(body).context("Failed to encode request body")?;
        Ok(request.header("Content-Type", "application/json").body(body))
    }

    /// Sends the request and fails on any non-success status.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .with_context(|| format!("Failed to {}", what))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 401 || status == 403 {
            warn!("Product store rejected credentials ({})", status);
            bail!("Not authorized to {} (status {}). Check the API key.", what, status);
        }

        if !status.is_success() {
            bail!("Failed to {}: request failed with status: {}", what, status);
        }

        Ok(response)
    }

    async fn fetch_products(&self, url: &str, what: &str) -> Result<Vec<Product>> {
        debug!("GET {}", url);

        let body = self
            .send(self.client.get(url), what)
            .await?
            .text()
            .await
            .context("Failed to read response body")?;

        serde_json::from_str(&body).with_context(|| format!("Failed to decode products ({})", what))
    }
}

#[async_trait]
impl ProductStore for HttpStore {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.fetch_products(&self.url("/products"), "fetch products").await?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let url = self.product_url(id);
        debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch product")?;

        let status = response.status();
        if status == 404 {
            debug!("Product {} not found", id);
            return Ok(None);
        }
        if !status.is_success() {
            bail!("Failed to fetch product {}: request failed with status: {}", id, status);
        }

        let body = response.text().await.context("Failed to read response body")?;
        let product = serde_json::from_str(&body)
            .with_context(|| format!("Failed to decode product {}", id))?;

        Ok(Some(product))
    }

    async fn products_by_category(&self, category: &str) -> Result<Vec<Product>> {
        let url = self.url(&format!("/products?category={}", urlencoding::encode(category)));
        self.fetch_products(&url, "fetch products by category").await
    }

    async fn trending_products(&self) -> Result<Vec<Product>> {
        let url = self.url("/products?trending=true");
        self.fetch_products(&url, "fetch trending products").await
    }

    async fn add_product(&self, input: ProductInput) -> Result<String> {
        let url = self.url("/products");
        debug!("POST {}", url);

        // The store assigns the id; the document carries the derived fields.
        let product = input.into_product(String::new(), Utc::now());
        let mut body = serde_json::to_value(&product).context("Failed to encode product")?;
        if let Some(fields) = body.as_object_mut() {
            fields.remove("id");
        }

        let response = self.send(Self::json(self.client.post(&url), &body)?, "add product").await?;

        let text = response.text().await.context("Failed to read response body")?;
        let created: Created =
            serde_json::from_str(&text).context("Failed to decode created product id")?;

        info!("Added product {}", created.id);
        Ok(created.id)
    }

    async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<()> {
        let Some(current) = self.get_product(id).await? else {
            bail!("Product not found: {}", id);
        };

        let mut merged = current;
        patch.clone().apply(&mut merged, Utc::now())?;

        let mut body = serde_json::to_value(&patch).context("Failed to encode product update")?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert("discountPercent".to_string(), Value::from(merged.discount_percent));
            fields.insert(
                "updatedAt".to_string(),
                serde_json::to_value(merged.updated_at).context("Failed to encode timestamp")?,
            );
        }

        let url = self.product_url(id);
        debug!("PATCH {}", url);
        self.send(Self::json(self.client.patch(&url), &body)?, "update product").await?;

        info!("Updated product {}", id);
        Ok(())
    }

    async fn delete_product(&self, id: &str) -> Result<()> {
        let url = self.product_url(id);
        debug!("DELETE {}", url);

        self.send(self.client.delete(&url), "delete product").await?;

        info!("Deleted product {}", id);
        Ok(())
    }
}

#[async_trait]
impl WishlistStore for HttpStore {
    async fn wishlist(&self, user_id: &str) -> Result<Vec<String>> {
        let url = self.wishlist_url(user_id);
        debug!("GET {}", url);

        let body = self
            .send(self.client.get(&url), "fetch wishlist")
            .await?
            .text()
            .await
            .context("Failed to read response body")?;

        serde_json::from_str(&body).context("Failed to decode wishlist")
    }

    async fn add_to_wishlist(&self, user_id: &str, product_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.wishlist_url(user_id), urlencoding::encode(product_id));
        debug!("PUT {}", url);

        self.send(self.client.put(&url), "add to wishlist").await?;
        Ok(())
    }

    async fn remove_from_wishlist(&self, user_id: &str, product_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.wishlist_url(user_id), urlencoding::encode(product_id));
        debug!("DELETE {}", url);

        self.send(self.client.delete(&url), "remove from wishlist").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::demo_catalogue;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_test_config() -> Config {
        Config { timeout_secs: 5, ..Config::default() }
    }

    fn products_json(count: usize) -> String {
        let products: Vec<Product> = demo_catalogue().into_iter().take(count).collect();
        serde_json::to_string(&products).unwrap()
    }

    fn make_input() -> ProductInput {
        ProductInput {
            name: "Silk Saree".to_string(),
            description: String::new(),
            category: "Sarees".to_string(),
            fabric: None,
            original_price: 5000,
            discount_price: 4000,
            discount_percent: None,
            images: vec!["https://img.example/s.jpg".to_string()],
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            trending: true,
        }
    }

    #[test]
    fn test_new_requires_url() {
        let result = HttpStore::new(&Config::default());
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("No product store URL"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let store = HttpStore::with_base_url(&make_test_config(), "http://store.local/").unwrap();
        assert_eq!(store.url("/products"), "http://store.local/products");
        assert_eq!(store.product_url("a b"), "http://store.local/products/a%20b");
    }

    #[tokio::test]
    async fn test_list_products() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string(products_json(3)))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        let products = store.list_products().await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, "1");
    }

    #[tokio::test]
    async fn test_api_key_sent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&mock_server)
            .await;

        let config = Config { api_key: Some("secret".to_string()), ..make_test_config() };
        let store = HttpStore::with_base_url(&config, mock_server.uri()).unwrap();

        assert!(store.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        let err = store.list_products().await.unwrap_err().to_string();
        assert!(err.contains("Not authorized"));
    }

    #[tokio::test]
    async fn test_http_error_500() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        let err = store.list_products().await.unwrap_err().to_string();
        assert!(err.contains("500"));
    }

    #[tokio::test]
    async fn test_invalid_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        let err = store.list_products().await.unwrap_err().to_string();
        assert!(err.contains("Failed to decode products"));
    }

    #[tokio::test]
    async fn test_get_product() {
        let mock_server = MockServer::start().await;
        let product = demo_catalogue().remove(0);

        Mock::given(method("GET"))
            .and(path("/products/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(serde_json::to_string(&product).unwrap()),
            )
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        assert_eq!(store.get_product("1").await.unwrap(), Some(product));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        assert_eq!(store.get_product("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_products_by_category() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("category", "Kurta Sets"))
            .respond_with(ResponseTemplate::new(200).set_body_string(products_json(2)))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        assert_eq!(store.products_by_category("Kurta Sets").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_trending_products() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("trending", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(products_json(1)))
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        assert_eq!(store.trending_products().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_product() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/products"))
            .and(body_partial_json(serde_json::json!({
                "name": "Silk Saree",
                "originalPrice": 5000,
                "discountPercent": 20,
                "stock": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":"doc-42"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        assert_eq!(store.add_product(make_input()).await.unwrap(), "doc-42");

        let requests = mock_server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(body.get("id").is_none());
        assert!(body["createdAt"].is_string());
        assert_eq!(body["createdAt"], body["updatedAt"]);
    }

    #[tokio::test]
    async fn test_update_product() {
        let mock_server = MockServer::start().await;
        let current = make_input().into_product("doc-42", Utc::now() - chrono::Duration::days(1));

        Mock::given(method("GET"))
            .and(path("/products/doc-42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(serde_json::to_string(&current).unwrap()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("PATCH"))
            .and(path("/products/doc-42"))
            .and(body_partial_json(serde_json::json!({
                "discountPrice": 3500,
                "discountPercent": 30
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        let patch = ProductPatch { discount_price: Some(3500), ..Default::default() };
        store.update_product("doc-42", patch).await.unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let patched = requests.iter().find(|r| r.method.as_str() == "PATCH").unwrap();
        let body: Value = serde_json::from_slice(&patched.body).unwrap();
        assert!(body["updatedAt"].is_string());
        assert_ne!(body["updatedAt"], serde_json::to_value(current.updated_at).unwrap());
        assert!(body.get("originalPrice").is_none());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/products/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        let patch = ProductPatch { name: Some("Renamed".to_string()), ..Default::default() };
        let err = store.update_product("gone", patch).await.unwrap_err();
        assert!(err.to_string().contains("Product not found"));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/products/doc-42"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();
        store.delete_product("doc-42").await.unwrap();
    }

    #[tokio::test]
    async fn test_wishlist_roundtrip() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wishlists/user-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"["3","7"]"#))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/wishlists/user-1/9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/wishlists/user-1/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpStore::with_base_url(&make_test_config(), mock_server.uri()).unwrap();

        assert_eq!(store.wishlist("user-1").await.unwrap(), vec!["3", "7"]);
        assert!(store.is_in_wishlist("user-1", "7").await.unwrap());
        store.add_to_wishlist("user-1", "9").await.unwrap();
        store.remove_from_wishlist("user-1", "3").await.unwrap();
    }
}
