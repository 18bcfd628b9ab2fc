//! `/phones` endpoints.

use std::sync::Arc;

use reqwest::Method;
use reqwest::multipart::{Form, Part};

use kabphone_core::error::{AppError, ErrorKind};
use kabphone_core::result::AppResult;
use kabphone_core::types::{MessageBody, PageEnvelope, PageQuery};
use kabphone_entity::catalog::{Phone, PhoneForm};

use crate::gateway::Gateway;

/// Catalog calls. Listing is public; writes are admin-only.
#[derive(Debug, Clone)]
pub struct PhoneApi {
    gateway: Arc<Gateway>,
}

impl PhoneApi {
    /// Create the API over `gateway`.
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// `GET /phones?page&page_size[&search]`.
    pub async fn list(&self, query: &PageQuery) -> AppResult<PageEnvelope<Phone>> {
        self.gateway.get_with_query("/phones", query).await
    }

    /// `POST /phones` as multipart form data.
    pub async fn create(&self, form: &PhoneForm) -> AppResult<MessageBody> {
        self.gateway
            .send_multipart(Method::POST, "/phones", multipart(form)?)
            .await
    }

    /// `PUT /phones/:id` as multipart form data.
    pub async fn update(&self, id: u64, form: &PhoneForm) -> AppResult<MessageBody> {
        self.gateway
            .send_multipart(Method::PUT, &format!("/phones/{id}"), multipart(form)?)
            .await
    }

    /// `DELETE /phones/:id`.
    pub async fn delete(&self, id: u64) -> AppResult<MessageBody> {
        self.gateway.delete(&format!("/phones/{id}")).await
    }

    /// Where the product image is served.
    pub fn image_url(&self, id: u64) -> String {
        format!("{}/phones/images/{id}", self.gateway.base_url())
    }
}

fn multipart(form: &PhoneForm) -> AppResult<Form> {
    let mut body = Form::new();
    for (name, value) in form.text_fields() {
        body = body.text(name, value);
    }
    if let Some(image) = &form.image {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.content_type)
            .map_err(|e| AppError::with_source(ErrorKind::Validation, "Invalid image type", e))?;
        body = body.part("image", part);
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use kabphone_auth::SessionStore;
    use kabphone_core::config::ApiConfig;
    use kabphone_entity::catalog::ImageUpload;
    use wiremock::matchers::{body_string_contains, header_regex, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::policy::UnauthorizedPolicy;

    #[derive(Debug)]
    struct Ignore;

    impl UnauthorizedPolicy for Ignore {
        fn on_unauthorized(&self, _: &crate::gateway::RequestInfo) {}
    }

    fn api(server: &MockServer) -> PhoneApi {
        let config = ApiConfig {
            base_url: format!("{}/api", server.uri()),
            ..ApiConfig::default()
        };
        let gateway =
            Gateway::new(&config, Arc::new(SessionStore::in_memory()), Arc::new(Ignore)).unwrap();
        PhoneApi::new(Arc::new(gateway))
    }

    fn form(image: Option<ImageUpload>) -> PhoneForm {
        PhoneForm {
            brand_name: "Apple".to_string(),
            model_name: "iPhone 15".to_string(),
            os: "iOS".to_string(),
            price: 32900.0,
            amount: 5,
            image,
        }
    }

    #[tokio::test]
    async fn test_list_sends_search_only_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/phones"))
            .and(query_param("search", "iphone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "get phones success",
                "data": [{"id": 1, "price": 32900, "brand_name": "Apple", "model_name": "iPhone 15", "os": "iOS", "amount": 5}],
                "total": 1
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/phones"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "get phones success", "data": null, "total": 0
            })))
            .mount(&server)
            .await;

        let api = api(&server);
        let found = api
            .list(&PageQuery::new(0, 8).with_search("iphone"))
            .await
            .unwrap();
        assert_eq!(found.data.len(), 1);
        assert_eq!(found.data[0].display_name(), "Apple iPhone 15");

        let empty = api.list(&PageQuery::new(3, 8)).await.unwrap();
        assert!(empty.data.is_empty());
    }

    #[tokio::test]
    async fn test_create_sends_multipart_with_image() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/phones"))
            .and(header_regex("content-type", "^multipart/form-data; boundary="))
            .and(body_string_contains("name=\"brand_name\""))
            .and(body_string_contains("filename=\"front.png\""))
            .and(body_string_contains("PNGDATA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "create phone success"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let image = ImageUpload::from_file_name("front.png", b"PNGDATA".to_vec());
        let body = api(&server).create(&form(Some(image))).await.unwrap();
        assert_eq!(body.message, "create phone success");
    }

    #[tokio::test]
    async fn test_update_without_image() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/phones/12"))
            .and(body_string_contains("name=\"amount\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "update phone success", "data": null
            })))
            .expect(1)
            .mount(&server)
            .await;

        api(&server).update(12, &form(None)).await.unwrap();
    }

    #[test]
    fn test_image_url() {
        let config = ApiConfig::default();
        let gateway = Gateway::new(&config, Arc::new(SessionStore::in_memory()), Arc::new(Ignore))
            .unwrap();
        let api = PhoneApi::new(Arc::new(gateway));
        assert_eq!(api.image_url(3), "http://localhost:8080/api/phones/images/3");
    }
}
