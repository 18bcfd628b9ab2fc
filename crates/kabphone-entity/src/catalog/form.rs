//! Multipart form for creating or editing a phone.

use serde::{Deserialize, Serialize};

use kabphone_core::error::AppError;

/// Image content types the backend accepts.
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// An image file attached to a product form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Raw bytes.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload, guessing the content type from the file extension.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let lower = file_name.to_ascii_lowercase();
        let content_type = if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
            "image/jpeg"
        } else {
            "application/octet-stream"
        };
        Self {
            file_name,
            content_type: content_type.to_string(),
            bytes,
        }
    }
}

/// Fields of the admin add/edit product form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneForm {
    /// Manufacturer.
    pub brand_name: String,
    /// Model.
    pub model_name: String,
    /// Operating system.
    pub os: String,
    /// Unit price.
    pub price: f64,
    /// Units in stock.
    pub amount: i64,
    /// Optional image; required when creating.
    #[serde(skip)]
    pub image: Option<ImageUpload>,
}

impl PhoneForm {
    /// Text fields in the order they are appended to the multipart body.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("brand_name", self.brand_name.clone()),
            ("model_name", self.model_name.clone()),
            ("os", self.os.clone()),
            ("price", self.price.to_string()),
            ("amount", self.amount.to_string()),
        ]
    }

    /// Checks applied before `POST /phones`.
    pub fn validate_for_create(&self) -> Result<(), AppError> {
        check_length("brand_name", &self.brand_name)?;
        check_length("model_name", &self.model_name)?;
        check_length("os", &self.os)?;
        if !self.os.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::validation("os must contain letters only"));
        }
        self.check_numbers()?;
        match &self.image {
            Some(image) => check_image(image),
            None => Err(AppError::validation("image is required")),
        }
    }

    /// Checks applied before `PUT /phones/:id`.
    pub fn validate_for_update(&self) -> Result<(), AppError> {
        self.check_numbers()?;
        match &self.image {
            Some(image) => check_image(image),
            None => Ok(()),
        }
    }

    fn check_numbers(&self) -> Result<(), AppError> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::validation("price must not be negative"));
        }
        if self.amount < 0 {
            return Err(AppError::validation("amount must not be negative"));
        }
        Ok(())
    }
}

fn check_length(field: &str, value: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if (3..=50).contains(&len) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "{field} must be between 3 and 50 characters"
        )))
    }
}

fn check_image(image: &ImageUpload) -> Result<(), AppError> {
    if ALLOWED_IMAGE_TYPES.contains(&image.content_type.as_str()) {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "unsupported image type '{}'",
            image.content_type
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PhoneForm {
        PhoneForm {
            brand_name: "Apple".to_string(),
            model_name: "iPhone 15".to_string(),
            os: "iOS".to_string(),
            price: 32900.0,
            amount: 12,
            image: Some(ImageUpload::from_file_name("front.png", vec![0x89, 0x50])),
        }
    }

    #[test]
    fn test_create_requires_image() {
        let mut f = form();
        assert!(f.validate_for_create().is_ok());
        f.image = None;
        assert_eq!(
            f.validate_for_create().unwrap_err().message,
            "image is required"
        );
        assert!(f.validate_for_update().is_ok());
    }

    #[test]
    fn test_rejects_unknown_image_type() {
        let mut f = form();
        f.image = Some(ImageUpload::from_file_name("front.gif", vec![1]));
        assert!(f.validate_for_create().is_err());
    }

    #[test]
    fn test_os_letters_only() {
        let mut f = form();
        f.os = "iOS 17".to_string();
        assert!(f.validate_for_create().is_err());
    }

    #[test]
    fn test_text_fields() {
        let fields = form().text_fields();
        assert_eq!(fields[0], ("brand_name", "Apple".to_string()));
        assert_eq!(fields[3], ("price", "32900".to_string()));
    }
}
