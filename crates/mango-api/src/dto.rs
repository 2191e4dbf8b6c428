//! Multipart form DTOs

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use mango_core::domain::MenuItemFields;
use mango_core::services::ImageUpload;
use tracing::debug;

use crate::error::ApiError;

/// Create/update form: `id`, `name`, `description`, `price`, `category`,
/// `specialTag` and an optional `file` part.
#[derive(Debug, Default)]
pub struct MenuItemForm {
    /// Only meaningful for updates; 0 when absent.
    pub id: i32,
    pub fields: MenuItemFields,
    pub file: Option<ImageUpload>,
}

impl MenuItemForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = MenuItemForm::default();
        let mut price: Option<String> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| form_error("Failed to read form field", e))?
        {
            let field_name = field.name().unwrap_or("").to_string();

            if field_name == "file" {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content = field
                    .bytes()
                    .await
                    .map_err(|e| form_error("Failed to read file", e))?;
                debug!("Received file {:?} ({} bytes)", file_name, content.len());
                form.file = Some(ImageUpload::new(file_name, content.to_vec()));
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| form_error(&format!("Invalid value for {}", field_name), e))?;

            match field_name.as_str() {
                "id" => {
                    form.id = text
                        .trim()
                        .parse()
                        .map_err(|_| ApiError::bad_request("ID must be an integer."))?;
                }
                "name" => form.fields.name = text,
                "description" => form.fields.description = text,
                "category" => form.fields.category = text,
                "specialTag" | "special_tag" => form.fields.special_tag = text,
                "price" => price = Some(text),
                _ => {}
            }
        }

        form.fields.price = parse_price(price.as_deref())?;
        Ok(form)
    }
}

/// Oversized bodies surface as 413; every other multipart failure is a 400.
fn form_error(context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("The uploaded form exceeds the size limit.".to_string())
    } else {
        ApiError::bad_request(format!("{}: {}", context, e))
    }
}

fn parse_price(raw: Option<&str>) -> Result<f64, ApiError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Price is required."))?;
    raw.parse::<f64>()
        .map_err(|_| ApiError::bad_request("Price must be a number."))
}
