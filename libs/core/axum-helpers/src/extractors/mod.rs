//! Extractors whose rejections render as [`AppError`](crate::errors::AppError).

pub mod form_body;
pub mod json_body;
pub mod page_path;
pub mod validated_json;

pub use form_body::FormBody;
pub use json_body::JsonBody;
pub use page_path::PagePath;
pub use validated_json::ValidatedJson;
