//! Type Endpoints

use serde::Serialize;

use super::{ApiClient, ApiError, Method, UploadFile};
use crate::models::InspectionType;

#[derive(Serialize)]
struct TypeArgs<'a> {
    naziv: &'a str,
}

/// Name of the downloaded blank template for a type
pub fn template_file_name(type_id: u32) -> String {
    format!("template_{}.xlsx", type_id)
}

impl ApiClient {
    pub async fn list_types(&self) -> Result<Vec<InspectionType>, ApiError> {
        self.get("/tipi/").await
    }

    pub async fn create_type(&self, name: &str) -> Result<InspectionType, ApiError> {
        self.send(Method::Post, "/tipi/", &TypeArgs { naziv: name }).await
    }

    pub async fn update_type(&self, id: u32, name: &str) -> Result<InspectionType, ApiError> {
        self.send(Method::Put, format!("/tipi/{}/", id), &TypeArgs { naziv: name }).await
    }

    pub async fn delete_type(&self, id: u32) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::Delete, format!("/tipi/{}/", id), None).await
    }

    /// Upload an xlsx question template; the backend rebuilds the type's
    /// segments and questions from it
    pub async fn upload_type_template(&self, id: u32, file: UploadFile) -> Result<(), ApiError> {
        self.upload(format!("/tipi/{}/upload-xlsx/", id), file).await.map(|_| ())
    }

    pub async fn download_type_template(&self, id: u32) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(format!("/tipi/{}/download-template/", id)).await
    }
}
