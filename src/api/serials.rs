//! Serial Number Endpoints

use serde::Serialize;

use super::{ApiClient, ApiError, HttpRequest, Method};
use crate::checklist::serial_value;
use crate::models::SerialNumber;

#[derive(Serialize)]
struct CreateSerialArgs<'a> {
    projekt: &'a str,
    stevilka: String,
    projekt_tip: Option<u32>,
}

impl ApiClient {
    pub async fn list_serial_numbers(
        &self,
        project_id: &str,
        type_id: Option<u32>,
    ) -> Result<Vec<SerialNumber>, ApiError> {
        let mut request = HttpRequest::new(Method::Get, "/serijske-stevilke/").query("projekt", project_id);
        if let Some(type_id) = type_id {
            request = request.query("tip_id", type_id);
        }
        self.fetch(request).await
    }

    /// Create the serial number for repetition `index` (0-based) of a type.
    ///
    /// The project must already carry an association for the type; otherwise
    /// [`ApiError::MissingAssociation`] is returned and nothing is created.
    pub async fn create_serial_number(
        &self,
        project_id: &str,
        type_id: u32,
        index: u32,
    ) -> Result<SerialNumber, ApiError> {
        let project = self.get_project(project_id).await?;
        let association = project
            .association(type_id)
            .ok_or_else(|| ApiError::MissingAssociation {
                project_id: project_id.to_string(),
                type_id,
            })?;

        let args = CreateSerialArgs {
            projekt: project_id,
            stevilka: serial_value(project_id, type_id, index),
            projekt_tip: association.id,
        };
        self.send(Method::Post, "/serijske-stevilke/", &args).await
    }
}
