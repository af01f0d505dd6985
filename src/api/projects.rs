//! Project Endpoints

use chrono::NaiveDate;
use serde::Serialize;

use super::{path_segment, ApiClient, ApiError, Method, UploadFile};
use crate::models::Project;

/// Binary exports offered for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Pdf,
    /// Full project archive for re-import
    Archive,
}

impl ExportFormat {
    fn endpoint(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "export-xlsx",
            ExportFormat::Pdf => "export-pdf",
            ExportFormat::Archive => "export-archive",
        }
    }

    /// Name given to the downloaded file
    pub fn file_name(self, project_id: &str) -> String {
        match self {
            ExportFormat::Xlsx => format!("projekt_{}_odgovori.xlsx", project_id),
            ExportFormat::Pdf => format!("projekt_{}_odgovori.pdf", project_id),
            ExportFormat::Archive => format!("projekt_{}_arhiv.zip", project_id),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Archive => "Arhiv",
        }
    }
}

/// The backend creates a project from its first association only and
/// generates that association's serial numbers itself.
#[derive(Serialize)]
struct CreateProjectArgs<'a> {
    id: &'a str,
    osebna_stevilka: &'a str,
    datum: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    tip: Option<u32>,
    stevilo_ponovitev: u32,
}

impl ApiClient {
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projekti/").await
    }

    pub async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        self.get(format!("/projekti/{}/", path_segment(id))).await
    }

    pub async fn create_project(&self, project: &Project) -> Result<Project, ApiError> {
        let first = project.project_types.first();
        let args = CreateProjectArgs {
            id: &project.id,
            osebna_stevilka: &project.owner,
            datum: project.date,
            tip: first.map(|pt| pt.type_id),
            stevilo_ponovitev: first.map(|pt| pt.repeat_count).filter(|n| *n > 0).unwrap_or(1),
        };
        self.send(Method::Post, "/projekti/", &args).await
    }

    pub async fn update_project(&self, project: &Project) -> Result<Project, ApiError> {
        self.send(Method::Put, format!("/projekti/{}/", path_segment(&project.id)), project).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::Delete, format!("/projekti/{}/", path_segment(id)), None).await
    }

    pub async fn export_project(&self, id: &str, format: ExportFormat) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(format!("/projekti/{}/{}/", path_segment(id), format.endpoint())).await
    }

    /// Import a project archive produced by [`ExportFormat::Archive`]
    pub async fn import_projects(&self, file: UploadFile) -> Result<(), ApiError> {
        self.upload("/projekti/import-json/", file).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{RecordingSession, ScriptedTransport};
    use super::*;
    use crate::api::transport::RequestBody;
    use crate::models::ProjectType;
    use serde_json::json;

    fn project() -> Project {
        Project {
            id: "P1".into(),
            owner: "1001".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            project_types: vec![ProjectType {
                id: None,
                type_id: 2,
                repeat_count: 4,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_project_payload() {
        let transport = ScriptedTransport::new();
        transport.reply(
            Method::Post,
            "/projekti/",
            200,
            json!({"id": "P1", "osebna_stevilka": "1001", "datum": "2024-05-06",
                   "projekt_tipi": [{"id": 9, "tip": 2, "stevilo_ponovitev": 4}]}),
        );
        let api = ApiClient::new(transport.clone(), RecordingSession::anonymous());

        let created = api.create_project(&project()).await.unwrap();

        assert_eq!(created.association(2).and_then(|pt| pt.id), Some(9));
        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Json(json!({
                "id": "P1",
                "osebna_stevilka": "1001",
                "datum": "2024-05-06",
                "tip": 2,
                "stevilo_ponovitev": 4
            }))
        );
    }

    #[tokio::test]
    async fn test_create_project_defaults_repeat_count() {
        let transport = ScriptedTransport::new();
        transport.reply(Method::Post, "/projekti/", 200, json!({"id": "P1", "osebna_stevilka": "1001", "datum": "2024-05-06"}));
        let api = ApiClient::new(transport.clone(), RecordingSession::anonymous());

        let mut bare = project();
        bare.project_types.clear();
        api.create_project(&bare).await.unwrap();

        let RequestBody::Json(body) = &transport.requests()[0].body else {
            panic!("expected json body");
        };
        assert_eq!(body["stevilo_ponovitev"], 1);
        assert!(body.get("tip").is_none());
    }

    #[tokio::test]
    async fn test_export_paths() {
        let transport = ScriptedTransport::new();
        transport.reply_raw(Method::Get, "/projekti/P%201/export-pdf/", 200, b"%PDF".to_vec());
        transport.reply_raw(Method::Get, "/projekti/P1/export-xlsx/", 200, b"PK".to_vec());
        let api = ApiClient::new(transport, RecordingSession::anonymous());

        assert_eq!(api.export_project("P 1", ExportFormat::Pdf).await.unwrap(), b"%PDF".to_vec());
        assert_eq!(api.export_project("P1", ExportFormat::Xlsx).await.unwrap(), b"PK".to_vec());
    }

    #[tokio::test]
    async fn test_update_project_payload() {
        let transport = ScriptedTransport::new();
        transport.reply(
            Method::Put,
            "/projekti/Hala%20A/",
            200,
            json!({"id": "Hala A", "osebna_stevilka": "2002", "datum": "2024-06-01",
                   "projekt_tipi": [{"id": 9, "tip": 2, "stevilo_ponovitev": 4}]}),
        );
        let api = ApiClient::new(transport.clone(), RecordingSession::anonymous());
        let mut edited = project();
        edited.id = "Hala A".into();
        edited.owner = "2002".into();
        edited.date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let updated = api.update_project(&edited).await.unwrap();

        assert_eq!(updated.owner, "2002");
        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Json(json!({
                "id": "Hala A",
                "osebna_stevilka": "2002",
                "datum": "2024-06-01",
                "projekt_tipi": [{"tip": 2, "stevilo_ponovitev": 4}]
            }))
        );
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(ExportFormat::Xlsx.file_name("P1"), "projekt_P1_odgovori.xlsx");
        assert_eq!(ExportFormat::Pdf.file_name("P1"), "projekt_P1_odgovori.pdf");
        assert_eq!(ExportFormat::Archive.file_name("P1"), "projekt_P1_arhiv.zip");
    }

    #[tokio::test]
    async fn test_export_failure_reported() {
        let transport = ScriptedTransport::new();
        transport.reply(Method::Get, "/projekti/P1/export-xlsx/", 400, json!({"error": "Projekt nima serijskih številk"}));
        let api = ApiClient::new(transport, RecordingSession::anonymous());

        let err = api.export_project("P1", ExportFormat::Xlsx).await.unwrap_err();
        assert_eq!(err.to_string(), "server error (400): Projekt nima serijskih številk");
    }
}
