//! Segment and Question Endpoints

use futures::future::try_join_all;

use super::{ApiClient, ApiError, HttpRequest, Method};
use crate::models::{Question, Segment};

impl ApiClient {
    pub async fn list_segments(&self, type_id: u32, project_id: &str) -> Result<Vec<Segment>, ApiError> {
        let request = HttpRequest::new(Method::Get, "/segmenti/")
            .query("tip_id", type_id)
            .query("projekt_id", project_id);
        self.fetch(request).await
    }

    #[allow(dead_code)]
    pub async fn get_segment(&self, id: u32) -> Result<Segment, ApiError> {
        self.get(format!("/segmenti/{}/", id)).await
    }

    pub async fn list_segment_questions(
        &self,
        segment_id: u32,
        type_id: u32,
        project_id: &str,
    ) -> Result<Vec<Question>, ApiError> {
        let request = HttpRequest::new(Method::Get, format!("/segmenti/{}/vprasanja/", segment_id))
            .query("tip_id", type_id)
            .query("projekt_id", project_id);
        self.fetch(request).await
    }

    /// All questions for a (type, project): lists the segments, then fetches
    /// each segment's questions concurrently (one request per segment, there
    /// is no batch endpoint). The result follows segment listing order.
    pub async fn list_questions(&self, type_id: u32, project_id: &str) -> Result<Vec<Question>, ApiError> {
        let segments = self.list_segments(type_id, project_id).await?;
        let per_segment = try_join_all(
            segments
                .iter()
                .map(|segment| self.list_segment_questions(segment.id, type_id, project_id)),
        )
        .await?;
        Ok(per_segment.into_iter().flatten().collect())
    }
}
