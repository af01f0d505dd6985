//! Settings, Profile and User Endpoints

use super::{ApiClient, ApiError, Method};
use crate::models::{Profile, ProfileUpdate, Settings, User, UserUpdate};

impl ApiClient {
    pub async fn get_settings(&self) -> Result<Settings, ApiError> {
        self.get("/nastavitve/").await
    }

    pub async fn update_settings(&self, settings: &Settings) -> Result<Settings, ApiError> {
        self.send(Method::Put, "/nastavitve/", settings).await
    }

    pub async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
        self.get("/profili/").await
    }

    pub async fn update_profile(&self, id: u32, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        self.send(Method::Put, format!("/profili/{}/", id), update).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/auth/users/").await
    }

    pub async fn update_user(&self, id: u32, update: &UserUpdate) -> Result<User, ApiError> {
        self.send(Method::Patch, format!("/auth/users/{}/", id), update).await
    }

    pub async fn delete_user(&self, id: u32) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::Delete, format!("/auth/users/{}/", id), None).await
    }
}
