//! Auth Endpoints
//!
//! Session bootstrap and account operations. The login and registration
//! screens themselves live outside this app.

use serde::Serialize;
use serde_json::Value;

use super::{ApiClient, ApiError, Method};
use crate::models::{CurrentUser, NewUser};

#[derive(Serialize)]
struct LoginArgs<'a> {
    osebna_stevilka: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ChangePasswordArgs<'a> {
    old_password: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    /// Ask the backend to set the `csrftoken` cookie
    pub async fn init_csrf(&self) -> Result<(), ApiError> {
        self.get_bytes("/csrf/").await.map(|_| ())
    }

    #[allow(dead_code)]
    pub async fn login(&self, personal_number: &str, password: &str) -> Result<Value, ApiError> {
        let args = LoginArgs {
            osebna_stevilka: personal_number,
            password,
        };
        self.send(Method::Post, "/auth/login/", &args).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.send_discard::<()>(Method::Post, "/auth/logout/", None).await
    }

    #[allow(dead_code)]
    pub async fn register(&self, user: &NewUser) -> Result<Value, ApiError> {
        self.send(Method::Post, "/auth/register/", user).await
    }

    pub async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.get("/auth/user/").await
    }

    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<(), ApiError> {
        let args = ChangePasswordArgs {
            old_password,
            new_password,
        };
        self.send_discard(Method::Post, "/auth/change-password/", Some(&args)).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::mock::{RecordingSession, ScriptedTransport};
    use super::*;
    use crate::api::transport::RequestBody;
    use crate::api::CSRF_HEADER;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_payload() {
        let transport = ScriptedTransport::new();
        transport.reply(Method::Post, "/auth/login/", 200, json!({"status": "success"}));
        let api = ApiClient::new(transport.clone(), RecordingSession::anonymous());

        let reply = api.login("1001", "geslo").await.unwrap();

        assert_eq!(reply["status"], "success");
        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Json(json!({"osebna_stevilka": "1001", "password": "geslo"}))
        );
    }

    #[tokio::test]
    async fn test_rejected_login_triggers_interceptor() {
        let transport = ScriptedTransport::new();
        transport.reply(Method::Post, "/auth/login/", 401, json!({"status": "error", "message": "Neveljavno geslo"}));
        let session = RecordingSession::anonymous();
        let api = ApiClient::new(transport.clone(), session.clone());

        assert_eq!(api.login("1001", "narobe").await.unwrap_err(), ApiError::Unauthorized);
        assert_eq!(session.unauthorized_calls(), 1);
    }

    #[tokio::test]
    async fn test_current_user() {
        let transport = ScriptedTransport::new();
        transport.reply(
            Method::Get,
            "/auth/user/",
            200,
            json!({"id": 3, "osebna_stevilka": "1001", "first_name": "Ana", "last_name": "Novak",
                   "email": "ana@example.com", "is_staff": true, "is_superuser": false}),
        );
        let api = ApiClient::new(transport, RecordingSession::anonymous());

        let user = api.current_user().await.unwrap();
        assert_eq!(user.personal_number, "1001");
        assert!(user.is_staff);
    }

    #[tokio::test]
    async fn test_logout_and_register() {
        let transport = ScriptedTransport::new();
        transport.reply(Method::Post, "/auth/logout/", 200, json!({"message": "ok"}));
        transport.reply(Method::Post, "/auth/register/", 201, json!({"message": "ok"}));
        let api = ApiClient::new(transport.clone(), RecordingSession::anonymous());

        api.logout().await.unwrap();
        api.register(&NewUser {
            personal_number: "2002".into(),
            password: "x".into(),
            email: "b@example.com".into(),
            first_name: "Bor".into(),
            last_name: "Kos".into(),
        })
        .await
        .unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].body, RequestBody::Empty);
        assert!(matches!(&requests[1].body, RequestBody::Json(v) if v["osebna_stevilka"] == "2002"));
    }

    #[tokio::test]
    async fn test_logout_posts_with_csrf_header() {
        let transport = ScriptedTransport::new();
        transport.reply(Method::Post, "/auth/logout/", 200, json!({"message": "ok"}));
        let session = RecordingSession::with_token("tok");
        let api = ApiClient::new(transport.clone(), session.clone());

        api.logout().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].header(CSRF_HEADER), Some("tok"));
        assert_eq!(session.unauthorized_calls(), 0);
    }
}
