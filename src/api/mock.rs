//! Test Doubles
//!
//! Transports and interceptors used by unit tests: a scripted transport for
//! status/payload checks and an in-memory backend for workflow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};

use super::transport::RequestBody;
use super::{ApiClient, ApiError, AuthInterceptor, HttpRequest, HttpResponse, Method, Transport};
use crate::models::{Answer, Project, ProjectType, Question, Segment, SerialNumber};

// ========================
// Session
// ========================

pub struct RecordingSession {
    token: Option<String>,
    unauthorized: AtomicUsize,
}

impl RecordingSession {
    pub fn anonymous() -> Arc<Self> {
        Arc::new(Self {
            token: None,
            unauthorized: AtomicUsize::new(0),
        })
    }

    pub fn with_token(token: &str) -> Arc<Self> {
        Arc::new(Self {
            token: Some(token.to_string()),
            unauthorized: AtomicUsize::new(0),
        })
    }

    pub fn unauthorized_calls(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }
}

impl AuthInterceptor for RecordingSession {
    fn csrf_token(&self) -> Option<String> {
        self.token.clone()
    }

    fn on_unauthorized(&self) {
        self.unauthorized.fetch_add(1, Ordering::SeqCst);
    }
}

// ========================
// Scripted transport
// ========================

/// Replies with canned responses keyed by (method, path)
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<Vec<(Method, String, HttpResponse)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, method: Method, path: &str, status: u16, body: Value) {
        self.replies
            .lock()
            .unwrap()
            .push((method, path.to_string(), HttpResponse::json(status, &body)));
    }

    pub fn reply_raw(&self, method: Method, path: &str, status: u16, body: Vec<u8>) {
        self.replies
            .lock()
            .unwrap()
            .push((method, path.to_string(), HttpResponse { status, body }));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(method, path, _)| *method == request.method && *path == request.path)
            .map(|(_, _, response)| response.clone());
        self.requests.lock().unwrap().push(request.clone());
        reply.ok_or_else(|| ApiError::Transport(format!("unscripted {:?} {}", request.method, request.path)))
    }
}

// ========================
// In-memory backend
// ========================

#[derive(Default)]
struct BackendState {
    projects: Vec<Project>,
    segments: Vec<Segment>,
    questions: Vec<Question>,
    serials: Vec<SerialNumber>,
    answers: Vec<Answer>,
    next_id: u32,
    failing_serials: Vec<String>,
}

impl BackendState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn upsert_answer(&mut self, answer: Answer) -> Answer {
        if let Some(existing) = self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id && a.serial == answer.serial)
        {
            existing.value = answer.value;
            return existing.clone();
        }
        let mut answer = answer;
        answer.id = Some(self.next_id());
        self.answers.push(answer.clone());
        answer
    }

    fn add_serials(&mut self, project_id: &str, type_id: u32, project_type_id: u32, count: u32) {
        for index in 0..count {
            let id = self.next_id();
            self.serials.push(SerialNumber {
                id,
                project_id: project_id.to_string(),
                value: format!("{}-{}-{}", project_id, type_id, index + 1),
                type_id: Some(type_id),
                project_type_id: Some(project_type_id),
                created_at: None,
            });
        }
    }
}

/// Minimal stateful stand-in for the checklist endpoints of the backend
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(self.clone(), RecordingSession::anonymous())
    }

    /// Project with one association, without serial numbers
    pub fn insert_project(&self, id: &str, type_id: u32, repeat_count: u32) {
        let mut state = self.state.lock().unwrap();
        let association_id = state.next_id();
        state.projects.push(Project {
            id: id.to_string(),
            owner: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            project_types: vec![ProjectType {
                id: Some(association_id),
                type_id,
                repeat_count,
            }],
        });
    }

    pub fn insert_bare_project(&self, id: &str) {
        self.state.lock().unwrap().projects.push(Project {
            id: id.to_string(),
            owner: "1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            project_types: Vec::new(),
        });
    }

    pub fn insert_segment(&self, id: u32, type_id: u32, name: &str, question_ids: &[u32]) {
        let mut state = self.state.lock().unwrap();
        state.segments.push(Segment {
            id,
            name: name.to_string(),
            type_id,
            label: None,
            questions: None,
        });
        for question_id in question_ids {
            state.questions.push(Question {
                id: *question_id,
                text: format!("Vprasanje {}", question_id),
                kind: "da_ne".to_string(),
                segment_id: id,
                repeatability: true,
                mandatory: false,
                options: None,
            });
        }
    }

    /// Reorder segments to the given id order
    pub fn reorder_segments(&self, order: &[u32]) {
        let mut state = self.state.lock().unwrap();
        state
            .segments
            .sort_by_key(|s| order.iter().position(|id| *id == s.id).unwrap_or(usize::MAX));
    }

    /// Make single-answer saves for this serial fail with 500
    pub fn fail_saves_for(&self, serial: &str) {
        self.state.lock().unwrap().failing_serials.push(serial.to_string());
    }

    pub fn serial_values(&self, project_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .serials
            .iter()
            .filter(|s| s.project_id == project_id)
            .map(|s| s.value.clone())
            .collect()
    }

    pub fn stored_answer(&self, question_id: u32, serial: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .answers
            .iter()
            .find(|a| a.question_id == question_id && a.serial == serial)
            .map(|a| a.value.clone())
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        let parts: Vec<String> = request
            .path
            .trim_matches('/')
            .split('/')
            .map(|part| percent_decode_str(part).decode_utf8_lossy().into_owned())
            .collect();
        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        let body = match &request.body {
            RequestBody::Json(value) => value.clone(),
            _ => Value::Null,
        };

        match (request.method, parts.as_slice()) {
            (Method::Get, ["projekti"]) => ok(&state.projects),
            (Method::Get, ["projekti", id]) => match state.projects.iter().find(|p| p.id == *id) {
                Some(project) => ok(project),
                None => not_found(),
            },
            (Method::Post, ["projekti"]) => {
                let id = body["id"].as_str().unwrap_or_default().to_string();
                let type_id = body["tip"].as_u64().unwrap_or(1) as u32;
                let repeat_count = body["stevilo_ponovitev"].as_u64().unwrap_or(1) as u32;
                let association_id = state.next_id();
                let association = ProjectType {
                    id: Some(association_id),
                    type_id,
                    repeat_count,
                };
                if let Some(project) = state.projects.iter_mut().find(|p| p.id == id) {
                    if project.association(type_id).is_some() {
                        return HttpResponse::json(400, &json!({"error": format!("Projekt {} že ima tip {}", id, type_id)}));
                    }
                    project.project_types.push(association);
                } else {
                    let date = body["datum"]
                        .as_str()
                        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                        .unwrap_or_else(|| NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
                    state.projects.push(Project {
                        id: id.clone(),
                        owner: body["osebna_stevilka"].as_str().unwrap_or_default().to_string(),
                        date,
                        project_types: vec![association],
                    });
                }
                state.add_serials(&id, type_id, association_id, repeat_count);
                let project = state.projects.iter().find(|p| p.id == id).cloned();
                ok(&project)
            }
            (Method::Get, ["projekti", id, "export-xlsx"]) => HttpResponse {
                status: 200,
                body: format!("xlsx:{}", id).into_bytes(),
            },
            (Method::Get, ["segmenti"]) => {
                let type_id: Option<u32> = request.query_value("tip_id").and_then(|t| t.parse().ok());
                let segments: Vec<&Segment> = state
                    .segments
                    .iter()
                    .filter(|s| type_id.map_or(true, |t| s.type_id == t))
                    .collect();
                ok(&segments)
            }
            (Method::Get, ["segmenti", id, "vprasanja"]) => {
                let id: u32 = id.parse().unwrap_or_default();
                let questions: Vec<&Question> = state.questions.iter().filter(|q| q.segment_id == id).collect();
                ok(&questions)
            }
            (Method::Get, ["serijske-stevilke"]) => {
                let project_id = request.query_value("projekt").unwrap_or_default();
                let type_id: Option<u32> = request.query_value("tip_id").and_then(|t| t.parse().ok());
                let serials: Vec<&SerialNumber> = state
                    .serials
                    .iter()
                    .filter(|s| s.project_id == project_id && type_id.map_or(true, |t| s.type_id == Some(t)))
                    .collect();
                ok(&serials)
            }
            (Method::Post, ["serijske-stevilke"]) => {
                let project_id = body["projekt"].as_str().unwrap_or_default().to_string();
                let project_type_id = body["projekt_tip"].as_u64().map(|id| id as u32);
                let type_id = state
                    .projects
                    .iter()
                    .flat_map(|p| p.project_types.iter())
                    .find(|pt| pt.id.is_some() && pt.id == project_type_id)
                    .map(|pt| pt.type_id);
                let id = state.next_id();
                let serial = SerialNumber {
                    id,
                    project_id,
                    value: body["stevilka"].as_str().unwrap_or_default().to_string(),
                    type_id,
                    project_type_id,
                    created_at: None,
                };
                state.serials.push(serial.clone());
                created(&serial)
            }
            (Method::Get, ["odgovori"]) => {
                let serial_id: Option<u32> = request.query_value("serijska_stevilka").and_then(|s| s.parse().ok());
                let value = state.serials.iter().find(|s| Some(s.id) == serial_id).map(|s| s.value.clone());
                let answers: Vec<&Answer> = state
                    .answers
                    .iter()
                    .filter(|a| Some(&a.serial) == value.as_ref())
                    .collect();
                ok(&answers)
            }
            (Method::Post, ["odgovori"]) => {
                let Ok(answer) = serde_json::from_value::<Answer>(body) else {
                    return HttpResponse::json(400, &json!({"error": "neveljaven odgovor"}));
                };
                if state.failing_serials.contains(&answer.serial) {
                    return HttpResponse::json(500, &json!({"error": "napaka baze"}));
                }
                let saved = state.upsert_answer(answer);
                created(&saved)
            }
            (Method::Post, ["odgovori", "batch"]) => {
                let Ok(answers) = serde_json::from_value::<Vec<Answer>>(body) else {
                    return HttpResponse::json(400, &json!({"error": "neveljavni odgovori"}));
                };
                let saved: Vec<Answer> = answers.into_iter().map(|a| state.upsert_answer(a)).collect();
                created(&saved)
            }
            _ => HttpResponse::json(404, &json!({"detail": "Not found."})),
        }
    }
}

fn ok<T: serde::Serialize + ?Sized>(value: &T) -> HttpResponse {
    HttpResponse::json(200, &serde_json::to_value(value).unwrap())
}

fn created<T: serde::Serialize + ?Sized>(value: &T) -> HttpResponse {
    HttpResponse::json(201, &serde_json::to_value(value).unwrap())
}

fn not_found() -> HttpResponse {
    HttpResponse::json(404, &json!({"detail": "Not found."}))
}

#[async_trait(?Send)]
impl Transport for FakeBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.handle(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}
