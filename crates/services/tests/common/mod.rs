#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use boost_core::NavTarget;
use boost_core::model::{AuthToken, UserId, UserRecord};
use serde_json::{Value, json};
use services::{
    ApiRequest, ApiResponse, ApiTransport, AppServices, HttpMethod, Navigator, PaymentTimings,
    TransportError,
};
use storage::{InMemoryStore, Storage};

pub const TOKEN: &str = "tok-jane";
pub const PASSWORD: &str = "secret1";

pub fn jane() -> UserRecord {
    UserRecord {
        id: UserId::new("u-jane"),
        email: "jane@example.com".into(),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        is_premium: false,
        created_at: None,
    }
}

pub fn token() -> AuthToken {
    AuthToken::parse(TOKEN).expect("token")
}

#[derive(Default)]
struct ModuleState {
    percentage: u8,
    completed: bool,
    lessons: BTreeSet<u64>,
}

#[derive(Default)]
struct BackendState {
    requests: Vec<ApiRequest>,
    modules: BTreeMap<u64, ModuleState>,
    paid: bool,
    demo: bool,
    checkout_url: Option<String>,
    premium: bool,
    activations: Vec<Value>,
    overrides: HashMap<String, (u16, Value)>,
    offline: bool,
    done_exercises: BTreeSet<String>,
    certificates: Vec<Value>,
}

/// The backend writes naive UTC timestamps.
const BACKEND_TIME: &str = "2024-05-01T12:00:00.123456";

/// In-process stand-in for the REST backend.
///
/// Accepts one account (`jane()` / `PASSWORD`) and requires `TOKEN` on
/// every protected endpoint.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.state().checkout_url = Some("https://shop.example.com/checkout/chk_1".into());
        backend
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().expect("backend state")
    }

    pub fn set_paid(&self, paid: bool) {
        self.state().paid = paid;
    }

    pub fn set_demo(&self, demo: bool) {
        self.state().demo = demo;
    }

    pub fn set_premium(&self, premium: bool) {
        self.state().premium = premium;
    }

    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Answer `path` with a fixed status and body from now on.
    pub fn respond(&self, path: &str, status: u16, body: Value) {
        self.state()
            .overrides
            .insert(path.to_string(), (status, body));
    }

    pub fn clear_override(&self, path: &str) {
        self.state().overrides.remove(path);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|req| req.path == path)
            .count()
    }

    pub fn activations(&self) -> Vec<Value> {
        self.state().activations.clone()
    }

    fn handle(&self, request: &ApiRequest) -> (u16, Value) {
        let mut state = self.state();
        if let Some((status, body)) = state.overrides.get(&request.path) {
            return (*status, body.clone());
        }

        let public = request.path.starts_with("/auth/") || request.path == "/stats";
        if !public && request.bearer.as_deref() != Some(TOKEN) {
            return (401, json!({"detail": "Not authenticated"}));
        }

        let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
        let body = request.body.clone().unwrap_or(Value::Null);
        match (request.method, segments.as_slice()) {
            (HttpMethod::Post, ["auth", "register"]) => {
                if body["email"] == json!(jane().email) {
                    return (400, json!({"detail": "Email already registered"}));
                }
                let user = UserRecord {
                    id: UserId::new("u-new"),
                    email: body["email"].as_str().unwrap_or_default().to_string(),
                    first_name: body["first_name"].as_str().unwrap_or_default().to_string(),
                    last_name: body["last_name"].as_str().unwrap_or_default().to_string(),
                    is_premium: false,
                    created_at: None,
                };
                (200, json!({"user": user, "token": "tok-new"}))
            }
            (HttpMethod::Post, ["auth", "login"]) => {
                if body["email"] == json!(jane().email) && body["password"] == json!(PASSWORD) {
                    let mut user = jane();
                    user.is_premium = state.premium;
                    (200, json!({"user": user, "token": TOKEN}))
                } else {
                    (400, json!({"detail": "Invalid credentials"}))
                }
            }
            (HttpMethod::Get, ["user", "profile"]) => {
                let mut user = jane();
                user.is_premium = state.premium;
                (200, json!(user))
            }
            (HttpMethod::Put, ["user", "profile"]) => {
                let mut user = jane();
                if let Some(first) = body["first_name"].as_str() {
                    user.first_name = first.to_string();
                }
                if let Some(last) = body["last_name"].as_str() {
                    user.last_name = last.to_string();
                }
                (200, json!(user))
            }
            (HttpMethod::Get, ["dashboard"]) => (200, dashboard_json(&state.modules)),
            (HttpMethod::Post, ["progress", id, "start"]) => {
                let Ok(id) = id.parse::<u64>() else {
                    return (422, json!({"detail": "invalid module id"}));
                };
                state.modules.entry(id).or_default();
                (200, json!({"message": "started"}))
            }
            (HttpMethod::Post, ["progress", id, "complete-lesson", lesson]) => {
                let (Ok(id), Ok(lesson)) = (id.parse::<u64>(), lesson.parse::<u64>()) else {
                    return (422, json!({"detail": "invalid id"}));
                };
                let module = state.modules.entry(id).or_default();
                module.lessons.insert(lesson);
                module.percentage = module.percentage.saturating_add(20).min(100);
                (200, json!({"message": "lesson completed"}))
            }
            (HttpMethod::Put, ["modules", id, "progress"]) => {
                let Ok(id) = id.parse::<u64>() else {
                    return (422, json!({"detail": "invalid module id"}));
                };
                let module = state.modules.entry(id).or_default();
                module.percentage = u8::try_from(body["progress"].as_u64().unwrap_or(0))
                    .unwrap_or(100);
                module.completed = body["completed"].as_bool().unwrap_or(false);
                (200, json!({"message": "updated"}))
            }
            (HttpMethod::Get, ["modules"]) => (200, json!([module_json(1)])),
            (HttpMethod::Get, ["modules", id]) => match id.parse::<u64>() {
                Ok(1) => (200, module_json(1)),
                _ => (404, json!({"detail": "Module non trouvé"})),
            },
            (HttpMethod::Get, ["modules", id, "exercises"]) => {
                let done = state.done_exercises.contains("ex-1");
                let completed_at = if done { json!(BACKEND_TIME) } else { Value::Null };
                (
                    200,
                    json!([{
                        "id": "ex-1",
                        "moduleId": id.parse::<u64>().unwrap_or(0),
                        "description": "Write three strengths",
                        "completed": done,
                        "completedAt": completed_at
                    }]),
                )
            }
            (HttpMethod::Post, ["exercises", id, "complete"]) => {
                let completed = body["completed"].as_bool().unwrap_or(false);
                if completed {
                    state.done_exercises.insert((*id).to_string());
                } else {
                    state.done_exercises.remove(*id);
                }
                (
                    200,
                    json!({"message": "Exercice mis à jour avec succès", "completed": completed}),
                )
            }
            (HttpMethod::Get, ["stats"]) => (
                200,
                json!({
                    "totalStudents": 1250,
                    "completionRate": 87,
                    "averageRating": 4.8,
                    "moduleCount": 5
                }),
            ),
            (HttpMethod::Get, ["certificates"]) => (200, Value::Array(state.certificates.clone())),
            (HttpMethod::Post, ["certificates", "generate"]) => {
                let finished = state.modules.get(&1).is_some_and(|module| module.completed);
                if !finished {
                    return (
                        400,
                        json!({"detail": "Vous devez terminer tous les modules pour obtenir le certificat"}),
                    );
                }
                let certificate = json!({
                    "id": format!("cert-{}", state.certificates.len() + 1),
                    "userId": "u-jane",
                    "title": "Certificat ConfianceBoost",
                    "completedAt": BACKEND_TIME,
                    "downloadUrl": "/certificates/cert-1.pdf"
                });
                state.certificates.push(certificate.clone());
                (200, certificate)
            }
            (HttpMethod::Post, ["payment", "create-checkout"]) => (
                200,
                json!({
                    "checkout_id": "chk_1",
                    "checkout_url": state.checkout_url,
                    "is_demo": state.demo
                }),
            ),
            (HttpMethod::Post, ["payment", "verify"]) => {
                (200, json!({"is_paid": state.paid, "order_id": null}))
            }
            (HttpMethod::Post, ["payment", "activate-premium"]) => {
                state.activations.push(body);
                state.premium = true;
                let user = jane().with_premium();
                (
                    200,
                    json!({"success": true, "message": "Premium activated", "user": user}),
                )
            }
            _ => (404, json!({"detail": "Not Found"})),
        }
    }
}

fn dashboard_json(modules: &BTreeMap<u64, ModuleState>) -> Value {
    let entries: Vec<Value> = modules
        .iter()
        .map(|(id, module)| {
            let status = if module.completed || module.percentage >= 100 {
                "completed"
            } else {
                "in_progress"
            };
            json!({
                "module_id": id,
                "status": status,
                "progress_percentage": module.percentage,
                "completed_lesson_ids": module.lessons,
            })
        })
        .collect();
    let completed = entries
        .iter()
        .filter(|entry| entry["status"] == "completed")
        .count();
    json!({
        "stats": {
            "completed_modules": completed,
            "in_progress_modules": entries.len() - completed,
            "total_study_time_minutes": 0,
            "certificates": 0
        },
        "modules": entries,
    })
}

fn module_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": "Comprendre la confiance en soi",
        "description": "Les bases",
        "duration": "45 min",
        "lessons": 5,
        "completed": false,
        "progress": 0,
        "content": {"introduction": "Intro", "exercises": []}
    })
}

#[async_trait]
impl ApiTransport for FakeBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        if self.state().offline {
            self.state().requests.push(request);
            return Err(TransportError::Unreachable("connection refused".into()));
        }
        let (status, body) = self.handle(&request);
        self.state().requests.push(request);
        Ok(ApiResponse::json(status, &body))
    }
}

/// Navigator that only records what it was asked to do.
#[derive(Clone, Default)]
pub struct RecordingNavigator {
    targets: Arc<Mutex<Vec<NavTarget>>>,
}

impl RecordingNavigator {
    pub fn targets(&self) -> Vec<NavTarget> {
        self.targets.lock().expect("targets").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavTarget) {
        self.targets.lock().expect("targets").push(target);
    }
}

pub struct Harness {
    pub backend: FakeBackend,
    pub local: InMemoryStore,
    pub services: AppServices,
}

/// Services over a fake backend and in-memory storage, no delays.
pub fn harness() -> Harness {
    harness_with(PaymentTimings::immediate())
}

pub fn harness_with(timings: PaymentTimings) -> Harness {
    let backend = FakeBackend::new();
    let local = InMemoryStore::new();
    let storage = Storage {
        local: Arc::new(local.clone()),
    };
    let services = AppServices::with_parts(storage, Arc::new(backend.clone()), timings);
    Harness {
        backend,
        local,
        services,
    }
}

/// Same as [`harness`], already signed in as `jane()`.
pub async fn signed_in() -> Harness {
    let harness = harness();
    harness.services.session().login(jane(), token()).await;
    harness
}
