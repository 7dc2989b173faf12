use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use boost_core::model::{AuthToken, Session, SessionSnapshot, UserId, UserRecord};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use serde_json::{Value, json};
use services::{
    ApiRequest, ApiResponse, ApiTransport, AppServices, AuthGateway, CatalogClient, CheckoutFlow,
    NavigationQueue, PaymentTimings, ProgressClient, SessionStore, TransportError,
};
use storage::Storage;

use crate::context::{AppContext, UiApp};
use crate::notifications::{Notices, Notifier};
use crate::platform::UiLinkOpener;
use crate::views::{DashboardView, HomeView, ModuleView, PaymentView};

/// Canned backend answers keyed by path.
#[derive(Clone, Default)]
pub struct StubBackend {
    routes: Arc<Mutex<HashMap<String, (u16, Value)>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl StubBackend {
    pub fn with_defaults() -> Self {
        let backend = Self::default();
        backend.set("/stats", 200, json!({
            "totalStudents": 1250,
            "completionRate": 87,
            "averageRating": 4.8,
            "moduleCount": 6
        }));
        backend.set("/dashboard", 200, json!({
            "stats": {
                "completed_modules": 1,
                "in_progress_modules": 1,
                "total_study_time_minutes": 75,
                "certificates": 0
            },
            "modules": [
                {"module_id": 1, "status": "completed", "progress_percentage": 100},
                {"module_id": 2, "status": "in_progress", "progress_percentage": 40,
                 "completed_lesson_ids": [1, 2]}
            ]
        }));
        backend.set("/modules", 200, json!([module_json(1, "Know your worth"), module_json(2, "Beat impostor syndrome")]));
        backend.set("/modules/2", 200, module_json(2, "Beat impostor syndrome"));
        backend.set("/modules/2/exercises", 200, json!([]));
        backend
    }

    pub fn set(&self, path: &str, status: u16, body: Value) {
        self.routes
            .lock()
            .expect("routes")
            .insert(path.to_string(), (status, body));
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().expect("hits").clone()
    }

    pub fn hits_to(&self, path: &str) -> usize {
        self.hits().iter().filter(|hit| *hit == path).count()
    }
}

fn module_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "A short module",
        "duration": "45 min",
        "lessons": 4,
        "content": {"introduction": "Welcome to the module", "exercises": ["Write it down"]}
    })
}

#[async_trait]
impl ApiTransport for StubBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.hits.lock().expect("hits").push(request.path.clone());
        let answer = self.routes.lock().expect("routes").get(&request.path).cloned();
        let (status, body) = answer.unwrap_or((404, json!({"detail": "Not Found"})));
        Ok(ApiResponse::json(status, &body))
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl UiLinkOpener for RecordingOpener {
    fn open_url(&self, url: &str) {
        self.opened.lock().expect("opened").push(url.to_string());
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session(&self) -> Arc<SessionStore> {
        self.services.session()
    }

    fn navigation(&self) -> NavigationQueue {
        self.services.navigation()
    }

    fn auth(&self) -> Arc<AuthGateway> {
        self.services.auth()
    }

    fn progress(&self) -> Arc<ProgressClient> {
        self.services.progress()
    }

    fn catalog(&self) -> Arc<CatalogClient> {
        self.services.catalog()
    }

    fn checkout_flow(&self) -> Arc<CheckoutFlow> {
        self.services.checkout_flow()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewKind {
    Home,
    Dashboard,
    Module(u64),
    Payment,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    ctx: AppContext,
    snapshot: SessionSnapshot,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    use_context_provider(|| Signal::new(props.snapshot.clone()));
    let notices = use_signal(Notices::default);
    use_context_provider(|| Notifier::new(notices));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Module(id) => rsx! { ModuleView { id } },
        ViewKind::Payment => rsx! { PaymentView { checkout_id: String::new() } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: StubBackend,
    pub opener: Arc<RecordingOpener>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn jane(is_premium: bool) -> UserRecord {
    UserRecord {
        id: UserId::new("u-jane"),
        email: "jane@example.com".into(),
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        is_premium,
        created_at: None,
    }
}

/// Session state the view is rendered with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Visitor {
    Restoring,
    Anonymous,
    Member,
    Premium,
}

pub async fn setup_view_harness(view: ViewKind, visitor: Visitor) -> ViewHarness {
    setup_view_harness_with(view, visitor, StubBackend::with_defaults()).await
}

pub async fn setup_view_harness_with(
    view: ViewKind,
    visitor: Visitor,
    backend: StubBackend,
) -> ViewHarness {
    let services = AppServices::with_parts(
        Storage::in_memory(),
        Arc::new(backend.clone()),
        PaymentTimings::immediate(),
    );

    let token = AuthToken::parse("tok-jane").expect("token");
    let snapshot = match visitor {
        Visitor::Restoring => SessionSnapshot::restoring(),
        Visitor::Anonymous => SessionSnapshot::ready(Session::Anonymous),
        Visitor::Member | Visitor::Premium => {
            let user = jane(visitor == Visitor::Premium);
            services.session().login(user.clone(), token.clone()).await;
            SessionSnapshot::ready(Session::authenticated(user, token))
        }
    };

    let opener = Arc::new(RecordingOpener::default());
    let app: Arc<dyn UiApp> = Arc::new(TestApp { services });
    let ctx = AppContext::with_link_opener(app, opener.clone());

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            ctx,
            snapshot,
            view,
        },
    );

    ViewHarness {
        dom,
        backend,
        opener,
    }
}
