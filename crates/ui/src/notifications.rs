use std::time::Duration;

use dioxus::prelude::*;

/// How long a notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);
const MAX_VISIBLE: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

impl NoticeKind {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Success => "notice notice-success",
            Self::Error => "notice notice-error",
            Self::Info => "notice notice-info",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// Transient notifications, newest last. Only the latest few are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            kind,
            text: text.into(),
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }

    #[must_use]
    pub fn items(&self) -> &[Notice] {
        &self.items
    }
}

/// Handle shared through context by the shell.
#[derive(Clone, Copy)]
pub struct Notifier {
    notices: Signal<Notices>,
}

impl Notifier {
    #[must_use]
    pub fn new(notices: Signal<Notices>) -> Self {
        Self { notices }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text.into());
    }

    pub fn dismiss(&self, id: u64) {
        let mut notices = self.notices;
        notices.write().dismiss(id);
    }

    #[must_use]
    pub fn notices(&self) -> Signal<Notices> {
        self.notices
    }

    fn push(&self, kind: NoticeKind, text: String) {
        let mut notices = self.notices;
        let id = notices.write().push(kind, text);
        spawn(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            notices.write().dismiss(id);
        });
    }
}

/// Fetch the shell's notifier.
#[must_use]
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

#[component]
pub fn NoticeStack() -> Element {
    let notifier = use_notifier();
    let notices = notifier.notices();
    let items = notices.read().items().to_vec();

    rsx! {
        div { class: "notice-stack",
            for notice in items {
                div {
                    key: "{notice.id}",
                    class: notice.kind.class(),
                    role: "status",
                    onclick: move |_| notifier.dismiss(notice.id),
                    "{notice.text}"
                }
            }
        }
    }
}
