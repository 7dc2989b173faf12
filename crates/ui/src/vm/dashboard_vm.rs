use boost_core::model::{Dashboard, Module, ModuleProgress, ProgressStatus, UserRecord};

use crate::vm::time_fmt::format_study_time;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatTileVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleCardVm {
    pub id: u64,
    pub position: usize,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub lessons: u32,
    pub completed_lessons: usize,
    pub percentage: u8,
    pub status_label: &'static str,
    pub action_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub greeting: String,
    pub initials: String,
    pub is_premium: bool,
    pub overall_percentage: u8,
    pub tiles: Vec<StatTileVm>,
    pub modules: Vec<ModuleCardVm>,
    pub can_request_certificate: bool,
}

impl DashboardVm {
    /// Merge the catalog with confirmed progress. Modules without a progress
    /// row are shown as not started.
    #[must_use]
    pub fn build(user: Option<&UserRecord>, dashboard: &Dashboard, catalog: &[Module]) -> Self {
        let modules: Vec<ModuleCardVm> = catalog
            .iter()
            .enumerate()
            .map(|(index, module)| {
                let progress = dashboard
                    .module(module.id)
                    .cloned()
                    .unwrap_or_else(|| ModuleProgress::not_started(module.id));
                module_card(index + 1, module, &progress)
            })
            .collect();

        let overall_percentage = overall(&modules);
        let stats = dashboard.stats;
        let tiles = vec![
            StatTileVm {
                label: "Completed modules",
                value: format!("{}/{}", stats.completed_modules, catalog.len()),
            },
            StatTileVm {
                label: "In progress",
                value: stats.in_progress_modules.to_string(),
            },
            StatTileVm {
                label: "Study time",
                value: format_study_time(stats.total_study_time_minutes),
            },
            StatTileVm {
                label: "Certificates",
                value: stats.certificates.to_string(),
            },
        ];

        Self {
            greeting: user.map_or_else(
                || "Welcome back".to_string(),
                |user| format!("Welcome back, {}", user.first_name.trim()),
            ),
            initials: user.map(UserRecord::initials).unwrap_or_default(),
            is_premium: user.is_some_and(|user| user.is_premium),
            overall_percentage,
            tiles,
            can_request_certificate: !modules.is_empty()
                && modules.iter().all(|module| module.percentage >= 100),
            modules,
        }
    }
}

fn module_card(position: usize, module: &Module, progress: &ModuleProgress) -> ModuleCardVm {
    let action_label = match progress.status {
        ProgressStatus::NotStarted => "Start",
        ProgressStatus::InProgress => "Continue",
        ProgressStatus::Completed => "Review",
    };
    ModuleCardVm {
        id: module.id.value(),
        position,
        title: module.title.clone(),
        description: module.description.clone(),
        duration: module.duration.clone(),
        lessons: module.lessons,
        completed_lessons: progress.completed_lesson_ids.len(),
        percentage: progress.progress_percentage,
        status_label: progress.status.label(),
        action_label,
    }
}

fn overall(modules: &[ModuleCardVm]) -> u8 {
    if modules.is_empty() {
        return 0;
    }
    let sum: usize = modules.iter().map(|m| usize::from(m.percentage)).sum();
    u8::try_from(sum / modules.len()).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boost_core::model::{DashboardStats, ModuleContent, ModuleId, UserId};

    fn module(id: u64, title: &str) -> Module {
        Module {
            id: ModuleId::new(id),
            title: title.into(),
            description: "desc".into(),
            duration: "45 min".into(),
            lessons: 5,
            completed: false,
            progress: 0,
            content: ModuleContent {
                introduction: "intro".into(),
                video_url: None,
                exercises: Vec::new(),
            },
        }
    }

    fn user() -> UserRecord {
        UserRecord {
            id: UserId::new("u-1"),
            email: "jane@example.com".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            is_premium: true,
            created_at: None,
        }
    }

    #[test]
    fn catalog_is_merged_with_progress() {
        let mut started = ModuleProgress::not_started(ModuleId::new(2));
        started.status = ProgressStatus::InProgress;
        started.progress_percentage = 40;
        let dashboard = Dashboard {
            stats: DashboardStats {
                completed_modules: 0,
                in_progress_modules: 1,
                total_study_time_minutes: 95,
                certificates: 0,
            },
            modules: vec![started],
        };
        let catalog = vec![module(1, "One"), module(2, "Two")];

        let vm = DashboardVm::build(Some(&user()), &dashboard, &catalog);

        assert_eq!(vm.greeting, "Welcome back, Jane");
        assert_eq!(vm.initials, "JD");
        assert!(vm.is_premium);
        assert_eq!(vm.modules[0].action_label, "Start");
        assert_eq!(vm.modules[1].action_label, "Continue");
        assert_eq!(vm.modules[1].percentage, 40);
        assert_eq!(vm.overall_percentage, 20);
        assert_eq!(vm.tiles[0].value, "0/2");
        assert_eq!(vm.tiles[2].value, "1 h 35");
        assert!(!vm.can_request_certificate);
    }

    #[test]
    fn certificate_unlocks_when_everything_is_done() {
        let mut done = ModuleProgress::not_started(ModuleId::new(1));
        done.status = ProgressStatus::Completed;
        done.progress_percentage = 100;
        let dashboard = Dashboard {
            stats: DashboardStats::default(),
            modules: vec![done],
        };
        let vm = DashboardVm::build(None, &dashboard, &[module(1, "One")]);
        assert!(vm.can_request_certificate);
        assert_eq!(vm.modules[0].action_label, "Review");
        assert_eq!(vm.greeting, "Welcome back");
    }
}
