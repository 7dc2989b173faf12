use boost_core::model::{
    Exercise, LessonId, Module, ModuleProgress, ProgressStatus,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub id: u64,
    pub label: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseVm {
    pub id: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDetailVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub introduction: String,
    pub video_url: Option<String>,
    pub status_label: &'static str,
    pub percentage: u8,
    pub lessons: Vec<LessonVm>,
    pub exercises: Vec<ExerciseVm>,
    pub can_start: bool,
    pub is_completed: bool,
}

impl ModuleDetailVm {
    /// Lessons are numbered from 1. Exercises come from the exercise
    /// endpoint when available, otherwise from the module's static list.
    #[must_use]
    pub fn build(module: &Module, progress: Option<&ModuleProgress>, exercises: &[Exercise]) -> Self {
        let progress = progress
            .cloned()
            .unwrap_or_else(|| ModuleProgress::not_started(module.id));

        let lessons = (1..=u64::from(module.lessons))
            .map(|n| LessonVm {
                id: n,
                label: format!("Lesson {n}"),
                completed: progress.is_lesson_completed(LessonId::new(n)),
            })
            .collect();

        let exercises = if exercises.is_empty() {
            module
                .content
                .exercises
                .iter()
                .enumerate()
                .map(|(index, description)| ExerciseVm {
                    id: format!("{}-{}", module.id, index + 1),
                    description: description.clone(),
                    completed: false,
                })
                .collect()
        } else {
            exercises
                .iter()
                .map(|exercise| ExerciseVm {
                    id: exercise.id.as_str().to_string(),
                    description: exercise.description.clone(),
                    completed: exercise.completed,
                })
                .collect()
        };

        Self {
            id: module.id.value(),
            title: module.title.clone(),
            description: module.description.clone(),
            duration: module.duration.clone(),
            introduction: module.content.introduction.clone(),
            video_url: module.content.video_url.clone(),
            status_label: progress.status.label(),
            percentage: progress.progress_percentage,
            lessons,
            exercises,
            can_start: progress.status == ProgressStatus::NotStarted,
            is_completed: progress.status == ProgressStatus::Completed,
        }
    }

    /// First lesson not yet completed.
    #[must_use]
    pub fn next_lesson(&self) -> Option<u64> {
        self.lessons
            .iter()
            .find(|lesson| !lesson.completed)
            .map(|lesson| lesson.id)
    }
}
