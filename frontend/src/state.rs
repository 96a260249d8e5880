use shared::Task;
use uuid::Uuid;

pub const TASK_ADDED: &str = "Task added successfully.";
pub const TASK_UPDATED: &str = "Task updated successfully.";
pub const TASK_DELETED: &str = "Task deleted successfully.";

/// Coarse lifecycle of the initial list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient feedback message shown under the header and auto-cleared
/// after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

/// The application-side mirror of the remote task list. Mutated only in
/// response to confirmed server results, so a failed request leaves the
/// list exactly as it was.
#[derive(Debug, Default)]
pub struct TasksState {
    pub tasks: Vec<Task>,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub banner: Option<Banner>,
    banner_seq: u64,
}

impl TasksState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_started(&mut self) {
        self.status = FetchStatus::Loading;
    }

    pub fn fetch_succeeded(&mut self, tasks: Vec<Task>) {
        self.status = FetchStatus::Succeeded;
        self.tasks = tasks;
    }

    pub fn fetch_failed(&mut self, message: String) -> u64 {
        self.status = FetchStatus::Failed;
        self.error = Some(message.clone());
        self.set_banner(BannerKind::Error, message)
    }

    pub fn task_added(&mut self, task: Task) -> u64 {
        self.tasks.push(task);
        self.set_banner(BannerKind::Success, TASK_ADDED.to_string())
    }

    pub fn task_updated(&mut self, updated: Task) -> u64 {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == updated.id) {
            *task = updated;
        }
        self.set_banner(BannerKind::Success, TASK_UPDATED.to_string())
    }

    pub fn task_removed(&mut self, id: Uuid) -> u64 {
        self.tasks.retain(|t| t.id != id);
        self.set_banner(BannerKind::Success, TASK_DELETED.to_string())
    }

    pub fn operation_failed(&mut self, message: String) -> u64 {
        self.set_banner(BannerKind::Error, message)
    }

    /// Clears the banner only if `seq` still names the current one, so a
    /// timer from an already-replaced banner cannot dismiss a newer one.
    pub fn clear_banner(&mut self, seq: u64) {
        if self.banner_seq == seq {
            self.banner = None;
        }
    }

    fn set_banner(&mut self, kind: BannerKind, text: String) -> u64 {
        self.banner_seq += 1;
        self.banner = Some(Banner { kind, text });
        self.banner_seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::NewTask;

    fn task(title: &str) -> Task {
        Task::create(NewTask {
            title: title.to_string(),
            description: "d".to_string(),
            completed: false,
        })
    }

    #[test]
    fn fetch_replaces_the_list_on_success() {
        let mut state = TasksState::new();
        state.fetch_started();
        assert_eq!(state.status, FetchStatus::Loading);

        state.fetch_succeeded(vec![task("a"), task("b")]);
        assert_eq!(state.status, FetchStatus::Succeeded);
        assert_eq!(state.tasks.len(), 2);
    }

    #[test]
    fn fetch_failure_records_error_and_keeps_list() {
        let mut state = TasksState::new();
        state.fetch_succeeded(vec![task("kept")]);
        state.fetch_failed("boom".to_string());

        assert_eq!(state.status, FetchStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.banner.as_ref().unwrap().kind, BannerKind::Error);
    }

    #[test]
    fn added_task_is_appended_with_success_banner() {
        let mut state = TasksState::new();
        state.task_added(task("new"));
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.banner.as_ref().unwrap().text, TASK_ADDED);
    }

    #[test]
    fn updated_task_replaces_matching_record_only() {
        let mut state = TasksState::new();
        let a = task("a");
        let b = task("b");
        state.fetch_succeeded(vec![a.clone(), b.clone()]);

        let mut changed = b.clone();
        changed.completed = true;
        state.task_updated(changed);

        assert!(!state.tasks[0].completed);
        assert!(state.tasks[1].completed);
        assert_eq!(state.banner.as_ref().unwrap().text, TASK_UPDATED);
    }

    #[test]
    fn removed_task_is_dropped_from_list() {
        let mut state = TasksState::new();
        let a = task("a");
        let b = task("b");
        state.fetch_succeeded(vec![a.clone(), b]);
        state.task_removed(a.id);

        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].title, "b");
        assert_eq!(state.banner.as_ref().unwrap().text, TASK_DELETED);
    }

    #[test]
    fn operation_failure_leaves_list_untouched() {
        let mut state = TasksState::new();
        state.fetch_succeeded(vec![task("a")]);
        state.operation_failed("server said no".to_string());
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.banner.as_ref().unwrap().kind, BannerKind::Error);
    }

    #[test]
    fn stale_timer_does_not_clear_a_newer_banner() {
        let mut state = TasksState::new();
        let old_seq = state.task_added(task("a"));
        let new_seq = state.task_added(task("b"));

        state.clear_banner(old_seq);
        assert!(state.banner.is_some());

        state.clear_banner(new_seq);
        assert!(state.banner.is_none());
    }
}
