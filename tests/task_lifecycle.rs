#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use chrono::Utc;
    use dwell::db::sessions::Sessions;
    use dwell::db::tasks::Tasks;
    use dwell::libs::error::CoreError;
    use dwell::libs::task::{Task, TaskCategory, TaskFilter, TaskState, UNTITLED_TASK};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests in one binary share the process environment, so the HOME
    // override must not interleave.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct TaskTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            TaskTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
            }
        }
    }

    fn create_task(tasks: &mut Tasks, title: &str, estimate: Option<u32>) -> Task {
        tasks.insert(&Task::new(title, estimate, TaskCategory::Work)).unwrap()
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_new_task_defaults(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let task = create_task(&mut tasks, "Write the report", Some(60));

        assert!(task.id.is_some());
        assert_eq!(task.state, TaskState::Cold);
        assert_eq!(task.spent_minutes, 0);
        assert_eq!(task.session_count, 0);
        assert_eq!(task.last_finish_note, None);
        assert_eq!(task.remaining_minutes(), Some(60));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_blank_title_gets_placeholder(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let task = create_task(&mut tasks, "   ", None);
        assert_eq!(task.title, UNTITLED_TASK);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_estimate_out_of_range_rejected(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let err = tasks.insert(&Task::new("Too big", Some(10_000), TaskCategory::Work)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_edit_keeps_state(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let task = create_task(&mut tasks, "Original", Some(30));
        let id = task.id.unwrap();

        let edited = tasks.edit(id, Some("Renamed"), Some(90), None).unwrap();
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.estimate_minutes, Some(90));
        assert_eq!(edited.state, TaskState::Cold);
        assert!(edited.updated_at >= task.updated_at);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_mark_done_is_idempotent(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Archive me", None).id.unwrap();

        let first = tasks.mark_done(id).unwrap();
        assert_eq!(first.state, TaskState::Done);

        let second = tasks.mark_done(id).unwrap();
        assert_eq!(second.state, TaskState::Done);
        assert_eq!(second.session_count, first.session_count);

        let mut sessions = Sessions::new().unwrap();
        assert!(sessions.fetch_by_task(id).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_restore_with_sessions_goes_warm(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Worked on", Some(120)).id.unwrap();

        // Run three completed sessions through the state machine.
        for _ in 0..3 {
            tasks.set_state(id, TaskState::Focusing).unwrap();
            tasks.record_finish(id, Utc::now(), 25, None).unwrap();
        }
        let task = tasks.mark_done(id).unwrap();
        assert_eq!(task.session_count, 3);

        let restored = tasks.restore(id).unwrap();
        assert_eq!(restored.state, TaskState::Warm);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_restore_without_sessions_goes_cold(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Never worked", None).id.unwrap();
        tasks.mark_done(id).unwrap();

        let restored = tasks.restore(id).unwrap();
        assert_eq!(restored.state, TaskState::Cold);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_counters_never_decrease(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Monotonic", Some(60)).id.unwrap();

        let mut last_spent = 0;
        let mut last_count = 0;
        for minutes in [5, 1, 30] {
            tasks.set_state(id, TaskState::Focusing).unwrap();
            let (task, _) = tasks.record_finish(id, Utc::now(), minutes, None).unwrap();
            assert!(task.spent_minutes > last_spent);
            assert!(task.session_count > last_count);
            last_spent = task.spent_minutes;
            last_count = task.session_count;
        }
        assert_eq!(last_spent, 36);
        assert_eq!(last_count, 3);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_finish_on_non_focusing_task_fails(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Idle", None).id.unwrap();
        let err = tasks.record_finish(id, Utc::now(), 10, None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_retains_sessions(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Short lived", Some(30)).id.unwrap();
        tasks.set_state(id, TaskState::Focusing).unwrap();
        tasks.record_finish(id, Utc::now(), 15, Some("left a note")).unwrap();

        tasks.delete(id).unwrap();
        let err = tasks.get_by_id(id).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));

        // Orphaned sessions survive for lifetime statistics.
        let mut sessions = Sessions::new().unwrap();
        let history = sessions.fetch_by_task(id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].minutes, 15);
        assert_eq!(sessions.total_minutes().unwrap(), 15);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_missing_task_fails(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let err = tasks.delete(42).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_fetch_filters(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        create_task(&mut tasks, "Active one", None);
        let done_id = create_task(&mut tasks, "Done one", None).id.unwrap();
        tasks.mark_done(done_id).unwrap();

        assert_eq!(tasks.fetch(TaskFilter::All).unwrap().len(), 2);
        assert_eq!(tasks.fetch(TaskFilter::Active).unwrap().len(), 1);
        assert_eq!(tasks.fetch(TaskFilter::Done).unwrap().len(), 1);
        assert_eq!(tasks.fetch(TaskFilter::ByState(TaskState::Focusing)).unwrap().len(), 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_session_range_queries(_ctx: &mut TaskTestContext) {
        let mut tasks = Tasks::new().unwrap();
        let id = create_task(&mut tasks, "Tracked", Some(60)).id.unwrap();

        let before = Utc::now();
        for minutes in [10, 20] {
            tasks.set_state(id, TaskState::Focusing).unwrap();
            tasks.record_finish(id, Utc::now(), minutes, None).unwrap();
        }
        let after = Utc::now();

        let mut sessions = Sessions::new().unwrap();
        let in_range = sessions.fetch_range(before, after).unwrap();
        assert_eq!(in_range.len(), 2);
        // Ordered by end time.
        assert!(in_range[0].end_at <= in_range[1].end_at);
        assert_eq!(sessions.minutes_in_range(before, after).unwrap(), 30);
        assert!(sessions.fetch_range(before, before).unwrap().is_empty());
        assert_eq!(sessions.minutes_today().unwrap(), 30);
    }
}
