#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use dwell::libs::recommend::{recommend, RecommendationNote};
    use dwell::libs::task::{Task, TaskCategory, TaskState};

    fn base_task(id: i64, title: &str) -> Task {
        let created = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(id);
        Task {
            id: Some(id),
            title: title.to_string(),
            estimate_minutes: None,
            spent_minutes: 0,
            state: TaskState::Cold,
            category: TaskCategory::Work,
            last_finish_note: None,
            last_session_end_at: None,
            session_count: 0,
            created_at: created,
            updated_at: created,
        }
    }

    fn estimated(id: i64, title: &str, estimate: u32, spent: u32) -> Task {
        let mut task = base_task(id, title);
        task.estimate_minutes = Some(estimate);
        task.spent_minutes = spent;
        task
    }

    #[test]
    fn test_partial_progress_beats_unknown_estimate() {
        // estimate 60, spent 40 => remaining 20, fits a 30 minute window.
        let fits = estimated(1, "Report", 60, 40);
        let unknown = base_task(2, "No estimate");
        let result = recommend(&[unknown, fits], 30);

        let top = result.top.unwrap();
        assert_eq!(top.task.id, Some(1));
        assert_eq!(top.remaining_minutes, Some(20));
    }

    #[test]
    fn test_deterministic() {
        let tasks = vec![
            estimated(1, "A", 50, 10),
            estimated(2, "B", 45, 10),
            estimated(3, "C", 60, 30),
            base_task(4, "D"),
        ];
        let first = recommend(&tasks, 40);
        let second = recommend(&tasks, 40);

        let ids = |r: &dwell::libs::recommend::Recommendation| {
            (
                r.top.as_ref().and_then(|t| t.task.id),
                r.alternatives.iter().filter_map(|t| t.task.id).collect::<Vec<_>>(),
                r.message,
            )
        };
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_three_matches_no_message() {
        let tasks = vec![estimated(1, "A", 20, 0), estimated(2, "B", 25, 0), estimated(3, "C", 30, 0), estimated(4, "D", 10, 0)];
        let result = recommend(&tasks, 30);

        assert_eq!(result.message, None);
        assert_eq!(result.top.unwrap().task.id, Some(4)); // smallest remaining
        let alt_ids: Vec<_> = result.alternatives.iter().map(|t| t.task.id).collect();
        assert_eq!(alt_ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_overflow_fallback_carries_message() {
        // Nothing fits the 15 minute window, but estimated work exists.
        let tasks = vec![estimated(1, "Long", 120, 0), estimated(2, "Longer", 200, 0)];
        let result = recommend(&tasks, 15);

        assert_eq!(result.message, Some(RecommendationNote::MayNotFinish));
        assert_eq!(result.top.unwrap().task.id, Some(1));
        assert_eq!(result.alternatives.len(), 1);
    }

    #[test]
    fn test_partial_match_pads_without_message() {
        // One match plus overflow candidates: matches lead, no message.
        let tasks = vec![estimated(1, "Fits", 20, 0), estimated(2, "Too long", 90, 0)];
        let result = recommend(&tasks, 30);

        assert_eq!(result.message, None);
        assert_eq!(result.top.unwrap().task.id, Some(1));
        assert_eq!(result.alternatives.len(), 1);
        assert_eq!(result.alternatives[0].task.id, Some(2));
    }

    #[test]
    fn test_unestimated_fallback() {
        let tasks = vec![base_task(2, "Second"), base_task(1, "First")];
        let result = recommend(&tasks, 60);

        assert_eq!(result.message, Some(RecommendationNote::AddEstimates));
        // Oldest created first.
        assert_eq!(result.top.unwrap().task.id, Some(1));
        assert_eq!(result.alternatives[0].task.id, Some(2));
    }

    #[test]
    fn test_empty_result() {
        let result = recommend(&[], 60);
        assert!(result.top.is_none());
        assert!(result.alternatives.is_empty());
        assert_eq!(result.message, Some(RecommendationNote::NothingToRecommend));
    }

    #[test]
    fn test_done_and_leisure_excluded() {
        let mut done = estimated(1, "Done", 10, 0);
        done.state = TaskState::Done;
        let mut leisure = estimated(2, "Leisure", 10, 0);
        leisure.category = TaskCategory::Leisure;
        let result = recommend(&[done, leisure], 60);

        assert!(result.top.is_none());
        assert_eq!(result.message, Some(RecommendationNote::NothingToRecommend));
    }

    #[test]
    fn test_stale_task_wins_tie() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let mut recent = estimated(1, "Recent", 30, 0);
        recent.state = TaskState::Warm;
        recent.last_session_end_at = Some(now);
        let mut stale = estimated(2, "Stale", 30, 0);
        stale.state = TaskState::Warm;
        stale.last_session_end_at = Some(now - Duration::days(3));

        let result = recommend(&[recent, stale], 60);
        assert_eq!(result.top.unwrap().task.id, Some(2));
    }

    #[test]
    fn test_never_worked_counts_as_stalest() {
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        let mut worked = estimated(1, "Worked", 30, 0);
        worked.state = TaskState::Warm;
        worked.last_session_end_at = Some(now - Duration::days(30));
        let untouched = estimated(2, "Untouched", 30, 0);

        let result = recommend(&[worked, untouched], 60);
        assert_eq!(result.top.unwrap().task.id, Some(2));
    }

    #[test]
    fn test_warm_beats_cold_on_full_tie() {
        let mut warm = estimated(2, "Warm", 30, 0);
        warm.state = TaskState::Warm;
        let cold = estimated(1, "Cold", 30, 0);

        let result = recommend(&[cold, warm], 60);
        assert_eq!(result.top.unwrap().task.id, Some(2));
    }
}
