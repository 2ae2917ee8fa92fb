#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use timewise::libs::rank::{self, ByDueTime, ByPriority, ByPriorityDue, ByWeightedDue, RankStrategy, SORT_METHODS, SORT_METHOD_HELP};
    use timewise::libs::task::Task;

    fn reference_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn task(name: &str, due: Option<NaiveDateTime>, priority: Option<i64>) -> Task {
        let mut task = Task::new(name, None, due);
        task.priority = priority;
        task
    }

    fn names(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|task| task.name.as_str()).collect()
    }

    #[test]
    fn test_due_time_orders_soonest_first() {
        let now = reference_time();
        let input = vec![
            task("C", Some(now + Duration::days(3)), None),
            task("A", Some(now + Duration::days(1)), None),
            task("B", Some(now + Duration::days(2)), None),
        ];

        let ranked = rank::rank_at(input, &ByDueTime, now);
        assert_eq!(names(&ranked), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_due_time_undated_lands_a_year_out() {
        let now = reference_time();
        let input = vec![
            task("far", Some(now + Duration::days(400)), None),
            task("undated", None, None),
            task("near", Some(now + Duration::days(10)), None),
        ];

        let ranked = rank::rank_at(input, &ByDueTime, now);
        assert_eq!(names(&ranked), vec!["near", "undated", "far"]);
    }

    #[test]
    fn test_priority_orders_ascending_with_default_five() {
        let now = reference_time();
        let input = vec![
            task("medium", None, Some(2)),
            task("unset", None, None),
            task("top", None, Some(0)),
        ];

        let ranked = rank::rank_at(input, &ByPriority, now);
        assert_eq!(names(&ranked), vec!["top", "medium", "unset"]);
    }

    #[test]
    fn test_equal_scores_keep_fetch_order() {
        let now = reference_time();
        let input = vec![task("X", None, Some(3)), task("Y", None, Some(3)), task("Z", None, Some(3))];

        let ranked = rank::rank_at(input, &ByPriority, now);
        assert_eq!(names(&ranked), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_priority_due_blends_due_proximity_and_priority() {
        let now = reference_time();
        let input = vec![
            task("later-low", Some(now + Duration::days(10)), Some(1)),
            task("soon-high", Some(now + Duration::days(1)), Some(5)),
            task("overdue", Some(now - Duration::days(5)), Some(3)),
            task("soon-low", Some(now + Duration::days(1)), Some(1)),
        ];

        // tanh caps the overdue pull, so the scores stay comparable:
        // overdue -0.04, soon-low 0.76, later-low 1.00, soon-high 1.76.
        let ranked = rank::rank_at(input, &ByPriorityDue, now);
        assert_eq!(names(&ranked), vec!["overdue", "soon-low", "later-low", "soon-high"]);
    }

    #[test]
    fn test_weighted_due_ranks_largest_ratio_first() {
        let now = reference_time();
        let mut fresh_far = task("fresh-far", Some(now + Duration::days(10)), None);
        fresh_far.start_time = Some(now - Duration::days(2));
        let mut fresh_near = task("fresh-near", Some(now + Duration::days(4)), None);
        fresh_near.start_time = Some(now - Duration::days(2));
        let mut stale_near = task("stale-near", Some(now + Duration::days(1)), None);
        stale_near.start_time = Some(now - Duration::days(10));
        let mut unstarted = task("unstarted", Some(now + Duration::days(5)), None);
        unstarted.start_time = None;

        let ranked = rank::rank_at(vec![stale_near, unstarted, fresh_far, fresh_near], &ByWeightedDue, now);
        assert_eq!(names(&ranked), vec!["fresh-far", "fresh-near", "stale-near", "unstarted"]);
    }

    #[test]
    fn test_weighted_due_zero_legs_score_zero() {
        let now = reference_time();
        let mut due_today = task("due-today", Some(now + Duration::hours(3)), None);
        due_today.start_time = Some(now - Duration::days(4));

        assert_eq!(ByWeightedDue.score(&due_today, now), 0.0);
    }

    #[test]
    fn test_reverse_flag_only_on_weighted_due() {
        assert!(ByWeightedDue.reverse());
        assert!(!ByDueTime.reverse());
        assert!(!ByPriority.reverse());
        assert!(!ByPriorityDue.reverse());
    }

    #[test]
    fn test_every_listed_method_resolves() {
        for name in SORT_METHODS {
            assert!(rank::strategy(name).is_ok(), "strategy '{}' should resolve", name);
        }
        let listed: Vec<&str> = SORT_METHOD_HELP.iter().map(|(name, _)| *name).collect();
        assert_eq!(listed, SORT_METHODS);
    }

    #[test]
    fn test_unknown_method_names_the_offender() {
        let err = rank::strategy("alphabetical").unwrap_err();
        assert!(err.to_string().contains("alphabetical"));
        assert!(rank::rank(Vec::new(), "alphabetical").is_err());
    }

    #[test]
    fn test_rank_with_empty_input() {
        assert!(rank::rank(Vec::new(), "due_time").unwrap().is_empty());
    }
}
