use std::collections::HashSet;

use domain::adapters::fixture_repo::FixtureRepo;
use domain::service::CatalogService;
use proptest::prelude::*;

fn svc() -> CatalogService<FixtureRepo> {
    CatalogService::new(FixtureRepo::tech_day())
}

// Mix of fixture fragments and arbitrary text so matches actually happen.
fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ana".to_string()),
        Just("GARCÍA".to_string()),
        Just("infra".to_string()),
        Just("AI".to_string()),
        Just(" ".to_string()),
        "[a-zA-Z ]{0,6}",
        "\\PC{0,8}",
    ]
}

proptest! {
    #[test]
    fn filtered_speakers_are_a_subset(q in query_strategy()) {
        let s = svc();
        let all = s.filter_speakers(None);
        for speaker in s.filter_speakers(Some(q.as_str())) {
            prop_assert!(all.contains(&speaker));
        }
    }

    #[test]
    fn filtered_schedule_is_a_subset_by_id(q in query_strategy()) {
        let s = svc();
        let all: HashSet<String> = s
            .filter_schedule(None)
            .into_iter()
            .map(|t| t.talk.id)
            .collect();
        for talk in s.filter_schedule(Some(q.as_str())) {
            prop_assert!(all.contains(&talk.talk.id));
        }
    }

    #[test]
    fn filtering_is_idempotent(q in query_strategy()) {
        let s = svc();
        prop_assert_eq!(s.filter_speakers(Some(q.as_str())), s.filter_speakers(Some(q.as_str())));
        prop_assert_eq!(s.filter_schedule(Some(q.as_str())), s.filter_schedule(Some(q.as_str())));
    }

    #[test]
    fn ascii_case_does_not_change_results(q in "[a-zA-Z]{1,6}") {
        let s = svc();
        let lower = q.to_lowercase();
        let upper = q.to_uppercase();
        prop_assert_eq!(s.filter_speakers(Some(lower.as_str())), s.filter_speakers(Some(upper.as_str())));
        prop_assert_eq!(s.filter_schedule(Some(lower.as_str())), s.filter_schedule(Some(upper.as_str())));
    }

    #[test]
    fn every_match_contains_the_query(q in query_strategy()) {
        let s = svc();
        let needle = q.to_lowercase();
        for speaker in s.filter_speakers(Some(q.as_str())) {
            prop_assert!(speaker.name.to_lowercase().contains(&needle));
        }
        for e in s.filter_schedule(Some(q.as_str())) {
            let hit = e.talk.title.to_lowercase().contains(&needle)
                || e.talk.category.to_lowercase().contains(&needle)
                || e.speaker_details.iter().any(|sp| sp.name.to_lowercase().contains(&needle));
            prop_assert!(hit);
        }
    }
}

#[test]
fn empty_query_equals_no_query() {
    let s = svc();
    assert_eq!(s.filter_speakers(Some("")), s.filter_speakers(None));
    assert_eq!(s.filter_schedule(Some("")), s.filter_schedule(None));
}
