use crate::query::SearchQuery;
use crate::{CatalogRepository, CatalogSearch, EnrichedTalk, EventInfo, Speaker, Talk};

/// Application service filtering and enriching the catalog.
///
/// It is generic over the repository and owns it; callers share the service
/// behind an `Arc`. Every operation is a pure read over the store.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn event_info(&self) -> EventInfo {
        self.repo.event_info().clone()
    }

    /// Speakers whose name contains `query`, case-insensitively. An absent or
    /// empty query returns every speaker in store order.
    pub fn filter_speakers(&self, query: Option<&str>) -> Vec<Speaker> {
        let needle = SearchQuery::parse(query);
        self.repo
            .all_speakers()
            .iter()
            .filter(|s| needle.as_ref().map_or(true, |q| q.matches(&s.name)))
            .cloned()
            .collect()
    }

    /// Talks enriched with their speakers, keeping those whose title,
    /// category or any resolved speaker name contains `query`.
    pub fn filter_schedule(&self, query: Option<&str>) -> Vec<EnrichedTalk> {
        let needle = SearchQuery::parse(query);
        self.repo
            .all_talks()
            .iter()
            .map(|talk| self.enrich(talk))
            .filter(|e| needle.as_ref().map_or(true, |q| talk_matches(q, e)))
            .collect()
    }

    /// Event, schedule and speakers for one query, with the query echoed back.
    pub fn search(&self, query: Option<&str>) -> CatalogSearch {
        CatalogSearch {
            event: self.event_info(),
            schedule: self.filter_schedule(query),
            speakers: self.filter_speakers(query),
            query: query.unwrap_or_default().to_string(),
        }
    }

    // Unknown keys are skipped.
    fn enrich(&self, talk: &Talk) -> EnrichedTalk {
        let speaker_details = talk
            .speakers
            .iter()
            .filter_map(|key| self.repo.speaker_by_id(key))
            .cloned()
            .collect();
        EnrichedTalk {
            talk: talk.clone(),
            speaker_details,
        }
    }
}

fn talk_matches(q: &SearchQuery, e: &EnrichedTalk) -> bool {
    q.matches(&e.talk.title)
        || q.matches(&e.talk.category)
        || e.speaker_details.iter().any(|s| q.matches(&s.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fixture_repo::FixtureRepo;
    use crate::SpeakerKey;

    fn svc() -> CatalogService<FixtureRepo> {
        CatalogService::new(FixtureRepo::tech_day())
    }

    fn ids(talks: &[EnrichedTalk]) -> Vec<&str> {
        talks.iter().map(|t| t.talk.id.as_str()).collect()
    }

    #[test]
    fn no_query_returns_everything() {
        let s = svc();
        assert_eq!(s.filter_schedule(None).len(), 9);
        assert_eq!(s.filter_speakers(None).len(), 8);
        assert_eq!(s.filter_schedule(Some("")).len(), 9);
        assert_eq!(s.filter_speakers(Some("")).len(), 8);
        assert!(ids(&s.filter_schedule(None)).contains(&"lunch"));
    }

    #[test]
    fn enrichment_preserves_reference_order() {
        let s = svc();
        let schedule = s.filter_schedule(None);
        let t6 = schedule.iter().find(|t| t.talk.id == "t6").unwrap();
        let names: Vec<_> = t6.speaker_details.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Javier Martínez", "Ana García"]);
    }

    #[test]
    fn category_query_matches_infrastructure_talks() {
        let schedule = svc().filter_schedule(Some("infraestructura"));
        assert_eq!(ids(&schedule), ["t2", "t6"]);
        assert!(schedule.iter().all(|t| !t.speaker_details.is_empty()));
    }

    #[test]
    fn speaker_name_query_matches_speakers_and_talks() {
        let s = svc();
        let speakers = s.filter_speakers(Some("garcía"));
        assert_eq!(speakers.len(), 1);
        assert_eq!(speakers[0].name, "Ana García");
        assert_eq!(ids(&s.filter_schedule(Some("garcía"))), ["t2", "t6"]);
    }

    #[test]
    fn title_query_is_case_insensitive() {
        let s = svc();
        assert_eq!(ids(&s.filter_schedule(Some("KUBERNETES"))), ["t6"]);
        assert_eq!(s.filter_speakers(Some("ana")), s.filter_speakers(Some("ANA")));
    }

    #[test]
    fn break_is_filtered_like_any_talk() {
        let s = svc();
        assert_eq!(ids(&s.filter_schedule(Some("break"))), ["lunch"]);
        assert!(!ids(&s.filter_schedule(Some("kubernetes"))).contains(&"lunch"));
    }

    #[test]
    fn description_is_not_searched() {
        assert!(svc().filter_schedule(Some("GKE")).is_empty());
    }

    #[test]
    fn unknown_speaker_key_is_skipped() {
        let mut talks = FixtureRepo::tech_day().all_talks().to_vec();
        talks[0].speakers.push(SpeakerKey::new("ghost").unwrap());
        let base = FixtureRepo::tech_day();
        let speakers: Vec<_> = base
            .all_speakers()
            .iter()
            .enumerate()
            .map(|(i, sp)| (SpeakerKey::new(format!("s{}", i + 1)).unwrap(), sp.clone()))
            .collect();
        let repo = FixtureRepo::new(base.event_info().clone(), speakers, talks).unwrap();
        let s = CatalogService::new(repo);

        let schedule = s.filter_schedule(None);
        assert_eq!(schedule.len(), 9);
        assert_eq!(schedule[0].talk.speakers.len(), 2);
        assert_eq!(schedule[0].speaker_details.len(), 1);
        assert_eq!(schedule[0].speaker_details[0].name, "David Ruiz");
    }

    #[test]
    fn search_echoes_query() {
        let s = svc();
        let all = s.search(None);
        assert_eq!(all.query, "");
        assert_eq!(all.schedule.len(), 9);

        let found = s.search(Some("Torres"));
        assert_eq!(found.query, "Torres");
        assert_eq!(found.speakers.len(), 1);
        assert_eq!(ids(&found.schedule), ["t7", "t8"]);
        assert_eq!(found.event.title, "Google Cloud Tech Day 2025");
    }
}
