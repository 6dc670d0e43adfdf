use mongodb::bson::oid::ObjectId;

use crate::models::{
    CompanyDetail, CreateInterviewRequest, CurrentUser, Dashboard, InterviewDetail,
    InterviewListing, InterviewRecord, ModerationStatus,
};
use crate::seeds::sample_interviews::sample_interviews;
use crate::services::aggregator::{self, ContributionTab, HighlightPolicy};
use crate::services::filter::{self, FilterOptions, FilterSelection};
use crate::store::InterviewStore;
use crate::utils::{fold, slugify, unslug, AppError, CompanyKey};

/// Records read for a view. A failed read degrades to an empty list with a
/// notice for the user instead of failing the request.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub records: Vec<InterviewRecord>,
    pub notice: Option<String>,
}

pub async fn snapshot(store: &dyn InterviewStore) -> Snapshot {
    match store.find_recent(None).await {
        Ok(records) => {
            log::info!("📚 Loaded {} interview records", records.len());
            Snapshot { records, notice: None }
        }
        Err(e) => {
            log::error!("❌ Failed to load interviews: {}", e);
            Snapshot {
                records: Vec::new(),
                notice: Some("Failed to load interviews. Please try again.".to_string()),
            }
        }
    }
}

pub async fn create_interview(
    store: &dyn InterviewStore,
    user: &CurrentUser,
    request: CreateInterviewRequest,
    now: i64,
) -> Result<InterviewRecord, AppError> {
    request.validate()?;

    let mut record = InterviewRecord {
        id: None,
        company: request.company.trim().to_string(),
        role: request.role.trim().to_string(),
        interview_type: request.interview_type.trim().to_string(),
        rounds: request.rounds,
        process: request.process,
        questions: request.questions,
        preparation: request.preparation.filter(|p| !p.trim().is_empty()),
        timeline: request.timeline.filter(|t| !t.trim().is_empty()),
        difficulty: request.difficulty,
        outcome: request.outcome.filter(|o| !o.trim().is_empty()),
        created_at: Some(now),
        created_by: Some(user.user_id.clone()),
        created_by_email: user.email.clone(),
        status: ModerationStatus::Pending,
    };

    let id = store.insert_interview(&record).await?;
    record.id = Some(id);
    log::info!("✅ Interview {} created by {} for {}", id, user.user_id, record.company);
    Ok(record)
}

pub async fn delete_interview(
    store: &dyn InterviewStore,
    user: &CurrentUser,
    id: &str,
) -> Result<(), AppError> {
    let object_id = ObjectId::parse_str(id)?;
    if store.delete_owned(&object_id, &user.user_id).await? {
        log::info!("🗑️ Interview {} deleted by {}", id, user.user_id);
        Ok(())
    } else {
        Err(AppError::NotFound(format!("interview {}", id)))
    }
}

/// Single visible interview. Hidden records are reported as not found.
pub async fn get_interview(store: &dyn InterviewStore, id: &str) -> Result<InterviewDetail, AppError> {
    let object_id = ObjectId::parse_str(id)?;
    match store.find_interview(&object_id).await? {
        Some(record) if record.is_visible() => Ok(aggregator::detail(&record)),
        _ => Err(AppError::NotFound(format!("interview {}", id))),
    }
}

/// Company page by slug. Candidates are every record whose name slugifies
/// to `slug`, equals it, or matches it case-insensitively; the page shows
/// the largest group under `key`, so it names the same company that
/// `group_by_company` summarised under that slug. No match yields
/// placeholder content.
pub async fn company_detail(
    store: &dyn InterviewStore,
    slug: &str,
    key: CompanyKey,
) -> Result<CompanyDetail, AppError> {
    let wanted = [fold(&unslug(slug)), fold(slug)];
    let candidates: Vec<InterviewRecord> = store
        .find_all()
        .await?
        .into_iter()
        .filter(|r| {
            r.company == slug || slugify(&r.company) == slug || wanted.contains(&fold(&r.company))
        })
        .collect();

    let matches: Vec<InterviewRecord> = aggregator::recent(&candidates, None)
        .into_iter()
        .cloned()
        .collect();

    if matches.is_empty() {
        log::info!("ℹ️ No interviews for '{}', serving placeholder content", slug);
        return Ok(CompanyDetail {
            company: unslug(slug),
            slug: slug.to_string(),
            found: false,
            interviews: sample_interviews().iter().map(aggregator::detail).collect(),
        });
    }

    let company = aggregator::group_by_company(&matches, key)
        .into_iter()
        .next()
        .map(|g| g.name)
        .unwrap_or_else(|| unslug(slug));

    Ok(CompanyDetail {
        slug: slugify(&company),
        interviews: matches
            .iter()
            .filter(|r| key.same(&r.company, &company))
            .map(aggregator::detail)
            .collect(),
        company,
        found: true,
    })
}

/// Newest `limit` visible records. Reads newest-first pages from the store,
/// widening the page while hidden records leave the slice short.
pub async fn recent_visible(
    store: &dyn InterviewStore,
    limit: usize,
) -> Result<Vec<InterviewRecord>, AppError> {
    let mut page = (limit as i64).max(1);
    loop {
        let records = store.find_recent(Some(page)).await?;
        let exhausted = (records.len() as i64) < page;
        let visible = aggregator::recent(&records, Some(limit));
        if visible.len() >= limit || exhausted {
            return Ok(visible.into_iter().cloned().collect());
        }
        page = page.saturating_mul(2);
    }
}

/// Server side of `GET /search`: text match over visible records.
pub async fn search(
    store: &dyn InterviewStore,
    query: &str,
) -> Result<Vec<InterviewListing>, AppError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records = store.find_recent(None).await?;
    Ok(filter::search_local(&filter::to_listings(&records), query))
}

pub struct Listing {
    pub interviews: Vec<InterviewListing>,
    pub options: FilterOptions,
    pub notice: Option<String>,
}

/// Full listing page: text search, then the shared categorical filters.
/// Dropdown options come from the text-matched list.
pub async fn listing(
    store: &dyn InterviewStore,
    query: &str,
    selection: &FilterSelection,
    key: CompanyKey,
    limit: Option<usize>,
) -> Listing {
    let snap = snapshot(store).await;
    let base = filter::search_local(&filter::to_listings(&snap.records), query);
    let mut interviews = filter::apply_filters(&base, selection, key);
    if let Some(limit) = limit {
        interviews.truncate(limit);
    }
    Listing {
        options: filter::filter_options(&base),
        interviews,
        notice: snap.notice,
    }
}

pub async fn contributions(
    store: &dyn InterviewStore,
    user: Option<&CurrentUser>,
    tab: ContributionTab,
) -> Result<Vec<InterviewDetail>, AppError> {
    let Some(current) = user else {
        return Ok(Vec::new());
    };
    let records = store.find_by_creator(&current.user_id).await?;
    Ok(aggregator::contributions(&records, user, tab)
        .into_iter()
        .map(aggregator::detail)
        .collect())
}

pub async fn dashboard(
    store: &dyn InterviewStore,
    user: Option<&CurrentUser>,
    key: CompanyKey,
    policy: &dyn HighlightPolicy,
    now: i64,
) -> (Dashboard, Option<String>) {
    let snap = snapshot(store).await;
    let dashboard = Dashboard {
        stats: aggregator::stats(&snap.records, key, user),
        recent: aggregator::recent_cards(&snap.records, policy, now, aggregator::DASHBOARD_RECENT_LIMIT),
        recommended: aggregator::recommended_cards(&snap.records, policy, now, aggregator::RECOMMENDED_LIMIT),
    };
    (dashboard, snap.notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use crate::services::aggregator::tests::record;
    use crate::services::aggregator::EditorialHighlights;
    use crate::store::memory::MemoryStore;

    fn user(uid: &str) -> CurrentUser {
        CurrentUser { user_id: uid.to_string(), email: Some(format!("{}@uw.edu", uid)) }
    }

    fn request() -> CreateInterviewRequest {
        CreateInterviewRequest {
            company: " Google ".into(),
            role: "SWE Intern".into(),
            interview_type: "Technical, Behavioral, Technical".into(),
            rounds: 3,
            process: "OA, two technical rounds, one behavioral".into(),
            questions: "Q1\nQ2\nQ3".into(),
            preparation: Some("  ".into()),
            timeline: None,
            difficulty: Some(Difficulty::Hard),
            outcome: Some("Offer".into()),
        }
    }

    #[tokio::test]
    async fn test_create_then_read_back_partitions() {
        let store = MemoryStore::default();
        let created = create_interview(&store, &user("u1"), request(), 1_700_000_000)
            .await
            .unwrap();
        assert_eq!(created.status, ModerationStatus::Pending);
        assert_eq!(created.company, "Google");
        assert_eq!(created.created_by.as_deref(), Some("u1"));
        assert!(created.preparation.is_none());

        let detail = get_interview(&store, &created.id_hex()).await.unwrap();
        assert_eq!(detail.rounds.len(), 3);
        assert!(detail.rounds.iter().all(|r| r.questions.len() == 1));
        assert_eq!(detail.shared_by, "u1");
    }

    #[tokio::test]
    async fn test_invalid_submission_never_writes() {
        let store = MemoryStore::default();
        let mut bad = request();
        bad.questions = String::new();
        let err = create_interview(&store, &user("u1"), bad, 0).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_hidden_interview_is_not_found() {
        let mut r = record("Google", "SWE", Some(1));
        r.status = ModerationStatus::Rejected;
        let store = MemoryStore::with_interviews(vec![r]);
        let id = store.find_all().await.unwrap()[0].id_hex();
        assert!(matches!(get_interview(&store, &id).await, Err(AppError::NotFound(_))));
        assert!(matches!(get_interview(&store, "nope").await, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_only_own() {
        let store = MemoryStore::default();
        let created = create_interview(&store, &user("u1"), request(), 1).await.unwrap();
        let id = created.id_hex();
        assert!(delete_interview(&store, &user("u2"), &id).await.is_err());
        assert!(delete_interview(&store, &user("u1"), &id).await.is_ok());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_company_detail_lookup_chain() {
        let store = MemoryStore::with_interviews(vec![
            record("Tech Giant Corp", "SWE", Some(3)),
            record("Tech Giant Corp", "PM", Some(2)),
            record("tech giant corp", "Data", Some(1)),
        ]);

        let exact = company_detail(&store, "tech-giant-corp", CompanyKey::Exact).await.unwrap();
        assert!(exact.found);
        assert_eq!(exact.company, "Tech Giant Corp");
        assert_eq!(exact.interviews.len(), 2);

        let folded = company_detail(&store, "tech-giant-corp", CompanyKey::Folded).await.unwrap();
        assert_eq!(folded.interviews.len(), 3);

        // lower-cased name with spaces, as older links produce
        let scanned = company_detail(&store, "TECH GIANT CORP", CompanyKey::Folded).await.unwrap();
        assert!(scanned.found);

        let missing = company_detail(&store, "initech", CompanyKey::Exact).await.unwrap();
        assert!(!missing.found);
        assert_eq!(missing.company, "initech");
        assert!(!missing.interviews.is_empty());
    }

    #[tokio::test]
    async fn test_company_page_agrees_with_featured_group() {
        let records = vec![
            record("Google", "SWE", Some(3)),
            record("Google", "PM", Some(2)),
            record("google", "Data", Some(1)),
        ];
        let store = MemoryStore::with_interviews(records.clone());

        for (key, expected) in [(CompanyKey::Exact, 2), (CompanyKey::Folded, 3)] {
            let top = aggregator::group_by_company(&records, key).remove(0);
            assert_eq!(top.slug, "google");
            assert_eq!(top.interview_count, expected);

            let page = company_detail(&store, &top.slug, key).await.unwrap();
            assert!(page.found);
            assert_eq!(page.company, top.name, "{:?}", key);
            assert_eq!(page.interviews.len(), expected, "{:?}", key);
        }
    }

    #[tokio::test]
    async fn test_recent_visible_widens_past_hidden_records() {
        let mut records: Vec<InterviewRecord> = (10..16)
            .map(|t| {
                let mut r = record("Hidden", "SWE", Some(t));
                r.status = ModerationStatus::Rejected;
                r
            })
            .collect();
        records.push(record("Google", "SWE", Some(2)));
        records.push(record("Meta", "PM", Some(1)));
        records.push(record("Ramp", "SWE", Some(0)));
        let store = MemoryStore::with_interviews(records);

        let recent = recent_visible(&store, 2).await.unwrap();
        let names: Vec<&str> = recent.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, vec!["Google", "Meta"]);

        let all = recent_visible(&store, 10).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_placeholder() {
        let store = MemoryStore::failing();
        assert!(matches!(
            company_detail(&store, "google", CompanyKey::Exact).await,
            Err(AppError::DatabaseError(_))
        ));
    }

    #[tokio::test]
    async fn test_listing_degrades_on_store_failure() {
        let store = MemoryStore::failing();
        let page = listing(&store, "", &FilterSelection::default(), CompanyKey::Exact, None).await;
        assert!(page.interviews.is_empty());
        assert!(page.notice.is_some());
    }

    #[tokio::test]
    async fn test_listing_and_search() {
        let mut hidden = record("Google", "SWE", Some(9));
        hidden.status = ModerationStatus::Rejected;
        let store = MemoryStore::with_interviews(vec![
            record("Google", "SWE Intern", Some(1)),
            record("Meta", "Product Designer", Some(2)),
            hidden,
        ]);

        let hits = search(&store, "google").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert!(search(&store, "").await.unwrap().is_empty());

        let sel = FilterSelection::from_dropdowns(None, Some("designer"));
        let page = listing(&store, "", &sel, CompanyKey::Exact, None).await;
        assert_eq!(page.interviews.len(), 1);
        assert_eq!(page.interviews[0].company, "Meta");
        assert_eq!(page.options.companies, vec!["Google", "Meta"]);
    }

    #[tokio::test]
    async fn test_contributions_and_dashboard() {
        let store = MemoryStore::default();
        create_interview(&store, &user("u1"), request(), 100).await.unwrap();
        create_interview(&store, &user("u2"), request(), 200).await.unwrap();

        let mine = contributions(&store, Some(&user("u1")), ContributionTab::Drafts).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert!(contributions(&store, Some(&user("u1")), ContributionTab::Published)
            .await
            .unwrap()
            .is_empty());
        assert!(contributions(&store, None, ContributionTab::All).await.unwrap().is_empty());

        let (dash, notice) =
            dashboard(&store, Some(&user("u1")), CompanyKey::Exact, &EditorialHighlights, 300).await;
        assert!(notice.is_none());
        assert_eq!(dash.stats.interviews_explored, 2);
        assert_eq!(dash.stats.companies_researched, 1);
        assert_eq!(dash.stats.your_contributions, 1);
        assert_eq!(dash.recent.len(), 2);
        assert_eq!(dash.recommended.len(), 2);
    }
}
