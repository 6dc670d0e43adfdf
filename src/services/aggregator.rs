//! Record aggregator: derives the per-screen views (featured companies,
//! recent and recommended cards, contributions, round partitions, stats)
//! from a flat record list.
//!
//! Every function applies the moderation gate first and never fails; bad
//! or missing fields degrade to display defaults.

use std::collections::HashMap;

use crate::models::{
    CompanySummary, CurrentUser, DashboardStats, InterviewCard, InterviewDetail,
    InterviewRecord, ModerationStatus, RoundPartition,
};
use crate::utils::{display, slugify, CompanyKey};

pub const FEATURED_LIMIT: usize = 6;
pub const DASHBOARD_RECENT_LIMIT: usize = 4;
pub const HOME_RECENT_LIMIT: usize = 6;
pub const RECOMMENDED_LIMIT: usize = 4;

const NEW_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;
const DETAILED_PREPARATION_CHARS: usize = 50;
const DESCRIPTION_CHARS: usize = 140;
const DEFAULT_INDUSTRY: &str = "Technology";
const DEFAULT_ROUND_LABEL: &str = "Interview";

const WELL_KNOWN_EMPLOYERS: &[&str] = &[
    "google", "meta", "amazon", "apple", "microsoft", "netflix",
];

// First match wins, so more specific keywords come first.
const INDUSTRY_KEYWORDS: &[(&str, &str)] = &[
    ("amazon", "E-commerce"),
    ("shopify", "E-commerce"),
    ("ebay", "E-commerce"),
    ("meta", "Social Media"),
    ("facebook", "Social Media"),
    ("instagram", "Social Media"),
    ("snap", "Social Media"),
    ("tiktok", "Social Media"),
    ("social", "Social Media"),
    ("ramp", "FinTech"),
    ("stripe", "FinTech"),
    ("paypal", "FinTech"),
    ("robinhood", "FinTech"),
    ("bank", "Finance"),
    ("capital", "Finance"),
    ("finance", "Finance"),
    ("goldman", "Finance"),
    ("morgan", "Finance"),
    ("health", "Healthcare"),
    ("medical", "Healthcare"),
    ("pharma", "Healthcare"),
    ("design", "Design"),
    ("studio", "Design"),
    ("consult", "Consulting"),
    ("deloitte", "Consulting"),
    ("mckinsey", "Consulting"),
];

/// Editorial flags shown on cards. Kept behind a trait so the heuristics can
/// be swapped without touching the aggregation rules.
pub trait HighlightPolicy: Send + Sync {
    fn is_new(&self, record: &InterviewRecord, now: i64) -> bool;
    fn is_recommended(&self, record: &InterviewRecord) -> bool;
}

/// 30-day "new" window and the well-known-employer / detailed-prep heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditorialHighlights;

impl HighlightPolicy for EditorialHighlights {
    fn is_new(&self, record: &InterviewRecord, now: i64) -> bool {
        is_new(record, now)
    }

    fn is_recommended(&self, record: &InterviewRecord) -> bool {
        is_recommended(record)
    }
}

/// Contribution tabs: approved ("published"), pending ("drafts"), or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContributionTab {
    Published,
    Drafts,
    #[default]
    All,
}

impl ContributionTab {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "published" | "approved" => Some(ContributionTab::Published),
            "drafts" | "draft" | "pending" => Some(ContributionTab::Drafts),
            "all" | "" => Some(ContributionTab::All),
            _ => None,
        }
    }

    fn admits(&self, status: ModerationStatus) -> bool {
        match self {
            ContributionTab::Published => status == ModerationStatus::Approved,
            ContributionTab::Drafts => status == ModerationStatus::Pending,
            ContributionTab::All => true,
        }
    }
}

/// Moderation gate: only pending and approved records survive.
pub fn visible(records: &[InterviewRecord]) -> Vec<&InterviewRecord> {
    records.iter().filter(|r| r.is_visible()).collect()
}

pub fn infer_industry(company: &str) -> &'static str {
    let lowered = company.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, industry)| *industry)
        .unwrap_or(DEFAULT_INDUSTRY)
}

/// Groups visible records by company key, most interviews first. Ties keep
/// first-encountered order. The summary name is the first spelling seen.
pub fn group_by_company(records: &[InterviewRecord], key: CompanyKey) -> Vec<CompanySummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CompanySummary> = Vec::new();

    for record in visible(records) {
        let k = key.key(&record.company);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(CompanySummary {
                name: record.company.clone(),
                slug: slugify(&record.company),
                roles: Vec::new(),
                industry: infer_industry(&record.company).to_string(),
                interview_count: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.interview_count += 1;
        if !group.roles.iter().any(|r| r == &record.role) {
            group.roles.push(record.role.clone());
        }
    }

    // sort_by is stable: equal counts keep insertion order
    groups.sort_by(|a, b| b.interview_count.cmp(&a.interview_count));
    groups
}

pub fn featured_companies(
    records: &[InterviewRecord],
    key: CompanyKey,
    limit: usize,
) -> Vec<CompanySummary> {
    let mut groups = group_by_company(records, key);
    groups.truncate(limit);
    groups
}

/// Visible records, newest first. Records without a timestamp are treated
/// as equally most-recent and keep their input order among themselves.
pub fn recent(records: &[InterviewRecord], limit: Option<usize>) -> Vec<&InterviewRecord> {
    let mut list = visible(records);
    list.sort_by(|a, b| recency_key(b).cmp(&recency_key(a)));
    if let Some(limit) = limit {
        list.truncate(limit);
    }
    list
}

fn recency_key(record: &InterviewRecord) -> i64 {
    // Known edge case: an absent timestamp sorts as the most recent possible.
    record.created_at.unwrap_or(i64::MAX)
}

pub fn is_new(record: &InterviewRecord, now: i64) -> bool {
    match record.created_at {
        Some(ts) => now.saturating_sub(ts) < NEW_WINDOW_SECS,
        None => false,
    }
}

pub fn is_recommended(record: &InterviewRecord) -> bool {
    let company = record.company.to_lowercase();
    let well_known = WELL_KNOWN_EMPLOYERS.iter().any(|name| company.contains(name));
    let detailed_prep = record
        .preparation
        .as_deref()
        .map(|p| p.chars().count() > DETAILED_PREPARATION_CHARS)
        .unwrap_or(false);
    well_known || detailed_prep
}

/// The current user's visible submissions, newest first. No user, no records.
pub fn contributions<'a>(
    records: &'a [InterviewRecord],
    user: Option<&CurrentUser>,
    tab: ContributionTab,
) -> Vec<&'a InterviewRecord> {
    let Some(user) = user else {
        return Vec::new();
    };
    recent(records, None)
        .into_iter()
        .filter(|r| r.created_by.as_deref() == Some(user.user_id.as_str()))
        .filter(|r| tab.admits(r.status))
        .collect()
}

/// Splits the newline-delimited questions across `rounds` partitions,
/// `ceil(lines / rounds)` per partition. Non-positive rounds or no questions
/// yield no partitions. The label is the matching interview type, else the
/// first type, else "Interview".
pub fn partition_rounds(record: &InterviewRecord) -> Vec<RoundPartition> {
    let lines = display::lines(&record.questions);
    if record.rounds <= 0 || lines.is_empty() {
        return Vec::new();
    }

    let per_round = lines.len().div_ceil(record.rounds as usize);
    let types = record.interview_types();

    lines
        .chunks(per_round)
        .enumerate()
        .map(|(i, chunk)| RoundPartition {
            round: i + 1,
            label: types
                .get(i)
                .or_else(|| types.first())
                .cloned()
                .unwrap_or_else(|| DEFAULT_ROUND_LABEL.to_string()),
            questions: chunk.to_vec(),
        })
        .collect()
}

pub fn card(record: &InterviewRecord, policy: &dyn HighlightPolicy, now: i64) -> InterviewCard {
    InterviewCard {
        id: record.id_hex(),
        company: record.company.clone(),
        role: record.role.clone(),
        title: format!("{}-Round Interview Process", record.rounds.max(0)),
        description: display::clip(&record.process, DESCRIPTION_CHARS),
        tags: record.interview_types(),
        shared_by: display::shared_by(record.created_by_email.as_deref()),
        date: display::month_year(record.created_at),
        is_new: policy.is_new(record, now),
        is_recommended: policy.is_recommended(record),
    }
}

pub fn recent_cards(
    records: &[InterviewRecord],
    policy: &dyn HighlightPolicy,
    now: i64,
    limit: usize,
) -> Vec<InterviewCard> {
    recent(records, Some(limit))
        .into_iter()
        .map(|r| card(r, policy, now))
        .collect()
}

/// Newest records that are flagged recommended or new.
pub fn recommended_cards(
    records: &[InterviewRecord],
    policy: &dyn HighlightPolicy,
    now: i64,
    limit: usize,
) -> Vec<InterviewCard> {
    recent(records, None)
        .into_iter()
        .map(|r| card(r, policy, now))
        .filter(|c| c.is_recommended || c.is_new)
        .take(limit)
        .collect()
}

pub fn detail(record: &InterviewRecord) -> InterviewDetail {
    InterviewDetail {
        id: record.id_hex(),
        company: record.company.clone(),
        role: record.role.clone(),
        interview_types: record.interview_types(),
        rounds: partition_rounds(record),
        process: record.process.clone(),
        preparation: record
            .preparation
            .as_deref()
            .map(display::lines)
            .unwrap_or_default(),
        timeline: record.timeline.clone(),
        difficulty: record.difficulty,
        outcome: record.outcome.clone(),
        shared_by: display::shared_by(record.created_by_email.as_deref()),
        date: display::month_year(record.created_at),
        status: record.status,
    }
}

pub fn stats(
    records: &[InterviewRecord],
    key: CompanyKey,
    user: Option<&CurrentUser>,
) -> DashboardStats {
    DashboardStats {
        interviews_explored: visible(records).len(),
        companies_researched: group_by_company(records, key).len(),
        your_contributions: contributions(records, user, ContributionTab::All).len(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::Difficulty;

    pub(crate) fn record(company: &str, role: &str, created_at: Option<i64>) -> InterviewRecord {
        InterviewRecord {
            id: None,
            company: company.to_string(),
            role: role.to_string(),
            interview_type: "Technical, Behavioral".to_string(),
            rounds: 2,
            process: "Phone screen then onsite".to_string(),
            questions: "Q1\nQ2".to_string(),
            preparation: None,
            timeline: None,
            difficulty: Some(Difficulty::Medium),
            outcome: None,
            created_at,
            created_by: None,
            created_by_email: None,
            status: ModerationStatus::Approved,
        }
    }

    fn with_status(mut r: InterviewRecord, status: ModerationStatus) -> InterviewRecord {
        r.status = status;
        r
    }

    fn owned(mut r: InterviewRecord, uid: &str) -> InterviewRecord {
        r.created_by = Some(uid.to_string());
        r
    }

    fn user(uid: &str) -> CurrentUser {
        CurrentUser { user_id: uid.to_string(), email: None }
    }

    #[test]
    fn test_group_counts_sum_to_visible_records() {
        let records = vec![
            record("Google", "SWE", Some(1)),
            record("Meta", "PM", Some(2)),
            with_status(record("Google", "SWE", Some(3)), ModerationStatus::Rejected),
            record("Google", "Data", Some(4)),
            with_status(record("Ramp", "UX", Some(5)), ModerationStatus::Pending),
            with_status(record("Evil", "UX", Some(6)), ModerationStatus::Unknown),
        ];
        let groups = group_by_company(&records, CompanyKey::Exact);
        let total: usize = groups.iter().map(|g| g.interview_count).sum();
        assert_eq!(total, visible(&records).len());
        assert_eq!(total, 4);
        assert!(groups.iter().all(|g| g.name != "Evil"));
    }

    #[test]
    fn test_group_is_case_sensitive_by_default() {
        let records = vec![
            record("Google", "SWE", None),
            record("Google", "PM", None),
            record("google", "SWE", None),
        ];
        let groups = group_by_company(&records, CompanyKey::Exact);
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].name.as_str(), groups[0].interview_count), ("Google", 2));
        assert_eq!((groups[1].name.as_str(), groups[1].interview_count), ("google", 1));
        assert_eq!(groups[0].roles, vec!["SWE", "PM"]);

        let folded = group_by_company(&records, CompanyKey::Folded);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].interview_count, 3);
    }

    #[test]
    fn test_group_ties_keep_first_seen_order() {
        let records = vec![
            record("Ramp", "UX", None),
            record("Apple", "iOS", None),
            record("Meta", "PM", None),
            record("Meta", "PM", None),
        ];
        let names: Vec<_> = group_by_company(&records, CompanyKey::Exact)
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Meta", "Ramp", "Apple"]);
    }

    #[test]
    fn test_featured_truncates() {
        let records: Vec<_> = (0..10).map(|i| record(&format!("Co{}", i), "SWE", None)).collect();
        assert_eq!(featured_companies(&records, CompanyKey::Exact, FEATURED_LIMIT).len(), 6);
    }

    #[test]
    fn test_infer_industry() {
        assert_eq!(infer_industry("Amazon"), "E-commerce");
        assert_eq!(infer_industry("Meta"), "Social Media");
        assert_eq!(infer_industry("Ramp"), "FinTech");
        assert_eq!(infer_industry("Health Tech"), "Healthcare");
        assert_eq!(infer_industry("Google"), "Technology");
    }

    #[test]
    fn test_recent_orders_newest_first() {
        let records = vec![
            record("A", "SWE", Some(100)),
            record("B", "SWE", Some(300)),
            with_status(record("C", "SWE", Some(999)), ModerationStatus::Rejected),
            record("D", "SWE", Some(200)),
        ];
        let names: Vec<_> = recent(&records, None).iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A"]);
        assert_eq!(recent(&records, Some(DASHBOARD_RECENT_LIMIT)).len(), 3);
        assert_eq!(recent(&records, Some(1))[0].company, "B");
    }

    #[test]
    fn test_recent_missing_timestamps_sort_first() {
        let records = vec![
            record("A", "SWE", Some(100)),
            record("B", "SWE", None),
            record("C", "SWE", None),
        ];
        let names: Vec<_> = recent(&records, None).iter().map(|r| r.company.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_is_new_window() {
        let now = 1_000_000_000;
        assert!(is_new(&record("A", "SWE", Some(now - 60)), now));
        assert!(!is_new(&record("A", "SWE", Some(now - 31 * 24 * 3600)), now));
        assert!(!is_new(&record("A", "SWE", None), now));
        // corrupt timestamps at either extreme must not overflow
        assert!(!is_new(&record("A", "SWE", Some(i64::MIN)), now));
        assert!(is_new(&record("A", "SWE", Some(i64::MAX)), now));
    }

    #[test]
    fn test_is_recommended() {
        assert!(is_recommended(&record("Google LLC", "SWE", None)));
        assert!(is_recommended(&record("MICROSOFT", "SWE", None)));
        assert!(!is_recommended(&record("Tiny Startup", "SWE", None)));

        let mut r = record("Tiny Startup", "SWE", None);
        r.preparation = Some("x".repeat(51));
        assert!(is_recommended(&r));
        r.preparation = Some("x".repeat(50));
        assert!(!is_recommended(&r));
    }

    #[test]
    fn test_contributions_need_a_user() {
        let records = vec![
            owned(record("A", "SWE", Some(1)), "u1"),
            owned(record("B", "SWE", Some(2)), "u2"),
            owned(with_status(record("C", "SWE", Some(3)), ModerationStatus::Pending), "u1"),
            owned(with_status(record("D", "SWE", Some(4)), ModerationStatus::Rejected), "u1"),
        ];
        assert!(contributions(&records, None, ContributionTab::All).is_empty());

        let u1 = user("u1");
        let all: Vec<_> = contributions(&records, Some(&u1), ContributionTab::All)
            .iter()
            .map(|r| r.company.as_str())
            .collect();
        assert_eq!(all, vec!["C", "A"]);

        let drafts = contributions(&records, Some(&u1), ContributionTab::Drafts);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].company, "C");

        let published = contributions(&records, Some(&u1), ContributionTab::Published);
        assert_eq!(published[0].company, "A");
    }

    #[test]
    fn test_partition_one_question_per_round() {
        let mut r = record("A", "SWE", None);
        r.questions = "Q1\nQ2\nQ3".to_string();
        r.rounds = 3;
        r.interview_type = "Technical, System Design".to_string();
        let parts = partition_rounds(&r);
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.questions.len() == 1));
        assert_eq!(parts[0].label, "Technical");
        assert_eq!(parts[1].label, "System Design");
        assert_eq!(parts[2].label, "Technical");
    }

    #[test]
    fn test_partition_uses_ceiling_division() {
        let mut r = record("A", "SWE", None);
        r.questions = "Q1\n\nQ2\nQ3\nQ4\nQ5".to_string();
        r.rounds = 2;
        let parts = partition_rounds(&r);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].questions, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(parts[1].questions, vec!["Q4", "Q5"]);
    }

    #[test]
    fn test_partition_degenerate_inputs() {
        let mut r = record("A", "SWE", None);
        r.rounds = 0;
        assert!(partition_rounds(&r).is_empty());
        r.rounds = -2;
        assert!(partition_rounds(&r).is_empty());

        r.rounds = 3;
        r.questions = "  \n".to_string();
        assert!(partition_rounds(&r).is_empty());

        r.questions = "Q1".to_string();
        r.interview_type = String::new();
        assert_eq!(partition_rounds(&r)[0].label, "Interview");
    }

    #[test]
    fn test_cards_and_recommended() {
        let now = 1_000_000_000;
        let mut old_startup = record("Tiny Startup", "SWE", Some(now - 90 * 24 * 3600));
        old_startup.created_by_email = Some("sam@uw.edu".into());
        let records = vec![
            old_startup,
            record("Google", "SWE", Some(now - 90 * 24 * 3600)),
            record("Other Startup", "SWE", Some(now - 3600)),
        ];
        let policy = EditorialHighlights;

        let recs = recommended_cards(&records, &policy, now, RECOMMENDED_LIMIT);
        let names: Vec<_> = recs.iter().map(|c| c.company.as_str()).collect();
        assert_eq!(names, vec!["Other Startup", "Google"]);
        assert!(recs[0].is_new && !recs[0].is_recommended);

        let cards = recent_cards(&records, &policy, now, HOME_RECENT_LIMIT);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].title, "2-Round Interview Process");
        assert_eq!(cards[1].shared_by, "sam");
        assert_eq!(cards[2].shared_by, display::ANONYMOUS_USER);
    }

    #[test]
    fn test_stats() {
        let records = vec![
            owned(record("Google", "SWE", None), "u1"),
            record("Meta", "PM", None),
            with_status(record("Hidden", "PM", None), ModerationStatus::Rejected),
        ];
        let s = stats(&records, CompanyKey::Exact, Some(&user("u1")));
        assert_eq!(
            s,
            DashboardStats { interviews_explored: 2, companies_researched: 2, your_contributions: 1 }
        );
        assert_eq!(stats(&records, CompanyKey::Exact, None).your_contributions, 0);
    }

    #[test]
    fn test_contribution_tab_parse() {
        assert_eq!(ContributionTab::parse("published"), Some(ContributionTab::Published));
        assert_eq!(ContributionTab::parse("Drafts"), Some(ContributionTab::Drafts));
        assert_eq!(ContributionTab::parse(""), Some(ContributionTab::All));
        assert_eq!(ContributionTab::parse("archived"), None);
    }
}
