//! Built-in sample experiences, shown as placeholder content when a company
//! page matches no stored record.

use crate::models::{Difficulty, InterviewRecord, ModerationStatus};

fn sample(
    company: &str,
    role: &str,
    interview_type: &str,
    rounds: i32,
    process: &str,
    questions: &[&str],
    preparation: &[&str],
    timeline: &str,
    difficulty: Difficulty,
) -> InterviewRecord {
    InterviewRecord {
        id: None,
        company: company.into(),
        role: role.into(),
        interview_type: interview_type.into(),
        rounds,
        process: process.into(),
        questions: questions.join("\n"),
        preparation: Some(preparation.join("\n")),
        timeline: Some(timeline.into()),
        difficulty: Some(difficulty),
        outcome: None,
        created_at: None,
        created_by: None,
        created_by_email: None,
        status: ModerationStatus::Approved,
    }
}

pub fn sample_interviews() -> Vec<InterviewRecord> {
    vec![
        sample(
            "Tech Giant Corp",
            "Software Engineer Intern",
            "Technical, System Design, Behavioral",
            3,
            "Online assessment followed by two technical rounds and a behavioral interview with the hiring manager.",
            &[
                "Implement a binary search tree",
                "Write a function to find the longest palindromic substring",
                "Explain time complexity of your solution",
                "Design a URL shortener",
                "How would you scale this solution?",
                "Discuss potential bottlenecks",
                "Tell me about a time you worked in a team",
                "How do you handle conflicts?",
                "What's your biggest achievement?",
            ],
            &[
                "Review data structures and algorithms",
                "Practice system design fundamentals",
                "Prepare STAR format answers",
            ],
            "2 weeks from application to offer",
            Difficulty::Medium,
        ),
        sample(
            "Startup Innovation",
            "Product Management Intern",
            "Case Study, Behavioral",
            2,
            "A product case with the head of product, then a culture conversation with a founder.",
            &[
                "How would you improve our main product?",
                "Tell me about a project you led",
            ],
            &["Use the product for a week before the interview"],
            "1 week",
            Difficulty::Easy,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregator;

    #[test]
    fn test_samples_are_visible_and_partition_cleanly() {
        let samples = sample_interviews();
        assert!(samples.iter().all(|s| s.is_visible()));

        let rounds = aggregator::partition_rounds(&samples[0]);
        assert_eq!(rounds.len(), 3);
        assert!(rounds.iter().all(|r| r.questions.len() == 3));
        assert_eq!(rounds[1].label, "System Design");
    }
}
