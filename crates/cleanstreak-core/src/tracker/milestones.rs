//! Health-benefit milestones per category.

use serde::{Deserialize, Serialize};

use super::Category;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    /// Streak length at which the benefit applies.
    pub days: u32,
    /// Short label, e.g. "After 1 week".
    pub label: String,
    pub description: String,
    pub reached: bool,
}

const SMOKING: &[(u32, &str, &str)] = &[
    (1, "After 1 day", "Your blood pressure begins to drop"),
    (2, "After 2 days", "Your sense of taste and smell improves"),
    (3, "After 3 days", "Breathing becomes easier as bronchial tubes relax"),
];

const DRINKING: &[(u32, &str, &str)] = &[
    (1, "After 1 day", "Your body begins to detoxify"),
    (5, "After 5 days", "Improved hydration and sleep quality"),
    (7, "After 1 week", "Better mental clarity and focus"),
];

const SHARED: &[(u32, &str, &str)] = &[
    (14, "After 2 weeks", "Energy levels increase"),
    (30, "After 1 month", "Significant improvement in overall health"),
];

/// Milestones for `category`, in display order, flagged against `days_since`.
///
/// `Both` lists the smoking entries, then the drinking entries, then the shared ones.
pub fn milestones(category: Option<Category>, days_since: u32) -> Vec<Milestone> {
    let smoking = category.is_some_and(|c| c.includes_smoking());
    let drinking = category.is_some_and(|c| c.includes_drinking());

    [(smoking, SMOKING), (drinking, DRINKING), (true, SHARED)]
        .into_iter()
        .filter(|(include, _)| *include)
        .flat_map(|(_, table)| table.iter())
        .map(|&(days, label, description)| Milestone {
            days,
            label: label.to_string(),
            description: description.to_string(),
            reached: days_since >= days,
        })
        .collect()
}

/// The first milestone not yet reached, if any.
pub fn next_milestone(category: Option<Category>, days_since: u32) -> Option<Milestone> {
    milestones(category, days_since)
        .into_iter()
        .filter(|m| !m.reached)
        .min_by_key(|m| m.days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_combines_lists() {
        let list = milestones(Some(Category::Both), 0);
        assert_eq!(list.len(), 8);
        assert_eq!(list[0].description, "Your blood pressure begins to drop");
        assert_eq!(list[3].description, "Your body begins to detoxify");
        assert_eq!(list[7].days, 30);
    }

    #[test]
    fn unset_category_only_has_shared() {
        let list = milestones(None, 20);
        assert_eq!(list.len(), 2);
        assert!(list[0].reached);
        assert!(!list[1].reached);
    }

    #[test]
    fn reached_flags_follow_days() {
        let list = milestones(Some(Category::Drinking), 5);
        let reached: Vec<u32> = list.iter().filter(|m| m.reached).map(|m| m.days).collect();
        assert_eq!(reached, vec![1, 5]);
    }

    #[test]
    fn next_milestone_is_smallest_unreached() {
        let next = next_milestone(Some(Category::Both), 2).unwrap();
        assert_eq!(next.days, 3);
        assert!(next_milestone(Some(Category::Smoking), 30).is_none());
    }
}
