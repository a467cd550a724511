use crate::models::Category;
use crate::stats::CategoryStats;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

const LEVEL_MILESTONES: [u32; 4] = [1, 10, 25, 50];
const HALFWAY_PERCENT: f64 = 50.0;
const MASTER_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneKind {
    Level,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Milestone {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: &'static str,
    pub unlocked_at: u32,
    #[serde(rename = "type")]
    pub kind: MilestoneKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Achievements implied by the current snapshot. Nothing is remembered between
/// calls, so a milestone disappears again if its stat regresses.
pub fn check_milestones(
    current_level: u32,
    stats: &BTreeMap<Category, CategoryStats>,
) -> Vec<Milestone> {
    let mut milestones = Vec::new();

    for level in LEVEL_MILESTONES {
        if current_level >= level {
            milestones.push(Milestone {
                id: format!("level-{level}"),
                name: format!("Level {level}"),
                description: format!("Reached Level {level}"),
                icon: "⭐",
                unlocked_at: level,
                kind: MilestoneKind::Level,
                category: None,
            });
        }
    }

    for (category, data) in stats {
        if data.percentage >= HALFWAY_PERCENT {
            milestones.push(Milestone {
                id: format!("half-{category}"),
                name: format!("{category} Halfway"),
                description: format!("50% progress in {category}"),
                icon: "🔥",
                unlocked_at: current_level,
                kind: MilestoneKind::Category,
                category: Some(*category),
            });
        }

        if data.percentage >= MASTER_PERCENT {
            milestones.push(Milestone {
                id: format!("perfect-{category}"),
                name: format!("{category} Master"),
                description: format!("100% progress in {category}"),
                icon: "🏆",
                unlocked_at: current_level,
                kind: MilestoneKind::Category,
                category: Some(*category),
            });
        }
    }

    milestones
}

/// Keeps the first milestone seen for each id, preserving order.
pub fn dedup_milestones(milestones: impl IntoIterator<Item = Milestone>) -> Vec<Milestone> {
    let mut seen = HashSet::new();
    milestones
        .into_iter()
        .filter(|milestone| seen.insert(milestone.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(category: Category, percentage: f64) -> BTreeMap<Category, CategoryStats> {
        let mut stats: BTreeMap<Category, CategoryStats> = Category::ALL
            .into_iter()
            .map(|category| (category, CategoryStats::default()))
            .collect();
        stats.insert(
            category,
            CategoryStats {
                total: 1,
                achieved: 0,
                percentage,
                xp: percentage / 100.0,
            },
        );
        stats
    }

    fn ids(milestones: &[Milestone]) -> Vec<&str> {
        milestones.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn level_milestones_are_cumulative() {
        let empty = stats_with(Category::Health, 0.0);
        assert_eq!(ids(&check_milestones(1, &empty)), ["level-1"]);
        assert_eq!(ids(&check_milestones(24, &empty)), ["level-1", "level-10"]);
        assert_eq!(
            ids(&check_milestones(50, &empty)),
            ["level-1", "level-10", "level-25", "level-50"]
        );
    }

    #[test]
    fn halfway_fires_at_fifty_percent() {
        let below = stats_with(Category::Fitness, 49.86);
        assert!(!ids(&check_milestones(1, &below)).contains(&"half-Fitness"));

        let at = stats_with(Category::Fitness, 50.0);
        let milestones = check_milestones(1, &at);
        let half = milestones.iter().find(|m| m.id == "half-Fitness").unwrap();
        assert_eq!(half.name, "Fitness Halfway");
        assert_eq!(half.kind, MilestoneKind::Category);
        assert_eq!(half.category, Some(Category::Fitness));
    }

    #[test]
    fn perfect_category_emits_both_category_milestones() {
        let stats = stats_with(Category::Social, 100.0);
        assert_eq!(
            ids(&check_milestones(3, &stats)),
            ["level-1", "half-Social", "perfect-Social"]
        );
    }

    #[test]
    fn regression_removes_milestone() {
        let up = stats_with(Category::Creativity, 60.0);
        assert!(ids(&check_milestones(1, &up)).contains(&"half-Creativity"));
        let down = stats_with(Category::Creativity, 40.0);
        assert!(!ids(&check_milestones(1, &down)).contains(&"half-Creativity"));
    }

    #[test]
    fn dedup_keeps_first_seen() {
        let stats = stats_with(Category::Health, 75.0);
        let mut first = check_milestones(10, &stats);
        let mut second = check_milestones(12, &stats);
        first.append(&mut second);

        let unique = dedup_milestones(first);
        assert_eq!(ids(&unique), ["level-1", "level-10", "half-Health"]);
        let half = unique.iter().find(|m| m.id == "half-Health").unwrap();
        assert_eq!(half.unlocked_at, 10);
    }
}
