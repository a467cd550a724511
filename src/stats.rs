use crate::level::LevelState;
use crate::milestones::{check_milestones, dedup_milestones, Milestone};
use crate::models::{Category, CategoryAssignment, CompletionLog, ItemId, TrackedItem, TrackerData};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Every category is scored against one full year of daily check-ins.
pub const DAYS_PER_CYCLE: f64 = 365.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub total: u32,
    pub achieved: u64,
    pub percentage: f64,
    pub xp: f64,
}

pub fn compute_category_stats(
    items: &[TrackedItem],
    categories: &CategoryAssignment,
    log: &CompletionLog,
) -> BTreeMap<Category, CategoryStats> {
    let mut stats: BTreeMap<Category, CategoryStats> = Category::ALL
        .into_iter()
        .map(|category| (category, CategoryStats::default()))
        .collect();

    let mut completed: HashMap<ItemId, u64> = HashMap::new();
    for (key, done) in &log.0 {
        if *done {
            *completed.entry(key.item).or_default() += 1;
        }
    }

    for item in items {
        let Some(category) = categories.resolve(item.id) else {
            continue;
        };
        let Some(entry) = stats.get_mut(&category) else {
            continue;
        };
        entry.total += 1;
        entry.achieved += completed.get(&item.id).copied().unwrap_or(0);
    }

    for entry in stats.values_mut() {
        if entry.total == 0 {
            continue;
        }
        let fraction = entry.achieved as f64 / (f64::from(entry.total) * DAYS_PER_CYCLE);
        // Only the percentage is capped.
        entry.percentage = (fraction * 100.0).min(100.0);
        entry.xp = fraction * DAYS_PER_CYCLE;
    }

    stats
}

pub fn total_xp(stats: &BTreeMap<Category, CategoryStats>) -> f64 {
    stats.values().map(|entry| entry.xp).sum()
}

#[derive(Debug, Serialize)]
pub struct RadarPoint {
    pub category: Category,
    pub value: f64,
    pub full_value: f64,
    pub color: &'static str,
}

pub fn radar_points(stats: &BTreeMap<Category, CategoryStats>) -> Vec<RadarPoint> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let entry = stats.get(&category).copied().unwrap_or_default();
            RadarPoint {
                category,
                value: entry.percentage.round(),
                full_value: entry.xp,
                color: category.color(),
            }
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct Overview {
    pub total_goals: usize,
    pub categories_active: usize,
    pub days_tracked: usize,
    pub completion_rate: f64,
}

pub fn overview(tracker: &TrackerData) -> Overview {
    let days_tracked = tracker.progress.completed_count();
    let completion_rate = if tracker.items.is_empty() {
        0.0
    } else {
        (days_tracked as f64 / (tracker.items.len() as f64 * DAYS_PER_CYCLE) * 100.0).round()
    };

    Overview {
        total_goals: tracker.items.len(),
        categories_active: tracker.categories.len(),
        days_tracked,
        completion_rate,
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub categories: BTreeMap<Category, CategoryStats>,
    pub radar: Vec<RadarPoint>,
    pub level: LevelState,
    pub milestones: Vec<Milestone>,
    pub overview: Overview,
}

pub fn build_stats(tracker: &TrackerData) -> StatsResponse {
    let categories = compute_category_stats(&tracker.items, &tracker.categories, &tracker.progress);
    let xp = total_xp(&categories);
    let level = LevelState::from_total_xp(xp);
    let milestones = dedup_milestones(check_milestones(level.level, &categories));
    debug!(total_xp = xp, level = level.level, "computed stats");

    StatsResponse {
        radar: radar_points(&categories),
        overview: overview(tracker),
        categories,
        level,
        milestones,
    }
}
