use serde::Serialize;
use std::sync::LazyLock;

pub const MAX_LEVEL: u32 = 50;

const BASE_XP: f64 = 3000.0;
const GROWTH: f64 = 1.15;
const ASSUMED_XP_PER_DAY: f64 = 0.5;

/// Cumulative XP needed to reach each level; index 0 is the zero floor.
static LEVEL_THRESHOLDS: LazyLock<[f64; MAX_LEVEL as usize + 1]> = LazyLock::new(|| {
    let mut thresholds = [0.0; MAX_LEVEL as usize + 1];
    for level in 1..=MAX_LEVEL as usize {
        thresholds[level] = thresholds[level - 1] + level_requirement(level as u32);
    }
    thresholds
});

const LEVEL_TITLES: [(u32, &str); 11] = [
    (1, "Awakening"),
    (5, "Rising"),
    (10, "Ascending"),
    (15, "Determined"),
    (20, "Forged"),
    (25, "Resilient"),
    (30, "Masterful"),
    (35, "Legendary"),
    (40, "Exalted"),
    (45, "Transcendent"),
    (50, "Ascendant"),
];

fn level_requirement(level: u32) -> f64 {
    (BASE_XP * GROWTH.powf(f64::from(level - 1))).floor()
}

pub fn thresholds() -> &'static [f64; MAX_LEVEL as usize + 1] {
    &LEVEL_THRESHOLDS
}

pub fn threshold(level: u32) -> f64 {
    LEVEL_THRESHOLDS[level.min(MAX_LEVEL) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Novice,
    Adept,
    Master,
    Legend,
    Ascendant,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::Novice, Tier::Adept, Tier::Master, Tier::Legend, Tier::Ascendant];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Novice => "Novice",
            Tier::Adept => "Adept",
            Tier::Master => "Master",
            Tier::Legend => "Legend",
            Tier::Ascendant => "Ascendant",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Tier::Novice => "#8b5cf6",
            Tier::Adept => "#3b82f6",
            Tier::Master => "#10b981",
            Tier::Legend => "#f59e0b",
            Tier::Ascendant => "#ec4899",
        }
    }

    pub fn levels(self) -> (u32, u32) {
        let band = self as u32;
        (band * 10 + 1, band * 10 + 10)
    }
}

pub fn calculate_level(total_xp: f64) -> u32 {
    (1..=MAX_LEVEL)
        .rev()
        .find(|level| total_xp >= threshold(*level))
        .unwrap_or(1)
}

pub fn tier_for_level(level: u32) -> Tier {
    match level {
        ..=10 => Tier::Novice,
        11..=20 => Tier::Adept,
        21..=30 => Tier::Master,
        31..=40 => Tier::Legend,
        _ => Tier::Ascendant,
    }
}

pub fn title_for_level(level: u32) -> &'static str {
    LEVEL_TITLES
        .iter()
        .rev()
        .find(|(at, _)| *at <= level)
        .map(|(_, title)| *title)
        .unwrap_or("Awakening")
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub current_level: u32,
    pub next_level: u32,
    pub current_level_xp: f64,
    pub next_level_xp: f64,
    pub progress: f64,
    pub total_xp: f64,
    pub total_xp_needed: f64,
}

pub fn level_progress(total_xp: f64) -> LevelProgress {
    let current_level = calculate_level(total_xp);
    let next_level = (current_level + 1).min(MAX_LEVEL);

    let earned = total_xp - threshold(current_level);
    let width = threshold(next_level) - threshold(current_level);
    let progress = if width > 0.0 { earned / width } else { 1.0 };

    LevelProgress {
        current_level,
        next_level,
        current_level_xp: earned.max(0.0),
        next_level_xp: width,
        progress: progress.clamp(0.0, 1.0),
        total_xp,
        total_xp_needed: threshold(MAX_LEVEL),
    }
}

pub fn xp_until_next_level(total_xp: f64) -> f64 {
    let progress = level_progress(total_xp);
    if progress.next_level >= MAX_LEVEL && progress.current_level_xp >= progress.next_level_xp {
        return 0.0;
    }
    (progress.next_level_xp - progress.current_level_xp).max(0.0)
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelState {
    pub level: u32,
    pub tier: Tier,
    pub tier_name: &'static str,
    pub tier_color: &'static str,
    pub title: &'static str,
    #[serde(flatten)]
    pub progress: LevelProgress,
    pub xp_until_next: f64,
    pub is_max_level: bool,
}

impl LevelState {
    pub fn from_total_xp(total_xp: f64) -> Self {
        let level = calculate_level(total_xp);
        let tier = tier_for_level(level);
        Self {
            level,
            tier,
            tier_name: tier.name(),
            tier_color: tier.color(),
            title: title_for_level(level),
            progress: level_progress(total_xp),
            xp_until_next: xp_until_next_level(total_xp),
            is_max_level: level == MAX_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelInfo {
    pub level: u32,
    pub tier: &'static str,
    pub title: &'static str,
    pub color: &'static str,
    pub xp_required: f64,
    pub xp_for_this_level: f64,
    pub estimated_days: u64,
}

pub fn all_level_info() -> Vec<LevelInfo> {
    (1..=MAX_LEVEL)
        .map(|level| {
            let tier = tier_for_level(level);
            let xp_required = threshold(level);
            LevelInfo {
                level,
                tier: tier.name(),
                title: title_for_level(level),
                color: tier.color(),
                xp_required,
                xp_for_this_level: xp_required - threshold(level - 1),
                estimated_days: estimate_days_to_level(level),
            }
        })
        .collect()
}

/// Rough estimate assuming a couple of goals kept up every day.
pub fn estimate_days_to_level(level: u32) -> u64 {
    (threshold(level) / ASSUMED_XP_PER_DAY).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_start_at_zero_and_increase() {
        let table = thresholds();
        assert_eq!(table[0], 0.0);
        assert_eq!(table[1], 3000.0);
        // 3000 * 1.15 lands just under 3450 in binary floating point.
        assert_eq!(table[2], 6449.0);
        assert_eq!(table[3], 10416.0);
        assert_eq!(table[50], 21_653_125.0);
        for level in 1..=MAX_LEVEL as usize {
            assert!(table[level] > table[level - 1], "level {level}");
            assert_eq!(table[level], table[level].floor());
        }
    }

    #[test]
    fn level_one_covers_everything_below_level_two() {
        assert_eq!(calculate_level(0.0), 1);
        assert_eq!(calculate_level(2999.99), 1);
        assert_eq!(calculate_level(3000.0), 1);
        assert_eq!(calculate_level(threshold(2) - 0.01), 1);
        assert_eq!(calculate_level(threshold(2)), 2);
    }

    #[test]
    fn level_matches_threshold_bands() {
        for level in 1..MAX_LEVEL {
            assert_eq!(calculate_level(threshold(level)), level);
            assert_eq!(calculate_level(threshold(level + 1) - 0.5), level);
        }
        assert_eq!(calculate_level(threshold(MAX_LEVEL)), MAX_LEVEL);
        assert_eq!(calculate_level(threshold(MAX_LEVEL) * 10.0), MAX_LEVEL);
    }

    #[test]
    fn tiers_partition_levels_in_bands_of_ten() {
        for tier in Tier::ALL {
            let (start, end) = tier.levels();
            assert_eq!(end - start + 1, 10);
            for level in start..=end {
                assert_eq!(tier_for_level(level), tier);
            }
        }
        assert_eq!(tier_for_level(10), Tier::Novice);
        assert_eq!(tier_for_level(11), Tier::Adept);
        assert_eq!(tier_for_level(41), Tier::Ascendant);
    }

    #[test]
    fn titles_use_the_highest_key_at_or_below_level() {
        assert_eq!(title_for_level(1), "Awakening");
        assert_eq!(title_for_level(4), "Awakening");
        assert_eq!(title_for_level(5), "Rising");
        assert_eq!(title_for_level(24), "Forged");
        assert_eq!(title_for_level(49), "Transcendent");
        assert_eq!(title_for_level(50), "Ascendant");
        assert_eq!(title_for_level(0), "Awakening");
    }

    #[test]
    fn progress_stays_within_unit_interval() {
        for xp in [0.0, 1.0, 2999.0, 3000.0, 5000.0, threshold(10) + 12.5, threshold(50) + 1.0] {
            let progress = level_progress(xp);
            assert!((0.0..=1.0).contains(&progress.progress), "xp {xp}");
            assert!(progress.current_level_xp >= 0.0);
        }
    }

    #[test]
    fn progress_within_band() {
        let xp = threshold(3) + 100.0;
        let progress = level_progress(xp);
        assert_eq!(progress.current_level, 3);
        assert_eq!(progress.next_level, 4);
        assert_eq!(progress.current_level_xp, 100.0);
        assert_eq!(progress.next_level_xp, threshold(4) - threshold(3));
        assert_eq!(xp_until_next_level(xp), progress.next_level_xp - 100.0);
    }

    #[test]
    fn empty_tracker_is_novice_awakening() {
        let state = LevelState::from_total_xp(0.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.tier, Tier::Novice);
        assert_eq!(state.title, "Awakening");
        assert_eq!(state.progress.progress, 0.0);
        assert!(!state.is_max_level);
    }

    #[test]
    fn max_level_saturates() {
        let state = LevelState::from_total_xp(threshold(MAX_LEVEL));
        assert_eq!(state.level, 50);
        assert_eq!(state.progress.next_level, 50);
        assert_eq!(state.progress.next_level_xp, 0.0);
        assert_eq!(state.progress.progress, 1.0);
        assert_eq!(state.xp_until_next, 0.0);
        assert_eq!(state.tier, Tier::Ascendant);
        assert_eq!(state.title, "Ascendant");
        assert!(state.is_max_level);
    }

    #[test]
    fn level_table_has_every_level() {
        let table = all_level_info();
        assert_eq!(table.len(), 50);
        assert_eq!(table[0].xp_for_this_level, 3000.0);
        assert_eq!(table[0].estimated_days, 6000);
        assert_eq!(table[49].tier, "Ascendant");
        assert_eq!(table[49].xp_required, threshold(50));
    }
}
