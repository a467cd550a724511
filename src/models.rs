use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Intelligence,
    Fitness,
    Creativity,
    Health,
    Social,
    Productivity,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Intelligence,
        Category::Fitness,
        Category::Creativity,
        Category::Health,
        Category::Social,
        Category::Productivity,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Intelligence => "Intelligence",
            Category::Fitness => "Fitness",
            Category::Creativity => "Creativity",
            Category::Health => "Health",
            Category::Social => "Social",
            Category::Productivity => "Productivity",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::Intelligence => "#6366f1",
            Category::Fitness => "#f97316",
            Category::Creativity => "#ec4899",
            Category::Health => "#22c55e",
            Category::Social => "#06b6d4",
            Category::Productivity => "#f59e0b",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedItem {
    pub id: ItemId,
    pub name: String,
}

/// A stored category assignment. Values written by older clients may not name
/// one of the known categories; those are kept as-is so they round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryTag {
    Known(Category),
    Unknown(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAssignment(pub BTreeMap<ItemId, CategoryTag>);

impl CategoryAssignment {
    pub fn assign(&mut self, id: ItemId, category: Category) {
        self.0.insert(id, CategoryTag::Known(category));
    }

    pub fn remove(&mut self, id: ItemId) {
        self.0.remove(&id);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Missing (or empty) assignments fall back to `Intelligence`; an
    /// unrecognised category yields `None`.
    pub fn resolve(&self, id: ItemId) -> Option<Category> {
        match self.0.get(&id) {
            None => Some(Category::default()),
            Some(CategoryTag::Known(category)) => Some(*category),
            Some(CategoryTag::Unknown(raw)) if raw.is_empty() => Some(Category::default()),
            Some(CategoryTag::Unknown(_)) => None,
        }
    }
}

/// Key of a completion entry. Persisted as `"<itemId>-<YYYY-MM-DD>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompletionKey {
    pub item: ItemId,
    pub date: NaiveDate,
}

impl CompletionKey {
    pub fn new(item: ItemId, date: NaiveDate) -> Self {
        Self { item, date }
    }
}

impl fmt::Display for CompletionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.item, self.date.format("%Y-%m-%d"))
    }
}

impl FromStr for CompletionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, date) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid completion key: {s}"))?;
        let item = id
            .parse::<u64>()
            .map_err(|_| format!("invalid item id in completion key: {s}"))?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| format!("invalid date in completion key: {s}"))?;
        Ok(Self::new(ItemId(item), date))
    }
}

impl Serialize for CompletionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CompletionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Sparse per-day completion flags; an absent key means "not completed".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionLog(pub BTreeMap<CompletionKey, bool>);

impl CompletionLog {
    pub fn is_completed(&self, item: ItemId, date: NaiveDate) -> bool {
        self.0
            .get(&CompletionKey::new(item, date))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, item: ItemId, date: NaiveDate, completed: bool) {
        self.0.insert(CompletionKey::new(item, date), completed);
    }

    pub fn remove_item(&mut self, item: ItemId) {
        self.0.retain(|key, _| key.item != item);
    }

    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(default)]
    pub items: Vec<TrackedItem>,
    #[serde(default, rename = "progressData")]
    pub progress: CompletionLog,
    #[serde(default)]
    pub categories: CategoryAssignment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCell {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub details: String,
}

impl GoalCell {
    pub fn is_filled(&self) -> bool {
        !self.text.trim().is_empty() || !self.details.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalsBoard {
    #[serde(rename = "gridSize")]
    pub grid_size: usize,
    #[serde(default)]
    pub goals: Vec<GoalCell>,
    #[serde(default, rename = "checkedGoals")]
    pub checked: BTreeMap<usize, bool>,
}

impl Default for GoalsBoard {
    fn default() -> Self {
        Self {
            grid_size: 3,
            goals: vec![GoalCell::default(); 9],
            checked: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub score: u8,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    #[serde(default, rename = "progressTrackerData")]
    pub tracker: TrackerData,
    #[serde(default, rename = "goalsData")]
    pub goals: GoalsBoard,
    #[serde(default, rename = "booksData")]
    pub books: Vec<Book>,
}

// Requests

#[derive(Debug, Deserialize)]
pub struct NewItemRequest {
    pub name: String,
    #[serde(default)]
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub item_id: ItemId,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct TrackerQuery {
    pub month: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ResizeRequest {
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct GoalEditRequest {
    pub text: Option<String>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_score")]
    pub score: u8,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_score() -> u8 {
    5
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSort {
    #[default]
    Date,
    Score,
    Title,
}

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    #[serde(default)]
    pub sort: BookSort,
    #[serde(default)]
    pub min_score: u8,
}

// Responses

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub item_id: ItemId,
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct DateCell {
    pub date: NaiveDate,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct TrackerRow {
    pub id: ItemId,
    pub name: String,
    pub category: Option<Category>,
    pub checked: Vec<bool>,
}

#[derive(Debug, Serialize)]
pub struct TrackerView {
    pub year: i32,
    pub month: u32,
    pub dates: Vec<DateCell>,
    pub rows: Vec<TrackerRow>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub items: Vec<TrackedItem>,
    pub progress_data: CompletionLog,
    pub categories: CategoryAssignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    #[serde(flatten)]
    pub book: Book,
    pub reading_days: Option<i64>,
}
