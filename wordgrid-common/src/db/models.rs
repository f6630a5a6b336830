//! Database models
//!
//! The reference catalogs are closed sets, so they are Rust enums (or a
//! bounded newtype) with id/label lookups. The matching tables are seeded from
//! these definitions so that joins and foreign keys work in SQL.

use crate::time::EpochMillis;
use crate::Error;
use serde::{Deserialize, Serialize};

pub type PuzzleId = i64;
pub type UserId = i64;
pub type WordId = i64;
pub type RotationId = i64;

const FILLED_STAR: char = '\u{2605}';
const EMPTY_STAR: char = '\u{2606}';

/// Puzzle difficulty, 0 to 5 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MAX_STARS: u8 = 5;

    pub fn new(stars: u8) -> Option<Self> {
        (stars <= Self::MAX_STARS).then_some(Self(stars))
    }

    /// Every difficulty tier, easiest first
    pub fn all() -> impl Iterator<Item = Difficulty> {
        (0..=Self::MAX_STARS).map(Difficulty)
    }

    pub fn id(self) -> i64 {
        i64::from(self.0)
    }

    pub fn stars(self) -> u8 {
        self.0
    }

    /// Star glyphs, filled stars first: `★★☆☆☆` for two stars
    pub fn label(self) -> String {
        (0..Self::MAX_STARS)
            .map(|i| if i < self.0 { FILLED_STAR } else { EMPTY_STAR })
            .collect()
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u8::try_from(id)
            .ok()
            .and_then(Difficulty::new)
            .ok_or_else(|| Error::Validation(format!("Unknown difficulty: {}", id)))
    }
}

impl From<Difficulty> for i64 {
    fn from(d: Difficulty) -> i64 {
        d.id()
    }
}

/// Puzzle category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    Test = 0,
    Express = 1,
    Daily = 2,
    Weekly = 3,
    Special = 4,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Test,
        Category::Express,
        Category::Daily,
        Category::Weekly,
        Category::Special,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Test => "Test",
            Category::Express => "Express",
            Category::Daily => "Daily",
            Category::Weekly => "Weekly",
            Category::Special => "Special",
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Category::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| Error::Validation(format!("Unknown category: {}", id)))
    }
}

impl From<Category> for i64 {
    fn from(c: Category) -> i64 {
        c.id()
    }
}

/// How a word in a puzzle is scored or displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Classification {
    Normal = 1,
    Bonus = 2,
    Excluded = 3,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Normal,
        Classification::Bonus,
        Classification::Excluded,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Classification::Normal => "Normal",
            Classification::Bonus => "Bonus",
            Classification::Excluded => "Excluded",
        }
    }
}

impl TryFrom<i64> for Classification {
    type Error = Error;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        Classification::ALL
            .into_iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| Error::Validation(format!("Unknown classification: {}", id)))
    }
}

impl From<Classification> for i64 {
    fn from(c: Classification) -> i64 {
        c.id()
    }
}

/// Input for [`crate::db::puzzles::create_puzzle`]
#[derive(Debug, Clone)]
pub struct NewPuzzle {
    /// Caller-assigned id for curated content; `None` lets the store allocate one
    pub id: Option<PuzzleId>,
    pub name: String,
    pub difficulty: Difficulty,
    pub category: Category,
    pub author: UserId,
    pub letters: String,
    pub created_at: EpochMillis,
}

/// Puzzle with its catalog references resolved to display form
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleDetail {
    pub id: PuzzleId,
    pub name: String,
    pub difficulty_id: i64,
    pub difficulty: String,
    pub category_id: i64,
    pub category: String,
    pub author_id: UserId,
    /// `None` when the author row is missing (foreign keys not enforced)
    pub author: Option<String>,
    pub letters: String,
    pub created_at: EpochMillis,
}

/// Puzzle list row
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSummary {
    pub id: PuzzleId,
    pub name: String,
    pub difficulty: String,
    pub category_id: i64,
    pub category: String,
}

/// One word row of a puzzle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Word {
    pub id: WordId,
    pub puzzle: PuzzleId,
    pub text: String,
    pub path: Option<String>,
    pub classification: Classification,
}

/// A puzzle's words split by classification, each list in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordLists {
    pub normal: Vec<String>,
    pub bonus: Vec<String>,
    pub excluded: Vec<String>,
}

impl WordLists {
    pub fn is_empty(&self) -> bool {
        self.normal.is_empty() && self.bonus.is_empty() && self.excluded.is_empty()
    }

    fn list_mut(&mut self, classification: Classification) -> &mut Vec<String> {
        match classification {
            Classification::Normal => &mut self.normal,
            Classification::Bonus => &mut self.bonus,
            Classification::Excluded => &mut self.excluded,
        }
    }

    pub(crate) fn push(&mut self, classification: Classification, text: String) {
        self.list_mut(classification).push(text);
    }
}

/// One activation in the rotation schedule
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RotationEntry {
    pub id: RotationId,
    pub activates_at: EpochMillis,
    pub message: Option<String>,
    pub puzzle: PuzzleId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_labels() {
        assert_eq!(Difficulty::new(0).unwrap().label(), "☆☆☆☆☆");
        assert_eq!(Difficulty::new(2).unwrap().label(), "★★☆☆☆");
        assert_eq!(Difficulty::new(5).unwrap().label(), "★★★★★");
        assert!(Difficulty::new(6).is_none());
        assert_eq!(Difficulty::all().count(), 6);
    }

    #[test]
    fn test_difficulty_try_from() {
        assert_eq!(Difficulty::try_from(3).unwrap().stars(), 3);
        assert!(matches!(Difficulty::try_from(-1), Err(Error::Validation(_))));
        assert!(matches!(Difficulty::try_from(300), Err(Error::Validation(_))));
    }

    #[test]
    fn test_category_ids_and_names() {
        assert_eq!(Category::try_from(2).unwrap(), Category::Daily);
        assert_eq!(Category::Weekly.id(), 3);
        assert_eq!(Category::Special.name(), "Special");
        assert!(Category::try_from(5).is_err());
    }

    #[test]
    fn test_classification_ids() {
        assert_eq!(Classification::try_from(2).unwrap(), Classification::Bonus);
        assert_eq!(Classification::Excluded.name(), "Excluded");
        assert!(Classification::try_from(0).is_err());
    }

    #[test]
    fn test_catalogs_deserialize_from_ids() {
        let category: Category = serde_json::from_str("1").unwrap();
        assert_eq!(category, Category::Express);
        let difficulty: Difficulty = serde_json::from_str("4").unwrap();
        assert_eq!(difficulty.stars(), 4);
        assert!(serde_json::from_str::<Classification>("7").is_err());
    }

    #[test]
    fn test_word_lists_partition() {
        let mut lists = WordLists::default();
        assert!(lists.is_empty());
        lists.push(Classification::Bonus, "TAB".to_string());
        assert_eq!(lists.bonus, vec!["TAB"]);
        assert!(lists.normal.is_empty());
        assert!(!lists.is_empty());
    }
}
