use std::collections::HashMap;
use std::path::Path;

use super::board::Board;
use super::symmetry::Symmetry;
use super::types::{CELL_COUNT, Mark};

/// Why a decision table could not be used. Always recoverable: the caller
/// logs it and keeps playing with the heuristics.
#[derive(Debug)]
pub enum TableError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidKey(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io(e) => write!(f, "Decision table unavailable: {}", e),
            TableError::Parse(e) => write!(f, "Decision table is malformed: {}", e),
            TableError::InvalidKey(key) => write!(f, "Decision table has an invalid key: {:?}", key),
        }
    }
}

impl std::error::Error for TableError {}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        TableError::Io(e)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::Parse(e)
    }
}

/// Precomputed board values keyed by `Board::perspective_key`. A value is
/// scored for the `1` player, the one who just moved; higher is better.
#[derive(Debug, Clone, Default)]
pub struct DecisionTable {
    values: HashMap<String, f64>,
}

impl DecisionTable {
    pub fn from_json_str(content: &str) -> Result<Self, TableError> {
        let values: HashMap<String, f64> = serde_json::from_str(content)?;
        if let Some(bad) = values.keys().find(|key| !is_valid_key(key)) {
            return Err(TableError::InvalidKey(bad.clone()));
        }
        Ok(Self { values })
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub async fn load_async(path: &Path) -> Result<Self, TableError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Value of `board` for `mover`. Falls back to the symmetric images of
    /// the board when the exact orientation is not stored.
    pub fn value_of(&self, board: &Board, mover: Mark) -> Option<f64> {
        if let Some(value) = self.get(&board.perspective_key(mover)) {
            return Some(value);
        }
        Symmetry::all()
            .iter()
            .skip(1)
            .find_map(|symmetry| self.get(&symmetry.apply(board).perspective_key(mover)))
    }
}

impl FromIterator<(String, f64)> for DecisionTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

fn is_valid_key(key: &str) -> bool {
    key.len() == CELL_COUNT && key.chars().all(|c| matches!(c, '0' | '1' | '2'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_table() {
        let table = DecisionTable::from_json_str(r#"{"100000000": 0.5, "120000000": -1}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("100000000"), Some(0.5));
        assert_eq!(table.get("120000000"), Some(-1.0));
    }

    #[test]
    fn test_rejects_bad_key() {
        let result = DecisionTable::from_json_str(r#"{"1000": 0.5}"#);
        assert!(matches!(result, Err(TableError::InvalidKey(ref k)) if k == "1000"));
        let result = DecisionTable::from_json_str(r#"{"X00000000": 0.5}"#);
        assert!(matches!(result, Err(TableError::InvalidKey(_))));
    }

    #[test]
    fn test_rejects_non_numeric_value() {
        let result = DecisionTable::from_json_str(r#"{"100000000": "good"}"#);
        assert!(matches!(result, Err(TableError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = DecisionTable::load(Path::new("this_table_does_not_exist.json"));
        assert!(matches!(result, Err(TableError::Io(_))));
    }

    #[test]
    fn test_value_of_uses_perspective() {
        let table: DecisionTable = [("120000000".to_string(), 0.25)].into_iter().collect();
        let board: Board = "XO.......".parse().unwrap();
        assert_eq!(table.value_of(&board, Mark::X), Some(0.25));
        let flipped: Board = "OX.......".parse().unwrap();
        assert_eq!(table.value_of(&flipped, Mark::O), Some(0.25));
    }

    #[test]
    fn test_value_of_resolves_symmetric_board() {
        let table: DecisionTable = [("100000000".to_string(), 1.0)].into_iter().collect();
        let corner: Board = "........X".parse().unwrap();
        assert_eq!(table.value_of(&corner, Mark::X), Some(1.0));
        let edge: Board = ".X.......".parse().unwrap();
        assert_eq!(table.value_of(&edge, Mark::X), None);
    }

    #[tokio::test]
    async fn test_load_async_from_file() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_decision_table_{}.json", random_number));
        std::fs::write(&path, r#"{"000010000": 0.0}"#).unwrap();

        let table = DecisionTable::load_async(&path).await.unwrap();
        assert_eq!(table.len(), 1);
        let _ = std::fs::remove_file(&path);
    }
}
