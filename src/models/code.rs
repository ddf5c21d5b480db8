// Models - Region and category vocabulary
use serde::{Deserialize, Serialize};

/// Reserved code meaning "no constraint on this field"
pub const ALL_CODE: &str = "_ALL_";

/// Display name of the ALL sentinel
pub const ALL_NAME: &str = "전체";

/// A region or category code with its display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeItem {
    #[serde(default)]
    pub rnum: i64,
    pub code: String,
    pub name: String,
}

impl CodeItem {
    pub fn new(rnum: i64, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            rnum,
            code: code.into(),
            name: name.into(),
        }
    }

    /// The synthetic "ALL" option placed in front of option lists
    pub fn all() -> Self {
        Self::new(0, ALL_CODE, ALL_NAME)
    }

    pub fn is_all(&self) -> bool {
        self.code == ALL_CODE
    }
}

/// True when a filter value carries no constraint: absent, empty or the ALL sentinel
pub fn is_unset(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.is_empty() || v == ALL_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_item() {
        let all = CodeItem::all();
        assert_eq!(all.code, "_ALL_");
        assert_eq!(all.name, "전체");
        assert_eq!(all.rnum, 0);
        assert!(all.is_all());
        assert!(!CodeItem::new(1, "1", "서울").is_all());
    }

    #[test]
    fn test_is_unset() {
        assert!(is_unset(None));
        assert!(is_unset(Some("")));
        assert!(is_unset(Some(ALL_CODE)));
        assert!(!is_unset(Some("12")));
    }

    #[test]
    fn test_code_item_without_rnum() {
        let item: CodeItem = serde_json::from_str(r#"{"code":"A01","name":"자연"}"#).unwrap();
        assert_eq!(item, CodeItem::new(0, "A01", "자연"));
    }
}
