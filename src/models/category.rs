// Models - Category tabs
use serde::Serialize;

use super::ContentType;

/// A browse tab grouping one content type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CategoryTab {
    /// Value used in the `category` query parameter
    pub value: &'static str,
    pub label: &'static str,
    pub content_type: ContentType,
}

pub const CATEGORY_TABS: [CategoryTab; 4] = [
    CategoryTab { value: "spots", label: "관광지", content_type: ContentType::TourSpot },
    CategoryTab { value: "facilities", label: "문화시설", content_type: ContentType::CulturalFacility },
    CategoryTab { value: "festivals", label: "축제/행사", content_type: ContentType::Festival },
    CategoryTab { value: "courses", label: "여행코스", content_type: ContentType::TourCourse },
];

impl CategoryTab {
    /// The tab shown when nothing in the URL selects one
    pub fn default_tab() -> Self {
        CATEGORY_TABS[0]
    }

    pub fn by_value(value: &str) -> Option<Self> {
        CATEGORY_TABS.iter().copied().find(|tab| tab.value == value)
    }

    pub fn by_content_type_code(code: &str) -> Option<Self> {
        let content_type = ContentType::from_code(code)?;
        CATEGORY_TABS.iter().copied().find(|tab| tab.content_type == content_type)
    }

    pub fn content_type_id(&self) -> &'static str {
        self.content_type.code()
    }
}
