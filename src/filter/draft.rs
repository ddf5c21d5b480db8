//! In-progress filter selection

use crate::models::{CategoryTab, SearchFilterRequest, ALL_CODE};

/// A user-editable field of the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    ContentType,
    /// 대분류
    Cat1,
    /// 중분류
    Cat2,
    /// 소분류
    Cat3,
    /// 시/도
    Area,
    /// 시/군/구
    SubArea,
    Title,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::ContentType,
        FilterField::Cat1,
        FilterField::Cat2,
        FilterField::Cat3,
        FilterField::Area,
        FilterField::SubArea,
        FilterField::Title,
    ];

    /// Query-string key of the field
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::ContentType => "contentTypeid",
            FilterField::Cat1 => "cat1",
            FilterField::Cat2 => "cat2",
            FilterField::Cat3 => "cat3",
            FilterField::Area => "areacode",
            FilterField::SubArea => "lDongSigunguCd",
            FilterField::Title => "title",
        }
    }

    /// The field that must hold a real value before this one can be chosen
    pub fn prerequisite(&self) -> Option<FilterField> {
        match self {
            FilterField::Cat2 => Some(FilterField::Cat1),
            FilterField::Cat3 => Some(FilterField::Cat2),
            FilterField::SubArea => Some(FilterField::Area),
            _ => None,
        }
    }

    /// Fields reset to ALL when this one changes
    pub fn dependents(&self) -> &'static [FilterField] {
        match self {
            FilterField::ContentType => &[FilterField::Cat1, FilterField::Cat2, FilterField::Cat3],
            FilterField::Cat1 => &[FilterField::Cat2, FilterField::Cat3],
            FilterField::Cat2 => &[FilterField::Cat3],
            FilterField::Area => &[FilterField::SubArea],
            _ => &[],
        }
    }
}

/// Local draft of the filter, edited field by field and handed over on submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    conditions: SearchFilterRequest,
}

impl FilterDraft {
    /// Seed the draft from the caller's conditions (usually the URL).
    ///
    /// Missing or empty selects start at ALL, the title at "" and the
    /// content type at the selected tab's.
    pub fn from_initial(initial: &SearchFilterRequest, tab: CategoryTab) -> Self {
        let or_all = |value: &Option<String>| {
            Some(
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .unwrap_or(ALL_CODE)
                    .to_string(),
            )
        };

        let content_type_id = initial
            .content_type_id
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| tab.content_type_id().to_string());

        Self {
            conditions: SearchFilterRequest {
                content_type_id: Some(content_type_id),
                cat1: or_all(&initial.cat1),
                cat2: or_all(&initial.cat2),
                cat3: or_all(&initial.cat3),
                area_code: or_all(&initial.area_code),
                l_dong_regn_cd: initial.l_dong_regn_cd.clone(),
                l_dong_sigungu_cd: or_all(&initial.l_dong_sigungu_cd),
                title: Some(initial.title.clone().unwrap_or_default()),
            },
        }
    }

    pub fn get(&self, field: FilterField) -> &str {
        self.conditions.field(field.key()).unwrap_or("")
    }

    pub fn conditions(&self) -> &SearchFilterRequest {
        &self.conditions
    }

    /// Update one field. When the value actually changes, its dependent
    /// fields are reset to ALL in the same update; those fields are returned.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) -> Vec<FilterField> {
        let value = value.into();
        if self.get(field) == value {
            return Vec::new();
        }

        self.conditions.set_field(field.key(), Some(value));

        let mut reset = Vec::new();
        for &dependent in field.dependents() {
            if self.get(dependent) != ALL_CODE {
                self.conditions.set_field(dependent.key(), Some(ALL_CODE.to_string()));
                reset.push(dependent);
            }
        }
        reset
    }

    /// Whether the prerequisite of `field` is still ALL
    pub fn prerequisite_unset(&self, field: FilterField) -> bool {
        match field.prerequisite() {
            Some(parent) => {
                let value = self.get(parent);
                value.is_empty() || value == ALL_CODE
            }
            None => false,
        }
    }

    /// The full draft, unmodified. Stripping happens at serialization.
    pub fn submit(&self) -> SearchFilterRequest {
        self.conditions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spots() -> CategoryTab {
        CategoryTab::default_tab()
    }

    #[test]
    fn test_initial_defaults() {
        let draft = FilterDraft::from_initial(&SearchFilterRequest::default(), spots());
        assert_eq!(draft.get(FilterField::ContentType), "12");
        assert_eq!(draft.get(FilterField::Cat1), ALL_CODE);
        assert_eq!(draft.get(FilterField::SubArea), ALL_CODE);
        assert_eq!(draft.get(FilterField::Title), "");
        assert_eq!(draft.conditions().l_dong_regn_cd, None);
    }

    #[test]
    fn test_initial_values_kept() {
        let initial = SearchFilterRequest {
            content_type_id: Some("15".into()),
            cat1: Some("A02".into()),
            cat2: Some(String::new()),
            area_code: Some("6".into()),
            title: Some("불꽃".into()),
            ..Default::default()
        };
        let draft = FilterDraft::from_initial(&initial, spots());
        assert_eq!(draft.get(FilterField::ContentType), "15");
        assert_eq!(draft.get(FilterField::Cat1), "A02");
        assert_eq!(draft.get(FilterField::Cat2), ALL_CODE);
        assert_eq!(draft.get(FilterField::Area), "6");
        assert_eq!(draft.get(FilterField::Title), "불꽃");
    }

    #[test]
    fn test_cat1_change_resets_lower_tiers() {
        let initial = SearchFilterRequest {
            cat1: Some("A01".into()),
            cat2: Some("A0101".into()),
            cat3: Some("A01010100".into()),
            ..Default::default()
        };
        let mut draft = FilterDraft::from_initial(&initial, spots());

        let reset = draft.set(FilterField::Cat1, "A02");
        assert_eq!(reset, vec![FilterField::Cat2, FilterField::Cat3]);
        assert_eq!(draft.get(FilterField::Cat1), "A02");
        assert_eq!(draft.get(FilterField::Cat2), ALL_CODE);
        assert_eq!(draft.get(FilterField::Cat3), ALL_CODE);
    }

    #[test]
    fn test_same_value_does_not_cascade() {
        let initial = SearchFilterRequest {
            cat1: Some("A01".into()),
            cat2: Some("A0101".into()),
            ..Default::default()
        };
        let mut draft = FilterDraft::from_initial(&initial, spots());
        assert!(draft.set(FilterField::Cat1, "A01").is_empty());
        assert_eq!(draft.get(FilterField::Cat2), "A0101");
    }

    #[test]
    fn test_area_change_resets_sub_area() {
        let mut draft = FilterDraft::from_initial(&SearchFilterRequest::default(), spots());
        draft.set(FilterField::Area, "1");
        draft.set(FilterField::SubArea, "110");
        assert!(!draft.prerequisite_unset(FilterField::SubArea));

        draft.set(FilterField::Area, "_ALL_");
        assert_eq!(draft.get(FilterField::SubArea), ALL_CODE);
        assert!(draft.prerequisite_unset(FilterField::SubArea));
    }

    #[test]
    fn test_submit_is_unmodified() {
        let mut draft = FilterDraft::from_initial(&SearchFilterRequest::default(), spots());
        draft.set(FilterField::Cat1, "A01");
        draft.set(FilterField::Title, "궁");

        let submitted = draft.submit();
        assert_eq!(submitted.cat2.as_deref(), Some(ALL_CODE));
        assert_eq!(submitted.title.as_deref(), Some("궁"));
        assert_eq!(&submitted, draft.conditions());
    }

    #[test]
    fn test_field_keys() {
        for field in FilterField::ALL {
            assert!(crate::models::FILTER_QUERY_KEYS.contains(&field.key()));
        }
        assert_eq!(FilterField::Cat3.prerequisite(), Some(FilterField::Cat2));
    }
}
