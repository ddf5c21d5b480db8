//! Filter panel: the draft plus its dependent option lists

use std::sync::Arc;

use super::draft::{FilterDraft, FilterField};
use crate::codes::CodeSource;
use crate::facets::{Facet, FacetKey, FacetKind, FacetState};
use crate::models::{CategoryTab, CodeItem, SearchFilterRequest, CATEGORY_TABS};

pub struct FilterPanel {
    draft: FilterDraft,
    sido: Facet,
    sigungu: Facet,
    main_category: Facet,
    middle_category: Facet,
    detail_category: Facet,
}

impl FilterPanel {
    /// Build a panel seeded from `initial`. Facets stay `Unselected` until
    /// the first [`FilterPanel::sync_facets`].
    pub fn new(source: Arc<dyn CodeSource>, tab: CategoryTab, initial: &SearchFilterRequest) -> Self {
        Self {
            draft: FilterDraft::from_initial(initial, tab),
            sido: Facet::new(FacetKind::Sido { include_all: true }, source.clone()),
            sigungu: Facet::new(FacetKind::Sigungu, source.clone()),
            main_category: Facet::new(FacetKind::CategoryMain, source.clone()),
            middle_category: Facet::new(FacetKind::CategoryMiddle, source.clone()),
            detail_category: Facet::new(FacetKind::CategoryDetail, source),
        }
    }

    pub fn draft(&self) -> &FilterDraft {
        &self.draft
    }

    fn facet_key(&self) -> FacetKey {
        let conditions = self.draft.conditions();
        FacetKey {
            content_type_id: conditions.content_type_id.clone(),
            cat1: conditions.cat1.clone(),
            cat2: conditions.cat2.clone(),
            area_code: conditions.area_code.clone(),
        }
    }

    fn facet(&self, field: FilterField) -> Option<&Facet> {
        match field {
            FilterField::Cat1 => Some(&self.main_category),
            FilterField::Cat2 => Some(&self.middle_category),
            FilterField::Cat3 => Some(&self.detail_category),
            FilterField::Area => Some(&self.sido),
            FilterField::SubArea => Some(&self.sigungu),
            FilterField::ContentType | FilterField::Title => None,
        }
    }

    /// Bring every facet in line with the current draft; facets whose parent
    /// selection did not change keep their list
    pub async fn sync_facets(&self) {
        let key = self.facet_key();
        tokio::join!(
            self.sido.sync(&key),
            self.sigungu.sync(&key),
            self.main_category.sync(&key),
            self.middle_category.sync(&key),
            self.detail_category.sync(&key),
        );
    }

    /// Change one field, apply the cascade and refresh the dependent lists
    pub async fn set_field(&mut self, field: FilterField, value: impl Into<String>) -> Vec<FilterField> {
        let reset = self.draft.set(field, value);
        if !reset.is_empty() {
            log::debug!("{:?} changed, reset {:?}", field, reset);
        }
        self.sync_facets().await;
        reset
    }

    /// Re-seed the draft from new initial conditions (the URL changed)
    pub async fn reset(&mut self, tab: CategoryTab, initial: &SearchFilterRequest) {
        self.draft = FilterDraft::from_initial(initial, tab);
        self.sync_facets().await;
    }

    pub async fn facet_state(&self, field: FilterField) -> Option<FacetState> {
        match self.facet(field) {
            Some(facet) => Some(facet.state().await),
            None => None,
        }
    }

    /// Choices offered for `field`. Category tiers get the ALL option first.
    pub async fn options(&self, field: FilterField) -> Vec<CodeItem> {
        match field {
            FilterField::ContentType => CATEGORY_TABS
                .iter()
                .enumerate()
                .map(|(i, tab)| CodeItem::new(i as i64 + 1, tab.content_type_id(), tab.label))
                .collect(),
            FilterField::Title => Vec::new(),
            FilterField::Cat1 | FilterField::Cat2 | FilterField::Cat3 => {
                let mut options = vec![CodeItem::all()];
                if let Some(facet) = self.facet(field) {
                    let state = facet.state().await;
                    options.extend(state.items().iter().filter(|item| !item.is_all()).cloned());
                }
                options
            }
            FilterField::Area | FilterField::SubArea => match self.facet(field) {
                Some(facet) => facet.state().await.items().to_vec(),
                None => Vec::new(),
            },
        }
    }

    /// A select is disabled while its list loads, when the list is empty, or
    /// when its prerequisite field is still ALL
    pub async fn is_disabled(&self, field: FilterField) -> bool {
        if self.draft.prerequisite_unset(field) {
            return true;
        }
        match self.facet(field) {
            Some(facet) => {
                let state = facet.state().await;
                state.is_loading() || state.items().is_empty()
            }
            None => false,
        }
    }

    pub fn submit(&self) -> SearchFilterRequest {
        self.draft.submit()
    }
}
