//! Facet state machine
//!
//! `Unselected → Loading → Loaded(list) | Error(msg)`. Every load bumps a
//! generation counter and cancels the previous in-flight fetch, so a slow
//! response for an old parent can never overwrite the list for the new one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::api::ApiError;
use crate::codes::CodeSource;
use crate::models::{is_unset, CodeItem};

/// Current option list of a facet
#[derive(Debug, Clone, PartialEq)]
pub enum FacetState {
    /// Never loaded
    Unselected,
    Loading,
    Loaded(Vec<CodeItem>),
    Error(String),
}

impl FacetState {
    pub fn items(&self) -> &[CodeItem] {
        match self {
            FacetState::Loaded(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, FacetState::Loading)
    }
}

/// Which vocabulary a facet lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    /// Top-level regions (시/도)
    Sido { include_all: bool },
    /// Sub-regions (시/군/구) of the selected region
    Sigungu,
    /// Category tier 1 (대분류)
    CategoryMain,
    /// Category tier 2 (중분류)
    CategoryMiddle,
    /// Category tier 3 (소분류)
    CategoryDetail,
}

/// The parent selections a facet may depend on
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FacetKey {
    pub content_type_id: Option<String>,
    pub cat1: Option<String>,
    pub cat2: Option<String>,
    pub area_code: Option<String>,
}

enum FacetPlan {
    /// Answer known without a network call
    Fixed(Vec<CodeItem>),
    Areas { parent: Option<String> },
    Categories {
        content_type_id: String,
        cat1: Option<String>,
        cat2: Option<String>,
    },
}

fn set(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !is_unset(Some(v)))
}

impl FacetKind {
    /// Drop the parts of `key` this facet does not depend on
    fn relevant(&self, key: &FacetKey) -> FacetKey {
        match self {
            FacetKind::Sido { .. } => FacetKey::default(),
            FacetKind::Sigungu => FacetKey {
                area_code: set(&key.area_code),
                ..Default::default()
            },
            FacetKind::CategoryMain => FacetKey {
                content_type_id: set(&key.content_type_id),
                ..Default::default()
            },
            FacetKind::CategoryMiddle => FacetKey {
                content_type_id: set(&key.content_type_id),
                cat1: set(&key.cat1),
                ..Default::default()
            },
            FacetKind::CategoryDetail => FacetKey {
                content_type_id: set(&key.content_type_id),
                cat1: set(&key.cat1),
                cat2: set(&key.cat2),
                ..Default::default()
            },
        }
    }

    fn plan(&self, key: &FacetKey) -> FacetPlan {
        let all_only = || FacetPlan::Fixed(vec![CodeItem::all()]);

        match self {
            FacetKind::Sido { .. } => FacetPlan::Areas { parent: None },
            FacetKind::Sigungu => match &key.area_code {
                Some(area) => FacetPlan::Areas { parent: Some(area.clone()) },
                None => all_only(),
            },
            FacetKind::CategoryMain => match &key.content_type_id {
                Some(ct) => FacetPlan::Categories {
                    content_type_id: ct.clone(),
                    cat1: None,
                    cat2: None,
                },
                None => FacetPlan::Fixed(Vec::new()),
            },
            FacetKind::CategoryMiddle => match (&key.content_type_id, &key.cat1) {
                (None, _) => FacetPlan::Fixed(Vec::new()),
                (Some(_), None) => all_only(),
                (Some(ct), Some(cat1)) => FacetPlan::Categories {
                    content_type_id: ct.clone(),
                    cat1: Some(cat1.clone()),
                    cat2: None,
                },
            },
            FacetKind::CategoryDetail => match (&key.content_type_id, &key.cat1, &key.cat2) {
                (None, _, _) => FacetPlan::Fixed(Vec::new()),
                (Some(ct), Some(cat1), Some(cat2)) => FacetPlan::Categories {
                    content_type_id: ct.clone(),
                    cat1: Some(cat1.clone()),
                    cat2: Some(cat2.clone()),
                },
                _ => all_only(),
            },
        }
    }

    /// Region lists carry the ALL option; category lists get it from the panel
    fn decorate(&self, mut items: Vec<CodeItem>) -> Vec<CodeItem> {
        let with_all = match self {
            FacetKind::Sido { include_all } => *include_all,
            FacetKind::Sigungu => true,
            _ => false,
        };
        if with_all {
            items.insert(0, CodeItem::all());
        }
        items
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// One dependent option list
pub struct Facet {
    kind: FacetKind,
    source: Arc<dyn CodeSource>,
    state: RwLock<FacetState>,
    current_key: Mutex<Option<FacetKey>>,
    generation: AtomicU64,
    in_flight: Mutex<Option<CancellationToken>>,
}

impl Facet {
    pub fn new(kind: FacetKind, source: Arc<dyn CodeSource>) -> Self {
        Self {
            kind,
            source,
            state: RwLock::new(FacetState::Unselected),
            current_key: Mutex::new(None),
            generation: AtomicU64::new(0),
            in_flight: Mutex::new(None),
        }
    }

    pub fn kind(&self) -> FacetKind {
        self.kind
    }

    pub async fn state(&self) -> FacetState {
        self.state.read().await.clone()
    }

    /// Load on first use and whenever the parent selection this facet depends on changes
    pub async fn sync(&self, key: &FacetKey) -> FacetState {
        let relevant = self.kind.relevant(key);
        let unchanged = lock(&self.current_key).as_ref() == Some(&relevant);

        if unchanged {
            return self.state().await;
        }
        self.load(relevant).await
    }

    /// Unconditionally reload for `key`, cancelling any fetch still in flight
    pub async fn load(&self, key: FacetKey) -> FacetState {
        let key = self.kind.relevant(&key);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();

        if let Some(previous) = lock(&self.in_flight).replace(token.clone()) {
            previous.cancel();
        }
        *lock(&self.current_key) = Some(key.clone());

        let (content_type_id, cat1, cat2, parent) = match self.kind.plan(&key) {
            FacetPlan::Fixed(items) => {
                return self.finish(generation, FacetState::Loaded(items)).await;
            }
            FacetPlan::Areas { parent } => (None, None, None, parent),
            FacetPlan::Categories { content_type_id, cat1, cat2 } => {
                (Some(content_type_id), cat1, cat2, None)
            }
        };

        self.finish(generation, FacetState::Loading).await;

        let fetch = async {
            match &content_type_id {
                Some(ct) => {
                    self.source
                        .fetch_category_codes(ct, cat1.as_deref(), cat2.as_deref())
                        .await
                }
                None => self.source.fetch_area_codes(parent.as_deref()).await,
            }
        };

        let result: Result<Vec<CodeItem>, ApiError> = tokio::select! {
            _ = token.cancelled() => {
                log::debug!("{:?} facet fetch for {:?} superseded", self.kind, key);
                return self.state().await;
            }
            result = fetch => result,
        };

        let next = match result {
            Ok(items) => FacetState::Loaded(self.kind.decorate(items)),
            Err(e) => {
                log::error!("{:?} facet failed to load for {:?}: {}", self.kind, key, e);
                FacetState::Error(e.user_message())
            }
        };

        self.finish(generation, next).await
    }

    /// Store `next` only if no newer load has started since `generation`
    async fn finish(&self, generation: u64, next: FacetState) -> FacetState {
        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) == generation {
            if !next.is_loading() {
                lock(&self.in_flight).take();
            }
            *state = next;
        } else {
            log::debug!("Discarding stale {:?} facet result (generation {})", self.kind, generation);
        }
        state.clone()
    }
}
