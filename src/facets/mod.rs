//! Dependent code facets
//!
//! Each select control in the filter panel is backed by a [`Facet`]: a small
//! state machine that reloads its option list whenever the parent selection
//! it depends on changes (region → sub-region, category tier 1 → 2 → 3).

pub mod facet;

pub use facet::{Facet, FacetKey, FacetKind, FacetState};
