// Domain models - Re-exports all client-side data types
//
// This module is split into focused files by domain:
// - code.rs: Region/category vocabulary items and the ALL sentinel
// - content.rs: Tourism content records and their type-specific payloads
// - category.rs: Category tabs (content type groups)
// - filter.rs: Search filter request
// - auth.rs: Account and token payloads

mod code;
mod content;
mod category;
mod filter;
mod auth;

pub use code::{CodeItem, ALL_CODE, ALL_NAME, is_unset};
pub use content::{
    ContentType, ContentRecord, TourSpotInfo, CulturalFacilityInfo, FestivalInfo,
    TourCourseInfo, TourCourseItem, TypeDetail,
};
pub use category::{CategoryTab, CATEGORY_TABS};
pub use filter::{SearchFilterRequest, FILTER_QUERY_KEYS, KEYWORD_QUERY_KEY};
pub use auth::{
    RegisterRequest, LoginRequest, LoginResponse, TokenInfo, RefreshRequest,
    EmailAuthRequest, EmailVerifyRequest, KakaoLoginRequest, KakaoLoginResponse, UserInfo,
};
