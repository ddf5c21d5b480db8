// Models - Tourism content records
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Read JSON `null` as the field's default; backends send null for blank text
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Content type discriminator (`contenttypeid`)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContentType {
    TourSpot,
    CulturalFacility,
    Festival,
    TourCourse,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::TourSpot,
        ContentType::CulturalFacility,
        ContentType::Festival,
        ContentType::TourCourse,
    ];

    /// Parse the wire discriminator ("12", "14", "15", "25")
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "12" => Some(ContentType::TourSpot),
            "14" => Some(ContentType::CulturalFacility),
            "15" => Some(ContentType::Festival),
            "25" => Some(ContentType::TourCourse),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ContentType::TourSpot => "12",
            ContentType::CulturalFacility => "14",
            ContentType::Festival => "15",
            ContentType::TourCourse => "25",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::TourSpot => write!(f, "tour spot"),
            ContentType::CulturalFacility => write!(f, "cultural facility"),
            ContentType::Festival => write!(f, "festival"),
            ContentType::TourCourse => write!(f, "tour course"),
        }
    }
}

/// Spot-specific details (`tourSpotInfo`, type 12)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TourSpotInfo {
    #[serde(rename = "contentId", deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accomcount: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chkbabycarriage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chkcreditcard: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chkpet: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expagerange: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expguide: String,
    #[serde(deserialize_with = "null_as_default")]
    pub heritage1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub heritage2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub heritage3: String,
    #[serde(deserialize_with = "null_as_default")]
    pub infocenter: String,
    #[serde(deserialize_with = "null_as_default")]
    pub opendate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parking: String,
    #[serde(deserialize_with = "null_as_default")]
    pub restdate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub useseason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub usetime: String,
}

/// Cultural facility details (`culturalFacilityInfo`, type 14)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CulturalFacilityInfo {
    #[serde(rename = "contentId", deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub accomcountculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chkbabycarriageculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chkcreditcardculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub chkpetculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub discountinfo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub infocenterculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parkingculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parkingfee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub restdateculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub usefee: String,
    #[serde(deserialize_with = "null_as_default")]
    pub usetimeculture: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scale: String,
    #[serde(deserialize_with = "null_as_default")]
    pub spendtime: String,
}

/// Festival/event details (`festivalInfo`, type 15)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FestivalInfo {
    #[serde(rename = "contentId", deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub agelimit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bookingplace: String,
    #[serde(deserialize_with = "null_as_default")]
    pub discountinfofestival: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eventenddate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eventhomepage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eventplace: String,
    #[serde(deserialize_with = "null_as_default")]
    pub eventstartdate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub placeinfo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub playtime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub program: String,
    #[serde(deserialize_with = "null_as_default")]
    pub spendtimefestival: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sponsor1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sponsor1tel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sponsor2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sponsor2tel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subevent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub usetimefestival: String,
}

/// Tour course summary (`tourCourseInfo`, type 25)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TourCourseInfo {
    #[serde(rename = "contentId", deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub distance: String,
    #[serde(deserialize_with = "null_as_default")]
    pub infocentertourcourse: String,
    #[serde(deserialize_with = "null_as_default")]
    pub schedule: String,
    #[serde(deserialize_with = "null_as_default")]
    pub taketime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub theme: String,
}

/// One stop of a tour course (`tourCourseItem`, type 25)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TourCourseItem {
    #[serde(rename = "contentId", deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subnum: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subcontentid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subdetailoverview: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subdetailimg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subdetailalt: String,
}

/// A type-specific payload fetched separately from the base record
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDetail {
    TourSpot(TourSpotInfo),
    CulturalFacility(CulturalFacilityInfo),
    Festival(FestivalInfo),
    /// Course info and stops come from two independent requests; either may be missing
    TourCourse {
        info: Option<TourCourseInfo>,
        items: Option<Vec<TourCourseItem>>,
    },
}

/// A tourism content record, as returned by `/search/filter` and `/search/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentRecord {
    #[serde(rename = "contentId", deserialize_with = "null_as_default")]
    pub content_id: String,
    #[serde(rename = "contenttypeid", alias = "contentTypeId", deserialize_with = "null_as_default")]
    pub content_type_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cat1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cat2: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cat3: String,
    #[serde(rename = "areacode", alias = "areaCode", deserialize_with = "null_as_default")]
    pub area_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addr1: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addr2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstimage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstimage2: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tel: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zipcode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modifiedtime: String,
    #[serde(deserialize_with = "null_as_default")]
    pub createdtime: String,
    #[serde(rename = "ldongSigunguCd", deserialize_with = "null_as_default")]
    pub ldong_sigungu_cd: String,
    #[serde(rename = "ldongRegnCd", deserialize_with = "null_as_default")]
    pub ldong_regn_cd: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(rename = "tourSpotInfo", skip_serializing_if = "Option::is_none")]
    pub tour_spot_info: Option<TourSpotInfo>,
    #[serde(rename = "culturalFacilityInfo", skip_serializing_if = "Option::is_none")]
    pub cultural_facility_info: Option<CulturalFacilityInfo>,
    #[serde(rename = "festivalInfo", skip_serializing_if = "Option::is_none")]
    pub festival_info: Option<FestivalInfo>,
    #[serde(rename = "tourCourseInfo", skip_serializing_if = "Option::is_none")]
    pub tour_course_info: Option<TourCourseInfo>,
    #[serde(rename = "tourCourseItem", skip_serializing_if = "Option::is_none")]
    pub tour_course_item: Option<Vec<TourCourseItem>>,
}

impl ContentRecord {
    /// The parsed discriminator, if it is one of the known types
    pub fn content_type(&self) -> Option<ContentType> {
        ContentType::from_code(&self.content_type_id)
    }

    /// Replace any type-specific payload with `detail`, so only one type is ever populated
    pub fn attach(&mut self, detail: TypeDetail) {
        self.clear_type_details();
        match detail {
            TypeDetail::TourSpot(info) => self.tour_spot_info = Some(info),
            TypeDetail::CulturalFacility(info) => self.cultural_facility_info = Some(info),
            TypeDetail::Festival(info) => self.festival_info = Some(info),
            TypeDetail::TourCourse { info, items } => {
                self.tour_course_info = info;
                self.tour_course_item = items;
            }
        }
    }

    pub fn clear_type_details(&mut self) {
        self.tour_spot_info = None;
        self.cultural_facility_info = None;
        self.festival_info = None;
        self.tour_course_info = None;
        self.tour_course_item = None;
    }

    /// Full street address as displayed on detail pages
    pub fn full_address(&self) -> String {
        if self.addr2.trim().is_empty() {
            self.addr1.clone()
        } else {
            format!("{} {}", self.addr1, self.addr2)
        }
    }
}
