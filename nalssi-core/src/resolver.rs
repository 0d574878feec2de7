//! Korean place names → the English city names OpenWeatherMap expects.

use std::{collections::HashMap, sync::LazyLock};

/// Static lookup table. Provinces map to a representative city.
pub const KOREAN_CITY_NAMES: &[(&str, &str)] = &[
    // Metropolitan and special cities
    ("서울", "Seoul"),
    ("서울시", "Seoul"),
    ("서울특별시", "Seoul"),
    ("부산", "Busan"),
    ("부산시", "Busan"),
    ("부산광역시", "Busan"),
    ("대구", "Daegu"),
    ("대구시", "Daegu"),
    ("대구광역시", "Daegu"),
    ("인천", "Incheon"),
    ("인천시", "Incheon"),
    ("인천광역시", "Incheon"),
    ("광주", "Gwangju"),
    ("광주시", "Gwangju"),
    ("광주광역시", "Gwangju"),
    ("대전", "Daejeon"),
    ("대전시", "Daejeon"),
    ("대전광역시", "Daejeon"),
    ("울산", "Ulsan"),
    ("울산시", "Ulsan"),
    ("울산광역시", "Ulsan"),
    // Provincial capitals and major cities
    ("수원", "Suwon"),
    ("수원시", "Suwon"),
    ("춘천", "Chuncheon"),
    ("춘천시", "Chuncheon"),
    ("청주", "Cheongju"),
    ("청주시", "Cheongju"),
    ("전주", "Jeonju"),
    ("전주시", "Jeonju"),
    ("포항", "Pohang"),
    ("포항시", "Pohang"),
    ("창원", "Changwon"),
    ("창원시", "Changwon"),
    ("제주", "Jeju"),
    ("제주시", "Jeju"),
    ("제주도", "Jeju"),
    // Provinces
    ("경기도", "Suwon"),
    ("강원도", "Chuncheon"),
    ("충청북도", "Cheongju"),
    ("충청남도", "Daejeon"),
    ("충북", "Cheongju"),
    ("충남", "Daejeon"),
    ("전라북도", "Jeonju"),
    ("전라남도", "Gwangju"),
    ("전북", "Jeonju"),
    ("전남", "Gwangju"),
    ("경상북도", "Daegu"),
    ("경상남도", "Changwon"),
    ("경북", "Daegu"),
    ("경남", "Changwon"),
    // Other cities
    ("안양", "Anyang"),
    ("안산", "Ansan"),
    ("고양", "Goyang"),
    ("성남", "Seongnam"),
    ("용인", "Yongin"),
    ("부천", "Bucheon"),
    ("김포", "Incheon"),
    ("김포시", "Incheon"),
    ("천안", "Cheonan"),
    ("마산", "Masan"),
    ("진주", "Jinju"),
    ("목포", "Mokpo"),
    ("여수", "Yeosu"),
    ("순천", "Suncheon"),
];

/// Inputs that are always answered from a dedicated demo record, before any
/// resolution or network access.
const DEDICATED_DEMO: &[(&str, &str)] = &[("김포", "kimpo"), ("김포시", "kimpo")];

static TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KOREAN_CITY_NAMES.iter().copied().collect());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub converted: bool,
}

/// Trim the input and translate it if it is a known Korean name.
///
/// Unknown input comes back unchanged (apart from trimming) with
/// `converted == false`.
pub fn resolve_city(input: &str) -> Resolved {
    let trimmed = input.trim();

    match TABLE.get(trimmed) {
        Some(english) => Resolved {
            name: (*english).to_string(),
            converted: true,
        },
        None => Resolved {
            name: trimmed.to_string(),
            converted: false,
        },
    }
}

/// Demo table key for inputs that bypass the API entirely.
pub fn dedicated_demo_key(input: &str) -> Option<&'static str> {
    let trimmed = input.trim();
    DEDICATED_DEMO
        .iter()
        .find(|(name, _)| *name == trimmed)
        .map(|(_, key)| *key)
}
