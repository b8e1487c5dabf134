use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

pub type ParticipantId = i64;

/// A value outside one of the closed enumerations below.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {0}")]
pub struct InvalidValue(pub &'static str);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum VoteStatus {
    Green,
    Yellow,
    Red,
}

impl FromStr for VoteStatus {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "red" => Ok(Self::Red),
            _ => Err(InvalidValue("status")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TimeSlot {
    Lunch,
    Dinner,
}

impl FromStr for TimeSlot {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            _ => Err(InvalidValue("time_slot")),
        }
    }
}

/// Candidate meeting districts in Seoul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Location {
    #[serde(rename = "강남")]
    Gangnam,
    #[serde(rename = "서초")]
    Seocho,
    #[serde(rename = "잠실/송파/강동")]
    Jamsil,
    #[serde(rename = "영등포/여의도/강서")]
    Yeouido,
    #[serde(rename = "건대/성수/왕십리")]
    Seongsu,
    #[serde(rename = "종로/중구")]
    Jongno,
    #[serde(rename = "홍대/합정/마포")]
    Hongdae,
    #[serde(rename = "용산/이태원/한남")]
    Yongsan,
    #[serde(rename = "성북/노원/중랑")]
    Nowon,
    #[serde(rename = "구로/관악/동작")]
    Gwanak,
}

impl Location {
    pub const ALL: [Location; 10] = [
        Location::Gangnam,
        Location::Seocho,
        Location::Jamsil,
        Location::Yeouido,
        Location::Seongsu,
        Location::Jongno,
        Location::Hongdae,
        Location::Yongsan,
        Location::Nowon,
        Location::Gwanak,
    ];

    pub fn as_str(&self) -> &'static str {
        use Location::*;
        match self {
            Gangnam => "강남",
            Seocho => "서초",
            Jamsil => "잠실/송파/강동",
            Yeouido => "영등포/여의도/강서",
            Seongsu => "건대/성수/왕십리",
            Jongno => "종로/중구",
            Hongdae => "홍대/합정/마포",
            Yongsan => "용산/이태원/한남",
            Nowon => "성북/노원/중랑",
            Gwanak => "구로/관악/동작",
        }
    }
}

impl FromStr for Location {
    type Err = InvalidValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.as_str() == s)
            .ok_or(InvalidValue("location"))
    }
}

/// Traffic light summarizing every active participant's vote on one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Green,
    Yellow,
    Red,
    /// Not enough votes to call it.
    White,
}

/// Checks a `YYYY-MM-DD` calendar date and returns it normalized.
pub fn parse_date(date: &str) -> Result<String, InvalidValue> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    time::Date::parse(date.trim(), &format)
        .ok()
        .and_then(|date| date.format(&format).ok())
        .ok_or(InvalidValue("date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_reject_unknown_values() {
        assert_eq!("purple".parse::<VoteStatus>(), Err(InvalidValue("status")));
        assert_eq!("Lunch".parse::<TimeSlot>(), Err(InvalidValue("time_slot")));
        assert_eq!("부산".parse::<Location>(), Err(InvalidValue("location")));
    }

    #[test]
    fn locations_parse_by_display_name() {
        for location in Location::ALL {
            assert_eq!(location.as_str().parse::<Location>(), Ok(location));
        }
        assert_eq!(
            serde_json::to_string(&Location::Hongdae).unwrap(),
            "\"홍대/합정/마포\""
        );
    }

    #[test]
    fn dates_must_be_calendar_days() {
        assert_eq!(parse_date("2024-06-01"), Ok("2024-06-01".to_owned()));
        assert_eq!(parse_date(" 2024-06-01 "), Ok("2024-06-01".to_owned()));
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("06/01/2024").is_err());
    }
}
