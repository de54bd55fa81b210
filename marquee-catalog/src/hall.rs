use serde::{Deserialize, Serialize};

/// Seat class within a hall row. Backends may introduce new classes; anything
/// unrecognized decodes as `Standard` so old clients keep rendering the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SeatClass {
    Standard,
    Vip,
    Wheelchair,
    LoveSeat,
}

impl SeatClass {
    fn from_tag(raw: &str) -> Self {
        match raw {
            "standard" => Self::Standard,
            "vip" => Self::Vip,
            "wheelchair" => Self::Wheelchair,
            "love_seat" => Self::LoveSeat,
            _ => Self::Standard,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Vip => "vip",
            Self::Wheelchair => "wheelchair",
            Self::LoveSeat => "love_seat",
        }
    }
}

impl From<String> for SeatClass {
    fn from(raw: String) -> Self {
        Self::from_tag(&raw)
    }
}

impl From<SeatClass> for String {
    fn from(class: SeatClass) -> Self {
        class.as_tag().to_string()
    }
}

/// Hall projection type. Unknown values decode as `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HallType {
    Standard,
    Vip,
    Imax,
    DolbyAtmos,
    ScreenX,
}

impl HallType {
    fn from_tag(raw: &str) -> Self {
        match raw {
            "standard" => Self::Standard,
            "vip" => Self::Vip,
            "imax" => Self::Imax,
            "dolby_atmos" => Self::DolbyAtmos,
            "screen_x" => Self::ScreenX,
            _ => Self::Standard,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Vip => "vip",
            Self::Imax => "imax",
            Self::DolbyAtmos => "dolby_atmos",
            Self::ScreenX => "screen_x",
        }
    }
}

impl From<String> for HallType {
    fn from(raw: String) -> Self {
        Self::from_tag(&raw)
    }
}

impl From<HallType> for String {
    fn from(hall_type: HallType) -> Self {
        hall_type.as_tag().to_string()
    }
}

/// Extra equipment a hall advertises. Unknown values decode as
/// `ComfortSeats` rather than failing the whole hall document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HallFeature {
    ThreeD,
    FourDx,
    ComfortSeats,
    LoveSeats,
    Recliners,
}

impl HallFeature {
    fn from_tag(raw: &str) -> Self {
        match raw {
            "3d" => Self::ThreeD,
            "4dx" => Self::FourDx,
            "comfort_seats" => Self::ComfortSeats,
            "love_seats" => Self::LoveSeats,
            "recliners" => Self::Recliners,
            _ => Self::ComfortSeats,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::ThreeD => "3d",
            Self::FourDx => "4dx",
            Self::ComfortSeats => "comfort_seats",
            Self::LoveSeats => "love_seats",
            Self::Recliners => "recliners",
        }
    }
}

impl From<String> for HallFeature {
    fn from(raw: String) -> Self {
        Self::from_tag(&raw)
    }
}

impl From<HallFeature> for String {
    fn from(feature: HallFeature) -> Self {
        feature.as_tag().to_string()
    }
}

/// A single seat within a row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Seat {
    pub seat_number: u32,
    pub class: SeatClass,
}

/// One row of the hall grid. Seat numbers are unique within the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatRow {
    pub row_number: u32,
    pub seats: Vec<Seat>,
}

impl SeatRow {
    /// A row of `count` consecutive seats sharing one class.
    pub fn uniform(row_number: u32, count: u32, class: SeatClass) -> Self {
        Self {
            row_number,
            seats: (1..=count)
                .map(|seat_number| Seat { seat_number, class })
                .collect(),
        }
    }
}

/// A cinema hall: identity, advertised type/features, and the seating grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hall {
    pub id: String,
    pub name: String,
    pub hall_type: HallType,
    #[serde(default)]
    pub features: Vec<HallFeature>,
    pub rows: Vec<SeatRow>,
}

impl Hall {
    pub fn seat_count(&self) -> usize {
        self.rows.iter().map(|row| row.seats.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        let json = serde_json::to_string(&HallType::DolbyAtmos).unwrap();
        assert_eq!(json, "\"dolby_atmos\"");
        let back: HallType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HallType::DolbyAtmos);
    }

    #[test]
    fn unknown_tags_fall_back_to_defaults() {
        let hall_type: HallType = serde_json::from_str("\"laser_dome\"").unwrap();
        assert_eq!(hall_type, HallType::Standard);

        let class: SeatClass = serde_json::from_str("\"bean_bag\"").unwrap();
        assert_eq!(class, SeatClass::Standard);

        let feature: HallFeature = serde_json::from_str("\"heated\"").unwrap();
        assert_eq!(feature, HallFeature::ComfortSeats);
    }

    #[test]
    fn uniform_row_numbers_seats_from_one() {
        let row = SeatRow::uniform(3, 10, SeatClass::Vip);
        assert_eq!(row.seats.len(), 10);
        assert_eq!(row.seats[0].seat_number, 1);
        assert_eq!(row.seats[9].seat_number, 10);
        assert!(row.seats.iter().all(|s| s.class == SeatClass::Vip));
    }
}
