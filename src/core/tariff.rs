//! Fixed fee tables for campus services
//!
//! All prices are whole JD amounts.

use crate::types::CampusError;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Parking fee for each of the first five hours; later hours are free
pub const PARKING_FEES: [u32; 5] = [5, 4, 3, 2, 1];

/// Cafeteria menu as `(item number, name, price)`
pub const CAFETERIA_MENU: [(u32, &str, u32); 8] = [
    (1, "Steak", 8),
    (2, "Soup", 2),
    (3, "Sandwich", 3),
    (4, "Salad", 4),
    (5, "Tea", 2),
    (6, "Juice", 3),
    (7, "Cake", 5),
    (8, "Water", 1),
];

/// Parking cost for `hours`
///
/// Hour `n` (1-based) costs `PARKING_FEES[n - 1]`; hours past the table are
/// free. Zero hours yields zero, which callers reject as an invalid amount.
pub fn parking_cost(hours: u32) -> Decimal {
    let total: u32 = PARKING_FEES.iter().take(hours as usize).sum();
    Decimal::from(total)
}

/// Price of one cafeteria item
///
/// # Errors
///
/// Returns `UnknownTariff` if `item` is not on the menu.
pub fn cafeteria_price(item: u32) -> Result<Decimal, CampusError> {
    CAFETERIA_MENU
        .iter()
        .find(|(number, _, _)| *number == item)
        .map(|(_, _, price)| Decimal::from(*price))
        .ok_or_else(|| CampusError::unknown_tariff("cafeteria item", item))
}

/// Total price of a cafeteria order
///
/// Items may repeat. An empty order totals zero.
///
/// # Errors
///
/// Returns `UnknownTariff` for the first item not on the menu; the whole
/// order is rejected.
pub fn cafeteria_total(items: &[u32]) -> Result<Decimal, CampusError> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| Ok(total + cafeteria_price(*item)?))
}

/// Campus bus track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusTrack {
    /// North bus station
    North,
    /// South bus station
    South,
    /// Library stop
    Library,
}

impl BusTrack {
    pub fn fare(&self) -> Decimal {
        match self {
            BusTrack::North => Decimal::from(3),
            BusTrack::South => Decimal::from(4),
            BusTrack::Library => Decimal::from(5),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BusTrack::North => "NB",
            BusTrack::South => "SB",
            BusTrack::Library => "LIB",
        }
    }
}

impl fmt::Display for BusTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BusTrack {
    type Err = CampusError;

    /// Accepts the menu number or the track code, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1" | "NB" => Ok(BusTrack::North),
            "2" | "SB" => Ok(BusTrack::South),
            "3" | "LIB" => Ok(BusTrack::Library),
            _ => Err(CampusError::unknown_tariff("bus track", s.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::none(0, 0)]
    #[case::one_hour(1, 5)]
    #[case::three_hours(3, 12)]
    #[case::full_table(5, 15)]
    #[case::beyond_table(8, 15)]
    fn test_parking_cost(#[case] hours: u32, #[case] expected: u32) {
        assert_eq!(parking_cost(hours), Decimal::from(expected));
    }

    #[rstest]
    #[case::single(&[1], 8)]
    #[case::mixed(&[2, 5, 8], 5)]
    #[case::repeated(&[7, 7], 10)]
    #[case::empty(&[], 0)]
    fn test_cafeteria_total(#[case] items: &[u32], #[case] expected: u32) {
        assert_eq!(cafeteria_total(items).unwrap(), Decimal::from(expected));
    }

    #[test]
    fn test_cafeteria_unknown_item_rejects_order() {
        assert_eq!(
            cafeteria_total(&[1, 9, 2]),
            Err(CampusError::unknown_tariff("cafeteria item", 9))
        );
    }

    #[rstest]
    #[case::number_north("1", BusTrack::North)]
    #[case::code_south("SB", BusTrack::South)]
    #[case::lowercase_library("lib", BusTrack::Library)]
    #[case::padded(" nb ", BusTrack::North)]
    fn test_bus_track_parse(#[case] input: &str, #[case] expected: BusTrack) {
        assert_eq!(input.parse::<BusTrack>().unwrap(), expected);
    }

    #[test]
    fn test_bus_track_unknown() {
        assert_eq!(
            "XYZ".parse::<BusTrack>(),
            Err(CampusError::unknown_tariff("bus track", "XYZ"))
        );
    }

    #[test]
    fn test_bus_fares() {
        assert_eq!(BusTrack::North.fare(), Decimal::from(3));
        assert_eq!(BusTrack::South.fare(), Decimal::from(4));
        assert_eq!(BusTrack::Library.fare(), Decimal::from(5));
    }
}
