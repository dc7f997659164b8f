use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::entities::Coordinates;
use crate::error::{invalid_input_with, Error};

const GRID: [[char; 4]; 4] = [
    ['F', 'C', '9', '8'],
    ['J', '3', '2', '7'],
    ['K', '4', '5', '6'],
    ['L', 'M', 'P', 'T'],
];

const MIN_LAT: f64 = 2.5;
const MAX_LAT: f64 = 38.5;
const MIN_LON: f64 = 63.5;
const MAX_LON: f64 = 99.5;

const LEVELS: usize = 10;

/// Ten-symbol location code over a 4x4 grid subdivided ten times, written as `XXX-XXX-XXXX`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DigiPin(String);

#[derive(Clone, Copy)]
struct Cell {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl Cell {
    fn root() -> Self {
        Self {
            min_lat: MIN_LAT,
            max_lat: MAX_LAT,
            min_lon: MIN_LON,
            max_lon: MAX_LON,
        }
    }

    fn lat_step(&self) -> f64 {
        (self.max_lat - self.min_lat) / 4.0
    }

    fn lon_step(&self) -> f64 {
        (self.max_lon - self.min_lon) / 4.0
    }

    /// Row 0 is the northernmost band of the cell.
    fn child(&self, row: usize, col: usize) -> Self {
        let (lat_step, lon_step) = (self.lat_step(), self.lon_step());
        let max_lat = self.max_lat - lat_step * row as f64;
        let min_lon = self.min_lon + lon_step * col as f64;

        Self {
            min_lat: max_lat - lat_step,
            max_lat,
            min_lon,
            max_lon: min_lon + lon_step,
        }
    }

    fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

impl DigiPin {
    pub fn encode(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(invalid_input_with(format!(
                "Latitude out of range. Must be between {} and {}. Got: {}",
                MIN_LAT, MAX_LAT, latitude
            )));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(invalid_input_with(format!(
                "Longitude out of range. Must be between {} and {}. Got: {}",
                MIN_LON, MAX_LON, longitude
            )));
        }

        let mut cell = Cell::root();
        let mut code = String::with_capacity(LEVELS + 2);

        for level in 1..=LEVELS {
            let (lat_step, lon_step) = (cell.lat_step(), cell.lon_step());

            // keep points on the upper edges inside the current cell
            let lat_offset = (latitude - cell.min_lat).clamp(0.0, cell.max_lat - cell.min_lat - 1e-9);
            let lon_offset = (longitude - cell.min_lon).clamp(0.0, cell.max_lon - cell.min_lon - 1e-9);

            let row = (3 - (lat_offset / lat_step).floor() as i64).clamp(0, 3) as usize;
            let col = ((lon_offset / lon_step).floor() as i64).clamp(0, 3) as usize;

            code.push(GRID[row][col]);
            if level == 3 || level == 6 {
                code.push('-');
            }

            cell = cell.child(row, col);
        }

        Ok(Self(code))
    }

    /// Centre of the cell the code names.
    pub fn decode(code: &str) -> Result<Coordinates, Error> {
        let symbols: Vec<char> = code.chars().filter(|c| *c != '-').collect();
        if symbols.len() != LEVELS {
            return Err(invalid_input_with(format!(
                "Invalid DIGIPIN length after removing hyphens. Expected {} characters, got {}",
                LEVELS,
                symbols.len()
            )));
        }

        let mut cell = Cell::root();
        for (position, symbol) in symbols.iter().enumerate() {
            let (row, col) = locate(*symbol).ok_or_else(|| {
                invalid_input_with(format!(
                    "Invalid character '{}' in DIGIPIN at position {}",
                    symbol,
                    position + 1
                ))
            })?;
            cell = cell.child(row, col);
        }

        Ok(cell.center())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn locate(symbol: char) -> Option<(usize, usize)> {
    let symbol = symbol.to_ascii_uppercase();
    GRID.iter().enumerate().find_map(|(row, symbols)| {
        symbols
            .iter()
            .position(|candidate| *candidate == symbol)
            .map(|col| (row, col))
    })
}

impl FromStr for DigiPin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let center = DigiPin::decode(s.trim())?;
        DigiPin::encode(center.latitude, center.longitude)
    }
}

impl fmt::Display for DigiPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DigiPin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DigiPin {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
