use std::fmt;

use serde_json::Value;

use crate::domain::entities::sheet::{
    cell_coordinate, cell_non_blank, cell_number, cell_text, format_number, SheetRow,
};

pub const COL_ID: &str = "ID";
pub const COL_NAME: &str = "NomePesqueiro";
pub const COL_CITY: &str = "CidadeUF";
pub const COL_ADDRESS: &str = "EnderecoCompleto";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_DRIVE_TIME: &str = "TempoSemTransito";
pub const COL_DISTANCE: &str = "Distancia";
pub const COL_AVERAGE_PRICE: &str = "PrecoMedio";
pub const COL_RESERVATION: &str = "AceitaReserva";
pub const COL_SPECIES: &str = "Peixes";

/// Columns the spot form edits, in display order.
pub const SPOT_FORM_COLUMNS: [&str; 10] = [
    COL_NAME,
    COL_CITY,
    COL_ADDRESS,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_DRIVE_TIME,
    COL_DISTANCE,
    COL_AVERAGE_PRICE,
    COL_RESERVATION,
    COL_SPECIES,
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SpotId(pub String);

impl From<&str> for SpotId {
    fn from(value: &str) -> Self {
        SpotId(value.to_string())
    }
}

impl From<String> for SpotId {
    fn from(value: String) -> Self {
        SpotId(value)
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reservation {
    Yes,
    No,
}

impl Reservation {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "sim" | "s" | "yes" | "y" | "true" => Some(Reservation::Yes),
            "não" | "nao" | "n" | "no" | "false" => Some(Reservation::No),
            _ => None,
        }
    }

    /// Label stored in the sheet.
    pub fn label(self) -> &'static str {
        match self {
            Reservation::Yes => "Sim",
            Reservation::No => "Não",
        }
    }
}

/// A fishing spot, normalized once when it enters the store.
///
/// Numeric fields are `None` only when the sheet had no value at all
/// (absent column or `null`); unreadable text has already become `0.0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spot {
    pub id: SpotId,
    pub name: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub drive_time: Option<f64>,
    pub distance: Option<f64>,
    pub average_price: Option<f64>,
    pub reservation: Option<Reservation>,
    /// Raw comma-joined species list, e.g. `"Tilápia, Pacu"`.
    pub species: Option<String>,
}

impl Spot {
    pub fn from_row(row: &SheetRow) -> Self {
        Self {
            id: SpotId(cell_text(row, COL_ID).unwrap_or_default()),
            name: cell_text(row, COL_NAME),
            city: cell_text(row, COL_CITY),
            address: cell_non_blank(row, COL_ADDRESS),
            latitude: cell_coordinate(row, COL_LATITUDE),
            longitude: cell_coordinate(row, COL_LONGITUDE),
            drive_time: cell_number(row, COL_DRIVE_TIME),
            distance: cell_number(row, COL_DISTANCE),
            average_price: cell_number(row, COL_AVERAGE_PRICE),
            reservation: cell_text(row, COL_RESERVATION)
                .as_deref()
                .and_then(Reservation::parse),
            species: cell_text(row, COL_SPECIES),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("N/A")
    }

    /// Trimmed, non-empty species names in sheet order.
    pub fn species_list(&self) -> Vec<String> {
        self.species
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|fish| fish.trim().to_string())
            .filter(|fish| !fish.is_empty())
            .collect()
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Form draft for editing: the id plus every form column as text.
    pub fn to_row(&self) -> SheetRow {
        let number = |value: Option<f64>| value.map(format_number).unwrap_or_default();
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        let mut row = SheetRow::new();
        let cells = [
            (COL_ID, self.id.0.clone()),
            (COL_NAME, text(&self.name)),
            (COL_CITY, text(&self.city)),
            (COL_ADDRESS, text(&self.address)),
            (COL_LATITUDE, number(self.latitude)),
            (COL_LONGITUDE, number(self.longitude)),
            (COL_DRIVE_TIME, number(self.drive_time)),
            (COL_DISTANCE, number(self.distance)),
            (COL_AVERAGE_PRICE, number(self.average_price)),
            (
                COL_RESERVATION,
                self.reservation.map(|r| r.label().to_string()).unwrap_or_default(),
            ),
            (COL_SPECIES, text(&self.species)),
        ];
        for (column, value) in cells {
            row.insert(column.to_string(), Value::String(value));
        }
        row
    }
}

/// Distinct species across all spots, first-seen order.
pub fn species_catalog(spots: &[Spot]) -> Vec<String> {
    let mut catalog: Vec<String> = Vec::new();
    for fish in spots.iter().flat_map(Spot::species_list) {
        if !catalog.contains(&fish) {
            catalog.push(fish);
        }
    }
    catalog
}
