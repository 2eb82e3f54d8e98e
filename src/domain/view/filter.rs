use crate::domain::entities::sheet::parse_numeric_text;
use crate::domain::entities::spot::{Reservation, Spot};
use crate::domain::entities::wishlist::{Priority, WishlistItem, WishlistStatus};

/// A predicate over records built from the current filter inputs.
pub trait RecordFilter<R> {
    /// True when no dimension is active.
    fn is_empty(&self) -> bool;

    fn matches(&self, record: &R) -> bool;
}

/// Applies the criteria, always returning a fresh collection.
pub fn filter_records<R: Clone, F: RecordFilter<R>>(records: &[R], criteria: &F) -> Vec<R> {
    if criteria.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack
        .map(|text| text.to_lowercase().contains(needle_lower))
        .unwrap_or(false)
}

fn lowered_term(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn numeric_input(input: &str) -> Option<f64> {
    if input.trim().is_empty() {
        return None;
    }
    parse_numeric_text(input)
}

/// Inclusive drive-time range in minutes. `max: None` is open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveTimeRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl DriveTimeRange {
    pub fn contains(&self, minutes: f64) -> bool {
        minutes >= self.min && self.max.map_or(true, |max| minutes <= max)
    }

    /// `"30-60"` or `"120+"`.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if let Some(min) = token.strip_suffix('+') {
            return Some(Self {
                min: parse_numeric_text(min)?,
                max: None,
            });
        }
        let (min, max) = token.split_once('-')?;
        let min = parse_numeric_text(min)?;
        let max = parse_numeric_text(max)?;
        Some(Self {
            min: min.min(max),
            max: Some(min.max(max)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DriveTimeFilter {
    #[default]
    Any,
    AtMost(f64),
    /// Matches when the time falls in any of the ranges.
    AnyOf(Vec<DriveTimeRange>),
}

impl DriveTimeFilter {
    /// One plain value is a ceiling; anything else is a union of ranges.
    /// Unreadable selections are skipped.
    pub fn from_selection(selected: &[String]) -> Self {
        let tokens: Vec<&str> = selected
            .iter()
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .collect();

        if let [single] = tokens.as_slice() {
            if !single.contains('-') && !single.ends_with('+') {
                return numeric_input(single).map_or(DriveTimeFilter::Any, DriveTimeFilter::AtMost);
            }
        }

        let ranges: Vec<DriveTimeRange> = tokens
            .iter()
            .filter_map(|token| DriveTimeRange::parse(token))
            .collect();
        if ranges.is_empty() {
            DriveTimeFilter::Any
        } else {
            DriveTimeFilter::AnyOf(ranges)
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DriveTimeFilter::Any)
    }

    pub fn accepts(&self, minutes: f64) -> bool {
        match self {
            DriveTimeFilter::Any => true,
            DriveTimeFilter::AtMost(ceiling) => minutes <= *ceiling,
            DriveTimeFilter::AnyOf(ranges) => ranges.iter().any(|range| range.contains(minutes)),
        }
    }
}

/// Raw values of the spot filter form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpotFilterInput {
    pub text: String,
    pub drive_time: Vec<String>,
    pub species: String,
    pub max_price: String,
    pub reservation: String,
}

/// Active spot filter dimensions, AND-combined.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpotFilter {
    /// Lower-cased; matched against name or city.
    pub text: Option<String>,
    pub drive_time: DriveTimeFilter,
    /// Lower-cased; substring of the raw species list.
    pub species: Option<String>,
    pub max_price: Option<f64>,
    pub reservation: Option<Reservation>,
}

impl SpotFilter {
    pub fn from_input(input: &SpotFilterInput) -> Self {
        Self {
            text: lowered_term(&input.text),
            drive_time: DriveTimeFilter::from_selection(&input.drive_time),
            species: lowered_term(&input.species),
            max_price: numeric_input(&input.max_price),
            reservation: Reservation::parse(&input.reservation),
        }
    }

    fn text_matches(&self, spot: &Spot) -> bool {
        match &self.text {
            Some(term) => {
                contains_ci(spot.name.as_deref(), term) || contains_ci(spot.city.as_deref(), term)
            }
            None => true,
        }
    }

    fn drive_time_matches(&self, spot: &Spot) -> bool {
        self.drive_time.accepts(spot.drive_time.unwrap_or(0.0))
    }

    // Substring over the joined list, so "bass" also hits "Peacock Bass".
    fn species_matches(&self, spot: &Spot) -> bool {
        match &self.species {
            Some(term) => contains_ci(spot.species.as_deref(), term),
            None => true,
        }
    }

    fn price_matches(&self, spot: &Spot) -> bool {
        match self.max_price {
            Some(ceiling) => spot.average_price.unwrap_or(0.0) <= ceiling,
            None => true,
        }
    }

    fn reservation_matches(&self, spot: &Spot) -> bool {
        match self.reservation {
            Some(wanted) => spot.reservation == Some(wanted),
            None => true,
        }
    }
}

impl RecordFilter<Spot> for SpotFilter {
    fn is_empty(&self) -> bool {
        self.text.is_none()
            && !self.drive_time.is_active()
            && self.species.is_none()
            && self.max_price.is_none()
            && self.reservation.is_none()
    }

    fn matches(&self, spot: &Spot) -> bool {
        self.text_matches(spot)
            && self.drive_time_matches(spot)
            && self.species_matches(spot)
            && self.price_matches(spot)
            && self.reservation_matches(spot)
    }
}

/// Raw values of the wishlist filter form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WishlistFilterInput {
    pub text: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub max_price: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WishlistFilter {
    pub text: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WishlistStatus>,
    pub max_price: Option<f64>,
}

impl WishlistFilter {
    pub fn from_input(input: &WishlistFilterInput) -> Self {
        let category = input.category.trim();
        Self {
            text: lowered_term(&input.text),
            category: (!category.is_empty()).then(|| category.to_string()),
            priority: Priority::parse(&input.priority),
            status: WishlistStatus::parse(&input.status),
            max_price: numeric_input(&input.max_price),
        }
    }
}

impl RecordFilter<WishlistItem> for WishlistFilter {
    fn is_empty(&self) -> bool {
        self.text.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.max_price.is_none()
    }

    fn matches(&self, item: &WishlistItem) -> bool {
        let text_ok = match &self.text {
            Some(term) => {
                contains_ci(item.name.as_deref(), term) || contains_ci(item.category.as_deref(), term)
            }
            None => true,
        };
        let category_ok = match &self.category {
            Some(category) => item.category.as_deref() == Some(category.as_str()),
            None => true,
        };
        let priority_ok = self.priority.map_or(true, |p| item.priority == Some(p));
        let status_ok = self.status.map_or(true, |s| item.status == Some(s));
        let price_ok = self
            .max_price
            .map_or(true, |ceiling| item.estimated_price.unwrap_or(0.0) <= ceiling);

        text_ok && category_ok && priority_ok && status_ok && price_ok
    }
}
