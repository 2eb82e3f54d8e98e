use std::borrow::Cow;
use std::cmp::Ordering;

use crate::domain::entities::spot::Spot;
use crate::domain::entities::wishlist::WishlistItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Header arrow for the active column.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + Eq> SortState<K> {
    pub fn ascending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Asc,
        }
    }

    /// Header click: the active column flips, any other column starts ascending.
    pub fn toggled(self, key: K) -> Self {
        if self.key == key {
            Self {
                key,
                direction: self.direction.flipped(),
            }
        } else {
            Self::ascending(key)
        }
    }

    pub fn arrow_for(&self, key: K) -> &'static str {
        if self.key == key {
            self.direction.arrow()
        } else {
            ""
        }
    }
}

/// A record's value under one sort key. `None` means missing.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue<'a> {
    Number(Option<f64>),
    Text(Option<Cow<'a, str>>),
}

/// Records that expose a fixed set of sort keys.
pub trait Sortable {
    type Key: Copy + Eq + std::fmt::Debug;

    fn sort_value(&self, key: Self::Key) -> SortValue<'_>;
}

/// Missing values land last whatever the direction; present values follow it.
pub fn compare_values(left: &SortValue<'_>, right: &SortValue<'_>, direction: SortDirection) -> Ordering {
    match (left, right) {
        (SortValue::Number(a), SortValue::Number(b)) => {
            compare_present(a.as_ref(), b.as_ref(), direction, |x, y| x.total_cmp(y))
        }
        (SortValue::Text(a), SortValue::Text(b)) => {
            compare_present(a.as_deref(), b.as_deref(), direction, |x, y| x.cmp(y))
        }
        // A key always yields one kind of value; mixed pairs only happen on
        // hand-built values and are treated as ties.
        _ => Ordering::Equal,
    }
}

fn compare_present<T: ?Sized>(
    left: Option<&T>,
    right: Option<&T>,
    direction: SortDirection,
    cmp: impl Fn(&T, &T) -> Ordering,
) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => direction.apply(cmp(a, b)),
    }
}

/// Stable in-place sort; equal keys keep their relative order.
pub fn sort_records<R: Sortable>(records: &mut [R], state: &SortState<R::Key>) {
    records.sort_by(|a, b| {
        compare_values(
            &a.sort_value(state.key),
            &b.sort_value(state.key),
            state.direction,
        )
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpotSortKey {
    Name,
    City,
    DriveTime,
    Distance,
    AveragePrice,
    Reservation,
}

impl SpotSortKey {
    pub const ALL: [SpotSortKey; 6] = [
        SpotSortKey::Name,
        SpotSortKey::City,
        SpotSortKey::DriveTime,
        SpotSortKey::Distance,
        SpotSortKey::AveragePrice,
        SpotSortKey::Reservation,
    ];

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            SpotSortKey::DriveTime | SpotSortKey::Distance | SpotSortKey::AveragePrice
        )
    }

    pub fn header(self) -> &'static str {
        match self {
            SpotSortKey::Name => "Nome",
            SpotSortKey::City => "Cidade/UF",
            SpotSortKey::DriveTime => "Tempo",
            SpotSortKey::Distance => "Distância",
            SpotSortKey::AveragePrice => "Preço Médio",
            SpotSortKey::Reservation => "Reserva",
        }
    }
}

/// Distance ascending.
pub fn default_spot_sort() -> SortState<SpotSortKey> {
    SortState::ascending(SpotSortKey::Distance)
}

impl Sortable for Spot {
    type Key = SpotSortKey;

    fn sort_value(&self, key: SpotSortKey) -> SortValue<'_> {
        match key {
            SpotSortKey::Name => SortValue::Text(self.name.as_deref().map(Cow::Borrowed)),
            SpotSortKey::City => SortValue::Text(self.city.as_deref().map(Cow::Borrowed)),
            SpotSortKey::DriveTime => SortValue::Number(self.drive_time),
            SpotSortKey::Distance => SortValue::Number(self.distance),
            SpotSortKey::AveragePrice => SortValue::Number(self.average_price),
            SpotSortKey::Reservation => {
                SortValue::Text(self.reservation.map(|r| Cow::Borrowed(r.label())))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WishlistSortKey {
    Name,
    Category,
    EstimatedPrice,
    Priority,
    Status,
}

impl WishlistSortKey {
    pub const ALL: [WishlistSortKey; 5] = [
        WishlistSortKey::Name,
        WishlistSortKey::Category,
        WishlistSortKey::EstimatedPrice,
        WishlistSortKey::Priority,
        WishlistSortKey::Status,
    ];

    pub fn header(self) -> &'static str {
        match self {
            WishlistSortKey::Name => "Item",
            WishlistSortKey::Category => "Categoria",
            WishlistSortKey::EstimatedPrice => "Preço Estimado",
            WishlistSortKey::Priority => "Prioridade",
            WishlistSortKey::Status => "Status",
        }
    }
}

/// Priority ascending (Alta first).
pub fn default_wishlist_sort() -> SortState<WishlistSortKey> {
    SortState::ascending(WishlistSortKey::Priority)
}

impl Sortable for WishlistItem {
    type Key = WishlistSortKey;

    fn sort_value(&self, key: WishlistSortKey) -> SortValue<'_> {
        match key {
            WishlistSortKey::Name => SortValue::Text(self.name.as_deref().map(Cow::Borrowed)),
            WishlistSortKey::Category => {
                SortValue::Text(self.category.as_deref().map(Cow::Borrowed))
            }
            WishlistSortKey::EstimatedPrice => SortValue::Number(self.estimated_price),
            WishlistSortKey::Priority => {
                SortValue::Number(self.priority.map(|p| f64::from(p.rank())))
            }
            WishlistSortKey::Status => SortValue::Number(self.status.map(|s| f64::from(s.rank()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::spot::SpotId;

    fn priced(id: &str, price: Option<f64>) -> Spot {
        Spot {
            id: SpotId::from(id),
            average_price: price,
            ..Spot::default()
        }
    }

    fn ids(spots: &[Spot]) -> Vec<&str> {
        spots.iter().map(|spot| spot.id.0.as_str()).collect()
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let mut spots = vec![
            priced("a", None),
            priced("b", Some(30.0)),
            priced("c", None),
            priced("d", Some(10.0)),
        ];

        sort_records(&mut spots, &SortState::ascending(SpotSortKey::AveragePrice));
        assert_eq!(ids(&spots), vec!["d", "b", "a", "c"]);

        let descending = SortState::ascending(SpotSortKey::AveragePrice).toggled(SpotSortKey::AveragePrice);
        sort_records(&mut spots, &descending);
        assert_eq!(ids(&spots), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut spots = vec![
            priced("x", Some(5.0)),
            priced("y", Some(1.0)),
            priced("z", Some(5.0)),
        ];

        sort_records(&mut spots, &SortState::ascending(SpotSortKey::AveragePrice));
        assert_eq!(ids(&spots), vec!["y", "x", "z"]);

        sort_records(&mut spots, &SortState::ascending(SpotSortKey::AveragePrice));
        assert_eq!(ids(&spots), vec!["y", "x", "z"]);
    }

    #[test]
    fn text_keys_compare_lexically_with_missing_last() {
        let named = |id: &str, name: Option<&str>| Spot {
            id: SpotId::from(id),
            name: name.map(str::to_string),
            ..Spot::default()
        };
        let mut spots = vec![
            named("1", Some("Lago Azul")),
            named("2", None),
            named("3", Some("Estância")),
            named("4", Some("")),
        ];

        sort_records(&mut spots, &SortState::ascending(SpotSortKey::Name));
        assert_eq!(ids(&spots), vec!["4", "3", "1", "2"]);
    }

    #[test]
    fn toggle_flips_active_key_and_resets_new_key() {
        let state = default_spot_sort();
        assert_eq!(state.key, SpotSortKey::Distance);
        assert_eq!(state.direction, SortDirection::Asc);

        let flipped = state.toggled(SpotSortKey::Distance);
        assert_eq!(flipped.direction, SortDirection::Desc);

        let switched = flipped.toggled(SpotSortKey::Name);
        assert_eq!(switched, SortState::ascending(SpotSortKey::Name));
        assert_eq!(switched.arrow_for(SpotSortKey::Name), " ▲");
        assert_eq!(switched.arrow_for(SpotSortKey::Distance), "");
    }

    #[test]
    fn wishlist_priority_sorts_by_rank_with_unknown_last() {
        use crate::domain::entities::wishlist::Priority;

        let item = |id: &str, priority: Option<Priority>| WishlistItem {
            id: id.to_string(),
            priority,
            ..WishlistItem::default()
        };
        let mut items = vec![
            item("low", Some(Priority::Low)),
            item("none", None),
            item("high", Some(Priority::High)),
            item("mid", Some(Priority::Medium)),
        ];

        sort_records(&mut items, &default_wishlist_sort());
        let order: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(order, vec!["high", "mid", "low", "none"]);
    }

    #[test]
    fn numeric_keys_are_flagged() {
        let numeric: Vec<_> = SpotSortKey::ALL
            .into_iter()
            .filter(|key| key.is_numeric())
            .collect();
        assert_eq!(
            numeric,
            vec![
                SpotSortKey::DriveTime,
                SpotSortKey::Distance,
                SpotSortKey::AveragePrice
            ]
        );
    }
}
