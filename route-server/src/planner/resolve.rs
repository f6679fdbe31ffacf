//! Stop name resolution.
//!
//! Users type stop names, optionally qualified by road as shown in the
//! autocomplete list: "Sule (Maha Bandula Road)". Names may be English or
//! Myanmar and are matched case-insensitively.

use std::fmt;

use crate::domain::Stop;
use crate::store::NetworkReader;

/// A structured stop lookup: a name and an optional road qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopQuery {
    pub name: String,
    pub road: Option<String>,
}

impl StopQuery {
    pub fn new(name: impl Into<String>, road: Option<String>) -> Self {
        Self {
            name: name.into(),
            road,
        }
    }

    /// Parse a "Name (Road)" string.
    ///
    /// The split happens at the last `(`, so names that themselves contain
    /// parentheses keep them. Without a trailing `)` the whole input is the
    /// name.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_server::planner::StopQuery;
    ///
    /// let q = StopQuery::parse("Central (Main Road)");
    /// assert_eq!(q.name, "Central");
    /// assert_eq!(q.road.as_deref(), Some("Main Road"));
    ///
    /// let q = StopQuery::parse("Central");
    /// assert_eq!(q.road, None);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if raw.ends_with(')')
            && let Some(open) = raw.rfind('(')
        {
            let name = raw[..open].trim();
            let road = raw[open + 1..raw.len() - 1].trim();
            let road = (!road.is_empty()).then(|| road.to_string());
            return Self::new(name, road);
        }

        Self::new(raw, None)
    }
}

impl fmt::Display for StopQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.road {
            Some(road) => write!(f, "{} ({})", self.name, road),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Case-insensitive equality.
fn same_text(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn road_matches(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|road| same_text(road, wanted))
}

fn road_is_blank(stored: Option<&str>) -> bool {
    stored.is_none_or(str::is_empty)
}

/// Whether the stop's name matches in either language.
fn name_matches(stop: &Stop, name: &str) -> bool {
    same_text(&stop.name_en, name) || same_text(&stop.name_mm, name)
}

/// Whether (name, road) matches in either language, pairing each
/// language's name with the same language's road.
fn name_and_road_match(stop: &Stop, name: &str, road: &str) -> bool {
    (same_text(&stop.name_en, name) && road_matches(stop.road_en.as_deref(), road))
        || (same_text(&stop.name_mm, name) && road_matches(stop.road_mm.as_deref(), road))
}

/// Whether the stop matches `name` in a language where it has no road.
fn name_without_road(stop: &Stop, name: &str) -> bool {
    (same_text(&stop.name_en, name) && road_is_blank(stop.road_en.as_deref()))
        || (same_text(&stop.name_mm, name) && road_is_blank(stop.road_mm.as_deref()))
}

/// Resolve a query to a stop.
///
/// With a road qualifier, an exact (name, road) match wins; without one,
/// a stop that has no road wins. Either way, a plain name match is the
/// fallback. Among several candidates the lowest stop id is returned.
pub fn resolve_stop<'a, R: NetworkReader + ?Sized>(
    reader: &'a R,
    query: &StopQuery,
) -> Option<&'a Stop> {
    let name = query.name.trim();
    if name.is_empty() {
        return None;
    }

    // Stops are ordered by id, so the first hit is the lowest id.
    let stops = reader.stops();
    let preferred = match query.road.as_deref() {
        Some(road) => stops
            .iter()
            .find(|s| name_and_road_match(s, name, road)),
        None => stops.iter().find(|s| name_without_road(s, name)),
    };

    preferred.or_else(|| stops.iter().find(|s| name_matches(s, name)))
}
