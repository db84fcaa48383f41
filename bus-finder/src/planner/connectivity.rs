//! Whether a single route can carry a traveller between two stops.
//!
//! A route is traversable forward along its stop sequence, and backward
//! along either its authored backward sequence or, when none exists, the
//! forward sequence reversed.

use crate::domain::{Direction, JourneySegment, Route};
use crate::stops::{locate, normalize};

/// Returns true if `route` can carry a traveller from `from` to `to`.
///
/// Inputs are free text and are normalized here.
///
/// # Examples
///
/// ```
/// use bus_finder::domain::{Route, RouteId};
/// use bus_finder::planner::can_travel;
///
/// let route = Route::new(
///     RouteId::new("R1").unwrap(),
///     vec!["Gulistan".into(), "Farmgate".into(), "Mirpur 10".into()],
/// )
/// .unwrap();
///
/// assert!(can_travel(&route, "Gulistan", "Mirpur 10"));
/// // No backward sequence: the forward one can be ridden in reverse
/// assert!(can_travel(&route, "Mirpur 10", "Gulistan"));
/// assert!(!can_travel(&route, "Farmgate", "Farmgate"));
/// ```
pub fn can_travel(route: &Route, from: &str, to: &str) -> bool {
    TraversableRoute::new(route)
        .ride(&normalize(from), &normalize(to))
        .is_some()
}

/// One traversable direction of a route, with its labels pre-normalized.
#[derive(Debug, Clone)]
pub(crate) struct Traversal<'a> {
    pub direction: Direction,
    pub labels: Vec<&'a str>,
    pub normalized: Vec<String>,
}

impl<'a> Traversal<'a> {
    fn new(direction: Direction, labels: Vec<&'a str>) -> Self {
        let normalized = labels.iter().map(|l| normalize(l)).collect();
        Self {
            direction,
            labels,
            normalized,
        }
    }

    /// Index of the stop matching a normalized query.
    pub fn locate(&self, query: &str) -> Option<usize> {
        locate(&self.normalized, query)
    }
}

/// A ride along one route, between two located stops.
#[derive(Debug, Clone)]
pub(crate) struct Ride<'a> {
    pub route: &'a Route,
    pub direction: Direction,
    pub board: &'a str,
    pub alight: &'a str,
    pub stops: usize,
}

impl Ride<'_> {
    pub fn to_segment(&self) -> JourneySegment {
        JourneySegment {
            route_id: self.route.id().clone(),
            route_name: self.route.display_name().to_string(),
            from_stop: self.board.to_string(),
            to_stop: self.alight.to_string(),
            direction: self.direction,
            stops: self.stops,
        }
    }
}

/// A route with its traversable directions indexed for repeated lookups.
#[derive(Debug, Clone)]
pub(crate) struct TraversableRoute<'a> {
    pub route: &'a Route,
    pub traversals: Vec<Traversal<'a>>,
}

impl<'a> TraversableRoute<'a> {
    pub fn new(route: &'a Route) -> Self {
        let forward: Vec<&str> = route.stop_sequence().iter().map(String::as_str).collect();

        let backward: Vec<&str> = match route.reverse_stop_sequence() {
            Some(stops) => stops.iter().map(String::as_str).collect(),
            None => forward.iter().rev().copied().collect(),
        };

        Self {
            route,
            traversals: vec![
                Traversal::new(Direction::Forward, forward),
                Traversal::new(Direction::Backward, backward),
            ],
        }
    }

    /// First traversable direction in which `from` precedes `to`.
    ///
    /// Both arguments must already be normalized.
    pub fn ride(&self, from: &str, to: &str) -> Option<Ride<'a>> {
        self.traversals.iter().find_map(|t| {
            let board = t.locate(from)?;
            let alight = t.locate(to)?;
            (board < alight).then(|| Ride {
                route: self.route,
                direction: t.direction,
                board: t.labels[board],
                alight: t.labels[alight],
                stops: alight - board,
            })
        })
    }

    /// Returns true if a normalized query matches a stop in any direction.
    pub fn serves(&self, stop: &str) -> bool {
        self.traversals.iter().any(|t| t.locate(stop).is_some())
    }
}
