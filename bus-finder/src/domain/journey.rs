//! Journey plan types.
//!
//! A `JourneyPlan` is an ordered list of rides, each on a single route,
//! connecting an origin stop to a destination stop with zero or more
//! transfers in between.

use std::fmt;

use serde::Serialize;

use super::{DomainError, RouteId};
use crate::stops::normalize;

/// Which way along a route a ride travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Along the forward stop sequence
    Forward,
    /// Along the explicit backward sequence, or the forward sequence reversed
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

/// One ride on one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneySegment {
    /// Route ridden
    pub route_id: RouteId,
    /// Route display name
    pub route_name: String,
    /// Boarding stop, as labelled on the route
    pub from_stop: String,
    /// Alighting stop, as labelled on the route
    pub to_stop: String,
    /// Direction of travel along the route
    pub direction: Direction,
    /// Number of stops travelled (alight index minus board index)
    pub stops: usize,
}

/// A complete trip from origin to destination.
///
/// # Invariants
///
/// - At least one segment
/// - Consecutive segments connect: the alighting stop of one segment
///   normalizes to the boarding stop of the next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JourneyPlan {
    segments: Vec<JourneySegment>,
    estimate: Option<String>,
}

impl JourneyPlan {
    /// Constructs a plan from ordered segments.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the list is empty or two consecutive segments
    /// don't meet at the same stop.
    pub fn new(segments: Vec<JourneySegment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        for window in segments.windows(2) {
            let alight = &window[0].to_stop;
            let board = &window[1].from_stop;
            if normalize(alight) != normalize(board) {
                return Err(DomainError::SegmentsNotConnected(
                    alight.clone(),
                    board.clone(),
                ));
            }
        }

        Ok(Self {
            segments,
            estimate: None,
        })
    }

    /// Attach a human-readable time/transfer estimate.
    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimate = Some(estimate.into());
        self
    }

    pub fn segments(&self) -> &[JourneySegment] {
        &self.segments
    }

    pub fn estimate(&self) -> Option<&str> {
        self.estimate.as_deref()
    }

    /// Returns the boarding stop of the first segment.
    pub fn origin(&self) -> &str {
        &self.segments[0].from_stop
    }

    /// Returns the alighting stop of the last segment.
    pub fn destination(&self) -> &str {
        &self.segments[self.segments.len() - 1].to_stop
    }

    /// Number of segments in the plan.
    pub fn total_stops(&self) -> usize {
        self.segments.len()
    }

    /// Returns the number of transfers between routes.
    pub fn transfer_count(&self) -> usize {
        self.segments.len() - 1
    }

    /// Returns true if the plan is a single ride.
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }

    /// Total number of stops travelled across all segments.
    pub fn stops_travelled(&self) -> usize {
        self.segments.iter().map(|s| s.stops).sum()
    }

    /// Rough travel estimate, e.g. "About 21 min, 1 transfer".
    pub fn describe_estimate(&self, minutes_per_stop: u32, minutes_per_transfer: u32) -> String {
        let transfers = self.transfer_count();
        let minutes = self.stops_travelled() as u32 * minutes_per_stop
            + transfers as u32 * minutes_per_transfer;

        match transfers {
            0 => format!("About {minutes} min, direct"),
            1 => format!("About {minutes} min, 1 transfer"),
            n => format!("About {minutes} min, {n} transfers"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(route: &str, from: &str, to: &str, stops: usize) -> JourneySegment {
        JourneySegment {
            route_id: RouteId::new(route).unwrap(),
            route_name: route.to_string(),
            from_stop: from.to_string(),
            to_stop: to.to_string(),
            direction: Direction::Forward,
            stops,
        }
    }

    #[test]
    fn empty_plan_rejected() {
        assert_eq!(JourneyPlan::new(vec![]), Err(DomainError::EmptyJourney));
    }

    #[test]
    fn disconnected_segments_rejected() {
        let result = JourneyPlan::new(vec![
            segment("R1", "Gulistan", "Farmgate", 2),
            segment("R2", "Shahbag", "Mirpur 10", 3),
        ]);
        assert!(matches!(
            result,
            Err(DomainError::SegmentsNotConnected(_, _))
        ));
    }

    #[test]
    fn segments_connect_modulo_normalization() {
        let plan = JourneyPlan::new(vec![
            segment("R1", "Gulistan", "Farmgate.", 2),
            segment("R2", "farmgate", "Mirpur 10", 3),
        ])
        .unwrap();

        assert_eq!(plan.origin(), "Gulistan");
        assert_eq!(plan.destination(), "Mirpur 10");
        assert_eq!(plan.total_stops(), 2);
        assert_eq!(plan.transfer_count(), 1);
        assert_eq!(plan.stops_travelled(), 5);
        assert!(!plan.is_direct());
    }

    #[test]
    fn estimate_text() {
        let direct = JourneyPlan::new(vec![segment("R1", "A", "C", 2)]).unwrap();
        assert_eq!(direct.describe_estimate(3, 10), "About 6 min, direct");

        let one = JourneyPlan::new(vec![segment("R1", "A", "C", 2), segment("R2", "C", "E", 2)])
            .unwrap();
        assert_eq!(one.describe_estimate(3, 10), "About 22 min, 1 transfer");

        let two = JourneyPlan::new(vec![
            segment("R1", "A", "B", 1),
            segment("R2", "B", "C", 1),
            segment("R3", "C", "D", 1),
        ])
        .unwrap();
        assert_eq!(two.describe_estimate(3, 10), "About 29 min, 2 transfers");
    }

    #[test]
    fn estimate_is_optional() {
        let plan = JourneyPlan::new(vec![segment("R1", "A", "C", 2)]).unwrap();
        assert!(plan.estimate().is_none());
        let plan = plan.with_estimate("About 6 min, direct");
        assert_eq!(plan.estimate(), Some("About 6 min, direct"));
    }
}
