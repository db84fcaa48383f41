//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{JourneyPlan, JourneySegment, Route};
use crate::finder::{SearchKind, SearchOutcome};
use crate::history::SearchHistoryEntry;

/// Request for stop-name suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Partial stop name typed so far
    #[serde(default)]
    pub q: String,

    /// Maximum number of suggestions (defaults to the configured limit)
    pub limit: Option<usize>,
}

/// Ranked stop-name suggestions.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Request for routes serving a stop.
#[derive(Debug, Deserialize)]
pub struct StopRoutesRequest {
    #[serde(default)]
    pub name: String,
}

/// An origin/destination pair.
#[derive(Debug, Deserialize)]
pub struct TripRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

/// A bus route in responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResult {
    pub id: String,

    /// Name to show (English name, else name, else id)
    pub name: String,

    pub name_en: Option<String>,
    pub name_bn: Option<String>,
    pub service_type: Option<String>,

    /// Forward stop sequence
    pub stops: Vec<String>,

    /// Authored backward stop sequence, if any
    pub backward_stops: Option<Vec<String>>,
}

impl From<&Route> for RouteResult {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id().to_string(),
            name: route.display_name().to_string(),
            name_en: route.name_en().map(str::to_string),
            name_bn: route.name_bn().map(str::to_string),
            service_type: route.service_type().map(str::to_string),
            stops: route.stop_sequence().to_vec(),
            backward_stops: route.reverse_stop_sequence().map(<[String]>::to_vec),
        }
    }
}

/// A list of routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

impl RoutesResponse {
    pub fn from_routes(routes: &[Route]) -> Self {
        Self {
            routes: routes.iter().map(RouteResult::from).collect(),
        }
    }
}

/// Result of a direct-then-multi-hop search.
#[derive(Debug, Serialize)]
pub struct ConnectionsResponse {
    pub kind: SearchKind,

    /// Human-readable description of `kind`
    pub label: String,

    pub routes: Vec<RouteResult>,
}

impl From<&SearchOutcome> for ConnectionsResponse {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            kind: outcome.kind,
            label: outcome.kind.to_string(),
            routes: outcome.routes.iter().map(RouteResult::from).collect(),
        }
    }
}

/// One ride of a journey plan.
#[derive(Debug, Serialize, Deserialize)]
pub struct SegmentResult {
    pub route_id: String,
    pub route_name: String,
    pub from_stop: String,
    pub to_stop: String,
    pub direction: String,
    pub stops: usize,
}

impl From<&JourneySegment> for SegmentResult {
    fn from(segment: &JourneySegment) -> Self {
        Self {
            route_id: segment.route_id.to_string(),
            route_name: segment.route_name.clone(),
            from_stop: segment.from_stop.clone(),
            to_stop: segment.to_stop.clone(),
            direction: segment.direction.to_string(),
            stops: segment.stops,
        }
    }
}

/// A journey plan in responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct JourneyResult {
    pub origin: String,
    pub destination: String,
    pub segments: Vec<SegmentResult>,
    pub total_stops: usize,
    pub transfers: usize,
    pub estimate: Option<String>,
}

impl From<&JourneyPlan> for JourneyResult {
    fn from(plan: &JourneyPlan) -> Self {
        Self {
            origin: plan.origin().to_string(),
            destination: plan.destination().to_string(),
            segments: plan.segments().iter().map(SegmentResult::from).collect(),
            total_stops: plan.total_stops(),
            transfers: plan.transfer_count(),
            estimate: plan.estimate().map(str::to_string),
        }
    }
}

/// Distinct service types.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceTypesResponse {
    pub service_types: Vec<String>,
}

/// A remembered search.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub id: u64,
    pub from: String,
    pub to: String,

    /// RFC 3339 timestamp
    pub searched_at: String,
}

impl From<&SearchHistoryEntry> for HistoryResult {
    fn from(entry: &SearchHistoryEntry) -> Self {
        Self {
            id: entry.id,
            from: entry.from_location.clone(),
            to: entry.to_location.clone(),
            searched_at: entry.timestamp.to_rfc3339(),
        }
    }
}

/// Recent searches, newest first.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub searches: Vec<HistoryResult>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
