//! Search configuration for the route planner.

/// Interchange hubs tried, in priority order, when no two-route transfer
/// is found.
const DEFAULT_HUBS: [&str; 10] = [
    "Gulistan",
    "Farmgate",
    "Mohakhali",
    "Gabtoli",
    "Sayedabad",
    "Jatrabari",
    "Motijheel",
    "Mirpur 10",
    "Shahbag",
    "Uttara",
];

/// Configuration parameters for route search.
///
/// The caps keep the heuristic searches bounded and first-found; they
/// are not tuning knobs for optimality.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Interchange hub names, highest priority first.
    pub hubs: Vec<String>,

    /// Maximum number of routes returned by transfer search.
    pub max_transfer_routes: usize,

    /// Maximum number of routes accepted from the hub fallback.
    pub max_hub_routes: usize,

    /// Maximum connecting routes accepted per transfer candidate
    /// during multi-hop search.
    pub max_connections_per_transfer: usize,

    /// Maximum number of routes returned by multi-hop search.
    pub max_multi_hop_routes: usize,

    /// Assumed riding time per stop (minutes), for plan estimates.
    pub minutes_per_stop: u32,

    /// Assumed time per transfer (minutes), for plan estimates.
    pub minutes_per_transfer: u32,
}

impl PlannerConfig {
    /// Create a config with the default hubs and caps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the interchange hub list.
    pub fn with_hubs<I, S>(mut self, hubs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hubs = hubs.into_iter().map(Into::into).collect();
        self
    }

    /// Set the result caps for transfer, hub and multi-hop search.
    pub fn with_caps(
        mut self,
        max_transfer_routes: usize,
        max_hub_routes: usize,
        max_connections_per_transfer: usize,
        max_multi_hop_routes: usize,
    ) -> Self {
        self.max_transfer_routes = max_transfer_routes;
        self.max_hub_routes = max_hub_routes;
        self.max_connections_per_transfer = max_connections_per_transfer;
        self.max_multi_hop_routes = max_multi_hop_routes;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            hubs: DEFAULT_HUBS.iter().map(|h| h.to_string()).collect(),
            max_transfer_routes: 5,
            max_hub_routes: 3,
            max_connections_per_transfer: 3,
            max_multi_hop_routes: 10,
            minutes_per_stop: 3,
            minutes_per_transfer: 10,
        }
    }
}
