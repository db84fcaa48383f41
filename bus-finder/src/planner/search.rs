//! Route search over the in-memory dataset.
//!
//! Finds routes connecting two free-text stop names: directly, via one
//! shared transfer stop, via known interchange hubs, or via a bounded
//! multi-hop walk. All searches are greedy and first-found; result order
//! is discovery order.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::ControlFlow;

use tracing::{debug, trace};

use crate::domain::{JourneyPlan, Route, RouteId};
use crate::stops::normalize;

use super::config::PlannerConfig;
use super::connectivity::{Ride, TraversableRoute};

/// A normalized (from, to) query. Blank queries never get this far.
#[derive(Debug, Clone)]
struct Query {
    from: String,
    to: String,
}

impl Query {
    fn new(from: &str, to: &str) -> Option<Self> {
        let from = normalize(from);
        let to = normalize(to);
        if from.is_empty() || to.is_empty() {
            return None;
        }
        Some(Self { from, to })
    }
}

/// Two rides meeting at a shared stop.
#[derive(Debug, Clone)]
struct TransferPair<'a> {
    first: Ride<'a>,
    second: Ride<'a>,
}

/// Ordered, id-deduplicated route accumulator with a cap.
struct RouteCollector<'a> {
    routes: Vec<&'a Route>,
    seen: HashSet<&'a RouteId>,
    cap: usize,
}

impl<'a> RouteCollector<'a> {
    fn new(cap: usize) -> Self {
        Self {
            routes: Vec::new(),
            seen: HashSet::new(),
            cap,
        }
    }

    fn push(&mut self, route: &'a Route) {
        if !self.is_full() && self.seen.insert(route.id()) {
            self.routes.push(route);
        }
    }

    fn is_full(&self) -> bool {
        self.routes.len() >= self.cap
    }

    fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    fn into_vec(self) -> Vec<&'a Route> {
        self.routes
    }
}

/// Route planner over a read-only route collection.
pub struct Planner<'a> {
    routes: Vec<TraversableRoute<'a>>,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(routes: &'a [Route], config: &'a PlannerConfig) -> Self {
        Self {
            routes: routes.iter().map(TraversableRoute::new).collect(),
            config,
        }
    }

    /// Routes that can carry a traveller directly from `from` to `to`.
    ///
    /// Preserves dataset order. Blank queries yield no routes.
    pub fn search_direct(&self, from: &str, to: &str) -> Vec<&'a Route> {
        let Some(query) = Query::new(from, to) else {
            return Vec::new();
        };

        let results: Vec<&'a Route> = self
            .routes
            .iter()
            .filter(|r| r.ride(&query.from, &query.to).is_some())
            .map(|r| r.route)
            .collect();

        debug!(
            from = %query.from,
            to = %query.to,
            found = results.len(),
            "Direct search complete"
        );
        results
    }

    /// Routes connecting `from` and `to` with one transfer.
    ///
    /// Pairs of routes sharing an intermediate stop come first, in
    /// discovery order. When no pair connects, falls back to routes
    /// running through the configured interchange hubs.
    pub fn search_with_transfers(&self, from: &str, to: &str) -> Vec<&'a Route> {
        let Some(query) = Query::new(from, to) else {
            return Vec::new();
        };

        let mut found = RouteCollector::new(self.config.max_transfer_routes);
        let _ = self.for_each_transfer_pair(&query, |pair| {
            found.push(pair.first.route);
            found.push(pair.second.route);
            if found.is_full() {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        if found.is_empty() {
            debug!(from = %query.from, to = %query.to, "No transfer pair, trying hubs");
            for route in self.hub_routes(&query) {
                found.push(route);
            }
        }

        let results = found.into_vec();
        debug!(
            from = %query.from,
            to = %query.to,
            found = results.len(),
            "Transfer search complete"
        );
        results
    }

    /// Routes for a journey with up to two transfers.
    ///
    /// Direct routes are returned as-is when any exist. Otherwise each
    /// stop after the origin on a route serving `from` is tried as a
    /// transfer point, then (if nothing connects) a second intermediate
    /// stop is added before giving up.
    pub fn find_multi_hop_journey(&self, from: &str, to: &str) -> Vec<&'a Route> {
        let direct = self.search_direct(from, to);
        if !direct.is_empty() {
            return direct;
        }

        let Some(query) = Query::new(from, to) else {
            return Vec::new();
        };

        let starts: Vec<&TraversableRoute<'a>> = self
            .routes
            .iter()
            .filter(|r| r.serves(&query.from))
            .collect();

        let mut reach = ReachIndex::default();
        let mut found = RouteCollector::new(self.config.max_multi_hop_routes);

        let _ = self.one_transfer(&query, &starts, &mut reach, &mut found);
        if found.is_empty() {
            debug!(from = %query.from, to = %query.to, "No single transfer, trying two");
            let _ = self.two_transfers(&query, &starts, &mut reach, &mut found);
        }

        let results = found.into_vec();
        debug!(
            from = %query.from,
            to = %query.to,
            found = results.len(),
            "Multi-hop search complete"
        );
        results
    }

    /// Build an ordered ride plan from `from` to `to`.
    ///
    /// A direct route gives a single-segment plan; otherwise the first
    /// connecting route pair gives a two-segment plan meeting at their
    /// shared stop. Returns `None` when neither exists.
    pub fn create_journey_plan(&self, from: &str, to: &str) -> Option<JourneyPlan> {
        let query = Query::new(from, to)?;

        let rides = match self
            .routes
            .iter()
            .find_map(|r| r.ride(&query.from, &query.to))
        {
            Some(ride) => vec![ride],
            None => {
                let mut first = None;
                let _ = self.for_each_transfer_pair(&query, |pair| {
                    first = Some(pair);
                    ControlFlow::Break(())
                });
                let pair = first?;
                vec![pair.first, pair.second]
            }
        };

        let segments = rides.iter().map(Ride::to_segment).collect();
        match JourneyPlan::new(segments) {
            Ok(plan) => {
                let estimate = plan.describe_estimate(
                    self.config.minutes_per_stop,
                    self.config.minutes_per_transfer,
                );
                Some(plan.with_estimate(estimate))
            }
            Err(e) => {
                debug!(error = %e, "Discarding inconsistent journey plan");
                None
            }
        }
    }

    /// Look up a route by id.
    pub fn route(&self, id: &str) -> Option<&'a Route> {
        self.routes
            .iter()
            .map(|r| r.route)
            .find(|r| r.id().as_str() == id)
    }

    /// Routes with a stop whose normalized label equals or contains
    /// `stop_name`, or is contained in it.
    pub fn buses_at_stop(&self, stop_name: &str) -> Vec<&'a Route> {
        let query = normalize(stop_name);
        if query.is_empty() {
            return Vec::new();
        }

        self.routes
            .iter()
            .map(|r| r.route)
            .filter(|r| {
                r.all_stops().any(|stop| {
                    let stop = normalize(stop);
                    !stop.is_empty() && (stop.contains(&query) || query.contains(&stop))
                })
            })
            .collect()
    }

    /// Sorted, distinct, non-blank service types.
    pub fn service_types(&self) -> Vec<String> {
        self.routes
            .iter()
            .filter_map(|r| r.route.service_type())
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Visit connecting route pairs in discovery order.
    ///
    /// For each (start, end) pair of distinct routes serving the origin
    /// and destination respectively, the shared stops (other than the
    /// origin and destination) are tried in the start route's order; the
    /// first one both rides pass through yields a pair.
    fn for_each_transfer_pair<F>(&self, query: &Query, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(TransferPair<'a>) -> ControlFlow<()>,
    {
        let starts: Vec<&TraversableRoute<'a>> = self
            .routes
            .iter()
            .filter(|r| r.serves(&query.from))
            .collect();

        let ends: Vec<(&TraversableRoute<'a>, HashSet<&str>)> = self
            .routes
            .iter()
            .filter(|r| r.serves(&query.to))
            .map(|r| (r, stop_set(r)))
            .collect();

        trace!(
            starts = starts.len(),
            ends = ends.len(),
            "Searching transfer pairs"
        );

        for start in &starts {
            for (end, end_stops) in &ends {
                if start.route.id() == end.route.id() {
                    continue;
                }

                let mut tried: HashSet<&String> = HashSet::new();
                let shared = start
                    .traversals
                    .iter()
                    .flat_map(|t| t.normalized.iter())
                    .filter(|stop| **stop != query.from && **stop != query.to)
                    .filter(|stop| end_stops.contains(stop.as_str()))
                    .filter(|stop| tried.insert(*stop));

                for transfer in shared {
                    let Some(first) = start.ride(&query.from, transfer) else {
                        continue;
                    };
                    let Some(second) = end.ride(transfer, &query.to) else {
                        continue;
                    };

                    trace!(
                        first = %start.route.id(),
                        second = %end.route.id(),
                        transfer = %transfer,
                        "Found transfer pair"
                    );
                    visit(TransferPair { first, second })?;
                    break;
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Routes that run from the origin through a hub to the destination,
    /// at most one per hub, in hub priority order.
    fn hub_routes(&self, query: &Query) -> Vec<&'a Route> {
        let mut found = RouteCollector::new(self.config.max_hub_routes);

        for hub in &self.config.hubs {
            let hub = normalize(hub);
            if hub.is_empty() {
                continue;
            }

            let accepted = self.routes.iter().find(|r| {
                !found.seen.contains(r.route.id())
                    && r.serves(&hub)
                    && r.ride(&query.from, &hub).is_some()
                    && r.ride(&hub, &query.to).is_some()
            });

            if let Some(r) = accepted {
                trace!(hub = %hub, route = %r.route.id(), "Hub route accepted");
                found.push(r.route);
                if found.is_full() {
                    break;
                }
            }
        }

        found.into_vec()
    }

    /// Try every stop after the origin as a single transfer point.
    fn one_transfer(
        &self,
        query: &Query,
        starts: &[&TraversableRoute<'a>],
        reach: &mut ReachIndex,
        found: &mut RouteCollector<'a>,
    ) -> ControlFlow<()> {
        for start in starts {
            for traversal in &start.traversals {
                let Some(board) = traversal.locate(&query.from) else {
                    continue;
                };

                for transfer in &traversal.normalized[board + 1..] {
                    let connecting =
                        self.connecting_routes(reach, transfer, &query.to, &[start.route.id()]);
                    if connecting.is_empty() {
                        continue;
                    }

                    found.push(start.route);
                    for route in connecting {
                        found.push(route);
                    }
                    if found.is_full() {
                        return ControlFlow::Break(());
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Try pairs of intermediate stops: one on a route serving the origin,
    /// a second further along a route boarded at the first.
    fn two_transfers(
        &self,
        query: &Query,
        starts: &[&TraversableRoute<'a>],
        reach: &mut ReachIndex,
        found: &mut RouteCollector<'a>,
    ) -> ControlFlow<()> {
        for start in starts {
            for traversal in &start.traversals {
                let Some(board) = traversal.locate(&query.from) else {
                    continue;
                };

                for first_transfer in &traversal.normalized[board + 1..] {
                    for middle in &self.routes {
                        if middle.route.id() == start.route.id() {
                            continue;
                        }

                        for middle_traversal in &middle.traversals {
                            let Some(middle_board) = middle_traversal.locate(first_transfer)
                            else {
                                continue;
                            };

                            let exclude = [start.route.id(), middle.route.id()];
                            let hit = middle_traversal.normalized[middle_board + 1..]
                                .iter()
                                .map(|second| {
                                    self.connecting_routes(reach, second, &query.to, &exclude)
                                })
                                .find(|connecting| !connecting.is_empty());

                            let Some(connecting) = hit else {
                                continue;
                            };

                            found.push(start.route);
                            found.push(middle.route);
                            for route in connecting {
                                found.push(route);
                            }
                            if found.is_full() {
                                return ControlFlow::Break(());
                            }
                        }
                    }
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Up to `max_connections_per_transfer` routes, other than `exclude`,
    /// that ride from `stop` to `destination`.
    fn connecting_routes(
        &self,
        reach: &mut ReachIndex,
        stop: &str,
        destination: &str,
        exclude: &[&RouteId],
    ) -> Vec<&'a Route> {
        let reaching = reach.routes_from(stop, || {
            self.routes
                .iter()
                .enumerate()
                .filter(|(_, r)| r.ride(stop, destination).is_some())
                .map(|(i, _)| i)
                .collect()
        });

        reaching
            .iter()
            .map(|&i| self.routes[i].route)
            .filter(|r| !exclude.contains(&r.id()))
            .take(self.config.max_connections_per_transfer)
            .collect()
    }
}

/// Memo of which routes (by index) reach the destination from a stop.
#[derive(Default)]
struct ReachIndex {
    by_stop: HashMap<String, Vec<usize>>,
}

impl ReachIndex {
    fn routes_from<F>(&mut self, stop: &str, compute: F) -> &[usize]
    where
        F: FnOnce() -> Vec<usize>,
    {
        self.by_stop
            .entry(stop.to_string())
            .or_insert_with(compute)
    }
}

/// Normalized labels of all stops on a route.
fn stop_set<'r>(route: &'r TraversableRoute<'_>) -> HashSet<&'r str> {
    route
        .traversals
        .iter()
        .flat_map(|t| t.normalized.iter().map(String::as_str))
        .collect()
}
