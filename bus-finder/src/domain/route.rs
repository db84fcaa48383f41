//! Bus route types.

use std::fmt;

use serde::Serialize;

use super::DomainError;

/// Opaque, stable identifier of a bus route.
///
/// Route equality and deduplication are by id only.
///
/// # Examples
///
/// ```
/// use bus_finder::domain::RouteId;
///
/// let id = RouteId::new("R1").unwrap();
/// assert_eq!(id.as_str(), "R1");
///
/// // Blank ids are rejected
/// assert!(RouteId::new("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    /// Create a route id, rejecting blank strings.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidRoute("route id cannot be blank"));
        }
        Ok(RouteId(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A bus line with its ordered stop sequences.
///
/// # Invariants
///
/// - The forward stop sequence has at least one stop
/// - An explicit backward sequence, when present, is non-empty
///
/// Routes are immutable once built; the dataset is only ever replaced
/// wholesale.
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    id: RouteId,
    name: String,
    name_en: Option<String>,
    name_bn: Option<String>,
    service_type: Option<String>,
    stop_sequence: Vec<String>,
    reverse_stop_sequence: Option<Vec<String>>,
}

impl Route {
    /// Create a route with a forward stop sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `stops` is empty.
    pub fn new(id: RouteId, stops: Vec<String>) -> Result<Self, DomainError> {
        if stops.is_empty() {
            return Err(DomainError::InvalidRoute(
                "forward stop sequence must have at least one stop",
            ));
        }

        Ok(Self {
            id,
            name: String::new(),
            name_en: None,
            name_bn: None,
            service_type: None,
            stop_sequence: stops,
            reverse_stop_sequence: None,
        })
    }

    /// Attach an explicit backward stop sequence.
    ///
    /// An empty list leaves the route without one, so the implicit
    /// reverse of the forward sequence applies.
    pub fn with_reverse_stops(mut self, stops: Vec<String>) -> Self {
        self.reverse_stop_sequence = (!stops.is_empty()).then_some(stops);
        self
    }

    /// Set the display names. `name` is the legacy fallback.
    pub fn with_names(
        mut self,
        name: impl Into<String>,
        name_en: Option<String>,
        name_bn: Option<String>,
    ) -> Self {
        self.name = name.into();
        self.name_en = name_en;
        self.name_bn = name_bn;
        self
    }

    /// Set the service category.
    pub fn with_service_type(mut self, service_type: Option<String>) -> Self {
        self.service_type = service_type;
        self
    }

    pub fn id(&self) -> &RouteId {
        &self.id
    }

    pub fn name_en(&self) -> Option<&str> {
        self.name_en.as_deref()
    }

    pub fn name_bn(&self) -> Option<&str> {
        self.name_bn.as_deref()
    }

    pub fn service_type(&self) -> Option<&str> {
        self.service_type.as_deref()
    }

    /// Name for display: English name, then legacy name, then the id.
    pub fn display_name(&self) -> &str {
        match self.name_en.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ if !self.name.trim().is_empty() => self.name.as_str(),
            _ => self.id.as_str(),
        }
    }

    /// The forward stop sequence. Never empty.
    pub fn stop_sequence(&self) -> &[String] {
        &self.stop_sequence
    }

    /// The explicit backward stop sequence, if the dataset authored one.
    pub fn reverse_stop_sequence(&self) -> Option<&[String]> {
        self.reverse_stop_sequence.as_deref()
    }

    /// All stop labels on the route: forward, then explicit backward.
    pub fn all_stops(&self) -> impl Iterator<Item = &String> {
        self.stop_sequence
            .iter()
            .chain(self.reverse_stop_sequence.iter().flatten())
    }

    /// Returns the first stop of the forward sequence.
    pub fn first_stop(&self) -> &str {
        &self.stop_sequence[0]
    }

    /// Returns the last stop of the forward sequence.
    pub fn last_stop(&self) -> &str {
        &self.stop_sequence[self.stop_sequence.len() - 1]
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Route {}
