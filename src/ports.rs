//! Port coordinate registry and great-circle distances.
//!
//! Loads a JSON table of port coordinates (port name, upper-cased on load,
//! mapped to decimal-degree lat/lon) and computes haversine distances in
//! nautical miles. The registry is immutable after load.
//!
//! A process-scoped instance is available behind [`init_ports`] /
//! [`get_ports`] for embedders that do not thread their own handle through.
//! The HTTP layer passes an explicit `Arc<PortsRegistry>` in application
//! state instead of relying on the global.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;
/// Kilometers per nautical mile conversion factor.
const KM_TO_NM: f64 = 0.539957;

pub type PortsResult<T> = Result<T, PortsError>;

/// Errors raised by the port registry.
#[derive(Debug, Error)]
pub enum PortsError {
    #[error("Ports file not found at {path}")]
    NotFound { path: String },

    #[error("Failed to read ports file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ports file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown port(s): {0}. Add them to the ports file")]
    UnknownPort(String),

    #[error("Ports registry not initialized; call init_ports() first")]
    NotInitialized,
}

/// Decimal-degree coordinates of a port.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortCoordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Lookup table from upper-cased port name to coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortsRegistry {
    ports: HashMap<String, PortCoordinates>,
}

impl PortsRegistry {
    /// Load the registry from a JSON file of `{ "PORT": {"lat":..,"lon":..} }`
    /// entries.
    pub fn from_path(path: &Path) -> PortsResult<Self> {
        if !path.exists() {
            return Err(PortsError::NotFound {
                path: path.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|source| PortsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse the registry from raw JSON.
    pub fn from_json(raw: &str) -> PortsResult<Self> {
        let entries: HashMap<String, PortCoordinates> = serde_json::from_str(raw)?;
        Ok(Self::from_entries(entries))
    }

    /// Build a registry from in-memory entries. Keys are upper-cased.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, PortCoordinates)>,
    {
        let ports = entries
            .into_iter()
            .map(|(name, coords)| (name.as_ref().to_uppercase(), coords))
            .collect();
        Self { ports }
    }

    /// Case-insensitive port lookup.
    pub fn get(&self, name: &str) -> Option<PortCoordinates> {
        self.ports.get(&name.trim().to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Great-circle distance between two known ports in nautical miles,
    /// rounded to 1 decimal place. No routing or canal awareness.
    pub fn distance_nm(&self, from: &str, to: &str) -> PortsResult<f64> {
        let (a, b) = match (self.get(from), self.get(to)) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(PortsError::UnknownPort(format!("{} or {}", from, to))),
        };
        let nm = haversine_nm(a, b);
        Ok((nm * 10.0).round() / 10.0)
    }
}

fn haversine_nm(a: PortCoordinates, b: PortCoordinates) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c * KM_TO_NM
}

/// Process-scoped registry, initialized once.
static REGISTRY: OnceLock<Arc<PortsRegistry>> = OnceLock::new();

/// Initialize the process-scoped registry from `path`.
///
/// Idempotent: the first successful load wins and later calls return the
/// existing instance without touching the filesystem.
pub fn init_ports(path: &Path) -> PortsResult<Arc<PortsRegistry>> {
    if let Some(existing) = REGISTRY.get() {
        return Ok(Arc::clone(existing));
    }
    let registry = Arc::new(PortsRegistry::from_path(path)?);
    let _ = REGISTRY.set(Arc::clone(&registry));
    // A concurrent initializer may have won the race; hand back whichever
    // instance is installed.
    get_ports()
}

/// Get the process-scoped registry installed by [`init_ports`].
pub fn get_ports() -> PortsResult<Arc<PortsRegistry>> {
    REGISTRY
        .get()
        .map(Arc::clone)
        .ok_or(PortsError::NotInitialized)
}
