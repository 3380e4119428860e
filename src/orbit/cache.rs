use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::Duration;

use super::eci::OrbitTrace;
use super::ground_track::GroundTrack;

/// Write-once memo. The map lock is only held to find a key's slot; the value is
/// computed inside the slot, so one key's population is serialized without blocking
/// other keys.
struct Memo<K, T> {
    slots: Mutex<HashMap<K, Arc<OnceLock<Arc<T>>>>>,
}

impl<K: Eq + Hash + Clone, T> Memo<K, T> {
    fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: &K) -> Arc<OnceLock<Arc<T>>> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.entry(key.clone()).or_default().clone()
    }

    fn get_or_compute(&self, key: &K, compute: impl FnOnce() -> T) -> Arc<T> {
        self.slot(key).get_or_init(|| Arc::new(compute())).clone()
    }

    fn get(&self, key: &K) -> Option<Arc<T>> {
        let slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.get(key).and_then(|slot| slot.get().cloned())
    }

    fn len(&self) -> usize {
        let slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.values().filter(|slot| slot.get().is_some()).count()
    }
}

/// Per-entity trajectory memo shared by the ground track and orbit trace computers.
///
/// Ground tracks are keyed by record id and sampling step, orbit traces by record id and
/// point count. Entries are created on first request and live as long as the cache.
/// Failed computations are stored as empty results so they are not retried.
pub struct OrbitTrackCache {
    ground_tracks: Memo<(String, Duration), GroundTrack>,
    orbit_traces: Memo<(String, usize), OrbitTrace>,
}

impl Default for OrbitTrackCache {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitTrackCache {
    pub fn new() -> Self {
        Self {
            ground_tracks: Memo::new(),
            orbit_traces: Memo::new(),
        }
    }

    pub fn ground_track(
        &self,
        id: &str,
        step: Duration,
        compute: impl FnOnce() -> GroundTrack,
    ) -> Arc<GroundTrack> {
        self.ground_tracks
            .get_or_compute(&(id.to_string(), step), compute)
    }

    pub fn orbit_trace(
        &self,
        id: &str,
        point_count: usize,
        compute: impl FnOnce() -> OrbitTrace,
    ) -> Arc<OrbitTrace> {
        self.orbit_traces
            .get_or_compute(&(id.to_string(), point_count), compute)
    }

    pub fn cached_ground_track(&self, id: &str, step: Duration) -> Option<Arc<GroundTrack>> {
        self.ground_tracks.get(&(id.to_string(), step))
    }

    pub fn cached_orbit_trace(&self, id: &str, point_count: usize) -> Option<Arc<OrbitTrace>> {
        self.orbit_traces.get(&(id.to_string(), point_count))
    }

    pub fn len(&self) -> usize {
        self.ground_tracks.len() + self.orbit_traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
