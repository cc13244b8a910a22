use crate::base_types::{NodeId, NodeType, Platform};
use crate::error::ModelError;
use crate::platform::PlatformLedger;
use time::Instant;

#[derive(Clone, Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    kind: NodeType,
    latitude: f64,
    longitude: f64,
    capacity: u32,
    platforms: PlatformLedger,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        kind: NodeType,
        latitude: f64,
        longitude: f64,
        capacity: u32,
        platform_count: Platform,
    ) -> Node {
        Node {
            id: id.into(),
            name: name.into(),
            kind,
            latitude,
            longitude,
            capacity,
            platforms: PlatformLedger::new(platform_count),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeType {
        self.kind
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn platform_count(&self) -> Platform {
        self.platforms.platform_count()
    }

    /// Whether this node has passing capability (§GLOSSARY): at least
    /// two platforms.
    pub fn has_passing_capability(&self) -> bool {
        self.platform_count() >= 2
    }

    pub fn is_platform_free(
        &self,
        platform: Platform,
        start: Instant,
        end: Instant,
    ) -> Result<bool, ModelError> {
        self.platforms.is_platform_free(platform, start, end)
    }

    pub fn first_free_platform(&self, start: Instant, end: Instant) -> Option<Platform> {
        self.platforms.first_free_platform(start, end)
    }

    pub fn reserve_platform(
        &mut self,
        platform: Platform,
        train_id: crate::base_types::TrainId,
        start: Instant,
        end: Instant,
    ) -> Result<(), ModelError> {
        let reserved = self
            .platforms
            .reserve(platform, train_id.clone(), start, end)?;
        if !reserved {
            log::debug!("platform {platform} at {} busy, rejecting {train_id}", self.id);
            return Err(ModelError::PlatformBusy {
                node: self.id.clone(),
                platform,
            });
        }
        Ok(())
    }

    pub fn release_platform_for(
        &mut self,
        platform: Platform,
        train_id: &crate::base_types::TrainId,
    ) -> Result<(), ModelError> {
        self.platforms.release_for(platform, train_id)
    }

    pub fn clear_reservations(&mut self) {
        self.platforms.clear();
    }

    pub fn platform_ledger(&self) -> &PlatformLedger {
        &self.platforms
    }
}
