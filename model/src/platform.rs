use crate::base_types::{Platform, TrainId};
use crate::error::ModelError;
use time::Instant;

/// A closed-open occupation window `[start, end)` held by `train_id` on
/// one platform (§4.2).
#[derive(Clone, Debug, PartialEq)]
pub struct Reservation {
    pub start: Instant,
    pub end: Instant,
    pub train_id: TrainId,
}

fn overlaps(start1: Instant, end1: Instant, start2: Instant, end2: Instant) -> bool {
    start1 < end2 && start2 < end1
}

/// Per-node platform reservation ledger (§4.2, §9 "platform ledger
/// hidden behind the node"). Only `is_free`/`first_free`/`reserve`/
/// `release_for`/`clear` are exposed; the sorted, non-overlapping
/// reservation lists are private to this type.
#[derive(Clone, Debug, Default)]
pub struct PlatformLedger {
    platform_count: Platform,
    reservations: Vec<Vec<Reservation>>, // index 0 == platform 1
}

impl PlatformLedger {
    pub fn new(platform_count: Platform) -> PlatformLedger {
        PlatformLedger {
            platform_count,
            reservations: (0..platform_count).map(|_| Vec::new()).collect(),
        }
    }

    pub fn platform_count(&self) -> Platform {
        self.platform_count
    }

    fn check_platform(&self, platform: Platform) -> Result<usize, ModelError> {
        if platform == 0 || platform > self.platform_count {
            return Err(ModelError::InvalidArgument(format!(
                "platform {platform} is out of range [1, {}]",
                self.platform_count
            )));
        }
        Ok((platform - 1) as usize)
    }

    pub fn is_platform_free(
        &self,
        platform: Platform,
        start: Instant,
        end: Instant,
    ) -> Result<bool, ModelError> {
        let idx = self.check_platform(platform)?;
        Ok(!self.reservations[idx]
            .iter()
            .any(|r| overlaps(start, end, r.start, r.end)))
    }

    /// Lowest-numbered free platform for the window, `None` if all are
    /// busy (§4.2, §9 "ascending platform number").
    pub fn first_free_platform(&self, start: Instant, end: Instant) -> Option<Platform> {
        (1..=self.platform_count).find(|&p| {
            self.is_platform_free(p, start, end)
                .expect("platform within range by construction of the loop bound")
        })
    }

    /// Returns `Ok(false)` if the window is already occupied by another
    /// train (caller supplies the node id for the error, since the
    /// ledger itself does not know it — see `Node::reserve_platform`).
    pub fn reserve(
        &mut self,
        platform: Platform,
        train_id: TrainId,
        start: Instant,
        end: Instant,
    ) -> Result<bool, ModelError> {
        let idx = self.check_platform(platform)?;
        if !self.is_platform_free(platform, start, end)? {
            return Ok(false);
        }
        let pos = self.reservations[idx]
            .iter()
            .position(|r| r.start > start)
            .unwrap_or(self.reservations[idx].len());
        self.reservations[idx].insert(
            pos,
            Reservation {
                start,
                end,
                train_id,
            },
        );
        Ok(true)
    }

    pub fn release_for(&mut self, platform: Platform, train_id: &TrainId) -> Result<(), ModelError> {
        let idx = self.check_platform(platform)?;
        self.reservations[idx].retain(|r| &r.train_id != train_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        for list in &mut self.reservations {
            list.clear();
        }
    }

    pub fn reservations_on(&self, platform: Platform) -> &[Reservation] {
        let idx = (platform.max(1) - 1) as usize;
        self.reservations.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }
}
