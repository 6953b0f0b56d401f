//! Helper candidates and proximity-plus-trust ranking.

use super::DispatchConfig;
use crate::geo::GeoPoint;
use crate::identity::domain::UserId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Helper attributes the dispatch engine selects and scores on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperProfile {
    /// Identifier of the helper.
    pub user_id: UserId,
    /// Last known location of the helper.
    pub location: GeoPoint,
    /// Current trust score, 0 to 100.
    pub trust_score: u8,
    /// Whether the helper has a verified phone number.
    pub phone_verified: bool,
}

/// Converts a distance inside the radius into a 0 to 1000 closeness score.
///
/// A helper standing on the task scores 1000; one at the edge of the
/// radius scores 0.
#[expect(
    clippy::integer_division,
    reason = "proximity is scored in whole permille of the radius"
)]
fn proximity_permille(distance_m: u64, radius_m: u64) -> u64 {
    if radius_m == 0 {
        return 0;
    }
    radius_m.saturating_sub(distance_m).saturating_mul(1000) / radius_m
}

/// A helper scored for one task.
///
/// Ordering is by blended score, then trust, then identifier, so a ranking
/// built from the same inputs always yields the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    user_id: UserId,
    distance_m: u64,
    trust_score: u8,
    score: u64,
}

impl Candidate {
    /// Scores a helper profile against a task at the given distance.
    ///
    /// The blended score weighs closeness within the radius against the
    /// helper's trust score using the configured percentages.
    #[must_use]
    pub fn scored(
        profile: HelperProfile,
        distance_m: u64,
        radius_m: u64,
        config: &DispatchConfig,
    ) -> Self {
        let proximity = proximity_permille(distance_m, radius_m);
        let trust = u64::from(profile.trust_score).saturating_mul(10);
        let score = config
            .proximity_weight
            .saturating_mul(proximity)
            .saturating_add(config.trust_weight.saturating_mul(trust));
        Self {
            user_id: profile.user_id,
            distance_m,
            trust_score: profile.trust_score,
            score,
        }
    }

    /// Returns the helper's identifier.
    #[must_use]
    pub const fn user_id(self) -> UserId {
        self.user_id
    }

    /// Returns the distance from the task, in metres.
    #[must_use]
    pub const fn distance_m(self) -> u64 {
        self.distance_m
    }

    /// Returns the helper's trust score.
    #[must_use]
    pub const fn trust_score(self) -> u8 {
        self.trust_score
    }

    /// Returns the blended ranking score.
    #[must_use]
    pub const fn score(self) -> u64 {
        self.score
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.trust_score.cmp(&other.trust_score))
            .then_with(|| other.user_id.cmp(&self.user_id))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Candidates ordered best first.
///
/// Iterating pops the highest-ranked remaining candidate, so callers can
/// take the fanout head now and resume with the rest if nobody accepts.
#[derive(Debug, Clone, Default)]
pub struct CandidateRanking {
    heap: BinaryHeap<Candidate>,
}

impl CandidateRanking {
    /// Builds a ranking from scored candidates.
    #[must_use]
    pub fn build(candidates: Vec<Candidate>) -> Self {
        Self {
            heap: BinaryHeap::from(candidates),
        }
    }

    /// Returns how many candidates remain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns whether no candidates remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl Iterator for CandidateRanking {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        self.heap.pop()
    }
}
