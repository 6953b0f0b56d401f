//! User aggregate root, verification state, and trust accounting.

use super::{
    Badge, EMERGENCY_HERO_COMPLETIONS, FAST_RESPONDER_CLAIMS, IdentityDomainError, PhoneNumber,
    RatingAverage, RatingValue, TOP_HELPER_COMPLETIONS, UserId,
};
use crate::geo::GeoPoint;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability a user may hold on the platform.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May claim and fulfil tasks.
    Helper,
    /// May post tasks and emergency alerts.
    Poster,
}

/// Identity check a user can pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKind {
    /// Phone number confirmed through the external OTP flow.
    Phone,
    /// Government identity document reviewed.
    GovernmentId,
    /// Selfie matched against the identity document.
    Selfie,
}

/// Verification flags for one user.
///
/// Flags only ever flip from unverified to verified; there is no revert
/// path in this core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    phone: bool,
    government_id: bool,
    selfie: bool,
}

impl Verification {
    /// Returns whether the given check has been passed.
    #[must_use]
    pub const fn is_verified(self, kind: VerificationKind) -> bool {
        match kind {
            VerificationKind::Phone => self.phone,
            VerificationKind::GovernmentId => self.government_id,
            VerificationKind::Selfie => self.selfie,
        }
    }

    /// Returns the trust points contributed by the passed checks.
    ///
    /// Phone contributes 10, a government identity document 15, and a
    /// selfie match 10, for at most 35.
    #[must_use]
    pub const fn points(self) -> u32 {
        let mut points = 0;
        if self.phone {
            points += 10;
        }
        if self.government_id {
            points += 15;
        }
        if self.selfie {
            points += 10;
        }
        points
    }

    /// Marks one check as passed. Returns whether the flag changed.
    const fn mark(&mut self, kind: VerificationKind) -> bool {
        let flag = match kind {
            VerificationKind::Phone => &mut self.phone,
            VerificationKind::GovernmentId => &mut self.government_id,
            VerificationKind::Selfie => &mut self.selfie,
        };
        let changed = !*flag;
        *flag = true;
        changed
    }
}

/// Validated profile data for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserProfile {
    display_name: String,
    phone: PhoneNumber,
    city: String,
    location: GeoPoint,
    roles: BTreeSet<Role>,
}

impl NewUserProfile {
    /// Creates a validated profile with both capabilities granted.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyDisplayName`],
    /// [`IdentityDomainError::EmptyCity`], or
    /// [`IdentityDomainError::InvalidPhone`] when a field fails validation.
    pub fn new(
        display_name: impl Into<String>,
        phone: impl Into<String>,
        city: impl Into<String>,
        location: GeoPoint,
    ) -> Result<Self, IdentityDomainError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(IdentityDomainError::EmptyDisplayName);
        }
        let city = city.into();
        if city.trim().is_empty() {
            return Err(IdentityDomainError::EmptyCity);
        }
        Ok(Self {
            display_name,
            phone: PhoneNumber::new(phone)?,
            city,
            location,
            roles: BTreeSet::from([Role::Helper, Role::Poster]),
        })
    }

    /// Replaces the granted capabilities.
    #[must_use]
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }
}

/// Settlement input credited to a helper after a completed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionCredit {
    /// Task price added to cumulative earnings.
    pub price_rupees: u64,
    /// Whether the completed task was emergency tier.
    pub emergency: bool,
    /// Whether the task was claimed within the fast-claim window.
    pub fast_claim: bool,
}

/// User aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    display_name: String,
    phone: PhoneNumber,
    city: String,
    location: GeoPoint,
    roles: BTreeSet<Role>,
    verification: Verification,
    trust_score: u8,
    earnings_rupees: u64,
    completed_tasks: u32,
    emergency_completions: u32,
    fast_claims: u32,
    rating: RatingAverage,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: u64,
}

impl User {
    /// Registers a new user from a validated profile.
    ///
    /// New users start unverified with trust score 0 and an empty rating.
    #[must_use]
    pub fn register(profile: NewUserProfile, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: UserId::new(),
            display_name: profile.display_name,
            phone: profile.phone,
            city: profile.city,
            location: profile.location,
            roles: profile.roles,
            verification: Verification::default(),
            trust_score: 0,
            earnings_rupees: 0,
            completed_tasks: 0,
            emergency_completions: 0,
            fast_claims: 0,
            rating: RatingAverage::empty(),
            created_at: timestamp,
            updated_at: timestamp,
            version: 1,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the normalized phone number.
    #[must_use]
    pub const fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Returns the home city.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Returns the last known location.
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        self.location
    }

    /// Returns whether the user holds the given capability.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns the verification flags.
    #[must_use]
    pub const fn verification(&self) -> Verification {
        self.verification
    }

    /// Returns the derived trust score (0 to 100).
    #[must_use]
    pub const fn trust_score(&self) -> u8 {
        self.trust_score
    }

    /// Returns cumulative earnings in rupees.
    #[must_use]
    pub const fn earnings_rupees(&self) -> u64 {
        self.earnings_rupees
    }

    /// Returns the completed-task count.
    #[must_use]
    pub const fn completed_tasks(&self) -> u32 {
        self.completed_tasks
    }

    /// Returns the emergency-tier completion count.
    #[must_use]
    pub const fn emergency_completions(&self) -> u32 {
        self.emergency_completions
    }

    /// Returns how many tasks the user claimed within the fast-claim window.
    #[must_use]
    pub const fn fast_claims(&self) -> u32 {
        self.fast_claims
    }

    /// Returns the running rating average.
    #[must_use]
    pub const fn rating(&self) -> RatingAverage {
        self.rating
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the optimistic-concurrency version counter.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Returns the badges earned from the current statistics.
    #[must_use]
    pub fn badges(&self) -> Vec<Badge> {
        let mut earned = Vec::new();
        if self.completed_tasks >= TOP_HELPER_COMPLETIONS {
            earned.push(Badge::TopHelper);
        }
        if self.fast_claims >= FAST_RESPONDER_CLAIMS {
            earned.push(Badge::FastResponder);
        }
        if self.emergency_completions >= EMERGENCY_HERO_COMPLETIONS {
            earned.push(Badge::EmergencyHero);
        }
        earned
    }

    /// Marks a verification check as passed.
    ///
    /// Returns `true` when the flag changed; marking an already-verified
    /// check is a no-op that leaves the record untouched.
    pub fn mark_verified(&mut self, kind: VerificationKind, clock: &impl Clock) -> bool {
        if !self.verification.mark(kind) {
            return false;
        }
        self.recompute_trust();
        self.touch(clock);
        true
    }

    /// Credits a completed task to this user.
    ///
    /// Adds the price to earnings, advances the completion counters, and
    /// recomputes the trust score.
    pub fn record_completion(&mut self, credit: CompletionCredit, clock: &impl Clock) {
        self.earnings_rupees = self.earnings_rupees.saturating_add(credit.price_rupees);
        self.completed_tasks = self.completed_tasks.saturating_add(1);
        if credit.emergency {
            self.emergency_completions = self.emergency_completions.saturating_add(1);
        }
        if credit.fast_claim {
            self.fast_claims = self.fast_claims.saturating_add(1);
        }
        self.recompute_trust();
        self.touch(clock);
    }

    /// Folds a poster rating into the running average.
    pub fn record_rating(&mut self, rating: RatingValue, clock: &impl Clock) {
        self.rating = self.rating.with_sample(rating);
        self.recompute_trust();
        self.touch(clock);
    }

    /// Recomputes the trust score from verification, completions, and
    /// rating.
    ///
    /// The weighting is an implementation choice: verification contributes
    /// up to 35 points, completions up to 40 (two per completed task), and
    /// the rating average up to 25 (centistars divided by 20). The result
    /// is capped at 100 and is monotonic in every input.
    #[expect(
        clippy::integer_division,
        reason = "centistars scale down to a 0..=25 contribution by truncation"
    )]
    fn recompute_trust(&mut self) {
        let verification = self.verification.points();
        let completions = self.completed_tasks.saturating_mul(2).min(40);
        let rating = u32::from(self.rating.centistars()) / 20;
        let total = (verification + completions + rating).min(100);
        self.trust_score = u8::try_from(total).unwrap_or(100);
    }

    /// Updates the mutation timestamp and bumps the version counter.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
        self.version = self.version.saturating_add(1);
    }
}
