//! Roster - the arena that owns every contender
//!
//! Fights, battles and seasons refer to pets by [`ContenderId`] and never
//! copy them, so HP and recharge state live in exactly one place.

use ahash::AHashMap;

use crate::core::error::{PetsError, Result};
use crate::core::types::ContenderId;
use crate::pet::contender::{Contender, PetProfile};
use crate::player::DecisionSource;

/// All registered pets and the decision source driving each of them
#[derive(Default)]
pub struct Roster {
    contenders: Vec<Contender>,
    deciders: Vec<Box<dyn DecisionSource>>,
    by_name: AHashMap<String, ContenderId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pet. Names must be unique within the roster.
    pub fn register(
        &mut self,
        profile: PetProfile,
        decider: Box<dyn DecisionSource>,
    ) -> Result<ContenderId> {
        let id = ContenderId(self.contenders.len());
        let contender = Contender::new(id, profile)?;

        if self.by_name.contains_key(contender.name()) {
            return Err(PetsError::DuplicatePetName(contender.name().to_string()));
        }

        self.by_name.insert(contender.name().to_string(), id);
        self.contenders.push(contender);
        self.deciders.push(decider);

        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.contenders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contenders.is_empty()
    }

    /// Every handle in registration order
    pub fn ids(&self) -> Vec<ContenderId> {
        (0..self.contenders.len()).map(ContenderId).collect()
    }

    /// Look up a handle that has already been validated.
    ///
    /// Panics on a handle that did not come from this roster.
    pub fn contender(&self, id: ContenderId) -> &Contender {
        &self.contenders[id.index()]
    }

    pub(crate) fn contender_mut(&mut self, id: ContenderId) -> &mut Contender {
        &mut self.contenders[id.index()]
    }

    /// Fail if any handle is foreign to this roster
    pub fn ensure_known(&self, ids: &[ContenderId]) -> Result<()> {
        match ids.iter().find(|id| id.index() >= self.contenders.len()) {
            Some(id) => Err(PetsError::ContenderNotFound(*id)),
            None => Ok(()),
        }
    }

    /// Reset HP and recharge timers of the given pets
    pub fn reset(&mut self, ids: &[ContenderId]) {
        for id in ids {
            self.contender_mut(*id).reset();
        }
    }

    /// The contender's read-only state together with its decision source
    pub(crate) fn decision_parts(
        &mut self,
        id: ContenderId,
    ) -> (&Contender, &mut dyn DecisionSource) {
        let contender = &self.contenders[id.index()];
        let decider = self.deciders[id.index()].as_mut();
        (contender, decider)
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Roster")
            .field("contenders", &self.contenders)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Owner, PetType};
    use crate::player::RandomDecisions;

    fn profile(name: &str) -> PetProfile {
        PetProfile::new(name, Owner::computer(), PetType::Speed, 40.0)
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut roster = Roster::new();
        let a = roster
            .register(profile("Alpha"), Box::new(RandomDecisions::new()))
            .unwrap();
        let b = roster
            .register(profile("Beta"), Box::new(RandomDecisions::new()))
            .unwrap();

        assert_eq!(a, ContenderId(0));
        assert_eq!(b, ContenderId(1));
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.contender(a).name(), "Alpha");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut roster = Roster::new();
        roster
            .register(profile("Alpha"), Box::new(RandomDecisions::new()))
            .unwrap();
        let result = roster.register(profile(" Alpha "), Box::new(RandomDecisions::new()));
        assert!(matches!(result, Err(PetsError::DuplicatePetName(_))));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_ensure_known_flags_foreign_handles() {
        let mut roster = Roster::new();
        let a = roster
            .register(profile("Alpha"), Box::new(RandomDecisions::new()))
            .unwrap();

        assert!(roster.ensure_known(&[a]).is_ok());
        assert!(matches!(
            roster.ensure_known(&[a, ContenderId(7)]),
            Err(PetsError::ContenderNotFound(ContenderId(7)))
        ));
    }
}
