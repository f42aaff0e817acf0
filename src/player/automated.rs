//! Computer-controlled pets: uniform random choices

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::skill::SkillKind;
use crate::player::{DecisionContext, DecisionSource};

/// Picks uniformly among all five skills
///
/// Recharging picks are rejected by the resolver and drawn again, so the
/// number of draws per round depends on the pet's recharge state.
#[derive(Debug, Clone, Default)]
pub struct RandomDecisions {
    /// Private stream; when absent the game's shared stream is used
    own_rng: Option<ChaCha8Rng>,
}

impl RandomDecisions {
    /// Draw from the game's shared stream
    pub fn new() -> Self {
        Self { own_rng: None }
    }

    /// Draw from a private stream seeded per pet
    pub fn with_seed(seed: u64) -> Self {
        Self {
            own_rng: Some(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn pick(&mut self, shared: &mut ChaCha8Rng) -> SkillKind {
        let rng = match self.own_rng.as_mut() {
            Some(own) => own,
            None => shared,
        };
        let skills = SkillKind::all();
        skills[rng.gen_range(0..skills.len())]
    }
}

impl DecisionSource for RandomDecisions {
    fn choose_skill(&mut self, _ctx: &DecisionContext<'_>, rng: &mut ChaCha8Rng) -> SkillKind {
        self.pick(rng)
    }

    fn predict_opponent_skill(
        &mut self,
        _ctx: &DecisionContext<'_>,
        rng: &mut ChaCha8Rng,
    ) -> SkillKind {
        self.pick(rng)
    }
}
