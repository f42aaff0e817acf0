//! Scripted decisions for tests and replays

use rand_chacha::ChaCha8Rng;

use crate::combat::skill::SkillKind;
use crate::player::{DecisionContext, DecisionSource};

/// Replays a fixed list of choices, wrapping around at the end
///
/// Rejected choices still consume their script slot. After a rejection the
/// next scripted skill is used only if it is ready, otherwise the first ready
/// skill is played. An empty script always plays the first ready skill.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    choices: Vec<SkillKind>,
    predictions: Vec<SkillKind>,
    next_choice: usize,
    next_prediction: usize,
    retrying: bool,
}

impl ScriptedDecisions {
    pub fn new(choices: impl IntoIterator<Item = SkillKind>) -> Self {
        Self {
            choices: choices.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_predictions(mut self, predictions: impl IntoIterator<Item = SkillKind>) -> Self {
        self.predictions = predictions.into_iter().collect();
        self
    }

    fn next_from(list: &[SkillKind], cursor: &mut usize) -> Option<SkillKind> {
        if list.is_empty() {
            return None;
        }
        let skill = list[*cursor % list.len()];
        *cursor += 1;
        Some(skill)
    }
}

impl DecisionSource for ScriptedDecisions {
    fn choose_skill(&mut self, ctx: &DecisionContext<'_>, _rng: &mut ChaCha8Rng) -> SkillKind {
        let recharge = ctx.contender.recharge();
        let first_ready = recharge.available().next().unwrap_or(SkillKind::RockThrow);
        let retrying = std::mem::take(&mut self.retrying);

        match Self::next_from(&self.choices, &mut self.next_choice) {
            Some(skill) if retrying && recharge.is_recharging(skill) => first_ready,
            Some(skill) => skill,
            None => first_ready,
        }
    }

    fn predict_opponent_skill(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _rng: &mut ChaCha8Rng,
    ) -> SkillKind {
        Self::next_from(&self.predictions, &mut self.next_prediction)
            .unwrap_or(SkillKind::RockThrow)
    }

    fn skill_rejected(&mut self, _skill: SkillKind) {
        self.retrying = true;
    }
}
