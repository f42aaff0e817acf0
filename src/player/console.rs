//! Human players answering on a line-oriented console
//!
//! Every human pet in a game reads from the same console, so the reader is
//! shared between their decision sources and borrowed only for one line.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use rand_chacha::ChaCha8Rng;

use crate::combat::skill::SkillKind;
use crate::player::{DecisionContext, DecisionSource};

/// Reads menu numbers (1-5) from `input`, re-prompting on `output` until a
/// number in range arrives
///
/// If the input is exhausted the pet falls back to its first ready skill.
pub struct ConsoleDecisions<R, W> {
    input: Rc<RefCell<R>>,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleDecisions<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::shared(Rc::new(RefCell::new(input)), output)
    }

    /// Read from a console shared with other human pets
    pub fn shared(input: Rc<RefCell<R>>, output: W) -> Self {
        Self { input, output }
    }

    fn read_skill(&mut self) -> Option<SkillKind> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.input.borrow_mut().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            if let Some(skill) = parse_menu_choice(&line) {
                return Some(skill);
            }

            let _ = writeln!(
                self.output,
                "Input must be between 1 and {}.",
                SkillKind::COUNT
            );
        }
    }
}

/// "3" -> PaperCut; anything outside 1..=5 is rejected
pub fn parse_menu_choice(line: &str) -> Option<SkillKind> {
    let number: usize = line.trim().parse().ok()?;
    number.checked_sub(1).and_then(SkillKind::from_index)
}

impl<R: BufRead, W: Write> DecisionSource for ConsoleDecisions<R, W> {
    fn choose_skill(&mut self, ctx: &DecisionContext<'_>, _rng: &mut ChaCha8Rng) -> SkillKind {
        self.read_skill().unwrap_or_else(|| {
            tracing::warn!(
                pet = ctx.contender.name(),
                "console input closed, using first ready skill"
            );
            ctx.contender
                .recharge()
                .available()
                .next()
                .unwrap_or(SkillKind::RockThrow)
        })
    }

    fn predict_opponent_skill(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _rng: &mut ChaCha8Rng,
    ) -> SkillKind {
        self.read_skill().unwrap_or(SkillKind::RockThrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ContenderId, Owner, PetType};
    use crate::pet::{Contender, PetProfile};
    use crate::combat::round::{resolve_round, RECHARGING_NOTICE};
    use crate::pet::Roster;
    use crate::progress::MemorySink;
    use rand::SeedableRng;
    use std::io::{self, Cursor};

    fn human() -> Contender {
        let profile = PetProfile::new("Fido", Owner::human("Ann"), PetType::Intelligence, 20.0);
        Contender::new(ContenderId(0), profile).unwrap()
    }

    #[test]
    fn test_parse_menu_choice() {
        assert_eq!(parse_menu_choice("1\n"), Some(SkillKind::RockThrow));
        assert_eq!(parse_menu_choice(" 5 "), Some(SkillKind::ReversalOfFortune));
        assert_eq!(parse_menu_choice("0"), None);
        assert_eq!(parse_menu_choice("6"), None);
        assert_eq!(parse_menu_choice("rock"), None);
    }

    #[test]
    fn test_reprompts_until_valid() {
        let pet = human();
        let ctx = DecisionContext {
            contender: &pet,
            round: 1,
        };
        let mut out = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut console = ConsoleDecisions::new(Cursor::new("x\n9\n4\n"), &mut out);

        assert_eq!(console.choose_skill(&ctx, &mut rng), SkillKind::ShootTheMoon);
        drop(console);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Input must be between 1 and 5.").count(), 2);
    }

    #[test]
    fn test_closed_input_falls_back() {
        let pet = human();
        let ctx = DecisionContext {
            contender: &pet,
            round: 1,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut console = ConsoleDecisions::new(Cursor::new(""), Vec::new());
        assert_eq!(console.choose_skill(&ctx, &mut rng), SkillKind::RockThrow);
    }

    #[test]
    fn test_two_humans_share_one_console() {
        let input = Rc::new(RefCell::new(Cursor::new("1\nx\n3\n")));
        let mut roster = Roster::new();
        let ids = vec![
            roster
                .register(
                    PetProfile::new("Fido", Owner::human("Ann"), PetType::Power, 40.0),
                    Box::new(ConsoleDecisions::shared(Rc::clone(&input), io::sink())),
                )
                .unwrap(),
            roster
                .register(
                    PetProfile::new("Rex", Owner::human("Bob"), PetType::Speed, 40.0),
                    Box::new(ConsoleDecisions::shared(Rc::clone(&input), io::sink())),
                )
                .unwrap(),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sink = MemorySink::new();

        let round = resolve_round(1, &ids, &[], &mut roster, &mut rng, &mut sink);

        assert_eq!(round.entry(ids[0]).unwrap().skill, SkillKind::RockThrow);
        assert_eq!(round.entry(ids[1]).unwrap().skill, SkillKind::PaperCut);
        assert_eq!(sink.matching("please select a Skill").count(), 2);
    }

    #[test]
    fn test_rejection_is_reported_once() {
        let mut out = Vec::new();
        let mut console = ConsoleDecisions::new(Cursor::new(""), &mut out);
        console.skill_rejected(SkillKind::RockThrow);
        drop(console);
        assert!(out.is_empty());

        let mut roster = Roster::new();
        let ids = vec![
            roster
                .register(
                    PetProfile::new("Fido", Owner::human("Ann"), PetType::Power, 40.0),
                    Box::new(ConsoleDecisions::new(Cursor::new("1\n2\n"), io::sink())),
                )
                .unwrap(),
            roster
                .register(
                    PetProfile::new("Rex", Owner::computer(), PetType::Power, 40.0),
                    Box::new(ConsoleDecisions::new(Cursor::new("3\n"), io::sink())),
                )
                .unwrap(),
        ];
        roster.contender_mut(ids[0]).record_skill_use(SkillKind::RockThrow);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut sink = MemorySink::new();

        let round = resolve_round(2, &ids, &[], &mut roster, &mut rng, &mut sink);

        assert_eq!(round.entry(ids[0]).unwrap().skill, SkillKind::ScissorsPoke);
        assert_eq!(sink.matching(RECHARGING_NOTICE).count(), 1);
    }
}
