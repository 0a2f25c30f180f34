//! The round state machine.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use lastlight_core::chat::{ChatChannel, MessageId, ReactionCounts, VoteOption};
use lastlight_core::clock::Clock;
use lastlight_core::rng::DeterministicRng;
use lastlight_core::store::SnapshotStore;
use lastlight_generation::{GenerationRequest, TextGenerator};
use lastlight_narrative::{NarrativeInterpreter, choice_text};
use lastlight_voting::VoteAggregator;
use tracing::{info, instrument, warn};

use crate::application::prompts;
use crate::application::session::GameSession;
use crate::application::snapshots::save_snapshot;
use crate::domain::phase::{GameEnd, Phase};
use crate::domain::summary::render_final_summary;

/// Default pause between phases at normal speed.
pub const DEFAULT_PHASE_DELAY: Duration = Duration::from_secs(2);

/// Picks the winning option; ties go to option one. `None` if nobody voted.
#[must_use]
pub fn winning_option(counts: ReactionCounts) -> Option<VoteOption> {
    if counts.total() == 0 {
        None
    } else if counts.first >= counts.second {
        Some(VoteOption::First)
    } else {
        Some(VoteOption::Second)
    }
}

/// Drives games round by round.
///
/// One engine serves the whole process; it holds no per-game state apart
/// from the RNG used for the survivor fallback.
pub struct RoundEngine {
    generator: Arc<dyn TextGenerator>,
    interpreter: Arc<dyn NarrativeInterpreter>,
    channel: Arc<dyn ChatChannel>,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    rng: Mutex<Box<dyn DeterministicRng>>,
    votes: VoteAggregator,
    phase_delay: Duration,
}

impl std::fmt::Debug for RoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("votes", &self.votes)
            .field("phase_delay", &self.phase_delay)
            .finish_non_exhaustive()
    }
}

impl RoundEngine {
    /// Creates an engine with default vote windows and phase delay.
    #[must_use]
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        interpreter: Arc<dyn NarrativeInterpreter>,
        channel: Arc<dyn ChatChannel>,
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            generator,
            interpreter,
            channel,
            store,
            clock,
            rng: Mutex::new(rng),
            votes: VoteAggregator::default(),
            phase_delay: DEFAULT_PHASE_DELAY,
        }
    }

    #[must_use]
    pub fn with_votes(mut self, votes: VoteAggregator) -> Self {
        self.votes = votes;
        self
    }

    /// Sets the pause between phases at normal speed.
    #[must_use]
    pub fn with_phase_delay(mut self, delay: Duration) -> Self {
        self.phase_delay = delay;
        self
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    /// Plays rounds until the game ends, posts the closing summary and marks
    /// the state terminated.
    #[instrument(skip(self, session), fields(game_id = %session.id()))]
    pub async fn run(&self, session: &GameSession) -> GameEnd {
        info!(round = session.round_number(), "game started");

        let end = loop {
            if let Err(end) = self.play_round(session).await {
                break end;
            }
        };

        let state = session.update(|state| {
            state.terminated = true;
            state.clone()
        });
        info!(round = state.round_number, end = ?end, "game over");
        self.post(&render_final_summary(&state, &end)).await;
        end
    }

    /// Plays one round. `Err` carries the ending if the game stops here.
    #[instrument(skip(self, session), fields(round = session.round_number()))]
    async fn play_round(&self, session: &GameSession) -> Result<(), GameEnd> {
        let roster = self.interpreter.roster();

        // Scene
        self.checkpoint(session)?;
        let state = session.state();
        let scene_text = self
            .generate(Phase::Scene, &prompts::scene(&state, roster))
            .await?;
        session.update(|s| {
            let alive = s.alive.clone();
            self.interpreter.track_stats(&mut s.stats, &scene_text, &alive);
        });
        let mut scene_post = vec![format!("🌒 **Round {}**", state.round_number)];
        scene_post.extend(self.interpreter.narration(&scene_text));
        self.post(&scene_post.join("\n")).await;
        self.pause(session).await;

        // Health
        self.checkpoint(session)?;
        let health_text = self
            .generate(Phase::Health, &prompts::health(&state, &scene_text))
            .await?;
        let report = self.interpreter.health(&health_text, &state.alive);
        let mut health_post = vec!["🩹 **Condition**".to_owned()];
        health_post.extend(report.render());
        self.post(&health_post.join("\n")).await;
        self.pause(session).await;

        // Dilemma
        self.checkpoint(session)?;
        let dilemma_text = self
            .generate(Phase::Dilemma, &prompts::dilemma(&scene_text, &health_text))
            .await?;
        let dilemma = self.interpreter.dilemma(&dilemma_text);
        self.post(&format!("⚠️ **Dilemma**\n{}\n{}", dilemma[0], dilemma[1]))
            .await;
        self.pause(session).await;

        // Choices
        self.checkpoint(session)?;
        let choices_text = self
            .generate(Phase::Choices, &prompts::choices(&dilemma_text))
            .await?;
        let options = self.interpreter.choices(&choices_text);
        session.update(|s| s.options = options.to_vec());

        // Vote
        self.checkpoint(session)?;
        let ballot = format!(
            "🗳️ **Vote**\n{} {}\n{} {}",
            VoteOption::First.emoji(),
            choice_text(&options[0]),
            VoteOption::Second.emoji(),
            choice_text(&options[1]),
        );
        let counts = match self.post(&ballot).await {
            Some(message) => self.votes.collect(self.channel.as_ref(), &message).await,
            None => ReactionCounts::default(),
        };
        let Some(winner) = winning_option(counts) else {
            info!("no votes cast");
            return Err(GameEnd::NoVotes);
        };
        let choice = options[winner.index()].clone();
        info!(
            first = counts.first,
            second = counts.second,
            winner = ?winner,
            "vote resolved"
        );
        self.post(&format!(
            "✅ The group chose {} {}",
            winner.emoji(),
            choice_text(&choice)
        ))
        .await;
        self.pause(session).await;

        // Outcome
        self.checkpoint(session)?;
        let state = session.update(|s| {
            s.last_choice.clone_from(&choice);
            s.clone()
        });
        let outcome_text = self
            .generate(
                Phase::Outcome,
                &prompts::outcome(&state, roster, &choice, &scene_text),
            )
            .await?;
        let facts = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.interpreter
                .outcome(&outcome_text, &state.alive, &mut **rng)
        };
        let (fallen, state) = session.update(|s| {
            let fallen = s.apply_outcome(&facts);
            self.interpreter
                .track_stats(&mut s.stats, &outcome_text, &state.alive);
            s.append_context(&scene_text);
            s.append_context(&outcome_text);
            s.round_number += 1;
            info!(?fallen, alive = s.alive.len(), "outcome applied");
            (fallen, s.clone())
        });
        let mut outcome_post = self.interpreter.narration(&outcome_text);
        if !fallen.is_empty() {
            outcome_post.push(format!("💀 Fallen: {}", fallen.join(", ")));
        }
        self.post(&outcome_post.join("\n")).await;

        // Bookkeeping
        save_snapshot(self.store.as_ref(), self.clock.as_ref(), &state).await;
        if let [survivor] = state.alive.as_slice() {
            return Err(GameEnd::Victory {
                survivor: survivor.clone(),
            });
        }
        self.pause(session).await;
        Ok(())
    }

    fn checkpoint(&self, session: &GameSession) -> Result<(), GameEnd> {
        if session.is_terminated() {
            Err(GameEnd::Terminated)
        } else {
            Ok(())
        }
    }

    async fn generate(&self, phase: Phase, request: &GenerationRequest) -> Result<String, GameEnd> {
        match self.generator.generate(request).await {
            Some(text) => Ok(text),
            None => {
                warn!(%phase, "generation failed");
                Err(GameEnd::GenerationFailed { phase })
            }
        }
    }

    /// Posts to the channel. Delivery failures are logged and do not touch
    /// the game state.
    async fn post(&self, text: &str) -> Option<MessageId> {
        match self.channel.send_message(text).await {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(error = %err, "failed to post message");
                None
            }
        }
    }

    async fn pause(&self, session: &GameSession) {
        if self.phase_delay.is_zero() {
            return;
        }
        let delay = self.phase_delay.div_f64(session.speed().multiplier());
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use lastlight_narrative::{HeuristicInterpreter, RelationKind};
    use lastlight_roster::Roster;
    use lastlight_test_support::{
        FailingSnapshotStore, FixedClock, InMemorySnapshotStore, MockRng, RecordingChannel,
        ScriptedGenerator, SequenceRng,
    };
    use uuid::Uuid;

    use super::*;
    use crate::application::snapshots::load_snapshot;
    use crate::domain::state::GameState;

    const SCENE: &str = "- Jordan helps Ella over the fence\n- Dylan argues with Jordan";
    const HEALTH: &str = "Jordan: bruised but steady\nElla: twisted ankle\nDylan: unhurt";
    const DILEMMA: &str = "- The fence is failing\n- Ella cannot run";
    const CHOICES: &str = "1. Carry Ella to the roof\n2. Hide in the basement";

    struct Harness {
        generator: Arc<ScriptedGenerator>,
        channel: Arc<RecordingChannel>,
        store: Arc<InMemorySnapshotStore>,
        engine: RoundEngine,
    }

    fn harness(replies: Vec<Option<&str>>, counts: ReactionCounts) -> Harness {
        harness_with_rng(replies, counts, Box::new(MockRng))
    }

    fn harness_with_rng(
        replies: Vec<Option<&str>>,
        counts: ReactionCounts,
        rng: Box<dyn DeterministicRng>,
    ) -> Harness {
        let generator = Arc::new(ScriptedGenerator::new(replies));
        let channel = Arc::new(RecordingChannel::with_counts(counts));
        let store = Arc::new(InMemorySnapshotStore::new());
        let engine = RoundEngine::new(
            generator.clone(),
            Arc::new(HeuristicInterpreter::standard()),
            channel.clone(),
            store.clone(),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())),
            rng,
        )
        .with_votes(VoteAggregator::new(
            Duration::ZERO,
            Duration::from_millis(100),
            Duration::from_secs(1),
        ))
        .with_phase_delay(Duration::ZERO);
        Harness {
            generator,
            channel,
            store,
            engine,
        }
    }

    fn session(alive: &[&str]) -> GameSession {
        let mut state = GameState::new(Uuid::nil(), "alice", Roster::standard());
        state.alive = alive.iter().map(|n| (*n).to_owned()).collect();
        GameSession::new(state)
    }

    fn round(outcome: &str) -> Vec<Option<&str>> {
        vec![
            Some(SCENE),
            Some(HEALTH),
            Some(DILEMMA),
            Some(CHOICES),
            Some(outcome),
        ]
    }

    #[test]
    fn test_winning_option_ties_favor_first() {
        assert_eq!(winning_option(ReactionCounts::new(2, 2)), Some(VoteOption::First));
        assert_eq!(winning_option(ReactionCounts::new(0, 1)), Some(VoteOption::Second));
        assert_eq!(winning_option(ReactionCounts::new(0, 0)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_ends_in_victory_when_one_survives() {
        // Arrange
        let h = harness(
            round("- Dylan is dragged under\n- Ella falls\nDeaths: Dylan Vo, Ella Muy\nSurvivors: Jordan"),
            ReactionCounts::new(3, 1),
        );
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        // Act
        let end = h.engine.run(&session).await;

        // Assert
        assert_eq!(
            end,
            GameEnd::Victory {
                survivor: "Jordan".into()
            }
        );
        let state = session.state();
        assert_eq!(state.alive, vec!["Jordan"]);
        assert_eq!(state.dead, vec!["Dylan Vo", "Ella Muy"]);
        assert_eq!(state.round_number, 2);
        assert!(state.terminated);
        assert_eq!(h.store.save_count(), 1);

        let posts = h.channel.sent_texts();
        assert!(posts[0].starts_with("🌒 **Round 1**\n• **Jordan** helps **Ella**"));
        assert!(posts.iter().any(|p| p.contains("💀 Fallen: Dylan Vo, Ella Muy")));
        assert!(posts.last().unwrap().contains("**Jordan** is the last one standing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_characters_left_off_survivor_list_fall() {
        // Arrange
        let h = harness(
            round("Deaths: Dylan Vo\nSurvivors: Jordan"),
            ReactionCounts::new(1, 0),
        );
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        // Act
        let end = h.engine.run(&session).await;

        // Assert
        assert_eq!(
            end,
            GameEnd::Victory {
                survivor: "Jordan".into()
            }
        );
        let state = session.state();
        assert_eq!(state.alive, vec!["Jordan"]);
        assert_eq!(state.dead, vec!["Dylan Vo", "Ella Muy"]);
        assert!(h
            .channel
            .sent_texts()
            .iter()
            .any(|p| p.contains("💀 Fallen: Dylan Vo, Ella Muy")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_survivor_list_keeps_the_randomly_spared_character() {
        // Arrange
        let h = harness_with_rng(
            round("Deaths: Jordan\nSurvivors:"),
            ReactionCounts::new(1, 0),
            Box::new(SequenceRng::new(vec![1])),
        );
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        // Act
        let end = h.engine.run(&session).await;

        // Assert
        assert_eq!(
            end,
            GameEnd::Victory {
                survivor: "Dylan Vo".into()
            }
        );
        assert_eq!(session.state().dead, vec!["Jordan", "Ella Muy"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scene_and_outcome_feed_stats() {
        let h = harness(
            round("Deaths: Dylan Vo, Ella Muy"),
            ReactionCounts::new(1, 0),
        );
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        h.engine.run(&session).await;

        let stats = session.state().stats;
        assert_eq!(stats.character("Jordan").unwrap().helpful, 1);
        assert_eq!(
            stats.pair(RelationKind::Conflict, "Dylan Vo", "Jordan"),
            1
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tie_sends_option_one_to_outcome() {
        let h = harness(round("Deaths: Ella Muy, Dylan Vo"), ReactionCounts::new(2, 2));
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        h.engine.run(&session).await;

        let requests = h.generator.requests();
        assert_eq!(requests.len(), 5);
        assert!(requests[4].prompt.contains("The group chose: 1. Carry Ella to the roof"));
        assert_eq!(session.state().last_choice, "1. Carry Ella to the roof");
        assert_eq!(
            session.state().options,
            vec!["1. Carry Ella to the roof", "2. Hide in the basement"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_votes_end_the_game_without_outcome() {
        // Arrange
        let h = harness(round("unused"), ReactionCounts::new(0, 0));
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        // Act
        let end = h.engine.run(&session).await;

        // Assert
        assert_eq!(end, GameEnd::NoVotes);
        assert_eq!(h.generator.requests().len(), 4);
        assert_eq!(h.store.save_count(), 0);
        assert_eq!(session.state().alive.len(), 3);
        assert!(h.channel.sent_texts().last().unwrap().contains("No votes were cast"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_failure_names_phase_and_stops() {
        let h = harness(vec![Some(SCENE), None], ReactionCounts::new(1, 0));
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        let end = h.engine.run(&session).await;

        assert_eq!(
            end,
            GameEnd::GenerationFailed {
                phase: Phase::Health
            }
        );
        assert!(h.channel.sent_texts().last().unwrap().contains("The health phase failed"));
        assert_eq!(h.store.save_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_termination_is_observed_before_first_phase() {
        let h = harness(round("unused"), ReactionCounts::new(1, 0));
        let session = session(&["Jordan", "Ella Muy"]);
        session.request_termination();

        let end = h.engine.run(&session).await;

        assert_eq!(end, GameEnd::Terminated);
        assert!(h.generator.requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rounds_loop_until_one_remains() {
        // Arrange
        let mut replies = round("- The night passes quietly\nDeaths: None");
        replies.extend(round("- Jordan is bitten"));
        replies.extend(round("Deaths: Dylan Vo"));
        let h = harness(replies, ReactionCounts::new(0, 4));
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        // Act
        let end = h.engine.run(&session).await;

        // Assert
        assert_eq!(
            end,
            GameEnd::Victory {
                survivor: "Ella Muy".into()
            }
        );
        assert_eq!(h.generator.requests().len(), 15);
        assert_eq!(h.store.save_count(), 3);
        let saved = load_snapshot(h.store.as_ref()).await.unwrap();
        assert_eq!(saved.round_number, 4);
        assert_eq!(saved.dead, vec!["Jordan", "Dylan Vo"]);
        assert!(h.generator.requests()[4]
            .prompt
            .contains("The group chose: 2. Hide in the basement"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_platform_failures_do_not_corrupt_state() {
        // Arrange
        let generator = Arc::new(ScriptedGenerator::new(round("Deaths: Jordan")));
        let channel = Arc::new(RecordingChannel::with_counts(ReactionCounts::new(1, 0)));
        channel.fail_delivery(true);
        let engine = RoundEngine::new(
            generator,
            Arc::new(HeuristicInterpreter::standard()),
            channel,
            Arc::new(FailingSnapshotStore),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())),
            Box::new(MockRng),
        )
        .with_phase_delay(Duration::ZERO);
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);

        // Act
        let end = engine.run(&session).await;

        // Assert
        assert_eq!(end, GameEnd::NoVotes);
        assert_eq!(session.state().alive.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_scales_with_speed() {
        // Arrange
        let h = harness(round("Deaths: Ella Muy, Dylan Vo"), ReactionCounts::new(1, 0));
        let engine = h.engine.with_phase_delay(Duration::from_secs(2));
        let session = session(&["Jordan", "Ella Muy", "Dylan Vo"]);
        session.update(|s| s.set_speed(2.0));
        let started = tokio::time::Instant::now();

        // Act
        engine.run(&session).await;

        // Assert
        // Four pauses of one second plus a vote window of 100ms.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(4100), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(4200), "{elapsed:?}");
    }
}
