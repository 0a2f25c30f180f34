//! Prompt construction for each generative phase.
//!
//! Prompts are bounded: they name only the alive cast, and prior narration
//! is limited to the state's tail window.

use lastlight_generation::GenerationRequest;
use lastlight_roster::Roster;

use crate::domain::state::GameState;

/// System directive shared by every phase.
pub const SYSTEM_DIRECTIVE: &str = "You are the narrator of a grim, cinematic survival story \
played by a group chat. Write tight, vivid prose. Only use the characters you are given. \
Never address the players directly.";

const SCENE_TEMPERATURE: f32 = 0.9;
const HEALTH_TEMPERATURE: f32 = 0.5;
const DILEMMA_TEMPERATURE: f32 = 0.8;
const CHOICES_TEMPERATURE: f32 = 0.7;
const OUTCOME_TEMPERATURE: f32 = 0.85;

fn cast_section(state: &GameState, roster: &Roster) -> String {
    let mut section = format!("Alive characters:\n{}", roster.trait_summary(&state.alive));
    if !state.dead.is_empty() {
        section.push_str("\n\nAlready dead (never bring them back): ");
        section.push_str(&state.dead.join(", "));
    }
    section
}

fn context_section(state: &GameState) -> String {
    let mut section = String::new();
    if !state.story_context.is_empty() {
        section.push_str("Story so far (most recent last):\n");
        section.push_str(&state.story_context);
        section.push_str("\n\n");
    }
    if !state.last_choice.is_empty() {
        section.push_str("The group last chose: ");
        section.push_str(&state.last_choice);
        section.push_str("\n\n");
    }
    section
}

/// Opening narration of a round.
#[must_use]
pub fn scene(state: &GameState, roster: &Roster) -> GenerationRequest {
    let prompt = format!(
        "{context}Round {round}.\n\n{cast}\n\n\
         Write the next scene as 4 to 6 short bullet points. Mention characters by name, \
         show how they treat each other, and end on rising tension. Nobody dies in this scene.",
        context = context_section(state),
        round = state.round_number,
        cast = cast_section(state, roster),
    );
    GenerationRequest::new(SYSTEM_DIRECTIVE, prompt, SCENE_TEMPERATURE)
}

/// Condition descriptors for the alive cast.
#[must_use]
pub fn health(state: &GameState, scene_text: &str) -> GenerationRequest {
    let prompt = format!(
        "Scene:\n{scene_text}\n\n\
         For each of these characters, give their physical and mental condition in at most \
         seven words, one per line, formatted as `Name: condition`. List the healthiest first \
         and the worst off last.\n{}",
        state.alive.join("\n"),
    );
    GenerationRequest::new(SYSTEM_DIRECTIVE, prompt, HEALTH_TEMPERATURE)
}

/// The two problems the group faces.
#[must_use]
pub fn dilemma(scene_text: &str, health_text: &str) -> GenerationRequest {
    let prompt = format!(
        "Scene:\n{scene_text}\n\nCondition of the group:\n{health_text}\n\n\
         State the dilemma the group now faces as exactly two bullet points, one sentence each."
    );
    GenerationRequest::new(SYSTEM_DIRECTIVE, prompt, DILEMMA_TEMPERATURE)
}

/// The two options put to the vote.
#[must_use]
pub fn choices(dilemma_text: &str) -> GenerationRequest {
    let prompt = format!(
        "Dilemma:\n{dilemma_text}\n\n\
         Offer exactly two concrete courses of action, each with a real cost. \
         Format them as two lines starting with `1.` and `2.` and nothing else."
    );
    GenerationRequest::new(SYSTEM_DIRECTIVE, prompt, CHOICES_TEMPERATURE)
}

/// Consequences of the chosen option, with labeled deaths and survivors.
#[must_use]
pub fn outcome(
    state: &GameState,
    roster: &Roster,
    choice: &str,
    scene_text: &str,
) -> GenerationRequest {
    let prompt = format!(
        "{context}Current scene:\n{scene_text}\n\n{cast}\n\n\
         The group chose: {choice}\n\n\
         Narrate what happens next in 4 to 6 short bullet points. The choice has consequences \
         and someone may die. Then finish with two labeled lines:\n\
         Deaths: <comma-separated names, or None>\n\
         Survivors: <comma-separated names>",
        context = context_section(state),
        cast = cast_section(state, roster),
    );
    GenerationRequest::new(SYSTEM_DIRECTIVE, prompt, OUTCOME_TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn state() -> GameState {
        let mut state = GameState::new(Uuid::nil(), "alice", Roster::standard());
        state.alive = vec!["Jordan".into(), "Ella Muy".into()];
        state.dead = vec!["Shaun Sadsarin".into()];
        state
    }

    #[test]
    fn test_scene_prompt_lists_alive_with_traits_and_dead() {
        let request = scene(&state(), Roster::standard());

        assert!(request.prompt.contains("- Jordan (22, male)"));
        assert!(request.prompt.contains("Already dead (never bring them back): Shaun Sadsarin"));
        assert!(!request.prompt.contains("Kate Nguyen"));
        assert_eq!(request.system, SYSTEM_DIRECTIVE);
    }

    #[test]
    fn test_scene_prompt_includes_context_and_last_choice() {
        let mut state = state();
        state.append_context("The mall burned.");
        state.last_choice = "1. Run for the van".into();

        let request = scene(&state, Roster::standard());

        assert!(request.prompt.contains("The mall burned."));
        assert!(request.prompt.contains("The group last chose: 1. Run for the van"));
    }

    #[test]
    fn test_outcome_prompt_asks_for_labels() {
        let request = outcome(&state(), Roster::standard(), "2. Hide", "Rain.");

        assert!(request.prompt.contains("The group chose: 2. Hide"));
        assert!(request.prompt.contains("Deaths:"));
        assert!(request.prompt.contains("Survivors:"));
    }

    #[test]
    fn test_health_prompt_names_only_alive() {
        let request = health(&state(), "Rain.");

        assert!(request.prompt.ends_with("Jordan\nElla Muy"));
    }
}
