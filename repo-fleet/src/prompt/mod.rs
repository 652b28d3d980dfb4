//! Interactive selection of an environment, branch and base branch.
//!
//! The flow mirrors what an operator sees: a numbered menu (re-asked until a
//! valid number arrives), the new branch name, the base branch with a
//! default, and a confirmation of the full plan. Every answer can be preset
//! through [`PlanPresets`] for unattended runs.

mod error;
mod terminal;

pub use error::PromptError;
pub use terminal::TerminalPrompter;

use crate::config::{validate_branch_name, FleetCatalog};
use tracing::debug;

/// Line-oriented operator interaction.
pub trait Prompter {
    /// Shows one line of text.
    fn say(&mut self, line: &str);

    /// Asks a question and returns the raw answer.
    fn ask(&mut self, message: &str) -> Result<String, PromptError>;
}

/// Answers supplied up front instead of interactively.
#[derive(Debug, Clone, Default)]
pub struct PlanPresets {
    /// Environment name.
    pub environment: Option<String>,

    /// New branch name.
    pub branch: Option<String>,

    /// Base branch name.
    pub base: Option<String>,

    /// Skip the confirmation.
    pub assume_yes: bool,
}

/// A confirmed branch creation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPlan {
    /// Selected environment.
    pub environment: String,

    /// Repositories of that environment, in catalog order.
    pub repositories: Vec<String>,

    /// Branch to create.
    pub new_branch: String,

    /// Branch whose head the new branch starts from.
    pub base_branch: String,
}

/// What the operator decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanDecision {
    /// Go ahead with the plan.
    Proceed(BranchPlan),

    /// The operator declined at the confirmation.
    Cancelled,
}

/// Why a menu answer was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoiceError {
    /// Not an integer.
    NotANumber,

    /// An integer outside `1..=count`.
    OutOfRange,
}

/// Parses a 1-indexed menu answer into a zero-based index.
///
/// # Errors
///
/// Returns [`MenuChoiceError`] for non-numeric or out-of-range input.
pub fn parse_menu_choice(input: &str, count: usize) -> Result<usize, MenuChoiceError> {
    let choice: i64 = input
        .trim()
        .parse()
        .map_err(|_| MenuChoiceError::NotANumber)?;
    if choice < 1 || choice as u64 > count as u64 {
        return Err(MenuChoiceError::OutOfRange);
    }
    Ok((choice - 1) as usize)
}

/// Returns true for `y` or `yes` in any letter case.
#[must_use]
pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Substitutes `default` for an empty answer.
#[must_use]
pub fn base_branch_or_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Renders the confirmation summary shown before any mutation.
#[must_use]
pub fn render_plan(plan: &BranchPlan, owner: &str) -> Vec<String> {
    let rule = "=".repeat(50);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "           PLEASE CONFIRM YOUR ACTION".to_string(),
        rule.clone(),
        format!("  Environment:      {}", plan.environment),
        format!("  New Branch Name:  {}", plan.new_branch),
        format!("  Base Branch:      {}", plan.base_branch),
        String::new(),
        "This action will create the new branch in the following repositories:".to_string(),
    ];
    lines.extend(
        plan.repositories
            .iter()
            .map(|repo| format!("  - {owner}/{repo}")),
    );
    lines.push(rule);
    lines
}

/// Walks the operator through the selection and confirmation.
///
/// # Errors
///
/// Returns [`PromptError::EmptyBranchName`] for an empty branch name,
/// [`PromptError::InvalidBranchName`] for names git would reject, and
/// [`PromptError::UnknownEnvironment`] for a preset missing from the catalog.
/// A declined confirmation is not an error: it yields
/// [`PlanDecision::Cancelled`].
pub fn collect_plan(
    prompter: &mut dyn Prompter,
    catalog: &FleetCatalog,
    presets: &PlanPresets,
) -> Result<PlanDecision, PromptError> {
    let environment = match &presets.environment {
        Some(name) => catalog
            .environment(name)
            .ok_or_else(|| PromptError::UnknownEnvironment {
                name: name.clone(),
            })?,
        None => {
            let index = select_environment(prompter, catalog)?;
            &catalog.environments[index]
        }
    };
    debug!(environment = %environment.name, "Environment selected");

    let new_branch = match &presets.branch {
        Some(branch) => branch.trim().to_string(),
        None => prompter
            .ask("Enter the name for the new branch:")?
            .trim()
            .to_string(),
    };
    if new_branch.is_empty() {
        return Err(PromptError::EmptyBranchName);
    }
    validate_branch_name(&new_branch)?;

    let default_base = catalog.default_base_branch.as_str();
    let base_branch = match &presets.base {
        Some(base) => base_branch_or_default(base, default_base),
        None => {
            let question = format!("Enter the base branch name (default: {default_base}):");
            let answer = prompter.ask(&question)?;
            base_branch_or_default(&answer, default_base)
        }
    };
    validate_branch_name(&base_branch)?;

    let plan = BranchPlan {
        environment: environment.name.clone(),
        repositories: environment.repositories.clone(),
        new_branch,
        base_branch,
    };

    for line in render_plan(&plan, &catalog.owner) {
        prompter.say(&line);
    }

    if presets.assume_yes {
        return Ok(PlanDecision::Proceed(plan));
    }

    let answer = prompter.ask("Are you sure you want to proceed? (y/n):")?;
    if is_affirmative(&answer) {
        Ok(PlanDecision::Proceed(plan))
    } else {
        Ok(PlanDecision::Cancelled)
    }
}

/// Shows the numbered menu and asks until a valid entry is chosen.
fn select_environment(
    prompter: &mut dyn Prompter,
    catalog: &FleetCatalog,
) -> Result<usize, PromptError> {
    let names = catalog.names();
    prompter.say("Please select an environment to create branches in:");
    for (i, name) in names.iter().enumerate() {
        prompter.say(&format!("  {}. {}", i + 1, name));
    }

    let question = format!("Enter your choice (1-{}):", names.len());
    loop {
        let answer = prompter.ask(&question)?;
        match parse_menu_choice(&answer, names.len()) {
            Ok(index) => return Ok(index),
            Err(MenuChoiceError::OutOfRange) => {
                prompter.say("Invalid number. Please try again.");
            }
            Err(MenuChoiceError::NotANumber) => {
                prompter.say("Invalid input. Please enter a number.");
            }
        }
    }
}
