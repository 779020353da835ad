//! Branch switching

use fixture_git::{ChangeKind, CheckoutOutcome, GitEngine};

use crate::Result;

/// Make `branch` the current HEAD, creating it at HEAD when allowed.
///
/// Untracked files survive the switch and would be swept into the next
/// commit; they are logged so such leakage is visible.
pub fn switch_branch<E: GitEngine>(
    engine: &E,
    branch: &str,
    create: bool,
) -> Result<CheckoutOutcome> {
    let outcome = engine.checkout(branch, create)?;

    match &outcome {
        CheckoutOutcome::AlreadyCurrent => {
            tracing::debug!(branch = %branch, "Already on branch");
        }
        CheckoutOutcome::Switched { tip } => {
            tracing::info!(branch = %branch, tip = %tip, "Switched branch");
        }
        CheckoutOutcome::Created { fork_point } => {
            tracing::info!(branch = %branch, fork_point = ?fork_point, "Created branch");
        }
    }

    if !matches!(outcome, CheckoutOutcome::AlreadyCurrent) {
        let leftovers: Vec<String> = engine
            .status()?
            .into_iter()
            .filter(|entry| entry.kind == ChangeKind::Untracked)
            .map(|entry| entry.path)
            .collect();
        if !leftovers.is_empty() {
            tracing::warn!(
                branch = %branch,
                paths = ?leftovers,
                "Untracked files carried across checkout"
            );
        }
    }

    Ok(outcome)
}
