//! Remediation advice attached to report entries: an immediate in-place
//! refactor track and a component-migration track per smell.

use crate::core::metrics::SmellMetrics;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdviceBundle {
    pub refactor: Vec<String>,
    pub migration: Vec<String>,
}

/// Render the advice bundle for a rule. Pure and deterministic; an unknown
/// rule id falls back to a generic pointer instead of failing.
pub fn advise(rule_id: &str, metrics: &SmellMetrics) -> AdviceBundle {
    let total = metrics.total_occurrences();
    match rule_id {
        "scope-property-sprawl" => AdviceBundle {
            refactor: vec![
                with_examples(
                    &format!(
                        "Enforce controllerAs to eliminate the {total} implicit $scope references"
                    ),
                    metrics,
                ),
                "Relocate data manipulation and logic into services.".to_string(),
                "Restrict the controller to view-model exposure only.".to_string(),
            ],
            migration: vec![
                "Replace $scope state with component-local state hooks.".to_string(),
                "Centralize shared state with context or a state management library.".to_string(),
                "Transfer reusable logic into custom hooks or isolated utility modules."
                    .to_string(),
            ],
        },
        "global-scope-leak" => AdviceBundle {
            refactor: vec![
                with_examples(
                    &format!("Remove the {total} $rootScope dependencies and stop broadcasting global events"),
                    metrics,
                ),
                "Establish dedicated state services instead of global event reliance.".to_string(),
                "Confine cross-component communication to service contracts.".to_string(),
            ],
            migration: vec![
                "Substitute $rootScope with context-based global state.".to_string(),
                "Convert broadcast patterns to explicit prop or store flows.".to_string(),
                "Avoid implicit global dependencies in the component hierarchy.".to_string(),
            ],
        },
        "controller-method-sprawl" => AdviceBundle {
            refactor: vec![
                with_examples(
                    &format!("Move the {total} $scope methods into services and keep the controller thin"),
                    metrics,
                ),
                "Delegate reactive logic to services or lifecycle abstractions.".to_string(),
                "Contain side effects within structured callback mechanisms.".to_string(),
            ],
            migration: vec![
                "Convert $scope methods into component handlers or custom hooks.".to_string(),
                "Embed lifecycle transitions within the component execution context.".to_string(),
                "Extract side effects into encapsulated hooks.".to_string(),
            ],
        },
        "template-binding-coupling" => AdviceBundle {
            refactor: vec![
                with_examples(
                    &format!("Eliminate the {total} bound expressions and calls from the template"),
                    metrics,
                ),
                "Define computed values within the controller layer.".to_string(),
                "Ensure templates access only resolved controller state.".to_string(),
            ],
            migration: vec![
                "Shift view logic into the component body or memoized selectors.".to_string(),
                "Keep the rendered markup declarative over resolved state only.".to_string(),
                "Isolate complex logic into hooks or helper modules.".to_string(),
            ],
        },
        "direct-dom-access" => AdviceBundle {
            refactor: vec![
                with_examples(
                    &format!("Remove the {total} direct DOM accesses from controllers and services"),
                    metrics,
                ),
                "Encapsulate element interaction within directive boundaries.".to_string(),
                "Replace manual mutation with binding-based rendering.".to_string(),
            ],
            migration: vec![
                "Employ refs only at integration boundaries.".to_string(),
                "Delegate DOM updates to state-driven rendering.".to_string(),
                "Restrict imperative access to controlled escape hatches.".to_string(),
            ],
        },
        "legacy-dom-library-usage" => AdviceBundle {
            refactor: vec![
                with_examples(
                    &format!("Eliminate the {total} jQuery calls from component logic"),
                    metrics,
                ),
                "Substitute DOM manipulation with directive-backed bindings.".to_string(),
                "Replace AJAX calls with $http or service wrappers.".to_string(),
            ],
            migration: vec![
                "Adopt fetch or axios inside data hooks.".to_string(),
                "Bind UI state through component props and internal state.".to_string(),
                "Remove imperative patterns in favor of declarative rendering.".to_string(),
            ],
        },
        _ => AdviceBundle {
            refactor: vec!["Check the migration guide for recommendations.".to_string()],
            migration: vec!["Check the migration guide for recommendations.".to_string()],
        },
    }
}

fn with_examples(line: &str, metrics: &SmellMetrics) -> String {
    match shown_samples(metrics) {
        Some(names) => format!("{line} (e.g. {names})."),
        None => format!("{line}."),
    }
}

/// Up to 3 sample names; a trailing marker signals that more were recorded.
fn shown_samples(metrics: &SmellMetrics) -> Option<String> {
    let samples = metrics.samples();
    if samples.is_empty() {
        return None;
    }
    let mut shown = samples
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if samples.len() > 3 {
        shown.push_str(", ...");
    }
    Some(shown)
}
