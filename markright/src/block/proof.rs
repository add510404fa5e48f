use serde::Serialize;

/// A single inference rule: premises over a conclusion, optionally labelled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProofTree {
    pub premises: Vec<String>,
    /// Rule name from the `[label]` line.
    pub label: Option<String>,
    pub conclusion: String,
}

impl ProofTree {
    /// Number of premises the rule combines. An axiom counts as one.
    pub fn arity(&self) -> usize {
        self.premises.len().max(1)
    }
}
