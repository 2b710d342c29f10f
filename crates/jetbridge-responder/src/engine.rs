//! Calculator engine port and an in-memory implementation.
//!
//! The host evaluates calculator code (reverse-polish gauge expressions).
//! The responder only needs two entry points: run code for its side effects,
//! or run it and read back a number.

use crate::error::ResponderError;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Host calculator (Driven Port)
pub trait CalculatorEngine: Send + Sync {
    /// Run code for its side effects.
    fn execute(&self, code: &str) -> Result<(), ResponderError>;

    /// Run code and return its numeric result.
    fn evaluate(&self, code: &str) -> Result<f64, ResponderError>;
}

/// Engine holding named variables in memory.
///
/// Understands two forms, enough to stand in for the host in tests:
/// `<number> (>L:NAME)` stores a value, and `(L:NAME)` reads it back. Every
/// executed string is recorded.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    variables: RwLock<HashMap<String, f64>>,
    executed: RwLock<Vec<String>>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a variable, e.g. `set("L:A32NX_FLAPS", 2.0)`.
    pub fn set(&self, name: &str, value: f64) {
        self.variables.write().insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.variables.read().get(name).copied()
    }

    /// Code strings passed to `execute`, oldest first.
    pub fn executed(&self) -> Vec<String> {
        self.executed.read().clone()
    }
}

impl CalculatorEngine for InMemoryEngine {
    fn execute(&self, code: &str) -> Result<(), ResponderError> {
        self.executed.write().push(code.to_string());

        let mut tokens = code.split_whitespace();
        if let (Some(value), Some(target), None) = (tokens.next(), tokens.next(), tokens.next()) {
            if let (Ok(value), Some(name)) = (value.parse::<f64>(), store_target(target)) {
                self.set(name, value);
            }
        }
        Ok(())
    }

    fn evaluate(&self, code: &str) -> Result<f64, ResponderError> {
        let name = code
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| ResponderError::Engine(format!("unsupported expression: {code}")))?;

        self.get(name)
            .ok_or_else(|| ResponderError::UnknownVariable(name.to_string()))
    }
}

/// `(>L:NAME)` -> `L:NAME`
fn store_target(token: &str) -> Option<&str> {
    token.strip_prefix("(>")?.strip_suffix(')')
}
