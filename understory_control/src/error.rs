// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the engine, the transition functions, and composed handlers.

use alloc::string::String;

/// Errors surfaced by [`StateEngine`](crate::engine::StateEngine) operations.
///
/// None of these are retried or translated by the engine; they propagate to
/// whoever called [`dispatch`](crate::engine::StateEngine::dispatch) or the
/// composed handler.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The transition function was handed an action it does not recognize.
    ///
    /// This is a programmer error: the reducer and the action set disagree.
    #[error("unsupported action: {action}")]
    UnsupportedAction {
        /// Debug rendering of the offending action.
        action: String,
    },
    /// A shared-state accessor was used outside the scope that provides it.
    #[error("`{accessor}` must be used within a `{scope}`")]
    MissingScope {
        /// Name of the scope that was expected to be active.
        scope: &'static str,
        /// Name of the accessor that was called.
        accessor: &'static str,
    },
    /// A consumer-supplied handler or change callback reported a failure.
    #[error("handler failed: {message}")]
    Handler {
        /// Message supplied by the failing handler.
        message: String,
    },
}

impl Error {
    /// Build an [`Error::Handler`] from any displayable message.
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn missing_scope_names_scope_and_accessor() {
        let e = Error::MissingScope {
            scope: "ToggleScope",
            accessor: "use_toggle_scope",
        };
        assert_eq!(
            e.to_string(),
            "`use_toggle_scope` must be used within a `ToggleScope`"
        );
    }

    #[test]
    fn handler_error_carries_message() {
        assert_eq!(
            Error::handler("boom").to_string(),
            "handler failed: boom"
        );
    }
}
