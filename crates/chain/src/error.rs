//! Error types for the clotho-chain crate.

/// Error type for all fallible operations in the clotho-chain crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainError {
    /// Returned when a distribution is requested for a state with no row.
    #[error("unknown state: {state}")]
    UnknownState {
        /// Debug rendering of the offending state.
        state: String,
    },

    /// Returned when a row's probability mass does not sum to 1.
    #[error("invalid distribution for state {state}: mass sums to {sum}, expected ~1.0")]
    InvalidDistribution {
        /// Debug rendering of the source state.
        state: String,
        /// The computed mass sum.
        sum: f64,
    },

    /// Returned when a single probability is negative or non-finite.
    #[error("invalid probability for transition {state} -> {dest}: {value}")]
    InvalidProbability {
        /// Debug rendering of the source state.
        state: String,
        /// Debug rendering of the destination state.
        dest: String,
        /// The invalid value.
        value: f64,
    },

    /// Returned when a board configuration is invalid.
    #[error("invalid board: {reason}")]
    InvalidBoard {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a redirect entry is out of range or degenerate.
    #[error("invalid redirect {from} -> {to}: {reason}")]
    InvalidRedirect {
        /// Redirect source square.
        from: u32,
        /// Redirect target square.
        to: u32,
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_unknown_state() {
        let e = ChainError::UnknownState {
            state: "7".to_string(),
        };
        assert_eq!(e.to_string(), "unknown state: 7");
    }

    #[test]
    fn error_invalid_distribution() {
        let e = ChainError::InvalidDistribution {
            state: "Cloudy".to_string(),
            sum: 1.1,
        };
        assert_eq!(
            e.to_string(),
            "invalid distribution for state Cloudy: mass sums to 1.1, expected ~1.0"
        );
    }

    #[test]
    fn error_invalid_probability() {
        let e = ChainError::InvalidProbability {
            state: "0".to_string(),
            dest: "3".to_string(),
            value: -0.5,
        };
        assert_eq!(
            e.to_string(),
            "invalid probability for transition 0 -> 3: -0.5"
        );
    }

    #[test]
    fn error_invalid_redirect() {
        let e = ChainError::InvalidRedirect {
            from: 16,
            to: 160,
            reason: "target beyond the terminal square".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid redirect 16 -> 160: target beyond the terminal square"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ChainError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ChainError>();
    }
}
