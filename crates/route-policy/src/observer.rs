//! Diagnostics emitted while building and evaluating policies.
//!
//! The engine never logs directly from its algorithms.  Every diagnostic is
//! a [`PolicyEvent`] handed to the [`PolicyObserver`] the policy was built
//! with, so evaluation results do not depend on whether anything listens.

use std::fmt;
use std::net::IpAddr;

use tracing::{debug, error, trace, warn};

/// A diagnostic raised by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyEvent<'a> {
    /// Range text without a `..` separator; the prefix falls back to exact
    /// matching.
    MalformedMaskRange { range: &'a str },
    /// A prefix-set entry could not be turned into a prefix and was skipped.
    PrefixSkipped {
        prefix_set: &'a str,
        address: &'a str,
        error: String,
    },
    /// A configured prefix could not be rebuilt into a network while range
    /// matching.  That comparison is a no-match.
    CidrParseFailed {
        address: IpAddr,
        masklength: u8,
        error: String,
    },
    /// A condition had nothing to filter on and passed the route through.
    EmptyConditionList { kind: ConditionKind },
    PrefixMatched { address: IpAddr, masklength: u8 },
    StatementEvaluated {
        policy: &'a str,
        statement: &'a str,
        matched: bool,
    },
    /// A policy table was asked for a policy it does not hold.
    UnknownPolicy { name: &'a str },
}

/// Which condition variant an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Prefix,
    Neighbor,
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::Prefix => f.write_str("prefix"),
            ConditionKind::Neighbor => f.write_str("neighbor"),
        }
    }
}

/// Sink for [`PolicyEvent`]s.
///
/// Observers are shared by every evaluation of a policy and must be cheap
/// and thread-safe.
pub trait PolicyObserver: Send + Sync {
    fn on_event(&self, event: &PolicyEvent<'_>);
}

/// Forwards events to `tracing` under the `policy` topic.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PolicyObserver for TracingObserver {
    fn on_event(&self, event: &PolicyEvent<'_>) {
        match event {
            PolicyEvent::MalformedMaskRange { range } => {
                warn!(
                    topic = "policy",
                    mask_range_format = range,
                    "mask length range format is invalid; mask range was skipped"
                );
            }
            PolicyEvent::PrefixSkipped {
                prefix_set,
                address,
                error,
            } => {
                warn!(
                    topic = "policy",
                    prefix_set,
                    address,
                    error = %error,
                    "failed to build a prefix from configuration; entry skipped"
                );
            }
            PolicyEvent::CidrParseFailed {
                address,
                masklength,
                error,
            } => {
                error!(
                    topic = "policy",
                    %address,
                    masklength,
                    error = %error,
                    "failed to parse the prefix of condition"
                );
            }
            PolicyEvent::EmptyConditionList { kind } => {
                trace!(topic = "policy", %kind, "condition list is empty; route passes");
            }
            PolicyEvent::PrefixMatched {
                address,
                masklength,
            } => {
                debug!(topic = "policy", %address, masklength, "prefix matched");
            }
            PolicyEvent::StatementEvaluated {
                policy,
                statement,
                matched,
            } => {
                debug!(topic = "policy", policy, statement, matched, "statement evaluated");
            }
            PolicyEvent::UnknownPolicy { name } => {
                warn!(topic = "policy", policy = name, "policy is not defined; skipped");
            }
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PolicyObserver for NoopObserver {
    fn on_event(&self, _event: &PolicyEvent<'_>) {}
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingObserver;
    use super::*;

    #[test]
    fn recording_observer_keeps_events_in_order() {
        let obs = RecordingObserver::default();
        obs.on_event(&PolicyEvent::MalformedMaskRange { range: "24" });
        obs.on_event(&PolicyEvent::UnknownPolicy { name: "missing" });

        let events = obs.events();
        assert_eq!(events.len(), 2);
        assert!(events[0].starts_with("MalformedMaskRange"));
        assert!(obs.saw("missing"));
    }

    #[test]
    fn builtin_observers_accept_every_event() {
        let events = [
            PolicyEvent::MalformedMaskRange { range: "" },
            PolicyEvent::EmptyConditionList {
                kind: ConditionKind::Neighbor,
            },
            PolicyEvent::CidrParseFailed {
                address: "10.0.0.0".parse().unwrap(),
                masklength: 40,
                error: "invalid prefix length".to_string(),
            },
        ];
        for event in &events {
            TracingObserver.on_event(event);
            NoopObserver.on_event(event);
        }
    }

    #[test]
    fn condition_kind_display() {
        assert_eq!(ConditionKind::Prefix.to_string(), "prefix");
        assert_eq!(ConditionKind::Neighbor.to_string(), "neighbor");
    }
}
