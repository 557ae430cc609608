use std::fmt;

use serde::{Deserialize, Serialize};

/// The verdict a policy reached for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    /// No statement matched; the caller applies its default.
    None,
    Accept,
    Reject,
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteType::None => f.write_str("none"),
            RouteType::Accept => f.write_str("accept"),
            RouteType::Reject => f.write_str("reject"),
        }
    }
}

/// The result of applying one policy to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyOutcome<P> {
    /// Whether any statement matched.
    pub matched: bool,
    pub route_type: RouteType,
    /// The route to install, present only when accepted.
    pub path: Option<P>,
    /// Name of the statement that decided, if any.
    pub statement: Option<String>,
}

impl<P> PolicyOutcome<P> {
    /// Outcome for a route no statement matched.
    pub fn no_match() -> Self {
        Self {
            matched: false,
            route_type: RouteType::None,
            path: None,
            statement: None,
        }
    }

    pub fn accepted(path: P, statement: impl Into<String>) -> Self {
        Self {
            matched: true,
            route_type: RouteType::Accept,
            path: Some(path),
            statement: Some(statement.into()),
        }
    }

    pub fn rejected(statement: impl Into<String>) -> Self {
        Self {
            matched: true,
            route_type: RouteType::Reject,
            path: None,
            statement: Some(statement.into()),
        }
    }
}

/// Action taken when none of the applied policies reaches a verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultPolicy {
    #[default]
    AcceptRoute,
    RejectRoute,
}

/// The final verdict after a chain of policies and the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDecision<P> {
    pub route_type: RouteType,
    pub path: Option<P>,
    /// Policy that decided; `None` when the default applied.
    pub policy: Option<String>,
    pub statement: Option<String>,
}

impl<P> PolicyDecision<P> {
    pub fn is_accepted(&self) -> bool {
        self.route_type == RouteType::Accept
    }

    /// Decision from the default policy.
    pub fn from_default(default: DefaultPolicy, path: P) -> Self {
        let (route_type, path) = match default {
            DefaultPolicy::AcceptRoute => (RouteType::Accept, Some(path)),
            DefaultPolicy::RejectRoute => (RouteType::Reject, None),
        };
        Self {
            route_type,
            path,
            policy: None,
            statement: None,
        }
    }
}
