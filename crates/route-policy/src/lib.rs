//! # route-policy
//!
//! Route-admission policy engine for a BGP speaker.  This crate loads YAML
//! routing-policy files, builds prefix and neighbor conditions from named
//! defined sets, and decides per route whether it is accepted, rejected or
//! left to the caller's default.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use route_policy::{loader, DefaultPolicy, PolicyTable, Route, TracingObserver};
//!
//! let config = loader::load_policy("policy.yaml").unwrap();
//! let table = PolicyTable::from_config(&config, Arc::new(TracingObserver));
//! let route = Route::from_cidr("10.0.0.0/24", "192.0.2.1".parse().unwrap()).unwrap();
//! let decision = table.evaluate(&["import-v4"], DefaultPolicy::RejectRoute, &route);
//! println!("{:?}", decision.route_type);
//! ```

mod action;
mod condition;
mod decision;
mod error;
pub mod loader;
pub mod matcher;
mod observer;
mod policy;
mod prefix;
mod route;
mod schema;
mod statement;
mod table;

// Re-export primary public API at crate root.
pub use action::{Action, BgpAttrType, ModificationAction, RoutingAction};
pub use condition::{Condition, NeighborCondition, PrefixCondition};
pub use decision::{DefaultPolicy, PolicyDecision, PolicyOutcome, RouteType};
pub use error::PrefixError;
pub use observer::{ConditionKind, NoopObserver, PolicyEvent, PolicyObserver, TracingObserver};
pub use policy::Policy;
pub use prefix::{MaskLengthRange, Prefix};
pub use route::{Ipv4AddrPrefix, Ipv6AddrPrefix, Nlri, Path, Route, RouteFamily};
pub use schema::{
    ActionsDefinition, ConditionsDefinition, DefinedSets, MatchSetOptions, NeighborInfo,
    NeighborSet, PolicyConfig, PolicyDefinition, PrefixEntry, PrefixSet, StatementDefinition,
};
pub use statement::Statement;
pub use table::PolicyTable;
