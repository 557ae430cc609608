use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::decision::{DefaultPolicy, PolicyDecision, RouteType};
use crate::observer::{PolicyEvent, PolicyObserver};
use crate::policy::Policy;
use crate::route::Path;
use crate::schema::PolicyConfig;

/// Every policy of a configuration, built once and keyed by name.
pub struct PolicyTable {
    policies: HashMap<String, Arc<Policy>>,
    observer: Arc<dyn PolicyObserver>,
}

impl fmt::Debug for PolicyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.policies.keys().collect();
        names.sort();
        f.debug_struct("PolicyTable").field("policies", &names).finish()
    }
}

impl PolicyTable {
    pub fn from_config(config: &PolicyConfig, observer: Arc<dyn PolicyObserver>) -> Self {
        let policies = config
            .policy_definitions
            .iter()
            .map(|def| {
                let policy = Policy::new(
                    def.name.clone(),
                    def,
                    &config.defined_sets,
                    Arc::clone(&observer),
                );
                (def.name.clone(), Arc::new(policy))
            })
            .collect();
        Self { policies, observer }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Policy>> {
        self.policies.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// Apply the named policies in order and fall back to `default`.
    ///
    /// The first policy with a matching statement decides.  Names the table
    /// does not hold are reported and skipped.
    pub fn evaluate<P, S>(
        &self,
        names: &[S],
        default: DefaultPolicy,
        path: &P,
    ) -> PolicyDecision<P>
    where
        P: Path + Clone,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            let Some(policy) = self.policies.get(name) else {
                self.observer.on_event(&PolicyEvent::UnknownPolicy { name });
                continue;
            };
            let outcome = policy.apply(path);
            if outcome.route_type != RouteType::None {
                return PolicyDecision {
                    route_type: outcome.route_type,
                    path: outcome.path,
                    policy: Some(name.to_string()),
                    statement: outcome.statement,
                };
            }
        }
        PolicyDecision::from_default(default, path.clone())
    }
}
