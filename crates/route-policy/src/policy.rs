use std::fmt;
use std::sync::Arc;

use crate::action::Action;
use crate::condition::{Condition, NeighborCondition, PrefixCondition};
use crate::decision::PolicyOutcome;
use crate::observer::{PolicyEvent, PolicyObserver};
use crate::route::Path;
use crate::schema::{DefinedSets, PolicyDefinition};
use crate::statement::Statement;

/// A named, ordered list of statements.
///
/// Built once from configuration and then shared read-only; [`Policy::apply`]
/// takes `&self` and may run concurrently on many routes.
pub struct Policy {
    name: String,
    statements: Vec<Statement>,
    observer: Arc<dyn PolicyObserver>,
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("name", &self.name)
            .field("statements", &self.statements)
            .finish()
    }
}

impl Policy {
    /// Build a policy from its definition and the defined sets.
    ///
    /// Every statement gets a prefix condition and a neighbor condition, in
    /// that order, plus an accept or reject action.  Set entries that do not
    /// parse are reported to `observer` and skipped; they never fail the
    /// policy.
    pub fn new(
        name: impl Into<String>,
        definition: &PolicyDefinition,
        defined_sets: &DefinedSets,
        observer: Arc<dyn PolicyObserver>,
    ) -> Self {
        let statements = definition
            .statements
            .iter()
            .map(|st| {
                let prefix = PrefixCondition::from_sets(
                    &st.conditions.match_prefix_set,
                    &defined_sets.prefix_sets,
                    observer.as_ref(),
                );
                let neighbor = NeighborCondition::from_sets(
                    &st.conditions.match_neighbor_set,
                    &defined_sets.neighbor_sets,
                );
                let action = if st.actions.accept_route {
                    Action::accept()
                } else {
                    Action::reject()
                };
                Statement {
                    name: st.name.clone(),
                    conditions: vec![Condition::Prefix(prefix), Condition::Neighbor(neighbor)],
                    action,
                    match_set_options: st.conditions.match_set_options,
                }
            })
            .collect();

        Self::from_statements(name, statements, observer)
    }

    /// Assemble a policy from already-built statements.
    pub fn from_statements(
        name: impl Into<String>,
        statements: Vec<Statement>,
        observer: Arc<dyn PolicyObserver>,
    ) -> Self {
        Self {
            name: name.into(),
            statements,
            observer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Evaluate `path` against the statements in order.
    ///
    /// The first matching statement decides: its action either hands the
    /// route back (accept) or drops it (reject).  Later statements are never
    /// consulted.  If nothing matches the outcome is [`RouteType::None`].
    ///
    /// [`RouteType::None`]: crate::RouteType::None
    pub fn apply<P: Path + Clone>(&self, path: &P) -> PolicyOutcome<P> {
        for statement in &self.statements {
            let matched = statement.evaluate(path, self.observer.as_ref());
            self.observer.on_event(&PolicyEvent::StatementEvaluated {
                policy: &self.name,
                statement: &statement.name,
                matched,
            });
            if !matched {
                continue;
            }
            return match statement.action.apply(path.clone()) {
                Some(p) => PolicyOutcome::accepted(p, statement.name.as_str()),
                None => PolicyOutcome::rejected(statement.name.as_str()),
            };
        }
        PolicyOutcome::no_match()
    }
}
