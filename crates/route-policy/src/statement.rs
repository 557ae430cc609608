use crate::action::Action;
use crate::condition::Condition;
use crate::observer::PolicyObserver;
use crate::route::Path;
use crate::schema::MatchSetOptions;

impl MatchSetOptions {
    /// Fold condition results according to the option.
    ///
    /// `results` is consumed lazily and evaluation stops at the first result
    /// that decides the outcome:
    ///
    /// * `All` stops at the first `false`; no results is `true`.
    /// * `Any` stops at the first `true`; no results is `false`.
    /// * `Invert` is `false` at the first `true` and `true` otherwise.
    /// * `Unrecognized` is `false` as soon as the first result is produced,
    ///   whatever its value, and `false` for no results.
    pub fn combine<I: IntoIterator<Item = bool>>(self, results: I) -> bool {
        let mut results = results.into_iter();
        match self {
            MatchSetOptions::All => results.all(|r| r),
            MatchSetOptions::Any => results.any(|r| r),
            MatchSetOptions::Invert => !results.any(|r| r),
            MatchSetOptions::Unrecognized => {
                let _ = results.next();
                false
            }
        }
    }
}

/// A named rule: when its conditions match, its action decides the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub name: String,
    pub conditions: Vec<Condition>,
    pub action: Action,
    pub match_set_options: MatchSetOptions,
}

impl Statement {
    pub fn evaluate<P: Path + ?Sized>(&self, path: &P, observer: &dyn PolicyObserver) -> bool {
        self.match_set_options
            .combine(self.conditions.iter().map(|c| c.evaluate(path, observer)))
    }
}
