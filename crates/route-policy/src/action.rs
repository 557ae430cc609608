use std::fmt;

/// What a matching statement does with the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Routing(RoutingAction),
    Modification(ModificationAction),
}

impl Action {
    pub fn accept() -> Self {
        Action::Routing(RoutingAction { accept_route: true })
    }

    pub fn reject() -> Self {
        Action::Routing(RoutingAction {
            accept_route: false,
        })
    }

    /// Returns the (possibly rewritten) route, or `None` when the route is
    /// dropped.
    pub fn apply<P>(&self, path: P) -> Option<P> {
        match self {
            Action::Routing(a) => a.apply(path),
            Action::Modification(a) => a.apply(path),
        }
    }
}

/// Accepts or rejects the route unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingAction {
    pub accept_route: bool,
}

impl RoutingAction {
    pub fn apply<P>(&self, path: P) -> Option<P> {
        self.accept_route.then_some(path)
    }
}

/// Rewrites one path attribute.
///
/// Attribute rewriting is not implemented yet; the route passes through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationAction {
    pub attr_type: BgpAttrType,
    pub value: String,
}

impl ModificationAction {
    pub fn apply<P>(&self, path: P) -> Option<P> {
        Some(path)
    }
}

/// Well-known BGP path attributes (RFC 4271, RFC 1997).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BgpAttrType {
    Origin = 1,
    AsPath = 2,
    NextHop = 3,
    MultiExitDisc = 4,
    LocalPref = 5,
    AtomicAggregate = 6,
    Aggregator = 7,
    Communities = 8,
}

impl BgpAttrType {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BgpAttrType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => BgpAttrType::Origin,
            2 => BgpAttrType::AsPath,
            3 => BgpAttrType::NextHop,
            4 => BgpAttrType::MultiExitDisc,
            5 => BgpAttrType::LocalPref,
            6 => BgpAttrType::AtomicAggregate,
            7 => BgpAttrType::Aggregator,
            8 => BgpAttrType::Communities,
            other => return Err(other),
        })
    }
}

impl fmt::Display for BgpAttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BgpAttrType::Origin => "ORIGIN",
            BgpAttrType::AsPath => "AS_PATH",
            BgpAttrType::NextHop => "NEXT_HOP",
            BgpAttrType::MultiExitDisc => "MULTI_EXIT_DISC",
            BgpAttrType::LocalPref => "LOCAL_PREF",
            BgpAttrType::AtomicAggregate => "ATOMIC_AGGREGATE",
            BgpAttrType::Aggregator => "AGGREGATOR",
            BgpAttrType::Communities => "COMMUNITIES",
        };
        f.write_str(name)
    }
}
