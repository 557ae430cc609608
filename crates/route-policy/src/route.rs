//! The route shapes the engine inspects.
//!
//! Policy evaluation only needs three things from a route: its address
//! family, its NLRI and the address of the peer it was learned from.  The
//! [`Path`] trait exposes exactly that so a speaker can evaluate its own
//! route type without converting it; [`Route`] is a minimal owned
//! implementation used by the CLI and the tests.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::IpNet;

/// AFI/SAFI pair of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteFamily {
    Ipv4Unicast,
    Ipv6Unicast,
    /// Any family the engine has no prefix semantics for.
    Other { afi: u16, safi: u8 },
}

impl RouteFamily {
    /// Family of a unicast route carrying `addr`.
    ///
    /// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are IPv4.
    pub fn of(addr: &IpAddr) -> Self {
        match addr.to_canonical() {
            IpAddr::V4(_) => RouteFamily::Ipv4Unicast,
            IpAddr::V6(_) => RouteFamily::Ipv6Unicast,
        }
    }
}

impl fmt::Display for RouteFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteFamily::Ipv4Unicast => f.write_str("ipv4-unicast"),
            RouteFamily::Ipv6Unicast => f.write_str("ipv6-unicast"),
            RouteFamily::Other { afi, safi } => write!(f, "afi{afi}-safi{safi}"),
        }
    }
}

/// IPv4 unicast NLRI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4AddrPrefix {
    pub prefix: Ipv4Addr,
    pub length: u8,
}

/// IPv6 unicast NLRI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6AddrPrefix {
    pub prefix: Ipv6Addr,
    pub length: u8,
}

/// Network layer reachability information, shaped per family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nlri {
    Ipv4(Ipv4AddrPrefix),
    Ipv6(Ipv6AddrPrefix),
    /// NLRI of a family without prefix semantics (VPN, EVPN, flowspec...).
    Other,
}

impl Nlri {
    /// Network address and prefix length, when the NLRI has them.
    pub fn prefix(&self) -> Option<(IpAddr, u8)> {
        match self {
            Nlri::Ipv4(p) => Some((IpAddr::V4(p.prefix), p.length)),
            Nlri::Ipv6(p) => Some((IpAddr::V6(p.prefix), p.length)),
            Nlri::Other => None,
        }
    }
}

/// What the policy engine reads from a route.
pub trait Path {
    fn route_family(&self) -> RouteFamily;
    fn nlri(&self) -> &Nlri;
    /// Address of the peer the route was received from.
    fn source_address(&self) -> IpAddr;
}

/// An owned unicast route announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    family: RouteFamily,
    nlri: Nlri,
    source: IpAddr,
}

impl Route {
    pub fn new(family: RouteFamily, nlri: Nlri, source: IpAddr) -> Self {
        Self {
            family,
            nlri,
            source,
        }
    }

    /// Build a unicast route for `net` learned from `source`.
    ///
    /// The network address is kept as given, host bits included, since the
    /// engine compares the announced address as-is.
    pub fn unicast(net: IpNet, source: IpAddr) -> Self {
        let (family, nlri) = match net {
            IpNet::V4(n) => (
                RouteFamily::Ipv4Unicast,
                Nlri::Ipv4(Ipv4AddrPrefix {
                    prefix: n.addr(),
                    length: n.prefix_len(),
                }),
            ),
            IpNet::V6(n) => (
                RouteFamily::Ipv6Unicast,
                Nlri::Ipv6(Ipv6AddrPrefix {
                    prefix: n.addr(),
                    length: n.prefix_len(),
                }),
            ),
        };
        Self::new(family, nlri, source)
    }

    /// Parse `"addr/len"` text into a unicast route learned from `source`.
    pub fn from_cidr(cidr: &str, source: IpAddr) -> Result<Self, ipnet::AddrParseError> {
        Ok(Self::unicast(IpNet::from_str(cidr)?, source))
    }
}

impl Path for Route {
    fn route_family(&self) -> RouteFamily {
        self.family
    }

    fn nlri(&self) -> &Nlri {
        &self.nlri
    }

    fn source_address(&self) -> IpAddr {
        self.source
    }
}
