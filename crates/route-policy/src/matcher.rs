use ipnet::IpNet;

use crate::observer::{PolicyEvent, PolicyObserver};
use crate::prefix::Prefix;
use crate::route::{Path, RouteFamily};

/// Check whether the NLRI of `path` matches a configured [`Prefix`].
///
/// * The route family must equal the prefix family.
/// * With no mask-length range the route must carry exactly the configured
///   address and mask length.
/// * With a range the configured network must contain the route's address
///   and the route's mask length must fall inside the range.
///
/// A configured prefix that cannot be turned back into a network is
/// reported to `observer` and treated as a non-match.
pub fn matches_prefix<P: Path + ?Sized>(
    path: &P,
    prefix: &Prefix,
    observer: &dyn PolicyObserver,
) -> bool {
    let family = path.route_family();
    if family != prefix.address_family() {
        return false;
    }

    let (addr, masklen) = match family {
        RouteFamily::Ipv4Unicast | RouteFamily::Ipv6Unicast => match path.nlri().prefix() {
            Some(p) => p,
            None => return false,
        },
        RouteFamily::Other { .. } => return false,
    };
    let addr = addr.to_canonical();

    let range = prefix.masklength_range();
    if range.is_empty() {
        return addr == prefix.address() && masklen == prefix.masklength();
    }

    let net = match IpNet::new(prefix.address(), prefix.masklength()) {
        Ok(net) => net,
        Err(e) => {
            observer.on_event(&PolicyEvent::CidrParseFailed {
                address: prefix.address(),
                masklength: prefix.masklength(),
                error: e.to_string(),
            });
            return false;
        }
    };

    net.trunc().contains(&addr) && range.contains(masklen)
}
