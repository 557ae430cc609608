use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::PrefixError;
use crate::observer::{PolicyEvent, PolicyObserver};
use crate::route::RouteFamily;

/// Separator between the MIN and MAX bounds of a mask-length range.
const RANGE_SEPARATOR: &str = "..";

/// Inclusive mask-length bounds parsed from `"min..max"` text.
///
/// Either side may be absent.  A range with neither bound means the prefix
/// only matches its exact mask length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskLengthRange {
    pub min: Option<u8>,
    pub max: Option<u8>,
}

impl MaskLengthRange {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether `len` lies within the bounds.  A missing bound counts as 0.
    pub fn contains(&self, len: u8) -> bool {
        let min = self.min.unwrap_or(0);
        let max = self.max.unwrap_or(0);
        min <= len && len <= max
    }

    /// Parse range text.
    ///
    /// Returns `Ok(None)` when the text has no `..` separator at all, which
    /// callers treat as "no range".
    pub fn parse(text: &str) -> Result<Option<Self>, PrefixError> {
        let Some(idx) = text.find(RANGE_SEPARATOR) else {
            return Ok(None);
        };
        let (lower, upper) = (&text[..idx], &text[idx + RANGE_SEPARATOR.len()..]);
        Ok(Some(Self {
            min: parse_bound(text, lower)?,
            max: parse_bound(text, upper)?,
        }))
    }
}

impl fmt::Display for MaskLengthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{min}")?;
        }
        f.write_str(RANGE_SEPARATOR)?;
        if let Some(max) = self.max {
            write!(f, "{max}")?;
        }
        Ok(())
    }
}

fn parse_bound(range: &str, bound: &str) -> Result<Option<u8>, PrefixError> {
    if bound.is_empty() {
        return Ok(None);
    }
    let err = || PrefixError::RangeParse {
        range: range.to_string(),
        bound: bound.to_string(),
    };
    // `u8::from_str` would accept a leading '+'.
    if !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    bound.parse::<u8>().map(Some).map_err(|_| err())
}

/// A configured prefix: address, exact mask length and optional mask-length
/// range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    address: IpAddr,
    address_family: RouteFamily,
    masklength: u8,
    masklength_range: MaskLengthRange,
}

impl Prefix {
    /// Build a prefix from an address and the textual mask-length range.
    ///
    /// Range text without `..` is not an error: the prefix is built with an
    /// empty range and a [`PolicyEvent::MalformedMaskRange`] is reported.
    pub fn new(
        address: IpAddr,
        masklength: u8,
        range: &str,
        observer: &dyn PolicyObserver,
    ) -> Result<Self, PrefixError> {
        let address = address.to_canonical();
        let masklength_range = match MaskLengthRange::parse(range)? {
            Some(r) => r,
            None => {
                observer.on_event(&PolicyEvent::MalformedMaskRange { range });
                MaskLengthRange::default()
            }
        };
        Ok(Self {
            address,
            address_family: RouteFamily::of(&address),
            masklength,
            masklength_range,
        })
    }

    /// Build a prefix from raw address octets.  Only 4 and 16 octet
    /// addresses have a family.
    pub fn from_octets(
        octets: &[u8],
        masklength: u8,
        range: &str,
        observer: &dyn PolicyObserver,
    ) -> Result<Self, PrefixError> {
        let address = if let Ok(v4) = <[u8; 4]>::try_from(octets) {
            IpAddr::V4(Ipv4Addr::from(v4))
        } else if let Ok(v6) = <[u8; 16]>::try_from(octets) {
            IpAddr::V6(Ipv6Addr::from(v6))
        } else {
            return Err(PrefixError::AddressFamily {
                address: format!("{octets:?}"),
            });
        };
        Self::new(address, masklength, range, observer)
    }

    /// Build a prefix from configuration text.  An address that does not
    /// parse has no family.
    pub fn from_config(
        address: &str,
        masklength: u8,
        range: &str,
        observer: &dyn PolicyObserver,
    ) -> Result<Self, PrefixError> {
        let parsed: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| PrefixError::AddressFamily {
                address: address.to_string(),
            })?;
        Self::new(parsed, masklength, range, observer)
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn address_family(&self) -> RouteFamily {
        self.address_family
    }

    pub fn masklength(&self) -> u8 {
        self.masklength
    }

    pub fn masklength_range(&self) -> MaskLengthRange {
        self.masklength_range
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.masklength)?;
        if !self.masklength_range.is_empty() {
            write!(f, " {}", self.masklength_range)?;
        }
        Ok(())
    }
}
