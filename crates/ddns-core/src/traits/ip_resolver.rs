// # IP Resolver Trait
//
// Defines the interface for discovering the machine's current public address.
//
// ## Implementations
//
// - HTTP echo services: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpResolver;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let resolver = /* IpResolver implementation */;
//
//     let address = resolver.resolve().await?;
//     println!("current address: {}", address);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// A validated IP literal produced by an [`IpResolver`]
///
/// Immutable once produced and scoped to a single cycle. The canonical text
/// form is what gets compared against, and written to, the provider record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedAddress(IpAddr);

impl ResolvedAddress {
    /// Parse an address from the raw text returned by an echo service
    ///
    /// Surrounding whitespace is ignored; anything else that is not an IPv4
    /// or IPv6 literal is rejected.
    pub fn parse(text: &str) -> Result<Self, crate::Error> {
        let literal = text.trim();
        literal
            .parse::<IpAddr>()
            .map(Self::from)
            .map_err(|_| {
                crate::Error::resolution(format!(
                    "current IP address could not be parsed from '{}'",
                    truncate_for_log(literal)
                ))
            })
    }

    /// The underlying address
    pub fn ip(&self) -> IpAddr {
        self.0
    }

    /// Canonical text form used for record content
    ///
    /// IPv4-mapped IPv6 addresses are rendered as plain IPv4.
    pub fn canonical(&self) -> String {
        self.0.to_string()
    }
}

impl From<IpAddr> for ResolvedAddress {
    fn from(ip: IpAddr) -> Self {
        Self(ip.to_canonical())
    }
}

impl FromStr for ResolvedAddress {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keep error messages readable when a service answers with a whole HTML page
fn truncate_for_log(text: &str) -> String {
    const MAX: usize = 64;
    match text.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Trait for IP resolver implementations
///
/// One call performs exactly one lookup. Implementations must not cache
/// results or retry; a failed lookup fails the cycle and the next scheduled
/// dispatch is the only retry.
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait IpResolver: Send + Sync {
    /// Determine the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(ResolvedAddress)`: The current address
    /// - `Err(Error::Resolution)`: The lookup failed or returned something
    ///   that is not an IP literal
    async fn resolve(&self) -> Result<ResolvedAddress, crate::Error>;

    /// Where addresses come from (for logging)
    fn endpoint(&self) -> &str;
}
