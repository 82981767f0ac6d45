use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_BIND_ADDRESS: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000);

#[derive(Clone, Debug)]
pub struct BookshelfConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub static_root: PathBuf,
    pub bind_address: SocketAddr,
}

impl BookshelfConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://db/library.db".to_string());

        let max_connections = std::env::var("MAX_CONNECTIONS")
            .ok()
            .and_then(|val| val.parse::<u32>().ok())
            .filter(|val| *val > 0)
            .unwrap_or(15);

        let static_root =
            PathBuf::from(std::env::var("STATIC_ROOT").unwrap_or_else(|_| ".".to_string()));

        let bind_address = match std::env::var("BIND_ADDRESS") {
            Ok(raw) => parse_bind_address(&raw),
            Err(_) => DEFAULT_BIND_ADDRESS,
        };

        Self {
            database_url,
            max_connections,
            static_root,
            bind_address,
        }
    }
}

// a malformed address is logged and replaced, like every other setting
pub fn parse_bind_address(raw: &str) -> SocketAddr {
    match raw.trim().parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::warn!(
                "Ignoring BIND_ADDRESS {:?} ({}), using {}",
                raw,
                e,
                DEFAULT_BIND_ADDRESS
            );
            DEFAULT_BIND_ADDRESS
        }
    }
}
