use std::env;
use std::net::{IpAddr, SocketAddr};
use crate::models::error::ErrorWithMessage;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;

pub static CONFIG: once_cell::sync::Lazy<Result<ServerConfig, ErrorWithMessage>> =
    once_cell::sync::Lazy::new(|| ServerConfig::init());

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn init() -> Result<ServerConfig, ErrorWithMessage> {
        Self::from_vars(env::var("HOST").ok(), env::var("PORT").ok())
    }

    pub fn from_vars(host: Option<String>, port: Option<String>) -> Result<ServerConfig, ErrorWithMessage> {
        let host = host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match port {
            Some(port) => port.parse::<u16>()
                .map_err(|e| ErrorWithMessage::new(format!("Invalid PORT {:?}: {}", port, e)))?,
            None => DEFAULT_PORT,
        };
        Ok(ServerConfig { host, port })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ErrorWithMessage> {
        let ip = self.host.parse::<IpAddr>()
            .map_err(|e| ErrorWithMessage::new(format!("Invalid HOST {:?}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
