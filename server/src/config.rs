use error_stack::Report;
use kernel::KernelError;

static VEHICLE_STORE: &str = "VEHICLE_STORE";
static SERVER_PORT: &str = "SERVER_PORT";

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ServerConfig {
    pub store: StoreKind,
    pub port: u16,
}

impl ServerConfig {
    /// Reads the process environment, falling back to a `.env` file.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let store = match lookup(VEHICLE_STORE).as_deref() {
            None | Some("postgres") => StoreKind::Postgres,
            Some("memory") => StoreKind::Memory,
            Some(other) => {
                return Err(Report::new(KernelError::Internal).attach_printable(format!(
                    "Unknown {VEHICLE_STORE} `{other}`, expected `postgres` or `memory`"
                )))
            }
        };
        let port = match lookup(SERVER_PORT) {
            None => DEFAULT_PORT,
            Some(port) => port.parse().map_err(|_| {
                Report::new(KernelError::Internal)
                    .attach_printable(format!("Invalid {SERVER_PORT} `{port}`"))
            })?,
        };
        Ok(Self { store, port })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use crate::config::{ServerConfig, StoreKind};

    fn config(vars: &[(&str, &str)]) -> Option<ServerConfig> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        ServerConfig::from_lookup(|key| vars.get(key).cloned()).ok()
    }

    #[test]
    fn defaults() {
        assert_eq!(
            config(&[]),
            Some(ServerConfig {
                store: StoreKind::Postgres,
                port: 8080
            })
        );
    }

    #[test]
    fn overrides() {
        assert_eq!(
            config(&[("VEHICLE_STORE", "memory"), ("SERVER_PORT", "3000")]),
            Some(ServerConfig {
                store: StoreKind::Memory,
                port: 3000
            })
        );
    }

    #[test]
    fn rejects_unknown_values() {
        assert_eq!(config(&[("VEHICLE_STORE", "sqlite")]), None);
        assert_eq!(config(&[("SERVER_PORT", "http")]), None);
    }
}
