use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{env, fmt, net::SocketAddr, str::FromStr};
use thiserror::Error;

const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_addr: SocketAddr,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub access_log_enabled: bool,
    pub access_log_max_body_bytes: usize,
    pub access_log_route_groups: Vec<AdminRouteGroup>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/admin_access_log".to_string());

        let server_addr_raw = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr_raw
            .parse()
            .map_err(|_| anyhow!("Invalid SERVER_ADDR value: {}", server_addr_raw))?;

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .unwrap_or(1);

        let access_log_enabled = env::var("ACCESS_LOG_ENABLED")
            .map(|value| parse_bool(&value))
            .unwrap_or(true);

        let access_log_max_body_bytes = env::var("ACCESS_LOG_MAX_BODY_BYTES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        let access_log_route_groups = match env::var("ACCESS_LOG_ROUTE_GROUPS") {
            Ok(raw) => AdminRouteGroup::parse_list(&raw)?,
            Err(_) => AdminRouteGroup::ALL.to_vec(),
        };

        Ok(Config {
            database_url,
            server_addr,
            jwt_secret,
            jwt_expiration_hours,
            access_log_enabled,
            access_log_max_body_bytes,
            access_log_route_groups,
        })
    }

    pub fn access_log_settings(&self) -> AccessLogSettings {
        AccessLogSettings {
            enabled: self.access_log_enabled,
            max_body_bytes: self.access_log_max_body_bytes,
            route_groups: self.access_log_route_groups.clone(),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Admin-facing route groups whose calls are written to the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRouteGroup {
    /// `/admin/comments/**`
    Comments,
    /// `/admin/users/**`
    Users,
}

impl AdminRouteGroup {
    pub const ALL: [AdminRouteGroup; 2] = [AdminRouteGroup::Comments, AdminRouteGroup::Users];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRouteGroup::Comments => "comments",
            AdminRouteGroup::Users => "users",
        }
    }

    /// Maps a request path onto its admin route group.
    pub fn classify(path: &str) -> Option<Self> {
        let normalized = path.trim_end_matches('/');
        let segments: Vec<&str> = normalized.trim_start_matches('/').split('/').collect();
        match segments.as_slice() {
            ["admin", "comments", ..] => Some(AdminRouteGroup::Comments),
            ["admin", "users", ..] => Some(AdminRouteGroup::Users),
            _ => None,
        }
    }

    /// Parses a comma separated list such as `comments,users`.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, RouteGroupParseError> {
        let mut groups = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let group: AdminRouteGroup = name.parse()?;
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        Ok(groups)
    }
}

impl fmt::Display for AdminRouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown admin route group: {0}")]
pub struct RouteGroupParseError(pub String);

impl FromStr for AdminRouteGroup {
    type Err = RouteGroupParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comments" | "comment" => Ok(AdminRouteGroup::Comments),
            "users" | "user" => Ok(AdminRouteGroup::Users),
            other => Err(RouteGroupParseError(other.to_string())),
        }
    }
}

/// Runtime knobs consumed by the access log middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessLogSettings {
    pub enabled: bool,
    pub max_body_bytes: usize,
    pub route_groups: Vec<AdminRouteGroup>,
}

impl AccessLogSettings {
    pub fn is_recording_enabled(&self) -> bool {
        self.enabled && !self.route_groups.is_empty()
    }

    /// Returns the route group for `path` when that group is being recorded.
    pub fn intercepts(&self, path: &str) -> Option<AdminRouteGroup> {
        AdminRouteGroup::classify(path).filter(|group| self.route_groups.contains(group))
    }
}

impl Default for AccessLogSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            route_groups: AdminRouteGroup::ALL.to_vec(),
        }
    }
}
