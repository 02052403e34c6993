use crate::error::{AppError, Result};
use crate::models::SshConnection;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the user's ssh client config, relative to home.
pub fn default_ssh_config_path(home: &Path) -> PathBuf {
    home.join(".ssh").join("config")
}

/// Home directory for `~/.ssh/config`. Unset or empty `HOME` means there is none,
/// even if the passwd database has an entry.
pub fn home_dir() -> Option<PathBuf> {
    home_from_env(std::env::var_os("HOME"), dirs::home_dir)
}

fn home_from_env(
    home_var: Option<OsString>,
    lookup: impl FnOnce() -> Option<PathBuf>,
) -> Option<PathBuf> {
    match home_var {
        Some(value) if !value.is_empty() => lookup(),
        _ => None,
    }
}

/// Pick the ssh config to read: an explicit path wins, otherwise
/// `~/.ssh/config`. Without either there is nothing to read.
pub fn resolve_ssh_config_path(
    explicit: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    home.map(|home| default_ssh_config_path(&home))
        .ok_or(AppError::NoHomeDir)
}

fn trim(s: &str) -> &str {
    s.trim()
}

/// Split `Key value`, `Key=value` or `Key = value` into its parts.
fn split_key_value(line: &str) -> (&str, &str) {
    let line = trim(line);
    let key_end = line
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(line.len());
    let (key, rest) = line.split_at(key_end);

    let rest = rest.trim_start();
    let rest = rest.strip_prefix('=').unwrap_or(rest);
    (key, trim(rest))
}

/// Directives collected since the last `Host` line.
#[derive(Debug, Default)]
struct ParseBlock {
    aliases: Vec<String>,
    hostname: Option<String>,
    user: Option<String>,
}

impl ParseBlock {
    fn flush(&mut self, out: &mut Vec<SshConnection>) {
        let block = std::mem::take(self);
        if block.aliases.is_empty() {
            return;
        }
        for alias in block.aliases {
            let mut connection = SshConnection::new(alias);
            connection.hostname = block.hostname.clone();
            connection.user = block.user.clone();
            out.push(connection);
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Turn ssh config text into one connection per `Host` alias.
///
/// Only `Host`, `HostName` and `User` are understood. Everything else,
/// including lines that don't look like `key value`, is skipped.
pub fn parse_ssh_config_content(content: &str) -> Vec<SshConnection> {
    let mut connections = Vec::new();
    let mut block = ParseBlock::default();

    for raw in content.split(&['\n', '\r'][..]) {
        // '#' starts a comment anywhere on the line, even inside a value
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let line = trim(line);
        if line.is_empty() {
            continue;
        }

        let (key, value) = split_key_value(line);
        if key.is_empty() {
            continue;
        }

        match key.to_lowercase().as_str() {
            "host" => {
                block.flush(&mut connections);
                block
                    .aliases
                    .extend(value.split_whitespace().map(str::to_string));
            }
            "hostname" => block.hostname = non_empty(value),
            "user" => block.user = non_empty(value),
            _ => {}
        }
    }
    block.flush(&mut connections);

    tracing::debug!("Parsed {} connections from ssh config", connections.len());
    connections
}

/// Drop entries that can't be connected to by name: an empty alias or the
/// bare `*` catch-all. Partial wildcards such as `*.example.org` are kept.
pub fn filter_connections(connections: Vec<SshConnection>) -> Vec<SshConnection> {
    connections
        .into_iter()
        .filter(|c| {
            let keep = !c.host.is_empty() && c.host != "*";
            if !keep {
                tracing::debug!("Skipping non-connectable entry: {}", c);
            }
            keep
        })
        .collect()
}

pub fn read_ssh_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read, parse and filter the config at `path`.
///
/// An unreadable file and a file without usable hosts are reported as
/// different errors.
pub fn load_connections(path: &Path) -> Result<Vec<SshConnection>> {
    let content = read_ssh_config(path)?;
    let connections = filter_connections(parse_ssh_config_content(&content));

    tracing::info!(
        "Loaded {} connections from {:?}",
        connections.len(),
        path
    );

    if connections.is_empty() {
        return Err(AppError::NoConnections {
            path: path.to_path_buf(),
        });
    }
    Ok(connections)
}
