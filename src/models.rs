use std::fmt;

/// One resolved `Host` alias from the ssh config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SshConnection {
    pub host: String,
    pub hostname: Option<String>,
    pub user: Option<String>,
}

/// Which optional fields feed the ssh destination.
///
/// `label`, `destination` and `command` all go through this so they never
/// disagree about whether `hostname` or the alias was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Target<'a> {
    user: Option<&'a str>,
    address: &'a str,
    // true when `address` is the resolved hostname rather than the alias
    resolved: bool,
}

impl<'a> Target<'a> {
    fn destination(&self) -> String {
        match self.user {
            Some(user) => format!("{}@{}", user, self.address),
            None => self.address.to_string(),
        }
    }
}

impl SshConnection {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            hostname: None,
            user: None,
        }
    }

    fn target(&self) -> Target<'_> {
        match self.hostname.as_deref() {
            Some(hostname) => Target {
                user: self.user.as_deref(),
                address: hostname,
                resolved: true,
            },
            None => Target {
                user: self.user.as_deref(),
                address: &self.host,
                resolved: false,
            },
        }
    }

    /// Entry shown in the connection list, e.g. `user@hostname (alias)`.
    pub fn label(&self) -> String {
        let target = self.target();
        if target.resolved {
            format!("{} ({})", target.destination(), self.host)
        } else {
            target.destination()
        }
    }

    /// The argument handed to `ssh`.
    pub fn destination(&self) -> String {
        self.target().destination()
    }

    pub fn command(&self) -> String {
        format!("ssh {}", self.destination())
    }
}

#[cfg(test)]
impl SshConnection {
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

impl fmt::Display for SshConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let host = if self.host.is_empty() {
            "(none)"
        } else {
            &self.host
        };
        write!(
            f,
            "Host: {}, Hostname: {}, User: {}",
            host,
            self.hostname.as_deref().unwrap_or("(none)"),
            self.user.as_deref().unwrap_or("(none)")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_alias_only() {
        let c = SshConnection::new("x");
        assert_eq!(c.label(), "x");
        assert_eq!(c.destination(), "x");
        assert_eq!(c.command(), "ssh x");
    }

    #[test]
    fn test_label_user_without_hostname() {
        let c = SshConnection::new("x").with_user("u");
        assert_eq!(c.label(), "u@x");
        assert_eq!(c.destination(), "u@x");
    }

    #[test]
    fn test_label_hostname_without_user() {
        let c = SshConnection::new("x").with_hostname("h");
        assert_eq!(c.label(), "h (x)");
        assert_eq!(c.destination(), "h");
        assert_eq!(c.command(), "ssh h");
    }

    #[test]
    fn test_label_user_and_hostname() {
        let c = SshConnection::new("x").with_user("u").with_hostname("h");
        assert_eq!(c.label(), "u@h (x)");
        assert_eq!(c.destination(), "u@h");
        assert_eq!(c.command(), "ssh u@h");
    }

    #[test]
    fn test_label_always_starts_with_destination() {
        let connections = [
            SshConnection::new("a"),
            SshConnection::new("b").with_user("u"),
            SshConnection::new("c").with_hostname("10.0.0.3"),
            SshConnection::new("d").with_user("root").with_hostname("d.lan"),
        ];
        for c in &connections {
            assert!(c.label().starts_with(&c.destination()), "{}", c);
        }
    }

    #[test]
    fn test_display_uses_placeholders() {
        let c = SshConnection::new("web").with_user("deploy");
        assert_eq!(
            c.to_string(),
            "Host: web, Hostname: (none), User: deploy"
        );
        assert_eq!(
            SshConnection::default().to_string(),
            "Host: (none), Hostname: (none), User: (none)"
        );
    }
}
