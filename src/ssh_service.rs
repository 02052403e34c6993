use crate::app::{Phase, SelectionState};
use crate::error::{AppError, Result};
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

const SYSTEM_SSH: &str = "/usr/bin/ssh";

/// Replaces the running program with an interactive `ssh` session.
///
/// Implementations only return when the replacement could not happen.
pub trait Launcher {
    fn exec_ssh(&self, destination: &str) -> io::Error;
}

#[derive(Debug, Default)]
pub struct SystemLauncher;

/// Whether the current user may run `path`.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use nix::unistd::{access, AccessFlags};
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

fn ssh_program() -> &'static str {
    if is_executable(Path::new(SYSTEM_SSH)) {
        SYSTEM_SSH
    } else {
        // resolved through PATH
        "ssh"
    }
}

impl Launcher for SystemLauncher {
    #[cfg(unix)]
    fn exec_ssh(&self, destination: &str) -> io::Error {
        use std::os::unix::process::CommandExt;

        let program = ssh_program();
        tracing::info!("Executing: {} {}", program, destination);
        Command::new(program).arg(destination).exec()
    }

    #[cfg(not(unix))]
    fn exec_ssh(&self, destination: &str) -> io::Error {
        let program = ssh_program();
        tracing::info!("Executing: {} {}", program, destination);
        match Command::new(program).arg(destination).status() {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(e) => e,
        }
    }
}

/// Act on the picker's final state: echo the chosen command and, when asked
/// to, hand the terminal over to ssh.
pub fn finish<L: Launcher, W: Write>(state: &SelectionState, launcher: &L, out: &mut W) -> Result<()> {
    if state.phase() != Phase::Committed {
        tracing::info!("Picker closed without a selection");
        return Ok(());
    }
    let (Some(command), Some(connection)) = (&state.pending_command, state.chosen_connection())
    else {
        return Ok(());
    };

    if !state.suppress_print {
        writeln!(out, "{}", command)
            .and_then(|()| out.flush())
            .map_err(AppError::Output)?;
    }

    if state.exec_requested {
        let destination = connection.destination();
        let err = launcher.exec_ssh(&destination);
        tracing::error!("Failed to exec ssh {}: {}", destination, err);
        return Err(AppError::Launch(err));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::update;
    use crate::app_event::Msg;
    use crate::models::SshConnection;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLauncher {
        calls: RefCell<Vec<String>>,
    }

    impl Launcher for RecordingLauncher {
        fn exec_ssh(&self, destination: &str) -> io::Error {
            self.calls.borrow_mut().push(destination.to_string());
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory")
        }
    }

    fn committed(exec: bool, no_print: bool) -> SelectionState {
        let state = SelectionState::new(
            vec![
                SshConnection::new("a").with_user("u1"),
                SshConnection::new("b").with_user("deploy").with_hostname("10.0.0.2"),
            ],
            exec,
            no_print,
        );
        update(update(state, Msg::SetSelected(1)), Msg::Commit)
    }

    #[test]
    fn test_prints_command() {
        let launcher = RecordingLauncher::default();
        let mut out = Vec::new();
        finish(&committed(false, false), &launcher, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ssh deploy@10.0.0.2\n");
        assert!(launcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_no_print() {
        let launcher = RecordingLauncher::default();
        let mut out = Vec::new();
        finish(&committed(false, true), &launcher, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_exec_failure_is_launch_error() {
        let launcher = RecordingLauncher::default();
        let mut out = Vec::new();
        let err = finish(&committed(true, false), &launcher, &mut out).unwrap_err();
        assert!(matches!(err, AppError::Launch(_)));
        assert_eq!(err.exit_code(), 127);
        assert!(err.to_string().contains("No such file or directory"));
        assert_eq!(*launcher.calls.borrow(), vec!["deploy@10.0.0.2".to_string()]);
        // the command is still echoed before the exec attempt
        assert_eq!(String::from_utf8(out).unwrap(), "ssh deploy@10.0.0.2\n");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "Broken pipe"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_failure_is_output_error() {
        let launcher = RecordingLauncher::default();
        let err = finish(&committed(true, false), &launcher, &mut ClosedPipe).unwrap_err();
        assert!(matches!(err, AppError::Output(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("failed to write command to stdout"));
        // nothing is launched once printing has failed
        assert!(launcher.calls.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_is_executable_checks_access() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("ssh");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!is_executable(&script));

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable(&script));

        assert!(!is_executable(dir.path()));
        assert!(!is_executable(&dir.path().join("missing")));
    }

    #[test]
    fn test_cancelled_does_nothing() {
        let launcher = RecordingLauncher::default();
        let mut out = Vec::new();
        let state = SelectionState::new(vec![SshConnection::new("a")], true, false);
        let state = update(state, Msg::Cancel);
        finish(&state, &launcher, &mut out).unwrap();
        assert!(out.is_empty());
        assert!(launcher.calls.borrow().is_empty());
    }
}
