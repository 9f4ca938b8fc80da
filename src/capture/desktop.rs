use log::{info, warn};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayServer {
    Wayland,
    X11,
    Unknown,
}

impl std::fmt::Display for DisplayServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayServer::Wayland => write!(f, "Wayland"),
            DisplayServer::X11 => write!(f, "X11"),
            DisplayServer::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DesktopSession {
    pub display_server: DisplayServer,
    pub desktop: Option<String>,
}

impl DesktopSession {
    pub fn detect() -> Self {
        let display_server = display_server_from(
            env::var("XDG_SESSION_TYPE").ok().as_deref(),
            env::var("WAYLAND_DISPLAY").is_ok(),
            env::var("DISPLAY").is_ok(),
        );
        let desktop = env::var("XDG_CURRENT_DESKTOP")
            .ok()
            .or_else(|| env::var("DESKTOP_SESSION").ok())
            .filter(|name| !name.is_empty());

        Self {
            display_server,
            desktop,
        }
    }

    pub fn is_wayland(&self) -> bool {
        self.display_server == DisplayServer::Wayland
    }

    /// Logs the session and what it means for global capture
    pub fn log_capabilities(&self) {
        info!("Desktop session: {}", self);
        if self.is_wayland() {
            warn!("Wayland restricts global screen capture; the compositor may ask for permission or return blank frames");
        } else if self.display_server == DisplayServer::Unknown {
            warn!("No display server detected; capture will likely fail");
        }
    }
}

impl std::fmt::Display for DesktopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.desktop {
            Some(name) => write!(f, "{} on {}", name, self.display_server),
            None => write!(f, "Unknown desktop on {}", self.display_server),
        }
    }
}

fn display_server_from(
    session_type: Option<&str>,
    has_wayland_display: bool,
    has_x_display: bool,
) -> DisplayServer {
    if let Some(session_type) = session_type {
        match session_type.to_lowercase().as_str() {
            "wayland" => return DisplayServer::Wayland,
            "x11" => return DisplayServer::X11,
            _ => {}
        }
    }

    if has_wayland_display {
        return DisplayServer::Wayland;
    }

    if has_x_display {
        return DisplayServer::X11;
    }

    DisplayServer::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_type_wins_over_sockets() {
        assert_eq!(
            display_server_from(Some("X11"), true, false),
            DisplayServer::X11
        );
        assert_eq!(
            display_server_from(Some("wayland"), false, true),
            DisplayServer::Wayland
        );
    }

    #[test]
    fn falls_back_to_display_variables() {
        assert_eq!(
            display_server_from(Some("tty"), true, true),
            DisplayServer::Wayland
        );
        assert_eq!(display_server_from(None, false, true), DisplayServer::X11);
        assert_eq!(
            display_server_from(None, false, false),
            DisplayServer::Unknown
        );
    }

    #[test]
    fn display_names_desktop() {
        let session = DesktopSession {
            display_server: DisplayServer::X11,
            desktop: Some("GNOME".to_string()),
        };
        assert_eq!(session.to_string(), "GNOME on X11");
        assert!(!session.is_wayland());
    }
}
