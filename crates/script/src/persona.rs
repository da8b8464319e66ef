//! Fixed roster of fictional personas the funnel chats as.

use serde::{Deserialize, Serialize};

/// A fictional persona: identity plus the presence hints the surface shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub id: String,
    pub name: String,
    pub online: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

impl Persona {
    fn new(id: &str, name: &str, online: bool, last_seen: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            online,
            last_seen: last_seen.map(str::to_string),
        }
    }

    /// Presence line for the surface: "online" or the last-seen hint.
    pub fn presence(&self) -> String {
        if self.online {
            "online".to_string()
        } else {
            self.last_seen
                .clone()
                .unwrap_or_else(|| "offline".to_string())
        }
    }
}

/// The shipped roster. Static data, same for every session.
pub fn roster() -> Vec<Persona> {
    vec![
        Persona::new("luna-costa", "Luna Costa", true, None),
        Persona::new("marina-duarte", "Marina Duarte", false, Some("active 5 min ago")),
        Persona::new("bia-ferraz", "Bia Ferraz", true, None),
        Persona::new("sofia-andrade", "Sofia Andrade", false, Some("active 12 min ago")),
        Persona::new("carla-mendes", "Carla Mendes", true, None),
    ]
}

/// Looks a persona up by id.
pub fn find(id: &str) -> Option<Persona> {
    roster().into_iter().find(|p| p.id == id)
}
