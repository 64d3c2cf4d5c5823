// steward-service/src/models/access.rs
use serde::{Deserialize, Serialize};
use std::fmt;

// Staff roles, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Staff = 0,
    Leadership = 1,
    Hr = 2,
    Admin = 3,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Staff => "staff",
            Role::Leadership => "leadership",
            Role::Hr => "hr",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Access classification attached to a staff event or category.
///
/// Values the store hands back that are not one of the four known tiers are
/// kept verbatim in `Unrecognized` so they round-trip unchanged; how they are
/// treated is decided by the visibility gate's fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisibilityTier {
    StaffOnly,
    LeadershipOnly,
    HrOnly,
    AdminOnly,
    Unrecognized(String),
}

impl VisibilityTier {
    pub fn parse(value: &str) -> Self {
        match value {
            "staff_only" => VisibilityTier::StaffOnly,
            "leadership_only" => VisibilityTier::LeadershipOnly,
            "hr_only" => VisibilityTier::HrOnly,
            "admin_only" => VisibilityTier::AdminOnly,
            other => VisibilityTier::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            VisibilityTier::StaffOnly => "staff_only",
            VisibilityTier::LeadershipOnly => "leadership_only",
            VisibilityTier::HrOnly => "hr_only",
            VisibilityTier::AdminOnly => "admin_only",
            VisibilityTier::Unrecognized(raw) => raw,
        }
    }

    // Least privileged role allowed to see this tier; None when unrecognized
    pub fn minimum_role(&self) -> Option<Role> {
        match self {
            VisibilityTier::StaffOnly => Some(Role::Staff),
            VisibilityTier::LeadershipOnly => Some(Role::Leadership),
            VisibilityTier::HrOnly => Some(Role::Hr),
            VisibilityTier::AdminOnly => Some(Role::Admin),
            VisibilityTier::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, VisibilityTier::Unrecognized(_))
    }

    // Display metadata for the tier. Unrecognized tiers borrow the "All Staff" entry.
    pub fn info(&self) -> VisibilityInfo {
        match self {
            VisibilityTier::LeadershipOnly => VisibilityInfo {
                value: "leadership_only",
                label: "Leadership Only",
                icon: "👑",
                description: "Visible to leadership team only",
            },
            VisibilityTier::HrOnly => VisibilityInfo {
                value: "hr_only",
                label: "HR Only",
                icon: "🔒",
                description: "Visible to HR personnel only",
            },
            VisibilityTier::AdminOnly => VisibilityInfo {
                value: "admin_only",
                label: "Admin Only",
                icon: "⚡",
                description: "Visible to administrators only",
            },
            VisibilityTier::StaffOnly | VisibilityTier::Unrecognized(_) => VisibilityInfo {
                value: "staff_only",
                label: "All Staff",
                icon: "👥",
                description: "Visible to all staff members",
            },
        }
    }
}

// A record with no tier at all is handled exactly like an unknown one
impl Default for VisibilityTier {
    fn default() -> Self {
        VisibilityTier::Unrecognized(String::new())
    }
}

impl From<String> for VisibilityTier {
    fn from(value: String) -> Self {
        VisibilityTier::parse(&value)
    }
}

impl From<VisibilityTier> for String {
    fn from(tier: VisibilityTier) -> Self {
        tier.as_str().to_string()
    }
}

impl fmt::Display for VisibilityTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct VisibilityInfo {
    pub value: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

/// What the gate does with a tier it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityFallback {
    /// Treat it as `staff_only`.
    #[default]
    Allow,
    /// Only admins may see it.
    Deny,
}

impl VisibilityFallback {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "allow" | "open" | "fail_open" => Some(VisibilityFallback::Allow),
            "deny" | "closed" | "fail_closed" => Some(VisibilityFallback::Deny),
            _ => None,
        }
    }
}
