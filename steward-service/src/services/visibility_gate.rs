// steward-service/src/services/visibility_gate.rs
use crate::models::{Role, VisibilityFallback, VisibilityTier};

/// Decides whether a viewer's role may see something classified with a
/// visibility tier.
///
/// Known tiers name the least privileged role allowed through; any role at or
/// above it passes. Unrecognized tiers are resolved by the configured
/// fallback: `Allow` treats them as `staff_only`, `Deny` lets only admins
/// through so that admins still see every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityGate {
    fallback: VisibilityFallback,
}

impl VisibilityGate {
    pub fn new(fallback: VisibilityFallback) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> VisibilityFallback {
        self.fallback
    }

    pub fn can_view(&self, role: Role, tier: &VisibilityTier) -> bool {
        match tier.minimum_role() {
            Some(minimum) => role >= minimum,
            None => match self.fallback {
                VisibilityFallback::Allow => true,
                VisibilityFallback::Deny => role == Role::Admin,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROLES: [Role; 4] = [Role::Admin, Role::Hr, Role::Leadership, Role::Staff];

    fn known_tiers() -> Vec<VisibilityTier> {
        vec![
            VisibilityTier::AdminOnly,
            VisibilityTier::HrOnly,
            VisibilityTier::LeadershipOnly,
            VisibilityTier::StaffOnly,
        ]
    }

    fn expected(role: Role, tier: &VisibilityTier) -> bool {
        match tier {
            VisibilityTier::AdminOnly => role == Role::Admin,
            VisibilityTier::HrOnly => matches!(role, Role::Admin | Role::Hr),
            VisibilityTier::LeadershipOnly => {
                matches!(role, Role::Admin | Role::Hr | Role::Leadership)
            }
            VisibilityTier::StaffOnly | VisibilityTier::Unrecognized(_) => true,
        }
    }

    #[test]
    fn matches_permission_table_for_every_role_and_tier() {
        let gate = VisibilityGate::default();
        let mut tiers = known_tiers();
        tiers.push(VisibilityTier::parse("board_only"));
        tiers.push(VisibilityTier::default());

        let mut checked = 0;
        for role in ROLES {
            for tier in &tiers {
                assert_eq!(
                    gate.can_view(role, tier),
                    expected(role, tier),
                    "role {} tier {}",
                    role,
                    tier
                );
                checked += 1;
            }
        }
        assert_eq!(checked, 24);
    }

    #[test]
    fn missing_tier_falls_back_like_unknown_one() {
        let gate = VisibilityGate::default();
        for role in ROLES {
            assert!(gate.can_view(role, &VisibilityTier::default()));
        }
    }

    #[test]
    fn staff_only_admits_everyone() {
        let gate = VisibilityGate::default();
        assert!(ROLES.iter().all(|role| gate.can_view(*role, &VisibilityTier::StaffOnly)));
    }

    #[test]
    fn admin_only_admits_only_admin() {
        let gate = VisibilityGate::default();
        let admitted: Vec<Role> = ROLES
            .iter()
            .copied()
            .filter(|role| gate.can_view(*role, &VisibilityTier::AdminOnly))
            .collect();
        assert_eq!(admitted, vec![Role::Admin]);
    }

    #[test]
    fn seeing_admin_only_implies_seeing_everything() {
        for gate in [
            VisibilityGate::new(VisibilityFallback::Allow),
            VisibilityGate::new(VisibilityFallback::Deny),
        ] {
            let mut tiers = known_tiers();
            tiers.push(VisibilityTier::parse("unknown"));
            for role in ROLES {
                if gate.can_view(role, &VisibilityTier::AdminOnly) {
                    assert!(tiers.iter().all(|tier| gate.can_view(role, tier)));
                }
            }
        }
    }

    #[test]
    fn deny_fallback_hides_unknown_tiers_from_non_admins() {
        let gate = VisibilityGate::new(VisibilityFallback::Deny);
        let tier = VisibilityTier::parse("secret");
        assert!(gate.can_view(Role::Admin, &tier));
        assert!(!gate.can_view(Role::Hr, &tier));
        assert!(!gate.can_view(Role::Leadership, &tier));
        assert!(!gate.can_view(Role::Staff, &tier));
        // known tiers are unaffected by the fallback
        assert!(gate.can_view(Role::Staff, &VisibilityTier::StaffOnly));
        assert!(gate.can_view(Role::Hr, &VisibilityTier::HrOnly));
    }
}
