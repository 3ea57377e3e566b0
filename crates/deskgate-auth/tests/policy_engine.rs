//! Policy engine behaviour against the built-in grant tables.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use deskgate_auth::{BundleType, Permission, PolicyEngine, Role};

fn expected_permissions(role: Role) -> HashSet<Permission> {
    use Permission::*;
    match role {
        Role::Contractor => HashSet::from([WorkspaceCreate]),
        Role::Engineer => HashSet::from([WorkspaceCreate, WorkspaceDelete, BlueprintCreate]),
        Role::TeamLead => HashSet::from([
            WorkspaceCreate,
            WorkspaceDelete,
            BlueprintCreate,
            BudgetUpdate,
            AuditRead,
        ]),
        Role::Admin => Permission::ALL.into_iter().collect(),
    }
}

fn expected_bundles(role: Role) -> HashSet<BundleType> {
    use BundleType::*;
    match role {
        Role::Contractor => HashSet::from([Standard, Performance]),
        Role::Engineer => HashSet::from([Standard, Performance, Power, GraphicsG4dn]),
        Role::TeamLead => HashSet::from([Standard, Performance, Power, GraphicsG4dn, GraphicsProG4dn]),
        Role::Admin => BundleType::ALL.into_iter().collect(),
    }
}

#[test]
fn test_reference_table_permissions() {
    let engine = PolicyEngine::new();
    for role in Role::ALL {
        let expected = expected_permissions(role);
        for permission in Permission::ALL {
            assert_eq!(
                engine.has_permission(&[role], permission, None),
                expected.contains(&permission),
                "{role} / {permission}"
            );
        }
        assert_eq!(engine.get_permissions_for_roles(&[role]), expected);
    }
}

#[test]
fn test_reference_table_bundles() {
    let engine = PolicyEngine::new();
    for role in Role::ALL {
        let expected = expected_bundles(role);
        for bundle in BundleType::ALL {
            assert_eq!(
                engine.check_bundle_access(&[role], bundle),
                expected.contains(&bundle),
                "{role} / {bundle}"
            );
        }
        assert_eq!(engine.get_allowed_bundle_types(&[role]), expected);
    }
}

#[test]
fn test_admin_only_permissions() {
    let engine = PolicyEngine::new();
    for permission in [Permission::UserAssignRole, Permission::BudgetOverride] {
        assert!(engine.has_permission(&[Role::Admin], permission, None));
        assert!(!engine.has_permission(
            &[Role::Contractor, Role::Engineer, Role::TeamLead],
            permission,
            None
        ));
    }
}

#[test]
fn test_union_law() {
    let engine = PolicyEngine::new();
    for r1 in Role::ALL {
        for r2 in Role::ALL {
            for permission in Permission::ALL {
                assert_eq!(
                    engine.has_permission(&[r1, r2], permission, None),
                    engine.has_permission(&[r1], permission, None)
                        || engine.has_permission(&[r2], permission, None),
                    "{r1}+{r2} / {permission}"
                );
            }
            for bundle in BundleType::ALL {
                assert_eq!(
                    engine.check_bundle_access(&[r1, r2], bundle),
                    engine.check_bundle_access(&[r1], bundle)
                        || engine.check_bundle_access(&[r2], bundle),
                    "{r1}+{r2} / {bundle}"
                );
            }
        }
    }
}

#[test]
fn test_adding_a_role_never_removes_access() {
    let engine = PolicyEngine::new();
    let role_sets: Vec<Vec<Role>> = vec![
        vec![],
        vec![Role::Contractor],
        vec![Role::Engineer],
        vec![Role::Contractor, Role::TeamLead],
    ];

    for base in role_sets {
        for extra in Role::ALL {
            let mut widened = base.clone();
            widened.push(extra);
            for permission in Permission::ALL {
                if engine.has_permission(&base, permission, None) {
                    assert!(engine.has_permission(&widened, permission, None));
                }
            }
            assert!(
                engine
                    .get_allowed_bundle_types(&base)
                    .is_subset(&engine.get_allowed_bundle_types(&widened))
            );
        }
    }
}

#[test]
fn test_role_order_is_irrelevant() {
    let engine = PolicyEngine::new();
    assert_eq!(
        engine.get_permissions_for_roles(&[Role::Contractor, Role::TeamLead]),
        engine.get_permissions_for_roles(&[Role::TeamLead, Role::Contractor])
    );
}

#[test]
fn test_expired_credential_window_fails_closed() {
    let engine = PolicyEngine::new();
    let past = Utc::now() - Duration::hours(1);
    let future = Utc::now() + Duration::hours(1);

    for permission in Permission::ALL {
        assert!(!engine.has_permission(&[Role::Admin], permission, Some(past)));
        assert_eq!(
            engine.has_permission(&[Role::Admin], permission, Some(future)),
            engine.has_permission(&[Role::Admin], permission, None)
        );
        assert_eq!(
            engine.has_permission(&[Role::Contractor], permission, Some(future)),
            engine.has_permission(&[Role::Contractor], permission, None)
        );
    }
}

#[test]
fn test_bundle_gating() {
    let engine = PolicyEngine::new();
    let power: BundleType = "POWER".parse().unwrap();
    let gpu_pro: BundleType = "GRAPHICSPRO_G4DN".parse().unwrap();

    assert!(!engine.check_bundle_access(&[Role::Contractor], power));
    assert!(engine.check_bundle_access(&[Role::TeamLead], gpu_pro));
}

#[test]
fn test_engineer_allowed_bundles() {
    let engine = PolicyEngine::new();
    let names: HashSet<&str> = engine
        .get_allowed_bundle_types(&[Role::Engineer])
        .iter()
        .map(|b| b.as_str())
        .collect();

    assert_eq!(
        names,
        HashSet::from(["STANDARD", "PERFORMANCE", "POWER", "GRAPHICS_G4DN"])
    );
    assert!(!names.contains("GRAPHICSPRO_G4DN"));
}

#[test]
fn test_engine_is_shareable_across_threads() {
    let engine = PolicyEngine::new();
    let handles: Vec<_> = Role::ALL
        .into_iter()
        .map(|role| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.has_permission(&[role], Permission::WorkspaceCreate, None))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread"));
    }
}
