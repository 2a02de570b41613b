// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Integration tests for the authorization engine: ability aggregation and
//! first-match-wins permission evaluation over the in-memory role store.

use std::sync::Arc;

use keygate_core::error::AuthzError;
use keygate_core::types::{Ability, Role, RoleId, User};
use keygate_rbac::{AuthorizationEngine, GlobMatcher};
use keygate_tests::common::{
    init_test_logging, MemoryRoleService, RoleBuilder, RoleFixtures, UserBuilder, UserFixtures,
};

fn engine_with(roles: Vec<Role>) -> (AuthorizationEngine, Arc<MemoryRoleService>) {
    let service = Arc::new(MemoryRoleService::with_roles(roles));
    let engine = AuthorizationEngine::new(service.clone(), Arc::new(GlobMatcher::new()));
    (engine, service)
}

#[tokio::test]
async fn test_authorize_grants_and_denies() {
    init_test_logging();

    let (engine, _) = engine_with(RoleFixtures::all());
    let alice = UserFixtures::alice();

    // reader grants read on doc*, editor grants write on doc*.
    engine.authorize(&alice, "read", "doc1").await.unwrap();
    engine.authorize(&alice, "write", "doc42").await.unwrap();

    let error = engine.authorize(&alice, "delete", "doc1").await.unwrap_err();
    assert!(matches!(error, AuthzError::Forbidden { .. }));
}

#[tokio::test]
async fn test_no_roles_means_no_abilities() {
    init_test_logging();

    let (engine, roles) = engine_with(RoleFixtures::all());
    let bob = UserFixtures::bob();

    let error = engine.authorize(&bob, "read", "doc1").await.unwrap_err();
    assert!(matches!(error, AuthzError::NoAbilities));

    // A user with no role IDs never touches the role store.
    assert_eq!(roles.find_count(), 0);
}

#[tokio::test]
async fn test_roles_without_abilities_mean_no_abilities() {
    init_test_logging();

    let (engine, roles) = engine_with(RoleFixtures::all());
    let carol = UserFixtures::carol();

    let error = engine.authorize(&carol, "read", "doc1").await.unwrap_err();
    assert!(matches!(error, AuthzError::NoAbilities));
    assert_eq!(roles.find_count(), 1);
}

#[tokio::test]
async fn test_inert_abilities_never_match() {
    init_test_logging();

    let (engine, _) = engine_with(RoleFixtures::all());
    let user = UserBuilder::new("user-odd").role("broken").build();

    // The broken role has abilities, so this is Forbidden, not NoAbilities —
    // but its empty patterns must never grant anything.
    let error = engine.authorize(&user, "read", "doc1").await.unwrap_err();
    assert!(matches!(error, AuthzError::Forbidden { .. }));
}

#[tokio::test]
async fn test_wildcard_ability_grants_everything() {
    init_test_logging();

    let (engine, _) = engine_with(RoleFixtures::all());
    let root = UserBuilder::new("user-root").role("admin").build();

    engine.authorize(&root, "delete", "anything").await.unwrap();
    engine.authorize(&root, "purge", "doc1").await.unwrap();
}

#[tokio::test]
async fn test_alternative_patterns() {
    init_test_logging();

    let (engine, _) = engine_with(RoleFixtures::all());
    let alice = UserFixtures::alice();

    // editor carries {read,write} on report-*.
    engine.authorize(&alice, "read", "report-q3").await.unwrap();
    engine.authorize(&alice, "write", "report-q3").await.unwrap();

    let error = engine
        .authorize(&alice, "delete", "report-q3")
        .await
        .unwrap_err();
    assert!(matches!(error, AuthzError::Forbidden { .. }));
}

#[tokio::test]
async fn test_abilities_aggregate_in_role_order() {
    init_test_logging();

    let first = RoleBuilder::new("first")
        .ability("a", "1")
        .ability("b", "2")
        .build();
    let second = RoleBuilder::new("second").ability("c", "3").build();

    let (engine, _) = engine_with(vec![first, second]);
    let user = User::new(
        "u1",
        "ordered",
        vec![RoleId::new("first"), RoleId::new("second")],
    );

    let abilities = engine.user_abilities(&user).await.unwrap();
    assert_eq!(
        abilities,
        vec![
            Ability::new("a", "1"),
            Ability::new("b", "2"),
            Ability::new("c", "3"),
        ]
    );
}

#[tokio::test]
async fn test_unresolved_role_ids_are_skipped() {
    init_test_logging();

    let (engine, _) = engine_with(RoleFixtures::all());
    let user = UserBuilder::new("user-stale")
        .role("vanished")
        .role("reader")
        .build();

    // The vanished role contributes nothing; reader still grants read.
    engine.authorize(&user, "read", "doc1").await.unwrap();
}

#[tokio::test]
async fn test_role_store_failure_is_a_dependency_error() {
    init_test_logging();

    let (engine, roles) = engine_with(RoleFixtures::all());
    roles.fail_all(true);

    let error = engine
        .authorize(&UserFixtures::alice(), "read", "doc1")
        .await
        .unwrap_err();
    assert!(matches!(error, AuthzError::Dependency { .. }));
}
