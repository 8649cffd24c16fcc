//! Access resolution tests
//!
//! Configures group settings through the mutation engine, the same way the
//! CLI does, then resolves principals against them.

mod common;

use common::*;
use ldapaccess_core::access_settings::SUPER_ACCESS_GROUPS;
use ldapaccess_core::settings::modify_setting;
use ldapaccess_core::{resolve, AccessGrant, AccessLevel, LdapAccessSettings, Principal};
use ldapaccess_types::types::SiteId;

const GROUPS: &[&str] = &["admins", "readers", "writers", "x"];

fn configure(settings: &mut LdapAccessSettings, name: &str, groups: &[&str]) {
	modify_setting(settings.registry_mut(), name, "set", &strings(groups))
		.unwrap_or_else(|err| panic!("setting {} failed: {}", name, err));
}

#[tokio::test]
async fn test_superuser_group_wins() {
	let (mut settings, _store) = create_test_settings(GROUPS, &[1, 2]).await;
	configure(&mut settings, SUPER_ACCESS_GROUPS, &["admins"]);
	configure(&mut settings, "1_viewGroups", &["x"]);
	configure(&mut settings, "2_adminGroups", &["x"]);

	let grant = resolve(&settings, &Principal::new(["admins", "x"]));
	assert_eq!(grant, AccessGrant::Superuser);
	assert_eq!(serde_json::to_value(&grant).unwrap(), serde_json::json!({ "superuser": true }));
}

#[tokio::test]
async fn test_view_and_admin_on_different_sites() {
	let (mut settings, _store) = create_test_settings(GROUPS, &[1, 2]).await;
	configure(&mut settings, "1_viewGroups", &["readers"]);
	configure(&mut settings, "2_adminGroups", &["readers"]);

	let grant = resolve(&settings, &Principal::new(["readers"]));
	assert_eq!(grant.sites(AccessLevel::View), [SiteId(1)]);
	assert_eq!(grant.sites(AccessLevel::Admin), [SiteId(2)]);
	assert_eq!(
		serde_json::to_value(&grant).unwrap(),
		serde_json::json!({ "view": [1], "admin": [2] })
	);
}

#[tokio::test]
async fn test_admin_dominates_view_on_same_site() {
	let (mut settings, _store) = create_test_settings(GROUPS, &[1, 2, 3]).await;
	configure(&mut settings, "1_viewGroups", &["readers"]);
	configure(&mut settings, "2_viewGroups", &["readers"]);
	configure(&mut settings, "2_adminGroups", &["readers"]);
	configure(&mut settings, "3_viewGroups", &["writers"]);
	configure(&mut settings, "3_adminGroups", &["readers"]);

	let grant = resolve(&settings, &Principal::new(["readers", "writers"]));
	assert_eq!(grant.sites(AccessLevel::View), [SiteId(1)]);
	assert_eq!(grant.sites(AccessLevel::Admin), [SiteId(2), SiteId(3)]);
	assert_eq!(grant.level_for(SiteId(2)), Some(AccessLevel::Admin));
}

#[tokio::test]
async fn test_no_matching_group_is_no_access() {
	let (mut settings, _store) = create_test_settings(GROUPS, &[1]).await;
	configure(&mut settings, SUPER_ACCESS_GROUPS, &["admins"]);
	configure(&mut settings, "1_viewGroups", &["readers"]);

	let grant = resolve(&settings, &Principal::new(["writers"]));
	assert_eq!(grant, AccessGrant::NoAccess);
	assert_eq!(serde_json::to_value(&grant).unwrap(), serde_json::json!({ "superuser": false }));
}

#[tokio::test]
async fn test_principal_without_groups() {
	let (mut settings, _store) = create_test_settings(GROUPS, &[1]).await;
	configure(&mut settings, SUPER_ACCESS_GROUPS, &["admins"]);
	configure(&mut settings, "1_viewGroups", &["readers"]);

	assert_eq!(resolve(&settings, &Principal::without_groups()), AccessGrant::NoAccess);
	assert_eq!(resolve(&settings, &Principal::new(Vec::<String>::new())), AccessGrant::NoAccess);

	let entry = serde_json::json!({ "uid": "jdoe", "groups": { "cn": "admins" } });
	assert_eq!(resolve(&settings, &Principal::from_ldap_entry(&entry)), AccessGrant::NoAccess);
}

#[tokio::test]
async fn test_empty_superuser_groups_never_grant_superuser() {
	let (settings, _store) = create_test_settings(GROUPS, &[]).await;
	assert_eq!(resolve(&settings, &Principal::new(GROUPS.iter().copied())), AccessGrant::NoAccess);
}

#[tokio::test]
async fn test_resolution_follows_current_values() {
	let (mut settings, _store) = create_test_settings(GROUPS, &[1]).await;
	configure(&mut settings, "1_adminGroups", &["writers"]);
	let principal = Principal::new(["writers"]);
	assert_eq!(resolve(&settings, &principal).level_for(SiteId(1)), Some(AccessLevel::Admin));

	modify_setting(settings.registry_mut(), "1_adminGroups", "remove", &strings(&["writers"]))
		.unwrap();
	assert_eq!(resolve(&settings, &principal), AccessGrant::NoAccess);
}

// vim: ts=4
