use figment::Jail;

use partshop_core::access::{Capability, Role};
use partshop_core::admin::Dealer;
use partshop_core::config::Config;
use partshop_core::table::TableQuery;

#[test]
fn file_env_overlay_and_env_vars_merge() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
            [api]
            base_url = "https://api.example.test"

            [search]
            limit = 50
            "#,
        )?;
        jail.create_file("config.test.toml", "[session]\nvehicle_type_id = \"vt-car\"\n")?;
        jail.set_env("APP_API__AUTH_TOKEN", "secret-token");

        let config = Config::load_for_env("test").map_err(|e| e.to_string())?;
        let settings = config.settings().map_err(|e| e.to_string())?;

        assert_eq!(settings.api.base_url, "https://api.example.test");
        assert_eq!(settings.api.auth_token.as_deref(), Some("secret-token"));
        assert_eq!(settings.search.limit, 50);
        assert_eq!(settings.search.page, 1, "unset keys keep defaults");
        assert_eq!(settings.session.vehicle_type_id.as_deref(), Some("vt-car"));

        let limit: u32 = config.get("search.limit").map_err(|e| e.to_string())?;
        assert_eq!(limit, 50);
        Ok(())
    });
}

#[test]
fn overlay_for_other_env_is_ignored() {
    Jail::expect_with(|jail| {
        jail.create_file("config.prod.toml", "[search]\nlimit = 99\n")?;
        let settings = Config::load_for_env("dev")
            .and_then(|c| c.settings())
            .map_err(|e| e.to_string())?;
        assert_eq!(settings.search.limit, 20);
        Ok(())
    });
}

#[test]
fn invalid_settings_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[tables]\npage_size = 0\n")?;
        let config = Config::load_for_env("test").map_err(|e| e.to_string())?;
        assert!(config.settings().is_err(), "zero page size must not validate");
        Ok(())
    });
}

fn dealer(id: &str, name: &str, city: Option<&str>, active: bool) -> Dealer {
    Dealer {
        id: id.into(),
        name: name.into(),
        email: format!("{}@dealers.test", id),
        city: city.map(str::to_string),
        is_active: active,
    }
}

#[test]
fn dealer_table_search_and_sort_by_city() {
    let dealers = vec![
        dealer("d1", "Speedy Spares", Some("Pune"), true),
        dealer("d2", "Auto Hub", None, false),
        dealer("d3", "Pune Motors", Some("Mumbai"), true),
        dealer("d4", "Gear Works", Some("Delhi"), true),
    ];

    let page = TableQuery::new(10).search("pune").apply(&dealers);
    let ids: Vec<_> = page.rows.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d1", "d3"], "matches name or city");

    let page = TableQuery::new(10).sort("city".parse().expect("spec")).apply(&dealers);
    let ids: Vec<_> = page.rows.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d4", "d3", "d1", "d2"], "dealers without a city sort last");
}

#[test]
fn capability_check_drives_row_actions() {
    let support = Role::parse("Customer-Support");
    assert!(support.can(Capability::ProcessReturns));
    assert!(!support.can(Capability::ToggleDealer));
    assert!(Role::parse("super admin").can(Capability::ToggleEmployee));
}
