//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use p3_config::{ConfigError, P3Config};
use p3_core::TrackId;
use pretty_assertions::assert_eq;

fn figment_with(file: &str) -> Figment {
    Figment::from(Serialized::defaults(P3Config::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed("P3_").split("__"))
}

#[test]
fn loads_voting_section() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[voting]
current_conference = "ep2020"
eligible_conferences = ["ep2019", "ep2020"]
disallowed_redirect = "https://ep2020.europython.eu/en/talk-voting/"
"#,
        )?;

        let config = P3Config::from_figment(&figment_with("config.toml")).unwrap();
        assert_eq!(config.voting.current_conference.as_str(), "ep2020");
        assert_eq!(
            config
                .voting
                .eligible_conferences
                .iter()
                .map(p3_core::ConferenceId::as_str)
                .collect::<Vec<_>>(),
            vec!["ep2019", "ep2020"]
        );
        assert!(config.voting.has_disallowed_redirect());
        Ok(())
    });
}

#[test]
fn track_tables_merge_into_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[live]
internal_server = "stream.local:1935"
keynote_track = "main"

[live.tracks.main]
external = "abc123"
internal = "live/main"
"#,
        )?;

        let config = P3Config::from_figment(&figment_with("config.toml")).unwrap();
        assert_eq!(config.live.internal_server, "stream.local:1935");
        assert_eq!(config.live.tracks.len(), 8);
        let main = config.live.track(&TrackId::from("main")).unwrap();
        assert_eq!(main.external, "abc123");
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[live]
internal_server = "from-toml:1935"
embed_cache_ttl_secs = 60
"#,
        )?;
        jail.set_env("P3_LIVE__INTERNAL_SERVER", "from-env:1935");

        let config = P3Config::from_figment(&figment_with("config.toml")).unwrap();
        assert_eq!(config.live.internal_server, "from-env:1935");
        assert_eq!(config.live.embed_cache_ttl_secs, 60);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".p3")?;
        jail.create_file(
            ".p3/config.toml",
            r#"
[general]
conference_name = "EuroPython 2020"
"#,
        )?;

        let config = P3Config::load().unwrap();
        assert_eq!(config.general.conference_name, "EuroPython 2020");
        Ok(())
    });
}

#[test]
fn invalid_keynote_track_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("P3_LIVE__KEYNOTE_TRACK", "nowhere");

        let err = P3Config::from_figment(&figment_with("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "live.keynote_track"));
        Ok(())
    });
}

#[test]
fn dotenv_in_working_directory_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "P3_LIVE__CACHE_KEY_PREFIX=dotenv_embed_\n")?;

        let config = P3Config::load_with_dotenv().map_err(|e| e.to_string())?;
        assert_eq!(config.live.cache_key_prefix, "dotenv_embed_");
        Ok(())
    });
}
