use p3_config::P3Config;

/// Handle `p3 config show`.
pub fn show(config: &P3Config) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
