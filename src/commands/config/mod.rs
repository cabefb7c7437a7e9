use clap::Subcommand;

/// Settings file commands.
#[derive(Subcommand, Clone, PartialEq, Eq, Debug)]
pub enum ConfigCommands {
    /// Print JSON Schema for settings.json
    Schema,

    /// Print the settings file location that `scrape` reads by default
    Path,
}

impl ConfigCommands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Schema => {
                let schema = crate::shared::config::generate_schema();
                let json = serde_json::to_string_pretty(&schema)?;
                println!("{json}");
            }
            Self::Path => match crate::shared::config::default_settings_path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("Cannot determine config directory: HOME is not set"),
            },
        }
        Ok(())
    }
}
