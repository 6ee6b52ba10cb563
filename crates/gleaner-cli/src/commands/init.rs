//! Module for writing a default configuration file.

use super::*;

/// Arguments of `gleaner init`.
#[derive(Args, Clone)]
pub struct InitOptions {
  /// Overwrite an existing configuration file
  #[arg(long, action = ArgAction::SetTrue)]
  pub force: bool,
}

/// Function for the [`Commands::Init`] in the CLI.
pub fn init(cli: &Cli, options: &InitOptions) -> Result<()> {
  let path = cli.config_path();
  if path.exists() && !options.force {
    info(&format!(
      "Configuration already exists at {}, pass --force to overwrite it",
      path.display()
    ));
    return Ok(());
  }

  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(&path, Config::default().to_toml_string()?)?;
  success(&format!("Wrote default configuration to {}", path.display()));
  Ok(())
}
