//! `finmap config` — show or change the settings file.

use finmap_config::{settings_file_path, Settings};

use crate::exit_codes::EXIT_ERROR;
use crate::CliError;

pub fn cmd_config(server_url: Option<String>) -> Result<(), CliError> {
    let mut settings = Settings::load();

    if let Some(url) = server_url {
        let url = url.trim().trim_end_matches('/').to_string();
        if url.is_empty() {
            return Err(CliError::usage("--server-url must not be empty"));
        }
        settings.server_url = url;
        settings
            .save()
            .map_err(|e| CliError { code: EXIT_ERROR, message: e, hint: None })?;
    }

    println!("server.url = {}", settings.server_url);
    println!("server.timeoutSecs = {}", settings.timeout_secs);
    if let Some(path) = settings_file_path() {
        eprintln!("settings file: {}", path.display());
    }
    Ok(())
}
