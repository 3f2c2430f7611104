//! `cfg`: prints the resolved configuration as JSON, each value paired
//! with where it came from (`default`, `file` or `env`).

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "starting_credits": {
            "value": config.starting_credits,
            "source": sources.starting_credits,
        },
        "max_rounds": {
            "value": config.max_rounds,
            "source": sources.max_rounds,
        },
        "bet": {
            "value": config.bet,
            "source": sources.bet,
        },
        "deal_delay_ms": {
            "value": config.deal_delay_ms,
            "source": sources.deal_delay_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
