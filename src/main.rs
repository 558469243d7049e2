// Entrypoint for the status tool.
// - Reads the store configuration once and passes it down explicitly.
// - Without a database URL it prints setup instructions and exits cleanly.

use netpulse_status::api::ApiClient;
use netpulse_status::config::{StoreConfig, DATABASE_URL_VAR};
use netpulse_status::logging::setup_tracing;
use netpulse_status::ui;

fn main() -> anyhow::Result<()> {
    setup_tracing();

    let Some(config) = StoreConfig::from_env()? else {
        println!(
            "Set {DATABASE_URL_VAR} to your Realtime Database URL, e.g.\n  \
             {DATABASE_URL_VAR}=https://your-project-id-default-rtdb.europe-west1.firebasedatabase.app"
        );
        return Ok(());
    };

    let api = ApiClient::new(config)?;
    ui::run(&api)?;
    Ok(())
}
