use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# gapmap configuration

# Annual gap boundaries (inclusive upper bounds) for severity labels
[thresholds]
very_affordable_max = 2500
moderate_max = 7500
expensive_max = 15000

# Wording thresholds for the plain-language summary. Rates are percentages.
[narrative]
excellent_pell_rate = 80
solid_pell_rate = 60
fair_pell_rate = 40
equity_gap_points = 15
good_deal_gap_max = 3000

# Travel budget rules, relative to where your family lives
[travel]
origin = "the Poconos"
estimate_missing = false
close_drive_states = ["PA", "NJ", "DE"]
close_drive_cost = 600
medium_drive_states = ["NY", "CT", "MD", "DC"]
medium_drive_cost = 1000
far_drive_states = ["MA", "RI", "VA", "WV", "VT", "NH", "ME"]
far_drive_cost = 1500
fly_cost = 2500

[data]
source = "schools.json"
# rest_url = "https://your-project.supabase.co"
api_key_env = "GAPMAP_API_KEY"
table = "schools"
search_limit = 100
quick_search_limit = 10

[compare]
# state_file = "/path/to/state.json"
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    init_config_at(&config_path, force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

pub fn init_config_at(config_path: &Path, force: bool) -> Result<()> {
    if io::file_exists(config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }
    io::write_file(config_path, DEFAULT_CONFIG)?;
    log::debug!("Wrote default config to {}", config_path.display());
    Ok(())
}
