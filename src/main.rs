use anyhow::Result;
use gapmap::cli::{self, Cli, CompareAction, Commands};
use gapmap::commands::{
    self, AppContext, CompareConfig, GlobalOptions, SearchConfig, ShowConfig,
};
use gapmap::data::SearchCriteria;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    init_logging(cli.verbosity);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let ctx = AppContext::from_options(&global_options(&cli))?;
    log::debug!("Data source: {:?}", ctx.data_source());

    match cli.command {
        Commands::Search {
            income,
            max_gap,
            no_loan_only,
            in_state,
            limit,
            format,
            output,
        } => {
            let config = SearchConfig {
                criteria: SearchCriteria {
                    bracket: income,
                    max_gap,
                    no_loan_only,
                    state: in_state.map(|state| state.trim().to_uppercase()),
                },
                limit,
                format,
                output,
            };
            commands::run_search(&ctx, config)
        }
        Commands::Show {
            id,
            income,
            format,
            output,
        } => commands::run_show(
            &ctx,
            ShowConfig {
                id,
                bracket: income,
                format,
                output,
            },
        ),
        Commands::Compare {
            action,
            income,
            format,
        } => commands::run_compare(
            &ctx,
            CompareConfig {
                action: action.unwrap_or(CompareAction::Show),
                bracket: income,
                format,
            },
        ),
        Commands::Init { .. } => Ok(()),
    }
}

fn global_options(cli: &Cli) -> GlobalOptions {
    GlobalOptions {
        config: cli.config.clone(),
        data: cli.data.clone(),
        remote: cli.remote.clone(),
        state_file: cli.state_file.clone(),
        plain: cli.plain,
    }
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from warn.
fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    if std::env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbosity));
    }
    builder.format_timestamp(None).init();
}

fn level_for(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
