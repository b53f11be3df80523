use clap::Parser;
use geodais::{api, browse, cli, config, dashboard, display, error};
use cli::{Cli, Commands};
use config::Config;
use dashboard::Dashboard;
use error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = Config::load()?;
    if let Some(base) = cli.api_base.clone() {
        config.set_api_base(base)?;
    }

    let env = dashboard::detect_environment(cli.batch);
    let source = api::HttpRecordSource::new(config.registros_url());

    match cli.command {
        Commands::List { json } => {
            let dashboard = Dashboard::new(source, config.dashboard.map.clone(), env)?;
            dashboard.attach_spinner();
            dashboard.refresh().await?;
            let registros = dashboard.registros();

            if json {
                println!("{}", serde_json::to_string_pretty(&registros)?);
            } else {
                println!("🌱 {} registros\n", registros.len());
                for registro in &registros {
                    println!("{}", display::registro_line(registro));
                }
            }
        }

        Commands::Show { key } => {
            let dashboard = Dashboard::new(source, config.dashboard.map.clone(), env)?;
            dashboard.attach_spinner();
            dashboard.refresh().await?;
            let registro = dashboard.select_key(&key)?;
            println!("{}", display::registro_detail(&registro, dashboard.coordinates().as_deref()));
        }

        Commands::Browse => {
            let dashboard = Dashboard::new(source, config.dashboard.map.clone(), env)?;
            dashboard.attach_spinner();
            if !dashboard.start().await {
                return Err(error::GeodaisError::NotInteractive);
            }
            browse::run_browse(&dashboard).await?;
        }

        Commands::Config { set_api_base, show } => {
            if let Some(base) = set_api_base {
                let mut stored = Config::load_from(&Config::config_path()?)?;
                stored.set_api_base(base)?;
                stored.save()?;
                println!("✔ API URLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  API: {}", config.dashboard.api_base);
                println!("  地図中心: {}", config.dashboard.map.center.display());
                println!("  ズーム: {}", config.dashboard.map.zoom);
                let layers: Vec<&str> = config.dashboard.map.base_layers.iter().map(|l| l.name.as_str()).collect();
                println!("  ベースレイヤー: {}", layers.join(", "));
            }
        }
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}
