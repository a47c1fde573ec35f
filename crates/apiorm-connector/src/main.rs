use anyhow::{anyhow, bail, Context, Result};
use apiorm_connector::{ConnectorConfig, HttpRequest};
use apiorm_model::Record;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(&cli().get_matches()).await
}

fn cli() -> Command {
    let config_arg = Arg::new("config")
        .long("config")
        .short('c')
        .required(true)
        .help("Path to the TOML connector configuration");

    Command::new("apiorm")
        .version(apiorm_connector::VERSION)
        .about("REST API persistence connector")
        .subcommand_required(true)
        .subcommand(
            Command::new("routes")
                .about("Print the route table")
                .arg(config_arg.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("request")
                .about("Build and send one request for a model action")
                .arg(config_arg)
                .arg(
                    Arg::new("model")
                        .long("model")
                        .short('m')
                        .required(true)
                        .help("Model name"),
                )
                .arg(
                    Arg::new("action")
                        .long("action")
                        .short('a')
                        .required(true)
                        .help("Action name (all, first, last, count, create, update, delete, ...)"),
                )
                .arg(
                    Arg::new("record")
                        .long("record")
                        .short('r')
                        .help("Record attributes as a JSON object, for member actions"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .action(ArgAction::SetTrue)
                        .help("Print the request instead of sending it"),
                ),
        )
}

async fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("routes", args)) => routes(args),
        Some(("request", args)) => request(args).await,
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
}

fn load_config(args: &ArgMatches) -> Result<ConnectorConfig> {
    let path = args
        .get_one::<String>("config")
        .ok_or_else(|| anyhow!("--config is required"))?;
    ConnectorConfig::load(path).with_context(|| format!("loading {path}"))
}

fn routes(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let router = config.build_router()?;

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(router.routes())?);
        return Ok(());
    }

    println!("root: '{}'", router.root());
    for route in router.routes() {
        println!(
            "{:<8} {:<12} {:<10} {}",
            route.method(),
            route.model_name(),
            route.action(),
            route.url()
        );
    }
    Ok(())
}

async fn request(args: &ArgMatches) -> Result<()> {
    let config = load_config(args)?;
    let model = args
        .get_one::<String>("model")
        .ok_or_else(|| anyhow!("--model is required"))?;
    let action = args
        .get_one::<String>("action")
        .ok_or_else(|| anyhow!("--action is required"))?;

    let Some(class) = config.model(model) else {
        bail!("model {model} is not configured");
    };
    let record = args
        .get_one::<String>("record")
        .map(|raw| -> Result<Record> {
            let value = serde_json::from_str(raw).context("--record is not JSON")?;
            Ok(Record::build(&class, value)?)
        })
        .transpose()?;

    let connector = config.connector()?;

    if args.get_flag("dry-run") {
        let request = connector.build_request(&class, action, record.as_ref())?;
        print_request(&request)?;
        return Ok(());
    }

    let payload = match &record {
        Some(record) => connector.member_action(record, action).await?,
        None => connector.collection_action(&class, action).await?,
    };
    println!("{}", serde_json::to_string_pretty(&payload.to_value())?);
    Ok(())
}

fn print_request(request: &HttpRequest) -> Result<()> {
    println!("{} {}", request.method, request.full_url());
    if let Some(body) = &request.body {
        println!("{}", serde_json::to_string_pretty(body)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
        assert!(cli().try_get_matches_from(["apiorm"]).is_err());
    }

    #[tokio::test]
    async fn unknown_command_is_an_error() {
        let matches = Command::new("apiorm")
            .subcommand(Command::new("bogus"))
            .get_matches_from(["apiorm", "bogus"]);
        let err = run(&matches).await.unwrap_err();
        assert_eq!(err.to_string(), "unknown command: bogus");

        let matches = Command::new("apiorm").get_matches_from(["apiorm"]);
        let err = run(&matches).await.unwrap_err();
        assert_eq!(err.to_string(), "no command given");
    }
}
