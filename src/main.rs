use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tour_storefront::domain::model::CustomerFields;
use tour_storefront::utils::error::ErrorSeverity;
use tour_storefront::utils::logger;
use tour_storefront::{
    CliConfig, HttpOrderTransport, Intent, Outcome, Storefront, StorefrontError, TerminalView,
};

type Store = Storefront<HttpOrderTransport, TerminalView<std::io::Stdout>>;

const HELP: &str = "Commands: list | show N | add N | rm N | cart | checkout | submit | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tour-storefront");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if config.is_placeholder_endpoint() {
        tracing::warn!("⚠️ Backend endpoint not configured; orders will be simulated");
    }

    let view = TerminalView::new(std::io::stdout(), config.display.currency_symbol.clone());
    let mut store = Storefront::start(&config, HttpOrderTransport::new(), view).await;

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(input) = lines.next_line().await? {
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or("");
        let argument = parts.next();

        let intent = match (command, argument) {
            ("", _) => continue,
            ("quit" | "exit", _) => break,
            ("help", _) => {
                println!("{}", HELP);
                continue;
            }
            ("list", _) => {
                store.render_catalog();
                continue;
            }
            ("cart", _) => Intent::OpenCart,
            ("checkout", _) => Intent::StartCheckout,
            ("show" | "add" | "rm", Some(arg)) => match parse_position(arg) {
                Some(index) => match command {
                    "show" => Intent::SelectService(index),
                    "add" => Intent::AddToCart(index),
                    _ => Intent::RemoveFromCart(index),
                },
                None => {
                    println!("Expected a number starting at 1, got '{}'", arg);
                    continue;
                }
            },
            // 購物車為空時不詢問欄位
            ("submit", _) if store.snapshot().is_empty() => Intent::StartCheckout,
            ("submit", _) => match read_customer_fields(&mut lines, &store).await? {
                Some(fields) => Intent::SubmitOrder(fields),
                None => break,
            },
            _ => {
                println!("{}", HELP);
                continue;
            }
        };

        if let Outcome::Ignored = store.dispatch(intent).await {
            println!("Nothing to do.");
        }
    }

    tracing::info!("Goodbye");
    Ok(())
}

fn parse_position(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

/// 依序詢問表單欄位；空白輸入沿用上次失敗時保留的值
async fn read_customer_fields(
    lines: &mut Lines<BufReader<Stdin>>,
    store: &Store,
) -> anyhow::Result<Option<CustomerFields>> {
    let previous = store.pending_fields().cloned().unwrap_or_default();
    let mut answers = Vec::with_capacity(4);

    for (label, default) in [
        ("Name", previous.name),
        ("Email", previous.email),
        ("Phone", previous.phone),
        ("Date (YYYY-MM-DD)", previous.date),
    ] {
        loop {
            if default.is_empty() {
                println!("{}:", label);
            } else {
                println!("{} [{}]:", label, default);
            }

            let Some(input) = lines.next_line().await? else {
                return Ok(None);
            };
            let value = match input.trim() {
                "" => default.clone(),
                typed => typed.to_string(),
            };

            if value.is_empty() {
                println!("{} is required.", label);
            } else {
                answers.push(value);
                break;
            }
        }
    }

    let mut answers = answers.into_iter();
    Ok(Some(CustomerFields {
        name: answers.next().unwrap_or_default(),
        email: answers.next().unwrap_or_default(),
        phone: answers.next().unwrap_or_default(),
        date: answers.next().unwrap_or_default(),
    }))
}

fn exit_code(error: &StorefrontError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
