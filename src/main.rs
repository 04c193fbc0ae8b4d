use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use keyword_forge::api::create_router;
use keyword_forge::config::Config;
use keyword_forge::keyphrase::KeyphraseExtractor;
use keyword_forge::related::RelatedSearchClient;
use keyword_forge::seo::SeoKeywordGenerator;
use keyword_forge::ui::{
    DESCRIPTION_ID, Element, KEYWORD_BOX_ID, KeywordForm, RESULT_CONTAINER_ID, StderrNotifier,
    TITLE_ID, generate_keywords,
};

#[derive(Parser, Debug)]
#[command(name = "keyword-forge", version, about = "SEO keyword generator")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate keywords for a title and description
    Generate {
        #[arg(short, long)]
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Use the full SEO generator instead of the plain form keywords
        #[arg(long)]
        structured: bool,
        /// Skip the related search lookup
        #[arg(long)]
        no_related: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Command::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            title,
            description,
            structured: false,
            ..
        } => {
            let title = Element::new(TITLE_ID).with_value(title);
            let description = Element::new(DESCRIPTION_ID).with_value(description);
            let mut keyword_box = Element::new(KEYWORD_BOX_ID);
            let mut result_container = Element::new(RESULT_CONTAINER_ID);

            let mut form = KeywordForm {
                title: &title,
                description: &description,
                keyword_box: &mut keyword_box,
                result_container: &mut result_container,
            };
            if generate_keywords(&mut form, &mut StderrNotifier).is_none() {
                return Ok(ExitCode::FAILURE);
            }
            debug!(style = %result_container.style(), "result container updated");
            println!("{}", keyword_box.text_content());
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate {
            title,
            description,
            no_related,
            ..
        } => {
            let generator = Arc::new(build_generator(&config, !no_related));
            match generator.generate(title, description).await {
                Ok(keywords) => {
                    for keyword in keywords {
                        println!("{}", keyword);
                    }
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn build_generator(config: &Config, allow_related: bool) -> SeoKeywordGenerator {
    let related = (allow_related && config.related_searches).then(|| {
        RelatedSearchClient::new(
            config.related_search_url.clone(),
            config.user_agent.clone(),
        )
    });
    SeoKeywordGenerator::new(KeyphraseExtractor::default(), related)
}

async fn serve(config: Config) -> Result<()> {
    let generator = Arc::new(build_generator(&config, true));
    let router = create_router(generator, &config.templates_dir, &config.static_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "keyword service listening");

    axum::serve(listener, router)
        .await
        .context("HTTP server stopped unexpectedly")?;
    Ok(())
}
