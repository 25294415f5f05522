use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cuida_core::constants::{HOME_UTC_OFFSET_ENV, ROLE_TABLE_ENV, STYLE_TABLE_ENV};
use cuida_core::council::Role;
use cuida_core::documents::{format_taxpayer_id, mask_postal_code, DocumentKind};
use cuida_core::status::Taxonomy;
use cuida_core::temporal::{DateFormat, DateRule};
use cuida_core::{CoreConfig, Services};

#[derive(Parser)]
#[command(name = "cuida")]
#[command(about = "Normalise documents, dates, statuses and council requirements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CPF
    Cpf {
        /// CPF, masked or not
        raw: String,
    },
    /// Validate a CEP
    Cep {
        /// CEP, masked or not
        raw: String,
    },
    /// Parse a date and render it
    Date {
        /// Wire, UI or RFC 3339 date text
        input: String,
        /// Output format; every format is printed when omitted
        #[arg(long)]
        format: Option<DateFormat>,
        /// Fail if the date is before today
        #[arg(long)]
        not_in_past: bool,
        /// Fail if the date is after today
        #[arg(long)]
        not_in_future: bool,
        /// Treat the date as a birth date and require this minimum age
        #[arg(long)]
        min_age: Option<u32>,
    },
    /// Resolve a status and print its style
    Status {
        /// Free-form status text
        candidate: String,
        /// Restrict resolution to one taxonomy
        #[arg(long)]
        taxonomy: Option<Taxonomy>,
    },
    /// Check whether a role requires a council registration number
    Council {
        /// Role id
        role_id: u32,
        /// JSON file with the role list from the remote system
        #[arg(long)]
        roles: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("cuida=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CoreConfig::from_env_values(
        std::env::var(HOME_UTC_OFFSET_ENV).ok(),
        std::env::var(STYLE_TABLE_ENV).ok(),
        std::env::var(ROLE_TABLE_ENV).ok(),
    )?;
    let services = Services::from_config(&config)?;

    match cli.command {
        Commands::Cpf { raw } => {
            services.validate_document(DocumentKind::TaxpayerId, &raw)?;
            println!("valid {}", format_taxpayer_id(&raw));
        }
        Commands::Cep { raw } => {
            services.validate_document(DocumentKind::PostalCode, &raw)?;
            println!("valid {}", mask_postal_code(&raw));
        }
        Commands::Date {
            input,
            format,
            not_in_past,
            not_in_future,
            min_age,
        } => {
            let value = services.temporal.parse(input.as_str())?;

            let today = services.temporal.today();
            let rules = [
                not_in_past.then_some(DateRule::NotInPast),
                not_in_future.then_some(DateRule::NotInFuture),
                min_age.map(DateRule::MinimumAge),
            ];
            for rule in rules.into_iter().flatten() {
                rule.check(&value, today)
                    .with_context(|| format!("{} fails {rule:?}", value))?;
            }

            match format {
                Some(format) => println!("{}", services.temporal.render(&value, format)),
                None => {
                    for format in DateFormat::ALL {
                        println!("{format:<13} {}", services.temporal.render(&value, format));
                    }
                }
            }
        }
        Commands::Status {
            candidate,
            taxonomy,
        } => {
            let (label, style) = match services.statuses.lookup(&candidate, taxonomy) {
                Some((label, style)) => (Some(label), style),
                None => (None, services.statuses.neutral()),
            };
            let out = json!({
                "label": label,
                "style": style,
                "classes": style.combined_classes(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Council { role_id, roles } => {
            let roles: Option<Vec<Role>> = roles
                .map(|path| -> anyhow::Result<Vec<Role>> {
                    let text = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    serde_json::from_str(&text)
                        .with_context(|| format!("parsing role list {}", path.display()))
                })
                .transpose()?;
            tracing::debug!(
                role_id,
                dynamic_roles = roles.as_ref().map_or(0, Vec::len),
                "resolving council requirement"
            );

            let requirement = services.councils.resolve(role_id, roles.as_deref());
            println!("{}", serde_json::to_string_pretty(&requirement)?);
        }
    }

    Ok(())
}
