mod args;
mod logging;
mod output;

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use mailtrust::{DomainList, DomainLists, Verifier, load_domain_list};

use crate::args::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let mut addresses: Vec<String> = Vec::new();
    if let Some(Commands::Check { emails }) = &cli.cmd {
        addresses.extend(emails.iter().cloned());
    }
    if cli.stdin {
        for line in io::stdin().lock().lines() {
            let line = line.context("read stdin")?;
            let email = line.trim();
            if !email.is_empty() {
                addresses.push(email.to_string());
            }
        }
    }
    if cli.cmd.is_none() && !cli.stdin {
        Cli::clap_command().print_help()?;
        println!();
        return Ok(());
    }

    let verifier = Verifier::builder(load_lists(&cli)?)
        .dns_options(cli.dns_options())
        .smtp_options(cli.smtp_options())
        .whois_options(cli.whois_options())
        .options(cli.check_options())
        .build();

    let results = verifier
        .check_batch(&addresses, cli.skip_smtp, cli.requests_left)
        .await;
    let rows = output::make_rows(addresses, results, &verifier);
    output::write_reports(&rows, &cli)?;

    // codes de sortie : 0 OK, 2 syntaxe invalide ou MX absent, 1 fatal
    if output::any_definitive_negative(&rows) {
        std::process::exit(2);
    }
    Ok(())
}

fn load_lists(cli: &Cli) -> Result<DomainLists> {
    let blocklist = match &cli.blocklist {
        Some(path) => load_domain_list(path)
            .with_context(|| format!("load --blocklist {}", path.display()))?,
        None => DomainList::new(),
    };
    let trusted = match &cli.allowlist {
        Some(path) => load_domain_list(path)
            .with_context(|| format!("load --allowlist {}", path.display()))?,
        None => DomainList::new(),
    };
    let no_probe = match &cli.no_probe_list {
        Some(path) => load_domain_list(path)
            .with_context(|| format!("load --no-probe-list {}", path.display()))?,
        None => DomainList::default_no_probe(),
    };
    Ok(DomainLists::new(blocklist, trusted, no_probe))
}
