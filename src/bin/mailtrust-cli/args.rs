use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mailtrust::{CheckOptions, DnsOptions, SmtpProbeOptions, WhoisOptions};

#[derive(Parser)]
#[command(name = "mailtrust-cli", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long, global = true)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long, global = true)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, global = true, default_value = "human")]
    pub format: String,

    /// ne contacte pas les serveurs SMTP
    #[arg(long, global = true)]
    pub skip_smtp: bool,

    /// quota restant, recopié tel quel dans chaque résultat
    #[arg(long, global = true)]
    pub requests_left: Option<u64>,

    /// fichier de domaines bloqués (un par ligne)
    #[arg(long, global = true)]
    pub blocklist: Option<PathBuf>,

    /// fichier de domaines de confiance (un par ligne)
    #[arg(long, global = true)]
    pub allowlist: Option<PathBuf>,

    /// domaines à ne jamais sonder (liste intégrée si absent)
    #[arg(long = "no-probe-list", global = true)]
    pub no_probe_list: Option<PathBuf>,

    /// adresses vérifiées en parallèle
    #[arg(long, global = true, default_value_t = 8)]
    pub concurrency: usize,

    /// timeout DNS par tentative (ms)
    #[arg(long = "dns-timeout", global = true, default_value_t = 3_000)]
    pub dns_timeout_ms: u64,

    /// timeout de connexion SMTP (ms)
    #[arg(long = "connect-timeout", global = true, default_value_t = 5_000)]
    pub connect_timeout_ms: u64,

    /// timeout d'attente de la bannière SMTP (ms)
    #[arg(long = "greeting-timeout", global = true, default_value_t = 10_000)]
    pub greeting_timeout_ms: u64,

    /// timeout WHOIS (ms)
    #[arg(long = "whois-timeout", global = true, default_value_t = 5_000)]
    pub whois_timeout_ms: u64,

    /// autorise IPv6 pour la sonde SMTP
    #[arg(long, global = true)]
    pub ipv6: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// vérifie une ou plusieurs adresses
    Check {
        /// adresses e-mail
        emails: Vec<String>,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    /// The step guard grows with the SMTP timeouts, never below the default.
    pub fn check_options(&self) -> CheckOptions {
        let defaults = CheckOptions::default();
        let guard = self.smtp_options().session_budget().max(defaults.step_timeout);
        defaults
            .with_step_timeout(guard)
            .with_concurrency(self.concurrency)
    }

    pub fn dns_options(&self) -> DnsOptions {
        DnsOptions {
            timeout: Duration::from_millis(self.dns_timeout_ms),
            ..DnsOptions::default()
        }
    }

    pub fn smtp_options(&self) -> SmtpProbeOptions {
        let defaults = SmtpProbeOptions::default();
        let idle = defaults.idle_timeout;
        SmtpProbeOptions {
            ipv6: self.ipv6,
            ..defaults.with_timeouts(
                Duration::from_millis(self.connect_timeout_ms),
                Duration::from_millis(self.greeting_timeout_ms),
                idle,
            )
        }
    }

    pub fn whois_options(&self) -> WhoisOptions {
        WhoisOptions {
            timeout: Duration::from_millis(self.whois_timeout_ms),
            ..WhoisOptions::default()
        }
    }
}
