#[cfg(any(feature = "with-serde", feature = "with-csv"))]
use anyhow::Context;
use anyhow::{Result, bail};

use crate::args::Cli;
use mailtrust::{CheckResult, SmtpCheck, Verifier};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
pub struct OutputRow {
    pub address: String,
    pub score: u8,
    #[cfg_attr(feature = "with-serde", serde(flatten))]
    pub result: CheckResult,
}

pub fn make_rows(
    addresses: Vec<String>,
    results: Vec<CheckResult>,
    verifier: &Verifier,
) -> Vec<OutputRow> {
    addresses
        .into_iter()
        .zip(results)
        .map(|(address, result)| OutputRow {
            address,
            score: verifier.score(&result),
            result,
        })
        .collect()
}

pub fn write_reports(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    match cli.format.as_str() {
        "human" => {
            print!("{}", render_human(rows));
            Ok(())
        }
        "json" => write_json(rows, cli),
        "ndjson" => write_ndjson(rows, cli),
        "csv" => write_csv(rows, cli),
        other => bail!("unknown --format '{other}', use: human|json|ndjson|csv"),
    }
}

pub fn any_definitive_negative(rows: &[OutputRow]) -> bool {
    rows.iter().any(|row| row.result.is_definitive_negative())
}

const DETAIL_INDENT: &str = "          ";

fn status_label(result: &CheckResult) -> &'static str {
    if !result.syntax_valid {
        "[INVALID]"
    } else if !result.mx_ok() {
        "[NO MX]"
    } else if matches!(result.smtp, Some(SmtpCheck::Failed { .. })) {
        "[WARN]"
    } else {
        "[OK]"
    }
}

fn yes_no(value: Option<bool>) -> &'static str {
    if value.unwrap_or(false) { "yes" } else { "no" }
}

fn render_human(rows: &[OutputRow]) -> String {
    let mut lines = Vec::new();
    for row in rows {
        let result = &row.result;
        lines.push(format!(
            "{:<9} {}  score={}",
            status_label(result),
            row.address,
            row.score
        ));
        if !result.syntax_valid {
            continue;
        }

        let mut details = Vec::new();
        if let Some(mx) = &result.mx {
            if mx.ok {
                let summary = mx
                    .records
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                details.push(format!("mx: {summary}"));
            } else {
                details.push(format!(
                    "mx: error: {}",
                    mx.error.as_deref().unwrap_or("lookup failed")
                ));
            }
        }
        if let Some(smtp) = &result.smtp {
            details.push(match smtp {
                SmtpCheck::Ok => "smtp: ok".to_string(),
                SmtpCheck::Failed { reason } => format!("smtp: failed ({reason})"),
                SmtpCheck::Skipped { reason } => format!("smtp: skipped ({reason})"),
            });
        }

        let flags: Vec<&str> = [
            (result.is_role, "role"),
            (result.in_blocklist, "blocklist"),
            (result.is_disposable, "disposable"),
            (result.in_trusted_domains, "trusted"),
            (result.no_probe_list, "no-probe"),
        ]
        .into_iter()
        .filter(|(value, _)| value.unwrap_or(false))
        .map(|(_, name)| name)
        .collect();
        if !flags.is_empty() {
            details.push(format!("flags: {}", flags.join(", ")));
        }

        details.push(format!(
            "policies: spf={} dmarc={}",
            yes_no(result.has_spf),
            yes_no(result.has_dmarc)
        ));
        details.push(match result.domain_age_years {
            Some(years) if years > 0 => format!("domain age: {years}y"),
            _ => "domain age: unknown".to_string(),
        });
        if let Some(left) = result.requests_left {
            details.push(format!("requests left: {left}"));
        }

        lines.extend(details.into_iter().map(|d| format!("{DETAIL_INDENT}{d}")));
    }

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(feature = "with-serde")]
fn write_json(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    let s = serde_json::to_string_pretty(rows)?;
    if let Some(path) = &cli.out {
        write_all_atomically(path, s.as_bytes())?;
    } else {
        println!("{s}");
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_json(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_ndjson(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut buf = Vec::new();
        for row in rows {
            let line = serde_json::to_string(row)?;
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
        }
        write_all_atomically(path, &buf)?;
    } else {
        for row in rows {
            println!("{}", serde_json::to_string(row)?);
        }
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_ndjson(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=ndjson nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-csv")]
const CSV_HEADER: [&str; 17] = [
    "address",
    "score",
    "syntax_valid",
    "domain",
    "is_role",
    "in_blocklist",
    "in_trusted_domains",
    "is_disposable",
    "mx_ok",
    "mx_detail",
    "no_probe_list",
    "smtp_status",
    "smtp_reason",
    "has_spf",
    "has_dmarc",
    "domain_age_years",
    "requests_left",
];

#[cfg(feature = "with-csv")]
fn write_csv(rows: &[OutputRow], cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.out {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        let data = wtr.into_inner()?;
        write_all_atomically(path, &data)?;
    } else {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(CSV_HEADER)?;
        for row in rows {
            wtr.write_record(csv_record(row))?;
        }
        wtr.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-csv"))]
fn write_csv(_: &[OutputRow], _: &Cli) -> Result<()> {
    bail!("format=csv nécessite la feature 'with-csv'")
}

#[cfg(feature = "with-csv")]
fn csv_record(row: &OutputRow) -> Vec<String> {
    let result = &row.result;
    let (mx_ok, mx_detail) = match &result.mx {
        Some(mx) if mx.ok => (
            "true".to_string(),
            mx.records
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("|"),
        ),
        Some(mx) => ("false".to_string(), mx.error.clone().unwrap_or_default()),
        None => (String::new(), String::new()),
    };
    let (smtp_status, smtp_reason) = match &result.smtp {
        Some(SmtpCheck::Ok) => ("ok", String::new()),
        Some(SmtpCheck::Failed { reason }) => ("failed", reason.clone()),
        Some(SmtpCheck::Skipped { reason }) => ("skipped", reason.clone()),
        None => ("", String::new()),
    };

    vec![
        row.address.clone(),
        row.score.to_string(),
        result.syntax_valid.to_string(),
        result.domain.clone().unwrap_or_default(),
        bool_opt_str(result.is_role).to_string(),
        bool_opt_str(result.in_blocklist).to_string(),
        bool_opt_str(result.in_trusted_domains).to_string(),
        bool_opt_str(result.is_disposable).to_string(),
        mx_ok,
        mx_detail,
        bool_opt_str(result.no_probe_list).to_string(),
        smtp_status.to_string(),
        smtp_reason,
        bool_opt_str(result.has_spf).to_string(),
        bool_opt_str(result.has_dmarc).to_string(),
        result
            .domain_age_years
            .map(|y| y.to_string())
            .unwrap_or_default(),
        result
            .requests_left
            .map(|n| n.to_string())
            .unwrap_or_default(),
    ]
}

#[cfg(feature = "with-csv")]
fn bool_opt_str(opt: Option<bool>) -> &'static str {
    match opt {
        Some(true) => "true",
        Some(false) => "false",
        None => "",
    }
}

#[cfg(any(feature = "with-serde", feature = "with-csv"))]
fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    use std::io::Write;

    let tmp = format!("{path}.tmp");
    {
        let mut f = std::fs::File::create(&tmp).with_context(|| format!("create {tmp}"))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(&tmp, path).with_context(|| format!("rename {tmp} -> {path}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailtrust::{CheckResultBuilder, MxCheck, MxRecord};

    fn sample_rows() -> Vec<OutputRow> {
        let reachable = CheckResultBuilder::new("example.test")
            .role(false)
            .blocklisted(false)
            .trusted(false)
            .no_probe(false)
            .mx(MxCheck::found(vec![MxRecord::new(10, "mx.example.test")]))
            .smtp(SmtpCheck::Ok)
            .policies(true, false)
            .domain_age_years(6)
            .build();
        let no_mx = CheckResultBuilder::new("nomx.test")
            .role(true)
            .blocklisted(true)
            .trusted(false)
            .no_probe(false)
            .mx(MxCheck::failed("no MX records for nomx.test"))
            .smtp(SmtpCheck::Skipped {
                reason: "no MX records".to_string(),
            })
            .policies(false, false)
            .domain_age_years(0)
            .requests_left(Some(4))
            .build();

        vec![
            OutputRow {
                address: "user@example.test".to_string(),
                score: 77,
                result: reachable,
            },
            OutputRow {
                address: "not-an-email".to_string(),
                score: 0,
                result: CheckResult::invalid(),
            },
            OutputRow {
                address: "admin@nomx.test".to_string(),
                score: 0,
                result: no_mx,
            },
        ]
    }

    #[test]
    fn human_report() {
        insta::assert_snapshot!(render_human(&sample_rows()), @r"
[OK]      user@example.test  score=77
          mx: 10:mx.example.test
          smtp: ok
          policies: spf=yes dmarc=no
          domain age: 6y
[INVALID] not-an-email  score=0
[NO MX]   admin@nomx.test  score=0
          mx: error: no MX records for nomx.test
          smtp: skipped (no MX records)
          flags: role, blocklist, disposable
          policies: spf=no dmarc=no
          domain age: unknown
          requests left: 4
");
    }

    #[test]
    fn empty_report_is_empty() {
        assert_eq!(render_human(&[]), "");
    }

    #[test]
    fn negatives_drive_exit_code() {
        let rows = sample_rows();
        assert!(any_definitive_negative(&rows));
        assert!(!any_definitive_negative(&rows[..1]));
    }

    #[cfg(feature = "with-csv")]
    #[test]
    fn csv_columns_match_header() {
        for row in sample_rows() {
            assert_eq!(csv_record(&row).len(), CSV_HEADER.len());
        }
    }
}
