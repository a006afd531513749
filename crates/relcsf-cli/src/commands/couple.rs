use crate::cli::CoupleArgs;
use crate::error::{CliError, Result};
use relcsf::core::coupling::couple::couple;
use relcsf::core::models::config::Config;
use relcsf::core::parser::{parse_average_config, parse_configs};
use relcsf::core::quantum::format_j;
use relcsf::engine::error::EngineError;
use std::fmt::Write;
use tracing::info;

pub fn run(args: CoupleArgs) -> Result<()> {
    if args.average {
        let acfg = parse_average_config(&args.spec).map_err(EngineError::from)?;
        let shells: Vec<String> = acfg.shells().iter().map(|s| s.to_string()).collect();
        println!("{}", shells.join(" "));
        println!("{:.4} electron(s)", acfg.n_electrons());
        return Ok(());
    }

    let configs = parse_configs(&args.spec).map_err(EngineError::from)?;
    info!("'{}' expands to {} configuration(s).", args.spec, configs.len());

    let mut total = 0;
    for mut config in configs {
        couple(&mut config).map_err(EngineError::from)?;
        total += config.n_csfs();
        print!("{}", render(&config)?);
    }
    println!("{} CSF(s) in total.", total);
    Ok(())
}

/// Lists the CSFs of a coupled configuration, one line per CSF, innermost
/// shell first: `j_shell(ν) -> J_cumulative` for every open shell.
pub fn render(config: &Config) -> Result<String> {
    let mut out = String::new();
    let fmt_err = |e: std::fmt::Error| CliError::Other(e.into());
    writeln!(
        out,
        "{}  (parity {}, {} CSF(s))",
        config,
        config.parity(),
        config.n_csfs()
    )
    .map_err(fmt_err)?;

    for (i, csf) in config.csfs().enumerate() {
        let mut line = String::new();
        for (shell, state) in config.shells().iter().zip(csf).rev() {
            if shell.is_closed() {
                continue;
            }
            write!(
                line,
                " {}: {}({}) -> {};",
                shell.id(),
                format_j(state.shell_j()),
                state.seniority(),
                format_j(state.total_j())
            )
            .map_err(fmt_err)?;
        }
        let total_j = config.total_j(i).unwrap_or(0);
        writeln!(out, "  {:>4}  J = {:<5}{}", i, format_j(total_j), line).map_err(fmt_err)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relcsf::core::parser::parse_config;

    #[test]
    fn render_lists_every_csf_of_open_shells() {
        let mut config = parse_config("1s2 2p-1 2p+2").unwrap();
        couple(&mut config).unwrap();
        let text = render(&config).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 3);
        assert!(lines[0].starts_with("1s2 2p-1 2p+2"));
        assert!(lines[0].contains("parity -"));
        assert!(lines[1].contains("J = 1/2"));
        assert!(lines[3].contains("J = 5/2"));
        assert!(!lines[1].contains("1s:"));
        assert!(lines[1].contains("2p-: 1/2(1) -> 1/2;"));
    }

    #[test]
    fn couple_accepts_expanding_specs() {
        let args = CoupleArgs {
            spec: "1s2 2p2".to_string(),
            average: false,
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn couple_reports_parse_errors() {
        let args = CoupleArgs {
            spec: "2p7".to_string(),
            average: false,
        };
        assert!(matches!(
            run(args),
            Err(CliError::RelcsfCore(EngineError::Parse(_)))
        ));
    }

    #[test]
    fn average_mode_accepts_fractional_occupations() {
        let args = CoupleArgs {
            spec: "1s2 2p1.5".to_string(),
            average: true,
        };
        assert!(run(args).is_ok());
    }
}
