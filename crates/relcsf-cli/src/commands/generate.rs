use crate::cli::GenerateArgs;
use crate::config::{load_batch, merge_with_cli};
use crate::error::Result;
use crate::utils::{export, progress::CliProgressHandler};
use relcsf::core::quantum::format_j;
use relcsf::engine::progress::ProgressReporter;
use relcsf::engine::session::Session;
use relcsf::workflows;
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

pub fn run(args: GenerateArgs) -> Result<()> {
    let batch = load_batch(&args.input)?;
    info!("Merging session settings from file and CLI arguments...");
    let settings = merge_with_cli(&batch.settings(), &args)?;

    if batch.groups.is_empty() {
        warn!("Batch file {:?} defines no groups.", &args.input);
    }

    let mut session = Session::new(settings.session);
    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Enumerating {} configuration string(s) in {} group(s)...",
        batch.n_configs(),
        batch.groups.len()
    );
    let summary =
        workflows::enumerate::run(&mut session, &batch.groups, settings.policy, &reporter)?;

    println!("\nGroups:");
    for (id, group) in session.groups().iter() {
        println!(
            "  {:>3}  {:<32} {:>3} electron(s) {:>6} config(s) {:>8} CSF(s)",
            id.index(),
            group.name(),
            group.n_electrons().unwrap_or(0),
            group.len(),
            group.n_csfs()
        );
    }

    println!("\nSymmetries:");
    for symmetry in session.symmetries().iter() {
        println!(
            "  {:>4}  J = {:<6} {}  {:>8} state(s)",
            symmetry.index(),
            format_j(symmetry.j2()),
            symmetry.parity(),
            symmetry.len()
        );
    }

    if !summary.skipped.is_empty() {
        println!("\nSkipped {} configuration string(s):", summary.skipped.len());
        for skipped in &summary.skipped {
            println!("  [{}] '{}': {}", skipped.group, skipped.spec, skipped.reason);
        }
    }

    if let Some(potential) = &batch.potential {
        let acfg = workflows::potential::average_config(
            &session,
            &potential.mixture,
            potential.screening.as_ref(),
        )?;
        println!(
            "\nAverage configuration ({} contributing configuration(s), {:.4} electrons):",
            acfg.n_cfgs(),
            acfg.n_electrons()
        );
        let shells: Vec<String> = acfg.shells().iter().map(|s| s.to_string()).collect();
        println!("  {}", shells.join(" "));
    }

    if let Some(path) = &args.csv {
        info!("Writing basis states to {:?}", path);
        let written = export::write_csv(&session, BufWriter::new(File::create(path)?))?;
        println!("\n✓ {} basis state(s) written to: {}", written, path.display());
    }

    println!(
        "\n{} configuration(s), {} CSF(s) in {} symmetry class(es).",
        summary.n_configs,
        summary.n_csfs,
        session.symmetries().iter().count()
    );
    Ok(())
}
