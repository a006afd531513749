use crate::core::io::batch::GroupSpec;
use crate::core::models::ids::GroupId;
use crate::core::parser::parse_configs;
use crate::engine::config::ErrorPolicy;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::session::Session;
use tracing::{info, instrument, warn};

/// A configuration string left out of the basis under [`ErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSpec {
    pub group: String,
    pub spec: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationSummary {
    pub n_groups: usize,
    pub n_configs: usize,
    pub n_csfs: usize,
    pub skipped: Vec<SkippedSpec>,
}

/// Creates every group of `groups` in order and fills it with the coupled
/// configurations of its configuration strings.
///
/// Each string is expanded, coupled and registered as one unit. A string that
/// fails to parse or couple stops the run under [`ErrorPolicy::Abort`] and is
/// recorded and skipped under [`ErrorPolicy::Skip`]. Errors for which
/// [`EngineError::is_fatal`] holds always stop the run.
#[instrument(skip_all, name = "enumeration_workflow")]
pub fn run(
    session: &mut Session,
    groups: &[GroupSpec],
    policy: ErrorPolicy,
    reporter: &ProgressReporter,
) -> Result<EnumerationSummary, EngineError> {
    info!(
        "Enumerating {} group(s) with error policy {:?}.",
        groups.len(),
        policy
    );
    let mut summary = EnumerationSummary::default();

    for spec in groups {
        reporter.report(Progress::GroupStart {
            name: spec.name.clone(),
            n_specs: spec.configs.len() as u64,
        });
        let id = session.add_group(&spec.name)?;
        summary.n_groups += 1;

        for text in &spec.configs {
            match add_spec(session, id, text) {
                Ok((n_configs, n_csfs)) => {
                    summary.n_configs += n_configs;
                    summary.n_csfs += n_csfs;
                    reporter.report(Progress::SpecProcessed { n_csfs });
                }
                Err(e) if policy == ErrorPolicy::Skip && !e.is_fatal() => {
                    warn!(group = %spec.name, spec = %text, "Skipping configuration: {}", e);
                    reporter.report(Progress::SpecSkipped {
                        spec: text.clone(),
                        reason: e.to_string(),
                    });
                    summary.skipped.push(SkippedSpec {
                        group: spec.name.clone(),
                        spec: text.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        reporter.report(Progress::GroupFinish);
        if let Some(group) = session.group(id) {
            let line = format!(
                "Group '{}': {} configuration(s), {} CSF(s).",
                group.name(),
                group.len(),
                group.n_csfs()
            );
            info!("{}", line);
            reporter.report(Progress::Message(line));
        }
    }

    info!(
        "Enumeration complete: {} configuration(s), {} CSF(s) in {} symmetry class(es); {} skipped.",
        summary.n_configs,
        summary.n_csfs,
        session.symmetries().iter().count(),
        summary.skipped.len()
    );
    Ok(summary)
}

fn add_spec(session: &mut Session, id: GroupId, text: &str) -> Result<(usize, usize), EngineError> {
    let configs = parse_configs(text)?;
    let range = session.add_configs(id, configs)?;
    let n_csfs = session.group(id).map_or(0, |group| {
        group.configs()[range.clone()]
            .iter()
            .map(|c| c.n_csfs())
            .sum()
    });
    Ok((range.len(), n_csfs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn group(name: &str, configs: &[&str]) -> GroupSpec {
        GroupSpec {
            name: name.to_string(),
            configs: configs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn groups_are_created_and_filled_in_order() {
        let mut session = Session::default();
        let groups = vec![
            group("ground", &["1s2 2s2 2p2"]),
            group("excited", &["1s2 2s1 2p3"]),
        ];
        let summary = run(
            &mut session,
            &groups,
            ErrorPolicy::Abort,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(summary.n_groups, 2);
        assert_eq!(summary.n_configs, 3 + 3);
        assert_eq!(summary.n_csfs, session.symmetries().total_states());
        assert!(summary.skipped.is_empty());
        assert_eq!(session.group_index("excited").unwrap().index(), 1);
        assert_eq!(session.groups().latest(), session.group_index("excited"));
    }

    #[test]
    fn abort_policy_stops_at_the_first_bad_spec() {
        let mut session = Session::default();
        let groups = vec![group("g", &["1s2", "2x1", "1s1 2s1"])];
        let result = run(
            &mut session,
            &groups,
            ErrorPolicy::Abort,
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::Parse(_))));
        let id = session.group_index("g").unwrap();
        assert_eq!(session.group(id).unwrap().len(), 1);
    }

    #[test]
    fn skip_policy_records_bad_specs_and_continues() {
        let mut session = Session::default();
        let groups = vec![group("g", &["1s2", "2x1", "1s2 2s1", "1s1 2s1"])];
        let summary = run(
            &mut session,
            &groups,
            ErrorPolicy::Skip,
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(summary.n_configs, 2);
        let skipped: Vec<&str> = summary.skipped.iter().map(|s| s.spec.as_str()).collect();
        assert_eq!(skipped, vec!["2x1", "1s2 2s1"]);
        assert!(summary.skipped.iter().all(|s| s.group == "g"));
    }

    #[test]
    fn duplicate_groups_abort_even_when_skipping() {
        let mut session = Session::default();
        let groups = vec![group("g", &["1s1"]), group("g", &["1s1"])];
        let result = run(
            &mut session,
            &groups,
            ErrorPolicy::Skip,
            &ProgressReporter::new(),
        );
        assert!(matches!(result, Err(EngineError::GroupExists(_))));
    }

    #[test]
    fn progress_events_follow_the_batch() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));

        let mut session = Session::default();
        let groups = vec![group("g", &["1s2", "bad"])];
        run(&mut session, &groups, ErrorPolicy::Skip, &reporter).unwrap();

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 5);
        assert!(matches!(&events[0], Progress::GroupStart { name, n_specs: 2 } if name == "g"));
        assert!(matches!(events[1], Progress::SpecProcessed { n_csfs: 1 }));
        assert!(matches!(&events[2], Progress::SpecSkipped { spec, .. } if spec == "bad"));
        assert!(matches!(events[3], Progress::GroupFinish));
        assert!(matches!(
            &events[4],
            Progress::Message(line) if line == "Group 'g': 1 configuration(s), 1 CSF(s)."
        ));
    }
}
