use crate::error::Result;
use relcsf::core::models::state::BasisState;
use relcsf::core::quantum::format_j;
use relcsf::engine::session::Session;
use serde::Serialize;
use std::io::Write;

/// One CSV row per basis state, in symmetry-class order.
#[derive(Debug, Serialize, PartialEq)]
pub struct StateRecord {
    pub symmetry: usize,
    pub parity: String,
    pub j: String,
    pub position: usize,
    pub kind: &'static str,
    pub group: Option<String>,
    pub config: Option<usize>,
    pub csf: Option<usize>,
    pub configuration: Option<String>,
    pub parent: Option<String>,
    pub orbital: Option<String>,
}

pub fn collect_records(session: &Session) -> Vec<StateRecord> {
    let mut records = Vec::with_capacity(session.symmetries().total_states());
    for symmetry in session.symmetries().iter() {
        for (position, state) in symmetry.states().iter().enumerate() {
            let mut record = StateRecord {
                symmetry: symmetry.index().index(),
                parity: symmetry.parity().to_string(),
                j: format_j(symmetry.j2()),
                position,
                kind: "native",
                group: None,
                config: None,
                csf: None,
                configuration: None,
                parent: None,
                orbital: None,
            };
            match *state {
                BasisState::Native { group, config, csf } => {
                    record.group = session.group(group).map(|g| g.name().to_string());
                    record.config = Some(config);
                    record.csf = Some(csf);
                    record.configuration = session.config_of(state).map(|c| c.to_string());
                }
                BasisState::Spectator {
                    parent, orbital, ..
                } => {
                    record.kind = "spectator";
                    record.parent = Some(parent.to_string());
                    record.orbital = Some(orbital.to_string());
                }
            }
            records.push(record);
        }
    }
    records
}

pub fn write_csv<W: Write>(session: &Session, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let records = collect_records(session);
    for record in &records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(records.len())
}
