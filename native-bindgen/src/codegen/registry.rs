//! Run-wide registry of generated names.

use std::{collections::BTreeMap, sync::Mutex};

use crate::{error::Origin, Error};

/// Position of a unit in a run: work item index, then declaration index
pub(crate) type UnitId = (usize, usize);

/// Append-only record of which interface asked for which global name.
///
/// Written by the emitter (possibly from several threads); read once at the
/// end of the run. Conflicts are evaluated only then, so the outcome does not
/// depend on the order units were emitted in.
#[derive(Debug, Default)]
pub(crate) struct NameRegistry {
    /// Name to claimants, each with the position of the name in its claim
    claims: Mutex<BTreeMap<String, Vec<(UnitId, usize, Origin)>>>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `unit` will define `names`, most significant first.
    pub fn claim(&self, unit: UnitId, origin: &Origin, names: impl IntoIterator<Item = String>) {
        let mut claims = self
            .claims
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for (rank, name) in names.into_iter().enumerate() {
            claims
                .entry(name)
                .or_default()
                .push((unit, rank, origin.clone()));
        }
    }

    /// Names claimed more than once, one conflict per set of units involved.
    ///
    /// When the same units collide on several names (an accessor and its
    /// static always travel together), the name claimed first stands for all
    /// of them. Conflicts come out sorted by name; origins by unit position.
    pub fn into_conflicts(self) -> Vec<(Vec<UnitId>, Error)> {
        let claims = self
            .claims
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut by_units: BTreeMap<Vec<UnitId>, (usize, String, Vec<Origin>)> = BTreeMap::new();
        for (name, mut owners) in claims {
            if owners.len() < 2 {
                continue;
            }
            owners.sort_by(|a, b| a.0.cmp(&b.0));
            let rank = owners.iter().map(|(_, rank, _)| *rank).min().unwrap_or_default();
            let units = owners.iter().map(|(unit, _, _)| *unit).collect::<Vec<_>>();
            let origins = owners.into_iter().map(|(_, _, origin)| origin).collect();
            match by_units.get(&units) {
                Some((kept, _, _)) if *kept <= rank => {}
                _ => {
                    by_units.insert(units, (rank, name, origins));
                }
            }
        }
        let mut conflicts = by_units
            .into_iter()
            .map(|(units, (_, name, origins))| (units, Error::EmissionConflict { name, origins }))
            .collect::<Vec<_>>();
        conflicts.sort_by(|a, b| conflict_name(&a.1).cmp(conflict_name(&b.1)));
        conflicts
    }
}

fn conflict_name(error: &Error) -> &str {
    match error {
        Error::EmissionConflict { name, .. } => name,
        _ => "",
    }
}
