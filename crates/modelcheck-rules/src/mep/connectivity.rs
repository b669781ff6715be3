// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System membership and connector checks

use super::{record, MepIssue, MepIssueType, MepValidator};
use log::debug;
use modelcheck_model::{
    assigned_system, Connector, DuctRecord, ElementId, EquipmentRecord, MepElementRecord,
    MepSystem, PipeRecord,
};
use rustc_hash::FxHashMap;

/// Outcome of resolving an element's system reference
enum Membership<'a> {
    Missing,
    Invalid(&'a ElementId),
    Member(&'a MepSystem),
}

fn system_index(systems: &[MepSystem]) -> FxHashMap<&ElementId, &MepSystem> {
    systems.iter().map(|s| (&s.id, s)).collect()
}

fn resolve<'a>(
    system_id: &'a Option<ElementId>,
    index: &FxHashMap<&ElementId, &'a MepSystem>,
) -> Membership<'a> {
    match assigned_system(system_id) {
        None => Membership::Missing,
        Some(id) => match index.get(id) {
            Some(&system) => Membership::Member(system),
            None => Membership::Invalid(id),
        },
    }
}

fn is_open(connector: &Option<Connector>) -> bool {
    !connector.is_some_and(|c| c.connected)
}

/// Checks that ducts, pipes and equipment belong to existing systems and
/// that their connectors are attached
#[derive(Debug, Default)]
pub struct MepConnectivityValidator {
    issues: Vec<MepIssue>,
}

impl MepConnectivityValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// System membership plus start/end connector state per duct
    ///
    /// Ducts without a valid system get a single system issue and no
    /// connector checks.
    pub fn validate_duct_connections(
        &mut self,
        ducts: &[DuctRecord],
        systems: &[MepSystem],
    ) -> Vec<MepIssue> {
        let index = system_index(systems);
        let mut found = Vec::new();

        for duct in ducts {
            let system = match resolve(&duct.system_id, &index) {
                Membership::Missing => {
                    found.push(MepIssue::new(
                        duct.id.clone(),
                        "duct",
                        MepIssueType::NoSystem,
                        "Duct is not part of any MEP system",
                    ));
                    continue;
                }
                Membership::Invalid(id) => {
                    found.push(MepIssue::new(
                        duct.id.clone(),
                        "duct",
                        MepIssueType::InvalidSystem,
                        format!("Duct references invalid system ID: {id}"),
                    ));
                    continue;
                }
                Membership::Member(system) => system,
            };

            if is_open(&duct.start_connector) {
                found.push(
                    MepIssue::new(
                        duct.id.clone(),
                        "duct",
                        MepIssueType::DisconnectedStart,
                        "Duct start connector is not connected",
                    )
                    .with_system(system.name.as_str()),
                );
            }
            if is_open(&duct.end_connector) {
                found.push(
                    MepIssue::new(
                        duct.id.clone(),
                        "duct",
                        MepIssueType::DisconnectedEnd,
                        "Duct end connector is not connected",
                    )
                    .with_system(system.name.as_str()),
                );
            }
        }

        debug!("duct connectivity: {} ducts, {} issues", ducts.len(), found.len());
        record(self, found)
    }

    /// System membership per pipe; more than one open connector is an issue
    pub fn validate_pipe_connections(
        &mut self,
        pipes: &[PipeRecord],
        systems: &[MepSystem],
    ) -> Vec<MepIssue> {
        let index = system_index(systems);
        let mut found = Vec::new();

        for pipe in pipes {
            let system = match resolve(&pipe.system_id, &index) {
                Membership::Missing => {
                    found.push(MepIssue::new(
                        pipe.id.clone(),
                        "pipe",
                        MepIssueType::NoSystem,
                        "Pipe is not part of any MEP system",
                    ));
                    continue;
                }
                Membership::Invalid(id) => {
                    found.push(MepIssue::new(
                        pipe.id.clone(),
                        "pipe",
                        MepIssueType::InvalidSystem,
                        format!("Pipe references invalid system ID: {id}"),
                    ));
                    continue;
                }
                Membership::Member(system) => system,
            };

            let disconnected = pipe.connectors.iter().filter(|c| !c.connected).count();
            if disconnected > 1 {
                found.push(
                    MepIssue::new(
                        pipe.id.clone(),
                        "pipe",
                        MepIssueType::MultipleDisconnected,
                        format!("Pipe has {disconnected} disconnected connectors"),
                    )
                    .with_system(system.name.as_str()),
                );
            }
        }

        debug!("pipe connectivity: {} pipes, {} issues", pipes.len(), found.len());
        record(self, found)
    }

    /// Equipment must reference an existing system
    pub fn validate_system_equipment(
        &mut self,
        equipment: &[EquipmentRecord],
        systems: &[MepSystem],
    ) -> Vec<MepIssue> {
        let index = system_index(systems);
        let mut found = Vec::new();

        for equip in equipment {
            let element_type = equip.equipment_type.as_deref().unwrap_or("equipment");
            let label = equip.equipment_type.as_deref().unwrap_or("Equipment");
            match resolve(&equip.system_id, &index) {
                Membership::Missing => found.push(MepIssue::new(
                    equip.id.clone(),
                    element_type,
                    MepIssueType::NoSystem,
                    format!("{label} is not connected to any system"),
                )),
                Membership::Invalid(_) => found.push(MepIssue::new(
                    equip.id.clone(),
                    element_type,
                    MepIssueType::InvalidSystem,
                    format!("{label} references invalid system"),
                )),
                Membership::Member(_) => {}
            }
        }

        record(self, found)
    }

    /// Elements with no connectors, or with every connector open
    pub fn find_isolated_elements(&mut self, elements: &[MepElementRecord]) -> Vec<MepIssue> {
        let mut found = Vec::new();

        for element in elements {
            let element_type = element.element_type.as_deref().unwrap_or("element");
            let label = element.element_type.as_deref().unwrap_or("Element");

            if element.connectors.is_empty() {
                found.push(MepIssue::new(
                    element.id.clone(),
                    element_type,
                    MepIssueType::NoConnectors,
                    format!("{label} has no connectors"),
                ));
            } else if element.connectors.iter().all(|c| !c.connected) {
                found.push(MepIssue::new(
                    element.id.clone(),
                    element_type,
                    MepIssueType::Isolated,
                    format!("{label} has no connections (isolated)"),
                ));
            }
        }

        record(self, found)
    }
}

impl MepValidator for MepConnectivityValidator {
    fn issues(&self) -> &[MepIssue] {
        &self.issues
    }

    fn issues_mut(&mut self) -> &mut Vec<MepIssue> {
        &mut self.issues
    }
}
