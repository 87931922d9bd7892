use anyhow::{anyhow, Result};

use quaestor_data::ContributionTarget;

mod members;
pub use members::Members;

mod events;
pub use events::Events;

mod projects;
pub use projects::Projects;

mod tasks;
pub use tasks::Tasks;

mod transactions;
pub use transactions::Transactions;

mod contributions;
pub use contributions::Contributions;

mod finance;
pub use finance::Finance;

mod import;
pub use import::Import;

/// Resolve the --event / --project / --org flag triple into a target.
pub(crate) fn parse_target(
    event: Option<u32>,
    project: Option<u32>,
    org: bool,
) -> Result<ContributionTarget> {
    match (event, project, org) {
        (Some(id), None, false) => Ok(ContributionTarget::Event(id)),
        (None, Some(id), false) => Ok(ContributionTarget::Project(id)),
        (None, None, true) => Ok(ContributionTarget::Organization),
        _ => Err(anyhow!("pass exactly one of --event, --project or --org")),
    }
}
