use anyhow::Result;
use tracing::debug;

use super::open_session;
use crate::cli::ProjectArgs;

pub fn dir_command(project: &ProjectArgs, caption: bool) -> Result<()> {
    let (context, _, orchestrator) = open_session(project)?;
    debug!("Resolving directory for {:?}", context);

    if caption {
        println!("{}", orchestrator.prompt_caption(&context));
    } else {
        println!("{}", orchestrator.working_dir(&context).display());
    }
    Ok(())
}
