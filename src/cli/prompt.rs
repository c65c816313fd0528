//! Interactive prompts used when the command line leaves something open

use std::io::IsTerminal;

use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use crate::error::AppError;

/// Pick a project from the configured list, or type one when the list is empty.
pub(crate) fn select_project(projects: &[String]) -> Result<String, AppError> {
    if projects.is_empty() {
        let project: String = Input::new().with_prompt("Project").interact_text()?;
        return Ok(project);
    }

    println!("Available projects:");
    let choice = Select::new()
        .with_prompt("Select a project")
        .items(projects)
        .default(0)
        .interact()?;
    Ok(projects[choice].clone())
}

pub(crate) fn describe_task(default_task: &str) -> Result<String, AppError> {
    let task: String = Input::new()
        .with_prompt("Description")
        .default(default_task.to_string())
        .interact_text()?;
    Ok(task)
}

/// Ask a yes/no question. Without a terminal to ask on, the answer is no.
pub(crate) fn confirm(prompt: &str) -> Result<bool, AppError> {
    if !(std::io::stdin().is_terminal() && std::io::stderr().is_terminal()) {
        debug!(prompt, "no terminal attached, declining");
        return Ok(false);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
