use chrono::Utc;

use crate::cli::{Cli, Commands, FilterArgs, prompt};
use crate::config::Config;
use crate::core::{SessionService, StopOutcome, parse_session_id};
use crate::error::AppError;
use crate::output::{
    output_export_csv, output_summary_json, print_conflict, print_current, print_separator,
    print_started, print_stopped, print_summary_table, write_export_csv,
};
use crate::utils::{Timezone, format_datetime};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) timezone: Timezone,
}

fn handle_start(
    service: &mut SessionService,
    project: Option<&str>,
    task: Option<&str>,
    yes: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    print_separator();
    let project = match project {
        Some(project) => project.to_string(),
        None => prompt::select_project(&ctx.config.projects)?,
    };
    let task = match task {
        Some(task) => task.to_string(),
        None => prompt::describe_task(&ctx.config.default_task)?,
    };

    let started = match service.start(&project, Some(&task), yes, Utc::now()) {
        Ok(started) => started,
        Err(AppError::Conflict { active }) => {
            print_conflict(&active, &service.time_display(active.start_time));
            if !prompt::confirm("Stop it and start a new one?")? {
                println!("Keeping the active session. Pass --yes to replace it.");
                return Ok(());
            }
            service.start(&project, Some(&task), true, Utc::now())?
        }
        Err(e) => return Err(e),
    };
    print_started(&started);
    Ok(())
}

fn handle_stop(service: &mut SessionService) -> Result<(), AppError> {
    print_separator();
    match service.stop(Utc::now())? {
        StopOutcome::Stopped(view) => print_stopped(&view),
        StopOutcome::Idle => println!("No active session to stop."),
    }
    Ok(())
}

fn handle_current(service: &SessionService) -> Result<(), AppError> {
    print_separator();
    match service.current(Utc::now())? {
        Some(view) => print_current(&view),
        None => println!("No active session found."),
    }
    Ok(())
}

fn handle_summary(
    service: &SessionService,
    filter: &FilterArgs,
    json: bool,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let filter = filter.to_filter()?;
    let views = service.summary(filter, ctx.cli.order, Utc::now())?;
    if json {
        println!("{}", output_summary_json(&views));
        return Ok(());
    }

    print_separator();
    if views.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }
    print_summary_table(&views, &filter.title(), ctx.cli.use_color());
    Ok(())
}

fn handle_remove(service: &mut SessionService, raw_id: &str, force: bool) -> Result<(), AppError> {
    let id = parse_session_id(raw_id)?;
    print_separator();
    if !force {
        let session = service.find(id)?;
        println!(
            "Deleting session: {} ({} - {})",
            session.id, session.project, session.task
        );
        if !prompt::confirm("Are you sure you want to delete this session?")? {
            println!("Deletion cancelled. Pass --force to skip the confirmation.");
            return Ok(());
        }
    }
    service.remove(id)?;
    println!("Deleted session {id}");
    Ok(())
}

fn handle_export(
    service: &SessionService,
    filter: &FilterArgs,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let filter = filter.to_filter()?;
    print_separator();
    let now = Utc::now();
    let rows = service.export(filter, ctx.cli.order, now)?;
    if rows.is_empty() {
        println!("No sessions to export.");
        return Ok(());
    }

    let local_now = ctx.timezone.to_local(now);
    let content = output_export_csv(&rows, &format_datetime(Some(local_now)));
    let path = write_export_csv(&ctx.cli.export_dir(), local_now.date_naive(), &content)?;
    println!("Exported {} sessions to {}", rows.len(), path.display());
    Ok(())
}

pub(crate) fn handle_command(
    service: &mut SessionService,
    command: &Commands,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    match command {
        Commands::Start { project, task, yes } => {
            handle_start(service, project.as_deref(), task.as_deref(), *yes, ctx)
        }
        Commands::Stop => handle_stop(service),
        Commands::Current => handle_current(service),
        Commands::Summary { filter, json } => handle_summary(service, filter, *json, ctx),
        Commands::Remove { session_id, force } => handle_remove(service, session_id, *force),
        Commands::Export { filter } => handle_export(service, filter, ctx),
    }
}
