//! Plain-text blocks for the single-session commands

use crate::consts::SEPARATOR;
use crate::core::{Session, SessionView, Started};

use super::format::session_label;

pub(crate) fn print_separator() {
    println!("{SEPARATOR}");
}

pub(crate) fn print_conflict(active: &Session, since: &str) {
    println!(
        "An active session already exists: {} (running since {since})",
        session_label(&active.project, &active.task)
    );
}

pub(crate) fn print_started(started: &Started) {
    for replaced in &started.replaced {
        println!(
            "Stopped session: {}",
            session_label(&replaced.project, &replaced.task)
        );
    }
    println!(
        "Started session: {}",
        session_label(&started.session.project, &started.session.task)
    );
    println!("Start time: {}", started.start_display);
}

pub(crate) fn print_stopped(view: &SessionView) {
    println!(
        "Stopped session: {}",
        session_label(&view.session.project, &view.session.task)
    );
    print_times(view);
}

pub(crate) fn print_current(view: &SessionView) {
    println!(
        "Current Session: {}",
        session_label(&view.session.project, &view.session.task)
    );
    print_times(view);
}

fn print_times(view: &SessionView) {
    println!("Start time: {}", view.start);
    println!("End time  : {}", view.end);
    println!("Duration  : {}", view.duration);
}
