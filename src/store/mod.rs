//! SQLite-backed session persistence

mod db;
mod schema;

pub(crate) use db::SessionStore;
