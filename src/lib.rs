// command line front end for the song catalog; all page logic lives in
// `songdesk-core` and is shared with the web frontend
pub mod commands;

pub mod config;

pub mod options;

pub mod session;
