// Library root
// -----------
// Small library surface behind the `netpulse-status` binary, a developer
// tool that edits a user's presence in the NetPulse Realtime Database.
//
// Module responsibilities:
// - `config`: where the database lives, read from the environment.
// - `api`: the `UserStore` seam and its blocking HTTP implementation.
// - `model`: user records, raw entries and the write payload.
// - `users`: fetch-and-validate plus build-and-write.
// - `ui`: the interactive pass that ties them together.
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod ui;
pub mod users;
