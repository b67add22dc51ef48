// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) wires these modules together and runs the interactive menu.
//
// Module responsibilities:
// - `ping`: the auto-ping keep-alive service (timer, failure accounting,
//   status snapshots) and its console reporter.
// - `api` / `models`: blocking HTTP client for the Gradient API and the
//   response shapes it returns.
// - `config` / `token`: environment configuration and token storage.
// - `format` / `analysis` / `render`: presentation helpers and table views.
// - `ui`: dialoguer menus that drive everything above.
// - `logging`: file-based tracing setup.
pub mod analysis;
pub mod api;
pub mod config;
pub mod format;
pub mod logging;
pub mod models;
pub mod ping;
pub mod render;
pub mod token;
pub mod ui;
