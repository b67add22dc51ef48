// UI layer: the interactive menus, built on `dialoguer`. Every screen is a
// plain function; the main menu and the auto-ping menu are explicit loops.

use crate::api::{ApiClient, ApiError};
use crate::ping::{AutoPingService, PingError, MIN_TARGET_LEN};
use crate::render;
use crate::token::{self, TokenInfo};
use anyhow::Result;
use chrono::Local;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;

const BANNER: &str = r"
  ___             _ _         _      ___ _    ___
 / __|_ _ __ _ __| (_)___ _ _| |_   / __| |  |_ _|
| (_ | '_/ _` / _` | / -_) ' \  _| | (__| |__ | |
 \___|_| \__,_\__,_|_\___|_||_\__|  \___|____|___|
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainItem {
    Profile,
    Nodes,
    NodeDetail,
    Latency,
    Announcements,
    SystemStatus,
    Token,
    AutoPing,
    Exit,
}

impl MainItem {
    const ALL: [MainItem; 9] = [
        MainItem::Profile,
        MainItem::Nodes,
        MainItem::NodeDetail,
        MainItem::Latency,
        MainItem::Announcements,
        MainItem::SystemStatus,
        MainItem::Token,
        MainItem::AutoPing,
        MainItem::Exit,
    ];

    fn label(self, pinger: &AutoPingService) -> String {
        match self {
            MainItem::Profile => "View profile & account statistics".into(),
            MainItem::Nodes => "Monitor sentry nodes".into(),
            MainItem::NodeDetail => "Node detail".into(),
            MainItem::Latency => "Node latency analysis".into(),
            MainItem::Announcements => "Latest announcements & banners".into(),
            MainItem::SystemStatus => "Gradient Network system status".into(),
            MainItem::Token => "Validate token".into(),
            MainItem::AutoPing => {
                let status = pinger.status();
                if status.running {
                    format!("Auto-Ping 24/7 (active - {})", status.uptime)
                } else {
                    "Auto-Ping 24/7 (inactive)".into()
                }
            }
            MainItem::Exit => "Exit".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PingAction {
    Start,
    Info,
    Status,
    SetNode,
    Stop,
    Back,
}

impl PingAction {
    const WHEN_RUNNING: [PingAction; 4] = [
        PingAction::Status,
        PingAction::SetNode,
        PingAction::Stop,
        PingAction::Back,
    ];
    const WHEN_STOPPED: [PingAction; 3] = [PingAction::Start, PingAction::Info, PingAction::Back];

    fn label(self) -> &'static str {
        match self {
            PingAction::Start => "Start Auto-Ping 24/7",
            PingAction::Info => "About Auto-Ping",
            PingAction::Status => "Detailed status",
            PingAction::SetNode => "Set node ID to monitor",
            PingAction::Stop => "Stop Auto-Ping",
            PingAction::Back => "Back to main menu",
        }
    }
}

/// Main interactive menu. Runs until the user picks "Exit" or declines to
/// return to the menu. A running auto-ping is stopped on the way out.
pub fn main_menu(api: &ApiClient, pinger: &AutoPingService) -> Result<()> {
    print_banner();
    loop {
        let items: Vec<String> = MainItem::ALL.iter().map(|i| i.label(pinger)).collect();
        let selection = Select::new()
            .with_prompt("Choose a menu")
            .items(&items)
            .default(0)
            .interact()?;
        let item = MainItem::ALL.get(selection).copied().unwrap_or(MainItem::Exit);

        println!();
        match item {
            MainItem::Profile => profile(api)?,
            MainItem::Nodes => nodes(api)?,
            MainItem::NodeDetail => {
                let default = pinger.monitored_target();
                let node_id =
                    prompt_node_id("Node ID to inspect", default, MIN_TARGET_LEN)?;
                node_detail(api, &node_id)?;
            }
            MainItem::Latency => {
                let node_id = prompt_node_id("Node ID for latency analysis", None, 1)?;
                latency(api, &node_id)?;
            }
            MainItem::Announcements => announcements(api)?,
            MainItem::SystemStatus => system_status(api)?,
            MainItem::Token => validate_token(api)?,
            MainItem::AutoPing => auto_ping_menu(pinger)?,
            MainItem::Exit => break,
        }

        println!();
        let back = Confirm::new()
            .with_prompt("Back to the main menu?")
            .default(true)
            .interact()?;
        if !back {
            break;
        }
        clear_screen()?;
        print_banner();
    }

    if pinger.is_running() {
        // Ignore NotRunning: the service may have stopped itself meanwhile.
        let _ = pinger.stop();
    }
    println!("{}", "\nThanks for using Gradient CLI!".green());
    println!("{}", "See you next time!\n".dark_grey());
    Ok(())
}

/// Auto-ping control menu. Loops until "Back" or the user declines to stay.
fn auto_ping_menu(pinger: &AutoPingService) -> Result<()> {
    let interval_secs = pinger.config().interval.as_secs();
    loop {
        let status = pinger.status();
        render::print_ping_header(&status, interval_secs);

        let actions: &[PingAction] = if status.running {
            &PingAction::WHEN_RUNNING
        } else {
            &PingAction::WHEN_STOPPED
        };
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let choice = Select::new()
            .with_prompt("Choose an action")
            .items(&labels)
            .default(0)
            .interact()?;

        match actions.get(choice).copied().unwrap_or(PingAction::Back) {
            PingAction::Start => {
                println!("{}", "\nStarting auto-ping...".blue());
                match pinger.start() {
                    Ok(()) => {
                        println!("{}", "\nAuto-ping 24/7 started!".green());
                        println!("{}", "Pings keep running in the background".yellow());
                        println!(
                            "{}",
                            "   while the CLI stays open; use this menu to check or stop it\n"
                                .dark_grey()
                        );
                    }
                    Err(e) => warn_ping(&e),
                }
            }
            PingAction::Stop => {
                println!("{}", "\nStopping auto-ping...".yellow());
                match pinger.stop() {
                    Ok(()) => println!("{}", "Auto-ping stopped\n".red()),
                    Err(e) => warn_ping(&e),
                }
            }
            PingAction::Status => {
                println!("{}", "\nAUTO-PING STATUS".blue());
                println!("{}\n", render::ping_status_table(&pinger.status()));
            }
            PingAction::SetNode => {
                let node_id = prompt_node_id(
                    "Node ID to monitor",
                    pinger.monitored_target(),
                    MIN_TARGET_LEN,
                )?;
                match pinger.set_monitored_target(&node_id) {
                    Ok(()) => {
                        println!("{}", format!("\nNode ID set: {}", node_id.trim()).green());
                        println!("{}", "It is shown in the auto-ping status\n".yellow());
                    }
                    Err(e) => warn_ping(&e),
                }
            }
            PingAction::Info => {
                render::print_ping_info(interval_secs, pinger.config().failure_threshold)
            }
            PingAction::Back => return Ok(()),
        }

        let stay = Confirm::new()
            .with_prompt("Stay in the auto-ping menu?")
            .default(false)
            .interact()?;
        if !stay {
            return Ok(());
        }
    }
}

fn warn_ping(err: &PingError) {
    println!("{}", format!("Warning: {}", err).yellow());
}

fn profile(api: &ApiClient) -> Result<()> {
    println!("{}", "Fetching profile...\n".blue());
    match with_spinner("Loading profile...", || api.user_profile())? {
        Ok(p) => {
            render::print_profile(&p);
            tracing::info!(activity = "profile viewed");
        }
        Err(e) => show_error("profile", "Failed to load profile", &e),
    }
    Ok(())
}

fn nodes(api: &ApiClient) -> Result<()> {
    println!("{}", "Fetching sentry nodes...\n".blue());
    match with_spinner("Loading nodes...", || api.sentry_nodes())? {
        Ok(list) => {
            render::print_nodes(&list);
            tracing::info!(activity = "nodes viewed", count = list.len());
        }
        Err(e) => show_error("node", "Failed to load nodes", &e),
    }
    Ok(())
}

fn node_detail(api: &ApiClient, node_id: &str) -> Result<()> {
    println!("{}", format!("Fetching node detail: {}...\n", node_id).blue());
    match with_spinner("Loading node...", || api.node_detail(node_id))? {
        Ok(detail) => {
            render::print_node_detail(&detail);
            tracing::info!(activity = "node detail viewed", node_id);
        }
        Err(e) => show_error("nodeDetail", "Failed to load node detail", &e),
    }
    Ok(())
}

fn latency(api: &ApiClient, node_id: &str) -> Result<()> {
    println!("{}", format!("Analysing latency for node: {}...\n", node_id).blue());
    match with_spinner("Loading latency data...", || api.latency(node_id))? {
        Ok(records) => {
            render::print_latency(node_id, &records);
            tracing::info!(activity = "latency analysed", node_id, samples = records.len());
        }
        Err(e) => show_error("latency", "Failed to analyse latency", &e),
    }
    Ok(())
}

fn announcements(api: &ApiClient) -> Result<()> {
    println!("{}", "Fetching announcements and banners...\n".blue());
    // Both lists are fetched at the same time.
    let (banners, news) = with_spinner("Loading announcements...", || {
        thread::scope(|s| {
            let banners = s.spawn(|| api.banners());
            let news = api.announcements();
            let banners = banners
                .join()
                .unwrap_or_else(|_| Err(ApiError::Transport("banner request panicked".into())));
            (banners, news)
        })
    })?;
    match (banners, news) {
        (Ok(banners), Ok(news)) => {
            render::print_announcements(&banners, &news);
            tracing::info!(activity = "announcements viewed");
        }
        (Err(e), _) | (_, Err(e)) => show_error("announcements", "Failed to load announcements", &e),
    }
    Ok(())
}

fn system_status(api: &ApiClient) -> Result<()> {
    println!("{}", "Checking system status...\n".blue());
    match with_spinner("Contacting server...", || api.system_status())? {
        Ok(status) => render::print_system_status(&status),
        Err(e) => show_error("status", "Failed to check system status", &e),
    }
    Ok(())
}

/// Check the configured token against the profile endpoint. Offers to enter
/// a token when none is configured and to save a token that works.
fn validate_token(api: &ApiClient) -> Result<()> {
    println!("{}", "Validating token...\n".blue());

    let token = match api.token() {
        Some(t) => t,
        None => {
            println!("{}", "No token found (GRADIENT_TOKEN or ~/.gradient_token)".red());
            let entered: String = Password::new().with_prompt("Paste bearer token").interact()?;
            api.set_token(&entered);
            entered.trim().to_string()
        }
    };

    println!(
        "{}",
        format!("Token (first 10 characters): {}", token::preview(&token)).dark_grey()
    );
    let info = TokenInfo::inspect(&token);
    if let Some(expires) = info.as_ref().and_then(|i| i.expires_at) {
        let line = format!("Expires: {}", expires.format("%d/%m/%Y %H:%M:%S"));
        if info.map_or(false, |i| i.is_expired_at(Local::now())) {
            println!("{}", format!("{} (already passed)", line).yellow());
        } else {
            println!("{}", line.dark_grey());
        }
    }

    match with_spinner("Checking token...", || api.user_profile())? {
        Ok(profile) => {
            println!("{}", "Token is valid and active".green());
            println!("{}", format!("User: {}", profile.name).dark_grey());
            println!("{}", format!("Email: {}", profile.email).dark_grey());
            offer_to_save(&token)?;
        }
        Err(e) if e.is_auth_failure() => print_token_help(),
        Err(e) => show_error("token", "Token validation failed", &e),
    }
    Ok(())
}

fn offer_to_save(token: &str) -> Result<()> {
    let path = token::token_path();
    if token::read_token(&path).ok().as_deref() == Some(token) {
        return Ok(());
    }
    let save = Confirm::new()
        .with_prompt(format!("Save this token to {}?", path.display()))
        .default(false)
        .interact()?;
    if save {
        match token::write_token(&path, token) {
            Ok(()) => println!("{}", "Token saved".green()),
            Err(e) => {
                tracing::error!(error = %e, "saving token failed");
                println!("{}", format!("Could not save token: {}", e).red());
            }
        }
    }
    Ok(())
}

fn print_token_help() {
    println!("{}", "Token has expired or is invalid".red());
    println!("{}", "How to get a new token:".yellow());
    println!("{}", "   1. Open a browser with the Gradient extension".dark_grey());
    println!("{}", "   2. Open DevTools (F12) > Network tab".dark_grey());
    println!("{}", "   3. Reload the extension, find a request to api.gradient.network".dark_grey());
    println!("{}", "   4. Copy the Authorization header (after \"Bearer \")".dark_grey());
    println!("{}", "   5. Update GRADIENT_TOKEN or save it from this menu".dark_grey());
}

/// Validation used by the node id prompts. `min_len` of 1 only rejects
/// blank input.
pub fn validate_node_id(input: &str, min_len: usize) -> Result<(), String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Node ID must not be empty".into());
    }
    if trimmed.chars().count() < min_len {
        return Err(format!("Node ID is too short (minimum {} characters)", min_len));
    }
    Ok(())
}

fn prompt_node_id(prompt: &str, default: Option<String>, min_len: usize) -> Result<String> {
    let mut input = Input::<String>::new();
    input.with_prompt(prompt);
    if let Some(d) = default {
        input.default(d);
    }
    let value = input
        .validate_with(|v: &String| validate_node_id(v, min_len))
        .interact_text()?;
    Ok(value.trim().to_string())
}

fn show_error(command: &str, message: &str, err: &ApiError) {
    println!("{}", message.red());
    println!("{}", format!("   Error: {}", err).dark_grey());
    tracing::error!(command, error = %err, "{}", message);
}

/// Run `f` behind a spinner.
fn with_spinner<T>(message: &str, f: impl FnOnce() -> T) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    Ok(out)
}

fn print_banner() {
    println!("{}", BANNER.cyan());
    println!("{}", "CLI tool for monitoring Gradient Network\n".dark_grey());
}

fn clear_screen() -> Result<()> {
    execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}
