// Table views for the API data and the auto-ping status. Builders return a
// `Table` so they can be checked without a terminal; the `print_*`
// functions lay out a whole screen.

use crate::analysis::{
    percentage, points_per_second, uptime_percentage, LatencyBuckets, LatencyGrade, LatencyStats,
};
use crate::format::{
    format_date_ms, format_duration, format_duration_ms, format_number, format_timestamp_ms,
    render_markdown,
};
use crate::models::{
    Announcement, Banner, LatencyRecord, NodeDetail, Profile, SentryNode, SystemStatus,
};
use crate::ping::StatusSnapshot;
use chrono::Local;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crossterm::style::Stylize;

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Two-column "label / value" table with a coloured header.
fn kv_table(title: &str, value_title: &str, color: Color, rows: Vec<(&str, Cell)>) -> Table {
    let mut table = base_table();
    table.set_header(vec![
        Cell::new(title).fg(color).add_attribute(Attribute::Bold),
        Cell::new(value_title).fg(color),
    ]);
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), value]);
    }
    table
}

fn colored(text: impl ToString, color: Color) -> Cell {
    Cell::new(text.to_string()).fg(color)
}

fn heading(title: &str, width: usize) {
    println!("{}", "=".repeat(width).cyan().bold());
    println!("{}", title.cyan().bold());
    println!("{}", "=".repeat(width).cyan().bold());
}

fn section(title: &str, width: usize) {
    println!("{}", title.cyan());
    println!("{}", "=".repeat(width).cyan());
}

fn yes_no(flag: bool, yes: &str, no: &str) -> Cell {
    if flag {
        colored(yes, Color::Green)
    } else {
        colored(no, Color::Red)
    }
}

// ---- profile ----------------------------------------------------------

pub fn profile_basic_table(p: &Profile) -> Table {
    kv_table(
        "Information",
        "Value",
        Color::Cyan,
        vec![
            ("Name", colored(&p.name, Color::White)),
            ("Email", colored(&p.email, Color::White)),
            ("Referral code", colored(&p.code, Color::Yellow)),
            (
                "Referred by",
                colored(p.referred_by.as_deref().unwrap_or("None"), Color::DarkGrey),
            ),
            ("Level", colored(format!("Level {}", p.stats.level), Color::Green)),
            ("EXP", Cell::new(format_number(p.stats.exp))),
            ("Invitees", colored(p.stats.invitee, Color::Blue)),
            ("Pending", colored(p.stats.pending, Color::Yellow)),
        ],
    )
}

pub fn profile_points_table(p: &Profile) -> Table {
    kv_table(
        "POINTS",
        "Amount",
        Color::Yellow,
        vec![
            ("Total", colored(format_number(p.point.total), Color::Green)),
            ("Balance", colored(format_number(p.point.balance), Color::Green)),
            ("Withdrawn", colored(format_number(p.point.withdraw), Color::Red)),
            ("From referrals", colored(format_number(p.point.referral), Color::Blue)),
            ("Today", colored(format_number(p.point.today), Color::Yellow)),
        ],
    )
}

/// `None` when the account has no season points yet.
pub fn profile_season_table(p: &Profile) -> Option<Table> {
    if p.season.is_empty() {
        return None;
    }
    let rows: Vec<(String, Cell)> = p
        .season
        .iter()
        .map(|(key, points)| match key.strip_suffix("_refer") {
            Some(season) => (
                format!("Season {} (referral)", season),
                colored(format_number(*points), Color::Blue),
            ),
            None => (
                format!("Season {}", key),
                colored(format_number(*points), Color::Green),
            ),
        })
        .collect();
    Some(kv_table(
        "SEASON",
        "Points",
        Color::Blue,
        rows.iter().map(|(l, c)| (l.as_str(), c.clone())).collect(),
    ))
}

pub fn profile_node_table(p: &Profile) -> Table {
    let n = &p.node;
    kv_table(
        "NODE INFO",
        "Value",
        Color::Green,
        vec![
            ("Sentry nodes", colored(n.sentry, Color::Blue)),
            ("Active sentry", colored(n.sentry_active, Color::Green)),
            ("Sentry duration", Cell::new(format_duration(n.sentry_duration))),
            ("Work nodes", colored(n.work, Color::Blue)),
            ("Active work", colored(n.work_active, Color::Green)),
            ("Total duration", Cell::new(format_duration(n.total_duration))),
        ],
    )
}

pub fn print_profile(p: &Profile) {
    heading("GRADIENT NETWORK ACCOUNT PROFILE", 60);
    println!("{}\n", profile_basic_table(p));
    println!("{}\n", profile_points_table(p));
    if let Some(seasons) = profile_season_table(p) {
        println!("{}\n", seasons);
    }
    println!("{}\n", profile_node_table(p));

    if let Some(social) = &p.social {
        let mut rows = Vec::new();
        if let Some(twitter) = social.twitter.as_deref().filter(|s| !s.is_empty()) {
            rows.push(("Twitter", colored(format!("@{}", twitter), Color::Blue)));
        }
        if let Some(discord) = social.discord.as_deref().filter(|s| !s.is_empty()) {
            rows.push(("Discord", colored(discord, Color::Blue)));
        }
        if !rows.is_empty() {
            println!("{}\n", kv_table("SOCIAL", "Username", Color::Cyan, rows));
        }
    }

    let status = kv_table(
        "STATUS",
        "Value",
        Color::Cyan,
        vec![
            ("Checked in today", yes_no(p.check_in, "Yes", "No")),
            ("Following", colored(p.follow, Color::Blue)),
            ("Joined", Cell::new(format_date_ms(p.create_at))),
            ("Last update", Cell::new(format_date_ms(p.update_at))),
        ],
    );
    println!("{}", status);
    println!("{}", "\nProfile loaded.".green());
    println!("{}", format!("Active season: {}", p.season_no).dark_grey());
}

// ---- nodes ------------------------------------------------------------

pub fn node_list_table(nodes: &[SentryNode]) -> Table {
    let mut table = base_table();
    table.set_header(
        ["Node ID", "Status", "Uptime", "Points", "Last Seen"]
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan)),
    );
    for node in nodes {
        let status = match node.status.as_deref() {
            Some("online") => colored("Online", Color::Green),
            Some("offline") => colored("Offline", Color::Red),
            _ => colored("Unknown", Color::Yellow),
        };
        table.add_row(vec![
            colored(node.node_id.as_deref().unwrap_or("N/A"), Color::White),
            status,
            Cell::new(format_duration(node.uptime)),
            colored(format_number(node.points), Color::Green),
            Cell::new(node.last_seen.map(format_timestamp_ms).unwrap_or_else(|| "N/A".into())),
        ]);
    }
    table
}

pub fn print_nodes(nodes: &[SentryNode]) {
    heading("SENTRY NODE MONITORING", 70);
    if nodes.is_empty() {
        println!("{}", "No sentry nodes found".yellow());
        return;
    }
    println!("{}", node_list_table(nodes));

    let online = nodes.iter().filter(|n| n.is_online()).count();
    println!();
    section("SUMMARY", 30);
    println!("{}", format!("Online nodes: {}", online).green());
    println!("{}", format!("Total nodes: {}", nodes.len()).dark_grey());
    println!(
        "{}",
        format!(
            "Status: {:.1}% uptime",
            percentage(online as f64, nodes.len() as f64)
        )
        .blue()
    );
    println!("{}", "\nNode data loaded.".green());
}

// ---- node detail ------------------------------------------------------

pub fn node_status_cell(d: &NodeDetail) -> Cell {
    match (d.active, d.connect) {
        (true, true) => colored("Online & connected", Color::Green),
        (true, false) => colored("Active but disconnected", Color::Yellow),
        (false, _) => colored("Inactive", Color::Red),
    }
}

pub fn print_node_detail(d: &NodeDetail) {
    heading(&format!("NODE DETAIL - {}", d.id), 70);

    println!(
        "{}\n",
        kv_table(
            "Information",
            "Value",
            Color::Cyan,
            vec![
                ("Node ID", colored(&d.id, Color::White)),
                ("Account ID", colored(&d.account, Color::DarkGrey)),
                ("Name", colored(&d.name, Color::White)),
                ("Status", node_status_cell(d)),
                ("Banned", if d.banned { colored("Yes", Color::Red) } else { colored("No", Color::Green) }),
                ("Created", Cell::new(format_timestamp_ms(d.create_at))),
            ],
        )
    );

    let season_one = d.season.get("1").copied().unwrap_or(0.0);
    println!(
        "{}\n",
        kv_table(
            "PERFORMANCE",
            "Value",
            Color::Yellow,
            vec![
                ("Total duration", Cell::new(format_duration_ms(d.duration))),
                ("Latency", Cell::new(format!("{}ms", d.latency))),
                ("Total points", colored(format_number(d.point), Color::Green)),
                ("Season 1 points", colored(format_number(season_one), Color::Blue)),
                ("Score", Cell::new(d.score)),
            ],
        )
    );

    let last_active = if d.last_active == 0 {
        colored("Active now", Color::Green)
    } else {
        Cell::new(format_timestamp_ms(d.last_active))
    };
    println!(
        "{}\n",
        kv_table(
            "TODAY",
            "Value",
            Color::Green,
            vec![
                ("Points today", colored(format_number(d.today), Color::Green)),
                ("Duration today", Cell::new(format_duration_ms(d.today_duration))),
                ("Latency today", Cell::new(format!("{}ms", d.today_latency))),
                ("Last active", last_active),
            ],
        )
    );

    if let Some(loc) = &d.location {
        let postcode = if loc.postcode == "N/A" || loc.postcode.is_empty() {
            colored("Not available", Color::DarkGrey)
        } else {
            colored(&loc.postcode, Color::White)
        };
        println!(
            "{}\n",
            kv_table(
                "LOCATION",
                "Value",
                Color::Blue,
                vec![
                    ("IP address", colored(&d.ip, Color::White)),
                    ("Country", colored(&loc.country, Color::White)),
                    ("Region", colored(&loc.region, Color::White)),
                    ("City", colored(&loc.place, Color::White)),
                    ("Postcode", postcode),
                    ("Coordinates", Cell::new(format!("{}, {}", loc.lat, loc.lng))),
                ],
            )
        );
    }

    section("PERFORMANCE ANALYSIS", 40);
    println!("{}", "Points efficiency:".white());
    println!(
        "{}",
        format!(
            "   • Today: {:.2} points/second",
            points_per_second(d.today, d.today_duration)
        )
        .dark_grey()
    );
    println!(
        "{}",
        format!("   • Total: {:.2} points/second", points_per_second(d.point, d.duration)).dark_grey()
    );

    println!("{}", "\nLatency:".white());
    match LatencyGrade::of(d.latency) {
        LatencyGrade::Excellent => println!("{}", "   • Excellent (<100ms)".green()),
        LatencyGrade::Good => println!("{}", "   • Good (100-300ms)".yellow()),
        LatencyGrade::Poor => println!("{}", "   • Poor, needs attention (>300ms)".red()),
    }

    let now_ms = Local::now().timestamp_millis();
    let age_secs = ((now_ms - d.create_at).max(0) / 1000) as u64;
    println!("{}", "\nUptime:".white());
    println!(
        "{}",
        format!(
            "   • Estimated uptime: {:.1}%",
            uptime_percentage(d.duration, d.create_at, now_ms)
        )
        .dark_grey()
    );
    println!("{}", format!("   • Active for: {}", format_duration_ms(d.duration)).dark_grey());
    println!("{}", format!("   • Node age: {}", format_duration(age_secs)).dark_grey());

    println!();
    section("STATUS CHECKS", 30);
    let check = |ok: bool, good: &str, bad: &str| {
        if ok {
            println!("{}", format!("OK   {}", good).green());
        } else {
            println!("{}", format!("FAIL {}", bad).red());
        }
    };
    check(d.active, "Node active", "Node inactive");
    check(d.connect, "Connected", "Not connected");
    check(!d.banned, "Node in good standing", "Node is banned");
    if d.hide == 0 {
        println!("{}", "OK   Node visible".green());
    } else {
        println!("{}", "WARN Node hidden".yellow());
    }
    println!("{}", "\nNode detail loaded.".green());
}

// ---- latency ----------------------------------------------------------

pub fn latency_stats_table(stats: &LatencyStats) -> Table {
    kv_table(
        "STATISTICS",
        "Value",
        Color::Yellow,
        vec![
            ("Samples", colored(stats.count, Color::Blue)),
            ("Average latency", colored(format!("{:.2}ms", stats.average), Color::Green)),
            ("Minimum latency", colored(format!("{}ms", stats.min), Color::Green)),
            ("Maximum latency", colored(format!("{}ms", stats.max), Color::Red)),
            ("Range", colored(format!("{}ms", stats.range()), Color::DarkGrey)),
        ],
    )
}

pub fn recent_latency_table(records: &[LatencyRecord]) -> Table {
    let mut table = base_table();
    table.set_header(
        ["Timestamp", "Latency", "Status", "Location"]
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan)),
    );
    for record in records.iter().take(10) {
        let latency = match record.latency {
            Some(ms) => {
                let color = match LatencyGrade::of(ms) {
                    LatencyGrade::Excellent => Color::Green,
                    LatencyGrade::Good => Color::Yellow,
                    LatencyGrade::Poor => Color::Red,
                };
                colored(format!("{}ms", ms), color)
            }
            None => colored("N/A", Color::DarkGrey),
        };
        let status = if record.status.as_deref() == Some("success") {
            colored("ok", Color::Green)
        } else {
            colored("failed", Color::Red)
        };
        table.add_row(vec![
            Cell::new(format_timestamp_ms(record.timestamp)),
            latency,
            status,
            colored(record.location.as_deref().unwrap_or("Unknown"), Color::DarkGrey),
        ]);
    }
    table
}

pub fn print_latency(node_id: &str, records: &[LatencyRecord]) {
    heading(&format!("LATENCY ANALYSIS - {}", node_id), 70);
    let samples = || records.iter().map(|r| r.latency);
    let Some(stats) = LatencyStats::from_samples(samples()) else {
        println!("{}", "No latency data found".yellow());
        return;
    };
    println!("{}\n", latency_stats_table(&stats));
    println!("{}", "LAST 10 RECORDS".blue());
    println!("{}", recent_latency_table(records));

    let buckets = LatencyBuckets::from_samples(samples());
    println!();
    section("PERFORMANCE ANALYSIS", 40);
    println!(
        "{}",
        format!("Excellent (<50ms): {} ({:.1}%)", buckets.excellent, buckets.percent(buckets.excellent)).green()
    );
    println!(
        "{}",
        format!("Good (50-100ms): {} ({:.1}%)", buckets.good, buckets.percent(buckets.good)).blue()
    );
    println!(
        "{}",
        format!("Fair (100-300ms): {} ({:.1}%)", buckets.fair, buckets.percent(buckets.fair)).yellow()
    );
    println!(
        "{}",
        format!("Poor (>300ms): {} ({:.1}%)", buckets.poor, buckets.percent(buckets.poor)).red()
    );
    println!("{}", "\nLatency analysis loaded.".green());
}

// ---- announcements ----------------------------------------------------

pub fn banner_table(banners: &[Banner]) -> Table {
    let mut table = base_table();
    table.set_header(
        ["Title", "Description", "Link"]
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Yellow)),
    );
    for banner in banners {
        let description = banner
            .content
            .as_deref()
            .or(banner.detail.as_deref())
            .unwrap_or("No description");
        table.add_row(vec![
            colored(banner.title.as_deref().unwrap_or("Untitled"), Color::White),
            colored(description, Color::DarkGrey),
            colored(banner.link.as_deref().unwrap_or("No link"), Color::Blue),
        ]);
    }
    table
}

pub fn print_announcements(banners: &[Banner], announcements: &[Announcement]) {
    heading("GRADIENT NETWORK ANNOUNCEMENTS & BANNERS", 70);

    if banners.is_empty() {
        println!("{}", "\nNo promotional banners right now".yellow());
    } else {
        println!("{}", "\nPROMOTIONAL BANNERS".yellow().bold());
        println!("{}", "=".repeat(50).yellow());
        println!("{}", banner_table(banners));
        for (index, banner) in banners.iter().enumerate() {
            if let Some(image) = &banner.image {
                println!(
                    "{}",
                    format!(
                        "\nBanner {} - {}:",
                        index + 1,
                        banner.title.as_deref().unwrap_or("Untitled")
                    )
                    .cyan()
                );
                if let Some(url) = &image.dashboard {
                    println!("{}", format!("   Dashboard: {}", url).dark_grey());
                }
                if let Some(url) = &image.extension {
                    println!("{}", format!("   Extension: {}", url).dark_grey());
                }
            }
        }
    }

    if announcements.is_empty() {
        println!("{}", "\nNo recent announcements".yellow());
    } else {
        println!("{}", "\nLATEST ANNOUNCEMENTS".green().bold());
        println!("{}", "=".repeat(50).green());
        for (index, a) in announcements.iter().enumerate() {
            println!("{}", format!("\nAnnouncement {}:", index + 1).cyan());
            println!(
                "{}",
                format!("   {}", a.title.as_deref().unwrap_or("Announcement")).white().bold()
            );
            if let Some(content) = &a.content {
                println!("   {}", render_markdown(content));
            }
            match a.id.as_deref() {
                Some("version") => {
                    println!(
                        "{}",
                        format!("   Minimum version: {}", a.min_version.as_deref().unwrap_or("-")).yellow()
                    );
                    println!(
                        "{}",
                        format!("   Latest version: {}", a.new_version.as_deref().unwrap_or("-")).green()
                    );
                }
                Some("background") | None => {}
                Some(id) => println!("{}", format!("   ID: {}", id).dark_grey()),
            }
            if let Some(images) = &a.image {
                println!("{}", "   Images:".blue());
                for (kind, url) in images {
                    println!("{}", format!("     {}: {}", kind, url).dark_grey());
                }
            }
        }
    }

    println!("{}", "\nSUMMARY".cyan().bold());
    println!("{}", "=".repeat(30).cyan());
    println!(
        "{}",
        kv_table(
            "Kind",
            "Count",
            Color::Cyan,
            vec![
                ("Banners", colored(banners.len(), Color::Yellow)),
                ("Announcements", colored(announcements.len(), Color::Green)),
                (
                    "Updated",
                    colored(Local::now().format("%d/%m/%Y %H:%M:%S"), Color::DarkGrey)
                ),
            ],
        )
    );

    if let Some(version) = announcements.iter().find(|a| a.is_version_notice()) {
        println!("{}", "\nVERSION NOTICE:".yellow());
        println!("{}", "=".repeat(40).yellow());
        println!("{}", version.content.as_deref().unwrap_or("").red());
        println!(
            "{}",
            format!("Minimum version: {}", version.min_version.as_deref().unwrap_or("-")).blue()
        );
        println!(
            "{}",
            format!("Latest version: {}", version.new_version.as_deref().unwrap_or("-")).green()
        );
    }

    println!("{}", "\nTips:".blue());
    println!("{}", "   • Check announcements regularly for updates".dark_grey());
    println!("{}", "   • Banners usually point at new features or services".dark_grey());
    println!("{}", "   • Keep the browser extension on the latest version".dark_grey());
    println!("{}", "\nAnnouncements loaded.".green());
}

// ---- system status ----------------------------------------------------

pub fn print_system_status(status: &SystemStatus) {
    match status.time {
        Some(time) => {
            println!("{}", "System online".green());
            println!("{}", format!("Time: {}", format_timestamp_ms(time)).dark_grey());
            println!(
                "{}",
                format!("IP: {}", status.ip.as_deref().unwrap_or("-")).dark_grey()
            );
            println!(
                "{}",
                format!("Environment: {}", status.env.as_deref().unwrap_or("-")).dark_grey()
            );
        }
        None => println!("{}", "System reported a problem".red()),
    }
}

// ---- auto-ping --------------------------------------------------------

/// Rows of the detailed auto-ping status view.
pub fn ping_status_table(status: &StatusSnapshot) -> Table {
    kv_table(
        "AUTO-PING",
        "Value",
        Color::Blue,
        vec![
            ("Running", yes_no(status.running, "Yes", "No")),
            ("Total pings", Cell::new(status.tick_count)),
            ("Uptime", Cell::new(&status.uptime)),
            (
                "Errors",
                colored(
                    format!("{}/{}", status.consecutive_failures, status.failure_threshold),
                    if status.consecutive_failures > 0 { Color::Red } else { Color::Green },
                ),
            ),
            ("Last success", Cell::new(status.last_tick.as_deref().unwrap_or("None yet"))),
            ("Next ping", Cell::new(&status.next_tick)),
            (
                "Node ID",
                Cell::new(status.monitored_target.as_deref().unwrap_or("Not set")),
            ),
        ],
    )
}

/// Short block shown above the auto-ping menu.
pub fn print_ping_header(status: &StatusSnapshot, interval_secs: u64) {
    println!("{}", "\nAUTO-PING 24/7".cyan());
    println!("{}", "━".repeat(50).dark_grey());
    if status.running {
        println!("{}", "Status: active".green());
        println!("{}", format!("Total pings: {}", status.tick_count).dark_grey());
        println!("{}", format!("Uptime: {}", status.uptime).dark_grey());
        println!(
            "{}",
            format!("Errors: {}/{}", status.consecutive_failures, status.failure_threshold).dark_grey()
        );
        println!(
            "{}",
            format!("Last ping: {}", status.last_tick.as_deref().unwrap_or("None yet")).dark_grey()
        );
        println!("{}", format!("Next ping: {}", status.next_tick).dark_grey());
    } else {
        println!("{}", "Status: inactive".red());
        println!("{}", "Auto-ping keeps the connection active 24/7".yellow());
        println!(
            "{}",
            format!("   The server is pinged every {} seconds", interval_secs).dark_grey()
        );
    }
    println!("{}", "━".repeat(50).dark_grey());
}

pub fn print_ping_info(interval_secs: u64, threshold: u32) {
    println!("{}", "\nAUTO-PING".blue());
    println!("{}", "━".repeat(50).dark_grey());
    println!("{}", "Purpose:".white());
    println!("{}", "   • Keep the connection active 24/7".dark_grey());
    println!("{}", "   • Avoid server-side idle timeouts".dark_grey());
    println!("{}", "\nHow it works:".white());
    println!("{}", format!("   • Pings GET /status every {} seconds", interval_secs).dark_grey());
    println!(
        "{}",
        format!("   • Stops itself after {} consecutive errors", threshold).dark_grey()
    );
    println!("{}", "   • Runs only while this CLI is open".dark_grey());
    println!("{}", "\nSafety:".white());
    println!("{}", "   • Only the status endpoint is called".dark_grey());
    println!("{}", "   • No account data is sent".dark_grey());
    println!("{}", "━".repeat(50).dark_grey());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn season_table_labels_referral_points() {
        let mut season = BTreeMap::new();
        season.insert("1".to_string(), 1500.0);
        season.insert("1_refer".to_string(), 20.0);
        let profile = Profile { season, ..Profile::default() };
        let rendered = profile_season_table(&profile).unwrap().to_string();
        assert!(rendered.contains("Season 1 (referral)"));
        assert!(rendered.contains("1.500"));
        assert!(profile_season_table(&Profile::default()).is_none());
    }

    #[test]
    fn node_table_has_a_row_per_node() {
        let nodes = vec![
            SentryNode {
                node_id: Some("W2F5PWFHP7YUYY7V".into()),
                status: Some("online".into()),
                uptime: 3661,
                points: 12.5,
                last_seen: None,
            },
            SentryNode::default(),
        ];
        let table = node_list_table(&nodes);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("W2F5PWFHP7YUYY7V"));
        assert!(rendered.contains("1h 1m 1s"));
        assert!(rendered.contains("Unknown"));
    }

    #[test]
    fn recent_latency_is_capped_at_ten() {
        let records: Vec<LatencyRecord> = (0..25)
            .map(|i| LatencyRecord {
                latency: Some(i as f64 * 20.0),
                timestamp: 1_700_000_000_000,
                status: Some("success".into()),
                location: None,
            })
            .collect();
        assert_eq!(recent_latency_table(&records).row_iter().count(), 10);
    }

    #[test]
    fn ping_status_table_shows_defaults() {
        let snapshot = StatusSnapshot {
            running: false,
            tick_count: 0,
            consecutive_failures: 0,
            failure_threshold: 5,
            uptime: "0s".into(),
            last_tick: None,
            next_tick: "soon".into(),
            monitored_target: None,
        };
        let rendered = ping_status_table(&snapshot).to_string();
        assert!(rendered.contains("None yet"));
        assert!(rendered.contains("Not set"));
        assert!(rendered.contains("0/5"));
    }
}
