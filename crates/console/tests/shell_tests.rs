//! Integration tests driving the console shell with scripted input.

use std::io::Cursor;
use std::sync::Arc;

use chrono::NaiveDate;
use rustyline::error::ReadlineError;

use foundrytrack_console::config::{ConsoleConfig, OutputFormat};
use foundrytrack_console::shell::{Flow, Shell};
use foundrytrack_core::clock::FixedClock;
use foundrytrack_core::status::PatternStatus;
use foundrytrack_events::EventBus;
use foundrytrack_registry::PatternRegistry;

fn shell_with(config: ConsoleConfig) -> Shell<Vec<u8>> {
    let today = NaiveDate::from_ymd_opt(2024, 1, 25).unwrap();
    let bus = Arc::new(EventBus::default());
    let registry = PatternRegistry::seeded(Arc::new(FixedClock(today)))
        .unwrap()
        .with_technician(config.technician.clone())
        .with_event_bus(Arc::clone(&bus));
    Shell::new(registry, &bus, &config, Vec::new())
}

fn run(mut shell: Shell<Vec<u8>>, script: &str) -> Shell<Vec<u8>> {
    shell.run(Cursor::new(script.to_string())).unwrap();
    shell
}

fn output(shell: Shell<Vec<u8>>) -> String {
    String::from_utf8(shell.into_output()).unwrap()
}

// ---------------------------------------------------------------------------
// Authentication gate
// ---------------------------------------------------------------------------

#[test]
fn screens_require_sign_in() {
    let shell = run(shell_with(ConsoleConfig::default()), "dashboard\n");
    assert!(!shell.session().is_authenticated());
    let text = output(shell);
    assert!(text.contains("Error: Unauthorized"), "{text}");
}

#[test]
fn login_opens_home_screen() {
    let shell = run(
        shell_with(ConsoleConfig::default()),
        "login jane@foundry.com secret\n",
    );
    assert_eq!(shell.session().user().unwrap().name, "Jane");
    assert!(output(shell).contains("Welcome back, Jane!"));
}

#[test]
fn gate_can_be_disabled() {
    let config = ConsoleConfig {
        require_login: false,
        ..ConsoleConfig::default()
    };
    let text = output(run(shell_with(config), "dashboard\n"));
    assert!(text.contains("Total patterns:      10"), "{text}");
    assert!(text.contains("Requiring attention:    50%"), "{text}");
}

// ---------------------------------------------------------------------------
// Scanning and usage
// ---------------------------------------------------------------------------

#[test]
fn scan_then_use_increments_the_scanned_pattern() {
    let shell = run(
        shell_with(ConsoleConfig::default()),
        "login-demo\nscan ptn001\nuse\nuse\n",
    );
    assert_eq!(
        shell.registry().find_pattern("PTN001").unwrap().usage_count(),
        47
    );
    let text = output(shell);
    assert!(text.contains("usage count is now 46"));
    assert!(text.contains("usage count is now 47"));
}

#[test]
fn crossing_the_threshold_is_announced() {
    let shell = run(
        shell_with(ConsoleConfig::default()),
        "login-demo\nuse PTN001\nuse PTN001\nuse PTN001\nuse PTN001\nuse PTN001\n",
    );
    assert_eq!(
        shell.registry().find_pattern("PTN001").unwrap().status(),
        PatternStatus::Warning
    );
    let text = output(shell);
    assert_eq!(text.matches("Status of PTN001 changed: Good -> Warning").count(), 1);
}

#[test]
fn use_accepts_any_id_case() {
    let shell = run(
        shell_with(ConsoleConfig::default()),
        "login-demo\nscan ptn001\nuse ptn001\n",
    );
    assert_eq!(
        shell.registry().find_pattern("PTN001").unwrap().usage_count(),
        46
    );
    let text = output(shell);
    assert!(text.contains("Usage updated: pattern PTN001 usage count is now 46"));
    assert!(!text.contains("Error:"), "{text}");
}

#[test]
fn use_without_scan_is_rejected() {
    let shell = run(shell_with(ConsoleConfig::default()), "login-demo\nuse\n");
    assert!(output(shell).contains("Scan a pattern first"));
}

#[test]
fn use_of_unknown_id_changes_nothing() {
    let shell = run(shell_with(ConsoleConfig::default()), "login-demo\nuse PTN999\n");
    let before = PatternRegistry::seeded(Arc::new(FixedClock(
        NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
    )))
    .unwrap();
    assert_eq!(shell.registry().patterns(), before.patterns());
    assert!(output(shell).contains("not found"));
}

#[test]
fn qr_scan_selects_a_pattern() {
    let shell = run(shell_with(ConsoleConfig::default()), "login-demo\nscan-qr\nuse\n");
    let total: u32 = shell.registry().patterns().iter().map(|p| p.usage_count()).sum();
    // Seed usage totals 448; exactly one use was added.
    assert_eq!(total, 449);
    assert!(output(shell).contains("QR code scanned: detected PTN0"));
}

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

#[test]
fn log_command_records_maintenance() {
    let config = ConsoleConfig {
        technician: "Sam Cole".to_string(),
        ..ConsoleConfig::default()
    };
    let shell = run(
        shell_with(config),
        "login-demo\nlog ptn001 | Routine Inspection | checked ok\nlogs\n",
    );
    let first = &shell.registry().maintenance_logs()[0];
    assert_eq!(first.id(), "LOG004");
    assert_eq!(first.pattern_id(), "PTN001");
    assert_eq!(first.technician(), "Sam Cole");

    let text = output(shell);
    assert!(text.contains("Maintenance log LOG004 added for pattern PTN001"));
    assert!(text.contains("LOG004 2024-01-25 PTN001"));
    assert!(text.contains("Total logs: 4  This month: 3"));
}

#[test]
fn invalid_log_is_reported_and_not_stored() {
    let shell = run(
        shell_with(ConsoleConfig::default()),
        "login-demo\nlog PTN404 | Cleaning | x\nlog PTN001 | | x\n",
    );
    assert_eq!(shell.registry().maintenance_logs().len(), 3);
    let text = output(shell);
    assert!(text.contains("Error: Entity not found: pattern with id PTN404"));
    assert!(text.contains("Error: Validation failed"));
}

// ---------------------------------------------------------------------------
// Listing and output formats
// ---------------------------------------------------------------------------

#[test]
fn patterns_filter_and_search() {
    let text = output(run(
        shell_with(ConsoleConfig::default()),
        "login-demo\npatterns --status overdue\n",
    ));
    assert!(text.contains("PTN003"));
    assert!(text.contains("PTN010"));
    assert!(!text.contains("PTN001 "));
    assert!(text.contains("Total: 2  Good: 0  Warning: 0  Overdue: 2"));
}

#[test]
fn json_output_is_machine_readable() {
    let config = ConsoleConfig {
        output: OutputFormat::Json,
        require_login: false,
        ..ConsoleConfig::default()
    };
    let text = output(run(shell_with(config), "patterns gear\n"));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value[0]["id"], "PTN002");
    assert_eq!(value[0]["status"], "Warning");
}

#[test]
fn quit_stops_reading() {
    let mut shell = shell_with(ConsoleConfig::default());
    assert_eq!(shell.handle_line("quit").unwrap(), Flow::Quit);

    let shell = run(
        shell_with(ConsoleConfig::default()),
        "login-demo\nquit\nuse PTN001\n",
    );
    assert_eq!(
        shell.registry().find_pattern("PTN001").unwrap().usage_count(),
        45
    );
}

#[test]
fn unknown_commands_do_not_stop_the_loop() {
    let shell = run(shell_with(ConsoleConfig::default()), "frobnicate\nhelp\n");
    let text = output(shell);
    assert!(text.contains("Unknown command 'frobnicate'"));
    assert!(text.contains("Commands:"));
}

#[test]
fn terminal_interrupt_keeps_the_session_and_eof_quits() {
    let mut shell = shell_with(ConsoleConfig::default());
    assert_eq!(
        shell.handle_readline(Ok("login-demo".to_string())).unwrap(),
        Flow::Continue
    );
    assert_eq!(
        shell.handle_readline(Err(ReadlineError::Interrupted)).unwrap(),
        Flow::Continue
    );
    assert!(shell.session().is_authenticated());
    assert_eq!(shell.handle_readline(Err(ReadlineError::Eof)).unwrap(), Flow::Quit);
    assert!(output(shell).contains("^C (type quit to exit)"));
}
