use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::NamedTempFile;

/// Creates a config file registering two buses with a fixed ticket id seed.
fn create_fleet_config() -> NamedTempFile {
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(
        config.path(),
        b"ticket_ids:\n  seed: 7\nfleet:\n  - bus_number: \"1234\"\n    driver: Jane\n    arrival: \"09:00 AM\"\n    departure: \"05:30 PM\"\n    origin: Springfield\n    destination: Shelbyville\n  - bus_number: \"5678\"\n    driver: Sam\n    arrival: \"7:15 am\"\n    departure: \"11:45 pm\"\n    origin: Capital City\n    destination: Ogdenville\n",
    )
    .expect("Writing temp config failed");
    config
}

fn bus_ledger() -> Command {
    let mut cmd = Command::cargo_bin("bus-ledger").expect("Binary exists");
    cmd.env_remove("BUS_LEDGER_CONFIG")
        .env_remove("BUS_LEDGER_TICKET_SEED")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn menu_session_books_and_cancels_a_seat() {
    let config = create_fleet_config();

    // Reserve seat 5 on bus 1234, list buses, then exit.
    bus_ledger()
        .arg("menu")
        .arg("--config")
        .arg(config.path())
        .write_stdin("2\n1234\n5\nAlice\n4\n8\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Seat number 5 allotted to passenger Alice.")
                .and(predicate::str::contains("Available Seats: 31/32"))
                .and(predicate::str::contains("Available Seats: 32/32"))
                .and(predicate::str::contains("Thank You ... Visit Again!")),
        );
}

#[test]
fn menu_without_config_starts_empty() {
    bus_ledger()
        .arg("menu")
        .write_stdin("4\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No buses available at the moment."));
}

#[test]
fn menu_exits_cleanly_at_end_of_input() {
    bus_ledger()
        .arg("menu")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter your choice"));
}

#[test]
fn fleet_report_lists_configured_buses_in_order() {
    let config = create_fleet_config();
    let assert = bus_ledger()
        .arg("fleet")
        .arg("--config")
        .arg(config.path())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let first = stdout.find("1234").expect("bus 1234 listed");
    let second = stdout.find("5678").expect("bus 5678 listed");
    assert!(first < second, "{stdout}");
}

#[test]
fn fleet_report_as_json() {
    let config = create_fleet_config();
    let assert = bus_ledger()
        .arg("fleet")
        .arg("--config")
        .arg(config.path())
        .arg("--json")
        .assert()
        .success();
    let summaries: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(summaries[0]["bus_number"], "1234");
    assert_eq!(summaries[1]["origin"], "Capital City");
    assert_eq!(summaries[1]["empty_seats"], 32);
}

#[test]
fn invalid_fleet_entry_fails_start_up() {
    let config = NamedTempFile::new().unwrap();
    write(
        config.path(),
        "fleet:\n  - bus_number: \"12\"\n    driver: Jane\n    arrival: \"09:00 AM\"\n    departure: \"05:30 PM\"\n    origin: A\n    destination: B\n",
    )
    .unwrap();

    bus_ledger()
        .arg("fleet")
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("fleet entry 0"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let msg = format!("{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use bus_ledger::cli::{run, Cli, Commands};

    // A missing config file fails after the initial event.
    let cli = Cli {
        command: Commands::Fleet {
            config: Some(std::path::PathBuf::from("does-not-exist.yaml")),
            json: false,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err());

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
