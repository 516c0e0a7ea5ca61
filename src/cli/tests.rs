//! Unit tests for CLI commands

use super::commands::follow_routes;
use crate::cli::{run, Cli, Commands, Outcome};
use crate::runtime_config::RuntimeConfig;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use tempfile::NamedTempFile;

const ROUTES: &str = r#"
hello:
  path: /foo/hello/{name}/{surname}
  method: [GET]
  controller: app.HelloController
world:
  path: /foo/world/{name}/{number}
  methods: [GET, POST]
  controller: app.WorldController
  action: world_action
  requirements: { number: '\d+' }
  protocols: [https]
  host: foo.com
"#;

fn routes_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn run_args(args: &[&str]) -> (anyhow::Result<Outcome>, String) {
    run_with(args, &RuntimeConfig::default())
}

fn run_with(args: &[&str], runtime: &RuntimeConfig) -> (anyhow::Result<Outcome>, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
    let mut out = Vec::new();
    let outcome = run(&cli, runtime, &mut out);
    (outcome, String::from_utf8(out).unwrap())
}

#[test]
fn test_match_command_parses_defaults() {
    let cli = Cli::try_parse_from([
        "routedispatch",
        "match",
        "--config",
        "routes.yaml",
        "--path",
        "/x",
    ])
    .unwrap();
    match cli.command {
        Commands::Match {
            method,
            protocol,
            host,
            json,
            ..
        } => {
            assert_eq!(method, "GET");
            assert_eq!(protocol, "http");
            assert_eq!(host, "localhost");
            assert!(!json);
        }
        other => panic!("Expected Match command, got {other:?}"),
    }
}

#[test]
fn test_global_log_flags() {
    let cli = Cli::try_parse_from([
        "routedispatch",
        "check",
        "--config",
        "r.yaml",
        "--log-level",
        "debug",
    ])
    .unwrap();
    assert_eq!(cli.log_level.as_deref(), Some("debug"));
    assert!(cli.log_format.is_none());
}

#[test]
fn test_routes_command_lists_in_order() {
    let file = routes_file(ROUTES);
    let path = file.path().to_str().unwrap();
    let (outcome, out) = run_args(&["routedispatch", "routes", "--config", path]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "[routes] count=2");
    assert!(lines[1].contains("hello"));
    assert!(lines[2].contains("world"));
}

#[test]
fn test_match_command_text() {
    let file = routes_file(ROUTES);
    let path = file.path().to_str().unwrap();
    let (outcome, out) = run_args(&[
        "routedispatch",
        "match",
        "--config",
        path,
        "--path",
        "/foo/hello/felix/carmona",
    ]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    assert!(out.contains("route:   hello"));
    assert!(out.contains("handler: app.HelloController"));
    assert!(out.contains("params:  name=felix surname=carmona"));
}

#[test]
fn test_match_command_json() {
    let file = routes_file(ROUTES);
    let path = file.path().to_str().unwrap();
    let (outcome, out) = run_args(&[
        "routedispatch",
        "match",
        "--config",
        path,
        "--method",
        "post",
        "--path",
        "/foo/world/felix/42",
        "--protocol",
        "HTTPS",
        "--host",
        "foo.com",
        "--json",
    ]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["route"], "world");
    assert_eq!(value["action"], "world_action");
    assert_eq!(value["params"]["number"], "42");
}

#[test]
fn test_match_command_no_match() {
    let file = routes_file(ROUTES);
    let path = file.path().to_str().unwrap();
    let (outcome, out) = run_args(&[
        "routedispatch",
        "match",
        "--config",
        path,
        "--path",
        "/foo/world/felix/42",
    ]);
    assert_eq!(outcome.unwrap(), Outcome::NoMatch);
    assert_eq!(out.trim(), "no match");
}

#[test]
fn test_check_command_reports_configuration_error() {
    let file = routes_file("broken:\n  path: /a/{id}\n  controller: c\n  methods: [FETCH]\n");
    let path = file.path().to_str().unwrap();
    let (outcome, _) = run_args(&["routedispatch", "check", "--config", path]);
    let err = outcome.unwrap_err();
    assert!(format!("{err:#}").contains("FETCH"));

    let file = routes_file(ROUTES);
    let path = file.path().to_str().unwrap();
    let (outcome, out) = run_args(&["routedispatch", "check", "--config", path]);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    assert!(out.starts_with("ok: 2 routes"));
}

#[test]
fn test_routes_path_from_runtime_config() {
    let file = routes_file(ROUTES);
    let runtime = RuntimeConfig {
        routes_path: Some(file.path().to_path_buf()),
        ..RuntimeConfig::default()
    };
    let (outcome, out) = run_with(&["routedispatch", "check"], &runtime);
    assert_eq!(outcome.unwrap(), Outcome::Success);
    assert!(out.starts_with("ok: 2 routes"));

    // --config wins over the environment
    let runtime = RuntimeConfig {
        routes_path: Some(PathBuf::from("/definitely/not/here.yaml")),
        ..RuntimeConfig::default()
    };
    let path = file.path().to_str().unwrap();
    let (outcome, _) = run_with(&["routedispatch", "routes", "--config", path], &runtime);
    assert_eq!(outcome.unwrap(), Outcome::Success);
}

#[test]
fn test_missing_routes_path() {
    let (outcome, _) = run_args(&["routedispatch", "check"]);
    let err = outcome.unwrap_err();
    assert!(err.to_string().contains("ROUTEDISPATCH_ROUTES"));
}

#[test]
fn test_routes_watch_flag() {
    let cli = Cli::try_parse_from(["routedispatch", "routes", "--watch"]).unwrap();
    match cli.command {
        Commands::Routes { config, watch } => {
            assert!(config.is_none());
            assert!(watch);
        }
        other => panic!("Expected Routes command, got {other:?}"),
    }
}

#[test]
fn test_follow_routes_prints_reloaded_table() {
    let file = routes_file(ROUTES);
    let path = file.path().to_path_buf();
    let router = super::commands::load_router(&path).unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    let follow_path = path.clone();
    std::thread::spawn(move || {
        let mut out = Vec::new();
        let result = follow_routes(&follow_path, router, &mut out, Some(1));
        let _ = done_tx.send(result.map(|()| String::from_utf8(out).unwrap()));
    });

    // allow the watcher to start
    std::thread::sleep(Duration::from_millis(200));
    std::fs::write(&path, "only:\n  path: /only\n  controller: app.Only\n").unwrap();

    let out = done_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("table was not reprinted")
        .unwrap();
    assert!(out.starts_with("watching "));
    assert!(out.contains("[routes] count=1"));
    assert!(out.contains("only"));
}
