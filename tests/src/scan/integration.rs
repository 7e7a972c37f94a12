#![cfg(test)]
use std::collections::BTreeSet;
use std::time::Duration;

use portscan_common::{ScanConfig, ScanError};
use portscan_core::scanner::{self, NO_OPEN_PORTS};

use crate::util::{host_file, lines, listen, listen_with_gap};

const TIMEOUT: Duration = Duration::from_millis(500);

fn config(hosts: &str, ports: &str, workers: usize) -> ScanConfig {
    ScanConfig::new(hosts, ports)
        .with_workers(workers)
        .with_connect_timeout(TIMEOUT)
}

#[tokio::test]
async fn single_open_port_on_literal_host() {
    let (_listener, port) = listen().await;

    let report = scanner::scan(&config("127.0.0.1", &port.to_string(), 4))
        .await
        .unwrap();

    assert_eq!(report.lines().count(), 1, "report: {report}");
    assert_eq!(lines(&report), BTreeSet::from([format!("127.0.0.1:{port} open")]));
}

#[tokio::test]
async fn all_closed_reports_placeholder() {
    let report = scanner::scan(&config("127.0.0.1", "1,2,3", 4)).await.unwrap();
    assert_eq!(report, NO_OPEN_PORTS);
}

#[tokio::test]
async fn port_range_expansion() {
    let (_first, _third, port) = listen_with_gap().await;
    let ports = format!("{}-{}", port, port + 2);

    let report = scanner::scan(&config("127.0.0.1", &ports, 2)).await.unwrap();

    assert_eq!(
        lines(&report),
        BTreeSet::from([
            format!("127.0.0.1:{port} open"),
            format!("127.0.0.1:{} open", port + 2),
        ])
    );
}

#[tokio::test]
async fn cidr_expansion() {
    let (_listener, port) = listen().await;

    let report = scanner::scan(&config("127.0.0.0/30", &port.to_string(), 8))
        .await
        .unwrap();

    assert_eq!(lines(&report), BTreeSet::from([format!("127.0.0.1:{port} open")]));
}

#[tokio::test]
async fn host_file_expansion() {
    let (_listener, port) = listen().await;
    let file = host_file("127.0.0.1\n127.0.0.2\n");

    let report = scanner::scan(&config(
        file.path().to_str().unwrap(),
        &port.to_string(),
        8,
    ))
    .await
    .unwrap();

    assert_eq!(lines(&report), BTreeSet::from([format!("127.0.0.1:{port} open")]));
}

#[tokio::test]
async fn empty_expansion_is_an_error() {
    let result = scanner::scan(&config("", "", 8)).await;
    assert!(matches!(result, Err(ScanError::EmptyProbeSet)));
}

#[tokio::test]
async fn results_do_not_depend_on_worker_count() {
    let (_first, _third, port) = listen_with_gap().await;
    let ports = format!("{}-{}", port, port + 2);

    let mut reports = Vec::new();
    for workers in [1, 8, 64] {
        let report = scanner::scan(&config("127.0.0.0/30", &ports, workers))
            .await
            .unwrap();
        reports.push(lines(&report));
    }

    assert_eq!(reports[0].len(), 2);
    assert!(reports.iter().all(|r| *r == reports[0]));
}

#[tokio::test]
async fn repeated_scans_are_idempotent() {
    let (_listener, port) = listen().await;
    let cfg = config("127.0.0.1", &format!("{port},{port}"), 2);

    let first = scanner::scan(&cfg).await.unwrap();
    let second = scanner::scan(&cfg).await.unwrap();

    assert_eq!(first.lines().count(), 2);
    assert_eq!(lines(&first), lines(&second));
}

#[tokio::test]
async fn missing_host_file_falls_through_to_literal() {
    // Not a file and no '/', so the host string is scanned as a hostname that fails to resolve.
    let report = scanner::scan(&config("hosts-that-do-not-exist.txt", "80", 1))
        .await
        .unwrap();
    assert_eq!(report, NO_OPEN_PORTS);
}

#[tokio::test]
async fn malformed_port_spec_is_an_error() {
    let result = scanner::scan(&config("127.0.0.1", "80,http", 8)).await;
    assert!(matches!(result, Err(ScanError::MalformedPortToken { .. })));
}
