use std::collections::BTreeSet;
use std::io::Write;

use tokio::net::TcpListener;

/// Binds a listener on an ephemeral loopback port.
pub async fn listen() -> (TcpListener, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    (listener, port)
}

/// Finds `p` such that `p` and `p + 2` are listening and `p + 1` is free.
pub async fn listen_with_gap() -> (TcpListener, TcpListener, u16) {
    for _ in 0..64 {
        let (first, port) = listen().await;
        let Some(third_port) = port.checked_add(2) else {
            continue;
        };
        let Ok(third) = TcpListener::bind(("127.0.0.1", third_port)).await else {
            continue;
        };
        // The gap must be bindable, i.e. nothing listens there.
        if TcpListener::bind(("127.0.0.1", port + 1)).await.is_err() {
            continue;
        }
        return (first, third, port);
    }
    panic!("could not find three adjacent loopback ports");
}

/// Writes `contents` to a temporary host file.
pub fn host_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// The report as a set of lines, ignoring completion order.
pub fn lines(report: &str) -> BTreeSet<String> {
    report.lines().map(str::to_string).collect()
}
