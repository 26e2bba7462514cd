//! Smoke tests for the `hoproute-node` binary.

use std::process::{Command, Stdio};

#[cfg(unix)]
#[test]
fn binary_starts_and_stops_cleanly() {
    use std::io::Write;

    let bin = env!("CARGO_BIN_EXE_hoproute-node");

    let mut table_file = tempfile::NamedTempFile::new().unwrap();
    table_file
        .write_all(b"10.0.0.0/30 5000 5005 192.168.1.1 6000\n")
        .unwrap();
    table_file.flush().unwrap();

    let child = Command::new(bin)
        .args([
            "127.0.0.1",
            "0",
            table_file.path().to_str().unwrap(),
        ])
        .env("RUST_LOG", "info")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn hoproute-node");

    let pid = child.id();

    // Give it time to bind and start the receive loop
    std::thread::sleep(std::time::Duration::from_millis(500));

    // Send SIGINT
    Command::new("kill")
        .args(["-INT", &pid.to_string()])
        .status()
        .expect("failed to send SIGINT");

    // Wait with a safety timeout — spawn a thread that kills after 5s
    let pid_for_guard = pid;
    let guard = std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_secs(5));
        let _ = Command::new("kill")
            .args(["-9", &pid_for_guard.to_string()])
            .status();
    });

    let output = child.wait_with_output().expect("failed to wait on child");

    drop(guard);

    assert!(
        output.status.success(),
        "expected exit code 0, got {:?}",
        output.status.code()
    );
}

#[test]
fn wrong_argument_count_exits_before_binding() {
    let bin = env!("CARGO_BIN_EXE_hoproute-node");

    // Missing the routing table file argument.
    let output = Command::new(bin)
        .args(["127.0.0.1", "5000"])
        .output()
        .expect("failed to run hoproute-node");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ROUTING_TABLE_FILE"),
        "expected a usage error naming the missing argument, got: {stderr}"
    );
}

#[test]
fn non_numeric_port_argument_is_rejected() {
    let bin = env!("CARGO_BIN_EXE_hoproute-node");

    let output = Command::new(bin)
        .args(["127.0.0.1", "notaport", "/tmp/table"])
        .output()
        .expect("failed to run hoproute-node");

    assert!(!output.status.success());
}
