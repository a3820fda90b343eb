//! Runs the `journey` binary as a child process to check how the stdin host
//! ends.

use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

fn spawn_host() -> Child {
    Command::new(env!("CARGO_BIN_EXE_journey"))
        .env("RUST_LOG", "ERROR")
        .env("AMBIENT_AUDIO", "off")
        .env("JOURNEY_LANGUAGE", "en")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("journey binary starts")
}

fn wait_for_exit(child: &mut Child, limit: Duration) -> Option<ExitStatus> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait().expect("child status") {
            return Some(status);
        }
        if Instant::now() >= deadline {
            return None;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn host_exits_after_leave_while_stdin_stays_open() {
    let mut child = spawn_host();
    let mut stdin = child.stdin.take().expect("piped stdin");
    writeln!(stdin, r#"{{"type":"leave"}}"#).unwrap();
    stdin.flush().unwrap();

    let status = wait_for_exit(&mut child, Duration::from_secs(5));
    drop(stdin);
    let Some(status) = status else {
        child.kill().ok();
        panic!("host kept running after the visitor left");
    };
    assert!(status.success());
}

#[test]
fn malformed_lines_are_skipped() {
    let mut child = spawn_host();
    let mut stdin = child.stdin.take().expect("piped stdin");
    writeln!(stdin, "not json").unwrap();
    writeln!(stdin, r#"{{"type":"start_consultation"}}"#).unwrap();
    writeln!(stdin, r#"{{"type":"leave"}}"#).unwrap();
    stdin.flush().unwrap();

    let status = wait_for_exit(&mut child, Duration::from_secs(5));
    drop(stdin);
    let Some(status) = status else {
        child.kill().ok();
        panic!("host kept running after the visitor left");
    };
    assert!(status.success());
}
