use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Run a command to completion, capturing stdout, optionally killing it
/// after `timeout`. The external tools have no hang protection of their
/// own, so without this a stuck recognizer stalls the whole batch.
///
/// Stdout is drained on a helper thread so a chatty child cannot deadlock
/// on a full pipe while we poll for exit.
pub fn run_with_timeout(
    mut command: Command,
    timeout: Option<Duration>,
) -> std::io::Result<ProcessOutput> {
    let mut child = command
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let mut stdout_pipe = child.stdout.take().expect("stdout was piped");
    let reader = std::thread::spawn(move || {
        let mut buf = String::new();
        stdout_pipe.read_to_string(&mut buf).map(|_| buf)
    });

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if timeout.is_some_and(|t| started.elapsed() >= t) {
            child.kill()?;
            child.wait()?;
            // Unblock the reader before reporting.
            let _ = reader.join();
            return Ok(ProcessOutput {
                stdout: String::new(),
                timed_out: true,
                success: false,
            });
        }
        std::thread::sleep(Duration::from_millis(20));
    };

    let stdout = reader
        .join()
        .unwrap_or_else(|_| Ok(String::new()))
        .unwrap_or_default();

    Ok(ProcessOutput {
        stdout,
        timed_out: false,
        success: status.success(),
    })
}

#[derive(Debug)]
pub struct ProcessOutput {
    pub stdout: String,
    pub timed_out: bool,
    pub success: bool,
}
