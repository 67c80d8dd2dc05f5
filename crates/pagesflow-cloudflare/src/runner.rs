//! tokio-backed process runner

use async_trait::async_trait;
use pagesflow_core::{Invocation, ProcessOutput, ProcessRunner, RunError};
use std::process::Stdio;
use tokio::process::Command;

/// Runs invocations as real child processes
///
/// stdout and stderr are captured in full and joined (stdout first). On
/// Unix the child leads its own process group. When the invocation's
/// timeout expires, or Ctrl-C arrives, the whole group is killed so that
/// processes the tool started itself (npx → node) stop with it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

impl TokioRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ProcessOutput, RunError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd.envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        tracing::debug!("Spawning: {}", invocation.command_line());

        let child = cmd.spawn().map_err(|source| RunError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;
        let pid = child.id();

        let deadline = async {
            match invocation.timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };

        // Returning early drops the wait future, which kills the child (kill_on_drop)
        let result = tokio::select! {
            result = child.wait_with_output() => result,
            _ = deadline => {
                kill_process_group(pid);
                let after = invocation.timeout.unwrap_or_default();
                tracing::warn!("{} timed out after {}s", invocation.program, after.as_secs());
                return Err(RunError::Timeout {
                    program: invocation.program.clone(),
                    after,
                });
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                kill_process_group(pid);
                tracing::warn!("{} interrupted", invocation.program);
                return Err(RunError::Interrupted {
                    program: invocation.program.clone(),
                });
            }
        };

        let output = result.map_err(|source| RunError::Wait {
            program: invocation.program.clone(),
            source,
        })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(ProcessOutput::new(output.status.code(), combined))
    }
}

/// Kill the process group led by `pid`
#[cfg(unix)]
fn kill_process_group(pid: Option<u32>) {
    let Some(pgid) = pid.and_then(|pid| libc::pid_t::try_from(pid).ok()) else {
        return;
    };
    // SAFETY: killpg only sends a signal; the group was created for this child
    let ret = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if ret != 0 {
        tracing::debug!(
            "killpg({}) failed: {}",
            pgid,
            std::io::Error::last_os_error()
        );
    }
}

/// The wait future's drop kills the direct child (kill_on_drop)
#[cfg(not(unix))]
fn kill_process_group(_pid: Option<u32>) {}
