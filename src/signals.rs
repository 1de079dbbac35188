//! Process signals (SIGINT, SIGTERM) turned into a flag the refresh loop
//! polls, so the terminal is restored on the normal exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use tracing::info;

/// Raised once a shutdown signal arrives; never lowered
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Listen for SIGINT/SIGTERM (Ctrl+C on Windows) on a background thread and
/// raise `flag` when one arrives. Handlers are registered before this
/// returns, so a signal sent right afterwards is not lost.
pub fn install(flag: ShutdownFlag) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start signal listener")?;

    #[cfg(unix)]
    let (mut interrupt, mut terminate) = {
        use tokio::signal::unix::{signal, SignalKind};
        let _guard = runtime.enter();
        (
            signal(SignalKind::interrupt()).context("cannot listen for SIGINT")?,
            signal(SignalKind::terminate()).context("cannot listen for SIGTERM")?,
        )
    };

    thread::Builder::new()
        .name("signals".into())
        .spawn(move || {
            runtime.block_on(async move {
                #[cfg(unix)]
                tokio::select! {
                    _ = interrupt.recv() => info!("SIGINT received"),
                    _ = terminate.recv() => info!("SIGTERM received"),
                }

                #[cfg(not(unix))]
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "cannot listen for Ctrl+C");
                    return;
                }

                flag.raise();
            })
        })
        .context("cannot spawn signal listener")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn flag_is_shared_between_clones() {
        let flag = ShutdownFlag::new();
        let seen_by_loop = flag.clone();
        assert!(!seen_by_loop.is_raised());
        flag.raise();
        assert!(seen_by_loop.is_raised());
    }

    #[cfg(unix)]
    #[test]
    fn sigterm_raises_the_flag() {
        let flag = ShutdownFlag::new();
        install(flag.clone()).unwrap();

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        let deadline = Instant::now() + Duration::from_secs(5);
        while !flag.is_raised() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(flag.is_raised());
    }
}
