use std::io;
use std::process::{Command, Stdio};
use tracing::debug;

/// Open `url` with the platform's default handler without waiting for it
pub fn open_url(url: &str) -> io::Result<()> {
    #[cfg(target_os = "macos")]
    let cmd = "open";
    #[cfg(not(target_os = "macos"))]
    let cmd = "xdg-open";

    debug!("Opening {} with {}", url, cmd);
    let mut child = Command::new(cmd)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    // reap in the background so the opener never becomes a zombie
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    Ok(())
}
