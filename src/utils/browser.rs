//! Launching the system browser for the API key console.

use std::error::Error;

pub fn open_url(url: &str) -> Result<(), Box<dyn Error>> {
    #[cfg(target_os = "macos")]
    {
        let status = std::process::Command::new("open").arg(url).status()?;
        if status.success() {
            return Ok(());
        }
        return Err("failed to launch browser with open".into());
    }
    #[cfg(target_os = "windows")]
    {
        let status = std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .status()?;
        if status.success() {
            return Ok(());
        }
        return Err("failed to launch browser with start".into());
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        let status = std::process::Command::new("xdg-open").arg(url).status()?;
        if status.success() {
            return Ok(());
        }
        return Err("failed to launch browser with xdg-open".into());
    }

    #[allow(unreachable_code)]
    Err(format!("no browser launcher configured for URL: {url}").into())
}
