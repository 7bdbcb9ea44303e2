//! Environment readiness check.

use anyhow::Result;

use crate::renderer::chromium::find_chromium;

/// Check that a Chromium binary is available for the scraper.
pub async fn run() -> Result<()> {
    println!("nvdweek Doctor");
    println!("==============");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    let chromium = find_chromium();
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome/Chromium or set NVDWEEK_CHROMIUM_PATH."
        ),
    }

    println!();
    if chromium.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}
