use std::{env, process::Command};

const FIRECRAWL_DEFAULT_ENDPOINT: &str = "https://api.firecrawl.dev";

fn main() {
    println!("cargo:rerun-if-env-changed=FIRECRAWL_API_KEY");
    println!("cargo:rerun-if-env-changed=FIRECRAWL_API_URL");

    check_required_env("FIRECRAWL_API_KEY");
    let endpoint = optional_env("FIRECRAWL_API_URL");

    // Warnings only; a build never fails on an unreachable API.
    check_firecrawl_connectivity(endpoint.as_deref().unwrap_or(FIRECRAWL_DEFAULT_ENDPOINT));
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

fn check_required_env(key: &str) {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => {
            println!("cargo:warning={} environment variable is set but empty", key);
        }
        Ok(_) => {}
        Err(_) => {
            println!(
                "cargo:warning={} environment variable is not set; the server will refuse to start without it",
                key
            );
        }
    }
}

fn check_firecrawl_connectivity(target: &str) {
    match curl_status_code(target) {
        Ok(code) if code == "000" => {
            println!(
                "cargo:warning=Firecrawl endpoint is unreachable ({}), curl returned status code 000",
                target
            );
        }
        Ok(_) => {}
        Err(reason) => {
            println!(
                "cargo:warning=Failed to check Firecrawl endpoint ({}): {}",
                target, reason
            );
        }
    }
}

fn curl_status_code(url: &str) -> Result<String, String> {
    let output = Command::new("curl")
        .args([
            "--silent",
            "--show-error",
            "--location",
            "--max-time",
            "5",
            "--output",
            "/dev/null",
            "--write-out",
            "%{http_code}",
        ])
        .arg(url)
        .output()
        .map_err(|err| format!("unable to execute curl (is it installed and in PATH?): {}", err))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "curl exited with status {:?}: {}",
            output.status.code(),
            stderr.trim()
        ));
    }

    let code = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if code.is_empty() {
        return Err("curl produced empty status code".to_string());
    }

    Ok(code)
}
