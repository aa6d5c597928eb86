mod support;

use std::fs;
use std::path::PathBuf;

use tempfile::tempdir;

use support::{closed_port_url, run_reqtime, spawn_http_server_or_skip};

fn chart_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("charts").join("graph.png")
}

fn describe(output: &std::process::Output) -> String {
    format!(
        "status: {}\nstdout: {}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn e2e_text_output_and_chart() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(200)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let chart = chart_path(&dir);

    let output = run_reqtime([
        "-u".to_owned(),
        url,
        "-n".to_owned(),
        "8".to_owned(),
        "-c".to_owned(),
        "3".to_owned(),
        "--token".to_owned(),
        "secret".to_owned(),
        "-o".to_owned(),
        chart.to_string_lossy().into_owned(),
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Requests: 8",
        "AverageRequestTime = ",
        "MaxRequestTime = ",
        "MinRequestTime = ",
    ] {
        if !stdout.contains(expected) {
            return Err(format!("missing '{}' in stdout: {}", expected, stdout));
        }
    }
    let samples_line = stdout
        .lines()
        .find(|line| line.starts_with('['))
        .ok_or_else(|| format!("missing samples line: {}", stdout))?;
    if samples_line.split(',').count() != 8 {
        return Err(format!("expected 8 samples, got: {}", samples_line));
    }

    let bytes = fs::read(&chart).map_err(|err| format!("read chart failed: {}", err))?;
    if !bytes.starts_with(b"\x89PNG") {
        return Err("chart is not a PNG".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_json_report() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(200)? else {
        return Ok(());
    };

    let output = run_reqtime([
        "-u",
        url.as_str(),
        "-n",
        "4",
        "--no-chart",
        "--output-format",
        "json",
        "-s",
        "200",
    ])?;
    if !output.status.success() {
        return Err(describe(&output));
    }

    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("stdout is not JSON: {}", err))?;
    let samples = report
        .get("samples_ms")
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| format!("missing samples_ms: {}", report))?;
    if samples.len() != 4 {
        return Err(format!("expected 4 samples, got {}", samples.len()));
    }
    let count = report
        .get("summary")
        .and_then(|summary| summary.get("count"))
        .and_then(serde_json::Value::as_u64);
    if count != Some(4) {
        return Err(format!("unexpected summary: {}", report));
    }
    Ok(())
}

#[test]
fn e2e_unreachable_endpoint_fails_without_chart() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let chart = chart_path(&dir);
    let url = closed_port_url()?;

    let output = run_reqtime([
        "-u".to_owned(),
        url,
        "-n".to_owned(),
        "5".to_owned(),
        "--timeout".to_owned(),
        "2s".to_owned(),
        "-o".to_owned(),
        chart.to_string_lossy().into_owned(),
    ])?;
    if output.status.success() {
        return Err(format!("expected failure\n{}", describe(&output)));
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    let names_request = stderr
        .lines()
        .any(|line| line.contains("Request ") && line.contains(" failed"));
    if !names_request {
        return Err(format!("failing request not reported\n{}", describe(&output)));
    }
    if chart.exists() {
        return Err("chart must not be written after a failed run".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_unexpected_status_fails() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(500)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let chart = chart_path(&dir);

    let output = run_reqtime([
        "-u".to_owned(),
        url,
        "-n".to_owned(),
        "3".to_owned(),
        "-s".to_owned(),
        "200".to_owned(),
        "-o".to_owned(),
        chart.to_string_lossy().into_owned(),
    ])?;
    if output.status.success() {
        return Err(format!("expected failure\n{}", describe(&output)));
    }
    if chart.exists() {
        return Err("chart must not be written after a failed run".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_target() -> Result<(), String> {
    let Some((url, _server)) = spawn_http_server_or_skip(200)? else {
        return Ok(());
    };
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let config_path = dir.path().join("reqtime.toml");
    let config = format!(
        "url = \"{}\"\nrequests = 3\nconcurrency = 2\nno_chart = true\noutput_format = \"json\"\n",
        url
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;

    let output = run_reqtime(["--config".to_owned(), config_path.to_string_lossy().into_owned()])?;
    if !output.status.success() {
        return Err(describe(&output));
    }
    let report: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|err| format!("stdout is not JSON: {}", err))?;
    let samples = report
        .get("samples_ms")
        .and_then(serde_json::Value::as_array)
        .map(Vec::len);
    if samples != Some(3) {
        return Err(format!("unexpected report: {}", report));
    }
    Ok(())
}
