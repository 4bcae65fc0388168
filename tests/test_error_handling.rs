/// Error handling tests for malformed and invalid inputs
///
/// Tests that the binary fails with clear error messages when given invalid
/// scripts, malformed edge lists, or bad arguments.
use anyhow::Result;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn run_with_file(subcommand: &str, name: &str, contents: &str) -> Result<(bool, String)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(name);
    fs::write(&path, contents)?;

    let output = Command::new(env!("CARGO_BIN_EXE_dsforest"))
        .args([subcommand, path.to_str().unwrap()])
        .output()?;
    Ok((
        output.status.success(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    ))
}

/// Test out-of-range index in a script
#[test]
fn test_script_index_out_of_range() -> Result<()> {
    let (ok, stderr) = run_with_file("run", "bad.txt", "elements 3\nunion 0 3\n")?;
    assert!(!ok, "Out-of-range union should fail");
    assert!(
        stderr.contains("Line 2") && stderr.contains("out of range"),
        "Should name the line and the violation, got: {stderr}"
    );
    Ok(())
}

/// Test that an empty forest rejects any index
#[test]
fn test_script_empty_forest() -> Result<()> {
    let (ok, stderr) = run_with_file("run", "empty.txt", "elements 0\nfind 0\n")?;
    assert!(!ok);
    assert!(stderr.contains("out of range"), "got: {stderr}");
    Ok(())
}

/// Test negative element count
#[test]
fn test_script_negative_elements() -> Result<()> {
    let (ok, stderr) = run_with_file("run", "neg.txt", "elements -4\n")?;
    assert!(!ok);
    assert!(stderr.contains("invalid argument"), "got: {stderr}");
    Ok(())
}

/// Test commands that appear before the forest exists
#[test]
fn test_script_missing_elements() -> Result<()> {
    let (ok, stderr) = run_with_file("run", "noelements.txt", "union 0 1\n")?;
    assert!(!ok);
    assert!(stderr.contains("before 'elements'"), "got: {stderr}");
    Ok(())
}

/// Test unknown command
#[test]
fn test_script_unknown_command() -> Result<()> {
    let (ok, stderr) = run_with_file("run", "unknown.txt", "elements 2\nsplit 0 1\n")?;
    assert!(!ok);
    assert!(stderr.contains("Unrecognised command"), "got: {stderr}");
    Ok(())
}

/// Test edge list line with a single label
#[test]
fn test_edges_single_field() -> Result<()> {
    let (ok, stderr) = run_with_file("components", "edges.txt", "a b\nc\n")?;
    assert!(!ok);
    assert!(stderr.contains("expected two labels"), "got: {stderr}");
    Ok(())
}

/// Test missing input file
#[test]
fn test_missing_file() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_dsforest"))
        .args(["run", "/nonexistent/dsforest/script.txt"])
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open"), "got: {stderr}");
    Ok(())
}

/// Test node counts too large to sample
#[test]
fn test_giant_rejects_huge_node_count() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_dsforest"))
        .args(["giant", "-n", "1000m", "--seed", "1"])
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nodes are supported"), "got: {stderr}");
    Ok(())
}

/// Test fractional node count
#[test]
fn test_giant_rejects_fractional_nodes() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_dsforest"))
        .args(["giant", "-n", "1.5"])
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not a whole number"), "got: {stderr}");
    Ok(())
}

/// Test element count too large to allocate
#[test]
fn test_script_unallocatable_elements() -> Result<()> {
    let (ok, stderr) = run_with_file("run", "huge.txt", "elements 4611686018427387904\n")?;
    assert!(!ok, "Huge element count should fail");
    assert!(stderr.contains("cannot be allocated"), "got: {stderr}");
    assert!(!stderr.contains("panicked"), "Should fail through an error, got: {stderr}");
    Ok(())
}

/// Test invalid probability argument
#[test]
fn test_giant_rejects_bad_probability() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_dsforest"))
        .args(["giant", "-n", "10", "-p", "1.5"])
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("between 0.0 and 1.0"), "got: {stderr}");
    Ok(())
}
