use std::{fs, path::PathBuf};

use tempfile::tempdir;

use mindtree_cli::{Args, OutputFormat, run};

/// Collects all .json files from a directory
fn collect_json_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Demo snapshots live at the workspace root, not in the crate.
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

fn args_for(input: &PathBuf, output: PathBuf, format: OutputFormat) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        format,
        orientation: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_json_files(demos_path());

    assert!(!demos.is_empty(), "No demos found in demos/");

    let mut failed = Vec::new();

    for demo_path in &demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();

        let svg_path = temp_dir.path().join(format!("{stem}.svg"));
        if let Err(e) = run(&args_for(demo_path, svg_path.clone(), OutputFormat::Svg)) {
            failed.push((demo_path.clone(), e));
            continue;
        }
        let svg = fs::read_to_string(&svg_path).expect("SVG was written");
        assert!(svg.contains("<svg"), "{} did not render", demo_path.display());

        let json_path = temp_dir.path().join(format!("{stem}.positioned.json"));
        if let Err(e) = run(&args_for(demo_path, json_path, OutputFormat::Json)) {
            failed.push((demo_path.clone(), e));
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemos that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo(s) failed unexpectedly", failed.len());
    }

    println!("✅ All {} demos passed", demos.len());
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_json_files(demos_path().join("errors"));

    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, output_path, OutputFormat::Svg)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    assert!(
        unexpectedly_succeeded.is_empty(),
        "Error demos that succeeded: {unexpectedly_succeeded:?}"
    );
}

#[test]
fn e2e_json_output_is_deterministic() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("branching.json");
    let first = temp_dir.path().join("first.json");
    let second = temp_dir.path().join("second.json");

    run(&args_for(&input, first.clone(), OutputFormat::Json)).expect("demo lays out");
    run(&args_for(&input, second.clone(), OutputFormat::Json)).expect("demo lays out");

    let first = fs::read_to_string(first).unwrap();
    let second = fs::read_to_string(second).unwrap();
    assert!(first.contains("\"position\""));
    assert_eq!(first, second);
}

#[test]
fn e2e_orientation_override() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("single_question.json");
    let output = temp_dir.path().join("tb.json");

    let mut args = args_for(&input, output.clone(), OutputFormat::Json);
    args.orientation = Some(mindtree::orientation::Orientation::TopToBottom);
    run(&args).expect("demo lays out");

    let json = fs::read_to_string(output).unwrap();
    assert!(json.contains("\"top-to-bottom\""));
}
