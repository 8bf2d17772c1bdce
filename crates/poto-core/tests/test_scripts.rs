#[allow(dead_code)]
mod common;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use common::{fit, single_night, write_dataset, ScriptedPrompter, FLAT_H, LIGHT_H};
use poto_core::error::PotoError;
use poto_core::pipeline::{prepare_project, PrepareOutcome, PrepareRequest};
use poto_core::scripts::{
    find_generated_scripts, generate_scripts, generated_script_name, render_template,
    run_scripts, template_has_placeholders, ScriptPaths,
};

const TEMPLATE: &str = "cd {{cwd}}\n\
    convert bias -out={{masters}} < {{biases}}\n\
    convert flat -out={{process}} < {{flats}}\n\
    convert dark < {{darks}}\n\
    convert light < {{lights}}\n";

/// Prepare a project from `names` and write the template next to it.
fn prepared_project(tmp: &TempDir, names: &[String]) -> (PathBuf, PathBuf) {
    let input = tmp.path().join("input");
    let project = tmp.path().join("project");
    write_dataset(&input, names);

    let request = PrepareRequest {
        inputs: vec![input],
        project_dir: project.clone(),
        default_tolerance_c: 3.0,
    };
    let outcome = prepare_project(&request, &mut ScriptedPrompter::new(), |_| {}).unwrap();
    assert!(matches!(outcome, PrepareOutcome::Dispatched { .. }));

    let template = tmp.path().join("template.ssf");
    fs::write(&template, TEMPLATE).unwrap();
    (project, template)
}

fn sample_paths(project: &Path) -> ScriptPaths {
    ScriptPaths {
        cwd: project.to_path_buf(),
        lights: PathBuf::from("H/Light"),
        flats: PathBuf::from("H/Flat"),
        darks: PathBuf::from("any/Dark"),
        biases: PathBuf::from("any/Bias"),
        process: PathBuf::from("H/L_process"),
        masters: PathBuf::from("H/L_masters"),
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[test]
fn test_placeholder_detection() {
    assert!(template_has_placeholders(TEMPLATE));
    assert!(template_has_placeholders("stack {{lights}}"));
    assert!(!template_has_placeholders("requires 1.2.0\n{lights}\n"));
}

#[test]
fn test_render_substitutes_every_occurrence() {
    let paths = sample_paths(Path::new("/projects/m31"));
    let script = render_template("{{lights}} {{lights}} {{masters}} {{unknown}}", &paths);
    assert_eq!(script, "H/Light H/Light H/L_masters {{unknown}}");
}

#[test]
fn test_script_name_keeps_template_name() {
    assert_eq!(
        generated_script_name(Path::new("/templates/mono.ssf")),
        "poto_mono.ssf"
    );
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

#[test]
fn test_generate_one_script_per_layer_set() {
    let tmp = TempDir::new().unwrap();
    let (project, template) = prepared_project(&tmp, &single_night());

    let scripts = generate_scripts(&project, &template).unwrap();

    let process = project.join("H").join("Light_60.0s_Bin1_H_gain100_process");
    assert_eq!(scripts, vec![process.join("poto_template.ssf")]);
    assert!(project
        .join("H")
        .join("Light_60.0s_Bin1_H_gain100_masters")
        .is_dir());

    let script = fs::read_to_string(&scripts[0]).unwrap();
    assert!(!script.contains("{{"));
    assert!(script.contains(&format!("cd {}", project.display())));
    assert!(script.contains(&format!(
        "convert light < {}",
        Path::new("H").join("Light_60.0s_Bin1_H_gain100").display()
    )));
    assert!(script.contains(&format!(
        "convert dark < {}",
        Path::new("any").join("Dark_60.0s_Bin1_gain100").display()
    )));
    assert!(script.contains(&format!(
        "convert flat -out={} < {}",
        Path::new("H").join("Light_60.0s_Bin1_H_gain100_process").display(),
        Path::new("H").join("Flat_810.0ms_Bin1_H_gain0").display()
    )));

    assert_eq!(find_generated_scripts(&project, &template).unwrap(), scripts);
}

#[test]
fn test_generate_rejects_set_without_darks() {
    let tmp = TempDir::new().unwrap();
    let (project, template) = prepared_project(
        &tmp,
        &[
            format!("Light/{}", fit(LIGHT_H, "20240707-002348", "-10.0C", 1)),
            format!("Flat/{}", fit(FLAT_H, "20240707-102251", "-9.9C", 1)),
        ],
    );

    let err = generate_scripts(&project, &template).unwrap_err();
    assert!(matches!(err, PotoError::Inconsistent(_)));
    assert!(find_generated_scripts(&project, &template).unwrap().is_empty());
}

#[test]
fn test_generate_without_project_fails() {
    let tmp = TempDir::new().unwrap();
    let template = tmp.path().join("template.ssf");
    fs::write(&template, TEMPLATE).unwrap();

    let err = generate_scripts(tmp.path(), &template).unwrap_err();
    assert!(matches!(err, PotoError::Io(_)));
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn test_run_scripts_counts_successes() {
    let tmp = TempDir::new().unwrap();
    let (project, template) = prepared_project(&tmp, &single_night());
    generate_scripts(&project, &template).unwrap();

    assert_eq!(run_scripts(&project, &template, "true").unwrap(), 1);
}

#[cfg(unix)]
#[test]
fn test_run_scripts_stops_on_failure() {
    let tmp = TempDir::new().unwrap();
    let (project, template) = prepared_project(&tmp, &single_night());
    generate_scripts(&project, &template).unwrap();

    let err = run_scripts(&project, &template, "false").unwrap_err();
    match err {
        PotoError::ScriptFailed { script, .. } => {
            assert!(script.ends_with("poto_template.ssf"));
        }
        other => panic!("expected a script failure, got {other:?}"),
    }
}

#[test]
fn test_run_without_scripts_does_nothing() {
    let tmp = TempDir::new().unwrap();
    let (project, template) = prepared_project(&tmp, &single_night());

    assert_eq!(
        run_scripts(&project, &template, "no-such-stacker").unwrap(),
        0
    );
}
