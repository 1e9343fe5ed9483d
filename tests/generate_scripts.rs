use std::fs;
use std::path::Path;

use launch_debug_tools::generator::{generate_scripts, GenerateOptions};
use launch_debug_tools::{ScriptError, ScriptFamily};

fn workspace(launch_json: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join(".vscode")).unwrap();
    fs::write(dir.path().join(".vscode/launch.json"), launch_json).unwrap();
    dir
}

fn read(root: &Path, name: &str) -> String {
    fs::read_to_string(root.join("debug-scripts").join(name)).unwrap()
}

const MIXED: &str = r#"{
    "version": "0.2.0",
    "configurations": [
        {
            "name": "Attach Board",
            "type": "cppdbg",
            "program": "${workspaceFolder}/bin/app",
            "miDebuggerPath": "arm-none-eabi-gdb",
            "args": ["-q", "--nx"]
        },
        {
            "name": "Flash Board",
            "type": "cortex-debug",
            "executable": "${workspaceFolder}/build/fw.elf",
            "cwd": "${workspaceFolder}",
            "configFiles": ["interface/stlink.cfg", "target/stm32f4x.cfg"],
            "svdFile": "${workspaceFolder}/STM32F407.svd"
        },
        {
            "name": "Broken",
            "miDebuggerPath": "gdb"
        }
    ]
}"#;

#[test]
fn missing_launch_json_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_scripts(dir.path(), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, ScriptError::ConfigNotFound(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn empty_configuration_list_creates_nothing() {
    let dir = workspace(r#"{ "version": "0.2.0", "configurations": [] }"#);
    let err = generate_scripts(dir.path(), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, ScriptError::EmptyConfigurationList));
    assert!(!dir.path().join("debug-scripts").exists());
}

#[test]
fn each_configuration_gets_its_family() {
    let dir = workspace(MIXED);
    let root = dir.path();
    let report = generate_scripts(root, &GenerateOptions::default()).unwrap();

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.written().count(), 3);

    let direct = read(root, "Attach_Board_attach.sh");
    assert!(direct.starts_with("#!/bin/bash\n"));
    assert!(direct.contains(&format!(
        "--eval-command=\"file {}/bin/app\"",
        root.display()
    )));
    assert_eq!(direct.lines().last().unwrap(), "    -q --nx");

    let openocd = read(root, "Flash_Board_openocd.sh");
    assert!(openocd.ends_with(&format!(
        "cd {} && openocd -f interface/stlink.cfg -f target/stm32f4x.cfg\n",
        root.display()
    )));

    let gdb = read(root, "Flash_Board_gdb.sh");
    assert!(gdb.contains(&format!(
        "-ex \"set tdesc filename {}/STM32F407.svd\"",
        root.display()
    )));
    assert!(gdb.contains("-ex \"break main\""));
}

#[test]
fn one_bad_configuration_does_not_stop_the_rest() {
    let dir = workspace(MIXED);
    let report = generate_scripts(dir.path(), &GenerateOptions::default()).unwrap();

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "Broken");
    assert!(matches!(
        failures[0].result,
        Err(ScriptError::MissingField { field: "program", .. })
    ));
    assert!(!dir.path().join("debug-scripts/Broken_attach.sh").exists());
}

#[test]
fn entries_without_a_name_are_skipped() {
    let dir = workspace(
        r#"{ "configurations": [
            { "program": "a.elf", "miDebuggerPath": "gdb" },
            { "name": "Good", "program": "a.elf", "miDebuggerPath": "gdb" }
        ] }"#,
    );
    let report = generate_scripts(dir.path(), &GenerateOptions::default()).unwrap();
    assert_eq!(report.failures().count(), 1);
    assert_eq!(report.outcomes[0].name, "configuration #1");
    assert!(dir.path().join("debug-scripts/Good_attach.sh").exists());
}

#[test]
fn forced_family_overrides_selection() {
    let dir = workspace(MIXED);
    let options = GenerateOptions {
        family: Some(ScriptFamily::OpenOcd),
        ..GenerateOptions::default()
    };
    generate_scripts(dir.path(), &options).unwrap();
    assert!(dir.path().join("debug-scripts/Attach_Board_gdb.sh").exists());
    assert!(dir.path().join("debug-scripts/Attach_Board_openocd.sh").exists());
    assert!(!dir.path().join("debug-scripts/Attach_Board_attach.sh").exists());
}

#[test]
fn direct_and_openocd_names_do_not_collide() {
    let dir = workspace(
        r#"{ "configurations": [
            { "name": "Board_gdb", "program": "a.elf", "miDebuggerPath": "gdb" },
            { "name": "Board", "program": "a.elf", "configFiles": ["board.cfg"] }
        ] }"#,
    );
    let report = generate_scripts(dir.path(), &GenerateOptions::default()).unwrap();
    assert_eq!(report.failures().count(), 0);

    let mut names: Vec<String> = report
        .written()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        ["Board_gdb.sh", "Board_gdb_attach.sh", "Board_openocd.sh"]
    );
    assert!(read(dir.path(), "Board_gdb_attach.sh").contains("--eval-command"));
    assert!(read(dir.path(), "Board_gdb.sh").contains("-ex \"load\""));
}

#[test]
fn clashing_stems_fail_the_later_configuration() {
    let dir = workspace(
        r#"{ "configurations": [
            { "name": "A B", "program": "first.elf", "miDebuggerPath": "gdb" },
            { "name": "A_B", "program": "second.elf", "miDebuggerPath": "gdb" }
        ] }"#,
    );
    let report = generate_scripts(dir.path(), &GenerateOptions::default()).unwrap();

    assert_eq!(report.written().count(), 1);
    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "A_B");
    match &failures[0].result {
        Err(ScriptError::DuplicateScript { file, claimed_by }) => {
            assert_eq!(file, "A_B_attach.sh");
            assert_eq!(claimed_by, "A B");
        }
        other => panic!("expected DuplicateScript, got {:?}", other),
    }
    // The first configuration's script is left untouched
    assert!(read(dir.path(), "A_B_attach.sh").contains("file first.elf"));
}

#[test]
fn rerun_is_byte_identical() {
    let dir = workspace(MIXED);
    let root = dir.path();
    generate_scripts(root, &GenerateOptions::default()).unwrap();
    let first: Vec<(String, Vec<u8>)> = snapshot(&root.join("debug-scripts"));
    generate_scripts(root, &GenerateOptions::default()).unwrap();
    let second = snapshot(&root.join("debug-scripts"));
    assert_eq!(first, second);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        for (name, _) in &second {
            let mode = fs::metadata(root.join("debug-scripts").join(name))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755, "{}", name);
        }
    }
}

fn snapshot(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}
