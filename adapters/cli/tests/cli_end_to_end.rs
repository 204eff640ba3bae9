use std::{
    fs,
    io::Write,
    process::{Command, Stdio},
};

const CALM_INSTANCE: &str = "\
5 5 3
1 1 1 3
2 2
2 2
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0
";

fn loon() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_loon"));
    let _ = command.env("RUST_LOG", "warn");
    command
}

fn assert_program_shape(program: &str, turns: usize, balloons: usize) {
    let lines: Vec<&str> = program.lines().collect();
    assert_eq!(lines.len(), turns, "program: {program:?}");
    for line in lines {
        let values: Vec<i32> = line
            .split(' ')
            .map(|token| token.parse().expect("integer action"))
            .collect();
        assert_eq!(values.len(), balloons);
        assert!(values.iter().all(|value| (-1..=1).contains(value)));
    }
}

#[test]
fn solves_instance_from_stdin() {
    let mut child = loon()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary starts");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(CALM_INSTANCE.as_bytes())
        .expect("instance written");
    let output = child.wait_with_output().expect("binary finishes");

    assert!(output.status.success(), "{output:?}");
    let program = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_program_shape(&program, 3, 1);
    assert_eq!(program.lines().next(), Some("1"));
}

#[test]
fn writes_program_to_requested_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("calm.in");
    let output = dir.path().join("calm.out");
    let config = dir.path().join("loon.toml");
    fs::write(&input, CALM_INSTANCE).expect("input written");
    fs::write(&config, "seed = 3\njourneys_per_band = 10\n").expect("config written");

    let status = loon()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .status()
        .expect("binary runs");

    assert!(status.success());
    let program = fs::read_to_string(&output).expect("program written");
    assert_program_shape(&program, 3, 1);
}

#[test]
fn equal_seeds_reproduce_output() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("calm.in");
    fs::write(&input, CALM_INSTANCE).expect("input written");

    let run = || {
        let output = loon()
            .arg(&input)
            .args(["--seed", "99", "--journeys", "15"])
            .output()
            .expect("binary runs");
        assert!(output.status.success());
        output.stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn oversized_turns_lag_still_solves() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("fleet.in");
    let fleet = CALM_INSTANCE.replacen("1 1 1 3", "1 1 3 3", 1);
    fs::write(&input, fleet).expect("input written");

    let output = loon()
        .arg(&input)
        .args(["--journeys", "3", "--turns-lag"])
        .arg(usize::MAX.to_string())
        .output()
        .expect("binary runs");

    assert!(output.status.success(), "{output:?}");
    let program = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_program_shape(&program, 3, 3);
    assert!(program.lines().all(|line| line.ends_with(" 0 0")), "{program}");
}

#[test]
fn malformed_input_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("broken.in");
    fs::write(&input, "5 5 3\n1 1 1 3\n2 2\n").expect("input written");

    let output = loon().arg(&input).output().expect("binary runs");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to parse problem instance"), "{stderr}");
}
