use std::process::Command;

fn run(args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_naval-battle"))
        .args(args)
        .env("NAVAL_BATTLE_LOG", "off")
        .output()
        .expect("failed to run naval-battle binary");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    serde_json::from_str(stdout.trim()).expect("invalid json")
}

#[test]
fn duel_binary_smoke() {
    let v = run(&["duel", "--seed", "1", "--size", "10", "--difficulty", "hard"]);
    assert_eq!(v["cleared"], true);
    assert_eq!(v["difficulty"], "hard");
    assert_eq!(v["hits"], 20);
}

#[test]
fn bench_binary_smoke() {
    let v = run(&["bench", "--games", "5", "--seed", "2", "--size", "6", "--difficulty", "easy"]);
    assert_eq!(v["games"], 5);
    assert_eq!(v["cleared"], 5);
    assert!(v["average_shots"].as_f64().unwrap() <= 36.0);
}

#[test]
fn rejects_oversized_board() {
    let output = Command::new(env!("CARGO_BIN_EXE_naval-battle"))
        .args(["duel", "--size", "30"])
        .output()
        .expect("failed to run naval-battle binary");
    assert!(!output.status.success());
}
