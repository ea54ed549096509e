//! Integration tests for the `tarot` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FALLBACK: &str = "The connection to the stars was disturbed";

fn tarot() -> Command {
    let mut cmd = Command::cargo_bin("tarot").unwrap();
    cmd.env_remove("TAROT_API_KEY").env_remove("TAROT_LOG");
    cmd
}

fn card_ids(json: &serde_json::Value) -> Vec<u64> {
    json["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect()
}

fn read_json(args: &[&str]) -> serde_json::Value {
    let output = tarot()
        .args(["read", "--offline", "--json"])
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// ---------------------------------------------------------------------------
// spreads
// ---------------------------------------------------------------------------

#[test]
fn spreads_lists_built_ins() {
    tarot()
        .arg("spreads")
        .assert()
        .success()
        .stdout(predicate::str::contains("single"))
        .stdout(predicate::str::contains("three-card"))
        .stdout(predicate::str::contains("Celtic Cross"))
        .stdout(predicate::str::contains("3 spreads"));
}

// ---------------------------------------------------------------------------
// cards
// ---------------------------------------------------------------------------

#[test]
fn cards_lists_whole_deck() {
    tarot()
        .arg("cards")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Fool"))
        .stdout(predicate::str::contains("King of Pentacles"))
        .stdout(predicate::str::contains("78 cards"));
}

#[test]
fn cards_major_only() {
    tarot()
        .args(["cards", "--major"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The World"))
        .stdout(predicate::str::contains("22 cards"))
        .stdout(predicate::str::contains("Ace of Cups").not());
}

#[test]
fn cards_by_suit() {
    tarot()
        .args(["cards", "--suit", "cups"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Queen of Cups"))
        .stdout(predicate::str::contains("14 cards"))
        .stdout(predicate::str::contains("The Fool").not());
}

#[test]
fn cards_unknown_suit_fails() {
    tarot()
        .args(["cards", "--suit", "crowns"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown suit"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_card_by_english_name() {
    tarot()
        .args(["show", "the star"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Star"))
        .stdout(predicate::str::contains("星星"))
        .stdout(predicate::str::contains("Upright"))
        .stdout(predicate::str::contains("Reversed"));
}

#[test]
fn show_card_by_chinese_name() {
    tarot()
        .args(["show", "星币国王"])
        .assert()
        .success()
        .stdout(predicate::str::contains("King of Pentacles"))
        .stdout(predicate::str::contains("Earth"));
}

#[test]
fn show_unknown_card_suggests() {
    tarot()
        .args(["show", "The Magican"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("card not found"))
        .stderr(predicate::str::contains("The Magician"));
}

// ---------------------------------------------------------------------------
// read
// ---------------------------------------------------------------------------

#[test]
fn read_reveal_all_offline_shows_fallback() {
    tarot()
        .args(["read", "--offline", "--reveal-all", "--spread", "three-card"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Past influence"))
        .stdout(predicate::str::contains("Present situation"))
        .stdout(predicate::str::contains("Future trend"))
        .stdout(predicate::str::contains(FALLBACK));
}

#[test]
fn read_unknown_spread_fails() {
    tarot()
        .args(["read", "--offline", "--spread", "pentagram"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pentagram"));
}

#[test]
fn read_json_snapshot() {
    let json = read_json(&["--spread", "celtic-cross", "--seed", "7"]);
    assert_eq!(json["phase"], "complete");
    assert_eq!(json["spread"]["kind"], "celtic-cross");
    assert_eq!(json["narrative"]["status"], "failed");

    let cards = json["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 10);
    for (i, card) in cards.iter().enumerate() {
        assert_eq!(card["position_index"], i);
        assert_eq!(card["is_revealed"], true);
    }

    let mut ids = card_ids(&json);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
}

#[test]
fn read_seed_is_reproducible() {
    let a = read_json(&["--seed", "42"]);
    let b = read_json(&["--seed", "42"]);
    assert_eq!(card_ids(&a), card_ids(&b));
    assert_ne!(a["id"], b["id"]);
}

#[test]
fn read_reversal_chance_zero_is_all_upright() {
    let json = read_json(&["--spread", "celtic-cross", "--reversal-chance", "0"]);
    for card in json["cards"].as_array().unwrap() {
        assert_eq!(card["is_reversed"], false);
    }
}

#[test]
fn read_output_writes_snapshot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reading.json");

    tarot()
        .args(["read", "--offline", "--reveal-all", "--spread", "single", "--output"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    let content = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["spread"]["kind"], "single");
    assert_eq!(json["cards"].as_array().unwrap().len(), 1);
}

#[test]
fn read_interactive_flips_to_completion() {
    tarot()
        .args(["read", "--offline", "--spread", "three-card", "--seed", "3"])
        .write_stdin("flip 2\nflip 2\nflip 1\nflip 3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(face down)"))
        .stdout(predicate::str::contains("already face up"))
        .stdout(predicate::str::contains(FALLBACK));
}

#[test]
fn read_interactive_status_and_help() {
    tarot()
        .args(["read", "--offline", "--spread", "single"])
        .write_stdin("help\nstatus\nflip 9\nall\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("reveal every remaining card"))
        .stdout(predicate::str::contains("synthesis:"))
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains(FALLBACK));
}

#[test]
fn read_interactive_quit_leaves_unfinished() {
    tarot()
        .args(["read", "--offline"])
        .write_stdin("flip 1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("left unfinished"))
        .stdout(predicate::str::contains(FALLBACK).not());
}

#[test]
fn read_interactive_eof_leaves_unfinished() {
    tarot()
        .args(["read", "--offline"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("left unfinished"));
}
