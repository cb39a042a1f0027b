use roost::steps::{extract, source_fingerprint, StepSnapshot};
use roost::translator::translate;

fn fixture(path: &str) -> String {
    let full = format!("{}/tests/fixtures/{path}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(full).expect("fixture")
}

fn titles(text: &str) -> Vec<String> {
    extract(text).map(|step| step.title).collect()
}

#[test]
fn empty_text_has_no_steps() {
    assert_eq!(extract("").count(), 0);
    assert_eq!(extract("\n\n   \n").count(), 0);
}

#[test]
fn single_action_lines_translate() {
    assert_eq!(
        titles("await page.goto('https://x.com');"),
        vec!["Go to https://x.com"]
    );
    assert_eq!(
        titles("await page.getByRole('button', { name: 'Submit' }).click();"),
        vec!["Click on \"Submit\""]
    );
    assert_eq!(
        titles("await page.getByTestId('user-name').fill('Alice');"),
        vec!["Fill \"Alice\" in user name"]
    );
}

#[test]
fn generated_test_file_yields_steps_in_source_order() {
    let text = fixture("sources/login.spec.ts");
    let steps = extract(&text).collect::<Vec<_>>();
    let titles = steps.iter().map(|s| s.title.as_str()).collect::<Vec<_>>();
    assert_eq!(
        titles,
        vec![
            "Go to https://example.com/login",
            "Fill \"Alice\" in user name",
            "Fill \"hunter2\"",
            "Click on \"Sign in\"",
            "Press Enter key",
            "expect(page.getByText('Welcome')).toBeVisible()",
        ]
    );
    let indices = steps.iter().map(|s| s.line_index).collect::<Vec<_>>();
    assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(steps[0].id, "step-4");
}

#[test]
fn extraction_is_idempotent_and_restartable() {
    let text = fixture("sources/login.spec.ts");
    let lazy = extract(&text);
    let first = lazy.clone().collect::<Vec<_>>();
    let second = lazy.collect::<Vec<_>>();
    let third = extract(&text).collect::<Vec<_>>();
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn step_count_matches_action_line_count() {
    let actions = [
        "await page.goto('https://a.test');",
        "await page.getByText('One').click();",
        "await page.getByLabel('Agree').check();",
        "await page.getByLabel('Size').selectOption('large');",
        "await page.getByText('Menu').hover();",
    ];
    let mut text = String::from("import { test } from '@playwright/test';\n");
    for action in actions {
        text.push_str("  ");
        text.push_str(action);
        text.push_str("\n  // note\n\n");
    }
    text.push_str("});\n");
    let steps = extract(&text).collect::<Vec<_>>();
    assert_eq!(steps.len(), actions.len());
    for (step, action) in steps.iter().zip(actions) {
        assert_eq!(step.raw_line, action);
    }
}

#[test]
fn identical_action_lines_are_kept_as_separate_steps() {
    let text = "await page.getByText('A').click();\nawait page.getByText('A').click();";
    let steps = extract(text).collect::<Vec<_>>();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].title, "Click on \"A\"");
    assert_eq!(steps[1].title, steps[0].title);
    assert_eq!(steps[0].id, "step-0");
    assert_eq!(steps[1].id, "step-1");
}

#[test]
fn unmatched_lines_fall_back_to_cleaned_text() {
    assert_eq!(translate("await page.waitForTimeout(100);"), "page.waitForTimeout(100)");
    assert_eq!(
        titles("await page.mouse.wheel(0, 200);"),
        vec!["page.mouse.wheel(0, 200)"]
    );
}

#[test]
fn snapshot_tracks_text_changes_by_fingerprint() {
    let before = "await page.goto('https://a.test');";
    let after = "await page.goto('https://b.test');";
    let snapshot = StepSnapshot::capture(before);
    assert!(snapshot.is_current_for(before));
    assert!(!snapshot.is_current_for(after));
    assert_eq!(snapshot.fingerprint, source_fingerprint(before));
    assert_eq!(snapshot.fingerprint.len(), 64);
}
