//! Problem view

use crate::constants::MAX_SAMPLE_TEST_CASES;
use crate::models::{Contest, Problem};

/// Problem tabs followed by the selected problem
pub fn render_problem_view(contest: &Contest, selected: Option<&Problem>) -> String {
    let mut out = String::new();

    let tabs: Vec<String> = contest
        .problems
        .iter()
        .map(|p| {
            if selected.is_some_and(|s| s.id == p.id) {
                format!("[{}]", p.title)
            } else {
                format!(" {} ", p.title)
            }
        })
        .collect();
    out.push_str(&format!("Problems: {}\n", tabs.join(" ")));

    if let Some(problem) = selected {
        out.push('\n');
        out.push_str(&render_problem(problem));
    }

    out
}

/// Title, difficulty, statement and sample test cases
pub fn render_problem(problem: &Problem) -> String {
    let mut out = String::new();

    match problem.difficulty {
        Some(difficulty) => {
            out.push_str(&format!("{} ({})\n", problem.title, difficulty));
        }
        None => {
            out.push_str(&problem.title);
            out.push('\n');
        }
    }
    out.push_str(&format!("\n{}\n", problem.description));

    let samples = problem.samples(MAX_SAMPLE_TEST_CASES);
    if !samples.is_empty() {
        out.push_str("\nSample Test Cases\n");
        for (index, case) in samples.iter().enumerate() {
            out.push_str(&format!("\n#{}\n", index + 1));
            out.push_str(&format!("Input:\n{}\n", case.input_data));
            out.push_str(&format!("Output:\n{}\n", case.expected_output));
        }
    }

    out
}
