use tfcheck_types::CheckResult;

/// Substrings of the per-resource progress lines terraform prints while it
/// refreshes state before planning.
pub const REFRESH_NOISE_MARKERS: [&str; 3] = [
    ": Refreshing state...",
    ": Reading...",
    ": Read complete after",
];

fn is_refresh_noise(line: &str) -> bool {
    REFRESH_NOISE_MARKERS.iter().any(|m| line.contains(m))
}

/// Drop state-refresh progress lines. Kept lines are copied byte-for-byte,
/// line terminators included.
pub fn filter_refresh_noise(output: &str) -> String {
    output
        .split_inclusive('\n')
        .filter(|line| !is_refresh_noise(line))
        .collect()
}

/// Apply [`filter_refresh_noise`] to the plan output of `result`.
pub fn strip_refresh_noise(result: &mut CheckResult) {
    result.plan_output = filter_refresh_noise(&result.plan_output);
}
