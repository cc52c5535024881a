//! Natural string ordering: embedded digit runs compare numerically, so
//! "Press 2" sorts before "Press 10". Used by the canonical task sort and
//! the resource render order.

use std::cmp::Ordering;

/// Case-insensitive comparison with numeric-aware digit runs.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let av: Vec<char> = a.chars().collect();
    let bv: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0usize, 0usize);

    while i < av.len() && j < bv.len() {
        if av[i].is_ascii_digit() && bv[j].is_ascii_digit() {
            let run_a = digit_run(&av, &mut i);
            let run_b = digit_run(&bv, &mut j);
            match compare_runs(run_a, run_b) {
                Ordering::Equal => {}
                other => return other,
            }
        } else {
            let ca = lower(av[i]);
            let cb = lower(bv[j]);
            match ca.cmp(&cb) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                other => return other,
            }
        }
    }

    match (av.len() - i).cmp(&(bv.len() - j)) {
        // Case-insensitively equal: fall back to the raw strings so the
        // ordering stays total and deterministic.
        Ordering::Equal => a.cmp(b),
        other => other,
    }
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Advance past the digit run starting at `*pos`, returning it.
fn digit_run<'a>(chars: &'a [char], pos: &mut usize) -> &'a [char] {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    &chars[start..*pos]
}

fn compare_runs(a: &[char], b: &[char]) -> Ordering {
    let sig_a = strip_leading_zeros(a);
    let sig_b = strip_leading_zeros(b);
    // More significant digits means a larger number; equal-value runs
    // (e.g. "007" vs "7") defer to the raw-string fallback.
    match sig_a.len().cmp(&sig_b.len()) {
        Ordering::Equal => sig_a.cmp(sig_b),
        other => other,
    }
}

fn strip_leading_zeros(run: &[char]) -> &[char] {
    let first = run.iter().position(|c| *c != '0').unwrap_or(run.len());
    &run[first..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_runs_compare_by_value() {
        assert_eq!(natural_cmp("Press 2", "Press 10"), Ordering::Less);
        assert_eq!(natural_cmp("r100", "r20"), Ordering::Greater);
        assert_eq!(natural_cmp("a2b", "a2b"), Ordering::Equal);
    }

    #[test]
    fn case_insensitive_with_stable_tiebreak() {
        assert_eq!(natural_cmp("oven", "OVEN 2"), Ordering::Less);
        // Equal ignoring case, but still a total order.
        assert_ne!(natural_cmp("Oven", "oven"), Ordering::Equal);
    }

    #[test]
    fn leading_zeros_do_not_change_value_order() {
        assert_eq!(natural_cmp("m007", "m7x"), Ordering::Less);
        assert_eq!(natural_cmp("m007", "m8"), Ordering::Less);
        assert_eq!(natural_cmp("m010", "m9"), Ordering::Greater);
    }

    #[test]
    fn sorting_resources_reads_naturally() {
        let mut names = vec!["Line 10", "Line 2", "Line 1", "Assembly"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["Assembly", "Line 1", "Line 2", "Line 10"]);
    }
}
