//! Terminal output formatting with colors.

use colored::Colorize;

use ipwpath_core::PathEstimate;

/// Format a PathEstimate for human-readable terminal output.
///
/// One row per estimand (ATE first, then the paths in decomposition order).
/// With bootstrap inference the interval and p-value columns are filled in
/// and estimands with p below `1 - confidence_level` are highlighted.
///
/// # Example output
///
/// ```text
/// ──────────────────────────────────────────────────────────────
///
///   Path-specific effects
///
///     Estimand              Estimate        95% CI              p
///     ATE                     2.4873   [ 2.2011,  2.7530]   0.000
///     D->Y                    1.0121   [ 0.8102,  1.2244]   0.000
///     D->M2->Y                0.4850   [ 0.3817,  0.5936]   0.000
///     D->M1~>Y                0.9902   [ 0.8710,  1.1120]   0.000
///
///   Bootstrap: 500 replications, seed 42, serial
///
/// ──────────────────────────────────────────────────────────────
/// ```
pub fn format_estimate(estimate: &PathEstimate) -> String {
    let mut out = String::new();
    let sep = "\u{2500}".repeat(62);

    out.push_str(&sep);
    out.push_str("\n\n");
    out.push_str(&format!("  {}\n\n", "Path-specific effects".bold()));

    let boot = estimate.bootstrap.as_ref();
    let ci_header = boot
        .map(|b| format!("{}% CI", (b.confidence_level * 100.0).round()))
        .unwrap_or_default();
    out.push_str(&format!(
        "    {:<20} {:>10}   {:<20} {:>6}\n",
        "Estimand", "Estimate", ci_header, if boot.is_some() { "p" } else { "" }
    ));

    let rows = std::iter::once(("ATE", estimate.ate))
        .chain(estimate.effects.iter().map(|e| (e.name.as_str(), e.value)));

    for (name, value) in rows {
        let mut line = format!("    {:<20} {:>10.4}", name, value);
        if let Some(b) = boot {
            if let Some(ci) = b.interval(name) {
                line.push_str(&format!("   [{:>8.4}, {:>8.4}]", ci.lower, ci.upper));
            }
            if let Some(p) = b.p_value(name) {
                let p_str = format!("{:>6.3}", p);
                if p < 1.0 - b.confidence_level {
                    line.push_str(&format!(" {}", p_str.green().bold()));
                } else {
                    line.push_str(&format!(" {}", p_str));
                }
            }
        }
        out.push_str(&line);
        out.push('\n');
    }

    if let Some(b) = boot {
        out.push_str(&format!(
            "\n  Bootstrap: {} replications, seed {}, {}\n",
            b.replications, b.seed, b.mode
        ));
    }

    if !estimate.advisories.is_empty() {
        out.push_str(&format!("\n  {} Advisories\n", "\u{26A0}".yellow()));
        for advisory in &estimate.advisories {
            out.push_str(&format!("    \u{2022} {}\n", advisory));
        }
    }

    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    out
}
