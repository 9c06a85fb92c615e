//! Rendering of estimates and errors for the terminal.

use colored::Colorize;

use petrocost_ai::{Alert, Estimate, InferenceError, OutputMode};

/// `$1,234,567.89`; negative values as `-$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// `+2.00%`, `-8.00%`; `n/a` when there is no planned cost to compare with.
pub fn format_pct(estimate: &Estimate) -> String {
    if estimate.has_baseline() {
        format!("{:+.2}%", estimate.deviation_pct)
    } else {
        "n/a".to_string()
    }
}

pub fn render_estimate(estimate: &Estimate) -> String {
    let mut out = format!(
        "{} {} USD\n",
        "Final estimate:".bold(),
        format_usd(estimate.final_cost).bold().green()
    );

    match estimate.mode {
        OutputMode::Direct => {
            out.push_str(&format!(
                "Deviation vs planned: {} ({})\n",
                format_usd(estimate.deviation),
                format_pct(estimate)
            ));
        }
        OutputMode::Overrun => {
            out.push_str(&format!("Overrun factor: {:.3}x\n", estimate.model_output));
            match estimate.alert {
                Alert::Overrun => out.push_str(&format!(
                    "{}\n",
                    format!(
                        "warning: sobrecosto expected, {} over plan ({})",
                        format_usd(estimate.deviation),
                        format_pct(estimate)
                    )
                    .yellow()
                )),
                Alert::Savings => out.push_str(&format!(
                    "{}\n",
                    format!(
                        "notice: savings expected, {} under plan ({})",
                        format_usd(-estimate.deviation),
                        format_pct(estimate)
                    )
                    .cyan()
                )),
                Alert::None => out.push_str("Within expected range of the plan.\n"),
            }
        }
    }

    out
}

pub fn render_json(estimate: &Estimate) -> String {
    serde_json::to_string_pretty(estimate).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

pub fn render_inference_error(err: &InferenceError) -> String {
    format!("{}", err.user_message().red())
}
