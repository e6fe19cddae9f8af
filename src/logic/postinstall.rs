//! Post-install guidance
//!
//! Some setup cannot be automated (interactive logins, first launches).
//! After a run, both front ends print the manual steps relevant to the
//! modules that were part of the plan.
//!
//! Guidance is keyed by module id and listed in a fixed order, independent of
//! plan order, so the numbering is stable between runs.

/// Manual steps per module id, in display order.
const MANUAL_STEPS: &[(&str, &[&str])] = &[
    (
        "ssh",
        &[
            "gh auth login",
            "gh ssh-key add ~/.ssh/id_ed25519.pub -t \"Mac\"",
        ],
    ),
    ("fish", &["Open a new terminal to start using Fish shell"]),
    ("neovim", &["Run nvim once to install LazyVim plugins"]),
];

/// Manual steps that apply when the given module ids ran.
pub fn manual_steps<S: AsRef<str>>(ids: &[S]) -> Vec<&'static str> {
    MANUAL_STEPS
        .iter()
        .filter(|(id, _)| ids.iter().any(|ran| ran.as_ref() == *id))
        .flat_map(|(_, steps)| steps.iter().copied())
        .collect()
}

/// Render the "Manual Steps" block with consecutive numbering.
pub fn render_manual_steps<S: AsRef<str>>(ids: &[S]) -> String {
    render_steps(&manual_steps(ids))
}

/// Number already-selected steps under the "Manual Steps" heading.
pub fn render_steps<S: AsRef<str>>(steps: &[S]) -> String {
    let mut out = String::from("  Manual Steps:\n\n");
    if steps.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }
    for (i, step) in steps.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, step.as_ref()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_steps_for_ssh() {
        let steps = manual_steps(&["ssh"]);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0], "gh auth login");
    }

    #[test]
    fn test_manual_steps_fixed_order() {
        let steps = manual_steps(&["neovim", "fish", "git"]);
        assert_eq!(
            steps,
            vec![
                "Open a new terminal to start using Fish shell",
                "Run nvim once to install LazyVim plugins",
            ]
        );
    }

    #[test]
    fn test_manual_steps_none() {
        assert!(manual_steps(&["git", "xcode"]).is_empty());
        assert!(manual_steps::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_render_numbers_consecutively() {
        let text = render_manual_steps(&["fish", "neovim"]);
        assert!(text.starts_with("  Manual Steps:"));
        assert!(text.contains("  1. Open a new terminal"));
        assert!(text.contains("  2. Run nvim once"));
    }

    #[test]
    fn test_render_empty() {
        let text = render_manual_steps(&["git"]);
        assert_eq!(text, "  Manual Steps:\n\n  (none)\n");
    }
}
