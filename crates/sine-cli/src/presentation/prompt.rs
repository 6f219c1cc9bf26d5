//! Line-based prompts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::{Term, style};

/// What the user picked from a numbered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Pick(usize),
    Back,
    /// One of the extra single-letter options offered with the list.
    Key(char),
}

/// Interpret one line of list input.
///
/// Numbers are 1-based. An empty line keeps `current`. `b` goes back
/// unless it is claimed by `keys`.
pub fn parse_choice(
    input: &str,
    len: usize,
    current: Option<usize>,
    keys: &[char],
) -> Option<Choice> {
    let input = input.trim();
    if input.is_empty() {
        return current.filter(|&i| i < len).map(Choice::Pick);
    }
    if let Ok(n) = input.parse::<usize>() {
        return (1..=len).contains(&n).then(|| Choice::Pick(n - 1));
    }
    let mut chars = input.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let c = c.to_ascii_lowercase();
    if keys.contains(&c) {
        Some(Choice::Key(c))
    } else if c == 'b' {
        Some(Choice::Back)
    } else {
        None
    }
}

fn read_line(term: &Term, prompt: &str) -> Result<String> {
    term.write_str(&format!("{prompt} "))
        .context("Failed to write prompt")?;
    term.flush().context("Failed to flush terminal")?;
    term.read_line().context("Failed to read user input")
}

/// Show a numbered list and wait for a valid choice.
pub fn select(
    term: &Term,
    title: &str,
    items: &[&str],
    current: Option<usize>,
    keys: &[(char, &str)],
) -> Result<Choice> {
    term.write_line(&style(title).bold().to_string())?;
    for (i, item) in items.iter().enumerate() {
        let marker = if Some(i) == current { ">" } else { " " };
        term.write_line(&format!(" {marker} {}) {item}", i + 1))?;
    }
    for (key, label) in keys {
        term.write_line(&format!("   {key}) {label}"))?;
    }

    let letters: Vec<char> = keys.iter().map(|(k, _)| *k).collect();
    loop {
        let input = read_line(term, "Choice (number, b to go back):")?;
        match parse_choice(&input, items.len(), current, &letters) {
            Some(choice) => return Ok(choice),
            None => {
                let hint = style("Please pick one of the listed options.").yellow();
                term.write_line(&hint.to_string())?;
            }
        }
    }
}

/// Ask for a path; an empty answer keeps `current`.
pub fn read_path(term: &Term, label: &str, current: &std::path::Path) -> Result<PathBuf> {
    let input = read_line(term, &format!("{label} [{}]:", current.display()))?;
    let trimmed = input.trim();
    Ok(if trimmed.is_empty() {
        current.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    })
}

/// Yes/no question. Empty input takes `default`.
pub fn confirm(term: &Term, prompt: &str, default: bool) -> Result<bool> {
    let hint = if default { "(Y/n)" } else { "(y/N)" };
    loop {
        let input = read_line(term, &format!("{prompt} {hint}"))?;
        match input.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => term.write_line("Please enter 'y' for yes or 'n' for no.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_one_based() {
        assert_eq!(parse_choice("1", 3, None, &[]), Some(Choice::Pick(0)));
        assert_eq!(parse_choice(" 3 ", 3, None, &[]), Some(Choice::Pick(2)));
        assert_eq!(parse_choice("0", 3, None, &[]), None);
        assert_eq!(parse_choice("4", 3, None, &[]), None);
    }

    #[test]
    fn empty_line_keeps_current() {
        assert_eq!(parse_choice("", 3, Some(1), &[]), Some(Choice::Pick(1)));
        assert_eq!(parse_choice("", 3, None, &[]), None);
        assert_eq!(parse_choice("", 0, Some(0), &[]), None);
    }

    #[test]
    fn letters_map_to_back_and_extra_keys() {
        assert_eq!(parse_choice("b", 2, None, &[]), Some(Choice::Back));
        assert_eq!(parse_choice("A", 2, None, &['a']), Some(Choice::Key('a')));
        assert_eq!(parse_choice("x", 2, None, &['a']), None);
        assert_eq!(parse_choice("ab", 2, None, &['a']), None);
    }
}
