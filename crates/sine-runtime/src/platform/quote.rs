//! Quoting for the command lines handed to elevation helpers.

/// POSIX single-quoting: `foo'bar` becomes `'foo'\''bar'`.
#[cfg(any(target_os = "macos", test))]
pub fn shell_single_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Body of an AppleScript string literal.
#[cfg(any(target_os = "macos", test))]
pub fn applescript_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// PowerShell single-quoted literal.
#[cfg(any(windows, test))]
pub fn powershell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// One argument of a Windows command line, double-quoted when it holds
/// whitespace or quotes.
#[cfg(any(windows, test))]
pub fn windows_arg(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\t', '"']) {
        return value.to_string();
    }
    let mut out = String::from('"');
    let mut backslashes = 0;
    for ch in value.chars() {
        match ch {
            '\\' => backslashes += 1,
            '"' => {
                out.push_str(&"\\".repeat(backslashes * 2 + 1));
                out.push('"');
                backslashes = 0;
            }
            _ => {
                out.push_str(&"\\".repeat(backslashes));
                out.push(ch);
                backslashes = 0;
            }
        }
    }
    out.push_str(&"\\".repeat(backslashes * 2));
    out.push('"');
    out
}

/// PowerShell that starts `exe args` through a UAC prompt.
///
/// An elevated child gets a fresh environment block. When `env` is not
/// empty the prompt starts an elevated PowerShell that sets those variables
/// and then runs the installer.
#[cfg(any(windows, test))]
pub fn runas_script(exe: &str, args: &[String], env: &[(&str, String)]) -> String {
    let (file, arguments) = if env.is_empty() {
        let arguments: Vec<String> = args.iter().map(|arg| windows_arg(arg)).collect();
        (exe.to_string(), arguments.join(" "))
    } else {
        let mut inner: Vec<String> = env
            .iter()
            .map(|(key, value)| format!("$env:{key} = {};", powershell_quote(value)))
            .collect();
        inner.push(format!("& {}", powershell_quote(exe)));
        inner.extend(args.iter().map(|arg| powershell_quote(arg)));
        inner.push("; exit $LASTEXITCODE".to_string());
        let command = windows_arg(&inner.join(" "));
        (
            "powershell".to_string(),
            format!("-NoProfile -NonInteractive -Command {command}"),
        )
    };
    format!(
        "Start-Process -FilePath {} -ArgumentList {} -Verb RunAs",
        powershell_quote(&file),
        powershell_quote(&arguments)
    )
}
