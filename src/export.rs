//! Render a selection of catalog records as a downloadable script or list.

use std::fmt::Write as _;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::constants::{ALIAS_NAME_MAX_LEN, EXPORT_SOURCE};
use crate::error::ExportError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Bash,
    Aliases,
    Text,
}

impl ExportFormat {
    /// Parse a format name, falling back to a bash script for anything unknown.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    fn formatter(self) -> &'static dyn Formatter {
        match self {
            ExportFormat::Bash => &BashScript as &'static dyn Formatter,
            ExportFormat::Aliases => &AliasFile,
            ExportFormat::Text => &PlainText,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(ExportFormat::Bash),
            "aliases" => Ok(ExportFormat::Aliases),
            "text" => Ok(ExportFormat::Text),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedScript {
    pub filename: String,
    pub content: String,
    pub content_type: &'static str,
}

/// Turns a list of records into file content.
pub trait Formatter: Sync {
    fn extension(&self) -> &'static str;

    fn render(&self, name: &str, commands: &[&Command], generated_at: &str) -> String;
}

pub struct BashScript;
pub struct AliasFile;
pub struct PlainText;

impl Formatter for BashScript {
    fn extension(&self) -> &'static str {
        "sh"
    }

    fn render(&self, name: &str, commands: &[&Command], generated_at: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "#!/bin/bash");
        let _ = writeln!(out, "# Generated bash script: {name}");
        let _ = writeln!(out, "# Created on: {generated_at}");
        let _ = writeln!(out, "# {EXPORT_SOURCE} - Eksporter poleceń Linux\n");

        let _ = writeln!(out, "echo \"=== {} ===\"", echo_escape(&name.to_uppercase()));
        let _ = writeln!(out, "echo \"Eksportowane polecenia Linux z {EXPORT_SOURCE}\"");
        let _ = writeln!(out, "echo \"Data: $(date)\"");
        let _ = writeln!(out, "echo \"\"\n");

        for (i, cmd) in commands.iter().enumerate() {
            let n = i + 1;
            let _ = writeln!(out, "# {n}. {}", cmd.title);
            let _ = writeln!(out, "# {}", cmd.description);
            let _ = writeln!(out, "# Kategoria: {}", cmd.category);
            let _ = writeln!(out, "echo \"Polecenie {n}: {}\"", echo_escape(&cmd.title));
            let _ = writeln!(out, "echo \"Opis: {}\"", echo_escape(&cmd.description));
            let _ = writeln!(out, "echo \"Polecenie: {}\"", echo_escape(&cmd.command));
            // Left commented out; the user opts in to running it.
            let _ = writeln!(out, "# {}", cmd.command);
            let _ = writeln!(out, "echo \"\"\n");
        }

        let _ = writeln!(out, "echo \"=== KONIEC SKRYPTU ===\"");
        let _ = writeln!(out, "echo \"Uwaga: Polecenia są zakomentowane dla bezpieczeństwa.\"");
        let _ = writeln!(out, "echo \"Usuń # przed poleceniem aby je wykonać.\"");
        out
    }
}

impl Formatter for AliasFile {
    fn extension(&self) -> &'static str {
        "alias"
    }

    fn render(&self, name: &str, commands: &[&Command], generated_at: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# Bash aliases generated from {EXPORT_SOURCE}");
        let _ = writeln!(out, "# Created on: {generated_at}");
        let _ = writeln!(out, "# Użycie: source {name}.alias\n");

        for (i, cmd) in commands.iter().enumerate() {
            let _ = writeln!(out, "# {}", cmd.title);
            let _ = writeln!(out, "# {}", cmd.description);
            let _ = writeln!(
                out,
                "alias {}='{}'\n",
                alias_name(&cmd.title, i + 1),
                cmd.command.replace('\'', r"'\''")
            );
        }

        let _ = writeln!(out, "# Aby użyć aliasów, uruchom: source {name}.alias");
        out
    }
}

impl Formatter for PlainText {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, name: &str, commands: &[&Command], generated_at: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Polecenia Linux - {name}");
        let _ = writeln!(out, "Wygenerowane: {generated_at}");
        let _ = writeln!(out, "Źródło: {EXPORT_SOURCE}\n");

        for (i, cmd) in commands.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", i + 1, cmd.title);
            let _ = writeln!(out, "   {}", cmd.command);
            let _ = writeln!(out, "   {}\n", cmd.description);
        }
        out
    }
}

/// Escape text for a bash double-quoted string so `echo` prints it literally.
pub fn echo_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Script names end up in file names, headers and shell comments: only
/// `[A-Za-z0-9._-]` is accepted, and not a leading dot.
pub fn validate_script_name(name: &str) -> Result<(), ExportError> {
    let plain = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if plain {
        Ok(())
    } else {
        Err(ExportError::InvalidName(name.to_string()))
    }
}

/// Shell-safe alias name derived from a record title.
pub fn alias_name(title: &str, position: usize) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    let joined = kept.split_whitespace().collect::<Vec<_>>().join("_");
    let name: String = joined.chars().take(ALIAS_NAME_MAX_LEN).collect();
    if name.is_empty() {
        format!("cmd_{position}")
    } else {
        name
    }
}

pub fn export(
    commands: &[&Command],
    format: ExportFormat,
    script_name: &str,
    generated_at: DateTime<Utc>,
) -> Result<ExportedScript, ExportError> {
    validate_script_name(script_name)?;
    if commands.is_empty() {
        return Err(ExportError::NoCommands);
    }
    let formatter = format.formatter();
    let stamp = generated_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    Ok(ExportedScript {
        filename: format!("{script_name}.{}", formatter.extension()),
        content: formatter.render(script_name, commands, &stamp),
        content_type: "text/plain",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::record;
    use crate::command::Category;
    use chrono::TimeZone;

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<Command> {
        let mut df = record("df", Category::System, "Sprawdź wolne miejsce na dysku", &[]);
        df.command = "df -h".to_string();
        let mut ls = record("ls", Category::Files, "List all files", &[]);
        ls.command = "ls -la".to_string();
        vec![df, ls]
    }

    #[test]
    fn format_names() {
        assert_eq!(ExportFormat::from_name("aliases"), ExportFormat::Aliases);
        assert_eq!(ExportFormat::from_name("text"), ExportFormat::Text);
        assert_eq!(ExportFormat::from_name("pdf"), ExportFormat::Bash);
    }

    #[test]
    fn alias_names_are_ascii_and_bounded() {
        assert_eq!(alias_name("Sprawdź wolne miejsce na dysku", 1), "sprawd_wolne_miejsce_na_dysku");
        assert_eq!(alias_name("List  all   files!", 1), "list_all_files");
        assert_eq!(alias_name("żółć", 4), "cmd_4");
        let long = alias_name("a very long title that keeps going on and on", 1);
        assert_eq!(long.chars().count(), ALIAS_NAME_MAX_LEN);
    }

    #[test]
    fn bash_script_comments_out_commands() {
        let cmds = sample();
        let refs: Vec<&Command> = cmds.iter().collect();
        let out = export(&refs, ExportFormat::Bash, "backup", when()).unwrap();
        assert_eq!(out.filename, "backup.sh");
        assert_eq!(out.content_type, "text/plain");
        assert!(out.content.starts_with("#!/bin/bash\n"));
        assert!(out.content.contains("# Created on: 2024-05-01T12:00:00.000Z"));
        assert!(out.content.contains("echo \"=== BACKUP ===\""));
        assert!(out.content.contains("# Kategoria: system"));
        assert!(out.content.contains("\n# df -h\n"));
        assert!(out.content.contains("echo \"Polecenie 2: List all files\""));
        assert!(!out.content.lines().any(|l| l == "df -h"));
    }

    #[test]
    fn alias_file() {
        let cmds = sample();
        let refs: Vec<&Command> = cmds.iter().collect();
        let out = export(&refs, ExportFormat::Aliases, "mine", when()).unwrap();
        assert_eq!(out.filename, "mine.alias");
        assert!(out.content.contains("alias list_all_files='ls -la'"));
        assert!(out.content.contains("source mine.alias"));
    }

    #[test]
    fn plain_text_is_numbered() {
        let cmds = sample();
        let refs: Vec<&Command> = cmds.iter().collect();
        let out = export(&refs, ExportFormat::Text, "notes", when()).unwrap();
        assert_eq!(out.filename, "notes.txt");
        assert!(out.content.contains("1. Sprawdź wolne miejsce na dysku\n   df -h\n"));
        assert!(out.content.contains("2. List all files\n   ls -la\n"));
    }

    #[test]
    fn empty_selection_is_an_error() {
        assert_eq!(
            export(&[], ExportFormat::Text, "x", when()),
            Err(ExportError::NoCommands)
        );
    }

    #[test]
    fn script_name_must_be_plain() {
        assert!(validate_script_name("backup_2024-05.v1").is_ok());
        for bad in ["", "a\nb", "x\"; filename=\"evil.exe", "../../etc/cron", ".hidden", "a b"] {
            assert_eq!(
                validate_script_name(bad),
                Err(ExportError::InvalidName(bad.to_string()))
            );
        }

        let cmds = sample();
        let refs: Vec<&Command> = cmds.iter().collect();
        assert!(matches!(
            export(&refs, ExportFormat::Bash, "a\nrm -rf ~", when()),
            Err(ExportError::InvalidName(_))
        ));
    }

    #[test]
    fn echo_lines_print_commands_literally() {
        let mut find = record("find", Category::Files, "Znajdź pliki `txt`", &[]);
        find.command = r#"find . -name "*.txt""#.to_string();
        let mut sub = record("sub", Category::System, "Sub", &[]);
        sub.command = "echo $(whoami) 'x'".to_string();
        let refs = vec![&find, &sub];

        let out = export(&refs, ExportFormat::Bash, "safe", when()).unwrap();
        assert!(out.content.contains(r#"echo "Polecenie: find . -name \"*.txt\"""#));
        assert!(out.content.contains(r#"echo "Polecenie: echo \$(whoami) 'x'""#));
        assert!(out.content.contains(r#"echo "Polecenie 1: Znajdź pliki \`txt\`""#));
        // the commented copy stays runnable as written
        assert!(out.content.contains("\n# echo $(whoami) 'x'\n"));

        let aliases = export(&refs, ExportFormat::Aliases, "safe", when()).unwrap();
        assert!(aliases.content.contains(r#"='echo $(whoami) '\''x'\'''"#));
    }
}
