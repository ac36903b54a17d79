//! Line-oriented stdin adapter.
//!
//! Every plain line is treated as a clipboard capture. Lines starting with
//! `:` are commands against the history.

use std::path::PathBuf;

use anyhow::{bail, Result};

use cs_core::analytics::{StatsRange, DEFAULT_RECOMMENDATIONS};
use cs_core::clip::{ClipType, SortOrder};
use cs_core::ids::ClipId;
use cs_core::sync::ConflictResolution;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Capture(String),
    List(Option<SortOrder>),
    Search(String),
    Favorites,
    Filter(ClipType),
    ToggleFavorite(ClipId),
    Tag(ClipId, Vec<String>),
    Delete(ClipId),
    Clear,
    Sync,
    Pull,
    Push,
    Conflicts,
    Resolve(ClipId, ConflictResolution),
    Stats(StatsRange),
    Recommend(usize),
    Export(PathBuf),
    Import(PathBuf),
    Backup,
    Backups,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
:list [time|frequency|length]   show history
:search <text>                  case-insensitive search
:favorites                      show favorites
:filter <text|url|code|image>   show one type
:fav <id>                       toggle favorite
:tag <id> [tag ...]             replace tags
:delete <id>                    delete an item
:clear                          delete everything
:sync | :pull | :push           sync with the remote
:conflicts                      show pending conflicts
:resolve <id> <local|remote|both>
:stats [all|today|week|month]   usage statistics
:recommend [n]                  frequent and recent items
:export <path> | :import <path> backup file
:backup | :backups              backup to the data dir, list backups
:status                         sync status
:quit";

fn arg<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(rest)
}

fn clip_type(s: &str) -> Result<ClipType> {
    ClipType::ALL
        .into_iter()
        .find(|t| t.as_str() == s)
        .ok_or_else(|| anyhow::anyhow!("unknown type: {s}"))
}

pub fn parse_line(line: &str) -> Result<Command> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Capture(line.to_string()));
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let cmd = match name {
        "list" | "ls" => Command::List(match rest.trim() {
            "" => None,
            "time" => Some(SortOrder::Time),
            "frequency" => Some(SortOrder::Frequency),
            "length" => Some(SortOrder::Length),
            other => bail!("unknown sort order: {other}"),
        }),
        "search" => Command::Search(arg(rest, ":search <text>")?.to_string()),
        "favorites" => Command::Favorites,
        "filter" => Command::Filter(clip_type(arg(rest, ":filter <type>")?)?),
        "fav" => Command::ToggleFavorite(ClipId::from(arg(rest, ":fav <id>")?)),
        "tag" => {
            let mut parts = arg(rest, ":tag <id> [tag ...]")?.split_whitespace();
            let id = parts.next().unwrap_or_default();
            Command::Tag(ClipId::from(id), parts.map(str::to_string).collect())
        }
        "delete" | "rm" => Command::Delete(ClipId::from(arg(rest, ":delete <id>")?)),
        "clear" => Command::Clear,
        "sync" => Command::Sync,
        "pull" => Command::Pull,
        "push" => Command::Push,
        "conflicts" => Command::Conflicts,
        "resolve" => {
            let usage = ":resolve <id> <local|remote|both>";
            let (id, choice) = arg(rest, usage)?
                .split_once(' ')
                .ok_or_else(|| anyhow::anyhow!("usage: {usage}"))?;
            let resolution = match choice.trim() {
                "local" => ConflictResolution::KeepLocal,
                "remote" => ConflictResolution::KeepRemote,
                "both" => ConflictResolution::KeepBoth,
                _ => bail!("usage: {usage}"),
            };
            Command::Resolve(ClipId::from(id), resolution)
        }
        "stats" => Command::Stats(match rest.trim() {
            "" | "all" => StatsRange::All,
            "today" => StatsRange::Today,
            "week" => StatsRange::Week,
            "month" => StatsRange::Month,
            other => bail!("unknown range: {other}"),
        }),
        "recommend" => Command::Recommend(match rest.trim() {
            "" => DEFAULT_RECOMMENDATIONS,
            n => n
                .parse()
                .map_err(|_| anyhow::anyhow!("usage: :recommend [n]"))?,
        }),
        "export" => Command::Export(PathBuf::from(arg(rest, ":export <path>")?)),
        "import" => Command::Import(PathBuf::from(arg(rest, ":import <path>")?)),
        "backup" => Command::Backup,
        "backups" => Command::Backups,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => bail!("unknown command :{other}, try :help"),
    };
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_are_captures() {
        assert_eq!(
            parse_line("hello : world").unwrap(),
            Command::Capture("hello : world".to_string())
        );
    }

    #[test]
    fn commands_parse_arguments() {
        assert_eq!(parse_line(":list frequency").unwrap(), Command::List(Some(SortOrder::Frequency)));
        assert_eq!(parse_line(":filter url").unwrap(), Command::Filter(ClipType::Url));
        assert_eq!(
            parse_line(":tag abc work urgent").unwrap(),
            Command::Tag(ClipId::from("abc"), vec!["work".into(), "urgent".into()])
        );
        assert_eq!(
            parse_line(":resolve abc both").unwrap(),
            Command::Resolve(ClipId::from("abc"), ConflictResolution::KeepBoth)
        );
        assert_eq!(parse_line(":stats week").unwrap(), Command::Stats(StatsRange::Week));
        assert_eq!(parse_line(":recommend").unwrap(), Command::Recommend(10));
        assert_eq!(parse_line(":recommend 3").unwrap(), Command::Recommend(3));
        assert_eq!(parse_line(":backups").unwrap(), Command::Backups);
    }

    #[test]
    fn bad_commands_are_errors() {
        assert!(parse_line(":search").is_err());
        assert!(parse_line(":filter video").is_err());
        assert!(parse_line(":resolve abc").is_err());
        assert!(parse_line(":recommend lots").is_err());
        assert!(parse_line(":nope").is_err());
    }
}
