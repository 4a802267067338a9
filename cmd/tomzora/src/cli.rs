//! Line-oriented command parsing for the terminal front end.

use anyhow::{anyhow, bail, Result};
use domains::{Filter, LedgerList, Orientation, SortOrder};
use services::Command;

pub const HELP: &str = "\
commands:
  search <text>        keyword search (blank clears it)
  clear                clear the search
  category <slug>      browse a topic, e.g. nature
  uncategory           leave the topic
  home                 back to the default listing
  orientation <o>      any | landscape | portrait | squarish
  color <name>         color filter for searches (blank clears it)
  sort <s>             latest | oldest | popular
  more                 load the next page
  retry                reissue the last failed page
  fav <id>             toggle a favorite
  view <id>            open a photo
  download <id>        download a photo
  random               a random photo
  details <id>         fetch one photo
  favorites | recent | downloads
  forget <list>        empty favorites, recent or downloads
  help | quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Help,
    Quit,
    Nothing,
}

pub fn parse_command(line: &str) -> Result<Input> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(Input::Nothing),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" | "q" => return Ok(Input::Quit),
        "search" | "s" => Command::Search(rest.to_string()),
        "clear" => Command::ClearSearch,
        "category" | "cat" => Command::SetCategory(required(verb, rest)?),
        "uncategory" => Command::ClearCategory,
        "home" => Command::Home,
        "orientation" => Command::SetFilter(Filter::Orientation(
            rest.parse::<Orientation>().map_err(|e| anyhow!(e))?,
        )),
        "color" => Command::SetFilter(Filter::Color(rest.to_string())),
        "sort" => Command::SetFilter(Filter::Sort(
            rest.parse::<SortOrder>().map_err(|e| anyhow!(e))?,
        )),
        "more" | "m" => Command::LoadMore,
        "retry" => Command::Retry,
        "fav" => Command::ToggleFavorite(required(verb, rest)?),
        "view" => Command::View(required(verb, rest)?),
        "download" | "dl" => Command::Download(required(verb, rest)?),
        "random" => Command::Random,
        "details" => Command::Details(required(verb, rest)?),
        "favorites" => Command::ShowLedger(LedgerList::Favorites),
        "recent" => Command::ShowLedger(LedgerList::RecentViews),
        "downloads" => Command::ShowLedger(LedgerList::Downloads),
        "forget" => Command::ClearLedger(ledger_list(rest)?),
        other => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(Input::Command(command))
}

fn required(verb: &str, rest: &str) -> Result<String> {
    if rest.is_empty() {
        bail!("'{verb}' needs an argument");
    }
    Ok(rest.to_string())
}

fn ledger_list(name: &str) -> Result<LedgerList> {
    match name.to_ascii_lowercase().as_str() {
        "favorites" => Ok(LedgerList::Favorites),
        "recent" => Ok(LedgerList::RecentViews),
        "downloads" => Ok(LedgerList::Downloads),
        other => bail!("unknown list '{other}'"),
    }
}
