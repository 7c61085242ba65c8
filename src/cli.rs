//! Line commands for driving the page from a terminal.

use crate::errors::ViewError;
use crate::handlers::Outcome;
use crate::page::ids;
use crate::state::ViewController;
use crate::ui::render_page;

pub const HELP: &str = "\
commands:
  tab <save|gpa|chart>     switch the visible panel
  set <input-id> <value>   fill an input (save-name, save-course, save-score, gpa-name, chart-name)
  save | gpa | chart       run the panel's action
  show <id>                print an element's text
  html                     print the page as HTML
  quit                     leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tab(String),
    Set { id: String, value: String },
    Save,
    Gpa,
    Chart,
    Show(String),
    Html,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "tab" if !rest.is_empty() => Self::Tab(rest.to_owned()),
            "set" => {
                let (id, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if id.is_empty() {
                    return Err("usage: set <input-id> <value>".to_owned());
                }
                Self::Set {
                    id: id.to_owned(),
                    value: value.trim().to_owned(),
                }
            }
            "save" => Self::Save,
            "gpa" => Self::Gpa,
            "chart" => Self::Chart,
            "show" if !rest.is_empty() => Self::Show(rest.to_owned()),
            "html" => Self::Html,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(format!("unknown command '{line}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

pub enum Reply {
    Print(String),
    Quit,
}

pub async fn execute(controller: &ViewController, command: Command) -> Result<Reply, ViewError> {
    let text = match command {
        Command::Tab(panel) => {
            controller.switch_tab(&panel, &ids::tab_button(&panel)).await?;
            format!("showing {panel}")
        }
        Command::Set { id, value } => {
            controller.set_value(&id, &value).await?;
            format!("{id} = {value}")
        }
        Command::Save => {
            let outcome = controller.save_record().await?;
            region(controller, outcome, ids::SAVE_MESSAGE).await?
        }
        Command::Gpa => match controller.calculate_gpa().await? {
            Outcome::Shown => controller.text_content(ids::GPA_RESULT).await?,
            outcome => region(controller, outcome, ids::GPA_MESSAGE).await?,
        },
        Command::Chart => match controller.show_chart().await? {
            Outcome::Rejected => controller.text_content(ids::CHART_MESSAGE).await?,
            outcome => region(controller, outcome, ids::CHART_CONTAINER).await?,
        },
        Command::Show(id) => controller.text_content(&id).await?,
        Command::Html => render_page(&*controller.page.lock().await),
        Command::Help => HELP.to_owned(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Print(text))
}

async fn region(controller: &ViewController, outcome: Outcome, id: &str) -> Result<String, ViewError> {
    if outcome == Outcome::Superseded {
        return Ok("superseded by a newer request".to_owned());
    }
    controller.text_content(id).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_with_spaces_in_value() {
        let command = Command::parse("set save-course  Linear Algebra ").unwrap();
        assert_eq!(
            command,
            Some(Command::Set {
                id: "save-course".to_owned(),
                value: "Linear Algebra".to_owned(),
            })
        );
    }

    #[test]
    fn parses_plain_words() {
        assert_eq!(Command::parse("gpa").unwrap(), Some(Command::Gpa));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("   ").unwrap(), None);
        assert_eq!(
            Command::parse("tab chart").unwrap(),
            Some(Command::Tab("chart".to_owned()))
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete() {
        assert!(Command::parse("dance").is_err());
        assert!(Command::parse("tab").is_err());
        assert!(Command::parse("set").is_err());
    }
}
