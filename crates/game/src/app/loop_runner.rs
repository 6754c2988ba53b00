use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use engine::{Direction, GameSession};
use tracing::{error, info};

use super::bootstrap::{AppWiring, HostConfig};
use super::terminal::TerminalHost;

const DIRECTIVE_PREFIX: char = ':';
const DIRECTIVE_HELP: &str =
    "Directives: :walk <up|down|left|right> [ticks], :wait [ticks], :where, :restore, :restart, :quit";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive {
    Walk {
        direction: Direction,
        ticks: Option<u32>,
    },
    Wait {
        ticks: Option<u32>,
    },
    Where,
    Restore,
    Restart,
    Quit,
    Help,
    Command(String),
}

pub(crate) fn parse_directive(line: &str) -> Result<Directive, String> {
    let trimmed = line.trim();
    let Some(body) = trimmed.strip_prefix(DIRECTIVE_PREFIX) else {
        return Ok(Directive::Command(trimmed.to_string()));
    };

    let tokens: Vec<&str> = body.split_whitespace().collect();
    let Some((name, args)) = tokens.split_first() else {
        return Err(format!("empty directive. {DIRECTIVE_HELP}"));
    };

    match name.to_ascii_lowercase().as_str() {
        "walk" | "w" => {
            let Some((raw_direction, rest)) = args.split_first() else {
                return Err("usage: :walk <up|down|left|right> [ticks]".to_string());
            };
            let direction = Direction::from_token(raw_direction)
                .ok_or_else(|| format!("unknown direction '{raw_direction}'"))?;
            let ticks = parse_optional_ticks(rest, ":walk <direction> [ticks]")?;
            Ok(Directive::Walk { direction, ticks })
        }
        "wait" => Ok(Directive::Wait {
            ticks: parse_optional_ticks(args, ":wait [ticks]")?,
        }),
        "where" => Ok(Directive::Where),
        "restore" => Ok(Directive::Restore),
        "restart" => Ok(Directive::Restart),
        "quit" | "q" => Ok(Directive::Quit),
        "help" => Ok(Directive::Help),
        other => Err(format!("unknown directive ':{other}'. {DIRECTIVE_HELP}")),
    }
}

fn parse_optional_ticks(args: &[&str], usage: &str) -> Result<Option<u32>, String> {
    match args {
        [] => Ok(None),
        [raw] => raw
            .parse::<u32>()
            .ok()
            .filter(|ticks| *ticks > 0)
            .map(Some)
            .ok_or_else(|| format!("invalid tick count '{raw}' (expected a positive integer)")),
        _ => Err(format!("usage: {usage}")),
    }
}

pub(crate) struct TerminalDriver<W: Write> {
    session: GameSession<TerminalHost<W>>,
    host_config: HostConfig,
    now_ms: f64,
}

impl<W: Write> TerminalDriver<W> {
    pub(crate) fn new(app: AppWiring, out: W) -> Self {
        let mut session = GameSession::new(app.engine_config, TerminalHost::new(out));
        session.install_world(app.world);
        Self {
            session,
            host_config: app.host_config,
            now_ms: 0.0,
        }
    }

    pub(crate) fn handle_line(&mut self, line: &str) -> bool {
        match parse_directive(line) {
            Ok(Directive::Quit) => return false,
            Ok(directive) => self.apply(directive),
            Err(message) => self.session.host_mut().print_line(&message),
        }
        true
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Walk { direction, ticks } => {
                self.session.set_directional_intent(direction, true);
                self.run_ticks(ticks.unwrap_or(self.host_config.ticks_per_step));
                self.session.set_directional_intent(direction, false);
            }
            Directive::Wait { ticks } => {
                self.run_ticks(ticks.unwrap_or(self.host_config.ticks_per_step));
            }
            Directive::Where => self.print_where(),
            Directive::Restore => self.session.restore(),
            Directive::Restart => self.session.restart(),
            Directive::Help => self.session.host_mut().print_line(DIRECTIVE_HELP),
            Directive::Command(text) => self.session.submit_command(&text),
            Directive::Quit => {}
        }
    }

    fn run_ticks(&mut self, ticks: u32) {
        let frame_ms = self.host_config.frame_ms();
        for _ in 0..ticks {
            self.now_ms += frame_ms;
            self.session.tick(self.now_ms);
        }
    }

    fn print_where(&mut self) {
        if self.session.host().last_frame().is_none() {
            self.run_ticks(1);
        }
        let line = match self.session.host().last_frame() {
            Some(frame) => format!(
                "{} ({}) at ({:.0}, {:.0}) elevation {:.1}, facing {}, score {}/{}",
                frame.room_name,
                frame.room_id,
                frame.position.x,
                frame.position.y,
                frame.elevation,
                frame.facing,
                frame.score,
                frame.max_score
            ),
            None => "Nowhere yet.".to_string(),
        };
        self.session.host_mut().print_line(&line);
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &GameSession<TerminalHost<W>> {
        &self.session
    }
}

pub(crate) fn run(app: AppWiring) -> ExitCode {
    let mut driver = TerminalDriver::new(app, io::stdout());
    driver.session.host_mut().print_line(DIRECTIVE_HELP);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!(error = %err, "stdin_read_failed");
                return ExitCode::FAILURE;
            }
        };
        if !driver.handle_line(&line) {
            break;
        }
    }

    info!(score = driver.session.score(), "session_ended");
    ExitCode::SUCCESS
}
